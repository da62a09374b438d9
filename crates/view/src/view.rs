use quarry_types::Value;

use crate::error::ViewError;
use crate::header::{Header, HeaderField};
use crate::record::Record;

/// A header plus the records it describes. Every record is exactly as wide
/// as the header, including immediately after a column is appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    header: Header,
    records: Vec<Record>,
}

impl View {
    pub fn new(header: Header, records: Vec<Record>) -> Result<Self, ViewError> {
        for (idx, record) in records.iter().enumerate() {
            if record.len() != header.len() {
                return Err(ViewError::ColumnCountMismatch {
                    record: idx,
                    expected: header.len(),
                    found: record.len(),
                });
            }
        }
        Ok(Self { header, records })
    }

    /// Build a view whose columns all originate from `reference`.
    pub fn from_rows<S: AsRef<str>>(
        reference: &str,
        columns: &[S],
        rows: Vec<Vec<Value>>,
    ) -> Result<Self, ViewError> {
        View::new(
            Header::new(reference, columns),
            rows.into_iter().map(Record::new).collect(),
        )
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, idx: usize) -> Option<&Record> {
        self.records.get(idx)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_parts(self) -> (Header, Vec<Record>) {
        (self.header, self.records)
    }

    /// Append one column: `values[i]` goes to record `i`.
    ///
    /// The length check happens before anything is touched, so on error the
    /// view is unchanged.
    pub fn append_column(&mut self, field: HeaderField, values: Vec<Value>) -> Result<(), ViewError> {
        if values.len() != self.records.len() {
            return Err(ViewError::LengthMismatch {
                expected: self.records.len(),
                found: values.len(),
            });
        }

        tracing::trace!(column = %field.column, records = values.len(), "appending column");
        self.header.push(field);
        self.records = std::mem::take(&mut self.records)
            .into_iter()
            .zip(values)
            .map(|(mut record, value)| {
                record.push(value);
                record
            })
            .collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Value {
        Value::Integer(v)
    }

    fn sample() -> View {
        View::new(
            Header::new("table1", &["column1", "column2"]),
            vec![
                Record::with_group(7, vec![Value::string("a"), int(1)]),
                Record::with_group(7, vec![Value::string("a"), int(2)]),
                Record::new(vec![Value::string("b"), int(3)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_ragged_records() {
        let err = View::from_rows("t", &["a", "b"], vec![vec![int(1), int(2)], vec![int(1)]])
            .unwrap_err();
        assert_eq!(
            err,
            ViewError::ColumnCountMismatch {
                record: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn append_column_extends_header_and_every_record() {
        let mut view = sample();
        view.append_column(HeaderField::computed("n"), vec![int(10), int(20), int(30)])
            .unwrap();

        assert_eq!(view.header().len(), 3);
        assert_eq!(view.header().index_of(None, "n").unwrap(), 2);
        assert!(!view.header().get(2).unwrap().from_table);
        for (record, expected) in view.records().iter().zip([10, 20, 30]) {
            assert_eq!(record.len(), 3);
            assert_eq!(record.get(2), Some(&int(expected)));
        }
        assert_eq!(view.record(0).unwrap().group(), Some(7));
        assert_eq!(view.record(2).unwrap().group(), None);
        assert_eq!(view.record(1).unwrap().get(1), Some(&int(2)));
    }

    #[test]
    fn append_column_with_wrong_length_leaves_view_untouched() {
        let mut view = sample();
        let before = view.clone();
        let err = view
            .append_column(HeaderField::computed("n"), vec![int(1)])
            .unwrap_err();
        assert_eq!(err, ViewError::LengthMismatch { expected: 3, found: 1 });
        assert_eq!(view, before);
    }

    #[test]
    fn empty_view_accepts_empty_column() {
        let mut view = View::from_rows("t", &["a"], Vec::new()).unwrap();
        view.append_column(HeaderField::computed("n"), Vec::new()).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.header().len(), 2);
    }
}
