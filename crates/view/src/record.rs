use quarry_types::Value;

/// A row of values, positionally matching its view's header.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Rows split from the same source row (e.g. by unnesting) share a group.
    group: Option<u64>,
    values: Vec<Value>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            group: None,
            values,
        }
    }

    pub fn with_group(group: u64, values: Vec<Value>) -> Self {
        Self {
            group: Some(group),
            values,
        }
    }

    pub fn group(&self) -> Option<u64> {
        self.group
    }

    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.values.push(value);
    }
}

impl From<Vec<Value>> for Record {
    fn from(values: Vec<Value>) -> Self {
        Record::new(values)
    }
}
