//! Column metadata and field lookup.

use crate::error::ViewError;

/// One column of a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    /// Originating table or view name, used for `table.column` references.
    pub reference: Option<String>,
    pub column: String,
    pub aliases: Vec<String>,
    /// False for computed columns.
    pub from_table: bool,
}

impl HeaderField {
    pub fn new(reference: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            column: column.into(),
            aliases: Vec::new(),
            from_table: true,
        }
    }

    /// A column produced by a computation, named after its expression text.
    pub fn computed(column: impl Into<String>) -> Self {
        Self {
            reference: None,
            column: column.into(),
            aliases: Vec::new(),
            from_table: false,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    fn matches_name(&self, name: &str) -> bool {
        self.column.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    fn matches_reference(&self, qualifier: &str) -> bool {
        self.reference
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case(qualifier))
    }
}

/// Ordered column descriptors. Position `i` describes value `i` of every
/// record in the owning view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    fields: Vec<HeaderField>,
}

impl Header {
    pub fn from_fields(fields: Vec<HeaderField>) -> Self {
        Self { fields }
    }

    /// All columns originating from `reference`.
    pub fn new<S: AsRef<str>>(reference: &str, columns: &[S]) -> Self {
        Self {
            fields: columns
                .iter()
                .map(|c| HeaderField::new(reference, c.as_ref()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[HeaderField] {
        &self.fields
    }

    pub fn get(&self, position: usize) -> Option<&HeaderField> {
        self.fields.get(position)
    }

    /// Resolve a field reference to a position.
    ///
    /// With a qualifier only that table's fields are candidates. A bare name
    /// matching several fields is ambiguous.
    pub fn index_of(&self, qualifier: Option<&str>, name: &str) -> Result<usize, ViewError> {
        let display = match qualifier {
            Some(q) => format!("{q}.{name}"),
            None => name.to_string(),
        };

        let mut found = None;
        for (idx, field) in self.fields.iter().enumerate() {
            if let Some(q) = qualifier {
                if !field.matches_reference(q) {
                    continue;
                }
            }
            if !field.matches_name(name) {
                continue;
            }
            if found.is_some() {
                return Err(ViewError::AmbiguousField(display));
            }
            found = Some(idx);
        }
        found.ok_or(ViewError::FieldNotFound(display))
    }

    /// Whether any field originates from `qualifier`.
    pub fn contains_reference(&self, qualifier: &str) -> bool {
        self.fields.iter().any(|f| f.matches_reference(qualifier))
    }

    /// Whether `qualifier.name` names at least one field.
    pub fn contains(&self, qualifier: &str, name: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.matches_reference(qualifier) && f.matches_name(name))
    }

    pub(crate) fn push(&mut self, field: HeaderField) {
        self.fields.push(field);
    }
}
