//! Common shape of the records kept in the document store

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::BloodBankError;

/// A top-level record stored in its own collection
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// Collection the record lives in
    const COLLECTION: &'static str;
    /// Stored field lists are ordered by, newest first
    const ORDER_FIELD: &'static str;
    /// Human readable record name used in messages
    const NAME: &'static str;

    /// Store-assigned identifier, `None` until persisted
    fn document_id(&self) -> Option<&str>;

    /// Return the record with its identifier set
    fn with_id(self, id: String) -> Self;

    /// Value of [`Record::ORDER_FIELD`]
    fn ordered_at(&self) -> DateTime<Utc>;
}

/// Collects required-field problems on an incoming payload so they can be
/// reported together.
#[derive(Debug)]
pub(crate) struct FieldCheck {
    record: &'static str,
    issues: Vec<String>,
}

impl FieldCheck {
    pub(crate) fn new(record: &'static str) -> Self {
        Self { record, issues: Vec::new() }
    }

    /// Required text: present and not blank
    pub(crate) fn text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(value) if !value.trim().is_empty() => Some(value),
            _ => {
                self.issues.push(format!("`{field}` is required"));
                None
            }
        }
    }

    /// Required value of any other type
    pub(crate) fn present<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.issues.push(format!("`{field}` is required"));
        }
        value
    }

    /// Text that may be omitted but must not be blank when given
    pub(crate) fn not_blank(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.issues.push(format!("`{field}` is required"));
        }
    }

    pub(crate) fn issue(&mut self, issue: impl Into<String>) {
        self.issues.push(issue.into());
    }

    pub(crate) fn finish(self) -> Result<(), BloodBankError> {
        if self.issues.is_empty() { Ok(()) } else { Err(self.into_error()) }
    }

    pub(crate) fn into_error(self) -> BloodBankError {
        BloodBankError::validation_errors(self.record, self.issues)
    }
}
