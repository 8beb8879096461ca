//! Storage trait definitions and filter types.
//!
//! The store is a plain key-value service: records live in named
//! collections, addressed by a string key, and can be read back one at a
//! time, scanned, or queried with equality filters.

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

/// An equality filter on a top-level record field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Field name as it appears in the stored JSON
    pub field: String,
    /// Value the field must equal
    pub value: serde_json::Value,
}

impl Filter {
    /// Create an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Serialize) -> Self {
        Self {
            field: field.into(),
            value: serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
        }
    }

    /// Check if a stored record matches this filter.
    pub fn matches(&self, record: &serde_json::Value) -> bool {
        match record.get(&self.field) {
            Some(v) => *v == self.value,
            None => self.value.is_null(),
        }
    }
}

/// A record type stored in its own collection.
pub trait Record: Serialize + DeserializeOwned {
    /// Collection (table) the record type lives in
    const COLLECTION: &'static str;

    /// The record's unique key within its collection
    fn key(&self) -> &str;
}

/// Key-value storage operations.
///
/// `put` is an upsert. Single-key writes are atomic; nothing spans keys.
pub trait Storage: Send + Sync {
    /// Insert or replace a record.
    fn put<T: Record>(&self, record: &T) -> Result<()>;

    /// Get a record by key.
    fn get<T: Record>(&self, key: &str) -> Result<Option<T>>;

    /// Delete a record by key. Returns whether it existed.
    fn delete<T: Record>(&self, key: &str) -> Result<bool>;

    /// All records matching every filter.
    fn query<T: Record>(&self, filters: &[Filter]) -> Result<Vec<T>>;

    /// All records in the collection.
    fn scan<T: Record>(&self) -> Result<Vec<T>> {
        self.query(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_eq_matches() {
        let filter = Filter::eq("regressivoId", "abc");
        let record = json!({"squadModuloId": "1", "regressivoId": "abc"});
        assert!(filter.matches(&record));
    }

    #[test]
    fn test_filter_eq_no_match() {
        let filter = Filter::eq("statusGeral", "ativo");
        let record = json!({"regressivoId": "1", "statusGeral": "finalizado"});
        assert!(!filter.matches(&record));
    }

    #[test]
    fn test_filter_missing_field_matches_null_only() {
        let record = json!({"id": "1"});
        assert!(Filter::eq("slaFim", serde_json::Value::Null).matches(&record));
        assert!(!Filter::eq("slaFim", "2025-01-01").matches(&record));
    }
}
