//! ID generation utilities
//!
//! Cycles and ledger entries are keyed by random UUID v4 strings, generated
//! once at creation and never reused.

use uuid::Uuid;

/// Generate a unique regression cycle ID
pub fn generate_cycle_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a unique ledger entry ID
pub fn generate_entry_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_cycle_id_format() {
        let id = generate_cycle_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id.split('-').count(), 5);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generate_ids_are_unique() {
        assert_ne!(generate_cycle_id(), generate_cycle_id());
        assert_ne!(generate_entry_id(), generate_entry_id());
    }
}
