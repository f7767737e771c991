use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::Rating;

/// In-memory rating matrix: user -> { item -> raw rating value }.
///
/// Built once from the ratings document before any scoring call and never
/// mutated afterwards, so concurrent requests share it without locking.
/// BTreeMap keys give a deterministic (lexicographic) iteration order, which
/// the neighbor ranking relies on for reproducible tie-breaks.
#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    users: BTreeMap<String, BTreeMap<String, f64>>,
}

impl RatingStore {
    /// Builds a store from an already-materialized user -> ratings mapping
    pub fn from_users(users: BTreeMap<String, BTreeMap<String, f64>>) -> Self {
        Self { users }
    }

    /// Parses the ratings document: a JSON object keyed by user name, each
    /// value an object keyed by item name mapping to a numeric rating.
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        let users: BTreeMap<String, BTreeMap<String, f64>> = serde_json::from_str(raw)
            .map_err(|e| AppError::Dataset(format!("Failed to parse ratings document: {}", e)))?;
        Ok(Self { users })
    }

    /// Reads and parses the ratings document from disk
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Dataset(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    /// Returns true when the user exists in the store
    pub fn contains_user(&self, user: &str) -> bool {
        self.users.contains_key(user)
    }

    /// All user names in deterministic (lexicographic) order
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    /// Raw rating map of one user, if present
    pub fn ratings_of(&self, user: &str) -> Option<&BTreeMap<String, f64>> {
        self.users.get(user)
    }

    /// The user's opinion of an item, with the `0`/absent sentinel resolved
    pub fn rating(&self, user: &str, item: &str) -> Rating {
        match self.users.get(user).and_then(|ratings| ratings.get(item)) {
            Some(&value) => Rating::from_value(value),
            None => Rating::Unrated,
        }
    }

    /// Number of users in the store
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_str() {
        let store = RatingStore::from_json_str(
            r#"{"Alice": {"M1": 5.0, "M2": 3.0}, "Bob": {"M1": 4.0}}"#,
        )
        .unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.contains_user("Alice"));
        assert!(store.contains_user("Bob"));
        assert!(!store.contains_user("Carol"));
        assert_eq!(store.rating("Alice", "M2"), Rating::Rated(3.0));
    }

    #[test]
    fn test_from_json_str_rejects_non_numeric_rating() {
        let result = RatingStore::from_json_str(r#"{"Alice": {"M1": "five"}}"#);
        assert!(matches!(result, Err(AppError::Dataset(_))));
    }

    #[test]
    fn test_users_iterate_in_lexicographic_order() {
        let store = RatingStore::from_json_str(
            r#"{"Carol": {}, "Alice": {}, "Bob": {}}"#,
        )
        .unwrap();

        let users: Vec<&str> = store.users().collect();
        assert_eq!(users, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_rating_resolves_sentinel() {
        let store =
            RatingStore::from_json_str(r#"{"Alice": {"M1": 5.0, "M2": 0.0}}"#).unwrap();

        assert_eq!(store.rating("Alice", "M1"), Rating::Rated(5.0));
        // Stored zero and absent key both mean "no opinion"
        assert_eq!(store.rating("Alice", "M2"), Rating::Unrated);
        assert_eq!(store.rating("Alice", "M3"), Rating::Unrated);
        assert_eq!(store.rating("Bob", "M1"), Rating::Unrated);
    }
}
