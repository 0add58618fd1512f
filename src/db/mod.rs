//! Record store (in-process memory).
//!
//! Each entity type lives in its own [`Table`], keyed by the record id.
//! Finders are linear scans; the dataset is tens to low thousands of rows.

pub mod memory;
pub mod seed;

pub use memory::{MemoryDb, Tables};
pub use seed::{SeedData, SeedError};

use crate::models::{BusyTime, Cafe, Favorite, Post, Promotion, Review, User, Visit};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// A row that knows its own primary key.
pub trait Record {
    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(impl Record for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_record!(User, Cafe, Review, Visit, Favorite, BusyTime, Promotion, Post);

/// Id-keyed collection of one entity type.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: HashMap<String, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }
}

impl<T: Record> Table<T> {
    pub fn get(&self, id: &str) -> Option<&T> {
        self.rows.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.rows.get_mut(id)
    }

    /// Insert or overwrite, keyed by the row's own id. Returns the replaced row.
    pub fn set(&mut self, row: T) -> Option<T> {
        self.rows.insert(row.id().to_string(), row)
    }

    pub fn delete(&mut self, id: &str) -> Option<T> {
        self.rows.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    /// All rows matching `pred`, in no particular order.
    pub fn find<F>(&self, pred: F) -> Vec<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows.values().filter(|row| pred(row)).collect()
    }

    pub fn find_one<F>(&self, pred: F) -> Option<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows.values().find(|row| pred(row))
    }

    pub fn count<F>(&self, pred: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        self.rows.values().filter(|row| pred(row)).count()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

static ID_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Generate a process-unique record id such as `review-m2x4k1-17`.
pub fn new_id(prefix: &str) -> String {
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    format!("{}-{}-{}", prefix, to_base36(millis), seq)
}

pub(crate) fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn favorite(id: &str, user: &str, cafe: &str) -> Favorite {
        Favorite {
            id: id.to_string(),
            user_id: user.to_string(),
            cafe_id: cafe.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_table_set_get_delete() {
        let mut table = Table::default();
        assert!(table.set(favorite("fav-1", "u1", "c1")).is_none());
        assert!(table.set(favorite("fav-1", "u1", "c2")).is_some());
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("fav-1").map(|f| f.cafe_id.as_str()), Some("c2"));

        assert!(table.delete("fav-1").is_some());
        assert!(table.delete("fav-1").is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_table_finders() {
        let mut table = Table::default();
        table.set(favorite("fav-1", "u1", "c1"));
        table.set(favorite("fav-2", "u1", "c2"));
        table.set(favorite("fav-3", "u2", "c1"));

        assert_eq!(table.find(|f| f.user_id == "u1").len(), 2);
        assert_eq!(table.count(|f| f.cafe_id == "c1"), 2);
        assert_eq!(
            table
                .find_one(|f| f.user_id == "u2" && f.cafe_id == "c1")
                .map(|f| f.id.as_str()),
            Some("fav-3")
        );
        assert!(table.find_one(|f| f.user_id == "u3").is_none());
    }

    #[test]
    fn test_new_id_is_unique_and_prefixed() {
        let a = new_id("visit");
        let b = new_id("visit");
        assert!(a.starts_with("visit-"));
        assert_ne!(a, b);
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
