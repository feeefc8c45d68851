use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dataset::Category;
use crate::session::quiz::MistakeRecord;

const SCHEMA_VERSION: u32 = 1;

/// A word the user flagged for later study. Keyed by `(word, category)`;
/// outlives any single quiz session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionEntry {
    pub word: String,
    pub meaning: String,
    pub correct_answer: String,
    pub category: Category,
    pub added_at: DateTime<Utc>,
}

impl RevisionEntry {
    pub fn from_mistake(mistake: &MistakeRecord) -> Self {
        Self {
            word: mistake.word.clone(),
            meaning: mistake.meaning.clone(),
            correct_answer: mistake.correct_answer.clone(),
            category: mistake.category,
            added_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RevisionListData {
    pub schema_version: u32,
    pub entries: Vec<RevisionEntry>,
}

impl Default for RevisionListData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            entries: Vec::new(),
        }
    }
}

impl RevisionListData {
    pub fn contains(&self, word: &str, category: Category) -> bool {
        self.entries
            .iter()
            .any(|e| e.word == word && e.category == category)
    }

    /// Append if `(word, category)` is not already present. Returns whether
    /// the entry was added; a duplicate add is a no-op.
    pub fn add(&mut self, entry: RevisionEntry) -> bool {
        if self.contains(&entry.word, entry.category) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn remove(&mut self, word: &str, category: Category) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| !(e.word == word && e.category == category));
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Merge imported entries, keeping only new `(word, category)` pairs.
    /// Returns how many were actually added.
    pub fn merge(&mut self, entries: Vec<RevisionEntry>) -> usize {
        let mut added = 0;
        for entry in entries {
            if self.add(entry) {
                added += 1;
            }
        }
        added
    }
}

pub const EXPORT_VERSION: u32 = 1;

/// Download/upload document for the revision list. Version-checked on import;
/// a bare JSON array of entries is also accepted for hand-built files.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RevisionExport {
    pub lexiq_export_version: u32,
    pub exported_at: DateTime<Utc>,
    pub entries: Vec<RevisionEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, category: Category) -> RevisionEntry {
        RevisionEntry {
            word: word.to_string(),
            meaning: "m".to_string(),
            correct_answer: "a".to_string(),
            category,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn duplicate_add_is_a_no_op() {
        let mut list = RevisionListData::default();
        assert!(list.add(entry("diminish", Category::Antonyms)));
        assert!(!list.add(entry("diminish", Category::Antonyms)));
        assert_eq!(list.entries.len(), 1);
    }

    #[test]
    fn same_word_different_category_are_distinct() {
        let mut list = RevisionListData::default();
        assert!(list.add(entry("clear", Category::Antonyms)));
        assert!(list.add(entry("clear", Category::Synonyms)));
        assert_eq!(list.entries.len(), 2);
    }

    #[test]
    fn merge_counts_only_new_pairs() {
        let mut list = RevisionListData::default();
        list.add(entry("a", Category::Antonyms));

        let incoming = vec![
            entry("a", Category::Antonyms),
            entry("b", Category::Antonyms),
            entry("c", Category::Synonyms),
        ];
        assert_eq!(list.merge(incoming.clone()), 2);
        assert_eq!(list.entries.len(), 3);

        // Re-importing the same batch adds nothing.
        assert_eq!(list.merge(incoming), 0);
        assert_eq!(list.entries.len(), 3);
    }

    #[test]
    fn remove_by_key() {
        let mut list = RevisionListData::default();
        list.add(entry("a", Category::Antonyms));
        list.add(entry("a", Category::Synonyms));

        assert!(list.remove("a", Category::Antonyms));
        assert!(!list.remove("a", Category::Antonyms));
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.entries[0].category, Category::Synonyms);
    }
}
