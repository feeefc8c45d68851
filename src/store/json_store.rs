use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;

use crate::store::schema::{EXPORT_VERSION, RevisionEntry, RevisionExport, RevisionListData};

const REVISION_FILE: &str = "revision_list.json";

/// JSON files under the platform data dir. Saves go through a tmp file and
/// rename so a crash mid-write cannot corrupt the list; an unreadable or
/// unparsable file loads as an empty list rather than an error.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lexiq");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    pub fn load_revision_list(&self) -> RevisionListData {
        let path = self.file_path(REVISION_FILE);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => RevisionListData::default(),
            }
        } else {
            RevisionListData::default()
        }
    }

    pub fn save_revision_list(&self, data: &RevisionListData) -> Result<()> {
        let path = self.file_path(REVISION_FILE);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Write the current revision list as a versioned export document.
    pub fn export_revision_list(&self, dest: &Path) -> Result<usize> {
        let data = self.load_revision_list();
        let export = RevisionExport {
            lexiq_export_version: EXPORT_VERSION,
            exported_at: Utc::now(),
            entries: data.entries,
        };
        let json = serde_json::to_string_pretty(&export)?;
        fs::write(dest, json).with_context(|| format!("writing export to {}", dest.display()))?;
        Ok(export.entries.len())
    }

    /// Merge an exported document (or a bare entry array) into the stored
    /// list, deduplicating by `(word, category)`. Returns how many entries
    /// were new. A malformed or wrong-version file aborts before any state
    /// is touched.
    pub fn import_revision_list(&self, src: &Path) -> Result<usize> {
        let content =
            fs::read_to_string(src).with_context(|| format!("reading {}", src.display()))?;
        let entries = parse_import(&content)?;

        let mut data = self.load_revision_list();
        let added = data.merge(entries);
        if added > 0 {
            self.save_revision_list(&data)?;
        }
        Ok(added)
    }
}

fn parse_import(content: &str) -> Result<Vec<RevisionEntry>> {
    if let Ok(export) = serde_json::from_str::<RevisionExport>(content) {
        if export.lexiq_export_version != EXPORT_VERSION {
            bail!(
                "Unsupported export version: {} (expected {})",
                export.lexiq_export_version,
                EXPORT_VERSION
            );
        }
        return Ok(export.entries);
    }
    if let Ok(entries) = serde_json::from_str::<Vec<RevisionEntry>>(content) {
        return Ok(entries);
    }
    bail!("Not a revision list export: expected an export document or an array of entries");
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::dataset::Category;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    fn entry(word: &str) -> RevisionEntry {
        RevisionEntry {
            word: word.to_string(),
            meaning: "m".to_string(),
            correct_answer: "a".to_string(),
            category: Category::Antonyms,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn missing_file_loads_as_empty_list() {
        let (_dir, store) = make_test_store();
        assert!(store.load_revision_list().entries.is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty_list() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(REVISION_FILE), "{ not json").unwrap();
        assert!(store.load_revision_list().entries.is_empty());
    }

    #[test]
    fn save_then_load_round_trip() {
        let (_dir, store) = make_test_store();
        let mut data = RevisionListData::default();
        data.add(entry("diminish"));
        data.add(entry("obscure"));
        store.save_revision_list(&data).unwrap();

        let loaded = store.load_revision_list();
        assert_eq!(loaded.entries.len(), 2);
        assert_eq!(loaded.entries[0].word, "diminish");
        // No residual tmp file after an atomic save
        assert!(!store.file_path(REVISION_FILE).with_extension("tmp").exists());
    }

    #[test]
    fn import_rejects_wrong_version_without_touching_state() {
        let (dir, store) = make_test_store();
        let mut data = RevisionListData::default();
        data.add(entry("keep"));
        store.save_revision_list(&data).unwrap();

        let bad = RevisionExport {
            lexiq_export_version: 99,
            exported_at: Utc::now(),
            entries: vec![entry("new")],
        };
        let src = dir.path().join("bad.json");
        fs::write(&src, serde_json::to_string(&bad).unwrap()).unwrap();

        let err = store.import_revision_list(&src).unwrap_err();
        assert!(err.to_string().contains("Unsupported export version"));
        let after = store.load_revision_list();
        assert_eq!(after.entries.len(), 1);
        assert_eq!(after.entries[0].word, "keep");
    }

    #[test]
    fn import_rejects_wrong_shape() {
        let (dir, store) = make_test_store();
        let src = dir.path().join("shape.json");
        fs::write(&src, r#"{"words": ["not", "entries"]}"#).unwrap();

        let err = store.import_revision_list(&src).unwrap_err();
        assert!(err.to_string().contains("Not a revision list export"));
    }

    #[test]
    fn import_accepts_bare_entry_array() {
        let (dir, store) = make_test_store();
        let src = dir.path().join("array.json");
        let entries = vec![entry("one"), entry("two")];
        fs::write(&src, serde_json::to_string(&entries).unwrap()).unwrap();

        assert_eq!(store.import_revision_list(&src).unwrap(), 2);
        assert_eq!(store.load_revision_list().entries.len(), 2);
    }

    #[test]
    fn reimporting_same_file_adds_nothing() {
        let (dir, store) = make_test_store();
        let mut data = RevisionListData::default();
        data.add(entry("one"));
        store.save_revision_list(&data).unwrap();

        let dest = dir.path().join("export.json");
        assert_eq!(store.export_revision_list(&dest).unwrap(), 1);

        assert_eq!(store.import_revision_list(&dest).unwrap(), 0);
        assert_eq!(store.load_revision_list().entries.len(), 1);
    }
}
