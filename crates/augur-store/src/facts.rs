//! Line-oriented fact file

use crate::StoreError;
use augur_domain::Fact;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Fact database backed by a plain text file
///
/// The in-memory list mirrors the file as of the last [`fetch`](Self::fetch)
/// plus the mutations made through this store. Lines are compared by exact
/// text, so an indented copy of a fact is a different line.
///
/// Every write replaces the file atomically (temp file in the same
/// directory, then rename), so concurrent readers never see a torn file.
#[derive(Debug, Clone)]
pub struct FactStore {
    path: PathBuf,
    facts: Vec<String>,
}

impl FactStore {
    /// Create a store for `path`; nothing is read yet
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            facts: Vec::new(),
        }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reload the in-memory list from the file
    ///
    /// Blank lines are skipped and repeated lines keep only their first
    /// occurrence. Other lines are kept verbatim. Anything held in memory
    /// before is discarded.
    pub fn fetch(&mut self) -> Result<&[String], StoreError> {
        let text = self.read()?;

        let mut seen = HashSet::new();
        self.facts = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter(|line| seen.insert(*line))
            .map(str::to_string)
            .collect();

        info!(path = %self.path.display(), facts = self.facts.len(), "Fetched facts");
        Ok(self.facts.as_slice())
    }

    /// Facts currently held in memory, in file order
    pub fn facts(&self) -> &[String] {
        &self.facts
    }

    /// Is `fact` in the in-memory list?
    pub fn contains(&self, fact: &Fact) -> bool {
        self.facts.iter().any(|f| f == fact.as_str())
    }

    /// In-memory facts joined into program text
    pub fn program_text(&self) -> String {
        let mut text = self.facts.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }

    /// Append `fact` unless the file already has a line equal to it
    ///
    /// Returns `true` when the file was changed. The in-memory list gains
    /// the fact either way.
    pub fn add_fact(&mut self, fact: &Fact) -> Result<bool, StoreError> {
        let text = self.read()?;
        let present = text.lines().any(|line| line == fact.as_str());

        if !present {
            let mut updated = text;
            if !updated.is_empty() && !updated.ends_with('\n') {
                updated.push('\n');
            }
            updated.push_str(fact.as_str());
            updated.push('\n');
            self.write(&updated)?;
        }

        if !self.contains(fact) {
            self.facts.push(fact.as_str().to_string());
        }

        debug!(fact = %fact, appended = !present, "Added fact");
        Ok(!present)
    }

    /// Remove every line equal to `fact`
    ///
    /// Returns the number of lines removed; zero is not an error. Other
    /// lines, including blank ones, are written back untouched.
    pub fn remove_fact(&mut self, fact: &Fact) -> Result<usize, StoreError> {
        let text = self.read()?;

        let mut removed = 0;
        let mut updated = String::with_capacity(text.len());
        for line in text.lines() {
            if line == fact.as_str() {
                removed += 1;
            } else {
                updated.push_str(line);
                updated.push('\n');
            }
        }

        if removed > 0 {
            self.write(&updated)?;
        }
        self.facts.retain(|f| f != fact.as_str());

        debug!(fact = %fact, removed, "Removed fact");
        Ok(removed)
    }

    fn read(&self) -> Result<String, StoreError> {
        fs::read_to_string(&self.path).map_err(|e| StoreError::unavailable(&self.path, e))
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        let unavailable = |e: io::Error| StoreError::unavailable(&self.path, e);

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let permissions = fs::metadata(&self.path).map_err(unavailable)?.permissions();

        // the guard deletes the temp file on any early return
        let mut tmp = NamedTempFile::new_in(dir).map_err(unavailable)?;
        tmp.write_all(contents.as_bytes()).map_err(unavailable)?;
        tmp.as_file().sync_all().map_err(unavailable)?;
        tmp.as_file().set_permissions(permissions).map_err(unavailable)?;
        tmp.persist(&self.path).map_err(|e| unavailable(e.error))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(contents: &str) -> (TempDir, FactStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("facts.pl");
        fs::write(&path, contents).unwrap();
        (dir, FactStore::new(path))
    }

    #[test]
    fn test_new_store_reads_nothing() {
        let store = FactStore::new("/nonexistent/facts.pl");
        assert!(store.facts().is_empty());
    }

    #[test]
    fn test_fetch_skips_blank_lines_and_duplicates() {
        let (_dir, mut store) = store_with("admin(abc).\n\n   \nadmin(def).\nadmin(abc).\n\n");
        let facts = store.fetch().unwrap();
        assert_eq!(facts, ["admin(abc).", "admin(def)."]);
    }

    #[test]
    fn test_program_text() {
        let (_dir, mut store) = store_with("a(b).\nc(d).");
        store.fetch().unwrap();
        assert_eq!(store.program_text(), "a(b).\nc(d).\n");

        let (_dir, mut empty) = store_with("");
        empty.fetch().unwrap();
        assert_eq!(empty.program_text(), "");
    }

    #[test]
    fn test_add_fact_without_trailing_newline() {
        let (_dir, mut store) = store_with("admin(abc).");
        let fact = Fact::new("admin(xyz).").unwrap();

        assert!(store.add_fact(&fact).unwrap());
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "admin(abc).\nadmin(xyz).\n");
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let (dir, mut store) = store_with("");
        store.add_fact(&Fact::new("admin(xyz).").unwrap()).unwrap();

        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_remove_keeps_other_lines_verbatim() {
        let (_dir, mut store) = store_with("a(b).\n\nadmin(def).\nc(d).\n");
        let removed = store.remove_fact(&Fact::new("admin(def).").unwrap()).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "a(b).\n\nc(d).\n");
    }

    #[test]
    fn test_lines_compare_exactly() {
        let (_dir, mut store) = store_with("  admin(def).\nadmin(abc).\n");
        store.fetch().unwrap();
        assert_eq!(store.facts(), ["  admin(def).", "admin(abc)."]);

        let fact = Fact::new("admin(def).").unwrap();
        assert!(!store.contains(&fact));
        assert_eq!(store.remove_fact(&fact).unwrap(), 0);
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "  admin(def).\nadmin(abc).\n"
        );

        assert!(store.add_fact(&fact).unwrap());
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "  admin(def).\nadmin(abc).\nadmin(def).\n"
        );
    }
}
