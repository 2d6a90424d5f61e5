use crate::color::Rgb;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A saved color. `hex` is stored alongside `rgb` so exported files are
/// readable on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub rgb: Rgb,
    pub name: String,
    pub hex: String,
}

impl FavoriteEntry {
    pub fn new(rgb: Rgb, name: impl Into<String>) -> Self {
        Self {
            rgb,
            name: name.into(),
            hex: rgb.to_hex(),
        }
    }
}

/// User favorites, unique by `rgb`, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list, keeping the first entry for any repeated color.
    pub fn from_entries(entries: Vec<FavoriteEntry>) -> Self {
        let mut favorites = Self::new();
        for entry in entries {
            if !favorites.add(entry) {
                tracing::debug!("dropping repeated favorite color");
            }
        }
        favorites
    }

    /// Append unless the color is already saved. Returns whether it was added.
    pub fn add(&mut self, entry: FavoriteEntry) -> bool {
        if self.contains(entry.rgb) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn contains(&self, rgb: Rgb) -> bool {
        self.entries.iter().any(|e| e.rgb == rgb)
    }

    pub fn remove(&mut self, index: usize) -> Option<FavoriteEntry> {
        if index >= self.entries.len() {
            return None;
        }
        Some(self.entries.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&FavoriteEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(&self.entries).context("serialize favorites")
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let entries: Vec<FavoriteEntry> =
            serde_json::from_str(raw).context("favorites must be a JSON array of {rgb, name, hex}")?;
        Ok(Self::from_entries(entries))
    }

    /// Replace the whole list with the contents of `path`. On any error the
    /// current list is left untouched. Returns the number of entries loaded.
    pub fn import_file(&mut self, path: &Path) -> anyhow::Result<usize> {
        let raw = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let imported = Self::from_json(&raw).with_context(|| format!("parse {}", path.display()))?;
        *self = imported;
        tracing::info!(path = %path.display(), count = self.len(), "imported favorites");
        Ok(self.len())
    }

    /// Write the list to `path` as pretty JSON. Refuses an empty list.
    pub fn export_file(&self, path: &Path) -> anyhow::Result<usize> {
        if self.is_empty() {
            anyhow::bail!("no favorites to export");
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
        }
        let raw = self.to_json()?;
        std::fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
        tracing::info!(path = %path.display(), count = self.len(), "exported favorites");
        Ok(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Favorites {
        let mut favs = Favorites::new();
        favs.add(FavoriteEntry::new(Rgb::new(255, 0, 0), "红色"));
        favs.add(FavoriteEntry::new(Rgb::new(0, 128, 0), "green"));
        favs.add(FavoriteEntry::new(Rgb::new(1, 2, 3), "approx \"near black\""));
        favs
    }

    #[test]
    fn test_entry_hex() {
        assert_eq!(FavoriteEntry::new(Rgb::new(10, 0, 171), "x").hex, "#0A00AB");
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut favs = sample();
        let before = favs.len();
        assert!(!favs.add(FavoriteEntry::new(Rgb::new(255, 0, 0), "other name")));
        assert_eq!(favs.len(), before);
        assert_eq!(favs.get(0).unwrap().name, "红色");
    }

    #[test]
    fn test_remove() {
        let mut favs = sample();
        let removed = favs.remove(1).unwrap();
        assert_eq!(removed.name, "green");
        assert_eq!(favs.len(), 2);
        assert!(favs.remove(10).is_none());
    }

    #[test]
    fn test_export_then_import_reproduces_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("favorites.json");
        let favs = sample();
        assert_eq!(favs.export_file(&path).unwrap(), 3);

        let mut other = Favorites::new();
        other.add(FavoriteEntry::new(Rgb::WHITE, "white"));
        assert_eq!(other.import_file(&path).unwrap(), 3);
        assert_eq!(other, favs);
    }

    #[test]
    fn test_export_keeps_non_ascii() {
        let raw = sample().to_json().unwrap();
        assert!(raw.contains("红色"));
        assert!(raw.contains("\"rgb\": [\n      255,"));
    }

    #[test]
    fn test_malformed_import_leaves_state() {
        let dir = tempfile::tempdir().unwrap();
        let favs = sample();

        for bad in [
            "{\"rgb\": [1,2,3]}",
            "[{\"rgb\": [1,2], \"name\": \"x\", \"hex\": \"#010203\"}]",
            "[{\"rgb\": [1,2,300], \"name\": \"x\", \"hex\": \"#010203\"}]",
            "not json",
        ] {
            let path = dir.path().join("bad.json");
            std::fs::write(&path, bad).unwrap();
            let mut target = favs.clone();
            assert!(target.import_file(&path).is_err(), "accepted {bad}");
            assert_eq!(target, favs);
        }

        let mut target = favs.clone();
        assert!(target.import_file(&dir.path().join("missing.json")).is_err());
        assert_eq!(target, favs);
    }

    #[test]
    fn test_import_dedupes_keeping_first() {
        let raw = r##"[
            {"rgb": [1, 1, 1], "name": "a", "hex": "#010101"},
            {"rgb": [1, 1, 1], "name": "b", "hex": "#010101"}
        ]"##;
        let favs = Favorites::from_json(raw).unwrap();
        assert_eq!(favs.len(), 1);
        assert_eq!(favs.get(0).unwrap().name, "a");
    }

    #[test]
    fn test_export_empty_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.json");
        assert!(Favorites::new().export_file(&path).is_err());
        assert!(!path.exists());
    }
}
