use super::Rgb;
use super::builtin;
use std::collections::HashMap;
use std::path::Path;

/// Name lookup for one color database.
///
/// Entries keep the order they were inserted in (the order of the source
/// file), which is also the scan order for nearest-neighbour search.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    entries: Vec<(Rgb, String)>,
    index: HashMap<Rgb, usize>,
}

/// Result of a nearest-neighbour query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Closest {
    pub name: String,
    pub rgb: Rgb,
    /// Squared Euclidean distance; 0 for an exact match.
    pub distance: u32,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, rgb: Rgb, name: impl Into<String>) {
        let name = name.into();
        match self.index.get(&rgb) {
            Some(&i) => self.entries[i].1 = name,
            None => {
                self.index.insert(rgb, self.entries.len());
                self.entries.push((rgb, name));
            }
        }
    }

    pub fn get(&self, rgb: Rgb) -> Option<&str> {
        self.index.get(&rgb).map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rgb, &str)> {
        self.entries.iter().map(|(rgb, name)| (*rgb, name.as_str()))
    }

    /// Exact match with distance 0, otherwise the first entry (in insertion
    /// order) with minimal squared distance. `None` for an empty table.
    pub fn find_closest(&self, rgb: Rgb) -> Option<Closest> {
        if let Some(name) = self.get(rgb) {
            return Some(Closest {
                name: name.to_string(),
                rgb,
                distance: 0,
            });
        }

        let mut best: Option<(usize, u32)> = None;
        for (i, (key, _)) in self.entries.iter().enumerate() {
            let d = key.distance_sq(rgb);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }

        best.map(|(i, distance)| {
            let (key, name) = &self.entries[i];
            Closest {
                name: name.clone(),
                rgb: *key,
                distance,
            }
        })
    }

    /// Parse a JSON object of `"<rgb>": "<name>"` pairs.
    ///
    /// Keys use any form `Rgb` parses (`"r,g,b"`, `"[r, g, b]"`, `"#RRGGBB"`).
    /// Bad entries are skipped; input that is not a JSON object yields an
    /// empty table.
    pub fn from_json_str(raw: &str, source: &str) -> Self {
        let map = match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!(source = %source, "color table is not a JSON object; using empty table");
                return Self::new();
            }
            Err(e) => {
                tracing::warn!(source = %source, error = %e, "color table is not valid JSON; using empty table");
                return Self::new();
            }
        };

        let mut table = Self::new();
        for (key, value) in map {
            let Some(name) = value.as_str() else {
                tracing::warn!(source = %source, key = %key, "skipping entry with non-string name");
                continue;
            };
            match key.parse::<Rgb>() {
                Ok(rgb) => table.insert(rgb, name),
                Err(e) => tracing::warn!(source = %source, key = %key, error = %e, "skipping entry with bad color key"),
            }
        }
        table
    }

    /// Load a table file. `None` when the file does not exist, an empty table
    /// when it cannot be read or parsed. Never fails.
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let source = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(raw) => Some(Self::from_json_str(&raw, &source)),
            Err(e) => {
                tracing::warn!(source = %source, error = %e, "cannot read color table; using empty table");
                Some(Self::new())
            }
        }
    }

    fn from_entries(entries: &[builtin::Entry]) -> Self {
        let mut table = Self::new();
        for &(rgb, name) in entries {
            table.insert(rgb.into(), name);
        }
        table
    }
}

/// The color-name databases, in the order their names are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Database {
    Gb,
    ChineseTraditional,
    Css,
    X11,
    Ral,
    Pantone,
    Ncs,
    Japanese,
}

/// Where a loaded table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    File,
    Builtin,
}

impl Database {
    pub const ALL: [Database; 8] = [
        Database::Gb,
        Database::ChineseTraditional,
        Database::Css,
        Database::X11,
        Database::Ral,
        Database::Pantone,
        Database::Ncs,
        Database::Japanese,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Database::Gb => "GB",
            Database::ChineseTraditional => "Chinese Traditional",
            Database::Css => "CSS",
            Database::X11 => "X11",
            Database::Ral => "RAL",
            Database::Pantone => "Pantone",
            Database::Ncs => "NCS",
            Database::Japanese => "Japanese Traditional",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Database::Gb => "gb_colors.json",
            Database::ChineseTraditional => "chinese_colors.json",
            Database::Css => "css_colors.json",
            Database::X11 => "x11_colors.json",
            Database::Ral => "ral_colors.json",
            Database::Pantone => "pantone_colors.json",
            Database::Ncs => "ncs_colors.json",
            Database::Japanese => "japanese_colors.json",
        }
    }

    /// Fallback table for when the database file is absent.
    pub fn builtin(self) -> ColorTable {
        let entries: &[builtin::Entry] = match self {
            Database::Gb => builtin::GB,
            Database::ChineseTraditional => builtin::CHINESE_TRADITIONAL,
            Database::Css => builtin::CSS,
            Database::X11
            | Database::Ral
            | Database::Pantone
            | Database::Ncs
            | Database::Japanese => &[],
        };
        ColorTable::from_entries(entries)
    }

    /// Load from `dir`, falling back to the built-in table when the file is
    /// missing.
    pub fn load(self, dir: &Path) -> (ColorTable, TableSource) {
        let path = dir.join(self.file_name());
        match ColorTable::load(&path) {
            Some(table) => {
                if table.is_empty() {
                    tracing::warn!(database = self.label(), path = %path.display(), "color table file has no usable entries");
                } else {
                    tracing::debug!(database = self.label(), entries = table.len(), "loaded color table");
                }
                (table, TableSource::File)
            }
            None => (self.builtin(), TableSource::Builtin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[((u8, u8, u8), &str)]) -> ColorTable {
        let mut t = ColorTable::new();
        for &(rgb, name) in entries {
            t.insert(rgb.into(), name);
        }
        t
    }

    #[test]
    fn test_exact_match_has_zero_distance() {
        let t = Database::Css.builtin();
        for (rgb, name) in t.iter() {
            let hit = t.find_closest(rgb).unwrap();
            assert_eq!(hit.name, name);
            assert_eq!(hit.distance, 0);
        }
    }

    #[test]
    fn test_nearest_returns_true_minimum() {
        let t = table(&[((0, 0, 0), "black"), ((255, 255, 255), "white"), ((200, 0, 0), "red")]);
        let hit = t.find_closest(Rgb::new(190, 10, 5)).unwrap();
        assert_eq!(hit.name, "red");
        assert_eq!(hit.distance, 100 + 100 + 25);
    }

    #[test]
    fn test_tie_break_is_insertion_order() {
        let t = table(&[((10, 0, 0), "first"), ((0, 10, 0), "second")]);
        let hit = t.find_closest(Rgb::new(0, 0, 0)).unwrap();
        assert_eq!(hit.name, "first");
        assert_eq!(hit.distance, 100);

        let t = table(&[((0, 10, 0), "second"), ((10, 0, 0), "first")]);
        assert_eq!(t.find_closest(Rgb::new(0, 0, 0)).unwrap().name, "second");
    }

    #[test]
    fn test_empty_table_has_no_match() {
        assert!(ColorTable::new().find_closest(Rgb::new(1, 2, 3)).is_none());
    }

    #[test]
    fn test_lookup_does_not_mutate() {
        let t = table(&[((1, 1, 1), "a")]);
        let _ = t.find_closest(Rgb::new(9, 9, 9));
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(Rgb::new(1, 1, 1)), Some("a"));
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut t = table(&[((1, 1, 1), "a"), ((2, 2, 2), "b")]);
        t.insert(Rgb::new(1, 1, 1), "z");
        let names: Vec<&str> = t.iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["z", "b"]);
    }

    #[test]
    fn test_json_keys_and_order() {
        let raw = r##"{
            "255,0,0": "red",
            "[0, 255, 0]": "green",
            "#0000FF": "blue",
            "nope": "skipped",
            "1,2,3": 42
        }"##;
        let t = ColorTable::from_json_str(raw, "test");
        let got: Vec<(Rgb, &str)> = t.iter().collect();
        assert_eq!(
            got,
            vec![
                (Rgb::new(255, 0, 0), "red"),
                (Rgb::new(0, 255, 0), "green"),
                (Rgb::new(0, 0, 255), "blue"),
            ]
        );
    }

    #[test]
    fn test_malformed_json_is_empty() {
        assert!(ColorTable::from_json_str("{not json", "test").is_empty());
        assert!(ColorTable::from_json_str("[1, 2, 3]", "test").is_empty());
    }

    #[test]
    fn test_missing_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let (t, source) = Database::Gb.load(dir.path());
        assert_eq!(source, TableSource::Builtin);
        assert_eq!(t.get(Rgb::new(255, 0, 0)), Some("红色"));

        let (t, _) = Database::Pantone.load(dir.path());
        assert!(t.is_empty());
    }

    #[test]
    fn test_file_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gb_colors.json"), r#"{"1,2,3": "custom"}"#).unwrap();
        let (t, source) = Database::Gb.load(dir.path());
        assert_eq!(source, TableSource::File);
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(Rgb::new(1, 2, 3)), Some("custom"));
    }

    #[test]
    fn test_corrupt_file_is_empty_not_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("css_colors.json"), "garbage").unwrap();
        let (t, source) = Database::Css.load(dir.path());
        assert_eq!(source, TableSource::File);
        assert!(t.is_empty());
    }
}
