use super::tables::{ColorTable, Database, TableSource};
use super::Rgb;
use std::fmt;
use std::path::Path;

/// One reported name for a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameHit {
    /// The color is a key of `database`.
    Exact { database: Database, name: String },
    /// No table has the color; nearest entry over all tables.
    Approx { name: String, distance: u32 },
}

impl NameHit {
    pub fn name(&self) -> &str {
        match self {
            NameHit::Exact { name, .. } | NameHit::Approx { name, .. } => name,
        }
    }
}

impl fmt::Display for NameHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameHit::Exact { database, name } => write!(f, "{}: {}", database.label(), name),
            NameHit::Approx { name, distance } => write!(f, "approx: {name} (Δ={distance})"),
        }
    }
}

/// All databases in reporting order, plus the merged key set used for
/// nearest-neighbour fallback.
#[derive(Debug, Clone)]
pub struct NamedColorSet {
    tables: Vec<(Database, ColorTable, TableSource)>,
    merged: ColorTable,
}

impl NamedColorSet {
    /// Load every database from `dir`. Never fails; see `Database::load`.
    pub fn load(dir: &Path) -> Self {
        let tables = Database::ALL
            .into_iter()
            .map(|db| {
                let (table, source) = db.load(dir);
                (db, table, source)
            })
            .collect();
        Self::from_tables(tables)
    }

    /// Only the built-in tables.
    #[cfg(test)]
    pub fn builtin() -> Self {
        let tables = Database::ALL
            .into_iter()
            .map(|db| (db, db.builtin(), TableSource::Builtin))
            .collect();
        Self::from_tables(tables)
    }

    pub fn from_tables(mut tables: Vec<(Database, ColorTable, TableSource)>) -> Self {
        tables.sort_by_key(|(db, _, _)| Database::ALL.iter().position(|d| d == db));

        // First-occurrence order, last writer wins on the name.
        let mut merged = ColorTable::new();
        for (_, table, _) in &tables {
            for (rgb, name) in table.iter() {
                merged.insert(rgb, name);
            }
        }

        tracing::info!(
            tables = tables.len(),
            merged_entries = merged.len(),
            "color name tables ready"
        );
        Self { tables, merged }
    }

    #[cfg(test)]
    pub fn merged(&self) -> &ColorTable {
        &self.merged
    }

    /// (database, entry count, source) in reporting order.
    pub fn summary(&self) -> Vec<(Database, usize, TableSource)> {
        self.tables
            .iter()
            .map(|(db, t, source)| (*db, t.len(), *source))
            .collect()
    }

    /// Every exact name in database order; when there is none, a single
    /// approximate name from the merged table. Empty only when all tables
    /// are empty.
    pub fn all_names(&self, rgb: Rgb) -> Vec<NameHit> {
        let mut hits: Vec<NameHit> = self
            .tables
            .iter()
            .filter_map(|(db, table, _)| {
                table.get(rgb).map(|name| NameHit::Exact {
                    database: *db,
                    name: name.to_string(),
                })
            })
            .collect();

        if hits.is_empty()
            && let Some(closest) = self.merged.find_closest(rgb)
        {
            hits.push(NameHit::Approx {
                name: closest.name,
                distance: closest.distance,
            });
        }
        hits
    }

    /// The name shown as "the" name of a color: the first reported hit.
    pub fn primary_name(&self, rgb: Rgb) -> Option<String> {
        self.all_names(rgb).into_iter().next().map(|hit| match hit {
            NameHit::Exact { name, .. } | NameHit::Approx { name, .. } => name,
        })
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

    fn set() -> NamedColorSet {
        NamedColorSet::from_tables(vec![
            // deliberately out of order; from_tables sorts by database
            (Database::Css, table(&[((255, 0, 0), "red"), ((0, 0, 255), "blue")]), TableSource::File),
            (Database::Gb, table(&[((255, 0, 0), "红色"), ((0, 128, 0), "绿色")]), TableSource::File),
            (Database::Ral, table(&[((10, 10, 10), "RAL 9005")]), TableSource::File),
        ])
    }

    #[test]
    fn test_exact_hits_in_database_order() {
        let names: Vec<String> = set()
            .all_names(Rgb::new(255, 0, 0))
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(names, vec!["GB: 红色", "CSS: red"]);
    }

    #[test]
    fn test_single_exact_hit_has_no_approx() {
        let hits = set().all_names(Rgb::new(0, 0, 255));
        assert_eq!(hits.len(), 1);
        assert!(matches!(&hits[0], NameHit::Exact { database: Database::Css, .. }));
    }

    #[test]
    fn test_approx_uses_true_minimum_over_all_tables() {
        let s = set();
        let rgb = Rgb::new(12, 9, 10);
        let hits = s.all_names(rgb);
        assert_eq!(hits.len(), 1);
        let brute = s
            .merged()
            .iter()
            .map(|(k, _)| k.distance_sq(rgb))
            .min()
            .unwrap();
        assert_eq!(hits[0], NameHit::Approx { name: "RAL 9005".into(), distance: brute });
        assert_eq!(hits[0].to_string(), "approx: RAL 9005 (Δ=5)");
    }

    #[test]
    fn test_merged_is_deduplicated_last_writer_wins() {
        let s = set();
        assert_eq!(s.merged().len(), 4);
        // GB inserted (255,0,0) first, CSS overwrote the name
        assert_eq!(s.merged().get(Rgb::new(255, 0, 0)), Some("red"));
        let order: Vec<Rgb> = s.merged().iter().map(|(k, _)| k).collect();
        assert_eq!(order[0], Rgb::new(255, 0, 0));
        assert_eq!(order[1], Rgb::new(0, 128, 0));
    }

    #[test]
    fn test_empty_set_reports_nothing() {
        let s = NamedColorSet::from_tables(Vec::new());
        assert!(s.all_names(Rgb::new(1, 2, 3)).is_empty());
        assert!(s.primary_name(Rgb::new(1, 2, 3)).is_none());
    }

    #[test]
    fn test_primary_name() {
        let s = set();
        assert_eq!(s.primary_name(Rgb::new(255, 0, 0)).as_deref(), Some("红色"));
        assert_eq!(s.primary_name(Rgb::new(0, 0, 250)).as_deref(), Some("blue"));
    }

    #[test]
    fn test_builtin_set_names_white() {
        let names: Vec<String> = NamedColorSet::builtin()
            .all_names(Rgb::WHITE)
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(names, vec!["GB: 白色", "CSS: white"]);
    }

    #[test]
    fn test_fresh_vector_per_call() {
        let s = set();
        let mut a = s.all_names(Rgb::new(255, 0, 0));
        a.clear();
        assert_eq!(s.all_names(Rgb::new(255, 0, 0)).len(), 2);
    }
}
