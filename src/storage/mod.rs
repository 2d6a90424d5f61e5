use crate::color::Rgb;
use crate::favorites::{FavoriteEntry, Favorites};
use crate::recent::RecentColors;
use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

pub const KEY_RECENT: &str = "colors/recent";
pub const KEY_FAVORITES: &str = "colors/favorites";
pub const KEY_LAST_SCREEN: &str = "ui/last_screen";
pub const KEY_CURRENT_COLOR: &str = "ui/current_color";

/// Key/value settings backed by a single SQLite table.
pub struct SettingsStore {
    conn: Connection,
}

impl SettingsStore {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }

        let conn = Connection::open(path).with_context(|| format!("open {}", path.display()))?;
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    #[cfg(test)]
    fn open_in_memory() -> anyhow::Result<Self> {
        let s = Self {
            conn: Connection::open_in_memory().context("open in-memory db")?,
        };
        s.init_schema()?;
        Ok(s)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        self.conn
            .execute_batch(
                r#"
CREATE TABLE IF NOT EXISTS settings (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL,
  updated_at INTEGER
);
"#,
            )
            .context("init schema")?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("read setting {key}"))
    }

    pub fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let now_unix = time::OffsetDateTime::now_utc().unix_timestamp();
        self.conn
            .execute(
                r#"
INSERT INTO settings(key, value, updated_at)
VALUES(?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET
  value=excluded.value,
  updated_at=excluded.updated_at
"#,
                params![key, value, now_unix],
            )
            .with_context(|| format!("write setting {key}"))?;
        Ok(())
    }

    /// Decode a JSON value stored under `key`. `Ok(None)` when unset.
    pub fn get_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        match self.get(key)? {
            Some(raw) => {
                let v = serde_json::from_str(&raw).with_context(|| format!("decode setting {key}"))?;
                Ok(Some(v))
            }
            None => Ok(None),
        }
    }

    pub fn set_json<T: serde::Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let raw = serde_json::to_string(value).with_context(|| format!("encode setting {key}"))?;
        self.set(key, &raw)
    }
}

/// Everything that survives a restart.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub recent: RecentColors,
    pub favorites: Favorites,
    pub last_screen: Option<String>,
    pub current: Option<Rgb>,
}

/// Loads and saves the `Session`. Errors never reach the caller: a broken
/// key falls back to its default and a failed save is only logged.
#[derive(Debug, Clone)]
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Session {
        let store = match SettingsStore::open(&self.path) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %format!("{e:#}"), "settings unavailable; using defaults");
                return Session::default();
            }
        };
        Self::load_from(&store)
    }

    fn load_from(store: &SettingsStore) -> Session {
        let recent = read_key::<Vec<Rgb>>(store, KEY_RECENT)
            .map(|list| RecentColors::from_list(&list))
            .unwrap_or_default();
        let favorites = read_key::<Vec<FavoriteEntry>>(store, KEY_FAVORITES)
            .map(Favorites::from_entries)
            .unwrap_or_default();
        let last_screen = read_key::<String>(store, KEY_LAST_SCREEN);
        let current = read_key::<Rgb>(store, KEY_CURRENT_COLOR);

        tracing::debug!(
            recent = recent.len(),
            favorites = favorites.len(),
            "loaded session"
        );
        Session {
            recent,
            favorites,
            last_screen,
            current,
        }
    }

    pub fn save(&self, session: &Session) {
        if let Err(e) = self.try_save(session) {
            tracing::warn!(path = %self.path.display(), error = %format!("{e:#}"), "failed to save settings");
        }
    }

    fn try_save(&self, session: &Session) -> anyhow::Result<()> {
        let store = SettingsStore::open(&self.path)?;
        Self::save_to(&store, session)
    }

    fn save_to(store: &SettingsStore, session: &Session) -> anyhow::Result<()> {
        store.set_json(KEY_RECENT, &session.recent.to_vec())?;
        store.set_json(KEY_FAVORITES, &session.favorites.entries())?;
        if let Some(screen) = &session.last_screen {
            store.set_json(KEY_LAST_SCREEN, screen)?;
        }
        if let Some(rgb) = session.current {
            store.set_json(KEY_CURRENT_COLOR, &rgb)?;
        }
        Ok(())
    }

    /// Persist only the favorites list, used right after it changes.
    pub fn save_favorites(&self, favorites: &Favorites) {
        let res = SettingsStore::open(&self.path)
            .and_then(|store| store.set_json(KEY_FAVORITES, &favorites.entries()));
        if let Err(e) = res {
            tracing::warn!(error = %format!("{e:#}"), "failed to save favorites");
        }
    }
}

fn read_key<T: serde::de::DeserializeOwned>(store: &SettingsStore, key: &str) -> Option<T> {
    match store.get_json::<T>(key) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(key, error = %format!("{e:#}"), "ignoring unreadable setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let mut recent = RecentColors::new();
        recent.push(Rgb::new(1, 2, 3));
        recent.push(Rgb::new(4, 5, 6));
        let mut favorites = Favorites::new();
        favorites.add(FavoriteEntry::new(Rgb::new(255, 0, 0), "红色"));
        Session {
            recent,
            favorites,
            last_screen: Some("favorites".into()),
            current: Some(Rgb::new(4, 5, 6)),
        }
    }

    #[test]
    fn test_get_set_upsert() {
        let store = SettingsStore::open_in_memory().unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("db").join("settings.sqlite3"));
        let original = session();
        service.save(&original);

        let loaded = service.load();
        assert_eq!(loaded.recent.to_vec(), original.recent.to_vec());
        assert_eq!(loaded.favorites, original.favorites);
        assert_eq!(loaded.last_screen.as_deref(), Some("favorites"));
        assert_eq!(loaded.current, Some(Rgb::new(4, 5, 6)));
    }

    #[test]
    fn test_fresh_store_gives_defaults() {
        let store = SettingsStore::open_in_memory().unwrap();
        let s = SettingsService::load_from(&store);
        assert!(s.recent.is_empty());
        assert!(s.favorites.is_empty());
        assert!(s.last_screen.is_none());
        assert!(s.current.is_none());
    }

    #[test]
    fn test_corrupt_key_keeps_others() {
        let store = SettingsStore::open_in_memory().unwrap();
        SettingsService::save_to(&store, &session()).unwrap();
        store.set(KEY_FAVORITES, "{broken").unwrap();

        let s = SettingsService::load_from(&store);
        assert!(s.favorites.is_empty());
        assert_eq!(s.recent.len(), 2);
        assert_eq!(s.current, Some(Rgb::new(4, 5, 6)));
    }

    #[test]
    fn test_unopenable_path_does_not_fail() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the database file should be
        let service = SettingsService::new(dir.path());
        let s = service.load();
        assert!(s.favorites.is_empty());
        service.save(&session());
    }

    #[test]
    fn test_save_favorites_only() {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("settings.sqlite3"));
        service.save_favorites(&session().favorites);
        let s = service.load();
        assert_eq!(s.favorites.len(), 1);
        assert!(s.recent.is_empty());
    }
}
