use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod defaults;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub picker: PickerConfig,
    pub clipboard: ClipboardConfig,
    pub input: InputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Settings database and log file.
    pub data_dir: PathBuf,
    /// `*_colors.json` name tables.
    pub tables_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub poll_interval_ms: u64,
    /// argv of a program that prints the color under the cursor,
    /// e.g. `["hyprpicker", "-n", "-f", "hex"]`. Empty disables picking.
    pub sampler_command: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// argv of a program that reads the clipboard text on stdin.
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub mouse: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|p| p.data_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("hue"));
        Self {
            tables_dir: data_dir.join("tables"),
            data_dir,
        }
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: defaults::POLL_INTERVAL_MS,
            sampler_command: Vec::new(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { mouse: true }
    }
}

impl PickerConfig {
    /// Poll interval, never below 10ms.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(10))
    }
}

impl PathsConfig {
    pub fn settings_db(&self) -> PathBuf {
        self.data_dir.join("settings.sqlite3")
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("hue.log")
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "hue", "hue")
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj = project_dirs().context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

fn write_config(path: &Path, cfg: &Config) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    let raw = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Read the config file, writing the defaults first if it does not exist.
/// The second value is the path of a freshly written default file, so the
/// caller can report it once logging is up.
pub fn load(override_path: Option<&Path>) -> anyhow::Result<(Config, Option<PathBuf>)> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        let cfg = defaults::defaults();
        write_config(&path, &cfg).context("write default config")?;
        return Ok((cfg, Some(path)));
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg = toml::from_str::<Config>(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok((cfg, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("config.toml");
        let (cfg, created) = load(Some(path.as_path())).unwrap();
        assert!(path.exists());
        assert_eq!(created.as_deref(), Some(path.as_path()));
        assert_eq!(cfg.picker.poll_interval_ms, 100);
        assert!(cfg.input.mouse);

        let (again, created) = load(Some(path.as_path())).unwrap();
        assert!(created.is_none());
        assert_eq!(again.paths.data_dir, cfg.paths.data_dir);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[clipboard]\ncommand = [\"wl-copy\"]\n\n[picker]\nsampler_command = [\"hyprpicker\", \"-n\"]\n",
        )
        .unwrap();
        let (cfg, _) = load(Some(path.as_path())).unwrap();
        assert_eq!(cfg.clipboard.command, vec!["wl-copy"]);
        assert_eq!(cfg.picker.sampler_command, vec!["hyprpicker", "-n"]);
        assert_eq!(cfg.picker.poll_interval(), Duration::from_millis(100));
        assert!(cfg.input.mouse);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[picker\n").unwrap();
        assert!(load(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_written_config_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.picker.poll_interval_ms = 250;
        cfg.paths.tables_dir = dir.path().join("t");
        write_config(&path, &cfg).unwrap();
        let (back, created) = load(Some(path.as_path())).unwrap();
        assert!(created.is_none());
        assert_eq!(back.picker.poll_interval_ms, 250);
        assert_eq!(back.paths.tables_dir, dir.path().join("t"));
    }

    #[test]
    fn test_poll_interval_floor() {
        let cfg = PickerConfig {
            poll_interval_ms: 0,
            sampler_command: Vec::new(),
        };
        assert_eq!(cfg.poll_interval(), Duration::from_millis(10));
    }
}
