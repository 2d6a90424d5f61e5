mod app;
mod color;
mod config;
mod favorites;
mod input;
mod output;
mod recent;
mod sampler;
mod storage;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use color::tables::TableSource;
use color::{ColorFormats, NamedColorSet, Rgb};
use favorites::FavoriteEntry;
use std::path::PathBuf;
use storage::SettingsService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "hue", version, about = "Identify colors: formats and names from eight color tables")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Print formats and every known name of a color.
    Name {
        /// `#RRGGBB`, `RRGGBB` or `r,g,b`.
        color: Rgb,
    },
    /// Print RGB, HEX, CMYK, HSV and HSL of a color.
    Formats { color: Rgb },
    /// List the color tables with entry counts.
    Tables,
    /// List recently used colors, newest first.
    Recent,
    /// Manage favorites.
    Favorites {
        #[command(subcommand)]
        cmd: FavoritesCommand,
    },
    /// Write a solid-color image (PNG or JPEG by extension).
    Swatch { color: Rgb, path: PathBuf },
}

#[derive(Debug, Subcommand)]
enum FavoritesCommand {
    List,
    Add {
        color: Rgb,
        /// Defaults to the color's first known name.
        #[arg(long)]
        name: Option<String>,
    },
    /// Remove by 1-based position as shown by `list`.
    Remove { index: usize },
    /// Replace favorites with the contents of a JSON file.
    Import { path: PathBuf },
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (cfg, created) = config::load(cli.config.as_deref()).context("load config")?;
    let command = cli.command.unwrap_or(Command::Tui);

    init_logging(&cfg, matches!(command, Command::Tui))?;
    if let Some(path) = created {
        tracing::info!(path = %path.display(), "created default config");
    }

    match command {
        Command::Tui => {
            let mut app = app::App::new(cfg.clone());
            let mut terminal = tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Name { color } => {
            let colors = NamedColorSet::load(&cfg.paths.tables_dir);
            print!("{}", ColorFormats::from_rgb(color));
            let names = colors.all_names(color);
            if names.is_empty() {
                println!("Name  unknown");
            }
            for hit in names {
                println!("{hit}");
            }
        }
        Command::Formats { color } => {
            print!("{}", color::formats::to_formats(color.r, color.g, color.b));
        }
        Command::Tables => {
            let colors = NamedColorSet::load(&cfg.paths.tables_dir);
            println!("tables dir: {}", cfg.paths.tables_dir.display());
            for (database, count, source) in colors.summary() {
                let source = match source {
                    TableSource::File => database.file_name(),
                    TableSource::Builtin => "built-in",
                };
                println!("{:<22}{count:>6}  {source}", database.label());
            }
        }
        Command::Recent => {
            let session = SettingsService::new(cfg.paths.settings_db()).load();
            if session.recent.is_empty() {
                println!("No recent colors");
            }
            for (i, rgb) in session.recent.iter().enumerate() {
                println!("{:>2}. {}  ({rgb})", i + 1, rgb.to_hex());
            }
        }
        Command::Favorites { cmd } => run_favorites(&cfg, cmd)?,
        Command::Swatch { color, path } => {
            output::save_swatch(&path, color)?;
            println!("Saved {} to {}", color.to_hex(), path.display());
        }
    }

    Ok(())
}

fn run_favorites(cfg: &config::Config, cmd: FavoritesCommand) -> anyhow::Result<()> {
    let settings = SettingsService::new(cfg.paths.settings_db());
    let mut favorites = settings.load().favorites;

    match cmd {
        FavoritesCommand::List => {
            for (i, f) in favorites.entries().iter().enumerate() {
                println!("{:>2}. {}  {}", i + 1, f.hex, f.name);
            }
        }
        FavoritesCommand::Add { color, name } => {
            let name = match name {
                Some(n) => n,
                None => NamedColorSet::load(&cfg.paths.tables_dir)
                    .primary_name(color)
                    .unwrap_or_else(|| color.to_hex()),
            };
            if !favorites.add(FavoriteEntry::new(color, name.clone())) {
                anyhow::bail!("{} is already a favorite", color.to_hex());
            }
            settings.save_favorites(&favorites);
            println!("Added {} ({name})", color.to_hex());
        }
        FavoritesCommand::Remove { index } => {
            let removed = index
                .checked_sub(1)
                .and_then(|i| favorites.remove(i))
                .with_context(|| format!("no favorite at position {index}"))?;
            settings.save_favorites(&favorites);
            println!("Removed {} ({})", removed.hex, removed.name);
        }
        FavoritesCommand::Import { path } => {
            let n = favorites.import_file(&path)?;
            settings.save_favorites(&favorites);
            println!("Imported {n} favorites");
        }
        FavoritesCommand::Export { path } => {
            let n = favorites.export_file(&path)?;
            println!("Exported {n} favorites to {}", path.display());
        }
    }
    Ok(())
}

/// The TUI owns the terminal, so it logs to `<data_dir>/hue.log`; headless
/// commands log to stderr.
fn init_logging(cfg: &config::Config, to_file: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    if to_file {
        let path = cfg.paths.log_file();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
