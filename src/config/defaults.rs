use super::Config;

pub const POLL_INTERVAL_MS: u64 = 100;

/// The config written on first run.
pub fn defaults() -> Config {
    let mut cfg = Config::default();
    cfg.clipboard.command = detect_clipboard_command();
    cfg
}

/// Best guess at a clipboard command for this platform. The user can edit it
/// in the config file afterwards.
fn detect_clipboard_command() -> Vec<String> {
    let argv: &[&str] = if cfg!(target_os = "macos") {
        &["pbcopy"]
    } else if cfg!(windows) {
        &["clip"]
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        &["wl-copy"]
    } else if std::env::var_os("DISPLAY").is_some() {
        &["xclip", "-selection", "clipboard"]
    } else {
        &[]
    };
    argv.iter().map(|s| s.to_string()).collect()
}
