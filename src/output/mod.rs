use crate::color::{ColorFormats, NameHit, Rgb};
use anyhow::Context;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub const SWATCH_SIZE: u32 = 200;

/// Pipe `text` into the configured clipboard command (`wl-copy`, `pbcopy`,
/// `xclip -selection clipboard`, ...).
pub async fn copy_to_clipboard(command: &[String], text: &str) -> anyhow::Result<()> {
    let Some((program, args)) = command.split_first() else {
        anyhow::bail!("no clipboard command configured ([clipboard] command)");
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .with_context(|| format!("spawn {program}"))?;

    {
        let mut stdin = child.stdin.take().context("clipboard stdin unavailable")?;
        stdin
            .write_all(text.as_bytes())
            .await
            .with_context(|| format!("write to {program}"))?;
        // stdin is closed here so the command sees EOF
    }

    let out = child
        .wait_with_output()
        .await
        .with_context(|| format!("wait for {program}"))?;
    if !out.status.success() {
        anyhow::bail!(
            "{program} exited with {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        );
    }
    tracing::debug!(program = %program, bytes = text.len(), "copied to clipboard");
    Ok(())
}

/// The text block copied by "copy info": every format, then every name.
pub fn color_info_text(formats: &ColorFormats, names: &[NameHit]) -> String {
    let mut out = String::new();
    for (label, value) in formats.rows() {
        out.push_str(&format!("{label}: {value}\n"));
    }
    if names.is_empty() {
        out.push_str("Name: unknown\n");
    } else {
        out.push_str("Names:\n");
        for hit in names {
            out.push_str(&format!("  {hit}\n"));
        }
    }
    out
}

/// Write a solid square of `rgb`. The format follows the file extension
/// (`.png`, `.jpg`/`.jpeg`).
pub fn save_swatch(path: &Path, rgb: Rgb) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    let img = image::RgbImage::from_pixel(SWATCH_SIZE, SWATCH_SIZE, image::Rgb([rgb.r, rgb.g, rgb.b]));
    img.save(path)
        .with_context(|| format!("save swatch {}", path.display()))?;
    tracing::info!(path = %path.display(), color = %rgb.to_hex(), "saved swatch");
    Ok(())
}

/// Default file name for a swatch: spaces become `_`.
pub fn suggested_swatch_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "color.png".to_string()
    } else {
        format!("{cleaned}.png")
    }
}
