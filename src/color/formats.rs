//! RGB to HEX/CMYK/HSV/HSL conversions
//!
//! All percentages and degrees are rounded half away from zero (`f64::round`).

use super::Rgb;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hsv {
    pub h: u16,
    pub s: u8,
    pub v: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

/// Every representation of one color. Recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorFormats {
    pub rgb: Rgb,
    pub hex: String,
    pub cmyk: Cmyk,
    pub hsv: Hsv,
    pub hsl: Hsl,
}

/// Which representation to hand to the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Rgb,
    Hex,
    Cmyk,
    Hsv,
    Hsl,
}

impl Format {
    pub fn label(self) -> &'static str {
        match self {
            Format::Rgb => "RGB",
            Format::Hex => "HEX",
            Format::Cmyk => "CMYK",
            Format::Hsv => "HSV",
            Format::Hsl => "HSL",
        }
    }
}

impl ColorFormats {
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            rgb,
            hex: rgb.to_hex(),
            cmyk: rgb_to_cmyk(rgb),
            hsv: rgb_to_hsv(rgb),
            hsl: rgb_to_hsl(rgb),
        }
    }

    pub fn rgb_string(&self) -> String {
        format!("RGB({}, {}, {})", self.rgb.r, self.rgb.g, self.rgb.b)
    }

    pub fn cmyk_string(&self) -> String {
        let Cmyk { c, m, y, k } = self.cmyk;
        format!("CMYK({c}%, {m}%, {y}%, {k}%)")
    }

    pub fn hsv_string(&self) -> String {
        let Hsv { h, s, v } = self.hsv;
        format!("HSV({h}°, {s}%, {v}%)")
    }

    pub fn hsl_string(&self) -> String {
        let Hsl { h, s, l } = self.hsl;
        format!("HSL({h}°, {s}%, {l}%)")
    }

    pub fn get(&self, format: Format) -> String {
        match format {
            Format::Rgb => self.rgb_string(),
            Format::Hex => self.hex.clone(),
            Format::Cmyk => self.cmyk_string(),
            Format::Hsv => self.hsv_string(),
            Format::Hsl => self.hsl_string(),
        }
    }

    /// (label, value) rows in display order.
    pub fn rows(&self) -> [(&'static str, String); 5] {
        [
            (Format::Rgb.label(), self.rgb_string()),
            (Format::Hex.label(), self.hex.clone()),
            (Format::Cmyk.label(), self.cmyk_string()),
            (Format::Hsv.label(), self.hsv_string()),
            (Format::Hsl.label(), self.hsl_string()),
        ]
    }
}

impl fmt::Display for ColorFormats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.rows() {
            writeln!(f, "{label:<5} {value}")?;
        }
        Ok(())
    }
}

pub fn to_formats(r: u8, g: u8, b: u8) -> ColorFormats {
    ColorFormats::from_rgb(Rgb::new(r, g, b))
}

fn percent(x: f64) -> u8 {
    (x * 100.0).round().clamp(0.0, 100.0) as u8
}

// Keep hue in [0, 360) after rounding (359.6 would otherwise become 360).
fn degrees(h: f64) -> u16 {
    (h.round() as u16) % 360
}

fn unit(rgb: Rgb) -> (f64, f64, f64) {
    (rgb.r as f64 / 255.0, rgb.g as f64 / 255.0, rgb.b as f64 / 255.0)
}

pub fn rgb_to_cmyk(rgb: Rgb) -> Cmyk {
    if rgb == Rgb::BLACK {
        return Cmyk { c: 0, m: 0, y: 0, k: 100 };
    }

    let (r, g, b) = unit(rgb);
    let c = 1.0 - r;
    let m = 1.0 - g;
    let y = 1.0 - b;
    let k = c.min(m).min(y);

    Cmyk {
        c: percent((c - k) / (1.0 - k)),
        m: percent((m - k) / (1.0 - k)),
        y: percent((y - k) / (1.0 - k)),
        k: percent(k),
    }
}

pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let (r, g, b) = unit(rgb);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;

    let h = if diff == 0.0 {
        0.0
    } else if max == r {
        (60.0 * ((g - b) / diff)).rem_euclid(360.0)
    } else if max == g {
        (60.0 * ((b - r) / diff) + 120.0).rem_euclid(360.0)
    } else {
        (60.0 * ((r - g) / diff) + 240.0).rem_euclid(360.0)
    };

    let s = if max == 0.0 { 0.0 } else { diff / max };

    Hsv {
        h: degrees(h),
        s: percent(s),
        v: percent(max),
    }
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let (r, g, b) = unit(rgb);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;
    let l = (max + min) / 2.0;

    if diff == 0.0 {
        return Hsl { h: 0, s: 0, l: percent(l) };
    }

    let s = if l < 0.5 {
        diff / (max + min)
    } else {
        diff / (2.0 - max - min)
    };

    let sector = if max == r {
        (g - b) / diff
    } else if max == g {
        2.0 + (b - r) / diff
    } else {
        4.0 + (r - g) / diff
    };

    let mut h = sector * 60.0;
    if h < 0.0 {
        h += 360.0;
    }

    Hsl {
        h: degrees(h),
        s: percent(s),
        l: percent(l),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmyk(r: u8, g: u8, b: u8) -> (u8, u8, u8, u8) {
        let c = rgb_to_cmyk(Rgb::new(r, g, b));
        (c.c, c.m, c.y, c.k)
    }

    fn hsv(r: u8, g: u8, b: u8) -> (u16, u8, u8) {
        let c = rgb_to_hsv(Rgb::new(r, g, b));
        (c.h, c.s, c.v)
    }

    fn hsl(r: u8, g: u8, b: u8) -> (u16, u8, u8) {
        let c = rgb_to_hsl(Rgb::new(r, g, b));
        (c.h, c.s, c.l)
    }

    #[test]
    fn test_cmyk_extremes() {
        assert_eq!(cmyk(0, 0, 0), (0, 0, 0, 100));
        assert_eq!(cmyk(255, 255, 255), (0, 0, 0, 0));
    }

    #[test]
    fn test_cmyk_primaries() {
        assert_eq!(cmyk(255, 0, 0), (0, 100, 100, 0));
        assert_eq!(cmyk(0, 255, 255), (100, 0, 0, 0));
        // 128/255 gray: k = 1 - 0.50196 = 49.8% -> 50
        assert_eq!(cmyk(128, 128, 128), (0, 0, 0, 50));
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv(255, 0, 0), (0, 100, 100));
        assert_eq!(hsv(0, 255, 0), (120, 100, 100));
        assert_eq!(hsv(0, 0, 255), (240, 100, 100));
        assert_eq!(hsv(0, 0, 0), (0, 0, 0));
        assert_eq!(hsv(255, 255, 255), (0, 0, 100));
    }

    #[test]
    fn test_hsv_negative_sector_wraps() {
        // magenta-ish red: max == r, g < b
        assert_eq!(hsv(255, 0, 128).0, 330);
    }

    #[test]
    fn test_hsl_extremes() {
        assert_eq!(hsl(255, 255, 255), (0, 0, 100));
        assert_eq!(hsl(0, 0, 0), (0, 0, 0));
    }

    #[test]
    fn test_hsl_lightness_branches() {
        assert_eq!(hsl(255, 0, 0), (0, 100, 50));
        // dark: l < 0.5
        assert_eq!(hsl(0, 0, 128), (240, 100, 25));
        // light: l >= 0.5
        assert_eq!(hsl(255, 128, 128), (0, 100, 75));
    }

    #[test]
    fn test_hue_never_reaches_360() {
        // hue just below 360 rounds up and must wrap to 0
        let h = rgb_to_hsv(Rgb::new(255, 0, 1)).h;
        assert!(h < 360);
        let h = rgb_to_hsl(Rgb::new(255, 0, 1)).h;
        assert!(h < 360);
    }

    #[test]
    fn test_format_strings() {
        let f = to_formats(255, 0, 0);
        assert_eq!(f.rgb_string(), "RGB(255, 0, 0)");
        assert_eq!(f.hex, "#FF0000");
        assert_eq!(f.cmyk_string(), "CMYK(0%, 100%, 100%, 0%)");
        assert_eq!(f.hsv_string(), "HSV(0°, 100%, 100%)");
        assert_eq!(f.hsl_string(), "HSL(0°, 100%, 50%)");
        assert_eq!(f.get(Format::Hex), "#FF0000");
    }

    #[test]
    fn test_formats_hex_inverts() {
        for rgb in [Rgb::new(1, 2, 3), Rgb::new(200, 100, 50), Rgb::WHITE] {
            let f = ColorFormats::from_rgb(rgb);
            assert_eq!(Rgb::from_hex(&f.hex).unwrap(), rgb);
        }
    }
}
