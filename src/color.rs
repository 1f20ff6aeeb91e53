// Simple RGB color struct, created from a "#rrggbb" hex string. Particles
// get their color from a linear blend between the two edge colors, and the
// edge colors themselves can be walked around the hue circle.

use serde::Deserialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    /// Degrees the hue moves on every `colorloop` step.
    pub const HUE_STEP: f64 = 10.0;

    pub const fn new(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// Lenient hex parse. The leading `#` is optional, `#rgb` shorthand is
    /// expanded, and any channel that isn't valid hex reads as 0.
    pub fn from_hex(hex: &str) -> Color {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        let expanded: String;
        let digits = if digits.len() == 3 && digits.is_ascii() {
            expanded = digits.chars().flat_map(|c| [c, c]).collect();
            expanded.as_str()
        } else {
            digits
        };
        let channel = |start: usize| {
            digits
                .get(start..start + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .unwrap_or(0)
        };
        Color::new(channel(0), channel(2), channel(4))
    }

    /// Always seven characters: `#` followed by three zero-padded lowercase pairs.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Moves each channel `amount / 100` of the way towards `other`.
    ///
    /// `amount` is usually in `[0, 100]` but isn't clamped; the resulting
    /// channels are rounded and clamped to `[0, 255]` instead.
    pub fn shift_towards(self, other: Color, amount: f64) -> Color {
        let shift = |from: u8, to: u8| {
            let from = from as f64;
            let step = (to as f64 - from) / 100.0;
            (from + step * amount).round().max(0.0).min(255.0) as u8
        };
        Color::new(
            shift(self.r, other.r),
            shift(self.g, other.g),
            shift(self.b, other.b),
        )
    }

    /// One step around the color wheel.
    pub fn colorloop(self) -> Color {
        self.rotate_hue(Color::HUE_STEP)
    }

    pub fn rotate_hue(self, degrees: f64) -> Color {
        let hsl = self.to_hsl();
        Hsl {
            h: (hsl.h + degrees).rem_euclid(360.0),
            ..hsl
        }
        .to_rgb()
    }

    pub fn to_hsl(self) -> Hsl {
        let red = self.r as f64 / 255.0;
        let green = self.g as f64 / 255.0;
        let blue = self.b as f64 / 255.0;
        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);
        let l = (max + min) / 2.0;

        // gray
        if max == min {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let sixths = if max == red {
            (green - blue) / d + if green < blue { 6.0 } else { 0.0 }
        } else if max == green {
            (blue - red) / d + 2.0
        } else {
            (red - green) / d + 4.0
        };
        let mut h = sixths * 60.0;
        if h < 0.0 {
            h += 360.0;
        }
        Hsl { h: h % 360.0, s, l }
    }

    /// Perceived brightness, only used to compare colors.
    pub fn luma(&self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }
}

impl Hsl {
    pub fn to_rgb(self) -> Color {
        let Hsl { h, s, l } = self;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = if h < 60.0 {
            (c, x, 0.0)
        } else if h < 120.0 {
            (x, c, 0.0)
        } else if h < 180.0 {
            (0.0, c, x)
        } else if h < 240.0 {
            (0.0, x, c)
        } else if h < 300.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };
        let to_byte = |v: f64| ((v + m) * 255.0).round().max(0.0).min(255.0) as u8;
        Color::new(to_byte(r), to_byte(g), to_byte(b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<String> for Color {
    fn from(hex: String) -> Self {
        Color::from_hex(&hex)
    }
}

impl FromStr for Color {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Color::from_hex(s))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// String form of [`Color::shift_towards`].
pub fn shift_color_to_other(color: &str, other: &str, shift: f64) -> String {
    Color::from_hex(color)
        .shift_towards(Color::from_hex(other), shift)
        .to_hex()
}

/// String form of [`Color::colorloop`].
pub fn colorloop(color: &str) -> String {
    Color::from_hex(color).colorloop().to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_well_formed(hex: &str) -> bool {
        hex.len() == 7
            && hex.starts_with('#')
            && hex[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d)
    }

    #[test]
    fn parses_and_formats_hex() {
        assert_eq!(Color::from_hex("#578fb1"), Color::new(0x57, 0x8f, 0xb1));
        assert_eq!(Color::from_hex("578FB1"), Color::new(0x57, 0x8f, 0xb1));
        assert_eq!(Color::from_hex("#000"), Color::BLACK);
        assert_eq!(Color::from_hex("#fff"), Color::WHITE);
        assert_eq!(Color::new(1, 2, 3).to_hex(), "#010203");
        assert_eq!("#ff0000".parse::<Color>(), Ok(Color::new(255, 0, 0)));
    }

    #[test]
    fn malformed_channels_read_as_zero() {
        assert_eq!(Color::from_hex("#zz80"), Color::new(0, 0x80, 0));
        assert_eq!(Color::from_hex(""), Color::BLACK);
    }

    #[test]
    fn shift_to_self_is_noop() {
        for hex in &["#578fb1", "#000000", "#ffffff", "#0a0b0c"] {
            for shift in &[0.0, 3.0, 50.0, 100.0, 250.0, -40.0] {
                assert_eq!(shift_color_to_other(hex, hex, *shift), *hex);
            }
        }
    }

    #[test]
    fn shift_endpoints() {
        let from = Color::from_hex("#578fb1");
        let to = Color::from_hex("#ff0000");
        assert_eq!(from.shift_towards(to, 0.0), from);
        assert_eq!(from.shift_towards(to, 100.0), to);
        let half = Color::BLACK.shift_towards(Color::WHITE, 50.0);
        assert!((127..=128).contains(&half.r));
        assert_eq!((half.r, half.r), (half.g, half.b));
    }

    #[test]
    fn shift_clamps_outside_range() {
        assert_eq!(Color::BLACK.shift_towards(Color::WHITE, 300.0), Color::WHITE);
        assert_eq!(Color::WHITE.shift_towards(Color::BLACK, 300.0), Color::BLACK);
        assert_eq!(Color::WHITE.shift_towards(Color::BLACK, -50.0), Color::WHITE);
    }

    #[test]
    fn shift_output_is_zero_padded() {
        // a channel landing below 0x10 used to print as a single digit
        let shifted = shift_color_to_other("#000000", "#ffffff", 1.0);
        assert_eq!(shifted, "#030303");
        assert!(is_well_formed(&shifted));
    }

    #[test]
    fn gray_has_no_hue() {
        let hsl = Color::new(128, 128, 128).to_hsl();
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert_eq!(Color::new(128, 128, 128).colorloop(), Color::new(128, 128, 128));
    }

    #[test]
    fn hsl_of_primaries() {
        let red = Color::new(255, 0, 0).to_hsl();
        assert_eq!((red.h, red.s, red.l), (0.0, 1.0, 0.5));
        assert!((Color::new(0, 255, 0).to_hsl().h - 120.0).abs() < 1e-9);
        assert!((Color::new(0, 0, 255).to_hsl().h - 240.0).abs() < 1e-9);
    }

    #[test]
    fn colorloop_rotates_ten_degrees() {
        assert_eq!(colorloop("#ff0000"), "#ff2a00");
        let start = Color::from_hex("#578fb1").to_hsl();
        let next = Color::from_hex("#578fb1").colorloop().to_hsl();
        assert!(hue_distance(next.h, start.h + 10.0) < 1.0);
        assert!((next.s - start.s).abs() < 0.02);
        assert!((next.l - start.l).abs() < 0.01);
    }

    #[test]
    fn colorloop_output_is_always_well_formed() {
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let hex = Color::new(r as u8, g as u8, b as u8).to_hex();
                    let looped = colorloop(&hex);
                    assert!(is_well_formed(&looped), "{} -> {}", hex, looped);
                }
            }
        }
    }

    #[test]
    fn thirty_six_steps_come_back_around() {
        for hex in &["#ff0000", "#578fb1", "#0080ff"] {
            let start = Color::from_hex(hex);
            let end = (0..36).fold(start, |color, _| color.colorloop());
            let drift = hue_distance(start.to_hsl().h, end.to_hsl().h);
            assert!(drift < 5.0, "{} drifted {} degrees to {}", hex, drift, end);
        }
    }
}
