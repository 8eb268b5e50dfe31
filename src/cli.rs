//! Command-line argument parsing.

use clap::Parser;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Pulsegrid")]
#[command(about = "Microphone-reactive quadrant shader display", long_about = None)]
pub struct Args {
    /// Initial region color as a hex triple, e.g. #00ffff
    #[arg(long, value_name = "HEX", default_value = "#00ffff")]
    pub color: String,

    /// Initial loudness sensitivity (clamped to 0.1..=20.0)
    #[arg(long, value_name = "FACTOR", default_value = "5.0")]
    pub sensitivity: f32,
}

impl Args {
    /// Initial color, falling back to cyan on a malformed hex string
    pub fn initial_color(&self) -> [f32; 3] {
        match parse_hex_color(&self.color) {
            Some(color) => color,
            None => {
                eprintln!("Warning: invalid color '{}', using #00ffff", self.color);
                [0.0, 1.0, 1.0]
            }
        }
    }
}

/// Parse "#rrggbb" or "rrggbb" into an RGB triple in [0, 1]
pub fn parse_hex_color(s: &str) -> Option<[f32; 3]> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#00ffff"), Some([0.0, 1.0, 1.0]));
        assert_eq!(parse_hex_color("ff0000"), Some([1.0, 0.0, 0.0]));

        let grey = parse_hex_color("#808080").unwrap();
        for channel in grey {
            assert!((channel - 128.0 / 255.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_parse_hex_color_rejects_malformed() {
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color("#00ffff00"), None);
        // Multibyte input must not slip past the byte-length check
        assert_eq!(parse_hex_color("#00ffß"), None);
    }
}
