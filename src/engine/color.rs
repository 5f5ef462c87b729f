//! Random colour samples with perceived brightness.

use rand::Rng;

/// Below this luma a colour counts as dark (light text reads better on it).
const DARK_THRESHOLD: f64 = 128.0;

/// An RGB colour plus the values derived from it. Immutable once built.
/// Serialize-only: the derived fields are never read back from outside.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ColorSample {
    red: u8,
    green: u8,
    blue: u8,
    hex: String,
    brightness: f64,
    is_dark: bool,
}

impl ColorSample {
    /// Draw each channel independently and uniformly from `0..=255`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_rgb(rng.r#gen(), rng.r#gen(), rng.r#gen())
    }

    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        let brightness = brightness(red, green, blue);
        Self {
            red,
            green,
            blue,
            hex: rgb_to_hex(red, green, blue),
            brightness,
            is_dark: brightness < DARK_THRESHOLD,
        }
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// `#rrggbb`, lowercase.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// CSS functional notation, e.g. `rgb(12, 200, 7)`.
    pub fn rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

fn rgb_to_hex(red: u8, green: u8, blue: u8) -> String {
    format!("#{red:02x}{green:02x}{blue:02x}")
}

// Perceptual luma weighting (ITU-R BT.601).
fn brightness(red: u8, green: u8, blue: u8) -> f64 {
    (299.0 * f64::from(red) + 587.0 * f64::from(green) + 114.0 * f64::from(blue)) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn is_hex_color(s: &str) -> bool {
        s.len() == 7
            && s.starts_with('#')
            && s[1..].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    #[test]
    fn test_hex_zero_padded() {
        let c = ColorSample::from_rgb(0, 10, 255);
        assert_eq!(c.hex(), "#000aff");
        assert_eq!(c.rgb(), "rgb(0, 10, 255)");
    }

    #[test]
    fn test_brightness_and_darkness() {
        let white = ColorSample::from_rgb(255, 255, 255);
        assert!((white.brightness() - 255.0).abs() < 1e-9);
        assert!(!white.is_dark());

        let black = ColorSample::from_rgb(0, 0, 0);
        assert_eq!(black.brightness(), 0.0);
        assert!(black.is_dark());

        // 0.587 * 218 = 127.966 -> dark; 0.587 * 219 = 128.553 -> light
        assert!(ColorSample::from_rgb(0, 218, 0).is_dark());
        assert!(!ColorSample::from_rgb(0, 219, 0).is_dark());
    }

    #[test]
    fn test_generated_samples_are_consistent() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let c = ColorSample::generate(&mut rng);
            assert!(is_hex_color(c.hex()), "bad hex {}", c.hex());
            assert_eq!(c, ColorSample::from_rgb(c.red(), c.green(), c.blue()));
        }
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_serializes_derived_fields() {
        let json = serde_json::to_string(&ColorSample::from_rgb(0, 0, 0)).unwrap();
        assert!(json.contains("\"hex\":\"#000000\""), "{}", json);
        assert!(json.contains("\"is_dark\":true"), "{}", json);
    }
}
