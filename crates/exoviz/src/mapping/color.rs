//! Temperature → color mapping for stars and planets.
//!
//! Stars fall into six fixed buckets. Planets fall into eight climate classes;
//! within a class the base color is shaded by where the temperature sits
//! between the class bounds, so two planets in the same class still read as
//! different bodies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Linear RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}, expected #rrggbb")]
pub struct ColorParseError(pub String);

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Pack into `0xRRGGBB`, rounding each channel.
    pub fn to_hex(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// `#rrggbb` form used by the UI.
    pub fn to_css(self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(ColorParseError(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| ColorParseError(s.to_string()))
    }

    pub fn lerp(self, other: Color, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

// ── Stars ──

/// Stellar color bucket by effective temperature (Kelvin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StarClass {
    /// Below 3500 K.
    Cool,
    /// 3500 – 5000 K.
    Red,
    /// 5000 – 6000 K.
    Orange,
    /// 6000 – 7500 K.
    Yellow,
    /// 7500 – 10000 K.
    White,
    /// 10000 K and above.
    Blue,
}

impl StarClass {
    /// Buckets are half-open on the upper side: 3500 K is `Red`, not `Cool`.
    pub fn classify(kelvin: f64) -> Self {
        if kelvin < 3500.0 {
            StarClass::Cool
        } else if kelvin < 5000.0 {
            StarClass::Red
        } else if kelvin < 6000.0 {
            StarClass::Orange
        } else if kelvin < 7500.0 {
            StarClass::Yellow
        } else if kelvin < 10000.0 {
            StarClass::White
        } else {
            StarClass::Blue
        }
    }

    pub fn color(self) -> Color {
        Color::from_hex(match self {
            StarClass::Cool => 0xFF6B35,
            StarClass::Red => 0xFF4444,
            StarClass::Orange => 0xFF8800,
            StarClass::Yellow => 0xFFDD00,
            StarClass::White => 0xFFFFFF,
            StarClass::Blue => 0x66AAFF,
        })
    }
}

pub fn temperature_to_star_color(kelvin: f64) -> Color {
    StarClass::classify(kelvin).color()
}

// ── Planets ──

/// Planet climate class by equilibrium temperature (Kelvin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlanetClimate {
    Frozen,
    Cold,
    Cool,
    Temperate,
    Warm,
    Hot,
    Scorching,
    Molten,
}

/// Share of white mixed into the coldest end of a class.
const CLASS_SHADE: f32 = 0.25;

impl PlanetClimate {
    /// Lower bounds are inclusive: 2000 K is `Molten`.
    pub fn classify(kelvin: f64) -> Self {
        if kelvin >= 2000.0 {
            PlanetClimate::Molten
        } else if kelvin >= 1500.0 {
            PlanetClimate::Scorching
        } else if kelvin >= 1000.0 {
            PlanetClimate::Hot
        } else if kelvin >= 700.0 {
            PlanetClimate::Warm
        } else if kelvin >= 400.0 {
            PlanetClimate::Temperate
        } else if kelvin >= 200.0 {
            PlanetClimate::Cool
        } else if kelvin >= 100.0 {
            PlanetClimate::Cold
        } else {
            PlanetClimate::Frozen
        }
    }

    pub fn base_color(self) -> Color {
        Color::from_hex(match self {
            PlanetClimate::Molten => 0xFF4500,
            PlanetClimate::Scorching => 0xFF6347,
            PlanetClimate::Hot => 0xFFA500,
            PlanetClimate::Warm => 0xFFFF00,
            PlanetClimate::Temperate => 0x90EE90,
            PlanetClimate::Cool => 0x4169E1,
            PlanetClimate::Cold => 0x87CEEB,
            PlanetClimate::Frozen => 0xB0C4DE,
        })
    }

    /// Temperature span used for in-class shading. The open-ended classes
    /// get a nominal span.
    fn bounds(self) -> (f64, f64) {
        match self {
            PlanetClimate::Molten => (2000.0, 3000.0),
            PlanetClimate::Scorching => (1500.0, 2000.0),
            PlanetClimate::Hot => (1000.0, 1500.0),
            PlanetClimate::Warm => (700.0, 1000.0),
            PlanetClimate::Temperate => (400.0, 700.0),
            PlanetClimate::Cool => (200.0, 400.0),
            PlanetClimate::Cold => (100.0, 200.0),
            PlanetClimate::Frozen => (0.0, 100.0),
        }
    }

    /// Position of `kelvin` within this class, in [0, 1].
    fn fraction(self, kelvin: f64) -> f32 {
        let (lo, hi) = self.bounds();
        let t = ((kelvin - lo) / (hi - lo)) as f32;
        if t.is_finite() {
            t.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Planet color: the class color, lightened toward the cold end of the class.
pub fn temperature_to_planet_color(kelvin: f64) -> Color {
    let climate = PlanetClimate::classify(kelvin);
    let shade = CLASS_SHADE * (1.0 - climate.fraction(kelvin));
    climate.base_color().lerp(Color::WHITE, shade)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_bucket_boundaries_are_half_open() {
        assert_eq!(StarClass::classify(3499.9), StarClass::Cool);
        assert_eq!(StarClass::classify(3500.0), StarClass::Red);
        assert_eq!(StarClass::classify(4999.0), StarClass::Red);
        assert_eq!(StarClass::classify(5000.0), StarClass::Orange);
        assert_eq!(StarClass::classify(6000.0), StarClass::Yellow);
        assert_eq!(StarClass::classify(7500.0), StarClass::White);
        assert_eq!(StarClass::classify(9999.0), StarClass::White);
        assert_eq!(StarClass::classify(10000.0), StarClass::Blue);
    }

    #[test]
    fn star_classes_are_ordered_by_temperature() {
        let temps = [-100.0, 0.0, 2000.0, 3500.0, 4402.0, 5518.0, 6500.0, 8000.0, 40000.0];
        let classes: Vec<StarClass> = temps.iter().map(|&t| StarClass::classify(t)).collect();
        assert!(classes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn star_color_is_total() {
        for t in [f64::MIN, -1.0, 0.0, 3500.0, 1e9, f64::MAX, f64::INFINITY] {
            let c = temperature_to_star_color(t);
            assert!(c.r >= 0.0 && c.r <= 1.0);
        }
    }

    #[test]
    fn star_bucket_colors() {
        assert_eq!(temperature_to_star_color(3000.0).to_hex(), 0xFF6B35);
        assert_eq!(temperature_to_star_color(5778.0).to_hex(), 0xFF8800);
        assert_eq!(temperature_to_star_color(12000.0).to_hex(), 0x66AAFF);
    }

    #[test]
    fn planet_class_boundaries() {
        assert_eq!(PlanetClimate::classify(2000.0), PlanetClimate::Molten);
        assert_eq!(PlanetClimate::classify(1999.9), PlanetClimate::Scorching);
        assert_eq!(PlanetClimate::classify(700.0), PlanetClimate::Warm);
        assert_eq!(PlanetClimate::classify(200.0), PlanetClimate::Cool);
        assert_eq!(PlanetClimate::classify(99.0), PlanetClimate::Frozen);
        assert_eq!(PlanetClimate::classify(-5.0), PlanetClimate::Frozen);
    }

    #[test]
    fn same_class_planets_get_distinct_colors() {
        let a = temperature_to_planet_color(233.0);
        let b = temperature_to_planet_color(262.0);
        assert_eq!(PlanetClimate::classify(233.0), PlanetClimate::classify(262.0));
        assert_ne!(a.to_hex(), b.to_hex());
    }

    #[test]
    fn planet_color_is_deterministic() {
        assert_eq!(temperature_to_planet_color(540.0), temperature_to_planet_color(540.0));
    }

    #[test]
    fn hex_round_trip_through_css() {
        let c = Color::from_hex(0x606060);
        assert_eq!(c.to_css(), "#606060");
        assert_eq!(Color::parse("#606060"), Ok(c));
        assert!(Color::parse("#60606").is_err());
    }
}
