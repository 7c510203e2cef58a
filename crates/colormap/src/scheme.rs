//! Color schemes and multi-stop interpolation engine.

use satviz_core::Error;
use std::str::FromStr;

/// RGB color as (r, g, b) with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color stop: position in [0, 1] mapped to an RGB color.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub t: f64,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(t: f64, r: u8, g: u8, b: u8) -> Self {
        Self {
            t,
            color: Rgb::new(r, g, b),
        }
    }
}

/// Available color schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    /// Black -> White
    Grayscale,
    /// Purple -> Teal -> Yellow (perceptually uniform, sequential)
    Viridis,
    /// Red -> Yellow -> Green (diverging, NDVI)
    RdYlGn,
}

impl ColorScheme {
    /// All available schemes.
    pub const ALL: &[ColorScheme] = &[Self::Grayscale, Self::Viridis, Self::RdYlGn];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grayscale => "gray",
            Self::Viridis => "viridis",
            Self::RdYlGn => "RdYlGn",
        }
    }
}

impl FromStr for ColorScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gray" | "grey" | "grayscale" => Ok(Self::Grayscale),
            "viridis" => Ok(Self::Viridis),
            "rdylgn" => Ok(Self::RdYlGn),
            _ => Err(Error::InvalidParameter {
                name: "color_scheme",
                value: s.to_string(),
                reason: "expected one of: gray, viridis, rdylgn".to_string(),
            }),
        }
    }
}

// ─── Color stop definitions ────────────────────────────────────────────

const VIRIDIS_STOPS: &[ColorStop] = &[
    ColorStop::new(0.000, 68, 1, 84),
    ColorStop::new(0.125, 71, 44, 122),
    ColorStop::new(0.250, 59, 81, 139),
    ColorStop::new(0.375, 44, 113, 142),
    ColorStop::new(0.500, 33, 144, 141),
    ColorStop::new(0.625, 39, 173, 129),
    ColorStop::new(0.750, 92, 200, 99),
    ColorStop::new(0.875, 170, 220, 50),
    ColorStop::new(1.000, 253, 231, 37),
];

// ColorBrewer 11-class RdYlGn
const RDYLGN_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 165, 0, 38),
    ColorStop::new(0.1, 215, 48, 39),
    ColorStop::new(0.2, 244, 109, 67),
    ColorStop::new(0.3, 253, 174, 97),
    ColorStop::new(0.4, 254, 224, 139),
    ColorStop::new(0.5, 255, 255, 191),
    ColorStop::new(0.6, 217, 239, 139),
    ColorStop::new(0.7, 166, 217, 106),
    ColorStop::new(0.8, 102, 189, 99),
    ColorStop::new(0.9, 26, 152, 80),
    ColorStop::new(1.0, 0, 104, 55),
];

// ─── Interpolation engine ──────────────────────────────────────────────

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp(c1.r as f64, c2.r as f64, t).round() as u8,
        lerp(c1.g as f64, c2.g as f64, t).round() as u8,
        lerp(c1.b as f64, c2.b as f64, t).round() as u8,
    )
}

fn multi_stop(stops: &[ColorStop], t: f64) -> Rgb {
    if t <= 0.0 {
        return stops[0].color;
    }
    if t >= 1.0 {
        return stops[stops.len() - 1].color;
    }
    for i in 1..stops.len() {
        if t <= stops[i].t {
            let ratio = (t - stops[i - 1].t) / (stops[i].t - stops[i - 1].t);
            return lerp_color(stops[i - 1].color, stops[i].color, ratio);
        }
    }
    stops[stops.len() - 1].color
}

/// Evaluate a color scheme at normalized position `t` ∈ [0, 1].
///
/// `t` outside the unit interval is clamped to the end colors.
pub fn evaluate(scheme: ColorScheme, t: f64) -> Rgb {
    match scheme {
        ColorScheme::Grayscale => {
            let v = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
            Rgb::new(v, v, v)
        }
        ColorScheme::Viridis => multi_stop(VIRIDIS_STOPS, t),
        ColorScheme::RdYlGn => multi_stop(RDYLGN_STOPS, t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_midpoint() {
        let c = evaluate(ColorScheme::Grayscale, 0.5);
        assert_eq!(c, Rgb::new(128, 128, 128));
    }

    #[test]
    fn viridis_endpoints() {
        assert_eq!(evaluate(ColorScheme::Viridis, 0.0), Rgb::new(68, 1, 84));
        assert_eq!(evaluate(ColorScheme::Viridis, 1.0), Rgb::new(253, 231, 37));
    }

    #[test]
    fn rdylgn_centre_is_pale_yellow() {
        assert_eq!(evaluate(ColorScheme::RdYlGn, 0.5), Rgb::new(255, 255, 191));
    }

    #[test]
    fn clamping_outside_unit_interval() {
        assert_eq!(evaluate(ColorScheme::RdYlGn, -0.5), Rgb::new(165, 0, 38));
        assert_eq!(evaluate(ColorScheme::RdYlGn, 1.5), Rgb::new(0, 104, 55));
        assert_eq!(evaluate(ColorScheme::Grayscale, 2.0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn parse_names() {
        assert_eq!("Viridis".parse::<ColorScheme>().unwrap(), ColorScheme::Viridis);
        assert_eq!("grey".parse::<ColorScheme>().unwrap(), ColorScheme::Grayscale);
        assert_eq!("RdYlGn".parse::<ColorScheme>().unwrap(), ColorScheme::RdYlGn);
        assert!("jet".parse::<ColorScheme>().is_err());
    }

    #[test]
    fn names_parse_back() {
        for &scheme in ColorScheme::ALL {
            assert_eq!(scheme.name().parse::<ColorScheme>().unwrap(), scheme);
        }
    }
}
