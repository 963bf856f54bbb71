//! Named color ramps.
//!
//! Ramps are defined by a small table of stops and expanded into a
//! 256-entry lookup table, the same resolution the usual plotting colormaps
//! use. A scalar `t` in `[0, 1]` selects entry `floor(t * 256)`, clamped to
//! the last entry.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// RGB color triple.
pub type Rgb = [u8; 3];

/// Number of entries in an expanded ramp.
pub const LUT_SIZE: usize = 256;

/// Stop tables: (position in [0, 1], color).
const INFERNO: &[(f64, Rgb)] = &[
    (0.000, [0, 0, 4]),
    (0.125, [31, 12, 72]),
    (0.250, [85, 15, 109]),
    (0.375, [136, 34, 106]),
    (0.500, [186, 54, 85]),
    (0.625, [227, 89, 51]),
    (0.750, [249, 140, 10]),
    (0.875, [249, 201, 50]),
    (1.000, [252, 255, 164]),
];

const MAGMA: &[(f64, Rgb)] = &[
    (0.000, [0, 0, 4]),
    (0.125, [28, 16, 68]),
    (0.250, [79, 18, 123]),
    (0.375, [129, 37, 129]),
    (0.500, [181, 54, 122]),
    (0.625, [229, 80, 100]),
    (0.750, [251, 135, 97]),
    (0.875, [254, 194, 135]),
    (1.000, [252, 253, 191]),
];

const PLASMA: &[(f64, Rgb)] = &[
    (0.000, [13, 8, 135]),
    (0.125, [75, 3, 161]),
    (0.250, [125, 3, 168]),
    (0.375, [168, 34, 150]),
    (0.500, [203, 70, 121]),
    (0.625, [229, 107, 93]),
    (0.750, [248, 148, 65]),
    (0.875, [253, 195, 40]),
    (1.000, [240, 249, 33]),
];

const VIRIDIS: &[(f64, Rgb)] = &[
    (0.000, [68, 1, 84]),
    (0.125, [71, 44, 122]),
    (0.250, [59, 81, 139]),
    (0.375, [44, 113, 142]),
    (0.500, [33, 144, 141]),
    (0.625, [39, 173, 129]),
    (0.750, [92, 200, 99]),
    (0.875, [170, 220, 50]),
    (1.000, [253, 231, 37]),
];

const CIVIDIS: &[(f64, Rgb)] = &[
    (0.000, [0, 34, 78]),
    (0.125, [18, 53, 112]),
    (0.250, [59, 73, 108]),
    (0.375, [87, 92, 109]),
    (0.500, [112, 113, 115]),
    (0.625, [138, 134, 120]),
    (0.750, [165, 156, 116]),
    (0.875, [202, 185, 98]),
    (1.000, [254, 232, 56]),
];

const GREYS: &[(f64, Rgb)] = &[(0.0, [255, 255, 255]), (1.0, [0, 0, 0])];

const HOT: &[(f64, Rgb)] = &[
    (0.000, [11, 0, 0]),
    (0.365, [255, 0, 0]),
    (0.746, [255, 255, 0]),
    (1.000, [255, 255, 255]),
];

/// Color ramps available for the visualization artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRamp {
    #[default]
    Inferno,
    Magma,
    Plasma,
    Viridis,
    Cividis,
    /// White (sparse) to black (dense)
    Greys,
    /// Black through red and yellow to white
    Hot,
}

impl ColorRamp {
    /// Every registered ramp, in display order.
    pub const ALL: [ColorRamp; 7] = [
        ColorRamp::Inferno,
        ColorRamp::Magma,
        ColorRamp::Plasma,
        ColorRamp::Viridis,
        ColorRamp::Cividis,
        ColorRamp::Greys,
        ColorRamp::Hot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorRamp::Inferno => "inferno",
            ColorRamp::Magma => "magma",
            ColorRamp::Plasma => "plasma",
            ColorRamp::Viridis => "viridis",
            ColorRamp::Cividis => "cividis",
            ColorRamp::Greys => "greys",
            ColorRamp::Hot => "hot",
        }
    }

    fn stops(&self) -> &'static [(f64, Rgb)] {
        match self {
            ColorRamp::Inferno => INFERNO,
            ColorRamp::Magma => MAGMA,
            ColorRamp::Plasma => PLASMA,
            ColorRamp::Viridis => VIRIDIS,
            ColorRamp::Cividis => CIVIDIS,
            ColorRamp::Greys => GREYS,
            ColorRamp::Hot => HOT,
        }
    }

    /// Expand the stop table into a lookup table.
    pub fn lut(&self) -> Vec<Rgb> {
        let stops = self.stops();
        (0..LUT_SIZE)
            .map(|i| interpolate_stops(stops, i as f64 / (LUT_SIZE - 1) as f64))
            .collect()
    }

    /// Color for a scalar in `[0, 1]`. Values outside the range clamp to
    /// the ends; NaN maps to the lowest color.
    pub fn color(&self, t: f64) -> Rgb {
        lut_color(&self.lut(), t)
    }
}

/// Pick the lookup-table entry for `t`.
#[inline]
pub fn lut_color(lut: &[Rgb], t: f64) -> Rgb {
    let last = lut.len().saturating_sub(1);
    let idx = if t.is_nan() || t <= 0.0 {
        0
    } else {
        ((t * lut.len() as f64) as usize).min(last)
    };
    lut[idx]
}

fn interpolate_stops(stops: &[(f64, Rgb)], t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
            return [
                lerp(c0[0], c1[0], f),
                lerp(c0[1], c1[1], f),
                lerp(c0[2], c1[2], f),
            ];
        }
    }
    stops[stops.len() - 1].1
}

#[inline]
fn lerp(a: u8, b: u8, f: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * f).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for ColorRamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown ramp name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRampError {
    pub name: String,
}

impl fmt::Display for ParseRampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = ColorRamp::ALL.iter().map(ColorRamp::name).collect();
        write!(
            f,
            "unknown color ramp '{}' (available: {})",
            self.name,
            names.join(", ")
        )
    }
}

impl std::error::Error for ParseRampError {}

impl FromStr for ColorRamp {
    type Err = ParseRampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ColorRamp::ALL
            .into_iter()
            .find(|ramp| ramp.name() == wanted)
            .ok_or_else(|| ParseRampError {
                name: s.to_string(),
            })
    }
}
