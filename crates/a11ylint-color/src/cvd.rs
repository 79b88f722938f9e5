//! Color vision deficiency simulation (Viénot 1999 matrices).

use crate::contrast::{contrast_ratio, linearize};
use crate::Rgb;

/// Color vision deficiency types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CvdType {
    /// Missing L cones (red-blind).
    Protanopia,
    /// Missing M cones (green-blind).
    Deuteranopia,
    /// Missing S cones (blue-blind).
    Tritanopia,
}

impl CvdType {
    /// All three deficiency types.
    pub const ALL: [Self; 3] = [Self::Protanopia, Self::Deuteranopia, Self::Tritanopia];

    /// Returns the lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
        }
    }
}

impl std::fmt::Display for CvdType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

type Matrix3 = [[f64; 3]; 3];

/// Viénot 1999 simulation matrices; operate on linearized sRGB.
const PROTANOPIA_MATRIX: Matrix3 = [
    [0.56667, 0.43333, 0.0],
    [0.55833, 0.44167, 0.0],
    [0.0, 0.24167, 0.75833],
];

const DEUTERANOPIA_MATRIX: Matrix3 = [
    [0.625, 0.375, 0.0],
    [0.7, 0.3, 0.0],
    [0.0, 0.3, 0.7],
];

const TRITANOPIA_MATRIX: Matrix3 = [
    [0.95, 0.05, 0.0],
    [0.0, 0.43333, 0.56667],
    [0.0, 0.475, 0.525],
];

fn matrix_for(cvd_type: CvdType) -> &'static Matrix3 {
    match cvd_type {
        CvdType::Protanopia => &PROTANOPIA_MATRIX,
        CvdType::Deuteranopia => &DEUTERANOPIA_MATRIX,
        CvdType::Tritanopia => &TRITANOPIA_MATRIX,
    }
}

/// Converts a linear RGB channel back to an sRGB 0-255 value.
fn to_srgb(value: f64) -> u8 {
    let v = value.clamp(0.0, 1.0);
    let s = if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    };
    (s * 255.0).round().clamp(0.0, 255.0) as u8
}

fn mat_mul(matrix: &Matrix3, vec: [f64; 3]) -> [f64; 3] {
    [
        matrix[0][0] * vec[0] + matrix[0][1] * vec[1] + matrix[0][2] * vec[2],
        matrix[1][0] * vec[0] + matrix[1][1] * vec[1] + matrix[1][2] * vec[2],
        matrix[2][0] * vec[0] + matrix[2][1] * vec[1] + matrix[2][2] * vec[2],
    ]
}

/// Simulates how a color appears under the given color vision deficiency.
#[must_use]
pub fn simulate_cvd(rgb: Rgb, cvd_type: CvdType) -> Rgb {
    let linear = [linearize(rgb.0), linearize(rgb.1), linearize(rgb.2)];
    let sim = mat_mul(matrix_for(cvd_type), linear);
    (to_srgb(sim[0]), to_srgb(sim[1]), to_srgb(sim[2]))
}

/// Minimum simulated contrast for two colors to count as distinguishable.
pub const DISTINGUISHABLE_RATIO: f64 = 1.5;

/// Checks if two colors remain distinguishable under a CVD simulation.
#[must_use]
pub fn colors_distinguishable(color1: Rgb, color2: Rgb, cvd_type: CvdType) -> bool {
    let sim1 = simulate_cvd(color1, cvd_type);
    let sim2 = simulate_cvd(color2, cvd_type);
    contrast_ratio(sim1, sim2) >= DISTINGUISHABLE_RATIO
}
