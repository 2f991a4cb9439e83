// CoilCalc - Planar Coil Inductance Calculator
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Closed-form inductance models for planar spiral antennas.
//!
//! Inputs are taken as-is. Zero or negative dimensions are not rejected: the
//! formulas are evaluated faithfully and NaN or infinity reaches the caller.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Scaled permeability constant used by the square-coil model (not SI μ₀).
pub const SQUARE_MODEL_MU0: f64 = 1.256637062e-9;

/// Empirical constant of the round-coil model, nH per cm.
const ROUND_MODEL_K: f64 = 24.6;

const MM_PER_CM: f64 = 10.0;

/// Round spiral. Dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundAntennaParams {
    /// Average diameter, `d`.
    pub diameter: f64,
    /// Winding width, `s`.
    pub width: f64,
    /// Number of turns, `Na`. Fractional values are allowed.
    pub turns: f64,
}

/// Rectangular spiral. Dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquareAntennaParams {
    /// Overall width, `a0`.
    pub width: f64,
    /// Overall height, `b0`.
    pub height: f64,
    /// Copper thickness, `t`.
    pub track_thickness: f64,
    /// Trace width, `w`.
    pub track_width: f64,
    /// Gap between traces, `g`.
    pub track_spacing: f64,
    /// Number of turns, `Na`.
    pub turns: f64,
}

/// Intermediate terms of the square-coil model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareDerived {
    pub average_width: f64,
    pub average_height: f64,
    /// Equivalent conductor diameter.
    pub diameter: f64,
    pub diagonal: f64,
}

impl SquareAntennaParams {
    /// Derived terms, computed in dependency order.
    pub fn derived(&self) -> SquareDerived {
        let pitch = self.track_spacing + self.track_width;
        let average_width = self.width - self.turns * pitch;
        let average_height = self.height - self.turns * pitch;
        let diameter = 2.0 * (self.track_thickness + self.track_width) / PI;
        let diagonal = (average_width.powi(2) + average_height.powi(2)).sqrt();

        SquareDerived {
            average_width,
            average_height,
            diameter,
            diagonal,
        }
    }
}

/// Inductance of a round spiral in henries.
pub fn round_inductance(params: &RoundAntennaParams) -> f64 {
    let diameter_cm = params.diameter / MM_PER_CM;
    let width_cm = params.width / MM_PER_CM;

    ROUND_MODEL_K * params.turns.powi(2) * diameter_cm / (1.0 + 2.75 * (width_cm / diameter_cm))
        * 1.0e-9
}

/// Inductance of a rectangular spiral in henries.
pub fn square_inductance(params: &SquareAntennaParams) -> f64 {
    let SquareDerived {
        average_width: a,
        average_height: b,
        diameter: d,
        diagonal,
    } = params.derived();

    let area_term = 2.0 * a * b;
    let x1 = a * (area_term / (d * (a + diagonal))).ln();
    let x2 = b * (area_term / (d * (b + diagonal))).ln();
    let x3 = 2.0 * (a + b - diagonal);
    let x4 = (a + b) / 4.0;

    // Left-to-right sum; regrouping changes the last bits.
    SQUARE_MODEL_MU0 / PI * (x1 + x2 - x3 + x4) * params.turns.powf(1.8)
}
