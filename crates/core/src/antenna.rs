// CoilCalc - Planar Coil Inductance Calculator
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::inductance::{round_inductance, square_inductance};
use crate::inductance::{RoundAntennaParams, SquareAntennaParams};
use crate::magnitude::format_magnitude;
use coilcalc_config::CoilDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Label -> value mapping describing one antenna. Iterates in key order.
pub type Details = BTreeMap<&'static str, String>;

/// Key under which the formatted inductance is stored in [`Details`].
pub const INDUCTANCE_KEY: &str = "La";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AntennaKind {
    Round,
    Square,
}

impl AntennaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AntennaKind::Round => "round",
            AntennaKind::Square => "square",
        }
    }
}

impl fmt::Display for AntennaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Round(RoundAntennaParams),
    Square(SquareAntennaParams),
}

impl Geometry {
    pub fn kind(&self) -> AntennaKind {
        match self {
            Geometry::Round(_) => AntennaKind::Round,
            Geometry::Square(_) => AntennaKind::Square,
        }
    }

    pub fn inductance(&self) -> f64 {
        match self {
            Geometry::Round(p) => round_inductance(p),
            Geometry::Square(p) => square_inductance(p),
        }
    }
}

impl From<&CoilDescriptor> for Geometry {
    fn from(desc: &CoilDescriptor) -> Self {
        match *desc {
            CoilDescriptor::Round {
                diameter,
                width,
                turns,
            } => Geometry::Round(RoundAntennaParams {
                diameter,
                width,
                turns,
            }),
            CoilDescriptor::Square {
                width,
                height,
                track_thickness,
                track_width,
                track_spacing,
                turns,
            } => Geometry::Square(SquareAntennaParams {
                width,
                height,
                track_thickness,
                track_width,
                track_spacing,
                turns,
            }),
        }
    }
}

/// Shortest round-trip form, always with a fractional part (`20.0`, `0.254`).
///
/// Very small or large values switch to exponent form (`1e-5`, `1e16`).
fn dimension(value: f64) -> String {
    format!("{:?}", value)
}

/// A computed antenna. The inductance is evaluated once, at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Antenna {
    geometry: Geometry,
    inductance: f64,
}

impl Antenna {
    pub fn new(geometry: Geometry) -> Self {
        let inductance = geometry.inductance();
        tracing::debug!(
            "Computed {} antenna: {:?} -> {:e} H",
            geometry.kind(),
            geometry,
            inductance
        );
        if !inductance.is_finite() {
            tracing::warn!(
                "Degenerate {} geometry produced a non-finite inductance ({})",
                geometry.kind(),
                inductance
            );
        }
        Self {
            geometry,
            inductance,
        }
    }

    pub fn kind(&self) -> AntennaKind {
        self.geometry.kind()
    }

    /// Raw inductance in henries.
    pub fn inductance(&self) -> f64 {
        self.inductance
    }

    pub fn display_inductance(&self, decimal_places: usize) -> String {
        format_magnitude(self.inductance, decimal_places)
    }

    pub fn details(&self, decimal_places: usize) -> Details {
        let mut details = Details::new();
        details.insert("type", self.kind().as_str().to_string());

        match &self.geometry {
            Geometry::Round(p) => {
                details.insert("d", dimension(p.diameter));
                details.insert("s", dimension(p.width));
                details.insert("Na", dimension(p.turns));
            }
            Geometry::Square(p) => {
                details.insert("a0", dimension(p.width));
                details.insert("b0", dimension(p.height));
                details.insert("w", dimension(p.track_width));
                details.insert("t", dimension(p.track_thickness));
                details.insert("g", dimension(p.track_spacing));
                details.insert("Na", dimension(p.turns));
            }
        }

        details.insert(INDUCTANCE_KEY, self.display_inductance(decimal_places));
        details
    }

    pub fn check_range(&self, range: &InductanceRange) -> RangeCheck {
        range.check(self.inductance)
    }
}

impl From<&CoilDescriptor> for Antenna {
    fn from(desc: &CoilDescriptor) -> Self {
        Antenna::new(Geometry::from(desc))
    }
}

/// Outcome of comparing an inductance against an [`InductanceRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeCheck {
    Within,
    Below,
    Above,
    /// NaN cannot be ordered against the bounds.
    Undefined,
}

impl RangeCheck {
    pub fn is_within(&self) -> bool {
        matches!(self, RangeCheck::Within)
    }
}

/// Inclusive inductance window in henries. Defaults to the NFC target of 300nH - 3µH.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InductanceRange {
    pub min: f64,
    pub max: f64,
}

impl Default for InductanceRange {
    fn default() -> Self {
        Self {
            min: 300e-9,
            max: 3e-6,
        }
    }
}

impl InductanceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn check(&self, inductance: f64) -> RangeCheck {
        if inductance.is_nan() {
            RangeCheck::Undefined
        } else if inductance < self.min {
            RangeCheck::Below
        } else if inductance > self.max {
            RangeCheck::Above
        } else {
            RangeCheck::Within
        }
    }

    /// User-facing warning for an antenna outside this range.
    pub fn out_of_range_message(&self) -> String {
        format!("Coil is out of the {} inductance range.", self)
    }
}

impl fmt::Display for InductanceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_magnitude(self.min, 0),
            format_magnitude(self.max, 0)
        )
    }
}
