// CoilCalc - Planar Coil Inductance Calculator
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

pub mod antenna;
pub mod export;
pub mod inductance;
pub mod magnitude;

pub use antenna::{
    Antenna, AntennaKind, Details, Geometry, InductanceRange, RangeCheck, INDUCTANCE_KEY,
};
pub use export::{export_antennas, sanitize_file_stem, write_csv, ExportError, ExportTarget};
pub use inductance::{round_inductance, square_inductance, RoundAntennaParams, SquareAntennaParams};
pub use magnitude::{format_inductance, format_magnitude, DEFAULT_DECIMAL_PLACES};
