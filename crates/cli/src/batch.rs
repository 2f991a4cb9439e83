// CoilCalc - Planar Coil Inductance Calculator
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Non-interactive evaluation of a coil set file.

use crate::RunOptions;
use coilcalc_config::CoilSet;
use coilcalc_core::{Antenna, AntennaKind, Details, INDUCTANCE_KEY};
use serde::Serialize;
use std::io::{self, Write};

/// One line of `--json` output.
#[derive(Debug, Serialize)]
struct AntennaRecord<'a> {
    index: usize,
    kind: AntennaKind,
    inductance_henries: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    within_range: Option<bool>,
    details: &'a Details,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub antennas: Vec<Antenna>,
    pub out_of_range: usize,
}

/// Compute every antenna in `set` and print its details to `out`.
pub fn evaluate<W: Write>(
    set: &CoilSet,
    options: &RunOptions,
    json: bool,
    mut out: W,
) -> io::Result<BatchReport> {
    let mut report = BatchReport::default();

    for (index, desc) in set.antennas.iter().enumerate() {
        let antenna = Antenna::from(desc);
        let details = antenna.details(options.decimal_places);
        let within_range = options
            .range
            .as_ref()
            .map(|range| antenna.check_range(range).is_within());

        if let (Some(false), Some(range)) = (within_range, options.range.as_ref()) {
            report.out_of_range += 1;
            tracing::warn!(
                "Antenna #{} ({}) is outside the {} target",
                index,
                details[INDUCTANCE_KEY],
                range
            );
        }

        if json {
            let record = AntennaRecord {
                index,
                kind: antenna.kind(),
                inductance_henries: antenna.inductance(),
                within_range,
                details: &details,
            };
            let line = serde_json::to_string(&record).map_err(io::Error::other)?;
            writeln!(out, "{}", line)?;
        } else {
            for (key, value) in &details {
                writeln!(out, "{}: {}", key, value)?;
            }
            if let (Some(false), Some(range)) = (within_range, options.range.as_ref()) {
                writeln!(out, "\t{}", range.out_of_range_message())?;
            }
            writeln!(out)?;
        }

        report.antennas.push(antenna);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coilcalc_core::InductanceRange;
    use std::path::PathBuf;

    const COILS: &str = r#"
antennas:
  - type: round
    diameter: 40
    width: 2
    turns: 4
  - type: round
    diameter: 10
    width: 1
    turns: 1
  - type: square
    width: 20
    height: 20
    track_thickness: 0.035
    track_width: 0.254
    track_spacing: 0.254
    turns: 4
"#;

    fn options(range: Option<InductanceRange>) -> RunOptions {
        RunOptions {
            decimal_places: 3,
            range,
            export_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn test_text_output() {
        let set = CoilSet::from_yaml(COILS).unwrap();
        let mut out = Vec::new();
        let report = evaluate(&set, &options(None), false, &mut out).unwrap();
        assert_eq!(report.antennas.len(), 3);
        assert_eq!(report.out_of_range, 0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("La: 1.384µH\nNa: 4.0\nd: 40.0\ns: 2.0\ntype: round\n\n"));
        assert!(text.contains("La: 707.221nH\n"));
    }

    #[test]
    fn test_range_counting() {
        let set = CoilSet::from_yaml(COILS).unwrap();
        let mut out = Vec::new();
        let report = evaluate(
            &set,
            &options(Some(InductanceRange::default())),
            false,
            &mut out,
        )
        .unwrap();
        assert_eq!(report.out_of_range, 1);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Coil is out of the").count(), 1);
    }

    #[test]
    fn test_json_output() {
        let set = CoilSet::from_yaml(COILS).unwrap();
        let mut out = Vec::new();
        evaluate(
            &set,
            &options(Some(InductanceRange::default())),
            true,
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["kind"], "round");
        assert_eq!(lines[0]["details"]["La"], "1.384µH");
        assert_eq!(lines[1]["within_range"], false);
        assert_eq!(lines[2]["kind"], "square");
        assert_eq!(lines[2]["details"]["a0"], "20.0");
    }
}
