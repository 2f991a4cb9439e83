// CoilCalc - Planar Coil Inductance Calculator
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_SCHEMA_VERSION: &str = "1.0";

/// Upper bound on fractional digits accepted for displayed inductances.
pub const MAX_DECIMAL_PLACES: usize = 12;

/// Default schema version for YAML configs
fn default_schema_version() -> String {
    SUPPORTED_SCHEMA_VERSION.to_string()
}

fn default_decimal_places() -> usize {
    3
}

fn default_range_min() -> String {
    "300nH".to_string()
}

fn default_range_max() -> String {
    "3uH".to_string()
}

fn default_export_directory() -> PathBuf {
    PathBuf::from(".")
}

fn check_schema_version(version: &str) -> Result<()> {
    if version != SUPPORTED_SCHEMA_VERSION {
        anyhow::bail!(
            "Unsupported schema_version '{}'. Supported versions: '{}'",
            version,
            SUPPORTED_SCHEMA_VERSION
        );
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RangeCheckConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_range_min")]
    pub min: String, // e.g. "300nH"
    #[serde(default = "default_range_max")]
    pub max: String, // e.g. "3uH"
}

impl Default for RangeCheckConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min: default_range_min(),
            max: default_range_max(),
        }
    }
}

impl RangeCheckConfig {
    /// Parsed `(min, max)` bounds in henries.
    pub fn bounds(&self) -> Result<(f64, f64)> {
        let min = parse_inductance(&self.min)
            .with_context(|| format!("Invalid inductance_range.min '{}'", self.min))?;
        let max = parse_inductance(&self.max)
            .with_context(|| format!("Invalid inductance_range.max '{}'", self.max))?;
        Ok((min, max))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    #[serde(default = "default_export_directory")]
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
        }
    }
}

/// User settings, usually loaded from `coilcalc.yaml`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default = "default_decimal_places")]
    pub decimal_places: usize,
    #[serde(default)]
    pub inductance_range: RangeCheckConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            decimal_places: default_decimal_places(),
            inductance_range: RangeCheckConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings at {:?}", path.as_ref()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml).context("Failed to parse Settings YAML")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        check_schema_version(&self.schema_version)?;

        if self.decimal_places > MAX_DECIMAL_PLACES {
            anyhow::bail!(
                "Setting 'decimal_places' must be at most {}, got {}",
                MAX_DECIMAL_PLACES,
                self.decimal_places
            );
        }

        let (min, max) = self.inductance_range.bounds()?;
        if min > max {
            anyhow::bail!(
                "inductance_range.min ({}) is greater than inductance_range.max ({})",
                self.inductance_range.min,
                self.inductance_range.max
            );
        }

        Ok(())
    }
}

/// One antenna entry of a coil set file. Dimensions are in millimetres.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CoilDescriptor {
    Round {
        diameter: f64,
        width: f64,
        turns: f64,
    },
    Square {
        width: f64,
        height: f64,
        track_thickness: f64,
        track_width: f64,
        track_spacing: f64,
        turns: f64,
    },
}

impl CoilDescriptor {
    fn dimensions(&self) -> Vec<(&'static str, f64)> {
        match self {
            CoilDescriptor::Round {
                diameter,
                width,
                turns,
            } => vec![("diameter", *diameter), ("width", *width), ("turns", *turns)],
            CoilDescriptor::Square {
                width,
                height,
                track_thickness,
                track_width,
                track_spacing,
                turns,
            } => vec![
                ("width", *width),
                ("height", *height),
                ("track_thickness", *track_thickness),
                ("track_width", *track_width),
                ("track_spacing", *track_spacing),
                ("turns", *turns),
            ],
        }
    }
}

/// A batch of antennas to compute non-interactively.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct CoilSet {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub antennas: Vec<CoilDescriptor>,
}

impl CoilSet {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = std::fs::File::open(&path)
            .with_context(|| format!("Failed to open coil set at {:?}", path.as_ref()))?;
        let set: Self = serde_yaml::from_reader(f).context("Failed to parse Coil Set YAML")?;
        set.validate()?;
        Ok(set)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let set: Self = serde_yaml::from_str(yaml).context("Failed to parse Coil Set YAML")?;
        set.validate()?;
        Ok(set)
    }

    pub fn validate(&self) -> Result<()> {
        check_schema_version(&self.schema_version)?;

        if self.antennas.is_empty() {
            anyhow::bail!("Coil set must list at least one antenna");
        }

        for (index, antenna) in self.antennas.iter().enumerate() {
            for (name, value) in antenna.dimensions() {
                if !value.is_finite() {
                    anyhow::bail!("Antenna #{} has a non-finite '{}' ({})", index, name, value);
                }
                if value <= 0.0 {
                    tracing::warn!(
                        "Antenna #{} has a non-positive '{}' ({}); result may be NaN",
                        index,
                        name,
                        value
                    );
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InductanceParseError {
    #[error("empty inductance literal")]
    Empty,
    #[error("unknown SI prefix '{0}'")]
    UnknownPrefix(String),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

fn prefix_exponent(prefix: &str) -> Option<i32> {
    let exp = match prefix {
        "" => 0,
        "f" => -15,
        "p" => -12,
        "n" => -9,
        "u" | "µ" | "μ" => -6,
        "m" => -3,
        "k" => 3,
        "M" => 6,
        "G" => 9,
        "T" => 12,
        _ => return None,
    };
    Some(exp)
}

/// Parse an inductance literal such as `"300nH"`, `"3 uH"`, `"1.5e-6"` into henries.
pub fn parse_inductance(literal: &str) -> Result<f64, InductanceParseError> {
    let trimmed = literal.trim();
    let without_unit = trimmed.strip_suffix('H').unwrap_or(trimmed).trim_end();
    if without_unit.is_empty() {
        return Err(InductanceParseError::Empty);
    }

    // The numeric part ends at the last char that can belong to a float.
    let split = without_unit
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_ascii_digit() || *c == '.')
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let (number, prefix) = without_unit.split_at(split);
    let prefix = prefix.trim();

    let exp = prefix_exponent(prefix)
        .ok_or_else(|| InductanceParseError::UnknownPrefix(prefix.to_string()))?;
    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| InductanceParseError::InvalidNumber(number.trim().to_string()))?;

    Ok(value * 10f64.powi(exp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::from_yaml("schema_version: \"1.0\"\n").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.decimal_places, 3);
        assert!(!settings.inductance_range.enabled);
        assert_eq!(settings.export.directory, PathBuf::from("."));
    }

    #[test]
    fn test_full_settings() {
        let yaml = r#"
schema_version: "1.0"
decimal_places: 5
inductance_range:
  enabled: true
  min: "1uH"
  max: "2 uH"
export:
  directory: "out"
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.decimal_places, 5);
        assert!(settings.inductance_range.enabled);
        let (min, max) = settings.inductance_range.bounds().unwrap();
        assert!((min - 1e-6).abs() < 1e-18);
        assert!((max - 2e-6).abs() < 1e-18);
        assert_eq!(settings.export.directory, PathBuf::from("out"));
    }

    #[test]
    fn test_invalid_version() {
        let err = Settings::from_yaml("schema_version: \"2.0\"\n").unwrap_err();
        assert!(err.to_string().contains("Unsupported schema_version"));
    }

    #[test]
    fn test_too_many_decimal_places() {
        let err = Settings::from_yaml("decimal_places: 40\n").unwrap_err();
        assert!(err.to_string().contains("decimal_places"));
    }

    #[test]
    fn test_inverted_range() {
        let yaml = r#"
inductance_range:
  min: "3uH"
  max: "300nH"
"#;
        let err = Settings::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("greater than"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Settings::from_yaml("decimals: 3\n").is_err());
    }

    #[test]
    fn test_parse_inductance_prefixes() {
        let cases = [
            ("300nH", 300e-9),
            ("3uH", 3e-6),
            ("3µH", 3e-6),
            ("2.5 mH", 2.5e-3),
            ("1H", 1.0),
            ("1.5e-6", 1.5e-6),
            ("4 kH", 4e3),
            ("10pH", 10e-12),
        ];
        for (literal, expected) in cases {
            let value = parse_inductance(literal).unwrap();
            assert!(
                ((value - expected) / expected).abs() < 1e-12,
                "{} parsed as {}",
                literal,
                value
            );
        }
    }

    #[test]
    fn test_parse_inductance_errors() {
        assert_eq!(parse_inductance(""), Err(InductanceParseError::Empty));
        assert_eq!(parse_inductance("H"), Err(InductanceParseError::Empty));
        assert_eq!(
            parse_inductance("3xH"),
            Err(InductanceParseError::UnknownPrefix("x".to_string()))
        );
        assert!(matches!(
            parse_inductance("nH"),
            Err(InductanceParseError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_coil_set_parsing() {
        let yaml = r#"
schema_version: "1.0"
antennas:
  - type: round
    diameter: 40.0
    width: 2.0
    turns: 4
  - type: square
    width: 20
    height: 20
    track_thickness: 0.035
    track_width: 0.254
    track_spacing: 0.254
    turns: 4
"#;
        let set = CoilSet::from_yaml(yaml).unwrap();
        assert_eq!(set.antennas.len(), 2);
        assert_eq!(
            set.antennas[0],
            CoilDescriptor::Round {
                diameter: 40.0,
                width: 2.0,
                turns: 4.0
            }
        );
        assert!(matches!(
            set.antennas[1],
            CoilDescriptor::Square { height, .. } if height == 20.0
        ));
    }

    #[test]
    fn test_empty_coil_set() {
        let err = CoilSet::from_yaml("antennas: []\n").unwrap_err();
        assert!(err.to_string().contains("at least one antenna"));
    }

    #[test]
    fn test_non_finite_dimension() {
        let yaml = r#"
antennas:
  - type: round
    diameter: .nan
    width: 2.0
    turns: 4
"#;
        let err = CoilSet::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("non-finite 'diameter'"));
    }

    #[test]
    fn test_missing_square_field() {
        let yaml = r#"
antennas:
  - type: square
    width: 20
    height: 20
    turns: 4
"#;
        assert!(CoilSet::from_yaml(yaml).is_err());
    }
}
