// CoilCalc - Planar Coil Inductance Calculator
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Delimited-text export, one file per antenna kind.
//!
//! Each file starts with a header row (the detail keys) followed by one row of
//! values per antenna. Fields are joined with `,` and never quoted.

use crate::antenna::{Antenna, AntennaKind};
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DELIMITER: &str = ",";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Refusing to overwrite existing file {0:?}")]
    AlreadyExists(PathBuf),
    #[error("Failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Replace every character outside `[a-zA-Z0-9.-]` with `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// The pair of output files for one export run: `<stem>_round.csv` and `<stem>_square.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    directory: PathBuf,
    stem: String,
}

impl ExportTarget {
    /// `name` is sanitized before use.
    pub fn new(directory: impl Into<PathBuf>, name: &str) -> Self {
        Self {
            directory: directory.into(),
            stem: sanitize_file_stem(name),
        }
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn path(&self, kind: AntennaKind) -> PathBuf {
        self.directory
            .join(format!("{}_{}.csv", self.stem, kind.as_str()))
    }

    /// False when either output file already exists.
    pub fn is_available(&self) -> bool {
        [AntennaKind::Round, AntennaKind::Square]
            .iter()
            .all(|kind| !self.path(*kind).exists())
    }
}

/// Write a header row plus one row per antenna. Returns the number of data rows.
///
/// The header is taken from the first antenna, so all antennas should share a kind.
pub fn write_csv<'a, W, I>(mut w: W, antennas: I, decimal_places: usize) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Antenna>,
{
    let mut rows = 0;
    for antenna in antennas {
        let details = antenna.details(decimal_places);
        if rows == 0 {
            let header: Vec<&str> = details.keys().copied().collect();
            writeln!(w, "{}", header.join(DELIMITER))?;
        }
        let values: Vec<&str> = details.values().map(String::as_str).collect();
        writeln!(w, "{}", values.join(DELIMITER))?;
        rows += 1;
    }
    Ok(rows)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub kind: AntennaKind,
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub files: Vec<ExportedFile>,
}

impl ExportSummary {
    pub fn total_rows(&self) -> usize {
        self.files.iter().map(|f| f.rows).sum()
    }
}

fn write_kind(path: &Path, antennas: &[&Antenna], decimal_places: usize) -> Result<usize, ExportError> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => ExportError::AlreadyExists(path.to_path_buf()),
            _ => ExportError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(file);
    let rows = write_csv(&mut writer, antennas.iter().copied(), decimal_places).map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    Ok(rows)
}

/// Export `antennas` into `target`, one file per kind present.
///
/// Files for kinds with no antennas are not created. A failure part-way may leave
/// the first file on disk.
pub fn export_antennas(
    target: &ExportTarget,
    antennas: &[Antenna],
    decimal_places: usize,
) -> Result<ExportSummary, ExportError> {
    let mut summary = ExportSummary::default();

    for kind in [AntennaKind::Round, AntennaKind::Square] {
        let selected: Vec<&Antenna> = antennas.iter().filter(|a| a.kind() == kind).collect();
        if selected.is_empty() {
            continue;
        }

        let path = target.path(kind);
        let rows = write_kind(&path, &selected, decimal_places)?;
        tracing::info!("Wrote {} {} antenna(s) to {:?}", rows, kind, path);
        summary.files.push(ExportedFile { kind, path, rows });
    }

    Ok(summary)
}
