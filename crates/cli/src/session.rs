// CoilCalc - Planar Coil Inductance Calculator
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::prompt::Prompter;
use crate::RunOptions;
use coilcalc_core::{
    export_antennas, Antenna, AntennaKind, ExportTarget, Geometry, RoundAntennaParams,
    SquareAntennaParams,
};
use std::io::{self, BufRead, Write};

/// Whether the session should keep going after a menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive menu loop. Created antennas live here until the session ends.
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    options: RunOptions,
    antennas: Vec<Antenna>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, options: RunOptions) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            options,
            antennas: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn antennas(&self) -> &[Antenna] {
        &self.antennas
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompter.read_line()? else {
                tracing::debug!("Input closed, leaving session");
                break;
            };

            let selection = line.trim_start().chars().next().map(|c| c.to_ascii_lowercase());
            let has_antennas = !self.antennas.is_empty();
            let flow = match selection {
                Some('r') => self.create(AntennaKind::Round)?,
                Some('s') => self.create(AntennaKind::Square)?,
                Some('l') if has_antennas => self.list()?,
                Some('e') if has_antennas => self.export()?,
                Some('q') => Flow::Quit,
                _ => {
                    let out = self.prompter.out();
                    writeln!(out, "Invalid selection.")?;
                    writeln!(out)?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let has_antennas = !self.antennas.is_empty();
        let out = self.prompter.out();
        writeln!(out, "What would you like to do?")?;
        writeln!(out, "\tCreate [r]ound antenna?")?;
        writeln!(out, "\tCreate [s]quare antenna?")?;
        if has_antennas {
            writeln!(out, "\t[L]ist created antennae?")?;
            writeln!(out, "\t[E]xport antennae?")?;
        }
        writeln!(out, "\t[Q]uit?")?;
        Ok(())
    }

    fn read_round(&mut self) -> io::Result<Option<Geometry>> {
        let p = &mut self.prompter;
        writeln!(p.out())?;
        writeln!(p.out(), "You selected round.")?;
        writeln!(p.out())?;

        let Some(diameter) = p.prompt_f64("Enter the average diameter[d] of the NFC antenna: ")?
        else {
            return Ok(None);
        };
        let Some(width) = p.prompt_f64("Enter the width[s] of the NFC antenna: ")? else {
            return Ok(None);
        };
        let Some(turns) =
            p.prompt_f64("Enter the number of turns[Na] of the NFC antenna: (1-6 is ideal)")?
        else {
            return Ok(None);
        };

        Ok(Some(Geometry::Round(RoundAntennaParams {
            diameter,
            width,
            turns,
        })))
    }

    fn read_square(&mut self) -> io::Result<Option<Geometry>> {
        let p = &mut self.prompter;
        let questions = [
            "Enter the width[a0] of the NFC antenna: ",
            "Enter the height[b0] of the NFC antenna: ",
            "Enter the track thickness[t] of the NFC antenna:\n(0.03556mm = 1oz/ft^2)",
            "Enter the track width[w] of the NFC antenna:\n(0.254mm = 10mils)",
            "Enter the track spacing[g] of the NFC antenna:\n(0.254mm = 10mils)",
            "Enter the number of turns[Na] of the NFC antenna: (1-6 is ideal)",
        ];

        let mut answers = [0.0; 6];
        for (answer, question) in answers.iter_mut().zip(questions) {
            let Some(value) = p.prompt_f64(question)? else {
                return Ok(None);
            };
            *answer = value;
        }
        let [width, height, track_thickness, track_width, track_spacing, turns] = answers;

        Ok(Some(Geometry::Square(SquareAntennaParams {
            width,
            height,
            track_thickness,
            track_width,
            track_spacing,
            turns,
        })))
    }

    fn create(&mut self, kind: AntennaKind) -> io::Result<Flow> {
        writeln!(self.prompter.out(), "All units are in millimeters")?;

        let geometry = match kind {
            AntennaKind::Round => self.read_round()?,
            AntennaKind::Square => self.read_square()?,
        };
        let Some(geometry) = geometry else {
            return Ok(Flow::Quit);
        };

        let antenna = Antenna::new(geometry);
        let places = self.options.decimal_places;
        let out = self.prompter.out();
        writeln!(out)?;
        writeln!(
            out,
            "The inductance of the coil is: {}",
            antenna.display_inductance(places)
        )?;
        if let Some(range) = &self.options.range {
            if !antenna.check_range(range).is_within() {
                writeln!(out, "\t{}", range.out_of_range_message())?;
            }
        }
        writeln!(out)?;

        match self.prompter.prompt_yes_no("Keep antenna?", "y", "n")? {
            Some(true) => {
                tracing::info!(
                    "Kept {} antenna #{} ({})",
                    kind,
                    self.antennas.len() + 1,
                    antenna.display_inductance(places)
                );
                self.antennas.push(antenna);
                Ok(Flow::Continue)
            }
            Some(false) => Ok(Flow::Continue),
            None => Ok(Flow::Quit),
        }
    }

    fn list(&mut self) -> io::Result<Flow> {
        let places = self.options.decimal_places;
        let out = self.prompter.out();
        for antenna in &self.antennas {
            for (key, value) in antenna.details(places) {
                writeln!(out, "{}: {}", key, value)?;
            }
            writeln!(out)?;
        }
        Ok(Flow::Continue)
    }

    fn export(&mut self) -> io::Result<Flow> {
        writeln!(self.prompter.out(), "File name to use?")?;

        let target = loop {
            let Some(name) = self.prompter.read_line()? else {
                return Ok(Flow::Quit);
            };
            let target = ExportTarget::new(&self.options.export_dir, &name);
            if !target.stem().is_empty() && target.is_available() {
                break target;
            }
            writeln!(self.prompter.out(), "Invalid file name. Try again.")?;
        };

        match export_antennas(&target, &self.antennas, self.options.decimal_places) {
            Ok(summary) => {
                let out = self.prompter.out();
                for file in &summary.files {
                    writeln!(
                        out,
                        "Wrote {} {} antenna(s) to {}",
                        file.rows,
                        file.kind,
                        file.path.display()
                    )?;
                }
                writeln!(out)?;
            }
            Err(e) => {
                tracing::error!("{:#}", e);
                writeln!(self.prompter.out(), "Unable to create files.")?;
            }
        }
        Ok(Flow::Continue)
    }
}
