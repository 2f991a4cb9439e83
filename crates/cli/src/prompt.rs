// CoilCalc - Planar Coil Inductance Calculator
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Line-oriented prompting over any `BufRead`/`Write` pair.
//!
//! Every `prompt_*` method returns `Ok(None)` once the input is exhausted.

use std::io::{self, BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Next input line without its terminator, or `None` at EOF.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Repeat `msg` until a line parses as a float.
    pub fn prompt_f64(&mut self, msg: &str) -> io::Result<Option<f64>> {
        loop {
            writeln!(self.output, "{}", msg)?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<f64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    tracing::debug!("Rejected numeric input {:?}", line);
                    writeln!(self.output, "Invalid entry.")?;
                }
            }
        }
    }

    /// Ask `msg [truthy|falsy]:` until one of the two answers is given (case-insensitive).
    pub fn prompt_yes_no(&mut self, msg: &str, truthy: &str, falsy: &str) -> io::Result<Option<bool>> {
        loop {
            writeln!(self.output, "{} [{}|{}]:", msg, truthy, falsy)?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            let answer = line.trim().to_lowercase();
            if answer == truthy.to_lowercase() {
                return Ok(Some(true));
            } else if answer == falsy.to_lowercase() {
                return Ok(Some(false));
            }
            writeln!(self.output, "Invalid selection.")?;
            writeln!(self.output)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_prompt_f64_retries_until_valid() {
        let mut p = prompter("abc\n\n12.5\n");
        assert_eq!(p.prompt_f64("Diameter?").unwrap(), Some(12.5));

        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out.matches("Diameter?").count(), 3);
        assert_eq!(out.matches("Invalid entry.").count(), 2);
    }

    #[test]
    fn test_prompt_f64_many_bad_lines_do_not_recurse() {
        let mut input = "x\n".repeat(100_000);
        input.push_str("3\n");
        let mut p = prompter(&input);
        assert_eq!(p.prompt_f64("Turns?").unwrap(), Some(3.0));
    }

    #[test]
    fn test_prompt_f64_eof() {
        let mut p = prompter("nope\n");
        assert_eq!(p.prompt_f64("Width?").unwrap(), None);
    }

    #[test]
    fn test_prompt_yes_no() {
        let mut p = prompter("maybe\nY\r\n");
        assert_eq!(p.prompt_yes_no("Keep antenna?", "y", "n").unwrap(), Some(true));
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.starts_with("Keep antenna? [y|n]:\nInvalid selection.\n\n"));

        let mut p = prompter("n\n");
        assert_eq!(p.prompt_yes_no("Keep antenna?", "y", "n").unwrap(), Some(false));
    }

    #[test]
    fn test_read_line_strips_terminators() {
        let mut p = prompter("first\r\nsecond");
        assert_eq!(p.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(p.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(p.read_line().unwrap(), None);
    }
}
