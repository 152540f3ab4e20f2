//! Interactive menu for the CLI frontend.
//!
//! Reads menu choices from any [`BufRead`] and writes prompts and results to
//! any [`Write`], so the loop runs the same against a terminal or a buffer.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SingularKind, TableauError};
use crate::report::{CurrentReport, VoltageReport};
use crate::session::{CircuitSession, SolveStatus};

/// Default directory netlist file names are resolved against.
pub const DEFAULT_NETLIST_DIR: &str = "./netlists";

const MENU: &str = "Select one of the following options\n\
                    A. Read  new netlist\n\
                    B. Compute current values for current netlist\n\
                    C. Compute voltage values for current netlist\n\
                    D. Exit\n\
                    > ";

/// Message printed when a load ends on a zero pivot.
pub fn singular_message(kind: SingularKind) -> &'static str {
    match kind {
        SingularKind::Inconsistent => "Singular Matrix: Inconsistent System",
        SingularKind::UnderDetermined => "Singular Matrix: May have infinitely many solutions.",
    }
}

/// Load one netlist file and print both reports, or its singularity message.
///
/// Returns `Ok(false)` when the netlist is singular.
pub fn solve_once<W: Write>(
    session: &mut CircuitSession,
    path: &Path,
    out: &mut W,
) -> Result<bool> {
    match session.load_file(path)? {
        SolveStatus::Solved(solution) => {
            write!(out, "{}", CurrentReport(solution))?;
            write!(out, "{}", VoltageReport(solution))?;
            Ok(true)
        }
        SolveStatus::Singular(s) => {
            writeln!(out, "{}", singular_message(s.kind))?;
            Ok(false)
        }
        SolveStatus::Empty => Ok(false),
    }
}

/// The menu loop and the session it drives.
pub struct Console<R, W> {
    input: R,
    output: W,
    netlist_dir: PathBuf,
    session: CircuitSession,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console over the given streams.
    pub fn new(
        input: R,
        output: W,
        netlist_dir: impl Into<PathBuf>,
        session: CircuitSession,
    ) -> Self {
        Self {
            input,
            output,
            netlist_dir: netlist_dir.into(),
            session,
        }
    }

    /// Get the session.
    pub fn session(&self) -> &CircuitSession {
        &self.session
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            self.output.flush()?;

            let Some(choice) = self.read_word()? else {
                writeln!(self.output)?;
                return Ok(());
            };
            writeln!(self.output)?;
            debug!(%choice, "menu selection");

            let keep_going = match choice.chars().next() {
                Some('A') => {
                    writeln!(self.output, "You have selected \"Read new netlist\"")?;
                    self.read_netlist()?;
                    true
                }
                Some('B') => {
                    writeln!(
                        self.output,
                        "You have selected \"Compute current values for current netlist\""
                    )?;
                    match self.session.solution() {
                        Ok(solution) => write!(self.output, "{}", CurrentReport(solution))?,
                        Err(_) => writeln!(self.output, "Please select a valid netlist")?,
                    }
                    true
                }
                Some('C') => {
                    writeln!(
                        self.output,
                        "You have selected \"Compute voltage values for current netlist\""
                    )?;
                    match self.session.solution() {
                        Ok(solution) => write!(self.output, "{}", VoltageReport(solution))?,
                        Err(_) => writeln!(self.output, "Please read a valid netlist")?,
                    }
                    true
                }
                Some('D') => {
                    writeln!(self.output, "Exiting program")?;
                    false
                }
                _ => {
                    writeln!(self.output, "Invalid input")?;
                    true
                }
            };
            writeln!(self.output)?;

            if !keep_going {
                return Ok(());
            }
        }
    }

    fn read_netlist(&mut self) -> Result<()> {
        write!(self.output, "Enter the file name: ")?;
        self.output.flush()?;

        let Some(name) = self.read_word()? else {
            self.session.clear();
            return Ok(());
        };
        let path = self.netlist_dir.join(name);

        match self.session.load_file(&path) {
            Ok(SolveStatus::Singular(s)) => {
                writeln!(self.output, "{}", singular_message(s.kind))?;
            }
            Ok(_) => {}
            Err(TableauError::FileReadError { .. }) => {
                writeln!(self.output, "Unable to open file")?;
            }
            Err(e) if e.is_netlist_error() => {
                writeln!(self.output, "Invalid netlist: {}", e)?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Next whitespace-trimmed non-empty line, or `None` at end of input.
    fn read_word(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }
}
