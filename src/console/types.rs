use super::error::ConsoleError;
use crate::roster::Roster;
use colored::Colorize;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const CLEAR_SCREEN: &str = "\x1B[H\x1B[2J";

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Saved,
    /// The user chose to leave after a failed save
    Unsaved,
    InputClosed,
}

/// One interactive session over a roster. Input and output are generic so
/// the whole menu flow can be driven from memory.
pub struct Session<'a, R, W> {
    pub roster: &'a mut Roster,
    pub data_path: PathBuf,
    pub input: R,
    pub out: W,
    pub clear_screen: bool,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(roster: &'a mut Roster, data_path: PathBuf, input: R, out: W) -> Self {
        Self {
            roster,
            data_path,
            input,
            out,
            clear_screen: true,
        }
    }

    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub(crate) fn read_line(&mut self) -> Result<String, ConsoleError> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(ConsoleError::InputClosed);
        }
        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Prints `text` without a newline and reads the answer.
    pub(crate) fn prompt(&mut self, text: impl Display) -> Result<String, ConsoleError> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        self.read_line()
    }

    pub(crate) fn say(&mut self, line: impl Display) -> Result<(), ConsoleError> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    pub(crate) fn fail(&mut self, message: impl AsRef<str>) -> Result<(), ConsoleError> {
        self.say(message.as_ref().red())
    }

    pub(crate) fn success(&mut self, message: impl AsRef<str>) -> Result<(), ConsoleError> {
        self.say(message.as_ref().green())
    }

    pub(crate) fn heading(&mut self, text: impl AsRef<str>) -> Result<(), ConsoleError> {
        self.say(text.as_ref().yellow())
    }

    pub(crate) fn pause(&mut self) -> Result<(), ConsoleError> {
        self.prompt(format!("\n{}", "Press Enter to return to the menu...".yellow()))?;
        Ok(())
    }

    pub(crate) fn clear(&mut self) -> Result<(), ConsoleError> {
        if self.clear_screen {
            write!(self.out, "{}", CLEAR_SCREEN)?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Lists the classes as a numbered menu.
    pub(crate) fn list_classes(&mut self) -> Result<Vec<String>, ConsoleError> {
        let classes = self.roster.class_names().to_vec();
        for (i, name) in classes.iter().enumerate() {
            self.say(format!(" [{}] {}", i + 1, name))?;
        }
        Ok(classes)
    }
}
