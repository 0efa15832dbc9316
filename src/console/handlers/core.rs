use crate::console::error::ConsoleError;
use crate::console::types::{Session, SessionEnd};
use colored::Colorize;
use std::io::{BufRead, Write};

/// Tells the user the data file could not be loaded and that the session
/// starts from an empty roster.
pub fn warn_load_failure<R: BufRead, W: Write>(
    s: &mut Session<'_, R, W>,
    error: &anyhow::Error,
) -> Result<(), ConsoleError> {
    s.fail(format!("Error loading data, starting fresh: {:#}", error))?;
    s.pause()
}

/// `Ok(None)` keeps the session going after a failed save.
pub fn save_and_exit<R: BufRead, W: Write>(
    s: &mut Session<'_, R, W>,
) -> Result<Option<SessionEnd>, ConsoleError> {
    match s.roster.save(&s.data_path) {
        Ok(()) => {
            s.say(format!(
                "\n{}",
                "Data saved. Exiting application. Goodbye!".yellow()
            ))?;
            Ok(Some(SessionEnd::Saved))
        }
        Err(e) => {
            let detail = format!("{:#}", e);
            tracing::error!(path = %s.data_path.display(), error = %detail, "save failed");
            s.fail(format!("Error saving data: {}", detail))?;
            s.fail("Your changes are only held in memory.")?;
            let answer = s.prompt("Exit without saving? (y/N): ".bold())?;
            if answer.trim().eq_ignore_ascii_case("y") {
                s.heading("Exiting without saving.")?;
                Ok(Some(SessionEnd::Unsaved))
            } else {
                Ok(None)
            }
        }
    }
}
