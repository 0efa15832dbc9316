use super::error::ConsoleError;
use super::handlers;
use super::types::{Session, SessionEnd};
use colored::Colorize;
use std::io::{BufRead, Write};

enum Next {
    Continue,
    Exit(SessionEnd),
}

fn display_menu<R: BufRead, W: Write>(s: &mut Session<'_, R, W>) -> Result<(), ConsoleError> {
    s.clear()?;
    s.say("========================================".cyan())?;
    s.say(format!("    {}", "Student Grade Tracker System".bold()))?;
    s.say("========================================".cyan())?;
    s.say(" [1] Add New Student")?;
    s.say(" [2] Enter Student Grades")?;
    s.say(" [3] View Individual Student Details")?;
    s.say(" [4] Display Class Summary Report")?;
    s.say(" [5] Manage Classes")?;
    s.say(" [6] Save and Exit")?;
    s.say("----------------------------------------")
}

fn dispatch<R: BufRead, W: Write>(
    s: &mut Session<'_, R, W>,
    choice: &str,
) -> Result<Next, ConsoleError> {
    match choice {
        "1" => handlers::students::add_student(s)?,
        "2" => handlers::grades::enter_grades(s)?,
        "3" => handlers::students::view_student(s)?,
        "4" => handlers::reports::class_report(s)?,
        "5" => handlers::classes::manage_classes(s)?,
        "6" => {
            if let Some(end) = handlers::core::save_and_exit(s)? {
                return Ok(Next::Exit(end));
            }
        }
        _ => {
            s.fail("Invalid option. Please try again.")?;
            s.pause()?;
        }
    }
    Ok(Next::Continue)
}

fn step<R: BufRead, W: Write>(s: &mut Session<'_, R, W>) -> Result<Next, ConsoleError> {
    display_menu(s)?;
    let choice = s.prompt("Choose an option: ".bold())?;
    dispatch(s, choice.trim())
}

/// Runs the main menu until the user saves and exits or input runs out.
/// Closing stdin leaves without saving.
pub fn run<R: BufRead, W: Write>(s: &mut Session<'_, R, W>) -> Result<SessionEnd, ConsoleError> {
    loop {
        match step(s) {
            Ok(Next::Continue) => {}
            Ok(Next::Exit(end)) => return Ok(end),
            Err(ConsoleError::InputClosed) => {
                tracing::warn!("input closed; leaving without saving");
                return Ok(SessionEnd::InputClosed);
            }
            Err(e) => return Err(e),
        }
    }
}
