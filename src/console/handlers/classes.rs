use crate::console::error::ConsoleError;
use crate::console::types::Session;
use colored::Colorize;
use std::io::{BufRead, Write};

/// Result of a numbered class selection.
pub(crate) enum ClassPick {
    Class(String),
    Back,
    Invalid,
}

/// Lists the classes and reads a 1-based choice. With `offer_back` one extra
/// entry past the last class means "back". Invalid answers are reported here.
pub(crate) fn pick_class<R: BufRead, W: Write>(
    s: &mut Session<'_, R, W>,
    prompt: &str,
    offer_back: bool,
) -> Result<ClassPick, ConsoleError> {
    let classes = s.list_classes()?;
    if offer_back {
        s.say(format!(" [{}] Back to Main Menu", classes.len() + 1))?;
    }
    s.say("-------------------------")?;

    let answer = s.prompt(prompt)?;
    let Ok(n) = answer.trim().parse::<i64>() else {
        s.fail("Invalid input. Please enter a number.")?;
        return Ok(ClassPick::Invalid);
    };
    let count = classes.len() as i64;
    if (1..=count).contains(&n) {
        return Ok(ClassPick::Class(classes[(n - 1) as usize].clone()));
    }
    if offer_back && n == count + 1 {
        return Ok(ClassPick::Back);
    }
    s.fail("Invalid class choice.")?;
    Ok(ClassPick::Invalid)
}

fn add_class<R: BufRead, W: Write>(s: &mut Session<'_, R, W>) -> Result<(), ConsoleError> {
    let name = s.prompt("Enter new class name: ")?;
    match s.roster.add_class(&name) {
        Ok(true) => s.success(format!("✔ Class '{}' added.", name.trim()))?,
        Ok(false) => s.heading(format!("Class '{}' already exists.", name.trim()))?,
        Err(e) => s.fail(e.to_string())?,
    }
    s.pause()
}

fn view_classes<R: BufRead, W: Write>(s: &mut Session<'_, R, W>) -> Result<(), ConsoleError> {
    s.heading("\n--- Available Classes ---")?;
    for name in s.roster.class_names().to_vec() {
        s.say(name)?;
    }
    s.pause()
}

pub fn manage_classes<R: BufRead, W: Write>(s: &mut Session<'_, R, W>) -> Result<(), ConsoleError> {
    loop {
        s.clear()?;
        s.heading("--- Class Management ---")?;
        s.say(" [1] Add New Class")?;
        s.say(" [2] View All Classes")?;
        s.say(" [3] Back to Main Menu")?;
        s.say("------------------------")?;
        let choice = s.prompt("Choose an option: ".bold())?;
        match choice.trim() {
            "1" => add_class(s)?,
            "2" => view_classes(s)?,
            "3" => return Ok(()),
            _ => {
                s.fail("Invalid option.")?;
                s.pause()?;
            }
        }
    }
}
