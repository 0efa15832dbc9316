use super::classes::{pick_class, ClassPick};
use crate::console::error::ConsoleError;
use crate::console::types::Session;
use crate::model::Subject;
use colored::Colorize;
use std::io::{BufRead, Write};

pub fn add_student<R: BufRead, W: Write>(s: &mut Session<'_, R, W>) -> Result<(), ConsoleError> {
    s.heading("\n--- Available Classes ---")?;
    if let ClassPick::Class(class_name) = pick_class(
        s,
        "Choose a class for the new student (enter number): ",
        false,
    )? {
        let name = s.prompt("Enter student's full name: ")?;
        let added = s
            .roster
            .add_student(&name, &class_name)
            .map(|st| (st.id().to_string(), st.name().to_string()));
        match added {
            Ok((id, name)) => s.success(format!(
                "\n✔ Success! Student '{}' added to {} with ID: {}",
                name, class_name, id
            ))?,
            Err(e) => s.fail(e.to_string())?,
        }
    }
    s.pause()
}

pub fn view_student<R: BufRead, W: Write>(s: &mut Session<'_, R, W>) -> Result<(), ConsoleError> {
    let id = s.prompt("Enter Student ID (e.g., S1): ")?.trim().to_ascii_uppercase();
    let Some(student) = s.roster.find_student_by_id(&id).cloned() else {
        s.fail(format!("Student with ID '{}' not found.", id))?;
        return s.pause();
    };

    s.say(format!("\n{}", "--- Student Details ---".yellow()))?;
    s.say(format!("{}{}", "ID:        ".bold(), student.id()))?;
    s.say(format!("{}{}", "Name:      ".bold(), student.name()))?;
    s.say(format!("{}{}", "Class:     ".bold(), student.class_name()))?;
    s.say("Grades:".bold())?;
    for subject in Subject::ALL {
        s.say(format!(
            "  - {:<8}: {}",
            subject.as_str(),
            student.grade(subject)
        ))?;
    }
    s.say(format!("{}{}", "Total Marks: ".bold(), student.total_marks()))?;
    s.say(format!("{}{}", "Remark:      ".bold(), student.remark()))?;
    s.heading("-----------------------")?;
    s.pause()
}
