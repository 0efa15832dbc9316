use crate::console::error::{ConsoleError, InputError};
use crate::console::types::Session;
use crate::model::{Grade, Subject};
use colored::Colorize;
use std::io::{BufRead, Write};

/// Why a score of 0 was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroReason {
    Scored,
    Absent,
    Malpractice,
}

impl ZeroReason {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(ZeroReason::Scored),
            "2" => Some(ZeroReason::Absent),
            "3" => Some(ZeroReason::Malpractice),
            _ => None,
        }
    }

    pub fn grade(self) -> Grade {
        match self {
            ZeroReason::Scored => Grade::graded(0.0),
            ZeroReason::Absent => Grade::absent(),
            ZeroReason::Malpractice => Grade::malpractice(),
        }
    }
}

/// Accepts a number in 0..=100.
pub fn parse_score(text: &str) -> Result<f64, InputError> {
    let score: f64 = text.trim().parse().map_err(|_| InputError::NotANumber)?;
    if !(0.0..=100.0).contains(&score) {
        return Err(InputError::OutOfRange(score));
    }
    Ok(score)
}

fn ask_zero_reason<R: BufRead, W: Write>(s: &mut Session<'_, R, W>) -> Result<Grade, ConsoleError> {
    loop {
        s.heading("  Reason for score of 0:")?;
        s.say("    [1] Genuinely scored zero")?;
        s.say("    [2] Absent for exam")?;
        s.say("    [3] Malpractice reported")?;
        let answer = s.prompt("  Please select an option: ".bold())?;
        match ZeroReason::from_code(&answer) {
            Some(reason) => return Ok(reason.grade()),
            None => s.fail("  Invalid choice. Please enter 1, 2, or 3.")?,
        }
    }
}

fn ask_grade<R: BufRead, W: Write>(
    s: &mut Session<'_, R, W>,
    subject: Subject,
) -> Result<Grade, ConsoleError> {
    loop {
        let answer = s.prompt(format!("  - Enter grade for {} (0-100): ", subject))?;
        match parse_score(&answer) {
            Ok(score) if score == 0.0 => return ask_zero_reason(s),
            Ok(score) => return Ok(Grade::graded(score)),
            Err(e) => s.fail(e.to_string())?,
        }
    }
}

/// Prompts for every subject in order; each grade is stored as soon as it
/// is accepted.
pub fn enter_grades<R: BufRead, W: Write>(s: &mut Session<'_, R, W>) -> Result<(), ConsoleError> {
    let id = s
        .prompt("Enter Student ID to add grades (e.g., S1): ")?
        .trim()
        .to_ascii_uppercase();
    let Some(name) = s.roster.find_student_by_id(&id).map(|st| st.name().to_string()) else {
        s.fail(format!("Student with ID '{}' not found.", id))?;
        return s.pause();
    };

    s.say(format!("Entering grades for {}", name.as_str().bold()))?;
    for subject in Subject::ALL {
        let grade = ask_grade(s, subject)?;
        if let Some(student) = s.roster.find_student_by_id_mut(&id) {
            student.set_grade(subject, grade);
        }
        tracing::debug!(id = %id, subject = %subject, grade = %grade, "grade entered");
    }
    s.success(format!("\n✔ All grades for {} have been updated.", name))?;
    s.pause()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_must_be_numbers_in_range() {
        assert_eq!(parse_score("42"), Ok(42.0));
        assert_eq!(parse_score(" 99.5 \n"), Ok(99.5));
        assert_eq!(parse_score("0"), Ok(0.0));
        assert_eq!(parse_score("100"), Ok(100.0));
        assert_eq!(parse_score("abc"), Err(InputError::NotANumber));
        assert_eq!(parse_score(""), Err(InputError::NotANumber));
        assert_eq!(parse_score("100.5"), Err(InputError::OutOfRange(100.5)));
        assert_eq!(parse_score("-3"), Err(InputError::OutOfRange(-3.0)));
        assert!(matches!(parse_score("NaN"), Err(InputError::OutOfRange(_))));
    }

    #[test]
    fn zero_reason_codes() {
        assert_eq!(ZeroReason::from_code("1").map(ZeroReason::grade), Some(Grade::graded(0.0)));
        assert_eq!(ZeroReason::from_code(" 2 ").map(ZeroReason::grade), Some(Grade::absent()));
        assert_eq!(ZeroReason::from_code("3").map(ZeroReason::grade), Some(Grade::malpractice()));
        assert_eq!(ZeroReason::from_code("4"), None);
    }
}
