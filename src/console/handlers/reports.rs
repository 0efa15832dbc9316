use super::classes::{pick_class, ClassPick};
use crate::calc::{self, ClassReport, Scorer, SubjectStats};
use crate::console::error::ConsoleError;
use crate::console::types::Session;
use crate::model::Subject;
use colored::Colorize;
use std::io::{BufRead, Write};
use tabled::{
    settings::{Panel, Style},
    Table, Tabled,
};

#[derive(Tabled)]
struct PerformanceRow {
    #[tabled(rename = "Subject")]
    subject: Subject,
    #[tabled(rename = "Highest Scorer")]
    highest: String,
    #[tabled(rename = "Lowest Scorer")]
    lowest: String,
    #[tabled(rename = "Average")]
    average: String,
}

fn scorer_cell(scorer: Option<&Scorer>) -> String {
    match scorer {
        Some(s) => format!("{:.1} ({})", s.score, s.name),
        None => "N/A".to_string(),
    }
}

impl From<&SubjectStats> for PerformanceRow {
    fn from(stats: &SubjectStats) -> Self {
        Self {
            subject: stats.subject,
            highest: scorer_cell(stats.highest.as_ref()),
            lowest: scorer_cell(stats.lowest.as_ref()),
            average: stats
                .average
                .map(|a| format!("{:.2}", a))
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

/// Ranked table plus the performance, distribution and overall sections.
pub fn render_report(report: &ClassReport) -> String {
    let title = format!("Class Summary Report for: {}", report.class_name);
    let mut out = Table::new(&report.rows)
        .with(Panel::header(title))
        .with(Style::modern())
        .to_string();
    out.push('\n');

    if report.is_empty() {
        out.push_str("No students found in this class.\n");
        return out;
    }

    let performance: Vec<PerformanceRow> =
        report.subject_stats.iter().map(PerformanceRow::from).collect();
    out.push_str(&format!(
        "\n{}\n{}\n",
        "Subject Performance Summary:".yellow().bold(),
        Table::new(&performance).with(Style::modern())
    ));

    out.push_str(&format!(
        "\n{}\n{}\n",
        "Subject Distribution Summary:".yellow().bold(),
        Table::new(&report.distribution).with(Style::modern())
    ));

    let o = &report.overall;
    out.push_str(&format!(
        "\n{}\nTotal Students: {} | Passed: {} | Failed: {} | Malpractice: {}\n",
        "Overall Class Summary:".yellow().bold(),
        o.total_students.to_string().bold(),
        o.passed.to_string().green(),
        o.failed.to_string().red(),
        o.malpractice.to_string().red(),
    ));
    out
}

pub fn class_report<R: BufRead, W: Write>(s: &mut Session<'_, R, W>) -> Result<(), ConsoleError> {
    s.heading("\n--- Select Class for Report ---")?;
    match pick_class(s, "Choose a class to generate report (enter number): ", true)? {
        ClassPick::Class(class_name) => {
            let report = calc::compute_class_report(&class_name, s.roster.students_by_class(&class_name));
            s.clear()?;
            s.say(render_report(&report))?;
        }
        ClassPick::Back => return Ok(()),
        ClassPick::Invalid => {}
    }
    s.pause()
}
