use crate::model::{GradeStatus, Remark, Student, Subject};
use serde::Serialize;
use std::cmp::Ordering;
use tabled::Tabled;

/// Per-subject score at or above which a graded entry counts as passed in
/// the distribution section.
pub const SUBJECT_PASS_MARK: f64 = 25.0;

#[derive(Debug, Clone, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "ID")]
    pub student_id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Maths")]
    pub maths: String,
    #[tabled(rename = "English")]
    pub english: String,
    #[tabled(rename = "Science")]
    pub science: String,
    #[tabled(rename = "Social")]
    pub social: String,
    #[tabled(rename = "Total")]
    pub total: f64,
    #[tabled(skip)]
    pub tie_break: f64,
    #[tabled(rename = "Remark")]
    pub remark: Remark,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorer {
    pub student_id: String,
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStats {
    pub subject: Subject,
    pub graded_count: usize,
    pub highest: Option<Scorer>,
    pub lowest: Option<Scorer>,
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDistribution {
    #[tabled(rename = "Subject")]
    pub subject: Subject,
    #[tabled(rename = "Passed (>=25)")]
    pub passed: usize,
    #[tabled(rename = "Failed (<25)")]
    pub failed: usize,
    #[tabled(rename = "Absent")]
    pub absent: usize,
    #[tabled(rename = "Malpractice")]
    pub malpractice: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    pub total_students: usize,
    pub passed: usize,
    pub failed: usize,
    pub malpractice: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassReport {
    pub class_name: String,
    pub rows: Vec<ReportRow>,
    #[serde(rename = "subjectPerformance")]
    pub subject_stats: Vec<SubjectStats>,
    #[serde(rename = "subjectDistribution")]
    pub distribution: Vec<SubjectDistribution>,
    pub overall: OverallSummary,
}

impl ClassReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn compare_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Report order: total marks descending, then Maths + Science descending.
/// Exact ties fall back to the numeric id so output is stable.
pub fn rank_students<'a>(mut students: Vec<&'a Student>) -> Vec<&'a Student> {
    students.sort_by(|a, b| {
        compare_desc(a.total_marks(), b.total_marks())
            .then_with(|| compare_desc(a.tie_break_total(), b.tie_break_total()))
            .then_with(|| a.id_number().cmp(&b.id_number()))
            .then_with(|| a.id().cmp(b.id()))
    });
    students
}

fn scorer(student: &Student, subject: Subject) -> Scorer {
    Scorer {
        student_id: student.id().to_string(),
        name: student.name().to_string(),
        score: student.grade(subject).score,
    }
}

/// Highest, lowest and average over Graded entries only. The first student
/// in `students` order wins ties for highest and lowest.
pub fn subject_stats(students: &[&Student], subject: Subject) -> SubjectStats {
    let mut highest: Option<&Student> = None;
    let mut lowest: Option<&Student> = None;
    let mut sum = 0.0;
    let mut graded_count = 0usize;

    for &s in students {
        let g = s.grade(subject);
        if !g.is_graded() {
            continue;
        }
        graded_count += 1;
        sum += g.score;
        if highest.map_or(true, |h| g.score > h.grade(subject).score) {
            highest = Some(s);
        }
        if lowest.map_or(true, |l| g.score < l.grade(subject).score) {
            lowest = Some(s);
        }
    }

    SubjectStats {
        subject,
        graded_count,
        highest: highest.map(|s| scorer(s, subject)),
        lowest: lowest.map(|s| scorer(s, subject)),
        average: (graded_count > 0).then(|| sum / graded_count as f64),
    }
}

pub fn subject_distribution(students: &[&Student], subject: Subject) -> SubjectDistribution {
    let mut d = SubjectDistribution {
        subject,
        passed: 0,
        failed: 0,
        absent: 0,
        malpractice: 0,
    };
    for s in students {
        let g = s.grade(subject);
        match g.status {
            GradeStatus::Graded if g.score >= SUBJECT_PASS_MARK => d.passed += 1,
            GradeStatus::Graded => d.failed += 1,
            GradeStatus::Absent => d.absent += 1,
            GradeStatus::Malpractice => d.malpractice += 1,
            GradeStatus::NotGraded => {}
        }
    }
    d
}

pub fn overall_summary(students: &[&Student]) -> OverallSummary {
    let mut o = OverallSummary {
        total_students: students.len(),
        ..OverallSummary::default()
    };
    for s in students {
        match s.remark() {
            Remark::Pass => o.passed += 1,
            Remark::Fail => o.failed += 1,
            Remark::Malpractice => o.malpractice += 1,
        }
    }
    o
}

pub fn compute_class_report(class_name: &str, students: Vec<&Student>) -> ClassReport {
    let ranked = rank_students(students);

    let rows = ranked
        .iter()
        .enumerate()
        .map(|(i, s)| ReportRow {
            rank: i + 1,
            student_id: s.id().to_string(),
            name: s.name().to_string(),
            maths: s.grade(Subject::Maths).to_string(),
            english: s.grade(Subject::English).to_string(),
            science: s.grade(Subject::Science).to_string(),
            social: s.grade(Subject::Social).to_string(),
            total: s.total_marks(),
            tie_break: s.tie_break_total(),
            remark: s.remark(),
        })
        .collect();

    ClassReport {
        class_name: class_name.to_string(),
        rows,
        subject_stats: Subject::ALL
            .iter()
            .map(|&subject| subject_stats(&ranked, subject))
            .collect(),
        distribution: Subject::ALL
            .iter()
            .map(|&subject| subject_distribution(&ranked, subject))
            .collect(),
        overall: overall_summary(&ranked),
    }
}
