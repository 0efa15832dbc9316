use serde::{Deserialize, Serialize};
use std::fmt;

/// Score stored for a subject that has not been graded yet.
pub const NOT_GRADED_SCORE: f64 = -1.0;

/// Total marks a student needs to exceed for a Pass remark.
pub const PASS_TOTAL: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    Maths,
    English,
    Science,
    Social,
}

impl Subject {
    /// Display and entry order.
    pub const ALL: [Subject; 4] = [
        Subject::Maths,
        Subject::English,
        Subject::Science,
        Subject::Social,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Maths => "Maths",
            Subject::English => "English",
            Subject::Science => "Science",
            Subject::Social => "Social",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeStatus {
    Graded,
    Absent,
    Malpractice,
    #[serde(rename = "Not Graded", alias = "NotGraded")]
    NotGraded,
}

/// One subject result. Absent and Malpractice carry a score of 0,
/// NotGraded carries [`NOT_GRADED_SCORE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub score: f64,
    pub status: GradeStatus,
}

impl Grade {
    /// No validation; callers keep score and status consistent.
    pub fn new(score: f64, status: GradeStatus) -> Self {
        Self { score, status }
    }

    pub fn graded(score: f64) -> Self {
        Self::new(score, GradeStatus::Graded)
    }

    pub fn absent() -> Self {
        Self::new(0.0, GradeStatus::Absent)
    }

    pub fn malpractice() -> Self {
        Self::new(0.0, GradeStatus::Malpractice)
    }

    pub fn not_graded() -> Self {
        Self::new(NOT_GRADED_SCORE, GradeStatus::NotGraded)
    }

    pub fn is_graded(&self) -> bool {
        self.status == GradeStatus::Graded
    }
}

impl Default for Grade {
    fn default() -> Self {
        Self::not_graded()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            GradeStatus::Absent => f.write_str("Absent"),
            GradeStatus::Malpractice => f.write_str("Malpractice"),
            GradeStatus::NotGraded => f.write_str("N/A"),
            GradeStatus::Graded => write!(f, "{}", self.score),
        }
    }
}

/// Exactly one grade per [`Subject`]. Serialized as a map keyed by subject
/// name; a missing key reads as not graded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectGrades {
    #[serde(rename = "Maths", default)]
    maths: Grade,
    #[serde(rename = "English", default)]
    english: Grade,
    #[serde(rename = "Science", default)]
    science: Grade,
    #[serde(rename = "Social", default)]
    social: Grade,
}

impl SubjectGrades {
    pub fn get(&self, subject: Subject) -> &Grade {
        match subject {
            Subject::Maths => &self.maths,
            Subject::English => &self.english,
            Subject::Science => &self.science,
            Subject::Social => &self.social,
        }
    }

    pub fn set(&mut self, subject: Subject, grade: Grade) {
        let slot = match subject {
            Subject::Maths => &mut self.maths,
            Subject::English => &mut self.english,
            Subject::Science => &mut self.science,
            Subject::Social => &mut self.social,
        };
        *slot = grade;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Subject, &Grade)> + '_ {
        Subject::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Remark {
    Pass,
    Fail,
    Malpractice,
}

impl Remark {
    pub fn as_str(self) -> &'static str {
        match self {
            Remark::Pass => "Pass",
            Remark::Fail => "Fail",
            Remark::Malpractice => "Malpractice",
        }
    }
}

impl fmt::Display for Remark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "studentId")]
    id: String,
    name: String,
    #[serde(rename = "studentClass")]
    class_name: String,
    #[serde(rename = "subjectGrades", default)]
    grades: SubjectGrades,
}

impl Student {
    pub fn new(id: impl Into<String>, name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class_name: class_name.into(),
            grades: SubjectGrades::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn grade(&self, subject: Subject) -> &Grade {
        self.grades.get(subject)
    }

    pub fn set_grade(&mut self, subject: Subject, grade: Grade) {
        self.grades.set(subject, grade);
    }

    /// Sum of every score that is not the not-graded sentinel. Absent and
    /// Malpractice contribute their stored 0.
    pub fn total_marks(&self) -> f64 {
        self.grades
            .iter()
            .map(|(_, g)| g.score)
            .filter(|score| *score >= 0.0)
            .sum()
    }

    /// Maths + Science, where only positive scores count.
    pub fn tie_break_total(&self) -> f64 {
        let positive = |s: Subject| self.grade(s).score.max(0.0);
        positive(Subject::Maths) + positive(Subject::Science)
    }

    pub fn has_malpractice(&self) -> bool {
        self.grades
            .iter()
            .any(|(_, g)| g.status == GradeStatus::Malpractice)
    }

    pub fn remark(&self) -> Remark {
        if self.has_malpractice() {
            return Remark::Malpractice;
        }
        if self.total_marks() > PASS_TOTAL {
            Remark::Pass
        } else {
            Remark::Fail
        }
    }

    /// Numeric part of an `S<n>` id, if the id has that shape.
    pub fn id_number(&self) -> Option<u64> {
        parse_id_number(&self.id)
    }
}

pub fn format_id(n: u64) -> String {
    format!("S{}", n)
}

/// Numeric part of an `S<digits>` id. Suffixes too large for `u64` read as
/// `u64::MAX`.
pub fn parse_id_number(id: &str) -> Option<u64> {
    let digits = id.strip_prefix(['S', 's'])?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_with(scores: [Grade; 4]) -> Student {
        let mut s = Student::new("S1", "Ada", "First Year");
        for (subject, grade) in Subject::ALL.into_iter().zip(scores) {
            s.set_grade(subject, grade);
        }
        s
    }

    #[test]
    fn new_student_is_not_graded_everywhere() {
        let s = Student::new("S7", "Grace", "Second Year");
        assert!(Subject::ALL.iter().all(|&subject| {
            let g = s.grade(subject);
            g.status == GradeStatus::NotGraded && g.score == NOT_GRADED_SCORE
        }));
        assert_eq!(s.total_marks(), 0.0);
        assert_eq!(s.tie_break_total(), 0.0);
        assert_eq!(s.remark(), Remark::Fail);
    }

    #[test]
    fn grade_rendering() {
        assert_eq!(Grade::absent().to_string(), "Absent");
        assert_eq!(Grade::malpractice().to_string(), "Malpractice");
        assert_eq!(Grade::not_graded().to_string(), "N/A");
        assert_eq!(Grade::graded(80.0).to_string(), "80");
        assert_eq!(Grade::graded(72.5).to_string(), "72.5");
        assert_eq!(Grade::graded(0.0).to_string(), "0");
    }

    #[test]
    fn remark_threshold_is_strictly_above_100() {
        let cases = [
            (0.0, Remark::Fail),
            (100.0, Remark::Fail),
            (100.01, Remark::Pass),
            (500.0, Remark::Pass),
        ];
        for (total, expected) in cases {
            let mut s = Student::new("S1", "Ada", "First Year");
            // Spread the total so no single score leaves 0..=100 except the 500 case.
            let per = total / 4.0;
            for subject in Subject::ALL {
                s.set_grade(subject, Grade::graded(per));
            }
            assert!((s.total_marks() - total).abs() < 1e-9);
            assert_eq!(s.remark(), expected, "total {}", total);
        }
    }

    #[test]
    fn malpractice_overrides_total() {
        let s = student_with([
            Grade::graded(100.0),
            Grade::graded(100.0),
            Grade::graded(100.0),
            Grade::graded(80.0),
        ]);
        assert_eq!(s.remark(), Remark::Pass);

        let s = student_with([
            Grade::graded(100.0),
            Grade::graded(100.0),
            Grade::graded(100.0),
            Grade::malpractice(),
        ]);
        assert_eq!(s.total_marks(), 300.0);
        assert_eq!(s.remark(), Remark::Malpractice);
    }

    #[test]
    fn total_excludes_only_the_not_graded_sentinel() {
        let s = student_with([
            Grade::absent(),
            Grade::graded(50.0),
            Grade::graded(70.0),
            Grade::graded(80.0),
        ]);
        assert_eq!(s.total_marks(), 200.0);

        let partial = student_with([
            Grade::graded(60.0),
            Grade::not_graded(),
            Grade::graded(30.0),
            Grade::not_graded(),
        ]);
        assert_eq!(partial.total_marks(), 90.0);
        assert_eq!(partial.remark(), Remark::Fail);
    }

    #[test]
    fn tie_break_ignores_zero_scores() {
        let s = student_with([
            Grade::graded(0.0),
            Grade::graded(90.0),
            Grade::graded(40.0),
            Grade::graded(90.0),
        ]);
        assert_eq!(s.tie_break_total(), 40.0);

        let s = student_with([
            Grade::graded(55.5),
            Grade::graded(10.0),
            Grade::not_graded(),
            Grade::graded(10.0),
        ]);
        assert_eq!(s.tie_break_total(), 55.5);
    }

    #[test]
    fn set_grade_replaces_previous_value() {
        let mut s = Student::new("S1", "Ada", "First Year");
        s.set_grade(Subject::Science, Grade::graded(30.0));
        s.set_grade(Subject::Science, Grade::absent());
        assert_eq!(*s.grade(Subject::Science), Grade::absent());
        assert_eq!(*s.grade(Subject::Maths), Grade::not_graded());
    }

    #[test]
    fn id_numbers() {
        assert_eq!(parse_id_number("S12"), Some(12));
        assert_eq!(parse_id_number("s3"), Some(3));
        assert_eq!(parse_id_number("S"), None);
        assert_eq!(parse_id_number("S1a"), None);
        assert_eq!(parse_id_number("X1"), None);
        assert_eq!(parse_id_number("S+1"), None);
        assert_eq!(parse_id_number("S007"), Some(7));
        assert_eq!(parse_id_number("S4294967296"), Some(4_294_967_296));
        assert_eq!(parse_id_number("S99999999999999999999999"), Some(u64::MAX));
        assert_eq!(format_id(4), "S4");
    }

    #[test]
    fn student_json_field_names_and_status_spelling() {
        let text = r#"{
            "studentId": "S3",
            "name": "Linus",
            "studentClass": "Third Year",
            "subjectGrades": {
                "Maths": { "score": 88.0, "status": "Graded" },
                "English": { "score": 0.0, "status": "Absent" },
                "Science": { "score": -1.0, "status": "Not Graded" }
            }
        }"#;
        let s: Student = serde_json::from_str(text).expect("parse student");
        assert_eq!(s.id(), "S3");
        assert_eq!(s.class_name(), "Third Year");
        assert_eq!(*s.grade(Subject::Maths), Grade::graded(88.0));
        assert_eq!(*s.grade(Subject::English), Grade::absent());
        assert_eq!(*s.grade(Subject::Social), Grade::not_graded());

        let value = serde_json::to_value(&s).expect("serialize");
        assert_eq!(value["subjectGrades"]["Science"]["status"], "Not Graded");
        assert_eq!(value["studentClass"], "Third Year");
    }
}
