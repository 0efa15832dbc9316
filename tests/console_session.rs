use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn run_session(data: &Path, script: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_gradetrack");
    let mut child = Command::new(exe)
        .arg("--data")
        .arg(data)
        .arg("--no-color")
        .env("NO_COLOR", "1")
        .env_remove("GRADETRACK_DATA")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn gradetrack");
    child
        .stdin
        .take()
        .expect("child stdin")
        .write_all(script.as_bytes())
        .expect("write script");
    let out = child.wait_with_output().expect("wait for gradetrack");
    assert!(
        out.status.success(),
        "gradetrack failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    out
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("read data file");
    serde_json::from_str(&text).expect("parse data file")
}

#[test]
fn ids_continue_from_the_saved_maximum() {
    let dir = temp_dir("gradetrack-it-ids");
    let data = dir.join("students.json");

    let out = run_session(&data, "1\n1\nAda\n\n1\n1\nGrace\n\n1\n2\nLinus\n\n6\n");
    let text = stdout(&out);
    for (name, id) in [("Ada", "S1"), ("Grace", "S2"), ("Linus", "S3")] {
        assert!(
            text.contains(&format!("Student '{}' added to", name)) && text.contains(&format!("with ID: {}", id)),
            "missing {} / {} in output",
            name,
            id
        );
    }
    assert!(text.contains("Data saved. Exiting application. Goodbye!"));

    let saved = read_json(&data);
    let students = saved["students"].as_object().expect("students object");
    let mut ids: Vec<&String> = students.keys().collect();
    ids.sort();
    assert_eq!(ids, ["S1", "S2", "S3"]);
    assert_eq!(saved["students"]["S3"]["studentClass"], "Second Year");
    assert_eq!(saved["students"]["S1"]["subjectGrades"]["Maths"]["status"], "Not Graded");
    assert_eq!(saved["students"]["S1"]["subjectGrades"]["Maths"]["score"], -1.0);
    assert_eq!(
        saved["classNames"],
        serde_json::json!(["First Year", "Second Year", "Third Year", "Fourth Year"])
    );

    let out = run_session(&data, "1\n1\nBarbara\n\n6\n");
    assert!(stdout(&out).contains("Student 'Barbara' added to First Year with ID: S4"));
    assert_eq!(read_json(&data)["students"]["S4"]["name"], "Barbara");

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn grades_entered_in_one_run_are_visible_in_the_next() {
    let dir = temp_dir("gradetrack-it-grades");
    let data = dir.join("students.json");

    run_session(&data, "1\n3\nLinus\n\n2\ns1\n55\n0\n3\n101\n45\n30\n\n6\n");
    let saved = read_json(&data);
    let grades = &saved["students"]["S1"]["subjectGrades"];
    assert_eq!(grades["Maths"]["score"], 55.0);
    assert_eq!(grades["English"]["status"], "Malpractice");
    assert_eq!(grades["English"]["score"], 0.0);
    assert_eq!(grades["Science"]["score"], 45.0);
    assert_eq!(grades["Social"]["status"], "Graded");

    let out = run_session(&data, "3\nS1\n\n6\n");
    let text = stdout(&out);
    assert!(text.contains("Class:     Third Year"));
    assert!(text.contains("  - English : Malpractice"));
    assert!(text.contains("Total Marks: 130"));
    assert!(text.contains("Remark:      Malpractice"));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn closing_input_leaves_without_saving() {
    let dir = temp_dir("gradetrack-it-eof");
    let data = dir.join("students.json");

    let out = run_session(&data, "1\n1\nAda\n\n");
    assert!(stdout(&out).contains("with ID: S1"));
    assert!(!data.exists());

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn corrupt_data_file_starts_fresh_with_a_warning() {
    let dir = temp_dir("gradetrack-it-corrupt");
    let data = dir.join("students.json");
    std::fs::write(&data, "{ \"students\": [").expect("write corrupt file");

    let out = run_session(&data, "\n5\n2\n\n3\n6\n");
    let text = stdout(&out);
    assert!(text.contains("Error loading data, starting fresh"));
    assert!(text.contains("First Year\nSecond Year\nThird Year\nFourth Year\n"));

    let saved = read_json(&data);
    assert_eq!(saved["students"], serde_json::json!({}));
    assert_eq!(saved["classNames"].as_array().map(|a| a.len()), Some(4));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn classes_added_in_the_submenu_are_persisted() {
    let dir = temp_dir("gradetrack-it-classes");
    let data = dir.join("students.json");

    run_session(&data, "5\n1\nRobotics\n\n3\n1\n5\nAda\n\n6\n");
    let saved = read_json(&data);
    assert_eq!(saved["classNames"][4], "Robotics");
    assert_eq!(saved["students"]["S1"]["studentClass"], "Robotics");

    let _ = std::fs::remove_dir_all(dir);
}
