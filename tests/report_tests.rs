use quizdeck::dataset::Dataset;
use quizdeck::output::{format_quiz_summary, CheckReport, QuizReport};
use quizdeck::quiz::Session;
use std::fs;
use tempfile::tempdir;

const QUIZ: &str = r#"{
    "title": "Primes",
    "questions": [
        {"prompt": "Smallest prime?", "choices": ["1", "2", "3"], "answer": "2"},
        {"prompt": "Pick 2 primes", "choices": ["4", "5", "7"], "answer": ["7", "5"]}
    ]
}"#;

fn finished_session() -> Session {
    let dataset = Dataset::from_json_str(QUIZ).unwrap();
    let mut session = Session::load(dataset.questions).unwrap();
    session.select_choice("1");
    session.submit_answer();
    session.go_next();
    session.select_choice("5");
    session.select_choice("7");
    session.submit_answer();
    session.go_next();
    session
}

#[test]
fn test_report_file_roundtrips_through_serde_json() {
    let session = finished_session();
    assert!(session.is_complete());

    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");
    QuizReport::from_session(&session, Some("Primes".into()))
        .write_to_file(&path)
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["title"], "Primes");
    assert_eq!(value["total"], 2);
    assert_eq!(value["score"], 1);
    assert_eq!(value["completed"], true);
    assert_eq!(value["attempts"][0]["correct"], false);
    assert_eq!(value["attempts"][0]["user_answer"][0], "1");
    assert_eq!(value["attempts"][1]["correct_answer"], serde_json::json!(["5", "7"]));
}

#[test]
fn test_partial_report() {
    let dataset = Dataset::from_json_str(QUIZ).unwrap();
    let mut session = Session::load(dataset.questions).unwrap();
    session.select_choice("2");
    session.submit_answer();

    let report = QuizReport::from_session(&session, None);
    assert!(!report.completed);
    assert_eq!(report.answered, 1);
    assert_eq!(report.score, 1);

    let summary = format_quiz_summary(&report);
    assert!(summary.contains("not finished"), "{summary}");
}

#[test]
fn test_check_report_flattens_overview() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("primes.json");
    fs::write(&path, QUIZ).unwrap();

    let dataset = Dataset::from_path(&path).unwrap();
    let mut buffer = Vec::new();
    CheckReport::new(&path, dataset.overview())
        .write_to(&mut buffer, false)
        .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(value["valid"], true);
    assert_eq!(value["total"], 2);
    assert_eq!(value["single_answer"], 1);
    assert_eq!(value["dual_answer"], 1);
}
