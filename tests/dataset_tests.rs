//! Integration tests for loading question sets from disk.

use std::fs;
use std::path::PathBuf;

use quizdeck::dataset::{load_questions, Dataset, DatasetError};
use quizdeck::quiz::{Answer, QuestionError, Session};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_json_object_list() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "quiz.json",
        r#"[
            {"prompt": "Largest planet?", "choices": ["Mars", "Jupiter"], "answer": "Jupiter",
             "explanation": "By mass and volume."},
            {"prompt": "Gas giants?", "choices": ["Mars", "Saturn", "Jupiter"],
             "answer": ["Saturn", "Jupiter"]}
        ]"#,
    );

    let questions = load_questions(&path).unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].answer(), &Answer::single("Jupiter"));
    assert_eq!(questions[1].answer(), &Answer::dual("Jupiter", "Saturn"));
    assert_eq!(questions[1].explanation(), "");
}

#[test]
fn test_load_json_encoded_strings() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "questions.json",
        r#"[
            "{\"question\": \"Pick 2 primes\", \"choices\": [\"2\", \"3\", \"4\"], \"answer\": [\"2\", \"3\"], \"reason\": \"4 is even.\"}",
            "{\"question\": \"Smallest prime?\", \"choices\": [\"1\", \"2\"], \"answer\": \"2\", \"reason\": \"1 is not prime.\"}"
        ]"#,
    );

    let dataset = Dataset::from_path(&path).unwrap();
    assert_eq!(dataset.questions.len(), 2);
    assert_eq!(dataset.questions[0].prompt(), "Pick 2 primes");
    assert!(dataset.questions[0].is_multiple_answer());
    assert_eq!(dataset.questions[1].explanation(), "1 is not prime.");
}

#[test]
fn test_load_toml_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "quiz.TOML",
        r#"
title = "Primes"

[[questions]]
question = "Pick 2 primes"
choices = ["2", "3", "4"]
answer = ["2", "3"]
reason = "4 = 2 x 2"
"#,
    );

    let dataset = Dataset::from_path(&path).unwrap();
    assert_eq!(dataset.title.as_deref(), Some("Primes"));
    assert_eq!(dataset.questions[0].explanation(), "4 = 2 x 2");
}

#[test]
fn test_single_element_array_is_single_answer() {
    let dataset =
        Dataset::from_json_str(r#"[{"prompt": "Q", "choices": ["a", "b"], "answer": ["b"]}]"#)
            .unwrap();
    assert_eq!(dataset.questions[0].answer(), &Answer::single("b"));
    assert_eq!(dataset.questions[0].max_selections(), 1);
}

#[test]
fn test_three_answers_rejected() {
    let result = Dataset::from_json_str(
        r#"[{"prompt": "Q", "choices": ["a", "b", "c"], "answer": ["a", "b", "c"]}]"#,
    );
    match result {
        Err(DatasetError::InvalidQuestion { index: 0, source }) => {
            assert_eq!(source, QuestionError::DualAnswerSize(3));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_duplicate_choices_rejected() {
    let result =
        Dataset::from_json_str(r#"[{"prompt": "Q", "choices": ["a", "a"], "answer": "a"}]"#);
    assert!(matches!(
        result,
        Err(DatasetError::InvalidQuestion {
            source: QuestionError::DuplicateChoice(_),
            ..
        })
    ));
}

#[test]
fn test_error_message_is_one_based() {
    let err = Dataset::from_json_str(
        r#"[
            {"prompt": "A", "choices": ["x"], "answer": "x"},
            {"prompt": "", "choices": ["x"], "answer": "x"}
        ]"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains('2'), "{err}");
}

#[test]
fn test_typo_in_field_reports_question_number() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "quiz.json",
        r#"{"questions": [
            {"prompt": "A", "choices": ["x", "y"], "answer": "x"},
            {"prompt": "B", "choises": ["x", "y"], "answer": "y"}
        ]}"#,
    );

    let err = Dataset::from_path(&path).unwrap_err();
    assert!(matches!(err, DatasetError::MalformedQuestion { index: 1, .. }));
    let message = err.to_string();
    assert!(message.contains("question 2"), "{message}");
    assert!(message.contains("choices"), "{message}");
}

#[test]
fn test_bad_encoded_entry_reports_question_number() {
    let err = Dataset::from_json_str(r#"["{\"prompt\": \"A\"}"]"#).unwrap_err();
    assert!(err.to_string().contains("question 1"), "{err}");
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    match Dataset::from_path(&missing) {
        Err(DatasetError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.json", "[{");
    assert!(matches!(
        Dataset::from_path(&path),
        Err(DatasetError::Json(_))
    ));
}

#[test]
fn test_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.toml", "[[questions]\nprompt = ");
    assert!(matches!(
        Dataset::from_path(&path),
        Err(DatasetError::Toml(_))
    ));
}

#[test]
fn test_empty_document() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "empty.json", r#"{"questions": []}"#);
    assert!(matches!(Dataset::from_path(&path), Err(DatasetError::Empty)));
}

#[test]
fn test_loaded_questions_start_a_session() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "quiz.json",
        r#"[{"prompt": "1 + 1?", "choices": ["1", "2"], "answer": "2"}]"#,
    );
    let mut session = Session::load(load_questions(&path).unwrap()).unwrap();
    session.select_choice("2");
    session.submit_answer();
    assert_eq!(session.score(), 1);
}
