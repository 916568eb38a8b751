use std::collections::HashMap;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use hall_request_assigner::{HRAElevState, HRAInput, HallRequestAssigner};
use shared_resources::config::AssignerConfig;
use shared_resources::{AssignerError, Call};

const EXPECTED: &str = "{\"one\":[[false,false],[false,false],[false,false],[false,true]],\"two\":[[false,false],[true,false],[false,false],[false,false]]}\n";

fn state(behaviour: &str, floor: u8, direction: &str, cab_requests: [bool; 4]) -> HRAElevState {
    HRAElevState {
        behaviour: String::from(behaviour),
        floor,
        direction: String::from(direction),
        cab_requests: cab_requests.to_vec(),
    }
}

fn reference_input() -> HRAInput {
    HRAInput {
        hall_requests: Vec::from([[false, false], [true, false], [false, false], [false, true]]),
        states: HashMap::from([
            (String::from("one"), state("moving", 2, "up", [false, false, false, true])),
            (String::from("two"), state("idle", 0, "stop", [false, false, false, false])),
        ]),
    }
}

/// Runs the binary from an empty directory so no stray config file is picked up.
fn run_assigner(args: &[&str], stdin: Option<&str>) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_hall_request_assigner"))
        .current_dir(dir.path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to call hall request assigner");
    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(document) = stdin {
            pipe.write_all(document.as_bytes()).unwrap();
        }
    }
    child.wait_with_output().unwrap()
}

#[test]
fn test_hall_assigner() {
    let document = serde_json::to_string(&reference_input()).unwrap();
    let result = run_assigner(&["-i", &document], None);

    assert!(result.status.success());
    assert_eq!(EXPECTED, String::from_utf8(result.stdout).unwrap());
}

#[test]
fn reads_document_from_stdin() {
    let document = serde_json::to_string(&reference_input()).unwrap();
    let result = run_assigner(&[], Some(&document));

    assert!(result.status.success());
    assert_eq!(EXPECTED, String::from_utf8(result.stdout).unwrap());
}

#[test]
fn include_cab_adds_third_column() {
    let document = serde_json::to_string(&reference_input()).unwrap();
    let result = run_assigner(&["--includeCab", "-i", &document], None);

    let output: HashMap<String, Vec<Vec<bool>>> = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(output["one"][3], vec![false, true, true]);
    assert_eq!(output["two"][1], vec![true, false, false]);
}

#[test]
fn config_file_is_honoured() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"includeCab": true}}"#).unwrap();
    let document = serde_json::to_string(&reference_input()).unwrap();
    let config_path = file.path().to_str().unwrap();
    let result = run_assigner(&["--config", config_path, "-i", &document], None);

    assert!(result.status.success());
    let output: HashMap<String, Vec<Vec<bool>>> = serde_json::from_slice(&result.stdout).unwrap();
    assert!(output.values().flatten().all(|row| row.len() == 3));
}

#[test]
fn invalid_state_exits_with_two() {
    let result = run_assigner(&["-i", r#"{"hallRequests":[[true,false]],"states":{"#], None);

    assert_eq!(result.status.code(), Some(2));
    assert!(result.stdout.is_empty());
}

#[test]
fn unreachable_call_exits_with_one() {
    let mut input = reference_input();
    input.states.remove("two");
    let document = serde_json::to_string(&input).unwrap();
    let result = run_assigner(&["-i", &document], None);

    assert_eq!(result.status.code(), Some(1));
}

#[test]
fn error_reaches_stderr_with_logging_off() {
    let dir = tempfile::tempdir().unwrap();
    let result = Command::new(env!("CARGO_BIN_EXE_hall_request_assigner"))
        .current_dir(dir.path())
        .env("RUST_LOG", "off")
        .args(["-i", r#"{"hallRequests":[],"states":{}}"#])
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(2));
    let stderr = String::from_utf8(result.stderr).unwrap();
    assert!(stderr.contains("building has no floors"), "stderr was {:?}", stderr);
}

#[test]
fn library_matches_binary() {
    let output = HallRequestAssigner::default().assign_orders(&reference_input()).unwrap();
    let json = hall_request_assigner::output_to_json(&output).unwrap();
    assert_eq!(format!("{}\n", json), EXPECTED);
}

#[test]
fn moving_car_cannot_turn_back_for_up_call() {
    let mut input = reference_input();
    input.states.remove("two");
    let err = HallRequestAssigner::default().assign_orders(&input).unwrap_err();
    assert_eq!(
        err,
        AssignerError::NoFeasibleAssignment {
            floor: 1,
            call: Call::HallUp
        }
    );
}

#[test]
fn no_hall_calls_gives_empty_rows_for_every_car() {
    let mut input = reference_input();
    input.hall_requests = vec![[false, false]; 4];
    let output = HallRequestAssigner::default().assign_orders(&input).unwrap();

    assert_eq!(output.len(), 2);
    assert!(output.values().all(|rows| rows.len() == 4));
    assert!(output.values().flatten().flatten().all(|&assigned| !assigned));
}

#[test]
fn greedy_fallback_gives_same_reference_answer() {
    let mut config = AssignerConfig::default();
    config.search.exhaustive_threshold = 1;
    let output = HallRequestAssigner::new(config).assign_orders(&reference_input()).unwrap();
    let json = hall_request_assigner::output_to_json(&output).unwrap();
    assert_eq!(format!("{}\n", json), EXPECTED);
}
