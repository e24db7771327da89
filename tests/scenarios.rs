//! End-to-end parsing scenarios.

use linestate::builder::MachineDefinition;
use linestate::lint;
use linestate::{
    CurrentState, DefinitionError, LineStateMachine, MachineError, ParseError, StepResult,
};

fn header_body(loop_body: bool) -> LineStateMachine {
    let mut machine = LineStateMachine::new();
    let header = machine.define_state("HEADER", "^#").unwrap();
    let body = machine.define_state("BODY", "^[^#]").unwrap();
    machine.define_transition(None, &header).unwrap();
    machine.define_transition(Some(&header), &body).unwrap();
    if loop_body {
        machine.define_transition(Some(&body), &body).unwrap();
    }
    machine
}

#[test]
fn header_then_repeating_body() {
    let mut machine = header_body(true);
    let header = machine.state("HEADER").cloned().unwrap();
    let body = machine.state("BODY").cloned().unwrap();

    let results: Vec<StepResult> = ["# title", "line one", "line two"]
        .iter()
        .map(|line| machine.advance(line).unwrap())
        .collect();

    assert_eq!(
        results,
        vec![
            StepResult::Transitioned(header.clone()),
            StepResult::Transitioned(body.clone()),
            StepResult::Transitioned(body.clone()),
        ]
    );
    assert_eq!(machine.state_count(&header).unwrap(), 1);
    assert_eq!(machine.state_count(&body).unwrap(), 2);
}

#[test]
fn header_then_single_body_reaches_terminal() {
    let mut machine = header_body(false);
    let header = machine.state("HEADER").cloned().unwrap();
    let body = machine.state("BODY").cloned().unwrap();

    machine.advance("# title").unwrap();
    machine.advance("line one").unwrap();
    assert_eq!(machine.advance("line two").unwrap(), StepResult::Terminal);
    assert_eq!(machine.advance("# anything").unwrap(), StepResult::Terminal);

    assert_eq!(machine.state_count(&header).unwrap(), 1);
    assert_eq!(machine.state_count(&body).unwrap(), 1);
    assert_eq!(machine.current_state(), CurrentState::Active(&body));
}

#[test]
fn overlapping_initial_patterns_are_ambiguous() {
    let mut machine = LineStateMachine::new();
    let header = machine.define_state("HEADER", "^#").unwrap();
    let body = machine.define_state("BODY", "^#\\s").unwrap();
    machine.define_transition(None, &header).unwrap();
    machine.define_transition(None, &body).unwrap();

    let err = machine.advance("# x").unwrap_err();

    assert!(matches!(
        err,
        MachineError::Parse(ParseError::Ambiguous { ref candidates, .. })
            if candidates == &["HEADER".to_string(), "BODY".to_string()]
    ));
}

#[test]
fn invalid_pattern_fails_before_any_transition() {
    let mut machine = LineStateMachine::new();

    let err = machine.define_state("A", "(").unwrap_err();

    assert!(matches!(err, DefinitionError::InvalidPattern { .. }));
    assert!(machine.states().next().is_none());
}

#[test]
fn reset_allows_parsing_a_second_document() {
    let mut machine = header_body(true);
    let body = machine.state("BODY").cloned().unwrap();

    machine.advance_all(["# first", "a", "b", "c"]).unwrap();
    assert_eq!(machine.state_count(&body).unwrap(), 3);

    assert!(machine.advance("# second").is_err());

    machine.reset();
    machine.advance_all(["# second", "z"]).unwrap();
    assert_eq!(machine.state_count(&body).unwrap(), 1);
}

#[test]
fn structured_log_with_json_definition() {
    let definition = MachineDefinition::from_json(
        r#"{
            "states": [
                {"name": "BEGIN", "pattern": "=== RUN "},
                {"name": "LOG", "pattern": "\\s{4}"},
                {"name": "PASS", "pattern": "--- PASS: "},
                {"name": "FAIL", "pattern": "--- FAIL: "},
                {"name": "SUMMARY", "pattern": "(ok|FAIL)\\s"}
            ],
            "transitions": [
                {"to": "BEGIN"},
                {"from": "BEGIN", "to": "LOG"},
                {"from": "BEGIN", "to": "PASS"},
                {"from": "BEGIN", "to": "FAIL"},
                {"from": "LOG", "to": "LOG"},
                {"from": "LOG", "to": "PASS"},
                {"from": "LOG", "to": "FAIL"},
                {"from": "PASS", "to": "BEGIN"},
                {"from": "PASS", "to": "SUMMARY"},
                {"from": "FAIL", "to": "BEGIN"},
                {"from": "FAIL", "to": "SUMMARY"}
            ],
            "record_history": true
        }"#,
    )
    .unwrap();
    let mut machine = definition.build().unwrap();
    assert!(lint::check(&machine).is_success());

    let log = "\
=== RUN TestParse
    parse_test.go:12: parsing
--- PASS: TestParse (0.00s)
=== RUN TestReject
    reject_test.go:8: expected error
    reject_test.go:9: got nil
--- FAIL: TestReject (0.01s)
FAIL\texample.com/parser\t0.02s
trailing noise";

    let consumed = machine.advance_all(log.lines()).unwrap();
    assert_eq!(consumed, 8);
    assert!(machine.is_terminal());

    let count = |name: &str| {
        let state = machine.state(name).unwrap();
        machine.state_count(state).unwrap()
    };
    assert_eq!(count("BEGIN"), 2);
    assert_eq!(count("LOG"), 3);
    assert_eq!(count("PASS"), 1);
    assert_eq!(count("FAIL"), 1);
    assert_eq!(count("SUMMARY"), 1);

    let path = machine.history().unwrap().get_path();
    assert_eq!(path.first(), Some(&"BEGIN"));
    assert_eq!(path.last(), Some(&"SUMMARY"));
}

#[test]
fn batch_error_reports_position() {
    let mut machine = header_body(true);

    let err = machine
        .advance_all(["# title", "body", "# unexpected header"])
        .unwrap_err();

    assert_eq!(err.line(), Some(3));
    assert!(matches!(
        err.root(),
        MachineError::Parse(ParseError::NoMatch { state, .. }) if state == "BODY"
    ));
}
