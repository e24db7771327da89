//! Section Parser
//!
//! This example classifies the lines of a sectioned test report.
//!
//! Key concepts:
//! - Building a grammar with the fluent builder
//! - Linting the grammar before use
//! - Per-state traversal counters
//! - Checkpointing halfway and resuming on a fresh machine
//!
//! Run with: RUST_LOG=trace cargo run --example section_parser

use linestate::builder::LineStateMachineBuilder;
use linestate::lint;
use linestate::{LineStateMachine, MachineError};
use stillwater::validation::Validation;

const REPORT: &str = "\
[suite] parser
  case: empty input
  case: nested headers
  case: trailing whitespace
[suite] lexer
  case: unicode identifiers
[summary]
4 passed, 0 failed";

fn grammar() -> Result<LineStateMachine, linestate::DefinitionError> {
    LineStateMachineBuilder::new()
        .state("SUITE", r"\[suite\] ")
        .state("CASE", r"\s+case: ")
        .state("SUMMARY", r"\[summary\]")
        .state("TOTALS", r"\d+ passed")
        .initial("SUITE")
        .transition("SUITE", "CASE")
        .transition("CASE", "CASE")
        .transition("CASE", "SUITE")
        .transition("CASE", "SUMMARY")
        .transition("SUMMARY", "TOTALS")
        .record_history(true)
        .build()
}

fn print_counts(machine: &LineStateMachine) {
    for (state, count) in machine.counts() {
        println!("  {:<8} {}", state.name(), count);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Section Parser ===\n");

    let mut machine = grammar()?;
    match lint::check(&machine) {
        Validation::Success(()) => println!("Grammar passed lint"),
        Validation::Failure(issues) => {
            for issue in issues.iter() {
                println!("lint: {issue}");
            }
        }
    }

    let lines: Vec<&str> = REPORT.lines().collect();
    let (head, tail) = lines.split_at(lines.len() / 2);

    println!("\nParsing first {} lines", head.len());
    machine.advance_all(head.iter().copied())?;
    print_counts(&machine);

    let checkpoint = machine.checkpoint();
    let saved = checkpoint.to_json()?;
    println!("\nCheckpoint saved ({} bytes of JSON)", saved.len());

    let mut resumed = grammar()?;
    resumed.restore(&linestate::Checkpoint::from_json(&saved)?)?;
    println!(
        "Resumed at {}",
        resumed.current_state().name().unwrap_or(linestate::engine::NOT_STARTED)
    );

    resumed.advance_all(tail.iter().copied())?;
    println!("\nFinal counts:");
    print_counts(&resumed);

    if let Some(history) = resumed.history() {
        println!("\nPath: {}", history.get_path().join(" -> "));
    }

    println!("\nFeeding a line that breaks the grammar:");
    resumed.reset();
    match resumed.advance("  case: orphan") {
        Err(MachineError::Parse(err)) => println!("  rejected: {err}"),
        other => println!("  unexpected: {other:?}"),
    }

    Ok(())
}
