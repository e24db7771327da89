//! JSON Definition
//!
//! This example loads a grammar from a JSON document, reports lint
//! findings and parses a build log.
//!
//! Key concepts:
//! - Declarative machine definitions
//! - Lint severities
//! - Line positions in batch errors
//! - Exporting a machine back to its definition
//!
//! Run with: cargo run --example json_definition

use linestate::lint::{self, Severity};
use linestate::MachineDefinition;
use stillwater::validation::Validation;

const DEFINITION: &str = r#"{
    "states": [
        {"name": "STEP", "pattern": "Step \\d+/\\d+ : "},
        {"name": "OUTPUT", "pattern": " ---> "},
        {"name": "DONE", "pattern": "Successfully built "},
        {"name": "ORPHAN", "pattern": "never reached"}
    ],
    "transitions": [
        {"to": "STEP"},
        {"from": "STEP", "to": "OUTPUT"},
        {"from": "OUTPUT", "to": "OUTPUT"},
        {"from": "OUTPUT", "to": "STEP"},
        {"from": "OUTPUT", "to": "DONE"},
        {"from": "OUTPUT", "to": "DONE"}
    ]
}"#;

const BUILD_LOG: &[&str] = &[
    "Step 1/2 : FROM rust:1.80",
    " ---> 4c2b1e0f",
    "Step 2/2 : RUN cargo build",
    " ---> Running in 9d8e",
    " ---> 77aa10c3",
    "Successfully built 77aa10c3",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== JSON Definition ===\n");

    let definition = MachineDefinition::from_json(DEFINITION)?;
    let mut machine = definition.build()?;

    if let Validation::Failure(issues) = lint::check(&machine) {
        for issue in issues.iter() {
            let label = match issue.severity() {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            println!("{label}: {issue}");
        }
    }

    let consumed = machine.advance_all(BUILD_LOG.iter().copied())?;
    println!("\nAccepted {consumed} lines, terminal: {}", machine.is_terminal());
    for (state, count) in machine.counts() {
        println!("  {:<7} {}", state.name(), count);
    }

    machine.reset();
    let broken = ["Step 1/1 : FROM scratch", "Step 2/1 : oops"];
    if let Err(err) = machine.advance_all(broken) {
        println!("\nBroken log rejected at line {:?}: {err}", err.line());
    }

    println!("\nExported definition:\n{}", machine.definition().to_json()?);

    Ok(())
}
