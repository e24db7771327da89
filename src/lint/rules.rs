//! Static grammar checks using Validation.

use crate::engine::{LineStateMachine, Node};
use crate::lint::issues::LintIssue;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<LintIssue>>;

/// Run every check, accumulating ALL issues.
///
/// Returns `Validation::Success(())` for a clean grammar and
/// `Validation::Failure` with every issue otherwise.
pub fn check(machine: &LineStateMachine) -> Check {
    let mut checks: Vec<Check> = vec![initial_state_defined(machine)];
    checks.extend(reachability(machine));
    checks.extend(duplicate_transitions(machine));
    checks.extend(identical_patterns(machine));

    Validation::all_vec(checks).map(|_| ())
}

fn initial_state_defined(machine: &LineStateMachine) -> Check {
    if machine.graph().successors(Node::Start).is_empty() {
        Validation::fail(LintIssue::NoInitialState)
    } else {
        Validation::success(())
    }
}

fn reachability(machine: &LineStateMachine) -> Vec<Check> {
    let reachable = machine.graph().reachable();

    machine
        .states()
        .zip(reachable)
        .filter(|(_, reachable)| !reachable)
        .map(|(state, _)| {
            Validation::fail(LintIssue::UnreachableState {
                name: state.name().to_string(),
            })
        })
        .collect()
}

fn duplicate_transitions(machine: &LineStateMachine) -> Vec<Check> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut checks = Vec::new();

    for edge in machine.graph().edges() {
        if !seen.insert(edge) && reported.insert(edge) {
            let (from, to) = edge;
            checks.push(Validation::fail(LintIssue::DuplicateTransition {
                from: machine.node_label(from),
                to: machine.node_label(Node::State(to)),
            }));
        }
    }

    checks
}

fn identical_patterns(machine: &LineStateMachine) -> Vec<Check> {
    let graph = machine.graph();
    let states: Vec<_> = machine.states().collect();
    let mut checks = Vec::new();

    for node in graph.nodes() {
        let mut distinct: Vec<usize> = Vec::new();
        for &index in graph.successors(node) {
            if !distinct.contains(&index) {
                distinct.push(index);
            }
        }

        for (i, &first) in distinct.iter().enumerate() {
            for &second in &distinct[i + 1..] {
                if states[first].pattern() == states[second].pattern() {
                    checks.push(Validation::fail(LintIssue::IdenticalPatterns {
                        from: machine.node_label(node),
                        first: states[first].name().to_string(),
                        second: states[second].name().to_string(),
                    }));
                }
            }
        }
    }

    checks
}
