//! Static well-formedness checks for machine grammars.
//!
//! The determinism contract is enforced at run time, one line at a time.
//! These checks catch the problems that can be found without input: a
//! missing initial state, states nothing leads to, duplicated transitions,
//! and sibling states whose patterns are character-for-character identical
//! (any line matching one of them is guaranteed to be ambiguous).
//!
//! Like the rest of the validation in this crate, checks use Stillwater's
//! `Validation` and report every issue at once instead of stopping at the
//! first.
//!
//! # Example
//!
//! ```rust
//! use linestate::builder::LineStateMachineBuilder;
//! use linestate::lint::{self, LintIssue};
//! use stillwater::validation::Validation;
//!
//! let machine = LineStateMachineBuilder::new()
//!     .state("A", "a")
//!     .state("B", "b")
//!     .initial("A")
//!     .build()
//!     .unwrap();
//!
//! match lint::check(&machine) {
//!     Validation::Failure(issues) => {
//!         assert!(issues
//!             .iter()
//!             .any(|i| matches!(i, LintIssue::UnreachableState { name } if name == "B")));
//!     }
//!     Validation::Success(_) => panic!("B is unreachable"),
//! }
//! ```

pub mod issues;
pub mod rules;

pub use issues::{LintIssue, Severity};
pub use rules::check;
