//! Macros for ergonomic machine construction.

/// Build a `LineStateMachine` from a declarative grammar.
///
/// State identifiers become state names. Expands to a
/// `Result<LineStateMachine, DefinitionError>`.
///
/// # Example
///
/// ```
/// use linestate::line_machine;
///
/// let mut machine = line_machine! {
///     states: {
///         HEADER => "^#",
///         BODY => "^[^#]",
///     }
///     initial: [HEADER]
///     transitions: {
///         HEADER => BODY,
///         BODY => BODY,
///     }
/// }
/// .unwrap();
///
/// assert_eq!(machine.advance_all(["# t", "a"]).unwrap(), 2);
/// ```
#[macro_export]
macro_rules! line_machine {
    (
        states: { $($name:ident => $pattern:expr),* $(,)? }
        $(initial: [$($initial:ident),* $(,)?])?
        $(transitions: { $($from:ident => $to:ident),* $(,)? })?
    ) => {
        $crate::builder::LineStateMachineBuilder::new()
            $(.state(stringify!($name), $pattern))*
            $($(.initial(stringify!($initial)))*)?
            $($(.transition(stringify!($from), stringify!($to)))*)?
            .build()
    };
}
