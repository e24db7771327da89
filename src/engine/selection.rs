//! Deterministic successor selection.

/// Outcome of matching a line against a node's successors.
///
/// Exactly one match is the only successful outcome; the other two are
/// reported as parse errors by the machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// No successor recognized the line
    None,
    /// Exactly one successor recognized the line
    One(usize),
    /// Several distinct successors recognized the line, in candidate order
    Many(Vec<usize>),
}

impl Selection {
    /// Classify `candidates` by how many distinct ones satisfy `matches`.
    ///
    /// Candidates that appear more than once count once, so a duplicated
    /// transition is never ambiguous with itself. Every distinct candidate
    /// is tested; selection does not stop at the first hit.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linestate::engine::Selection;
    ///
    /// let lengths = [1, 3, 5];
    /// let candidates = [0, 1, 2];
    ///
    /// let three = Selection::select(&candidates, |index| lengths[index] == 3);
    /// assert_eq!(three, Selection::One(1));
    ///
    /// let two = Selection::select(&candidates, |index| lengths[index] == 2);
    /// assert_eq!(two, Selection::None);
    /// ```
    pub fn select<F>(candidates: &[usize], mut matches: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        let mut found: Vec<usize> = Vec::new();
        for &candidate in candidates {
            if found.contains(&candidate) {
                continue;
            }
            if matches(candidate) {
                found.push(candidate);
            }
        }

        match found.len() {
            0 => Selection::None,
            1 => Selection::One(found[0]),
            _ => Selection::Many(found),
        }
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Selection::One(_))
    }
}
