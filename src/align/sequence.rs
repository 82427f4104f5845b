//! Turning an alignment into replayable list edits.

/// Edit is one unaligned list element.
///
/// `index` is the position at which the edit is replayed against the list as
/// it stands after all earlier edits, so a changeset built from edits in the
/// emitted order can be applied front to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Remove old element `source`, currently at `index`.
    Remove { index: usize, source: usize },
    /// Insert new element `index` at `index`.
    Insert { index: usize },
}

/// Lists the removals and insertions left over by an alignment.
///
/// Each gap between consecutive aligned pairs (and before the first and after
/// the last) yields its removals highest index first, then its insertions
/// lowest index first.
pub fn gap_edits(m: usize, n: usize, pairs: &[(usize, usize)]) -> Vec<Edit> {
    let mut edits = Vec::new();
    let (mut next_x, mut next_y) = (0, 0);

    for &(x, y) in pairs.iter().chain(std::iter::once(&(m, n))) {
        for source in (next_x..x).rev() {
            edits.push(Edit::Remove {
                index: next_y + (source - next_x),
                source,
            });
        }
        for index in next_y..y {
            edits.push(Edit::Insert { index });
        }
        next_x = x + 1;
        next_y = y + 1;
    }

    edits
}
