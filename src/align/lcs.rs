//! Longest common subsequence over a similarity predicate.
//!
//! See <http://en.wikipedia.org/wiki/Longest_common_subsequence_problem>.

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Direction {
    TopLeft,
    Top,
    Left,
    #[default]
    Both,
}

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    direction: Direction,
    count: usize,
}

/// Aligns two sequences of lengths `m` (old) and `n` (new).
///
/// `similar(i, j)` decides whether old element `i` may be paired with new
/// element `j`. Returns the aligned `(old, new)` index pairs in ascending
/// order. Ties between dropping an old and a new element drop the old one,
/// so equal inputs always align the same way.
pub fn lcs(m: usize, n: usize, mut similar: impl FnMut(usize, usize) -> bool) -> Vec<(usize, usize)> {
    if m == 0 || n == 0 {
        return Vec::new();
    }

    trace!(old = m, new = n, "building lcs table");

    // table[j][i]: j walks the new sequence, i the old one
    let mut table = vec![vec![Cell::default(); m]; n];
    for j in 0..n {
        for i in 0..m {
            table[j][i] = if similar(i, j) {
                let topleft = if i > 0 && j > 0 { table[j - 1][i - 1].count } else { 0 };
                Cell {
                    direction: Direction::TopLeft,
                    count: topleft + 1,
                }
            } else {
                let top = if j > 0 { table[j - 1][i].count } else { 0 };
                let left = if i > 0 { table[j][i - 1].count } else { 0 };
                let direction = if top > left {
                    Direction::Top
                } else if top < left {
                    Direction::Left
                } else if j == 0 {
                    Direction::Top
                } else if i == 0 {
                    Direction::Left
                } else {
                    Direction::Both
                };
                Cell {
                    direction,
                    count: top.max(left),
                }
            };
        }
    }

    let mut pairs = Vec::new();
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        let cell = table[j - 1][i - 1];
        if cell.count == 0 {
            break;
        }
        match cell.direction {
            Direction::TopLeft => {
                pairs.push((i - 1, j - 1));
                i -= 1;
                j -= 1;
            }
            Direction::Top => j -= 1,
            Direction::Left | Direction::Both => i -= 1,
        }
    }
    pairs.reverse();

    trace!(aligned = pairs.len(), "lcs alignment done");
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lcs_eq(a: &[i64], b: &[i64]) -> Vec<(usize, usize)> {
        lcs(a.len(), b.len(), |i, j| a[i] == b[j])
    }

    #[test]
    fn test_equal_arrays() {
        assert_eq!(lcs_eq(&[1, 2, 3], &[1, 2, 3]), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_one_common_element() {
        assert_eq!(lcs_eq(&[1, 2, 3], &[1, 8, 7]), vec![(0, 0)]);
    }

    #[test]
    fn test_two_common_elements() {
        assert_eq!(lcs_eq(&[1, 3, 5, 7], &[2, 3, 7, 5]), vec![(1, 1), (2, 3)]);
    }

    #[test]
    fn test_two_common_elements_in_different_ordering() {
        assert_eq!(lcs_eq(&[1, 3, 4, 7], &[2, 3, 7, 5]), vec![(1, 1), (3, 2)]);
    }

    #[test]
    fn test_nothing_in_common() {
        assert!(lcs_eq(&[1, 2], &[3, 4]).is_empty());
    }

    #[test]
    fn test_empty_sides() {
        assert!(lcs_eq(&[], &[1]).is_empty());
        assert!(lcs_eq(&[1], &[]).is_empty());
    }

    #[test]
    fn test_predicate_sees_every_pair_once() {
        let mut calls = 0;
        lcs(3, 4, |_, _| {
            calls += 1;
            false
        });
        assert_eq!(calls, 12);
    }
}
