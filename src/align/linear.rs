//! Linear list comparison, used when LCS alignment is turned off.
//!
//! Walks both lists once. When the elements at the cursors differ it looks
//! ahead, by at most the net number of expected additions (or removals), for
//! a matching element; anything skipped over becomes an addition (or
//! removal). Without a match the pair is diffed in place.

use crate::diff::Change;
use crate::path::Path;
use crate::value::Value;

/// Compares `old` and `new` element by element.
///
/// `diff` produces the changes between two elements at a path. The result
/// holds the in-place differences first, then removals highest index first,
/// then additions lowest index first.
pub fn linear_compare<F>(path: &Path, old: &[Value], new: &[Value], diff: F) -> Vec<Change>
where
    F: FnMut(&Path, &Value, &Value) -> Vec<Change>,
{
    LinearCompare {
        path,
        old,
        new,
        diff,
        old_index: 0,
        new_index: 0,
        expected_additions: new.len() as isize - old.len() as isize,
        differences: Vec::new(),
        additions: Vec::new(),
        deletions: Vec::new(),
    }
    .run()
}

struct LinearCompare<'a, F> {
    path: &'a Path,
    old: &'a [Value],
    new: &'a [Value],
    diff: F,
    old_index: usize,
    new_index: usize,
    expected_additions: isize,
    differences: Vec<Change>,
    additions: Vec<Change>,
    deletions: Vec<Change>,
}

impl<'a, F> LinearCompare<'a, F>
where
    F: FnMut(&Path, &Value, &Value) -> Vec<Change>,
{
    fn run(mut self) -> Vec<Change> {
        while self.old_index < self.old.len() || self.new_index < self.new.len() {
            if self.new_index >= self.new.len() {
                self.append_deletion(self.old_index);
            } else if self.old_index >= self.old.len() {
                self.append_addition(self.new_index);
            } else {
                self.compare_at_index();
            }
            self.old_index += 1;
            self.new_index += 1;
        }

        let mut changes = self.differences;
        changes.extend(self.deletions.into_iter().rev());
        changes.extend(self.additions);
        changes
    }

    fn item_difference(&mut self, old_index: usize, new_index: usize) -> Vec<Change> {
        let path = self.path.with_index(old_index);
        (self.diff)(&path, &self.old[old_index], &self.new[new_index])
    }

    fn compare_at_index(&mut self) {
        let difference = self.item_difference(self.old_index, self.new_index);
        if difference.is_empty() {
            return;
        }

        let after_additions = self.index_of_match_after_additions();
        if let Some(index) = after_additions {
            for i in self.new_index..index {
                self.append_addition(i);
            }
            self.expected_additions -= (index - self.new_index) as isize;
            self.new_index = index;
        }

        let after_deletions = self.index_of_match_after_deletions();
        if let Some(index) = after_deletions {
            for i in self.old_index..index {
                self.append_deletion(i);
            }
            self.expected_additions += (index - self.old_index) as isize;
            self.old_index = index;
        }

        if after_additions.is_none() && after_deletions.is_none() {
            self.differences.extend(difference);
        }
    }

    fn index_of_match_after_additions(&mut self) -> Option<usize> {
        for i in 1..=self.expected_additions.max(0) as usize {
            let candidate = self.new_index + i;
            if candidate >= self.new.len() {
                break;
            }
            if self.item_difference(self.old_index, candidate).is_empty() {
                return Some(candidate);
            }
        }
        None
    }

    fn index_of_match_after_deletions(&mut self) -> Option<usize> {
        for i in 1..=(-self.expected_additions).max(0) as usize {
            let candidate = self.old_index + i;
            if candidate >= self.old.len() {
                break;
            }
            if self.item_difference(candidate, self.new_index).is_empty() {
                return Some(candidate);
            }
        }
        None
    }

    fn append_addition(&mut self, index: usize) {
        self.additions
            .push(Change::added(self.path.with_index(index), self.new[index].clone()));
    }

    fn append_deletion(&mut self, index: usize) {
        self.deletions
            .push(Change::removed(self.path.with_index(index), self.old[index].clone()));
    }
}
