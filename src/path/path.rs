//! Path step and path types.

use std::cmp::Ordering;

/// Step represents one level of path navigation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Key into a map.
    Key(String),
    /// Index into a list.
    Index(usize),
}

impl Step {
    /// Creates a new map key step.
    pub fn key(name: impl Into<String>) -> Self {
        Step::Key(name.into())
    }

    /// Creates a new list index step.
    pub fn index(i: usize) -> Self {
        Step::Index(i)
    }

    pub fn is_key(&self) -> bool {
        matches!(self, Step::Key(_))
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Step::Index(_))
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            Step::Key(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Step::Index(i) => Some(*i),
            _ => None,
        }
    }
}

impl PartialOrd for Step {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Step {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Step::Key(a), Step::Key(b)) => a.cmp(b),
            (Step::Index(a), Step::Index(b)) => a.cmp(b),
            // Keys come before indices
            (Step::Key(_), Step::Index(_)) => Ordering::Less,
            (Step::Index(_), Step::Key(_)) => Ordering::Greater,
        }
    }
}

impl From<&str> for Step {
    fn from(s: &str) -> Self {
        Step::Key(s.to_string())
    }
}

impl From<String> for Step {
    fn from(s: String) -> Self {
        Step::Key(s)
    }
}

impl From<usize> for Step {
    fn from(i: usize) -> Self {
        Step::Index(i)
    }
}

/// Path is the location of a value, as steps from the root.
///
/// The empty path denotes the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    /// Creates a new empty path.
    pub fn new() -> Self {
        Path { steps: Vec::new() }
    }

    /// Creates a path from a vector of steps.
    pub fn from_steps(steps: Vec<Step>) -> Self {
        Path { steps }
    }

    /// Returns the number of steps in the path.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the path is the root.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn pop(&mut self) -> Option<Step> {
        self.steps.pop()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Creates a new path with the given step appended.
    pub fn with(&self, step: Step) -> Self {
        let mut new_path = self.clone();
        new_path.push(step);
        new_path
    }

    /// Creates a new path with a map key appended.
    pub fn with_key(&self, key: &str) -> Self {
        self.with(Step::Key(key.to_string()))
    }

    /// Creates a new path with a list index appended.
    pub fn with_index(&self, index: usize) -> Self {
        self.with(Step::Index(index))
    }

    /// Splits the path into its parent steps and final step.
    pub fn split_last(&self) -> Option<(&Step, &[Step])> {
        self.steps.split_last()
    }

    pub fn as_slice(&self) -> &[Step] {
        &self.steps
    }
}

impl FromIterator<Step> for Path {
    fn from_iter<T: IntoIterator<Item = Step>>(iter: T) -> Self {
        Path {
            steps: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Path {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Key(name) => write!(f, "{}", name),
            Step::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&super::encode(self, super::DEFAULT_DELIMITER))
    }
}

/// Builds a path from a mix of keys and indices: `path!["a", 0, "b"]`.
#[macro_export]
macro_rules! path {
    () => { $crate::path::Path::new() };
    ($($step:expr),+ $(,)?) => {
        $crate::path::Path::from_steps(vec![$($crate::path::IntoStep::into_step($step)),+])
    };
}

/// Conversion used by the [`path!`] macro so integer literals become indices.
pub trait IntoStep {
    fn into_step(self) -> Step;
}

impl IntoStep for &str {
    fn into_step(self) -> Step {
        Step::Key(self.to_string())
    }
}

impl IntoStep for String {
    fn into_step(self) -> Step {
        Step::Key(self)
    }
}

impl IntoStep for usize {
    fn into_step(self) -> Step {
        Step::Index(self)
    }
}

impl IntoStep for i32 {
    fn into_step(self) -> Step {
        Step::Index(usize::try_from(self).unwrap_or(0))
    }
}

impl IntoStep for Step {
    fn into_step(self) -> Step {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_accessors() {
        let step = Step::key("foo");
        assert!(step.is_key());
        assert_eq!(step.as_key(), Some("foo"));
        assert_eq!(Step::index(3).as_index(), Some(3));
    }

    #[test]
    fn test_path_operations() {
        let mut path = Path::new();
        assert!(path.is_empty());

        path.push(Step::key("metadata"));
        path.push(Step::index(2));
        assert_eq!(path.len(), 2);
        assert_eq!(path.last(), Some(&Step::Index(2)));

        let (last, parent) = path.split_last().unwrap();
        assert_eq!(last, &Step::Index(2));
        assert_eq!(parent, &[Step::key("metadata")]);

        let popped = path.pop();
        assert_eq!(popped, Some(Step::Index(2)));
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_path_macro() {
        let path = path!["a", 0, "b"];
        assert_eq!(
            path,
            Path::from_steps(vec![Step::key("a"), Step::index(0), Step::key("b")])
        );
        assert!(path![].is_empty());
    }

    #[test]
    fn test_path_display() {
        assert_eq!(format!("{}", path!["x", 0, "c"]), "x[0].c");
        assert_eq!(format!("{}", path![1]), "[1]");
        assert_eq!(format!("{}", Path::new()), "");
    }

    #[test]
    fn test_step_ordering() {
        let a = Step::key("a");
        let b = Step::key("b");
        assert!(a < b);
        assert!(b < Step::index(0));
    }
}
