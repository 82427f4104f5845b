//! Options controlling how values are compared and how paths are rendered.

use crate::compare::Comparator;
use crate::error::Result;
use crate::path::PathStyle;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Similarity threshold used by a plain diff.
pub const DEFAULT_SIMILARITY: f64 = 0.8;

/// Options is the configuration record shared by diff, best-diff and similar.
///
/// Everything except the comparator hook can be loaded from a YAML or JSON
/// document; missing fields take their defaults.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Minimum fraction of unchanged structure for two list elements to be
    /// aligned instead of removed and added. Expected in (0, 1].
    pub similarity: f64,
    /// External representation of change paths.
    pub path_style: PathStyle,
    /// When false, integers and floats are comparable with each other.
    pub strict: bool,
    /// Numbers closer than this are equal.
    pub numeric_tolerance: Option<f64>,
    /// Trim surrounding whitespace from strings before comparing.
    pub strip: bool,
    /// Compare strings ignoring case.
    pub case_insensitive: bool,
    /// Stringify non-string map keys when loading YAML.
    pub stringify_keys: bool,
    /// Canonicalize both inputs before diffing.
    pub sort: bool,
    /// Align lists with LCS; when false a linear walk is used.
    pub use_lcs: bool,
    #[serde(skip)]
    pub comparator: Option<Arc<dyn Comparator>>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            similarity: DEFAULT_SIMILARITY,
            path_style: PathStyle::default(),
            strict: true,
            numeric_tolerance: None,
            strip: false,
            case_insensitive: false,
            stringify_keys: true,
            sort: false,
            use_lcs: true,
            comparator: None,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Options::default()
    }

    /// Loads options from a YAML (or JSON) document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn similarity(mut self, similarity: f64) -> Self {
        self.similarity = similarity;
        self
    }

    /// Renders paths as text joined by `delimiter`.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.path_style = PathStyle::Delimited(delimiter.into());
        self
    }

    /// Renders paths as explicit step lists.
    pub fn array_path(mut self) -> Self {
        self.path_style = PathStyle::Steps;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn numeric_tolerance(mut self, tolerance: f64) -> Self {
        self.numeric_tolerance = Some(tolerance);
        self
    }

    pub fn strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn stringify_keys(mut self, stringify_keys: bool) -> Self {
        self.stringify_keys = stringify_keys;
        self
    }

    pub fn sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    pub fn use_lcs(mut self, use_lcs: bool) -> Self {
        self.use_lcs = use_lcs;
        self
    }

    /// Installs a custom comparator consulted before the default rules.
    pub fn comparator(mut self, comparator: impl Comparator + 'static) -> Self {
        self.comparator = Some(Arc::new(comparator));
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("similarity", &self.similarity)
            .field("path_style", &self.path_style)
            .field("strict", &self.strict)
            .field("numeric_tolerance", &self.numeric_tolerance)
            .field("strip", &self.strip)
            .field("case_insensitive", &self.case_insensitive)
            .field("stringify_keys", &self.stringify_keys)
            .field("sort", &self.sort)
            .field("use_lcs", &self.use_lcs)
            .field("comparator", &self.comparator.is_some())
            .finish()
    }
}
