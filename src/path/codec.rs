//! Text and step-list encodings of paths.
//!
//! Delimited text looks like `a.b[3].c`: keys are joined by the delimiter and
//! list indices are appended to the preceding token as `[n]`. Keys that
//! contain the delimiter or end in a bracketed number cannot be told apart
//! from structure in that form, so [`PathStyle::Steps`] carries the raw steps.
//! The same goes for an empty key in the leading position: `[""]` encodes to
//! the empty string, which decodes to the root, and `["", 0]` decodes to
//! `[0]`. Documents with empty keys need [`PathStyle::Steps`] on the wire.

use super::path::{Path, Step};
use crate::error::{Error, Result};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt::Write;

/// Delimiter used unless configured otherwise.
pub const DEFAULT_DELIMITER: &str = ".";

/// PathStyle selects the external representation of change paths.
///
/// In options files it is written `steps`, `delimited` (default delimiter)
/// or `{delimited: "/"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStyle {
    /// Delimited text such as `a.b[0].c`.
    Delimited(String),
    /// An explicit list of string keys and integer indices.
    Steps,
}

impl Default for PathStyle {
    fn default() -> Self {
        PathStyle::Delimited(DEFAULT_DELIMITER.to_string())
    }
}

impl<'de> Deserialize<'de> for PathStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        const VARIANTS: &[&str] = &["delimited", "steps"];

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Delimited { delimited: String },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(name) => match name.as_str() {
                "steps" => Ok(PathStyle::Steps),
                "delimited" => Ok(PathStyle::default()),
                other => Err(de::Error::unknown_variant(other, VARIANTS)),
            },
            Repr::Delimited { delimited } if delimited.is_empty() => {
                Err(de::Error::invalid_value(de::Unexpected::Str(""), &"a non-empty delimiter"))
            }
            Repr::Delimited { delimited } => Ok(PathStyle::Delimited(delimited)),
        }
    }
}

/// Encodes a path as delimited text.
pub fn encode(path: &Path, delimiter: &str) -> String {
    let mut out = String::new();
    for (i, step) in path.iter().enumerate() {
        match step {
            Step::Key(name) => {
                if i > 0 {
                    out.push_str(delimiter);
                }
                out.push_str(name);
            }
            Step::Index(index) => {
                let _ = write!(out, "[{}]", index);
            }
        }
    }
    out
}

/// Decodes delimited text into a path.
///
/// The empty string is the root path. A segment may carry any number of
/// `[n]` suffixes; bracket content that is not a non-negative integer is
/// rejected.
pub fn decode(text: &str, delimiter: &str) -> Result<Path> {
    if delimiter.is_empty() {
        return Err(Error::malformed_path(text, "empty delimiter"));
    }

    let mut steps = Vec::new();
    if text.is_empty() {
        return Ok(Path::from_steps(steps));
    }

    for segment in text.split(delimiter) {
        decode_segment(segment, text, &mut steps)?;
    }
    Ok(Path::from_steps(steps))
}

fn decode_segment(segment: &str, text: &str, steps: &mut Vec<Step>) -> Result<()> {
    let mut rest = segment;
    let mut indices = Vec::new();

    while rest.ends_with(']') {
        let Some(open) = rest.rfind('[') else {
            break;
        };
        let digits = &rest[open + 1..rest.len() - 1];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::malformed_path(
                text,
                format!("non-numeric index {:?}", digits),
            ));
        }
        let index = digits
            .parse::<usize>()
            .map_err(|e| Error::malformed_path(text, format!("invalid index: {}", e)))?;
        indices.push(index);
        rest = &rest[..open];
    }

    if !rest.is_empty() || indices.is_empty() {
        steps.push(Step::Key(rest.to_string()));
    }
    steps.extend(indices.into_iter().rev().map(Step::Index));
    Ok(())
}

/// Encodes a path for the changeset wire format.
pub fn encode_json(path: &Path, style: &PathStyle) -> serde_json::Value {
    match style {
        PathStyle::Delimited(delimiter) => serde_json::Value::String(encode(path, delimiter)),
        PathStyle::Steps => serde_json::Value::Array(
            path.iter()
                .map(|step| match step {
                    Step::Key(name) => serde_json::Value::String(name.clone()),
                    Step::Index(i) => serde_json::Value::from(*i),
                })
                .collect(),
        ),
    }
}

/// Decodes a path from the changeset wire format.
pub fn decode_json(raw: &serde_json::Value, style: &PathStyle) -> Result<Path> {
    match (style, raw) {
        (PathStyle::Delimited(delimiter), serde_json::Value::String(text)) => {
            decode(text, delimiter)
        }
        (PathStyle::Steps, serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                serde_json::Value::String(name) => Ok(Step::Key(name.clone())),
                serde_json::Value::Number(n) => n
                    .as_u64()
                    .and_then(|i| usize::try_from(i).ok())
                    .map(Step::Index)
                    .ok_or_else(|| {
                        Error::malformed_path(raw.to_string(), format!("invalid index {}", n))
                    }),
                other => Err(Error::malformed_path(
                    raw.to_string(),
                    format!("unexpected step {}", other),
                )),
            })
            .collect(),
        (PathStyle::Delimited(_), _) => Err(Error::malformed_path(
            raw.to_string(),
            "expected a delimited string",
        )),
        (PathStyle::Steps, _) => Err(Error::malformed_path(
            raw.to_string(),
            "expected a list of steps",
        )),
    }
}
