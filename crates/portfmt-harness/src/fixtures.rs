//! Fixture loading and management.

use std::path::{Path, PathBuf};

use portfmt_core::FormatArg;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Capacity used when a case does not set one.
pub const DEFAULT_CAPACITY: usize = 256;

/// A typed argument as written in fixture JSON, e.g. `{"int": -5}`,
/// `{"str": null}` or `{"bytes": [65, 0]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureArg {
    Int(i32),
    UInt(u32),
    Long(i64),
    ULong(u64),
    LLong(i64),
    ULLong(u64),
    Size(usize),
    SSize(isize),
    Double(f64),
    Pointer(usize),
    Str(Option<String>),
    Bytes(Vec<u8>),
}

impl FixtureArg {
    /// Borrow as an engine argument.
    #[must_use]
    pub fn as_format_arg(&self) -> FormatArg<'_> {
        match self {
            Self::Int(v) => FormatArg::Int(*v),
            Self::UInt(v) => FormatArg::UInt(*v),
            Self::Long(v) => FormatArg::Long(*v),
            Self::ULong(v) => FormatArg::ULong(*v),
            Self::LLong(v) => FormatArg::LongLong(*v),
            Self::ULLong(v) => FormatArg::ULongLong(*v),
            Self::Size(v) => FormatArg::Size(*v),
            Self::SSize(v) => FormatArg::SSize(*v),
            Self::Double(v) => FormatArg::Double(*v),
            Self::Pointer(v) => FormatArg::Pointer(*v),
            Self::Str(s) => FormatArg::Str(s.as_deref().map(str::as_bytes)),
            Self::Bytes(b) => FormatArg::Bytes(b),
        }
    }
}

impl std::str::FromStr for FixtureArg {
    type Err = HarnessError;

    /// Parse the command-line form `tag:value`: `i:-5`, `u:7`, `l:`, `ul:`,
    /// `ll:`, `ull:`, `z:`, `zs:`, `f:3.5`, `p:0x10`, `s:text`, `b:41ff`,
    /// or the bare word `null`.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| HarnessError::InvalidArgument {
            spec: spec.to_string(),
            message,
        };
        if spec == "null" {
            return Ok(Self::Str(None));
        }
        let (tag, value) = spec
            .split_once(':')
            .ok_or_else(|| invalid(String::from("expected <tag>:<value>")))?;
        let num = |e: &dyn std::fmt::Display| invalid(e.to_string());
        let arg = match tag {
            "i" => Self::Int(value.parse().map_err(|e| num(&e))?),
            "u" => Self::UInt(value.parse().map_err(|e| num(&e))?),
            "l" => Self::Long(value.parse().map_err(|e| num(&e))?),
            "ul" => Self::ULong(value.parse().map_err(|e| num(&e))?),
            "ll" => Self::LLong(value.parse().map_err(|e| num(&e))?),
            "ull" => Self::ULLong(value.parse().map_err(|e| num(&e))?),
            "z" => Self::Size(value.parse().map_err(|e| num(&e))?),
            "zs" => Self::SSize(value.parse().map_err(|e| num(&e))?),
            "f" => Self::Double(value.parse().map_err(|e| num(&e))?),
            "p" => {
                let addr = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
                    Some(hex) => usize::from_str_radix(hex, 16),
                    None => value.parse(),
                };
                Self::Pointer(addr.map_err(|e| num(&e))?)
            }
            "s" => Self::Str(Some(value.to_string())),
            "b" => Self::Bytes(decode_hex(value).ok_or_else(|| {
                invalid(String::from("expected an even number of hex digits"))
            })?),
            other => return Err(invalid(format!("unknown tag '{other}'"))),
        };
        Ok(arg)
    }
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .collect()
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Dialect section the case exercises (e.g. "extensions/sB").
    pub section: String,
    /// Format string. A `\u0000` inside ends the format early.
    pub format: String,
    #[serde(default)]
    pub args: Vec<FixtureArg>,
    /// Output buffer capacity, terminator included.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Expected stored bytes, with NUL written as `\0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    /// Expected logical length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_length: Option<usize>,
    /// Expected error kind (e.g. "ArgumentsExhausted").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_error: Option<String>,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl FixtureCase {
    /// Engine arguments borrowed from this case.
    #[must_use]
    pub fn format_args(&self) -> Vec<FormatArg<'_>> {
        self.args.iter().map(FixtureArg::as_format_arg).collect()
    }
}

/// A collection of fixture cases for one area of the dialect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Family name (e.g. "integers").
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|err| HarnessError::Fixture {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

/// Every `*.json` fixture file in `dir`, sorted by path.
pub fn fixture_paths(dir: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_arguments() {
        let set = FixtureSet::from_json(
            r#"{
                "version":"v1",
                "family":"smoke",
                "captured_at":"2026-10-01T00:00:00Z",
                "cases":[
                    {"name":"mixed","section":"core","format":"%s %d %llu %sB",
                     "args":[{"str":"x"},{"int":-5},{"ullong":7},{"bytes":[65,0]},{"str":null}],
                     "expected_output":"x -5 7"}
                ]
            }"#,
        )
        .expect("valid fixture json");
        let case = &set.cases[0];
        assert_eq!(case.capacity, DEFAULT_CAPACITY);
        assert_eq!(case.expected_length, None);
        assert_eq!(
            case.format_args(),
            vec![
                FormatArg::Str(Some(&b"x"[..])),
                FormatArg::Int(-5),
                FormatArg::ULongLong(7),
                FormatArg::Bytes(&[65, 0]),
                FormatArg::Str(None),
            ]
        );
    }

    #[test]
    fn rejects_unknown_argument_tag() {
        let err = FixtureSet::from_json(
            r#"{"version":"v1","family":"f","captured_at":"t","cases":[
                {"name":"bad","section":"s","format":"%d","args":[{"short":1}]}
            ]}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn parses_command_line_arguments() {
        let parse = |s: &str| s.parse::<FixtureArg>().unwrap();
        assert_eq!(parse("i:-5"), FixtureArg::Int(-5));
        assert_eq!(parse("u:7"), FixtureArg::UInt(7));
        assert_eq!(parse("ll:-9"), FixtureArg::LLong(-9));
        assert_eq!(parse("z:12"), FixtureArg::Size(12));
        assert_eq!(parse("f:3.5"), FixtureArg::Double(3.5));
        assert_eq!(parse("p:0x10"), FixtureArg::Pointer(16));
        assert_eq!(parse("s:a:b"), FixtureArg::Str(Some(String::from("a:b"))));
        assert_eq!(parse("null"), FixtureArg::Str(None));
        assert_eq!(parse("b:4100ff"), FixtureArg::Bytes(vec![0x41, 0x00, 0xff]));
    }

    #[test]
    fn rejects_bad_command_line_arguments() {
        assert!("q:1".parse::<FixtureArg>().is_err());
        assert!("i:abc".parse::<FixtureArg>().is_err());
        assert!("b:abc".parse::<FixtureArg>().is_err());
        assert!("plain".parse::<FixtureArg>().is_err());
    }

    #[test]
    fn serializes_argument_tags_in_lowercase() {
        let json = serde_json::to_string(&FixtureArg::SSize(-2)).unwrap();
        assert_eq!(json, r#"{"ssize":-2}"#);
        let json = serde_json::to_string(&FixtureArg::Str(None)).unwrap();
        assert_eq!(json, r#"{"str":null}"#);
    }
}
