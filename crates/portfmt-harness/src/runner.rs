//! Test execution engine.

use std::time::Instant;

use portfmt_core::format_into;

use crate::diff;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use crate::verify::{VerificationResult, escape_output};

/// What the engine did with one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Stored bytes (terminator excluded) and logical length.
    Formatted { output: Vec<u8>, length: usize },
    /// `FormatError::kind()` of the rejection.
    Rejected { kind: &'static str },
}

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
}

impl TestRunner {
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .map(|case| verify_case(case, &execute_case(case)))
            .collect()
    }

    /// Like [`run`](Self::run), emitting one `fixture_case` entry per case.
    pub fn run_logged(
        &self,
        fixture_set: &FixtureSet,
        emitter: &mut LogEmitter,
    ) -> std::io::Result<Vec<VerificationResult>> {
        let mut results = Vec::with_capacity(fixture_set.cases.len());
        for case in &fixture_set.cases {
            let started = Instant::now();
            let outcome = execute_case(case);
            let latency_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
            let result = verify_case(case, &outcome);

            let (level, verdict) = if result.passed {
                (LogLevel::Info, Outcome::Pass)
            } else {
                (LogLevel::Warn, Outcome::Fail)
            };
            let mut entry = LogEntry::new("", level, "fixture_case")
                .with_case(&fixture_set.family, &case.name)
                .with_format(&case.format, case.capacity)
                .with_outcome(verdict)
                .with_latency_ns(latency_ns)
                .with_details(serde_json::json!({ "campaign": self.campaign }));
            entry = match outcome {
                CaseOutcome::Formatted { length, .. } => entry.with_logical_length(length),
                CaseOutcome::Rejected { kind } => entry.with_error_kind(kind),
            };
            emitter.emit_entry(entry)?;
            results.push(result);
        }
        Ok(results)
    }
}

/// Format one case into a buffer of the case's capacity.
#[must_use]
pub fn execute_case(case: &FixtureCase) -> CaseOutcome {
    let args = case.format_args();
    let mut buf = vec![0u8; case.capacity];
    match format_into(&mut buf, case.format.as_bytes(), &args) {
        Ok(length) => {
            let stored = length.min(case.capacity.saturating_sub(1));
            buf.truncate(stored);
            CaseOutcome::Formatted {
                output: buf,
                length,
            }
        }
        Err(err) => CaseOutcome::Rejected { kind: err.kind() },
    }
}

fn verify_case(case: &FixtureCase, outcome: &CaseOutcome) -> VerificationResult {
    let expected = describe_expected(case);
    let actual = describe_actual(case, outcome);
    let passed = expected == actual;
    VerificationResult {
        case_name: case.name.clone(),
        section: case.section.clone(),
        passed,
        diff: (!passed).then(|| diff::render_diff(&expected, &actual)),
        expected,
        actual,
    }
}

fn describe_expected(case: &FixtureCase) -> String {
    let mut lines = Vec::new();
    if let Some(output) = &case.expected_output {
        lines.push(format!("output: {output}"));
    }
    if let Some(length) = case.expected_length {
        lines.push(format!("length: {length}"));
    }
    if let Some(kind) = &case.expected_error {
        lines.push(format!("error: {kind}"));
    }
    lines.join("\n")
}

/// Describe the outcome using the fields the case checks. A case that
/// expected an error sees the full formatted result.
fn describe_actual(case: &FixtureCase, outcome: &CaseOutcome) -> String {
    match outcome {
        CaseOutcome::Formatted { output, length } => {
            let expects_error = case.expected_error.is_some();
            let mut lines = Vec::new();
            if case.expected_output.is_some() || expects_error {
                lines.push(format!("output: {}", escape_output(output)));
            }
            if case.expected_length.is_some() || expects_error {
                lines.push(format!("length: {length}"));
            }
            lines.join("\n")
        }
        CaseOutcome::Rejected { kind } => format!("error: {kind}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(cases: &str) -> FixtureSet {
        FixtureSet::from_json(&format!(
            r#"{{"version":"v1","family":"smoke","captured_at":"2026-10-01T00:00:00Z","cases":[{cases}]}}"#
        ))
        .expect("valid fixture json")
    }

    #[test]
    fn passing_output_and_length() {
        let set = fixture(
            r#"{"name":"pad","section":"flags","format":"%05d","args":[{"int":-5}],
                "expected_output":"-0005","expected_length":5}"#,
        );
        let results = TestRunner::new("smoke").run(&set);
        assert_eq!(results.len(), 1);
        assert!(results[0].passed, "{:?}", results[0].diff);
        assert!(results[0].diff.is_none());
    }

    #[test]
    fn truncated_output_is_compared_as_stored() {
        let set = fixture(
            r#"{"name":"trunc","section":"bounds","format":"%s","args":[{"str":"abcdef"}],
                "capacity":4,"expected_output":"abc","expected_length":6}"#,
        );
        assert!(TestRunner::new("smoke").run(&set)[0].passed);
    }

    #[test]
    fn embedded_nul_is_escaped() {
        let set = fixture(
            r#"{"name":"bin","section":"extensions","format":"%.3sB","args":[{"bytes":[65,0,66]}],
                "expected_output":"A\\0B"}"#,
        );
        assert!(TestRunner::new("smoke").run(&set)[0].passed);
    }

    #[test]
    fn expected_error_kind() {
        let set = fixture(
            r#"{"name":"short","section":"args","format":"%d %d","args":[{"int":1}],
                "expected_error":"ArgumentsExhausted"}"#,
        );
        assert!(TestRunner::new("smoke").run(&set)[0].passed);
    }

    #[test]
    fn mismatch_produces_diff() {
        let set = fixture(
            r#"{"name":"wrong","section":"core","format":"%d","args":[{"int":42}],
                "expected_output":"43"}"#,
        );
        let result = &TestRunner::new("smoke").run(&set)[0];
        assert!(!result.passed);
        assert_eq!(result.actual, "output: 42");
        let diff = result.diff.as_deref().unwrap();
        assert!(diff.contains("-output: 43"));
        assert!(diff.contains("+output: 42"));
    }

    #[test]
    fn unexpected_success_shows_full_result() {
        let set = fixture(
            r#"{"name":"noerr","section":"core","format":"%d","args":[{"int":1}],
                "expected_error":"ArgumentsExhausted"}"#,
        );
        let result = &TestRunner::new("smoke").run(&set)[0];
        assert!(!result.passed);
        assert_eq!(result.actual, "output: 1\nlength: 1");
    }

    #[test]
    fn logged_run_emits_one_entry_per_case() {
        let set = fixture(
            r#"{"name":"a","section":"core","format":"x","expected_output":"x"},
               {"name":"b","section":"core","format":"%","expected_error":"MalformedDirective"}"#,
        );
        let mut emitter = LogEmitter::to_buffer("pf", "unit");
        let results = TestRunner::new("smoke").run_logged(&set, &mut emitter).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed));
        assert_eq!(emitter.emitted(), 2);
    }
}
