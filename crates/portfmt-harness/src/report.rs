//! Report generation for conformance results.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::verify::VerificationSummary;

/// A conformance report for one verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Report title.
    pub title: String,
    /// Fixture families included in the run.
    pub families: Vec<String>,
    /// Timestamp (UTC).
    pub timestamp: String,
    /// Verification summary.
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}\n", self.title);
        let _ = writeln!(out, "- Families: {}", self.families.join(", "));
        let _ = writeln!(out, "- Timestamp: {}", self.timestamp);
        let _ = writeln!(out, "- Total: {}", self.summary.total);
        let _ = writeln!(out, "- Passed: {}", self.summary.passed);
        let _ = writeln!(out, "- Failed: {}\n", self.summary.failed);

        out.push_str("| Case | Section | Status |\n");
        out.push_str("|------|---------|--------|\n");
        for r in &self.summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(out, "| {} | {} | {} |", r.case_name, r.section, status);
        }

        let failures: Vec<_> = self.summary.results.iter().filter(|r| !r.passed).collect();
        if !failures.is_empty() {
            out.push_str("\n## Failures\n");
            for r in failures {
                let _ = writeln!(out, "\n### {}\n", r.case_name);
                out.push_str("```diff\n");
                out.push_str(r.diff.as_deref().unwrap_or_default());
                out.push_str("```\n");
            }
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::VerificationResult;

    fn report() -> ConformanceReport {
        ConformanceReport {
            title: String::from("portfmt conformance"),
            families: vec![String::from("integers")],
            timestamp: String::from("2026-10-17T00:00:00.000Z"),
            summary: VerificationSummary::from_results(vec![
                VerificationResult {
                    case_name: String::from("pad"),
                    section: String::from("flags"),
                    passed: true,
                    expected: String::from("output: -0005"),
                    actual: String::from("output: -0005"),
                    diff: None,
                },
                VerificationResult {
                    case_name: String::from("hex"),
                    section: String::from("integers"),
                    passed: false,
                    expected: String::from("output: ff"),
                    actual: String::from("output: FF"),
                    diff: Some(String::from("-output: ff\n+output: FF\n")),
                },
            ]),
        }
    }

    #[test]
    fn markdown_lists_cases_and_failures() {
        let md = report().to_markdown();
        assert!(md.starts_with("# portfmt conformance\n"));
        assert!(md.contains("- Failed: 1"));
        assert!(md.contains("| pad | flags | PASS |"));
        assert!(md.contains("| hex | integers | FAIL |"));
        assert!(md.contains("### hex"));
        assert!(md.contains("+output: FF"));
    }

    #[test]
    fn json_round_trips() {
        let json = report().to_json();
        let restored: ConformanceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.summary.total, 2);
        assert_eq!(restored.families, vec!["integers"]);
    }
}
