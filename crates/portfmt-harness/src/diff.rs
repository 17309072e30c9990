//! Diff rendering for fixture comparison.

use std::fmt::Write;

/// Render a line diff between expected and actual observations.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        let e = expected_lines.get(i);
        let a = actual_lines.get(i);
        if e == a {
            continue;
        }
        let _ = writeln!(out, "@@ line {} @@", i + 1);
        if let Some(e) = e {
            let _ = writeln!(out, "-{e}");
        }
        if let Some(a) = a {
            let _ = writeln!(out, "+{a}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs() {
        assert_eq!(render_diff("a\nb", "a\nb"), "[identical]");
    }

    #[test]
    fn changed_line_is_reported() {
        let diff = render_diff("output: 42\nlength: 2", "output: 43\nlength: 2");
        assert_eq!(
            diff,
            "--- expected\n+++ actual\n@@ line 1 @@\n-output: 42\n+output: 43\n"
        );
    }

    #[test]
    fn extra_actual_line_is_reported() {
        let diff = render_diff("error: ArgumentsExhausted", "output: x\nlength: 1");
        assert!(diff.contains("-error: ArgumentsExhausted"));
        assert!(diff.contains("@@ line 2 @@\n+length: 1"));
    }
}
