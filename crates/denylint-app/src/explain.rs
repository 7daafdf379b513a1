//! The `explain` use case: look up check/code documentation.

use denylint_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; includes available check_ids and codes.
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

/// Look up an explanation for a check_id or code.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier.trim()) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\nRemediation\n-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\nExamples\n--------\n\n");
    push_snippet(&mut out, "Flagged:", exp.examples.before);
    out.push('\n');
    push_snippet(&mut out, "Accepted:", exp.examples.after);

    out
}

fn push_snippet(out: &mut String, label: &str, body: &str) {
    out.push_str(label);
    out.push_str("\n```toml\n");
    out.push_str(body.trim_end());
    out.push_str("\n```\n");
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(
    identifier: &str,
    check_ids: &[&'static str],
    codes: &[&'static str],
) -> String {
    let mut out = format!("Unknown check_id or code: {identifier}\n\nAvailable check_ids:\n");
    for id in check_ids {
        out.push_str(&format!("  - {id}\n"));
    }
    out.push_str("\nAvailable codes:\n");
    for code in codes {
        out.push_str(&format!("  - {code}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use denylint_types::ids;

    #[test]
    fn explain_known_check_id_and_code() {
        assert!(matches!(
            run_explain(ids::CHECK_LICENSES_CLARIFY),
            ExplainOutput::Found(_)
        ));
        assert!(matches!(
            run_explain(ids::CODE_DUPLICATE_SKIP),
            ExplainOutput::Found(_)
        ));
        assert!(matches!(
            run_explain(" bans.skip \n"),
            ExplainOutput::Found(_)
        ));
    }

    #[test]
    fn explain_unknown_lists_alternatives() {
        match run_explain("licenses.no_such_check") {
            ExplainOutput::NotFound {
                identifier,
                available_check_ids,
                available_codes,
            } => {
                assert_eq!(identifier, "licenses.no_such_check");
                assert!(available_check_ids.contains(&ids::CHECK_BANS_SKIP));
                assert!(available_codes.contains(&ids::CODE_UNKNOWN_KEY));
            }
            ExplainOutput::Found(_) => panic!("expected NotFound"),
        }
    }

    #[test]
    fn format_explanation_output() {
        let ExplainOutput::Found(exp) = run_explain(ids::CHECK_LICENSES_CONFIDENCE_THRESHOLD)
        else {
            panic!("expected Found");
        };
        let formatted = format_explanation(&exp);
        assert!(formatted.starts_with(exp.title));
        assert!(formatted.contains("Remediation\n-----------\n"));
        assert!(formatted.contains("Flagged:\n```toml\n"));
        assert!(formatted.contains("Accepted:\n```toml\n"));
        assert!(formatted.ends_with("```\n"));
    }

    #[test]
    fn format_not_found_output() {
        let formatted = format_not_found("missing", &["check.one", "check.two"], &["code.one"]);
        assert!(formatted.starts_with("Unknown check_id or code: missing\n"));
        assert!(formatted.contains("Available check_ids:\n  - check.one\n  - check.two\n"));
        assert!(formatted.contains("Available codes:\n  - code.one\n"));
    }
}
