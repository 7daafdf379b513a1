use crate::fingerprint::fingerprint_for;
use crate::config::CheckRule;
use denylint_policy::Spanned;
use denylint_types::{Finding, Location};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde_json::Value;

pub fn build_allowlist(allow: &[String]) -> Option<GlobSet> {
    if allow.is_empty() {
        return None;
    }

    let mut builder = GlobSetBuilder::new();
    // Patterns are validated during config resolution; anything invalid here is skipped.
    for glob in allow.iter().filter_map(|p| Glob::new(p).ok()) {
        builder.add(glob);
    }
    builder.build().ok()
}

pub fn is_allowed(allow: Option<&GlobSet>, value: &str) -> bool {
    allow.map(|set| set.is_match(value)).unwrap_or(false)
}

/// Trimmed, non-empty value of an optional spanned string.
pub fn non_empty(value: Option<&Spanned<String>>) -> Option<&str> {
    value
        .map(|v| v.get_ref().trim())
        .filter(|v| !v.is_empty())
}

/// Everything a check decides about one finding; the shared fields are filled in by
/// [`FindingBuilder::push`].
pub struct FindingBuilder<'a> {
    pub check_id: &'static str,
    pub rule: &'a CheckRule,
    pub policy_path: &'a str,
}

impl FindingBuilder<'_> {
    #[allow(clippy::too_many_arguments)]
    pub fn push(
        &self,
        out: &mut Vec<Finding>,
        code: &'static str,
        subject: &str,
        message: String,
        location: Location,
        help: &str,
        data: Value,
    ) {
        out.push(Finding {
            severity: self.rule.severity,
            check_id: self.check_id.to_string(),
            code: code.to_string(),
            message,
            location: Some(location),
            help: Some(help.to_string()),
            url: None,
            fingerprint: Some(fingerprint_for(
                self.check_id,
                code,
                self.policy_path,
                subject,
            )),
            data,
        });
    }
}
