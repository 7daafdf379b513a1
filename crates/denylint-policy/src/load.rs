use crate::model::PolicyDocument;
use std::ops::Range;

/// A policy file that could not be turned into a [`PolicyDocument`].
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// TOML syntax error or a value of the wrong type, with the line it was found on.
    #[error("invalid policy file at line {line}: {message}")]
    Parse { line: u32, message: String },

    /// Same as `Parse`, for errors the TOML parser could not attribute to a position.
    #[error("invalid policy file: {message}")]
    Syntax { message: String },
}

impl PolicyError {
    pub fn line(&self) -> Option<u32> {
        match self {
            PolicyError::Parse { line, .. } => Some(*line),
            PolicyError::Syntax { .. } => None,
        }
    }
}

/// Parse the text of a policy file into a typed model.
///
/// An empty (or whitespace-only) file is a valid, empty policy.
pub fn load_policy(text: &str) -> Result<PolicyDocument, PolicyError> {
    if text.trim().is_empty() {
        return Ok(PolicyDocument::default());
    }
    toml::from_str(text).map_err(|err| {
        let message = err.message().trim().to_string();
        match err.span() {
            Some(span) => PolicyError::Parse {
                line: line_of(text, &span),
                message,
            },
            None => PolicyError::Syntax { message },
        }
    })
}

/// 1-based line number of the start of `span` in `source`.
pub fn line_of(source: &str, span: &Range<usize>) -> u32 {
    let end = span.start.min(source.len());
    let newlines = source.as_bytes()[..end]
        .iter()
        .filter(|&&b| b == b'\n')
        .count();
    (newlines + 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LintLevel, OsiFsfFree};

    const FULL_POLICY: &str = r#"[licenses]
unlicensed = "deny"
copyleft = "deny"
allow-osi-fsf-free = "neither"
default = "deny"
confidence-threshold = 0.93
allow = [
    "Apache-2.0",
    "MIT",
    "BSD-3-Clause",
]
exceptions = [
    { name = "webpki-roots", version = "0.25", allow = ["MPL-2.0"] },
]

[[licenses.clarify]]
name = "ring"
expression = "MIT AND ISC AND OpenSSL"
license-files = [
    { path = "LICENSE", hash = 0xbd0eed23 },
]

[bans]
multiple-versions = "deny"
wildcards = "deny"
skip = [
    { name = "syn", version = "1" },
    { name = "windows-sys" },
]
skip-tree = []

[sources]
unknown-registry = "deny"
unknown-git = "deny"
"#;

    #[test]
    fn loads_every_section() {
        let doc = load_policy(FULL_POLICY).expect("policy should load");

        let licenses = doc.licenses.as_ref().expect("licenses section");
        assert_eq!(licenses.unlicensed, Some(LintLevel::Deny));
        assert_eq!(licenses.copyleft, Some(LintLevel::Deny));
        assert_eq!(licenses.allow_osi_fsf_free, Some(OsiFsfFree::Neither));
        assert_eq!(licenses.default, Some(LintLevel::Deny));
        let threshold = licenses
            .confidence_threshold
            .as_ref()
            .expect("threshold present");
        assert!((threshold.get_ref() - 0.93).abs() < f64::EPSILON);

        let allow: Vec<&str> = licenses.allow.iter().map(|s| s.get_ref().as_str()).collect();
        assert_eq!(allow, vec!["Apache-2.0", "MIT", "BSD-3-Clause"]);

        assert_eq!(licenses.exceptions.len(), 1);
        let ex = &licenses.exceptions[0];
        assert_eq!(ex.name.as_ref().map(|n| n.get_ref().as_str()), Some("webpki-roots"));
        assert_eq!(ex.version.as_ref().map(|v| v.get_ref().as_str()), Some("0.25"));

        assert_eq!(licenses.clarify.len(), 1);
        let clarify = &licenses.clarify[0];
        assert_eq!(clarify.license_files.len(), 1);
        assert_eq!(*clarify.license_files[0].hash.get_ref(), 0xbd0eed23);

        let bans = doc.bans.as_ref().expect("bans section");
        assert_eq!(bans.multiple_versions, Some(LintLevel::Deny));
        assert_eq!(bans.wildcards, Some(LintLevel::Deny));
        assert_eq!(bans.skip.len(), 2);
        assert!(bans.skip[1].version.is_none());
        assert!(bans.skip_tree.is_empty());

        let sources = doc.sources.as_ref().expect("sources section");
        assert_eq!(sources.unknown_registry, Some(LintLevel::Deny));
        assert_eq!(sources.unknown_git, Some(LintLevel::Deny));

        assert_eq!(doc.section_names(), vec!["licenses", "bans", "sources"]);
    }

    #[test]
    fn spans_map_to_source_lines() {
        let doc = load_policy(FULL_POLICY).expect("policy should load");
        let licenses = doc.licenses.expect("licenses section");
        assert_eq!(line_of(FULL_POLICY, &licenses.allow[1].span()), 9);

        let clarify_name = licenses.clarify[0].name.as_ref().expect("name");
        assert_eq!(line_of(FULL_POLICY, &clarify_name.span()), 17);
    }

    #[test]
    fn empty_text_is_an_empty_policy() {
        let doc = load_policy("  \n").expect("empty policy");
        assert_eq!(doc, PolicyDocument::default());
        assert!(doc.section_names().is_empty());
    }

    #[test]
    fn missing_names_are_not_load_errors() {
        let doc = load_policy("[bans]\nskip = [{ version = \"0.3\" }]\n").expect("loads");
        let bans = doc.bans.expect("bans");
        assert!(bans.skip[0].name.is_none());
    }

    #[test]
    fn wrong_level_reports_line() {
        let err = load_policy("[bans]\nwildcards = \"sometimes\"\n").expect_err("invalid level");
        assert_eq!(err.line(), Some(2));
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = load_policy("[licenses\nallow = []\n").expect_err("syntax error");
        assert!(matches!(err, PolicyError::Parse { .. }), "{err:?}");
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn line_of_clamps_past_end() {
        let source = "a\nb\nc";
        assert_eq!(line_of(source, &(0..1)), 1);
        assert_eq!(line_of(source, &(2..3)), 2);
        assert_eq!(line_of(source, &(1000..1001)), 3);
    }
}
