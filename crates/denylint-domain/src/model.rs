use denylint_policy::{PolicyDocument, PolicyError, UnknownKey, line_of, load_policy, unknown_keys};
use denylint_types::{ConfigPath, Location};
use std::ops::Range;

/// A loaded policy file plus what the checks need to point at source lines.
#[derive(Clone, Debug, Default)]
pub struct PolicyModel {
    pub path: ConfigPath,
    pub document: PolicyDocument,
    pub unknown_keys: Vec<UnknownKey>,
    source: String,
}

impl PolicyModel {
    /// Load a policy from its text. Fails only when the text is not a valid policy file.
    pub fn from_source(path: ConfigPath, source: &str) -> Result<Self, PolicyError> {
        let document = load_policy(source)?;
        Ok(Self {
            path,
            document,
            unknown_keys: unknown_keys(source),
            source: source.to_string(),
        })
    }

    /// A model without source text; locations carry the path only.
    pub fn from_document(path: ConfigPath, document: PolicyDocument) -> Self {
        Self {
            path,
            document,
            unknown_keys: Vec::new(),
            source: String::new(),
        }
    }

    /// Location of a byte span in the policy file.
    pub fn location(&self, span: Option<Range<usize>>) -> Location {
        let line = span
            .filter(|_| !self.source.is_empty())
            .map(|s| line_of(&self.source, &s));
        Location {
            path: self.path.clone(),
            line,
            col: None,
        }
    }

    /// Location of a known line in the policy file.
    pub fn location_at_line(&self, line: Option<u32>) -> Location {
        Location {
            path: self.path.clone(),
            line,
            col: None,
        }
    }

    pub fn licenses_declared(&self) -> usize {
        self.document
            .licenses
            .as_ref()
            .map(|l| l.declared_licenses())
            .unwrap_or(0)
    }

    pub fn clarifications(&self) -> usize {
        self.document
            .licenses
            .as_ref()
            .map(|l| l.clarify.len())
            .unwrap_or(0)
    }

    pub fn skip_entries(&self) -> usize {
        self.document
            .bans
            .as_ref()
            .map(|b| b.skip_entries())
            .unwrap_or(0)
    }
}
