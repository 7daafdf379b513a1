use serde::{Deserialize, Serialize};
use std::fmt;

/// How the auditing tool reacts when a rule matches: `deny`, `warn`, or `allow`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintLevel {
    Deny,
    Warn,
    Allow,
}

impl fmt::Display for LintLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LintLevel::Deny => "deny",
            LintLevel::Warn => "warn",
            LintLevel::Allow => "allow",
        })
    }
}

/// Whether licenses approved by the OSI and/or FSF are implicitly allowed.
///
/// `yes`/`no`/`neither` are the short forms; the remaining variants are the long forms
/// understood by the auditing tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OsiFsfFree {
    Yes,
    No,
    Neither,
    Both,
    Either,
    OsiOnly,
    FsfOnly,
}

impl fmt::Display for OsiFsfFree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OsiFsfFree::Yes => "yes",
            OsiFsfFree::No => "no",
            OsiFsfFree::Neither => "neither",
            OsiFsfFree::Both => "both",
            OsiFsfFree::Either => "either",
            OsiFsfFree::OsiOnly => "osi-only",
            OsiFsfFree::FsfOnly => "fsf-only",
        })
    }
}
