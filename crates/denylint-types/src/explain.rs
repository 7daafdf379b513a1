//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after policy snippets.
    pub examples: ExamplePair,
}

/// Before and after policy snippets.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Snippet that would trigger a finding.
    pub before: &'static str,
    /// Snippet that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_LICENSES_ALLOW_IDENTIFIERS => Some(explain_allow_identifiers()),
        ids::CHECK_LICENSES_CONFIDENCE_THRESHOLD => Some(explain_confidence_threshold()),
        ids::CHECK_LICENSES_EXCEPTIONS => Some(explain_exceptions()),
        ids::CHECK_LICENSES_CLARIFY => Some(explain_clarify()),
        ids::CHECK_BANS_SKIP => Some(explain_bans_skip()),
        ids::CHECK_SCHEMA_UNKNOWN_KEY => Some(explain_unknown_key()),

        // Codes
        ids::CODE_INVALID_LICENSE_ID => Some(explain_invalid_license_id()),
        ids::CODE_DUPLICATE_LICENSE => Some(explain_duplicate_license()),
        ids::CODE_THRESHOLD_OUT_OF_RANGE => Some(explain_threshold_out_of_range()),
        ids::CODE_MISSING_NAME => Some(explain_missing_name()),
        ids::CODE_INVALID_VERSION_REQ => Some(explain_invalid_version_req()),
        ids::CODE_EMPTY_ALLOW => Some(explain_empty_allow()),
        ids::CODE_DUPLICATE_EXCEPTION => Some(explain_duplicate_exception()),
        ids::CODE_INVALID_EXPRESSION => Some(explain_invalid_expression()),
        ids::CODE_MISSING_LICENSE_FILES => Some(explain_missing_license_files()),
        ids::CODE_INVALID_LICENSE_FILE => Some(explain_invalid_license_file()),
        ids::CODE_DUPLICATE_SKIP => Some(explain_duplicate_skip()),
        ids::CODE_UNKNOWN_KEY => Some(explain_unknown_key()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_LICENSES_ALLOW_IDENTIFIERS,
        ids::CHECK_LICENSES_CONFIDENCE_THRESHOLD,
        ids::CHECK_LICENSES_EXCEPTIONS,
        ids::CHECK_LICENSES_CLARIFY,
        ids::CHECK_BANS_SKIP,
        ids::CHECK_SCHEMA_UNKNOWN_KEY,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_INVALID_LICENSE_ID,
        ids::CODE_DUPLICATE_LICENSE,
        ids::CODE_THRESHOLD_OUT_OF_RANGE,
        ids::CODE_MISSING_NAME,
        ids::CODE_INVALID_VERSION_REQ,
        ids::CODE_EMPTY_ALLOW,
        ids::CODE_DUPLICATE_EXCEPTION,
        ids::CODE_INVALID_EXPRESSION,
        ids::CODE_MISSING_LICENSE_FILES,
        ids::CODE_INVALID_LICENSE_FILE,
        ids::CODE_DUPLICATE_SKIP,
        ids::CODE_UNKNOWN_KEY,
    ]
}

// --- Check-level explanations ---

fn explain_allow_identifiers() -> Explanation {
    Explanation {
        title: "License Allow/Deny Identifiers",
        description: "\
Validates the `allow` and `deny` lists under `[licenses]`.

Every entry must be a syntactically valid SPDX license identifier
(`[A-Za-z0-9.-]+`, optionally `LicenseRef-...`). An entry that is not a
valid identifier can never match a real license, so the policy silently
becomes stricter (or looser) than intended. Duplicates and identifiers that
appear in both lists are flagged as well.",
        remediation: "\
Use the exact SPDX short identifier:
- `Apache-2.0`, not `Apache 2.0` or `Apache-2`
- `MIT`, not `mit license`
- Put each identifier in exactly one of `allow` or `deny`",
        examples: ExamplePair {
            before: r#"[licenses]
allow = ["MIT", "Apache 2.0", "MIT"]"#,
            after: r#"[licenses]
allow = ["MIT", "Apache-2.0"]"#,
        },
    }
}

fn explain_confidence_threshold() -> Explanation {
    Explanation {
        title: "License Confidence Threshold",
        description: "\
Checks that `confidence-threshold` under `[licenses]` lies within [0.0, 1.0].

The threshold is the minimum score a license text must reach before the
auditing tool accepts it as a match. Values outside the unit interval are
either meaningless (negative) or impossible to reach (above 1.0).",
        remediation: "\
Pick a value between 0.0 and 1.0. Values around 0.8 to 0.95 are typical.",
        examples: ExamplePair {
            before: r#"[licenses]
confidence-threshold = 93"#,
            after: r#"[licenses]
confidence-threshold = 0.93"#,
        },
    }
}

fn explain_exceptions() -> Explanation {
    Explanation {
        title: "License Exceptions",
        description: "\
Validates the entries of `[licenses] exceptions`.

Each exception grants extra licenses to one package. It must name the
package, may constrain its version with a semver requirement, and must list
at least one valid license identifier to allow. A package and version may
have only one exception.",
        remediation: "\
Give every exception a `name` and a non-empty `allow` list:

    exceptions = [{ name = \"ring\", allow = [\"OpenSSL\"] }]",
        examples: ExamplePair {
            before: r#"[licenses]
exceptions = [{ allow = [] }]"#,
            after: r#"[licenses]
exceptions = [{ name = "ring", version = "0.17", allow = ["OpenSSL"] }]"#,
        },
    }
}

fn explain_clarify() -> Explanation {
    Explanation {
        title: "License Clarifications",
        description: "\
Validates `[[licenses.clarify]]` records.

A clarification overrides the license of a package whose own declaration is
missing or unparseable. It must name the package, carry a valid SPDX license
expression, and list the license files (relative path plus content hash) the
expression was derived from, so that a change to those files invalidates the
clarification.",
        remediation: "\
Write the expression with upper-case operators and list each license file:

    [[licenses.clarify]]
    name = \"ring\"
    expression = \"MIT AND ISC AND OpenSSL\"
    license-files = [{ path = \"LICENSE\", hash = 0xbd0eed23 }]",
        examples: ExamplePair {
            before: r#"[[licenses.clarify]]
name = "ring"
expression = "MIT and ISC"
license-files = []"#,
            after: r#"[[licenses.clarify]]
name = "ring"
expression = "MIT AND ISC AND OpenSSL"
license-files = [{ path = "LICENSE", hash = 0xbd0eed23 }]"#,
        },
    }
}

fn explain_bans_skip() -> Explanation {
    Explanation {
        title: "Multiple-Versions Skip List",
        description: "\
Validates `skip` and `skip-tree` under `[bans]`.

Skip entries exempt a package from the multiple-versions ban. Each entry must
name the package and, if it pins a version, use a valid semver requirement.
Listing the same (name, version) pair twice usually means one entry is stale.",
        remediation: "\
Keep one entry per package/version and remove stale ones:

    skip = [{ name = \"windows-sys\", version = \"0.48\" }]",
        examples: ExamplePair {
            before: r#"[bans]
skip = [{ name = "syn", version = "1" }, { name = "syn", version = "1" }]"#,
            after: r#"[bans]
skip = [{ name = "syn", version = "1" }]"#,
        },
    }
}

fn explain_unknown_key() -> Explanation {
    Explanation {
        title: "Unknown Policy Key",
        description: "\
A key in the policy file is not part of the known schema.

Unknown keys are ignored by the consuming tool, which usually means a typo
(`multiple-version` instead of `multiple-versions`) and a rule that silently
does not apply.",
        remediation: "\
Fix the spelling or remove the key. Known sections are `[licenses]`,
`[[licenses.clarify]]`, `[bans]`, and `[sources]`.",
        examples: ExamplePair {
            before: r#"[bans]
multiple-version = "deny""#,
            after: r#"[bans]
multiple-versions = "deny""#,
        },
    }
}

// --- Code-level explanations ---

fn explain_invalid_license_id() -> Explanation {
    let mut exp = explain_allow_identifiers();
    exp.title = "Invalid License Identifier";
    exp
}

fn explain_duplicate_license() -> Explanation {
    let mut exp = explain_allow_identifiers();
    exp.title = "Duplicate License Identifier";
    exp
}

fn explain_threshold_out_of_range() -> Explanation {
    let mut exp = explain_confidence_threshold();
    exp.title = "Threshold Out Of Range";
    exp
}

fn explain_missing_name() -> Explanation {
    Explanation {
        title: "Missing Package Name",
        description: "\
An exception, clarification, or skip entry has no `name`, or the name is
empty. Such an entry cannot apply to any package.",
        remediation: "\
Add the crate name exactly as it appears in Cargo.lock.",
        examples: ExamplePair {
            before: r#"[bans]
skip = [{ version = "0.3" }]"#,
            after: r#"[bans]
skip = [{ name = "rand", version = "0.3" }]"#,
        },
    }
}

fn explain_invalid_version_req() -> Explanation {
    Explanation {
        title: "Invalid Version Requirement",
        description: "\
The `version` of an entry is not a valid semver requirement, so the entry
would never match any version of the package.",
        remediation: "\
Use a semver requirement such as `1`, `0.3.2`, `=0.3.2`, or `>=1.0, <2`.",
        examples: ExamplePair {
            before: r#"[bans]
skip = [{ name = "rand", version = "v0.3" }]"#,
            after: r#"[bans]
skip = [{ name = "rand", version = "0.3" }]"#,
        },
    }
}

fn explain_empty_allow() -> Explanation {
    let mut exp = explain_exceptions();
    exp.title = "Exception Allows Nothing";
    exp
}

fn explain_duplicate_exception() -> Explanation {
    let mut exp = explain_exceptions();
    exp.title = "Duplicate Exception";
    exp
}

fn explain_invalid_expression() -> Explanation {
    Explanation {
        title: "Invalid License Expression",
        description: "\
A clarification's `expression` is not a valid SPDX license expression.

Expressions combine identifiers with upper-case `AND`, `OR`, and `WITH`,
and may group with parentheses. Lower-case operators, unbalanced
parentheses, and identifiers with spaces are rejected.",
        remediation: "\
Rewrite the expression with valid identifiers and upper-case operators:

    expression = \"(MIT OR Apache-2.0) AND Unicode-3.0\"",
        examples: ExamplePair {
            before: r#"expression = "MIT or (Apache-2.0""#,
            after: r#"expression = "MIT OR Apache-2.0""#,
        },
    }
}

fn explain_missing_license_files() -> Explanation {
    let mut exp = explain_clarify();
    exp.title = "Clarification Without License Files";
    exp
}

fn explain_invalid_license_file() -> Explanation {
    Explanation {
        title: "Invalid License File Reference",
        description: "\
A `license-files` entry has an empty or absolute path, a path escaping the
package root, or a hash that does not fit in 32 bits.",
        remediation: "\
Use a path relative to the package root and the 32-bit hash reported by the
auditing tool:

    license-files = [{ path = \"LICENSE\", hash = 0xbd0eed23 }]",
        examples: ExamplePair {
            before: r#"license-files = [{ path = "/src/ring/LICENSE", hash = -1 }]"#,
            after: r#"license-files = [{ path = "LICENSE", hash = 0xbd0eed23 }]"#,
        },
    }
}

fn explain_duplicate_skip() -> Explanation {
    let mut exp = explain_bans_skip();
    exp.title = "Duplicate Skip Entry";
    exp
}
