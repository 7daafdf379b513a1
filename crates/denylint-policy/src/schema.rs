//! Known-key tables for the policy file.
//!
//! Deserialization ignores keys it does not model, which is exactly how a typo turns a rule
//! into a no-op. This module walks the spanned TOML tree and reports every key outside the
//! schema at the line the parser saw it on.

use crate::load::line_of;
use toml::Spanned;
use toml::de::{DeTable, DeValue};

/// A key that is not part of the policy schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownKey {
    /// Dotted path of the key, e.g. `bans.multiple-version` or `licenses.clarify[0].nmae`.
    pub path: String,
    /// The key itself.
    pub key: String,
    /// 1-based line of the key.
    pub line: Option<u32>,
}

const TOP_LEVEL: &[&str] = &["licenses", "bans", "sources", "advisories", "graph", "output"];

const LICENSES: &[&str] = &[
    "version",
    "unlicensed",
    "copyleft",
    "allow-osi-fsf-free",
    "default",
    "confidence-threshold",
    "allow",
    "deny",
    "exceptions",
    "clarify",
    "private",
];
const LICENSE_EXCEPTION: &[&str] = &["name", "version", "allow"];
const CLARIFY: &[&str] = &["name", "version", "expression", "license-files"];
const LICENSE_FILE: &[&str] = &["path", "hash"];

const BANS: &[&str] = &[
    "version",
    "multiple-versions",
    "wildcards",
    "highlight",
    "skip",
    "skip-tree",
    "deny",
    "allow",
];
const PACKAGE_SPEC: &[&str] = &["name", "version", "reason"];
const TREE_SKIP: &[&str] = &["name", "version", "depth", "reason"];

const SOURCES: &[&str] = &[
    "unknown-registry",
    "unknown-git",
    "allow-registry",
    "allow-git",
];

/// List keys outside the schema.
///
/// Sections the linter does not model (`advisories`, `graph`, `output`) are accepted as a whole.
/// Text that is not valid TOML yields no unknown keys; [`crate::load_policy`] reports it.
pub fn unknown_keys(text: &str) -> Vec<UnknownKey> {
    let Ok(root) = DeTable::parse(text) else {
        return Vec::new();
    };
    let root = root.get_ref();
    let walker = Walker { text };

    let mut out = Vec::new();
    walker.table(root, "", TOP_LEVEL, &mut out);

    if let Some(licenses) = root.get("licenses").and_then(|v| v.get_ref().as_table()) {
        walker.table(licenses, "licenses", LICENSES, &mut out);
        walker.array(licenses, "licenses", "exceptions", LICENSE_EXCEPTION, &mut out);
        walker.array(licenses, "licenses", "clarify", CLARIFY, &mut out);

        for (i, entry) in entries(licenses, "clarify").iter().enumerate() {
            if let Some(entry) = entry.get_ref().as_table() {
                let prefix = format!("licenses.clarify[{i}]");
                walker.array(entry, &prefix, "license-files", LICENSE_FILE, &mut out);
            }
        }
    }

    if let Some(bans) = root.get("bans").and_then(|v| v.get_ref().as_table()) {
        walker.table(bans, "bans", BANS, &mut out);
        walker.array(bans, "bans", "skip", PACKAGE_SPEC, &mut out);
        walker.array(bans, "bans", "skip-tree", TREE_SKIP, &mut out);
        walker.array(bans, "bans", "deny", PACKAGE_SPEC, &mut out);
        walker.array(bans, "bans", "allow", PACKAGE_SPEC, &mut out);
    }

    if let Some(sources) = root.get("sources").and_then(|v| v.get_ref().as_table()) {
        walker.table(sources, "sources", SOURCES, &mut out);
    }

    out
}

/// Array-valued `field` of `table`; empty when absent or not an array.
fn entries<'t, 'i>(table: &'t DeTable<'i>, field: &str) -> &'t [Spanned<DeValue<'i>>] {
    table
        .get(field)
        .and_then(|v| v.get_ref().as_array())
        .map(|a| &a[..])
        .unwrap_or(&[])
}

struct Walker<'s> {
    text: &'s str,
}

impl Walker<'_> {
    fn table(
        &self,
        table: &DeTable<'_>,
        prefix: &str,
        known: &[&str],
        out: &mut Vec<UnknownKey>,
    ) {
        for (key, _) in table.iter() {
            let name: &str = key.get_ref();
            if known.contains(&name) {
                continue;
            }
            let path = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}.{name}")
            };
            out.push(UnknownKey {
                path,
                key: name.to_string(),
                line: Some(line_of(self.text, &key.span())),
            });
        }
    }

    fn array(
        &self,
        table: &DeTable<'_>,
        prefix: &str,
        field: &str,
        known: &[&str],
        out: &mut Vec<UnknownKey>,
    ) {
        for (i, entry) in entries(table, field).iter().enumerate() {
            if let Some(entry) = entry.get_ref().as_table() {
                self.table(entry, &format!("{prefix}.{field}[{i}]"), known, out);
            }
        }
    }
}
