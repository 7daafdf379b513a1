use crate::checks::utils::{FindingBuilder, build_allowlist, is_allowed, non_empty};
use crate::model::PolicyModel;
use crate::config::LintConfig;
use denylint_policy::{LicenseExpr, LicenseFile};
use denylint_types::{Finding, ids};
use semver::VersionReq;
use serde_json::json;

pub fn run(model: &PolicyModel, cfg: &LintConfig, out: &mut Vec<Finding>) {
    let Some(rule) = cfg.rule(ids::CHECK_LICENSES_CLARIFY) else {
        return;
    };
    let Some(licenses) = model.document.licenses.as_ref() else {
        return;
    };
    let allow = build_allowlist(&rule.allow);
    let builder = FindingBuilder {
        check_id: ids::CHECK_LICENSES_CLARIFY,
        rule,
        policy_path: model.path.as_str(),
    };

    for (i, clarify) in licenses.clarify.iter().enumerate() {
        let entry = format!("licenses.clarify[{i}]");
        let name = non_empty(clarify.name.as_ref());
        if name.is_some_and(|n| is_allowed(allow.as_ref(), n)) {
            continue;
        }
        let subject = name.unwrap_or(&entry);
        let label = name.map(|n| format!("'{n}'")).unwrap_or_else(|| entry.clone());
        let anchor = clarify
            .name
            .as_ref()
            .or(clarify.expression.as_ref())
            .or(clarify.version.as_ref())
            .map(|s| s.span());

        if name.is_none() {
            builder.push(
                out,
                ids::CODE_MISSING_NAME,
                subject,
                format!("{entry} does not name a package"),
                model.location(anchor.clone()),
                "Add `name = \"<crate>\"` to the clarification.",
                json!({ "entry": entry }),
            );
        }

        if let Some(version) = clarify.version.as_ref()
            && let Err(err) = VersionReq::parse(version.get_ref())
        {
            builder.push(
                out,
                ids::CODE_INVALID_VERSION_REQ,
                subject,
                format!(
                    "clarification for {label} has an invalid version requirement '{}': {err}",
                    version.get_ref()
                ),
                model.location(Some(version.span())),
                "Use a semver requirement such as `0.17` or `=0.17.8`.",
                json!({ "entry": entry, "version": version.get_ref() }),
            );
        }

        match clarify.expression.as_ref() {
            None => builder.push(
                out,
                ids::CODE_INVALID_EXPRESSION,
                subject,
                format!("clarification for {label} has no license expression"),
                model.location(anchor.clone()),
                "Add `expression = \"<SPDX expression>\"`.",
                json!({ "entry": entry }),
            ),
            Some(expression) => {
                if let Err(err) = LicenseExpr::parse(expression.get_ref()) {
                    builder.push(
                        out,
                        ids::CODE_INVALID_EXPRESSION,
                        subject,
                        format!(
                            "clarification for {label} has an invalid license expression '{}': {err}",
                            expression.get_ref()
                        ),
                        model.location(Some(expression.span())),
                        "Use SPDX identifiers joined by upper-case AND, OR, and WITH.",
                        json!({
                            "entry": entry,
                            "expression": expression.get_ref(),
                            "offset": err.offset,
                        }),
                    );
                }
            }
        }

        if clarify.license_files.is_empty() {
            builder.push(
                out,
                ids::CODE_MISSING_LICENSE_FILES,
                subject,
                format!("clarification for {label} lists no license files"),
                model.location(anchor.clone()),
                "List the files the expression was derived from in `license-files`.",
                json!({ "entry": entry }),
            );
        }

        for file in &clarify.license_files {
            let Some(problem) = license_file_problem(file) else {
                continue;
            };
            builder.push(
                out,
                ids::CODE_INVALID_LICENSE_FILE,
                subject,
                format!(
                    "clarification for {label} has an invalid license file '{}': {problem}",
                    file.path.get_ref()
                ),
                model.location(Some(file.path.span())),
                "Use a path relative to the package root and a 32-bit content hash.",
                json!({
                    "entry": entry,
                    "path": file.path.get_ref(),
                    "hash": file.hash.get_ref(),
                }),
            );
        }
    }
}

fn license_file_problem(file: &LicenseFile) -> Option<&'static str> {
    let path = file.path.get_ref().trim();
    if path.is_empty() {
        return Some("path is empty");
    }
    if is_absolute(path) {
        return Some("path is absolute");
    }
    if path.split(['/', '\\']).any(|segment| segment == "..") {
        return Some("path escapes the package root");
    }
    if u32::try_from(*file.hash.get_ref()).is_err() {
        return Some("hash does not fit in 32 bits");
    }
    None
}

fn is_absolute(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with('\\') {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
