use crate::checks::utils::{FindingBuilder, build_allowlist, is_allowed, non_empty};
use crate::config::LintConfig;
use crate::model::PolicyModel;
use denylint_policy::LicenseReq;
use denylint_types::{Finding, ids};
use semver::VersionReq;
use serde_json::json;
use std::collections::BTreeSet;

pub fn run(model: &PolicyModel, cfg: &LintConfig, out: &mut Vec<Finding>) {
    let Some(rule) = cfg.rule(ids::CHECK_LICENSES_EXCEPTIONS) else {
        return;
    };
    let Some(licenses) = model.document.licenses.as_ref() else {
        return;
    };
    let allow = build_allowlist(&rule.allow);
    let builder = FindingBuilder {
        check_id: ids::CHECK_LICENSES_EXCEPTIONS,
        rule,
        policy_path: model.path.as_str(),
    };

    let mut seen: BTreeSet<(&str, &str)> = BTreeSet::new();

    for (i, exception) in licenses.exceptions.iter().enumerate() {
        let entry = format!("licenses.exceptions[{i}]");
        let name = non_empty(exception.name.as_ref());
        if name.is_some_and(|n| is_allowed(allow.as_ref(), n)) {
            continue;
        }

        // Entry-level findings point at the first field that carries a span.
        let anchor = exception
            .name
            .as_ref()
            .or(exception.version.as_ref())
            .or(exception.allow.first())
            .map(|s| s.span());

        let Some(name) = name else {
            builder.push(
                out,
                ids::CODE_MISSING_NAME,
                &entry,
                format!("{entry} does not name a package"),
                model.location(anchor.clone()),
                "Add `name = \"<crate>\"` to the exception.",
                json!({ "entry": entry }),
            );
            continue;
        };

        let version = exception.version.as_ref().map(|v| v.get_ref().trim());
        let package = match version {
            Some(v) => format!("{name}@{v}"),
            None => name.to_string(),
        };

        if let (Some(raw), Some(spanned)) = (version, exception.version.as_ref())
            && let Err(err) = VersionReq::parse(raw)
        {
            builder.push(
                out,
                ids::CODE_INVALID_VERSION_REQ,
                &package,
                format!("exception for '{name}' has an invalid version requirement '{raw}': {err}"),
                model.location(Some(spanned.span())),
                "Use a semver requirement such as `0.17` or `=0.17.8`.",
                json!({ "entry": entry, "package": name, "version": raw }),
            );
        }

        if !seen.insert((name, version.unwrap_or(""))) {
            builder.push(
                out,
                ids::CODE_DUPLICATE_EXCEPTION,
                &package,
                format!("'{package}' has more than one entry in licenses.exceptions"),
                model.location(anchor.clone()),
                "Merge the `allow` lists into a single exception.",
                json!({ "entry": entry, "package": name, "version": version }),
            );
        }

        if exception.allow.is_empty() {
            builder.push(
                out,
                ids::CODE_EMPTY_ALLOW,
                &package,
                format!("exception for '{name}' does not allow any license"),
                model.location(anchor.clone()),
                "List the extra licenses the package may use, or remove the exception.",
                json!({ "entry": entry, "package": name }),
            );
        }

        for license in &exception.allow {
            let raw = license.get_ref().as_str();
            let Err(err) = LicenseReq::parse(raw) else {
                continue;
            };
            builder.push(
                out,
                ids::CODE_INVALID_LICENSE_ID,
                &format!("{package}:{raw}"),
                format!(
                    "exception for '{name}' allows '{raw}', which is not a valid SPDX license \
                     identifier: {}",
                    err.kind
                ),
                model.location(Some(license.span())),
                "Use the exact SPDX short identifier.",
                json!({ "entry": entry, "package": name, "license": raw }),
            );
        }
    }
}
