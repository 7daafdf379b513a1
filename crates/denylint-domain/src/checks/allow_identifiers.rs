use crate::checks::utils::{FindingBuilder, build_allowlist, is_allowed};
use crate::config::LintConfig;
use crate::model::PolicyModel;
use denylint_policy::LicenseReq;
use denylint_types::{Finding, ids};
use serde_json::json;
use std::collections::BTreeMap;

pub fn run(model: &PolicyModel, cfg: &LintConfig, out: &mut Vec<Finding>) {
    let Some(rule) = cfg.rule(ids::CHECK_LICENSES_ALLOW_IDENTIFIERS) else {
        return;
    };
    let Some(licenses) = model.document.licenses.as_ref() else {
        return;
    };
    let allow = build_allowlist(&rule.allow);
    let builder = FindingBuilder {
        check_id: ids::CHECK_LICENSES_ALLOW_IDENTIFIERS,
        rule,
        policy_path: model.path.as_str(),
    };

    // canonical requirement -> list it was first seen in
    let mut seen: BTreeMap<String, &'static str> = BTreeMap::new();

    for (list, entries) in [("allow", &licenses.allow), ("deny", &licenses.deny)] {
        for entry in entries {
            let raw = entry.get_ref().as_str();
            if is_allowed(allow.as_ref(), raw.trim()) {
                continue;
            }
            let location = model.location(Some(entry.span()));

            let req = match LicenseReq::parse(raw) {
                Ok(req) => req,
                Err(err) => {
                    builder.push(
                        out,
                        ids::CODE_INVALID_LICENSE_ID,
                        &format!("{list}:{raw}"),
                        format!(
                            "licenses.{list} entry '{raw}' is not a valid SPDX license identifier: {}",
                            err.kind
                        ),
                        location,
                        "Use the exact SPDX short identifier, e.g. `Apache-2.0` or \
                         `Apache-2.0 WITH LLVM-exception`.",
                        json!({ "list": list, "license": raw, "offset": err.offset }),
                    );
                    continue;
                }
            };

            let canonical = req.to_string();
            let subject = format!("{list}:{canonical}");
            match seen.get(&canonical).copied() {
                None => {
                    seen.insert(canonical, list);
                }
                Some(first) if first == list => builder.push(
                    out,
                    ids::CODE_DUPLICATE_LICENSE,
                    &subject,
                    format!("license '{canonical}' is listed more than once in licenses.{list}"),
                    location,
                    "Remove the duplicate entry.",
                    json!({ "list": list, "license": canonical }),
                ),
                Some(first) => builder.push(
                    out,
                    ids::CODE_DUPLICATE_LICENSE,
                    &subject,
                    format!(
                        "license '{canonical}' is listed in both licenses.{first} and licenses.{list}"
                    ),
                    location,
                    "Keep each license in exactly one of `allow` or `deny`.",
                    json!({ "list": list, "first_list": first, "license": canonical }),
                ),
            }
        }
    }
}
