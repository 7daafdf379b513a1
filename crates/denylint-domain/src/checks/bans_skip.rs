use crate::checks::utils::{FindingBuilder, build_allowlist, is_allowed, non_empty};
use crate::model::PolicyModel;
use crate::config::LintConfig;
use denylint_policy::Spanned;
use denylint_types::{Finding, ids};
use semver::VersionReq;
use serde_json::json;
use std::collections::BTreeSet;

struct SkipEntry<'a> {
    list: &'static str,
    index: usize,
    name: Option<&'a Spanned<String>>,
    version: Option<&'a Spanned<String>>,
}

pub fn run(model: &PolicyModel, cfg: &LintConfig, out: &mut Vec<Finding>) {
    let Some(rule) = cfg.rule(ids::CHECK_BANS_SKIP) else {
        return;
    };
    let Some(bans) = model.document.bans.as_ref() else {
        return;
    };
    let allow = build_allowlist(&rule.allow);
    let builder = FindingBuilder {
        check_id: ids::CHECK_BANS_SKIP,
        rule,
        policy_path: model.path.as_str(),
    };

    let skip = bans.skip.iter().enumerate().map(|(index, s)| SkipEntry {
        list: "skip",
        index,
        name: s.name.as_ref(),
        version: s.version.as_ref(),
    });
    let skip_tree = bans.skip_tree.iter().enumerate().map(|(index, s)| SkipEntry {
        list: "skip-tree",
        index,
        name: s.name.as_ref(),
        version: s.version.as_ref(),
    });

    // (list, name, version) already seen; duplicates only count within one list.
    let mut seen: BTreeSet<(&str, &str, &str)> = BTreeSet::new();

    for entry in skip.chain(skip_tree) {
        let label = format!("bans.{}[{}]", entry.list, entry.index);
        let name = non_empty(entry.name);
        if name.is_some_and(|n| is_allowed(allow.as_ref(), n)) {
            continue;
        }
        let anchor = entry.name.or(entry.version).map(|s| s.span());

        let Some(name) = name else {
            builder.push(
                out,
                ids::CODE_MISSING_NAME,
                &label,
                format!("{label} does not name a package"),
                model.location(anchor.clone()),
                "Add `name = \"<crate>\"` to the entry.",
                json!({ "entry": label }),
            );
            continue;
        };

        let version = entry.version.map(|v| v.get_ref().trim());
        let shown = match version {
            Some(v) => format!("{name}@{v}"),
            None => name.to_string(),
        };
        let subject = format!("{}:{shown}", entry.list);
        if let (Some(raw), Some(spanned)) = (version, entry.version)
            && let Err(err) = VersionReq::parse(raw)
        {
            builder.push(
                out,
                ids::CODE_INVALID_VERSION_REQ,
                &subject,
                format!("{label} ('{name}') has an invalid version requirement '{raw}': {err}"),
                model.location(Some(spanned.span())),
                "Use a semver requirement such as `1`, `0.3.2`, or `=0.3.2`.",
                json!({ "entry": label, "package": name, "version": raw }),
            );
        }

        if !seen.insert((entry.list, name, version.unwrap_or(""))) {
            builder.push(
                out,
                ids::CODE_DUPLICATE_SKIP,
                &subject,
                format!("'{shown}' appears more than once in bans.{}", entry.list),
                model.location(anchor.clone()),
                "Remove the duplicate entry.",
                json!({ "entry": label, "package": name, "version": version }),
            );
        }
    }
}
