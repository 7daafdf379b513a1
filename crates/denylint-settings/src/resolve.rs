use crate::model::{DenylintConfigV1, FailOnLevel, ProfileName};
use crate::presets;
use anyhow::Context;
use denylint_domain::config::LintConfig;
use globset::Glob;

/// Values supplied on the command line; they win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub fail_on: Option<String>,
    pub max_findings: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: LintConfig,
}

/// Layering: profile preset, then `denylint.toml`, then command-line overrides.
pub fn resolve_config(
    cfg: DenylintConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = match overrides.profile.as_deref() {
        Some(name) => name.parse::<ProfileName>()?,
        None => cfg.profile.unwrap_or_default(),
    };
    let mut effective = presets::preset(profile);

    for (check_id, cc) in &cfg.checks {
        let Some(rule) = effective.rules.get_mut(check_id) else {
            anyhow::bail!("unknown check id in config: {check_id}");
        };
        if let Some(enabled) = cc.enabled {
            rule.enabled = enabled;
        }
        if let Some(level) = cc.severity {
            rule.severity = level.into();
        }
        if !cc.allow.is_empty() {
            for pattern in &cc.allow {
                Glob::new(pattern)
                    .with_context(|| format!("invalid allow glob for {check_id}: {pattern}"))?;
            }
            rule.allow = cc.allow.clone();
        }
    }

    let fail_on = match overrides.fail_on.as_deref() {
        Some(level) => Some(level.parse::<FailOnLevel>()?),
        None => cfg.fail_on,
    };
    if let Some(level) = fail_on {
        effective.fail_on = level.into();
    }
    if let Some(max) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = max as usize;
    }

    Ok(ResolvedConfig { effective })
}
