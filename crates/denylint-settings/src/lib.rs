//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{CheckConfig, DenylintConfigV1, FailOnLevel, ProfileName, SeverityLevel};
pub use resolve::{Overrides, ResolvedConfig};

/// Schema identifier accepted in the optional `schema` key of `denylint.toml`.
pub const SCHEMA_CONFIG_V1: &str = "denylint.config.v1";

/// Parse `denylint.toml` (or equivalent) into a typed model.
///
/// Empty input yields the default config.
pub fn parse_config_toml(input: &str) -> anyhow::Result<DenylintConfigV1> {
    if input.trim().is_empty() {
        return Ok(DenylintConfigV1::default());
    }
    let cfg: DenylintConfigV1 = toml::from_str(input)?;
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profile + overrides + per-check config).
pub fn resolve_config(
    cfg: DenylintConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// JSON Schema for `denylint.toml`.
pub fn config_schema() -> schemars::Schema {
    schemars::schema_for!(DenylintConfigV1)
}
