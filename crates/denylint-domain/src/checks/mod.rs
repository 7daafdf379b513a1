use crate::model::PolicyModel;
use crate::config::LintConfig;
use denylint_types::Finding;

mod allow_identifiers;
mod bans_skip;
mod clarify;
mod confidence_threshold;
mod exceptions;
mod unknown_keys;
mod utils;


pub fn run_all(model: &PolicyModel, cfg: &LintConfig, out: &mut Vec<Finding>) {
    allow_identifiers::run(model, cfg, out);
    confidence_threshold::run(model, cfg, out);
    exceptions::run(model, cfg, out);
    clarify::run(model, cfg, out);
    bans_skip::run(model, cfg, out);
    unknown_keys::run(model, cfg, out);
}
