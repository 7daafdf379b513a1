//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_LICENSES_ALLOW_IDENTIFIERS: &str = "licenses.allow_identifiers";
pub const CHECK_LICENSES_CONFIDENCE_THRESHOLD: &str = "licenses.confidence_threshold";
pub const CHECK_LICENSES_EXCEPTIONS: &str = "licenses.exceptions";
pub const CHECK_LICENSES_CLARIFY: &str = "licenses.clarify";
pub const CHECK_BANS_SKIP: &str = "bans.skip";
pub const CHECK_SCHEMA_UNKNOWN_KEY: &str = "schema.unknown_key";

// Codes shared by several checks
pub const CODE_MISSING_NAME: &str = "missing_name";
pub const CODE_INVALID_LICENSE_ID: &str = "invalid_license_id";
pub const CODE_INVALID_VERSION_REQ: &str = "invalid_version_req";

// Codes: licenses.allow_identifiers
pub const CODE_DUPLICATE_LICENSE: &str = "duplicate_license";

// Codes: licenses.confidence_threshold
pub const CODE_THRESHOLD_OUT_OF_RANGE: &str = "threshold_out_of_range";

// Codes: licenses.exceptions
pub const CODE_EMPTY_ALLOW: &str = "empty_allow";
pub const CODE_DUPLICATE_EXCEPTION: &str = "duplicate_exception";

// Codes: licenses.clarify
pub const CODE_INVALID_EXPRESSION: &str = "invalid_expression";
pub const CODE_MISSING_LICENSE_FILES: &str = "missing_license_files";
pub const CODE_INVALID_LICENSE_FILE: &str = "invalid_license_file";

// Codes: bans.skip
pub const CODE_DUPLICATE_SKIP: &str = "duplicate_skip";

// Codes: schema.unknown_key
pub const CODE_UNKNOWN_KEY: &str = "unknown_key";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
pub const CODE_POLICY_PARSE: &str = "policy_parse";
