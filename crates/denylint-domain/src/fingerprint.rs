use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - policy path
/// - subject (package name, license id, or key path)
pub fn fingerprint_for(check_id: &str, code: &str, policy_path: &str, subject: &str) -> String {
    let canonical = [check_id, code, policy_path, subject].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
