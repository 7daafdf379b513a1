use crate::level::{LintLevel, OsiFsfFree};
use serde::Deserialize;
use toml::Spanned;

/// A dependency-audit policy file.
///
/// The model is permissive about *content* (names may be missing, identifiers may be
/// malformed) so that those problems surface as findings instead of parse failures. It is
/// strict about *types*: a string where a list is expected is a load error.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyDocument {
    #[serde(default)]
    pub licenses: Option<LicensesSection>,
    #[serde(default)]
    pub bans: Option<BansSection>,
    #[serde(default)]
    pub sources: Option<SourcesSection>,
}

impl PolicyDocument {
    /// Names of the modelled sections present in the file, in schema order.
    pub fn section_names(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.licenses.is_some() {
            out.push("licenses");
        }
        if self.bans.is_some() {
            out.push("bans");
        }
        if self.sources.is_some() {
            out.push("sources");
        }
        out
    }
}

/// `[licenses]`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LicensesSection {
    #[serde(default)]
    pub unlicensed: Option<LintLevel>,
    #[serde(default)]
    pub copyleft: Option<LintLevel>,
    #[serde(default)]
    pub allow_osi_fsf_free: Option<OsiFsfFree>,
    #[serde(default)]
    pub default: Option<LintLevel>,
    #[serde(default)]
    pub confidence_threshold: Option<Spanned<f64>>,

    /// Ordered list of allowed license identifiers.
    #[serde(default)]
    pub allow: Vec<Spanned<String>>,
    /// Ordered list of explicitly denied license identifiers.
    #[serde(default)]
    pub deny: Vec<Spanned<String>>,

    #[serde(default)]
    pub exceptions: Vec<LicenseException>,
    #[serde(default)]
    pub clarify: Vec<Clarification>,
}

/// Extra licenses granted to one package.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LicenseException {
    #[serde(default)]
    pub name: Option<Spanned<String>>,
    #[serde(default)]
    pub version: Option<Spanned<String>>,
    #[serde(default)]
    pub allow: Vec<Spanned<String>>,
}

/// `[[licenses.clarify]]`: an explicit license expression for one package.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Clarification {
    #[serde(default)]
    pub name: Option<Spanned<String>>,
    #[serde(default)]
    pub version: Option<Spanned<String>>,
    #[serde(default)]
    pub expression: Option<Spanned<String>>,
    #[serde(default)]
    pub license_files: Vec<LicenseFile>,
}

/// A license file the clarification was derived from, identified by content hash.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LicenseFile {
    pub path: Spanned<String>,
    pub hash: Spanned<i64>,
}

/// `[bans]`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BansSection {
    #[serde(default)]
    pub multiple_versions: Option<LintLevel>,
    #[serde(default)]
    pub wildcards: Option<LintLevel>,
    #[serde(default)]
    pub skip: Vec<PackageSpec>,
    #[serde(default)]
    pub skip_tree: Vec<TreeSkip>,
}

/// A package name with an optional version requirement.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PackageSpec {
    #[serde(default)]
    pub name: Option<Spanned<String>>,
    #[serde(default)]
    pub version: Option<Spanned<String>>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// A skip-tree root: the package and its transitive dependencies up to `depth`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TreeSkip {
    #[serde(default)]
    pub name: Option<Spanned<String>>,
    #[serde(default)]
    pub version: Option<Spanned<String>>,
    #[serde(default)]
    pub depth: Option<u32>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// `[sources]`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourcesSection {
    #[serde(default)]
    pub unknown_registry: Option<LintLevel>,
    #[serde(default)]
    pub unknown_git: Option<LintLevel>,
    #[serde(default)]
    pub allow_registry: Vec<String>,
    #[serde(default)]
    pub allow_git: Vec<String>,
}

impl LicensesSection {
    /// Number of license identifiers declared in `allow` and `deny`.
    pub fn declared_licenses(&self) -> usize {
        self.allow.len() + self.deny.len()
    }
}

impl BansSection {
    /// Number of entries exempted from the multiple-versions rule.
    pub fn skip_entries(&self) -> usize {
        self.skip.len() + self.skip_tree.len()
    }
}
