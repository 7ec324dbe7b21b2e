//! Marketplace catalog types and pure validation rules — no I/O, no async.
//!
//! Filesystem-dependent checks (plugin directories, plugin.json consistency,
//! command.md frontmatter) live in `commands::validate`; everything here
//! takes data in and returns violations out. Violations are collected, never
//! short-circuited, so one run reports every problem in the catalog.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Marketplace and plugin names must be kebab-case.
pub static KEBAB_CASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern — cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex")
});

/// Strict three-part versions only; pre-release and build metadata are not
/// accepted in the catalog.
pub static SEMVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\d+\.\d+\.\d+$").expect("valid regex")
});

/// Link fields must be absolute http(s) URLs.
pub static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^https?://.+").expect("valid regex")
});

/// Frontmatter block: `---` fence, YAML body, closing `---`, at file start.
static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---").expect("valid regex")
});

// ── Catalog types ─────────────────────────────────────────────────────────────

/// Top-level `.claude-plugin/marketplace.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceManifest {
    pub name: String,
    pub owner: MarketplaceOwner,
    pub metadata: MarketplaceMetadata,
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
}

/// Owner section of the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceOwner {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Metadata section of the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceMetadata {
    pub description: String,
    pub version: String,
    #[serde(rename = "pluginRoot", default)]
    pub plugin_root: Option<String>,
    #[serde(rename = "totalPlugins", default)]
    pub total_plugins: Option<usize>,
    #[serde(default)]
    pub homepage: Option<String>,
}

/// One catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginEntry {
    pub name: String,
    pub source: String,
    pub description: String,
    pub version: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub author: Option<PluginAuthor>,
}

/// Author block of a catalog entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginAuthor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Per-plugin `.claude-plugin/plugin.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl MarketplaceManifest {
    /// Directory holding locally sourced plugins, relative to the
    /// marketplace root.
    #[must_use]
    pub fn plugin_root(&self) -> &str {
        self.metadata.plugin_root.as_deref().unwrap_or("plugins")
    }
}

impl PluginEntry {
    /// Relative path of a local `./`-prefixed source. Remote sources return
    /// `None` and are exempt from on-disk checks.
    #[must_use]
    pub fn local_source(&self) -> Option<&str> {
        if self.source.starts_with("./") {
            Some(&self.source)
        } else {
            None
        }
    }
}

// ── Pure validation ───────────────────────────────────────────────────────────

/// Validate catalog-level rules plus every entry's schema rules.
///
/// Returns all violations; an empty vector means the catalog passes every
/// data-level check (on-disk checks are separate).
#[must_use]
pub fn validate_manifest(manifest: &MarketplaceManifest) -> Vec<String> {
    let mut violations = Vec::new();

    if !KEBAB_CASE_RE.is_match(&manifest.name) {
        violations.push(format!(
            "marketplace name '{}' must be kebab-case",
            manifest.name
        ));
    }
    if manifest.owner.name.is_empty() {
        violations.push("owner.name must not be empty".to_string());
    }
    if manifest.metadata.description.is_empty() {
        violations.push("metadata.description must not be empty".to_string());
    }
    if !SEMVER_RE.is_match(&manifest.metadata.version) {
        violations.push(format!(
            "metadata.version '{}' must be MAJOR.MINOR.PATCH",
            manifest.metadata.version
        ));
    }
    if manifest.plugins.is_empty() {
        violations.push("plugins array must not be empty".to_string());
    }
    if let Some(total) = manifest.metadata.total_plugins
        && total != manifest.plugins.len()
    {
        violations.push(format!(
            "metadata.totalPlugins is {total} but the catalog lists {} plugins",
            manifest.plugins.len()
        ));
    }
    if let Some(url) = &manifest.metadata.homepage {
        check_url(&mut violations, "metadata.homepage", url);
    }
    if let Some(url) = &manifest.owner.url {
        check_url(&mut violations, "owner.url", url);
    }

    let mut seen = HashSet::new();
    for plugin in &manifest.plugins {
        if !seen.insert(plugin.name.as_str()) {
            violations.push(format!("duplicate plugin name '{}'", plugin.name));
        }
        violations.extend(validate_entry(plugin));
    }

    violations
}

/// Validate one catalog entry's schema-level rules.
#[must_use]
pub fn validate_entry(plugin: &PluginEntry) -> Vec<String> {
    let mut violations = Vec::new();
    let name = &plugin.name;

    if !KEBAB_CASE_RE.is_match(name) {
        violations.push(format!("plugin '{name}': name must be kebab-case"));
    }
    if !SEMVER_RE.is_match(&plugin.version) {
        violations.push(format!(
            "plugin '{name}': version '{}' must be MAJOR.MINOR.PATCH",
            plugin.version
        ));
    }
    if plugin.description.is_empty() {
        violations.push(format!("plugin '{name}': description must not be empty"));
    }
    if plugin.keywords.iter().any(String::is_empty) {
        violations.push(format!(
            "plugin '{name}': keywords must not contain empty strings"
        ));
    }
    if let Some(license) = &plugin.license
        && license.is_empty()
    {
        violations.push(format!(
            "plugin '{name}': license must not be empty when present"
        ));
    }
    if let Some(url) = &plugin.repository {
        check_url(&mut violations, &format!("plugin '{name}': repository"), url);
    }
    if let Some(url) = &plugin.homepage {
        check_url(&mut violations, &format!("plugin '{name}': homepage"), url);
    }
    if let Some(author) = &plugin.author
        && let Some(url) = &author.url
    {
        check_url(&mut violations, &format!("plugin '{name}': author.url"), url);
    }

    violations
}

/// Compare a catalog entry against the plugin's own manifest.
#[must_use]
pub fn check_consistency(entry: &PluginEntry, manifest: &PluginManifest) -> Vec<String> {
    let mut violations = Vec::new();

    if manifest.name != entry.name {
        violations.push(format!(
            "plugin '{}': plugin.json name is '{}'",
            entry.name, manifest.name
        ));
    }
    if manifest.version != entry.version {
        violations.push(format!(
            "plugin '{}': plugin.json version is '{}' but the catalog says '{}'",
            entry.name, manifest.version, entry.version
        ));
    }

    violations
}

/// Extract and parse the YAML frontmatter block of a command file.
///
/// Returns `None` when the file has no frontmatter fence or the block is not
/// valid YAML.
#[must_use]
pub fn parse_frontmatter(content: &str) -> Option<BTreeMap<String, serde_yaml::Value>> {
    let body = FRONTMATTER_RE.captures(content)?.get(1)?.as_str();
    serde_yaml::from_str(body).ok()
}

/// Check a command file's frontmatter for the required fields.
#[must_use]
pub fn validate_frontmatter(plugin_name: &str, content: &str) -> Vec<String> {
    let Some(frontmatter) = parse_frontmatter(content) else {
        return vec![format!(
            "plugin '{plugin_name}': command.md has no YAML frontmatter"
        )];
    };

    let mut violations = Vec::new();
    for field in ["allowed-tools", "description"] {
        if !frontmatter.contains_key(field) {
            violations.push(format!(
                "plugin '{plugin_name}': command.md frontmatter is missing '{field}'"
            ));
        }
    }
    violations
}

fn check_url(violations: &mut Vec<String>, field: &str, url: &str) {
    if !URL_RE.is_match(url) {
        violations.push(format!("{field} '{url}' must be an http(s) URL"));
    }
}
