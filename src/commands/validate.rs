//! `pulse validate` — marketplace catalog checks.
//!
//! Pure rules live in `domain::marketplace`; this command adds the on-disk
//! checks: the plugin-root directory, per-plugin `plugin.json` consistency,
//! and `command.md` frontmatter.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::domain::error::MarketplaceError;
use crate::domain::marketplace::{self, MarketplaceManifest, PluginManifest};
use crate::output::OutputContext;

/// Directory holding the catalog and per-plugin manifests.
const MANIFEST_DIR: &str = ".claude-plugin";

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Marketplace root directory (holds .claude-plugin/marketplace.json)
    #[arg(default_value = ".")]
    pub root: PathBuf,
}

/// Run the validate command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read or parsed, or if any
/// validation rule is violated.
pub fn run(args: &ValidateArgs, ctx: &OutputContext, json: bool) -> Result<()> {
    let catalog_path = args.root.join(MANIFEST_DIR).join("marketplace.json");
    if !catalog_path.exists() {
        return Err(MarketplaceError::CatalogNotFound(catalog_path.display().to_string()).into());
    }

    let raw = fs::read_to_string(&catalog_path)
        .with_context(|| format!("cannot read {}", catalog_path.display()))?;
    let manifest: MarketplaceManifest = serde_json::from_str(&raw)
        .with_context(|| format!("cannot parse {}", catalog_path.display()))?;

    let mut violations = marketplace::validate_manifest(&manifest);
    violations.extend(check_files(&args.root, &manifest));

    if json {
        let report = serde_json::json!({
            "valid": violations.is_empty(),
            "plugins": manifest.plugins.len(),
            "violations": violations,
        });
        let rendered =
            serde_json::to_string_pretty(&report).context("JSON serialization failed")?;
        println!("{rendered}");
    } else {
        for entry in &manifest.plugins {
            if entry.local_source().is_none() {
                ctx.warn(&format!(
                    "plugin '{}': remote source, file checks skipped",
                    entry.name
                ));
            }
        }
        if violations.is_empty() {
            ctx.success(&format!(
                "marketplace.json valid ({} plugins)",
                manifest.plugins.len()
            ));
        } else {
            for violation in &violations {
                ctx.error(violation);
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(MarketplaceError::ValidationFailed(violations.len()).into())
    }
}

/// Cross-file checks that need the marketplace tree on disk.
fn check_files(root: &Path, manifest: &MarketplaceManifest) -> Vec<String> {
    let mut violations = Vec::new();

    if !root.join(manifest.plugin_root()).is_dir() {
        violations.push(format!(
            "plugin root directory '{}' does not exist",
            manifest.plugin_root()
        ));
    }

    for entry in &manifest.plugins {
        // Remote sources get schema checks only.
        let Some(source) = entry.local_source() else {
            continue;
        };
        let plugin_dir = root.join(source);
        if !plugin_dir.is_dir() {
            violations.push(format!(
                "plugin '{}': source directory '{source}' does not exist",
                entry.name
            ));
            continue;
        }

        let manifest_path = plugin_dir.join(MANIFEST_DIR).join("plugin.json");
        match read_plugin_manifest(&manifest_path) {
            Ok(Some(plugin_manifest)) => {
                violations.extend(marketplace::check_consistency(entry, &plugin_manifest));
            }
            Ok(None) => violations.push(format!(
                "plugin '{}': missing {MANIFEST_DIR}/plugin.json",
                entry.name
            )),
            Err(message) => violations.push(message),
        }

        let command_path = plugin_dir.join("command.md");
        match fs::read_to_string(&command_path) {
            Ok(content) => {
                violations.extend(marketplace::validate_frontmatter(&entry.name, &content));
            }
            Err(_) => violations.push(format!("plugin '{}': missing command.md", entry.name)),
        }
    }

    violations
}

fn read_plugin_manifest(path: &Path) -> Result<Option<PluginManifest>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let manifest =
        serde_json::from_str(&raw).map_err(|e| format!("cannot parse {}: {e}", path.display()))?;
    Ok(Some(manifest))
}
