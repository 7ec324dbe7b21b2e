//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator. Zero imports from
//! `crate::commands` or `crate::output`.

use thiserror::Error;

// ── Marketplace errors ────────────────────────────────────────────────────────

/// Errors related to marketplace catalog validation.
#[derive(Debug, Error)]
pub enum MarketplaceError {
    #[error("Marketplace catalog not found at {0}. Expected .claude-plugin/marketplace.json under the marketplace root.")]
    CatalogNotFound(String),

    #[error("Marketplace validation failed: {0} violation(s) found.")]
    ValidationFailed(usize),
}

// ── Metrics errors ────────────────────────────────────────────────────────────

/// Errors related to session metrics input.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Session metrics are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
