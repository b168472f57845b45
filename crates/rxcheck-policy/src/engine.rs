//! TOML policy loading.
//!
//! Loading algorithm:
//!
//! 1. Parse the document into `ValidationPolicy`; absent keys take defaults.
//! 2. Run every range rule from `rule.rs`.
//! 3. Any violation → `ConfigError` listing all of them, so a policy file
//!    can be fixed in one pass.

use std::path::Path;

use tracing::{debug, warn};

use rxcheck_contracts::{
    error::{RxError, RxResult},
    policy::ValidationPolicy,
};

use crate::rule::violations;

/// Parse and range-check a policy document.
pub fn from_toml_str(s: &str) -> RxResult<ValidationPolicy> {
    let policy: ValidationPolicy = toml::from_str(s).map_err(|e| RxError::ConfigError {
        reason: format!("failed to parse policy TOML: {}", e),
    })?;
    check(&policy)?;
    debug!(
        fuzzy_threshold = policy.matching.fuzzy_threshold,
        appropriateness_threshold = policy.scoring.appropriateness_threshold,
        "validation policy loaded"
    );
    Ok(policy)
}

/// Read the file at `path` and load it as a policy document.
pub fn from_file(path: &Path) -> RxResult<ValidationPolicy> {
    let contents = std::fs::read_to_string(path).map_err(|e| RxError::ConfigError {
        reason: format!("failed to read policy file '{}': {}", path.display(), e),
    })?;
    from_toml_str(&contents)
}

/// Reject `policy` if any range rule fails.
pub fn check(policy: &ValidationPolicy) -> RxResult<()> {
    let found = violations(policy);
    if found.is_empty() {
        return Ok(());
    }
    for v in &found {
        warn!(field = v.field, reason = %v.reason, "policy value out of range");
    }
    let listed: Vec<String> = found.iter().map(ToString::to_string).collect();
    Err(RxError::ConfigError {
        reason: format!("invalid policy: {}", listed.join("; ")),
    })
}
