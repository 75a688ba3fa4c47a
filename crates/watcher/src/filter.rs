//! Allow/deny pattern matching for candidate paths

use regex::Regex;
use std::path::Path;
use telesync_core::error::{Error, Result};
use tracing::trace;

/// Immutable allow/deny rule sets evaluated against full path strings
///
/// A path is eligible when no deny pattern matches and, if any allow
/// patterns are configured, at least one of them matches. An empty allow
/// set admits every path. Deny always wins over allow.
#[derive(Debug, Clone, Default)]
pub struct FilterPolicy {
    allow: Vec<Regex>,
    deny: Vec<Regex>,
}

impl FilterPolicy {
    /// Compile a policy from allow and deny regex strings
    ///
    /// Fails with a configuration error on the first pattern that does not
    /// compile.
    pub fn new(allow: &[String], deny: &[String]) -> Result<Self> {
        Ok(Self {
            allow: compile(allow)?,
            deny: compile(deny)?,
        })
    }

    /// A policy with no rules: every path is eligible
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Evaluate a path against the rule sets
    pub fn is_eligible(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();

        for pattern in &self.deny {
            if pattern.is_match(&text) {
                trace!("rejecting {} (deny pattern {})", path.display(), pattern);
                return false;
            }
        }

        if self.allow.is_empty() {
            return true;
        }

        let allowed = self.allow.iter().any(|pattern| pattern.is_match(&text));
        if !allowed {
            trace!("rejecting {} (no allow pattern matched)", path.display());
        }
        allowed
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(|e| Error::config(format!("invalid pattern '{p}': {e}"))))
        .collect()
}
