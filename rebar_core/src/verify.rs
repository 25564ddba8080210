//! # Verification Engine
//!
//! A named-assertion ledger shared by every generator. Each step that
//! produces a checkable quantity registers `(name, expected, actual,
//! tolerance, severity)`; a STRICT failure aborts the whole pass immediately
//! so no partial geometry ever looks usable, while advisory deviations
//! accumulate and are surfaced only through the itemized record.

use serde::{Deserialize, Serialize};

use crate::errors::{RebarError, RebarResult};

/// Whether a failed check aborts synthesis or is merely recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Strict,
    Advisory,
}

/// One registered assertion with its outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub expected: f64,
    pub actual: f64,
    pub tolerance: f64,
    pub severity: Severity,
    pub passed: bool,
}

/// Ordered record of every check registered during one synthesis pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationLedger {
    checks: Vec<CheckResult>,
}

impl VerificationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a check. STRICT failures return an error that must abort
    /// the pass; advisory failures are only recorded.
    pub fn check(
        &mut self,
        name: impl Into<String>,
        expected: f64,
        actual: f64,
        tolerance: f64,
        severity: Severity,
    ) -> RebarResult<()> {
        let name = name.into();
        let passed = (expected - actual).abs() <= tolerance;
        self.checks.push(CheckResult {
            name: name.clone(),
            expected,
            actual,
            tolerance,
            severity,
            passed,
        });
        if !passed && severity == Severity::Strict {
            return Err(RebarError::StrictCheckFailed {
                name,
                expected,
                actual,
                tolerance,
            });
        }
        Ok(())
    }

    /// Register an advisory observation (never aborts)
    pub fn advisory(&mut self, name: impl Into<String>, expected: f64, actual: f64, tolerance: f64) {
        // Advisory checks cannot fail the pass, so the Result is always Ok
        let _ = self.check(name, expected, actual, tolerance, Severity::Advisory);
    }

    /// Aggregate outcome: PASS iff no STRICT check failed
    pub fn passed(&self) -> bool {
        !self
            .checks
            .iter()
            .any(|c| !c.passed && c.severity == Severity::Strict)
    }

    /// Itemized record, in registration order
    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    /// All failed entries, strict and advisory alike
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// Count of advisory entries that did not pass
    pub fn advisory_failure_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| !c.passed && c.severity == Severity::Advisory)
            .count()
    }
}
