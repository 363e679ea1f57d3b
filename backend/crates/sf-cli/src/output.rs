use sf_core::{IdentityId, NormalizedEmail};
use sf_reconcile::{ReconcilePlan, ReconcileReport};

use serde::Serialize;

/// Printed to stdout after a completed run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessOutput<'a> {
    pub ok: bool,
    pub email: &'a NormalizedEmail,
    pub canonical_id: &'a IdentityId,
    pub merged: u64,
}

impl<'a> From<&'a ReconcileReport> for SuccessOutput<'a> {
    fn from(report: &'a ReconcileReport) -> Self {
        Self {
            ok: true,
            email: &report.email,
            canonical_id: &report.canonical_id,
            merged: report.merged,
        }
    }
}

/// Printed to stdout for `--dry-run`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunOutput<'a> {
    pub ok: bool,
    pub dry_run: bool,
    #[serde(flatten)]
    pub plan: &'a ReconcilePlan,
}

impl<'a> From<&'a ReconcilePlan> for DryRunOutput<'a> {
    fn from(plan: &'a ReconcilePlan) -> Self {
        Self {
            ok: true,
            dry_run: true,
            plan,
        }
    }
}

/// Printed to stderr when a run fails.
#[derive(Debug, Serialize)]
pub struct FailureOutput {
    pub ok: bool,
    pub error: String,
}

impl FailureOutput {
    pub fn new(error: impl ToString) -> Self {
        Self {
            ok: false,
            error: error.to_string(),
        }
    }
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
