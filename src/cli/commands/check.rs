//! check command - Report store consistency problems
//!
//! Read-only. Exits non-zero when a body is missing or a lineage chain
//! loops; dangling parents are reported as warnings.

use anyhow::{bail, Context as _, Result};
use serde_json::json;

use crate::cli::Context;
use crate::ui::output;

/// Verify the stores and print findings.
pub fn check(ctx: &Context) -> Result<()> {
    let repo = ctx.open_repository()?;
    let result = repo.verify().context("Verification failed to run")?;

    if ctx.json {
        let findings: Vec<_> = result
            .errors
            .iter()
            .map(|e| json!({ "fatal": e.is_fatal(), "message": e.to_string() }))
            .collect();
        output::json(&json!({
            "ok": result.ok,
            "checked": result.checked,
            "findings": findings,
        }))?;
    } else {
        for finding in &result.errors {
            if finding.is_fatal() {
                output::error(finding);
            } else {
                output::warn(finding, ctx.verbosity);
            }
        }
        output::print(
            format!("Checked {} paste(s).", result.checked),
            ctx.verbosity,
        );
    }

    if !result.ok {
        let fatal = result.errors.iter().filter(|e| e.is_fatal()).count();
        bail!("{fatal} problem(s) found");
    }
    Ok(())
}
