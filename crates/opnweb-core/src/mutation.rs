// ── Mutation protocol ──
//
// Every persisted change is a two-phase flow against the appliance:
// submit the edit form, then POST an explicit apply to commit the staged
// change. Reads do not see a mutation until apply succeeds, so the step
// a failure occurred in is part of the error contract.

use std::fmt;

use tracing::debug;

use opnweb_api::Session;

use crate::error::CoreError;

/// The step of the prime/submit/apply flow a mutation stopped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStep {
    /// Fetching the edit form and its one-shot anti-forgery secret. The
    /// appliance answers a bad positional ID by rendering no form at all,
    /// which surfaces here.
    Prime,
    /// POSTing the field set (or the delete action).
    Submit,
    /// POSTing the commit of staged changes. A failure here leaves the
    /// appliance staged-but-uncommitted; the caller must re-run or
    /// reconcile manually.
    Apply,
}

impl fmt::Display for MutationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Prime => "prime",
            Self::Submit => "submit",
            Self::Apply => "apply",
        })
    }
}

/// POST `fields` to `path`, mapping any non-success status to an opaque
/// [`CoreError::MutationRejected`] for `step`.
pub(crate) async fn checked_post(
    session: &Session,
    path: &str,
    fields: &[(String, String)],
    step: MutationStep,
) -> Result<(), CoreError> {
    let resp = session.post_form(path, fields).await?;
    let status = resp.status();
    if !status.is_success() {
        debug!(%status, %step, "appliance rejected mutation");
        return Err(CoreError::MutationRejected {
            step,
            message: format!("HTTP {status}"),
        });
    }
    Ok(())
}
