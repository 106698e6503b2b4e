//! Observability helpers for the issuance flow.
//!
//! - Every issuance runs inside a `live_token_broker.issue` span carrying a `stage` field.
//! - Enable `metrics` to increment the `live_token_broker_issue_total` counter for every
//!   attempt/success/failure, labeled by `outcome` and, for failures, by `reason`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each issuance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueOutcome {
	/// Entry to the issuance flow.
	Attempt,
	/// A token was minted.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl IssueOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			IssueOutcome::Attempt => "attempt",
			IssueOutcome::Success => "success",
			IssueOutcome::Failure => "failure",
		}
	}
}
impl Display for IssueOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
