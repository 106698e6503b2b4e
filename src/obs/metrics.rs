// self
use crate::obs::IssueOutcome;

/// Records an issuance outcome via the global metrics recorder (when enabled).
///
/// `reason` is only attached to failures and should be an
/// [`Error::kind`](crate::error::Error::kind) label.
pub fn record_issue_outcome(outcome: IssueOutcome, reason: Option<&'static str>) {
	#[cfg(feature = "metrics")]
	{
		match reason {
			Some(reason) => metrics::counter!(
				"live_token_broker_issue_total",
				"outcome" => outcome.as_str(),
				"reason" => reason
			)
			.increment(1),
			None => metrics::counter!(
				"live_token_broker_issue_total",
				"outcome" => outcome.as_str()
			)
			.increment(1),
		}
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (outcome, reason);
	}
}
