//! Single-attempt token issuance.
//!
//! [`Broker::issue_token`] checks the secret, derives a fresh descriptor from the policy, and
//! makes exactly one call to the token service. Failures are returned as-is; nothing is retried.

// self
use crate::{
	_prelude::*,
	auth::IssuedToken,
	config::IssuerConfig,
	error::ConfigError,
	flows::Broker,
	http::TokenHttpClient,
	obs::{self, FlowSpan, IssueOutcome},
};

impl<C> Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Mints a new token using the current UTC instant.
	pub async fn issue_token(&self) -> Result<IssuedToken> {
		self.issue_token_at(OffsetDateTime::now_utc()).await
	}

	/// Mints a new token whose expiries are derived from `now`.
	pub async fn issue_token_at(&self, now: OffsetDateTime) -> Result<IssuedToken> {
		let span = FlowSpan::new("issue_token");

		obs::record_issue_outcome(IssueOutcome::Attempt, None);

		let result: Result<IssuedToken> = span
			.instrument(async move {
				let secret = self
					.secret
					.as_ref()
					.ok_or(ConfigError::MissingSecret { var: IssuerConfig::SECRET_VAR })?;
				let descriptor = self.policy.descriptor_at(now)?;
				let body = serde_json::to_vec(&descriptor).map_err(ConfigError::RequestEncode)?;
				let url = self.endpoint.url_for(&descriptor.api_version);
				let reply = self.http_client.post_json(&url, secret, body).await?;

				Ok::<_, Error>(self.endpoint.interpret(reply)?)
			})
			.await;

		match &result {
			Ok(_) => {
				tracing::debug!("Issued live session token.");
				obs::record_issue_outcome(IssueOutcome::Success, None);
			},
			Err(e) => {
				match e {
					Error::Config(_) => tracing::error!(error = %e, "Token issuance is misconfigured."),
					_ => tracing::warn!(error = %e, kind = e.kind(), "Token issuance failed."),
				}

				obs::record_issue_outcome(IssueOutcome::Failure, Some(e.kind()));
			},
		}

		result
	}
}
