//! Issuance flow orchestrated by the broker.

mod issue;

// self
use crate::{
	_prelude::*,
	auth::ProviderSecret,
	config::IssuerConfig,
	error::ConfigError,
	http::{ReqwestHttpClient, TokenHttpClient},
	provider::{IssuancePolicy, TokenEndpoint},
};

/// Broker specialized for the crate's default reqwest transport.
pub type ReqwestBroker = Broker<ReqwestHttpClient>;

/// Mints live-session tokens against a single token service.
///
/// The broker owns everything an issuance needs and nothing that changes between requests: the
/// HTTP client, the endpoint, the issuance policy, and the provider secret loaded at startup.
/// Share it behind an [`Arc`]; no locking is involved.
#[derive(Clone)]
pub struct Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// HTTP client wrapper used for every outbound call.
	pub http_client: Arc<C>,
	/// Token service location.
	pub endpoint: TokenEndpoint,
	/// Constraints applied to every minted token.
	pub policy: IssuancePolicy,
	/// Provider secret; issuance fails with a configuration error while it is absent.
	pub secret: Option<ProviderSecret>,
}
impl<C> Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a broker that reuses the caller-provided transport.
	pub fn with_http_client(
		endpoint: TokenEndpoint,
		policy: IssuancePolicy,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { http_client: http_client.into(), endpoint, policy, secret: None }
	}

	/// Sets or replaces the provider secret.
	pub fn with_secret(mut self, secret: ProviderSecret) -> Self {
		self.secret = Some(secret);

		self
	}

	/// Sets the provider secret from an optional value, clearing it on `None`.
	pub fn with_optional_secret(mut self, secret: Option<ProviderSecret>) -> Self {
		self.secret = secret;

		self
	}
}
impl Broker<ReqwestHttpClient> {
	/// Creates a broker backed by a reqwest client that never follows redirects.
	pub fn new(endpoint: TokenEndpoint, policy: IssuancePolicy) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(endpoint, policy, ReqwestHttpClient::build(None)?))
	}

	/// Builds the process-wide broker from loaded configuration.
	///
	/// The HTTP client is created eagerly here so the first request pays no setup cost.
	pub fn from_config(config: &IssuerConfig) -> Result<Self, ConfigError> {
		let policy = IssuancePolicy::default();

		policy.validate()?;

		let http_client = ReqwestHttpClient::build(config.upstream_timeout)?;

		Ok(Self::with_http_client(config.endpoint.clone(), policy, http_client)
			.with_optional_secret(config.secret.clone()))
	}
}
impl<C> Debug for Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Broker")
			.field("endpoint", &self.endpoint)
			.field("policy", &self.policy)
			.field("secret_set", &self.secret.is_some())
			.finish()
	}
}
