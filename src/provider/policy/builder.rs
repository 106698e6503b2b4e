// self
use crate::{
	_prelude::*,
	provider::{IssuancePolicy, Modality},
};

/// Errors raised while constructing or validating issuance policies.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum PolicyError {
	/// A token must allow at least one session.
	#[error("Token usage budget must be at least 1.")]
	ZeroUses,
	/// Expiry windows must be positive.
	#[error("The {field} window must be positive.")]
	NonPositiveWindow {
		/// Which window failed validation.
		field: &'static str,
	},
	/// The session-opening window cannot outlive the token.
	#[error("The new-session window must not exceed the token lifetime.")]
	SessionWindowExceedsToken,
	/// Model identifier is required.
	#[error("Model identifier must not be empty.")]
	EmptyModel,
	/// At least one response modality must be allowed.
	#[error("At least one response modality is required.")]
	NoModalities,
	/// Temperature outside the range the live API accepts.
	#[error("Temperature {value} is outside the supported range 0.0..=2.0.")]
	TemperatureOutOfRange {
		/// Temperature that was supplied.
		value: f64,
	},
	/// API version is required to address the token service.
	#[error("API version must not be empty.")]
	EmptyApiVersion,
}

/// Builder for [`IssuancePolicy`] values.
#[derive(Debug)]
pub struct IssuancePolicyBuilder {
	policy: IssuancePolicy,
}
impl IssuancePolicyBuilder {
	/// Creates a new builder seeded with [`IssuancePolicy::default`].
	pub fn new() -> Self {
		Self { policy: IssuancePolicy::default() }
	}

	/// Sets how many sessions a token may open.
	pub fn uses(mut self, uses: u32) -> Self {
		self.policy.uses = uses;

		self
	}

	/// Sets the token lifetime.
	pub fn token_ttl(mut self, ttl: Duration) -> Self {
		self.policy.token_ttl = ttl;

		self
	}

	/// Sets the window for opening a new session.
	pub fn new_session_ttl(mut self, ttl: Duration) -> Self {
		self.policy.new_session_ttl = ttl;

		self
	}

	/// Sets the target model identifier.
	pub fn model(mut self, model: impl Into<String>) -> Self {
		self.policy.model = model.into();

		self
	}

	/// Replaces the allowed response modalities.
	pub fn response_modalities<I>(mut self, modalities: I) -> Self
	where
		I: IntoIterator<Item = Modality>,
	{
		self.policy.response_modalities.clear();

		for modality in modalities {
			if !self.policy.response_modalities.contains(&modality) {
				self.policy.response_modalities.push(modality);
			}
		}

		self
	}

	/// Sets the sampling temperature.
	pub fn temperature(mut self, temperature: f64) -> Self {
		self.policy.temperature = temperature;

		self
	}

	/// Sets the API version used to address the token service.
	pub fn api_version(mut self, version: impl Into<String>) -> Self {
		self.policy.api_version = version.into();

		self
	}

	/// Consumes the builder and validates the resulting policy.
	pub fn build(self) -> Result<IssuancePolicy, PolicyError> {
		self.policy.validate()?;

		Ok(self.policy)
	}
}
impl Default for IssuancePolicyBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl IssuancePolicy {
	/// Validates invariants for the policy.
	pub fn validate(&self) -> Result<(), PolicyError> {
		if self.uses == 0 {
			return Err(PolicyError::ZeroUses);
		}
		if !self.token_ttl.is_positive() {
			return Err(PolicyError::NonPositiveWindow { field: "token" });
		}
		if !self.new_session_ttl.is_positive() {
			return Err(PolicyError::NonPositiveWindow { field: "new-session" });
		}
		if self.new_session_ttl > self.token_ttl {
			return Err(PolicyError::SessionWindowExceedsToken);
		}
		if self.model.trim().is_empty() {
			return Err(PolicyError::EmptyModel);
		}
		if self.response_modalities.is_empty() {
			return Err(PolicyError::NoModalities);
		}
		if !(0.0..=2.0).contains(&self.temperature) {
			return Err(PolicyError::TemperatureOutOfRange { value: self.temperature });
		}
		if self.api_version.trim().is_empty() {
			return Err(PolicyError::EmptyApiVersion);
		}

		Ok(())
	}
}
