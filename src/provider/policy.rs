//! Issuance policy shared by every token the broker mints.
//!
//! The policy is built once at startup and reused for each request; only the expiry instants are
//! derived per request from the current clock.

/// Builder API for assembling issuance policies.
pub mod builder;
/// Response modality constraints.
pub mod modality;

pub use builder::*;
pub use modality::*;

// self
use crate::{_prelude::*, error::ConfigError, provider::request::*};

/// Immutable constraints applied to every minted token.
#[derive(Clone, Debug, PartialEq)]
pub struct IssuancePolicy {
	/// How many sessions a single token may open.
	pub uses: u32,
	/// Lifetime of the token itself.
	pub token_ttl: Duration,
	/// Window during which the token may open a new session.
	pub new_session_ttl: Duration,
	/// Target model identifier, with or without the `models/` prefix.
	pub model: String,
	/// Response modalities the session is locked to.
	pub response_modalities: Vec<Modality>,
	/// Sampling temperature the session is locked to.
	pub temperature: f64,
	/// API version the token service is addressed with.
	pub api_version: String,
}
impl IssuancePolicy {
	/// Default single-use budget.
	pub const DEFAULT_USES: u32 = 1;
	/// Default token lifetime.
	pub const DEFAULT_TOKEN_TTL: Duration = Duration::minutes(30);
	/// Default window for opening a new session.
	pub const DEFAULT_NEW_SESSION_TTL: Duration = Duration::minutes(1);
	/// Default native-audio live model.
	pub const DEFAULT_MODEL: &'static str = "gemini-2.5-flash-native-audio-preview-12-2025";
	/// Default sampling temperature.
	pub const DEFAULT_TEMPERATURE: f64 = 0.4;
	/// API version that exposes `auth_tokens`.
	pub const DEFAULT_API_VERSION: &'static str = "v1alpha";

	/// Creates a new builder seeded with the defaults.
	pub fn builder() -> IssuancePolicyBuilder {
		IssuancePolicyBuilder::new()
	}

	/// Builds the request descriptor for a token minted at `now`.
	pub fn descriptor_at(&self, now: OffsetDateTime) -> Result<TokenRequestDescriptor, ConfigError> {
		let expire_time = now.checked_add(self.token_ttl).ok_or(ConfigError::Timestamp)?;
		let new_session_expire_time =
			now.checked_add(self.new_session_ttl).ok_or(ConfigError::Timestamp)?;

		Ok(TokenRequestDescriptor {
			uses: self.uses,
			expire_time,
			new_session_expire_time,
			bidi_generate_content_setup: LiveConnectConstraints {
				model: qualify_model(&self.model),
				generation_config: GenerationConfig {
					response_modalities: self.response_modalities.clone(),
					temperature: self.temperature,
				},
			},
			api_version: self.api_version.clone(),
		})
	}
}
impl Default for IssuancePolicy {
	fn default() -> Self {
		Self {
			uses: Self::DEFAULT_USES,
			token_ttl: Self::DEFAULT_TOKEN_TTL,
			new_session_ttl: Self::DEFAULT_NEW_SESSION_TTL,
			model: Self::DEFAULT_MODEL.into(),
			response_modalities: vec![Modality::Audio],
			temperature: Self::DEFAULT_TEMPERATURE,
			api_version: Self::DEFAULT_API_VERSION.into(),
		}
	}
}

/// Resource-qualifies a bare model identifier the way the token service expects.
fn qualify_model(model: &str) -> String {
	if model.starts_with("models/") || model.starts_with("tunedModels/") {
		model.to_owned()
	} else {
		format!("models/{model}")
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn default_policy_matches_live_audio_constraints() {
		let policy = IssuancePolicy::default();

		assert_eq!(policy.uses, 1);
		assert_eq!(policy.token_ttl, Duration::minutes(30));
		assert_eq!(policy.new_session_ttl, Duration::minutes(1));
		assert_eq!(policy.response_modalities, vec![Modality::Audio]);
		assert_eq!(policy.temperature, 0.4);
		assert_eq!(policy.api_version, "v1alpha");
	}

	#[test]
	fn descriptor_derives_expiries_from_now() {
		let now = datetime!(2026-10-19 12:00:00 UTC);
		let descriptor = IssuancePolicy::default()
			.descriptor_at(now)
			.expect("Descriptor should build for an ordinary instant.");

		assert_eq!(descriptor.uses, 1);
		assert_eq!(descriptor.expire_time, datetime!(2026-10-19 12:30:00 UTC));
		assert_eq!(descriptor.new_session_expire_time, datetime!(2026-10-19 12:01:00 UTC));
		assert_eq!(
			descriptor.bidi_generate_content_setup.model,
			"models/gemini-2.5-flash-native-audio-preview-12-2025",
		);
		assert_eq!(descriptor.api_version, "v1alpha");
	}

	#[test]
	fn qualified_models_are_left_alone() {
		assert_eq!(qualify_model("models/custom"), "models/custom");
		assert_eq!(qualify_model("tunedModels/mine"), "tunedModels/mine");
		assert_eq!(qualify_model("custom"), "models/custom");
	}

	#[test]
	fn descriptor_rejects_unrepresentable_expiry() {
		let err = IssuancePolicy::default()
			.descriptor_at(datetime!(9999-12-31 23:59:59 UTC))
			.expect_err("Expiry past the calendar range should fail.");

		assert!(matches!(err, ConfigError::Timestamp));
	}
}
