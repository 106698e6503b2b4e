//! Wire representation of a single token-issuance request.

// self
use crate::{_prelude::*, provider::Modality};

/// Per-request description of the token to mint, serialized as the `auth_tokens` body.
///
/// Built from [`IssuancePolicy::descriptor_at`](crate::provider::IssuancePolicy::descriptor_at);
/// the expiry instants are the only values that change between requests.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequestDescriptor {
	/// Usage budget for the minted token.
	pub uses: u32,
	/// Instant after which the token is rejected outright.
	#[serde(with = "time::serde::rfc3339")]
	pub expire_time: OffsetDateTime,
	/// Instant after which the token can no longer open a new session.
	#[serde(with = "time::serde::rfc3339")]
	pub new_session_expire_time: OffsetDateTime,
	/// Session setup the token is locked to.
	pub bidi_generate_content_setup: LiveConnectConstraints,
	/// API version used to address the token service; not part of the body.
	#[serde(skip)]
	pub api_version: String,
}

/// Live session constraints baked into the token.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveConnectConstraints {
	/// Resource-qualified model name (`models/...`).
	pub model: String,
	/// Generation settings the session cannot override.
	pub generation_config: GenerationConfig,
}

/// Generation settings carried by [`LiveConnectConstraints`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
	/// Allowed response modalities.
	pub response_modalities: Vec<Modality>,
	/// Sampling temperature.
	pub temperature: f64,
}
