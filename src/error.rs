//! Broker-level error types shared across configuration, transport, and provider layers.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; a deployment defect rather than a per-request condition.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The token service answered, but not with a usable token.
	#[error(transparent)]
	Provider(#[from] ProviderError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl Error {
	/// Generic message surfaced when a failure carries no text of its own.
	pub const FALLBACK_MESSAGE: &'static str = "Token issuance failed.";

	/// Returns the message handed back to the browser.
	///
	/// Provider rejections pass the provider's own text through verbatim; every other failure
	/// uses its display form. Blank messages collapse to [`Error::FALLBACK_MESSAGE`].
	pub fn client_message(&self) -> String {
		let message = match self {
			Self::Provider(ProviderError::Rejected { message: Some(message), .. }) =>
				message.clone(),
			Self::Transport(TransportError::Network { source }) => source.to_string(),
			other => other.to_string(),
		};

		if message.trim().is_empty() { Self::FALLBACK_MESSAGE.into() } else { message }
	}

	/// Stable label used by logs and metrics.
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::Config(_) => "config",
			Self::Provider(_) => "provider",
			Self::Transport(_) => "transport",
		}
	}
}

/// Configuration and validation failures raised by the broker.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The provider secret is absent from the environment.
	#[error("Missing {var} in environment")]
	MissingSecret {
		/// Name of the environment variable that should hold the secret.
		var: &'static str,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Provider base URL is invalid.
	#[error("Provider base URL `{value}` is invalid.")]
	InvalidBaseUrl {
		/// Raw value that failed to parse.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Provider base URL uses a scheme other than http or https.
	#[error("Provider base URL `{value}` must use http or https.")]
	UnsupportedBaseUrl {
		/// Offending URL.
		value: String,
	},
	/// Issuance policy failed validation.
	#[error(transparent)]
	InvalidPolicy(#[from] crate::provider::PolicyError),
	/// An environment variable or command-line flag holds a value that cannot be used.
	#[error("Configuration value {var} is invalid: {reason}.")]
	InvalidEnv {
		/// Variable or flag name.
		var: &'static str,
		/// Why the value was rejected.
		reason: String,
	},
	/// Token request body could not be encoded.
	#[error("Token request could not be encoded.")]
	RequestEncode(#[source] serde_json::Error),
	/// Expiry instant fell outside the representable range.
	#[error("Token expiry could not be computed.")]
	Timestamp,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Builds an [`ConfigError::InvalidEnv`] for the provided variable.
	pub fn invalid_env(var: &'static str, reason: impl Display) -> Self {
		Self::InvalidEnv { var, reason: reason.to_string() }
	}
}

/// Failures reported by, or while interpreting, the token service.
#[derive(Debug, ThisError)]
pub enum ProviderError {
	/// The token service rejected the request.
	#[error("Token service rejected the request with status {status}: {}.", .message.as_deref().unwrap_or("no message"))]
	Rejected {
		/// HTTP status code returned by the service.
		status: u16,
		/// Provider-supplied message, when the error body carried one.
		message: Option<String>,
	},
	/// The token service answered with JSON that could not be parsed.
	#[error("Token service returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// The token service answered successfully but omitted the token name.
	#[error("Token service response is missing the token name.")]
	MissingTokenName {
		/// HTTP status code of the response.
		status: u16,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn rejection_passes_provider_message_through() {
		let err = Error::from(ProviderError::Rejected {
			status: 400,
			message: Some("invalid api key".into()),
		});

		assert_eq!(err.client_message(), "invalid api key");
		assert_eq!(err.kind(), "provider");
	}

	#[test]
	fn blank_messages_fall_back_to_generic_text() {
		let err = Error::from(ProviderError::Rejected { status: 500, message: Some("  ".into()) });

		assert_eq!(err.client_message(), Error::FALLBACK_MESSAGE);

		let err = Error::from(ProviderError::Rejected { status: 502, message: None });

		assert!(err.client_message().contains("502"));
	}

	#[test]
	fn missing_secret_names_the_variable() {
		let err = Error::from(ConfigError::MissingSecret { var: "GEMINI_API_KEY" });

		assert_eq!(err.client_message(), "Missing GEMINI_API_KEY in environment");
		assert_eq!(err.kind(), "config");
	}

	#[test]
	fn network_failures_surface_the_transport_text() {
		let err = Error::from(TransportError::network(std::io::Error::other("connection refused")));

		assert_eq!(err.client_message(), "connection refused");
		assert_eq!(err.kind(), "transport");
	}
}
