//! Location of the `auth_tokens` endpoint and interpretation of its replies.

// self
use crate::{
	_prelude::*,
	auth::IssuedToken,
	error::{ConfigError, ProviderError},
	http::HttpReply,
};

/// Token-service location, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenEndpoint {
	base_url: Url,
}
impl TokenEndpoint {
	/// Public Gemini API host.
	pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

	/// Creates an endpoint rooted at an already-validated base URL.
	pub fn new(base_url: Url) -> Result<Self, ConfigError> {
		if !matches!(base_url.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedBaseUrl { value: base_url.to_string() });
		}

		Ok(Self { base_url })
	}

	/// Endpoint rooted at the public Gemini API host.
	pub fn gemini() -> Result<Self, ConfigError> {
		Self::parse(Self::DEFAULT_BASE_URL)
	}

	/// Parses and validates a raw base URL.
	pub fn parse(raw: &str) -> Result<Self, ConfigError> {
		let base_url = Url::parse(raw)
			.map_err(|source| ConfigError::InvalidBaseUrl { value: raw.to_owned(), source })?;

		Self::new(base_url)
	}

	/// Returns the base URL the endpoint is rooted at.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Resolves `{base}/{api_version}/auth_tokens`.
	pub fn url_for(&self, api_version: &str) -> Url {
		let mut url = self.base_url.clone();

		if let Ok(mut segments) = url.path_segments_mut() {
			segments.pop_if_empty().push(api_version).push("auth_tokens");
		}

		url
	}

	/// Turns a raw reply into an issued token or a provider error.
	pub fn interpret(&self, reply: HttpReply) -> Result<IssuedToken, ProviderError> {
		let status = reply.status;

		if !reply.is_success() {
			return Err(ProviderError::Rejected { status, message: error_message(&reply.body) });
		}

		let mut de = serde_json::Deserializer::from_slice(&reply.body);
		let response: AuthTokenResponse = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ProviderError::ResponseParse { source, status })?;

		response
			.name
			.filter(|name| !name.is_empty())
			.map(IssuedToken::new)
			.ok_or(ProviderError::MissingTokenName { status })
	}
}

#[derive(Debug, Deserialize)]
struct AuthTokenResponse {
	name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
	error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
	message: Option<String>,
}

/// Extracts `error.message` from a Google API error envelope.
fn error_message(body: &[u8]) -> Option<String> {
	serde_json::from_slice::<ErrorEnvelope>(body)
		.ok()
		.and_then(|envelope| envelope.error.message)
		.filter(|message| !message.trim().is_empty())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn endpoint() -> TokenEndpoint {
		TokenEndpoint::gemini().expect("Default endpoint should parse.")
	}

	fn reply(status: u16, body: &str) -> HttpReply {
		HttpReply { status, body: body.as_bytes().to_vec() }
	}

	#[test]
	fn url_appends_version_and_collection() {
		let endpoint = endpoint();

		assert_eq!(
			endpoint.url_for("v1alpha").as_str(),
			"https://generativelanguage.googleapis.com/v1alpha/auth_tokens",
		);

		let nested = TokenEndpoint::parse("http://127.0.0.1:8080/proxy/")
			.expect("Nested base URL should parse.");

		assert_eq!(
			nested.url_for("v1alpha").as_str(),
			"http://127.0.0.1:8080/proxy/v1alpha/auth_tokens",
		);
	}

	#[test]
	fn rejects_non_http_schemes_and_garbage() {
		assert!(matches!(
			TokenEndpoint::parse("ftp://example.com"),
			Err(ConfigError::UnsupportedBaseUrl { .. })
		));
		assert!(matches!(
			TokenEndpoint::parse("not a url"),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
	}

	#[test]
	fn success_forwards_token_name_verbatim() {
		let token = endpoint()
			.interpret(reply(200, r#"{"name":"auth_tokens/tok_abc123","uses":1}"#))
			.expect("Well-formed reply should yield a token.");

		assert_eq!(token.as_str(), "auth_tokens/tok_abc123");
	}

	#[test]
	fn rejection_carries_provider_message() {
		let err = endpoint()
			.interpret(reply(
				400,
				r#"{"error":{"code":400,"message":"invalid api key","status":"INVALID_ARGUMENT"}}"#,
			))
			.expect_err("Non-2xx replies must fail.");

		match err {
			ProviderError::Rejected { status, message } => {
				assert_eq!(status, 400);
				assert_eq!(message.as_deref(), Some("invalid api key"));
			},
			other => panic!("Unexpected error: {other:?}"),
		}
	}

	#[test]
	fn rejection_without_envelope_has_no_message() {
		let err = endpoint()
			.interpret(reply(503, "upstream unavailable"))
			.expect_err("Non-2xx replies must fail.");

		assert!(matches!(err, ProviderError::Rejected { status: 503, message: None }));
	}

	#[test]
	fn malformed_success_is_reported_with_path() {
		let err = endpoint()
			.interpret(reply(200, r#"{"name":42}"#))
			.expect_err("Wrongly typed names must fail.");

		match err {
			ProviderError::ResponseParse { source, status } => {
				assert_eq!(status, 200);
				assert_eq!(source.path().to_string(), "name");
			},
			other => panic!("Unexpected error: {other:?}"),
		}

		let err = endpoint()
			.interpret(reply(200, "{}"))
			.expect_err("Missing names must fail.");

		assert!(matches!(err, ProviderError::MissingTokenName { status: 200 }));
	}
}
