//! Transport primitives for token-service calls.
//!
//! [`TokenHttpClient`] is the broker's only dependency on an HTTP stack. It posts one JSON body,
//! authenticated with the provider secret, and hands back the raw status and bytes so the
//! [`provider`](crate::provider) layer can interpret them without knowing which client ran the
//! request.

// crates.io
use reqwest::{
	header::{CONTENT_TYPE, HeaderValue},
	redirect::Policy,
};
// self
use crate::{
	_prelude::*,
	auth::ProviderSecret,
	error::{ConfigError, TransportError},
};

/// Header carrying the provider secret on every outbound call.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Boxed future returned by [`TokenHttpClient::post_json`].
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Raw response captured from the token service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl HttpReply {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP transports able to reach the token service.
///
/// Implementations must be `Send + Sync + 'static` so a single instance can be shared by every
/// request the server handles. Each call is a single attempt; retrying is never the transport's
/// job.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// POSTs `body` as JSON to `url`, authenticating with `secret`.
	fn post_json<'a>(
		&'a self,
		url: &'a Url,
		secret: &'a ProviderSecret,
		body: Vec<u8>,
	) -> HttpFuture<'a, HttpReply>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The token service answers directly, so redirects are never followed. Configure any custom
/// [`ReqwestClient`] the same way before handing it to [`ReqwestHttpClient::with_client`].
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds the default client, optionally bounding each call by `timeout`.
	pub fn build(timeout: Option<std::time::Duration>) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder().redirect(Policy::none());

		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}

		Ok(Self(builder.build()?))
	}
}
impl TokenHttpClient for ReqwestHttpClient {
	fn post_json<'a>(
		&'a self,
		url: &'a Url,
		secret: &'a ProviderSecret,
		body: Vec<u8>,
	) -> HttpFuture<'a, HttpReply> {
		Box::pin(async move {
			let response = self
				.0
				.post(url.clone())
				.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
				.header(API_KEY_HEADER, secret.expose())
				.body(body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(HttpReply { status, body })
		})
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
