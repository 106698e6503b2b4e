//! HTTP surface: one CORS-aware route that hands out tokens.

// crates.io
use axum::{
	Json, Router,
	extract::{Request, State},
	http::{
		HeaderValue, Method, StatusCode,
		header::{
			ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
			ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, VARY,
		},
	},
	middleware::{self, Next},
	response::{IntoResponse, Response},
	routing::any,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
// self
use crate::{
	_prelude::*,
	config::IssuerConfig,
	error::ConfigError,
	flows::Broker,
	http::{ReqwestHttpClient, TokenHttpClient},
};

/// Shared state handed to the token route.
pub struct AppState<C>
where
	C: TokenHttpClient,
{
	/// Broker minting every token.
	pub broker: Arc<Broker<C>>,
	/// Replace provider and transport messages with [`Error::FALLBACK_MESSAGE`].
	pub redact_provider_errors: bool,
}
impl<C> AppState<C>
where
	C: TokenHttpClient,
{
	/// Wraps a broker; provider messages are passed through verbatim.
	pub fn new(broker: Broker<C>) -> Self {
		Self { broker: Arc::new(broker), redact_provider_errors: false }
	}

	/// Toggles provider error redaction.
	pub fn redact_provider_errors(mut self, redact: bool) -> Self {
		self.redact_provider_errors = redact;

		self
	}
}
impl AppState<ReqwestHttpClient> {
	/// Builds the state the binary serves with.
	pub fn from_config(config: &IssuerConfig) -> Result<Self, ConfigError> {
		Ok(Self::new(Broker::from_config(config)?)
			.redact_provider_errors(config.redact_provider_errors))
	}
}
impl<C> Clone for AppState<C>
where
	C: TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self { broker: self.broker.clone(), redact_provider_errors: self.redact_provider_errors }
	}
}
impl<C> Debug for AppState<C>
where
	C: TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppState")
			.field("broker", &self.broker)
			.field("redact_provider_errors", &self.redact_provider_errors)
			.finish()
	}
}

/// Failures the token route turns into JSON error responses.
#[derive(Debug, ThisError)]
pub enum Rejection {
	/// Anything other than `GET` or `OPTIONS`.
	#[error("Method not allowed")]
	MethodNotAllowed,
	/// Issuance failed.
	#[error("{source}")]
	Issue {
		/// Underlying broker failure.
		source: Error,
		/// Hide provider and transport text from the caller.
		redact: bool,
	},
}
impl Rejection {
	/// Status code sent to the caller.
	pub fn status(&self) -> StatusCode {
		match self {
			Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
			Self::Issue { .. } => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Text placed in the `error` field of the response body.
	pub fn message(&self) -> String {
		match self {
			Self::MethodNotAllowed => self.to_string(),
			Self::Issue { source: source @ Error::Config(_), .. } => source.client_message(),
			Self::Issue { redact: true, .. } => Error::FALLBACK_MESSAGE.into(),
			Self::Issue { source, .. } => source.client_message(),
		}
	}
}
impl IntoResponse for Rejection {
	fn into_response(self) -> Response {
		let status = self.status();

		if matches!(self, Self::MethodNotAllowed) {
			tracing::debug!("Rejected request with unsupported method.");
		}

		(status, Json(ErrorBody { error: self.message() })).into_response()
	}
}

#[derive(Debug, Serialize)]
struct TokenBody {
	token: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
}

/// Builds the router serving tokens at `path`.
///
/// Every response, including 404s for other paths, carries the CORS headers.
pub fn router<C>(state: AppState<C>, path: &str) -> Router
where
	C: TokenHttpClient,
{
	Router::new()
		.route(path, any(handle_token::<C>))
		.fallback(not_found)
		.layer(middleware::from_fn(cors))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

/// Serves `router` on `listener` until Ctrl-C or SIGTERM arrives.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
	axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await
}

async fn handle_token<C>(
	State(state): State<AppState<C>>,
	method: Method,
) -> Result<Response, Rejection>
where
	C: TokenHttpClient,
{
	match method {
		Method::OPTIONS => Ok(StatusCode::NO_CONTENT.into_response()),
		Method::GET => {
			let token = state.broker.issue_token().await.map_err(|source| Rejection::Issue {
				source,
				redact: state.redact_provider_errors,
			})?;

			Ok(Json(TokenBody { token: token.into_inner() }).into_response())
		},
		_ => Err(Rejection::MethodNotAllowed),
	}
}

async fn not_found() -> Response {
	(StatusCode::NOT_FOUND, Json(ErrorBody { error: "Not found".into() })).into_response()
}

async fn cors(request: Request, next: Next) -> Response {
	let origin = request
		.headers()
		.get(ORIGIN)
		.filter(|value| !value.is_empty())
		.cloned()
		.unwrap_or_else(|| HeaderValue::from_static("*"));
	let mut response = next.run(request).await;
	let headers = response.headers_mut();

	headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
	headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET,OPTIONS"));
	headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type"));
	headers.insert(VARY, HeaderValue::from_static("Origin"));

	response
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = signal::ctrl_c().await {
			tracing::warn!(error = %e, "Ctrl-C handler unavailable.");
			std::future::pending::<()>().await;
		}
	};
	#[cfg(unix)]
	let terminate = async {
		match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			},
			Err(e) => {
				tracing::warn!(error = %e, "SIGTERM handler unavailable.");
				std::future::pending::<()>().await;
			},
		}
	};
	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down."),
		_ = terminate => tracing::info!("Received SIGTERM, shutting down."),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use axum::body::Body;
	use http_body_util::BodyExt;
	use tower::ServiceExt;
	// self
	use super::*;
	use crate::{
		auth::ProviderSecret,
		error::{ProviderError, TransportError},
		http::{HttpFuture, HttpReply},
		provider::{IssuancePolicy, TokenEndpoint},
	};

	struct FixedHttpClient(HttpReply);
	impl TokenHttpClient for FixedHttpClient {
		fn post_json<'a>(
			&'a self,
			_: &'a Url,
			_: &'a ProviderSecret,
			_: Vec<u8>,
		) -> HttpFuture<'a, HttpReply> {
			let reply = self.0.clone();

			Box::pin(async move { Ok::<_, TransportError>(reply) })
		}
	}

	fn app(secret: Option<&str>, status: u16, body: &str) -> Router {
		let broker = Broker::<FixedHttpClient>::with_http_client(
			TokenEndpoint::gemini().expect("Default endpoint should parse."),
			IssuancePolicy::default(),
			FixedHttpClient(HttpReply { status, body: body.as_bytes().to_vec() }),
		)
		.with_optional_secret(secret.and_then(ProviderSecret::new));

		router(AppState::new(broker), "/token")
	}

	async fn send(app: Router, method: &str, uri: &str, origin: Option<&str>) -> Response {
		let mut request = axum::http::Request::builder().method(method).uri(uri);

		if let Some(origin) = origin {
			request = request.header(ORIGIN, origin);
		}

		app.oneshot(request.body(Body::empty()).expect("Request should build."))
			.await
			.expect("Router is infallible.")
	}

	async fn json(response: Response) -> serde_json::Value {
		let bytes = response
			.into_body()
			.collect()
			.await
			.expect("Body should be readable.")
			.to_bytes();

		serde_json::from_slice(&bytes).expect("Body should be JSON.")
	}

	fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
		response.headers().get(name).and_then(|value| value.to_str().ok())
	}

	#[tokio::test]
	async fn preflight_is_empty_no_content_even_without_secret() {
		let response = send(app(None, 200, "{}"), "OPTIONS", "/token", None).await;

		assert_eq!(response.status(), StatusCode::NO_CONTENT);
		assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
		assert_eq!(header(&response, "access-control-allow-methods"), Some("GET,OPTIONS"));
		assert_eq!(header(&response, "access-control-allow-headers"), Some("Content-Type"));
		assert_eq!(header(&response, "vary"), Some("Origin"));

		let bytes =
			response.into_body().collect().await.expect("Body should be readable.").to_bytes();

		assert!(bytes.is_empty());
	}

	#[tokio::test]
	async fn other_methods_are_rejected_before_secret_check() {
		for method in ["POST", "PUT", "DELETE", "PATCH"] {
			let response = send(app(None, 200, "{}"), method, "/token", None).await;

			assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
			assert_eq!(json(response).await, serde_json::json!({ "error": "Method not allowed" }));
		}
	}

	#[tokio::test]
	async fn get_returns_token_and_echoes_origin() {
		let response = send(
			app(Some("sk"), 200, r#"{"name":"auth_tokens/xyz"}"#),
			"GET",
			"/token",
			Some("https://app.example"),
		)
		.await;

		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(header(&response, "access-control-allow-origin"), Some("https://app.example"));
		assert_eq!(json(response).await, serde_json::json!({ "token": "auth_tokens/xyz" }));
	}

	#[tokio::test]
	async fn empty_origin_counts_as_absent() {
		let response = send(app(None, 200, "{}"), "OPTIONS", "/token", Some("")).await;

		assert_eq!(response.status(), StatusCode::NO_CONTENT);
		assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
	}

	#[tokio::test]
	async fn unknown_paths_still_carry_cors_headers() {
		let response = send(app(Some("sk"), 200, "{}"), "GET", "/elsewhere", None).await;

		assert_eq!(response.status(), StatusCode::NOT_FOUND);
		assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
		assert_eq!(header(&response, "vary"), Some("Origin"));
	}

	#[test]
	fn redaction_spares_configuration_errors() {
		let missing = Rejection::Issue {
			source: ConfigError::MissingSecret { var: "GEMINI_API_KEY" }.into(),
			redact: true,
		};
		let rejected = Rejection::Issue {
			source: ProviderError::Rejected { status: 403, message: Some("quota".into()) }.into(),
			redact: true,
		};
		let verbatim = Rejection::Issue {
			source: ProviderError::Rejected { status: 403, message: Some("quota".into()) }.into(),
			redact: false,
		};

		assert_eq!(missing.message(), "Missing GEMINI_API_KEY in environment");
		assert_eq!(rejected.message(), "Token issuance failed.");
		assert_eq!(verbatim.message(), "quota");
		assert_eq!(verbatim.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(Rejection::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
	}
}
