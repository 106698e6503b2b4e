//! Process configuration, read once at startup.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `GEMINI_API_KEY` | unset | Provider secret; requests fail with 500 while it is missing |
//! | `LIVE_TOKEN_BIND` | `0.0.0.0:3000` | Listen address |
//! | `LIVE_TOKEN_PATH` | `/token` | Route serving tokens |
//! | `GEMINI_API_BASE_URL` | `https://generativelanguage.googleapis.com` | Token service host |
//! | `LIVE_TOKEN_UPSTREAM_TIMEOUT_SECS` | unset | Bound on each outbound call |
//! | `LIVE_TOKEN_REDACT_PROVIDER_ERRORS` | `false` | Hide provider text from browsers |

pub mod env;

pub use env::*;

// std
use std::{net::SocketAddr, path::PathBuf};
// crates.io
use clap::Parser;
// self
use crate::{_prelude::*, auth::ProviderSecret, error::ConfigError, provider::TokenEndpoint};

/// Command-line overrides applied on top of the environment.
#[derive(Clone, Debug, Default, Parser)]
#[command(name = "live-token-broker", version, about)]
pub struct Cli {
	/// Address to listen on; overrides `LIVE_TOKEN_BIND`.
	#[arg(short, long, value_name = "ADDR")]
	pub bind: Option<SocketAddr>,
	/// Route serving tokens; overrides `LIVE_TOKEN_PATH`.
	#[arg(short, long, value_name = "PATH")]
	pub path: Option<String>,
}

/// Settings for the token issuer, immutable once loaded.
#[derive(Clone, Debug)]
pub struct IssuerConfig {
	/// Provider secret; `None` keeps the server up but fails every issuance.
	pub secret: Option<ProviderSecret>,
	/// Listen address.
	pub bind: SocketAddr,
	/// Route serving tokens.
	pub path: String,
	/// Token service location.
	pub endpoint: TokenEndpoint,
	/// Optional bound on each outbound call; unbounded when `None`.
	pub upstream_timeout: Option<std::time::Duration>,
	/// Replace provider and transport messages with a generic one before they reach browsers.
	pub redact_provider_errors: bool,
}
impl IssuerConfig {
	/// Variable holding the provider secret.
	pub const SECRET_VAR: &'static str = "GEMINI_API_KEY";
	/// Variable holding the listen address.
	pub const BIND_VAR: &'static str = "LIVE_TOKEN_BIND";
	/// Variable holding the route path.
	pub const PATH_VAR: &'static str = "LIVE_TOKEN_PATH";
	/// Variable overriding the token service host.
	pub const BASE_URL_VAR: &'static str = "GEMINI_API_BASE_URL";
	/// Variable bounding outbound calls, in seconds.
	pub const TIMEOUT_VAR: &'static str = "LIVE_TOKEN_UPSTREAM_TIMEOUT_SECS";
	/// Variable toggling provider error redaction.
	pub const REDACT_VAR: &'static str = "LIVE_TOKEN_REDACT_PROVIDER_ERRORS";
	/// Default listen address.
	pub const DEFAULT_BIND: &'static str = "0.0.0.0:3000";
	/// Default route path.
	pub const DEFAULT_PATH: &'static str = "/token";

	/// Reads the configuration from `env`.
	///
	/// A missing secret is not an error here; it only fails the requests that need it.
	pub fn from_env<E>(env: &E) -> Result<Self, ConfigError>
	where
		E: ReadEnv,
	{
		let secret = non_empty(env, Self::SECRET_VAR).and_then(ProviderSecret::new);
		let bind = non_empty(env, Self::BIND_VAR)
			.unwrap_or_else(|| Self::DEFAULT_BIND.into())
			.parse::<SocketAddr>()
			.map_err(|e| ConfigError::invalid_env(Self::BIND_VAR, e))?;
		let path = match non_empty(env, Self::PATH_VAR) {
			Some(path) => validate_path(Self::PATH_VAR, path)?,
			None => Self::DEFAULT_PATH.into(),
		};
		let endpoint = match non_empty(env, Self::BASE_URL_VAR) {
			Some(raw) => TokenEndpoint::parse(&raw)?,
			None => TokenEndpoint::gemini()?,
		};
		let upstream_timeout = non_empty(env, Self::TIMEOUT_VAR)
			.map(|raw| parse_timeout(Self::TIMEOUT_VAR, &raw))
			.transpose()?;
		let redact_provider_errors = non_empty(env, Self::REDACT_VAR)
			.map(|raw| parse_bool(Self::REDACT_VAR, &raw))
			.transpose()?
			.unwrap_or(false);

		Ok(Self { secret, bind, path, endpoint, upstream_timeout, redact_provider_errors })
	}

	/// Applies command-line overrides.
	pub fn with_cli(mut self, cli: &Cli) -> Result<Self, ConfigError> {
		if let Some(bind) = cli.bind {
			self.bind = bind;
		}
		if let Some(path) = &cli.path {
			self.path = validate_path("--path", path.clone())?;
		}

		Ok(self)
	}
}

/// Loads a `.env` file from the working directory or its parents, if one exists.
pub fn load_dotenv() -> Option<PathBuf> {
	dotenvy::dotenv().ok()
}

fn non_empty<E>(env: &E, key: &str) -> Option<String>
where
	E: ReadEnv,
{
	env.var(key).ok().map(|value| value.trim().to_owned()).filter(|value| !value.is_empty())
}

fn validate_path(var: &'static str, path: String) -> Result<String, ConfigError> {
	if !path.starts_with('/') {
		return Err(ConfigError::invalid_env(var, "path must start with `/`"));
	}
	if path.chars().any(char::is_whitespace) {
		return Err(ConfigError::invalid_env(var, "path must not contain whitespace"));
	}

	Ok(path)
}

fn parse_timeout(var: &'static str, raw: &str) -> Result<std::time::Duration, ConfigError> {
	let secs = raw.parse::<u64>().map_err(|e| ConfigError::invalid_env(var, e))?;

	if secs == 0 {
		return Err(ConfigError::invalid_env(var, "timeout must be at least one second"));
	}

	Ok(std::time::Duration::from_secs(secs))
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
	match raw.to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		other => Err(ConfigError::invalid_env(var, format!("`{other}` is not a boolean"))),
	}
}
