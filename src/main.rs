//! Token broker binary.

// crates.io
use clap::Parser;
use tokio::net::TcpListener;
// self
use live_token_broker::{
	config::{self, Cli, IssuerConfig, SystemEnv},
	obs,
	server::{self, AppState},
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let dotenv = config::load_dotenv();

	obs::init_tracing();

	if let Some(path) = dotenv {
		tracing::debug!(path = %path.display(), "Loaded .env file.");
	}

	let cli = Cli::parse();
	let config = IssuerConfig::from_env(&SystemEnv)?.with_cli(&cli)?;

	if config.secret.is_none() {
		tracing::warn!(
			var = IssuerConfig::SECRET_VAR,
			"Provider secret is not set; token requests will fail until it is configured."
		);
	}

	let state = AppState::from_config(&config)?;
	let router = server::router(state, &config.path);
	let listener = TcpListener::bind(config.bind).await?;

	tracing::info!(
		addr = %listener.local_addr()?,
		path = %config.path,
		base_url = %config.endpoint.base_url(),
		"Token broker listening."
	);

	server::serve(listener, router).await?;

	Ok(())
}
