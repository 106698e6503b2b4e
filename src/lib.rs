//! Mint single-use, short-lived Gemini Live auth tokens for browsers without ever shipping the
//! provider API key.
//!
//! The crate is layered the same way from the wire outwards: [`http`] moves bytes, [`provider`]
//! owns the `auth_tokens` contract, [`flows`] orchestrates one issuance, and [`server`] exposes
//! the single CORS-aware HTTP endpoint.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;
pub mod server;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
// Consumed by the binary target only.
use color_eyre as _;
#[cfg(test)] use {http_body_util as _, httpmock as _, tower as _};
