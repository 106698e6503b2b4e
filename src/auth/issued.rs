//! Tokens minted by the token service on behalf of a browser client.

// self
use crate::_prelude::*;

/// Opaque, single-use, time-bounded token handed to the browser.
///
/// The broker never inspects the value; it is the `name` the token service returned and is
/// forwarded verbatim.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IssuedToken(String);
impl IssuedToken {
	/// Wraps the token name returned by the service.
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	/// Returns the token name exactly as the service produced it.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Consumes the wrapper and returns the token name.
	pub fn into_inner(self) -> String {
		self.0
	}
}
impl Debug for IssuedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("IssuedToken").field(&"<redacted>").finish()
	}
}
