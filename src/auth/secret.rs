//! Provider secret wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Server-held credential authorizing calls to the token service.
///
/// The value is loaded once at startup and never leaves the process; formatters redact it so it
/// cannot leak through logs or error chains.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSecret(String);
impl ProviderSecret {
	/// Wraps a secret, treating blank values as absent.
	pub fn new(value: impl Into<String>) -> Option<Self> {
		let value = value.into();

		if value.trim().is_empty() { None } else { Some(Self(value)) }
	}

	/// Returns the inner secret. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for ProviderSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ProviderSecret").field(&"<redacted>").finish()
	}
}
impl Display for ProviderSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
