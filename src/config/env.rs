//! Environment access behind a trait so configuration can be read from the process or a map.

// std
use std::{collections::HashMap, env::VarError};

/// Read-only view over environment variables.
pub trait ReadEnv {
	/// Returns the value of `key`, mirroring [`std::env::var`].
	fn var(&self, key: &str) -> Result<String, VarError>;
}

/// Zero-sized type delegating to [`std::env`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnv;
impl ReadEnv for SystemEnv {
	#[inline]
	fn var(&self, key: &str) -> Result<String, VarError> {
		std::env::var(key)
	}
}

/// Map-backed environment for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct InMemoryEnv(HashMap<String, String>);
impl InMemoryEnv {
	/// Creates an empty environment.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `key` to `value`, returning the updated environment.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.0.insert(key.into(), value.into());

		self
	}
}
impl ReadEnv for InMemoryEnv {
	fn var(&self, key: &str) -> Result<String, VarError> {
		self.0.get(key).cloned().ok_or(VarError::NotPresent)
	}
}
impl<K, V> FromIterator<(K, V)> for InMemoryEnv
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}
