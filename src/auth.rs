//! Credentials handled by the broker: the server-held provider secret and the tokens it mints.

pub mod issued;
pub mod secret;

pub use issued::*;
pub use secret::*;
