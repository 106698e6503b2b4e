//! Provider-facing policy (data), request descriptors (wire), and the `auth_tokens` endpoint.
//!
//! `policy` exposes the validated [`IssuancePolicy`] that fixes usage budget, expiry windows,
//! model, and session constraints for every minted token. `request` turns that policy into a
//! per-request [`TokenRequestDescriptor`] serialized exactly as the token service expects, and
//! `endpoint` knows where to send it and how to read the answer.

pub mod endpoint;
pub mod policy;
pub mod request;

pub use endpoint::*;
pub use policy::*;
pub use request::*;
