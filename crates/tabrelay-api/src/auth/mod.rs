//! Handshake authentication.
//!
//! Resolves the caller's [`UserId`](tabrelay_protocols::UserId) before a
//! connection is handed to the registry. The registry itself never sees
//! credentials.

mod extract;
mod verifier;

pub use extract::{AuthenticatedUser, bearer_token, query_token};
pub use verifier::{JwtVerifier, StaticTokenVerifier, TokenVerifier, verifier_from_config};
