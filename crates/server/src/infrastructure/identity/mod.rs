mod firebase;
mod static_tokens;

pub use firebase::{DEFAULT_IDENTITY_ENDPOINT, FirebaseTokenVerifier};
pub use static_tokens::StaticTokenVerifier;
