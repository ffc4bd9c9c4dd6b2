pub mod claims;
pub mod identity;
pub mod jwt;
pub mod utils;

pub use claims::Claims;
pub use identity::{resolve_identity, AuthenticatedUser, CallerIdentity};
pub use jwt::JwtService;
pub use utils::{identity_from_context, require_user_from_context};
