//! Bearer token authentication.

pub mod extractor;
pub mod jwt;
pub mod layer;
pub mod types;

pub use extractor::{Auth, CurrentPrincipal, MaybePrincipal};
pub use jwt::{decode_token, encode_token};
pub use layer::{AuthLayer, AuthMiddleware};
pub use types::{AuthUser, Claims, TokenType};
