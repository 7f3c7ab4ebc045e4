pub mod access_jwt;
pub mod factory;
pub mod jwt;
pub mod login;
pub mod password;
pub mod role;

pub use access_jwt::{AuthService, VerifiedAccessToken};
pub use factory::{build_account_repo, build_auth_service, build_login_service};
pub use jwt::{JwtIssuer, TokenClaims};
pub use login::{LoginOutcome, LoginService};
pub use role::Role;
