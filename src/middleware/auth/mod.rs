//! Request authentication and authorization.
//!
//! Order on a protected route: `access` (validate token, attach identity)
//! then, for admin routes, `admin` (capability check), then the handler.

pub mod access;
pub mod admin;
