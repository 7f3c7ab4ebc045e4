/*
 * Responsibility
 * - Public interface of the middleware layers
 * - auth (token check + admin guard), cors, http, security_headers
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
