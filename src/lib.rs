//! Arrow backend: authentication, identity and admin-capability gating for
//! the cohort management API.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
