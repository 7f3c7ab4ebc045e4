/*!
 * Request-scoped identity
 *
 * Responsibility:
 * - The authenticated caller (Identity) as handlers see it
 * - Write-once attachment into request extensions, read-many access
 * - axum-facing pieces live in core, the type in types
 *
 * Public API:
 * - Identity
 * - CurrentIdentity
 * - attach_identity / current_identity
 */

mod core;
mod types;

pub use core::{CurrentIdentity, attach_identity, current_identity};
pub use types::Identity;
