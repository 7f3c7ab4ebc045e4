pub mod identity;

pub use identity::{CurrentIdentity, Identity, attach_identity, current_identity};
