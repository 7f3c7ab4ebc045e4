pub mod account_repo;
pub mod error;
pub mod memory_account_repo;

pub use account_repo::{AccountRepo, AccountRow, NewAccount, PgAccountRepo};
pub use memory_account_repo::InMemoryAccountRepo;
