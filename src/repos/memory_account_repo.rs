//! Process-local account store.
//!
//! Used when no `DATABASE_URL` is configured and by the test suite. Contents
//! are lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::account_repo::{AccountRepo, AccountRow, NewAccount};
use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Default)]
pub struct InMemoryAccountRepo {
    rows: RwLock<HashMap<Uuid, AccountRow>>,
}

impl InMemoryAccountRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepo for InMemoryAccountRepo {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<AccountRow>> {
        let rows = self.rows.read().await;
        Ok(rows.values().find(|r| r.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AccountRow>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn insert(&self, account: NewAccount) -> RepoResult<AccountRow> {
        let mut rows = self.rows.write().await;
        if rows.values().any(|r| r.email == account.email) {
            return Err(RepoError::Conflict);
        }

        let row = AccountRow {
            id: Uuid::new_v4(),
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            first_name: account.first_name,
            last_name: account.last_name,
            created_at: Utc::now(),
        };
        rows.insert(row.id, row.clone());

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: "intervenant".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let repo = InMemoryAccountRepo::new();
        let row = repo.insert(account("ada@arrow.test")).await.unwrap();

        let by_email = repo.find_by_email("ada@arrow.test").await.unwrap().unwrap();
        assert_eq!(by_email.id, row.id);

        let by_id = repo.find_by_id(row.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "ada@arrow.test");

        assert!(repo.find_by_email("nobody@arrow.test").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = InMemoryAccountRepo::new();
        repo.insert(account("ada@arrow.test")).await.unwrap();

        let err = repo.insert(account("ada@arrow.test")).await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict));
    }
}
