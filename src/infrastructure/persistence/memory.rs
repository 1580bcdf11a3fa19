use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::auth::{
  entities::Account,
  errors::{AuthError, RepositoryError},
  ports::AccountRepository,
  value_objects::Email,
};

/// Process-local account store used when no database is configured
///
/// Accounts are lost on restart.
#[derive(Default)]
pub struct InMemoryAccountRepository {
  accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
  async fn create(&self, account: Account) -> Result<Account, AuthError> {
    let mut accounts = self.accounts.write().await;

    if accounts.values().any(|a| a.email == account.email) {
      return Err(AuthError::Repository(RepositoryError::DuplicateKey(
        "accounts_email_key".to_string(),
      )));
    }
    if accounts.contains_key(&account.id) {
      return Err(AuthError::Repository(RepositoryError::DuplicateKey(
        "accounts_pkey".to_string(),
      )));
    }

    accounts.insert(account.id, account.clone());
    Ok(account)
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AuthError> {
    let accounts = self.accounts.read().await;
    Ok(
      accounts
        .values()
        .find(|a| a.email == email.as_str())
        .cloned(),
    )
  }

  async fn update(&self, account: Account) -> Result<Account, AuthError> {
    let mut accounts = self.accounts.write().await;

    if !accounts.contains_key(&account.id) {
      return Err(AuthError::Repository(RepositoryError::NotFound));
    }
    if accounts
      .values()
      .any(|a| a.id != account.id && a.email == account.email)
    {
      return Err(AuthError::EmailAlreadyExists);
    }

    accounts.insert(account.id, account.clone());
    Ok(account)
  }
}
