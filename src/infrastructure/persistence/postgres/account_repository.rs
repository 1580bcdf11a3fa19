use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::Account,
  errors::{AuthError, RepositoryError},
  ports::AccountRepository,
  value_objects::Email,
};

/// PostgreSQL implementation of the AccountRepository trait
pub struct PostgresAccountRepository {
  pool: PgPool,
}

impl PostgresAccountRepository {
  /// Creates a new instance of PostgresAccountRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for accounts table
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
  id: Uuid,
  email: String,
  password_hash: String,
  is_verified: bool,
  verification_code_hash: Option<String>,
  verification_code_expires_at: Option<DateTime<Utc>>,
  verification_token_hash: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
  fn from(row: AccountRow) -> Self {
    Account::from_db(
      row.id,
      row.email,
      row.password_hash,
      row.is_verified,
      row.verification_code_hash,
      row.verification_code_expires_at,
      row.verification_token_hash,
      row.created_at,
      row.updated_at,
    )
  }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
  async fn create(&self, account: Account) -> Result<Account, AuthError> {
    let row = sqlx::query_as::<_, AccountRow>(
      r#"
            INSERT INTO accounts (
                id,
                email,
                password_hash,
                is_verified,
                verification_code_hash,
                verification_code_expires_at,
                verification_token_hash,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                id,
                email,
                password_hash,
                is_verified,
                verification_code_hash,
                verification_code_expires_at,
                verification_token_hash,
                created_at,
                updated_at
            "#,
    )
    .bind(account.id)
    .bind(&account.email)
    .bind(&account.password_hash)
    .bind(account.is_verified)
    .bind(&account.verification_code_hash)
    .bind(account.verification_code_expires_at)
    .bind(&account.verification_token_hash)
    .bind(account.created_at)
    .bind(account.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AuthError> {
    let row = sqlx::query_as::<_, AccountRow>(
      r#"
            SELECT
                id,
                email,
                password_hash,
                is_verified,
                verification_code_hash,
                verification_code_expires_at,
                verification_token_hash,
                created_at,
                updated_at
            FROM accounts
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn update(&self, account: Account) -> Result<Account, AuthError> {
    let result = sqlx::query_as::<_, AccountRow>(
      r#"
            UPDATE accounts
            SET
                email = $2,
                password_hash = $3,
                is_verified = $4,
                verification_code_hash = $5,
                verification_code_expires_at = $6,
                verification_token_hash = $7,
                updated_at = $8
            WHERE id = $1
            RETURNING
                id,
                email,
                password_hash,
                is_verified,
                verification_code_hash,
                verification_code_expires_at,
                verification_token_hash,
                created_at,
                updated_at
            "#,
    )
    .bind(account.id)
    .bind(&account.email)
    .bind(&account.password_hash)
    .bind(account.is_verified)
    .bind(&account.verification_code_hash)
    .bind(account.verification_code_expires_at)
    .bind(&account.verification_token_hash)
    .bind(account.updated_at)
    .fetch_one(&self.pool)
    .await;

    match result {
      Ok(row) => Ok(row.into()),
      Err(sqlx::Error::RowNotFound) => Err(AuthError::Repository(RepositoryError::NotFound)),
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
        Err(AuthError::EmailAlreadyExists)
      }
      Err(e) => Err(e.into()),
    }
  }
}
