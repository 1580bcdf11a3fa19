use actix_web::{App, HttpResponse, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use accountd::{
  adapters::http::{RequestIdMiddleware, configure_auth_routes},
  application::auth::{
    LoginUserUseCase, RegisterUserUseCase, ResendVerificationUseCase, VerifyEmailUseCase,
  },
  domain::auth::{
    ports::{AccountRepository, EmailSender},
    services::{AuthService, AuthServiceConfig, AuthServiceDependencies},
  },
  infrastructure::{
    config::{Config, DatabaseConfig, EmailConfig, EmailProvider},
    email::{HttpEmailSender, HttpEmailSenderConfig, LogEmailSender},
    persistence::{InMemoryAccountRepository, PostgresAccountRepository},
    security::{Argon2PasswordHasher, JwtLoginTokenIssuer, JwtSigner, SecureVerificationIssuer},
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "accountd=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting accountd");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  let account_repo = account_repository(&config.database).await?;
  let email_sender = email_sender(&config.email)?;

  // Initialize security services
  let signer = Arc::new(
    JwtSigner::new(&config.security.jwt_secret).context("Invalid security.jwt_secret")?,
  );
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().context("Failed to create password hasher")?);
  let verification_issuer = Arc::new(SecureVerificationIssuer::new(signer.clone()));
  let login_token_issuer = Arc::new(JwtLoginTokenIssuer::new(
    signer,
    seconds(
      "security.login_token_ttl_seconds",
      config.security.login_token_ttl_seconds,
    )?,
  ));

  let auth_config = AuthServiceConfig {
    verification_method: config.verification.method,
    code_ttl: seconds(
      "verification.code_ttl_seconds",
      config.verification.code_ttl_seconds,
    )?,
    link_ttl: seconds(
      "verification.link_ttl_seconds",
      config.verification.link_ttl_seconds,
    )?,
    link_base_url: config.verification.link_base_url.clone(),
  };
  tracing::info!(method = %auth_config.verification_method, "Email verification configured");

  let auth_service = Arc::new(AuthService::new(
    AuthServiceDependencies {
      account_repo,
      password_hasher,
      verification_issuer,
      login_token_issuer,
      email_sender,
    },
    auth_config,
  ));

  // Initialize use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let verify_email_use_case = Arc::new(VerifyEmailUseCase::new(auth_service.clone()));
  let resend_use_case = Arc::new(ResendVerificationUseCase::new(auth_service.clone()));

  let bind_address = (config.server.host.clone(), config.server.port);
  tracing::info!(
    "Starting HTTP server on {}:{}",
    config.server.host,
    config.server.port
  );

  HttpServer::new(move || {
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .route("/health", web::get().to(health_check))
      .service(web::scope("/api/auth").configure(|cfg| {
        configure_auth_routes(
          cfg,
          register_use_case.clone(),
          login_use_case.clone(),
          verify_email_use_case.clone(),
          resend_use_case.clone(),
        )
      }))
  })
  .bind(bind_address)
  .context("Failed to bind HTTP server")?
  .run()
  .await
  .context("HTTP server error")?;

  Ok(())
}

/// Connects to Postgres and runs migrations, or falls back to memory without a URL
async fn account_repository(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn AccountRepository>> {
  let Some(url) = config.url.as_deref() else {
    tracing::warn!(
      "database.url is not set; accounts are kept in memory and lost on restart"
    );
    return Ok(Arc::new(InMemoryAccountRepository::new()));
  };

  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.max_connections)
      .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
      .connect(url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.connect_timeout_seconds
    );
    anyhow::anyhow!(
      "Database connection timed out after {} seconds",
      config.connect_timeout_seconds
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => anyhow::anyhow!("Could not connect to database. Is PostgreSQL running?"),
      _ => anyhow::anyhow!("Database error: {}", e),
    }
  })?;

  tracing::info!("Database connection pool created");

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  Ok(Arc::new(PostgresAccountRepository::new(db_pool)))
}

fn email_sender(config: &EmailConfig) -> anyhow::Result<Arc<dyn EmailSender>> {
  match config.provider {
    EmailProvider::Log => {
      tracing::warn!("email.provider is `log`; verification emails are only written to the log");
      Ok(Arc::new(LogEmailSender))
    }
    EmailProvider::Http => {
      let sender = HttpEmailSender::new(HttpEmailSenderConfig {
        api_url: config
          .api_url
          .clone()
          .context("email.api_url is required for the http provider")?,
        api_key: config.api_key.clone().unwrap_or_default(),
        sender_email: config.sender_email.clone().unwrap_or_default(),
        sender_name: config.sender_name.clone(),
        timeout: Duration::from_secs(config.timeout_seconds),
      })
      .context("Invalid email configuration")?;
      Ok(Arc::new(sender))
    }
  }
}

/// Longest lifetime accepted for tokens and codes
const MAX_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

fn seconds(name: &str, value: u64) -> anyhow::Result<chrono::Duration> {
  if value == 0 || value > MAX_TTL_SECONDS {
    anyhow::bail!("{name} must be between 1 and {MAX_TTL_SECONDS} seconds, got {value}");
  }
  chrono::Duration::try_seconds(value as i64).context(format!("{name} is out of range"))
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
  HttpResponse::Ok().body("OK")
}
