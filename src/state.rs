//! Shared application state: configuration plus the user store.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;
use crate::store::{PgUserStore, UserStore};

/// State handed to every handler. Cloning is cheap: both fields are `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build production state: read configuration, connect to PostgreSQL and
    /// run pending migrations.
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(config.database.connect_options())
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("run database migrations")?;

        tracing::info!("database connection successful");

        Ok(Self::from_parts(Arc::new(PgUserStore::new(pool)), config))
    }

    pub fn from_parts(store: Arc<dyn UserStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// State backed by an in-memory store, for tests that exercise handlers
    /// without a database.
    pub fn fake() -> Self {
        use std::sync::Mutex;

        use axum::async_trait;
        use time::OffsetDateTime;

        use crate::config::DatabaseConfig;
        use crate::store::{NewUser, StoreError, User};

        #[derive(Default)]
        struct MemoryStore {
            users: Mutex<Vec<User>>,
        }

        #[async_trait]
        impl UserStore for MemoryStore {
            async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
                let mut users = self.users.lock().expect("store mutex poisoned");
                if users.iter().any(|u| u.email == new_user.email) {
                    return Err(StoreError::DuplicateEmail);
                }
                let now = OffsetDateTime::now_utc();
                let user = User {
                    id: users.len() as i64 + 1,
                    username: new_user.username,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                };
                users.push(user.clone());
                Ok(user)
            }

            async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
                let users = self.users.lock().expect("store mutex poisoned");
                Ok(users
                    .iter()
                    .find(|u| u.email == email && u.deleted_at.is_none())
                    .cloned())
            }
        }

        let config = AppConfig {
            database: DatabaseConfig {
                host: "localhost".into(),
                port: 5432,
                user: "postgres".into(),
                password: String::new(),
                name: "postgres".into(),
            },
            port: 3000,
        };

        Self::from_parts(Arc::new(MemoryStore::default()), config)
    }
}
