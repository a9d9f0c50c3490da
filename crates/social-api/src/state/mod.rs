//! Shared handler state
//!
//! One [`ServiceContext`] plus the loaded configuration. Both constructors
//! derive the token signer and reaction tuning from the same [`AppConfig`].

use std::sync::Arc;

use social_common::{AppConfig, JwtService};
use social_db::{MemoryStore, PgPool};
use social_service::ServiceContext;

#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }

    /// State backed by PostgreSQL, with row locks bounded by `DB_LOCK_TIMEOUT_MS`
    pub fn postgres(pool: PgPool, config: AppConfig) -> Self {
        let context = ServiceContext::postgres(
            pool,
            config.database.lock_timeout(),
            Self::signer(&config),
            config.reactions.clone(),
        );
        Self::new(context, config)
    }

    /// State backed by a process-local store; nothing survives a restart
    pub fn in_memory(store: MemoryStore, config: AppConfig) -> Self {
        let context = ServiceContext::in_memory(store, Self::signer(&config), config.reactions.clone());
        Self::new(context, config)
    }

    fn signer(config: &AppConfig) -> Arc<JwtService> {
        Arc::new(JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry,
        ))
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Token verifier used by the `AuthUser` extractor
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("env", &self.config.app.env)
            .finish_non_exhaustive()
    }
}
