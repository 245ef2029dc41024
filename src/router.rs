use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::api::PortalClient;
use crate::auth::TokenKeys;
use crate::config::Config;
use crate::db::models::{Commercialization, Export, Import, Processing, Production};
use crate::db::{Dataset, Storage};
use crate::error::VitiError;
use crate::handlers::{datasets, refresh, users};

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub tokens: Arc<TokenKeys>,
    pub portal: Arc<PortalClient>,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(storage: Storage, cfg: &Config) -> Result<Self, VitiError> {
        let tokens = TokenKeys::new(
            &cfg.secret_key,
            &cfg.algorithm,
            chrono::Duration::days(cfg.token_ttl_days),
        )?;
        Ok(Self {
            storage,
            tokens: Arc::new(tokens),
            portal: Arc::new(PortalClient::new(cfg)?),
            bcrypt_cost: cfg.bcrypt_cost,
        })
    }
}

fn dataset_routes<D: Dataset>(base: &str) -> Router<AppState> {
    Router::new()
        .route(base, get(datasets::list::<D>).post(datasets::create::<D>))
        .route(&format!("{base}/filtragem"), post(datasets::filter::<D>))
        .route(
            &format!("{base}/{{id}}"),
            get(datasets::get_one::<D>)
                .put(datasets::update::<D>)
                .delete(datasets::delete::<D>),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(users::current_user).post(users::create_user),
        )
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/token", post(users::issue_token))
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(dataset_routes::<Production>("/producao"))
        .merge(dataset_routes::<Processing>("/processamento"))
        .merge(dataset_routes::<Commercialization>("/comercializacao"))
        .merge(dataset_routes::<Import>("/importacao"))
        .merge(dataset_routes::<Export>("/exportacao"))
        .nest("/auth", user_routes())
        .route("/inicializacao", get(refresh::refresh_handler))
        .with_state(state)
}
