use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

/// Environment keys read on top of the defaults. Unprefixed, matching the
/// variable names deployments already export.
const ENV_KEYS: &[&str] = &[
    "DATABASE_URL",
    "LISTEN_ADDR",
    "LOGLEVEL",
    "SECRET_KEY",
    "ALGORITHM",
    "TOKEN_TTL_DAYS",
    "BCRYPT_COST",
    "ERROR_401",
    "ERROR_404",
    "SOURCE_BASE_URL",
    "PROXY",
    "DOWNLOAD_RATE_PER_MINUTE",
];

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("FATAL: invalid configuration"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,

    /// HMAC secret for access tokens.
    pub secret_key: String,
    pub algorithm: String,
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,

    /// `detail` returned with 401 responses. Always read from the global
    /// `CONFIG`; the value in a `Config` passed to `AppState::new` is ignored.
    pub error_401: String,
    /// `detail` returned with 404 responses. Read from `CONFIG` like `error_401`.
    pub error_404: String,

    /// Directory the source CSV files are downloaded from. Must end with `/`.
    pub source_base_url: Url,
    pub proxy: Option<Url>,
    pub download_rate_per_minute: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:vitibrasil.sqlite".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            secret_key: String::new(),
            algorithm: "HS256".to_string(),
            token_ttl_days: 10,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            error_401: "Could not validate credentials".to_string(),
            error_404: "Not found".to_string(),
            source_base_url: Url::parse("http://vitibrasil.cnpuv.embrapa.br/download/")
                .expect("static source url is valid"),
            proxy: None,
            download_rate_per_minute: 30,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(ENV_KEYS))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
