use crate::config::Config;
use crate::error::VitiError;
use backon::{ExponentialBuilder, Retryable};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

fn default_retry_policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(1))
        .with_max_delay(Duration::from_secs(3))
        .with_max_times(3)
        .with_jitter()
}

/// Downloads source files from the statistics portal.
pub struct PortalClient {
    client: reqwest::Client,
    base_url: Url,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl PortalClient {
    pub fn new(cfg: &Config) -> Result<Self, VitiError> {
        let mut builder = reqwest::Client::builder()
            .user_agent("vitibrasil-api/0.1")
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30));
        // only the configured proxy is used, never the *_PROXY environment
        builder = match cfg.proxy.as_ref() {
            Some(proxy_url) => builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?),
            None => builder.no_proxy(),
        };
        let client = builder.build()?;

        let per_minute = NonZeroU32::new(cfg.download_rate_per_minute).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Ok(Self {
            client,
            base_url: cfg.source_base_url.clone(),
            limiter,
        })
    }

    pub fn resolve(&self, file: &str) -> Result<Url, VitiError> {
        Ok(self.base_url.join(file)?)
    }

    /// Fetch `file` with retries on transport errors and upstream 5xx.
    pub async fn download(&self, file: &str) -> Result<Vec<u8>, VitiError> {
        let url = self.resolve(file)?;

        let bytes = (|| async {
            self.limiter.until_ready().await;
            let resp = self.client.get(url.clone()).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(VitiError::Download {
                    url: url.to_string(),
                    status,
                });
            }
            Ok(resp.bytes().await?.to_vec())
        })
        .retry(default_retry_policy())
        .when(|e: &VitiError| e.is_retryable())
        .notify(|err, dur: Duration| {
            warn!("download of {} retrying after {}, sleeping {:?}", url, err, dur);
        })
        .await?;

        info!(url = %url, bytes = bytes.len(), "downloaded source file");
        Ok(bytes)
    }
}
