//! # HTTP Execution-Layer Client
//!
//! [`HttpOnchainExecutor`] speaks JSON over HTTP to the execution-layer
//! service. It wraps a single `reqwest::Client` with the configured timeout
//! and bearer token and is cheap to clone and share via `Arc`.
//!
//! ## Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/v1/status?sourceChain=&destChain=` | route status |
//! | POST   | `/v1/adapters/register` | register adapter |
//! | POST   | `/v1/adapters/default-bridge` | set default bridge type |
//! | POST   | `/v1/config/hyperbridge` | Hyperbridge config push |
//! | POST   | `/v1/config/ccip` | CCIP config push |
//! | POST   | `/v1/config/layerzero` | LayerZero config push |
//! | POST   | `/v1/interact` | generic contract call |
//!
//! ## Error Mapping
//!
//! - 400, 409, 422: [`ExecutionError::Rejected`] with the response body as the message
//! - other 4xx (auth, missing endpoint, throttling), 5xx, timeout, connection
//!   failure: [`ExecutionError::Unavailable`]
//! - undecodable 2xx body: [`ExecutionError::InvalidResponse`]
//!
//! Requests are never retried here.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::{ConfigError, ExecutorConfig};
use crate::error::ExecutionError;
use crate::executor::OnchainExecutor;
use crate::types::{
    CcipConfigParams, ConfigPushResult, HyperbridgeConfigParams, InteractParams, InteractResult,
    LayerZeroConfigParams, RegisterAdapterParams, SetDefaultBridgeParams, StatusSnapshot,
    TxHandle,
};

/// JSON-over-HTTP implementation of [`OnchainExecutor`].
#[derive(Debug, Clone)]
pub struct HttpOnchainExecutor {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpOnchainExecutor {
    /// Create a new client from configuration.
    pub fn new(config: ExecutorConfig) -> Result<Self, ExecutionError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = config.api_token.as_deref() {
            headers.insert(
                reqwest::header::AUTHORIZATION,
                reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| ConfigError::InvalidToken)?,
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ExecutionError::Unavailable {
                endpoint: "client_init",
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn post<B, T>(&self, endpoint: &'static str, path: &str, body: &B) -> Result<T, ExecutionError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(endpoint, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ExecutionError> {
        let resp = request.send().await.map_err(|e| {
            tracing::warn!(endpoint, error = %e, "execution layer request failed");
            ExecutionError::Unavailable {
                endpoint,
                reason: e.to_string(),
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            if is_input_rejection(status) {
                tracing::warn!(endpoint, status = status.as_u16(), "execution layer rejected request");
                return Err(ExecutionError::Rejected {
                    endpoint,
                    status: status.as_u16(),
                    message: body,
                });
            }
            tracing::error!(endpoint, status = status.as_u16(), body = %body, "execution layer error");
            return Err(ExecutionError::Unavailable {
                endpoint,
                reason: format!("status {}: {body}", status.as_u16()),
            });
        }

        resp.json().await.map_err(|e| ExecutionError::InvalidResponse {
            endpoint,
            reason: e.to_string(),
        })
    }
}

/// Statuses that blame the submitted parameters rather than this client.
fn is_input_rejection(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 400 | 409 | 422)
}

#[async_trait]
impl OnchainExecutor for HttpOnchainExecutor {
    async fn get_status(
        &self,
        source_chain: &str,
        dest_chain: &str,
    ) -> Result<StatusSnapshot, ExecutionError> {
        let request = self
            .http
            .get(self.url("v1/status"))
            .query(&[("sourceChain", source_chain), ("destChain", dest_chain)]);
        self.execute("GET /v1/status", request).await
    }

    async fn register_adapter(
        &self,
        params: &RegisterAdapterParams,
    ) -> Result<TxHandle, ExecutionError> {
        self.post("POST /v1/adapters/register", "v1/adapters/register", params)
            .await
    }

    async fn set_default_bridge_type(
        &self,
        params: &SetDefaultBridgeParams,
    ) -> Result<TxHandle, ExecutionError> {
        self.post(
            "POST /v1/adapters/default-bridge",
            "v1/adapters/default-bridge",
            params,
        )
        .await
    }

    async fn set_hyperbridge_config(
        &self,
        params: &HyperbridgeConfigParams,
    ) -> Result<ConfigPushResult, ExecutionError> {
        self.post("POST /v1/config/hyperbridge", "v1/config/hyperbridge", params)
            .await
    }

    async fn set_ccip_config(
        &self,
        params: &CcipConfigParams,
    ) -> Result<ConfigPushResult, ExecutionError> {
        self.post("POST /v1/config/ccip", "v1/config/ccip", params)
            .await
    }

    async fn set_layerzero_config(
        &self,
        params: &LayerZeroConfigParams,
    ) -> Result<ConfigPushResult, ExecutionError> {
        self.post("POST /v1/config/layerzero", "v1/config/layerzero", params)
            .await
    }

    async fn generic_interact(
        &self,
        params: &InteractParams,
    ) -> Result<InteractResult, ExecutionError> {
        self.post("POST /v1/interact", "v1/interact", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpOnchainExecutor {
        HttpOnchainExecutor::new(ExecutorConfig::new(Url::parse(base).unwrap())).unwrap()
    }

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(
            client("http://127.0.0.1:9100").url("v1/status"),
            "http://127.0.0.1:9100/v1/status"
        );
        assert_eq!(
            client("http://127.0.0.1:9100/executor/").url("v1/status"),
            "http://127.0.0.1:9100/executor/v1/status"
        );
    }

    #[test]
    fn only_input_statuses_are_rejections() {
        for code in [400u16, 409, 422] {
            assert!(is_input_rejection(reqwest::StatusCode::from_u16(code).unwrap()));
        }
        for code in [401u16, 403, 404, 408, 429, 500] {
            assert!(!is_input_rejection(reqwest::StatusCode::from_u16(code).unwrap()));
        }
    }

    #[test]
    fn rejects_token_with_newline() {
        let mut cfg = ExecutorConfig::new(Url::parse("http://127.0.0.1:9100").unwrap());
        cfg.api_token = Some("bad\ntoken".into());
        let err = HttpOnchainExecutor::new(cfg).unwrap_err();
        assert!(matches!(err, ExecutionError::Config(ConfigError::InvalidToken)));
    }
}
