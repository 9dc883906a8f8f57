use std::time::Duration;

use livetrans_logging::{lt_debug, lt_warn};
use reqwest::StatusCode;

use crate::types::ErrorBody;
use crate::{EngineError, FailureKind, TranslateError, TranslationRequest, TranslationResponse};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Backend root; `/translate` is resolved against it.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, TranslateError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTranslator {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl ReqwestTranslator {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let endpoint = translate_endpoint(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Translator for ReqwestTranslator {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, TranslateError> {
        lt_debug!(
            "POST {} chars={} target={}",
            self.endpoint,
            request.text.chars().count(),
            request.target_lang
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if status.is_success() {
            return serde_json::from_slice(&body)
                .map_err(|err| TranslateError::new(FailureKind::MalformedBody, err.to_string()));
        }

        let error_body: ErrorBody = serde_json::from_slice(&body).unwrap_or_default();
        let kind = if status == StatusCode::TOO_MANY_REQUESTS {
            lt_warn!(
                "translate rate limited: {} (retry_after={:?})",
                error_body.message.as_deref().unwrap_or("-"),
                error_body.retry_after
            );
            FailureKind::RateLimited
        } else {
            FailureKind::HttpStatus(status.as_u16())
        };
        Err(TranslateError::new(kind, status.to_string()).with_server_message(error_body.error))
    }
}

fn translate_endpoint(base_url: &str) -> Result<reqwest::Url, EngineError> {
    let base = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    };
    reqwest::Url::parse(&base)
        .and_then(|url| url.join("translate"))
        .map_err(|err| EngineError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: err.to_string(),
        })
}

fn map_reqwest_error(err: reqwest::Error) -> TranslateError {
    if err.is_timeout() {
        return TranslateError::new(FailureKind::Timeout, err.to_string());
    }
    TranslateError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_resolved_under_the_base_path() {
        assert_eq!(
            translate_endpoint("http://localhost:5000").unwrap().as_str(),
            "http://localhost:5000/translate"
        );
        assert_eq!(
            translate_endpoint("https://example.com/app/").unwrap().as_str(),
            "https://example.com/app/translate"
        );
        assert_eq!(
            translate_endpoint("https://example.com/app").unwrap().as_str(),
            "https://example.com/app/translate"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = translate_endpoint("not a url").unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidBaseUrl { ref url, .. } if url == "not a url"
        ));
    }
}
