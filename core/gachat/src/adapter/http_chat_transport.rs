//! チャットエンドポイントへの HTTP 送信（reqwest blocking）
//!
//! POST は JSON 本文、GET はクエリ文字列（history は JSON 文字列）で送る。

use crate::domain::{normalize_body, ChatRequest, ResponseBody};
use crate::ports::outbound::ChatTransport;
use common::domain::EndpointUrl;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// リクエストの送り方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMethod {
    #[default]
    Post,
    Get,
}

/// blocking クライアントを作る。timeout が None なら無期限に待つ
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::blocking::Client, Error> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))
}

pub struct HttpChatTransport {
    client: reqwest::blocking::Client,
    url: EndpointUrl,
    method: RequestMethod,
    log: Arc<dyn Log>,
}

impl HttpChatTransport {
    pub fn new(
        client: reqwest::blocking::Client,
        url: EndpointUrl,
        method: RequestMethod,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            client,
            url,
            method,
            log,
        }
    }
}

impl ChatTransport for HttpChatTransport {
    fn send(&self, request: &ChatRequest) -> Result<String, Error> {
        let builder = match self.method {
            RequestMethod::Post => self
                .client
                .post(self.url.as_str())
                .header("Content-Type", "application/json")
                .body(request.to_json()?),
            RequestMethod::Get => self.client.get(self.url.as_str()).query(&request.to_query()?),
        };

        let response = builder
            .send()
            .map_err(|e| Error::network(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response
            .text()
            .map_err(|e| Error::network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::http(status.as_u16(), body));
        }

        let normalized = normalize_body(content_type.as_deref(), body);
        if let ResponseBody::Malformed { reason, .. } = &normalized {
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Warn, "malformed structured response, using raw text")
                    .layer("adapter")
                    .kind("transport")
                    .field("reason", reason.clone()),
            );
        }
        Ok(normalized.into_text())
    }
}
