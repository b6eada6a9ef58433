//! ログエンドポイントへの送信（{input_text, chat_response} を POST）

use crate::domain::ExchangeLog;
use crate::ports::outbound::ExchangeLogger;
use common::domain::EndpointUrl;
use common::error::Error;

pub struct HttpExchangeLogger {
    client: reqwest::blocking::Client,
    url: EndpointUrl,
}

impl HttpExchangeLogger {
    pub fn new(client: reqwest::blocking::Client, url: EndpointUrl) -> Self {
        Self { client, url }
    }
}

impl ExchangeLogger for HttpExchangeLogger {
    fn log_exchange(&self, exchange: &ExchangeLog) -> Result<(), Error> {
        let response = self
            .client
            .post(self.url.as_str())
            .json(exchange)
            .send()
            .map_err(|e| Error::network(format!("HTTP request failed: {}", e)))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::http(status.as_u16(), body));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::http_chat_transport::build_client;
    use crate::tests::http_server::{serve_once, CannedResponse};

    #[test]
    fn test_posts_exchange_as_json() {
        let server = serve_once(CannedResponse::ok("application/json", "null"));
        let logger = HttpExchangeLogger::new(build_client(None).unwrap(), EndpointUrl::new(&server.url));
        logger
            .log_exchange(&ExchangeLog::new("question", "answer"))
            .unwrap();
        let req = server.request();
        assert!(req.starts_with("POST "));
        let body: serde_json::Value = serde_json::from_str(req.body()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"input_text": "question", "chat_response": "answer"})
        );
    }

    #[test]
    fn test_rejected_log_is_error() {
        let server = serve_once(CannedResponse::status("422 Unprocessable Entity", "text/plain", "bad"));
        let logger = HttpExchangeLogger::new(build_client(None).unwrap(), EndpointUrl::new(&server.url));
        let err = logger.log_exchange(&ExchangeLog::new("q", "a")).unwrap_err();
        assert_eq!(err, Error::http(422, "bad"));
    }
}
