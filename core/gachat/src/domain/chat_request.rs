//! チャットエンドポイント / ログエンドポイントへ送る本文

use super::history::HistoryEntry;
use common::error::Error;
use serde::Serialize;

/// 1 回の送信ごとに作る一時的なリクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub input_text: String,
    /// 古い順
    pub history: Vec<HistoryEntry>,
}

impl ChatRequest {
    pub fn new(input_text: impl Into<String>, history: &[HistoryEntry]) -> Self {
        Self {
            input_text: input_text.into(),
            history: history.to_vec(),
        }
    }

    /// POST 用の JSON 本文
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|e| Error::json(e.to_string()))
    }

    /// GET 用のクエリ（history は JSON 文字列として 1 パラメータに詰める）
    pub fn to_query(&self) -> Result<Vec<(&'static str, String)>, Error> {
        let history =
            serde_json::to_string(&self.history).map_err(|e| Error::json(e.to_string()))?;
        Ok(vec![
            ("input_text", self.input_text.clone()),
            ("history", history),
        ])
    }
}

/// ログエンドポイントへ送る 1 往復分
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeLog {
    pub input_text: String,
    pub chat_response: String,
}

impl ExchangeLog {
    pub fn new(input_text: impl Into<String>, chat_response: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            chat_response: chat_response.into(),
        }
    }
}
