//! レスポンス本文の正規化
//!
//! Content-Type が JSON 系なら表示用フィールドを取り出し、それ以外は本文をそのまま使う。

use serde_json::Value;

/// 正規化した本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// テキストとしてそのまま使った
    Text(String),
    /// JSON から取り出した / 文字列化した
    Structured(String),
    /// JSON と宣言されていたがパースできなかった（生テキストで縮退）
    Malformed { text: String, reason: String },
}

impl ResponseBody {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Structured(s) => s,
            Self::Malformed { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Text(s) | Self::Structured(s) => s,
            Self::Malformed { text, .. } => text,
        }
    }
}

/// `application/json` / `text/json` / `*+json` を JSON とみなす（パラメータと大文字小文字は無視）
pub fn is_json_content_type(content_type: &str) -> bool {
    let media = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    media == "application/json" || media == "text/json" || media.ends_with("+json")
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 構造化データから表示用テキストを選ぶ: `message` → `content` → 全体の文字列化
fn display_text(value: &Value) -> String {
    if let Value::String(s) = value {
        return s.clone();
    }
    for key in ["message", "content"] {
        match value.get(key) {
            Some(Value::Null) | None => continue,
            Some(v) => return field_text(v),
        }
    }
    value.to_string()
}

/// レスポンス本文を表示用テキストに正規化する。失敗しない
pub fn normalize_body(content_type: Option<&str>, body: String) -> ResponseBody {
    if !content_type.map(is_json_content_type).unwrap_or(false) {
        return ResponseBody::Text(body);
    }
    match serde_json::from_str::<Value>(&body) {
        Ok(v) => ResponseBody::Structured(display_text(&v)),
        Err(e) => ResponseBody::Malformed {
            text: body,
            reason: e.to_string(),
        },
    }
}
