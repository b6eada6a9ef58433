//! エラーハンドリング
//!
//! 全レイヤーで共通の `Error` を使う。終了コードは sysexits に合わせる。

/// 共通エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Io(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Environment error: {0}")]
    Env(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("{0}")]
    InvalidArgument(String),
    /// リクエストが完了しなかった（接続失敗・本文読み込み失敗など）
    #[error("Network failure: {0}")]
    Network(String),
    /// 非 2xx のレスポンス
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// 想定外の形のレスポンス（通常は文字列化で縮退し、ここまで上がらない）
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// 永続化（読み書き）の失敗。呼び出し側でログに落として握りつぶす
    #[error("Persistence failure: {0}")]
    Persistence(String),
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// プロセス終了コード（sysexits.h 準拠）
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Network(_) | Self::Http { .. } => 69,
            Self::Io(_) | Self::Persistence(_) => 74,
            Self::Config(_) | Self::Env(_) => 78,
            Self::Json(_) | Self::MalformedResponse(_) | Self::System(_) => 70,
        }
    }

    /// 通信層のエラーか（UI には固定メッセージだけを出す対象）
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Http { .. } | Self::MalformedResponse(_)
        )
    }
}
