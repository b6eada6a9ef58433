//! 表示 Outbound ポート（メッセージ追加・入力中表示・エラー表示）

/// 表示先。`time` は表示用に整形済みの現在時刻
pub trait Presenter: Send + Sync {
    fn show_user_message(&self, text: &str, time: &str);
    fn show_typing(&self);
    fn hide_typing(&self);
    /// `html` は変換済みの HTML、`raw` は変換前の応答テキスト
    fn show_bot_message(&self, html: &str, raw: &str, time: &str);
    fn show_error(&self, message: &str, time: &str);
}
