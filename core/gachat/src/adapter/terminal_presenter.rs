//! 端末向けの表示
//!
//! メッセージは stdout（テストでは任意の Writer）に、入力中表示は stderr に出す。
//! `plain` のときは HTML ではなく応答テキストをそのまま出す。

use crate::ports::outbound::Presenter;
use std::io::Write;
use std::sync::Mutex;

const BOT_NAME: &str = "GA Assistant";

pub struct TerminalPresenter {
    plain: bool,
    out: Mutex<Box<dyn Write + Send>>,
    show_typing: bool,
}

impl TerminalPresenter {
    pub fn stdout(plain: bool) -> Self {
        Self {
            plain,
            out: Mutex::new(Box::new(std::io::stdout())),
            show_typing: true,
        }
    }

    /// 任意の Writer に出す（入力中表示は出さない）
    pub fn with_writer(plain: bool, out: Box<dyn Write + Send>) -> Self {
        Self {
            plain,
            out: Mutex::new(out),
            show_typing: false,
        }
    }

    fn emit(&self, header: &str, body: &str) {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // 表示先が閉じていても会話は続ける
        let _ = writeln!(out, "{}", header);
        let _ = writeln!(out, "{}", body.trim_end());
        let _ = out.flush();
    }
}

impl Presenter for TerminalPresenter {
    fn show_user_message(&self, text: &str, time: &str) {
        self.emit(&format!("[you] {}", time), text);
    }

    fn show_typing(&self) {
        if self.show_typing {
            eprint!("{} is typing...\r", BOT_NAME);
        }
    }

    fn hide_typing(&self) {
        if self.show_typing {
            eprint!("\x1b[2K\r");
        }
    }

    fn show_bot_message(&self, html: &str, raw: &str, time: &str) {
        let body = if self.plain { raw } else { html };
        self.emit(&format!("[{}] {}", BOT_NAME, time), body);
    }

    fn show_error(&self, message: &str, time: &str) {
        self.emit(&format!("[{}] {}", BOT_NAME, time), &format!("error: {}", message));
    }
}
