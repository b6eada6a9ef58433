//! 対話ループ（1 行 = 1 メッセージ、`/` で始まる行はコマンド）

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::thread::JoinHandle;

use common::error::Error;

use crate::usecase::chat_session::{ChatSession, SendOutcome, Submitted};

/// 対話ループの 1 行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    /// 履歴リセット
    Clear,
    /// 保存中の履歴を表示
    History,
    Message(String),
    Empty,
}

pub fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    match trimmed {
        "" => ReplCommand::Empty,
        "/quit" | "/exit" => ReplCommand::Quit,
        "/clear" => ReplCommand::Clear,
        "/history" => ReplCommand::History,
        _ => ReplCommand::Message(trimmed.to_string()),
    }
}

fn write_history(session: &ChatSession, out: &mut dyn Write) -> Result<(), Error> {
    let history = session.history();
    let io = |e: std::io::Error| Error::io_msg(format!("Failed to write output: {}", e));
    if history.is_empty() {
        writeln!(out, "(no history)").map_err(io)?;
        return Ok(());
    }
    for (i, entry) in history.entries().iter().enumerate() {
        writeln!(out, "#{} {}", i + 1, entry.timestamp()).map_err(io)?;
        writeln!(out, "  you: {}", entry.user()).map_err(io)?;
        writeln!(out, "  bot: {}", entry.assistant()).map_err(io)?;
    }
    Ok(())
}

fn wait(pending: &mut Option<JoinHandle<SendOutcome>>) {
    if let Some(handle) = pending.take() {
        let _ = handle.join();
    }
}

/// 入力が尽きるか `/quit` まで読み続ける。送信は非同期で、送信中の入力は捨てる
pub fn run_interactive(
    session: &Arc<ChatSession>,
    input: impl BufRead,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let mut pending: Option<JoinHandle<SendOutcome>> = None;
    for line in input.lines() {
        let line = line.map_err(|e| Error::io_msg(format!("Failed to read input: {}", e)))?;
        if pending.as_ref().map(|h| h.is_finished()).unwrap_or(false) {
            wait(&mut pending);
        }
        match parse_line(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Quit => break,
            ReplCommand::Clear => {
                session.clear_history();
                writeln!(out, "history cleared")
                    .map_err(|e| Error::io_msg(format!("Failed to write output: {}", e)))?;
            }
            ReplCommand::History => write_history(session, out)?,
            ReplCommand::Message(text) => {
                if let Submitted::Dispatched(handle) = session.submit(&text) {
                    pending = Some(handle);
                }
            }
        }
    }
    wait(&mut pending);
    Ok(())
}
