mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::io::{self, Write};
use std::process;
use std::time::Duration;

use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};

use cli::{parse_args, print_completion, Config, ParseOutcome};
use ports::inbound::UseCaseRunner;
use usecase::interactive::run_interactive;
use usecase::SendOutcome;
use wiring::{wire_app, App};

/// 終了時にログ送信の完了を待つ上限
const EXCHANGE_LOG_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// 1 回送信 / 対話モードを振り分ける Runner
struct Runner {
    app: App,
}

impl Runner {
    fn lifecycle(&self, record: LogRecord) {
        let _ = self.app.logger.log(&record.layer("cli").kind("lifecycle"));
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        if config.help {
            print_help();
            return Ok(0);
        }
        let mode = if config.message().is_some() {
            "once"
        } else {
            "interactive"
        };
        self.lifecycle(LogRecord::new(LogLevel::Info, "session started").field("mode", mode));

        let result = self.dispatch(&config);

        let code = result.as_ref().copied().unwrap_or(0);
        self.lifecycle(
            LogRecord::new(LogLevel::Info, "session finished")
                .field("mode", mode)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }
}

impl Runner {
    fn dispatch(&self, config: &Config) -> Result<i32, Error> {
        let session = self.app.build_session(config)?;
        let result = match config.message() {
            Some(message) => match session.send(&message) {
                SendOutcome::Replied { .. } => Ok(0),
                // 表示は済んでいる。終了コードだけで失敗を伝える
                SendOutcome::Failed => Ok(69),
                SendOutcome::Skipped(_) => Ok(0),
            },
            None => {
                let stdin = io::stdin();
                let mut stdout = io::stdout();
                run_interactive(&session, stdin.lock(), &mut stdout).and_then(|()| {
                    stdout
                        .flush()
                        .map_err(|e| Error::io_msg(format!("Failed to flush stdout: {}", e)))
                })
                .map(|()| 0)
            }
        };
        // process::exit でログ送信スレッドが途中で切られないよう、終了前に待つ
        session.drain_background(EXCHANGE_LOG_DRAIN_TIMEOUT);
        result
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if matches!(e, Error::InvalidArgument(_)) {
                print_usage();
            }
            eprintln!("gachat: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let app = wire_app(config.verbose)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: gachat [options] [message...]");
}

fn print_help() {
    println!("Usage: gachat [options] [message...]");
    println!("Options:");
    println!("  -h, --help            Show this help message");
    println!("  -v, --verbose         Also write structured logs to stderr");
    println!("  --keep-history        Load the saved conversation history (default: clear it at startup)");
    println!("  --plain               Print replies as received instead of rendered HTML");
    println!("  --url <url>           Chat endpoint URL");
    println!("  --log-url <url>       Exchange log endpoint URL");
    println!("  --no-log              Do not send exchanges to the log endpoint");
    println!("  --get                 Send requests as GET with a query string");
    println!("  --generate <shell>    Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Interactive commands:");
    println!("  /clear                Reset the conversation history");
    println!("  /history              Show the saved conversation history");
    println!("  /quit                 Exit");
    println!();
    println!("Environment:");
    println!("  GACHAT_HOME           Home directory (config.json, chat_history.json, gachat.log.jsonl)");
    println!("                        If unset, $XDG_CONFIG_HOME/gachat (e.g. ~/.config/gachat) is used.");
    println!("  GACHAT_CHAT_URL       Chat endpoint URL (overrides config.json)");
    println!("  GACHAT_LOG_URL        Exchange log endpoint URL (overrides config.json)");
    println!();
    println!("Examples:");
    println!("  gachat");
    println!("  gachat What is \\(e^{{i\\pi}}\\)?");
    println!("  gachat --get --url http://127.0.0.1:8000/request/rag_model/lcel Hello");
}
