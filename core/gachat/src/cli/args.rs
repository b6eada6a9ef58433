use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::EndpointUrl;
use common::error::Error;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    /// --keep-history: 起動時に保存済みの履歴を読み込む（既定は消して始める）
    pub keep_history: bool,
    /// --plain: 応答を HTML ではなく受信テキストのまま表示する
    pub plain: bool,
    pub url: Option<EndpointUrl>,
    pub log_url: Option<EndpointUrl>,
    /// --no-log: ログエンドポイントへ送らない
    pub no_log: bool,
    /// --get: GET + クエリ文字列で送る
    pub use_get: bool,
    /// 位置引数があれば 1 回だけ送って終了する
    pub message_args: Vec<String>,
}

impl Config {
    /// 位置引数を 1 つのメッセージにまとめる（無ければ None = 対話モード）
    pub fn message(&self) -> Option<String> {
        let joined = self.message_args.join(" ");
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("gachat")
        .about("Chat with the assistant endpoint from the terminal")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also write structured logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("keep-history")
                .long("keep-history")
                .help("Load the saved conversation history instead of clearing it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("plain")
                .long("plain")
                .help("Print replies as received instead of rendered HTML")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("url")
                .long("url")
                .value_name("url")
                .help("Chat endpoint URL")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("log-url")
                .long("log-url")
                .value_name("url")
                .help("Exchange log endpoint URL")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("no-log")
                .long("no-log")
                .help("Do not send exchanges to the log endpoint")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("get")
                .long("get")
                .help("Send requests as GET with a query string")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("message")
                .index(1)
                .help("Message to send once (omit for interactive mode)")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let url = matches
        .get_one::<String>("url")
        .map(|s| EndpointUrl::new(s.clone()));
    let log_url = matches
        .get_one::<String>("log-url")
        .map(|s| EndpointUrl::new(s.clone()));
    let message_args: Vec<String> = matches
        .get_many::<String>("message")
        .map(|i| i.cloned().collect())
        .unwrap_or_default();

    Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        keep_history: matches.get_flag("keep-history"),
        plain: matches.get_flag("plain"),
        url,
        log_url,
        no_log: matches.get_flag("no-log"),
        use_get: matches.get_flag("get"),
        message_args,
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[cfg(test)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "gachat", &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("gachat")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_no_args_is_interactive() {
        let config = parse_args_from(&args(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.message(), None);
    }

    #[test]
    fn test_parse_args_flags() {
        let config = parse_args_from(&args(&[
            "-v",
            "--keep-history",
            "--plain",
            "--no-log",
            "--get",
            "--url",
            "http://host:9000/chat/",
        ]))
        .unwrap();
        assert!(config.verbose);
        assert!(config.keep_history);
        assert!(config.plain);
        assert!(config.no_log);
        assert!(config.use_get);
        assert_eq!(
            config.url.as_ref().map(|u| u.as_str()),
            Some("http://host:9000/chat")
        );
        assert_eq!(config.log_url, None);
    }

    #[test]
    fn test_parse_args_message_words() {
        let config = parse_args_from(&args(&["what", "is", r"\(x^2\)?"])).unwrap();
        assert_eq!(config.message().as_deref(), Some(r"what is \(x^2\)?"));
    }

    #[test]
    fn test_parse_args_help() {
        assert!(parse_args_from(&args(&["-h"])).unwrap().help);
        assert!(parse_args_from(&args(&["--help"])).unwrap().help);
    }

    #[test]
    fn test_parse_args_unknown_option() {
        let err = parse_args_from(&args(&["--unknown"])).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_parse_args_url_requires_value() {
        assert!(parse_args_from(&args(&["--url"])).is_err());
    }
}
