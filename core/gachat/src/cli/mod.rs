//! CLI（引数解析）

mod args;

pub use args::{parse_args, print_completion, Config, ParseOutcome};
