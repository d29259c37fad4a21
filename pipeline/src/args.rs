use clap::{ArgAction, Parser};
use execution::ExecutionArgs;
use translation::TranslationArgs;

#[derive(Parser)]
#[command(about = "Translate pseudo-English instructions into Python source")]
pub struct Cli {
    /// Read instructions from this file instead of standard input.
    #[arg(long)]
    pub input: Option<String>,

    /// Translate one submission per line until standard input closes.
    #[arg(long)]
    pub interactive: bool,

    #[arg(long)]
    pub list_patterns: bool,

    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub translation_args: TranslationArgs,

    #[command(flatten)]
    pub execution_args: ExecutionArgs,
}
