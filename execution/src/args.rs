use clap::{arg, Args};

#[derive(Args, Clone, Debug)]
pub struct ExecutionArgs {
    /// Run the generated code after a successful translation.
    #[arg(long)]
    pub run: bool,
    #[arg(long, default_value = "python3")]
    pub interpreter: String,
    /// Kill the interpreter if it runs for longer than this.
    #[arg(long, default_value_t = 5000)]
    pub timeout_ms: u64,
}
