use clap::{arg, Args};

#[derive(Args, Clone, Debug, Default)]
pub struct TranslationArgs {
    /// Write the instructions of every successful translation to this file as JSON.
    #[arg(long)]
    pub export_ir_file: Option<String>,
    /// Keep declared names between submissions instead of starting each one fresh.
    #[arg(long)]
    pub persistent_session: bool,
    #[arg(long)]
    pub no_warnings: bool,
}
