mod args;

use std::{
    fs,
    io::{self, BufRead, Read},
};

use anyhow::{anyhow, Context, Result};
use args::Cli;
use clap::Parser;
use execution::{Executor, ProcessExecutor};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use translation::{format_examples, supported_patterns, Translation, Translator};

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn read_input(filename: Option<&str>) -> Result<String> {
    match filename {
        Some(filename) => {
            fs::read_to_string(filename).with_context(|| format!("Failed to read {filename}"))
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read from stdin")?;
            Ok(input)
        }
    }
}

fn report(translation: &Translation, cli: &Cli) -> Result<()> {
    println!("{}", translation.code);
    for warning in &translation.warnings {
        eprintln!(
            "warning ({}) in statement {}: {}",
            warning.severity, warning.statement_index, warning.message
        );
    }
    if let Some(filename) = &cli.translation_args.export_ir_file {
        translation
            .export(filename)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("Failed to export instructions to {filename}"))?;
        info!("exported instructions to {filename}");
    }
    if cli.execution_args.run {
        let result = ProcessExecutor::from_args(&cli.execution_args).execute(&translation.code);
        print!("{}", result.stdout);
        if let Some(failure) = result.failure {
            return Err(anyhow!("Execution failed: {failure}"));
        }
        info!("execution finished in {:?}", result.elapsed);
    }
    Ok(())
}

/// One submission per line; a failed submission is reported and the session continues.
fn run_interactive(translator: &mut Translator, cli: &Cli) -> Result<()> {
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let outcome = translator
            .translate_report(&line)
            .map_err(anyhow::Error::from)
            .and_then(|translation| report(&translation, cli));
        if let Err(error) = outcome {
            eprintln!("error: {error:#}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    TermLogger::init(
        level_filter(cli.verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    if cli.list_patterns {
        let categories = supported_patterns()
            .into_iter()
            .map(|(category, _)| category)
            .collect::<Vec<_>>();
        println!("{}", format_examples(&categories));
        return Ok(());
    }
    let mut translator = Translator::from_args(&cli.translation_args);
    if cli.interactive {
        return run_interactive(&mut translator, &cli);
    }
    let input = read_input(cli.input.as_deref())?;
    let translation = translator.translate_report(&input)?;
    report(&translation, &cli)
}
