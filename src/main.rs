// Main entry point
use clap::Parser;
use deepl_doc::application::poll::PollPolicy;
use deepl_doc::application::workflow::{translate_document, RunOptions};
use deepl_doc::domain::model::TranslationJob;
use deepl_doc::infrastructure::config::{self, load_config};
use deepl_doc::infrastructure::storage::files::{derive_output_path, find_html_file};
use deepl_doc::interfaces::cli::Cli;
use deepl_doc::presentation::report::{
    format_usage, print_error, print_step, print_success, print_warning, PollProgress,
};
use deepl_doc::state::AppState;
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // No provider-side cancel exists; an interrupt only ends this process
    let result = tokio::select! {
        result = run(cli) => result,
        Ok(()) = tokio::signal::ctrl_c() => {
            print_warning("Interrupted. The remote translation job is left as is.");
            std::process::exit(130);
        }
    };

    if let Err(e) = result {
        print_error(&format!("Translation failed: {:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }

    let mut config = load_config()?;
    cli.apply_to(&mut config, std::env::var("DEEPL_API_KEY").ok());

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    let api_key = config.require_api_key()?.to_string();
    let input = match &cli.input {
        Some(path) => path.clone(),
        None => find_html_file(Path::new("."))?,
    };
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(&input, &config.target_lang));

    print_step(&format!("Input file: {}", input.display()));
    print_step(&format!("Output file: {}", output.display()));
    print_step(&format!(
        "Source language: {}",
        cli.source.as_deref().unwrap_or("Auto detect")
    ));
    print_step(&format!("Target language: {}", config.target_lang));

    let state = AppState::new(config)?;
    let job = TranslationJob {
        source_file: input,
        source_lang: cli.source.clone(),
        target_lang: state.config.target_lang.clone(),
        formality: cli.formality(),
        endpoint: state.config.endpoint(),
    };
    let options = RunOptions {
        formality_supported: state.config.formality_supported,
        policy: PollPolicy::from(&state.config.polling),
        report_usage: cli.usage,
    };

    let progress = PollProgress::new(true);
    let result = translate_document(
        state.transport.as_ref(),
        &job,
        &output,
        &api_key,
        &options,
        |status| progress.update(status),
    )
    .await;
    progress.finish();
    let report = result?;

    let billed = report
        .billed_characters
        .map(|c| format!(", {} characters billed", c))
        .unwrap_or_default();
    print_success(&format!(
        "Finished. Wrote {} bytes to {}{}",
        report.bytes_written,
        report.output.display(),
        billed
    ));

    match report.usage {
        Some(Ok(usage)) => print_step(&format!("Usage: {}", format_usage(&usage))),
        Some(Err(e)) => print_warning(&format!("Requesting usage limit failed: {}", e)),
        None => {}
    }

    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
