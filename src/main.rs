use ambiguity_review::cli::Cli;
use ambiguity_review::commands;
use ambiguity_review::core::config::Settings;
use ambiguity_review::core::utils::parse_backend;
use clap::Parser;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run().await {
        eprintln!("• {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(spec) = cli.backend.as_deref() {
        let (provider, model) = parse_backend(spec)?;
        settings.override_backend(provider, model);
    }

    commands::dispatch(cli.command, &settings).await
}
