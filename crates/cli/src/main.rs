use std::{
    path::PathBuf,
    process::ExitCode,
    sync::{Arc, RwLock},
};

use {
    clap::Parser,
    secrecy::ExposeSecret,
    serenity::client::Client,
    tracing::{error, info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    codebot_channel::ChatClient,
    codebot_config::{ConfigStore, Severity, SharedConfig, has_errors, validate},
    codebot_discord::{DiscordClient, DiscordHandler},
    codebot_gateway::Gateway,
    codebot_pipeline::{ClangFormatter, CommandChecker, HttpFileStager, SubmissionPipeline},
};

#[derive(Parser)]
#[command(
    name = "codebot",
    about = "CodeBot — formats and build-checks code posted in chat channels"
)]
struct Cli {
    /// Path to the configuration file (.toml, .yaml, or .json).
    #[arg(long, env = "CODEBOT_CONFIG", default_value = "codebot.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// Validate the configuration and exit.
    #[arg(long, default_value_t = false)]
    check_config: bool,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_telemetry(&cli);

    let store = match ConfigStore::load(&cli.config) {
        Ok(store) => store,
        Err(e) => {
            error!(path = %cli.config.display(), error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        },
    };

    let diagnostics = validate(store.config());
    for diagnostic in &diagnostics {
        match diagnostic.severity {
            Severity::Error => {
                error!(category = diagnostic.category, path = %diagnostic.path, "{}", diagnostic.message);
            },
            Severity::Warning => {
                warn!(category = diagnostic.category, path = %diagnostic.path, "{}", diagnostic.message);
            },
            Severity::Info => {
                info!(category = diagnostic.category, path = %diagnostic.path, "{}", diagnostic.message);
            },
        }
    }
    if has_errors(&diagnostics) {
        error!(path = %cli.config.display(), "configuration is invalid, refusing to start");
        return ExitCode::FAILURE;
    }
    if cli.check_config {
        info!(path = %cli.config.display(), "configuration is valid");
        return ExitCode::SUCCESS;
    }

    let token = store.config().token.expose_secret().clone();
    let tools = store.config().tools.clone();
    let config: SharedConfig = Arc::new(RwLock::new(store));

    let http = Arc::new(serenity::http::Http::new(&token));
    let chat: Arc<dyn ChatClient> = Arc::new(DiscordClient::new(http));

    let pipeline = Arc::new(SubmissionPipeline::new(
        Arc::clone(&config),
        Arc::new(ClangFormatter::new(tools.format)),
        Arc::new(CommandChecker::new(tools.check)),
        Arc::new(HttpFileStager::new()),
        Arc::clone(&chat),
    ));
    let gateway = Arc::new(Gateway::new(config, pipeline, chat));

    let mut client = match Client::builder(&token, DiscordHandler::intents())
        .event_handler(DiscordHandler::new(gateway))
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to build discord client");
            return ExitCode::FAILURE;
        },
    };

    info!("starting CodeBot");
    if let Err(e) = client.start().await {
        error!(error = %e, "discord client exited with error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
