use clap::Parser;
use std::path::PathBuf;

/// Propertyscope - HTTP server for an AI real estate assistant
#[derive(Parser, Debug)]
#[command(name = "propertyscope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port to bind the server to
    #[arg(long, default_value = "4170")]
    port: u16,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Path to a config file (defaults to ~/.propertyscope/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Allowed CORS origin (repeatable); all origins allowed when omitted
    #[arg(long = "cors-origin")]
    cors_origins: Vec<String>,

    /// Store the provider API key in ~/.propertyscope/secrets.toml and exit
    #[arg(long, value_name = "KEY")]
    set_api_key: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    env_logger::init();

    if let Some(key) = &cli.set_api_key {
        match propertyscope_lib::config::store_api_key(key) {
            Ok(path) => {
                println!("API key saved to {}", path.display());
                return;
            }
            Err(e) => {
                eprintln!("Failed to save API key: {}", e);
                std::process::exit(1);
            }
        }
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async {
        let shutdown_state = propertyscope_lib::shutdown::ShutdownState::new();
        if let Err(e) =
            propertyscope_lib::shutdown::register_signal_handlers(shutdown_state.clone())
        {
            log::warn!("Failed to register signal handlers: {}", e);
        }

        let config = match propertyscope_lib::config::AppConfig::load(cli.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load configuration: {}", e);
                std::process::exit(1);
            }
        };

        if !config.provider.has_credential() {
            log::warn!(
                "No provider credential configured; chat and analysis will serve fallback responses"
            );
        }

        let state = propertyscope_lib::server::ServerAppState::new(config, shutdown_state);

        let cors_origins = if cli.cors_origins.is_empty() {
            None
        } else {
            Some(cli.cors_origins)
        };

        if let Err(e) =
            propertyscope_lib::server::run_server(cli.port, &cli.bind, state, cors_origins).await
        {
            eprintln!("Server error: {}", e);
            std::process::exit(1);
        }
    });
}
