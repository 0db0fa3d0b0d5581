//! `deeplink`: inspect and exercise a deep-link route table.
//!
//! ```text
//! deeplink --config routes.toml check
//! deeplink --config routes.toml resolve 'myapp://user/42?tab=posts'
//! deeplink --config routes.toml open 'myapp://user/42'
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;
use url::Url;

use deeplink_router::config::{load_config, ConfigError, RouterConfig};
use deeplink_router::observability::logging;
use deeplink_router::{Context, HandlerRegistry, Router};

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser)]
#[command(name = "deeplink")]
#[command(about = "Inspect and exercise a deep-link route table", long_about = None)]
struct Cli {
    /// Route table (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Log filter used when RUST_LOG is unset. Defaults to the table's log_level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route table
    Check,
    /// Show the first matching route and its context without running handlers
    Resolve { url: Url },
    /// Dispatch a URL through the table with echoing handlers
    Open { url: Url },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Without --log-level or RUST_LOG the filter lives in the table itself,
    // so logging can only start once it is loaded.
    let bootstrap = bootstrap_filter(
        cli.log_level.as_deref(),
        std::env::var_os("RUST_LOG").is_some(),
    );
    if let Some(filter) = bootstrap {
        init_logging(filter);
    }

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) => {
            eprintln!("{}: invalid route table", cli.config.display());
            for error in errors {
                eprintln!("  - {error}");
            }
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{}: {e}", cli.config.display());
            return ExitCode::FAILURE;
        }
    };

    if bootstrap.is_none() {
        init_logging(&config.observability.log_level);
    }

    match run(cli.command, &cli.config, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Filter to start logging with before the route table is read, if known.
///
/// `RUST_LOG` wins inside [`logging::init`], so any value passed here only
/// matters when it is unset.
fn bootstrap_filter(cli_level: Option<&str>, rust_log_set: bool) -> Option<&str> {
    match cli_level {
        Some(level) => Some(level),
        None if rust_log_set => Some(DEFAULT_LOG_LEVEL),
        None => None,
    }
}

fn init_logging(filter: &str) {
    if let Err(e) = logging::init(filter) {
        eprintln!("warning: logging not initialized: {e}");
    }
}

fn run(
    command: Commands,
    path: &std::path::Path,
    config: &RouterConfig,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match command {
        Commands::Check => {
            println!(
                "{}: {} routes OK (policy: {})",
                path.display(),
                config.routes.len(),
                config.policy.as_str()
            );
            for route in &config.routes {
                println!("  {:<24} {} -> {}", route.name, route.pattern, route.handler_name());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resolve { url } => {
            let router = echo_router(config);
            match router.resolve(&url, None) {
                Some((route, context)) => {
                    let report = json!({
                        "route": route.name(),
                        "pattern": route.pattern().as_str(),
                        "context": context,
                    });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    println!("no route matches {url}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Open { url } => {
            let router = echo_router(config);
            if router.open(&url, None) {
                println!("handled");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("not handled");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

/// Router whose handlers print the context they receive and claim the URL.
fn echo_router(config: &RouterConfig) -> Router {
    let mut handlers = HandlerRegistry::new();
    for route in &config.routes {
        let name = route.handler_name().to_string();
        handlers.register(route.handler_name(), move |context: Context| {
            let report = json!({ "handler": name, "context": context });
            match serde_json::to_string_pretty(&report) {
                Ok(text) => {
                    println!("{text}");
                    true
                }
                Err(e) => {
                    eprintln!("handler {name}: {e}");
                    false
                }
            }
        });
    }

    let (router, skipped) = Router::from_config(config, &handlers);
    for error in skipped {
        eprintln!("warning: {error}");
    }
    router
}
