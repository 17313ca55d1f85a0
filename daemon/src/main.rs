//! Conviction daemon: entry point for serving delegation analytics.

use anyhow::Context;
use clap::Parser;
use conviction_rpc::RpcServer;
use conviction_service::{AnalyticsService, ServiceConfig};
use conviction_utils::{format_duration, init_logging, LogFormat};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "conviction", about = "Delegation analytics for conviction-voting networks")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "CONVICTION_CONFIG")]
    config: Option<PathBuf>,

    /// Address the HTTP server binds to.
    #[arg(long, env = "CONVICTION_LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// HTTP server port.
    #[arg(long, env = "CONVICTION_RPC_PORT")]
    rpc_port: Option<u16>,

    /// Log filter: "trace", "debug", "info", "warn", "error" or a full
    /// `RUST_LOG`-style directive.
    #[arg(long, env = "CONVICTION_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format: "human" or "json".
    #[arg(long, env = "CONVICTION_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Run the HTTP server.
    Serve,

    /// Print one address's delegation dashboard as JSON.
    Dashboard {
        #[arg(long)]
        network: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        track: Option<String>,
    },

    /// Print track delegation statistics as JSON.
    Stats {
        #[arg(long)]
        network: String,
        #[arg(long)]
        track: Option<String>,
    },

    /// Print the delegate (or delegator) leaderboard as JSON.
    Rankings {
        #[arg(long)]
        network: String,
        #[arg(long)]
        track: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        limit: Option<String>,
    },

    /// Print the effective configuration as TOML.
    Config,
}

/// File config (or defaults) with CLI flags and env vars layered on top.
fn resolve_config(cli: &Cli) -> anyhow::Result<ServiceConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let path = path.to_string_lossy();
            ServiceConfig::from_toml_file(&path)
                .with_context(|| format!("failed to load config from {path}"))?
        }
        None => ServiceConfig::default(),
    };

    if let Some(addr) = &cli.listen_addr {
        config.listen_addr = addr.clone();
    }
    if let Some(port) = cli.rpc_port {
        config.rpc_port = port;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!(path = %path.display(), "loaded config");
    }

    if let Command::Config = cli.command {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let bind_address = config.bind_address();
    let analytics_ttl = format_duration(config.cache.analytics_ttl_secs);
    let dashboard_ttl = format_duration(config.cache.dashboard_ttl_secs);
    let service = Arc::new(AnalyticsService::from_config(config)?);

    match cli.command {
        Command::Serve => {
            tracing::info!(
                addr = %bind_address,
                analytics_ttl = %analytics_ttl,
                dashboard_ttl = %dashboard_ttl,
                "starting conviction analytics server"
            );
            let server = RpcServer::new(service);
            server
                .serve(&bind_address, async {
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("shutdown signal received");
                })
                .await?;
            tracing::info!("conviction daemon exited cleanly");
        }
        Command::Dashboard {
            network,
            address,
            track,
        } => {
            let data = service
                .get_delegation_dashboard_data(&address, &network, track.as_deref())
                .await?;
            print_json(&data)?;
        }
        Command::Stats { network, track } => {
            let stats = service
                .get_track_delegation_analytics_stats(&network, track.as_deref())
                .await?;
            print_json(&stats)?;
        }
        Command::Rankings {
            network,
            track,
            role,
            limit,
        } => {
            let rankings = service
                .get_delegation_rankings(&network, track.as_deref(), role.as_deref(), limit.as_deref())
                .await?;
            print_json(&rankings)?;
        }
        Command::Config => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "conviction",
            "--rpc-port",
            "9000",
            "--log-format",
            "json",
            "serve",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.rpc_port, 9000);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.listen_addr, "0.0.0.0");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn query_subcommands_parse() {
        let cli = Cli::try_parse_from([
            "conviction",
            "rankings",
            "--network",
            "kusama",
            "--role",
            "delegators",
        ])
        .unwrap();
        match cli.command {
            Command::Rankings {
                network,
                role,
                track,
                limit,
            } => {
                assert_eq!(network, "kusama");
                assert_eq!(role.as_deref(), Some("delegators"));
                assert!(track.is_none() && limit.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from([
            "conviction",
            "--config",
            "/nonexistent/conviction.toml",
            "config",
        ])
        .unwrap();
        assert!(resolve_config(&cli).is_err());
    }
}
