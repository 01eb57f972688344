use anyhow::{Context, Result};
use clap::ArgMatches;
use log::LevelFilter;
use std::path::PathBuf;

use twinfer_classifiers::io::read_artifact;
use twinfer_server::cli::build_cli;
use twinfer_server::config::ServerConfig;
use twinfer_server::server;

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("TWINFER_LOG", "error,twinfer=info"))
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("serve", serve_matches)) => handle_serve(serve_matches).await,
        Some(("inspect", inspect_matches)) => handle_inspect(inspect_matches),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

async fn handle_serve(matches: &ArgMatches) -> Result<()> {
    let config_path: Option<&PathBuf> = matches.get_one("config");
    match config_path {
        Some(path) => log::info!("[twinfer::server] Using config: {:?}", path),
        None => log::info!("[twinfer::server] No config provided; using defaults."),
    }

    let config = ServerConfig::from_arguments(config_path, matches)?;
    server::run(config).await
}

fn handle_inspect(matches: &ArgMatches) -> Result<()> {
    let artifact_path: &PathBuf = matches
        .get_one("artifact")
        .context("An artifact path is required")?;
    let artifact = read_artifact(artifact_path)
        .with_context(|| format!("Failed to load artifact: {}", artifact_path.display()))?;
    println!("{}", serde_json::to_string_pretty(&artifact.summary())?);
    Ok(())
}
