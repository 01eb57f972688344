use anyhow::{ensure, Context, Result};
use actix_web::{web, App, HttpServer};

use twinfer_classifiers::predictor::Predictor;

use crate::config::ServerConfig;
use crate::routes;

/// Load both models; the server must not start if either fails.
pub fn load_predictor(config: &ServerConfig) -> Result<Predictor> {
    log::info!(
        "[twinfer::server] Loading random_forest from {} and gradient_boosting from {}",
        config.random_forest_path,
        config.gradient_boosting_path
    );
    let predictor = Predictor::load(
        &config.random_forest_path,
        &config.gradient_boosting_path,
        config.schema_check(),
    )
    .context("Failed to load model artifacts")?;
    log::info!(
        "[twinfer::server] Feature schema has {} features",
        predictor.schema().len()
    );
    Ok(predictor)
}

/// Serve `POST /predict` until the server is stopped.
pub async fn run(config: ServerConfig) -> Result<()> {
    ensure!(
        config.workers != Some(0),
        "Number of workers must be at least 1"
    );
    let predictor = web::Data::new(load_predictor(&config)?);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(predictor.clone())
            .configure(routes::configure)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    log::info!("[twinfer::server] Listening on {}:{}", config.host, config.port);
    server
        .bind((config.host.as_str(), config.port))
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?
        .run()
        .await
        .context("HTTP server terminated with an error")
}
