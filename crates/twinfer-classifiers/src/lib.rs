//! twinfer-classifiers: tree-ensemble classifiers and the prediction core.
//!
//! This crate loads pre-trained binary classifiers (a random forest and a
//! gradient boosting model) from JSON artifacts, assembles per-request feature
//! vectors against a fixed feature schema, and turns a JSON request body into a
//! class prediction with its positive-class probability.
//!
//! Nothing here performs I/O after startup: a [`predictor::Predictor`] is built
//! once and shared read-only by every request.
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod math;
pub mod models;
pub mod predictor;
