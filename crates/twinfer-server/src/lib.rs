//! twinfer-server: HTTP front end for the twinfer prediction core.
pub mod cli;
pub mod config;
pub mod routes;
pub mod server;
