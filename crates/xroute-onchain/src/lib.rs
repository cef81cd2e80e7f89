//! # xroute-onchain -- Execution-layer client for xroute
//!
//! The execution layer owns transaction signing, submission and
//! confirmation. This crate defines the contract xroute consumes
//! ([`OnchainExecutor`]), the payloads that cross it, and a JSON-over-HTTP
//! implementation ([`HttpOnchainExecutor`]).
//!
//! ## Architecture
//!
//! The onchain adapter service in `xroute-policy` holds an
//! `Arc<dyn OnchainExecutor>`. Tests substitute their own implementation;
//! the binary wires [`HttpOnchainExecutor`] when `EXECUTOR_URL` is set.

pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod types;

pub use config::ExecutorConfig;
pub use error::ExecutionError;
pub use executor::OnchainExecutor;
pub use http::HttpOnchainExecutor;
