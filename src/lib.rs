//! ledgerd Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod repository;
pub mod service;

mod error;

pub use config::Config;
pub use domain::{OperationKind, Transaction};
pub use error::{AppError, AppResult};
