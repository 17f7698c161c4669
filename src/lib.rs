//! spendwise - personal expense tracking with monthly category budgets
//!
//! The library holds everything behind the `spendwise` binary: the data
//! models, JSON file storage, the budget services, and the CLI handlers that
//! call them.
//!
//! # Architecture
//!
//! - `models`: expenses, budgets, months, money
//! - `storage`: JSON repositories and the `Storage` coordinator
//! - `services`: reconciliation, the budget guard, summaries, CRUD
//! - `audit`: JSONL audit log of every mutation
//! - `config`: paths and user settings
//! - `cli` / `display` / `export`: the caller layer
//!
//! # Example
//!
//! ```rust,ignore
//! use spendwise::config::paths::SpendPaths;
//! use spendwise::models::OwnerId;
//! use spendwise::services::ReconciliationService;
//! use spendwise::storage::Storage;
//!
//! let mut storage = Storage::new(SpendPaths::new()?)?;
//! storage.load_all()?;
//! let owner = OwnerId::parse("alice")?;
//! let rows = ReconciliationService::new(&storage).reconcile(&owner, start, end)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{SpendError, SpendResult};
