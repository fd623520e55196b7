//! Testing infrastructure for wealthgrabber.
//!
//! - `service`: in-memory [`WealthService`](wealthgrabber_core::WealthService) with call recording
//! - `auth`: in-memory secret store, scripted prompt and login backend
//! - `fixtures`: raw upstream records and ready-made domain records
//! - `assertions`: JSON and CSV checks for formatter output
//! - `world`: isolated data directory for running the binary

pub mod assertions;
pub mod auth;
pub mod fixtures;
pub mod service;
pub mod world;

pub use auth::{FakeLoginBackend, MemorySecretStore, ScriptedPrompt};
pub use service::{Call, FakeWealthService};
pub use world::{CliResult, TestWorld};
