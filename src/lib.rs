//! Stratus: a command-line client for a cloud provider's REST API
//!
//! Every command follows one pipeline: an authentication gate, option
//! validation, exactly one remote call, and a rendering step. Commands are
//! attached to a `Registrar`, which matches argv, runs the pipeline and returns
//! the exit status; only the binary exits the process.

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod remote;
pub mod session;
