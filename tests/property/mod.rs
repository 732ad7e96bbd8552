//! Property-based tests for the command pipeline

mod output_mode;
mod validate_idempotence;
