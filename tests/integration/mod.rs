//! Integration tests for the stratus command pipeline

mod cli_binary;
mod dispatch_scenarios;
mod test_utils;
