//! Command-line contract tests

mod parse_contracts;
