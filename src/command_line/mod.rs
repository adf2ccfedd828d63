//! Command-line front end: argument parsing, dispatch and reporting.

pub(crate) mod cli;
