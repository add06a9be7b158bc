//! # CLI Command Implementations
//!
//! Each subcommand of `eventb-to-txt` lives in its own file with:
//! - an `Args` struct deriving `clap::Args` for its options, and
//! - an `execute` function that calls into the `eventb_to_txt` library.

pub mod completions;
pub mod convert;
pub mod tree;
