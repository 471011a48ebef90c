//! mnesh - a mnemonic command shell.
//!
//! Single-letter mnemonics map to real programs which are forked and
//! exec'd, either in the foreground or detached in the background.

pub mod builtins;
pub mod completions;
pub mod config;
pub mod errors;
pub mod logging;
pub mod mnemonics;
pub mod parse;
pub mod process_exec;
pub mod prompt;
pub mod reader;
pub mod shell;

pub use shell::{Shell, State, Step};
