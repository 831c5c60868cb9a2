//! vclc compiler: literal and endpoint compilation.
//!
//! This crate turns literal statements into validated values and the C text
//! of a loadable artifact:
//! - `parser` - lexer and token kinds
//! - `vcc` - compile unit with token cursor, name allocator and services
//! - `literal` - regex, endpoint, socket path and numeric literal compilers
//! - `program` - statement driver
//! - `emit` - output sections and artifact rendering
//! - `services` - name resolution and filesystem stat
//! - `diagnostics` - error reporting
//!
//! # Example
//!
//! ```
//! use vclc_compiler::{Config, compile};
//!
//! let source = "duration 1.5m; bytes 4KB;";
//! let output = compile(source, Config::new());
//! assert!(output.is_valid());
//! assert_eq!(output.values.len(), 2);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod literal;
pub mod parser;
pub mod program;
pub mod services;
pub mod vcc;

#[cfg(test)]
mod program_tests;
#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use program::{LiteralKind, LiteralValue};
pub use services::{FileSystem, Resolver, StaticResolver, SystemResolver};
pub use vcc::{LitResult, Reported, Vcc};

/// Errors that can occur when a compilation is turned into a `Result`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(
        "compilation failed with {} errors and {} warnings",
        .0.error_count(),
        .0.warning_count()
    )]
    CompileFailed(Diagnostics),
}

/// Result type for compile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything one compilation produced.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Output {
    pub values: Vec<LiteralValue>,
    pub artifact: String,
    #[serde(skip)]
    pub diagnostics: Diagnostics,
    #[serde(skip)]
    strict: bool,
}

impl Output {
    /// No errors, and no warnings either when compiling strictly.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors() && !(self.strict && self.diagnostics.has_warnings())
    }

    pub fn into_result(self) -> Result<Output> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(Error::CompileFailed(self.diagnostics))
        }
    }
}

/// Compile `source` against the host's resolver and filesystem.
pub fn compile(source: &str, config: Config) -> Output {
    Vcc::new(source).with_config(config).compile()
}
