//! Literal compilers.
//!
//! Each submodule adds methods to [`Vcc`](crate::Vcc). A literal compiler
//! reads from the cursor, validates against the outside world, appends to
//! the output sections and leaves the cursor past what it consumed.

mod endpoint;
mod numeric;
mod regex;
mod uds;

#[cfg(test)]
mod numeric_tests;

pub use endpoint::{Candidates, EndpointRequest, MaxAddrs, ResolvedAddrs, ResolvedEndpoint};
pub use regex::{RegexError, validate_regex};
pub use uds::{StatCause, StatFailure};
