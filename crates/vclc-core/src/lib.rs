#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core value types for the vclc literal compiler.
//!
//! Two independent pieces, both free of compiler state:
//! - **Units** (`units`): duration and byte-size multiplier tables, and the
//!   prefixed-integer scanner used for byte literals
//! - **Socket address images** (`suckaddr`): the fixed-size binary blob a
//!   generated artifact loads as its endpoint address

pub mod suckaddr;
pub mod units;


pub use suckaddr::{AddrFamily, SUCKADDR_LEN, SUCKADDR_WORDS, SuckAddr};
pub use units::{BytesError, LEGAL_BYTES, LEGAL_DURATION, PrefixedInt, PrefixedIntError};
