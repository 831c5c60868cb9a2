//! Artifact emission: the generated C text and its load/discard hooks.

mod cstr;
mod sections;


pub use cstr::c_string;
pub use sections::{IniFin, Sections};
