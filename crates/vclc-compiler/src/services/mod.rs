//! Outside-world services a compile unit calls into.
//!
//! Both are traits so tests can substitute deterministic tables for DNS and
//! the filesystem.

mod fs;
mod resolver;


pub use fs::{FileKind, FileSystem, HostFileSystem};
pub use resolver::{
    ResolveError, Resolver, StaticResolver, SystemResolver, parse_port, split_host_port,
};
