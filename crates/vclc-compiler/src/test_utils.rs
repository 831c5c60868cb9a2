//! Test utilities: a fixed name table and filesystem, so compile results do
//! not depend on the machine running the tests.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::Path;

use crate::services::{FileKind, FileSystem, StaticResolver};
use crate::{Config, Output, Vcc};

pub fn resolver() -> StaticResolver {
    StaticResolver::new()
        .host("www.example", [IpAddr::V4(Ipv4Addr::new(192, 0, 2, 10))])
        .host(
            "dual.example",
            [
                IpAddr::V4(Ipv4Addr::new(192, 0, 2, 10)),
                IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0x10)),
            ],
        )
        .host(
            "pool.example",
            [
                IpAddr::V4(Ipv4Addr::new(192, 0, 2, 10)),
                IpAddr::V4(Ipv4Addr::new(192, 0, 2, 11)),
            ],
        )
}

/// `/run/*.sock` are sockets, `/missing/*` does not exist, `/denied/*` is
/// unreadable, anything else is a regular file.
pub struct FixtureFs;

impl FileSystem for FixtureFs {
    fn stat(&self, path: &Path) -> io::Result<FileKind> {
        if path.starts_with("/missing") {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        if path.starts_with("/denied") {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        if path.starts_with("/run") && path.extension().is_some_and(|e| e == "sock") {
            return Ok(FileKind::Socket);
        }
        Ok(FileKind::Other)
    }
}

pub fn fixture_vcc(source: &str) -> Vcc<'_> {
    Vcc::new(source)
        .with_resolver(resolver())
        .with_filesystem(FixtureFs)
}

pub fn compile_fixture(source: &str) -> Output {
    compile_fixture_with(source, Config::new())
}

pub fn compile_fixture_with(source: &str, config: Config) -> Output {
    fixture_vcc(source).with_config(config).compile()
}

/// Plain rendering of every diagnostic.
pub fn render_diagnostics(source: &str) -> String {
    compile_fixture(source).diagnostics.render(source)
}
