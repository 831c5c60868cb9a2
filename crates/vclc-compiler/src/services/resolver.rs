//! Host name resolution.
//!
//! A host literal may carry its own port: `[::1]:8080`, `[::1] 8080`,
//! `example.com:8080`, `example.com 8080`. A bare IPv6 address (more than one
//! colon, no brackets) never carries a port.
//!
//! The port is service text. The system resolver hands it to `getaddrinfo`
//! together with the host, so names like `http` work; the static table only
//! knows numbers.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("IPv6 address lacks ']'")]
    UnclosedBracket,

    #[error("IPv6 address has wrong port separator")]
    BadSeparator,

    #[error("Servname not supported for ai_socktype")]
    BadPort(String),

    /// Failure reported by the lookup itself.
    #[error("{0}")]
    Lookup(String),
}

pub trait Resolver {
    /// Resolve `host` to every address it names.
    ///
    /// `default_port` applies when `host` does not carry a port.
    fn resolve(&self, host: &str, default_port: &str) -> Result<Vec<SocketAddr>, ResolveError>;
}

/// Split a host literal into its name and optional port text.
pub fn split_host_port(text: &str) -> Result<(&str, Option<&str>), ResolveError> {
    if let Some(rest) = text.strip_prefix('[') {
        let close = rest.find(']').ok_or(ResolveError::UnclosedBracket)?;
        let host = &rest[..close];
        let after = &rest[close + 1..];
        if after.is_empty() {
            return Ok((host, None));
        }
        let port = after
            .strip_prefix(':')
            .or_else(|| after.strip_prefix(' '))
            .ok_or(ResolveError::BadSeparator)?;
        return Ok((host, Some(port).filter(|p| !p.is_empty())));
    }

    let sep = text.find(' ').or_else(|| text.find(':'));
    match sep {
        Some(i) if !text[i + 1..].contains(':') => {
            let port = &text[i + 1..];
            Ok((&text[..i], Some(port).filter(|p| !p.is_empty())))
        }
        _ => Ok((text, None)),
    }
}

/// Numeric port text, without a service lookup.
pub fn parse_port(port: &str) -> Result<u16, ResolveError> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ResolveError::BadPort(port.to_string()));
    }
    port.parse()
        .map_err(|_| ResolveError::BadPort(port.to_string()))
}

/// Resolves through the host's `getaddrinfo`, service names included.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn resolve(&self, host: &str, default_port: &str) -> Result<Vec<SocketAddr>, ResolveError> {
        let (name, port) = split_host_port(host)?;
        let service = port.unwrap_or(default_port);
        trace!(name, service, "system lookup");
        lookup(name, service)
    }
}

#[cfg(unix)]
fn lookup(name: &str, service: &str) -> Result<Vec<SocketAddr>, ResolveError> {
    use std::ffi::{CStr, CString};

    let c_name = CString::new(name).map_err(|e| ResolveError::Lookup(e.to_string()))?;
    let c_service = CString::new(service).map_err(|e| ResolveError::Lookup(e.to_string()))?;

    // SAFETY: addrinfo is plain old data; all-zero is a valid hints value.
    let mut hints: libc::addrinfo = unsafe { std::mem::zeroed() };
    hints.ai_family = libc::AF_UNSPEC;
    hints.ai_socktype = libc::SOCK_STREAM;

    let mut head: *mut libc::addrinfo = std::ptr::null_mut();
    // SAFETY: both strings are NUL-terminated and outlive the call; `head`
    // is only read after a zero return.
    let rc = unsafe { libc::getaddrinfo(c_name.as_ptr(), c_service.as_ptr(), &hints, &mut head) };
    if rc != 0 {
        // SAFETY: gai_strerror returns a static NUL-terminated string.
        let message = unsafe { CStr::from_ptr(libc::gai_strerror(rc)) };
        return Err(ResolveError::Lookup(message.to_string_lossy().into_owned()));
    }

    Ok(AddrInfoList(head).socket_addrs())
}

/// Owns a `getaddrinfo` result list; freed on drop.
#[cfg(unix)]
struct AddrInfoList(*mut libc::addrinfo);

#[cfg(unix)]
impl AddrInfoList {
    fn socket_addrs(&self) -> Vec<SocketAddr> {
        let mut out = Vec::new();
        let mut node = self.0;
        while !node.is_null() {
            // SAFETY: `node` is a live element of the list getaddrinfo built.
            let info = unsafe { &*node };
            // SAFETY: `ai_addr` points at a sockaddr of `ai_family`.
            if let Some(addr) = unsafe { to_socket_addr(info) } {
                out.push(addr);
            }
            node = info.ai_next;
        }
        out
    }
}

#[cfg(unix)]
impl Drop for AddrInfoList {
    fn drop(&mut self) {
        if !self.0.is_null() {
            // SAFETY: the list came from getaddrinfo and is freed once.
            unsafe { libc::freeaddrinfo(self.0) };
        }
    }
}

/// Read the socket address of one list element. Other families are skipped.
///
/// # Safety
///
/// `info.ai_addr` must be null or point at a sockaddr matching `ai_family`.
#[cfg(unix)]
unsafe fn to_socket_addr(info: &libc::addrinfo) -> Option<SocketAddr> {
    use std::net::{Ipv4Addr, Ipv6Addr, SocketAddrV4, SocketAddrV6};

    if info.ai_addr.is_null() {
        return None;
    }
    match info.ai_family {
        libc::AF_INET => {
            // SAFETY: guaranteed by the caller.
            let sin = unsafe { &*info.ai_addr.cast::<libc::sockaddr_in>() };
            let ip = Ipv4Addr::from(sin.sin_addr.s_addr.to_ne_bytes());
            Some(SocketAddr::V4(SocketAddrV4::new(ip, u16::from_be(sin.sin_port))))
        }
        libc::AF_INET6 => {
            // SAFETY: guaranteed by the caller.
            let sin6 = unsafe { &*info.ai_addr.cast::<libc::sockaddr_in6>() };
            Some(SocketAddr::V6(SocketAddrV6::new(
                Ipv6Addr::from(sin6.sin6_addr.s6_addr),
                u16::from_be(sin6.sin6_port),
                sin6.sin6_flowinfo,
                sin6.sin6_scope_id,
            )))
        }
        _ => None,
    }
}

#[cfg(not(unix))]
fn lookup(name: &str, service: &str) -> Result<Vec<SocketAddr>, ResolveError> {
    use std::net::ToSocketAddrs;

    (name, parse_port(service)?)
        .to_socket_addrs()
        .map(Iterator::collect)
        .map_err(|e| ResolveError::Lookup(e.to_string()))
}

/// Serves a fixed name table. IP literals resolve to themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    hosts: HashMap<String, Vec<IpAddr>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with its addresses, in lookup order.
    pub fn host(mut self, name: &str, addrs: impl IntoIterator<Item = IpAddr>) -> Self {
        self.hosts
            .insert(name.to_string(), addrs.into_iter().collect());
        self
    }
}

impl Resolver for StaticResolver {
    fn resolve(&self, host: &str, default_port: &str) -> Result<Vec<SocketAddr>, ResolveError> {
        let (name, port) = split_host_port(host)?;
        let port = parse_port(port.unwrap_or(default_port))?;
        if let Ok(ip) = name.parse::<IpAddr>() {
            return Ok(vec![SocketAddr::new(ip, port)]);
        }
        let addrs = self
            .hosts
            .get(name)
            .ok_or_else(|| ResolveError::Lookup("Name or service not known".to_string()))?;
        Ok(addrs.iter().map(|&ip| SocketAddr::new(ip, port)).collect())
    }
}
