//! Socket address images.
//!
//! There is no portable way to write a `struct sockaddr` as a compile-time
//! constant. Instead, the compiler builds the native sockaddr on the build
//! host, wraps it in a small tagged envelope, and dumps the raw bytes as an
//! array of 64-bit words. The generated artifact casts the array back.
//!
//! Layout (native byte order):
//!
//! ```text
//! magic: u32 | sockaddr_in or sockaddr_in6 (union, zero-filled)
//! ```
//!
//! The image is only meaningful on a host with the same sockaddr layout and
//! byte order as the one that produced it. Portability comes from
//! re-resolving on every build, never from shipping images between hosts.

use std::mem::{offset_of, size_of};
use std::net::{SocketAddr, SocketAddrV4, SocketAddrV6};

/// Tag in front of every image; lets the runtime reject stray pointers.
pub const SUCKADDR_MAGIC: u32 = 0x4b1e_9335;

#[repr(C)]
#[derive(Clone, Copy)]
#[allow(dead_code)] // layout only
union Storage {
    sa4: libc::sockaddr_in,
    sa6: libc::sockaddr_in6,
}

#[repr(C)]
#[derive(Clone, Copy)]
#[allow(dead_code)] // layout only
struct Envelope {
    magic: u32,
    storage: Storage,
}

const STORAGE_OFFSET: usize = offset_of!(Envelope, storage);

/// Size in bytes of one image.
pub const SUCKADDR_LEN: usize = size_of::<Envelope>();

/// Number of 64-bit words needed to hold one image.
pub const SUCKADDR_WORDS: usize = SUCKADDR_LEN.div_ceil(size_of::<u64>());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddrFamily {
    Ipv4,
    Ipv6,
}

impl std::fmt::Display for AddrFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddrFamily::Ipv4 => write!(f, "IPv4"),
            AddrFamily::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// Binary image of one resolved address.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SuckAddr {
    addr: SocketAddr,
    bytes: [u8; SUCKADDR_LEN],
}

impl SuckAddr {
    pub fn new(addr: SocketAddr) -> Self {
        let mut bytes = [0u8; SUCKADDR_LEN];
        bytes[..size_of::<u32>()].copy_from_slice(&SUCKADDR_MAGIC.to_ne_bytes());

        let native = match addr {
            SocketAddr::V4(v4) => sockaddr_in_bytes(v4),
            SocketAddr::V6(v6) => sockaddr_in6_bytes(v6),
        };
        bytes[STORAGE_OFFSET..STORAGE_OFFSET + native.len()].copy_from_slice(&native);

        Self { addr, bytes }
    }

    pub fn family(&self) -> AddrFamily {
        match self.addr {
            SocketAddr::V4(_) => AddrFamily::Ipv4,
            SocketAddr::V6(_) => AddrFamily::Ipv6,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The image as native-endian 64-bit words, zero-padded at the tail.
    pub fn words(&self) -> Vec<u64> {
        self.bytes
            .chunks(size_of::<u64>())
            .map(|chunk| {
                let mut word = [0u8; size_of::<u64>()];
                word[..chunk.len()].copy_from_slice(chunk);
                u64::from_ne_bytes(word)
            })
            .collect()
    }

    /// Numeric host text, as `getnameinfo(NI_NUMERICHOST)` would print it.
    pub fn ip_text(&self) -> String {
        match self.addr {
            SocketAddr::V6(v6) if v6.scope_id() != 0 => {
                format!("{}%{}", v6.ip(), v6.scope_id())
            }
            _ => self.addr.ip().to_string(),
        }
    }

    pub fn port_text(&self) -> String {
        self.addr.port().to_string()
    }
}

impl std::fmt::Debug for SuckAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuckAddr")
            .field("family", &self.family())
            .field("addr", &self.addr)
            .finish()
    }
}

fn sockaddr_in_bytes(addr: SocketAddrV4) -> Vec<u8> {
    // SAFETY: sockaddr_in is plain old data; all-zero is a valid value.
    let mut sin: libc::sockaddr_in = unsafe { std::mem::zeroed() };
    #[cfg(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    ))]
    {
        sin.sin_len = size_of::<libc::sockaddr_in>() as u8;
    }
    sin.sin_family = libc::AF_INET as libc::sa_family_t;
    sin.sin_port = addr.port().to_be();
    sin.sin_addr.s_addr = u32::from_ne_bytes(addr.ip().octets());
    raw_bytes(&sin).to_vec()
}

fn sockaddr_in6_bytes(addr: SocketAddrV6) -> Vec<u8> {
    // SAFETY: sockaddr_in6 is plain old data; all-zero is a valid value.
    let mut sin6: libc::sockaddr_in6 = unsafe { std::mem::zeroed() };
    #[cfg(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    ))]
    {
        sin6.sin6_len = size_of::<libc::sockaddr_in6>() as u8;
    }
    sin6.sin6_family = libc::AF_INET6 as libc::sa_family_t;
    sin6.sin6_port = addr.port().to_be();
    sin6.sin6_flowinfo = addr.flowinfo();
    sin6.sin6_addr.s6_addr = addr.ip().octets();
    sin6.sin6_scope_id = addr.scope_id();
    raw_bytes(&sin6).to_vec()
}

/// View a padding-free C struct as bytes.
fn raw_bytes<T: Copy>(value: &T) -> &[u8] {
    // SAFETY: only used with sockaddr_in/sockaddr_in6, whose fields cover
    // every byte, so no uninitialized padding is read.
    unsafe { std::slice::from_raw_parts((value as *const T).cast::<u8>(), size_of::<T>()) }
}
