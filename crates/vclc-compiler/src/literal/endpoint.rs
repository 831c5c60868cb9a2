//! Host/port literals.
//!
//! A host literal is resolved at compile time. Each usable family contributes
//! at most one address; the chosen addresses are frozen into the artifact as
//! socket-address images so no lookup happens at runtime.

use std::net::SocketAddr;

use rowan::TextRange;
use serde::Serialize;
use tracing::{debug, trace};
use vclc_core::{AddrFamily, SUCKADDR_WORDS, SuckAddr};

use crate::diagnostics::DiagnosticKind;
use crate::emit::c_string;
use crate::vcc::{LitResult, Reported, Vcc};

/// How many addresses a host literal may resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxAddrs {
    /// A single address of either family.
    One,
    /// One IPv4 and one IPv6.
    OnePerFamily,
}

impl MaxAddrs {
    pub fn limit(self) -> usize {
        match self {
            MaxAddrs::One => 1,
            MaxAddrs::OnePerFamily => 2,
        }
    }

    fn conjunction(self) -> &'static str {
        match self {
            MaxAddrs::One => "or",
            MaxAddrs::OnePerFamily => "and one",
        }
    }
}

/// One candidate address with its printable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    addr: SuckAddr,
    ip_text: String,
    port_text: String,
}

impl ResolvedEndpoint {
    pub fn new(addr: SocketAddr) -> Self {
        let addr = SuckAddr::new(addr);
        Self {
            ip_text: addr.ip_text(),
            port_text: addr.port_text(),
            addr,
        }
    }

    pub fn family(&self) -> AddrFamily {
        self.addr.family()
    }

    pub fn suckaddr(&self) -> &SuckAddr {
        &self.addr
    }

    pub fn ip_text(&self) -> &str {
        &self.ip_text
    }

    pub fn port_text(&self) -> &str {
        &self.port_text
    }
}

/// Everything a lookup produced, sorted by family.
///
/// The first address of each family is kept. A later, different address of
/// the same family counts as wrong; an exact repeat does not.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    ipv4: Option<ResolvedEndpoint>,
    ipv6: Option<ResolvedEndpoint>,
    total: usize,
    wrong: usize,
    listing: String,
}

impl Candidates {
    pub fn collect(addrs: impl IntoIterator<Item = SocketAddr>) -> Self {
        let mut candidates = Self::default();
        for addr in addrs {
            candidates.add(addr);
        }
        candidates
    }

    pub fn add(&mut self, addr: SocketAddr) {
        let endpoint = ResolvedEndpoint::new(addr);
        self.listing.push_str(&format!(
            "\t{}:{}\n",
            endpoint.ip_text, endpoint.port_text
        ));

        let slot = match endpoint.family() {
            AddrFamily::Ipv4 => &mut self.ipv4,
            AddrFamily::Ipv6 => &mut self.ipv6,
        };
        match slot {
            None => *slot = Some(endpoint),
            Some(first) if first.addr != endpoint.addr => self.wrong += 1,
            Some(_) => {}
        }
        self.total += 1;
    }

    pub fn ipv4(&self) -> Option<&ResolvedEndpoint> {
        self.ipv4.as_ref()
    }

    pub fn ipv6(&self) -> Option<&ResolvedEndpoint> {
        self.ipv6.as_ref()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn wrong(&self) -> usize {
        self.wrong
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Too many distinct addresses in one family, or too many overall.
    pub fn is_ambiguous(&self, max: MaxAddrs) -> bool {
        self.wrong > 0 || self.total > max.limit()
    }

    /// One `\t<addr>:<port>` line per candidate, in lookup order.
    pub fn listing(&self) -> &str {
        &self.listing
    }
}

/// Symbols and text for the addresses a host literal resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedAddrs {
    /// Reference expression for the IPv4 image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_ascii: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_ascii: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_ascii: Option<String>,
}

/// What to resolve and how to blame it.
#[derive(Debug, Clone, Copy)]
pub struct EndpointRequest<'a> {
    pub host: &'a str,
    pub default_port: &'a str,
    pub max: MaxAddrs,
    /// Raw literal text, quoted in messages.
    pub literal: &'a str,
    pub span: TextRange,
    /// Names the construct in messages, e.g. "Backend host".
    pub errid: &'a str,
}

impl Vcc<'_> {
    /// Resolve a host literal and emit an image per accepted family.
    pub fn resolve_sockaddr(&mut self, req: &EndpointRequest<'_>) -> LitResult<ResolvedAddrs> {
        debug!(host = req.host, port = req.default_port, "resolving endpoint");

        let addrs = match self.resolver().resolve(req.host, req.default_port) {
            Ok(addrs) => addrs,
            Err(err) => {
                self.report(DiagnosticKind::ResolveFailed, req.span)
                    .message(format!("{} '{}'", req.errid, req.literal))
                    .hint(err.to_string())
                    .hint("(Sorry if that error message is gibberish.)")
                    .emit();
                return Err(Reported);
            }
        };

        let candidates = Candidates::collect(addrs);
        trace!(
            total = candidates.total(),
            wrong = candidates.wrong(),
            "endpoint candidates"
        );

        if candidates.is_empty() {
            self.report(DiagnosticKind::NoUsableAddress, req.span)
                .message(format!("{} '{}'", req.errid, req.literal))
                .emit();
            return Err(Reported);
        }

        if candidates.is_ambiguous(req.max) {
            self.report(DiagnosticKind::AmbiguousAddress, req.span)
                .message(format!("{} {}", req.errid, req.literal))
                .hint(format!(
                    "Only one IPv4 {} IPv6 are allowed.",
                    req.max.conjunction()
                ))
                .hint(format!(
                    "Please specify which exact address you want to use, we found all of these:\n{}",
                    candidates.listing().trim_end()
                ))
                .emit();
            return Err(Reported);
        }

        let mut out = ResolvedAddrs::default();
        if let Some(v4) = candidates.ipv4() {
            out.ipv4 = Some(self.emit_suckaddr(req.host, v4));
            out.ipv4_ascii = Some(v4.ip_text().to_string());
            out.port_ascii = Some(v4.port_text().to_string());
        }
        if let Some(v6) = candidates.ipv6() {
            out.ipv6 = Some(self.emit_suckaddr(req.host, v6));
            out.ipv6_ascii = Some(v6.ip_text().to_string());
            out.port_ascii
                .get_or_insert_with(|| v6.port_text().to_string());
        }
        Ok(out)
    }

    /// Freeze one address image into the forward declarations.
    ///
    /// Returns the expression that refers to it.
    pub fn emit_suckaddr(&mut self, host: &str, endpoint: &ResolvedEndpoint) -> String {
        let n = self.next_unique();
        let words: Vec<String> = endpoint
            .suckaddr()
            .words()
            .iter()
            .map(|w| format!("    0x{w:016x}ULL"))
            .collect();

        let mut text = format!("\n/* {} -> {} */\n", c_string(host), endpoint.ip_text());
        text.push_str(&format!(
            "static const unsigned long long suckaddr_{n}[{SUCKADDR_WORDS}] = {{\n"
        ));
        text.push_str(&words.join(",\n"));
        text.push_str("\n};\n");
        self.sections.fh(&text);

        format!("(const void*)suckaddr_{n}")
    }
}
