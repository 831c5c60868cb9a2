//! Statement driver.
//!
//! A program is a sequence of statements, one literal each:
//!
//! ```text
//! regex    "<pattern>" ;
//! duration <num> <unit> ;
//! bytes    <num> <unit> ;
//! count    <digits> ;
//! ip       "<host>" ;
//! backend  "<host>" [ port "<port>" ] ;
//! path     "<abs path>" ;
//! ```
//!
//! A failed statement is skipped up to its `;` so later statements still
//! get checked.

use serde::Serialize;
use tracing::debug;

use crate::diagnostics::DiagnosticKind;
use crate::emit::c_string;
use crate::literal::{EndpointRequest, MaxAddrs, ResolvedAddrs};
use crate::parser::TokenKind;
use crate::vcc::{LitResult, Reported, Vcc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    Regex,
    Duration,
    Bytes,
    Count,
    Ip,
    Backend,
    Path,
}

impl LiteralKind {
    pub const ALL: [LiteralKind; 7] = [
        LiteralKind::Regex,
        LiteralKind::Duration,
        LiteralKind::Bytes,
        LiteralKind::Count,
        LiteralKind::Ip,
        LiteralKind::Backend,
        LiteralKind::Path,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            LiteralKind::Regex => "regex",
            LiteralKind::Duration => "duration",
            LiteralKind::Bytes => "bytes",
            LiteralKind::Count => "count",
            LiteralKind::Ip => "ip",
            LiteralKind::Backend => "backend",
            LiteralKind::Path => "path",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.keyword() == keyword)
    }
}

/// One successfully compiled literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LiteralValue {
    Regex {
        symbol: String,
        pattern: String,
    },
    Duration {
        symbol: String,
        seconds: f64,
    },
    Bytes {
        symbol: String,
        bytes: i64,
    },
    Count {
        symbol: String,
        value: u32,
    },
    Ip {
        symbol: String,
        host: String,
        addr: String,
    },
    Backend {
        symbol: String,
        host: String,
        #[serde(flatten)]
        addrs: ResolvedAddrs,
    },
    Path {
        symbol: String,
        path: String,
    },
}

impl LiteralValue {
    pub fn kind(&self) -> LiteralKind {
        match self {
            LiteralValue::Regex { .. } => LiteralKind::Regex,
            LiteralValue::Duration { .. } => LiteralKind::Duration,
            LiteralValue::Bytes { .. } => LiteralKind::Bytes,
            LiteralValue::Count { .. } => LiteralKind::Count,
            LiteralValue::Ip { .. } => LiteralKind::Ip,
            LiteralValue::Backend { .. } => LiteralKind::Backend,
            LiteralValue::Path { .. } => LiteralKind::Path,
        }
    }

    /// Name of the emitted C object.
    pub fn symbol(&self) -> &str {
        match self {
            LiteralValue::Regex { symbol, .. }
            | LiteralValue::Duration { symbol, .. }
            | LiteralValue::Bytes { symbol, .. }
            | LiteralValue::Count { symbol, .. }
            | LiteralValue::Ip { symbol, .. }
            | LiteralValue::Backend { symbol, .. }
            | LiteralValue::Path { symbol, .. } => symbol,
        }
    }
}

impl Vcc<'_> {
    /// Compile every statement, collecting the literals that succeeded.
    pub fn compile_program(&mut self) -> Vec<LiteralValue> {
        let mut values = Vec::new();
        while !self.eof() {
            match self.compile_statement() {
                Ok(value) => values.push(value),
                Err(Reported) => self.recover(),
            }
        }
        values
    }

    fn compile_statement(&mut self) -> LitResult<LiteralValue> {
        let token = self.current();
        let kind = match token.kind {
            TokenKind::Id => LiteralKind::from_keyword(self.token_text(&token)),
            _ => None,
        };
        let Some(kind) = kind else {
            let expected = LiteralKind::ALL
                .iter()
                .map(|k| format!("`{}`", k.keyword()))
                .collect::<Vec<_>>()
                .join(", ");
            let found = self.describe_found(&token);
            self.report(DiagnosticKind::UnexpectedToken, token.span)
                .message(format!("one of {expected}, found {found}"))
                .emit();
            return Err(Reported);
        };
        self.advance();

        debug!(kind = kind.keyword(), "compiling literal");
        let value = self.compile_literal(kind)?;

        self.expect(TokenKind::Semicolon)?;
        self.advance();
        Ok(value)
    }

    /// Dispatch to the compiler for `kind`. The keyword is already consumed.
    pub fn compile_literal(&mut self, kind: LiteralKind) -> LitResult<LiteralValue> {
        match kind {
            LiteralKind::Regex => self.regex_statement(),
            LiteralKind::Duration => self.duration_statement(),
            LiteralKind::Bytes => self.bytes_statement(),
            LiteralKind::Count => self.count_statement(),
            LiteralKind::Ip => self.ip_statement(),
            LiteralKind::Backend => self.backend_statement(),
            LiteralKind::Path => self.path_statement(),
        }
    }

    /// Skip to just past the next `;`.
    fn recover(&mut self) {
        while !self.eof() && !self.at(TokenKind::Semicolon) {
            self.advance();
        }
        self.advance();
    }

    fn regex_statement(&mut self) -> LitResult<LiteralValue> {
        let token = self.current();
        let symbol = self.compile_regex()?;
        Ok(LiteralValue::Regex {
            symbol,
            pattern: self.string_value(&token).to_string(),
        })
    }

    fn duration_statement(&mut self) -> LitResult<LiteralValue> {
        let seconds = self.duration()?;
        let symbol = format!("VGC_dur_{}", self.next_unique());
        self.sections
            .fb(&format!("static const vtim_dur {symbol} = {seconds:?};\n"));
        Ok(LiteralValue::Duration { symbol, seconds })
    }

    fn bytes_statement(&mut self) -> LitResult<LiteralValue> {
        let bytes = self.byte_val()?;
        let symbol = format!("VGC_bytes_{}", self.next_unique());
        self.sections
            .fb(&format!("static const int64_t {symbol} = {bytes};\n"));
        Ok(LiteralValue::Bytes { symbol, bytes })
    }

    fn count_statement(&mut self) -> LitResult<LiteralValue> {
        let value = self.uint_val()?;
        let symbol = format!("VGC_uint_{}", self.next_unique());
        self.sections
            .fb(&format!("static const unsigned {symbol} = {value};\n"));
        Ok(LiteralValue::Count { symbol, value })
    }

    fn ip_statement(&mut self) -> LitResult<LiteralValue> {
        let token = self.expect(TokenKind::CStr)?;
        self.advance();
        let host = self.string_value(&token);
        let literal = self.token_text(&token);
        let default_port = self.config.default_port.clone();

        let addrs = self.resolve_sockaddr(&EndpointRequest {
            host,
            default_port: &default_port,
            max: MaxAddrs::One,
            literal,
            span: token.span,
            errid: "IP constant",
        })?;

        let (reference, addr) = match (addrs.ipv4, addrs.ipv4_ascii) {
            (Some(reference), Some(addr)) => (reference, addr),
            _ => (
                addrs.ipv6.unwrap_or_default(),
                addrs.ipv6_ascii.unwrap_or_default(),
            ),
        };

        let symbol = format!("VGC_ip_{}", self.next_unique());
        self.sections.fb(&format!(
            "static const void * const {symbol} = {reference};\n"
        ));
        Ok(LiteralValue::Ip {
            symbol,
            host: host.to_string(),
            addr,
        })
    }

    fn backend_statement(&mut self) -> LitResult<LiteralValue> {
        let token = self.expect(TokenKind::CStr)?;
        self.advance();
        let host = self.string_value(&token);
        let literal = self.token_text(&token);

        let mut default_port = self.config.default_port.clone();
        if self.at(TokenKind::Id) && self.token_text(&self.current()) == "port" {
            self.advance();
            let port = self.expect(TokenKind::CStr)?;
            self.advance();
            default_port = self.string_value(&port).to_string();
        }

        let addrs = self.resolve_sockaddr(&EndpointRequest {
            host,
            default_port: &default_port,
            max: MaxAddrs::OnePerFamily,
            literal,
            span: token.span,
            errid: "Backend host",
        })?;

        let symbol = format!("VGC_endpoint_{}", self.next_unique());
        let mut text = format!(
            "static const struct vrt_endpoint {symbol} = {{\n\t.magic = VRT_ENDPOINT_MAGIC,\n"
        );
        if let (Some(reference), Some(ascii)) = (&addrs.ipv4, &addrs.ipv4_ascii) {
            text.push_str(&format!(
                "\t.ipv4_suckaddr = (const struct suckaddr *){reference},\n"
            ));
            text.push_str(&format!("\t.ipv4_addr = {},\n", c_string(ascii)));
        }
        if let (Some(reference), Some(ascii)) = (&addrs.ipv6, &addrs.ipv6_ascii) {
            text.push_str(&format!(
                "\t.ipv6_suckaddr = (const struct suckaddr *){reference},\n"
            ));
            text.push_str(&format!("\t.ipv6_addr = {},\n", c_string(ascii)));
        }
        if let Some(port) = &addrs.port_ascii {
            text.push_str(&format!("\t.port = {},\n", c_string(port)));
        }
        text.push_str("\t.path = (void *) 0,\n};\n");
        self.sections.fb(&text);

        Ok(LiteralValue::Backend {
            symbol,
            host: host.to_string(),
            addrs,
        })
    }

    fn path_statement(&mut self) -> LitResult<LiteralValue> {
        let token = self.expect(TokenKind::CStr)?;
        self.advance();

        let mark = self.sections.body_mark();
        let symbol = format!("VGC_endpoint_{}", self.next_unique());
        self.sections.fb(&format!(
            "static const struct vrt_endpoint {symbol} = {{\n\t.magic = VRT_ENDPOINT_MAGIC,\n"
        ));
        let path = match self.emit_uds_path(&token, "Backend path") {
            Ok(path) => path,
            Err(reported) => {
                self.sections.rewind_body(mark);
                return Err(reported);
            }
        };
        self.sections.fb("};\n");

        Ok(LiteralValue::Path {
            symbol,
            path: path.to_string(),
        })
    }
}
