//! The compile unit: token cursor, diagnostics, name allocator, output
//! sections and injected services.
//!
//! Literal compilers live in `crate::literal` as further `impl Vcc` blocks.

use rowan::{TextRange, TextSize};

use crate::Output;
use crate::config::Config;
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind, Diagnostics};
use crate::emit::Sections;
use crate::parser::{Token, TokenKind, lex, string_value, token_text};
use crate::program::LiteralValue;
use crate::services::{FileSystem, HostFileSystem, Resolver, SystemResolver};

/// Proof that a diagnostic was recorded for a failed literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reported;

pub type LitResult<T> = Result<T, Reported>;

pub struct Vcc<'src> {
    pub(crate) source: &'src str,
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) sections: Sections,
    pub(crate) config: Config,
    unique: u32,
    resolver: Box<dyn Resolver>,
    fs: Box<dyn FileSystem>,
}

impl<'src> Vcc<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: lex(source),
            pos: 0,
            diagnostics: Diagnostics::new(),
            sections: Sections::new(),
            config: Config::default(),
            unique: 0,
            resolver: Box::new(SystemResolver),
            fs: Box::new(HostFileSystem),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_filesystem(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    /// Token under the cursor. Past the end this is a zero-width `Eof`.
    pub fn current(&self) -> Token {
        self.tokens
            .get(self.pos)
            .copied()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, TextRange::empty(self.eof_offset())))
    }

    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check the current token's kind without consuming it.
    pub fn expect(&mut self, kind: TokenKind) -> LitResult<Token> {
        let token = self.current();
        if token.kind == kind {
            return Ok(token);
        }
        let found = self.describe_found(&token);
        self.report(DiagnosticKind::UnexpectedToken, token.span)
            .message(format!("{}, found {}", kind.describe(), found))
            .emit();
        Err(Reported)
    }

    /// How a token is named in "found ..." messages.
    pub(crate) fn describe_found(&self, token: &Token) -> String {
        match token.kind {
            TokenKind::Eof => token.kind.describe().to_string(),
            _ => format!("`{}`", self.token_text(token)),
        }
    }

    pub fn token_text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    pub fn string_value(&self, token: &Token) -> &'src str {
        string_value(self.source, token)
    }

    /// Raw token text in single quotes, as quoted in messages.
    pub(crate) fn quoted(&self, token: &Token) -> String {
        match token.kind {
            TokenKind::Eof => token.kind.describe().to_string(),
            _ => format!("'{}'", self.token_text(token)),
        }
    }

    /// Allocate the next collision-free symbol number.
    pub fn next_unique(&mut self) -> u32 {
        let n = self.unique;
        self.unique += 1;
        n
    }

    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        self.diagnostics.report(kind, range)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub fn sections_mut(&mut self) -> &mut Sections {
        &mut self.sections
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn resolver(&self) -> &dyn Resolver {
        self.resolver.as_ref()
    }

    pub(crate) fn filesystem(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }
}

impl Vcc<'_> {
    /// Compile the whole program and hand back the result.
    pub fn compile(mut self) -> Output {
        let values = self.compile_program();
        self.finish(values)
    }

    pub(crate) fn finish(self, values: Vec<LiteralValue>) -> Output {
        Output {
            values,
            artifact: self.sections.render(),
            diagnostics: self.diagnostics,
            strict: self.config.strict,
        }
    }
}
