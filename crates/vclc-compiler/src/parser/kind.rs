//! Token kinds.
//!
//! Logos derives token recognition. `Garbage` and `Eof` are synthesized by
//! the lexer and cursor and have no pattern.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    /// `"..."` on one line, or `{"..."}` spanning lines.
    #[regex(r#""[^"\n]*""#)]
    #[token("{\"", long_string)]
    CStr,

    /// Decimal with a fractional part. Defined before `CNum` so `1.5` stays whole.
    #[regex(r"[0-9]+\.[0-9]+")]
    FNum,

    #[regex(r"[0-9]+")]
    CNum,

    /// Identifier. Accepts dots and hyphens; unit suffixes like `ms` or `KB` lex as one.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_.\-]*")]
    Id,

    #[token(";")]
    Semicolon,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,

    /// Past the last token
    Eof,
}

/// Extend a `{"` opener to the first `"}`; unterminated is an error.
fn long_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    match lex.remainder().find("\"}") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

impl TokenKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment
        )
    }

    /// Human-readable name for "expected X" messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::CStr => "string literal",
            Self::FNum => "number",
            Self::CNum => "integer",
            Self::Id => "identifier",
            Self::Semicolon => "`;`",
            Self::Whitespace => "whitespace",
            Self::LineComment | Self::BlockComment => "comment",
            Self::Garbage => "unrecognized input",
            Self::Eof => "end of input",
        }
    }
}
