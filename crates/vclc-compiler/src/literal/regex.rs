//! Regex literals.
//!
//! The pattern is compiled once at compile time with the same engine the
//! artifact uses, then thrown away. The artifact rebuilds it on load.

use regex_automata::meta;
use tracing::debug;

use crate::diagnostics::DiagnosticKind;
use crate::emit::c_string;
use crate::parser::TokenKind;
use crate::vcc::{LitResult, Reported, Vcc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegexError {
    #[error("{message} (at offset {offset})")]
    Syntax { message: String, offset: usize },

    /// The pattern parsed but the engine refused to build it.
    #[error("{0}")]
    Build(String),
}

/// Compile `pattern` and discard the result.
pub fn validate_regex(pattern: &str, size_limit: Option<usize>) -> Result<(), RegexError> {
    regex_syntax::ParserBuilder::new()
        .build()
        .parse(pattern)
        .map_err(|e| syntax_error(&e))?;

    meta::Regex::builder()
        .configure(meta::Config::new().nfa_size_limit(size_limit))
        .build(pattern)
        .map(drop)
        .map_err(|e| RegexError::Build(e.to_string()))
}

fn syntax_error(err: &regex_syntax::Error) -> RegexError {
    match err {
        regex_syntax::Error::Parse(e) => RegexError::Syntax {
            message: e.kind().to_string(),
            offset: e.span().start.offset,
        },
        regex_syntax::Error::Translate(e) => RegexError::Syntax {
            message: e.kind().to_string(),
            offset: e.span().start.offset,
        },
        _ => RegexError::Build(err.to_string()),
    }
}

impl Vcc<'_> {
    /// Compile the string literal under the cursor as a regex.
    ///
    /// Returns the symbol of the runtime handle. The cursor moves past the
    /// literal even when the pattern is rejected.
    pub fn compile_regex(&mut self) -> LitResult<String> {
        let token = self.expect(TokenKind::CStr)?;
        let pattern = self.string_value(&token);
        let validated = validate_regex(pattern, self.config.regex_size_limit);
        self.advance();

        if let Err(err) = validated {
            self.report(DiagnosticKind::RegexCompile, token.span)
                .message(err.to_string())
                .emit();
            return Err(Reported);
        }

        let name = format!("VGC_re_{}", self.next_unique());
        debug!(%name, pattern, "regex literal");

        self.sections.fh(&format!("static void *{name};\n"));
        let hook = self.sections.new_inifin();
        hook.ini = format!("\tVRT_re_init(&{name}, {});", c_string(pattern));
        hook.fin = format!("\tVRT_re_fini({name});");
        Ok(name)
    }
}
