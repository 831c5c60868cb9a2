//! Duration, byte-size and count literals.

use tracing::trace;
use vclc_core::units::{self, BytesError, LEGAL_BYTES, LEGAL_DURATION, parse_prefixed_int};

use crate::diagnostics::DiagnosticKind;
use crate::parser::{Token, TokenKind};
use crate::vcc::{LitResult, Reported, Vcc};

impl Vcc<'_> {
    /// Seconds per duration unit. Consumes the unit identifier.
    pub fn duration_unit(&mut self) -> LitResult<f64> {
        let token = self.expect(TokenKind::Id)?;
        let unit = self.token_text(&token);
        let Some(scale) = units::duration_unit(unit) else {
            let quoted = self.quoted(&token);
            self.report(DiagnosticKind::UnknownDurationUnit, token.span)
                .message(quoted)
                .hint(LEGAL_DURATION)
                .emit();
            return Err(Reported);
        };
        self.advance();
        Ok(scale)
    }

    /// Digits-only unsigned integer.
    pub fn uint_val(&mut self) -> LitResult<u32> {
        let token = self.expect(TokenKind::CNum)?;
        let text = self.token_text(&token);
        let Ok(value) = text.parse::<u32>() else {
            self.report(DiagnosticKind::CountOverflow, token.span)
                .message(text)
                .emit();
            return Err(Reported);
        };
        self.advance();
        Ok(value)
    }

    /// Integer or decimal magnitude.
    pub fn double_val(&mut self) -> LitResult<f64> {
        let token = self.expect_number()?;
        let value = self.token_text(&token).parse::<f64>().unwrap_or_default();
        self.advance();
        Ok(value)
    }

    /// `<number> <unit>` in seconds.
    ///
    /// The result must be finite; the artifact has no spelling for infinity.
    pub fn duration(&mut self) -> LitResult<f64> {
        let start = self.current().span;
        let magnitude = self.double_val()?;
        let unit = self.current().span;
        let scale = self.duration_unit()?;
        trace!(magnitude, scale, "duration");

        let seconds = magnitude * scale;
        if !seconds.is_finite() {
            self.report(DiagnosticKind::DurationOverflow, start.cover(unit))
                .emit();
            return Err(Reported);
        }
        Ok(seconds)
    }

    /// `<number> <unit>` in bytes, computed without rounding.
    pub fn byte_val(&mut self) -> LitResult<i64> {
        let token = self.expect_number()?;
        let text = self.token_text(&token);
        let magnitude = match parse_prefixed_int(text) {
            Ok(m) if m.len == text.len() => m,
            _ => {
                let quoted = self.quoted(&token);
                self.report(DiagnosticKind::BytesParse, token.span)
                    .message(quoted)
                    .emit();
                return Err(Reported);
            }
        };
        self.advance();

        let unit_token = self.current();
        if unit_token.kind != TokenKind::Id {
            let quoted = self.quoted(&unit_token);
            self.report(DiagnosticKind::ExpectedBytesUnit, unit_token.span)
                .message(quoted)
                .emit();
            return Err(Reported);
        }

        let unit = self.token_text(&unit_token);
        match units::bytes_unit(magnitude, unit) {
            Ok(bytes) => {
                self.advance();
                Ok(bytes)
            }
            Err(err) => {
                let kind = match err {
                    BytesError::UnknownUnit => DiagnosticKind::UnknownBytesUnit,
                    BytesError::Overflow => DiagnosticKind::BytesOverflow,
                };
                let quoted = self.quoted(&unit_token);
                self.report(kind, unit_token.span)
                    .message(quoted)
                    .hint(LEGAL_BYTES)
                    .emit();
                Err(Reported)
            }
        }
    }

    fn expect_number(&mut self) -> LitResult<Token> {
        let token = self.current();
        if matches!(token.kind, TokenKind::CNum | TokenKind::FNum) {
            return Ok(token);
        }
        let found = self.describe_found(&token);
        self.report(DiagnosticKind::UnexpectedToken, token.span)
            .message(format!("number, found {found}"))
            .emit();
        Err(Reported)
    }
}
