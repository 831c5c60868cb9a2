//! Unix-domain socket path literals.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::diagnostics::{DiagnosticKind, Severity};
use crate::emit::c_string;
use crate::parser::Token;
use crate::services::FileKind;
use crate::vcc::{LitResult, Reported, Vcc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatCause {
    Missing,
    PermissionDenied,
    Other,
}

/// A failed stat, reduced to what the severity policy needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatFailure {
    cause: StatCause,
    message: String,
}

impl StatFailure {
    pub fn classify(err: &io::Error) -> Self {
        let cause = match err.kind() {
            io::ErrorKind::NotFound => StatCause::Missing,
            io::ErrorKind::PermissionDenied => StatCause::PermissionDenied,
            _ => StatCause::Other,
        };
        Self {
            cause,
            message: os_message(err),
        }
    }

    pub fn cause(&self) -> StatCause {
        self.cause
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// A socket that does not exist yet, or that we may not look at, can
    /// still be there at runtime. Anything else is fatal.
    pub fn severity(&self) -> Severity {
        match self.cause {
            StatCause::Missing | StatCause::PermissionDenied => Severity::Warning,
            StatCause::Other => Severity::Error,
        }
    }
}

/// `strerror` text without the " (os error N)" suffix.
fn os_message(err: &io::Error) -> String {
    let text = err.to_string();
    match err.raw_os_error() {
        Some(code) => text
            .strip_suffix(&format!(" (os error {code})"))
            .unwrap_or(&text)
            .to_string(),
        None => text,
    }
}

impl<'src> Vcc<'src> {
    /// Validate a socket path literal and emit its endpoint fields.
    ///
    /// Returns the decoded path. A path that cannot be stat'ed because it is
    /// missing or unreadable only warns and is still emitted.
    pub fn emit_uds_path(&mut self, token: &Token, errid: &str) -> LitResult<&'src str> {
        let path = self.string_value(token);

        if !path.starts_with('/') {
            self.report(DiagnosticKind::PathNotAbsolute, token.span)
                .message(errid)
                .emit();
            return Err(Reported);
        }

        match self.filesystem().stat(Path::new(path)) {
            Ok(FileKind::Socket) => {}
            Ok(FileKind::Other) => {
                self.report(DiagnosticKind::NotASocket, token.span)
                    .message(errid)
                    .emit();
                return Err(Reported);
            }
            Err(err) => {
                let failure = StatFailure::classify(&err);
                let severity = failure.severity();
                debug!(path, cause = ?failure.cause(), "socket path stat failed");
                self.report(DiagnosticKind::CannotStat, token.span)
                    .message(format!("{errid}: Cannot stat: {}", failure.message()))
                    .severity(severity)
                    .emit();
                if severity == Severity::Error {
                    return Err(Reported);
                }
            }
        }

        self.sections.fb(&format!("\t.path = {},\n", c_string(path)));
        self.sections.fb("\t.ipv4_suckaddr = (void *) 0,\n");
        self.sections.fb("\t.ipv6_suckaddr = (void *) 0,\n");
        Ok(path)
    }
}
