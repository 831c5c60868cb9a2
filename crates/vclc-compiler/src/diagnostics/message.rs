use rowan::TextRange;

/// Every way a literal can fail to compile.
///
/// Grouped by the component that reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Token cursor
    UnexpectedToken,

    // Regex literals
    RegexCompile,

    // Host/port literals
    ResolveFailed,
    NoUsableAddress,
    AmbiguousAddress,

    // Socket path literals
    PathNotAbsolute,
    CannotStat,
    NotASocket,

    // Numeric literals
    UnknownDurationUnit,
    DurationOverflow,
    BytesParse,
    ExpectedBytesUnit,
    UnknownBytesUnit,
    BytesOverflow,
    CountOverflow,
}

impl DiagnosticKind {
    /// Default severity for this kind. Can be overridden by policy.
    pub fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnexpectedToken => "unexpected token",

            Self::RegexCompile => "Regexp compilation error",

            Self::ResolveFailed => "could not be resolved to an IP address",
            Self::NoUsableAddress => "resolves to neither IPv4 nor IPv6 addresses",
            Self::AmbiguousAddress => "resolves to too many addresses",

            Self::PathNotAbsolute => "Must be an absolute path",
            Self::CannotStat => "Cannot stat",
            Self::NotASocket => "Not a socket",

            Self::UnknownDurationUnit => "Unknown duration unit",
            Self::DurationOverflow => "duration is too large to represent",
            Self::BytesParse => "BYTES parsing error",
            Self::ExpectedBytesUnit => "Expected BYTES unit (B, KB, MB...)",
            Self::UnknownBytesUnit => "Unknown BYTES unit",
            Self::BytesOverflow => "BYTES can not be represented with adequate precision",
            Self::CountOverflow => "count does not fit in 32 bits",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnexpectedToken => "expected {}".to_string(),

            // Detail is the error-id label plus the literal
            Self::ResolveFailed => format!("{{}} {}", self.fallback_message()),
            Self::NoUsableAddress
            | Self::AmbiguousAddress
            | Self::PathNotAbsolute
            | Self::NotASocket => format!("{{}}: {}", self.fallback_message()),
            Self::CannotStat => "{}".to_string(),

            Self::RegexCompile => format!("{}: {{}}", self.fallback_message()),
            Self::CountOverflow => "count {} does not fit in 32 bits".to_string(),
            Self::DurationOverflow => format!("{}: {{}}", self.fallback_message()),

            Self::BytesParse => format!("{} at {{}}", self.fallback_message()),
            Self::ExpectedBytesUnit => format!("{} got {{}}", self.fallback_message()),

            _ => format!("{} {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            range,
            message: message.into(),
            hints: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity,
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
