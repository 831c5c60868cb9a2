//! Compile-time configuration.

/// Configuration for one compilation.
#[derive(Clone, Debug)]
pub struct Config {
    /// Treat warnings as failures when judging the output
    pub(crate) strict: bool,
    /// Upper bound on the regex engine's compiled size, in bytes
    pub(crate) regex_size_limit: Option<usize>,
    /// Port used for host literals that do not carry one
    pub(crate) default_port: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict: false,
            regex_size_limit: Some(10 << 20),
            default_port: "80".to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether warnings fail the compilation.
    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    /// Set the regex size limit. `None` lifts it.
    pub fn regex_size_limit(mut self, limit: Option<usize>) -> Self {
        self.regex_size_limit = limit;
        self
    }

    /// Set the default port for host literals.
    pub fn default_port(mut self, port: impl Into<String>) -> Self {
        self.default_port = port.into();
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}
