/// Options applied while reading typed values.
///
/// # Examples
/// ```
/// use fieldwise::ReadOptions;
///
/// let opts = ReadOptions::new().with_deny_unknown_fields(true);
/// assert!(opts.deny_unknown_fields);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Report keys that no schema field claims instead of ignoring them.
    pub deny_unknown_fields: bool,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deny_unknown_fields(mut self, deny_unknown_fields: bool) -> Self {
        self.deny_unknown_fields = deny_unknown_fields;
        self
    }
}

/// Options applied when rendering text output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub pretty: bool,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
