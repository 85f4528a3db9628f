//! Filename filter: fixed prefix, variable key, fixed suffix.

/// Matches file names of the form `<prefix><key><suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern {
    prefix: String,
    suffix: String,
}

impl GlobPattern {
    /// Pattern for an extension. A leading dot is added when missing.
    pub fn new(extension: &str) -> Self {
        let suffix = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };
        Self { prefix: String::new(), suffix }
    }

    /// Require names to start with `prefix`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Extract the key from `name`, or `None` if it does not match.
    ///
    /// The name must be strictly longer than prefix + suffix, so the key is
    /// never empty.
    pub fn key_of<'a>(&self, name: &'a str) -> Option<&'a str> {
        if name.len() <= self.prefix.len() + self.suffix.len() {
            return None;
        }
        name.strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
    }

    /// Rebuild the file name for a key.
    pub fn file_name(&self, key: &str) -> String {
        format!("{}{}{}", self.prefix, key, self.suffix)
    }
}
