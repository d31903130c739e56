//! Warning side-channel for the run report.
//!
//! Recoverable problems (missing lookups, malformed holiday rules,
//! invalid override values) are logged and recorded here while the run
//! continues. Fatal problems never pass through `Diagnostics`; they are
//! returned as [`TermcalError`](crate::TermcalError) values.

/// Collects warnings emitted during a run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a warning and record it in the run report.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.warnings.push(message);
    }

    /// All warnings recorded so far, in emission order.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn count(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_are_recorded_in_order() {
        let mut diag = Diagnostics::new();
        assert!(diag.is_empty());

        diag.warn("first");
        diag.warn(String::from("second"));

        assert_eq!(diag.count(), 2);
        assert_eq!(diag.warnings(), ["first", "second"]);
    }
}
