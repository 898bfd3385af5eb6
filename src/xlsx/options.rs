//! Read options configuration.

/// How sheet names are keyed in the resulting [`Workbook`](crate::Workbook).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SheetNameCase {
    /// Trim surrounding whitespace and lower-case
    #[default]
    Normalized,
    /// Keep the name exactly as authored
    Preserve,
}

impl SheetNameCase {
    /// Apply the policy to a declared sheet name.
    pub fn apply(self, name: &str) -> String {
        match self {
            SheetNameCase::Normalized => name.trim().to_lowercase(),
            SheetNameCase::Preserve => name.to_string(),
        }
    }
}

/// Options for reading workbooks.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Sheet name keying policy
    pub sheet_names: SheetNameCase,

    /// Decode sheets concurrently (requires the `parallel` feature)
    pub parallel: bool,
}

impl ReadOptions {
    /// Create new read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sheet name keying policy.
    pub fn with_sheet_names(mut self, policy: SheetNameCase) -> Self {
        self.sheet_names = policy;
        self
    }

    /// Keep sheet names as authored.
    pub fn preserve_sheet_names(self) -> Self {
        self.with_sheet_names(SheetNameCase::Preserve)
    }

    /// Decode sheets on the rayon thread pool.
    ///
    /// Ignored unless the crate is built with the `parallel` feature.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ReadOptions::default();
        assert_eq!(opts.sheet_names, SheetNameCase::Normalized);
        assert!(!opts.parallel);
    }

    #[test]
    fn test_builder_pattern() {
        let opts = ReadOptions::new().preserve_sheet_names().with_parallel(true);
        assert_eq!(opts.sheet_names, SheetNameCase::Preserve);
        assert!(opts.parallel);
    }

    #[test]
    fn test_sheet_name_policy() {
        assert_eq!(SheetNameCase::Normalized.apply("  Merchant List "), "merchant list");
        assert_eq!(SheetNameCase::Preserve.apply("  Merchant List "), "  Merchant List ");
    }
}
