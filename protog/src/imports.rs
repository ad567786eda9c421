//! Imports injected by the renderer
//!
//! Writers request imports by reason while they run. The set is collected
//! per render call and written to the import slot once every writer is done.

use std::collections::BTreeSet;

/// Why an import is needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportReason {
    /// A method request or response resolved to `google.protobuf.Empty`
    EmptyType,
}

impl ImportReason {
    /// The proto path to import
    pub fn path(&self) -> &'static str {
        match self {
            ImportReason::EmptyType => "google/protobuf/empty.proto",
        }
    }
}

/// Imports required by one render call
#[derive(Debug, Clone, Default)]
pub struct Imports {
    reasons: BTreeSet<ImportReason>,
}

impl Imports {
    /// Request an import; repeated requests are merged
    pub fn require(&mut self, reason: ImportReason) {
        self.reasons.insert(reason);
    }

    /// Import paths, sorted and deduplicated
    pub fn paths(&self) -> Vec<&'static str> {
        let paths: BTreeSet<_> = self.reasons.iter().map(ImportReason::path).collect();
        paths.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_is_idempotent() {
        let mut imports = Imports::default();
        assert!(imports.paths().is_empty());

        imports.require(ImportReason::EmptyType);
        imports.require(ImportReason::EmptyType);

        assert_eq!(imports.paths(), vec!["google/protobuf/empty.proto"]);
    }
}
