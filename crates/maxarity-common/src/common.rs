//! Shared configuration enums.

use serde::{Deserialize, Serialize};

/// ECMAScript grammar revision used for tokenizing and parsing.
///
/// The analyzer targets a single grammar family; the revision gates the few
/// syntactic forms that arrived after the ES2020 baseline.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum EcmaVersion {
    #[default]
    Es2020,
    Es2021,
    Es2022,
}

impl EcmaVersion {
    /// Logical assignment operators (`&&=`, `||=`, `??=`) are ES2021.
    pub fn supports_logical_assignment(self) -> bool {
        self >= EcmaVersion::Es2021
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_revision_is_es2020() {
        assert_eq!(EcmaVersion::default(), EcmaVersion::Es2020);
    }

    #[test]
    fn logical_assignment_gate() {
        assert!(!EcmaVersion::Es2020.supports_logical_assignment());
        assert!(EcmaVersion::Es2021.supports_logical_assignment());
        assert!(EcmaVersion::Es2022.supports_logical_assignment());
    }
}
