//! Error types for `ChainTable` and `HashParams`.

use std::collections::TryReserveError;

/// Errors reported by table and hash-parameter operations.
///
/// A missing key is never an error; lookups report it as `None`/`false`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Storage for a key/value copy or a bucket array could not be reserved.
    /// The table is left exactly as it was before the call.
    #[error("failed to allocate {what} ({requested} elements)")]
    Allocation {
        what: &'static str,
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    /// An explicit hash coefficient lies outside its admissible range.
    #[error("hash coefficient {name} = {value} outside [{min}, {modulus})")]
    InvalidCoefficient {
        name: &'static str,
        value: i64,
        min: i64,
        modulus: i64,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;

/// Copies `s` into freshly reserved storage, reporting allocation failure
/// instead of aborting.
pub(crate) fn try_copy(s: &str, what: &'static str) -> Result<String> {
    let mut out = String::new();
    out.try_reserve_exact(s.len())
        .map_err(|source| TableError::Allocation {
            what,
            requested: s.len(),
            source,
        })?;
    out.push_str(s);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_copy_preserves_contents() {
        let s = try_copy("content-type", "key").unwrap();
        assert_eq!(s, "content-type");
        assert!(try_copy("", "value").unwrap().is_empty());
    }

    #[test]
    fn allocation_error_reports_size() {
        let source = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let e = TableError::Allocation {
            what: "bucket array",
            requested: 64,
            source,
        };
        assert_eq!(e.to_string(), "failed to allocate bucket array (64 elements)");
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn invalid_coefficient_message() {
        let e = TableError::InvalidCoefficient {
            name: "a",
            value: 0,
            min: 1,
            modulus: 7,
        };
        assert_eq!(e.to_string(), "hash coefficient a = 0 outside [1, 7)");
    }
}
