//! Construction-time options for [`ChainTable`](crate::ChainTable).

use crate::hash_params::{self, HashParams};
use crate::resize::ShrinkPolicy;

/// Options for building a [`ChainTable`](crate::ChainTable).
///
/// ```
/// use chain_table::{ChainTable, HashParams, ShrinkPolicy, TableConfig};
///
/// let config = TableConfig::new()
///     .with_params(HashParams::from_seed(7))
///     .with_shrink_policy(ShrinkPolicy::Sparse);
/// let table = ChainTable::with_config(config);
/// assert_eq!(table.shrink_policy(), ShrinkPolicy::Sparse);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableConfig {
    /// Explicit hash parameters; `None` uses the process-wide ones.
    pub params: Option<HashParams>,
    /// When a removal may halve the bucket array.
    pub shrink_policy: ShrinkPolicy,
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(mut self, params: HashParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_shrink_policy(mut self, policy: ShrinkPolicy) -> Self {
        self.shrink_policy = policy;
        self
    }

    /// The parameters a table built from this config will hash with,
    /// installing the process-wide ones if needed.
    pub(crate) fn resolve_params(&self) -> HashParams {
        match self.params {
            Some(p) => p,
            None => *hash_params::init(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_process_params_and_eager_shrink() {
        let c = TableConfig::default();
        assert_eq!(c.params, None);
        assert_eq!(c.shrink_policy, ShrinkPolicy::Eager);
        assert_eq!(c.resolve_params(), *hash_params::init());
    }

    #[test]
    fn builder_overrides() {
        let p = HashParams::from_seed(1);
        let c = TableConfig::new()
            .with_params(p)
            .with_shrink_policy(ShrinkPolicy::Sparse);
        assert_eq!(c.resolve_params(), p);
        assert_eq!(c.shrink_policy, ShrinkPolicy::Sparse);
    }
}
