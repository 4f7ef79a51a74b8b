//! Per-constraint weights set at runtime.

use std::collections::BTreeMap;

use teamplan_core::{HardSoftScore, Score};

use crate::constraint::ConstraintKind;

/// Weights that replace a constraint's default weight.
///
/// Entries are keyed by configuration key (`"capacity"`) or by display
/// name (`"Team member issue: Capacity"`); the key wins when both are set.
#[derive(Debug, Clone)]
pub struct ConstraintWeightOverrides<Sc: Score> {
    weights: BTreeMap<String, Sc>,
}

impl<Sc: Score> Default for ConstraintWeightOverrides<Sc> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Sc: Score> ConstraintWeightOverrides<Sc> {
    pub fn new() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    pub fn from_pairs<I, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, Sc)>,
        N: Into<String>,
    {
        let mut overrides = Self::new();
        for (name, weight) in pairs {
            overrides.put(name, weight);
        }
        overrides
    }

    pub fn put<N: Into<String>>(&mut self, name: N, weight: Sc) {
        self.weights.insert(name.into(), weight);
    }

    pub fn get(&self, name: &str) -> Option<&Sc> {
        self.weights.get(name)
    }

    pub fn get_or_default(&self, name: &str, default: Sc) -> Sc {
        self.get(name).copied().unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl ConstraintWeightOverrides<HardSoftScore> {
    /// Scales the default weight of each kind by `multiplier(kind)`.
    ///
    /// Kinds whose multiplier is 1 get no entry.
    pub fn scaled<F>(kinds: &[ConstraintKind], multiplier: F) -> Self
    where
        F: Fn(ConstraintKind) -> i64,
    {
        let mut overrides = Self::new();
        for &kind in kinds {
            let factor = multiplier(kind);
            if factor != 1 {
                overrides.put(kind.key(), kind.default_weight().times(factor));
            }
        }
        overrides
    }

    /// Weight used for `kind`: its key entry, then its name entry, then
    /// the default.
    pub fn resolve(&self, kind: ConstraintKind) -> HardSoftScore {
        self.get(kind.key())
            .or_else(|| self.get(kind.name()))
            .copied()
            .unwrap_or_else(|| kind.default_weight())
    }
}
