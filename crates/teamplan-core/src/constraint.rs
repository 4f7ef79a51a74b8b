//! Constraint identification types.

/// Reference to a constraint for identification.
///
/// # Example
///
/// ```
/// use teamplan_core::ConstraintRef;
///
/// let cr = ConstraintRef::new("team", "Capacity");
/// assert_eq!(cr.full_name(), "team/Capacity");
///
/// let simple = ConstraintRef::new("", "Capacity");
/// assert_eq!(simple.full_name(), "Capacity");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintRef {
    /// Package/module containing the constraint.
    pub package: String,
    /// Name of the constraint.
    pub name: String,
}

impl ConstraintRef {
    /// Creates a new constraint reference.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Returns the fully qualified name.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.package, self.name)
        }
    }
}

/// Type of impact a constraint has on the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactType {
    /// Penalize (subtract from score).
    Penalty,
    /// Reward (add to score).
    Reward,
}

impl ImpactType {
    /// Returns the sign applied to a match weight.
    pub fn sign(self) -> i64 {
        match self {
            ImpactType::Penalty => -1,
            ImpactType::Reward => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_ref_full_name() {
        let cr = ConstraintRef::new("teamplan", "Day Off");
        assert_eq!(cr.full_name(), "teamplan/Day Off");
    }

    #[test]
    fn test_constraint_ref_equality() {
        let a = ConstraintRef::new("", "Capacity");
        let b = ConstraintRef::new("", "Capacity");
        let c = ConstraintRef::new("", "Profile");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_impact_sign() {
        assert_eq!(ImpactType::Penalty.sign(), -1);
        assert_eq!(ImpactType::Reward.sign(), 1);
    }
}
