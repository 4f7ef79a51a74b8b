//! Score analysis types.
//!
//! A [`ScoreExplanation`] breaks a score down per constraint, listing every
//! match with the planning items involved. An [`IndictmentMap`] turns the
//! same matches around and reports, per item, what it is blamed for.

use std::collections::{BTreeMap, HashMap};

use teamplan_core::score::Score;
use teamplan_core::ConstraintRef;

/// A single constraint match and the planning items that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintMatch<Sc: Score> {
    pub constraint_ref: ConstraintRef,
    /// Score impact of this match.
    pub score: Sc,
    /// Indices of the planning items involved.
    pub items: Vec<usize>,
    pub description: String,
}

impl<Sc: Score> ConstraintMatch<Sc> {
    pub fn new(
        constraint_ref: ConstraintRef,
        score: Sc,
        items: Vec<usize>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            constraint_ref,
            score,
            items,
            description: description.into(),
        }
    }
}

/// Per-constraint breakdown in a score explanation.
#[derive(Debug, Clone)]
pub struct ConstraintAnalysis<Sc: Score> {
    pub constraint_ref: ConstraintRef,
    /// Score per match unit.
    pub weight: Sc,
    /// Total score from this constraint.
    pub score: Sc,
    pub matches: Vec<ConstraintMatch<Sc>>,
    pub is_hard: bool,
}

impl<Sc: Score> ConstraintAnalysis<Sc> {
    pub fn new(
        constraint_ref: ConstraintRef,
        weight: Sc,
        score: Sc,
        matches: Vec<ConstraintMatch<Sc>>,
        is_hard: bool,
    ) -> Self {
        Self {
            constraint_ref,
            weight,
            score,
            matches,
            is_hard,
        }
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn name(&self) -> &str {
        &self.constraint_ref.name
    }
}

/// Complete score explanation with per-constraint breakdown.
#[derive(Debug, Clone)]
pub struct ScoreExplanation<Sc: Score> {
    pub score: Sc,
    pub constraint_analyses: Vec<ConstraintAnalysis<Sc>>,
}

impl<Sc: Score> ScoreExplanation<Sc> {
    pub fn new(score: Sc, constraint_analyses: Vec<ConstraintAnalysis<Sc>>) -> Self {
        Self {
            score,
            constraint_analyses,
        }
    }

    pub fn total_match_count(&self) -> usize {
        self.constraint_analyses.iter().map(|a| a.match_count()).sum()
    }

    /// Returns constraints with non-zero scores.
    pub fn non_zero_constraints(&self) -> Vec<&ConstraintAnalysis<Sc>> {
        self.constraint_analyses
            .iter()
            .filter(|a| a.score != Sc::zero())
            .collect()
    }

    pub fn analysis(&self, name: &str) -> Option<&ConstraintAnalysis<Sc>> {
        self.constraint_analyses.iter().find(|a| a.name() == name)
    }

    pub fn all_matches(&self) -> impl Iterator<Item = &ConstraintMatch<Sc>> {
        self.constraint_analyses.iter().flat_map(|a| &a.matches)
    }

    /// Groups every match by the planning items it involves.
    pub fn indictments(&self) -> IndictmentMap<Sc> {
        IndictmentMap::from_matches(self.all_matches())
    }
}

/// How a single planning item impacts the score.
#[derive(Debug, Clone)]
pub struct Indictment<Sc: Score> {
    pub item: usize,
    /// Sum of the scores of every match involving the item.
    pub score: Sc,
    pub constraint_matches: HashMap<ConstraintRef, Vec<ConstraintMatch<Sc>>>,
}

impl<Sc: Score> Indictment<Sc> {
    pub fn new(item: usize) -> Self {
        Self {
            item,
            score: Sc::zero(),
            constraint_matches: HashMap::new(),
        }
    }

    pub fn add_match(&mut self, constraint_match: ConstraintMatch<Sc>) {
        self.score = self.score + constraint_match.score;
        self.constraint_matches
            .entry(constraint_match.constraint_ref.clone())
            .or_default()
            .push(constraint_match);
    }

    pub fn match_count(&self) -> usize {
        self.constraint_matches.values().map(Vec::len).sum()
    }

    pub fn violated_constraints(&self) -> Vec<&ConstraintRef> {
        self.constraint_matches.keys().collect()
    }
}

/// Indictments keyed by planning item index.
#[derive(Debug, Clone)]
pub struct IndictmentMap<Sc: Score> {
    pub indictments: BTreeMap<usize, Indictment<Sc>>,
}

impl<Sc: Score> Default for IndictmentMap<Sc> {
    fn default() -> Self {
        Self {
            indictments: BTreeMap::new(),
        }
    }
}

impl<Sc: Score> IndictmentMap<Sc> {
    pub fn from_matches<'a>(matches: impl IntoIterator<Item = &'a ConstraintMatch<Sc>>) -> Self {
        let mut map = Self::default();
        for m in matches {
            for &item in &m.items {
                map.indictments
                    .entry(item)
                    .or_insert_with(|| Indictment::new(item))
                    .add_match(m.clone());
            }
        }
        map
    }

    pub fn get(&self, item: usize) -> Option<&Indictment<Sc>> {
        self.indictments.get(&item)
    }

    /// Returns item indices sorted by worst score impact first.
    pub fn worst_items(&self) -> Vec<usize> {
        let mut items: Vec<_> = self.indictments.values().collect();
        items.sort_by(|a, b| a.score.cmp(&b.score).then(a.item.cmp(&b.item)));
        items.into_iter().map(|i| i.item).collect()
    }

    pub fn len(&self) -> usize {
        self.indictments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indictments.is_empty()
    }
}
