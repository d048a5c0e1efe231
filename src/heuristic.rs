//! Branching heuristics: which unassigned variable the search splits on next.

use crate::assignment::Assignment;
use crate::formula::{Clause, Formula, Variable};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Picks the next branching variable for the search.
///
/// `clauses` is the current simplified clause list: every literal left in it is unassigned.
/// Returning `None` means no unassigned variable remains, which the search treats as solved.
pub trait VariableSelector {
    fn select(&mut self, clauses: &[Clause], assignment: &Assignment) -> Option<Variable>;
}

/// Occurrence counts over the original formula, computed once. Branches on the most frequent
/// unassigned variable; ties go to the smaller variable.
#[derive(Clone, Debug)]
pub struct StaticFrequency {
    order: Vec<Variable>,
}

impl StaticFrequency {
    pub fn new(formula: &Formula) -> Self {
        let mut counts = vec![0usize; formula.num_variables()];
        for literal in formula.clauses().flat_map(|clause| clause.literals()) {
            counts[literal.idx()] += 1;
        }

        let mut order: Vec<Variable> = (0..counts.len())
            .filter(|&v| counts[v] > 0)
            .map(Variable)
            .collect();
        // stable, so equal counts stay in variable order
        order.sort_by(|a, b| counts[b.0].cmp(&counts[a.0]));
        Self { order }
    }
}

impl VariableSelector for StaticFrequency {
    fn select(&mut self, _clauses: &[Clause], assignment: &Assignment) -> Option<Variable> {
        self.order
            .iter()
            .find(|&&v| !assignment.is_assigned(v))
            .copied()
    }
}

/// Occurrence counts over the current clause list, recomputed at every decision.
#[derive(Clone, Debug, Default)]
pub struct DynamicFrequency {
    counts: Vec<usize>,
    discovered: Vec<Variable>,
}

impl DynamicFrequency {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VariableSelector for DynamicFrequency {
    fn select(&mut self, clauses: &[Clause], assignment: &Assignment) -> Option<Variable> {
        self.discovered.clear();
        for literal in clauses.iter().flat_map(|clause| clause.literals()) {
            if assignment.is_assigned(*literal.variable()) {
                continue;
            }
            if literal.idx() >= self.counts.len() {
                self.counts.resize(literal.idx() + 1, 0);
            }
            if self.counts[literal.idx()] == 0 {
                self.discovered.push(*literal.variable());
            }
            self.counts[literal.idx()] += 1;
        }

        let mut best: Option<(Variable, usize)> = None;
        for &v in &self.discovered {
            let count = self.counts[v.0];
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((v, count));
            }
        }
        for v in &self.discovered {
            self.counts[v.0] = 0;
        }
        best.map(|(v, _)| v)
    }
}

/// The first unassigned variable met while scanning the clauses in order.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstFound;

impl VariableSelector for FirstFound {
    fn select(&mut self, clauses: &[Clause], assignment: &Assignment) -> Option<Variable> {
        clauses
            .iter()
            .flat_map(|clause| clause.literals())
            .map(|literal| *literal.variable())
            .find(|&v| !assignment.is_assigned(v))
    }
}

/// The built-in selection policies.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Heuristic {
    StaticFrequency,
    DynamicFrequency,
    FirstFound,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [
        Heuristic::StaticFrequency,
        Heuristic::DynamicFrequency,
        Heuristic::FirstFound,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::StaticFrequency => "static",
            Heuristic::DynamicFrequency => "dynamic",
            Heuristic::FirstFound => "first",
        }
    }

    /// Builds the selector for `formula`, which must already be canonical.
    pub fn selector(&self, formula: &Formula) -> Box<dyn VariableSelector> {
        match self {
            Heuristic::StaticFrequency => Box::new(StaticFrequency::new(formula)),
            Heuristic::DynamicFrequency => Box::new(DynamicFrequency::new()),
            Heuristic::FirstFound => Box::new(FirstFound),
        }
    }
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::StaticFrequency
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHeuristic(pub String);

impl Display for UnknownHeuristic {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "unknown heuristic '{}' (expected static, dynamic or first)",
            self.0
        )
    }
}

impl std::error::Error for UnknownHeuristic {}

impl FromStr for Heuristic {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .iter()
            .find(|h| h.name() == s)
            .copied()
            .ok_or_else(|| UnknownHeuristic(s.to_string()))
    }
}
