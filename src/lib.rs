//! Satisfiability of CNF formulas by three procedures: a DPLL backtracking search with pluggable
//! branching heuristics ([`Solver`]), Davis–Putnam variable elimination
//! ([`elimination::eliminate`]) and resolution saturation ([`resolution::saturate`]).

pub mod assignment;
pub mod elimination;
pub mod formula;
pub mod heuristic;
pub mod resolution;
mod solver;
mod stats;

#[cfg(test)]
mod brute_force;

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::iter::FromIterator;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Verdict {
    Satisfiable,
    Unsatisfiable,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            Verdict::Satisfiable => f.write_str("Satisfiable"),
            Verdict::Unsatisfiable => f.write_str("Unsatisfiable"),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Model),
    Unsatisfiable,
}

impl SatResult {
    pub fn verdict(&self) -> Verdict {
        match self {
            SatResult::Satisfiable(_) => Verdict::Satisfiable,
            SatResult::Unsatisfiable => Verdict::Unsatisfiable,
        }
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SatResult::Satisfiable(model) => Some(model),
            SatResult::Unsatisfiable => None,
        }
    }
}

/// A satisfying partial assignment, over the variables of the formula as it was given.
/// Variables the search never had to decide are absent: any value works for them.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Model {
    values: BTreeMap<Variable, bool>,
}

impl Model {
    pub fn value(&self, variable: Variable) -> Option<bool> {
        self.values.get(&variable).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.values.iter().map(|(v, value)| (*v, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every clause of `formula` has a literal made true by this model.
    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula.clauses().all(|clause| {
            clause
                .literals()
                .any(|literal| self.value(*literal.variable()) == Some(literal.is_positive()))
        })
    }
}

impl FromIterator<(Variable, bool)> for Model {
    fn from_iter<I: IntoIterator<Item = (Variable, bool)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first = true;
        for (Variable(x), value) in self.iter() {
            if first {
                first = false;
            } else {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", x, value)?;
        }
        Ok(())
    }
}

pub use formula::{Clause, Formula, Literal, Variable};
pub use heuristic::{Heuristic, VariableSelector};
pub use solver::Solver;
pub use stats::Stats;
