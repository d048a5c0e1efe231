pub mod text;

use std::collections::{BTreeMap, BTreeSet};
use std::convert::TryFrom;
use std::fmt::Debug;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }

    /// The same polarity over a different variable.
    fn with_variable(&self, v: Variable) -> Self {
        match self {
            Literal::Positive(_) => Literal::Positive(v),
            Literal::Negative(_) => Literal::Negative(v),
        }
    }
}

/// Signed-integer view of a literal: `-3` is `Negative(Variable(3))`. Zero is not a literal.
impl TryFrom<i64> for Literal {
    type Error = i64;

    fn try_from(l: i64) -> Result<Self, Self::Error> {
        if l > 0 {
            Ok(Literal::Positive(Variable(l as usize)))
        } else if l < 0 {
            Ok(Literal::Negative(Variable(l.unsigned_abs() as usize)))
        } else {
            Err(l)
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            Literal::Positive(Variable(x)) => write!(f, "{}", x),
            Literal::Negative(Variable(x)) => write!(f, "-{}", x),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// Builds a clause from its disjuncts. Repeated literals are dropped, keeping the first
    /// occurrence, so a clause is a set in the order its literals were given.
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        let mut literals: Vec<Literal> = vec![];
        for literal in disjuncts {
            if !literals.contains(&literal) {
                literals.push(literal);
            }
        }
        Self { literals }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The single literal of a unit clause.
    pub(crate) fn unit(&self) -> Option<&Literal> {
        match self.literals.as_slice() {
            [literal] => Some(literal),
            _ => None,
        }
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&Literal) -> bool) {
        self.literals.retain(keep)
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        if self.literals.is_empty() {
            return f.write_str("()");
        }
        if self.literals.len() > 1 {
            f.write_str("(")?;
        }
        let mut first_literal = true;
        for literal in &self.literals {
            if first_literal {
                first_literal = false;
            } else {
                f.write_str(" | ")?;
            }
            write!(f, "{}", literal)?;
        }
        if self.literals.len() > 1 {
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: conjuncts.into_iter().collect(),
        }
    }

    /// One more than the largest variable index mentioned, or 0 if no clause mentions a variable.
    /// Only equal to the number of distinct variables once the formula is canonical.
    pub fn num_variables(&self) -> usize {
        self.clauses
            .iter()
            .flat_map(|clause| clause.literals().map(|literal| literal.idx() + 1))
            .max()
            .unwrap_or(0)
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// Renumbers the variables densely from 0, preserving their relative order.
    ///
    /// Returns the inverse map: entry `i` is the original variable now called `Variable(i)`.
    pub fn canonicalize(&mut self) -> Vec<Variable> {
        let used: BTreeSet<Variable> = self
            .clauses
            .iter()
            .flat_map(|clause| clause.literals().map(|literal| *literal.variable()))
            .collect();
        let rewrite: BTreeMap<Variable, Variable> = used
            .iter()
            .enumerate()
            .map(|(i, v)| (*v, Variable(i)))
            .collect();

        for clause in &mut self.clauses {
            for literal in &mut clause.literals {
                *literal = literal.with_variable(rewrite[literal.variable()]);
            }
        }
        used.into_iter().collect()
    }

    pub(crate) fn into_clauses(self) -> Vec<Clause> {
        self.clauses
    }
}

/// Clause representation for the saturation procedures, where identical clauses collapse.
pub(crate) type ClauseSet = BTreeSet<Literal>;

pub(crate) fn clause_sets(formula: &Formula) -> BTreeSet<ClauseSet> {
    formula
        .clauses()
        .map(|clause| clause.literals().copied().collect())
        .collect()
}

/// Resolves `c1`, which contains `on`, with `c2`, which contains its negation.
pub(crate) fn resolvent(c1: &ClauseSet, c2: &ClauseSet, on: &Literal) -> ClauseSet {
    let off = on.negated();
    c1.iter()
        .filter(|l| *l != on)
        .chain(c2.iter().filter(|l| **l != off))
        .copied()
        .collect()
}

pub(crate) fn is_tautology(clause: &ClauseSet) -> bool {
    clause
        .iter()
        .any(|l| l.is_positive() && clause.contains(&l.negated()))
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

impl Debug for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

/// Random formulas of up to 20 clauses with 1 to 3 literals each over at most 12 variables,
/// small enough for `solve_brute_force`.
#[cfg(test)]
pub(crate) fn formula_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    (1usize..=12)
        .prop_flat_map(|num_vars| {
            prop::collection::vec(
                prop::collection::vec((1..=num_vars, any::<bool>()), 1..=3),
                0..20,
            )
        })
        .prop_map(|clauses| {
            Formula::new(clauses.into_iter().map(|clause| {
                Clause::new(
                    clause
                        .into_iter()
                        .map(|(var, positive)| if positive { p(var) } else { n(var) }),
                )
            }))
        })
}
