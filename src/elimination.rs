//! Davis–Putnam variable elimination.

use crate::formula::{clause_sets, is_tautology, resolvent, ClauseSet, Formula, Literal, Variable};
use crate::Verdict;
use log::{debug, trace};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct Elimination {
    pub verdict: Verdict,
    /// Variables eliminated before the verdict was reached.
    pub eliminated: u64,
    pub elapsed: Duration,
}

/// Eliminates variables smallest first, replacing the clauses that mention a variable by all of
/// their resolvents on it. The formula is unsatisfiable iff the empty clause shows up.
pub fn eliminate(formula: &Formula) -> Elimination {
    let start = Instant::now();
    let mut clauses: BTreeSet<ClauseSet> = clause_sets(formula)
        .into_iter()
        .filter(|clause| !is_tautology(clause))
        .collect();
    let mut eliminated = 0;

    let verdict = loop {
        if clauses.contains(&ClauseSet::new()) {
            break Verdict::Unsatisfiable;
        }
        let next = clauses
            .iter()
            .flat_map(|clause| clause.iter())
            .map(|literal| *literal.variable())
            .min();
        let variable = match next {
            Some(variable) => variable,
            None => break Verdict::Satisfiable,
        };
        clauses = eliminate_variable(clauses, variable);
        eliminated += 1;
        trace!(
            "eliminated {:?}, {} clauses left",
            variable,
            clauses.len()
        );
    };

    let elapsed = start.elapsed();
    debug!(
        "elimination: {} after {} variables in {:?}",
        verdict, eliminated, elapsed
    );
    Elimination {
        verdict,
        eliminated,
        elapsed,
    }
}

/// Clauses never contain both polarities of a variable here, since tautologies are dropped on
/// the way in and never produced.
fn eliminate_variable(clauses: BTreeSet<ClauseSet>, variable: Variable) -> BTreeSet<ClauseSet> {
    let pos = Literal::Positive(variable);
    let neg = Literal::Negative(variable);

    let mut positive = vec![];
    let mut negative = vec![];
    let mut result = BTreeSet::new();
    for clause in clauses {
        if clause.contains(&pos) {
            positive.push(clause);
        } else if clause.contains(&neg) {
            negative.push(clause);
        } else {
            result.insert(clause);
        }
    }

    for c1 in &positive {
        for c2 in &negative {
            let r = resolvent(c1, c2, &pos);
            if !is_tautology(&r) {
                result.insert(r);
            }
        }
    }
    result
}
