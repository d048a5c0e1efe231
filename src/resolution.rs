//! Resolution saturation: adds resolvents of clashing clause pairs until the empty clause
//! appears or nothing new can be derived.
//!
//! Deriving the empty clause refutes the formula. Saturating without it is reported as such and
//! not as a satisfiability verdict.

use crate::formula::{clause_sets, resolvent, ClauseSet, Formula};
use log::{debug, trace};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// The empty clause was derived.
    Refuted,
    /// Every resolvent was already present and none was empty.
    Saturated,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            Outcome::Refuted => f.write_str("Unsatisfiable"),
            Outcome::Saturated => f.write_str("Resolution did not derive empty clause"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Saturation {
    pub outcome: Outcome,
    /// Distinct clauses added to the input.
    pub resolvents: u64,
    pub elapsed: Duration,
}

pub fn saturate(formula: &Formula) -> Saturation {
    let start = Instant::now();
    let mut clauses = clause_sets(formula);
    let mut resolvents = 0;

    let outcome = if clauses.contains(&ClauseSet::new()) {
        Outcome::Refuted
    } else {
        close(&mut clauses, &mut resolvents)
    };

    let elapsed = start.elapsed();
    debug!(
        "resolution: {:?} with {} clauses after {} resolvents in {:?}",
        outcome,
        clauses.len(),
        resolvents,
        elapsed
    );
    Saturation {
        outcome,
        resolvents,
        elapsed,
    }
}

/// Each pair of clauses is resolved on the first literal of the first clause whose negation
/// occurs in the second. Any other clash would yield a tautology, so nothing is lost.
fn close(clauses: &mut BTreeSet<ClauseSet>, added: &mut u64) -> Outcome {
    loop {
        let snapshot: Vec<&ClauseSet> = clauses.iter().collect();
        let mut new = BTreeSet::new();

        for (i, c1) in snapshot.iter().enumerate() {
            for c2 in &snapshot[i + 1..] {
                let clash = match c1.iter().find(|l| c2.contains(&l.negated())) {
                    Some(clash) => clash,
                    None => continue,
                };
                let r = resolvent(c1, c2, clash);
                if r.is_empty() {
                    trace!("empty clause from {:?} and {:?}", c1, c2);
                    *added += 1;
                    return Outcome::Refuted;
                }
                if !clauses.contains(&r) {
                    new.insert(r);
                }
            }
        }

        if new.is_empty() {
            return Outcome::Saturated;
        }
        trace!("round added {} resolvents", new.len());
        *added += new.len() as u64;
        clauses.extend(new);
    }
}
