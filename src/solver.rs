use crate::assignment::{Assignment, Value};
use crate::formula::{Clause, Formula, Literal, Variable};
use crate::heuristic::{Heuristic, VariableSelector};
use crate::stats::Stats;
use crate::{Model, SatResult};
use log::{debug, trace};
use std::time::Instant;

/// Recursive DPLL search: unit propagation, then a case split on the variable chosen by the
/// configured [`VariableSelector`], backtracking on conflict.
pub struct Solver {
    clauses: Vec<Clause>,
    // entry i is the original name of canonical variable i
    variable_map: Vec<Variable>,
    selector: Box<dyn VariableSelector>,
    stats: Stats,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub(crate) enum BcpResult {
    Conflict,
    NoConflict,
}

impl Solver {
    pub fn new(formula: Formula) -> Self {
        Self::with_heuristic(formula, Heuristic::default())
    }

    pub fn with_heuristic(mut formula: Formula, heuristic: Heuristic) -> Self {
        let variable_map = formula.canonicalize();
        let selector = heuristic.selector(&formula);
        Self::from_canonical(formula, variable_map, selector)
    }

    /// Uses a caller-supplied selector. The selector sees the formula after canonicalization,
    /// so its variables are numbered densely from 0 in the order of the original identifiers.
    pub fn with_selector(mut formula: Formula, selector: Box<dyn VariableSelector>) -> Self {
        let variable_map = formula.canonicalize();
        Self::from_canonical(formula, variable_map, selector)
    }

    fn from_canonical(
        formula: Formula,
        variable_map: Vec<Variable>,
        selector: Box<dyn VariableSelector>,
    ) -> Self {
        Self {
            clauses: formula.into_clauses(),
            variable_map,
            selector,
            stats: Stats::default(),
        }
    }

    pub fn solve(&mut self) -> SatResult {
        self.stats = Stats::default();
        let start = Instant::now();

        let mut assignment = Assignment::new(self.variable_map.len());
        let clauses = self.clauses.clone();
        let result = if self.search(clauses, &mut assignment) {
            SatResult::Satisfiable(self.model(&assignment))
        } else {
            SatResult::Unsatisfiable
        };

        self.stats.elapsed = start.elapsed();
        debug!(
            "{} after {} decisions, {} propagations in {:?}",
            result.verdict(),
            self.stats.decisions,
            self.stats.propagations,
            self.stats.elapsed
        );
        result
    }

    /// Counters from the most recent call to [`Solver::solve`].
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Returns whether `clauses` is satisfiable under extensions of `assignment`. On success
    /// `assignment` holds the satisfying extension; on failure it is restored to its state on
    /// entry.
    fn search(&mut self, mut clauses: Vec<Clause>, assignment: &mut Assignment) -> bool {
        let entry = assignment.checkpoint();

        if propagate(&mut clauses, assignment, &mut self.stats) == BcpResult::Conflict {
            assignment.backtrack_to(entry);
            return false;
        }
        if clauses.is_empty() {
            return true;
        }
        let variable = match self.selector.select(&clauses, assignment) {
            Some(variable) => variable,
            None => return true,
        };

        let decision = assignment.checkpoint();
        for &literal in &[Literal::Positive(variable), Literal::Negative(variable)] {
            self.stats.decisions += 1;
            trace!("decide {} with {} clauses left", literal, clauses.len());
            assignment.assign(&literal);
            if self.search(clauses.clone(), assignment) {
                return true;
            }
            assignment.backtrack_to(decision);
        }

        assignment.backtrack_to(entry);
        false
    }

    fn model(&self, assignment: &Assignment) -> Model {
        assignment
            .iter()
            .map(|(variable, value)| (self.variable_map[variable.0], value))
            .collect()
    }
}

/// Simplifies `clauses` under `assignment` and assigns unit clauses until neither changes
/// anything. Satisfied clauses are removed and false literals are dropped from the rest, so on
/// success every literal left in `clauses` is unassigned and no clause is a unit.
pub(crate) fn propagate(
    clauses: &mut Vec<Clause>,
    assignment: &mut Assignment,
    stats: &mut Stats,
) -> BcpResult {
    loop {
        clauses.retain(|clause| {
            !clause
                .literals()
                .any(|literal| assignment.assignment_for(literal) == Value::True)
        });
        for clause in clauses.iter_mut() {
            clause.retain(|literal| assignment.assignment_for(literal) != Value::False);
            if clause.is_empty() {
                trace!("conflict");
                return BcpResult::Conflict;
            }
        }

        let mut did_work = false;
        for clause in clauses.iter() {
            if let Some(literal) = clause.unit() {
                // a second unit on the same variable is left for the next simplification pass,
                // which either satisfies it or empties it
                if assignment.assignment_for(literal) == Value::Undecided {
                    assignment.assign(literal);
                    stats.propagations += 1;
                    did_work = true;
                }
            }
        }
        if !did_work {
            return BcpResult::NoConflict;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute_force::solve_brute_force;
    use crate::formula::{formula_3sat_strategy, n, p};
    use crate::heuristic::FirstFound;
    use crate::Verdict;
    use proptest::prelude::*;
    use test_env_log::test;

    fn solve(f: Formula) -> SatResult {
        Solver::new(f).solve()
    }

    #[test]
    fn solve_bcp_sat() {
        let c1 = Clause::new(vec![p(0), p(1)]);
        let c2 = Clause::new(vec![n(0)]);
        let f = Formula::new(vec![c1, c2]);

        let mut solver = Solver::new(f);
        let result = solver.solve();
        assert_eq!(result.verdict(), Verdict::Satisfiable);
        let model = result.model().unwrap();
        assert_eq!(model.value(Variable(0)), Some(false));
        assert_eq!(model.value(Variable(1)), Some(true));
        assert_eq!(solver.stats().decisions, 0);
        assert_eq!(solver.stats().propagations, 2);
    }

    #[test]
    fn solve_bcp_unsat() {
        let c1 = Clause::new(vec![p(0), p(1)]);
        let c2 = Clause::new(vec![n(0)]);
        let c3 = Clause::new(vec![n(1)]);
        let f = Formula::new(vec![c1, c2, c3]);

        assert_eq!(solve(f), SatResult::Unsatisfiable);
    }

    #[test]
    fn solve_bcp_decide_sat() {
        let c1 = Clause::new(vec![p(0), p(1)]);
        let c2 = Clause::new(vec![p(0)]);
        let f = Formula::new(vec![c1, c2]);

        assert_eq!(solve(f).verdict(), Verdict::Satisfiable);
    }

    #[test]
    fn solve_conflict_sat() {
        let c1 = Clause::new(vec![p(0), p(1), p(2)]);
        let c2 = Clause::new(vec![n(0), n(1), p(2)]);
        let c3 = Clause::new(vec![n(1), n(2)]);
        let f = Formula::new(vec![c1, c2, c3]);

        let result = solve(f.clone());
        assert!(result.model().unwrap().satisfies(&f));
    }

    #[test]
    fn solve_simple() {
        // (!0 | !0 | !0) & (!0 | !1 | !1) & (!1 | 2 | 3) & (!1 | 3 | !3)
        let c1 = Clause::new(vec![n(0), n(0), n(0)]);
        let c2 = Clause::new(vec![n(0), n(1), n(1)]);
        let c3 = Clause::new(vec![n(1), p(2), p(3)]);
        let c4 = Clause::new(vec![n(1), p(3), n(3)]);
        let f = Formula::new(vec![c1, c2, c3, c4]);

        let result = solve(f.clone());
        assert!(result.model().unwrap().satisfies(&f));
    }

    #[test]
    fn solve_failing() {
        let f = Formula::new(vec![
            Clause::new(vec![n(1), p(1), n(7)]),
            Clause::new(vec![n(10), n(13), n(1)]),
            Clause::new(vec![n(7), n(7), n(10)]),
            Clause::new(vec![p(6), n(9), n(15)]),
            Clause::new(vec![n(2), n(1), n(1)]),
            Clause::new(vec![n(6), n(7), n(15)]),
            Clause::new(vec![p(9), p(10), p(6)]),
            Clause::new(vec![n(13), n(7), n(9)]),
            Clause::new(vec![p(9), p(15), p(15)]),
        ]);
        println!("{}", f);

        let brute_force = solve_brute_force(&f);
        assert_eq!(solve(f).verdict(), brute_force);
    }

    #[test]
    fn empty_formula_is_sat() {
        let mut solver = Solver::new(Formula::new(vec![]));
        let result = solver.solve();
        assert_eq!(result.verdict(), Verdict::Satisfiable);
        assert!(result.model().unwrap().is_empty());
        assert_eq!(solver.stats().decisions, 0);
        assert_eq!(solver.stats().propagations, 0);
    }

    #[test]
    fn empty_clause_is_unsat() {
        for h in Heuristic::ALL.iter() {
            let f = Formula::new(vec![Clause::new(vec![p(1), p(2)]), Clause::new(vec![])]);
            let mut solver = Solver::with_heuristic(f, *h);
            assert_eq!(solver.solve(), SatResult::Unsatisfiable);
            assert_eq!(solver.stats().decisions, 0);
        }
    }

    #[test]
    fn unit_chain_conflict() {
        // 1 | 2, -1 | 2, -2
        let f = Formula::new(vec![
            Clause::new(vec![p(1), p(2)]),
            Clause::new(vec![n(1), p(2)]),
            Clause::new(vec![n(2)]),
        ]);
        let mut solver = Solver::new(f);
        assert_eq!(solver.solve(), SatResult::Unsatisfiable);
        assert_eq!(solver.stats().decisions, 0);
        assert_eq!(solver.stats().propagations, 2);
    }

    #[test]
    fn direct_unit_conflict() {
        let f = Formula::new(vec![Clause::new(vec![p(1)]), Clause::new(vec![n(1)])]);
        let mut solver = Solver::new(f);
        assert_eq!(solver.solve(), SatResult::Unsatisfiable);
        assert_eq!(solver.stats().propagations, 1);
    }

    #[test]
    fn single_clause_sat() {
        let f = Formula::new(vec![Clause::new(vec![p(1), p(2)])]);
        let mut solver = Solver::with_heuristic(f, Heuristic::FirstFound);
        let result = solver.solve();
        let model = result.model().unwrap();
        assert!(model.value(Variable(1)) == Some(true) || model.value(Variable(2)) == Some(true));
        assert_eq!(solver.stats().decisions, 1);
        assert_eq!(solver.stats().propagations, 0);
    }

    #[test]
    fn both_branches_counted() {
        // every assignment of 1 and 2 falsifies one clause
        let f = Formula::new(vec![
            Clause::new(vec![p(1), p(2)]),
            Clause::new(vec![n(1), p(2)]),
            Clause::new(vec![p(1), n(2)]),
            Clause::new(vec![n(1), n(2)]),
        ]);
        for h in Heuristic::ALL.iter() {
            let mut solver = Solver::with_heuristic(f.clone(), *h);
            assert_eq!(solver.solve(), SatResult::Unsatisfiable);
            assert_eq!(solver.stats().decisions, 2);
            assert_eq!(solver.stats().propagations, 2);
        }
    }

    #[test]
    fn model_uses_original_variables() {
        let f = Formula::new(vec![
            Clause::new(vec![n(40)]),
            Clause::new(vec![p(40), p(7)]),
        ]);
        let result = solve(f);
        let model = result.model().unwrap();
        assert_eq!(model.value(Variable(40)), Some(false));
        assert_eq!(model.value(Variable(7)), Some(true));
        assert_eq!(model.value(Variable(0)), None);
        assert_eq!(model.to_string(), "7=true 40=false");
    }

    #[test]
    fn custom_selector() {
        let f = Formula::new(vec![
            Clause::new(vec![p(3), p(5)]),
            Clause::new(vec![n(3), p(5)]),
        ]);
        let mut solver = Solver::with_selector(f.clone(), Box::new(FirstFound));
        let result = solver.solve();
        assert!(result.model().unwrap().satisfies(&f));
    }

    #[test]
    fn solve_is_repeatable() {
        let f = Formula::new(vec![
            Clause::new(vec![p(1), p(2), n(3)]),
            Clause::new(vec![n(1), p(3)]),
            Clause::new(vec![n(2), n(3)]),
        ]);
        let mut solver = Solver::new(f);
        let first = solver.solve();
        let first_stats = *solver.stats();
        let second = solver.solve();
        assert_eq!(first, second);
        assert_eq!(first_stats.decisions, solver.stats().decisions);
        assert_eq!(first_stats.propagations, solver.stats().propagations);
    }

    #[test]
    fn propagate_stops_at_fixpoint() {
        let mut clauses = vec![
            Clause::new(vec![p(0), p(1)]),
            Clause::new(vec![n(0), p(2)]),
            Clause::new(vec![n(2), p(3), p(1)]),
        ];
        let mut assignment = Assignment::new(4);
        let mut stats = Stats::default();
        assignment.assign(&n(1));

        assert_eq!(
            propagate(&mut clauses, &mut assignment, &mut stats),
            BcpResult::NoConflict
        );
        // -1 forces 0, which forces 2, which forces 3
        assert!(clauses.is_empty());
        assert_eq!(stats.propagations, 3);
        assert_eq!(assignment.value_of(Variable(3)), Value::True);
    }

    proptest! {
        #[test]
        fn proptest_solve(f in formula_3sat_strategy()) {
            let brute_force = solve_brute_force(&f);
            for h in Heuristic::ALL.iter() {
                let result = Solver::with_heuristic(f.clone(), *h).solve();
                log::trace!("{} result = {:?}", h, result);
                prop_assert_eq!(result.verdict(), brute_force);
                if let Some(model) = result.model() {
                    prop_assert!(model.satisfies(&f));
                }
            }
        }

        #[test]
        fn proptest_propagate_idempotent(mut f in formula_3sat_strategy()) {
            f.canonicalize();
            let mut assignment = Assignment::new(f.num_variables());
            let mut clauses = f.into_clauses();
            let mut stats = Stats::default();

            if propagate(&mut clauses, &mut assignment, &mut stats) == BcpResult::NoConflict {
                let once = clauses.clone();
                let assigned: Vec<_> = assignment.iter().collect();
                let propagations = stats.propagations;

                prop_assert_eq!(propagate(&mut clauses, &mut assignment, &mut stats), BcpResult::NoConflict);
                prop_assert_eq!(clauses, once);
                prop_assert_eq!(assignment.iter().collect::<Vec<_>>(), assigned);
                prop_assert_eq!(stats.propagations, propagations);
            }
        }
    }
}
