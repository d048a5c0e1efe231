use crate::*;

// Simple brute-force oracle for the property tests
pub(crate) fn solve_brute_force(f: &Formula) -> Verdict {
    let mut f = f.clone();
    f.canonicalize();
    let num_variables = f.num_variables();
    assert!(num_variables <= 15); // just for safety

    fn assignment_for(assignment: u32, x: usize) -> bool {
        assignment & (1 << x) == 0
    }

    'search: for assignment in 0..2u32.pow(num_variables as u32) {
        'clauses: for clause in f.clauses() {
            for literal in clause.literals() {
                if assignment_for(assignment, literal.idx()) == literal.is_positive() {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // if we got here, this clause was not satisfied, so this assignment is bogus
            continue 'search;
        }
        // if we got here, every clause was satisfied, so we're done and satisfiable
        return Verdict::Satisfiable;
    }
    // no assignment is valid
    Verdict::Unsatisfiable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};

    #[test]
    fn solve_bcp_sat() {
        let c1 = Clause::new(vec![p(0), p(1)]);
        let c2 = Clause::new(vec![n(0)]);
        let f = Formula::new(vec![c1, c2]);

        assert_eq!(solve_brute_force(&f), Verdict::Satisfiable);
    }

    #[test]
    fn solve_bcp_unsat() {
        let c1 = Clause::new(vec![p(0), p(1)]);
        let c2 = Clause::new(vec![n(0)]);
        let c3 = Clause::new(vec![n(1)]);
        let f = Formula::new(vec![c1, c2, c3]);

        assert_eq!(solve_brute_force(&f), Verdict::Unsatisfiable);
    }

    #[test]
    fn solve_sparse_variables() {
        let c1 = Clause::new(vec![p(30), p(1000)]);
        let c2 = Clause::new(vec![n(30)]);
        let f = Formula::new(vec![c1, c2]);

        assert_eq!(solve_brute_force(&f), Verdict::Satisfiable);
    }

    #[test]
    fn solve_empty_clause() {
        let f = Formula::new(vec![Clause::new(vec![])]);
        assert_eq!(solve_brute_force(&f), Verdict::Unsatisfiable);
        assert_eq!(solve_brute_force(&Formula::new(vec![])), Verdict::Satisfiable);
    }
}
