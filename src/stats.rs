use std::fmt::{self, Display, Formatter};
use std::time::Duration;

/// Counters reported by a DPLL run. They are observed by the search, never consulted by it.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Stats {
    /// One per attempted branch direction.
    pub decisions: u64,
    /// One per literal forced by a unit clause.
    pub propagations: u64,
    pub elapsed: Duration,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "Solving time: {} s", self.elapsed.as_secs_f64())?;
        writeln!(f, "Decision Steps: {}", self.decisions)?;
        write!(f, "Propagation Steps: {}", self.propagations)
    }
}
