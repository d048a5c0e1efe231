use crate::formula::{Literal, Variable};
use log::trace;

/// The value a literal or variable currently has under an [`Assignment`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Value {
    True,
    False,
    Undecided,
}

impl From<Option<bool>> for Value {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Value::True,
            Some(false) => Value::False,
            None => Value::Undecided,
        }
    }
}

/// Partial assignment over densely numbered variables.
///
/// Values are stored per variable, so a literal and its negation can never disagree. Every
/// assignment is recorded on a trail, and [`Assignment::backtrack_to`] undoes exactly the
/// assignments made since a [`Checkpoint`].
#[derive(Clone, Debug)]
pub struct Assignment {
    values: Vec<Option<bool>>,
    trail: Vec<Variable>,
}

/// A position on the trail of an [`Assignment`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Checkpoint(usize);

impl Assignment {
    pub fn new(num_variables: usize) -> Self {
        Self {
            values: vec![None; num_variables],
            trail: vec![],
        }
    }

    pub fn value_of(&self, variable: Variable) -> Value {
        self.values[variable.0].into()
    }

    pub fn is_assigned(&self, variable: Variable) -> bool {
        self.values[variable.0].is_some()
    }

    pub fn assignment_for(&self, literal: &Literal) -> Value {
        self.values[literal.idx()]
            .map(|value| value == literal.is_positive())
            .into()
    }

    /// Makes `literal` true (and so its negation false).
    pub fn assign(&mut self, literal: &Literal) {
        assert_eq!(self.assignment_for(literal), Value::Undecided);
        trace!("assign {} at depth {}", literal, self.trail.len());

        self.trail.push(*literal.variable());
        self.values[literal.idx()] = Some(literal.is_positive());
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.trail.len())
    }

    /// Unassigns every variable assigned since `checkpoint` was taken.
    pub fn backtrack_to(&mut self, checkpoint: Checkpoint) {
        assert!(checkpoint.0 <= self.trail.len());
        trace!(
            "backtrack: dropping to {} from {}",
            checkpoint.0,
            self.trail.len()
        );
        for variable in self.trail.drain(checkpoint.0..) {
            self.values[variable.0] = None;
        }
    }

    /// Number of assigned variables.
    pub fn len(&self) -> usize {
        self.trail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    /// Assigned variables with their values, in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, value)| value.map(|value| (Variable(i), value)))
    }
}
