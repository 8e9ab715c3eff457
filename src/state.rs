//! State variants: integer membership tests.
//!
//! A [`State`] is either a *leaf* (a discrete value, a closed segment or an
//! explicit set) or a *combinator* over two other states. Combinators refer to
//! their operands by [`StateRef`] handles into a [`States`][crate::states::States]
//! manager, which owns every state and evaluates them.

use std::collections::BTreeSet;

use crate::reference::StateRef;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum State {
    /// Exactly one value.
    Discrete(i32),
    /// All values in `begin..=end`. Empty when `begin > end`.
    Segment { begin: i32, end: i32 },
    /// Explicit set of values.
    Set(BTreeSet<i32>),
    /// Values in both operands.
    Intersection(StateRef, StateRef),
    /// Values in either operand.
    Union(StateRef, StateRef),
    /// `Difference(a, b)`: values in `b` that are not in `a`.
    ///
    /// Note the operand order: this is "b minus a", not "a minus b".
    Difference(StateRef, StateRef),
}

impl Default for State {
    /// The empty segment `[0, -1]`.
    fn default() -> Self {
        State::Segment { begin: 0, end: -1 }
    }
}

impl State {
    pub fn segment(begin: i32, end: i32) -> Self {
        State::Segment { begin, end }
    }

    pub fn set(values: impl IntoIterator<Item = i32>) -> Self {
        State::Set(values.into_iter().collect())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, State::Discrete(_) | State::Segment { .. } | State::Set(_))
    }

    /// Operands of a combinator, or `None` for leaves.
    pub fn operands(&self) -> Option<(StateRef, StateRef)> {
        match *self {
            State::Intersection(a, b) | State::Union(a, b) | State::Difference(a, b) => Some((a, b)),
            _ => None,
        }
    }

    /// Membership test for leaves; `None` for combinators.
    pub fn leaf_contains(&self, x: i32) -> Option<bool> {
        match self {
            State::Discrete(v) => Some(x == *v),
            State::Segment { begin, end } => Some(*begin <= x && x <= *end),
            State::Set(values) => Some(values.contains(&x)),
            _ => None,
        }
    }

    /// Combines already evaluated operand results.
    ///
    /// Leaves ignore the arguments and return `None`.
    pub fn combine(&self, a: bool, b: bool) -> Option<bool> {
        match self {
            State::Intersection(..) => Some(a && b),
            State::Union(..) => Some(a || b),
            State::Difference(..) => Some(!a && b),
            _ => None,
        }
    }
}
