//! Operator sugar for building combinators.
//!
//! `a & b`, `a | b` and `b - a` produce lightweight operation values that a
//! [`States`] manager turns into handles via [`States::eval`].

use std::ops::{BitAnd, BitOr, Sub};

use crate::error::Result;
use crate::reference::StateRef;
use crate::states::States;

pub struct IntersectionOp {
    a: StateRef,
    b: StateRef,
}

impl BitAnd for StateRef {
    type Output = IntersectionOp;

    fn bitand(self, rhs: Self) -> Self::Output {
        IntersectionOp { a: self, b: rhs }
    }
}

pub struct UnionOp {
    a: StateRef,
    b: StateRef,
}

impl BitOr for StateRef {
    type Output = UnionOp;

    fn bitor(self, rhs: Self) -> Self::Output {
        UnionOp { a: self, b: rhs }
    }
}

/// `from - removed`, evaluated as `apply_difference(removed, from)`.
pub struct DifferenceOp {
    removed: StateRef,
    from: StateRef,
}

impl Sub for StateRef {
    type Output = DifferenceOp;

    fn sub(self, rhs: Self) -> Self::Output {
        DifferenceOp {
            removed: rhs,
            from: self,
        }
    }
}

pub trait Eval {
    fn eval(&self, states: &States) -> Result<StateRef>;
}

impl States {
    pub fn eval(&self, value: impl Eval) -> Result<StateRef> {
        value.eval(self)
    }
}

impl Eval for StateRef {
    fn eval(&self, states: &States) -> Result<StateRef> {
        states.get(*self)?;
        Ok(*self)
    }
}

impl Eval for IntersectionOp {
    fn eval(&self, states: &States) -> Result<StateRef> {
        states.apply_intersection(self.a, self.b)
    }
}

impl Eval for UnionOp {
    fn eval(&self, states: &States) -> Result<StateRef> {
        states.apply_union(self.a, self.b)
    }
}

impl Eval for DifferenceOp {
    fn eval(&self, states: &States) -> Result<StateRef> {
        states.apply_difference(self.removed, self.from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::error::Error;

    #[test]
    fn test_eval_ref() {
        let states = States::new();
        let x = states.mk_discrete(1);
        assert_eq!(states.eval(x).unwrap(), x);
    }

    #[test]
    fn test_eval_unknown_ref() {
        let states = States::new();
        assert!(matches!(states.eval(StateRef::new(3)), Err(Error::UnknownState(_))));
    }

    #[test]
    fn test_eval_and() {
        let states = States::new();
        let x = states.mk_segment(0, 10);
        let y = states.mk_set([1, 20]);
        let f = states.apply_intersection(x, y).unwrap();
        assert_eq!(states.eval(x & y).unwrap(), f);
    }

    #[test]
    fn test_eval_or() {
        let states = States::new();
        let x = states.mk_segment(0, 10);
        let y = states.mk_set([1, 20]);
        let f = states.apply_union(x, y).unwrap();
        assert_eq!(states.eval(x | y).unwrap(), f);
    }

    #[test]
    fn test_eval_sub() {
        let states = States::new();
        let one = states.mk_discrete(1);
        let seg = states.mk_segment(0, 10);
        let f = states.apply_difference(one, seg).unwrap();
        let res = states.eval(seg - one).unwrap();
        assert_eq!(res, f);
        assert!(states.contains(res, 2));
        assert!(!states.contains(res, 1));
    }
}
