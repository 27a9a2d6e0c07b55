//! Boolean connectives expressed as forms.
//!
//! These are structural builders: they construct the form that *represents* a
//! connective, without evaluating or reducing it. The encoding follows the
//! semantics of [`eval`][crate::eval]: juxtaposition is conjunction, enclosure
//! is negation (of the conjunction of its contents).
//!
//! | Connective | Form |
//! |------------|------|
//! | `1` | `⟨⟩` |
//! | `0` | void |
//! | `¬a` | `⟨a⟩` |
//! | `a ∧ b` | `a b` |
//! | `a ∨ b` | `⟨⟨a⟩⟨b⟩⟩` |
//! | `a ⊼ b` | `⟨a b⟩` |
//! | `a ⊽ b` | `⟨a⟩⟨b⟩` |
//! | `a → b` | `⟨a ⟨b⟩⟩` |
//!
//! The operators `!`, `&`, `|` and `^` are also available on [`Form`].

use std::ops::{BitAnd, BitOr, BitXor, Not};

use log::debug;

use crate::form::Form;

pub fn one() -> Form {
    Form::mark()
}

pub fn zero() -> Form {
    Form::void()
}

pub fn constant(value: bool) -> Form {
    if value {
        one()
    } else {
        zero()
    }
}

pub fn apply_not(a: Form) -> Form {
    Form::enclose(a)
}

pub fn apply_and(a: Form, b: Form) -> Form {
    Form::juxtapose([a, b])
}

pub fn apply_or(a: Form, b: Form) -> Form {
    Form::enclose(Form::juxtapose([Form::enclose(a), Form::enclose(b)]))
}

pub fn apply_nand(a: Form, b: Form) -> Form {
    Form::enclose(Form::juxtapose([a, b]))
}

pub fn apply_nor(a: Form, b: Form) -> Form {
    Form::juxtapose([Form::enclose(a), Form::enclose(b)])
}

pub fn apply_xor(a: Form, b: Form) -> Form {
    apply_or(
        apply_and(a.clone(), apply_not(b.clone())),
        apply_and(apply_not(a), b),
    )
}

pub fn apply_imply(a: Form, b: Form) -> Form {
    Form::enclose_all([a, Form::enclose(b)])
}

/// Biconditional `a ↔ b`.
pub fn apply_eq(a: Form, b: Form) -> Form {
    apply_and(apply_imply(a.clone(), b.clone()), apply_imply(b, a))
}

/// Conjunction of one or more forms. A single operand is returned unchanged.
///
/// # Panics
///
/// Panics if `forms` is empty.
pub fn apply_and_many(forms: impl IntoIterator<Item = Form>) -> Form {
    debug!("apply_and_many(...)");
    let forms: Vec<Form> = forms.into_iter().collect();
    assert!(!forms.is_empty(), "Conjunction requires at least one operand");
    Form::juxtapose(forms)
}

/// Disjunction of one or more forms. A single operand is returned unchanged.
///
/// # Panics
///
/// Panics if `forms` is empty.
pub fn apply_or_many(forms: impl IntoIterator<Item = Form>) -> Form {
    debug!("apply_or_many(...)");
    let mut forms: Vec<Form> = forms.into_iter().collect();
    assert!(!forms.is_empty(), "Disjunction requires at least one operand");
    if forms.len() == 1 {
        return forms.remove(0);
    }
    Form::enclose(Form::juxtapose(forms.into_iter().map(Form::enclose)))
}

impl Not for Form {
    type Output = Form;

    fn not(self) -> Self::Output {
        apply_not(self)
    }
}

impl BitAnd for Form {
    type Output = Form;

    fn bitand(self, rhs: Self) -> Self::Output {
        apply_and(self, rhs)
    }
}

impl BitOr for Form {
    type Output = Form;

    fn bitor(self, rhs: Self) -> Self::Output {
        apply_or(self, rhs)
    }
}

impl BitXor for Form {
    type Output = Form;

    fn bitxor(self, rhs: Self) -> Self::Output {
        apply_xor(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::eval::Evaluator;
    use crate::reduce::ReductionEngine;

    type Binary = fn(Form, Form) -> Form;

    fn check_truth_table(op: Binary, table: [bool; 4]) {
        let ev = Evaluator::new();
        let engine = ReductionEngine::default();
        for (i, (a, b)) in [(false, false), (false, true), (true, false), (true, true)].into_iter().enumerate() {
            let f = op(constant(a), constant(b));
            assert_eq!(ev.evaluate(&f), table[i], "row {} for {}", i, f);
            assert_eq!(engine.reduce(&f), constant(table[i]));
        }
    }

    #[test]
    fn test_constants() {
        assert_eq!(one(), Form::mark());
        assert_eq!(zero(), Form::void());
        assert_eq!(constant(true), one());
    }

    #[test]
    fn test_not() {
        let ev = Evaluator::new();
        assert!(!ev.evaluate(&apply_not(one())));
        assert!(ev.evaluate(&apply_not(zero())));
        assert_eq!(!one(), Form::enclose(Form::mark()));
    }

    #[test]
    fn test_and() {
        check_truth_table(apply_and, [false, false, false, true]);
    }

    #[test]
    fn test_or() {
        check_truth_table(apply_or, [false, true, true, true]);
    }

    #[test]
    fn test_nand() {
        check_truth_table(apply_nand, [true, true, true, false]);
    }

    #[test]
    fn test_nor() {
        check_truth_table(apply_nor, [true, false, false, false]);
    }

    #[test]
    fn test_xor() {
        check_truth_table(apply_xor, [false, true, true, false]);
    }

    #[test]
    fn test_imply() {
        check_truth_table(apply_imply, [true, true, false, true]);
    }

    #[test]
    fn test_eq() {
        check_truth_table(apply_eq, [true, false, false, true]);
    }

    #[test]
    fn test_operators() {
        let a = one();
        let b = zero();
        assert_eq!(a.clone() & b.clone(), apply_and(one(), zero()));
        assert_eq!(a.clone() | b.clone(), apply_or(one(), zero()));
        assert_eq!(a ^ b, apply_xor(one(), zero()));
    }

    #[test]
    fn test_many() {
        let engine = ReductionEngine::default();
        assert_eq!(apply_and_many([one()]), one());
        assert_eq!(apply_or_many([zero()]), zero());
        assert_eq!(engine.reduce(&apply_and_many([one(), one(), one()])), one());
        assert_eq!(engine.reduce(&apply_and_many([one(), zero(), one()])), zero());
        assert_eq!(engine.reduce(&apply_or_many([zero(), zero(), one()])), one());
        assert_eq!(engine.reduce(&apply_or_many([zero(), zero(), zero()])), zero());
    }

    #[test]
    #[should_panic(expected = "at least one operand")]
    fn test_and_many_empty() {
        apply_and_many(Vec::new());
    }

    #[test]
    #[should_panic(expected = "at least one operand")]
    fn test_or_many_empty() {
        apply_or_many(Vec::new());
    }
}
