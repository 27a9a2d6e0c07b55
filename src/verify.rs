//! Checking axioms, consistency, semantics and algebraic laws.
//!
//! Every check produces a [`VerificationResult`]; failures are reported as data,
//! so that a whole suite runs to completion and can be summarized in a
//! [`VerificationReport`].
//!
//! ```
//! use lof_rs::verify::Verifier;
//!
//! let verifier = Verifier::default();
//! let report = verifier.run_all();
//! assert!(report.all_passed(), "{}", report);
//! ```

use std::fmt;

use log::{info, warn};

use crate::algebra::{apply_and, apply_not, apply_or, one, zero};
use crate::eval::Evaluator;
use crate::form::Form;
use crate::generator::FormGenerator;
use crate::parser::parse;
use crate::reduce::{step_bound, ReductionEngine};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VerificationStatus {
    Passed,
    Failed,
    Skipped,
    /// The check could not be decided, e.g. a reduction hit the iteration ceiling.
    Error,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerificationStatus::Passed => "PASSED",
            VerificationStatus::Failed => "FAILED",
            VerificationStatus::Skipped => "SKIPPED",
            VerificationStatus::Error => "ERROR",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VerificationResult {
    pub name: String,
    pub status: VerificationStatus,
    pub message: String,
}

impl VerificationResult {
    pub fn new(name: impl Into<String>, status: VerificationStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
        }
    }

    pub fn passed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, VerificationStatus::Passed, message)
    }

    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, VerificationStatus::Failed, message)
    }

    pub fn skipped(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, VerificationStatus::Skipped, message)
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, VerificationStatus::Error, message)
    }

    pub fn is_passed(&self) -> bool {
        self.status == VerificationStatus::Passed
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.name, self.message)
    }
}

/// A collection of verification results.
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    pub results: Vec<VerificationResult>,
}

impl VerificationReport {
    pub fn push(&mut self, result: VerificationResult) {
        if matches!(result.status, VerificationStatus::Failed | VerificationStatus::Error) {
            warn!("{}", result);
        }
        self.results.push(result);
    }

    pub fn count(&self, status: VerificationStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn passed(&self) -> usize {
        self.count(VerificationStatus::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(VerificationStatus::Failed)
    }

    /// No check failed or errored. Skipped checks are allowed.
    pub fn all_passed(&self) -> bool {
        self.failed() == 0 && self.count(VerificationStatus::Error) == 0
    }

    pub fn get(&self, name: &str) -> Option<&VerificationResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} checks: {} passed, {} failed, {} skipped, {} errors",
            self.results.len(),
            self.passed(),
            self.failed(),
            self.count(VerificationStatus::Skipped),
            self.count(VerificationStatus::Error)
        )
    }
}

impl Extend<VerificationResult> for VerificationReport {
    fn extend<T: IntoIterator<Item = VerificationResult>>(&mut self, iter: T) {
        for result in iter {
            self.push(result);
        }
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(f, "{}", result)?;
        }
        write!(f, "{}", self.summary())
    }
}

/// A small set of ground forms covering both truth values and several shapes.
pub fn standard_operands() -> Vec<Form> {
    let mut operands = vec![zero(), one()];
    operands.extend(["⟨⟨⟩⟩", "⟨⟩⟨⟩", "⟨⟨⟩⟨⟨⟩⟩⟩", "⟨⟨⟨⟩⟩⟩", "⟨⟨⟩⟩⟨⟩"].map(parse));
    operands
}

/// Runs verification checks against a reduction engine and an evaluator.
#[derive(Debug, Default)]
pub struct Verifier {
    evaluator: Evaluator,
}

impl Verifier {
    pub fn new(engine: ReductionEngine) -> Self {
        Self {
            evaluator: Evaluator::with_engine(engine),
        }
    }

    pub fn engine(&self) -> &ReductionEngine {
        self.evaluator.engine()
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Reduce, or describe why the reduction is unusable.
    fn canonical(&self, form: &Form) -> Result<Form, String> {
        let trace = self.engine().reduce_with_trace(form);
        if trace.is_complete {
            Ok(trace.canonical)
        } else {
            Err(format!("reduction of {} did not complete", form.explicit()))
        }
    }

    /// Check that two forms reduce to the same canonical form.
    pub fn check_equivalent(&self, name: &str, a: &Form, b: &Form) -> VerificationResult {
        let (ca, cb) = match (self.canonical(a), self.canonical(b)) {
            (Ok(ca), Ok(cb)) => (ca, cb),
            (Err(e), _) | (_, Err(e)) => return VerificationResult::error(name, e),
        };
        if ca == cb {
            VerificationResult::passed(name, format!("{} ≡ {} ≡ {}", a.explicit(), b.explicit(), ca.explicit()))
        } else {
            VerificationResult::failed(
                name,
                format!("{} ↦ {} but {} ↦ {}", a.explicit(), ca.explicit(), b.explicit(), cb.explicit()),
            )
        }
    }

    /// Check an equivalence `lhs(x) ≡ rhs(x)` for every operand.
    pub fn check_law<F>(&self, name: &str, operands: &[Form], law: F) -> VerificationResult
    where
        F: Fn(&Form) -> (Form, Form),
    {
        if operands.is_empty() {
            return VerificationResult::skipped(name, "no operands");
        }
        for x in operands {
            let (lhs, rhs) = law(x);
            let result = self.check_equivalent(name, &lhs, &rhs);
            if !result.is_passed() {
                return result;
            }
        }
        VerificationResult::passed(name, format!("holds for {} operands", operands.len()))
    }

    /// Check a law of two variables for every pair of operands.
    pub fn check_law2<F>(&self, name: &str, operands: &[Form], law: F) -> VerificationResult
    where
        F: Fn(&Form, &Form) -> (Form, Form),
    {
        if operands.is_empty() {
            return VerificationResult::skipped(name, "no operands");
        }
        for x in operands {
            for y in operands {
                let (lhs, rhs) = law(x, y);
                let result = self.check_equivalent(name, &lhs, &rhs);
                if !result.is_passed() {
                    return result;
                }
            }
        }
        VerificationResult::passed(name, format!("holds for {} pairs", operands.len() * operands.len()))
    }

    /// Calling `⟨⟨a⟩⟩ = a` and Crossing `⟨⟩⟨⟩ = ⟨⟩`.
    pub fn verify_axioms(&self) -> Vec<VerificationResult> {
        let operands = standard_operands();
        let double_mark = Form::enclose(Form::enclose(Form::mark()));
        let marks = Form::juxtapose([Form::mark(), Form::mark()]);

        let calling = match self.canonical(&double_mark) {
            Ok(c) if c == Form::mark() => {
                self.check_law("axiom_calling", &operands, |a| (Form::enclose(Form::enclose(a.clone())), a.clone()))
            }
            Ok(c) => VerificationResult::failed("axiom_calling", format!("⟨⟨⟨⟩⟩⟩ ↦ {}", c.explicit())),
            Err(e) => VerificationResult::error("axiom_calling", e),
        };
        let crossing = match self.canonical(&marks) {
            Ok(c) if c == Form::mark() => VerificationResult::passed("axiom_crossing", "⟨⟩⟨⟩ ↦ ⟨⟩"),
            Ok(c) => VerificationResult::failed("axiom_crossing", format!("⟨⟩⟨⟩ ↦ {}", c.explicit())),
            Err(e) => VerificationResult::error("axiom_crossing", e),
        };
        vec![calling, crossing]
    }

    /// TRUE ≠ FALSE, excluded middle, double negation, idempotence.
    pub fn verify_consistency(&self, operands: &[Form]) -> Vec<VerificationResult> {
        let distinct = match (self.canonical(&one()), self.canonical(&zero())) {
            (Ok(t), Ok(f)) if t != f => VerificationResult::passed("true_ne_false", "⟨⟩ and ∅ are distinct"),
            (Ok(_), Ok(_)) => VerificationResult::failed("true_ne_false", "⟨⟩ and ∅ reduce to the same form"),
            (Err(e), _) | (_, Err(e)) => VerificationResult::error("true_ne_false", e),
        };
        vec![
            distinct,
            self.check_law("excluded_middle", operands, |a| (apply_or(a.clone(), apply_not(a.clone())), one())),
            self.check_law("double_negation", operands, |a| (apply_not(apply_not(a.clone())), a.clone())),
            self.check_law("idempotence", operands, |a| (apply_and(a.clone(), a.clone()), a.clone())),
        ]
    }

    /// The mark is TRUE, void is FALSE, an enclosure negates its contents.
    pub fn verify_semantics(&self, operands: &[Form]) -> Vec<VerificationResult> {
        let ev = &self.evaluator;
        let mark_true = if ev.evaluate(&Form::mark()) {
            VerificationResult::passed("mark_is_true", "⟨⟩ evaluates to TRUE")
        } else {
            VerificationResult::failed("mark_is_true", "⟨⟩ evaluates to FALSE")
        };
        let void_false = if ev.evaluate(&Form::void()) {
            VerificationResult::failed("void_is_false", "∅ evaluates to TRUE")
        } else {
            VerificationResult::passed("void_is_false", "∅ evaluates to FALSE")
        };
        let negation = match operands.iter().find(|a| ev.evaluate(&Form::enclose((*a).clone())) == ev.evaluate(a)) {
            None if operands.is_empty() => VerificationResult::skipped("enclosure_negates", "no operands"),
            None => VerificationResult::passed("enclosure_negates", format!("holds for {} operands", operands.len())),
            Some(a) => {
                let enclosed = Form::enclose(a.clone());
                let message = format!("{} has the value of {}", enclosed.explicit(), a.explicit());
                VerificationResult::failed("enclosure_negates", message)
            }
        };
        vec![mark_true, void_false, negation]
    }

    /// Identity, domination, complement, idempotence and double negation laws.
    pub fn verify_algebra_laws(&self, operands: &[Form]) -> Vec<VerificationResult> {
        vec![
            self.check_law("and_identity", operands, |a| (apply_and(a.clone(), one()), a.clone())),
            self.check_law("or_identity", operands, |a| (apply_or(a.clone(), zero()), a.clone())),
            self.check_law("and_domination", operands, |a| (apply_and(a.clone(), zero()), zero())),
            self.check_law("or_domination", operands, |a| (apply_or(a.clone(), one()), one())),
            self.check_law("and_idempotence", operands, |a| (apply_and(a.clone(), a.clone()), a.clone())),
            self.check_law("and_complement", operands, |a| (apply_and(a.clone(), apply_not(a.clone())), zero())),
            self.check_law("double_negation", operands, |a| (apply_not(apply_not(a.clone())), a.clone())),
        ]
    }

    /// `¬(a ∧ b) ≡ ¬a ∨ ¬b` and `¬(a ∨ b) ≡ ¬a ∧ ¬b`.
    pub fn verify_de_morgan(&self, operands: &[Form]) -> Vec<VerificationResult> {
        vec![
            self.check_law2("de_morgan_and", operands, |a, b| {
                (
                    apply_not(apply_and(a.clone(), b.clone())),
                    apply_or(apply_not(a.clone()), apply_not(b.clone())),
                )
            }),
            self.check_law2("de_morgan_or", operands, |a, b| {
                (
                    apply_not(apply_or(a.clone(), b.clone())),
                    apply_and(apply_not(a.clone()), apply_not(b.clone())),
                )
            }),
        ]
    }

    /// Direct evaluation agrees with reduction on every form.
    pub fn verify_soundness(&self, forms: &[Form]) -> VerificationResult {
        let name = "soundness";
        if forms.is_empty() {
            return VerificationResult::skipped(name, "no forms");
        }
        for form in forms {
            let canonical = match self.canonical(form) {
                Ok(c) => c,
                Err(e) => return VerificationResult::error(name, e),
            };
            let value = self.evaluator.evaluate(form);
            if value != (canonical == Form::mark()) {
                return VerificationResult::failed(
                    name,
                    format!("{} evaluates to {} but reduces to {}", form.explicit(), value, canonical.explicit()),
                );
            }
        }
        VerificationResult::passed(name, format!("agrees on {} forms", forms.len()))
    }

    /// Every reduction completes within its step bound.
    pub fn verify_termination(&self, forms: &[Form]) -> VerificationResult {
        let name = "termination";
        if forms.is_empty() {
            return VerificationResult::skipped(name, "no forms");
        }
        for form in forms {
            let trace = self.engine().reduce_with_trace(form);
            if !trace.is_complete {
                return VerificationResult::failed(name, format!("reduction of {} did not complete", form.explicit()));
            }
            if trace.step_count() > step_bound(form) {
                return VerificationResult::failed(
                    name,
                    format!("{} took {} steps, bound is {}", form.explicit(), trace.step_count(), step_bound(form)),
                );
            }
        }
        VerificationResult::passed(name, format!("{} reductions terminated", forms.len()))
    }

    /// Run every check over the standard operands and 100 seeded random forms.
    pub fn run_all(&self) -> VerificationReport {
        let operands = standard_operands();
        let forms = FormGenerator::with_seed(0).generate_batch(100);

        let mut report = VerificationReport::default();
        report.extend(self.verify_axioms());
        report.extend(self.verify_consistency(&operands));
        report.extend(self.verify_semantics(&operands));
        report.extend(self.verify_algebra_laws(&operands));
        report.extend(self.verify_de_morgan(&operands));
        report.push(self.verify_soundness(&forms));
        report.push(self.verify_termination(&forms));
        info!("verification: {}", report.summary());
        report
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::reduce::EngineConfig;

    #[test]
    fn test_run_all() {
        let verifier = Verifier::default();
        let report = verifier.run_all();
        assert!(report.all_passed(), "{}", report);
        assert_eq!(report.failed(), 0);
        assert!(report.passed() >= 18);
        assert!(report.get("axiom_calling").unwrap().is_passed());
        assert!(report.get("de_morgan_and").unwrap().is_passed());
    }

    #[test]
    fn test_check_equivalent() {
        let verifier = Verifier::default();
        let r = verifier.check_equivalent("eq", &parse("⟨⟨⟩⟩"), &Form::void());
        assert_eq!(r.status, VerificationStatus::Passed);
        let r = verifier.check_equivalent("neq", &parse("⟨⟨⟩⟩"), &Form::mark());
        assert_eq!(r.status, VerificationStatus::Failed);
        assert!(r.message.contains("but"));
    }

    #[test]
    fn test_failing_law_is_reported() {
        let verifier = Verifier::default();
        // a ∧ ¬a ≡ ⟨⟩ is false for every a
        let r = verifier.check_law("bogus", &standard_operands(), |a| (apply_and(a.clone(), apply_not(a.clone())), one()));
        assert_eq!(r.status, VerificationStatus::Failed);
        assert_eq!(r.name, "bogus");
    }

    #[test]
    fn test_skipped_without_operands() {
        let verifier = Verifier::default();
        let r = verifier.check_law("empty", &[], |a| (a.clone(), a.clone()));
        assert_eq!(r.status, VerificationStatus::Skipped);
        assert_eq!(verifier.verify_soundness(&[]).status, VerificationStatus::Skipped);

        let mut report = VerificationReport::default();
        report.push(r);
        assert!(report.all_passed());
    }

    #[test]
    fn test_iteration_ceiling_is_an_error() {
        let verifier = Verifier::new(ReductionEngine::new(EngineConfig::new(0)));
        let r = verifier.check_equivalent("ceiling", &parse("⟨⟨⟨⟩⟩⟩"), &Form::mark());
        assert_eq!(r.status, VerificationStatus::Error);

        let report = verifier.run_all();
        assert!(!report.all_passed());
        assert!(report.count(VerificationStatus::Error) > 0);
    }

    #[test]
    fn test_report_display() {
        let mut report = VerificationReport::default();
        report.push(VerificationResult::passed("a", "ok"));
        report.push(VerificationResult::failed("b", "nope"));
        let text = report.to_string();
        assert!(text.contains("[PASSED] a: ok"));
        assert!(text.contains("[FAILED] b: nope"));
        assert!(text.ends_with("2 checks: 1 passed, 1 failed, 0 skipped, 0 errors"));
    }
}
