//! Direct semantic evaluation of forms.
//!
//! Evaluation works on the structure of a form, without rewriting it:
//!
//! - a juxtaposition is TRUE iff it is non-empty and every item is TRUE (void is FALSE);
//! - an enclosure negates the juxtaposition of its contents (so `⟨⟩` is TRUE).
//!
//! For every form, `evaluate(f)` agrees with reduction: it is TRUE iff `f` reduces to the mark.

use std::fmt;

use log::trace;

use crate::form::Form;
use crate::reduce::ReductionEngine;

/// Truth value of a ground form.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TruthValue {
    True,
    False,
}

impl TruthValue {
    pub fn as_str(self) -> &'static str {
        match self {
            TruthValue::True => "TRUE",
            TruthValue::False => "FALSE",
        }
    }
}

impl From<bool> for TruthValue {
    fn from(value: bool) -> Self {
        if value {
            TruthValue::True
        } else {
            TruthValue::False
        }
    }
}

impl From<TruthValue> for bool {
    fn from(value: TruthValue) -> Self {
        value == TruthValue::True
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of node visited during evaluation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NodeKind {
    Void,
    Mark,
    Enclosure,
    Juxtaposition,
}

impl NodeKind {
    pub fn of(form: &Form) -> Self {
        match (form.is_marked(), form.contents().is_empty()) {
            (false, true) => NodeKind::Void,
            (true, true) => NodeKind::Mark,
            (true, false) => NodeKind::Enclosure,
            (false, false) => NodeKind::Juxtaposition,
        }
    }
}

/// One evaluated node, recorded after its children (post-order).
#[derive(Debug, Clone)]
pub struct EvalStep {
    pub depth: usize,
    pub kind: NodeKind,
    pub form: Form,
    pub value: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EvalTrace {
    pub steps: Vec<EvalStep>,
}

impl fmt::Display for EvalTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            let why = match step.kind {
                NodeKind::Void => "void is false",
                NodeKind::Mark => "the mark is true",
                NodeKind::Enclosure => "enclosure negates its contents",
                NodeKind::Juxtaposition => "juxtaposition is conjunction",
            };
            writeln!(
                f,
                "{}{} = {} ({})",
                "  ".repeat(step.depth),
                step.form.explicit(),
                TruthValue::from(step.value),
                why
            )?;
        }
        Ok(())
    }
}

/// Semantic summary of a form, combining evaluation and reduction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SemanticAnalysis {
    pub truth_value: TruthValue,
    /// Reduces to the mark.
    pub is_tautology: bool,
    /// Reduces to void.
    pub is_contradiction: bool,
    pub depth: usize,
    pub size: usize,
}

/// Evaluates forms to Boolean values.
#[derive(Debug, Default)]
pub struct Evaluator {
    engine: ReductionEngine,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given engine for [`analyze_form`][Self::analyze_form].
    pub fn with_engine(engine: ReductionEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ReductionEngine {
        &self.engine
    }

    /// A juxtaposition is the conjunction of its non-empty contents and a boundary negates it.
    pub fn evaluate(&self, form: &Form) -> bool {
        // Frames are (node, next child to visit); `value` holds the last finished node.
        let mut stack = vec![(form, 0)];
        let mut value = false;
        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            let contents = node.contents();
            let failed = next > 0 && !value;
            if failed || next == contents.len() {
                let all = !failed && !contents.is_empty();
                value = node.is_marked() != all;
                stack.pop();
            } else {
                top.1 += 1;
                stack.push((&contents[next], 0));
            }
        }
        value
    }

    /// Evaluate, recording every visited node.
    pub fn evaluate_with_trace(&self, form: &Form) -> (bool, EvalTrace) {
        let mut trace = EvalTrace::default();
        let value = self.eval_traced(form, 0, &mut trace);
        (value, trace)
    }

    fn eval_traced(&self, form: &Form, depth: usize, trace: &mut EvalTrace) -> bool {
        // No short-circuit here, so that the explanation covers the whole form.
        let mut all = !form.contents().is_empty();
        for child in form.contents() {
            all &= self.eval_traced(child, depth + 1, trace);
        }
        let value = form.is_marked() != all;
        trace!("eval {} = {}", form.explicit(), value);
        trace.steps.push(EvalStep {
            depth,
            kind: NodeKind::of(form),
            form: form.clone(),
            value,
        });
        value
    }

    pub fn truth_value(&self, form: &Form) -> TruthValue {
        self.evaluate(form).into()
    }

    pub fn is_true(&self, form: &Form) -> bool {
        self.evaluate(form)
    }

    pub fn is_false(&self, form: &Form) -> bool {
        !self.evaluate(form)
    }

    pub fn count_true<'a>(&self, forms: impl IntoIterator<Item = &'a Form>) -> usize {
        forms.into_iter().filter(|f| self.is_true(f)).count()
    }

    pub fn count_false<'a>(&self, forms: impl IntoIterator<Item = &'a Form>) -> usize {
        forms.into_iter().filter(|f| self.is_false(f)).count()
    }

    /// Split forms into `(true, false)` groups, preserving order.
    pub fn partition_by_truth<'a>(&self, forms: impl IntoIterator<Item = &'a Form>) -> (Vec<&'a Form>, Vec<&'a Form>) {
        forms.into_iter().partition(|f| self.is_true(f))
    }

    pub fn analyze_form(&self, form: &Form) -> SemanticAnalysis {
        let canonical = self.engine.reduce(form);
        SemanticAnalysis {
            truth_value: self.truth_value(form),
            is_tautology: canonical.is_simple_mark(),
            is_contradiction: canonical.is_void(),
            depth: form.depth(),
            size: form.size(),
        }
    }
}
