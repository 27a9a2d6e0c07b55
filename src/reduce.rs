//! Reduction of forms to canonical form.
//!
//! The rewrite system has two axioms:
//!
//! - **Calling** (J1): `⟨⟨a⟩⟩ = a`. A boundary directly inside a boundary cancels with it.
//!   A juxtaposition of a single form is that form.
//! - **Crossing** (J2): `⟨⟩⟨⟩ = ⟨⟩`. Repeated marks at one level condense into one.
//!   A void item in a list falsifies the whole list: the node collapses to void
//!   (juxtaposition) or to the mark (enclosure).
//!
//! Every rule application strictly decreases the measure `size + void children`,
//! so reduction terminates in at most that many steps, and every irreducible form
//! is either void or the simple mark. Since each rule preserves the truth value,
//! the normal form is unique whatever the order of application.
//!
//! The engine uses the leftmost-outermost strategy: at every step it rewrites the
//! first redex met in a pre-order walk of the tree.
//!
//! ```
//! use lof_rs::form::Form;
//! use lof_rs::reduce::ReductionEngine;
//!
//! let engine = ReductionEngine::default();
//! let f = Form::enclose(Form::enclose(Form::mark()));
//! assert_eq!(engine.reduce(&f), Form::mark());
//! assert_eq!(engine.stats().calling, 1);
//! ```

use std::cell::Cell;
use std::fmt;

use log::{debug, warn};

use crate::form::Form;

/// Configuration of a [`ReductionEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on rule applications per reduction.
    pub max_iterations: usize,
}

impl EngineConfig {
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// The two axioms of the calculus.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Rule {
    Calling,
    Crossing,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Calling => write!(f, "calling"),
            Rule::Crossing => write!(f, "crossing"),
        }
    }
}

/// The concrete shape of a reducible node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Redex {
    /// `⟨⟨C⟩⟩ → C`
    DoubleEnclosure,
    /// A juxtaposition holding one form is that form.
    SingleJuxtaposition,
    /// `⟨⟩⟨⟩ → ⟨⟩`
    Condensation,
    /// A list holding void: `X void → void`, `⟨X void⟩ → ⟨⟩`.
    VoidAbsorption,
}

impl Redex {
    pub fn rule(self) -> Rule {
        match self {
            Redex::DoubleEnclosure | Redex::SingleJuxtaposition => Rule::Calling,
            Redex::Condensation | Redex::VoidAbsorption => Rule::Crossing,
        }
    }
}

/// Classify the node itself (not its descendants) as a redex.
///
/// When several rules apply to the same node the first in this order wins:
/// void absorption, double enclosure, condensation of simple marks, then
/// unwrapping a single-item juxtaposition. Step counts of the leftmost-outermost
/// strategy depend on this order.
pub fn redex_at(form: &Form) -> Option<Redex> {
    let contents = form.contents();
    if contents.is_empty() {
        return None;
    }
    if contents.iter().any(Form::is_void) {
        return Some(Redex::VoidAbsorption);
    }
    if form.is_marked() && contents.len() == 1 && contents[0].is_marked() {
        return Some(Redex::DoubleEnclosure);
    }
    if contents.iter().filter(|c| c.is_simple_mark()).count() >= 2 {
        return Some(Redex::Condensation);
    }
    if !form.is_marked() && contents.len() == 1 {
        return Some(Redex::SingleJuxtaposition);
    }
    None
}

/// Find the leftmost-outermost redex, returning its path of child indices.
pub fn find_redex(form: &Form) -> Option<(Vec<usize>, Redex)> {
    // Pre-order walk; each entry carries its depth and its index in the parent.
    let mut stack = vec![(form, 0, 0)];
    let mut path = Vec::new();
    while let Some((node, depth, index)) = stack.pop() {
        if depth > 0 {
            path.truncate(depth - 1);
            path.push(index);
        }
        if let Some(redex) = redex_at(node) {
            return Some((path, redex));
        }
        stack.extend(node.contents().iter().enumerate().rev().map(|(i, c)| (c, depth + 1, i)));
    }
    None
}

/// Apply the rewrite for `redex` at the root of `form`.
pub fn contract(form: Form, redex: Redex) -> Form {
    let marked = form.is_marked();
    match redex {
        Redex::VoidAbsorption => {
            if marked {
                Form::mark()
            } else {
                Form::void()
            }
        }
        Redex::DoubleEnclosure => {
            let inner = form.into_contents().into_iter().next().unwrap_or_default();
            Form::juxtapose(inner.into_contents())
        }
        Redex::SingleJuxtaposition => form.into_contents().into_iter().next().unwrap_or_default(),
        Redex::Condensation => {
            let mut seen_mark = false;
            let kept: Vec<Form> = form
                .into_contents()
                .into_iter()
                .filter(|c| {
                    if !c.is_simple_mark() {
                        return true;
                    }
                    let first = !seen_mark;
                    seen_mark = true;
                    first
                })
                .collect();
            if marked {
                Form::enclose_all(kept)
            } else {
                Form::juxtapose(kept)
            }
        }
    }
}

/// Upper bound on the number of rule applications needed to normalize `form`.
///
/// Equals `form.size()` when no void appears as a child, which is the case for
/// every parsed or generated form.
pub fn step_bound(form: &Form) -> usize {
    form.size() + form.void_children()
}

/// A single rule application.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReductionStep {
    pub rule: Rule,
    pub redex: Redex,
    /// Child indices leading from the root to the rewritten node.
    pub path: Vec<usize>,
    pub before: Form,
    pub after: Form,
}

impl fmt::Display for ReductionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:?} at {:?}): {} => {}",
            self.rule,
            self.redex,
            self.path,
            self.before.explicit(),
            self.after.explicit()
        )
    }
}

/// The record of a complete reduction.
#[derive(Debug, Clone)]
pub struct ReductionTrace {
    pub original: Form,
    pub steps: Vec<ReductionStep>,
    pub canonical: Form,
    /// Whether no rule applies to `canonical`, i.e. the iteration ceiling was not hit.
    pub is_complete: bool,
}

impl ReductionTrace {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Number of applications of the given rule.
    pub fn count(&self, rule: Rule) -> usize {
        self.steps.iter().filter(|s| s.rule == rule).count()
    }
}

impl fmt::Display for ReductionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "reduce {}", self.original.explicit())?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "  {:>3}. {}", i + 1, step)?;
        }
        write!(
            f,
            "  = {} in {} steps{}",
            self.canonical.explicit(),
            self.step_count(),
            if self.is_complete { "" } else { " (incomplete)" }
        )
    }
}

/// Usage counters of a [`ReductionEngine`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct EngineStats {
    pub calling: usize,
    pub crossing: usize,
    /// Calls to `reduce`/`reduce_with_trace`, including incomplete ones.
    pub reductions: usize,
    /// Reductions stopped by the iteration ceiling.
    pub incomplete: usize,
}

impl EngineStats {
    pub fn applications(&self) -> usize {
        self.calling + self.crossing
    }
}

impl fmt::Display for EngineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reductions={}, calling={}, crossing={}, incomplete={}",
            self.reductions, self.calling, self.crossing, self.incomplete
        )
    }
}

/// Term-rewriting engine normalizing forms under Calling and Crossing.
#[derive(Debug, Default)]
pub struct ReductionEngine {
    config: EngineConfig,
    calling: Cell<usize>,
    crossing: Cell<usize>,
    reductions: Cell<usize>,
    incomplete: Cell<usize>,
}

impl ReductionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            calling: self.calling.get(),
            crossing: self.crossing.get(),
            reductions: self.reductions.get(),
            incomplete: self.incomplete.get(),
        }
    }

    pub fn reset_stats(&self) {
        self.calling.set(0);
        self.crossing.set(0);
        self.reductions.set(0);
        self.incomplete.set(0);
    }

    fn record(&self, rule: Rule) {
        let counter = match rule {
            Rule::Calling => &self.calling,
            Rule::Crossing => &self.crossing,
        };
        counter.set(counter.get() + 1);
    }

    /// Perform one rule application, if any rule applies.
    pub fn step(&self, form: &Form) -> Option<ReductionStep> {
        let (path, redex) = find_redex(form)?;
        let mut after = form.clone();
        rewrite(&mut after, &path, redex);
        self.record(redex.rule());
        Some(ReductionStep {
            rule: redex.rule(),
            redex,
            path,
            before: form.clone(),
            after,
        })
    }

    /// Reduce a form to its canonical form.
    pub fn reduce(&self, form: &Form) -> Form {
        debug!("reduce(form = {})", form.explicit());
        self.run(form, None).0
    }

    /// Alias of [`reduce`][Self::reduce].
    pub fn canonical_form(&self, form: &Form) -> Form {
        self.reduce(form)
    }

    /// Reduce a form, recording every step.
    pub fn reduce_with_trace(&self, form: &Form) -> ReductionTrace {
        debug!("reduce_with_trace(form = {})", form.explicit());
        let mut steps = Vec::new();
        let (canonical, is_complete) = self.run(form, Some(&mut steps));
        ReductionTrace {
            original: form.clone(),
            steps,
            canonical,
            is_complete,
        }
    }

    pub fn is_canonical(&self, form: &Form) -> bool {
        form.is_canonical()
    }

    /// Two forms are equivalent iff they reduce to the same canonical form.
    pub fn are_equivalent(&self, a: &Form, b: &Form) -> bool {
        self.reduce(a) == self.reduce(b)
    }

    fn run(&self, form: &Form, mut trace: Option<&mut Vec<ReductionStep>>) -> (Form, bool) {
        let mut work = form.clone();
        let mut iterations = 0;

        while let Some((path, redex)) = find_redex(&work) {
            if iterations >= self.config.max_iterations {
                warn!(
                    "reduction stopped after {} iterations at {}",
                    iterations,
                    work.explicit()
                );
                self.incomplete.set(self.incomplete.get() + 1);
                self.reductions.set(self.reductions.get() + 1);
                return (work, false);
            }

            debug!("{} ({:?}) at {:?}", redex.rule(), redex, path);
            let before = trace.as_ref().map(|_| work.clone());
            rewrite(&mut work, &path, redex);
            self.record(redex.rule());
            iterations += 1;

            if let (Some(steps), Some(before)) = (trace.as_deref_mut(), before) {
                steps.push(ReductionStep {
                    rule: redex.rule(),
                    redex,
                    path,
                    before,
                    after: work.clone(),
                });
            }
        }

        debug!("canonical form {} after {} steps", work.explicit(), iterations);
        self.reductions.set(self.reductions.get() + 1);
        (work, true)
    }
}

fn rewrite(work: &mut Form, path: &[usize], redex: Redex) {
    if let Some(node) = work.at_mut(path) {
        let old = std::mem::take(node);
        *node = contract(old, redex);
    }
}
