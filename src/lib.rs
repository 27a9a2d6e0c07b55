//! # lof-rs: Laws of Form in Rust
//!
//! **`lof-rs`** is a library for the primary arithmetic of Spencer-Brown's *Laws of Form*:
//! nested distinctions (marks), their reduction to canonical form, and their reading as boolean logic.
//!
//! ## What is a form?
//!
//! A form is either *void* (the empty form), a *mark* `⟨…⟩` enclosing a list of forms,
//! or a *juxtaposition* of forms side by side. Two axioms rewrite forms:
//!
//! - **Calling**: `⟨⟨a⟩⟩ = a`, a double boundary cancels.
//! - **Crossing**: `⟨⟩⟨⟩ = ⟨⟩`, repeated marks condense.
//!
//! Every form reduces in finitely many steps to exactly one of two canonical forms:
//! the simple mark `⟨⟩` (TRUE) or void (FALSE).
//!
//! ## Basic Usage
//!
//! ```rust
//! use lof_rs::eval::Evaluator;
//! use lof_rs::parser::parse;
//! use lof_rs::reduce::ReductionEngine;
//!
//! let engine = ReductionEngine::default();
//!
//! // ⟨⟨⟩⟩ is a double boundary around void, so it calls down to void
//! let form = parse("⟨⟨⟩⟩⟨⟩");
//! let trace = engine.reduce_with_trace(&form);
//! assert!(trace.canonical.is_void());
//! println!("{}", trace);
//!
//! // Evaluation agrees with reduction without rewriting anything
//! let evaluator = Evaluator::new();
//! assert!(!evaluator.evaluate(&form));
//! ```
//!
//! ## Core Components
//!
//! - **[`form`]**: The [`Form`][crate::form::Form] tree and its measures.
//! - **[`parser`]** and **[`display`]**: Bracket notation in several styles.
//! - **[`reduce`]**: The [`ReductionEngine`][crate::reduce::ReductionEngine] and reduction traces.
//! - **[`eval`]**: Direct evaluation to a truth value.
//! - **[`algebra`]**: Boolean connectives encoded as forms.
//! - **[`generator`]**: Random and adversarial forms.
//! - **[`verify`]**: Checks of the axioms and algebraic laws.
//! - **[`complexity`]**: Empirical analysis of reduction cost.
//! - **[`dot`]**: Visualizing forms and traces with Graphviz.

pub mod algebra;
pub mod complexity;
pub mod debug;
pub mod display;
pub mod dot;
pub mod eval;
pub mod form;
pub mod generator;
pub mod parser;
pub mod reduce;
pub mod stats;
pub mod verify;
