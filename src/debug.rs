//! Debug utilities for inspecting form structure.
//!
//! This module provides helpers for exploring forms and reductions.
//! These are primarily useful in tests and during development.

use std::fmt::Write;

use crate::algebra::constant;
use crate::eval::{Evaluator, NodeKind};
use crate::form::Form;
use crate::reduce::{redex_at, Redex, ReductionEngine};

/// Detailed information about a single node of a form.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    /// Child indices leading from the root to this node
    pub path: Vec<usize>,
    pub kind: NodeKind,
    /// Number of items in the contents
    pub width: usize,
    pub size: usize,
    pub value: bool,
    /// Rewrite applicable at this node, if any
    pub redex: Option<Redex>,
}

impl NodeInfo {
    fn of(form: &Form, path: Vec<usize>, evaluator: &Evaluator) -> Self {
        NodeInfo {
            path,
            kind: NodeKind::of(form),
            width: form.contents().len(),
            size: form.size(),
            value: evaluator.evaluate(form),
            redex: redex_at(form),
        }
    }
}

impl std::fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} {:?}(width={}, size={}, value={})",
            self.path,
            self.kind,
            self.width,
            self.size,
            if self.value { "T" } else { "F" },
        )?;
        if let Some(redex) = self.redex {
            write!(f, " <- {:?}", redex)?;
        }
        Ok(())
    }
}

/// A flattened representation of a form for debugging.
#[derive(Debug, Clone)]
pub struct FormTree {
    pub root: Form,
    /// All nodes in pre-order.
    pub nodes: Vec<NodeInfo>,
}

impl FormTree {
    /// Nodes at which some rule applies.
    pub fn redexes(&self) -> impl Iterator<Item = &NodeInfo> {
        self.nodes.iter().filter(|n| n.redex.is_some())
    }
}

impl std::fmt::Display for FormTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Form Tree (root = {}):", self.root.explicit())?;
        for node in &self.nodes {
            writeln!(f, "  {}{}", "  ".repeat(node.path.len()), node)?;
        }
        Ok(())
    }
}

impl Form {
    /// Get detailed information about the node at `path`.
    pub fn node_info(&self, path: &[usize]) -> Option<NodeInfo> {
        let node = self.at(path)?;
        Some(NodeInfo::of(node, path.to_vec(), &Evaluator::new()))
    }

    /// Get a tree representation of a form for debugging.
    pub fn debug_tree(&self) -> FormTree {
        let evaluator = Evaluator::new();
        let mut nodes = Vec::new();
        let mut stack = vec![(self, Vec::new())];

        while let Some((node, path)) = stack.pop() {
            for (i, child) in node.contents().iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(i);
                stack.push((child, child_path));
            }
            nodes.push(NodeInfo::of(node, path, &evaluator));
        }

        FormTree {
            root: self.clone(),
            nodes,
        }
    }

    /// Print a compact representation of a form.
    pub fn debug_string(&self) -> String {
        let mut result = String::new();
        let tree = self.debug_tree();

        writeln!(&mut result, "Form {} (size={}, depth={}):", self.explicit(), self.size(), self.depth()).unwrap();
        for node in &tree.nodes {
            writeln!(&mut result, "  {}", node).unwrap();
        }
        result
    }
}

impl ReductionEngine {
    /// Dump engine configuration and counters for debugging.
    pub fn dump_state(&self) -> String {
        let mut result = String::new();
        writeln!(&mut result, "=== Engine State ===").unwrap();
        writeln!(&mut result, "max_iterations: {}", self.config().max_iterations).unwrap();
        writeln!(&mut result, "{}", self.stats()).unwrap();
        result
    }
}

/// Verify that a binary connective evaluates and reduces correctly on all four inputs.
///
/// Returns the rows `(a, b, expected, actual)` where the connective disagrees with `expected_fn`,
/// either by direct evaluation or by reduction.
pub fn verify_truth_table(
    op: impl Fn(Form, Form) -> Form,
    expected_fn: impl Fn(bool, bool) -> bool,
) -> Vec<(bool, bool, bool, bool)> {
    let evaluator = Evaluator::new();
    let mut failures = Vec::new();

    for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
        let form = op(constant(a), constant(b));
        let expected = expected_fn(a, b);
        let actual = evaluator.evaluate(&form);
        let reduced = evaluator.engine().reduce(&form) == constant(expected);
        if actual != expected || !reduced {
            failures.push((a, b, expected, actual));
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::algebra::{apply_imply, apply_or};
    use crate::parser::parse;

    #[test]
    fn test_node_info() {
        let form = parse("⟨⟨⟩⟨⟩⟩");
        let info = form.node_info(&[]).unwrap();
        assert_eq!(info.kind, NodeKind::Enclosure);
        assert_eq!(info.width, 2);
        assert!(!info.value);
        assert_eq!(info.redex, Some(Redex::Condensation));

        let leaf = form.node_info(&[1]).unwrap();
        assert_eq!(leaf.kind, NodeKind::Mark);
        assert_eq!(leaf.redex, None);

        assert!(form.node_info(&[2]).is_none());
    }

    #[test]
    fn test_debug_tree() {
        let form = parse("⟨⟨⟨⟩⟩⟩⟨⟩");
        let tree = form.debug_tree();
        assert_eq!(tree.nodes.len(), form.node_count());
        assert_eq!(tree.nodes[0].path, Vec::<usize>::new());
        assert_eq!(tree.nodes[1].path, vec![0]);
        assert_eq!(tree.nodes[2].path, vec![0, 0]);
        assert_eq!(tree.nodes[4].path, vec![1]);
        assert_eq!(tree.redexes().count(), 2);
    }

    #[test]
    fn test_debug_string() {
        let s = parse("⟨⟨⟩⟩").debug_string();
        assert!(s.contains("size=2"), "Expected size=2 in: {}", s);
        assert!(s.contains("DoubleEnclosure"), "Expected DoubleEnclosure in: {}", s);
    }

    #[test]
    fn test_dump_state() {
        let engine = ReductionEngine::default();
        engine.reduce(&parse("⟨⟩⟨⟩"));
        let s = engine.dump_state();
        assert!(s.contains("max_iterations: 1000"), "{}", s);
    }

    #[test]
    fn test_verify_truth_table() {
        let failures = verify_truth_table(apply_or, |a, b| a || b);
        assert!(failures.is_empty(), "Truth table verification failed: {:?}", failures);

        let failures = verify_truth_table(apply_imply, |a, b| a && !b);
        assert_eq!(failures.len(), 4);
    }
}
