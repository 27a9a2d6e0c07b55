//! Form to DOT (Graphviz) conversion.
//!
//! A form is drawn as its tree:
//! - **Enclosures** (marked nodes) are boxes, the simple mark is labeled `⟨⟩`
//! - **Juxtapositions** (unmarked nodes with several items) are small ellipses labeled `·`
//! - **Void** is drawn as plain text `∅`
//!
//! Edges go from a node to each item of its contents, left to right.
//!
//! # Examples
//!
//! ```
//! use lof_rs::parser::parse;
//!
//! let form = parse("⟨⟨⟩⟩⟨⟩");
//! let dot = form.to_dot().unwrap();
//! assert!(dot.starts_with("graph {"));
//! // Render with: dot -Tpng output.dot -o output.png
//! ```

use std::fmt::Write as _;

use crate::eval::Evaluator;
use crate::form::Form;
use crate::reduce::ReductionTrace;

/// Configuration options for DOT output generation.
///
/// ```
/// use lof_rs::dot::DotConfig;
/// use lof_rs::form::Form;
///
/// let config = DotConfig {
///     enclosure_shape: "rect",
///     show_values: false,
///     ..DotConfig::default()
/// };
/// let dot = Form::mark().to_dot_with_config(&config).unwrap();
/// assert!(dot.contains("shape=rect"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for enclosures (default: "box")
    pub enclosure_shape: &'static str,
    /// Shape for juxtapositions (default: "ellipse")
    pub juxtaposition_shape: &'static str,
    /// Shape for void (default: "plaintext")
    pub void_shape: &'static str,
    /// Whether to annotate every node with its truth value (default: true)
    pub show_values: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            enclosure_shape: "box",
            juxtaposition_shape: "ellipse",
            void_shape: "plaintext",
            show_values: true,
        }
    }
}

struct DotWriter<'a> {
    config: &'a DotConfig,
    evaluator: Evaluator,
    prefix: String,
    next_id: usize,
}

impl DotWriter<'_> {
    /// Write the node for `form` and its subtree, returning the node name.
    fn write_node(&mut self, dot: &mut String, form: &Form) -> Result<String, std::fmt::Error> {
        let name = format!("{}n{}", self.prefix, self.next_id);
        self.next_id += 1;

        let (shape, label) = if form.is_void() {
            (self.config.void_shape, "∅")
        } else if form.is_simple_mark() {
            (self.config.enclosure_shape, "⟨⟩")
        } else if form.is_marked() {
            (self.config.enclosure_shape, "⟨ ⟩")
        } else {
            (self.config.juxtaposition_shape, "·")
        };
        if self.config.show_values {
            let value = if self.evaluator.evaluate(form) { "T" } else { "F" };
            writeln!(dot, "{} [shape={}, label=\"{}\\n{}\"];", name, shape, label, value)?;
        } else {
            writeln!(dot, "{} [shape={}, label=\"{}\"];", name, shape, label)?;
        }

        for child in form.contents() {
            let child_name = self.write_node(dot, child)?;
            writeln!(dot, "{} -- {};", name, child_name)?;
        }
        Ok(name)
    }
}

impl Form {
    /// Converts a form to DOT (Graphviz) format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts a form to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "ordering=out;")?;
        let mut writer = DotWriter {
            config,
            evaluator: Evaluator::new(),
            prefix: String::new(),
            next_id: 0,
        };
        writer.write_node(&mut dot, self)?;
        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

impl ReductionTrace {
    /// Draws every intermediate form of a reduction as its own cluster, left to right.
    pub fn to_dot(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "ordering=out;")?;
        writeln!(dot, "rankdir=TB;")?;

        let forms = std::iter::once(&self.original).chain(self.steps.iter().map(|s| &s.after));
        let mut roots = Vec::new();
        for (i, form) in forms.enumerate() {
            writeln!(dot, "subgraph cluster_{} {{", i)?;
            match i.checked_sub(1).and_then(|k| self.steps.get(k)) {
                Some(step) => writeln!(dot, "label=\"{}: {}\";", i, step.rule)?,
                None => writeln!(dot, "label=\"0: original\";")?,
            }
            let mut writer = DotWriter {
                config,
                evaluator: Evaluator::new(),
                prefix: format!("s{}_", i),
                next_id: 0,
            };
            roots.push(writer.write_node(&mut dot, form)?);
            writeln!(dot, "}}")?;
        }

        for pair in roots.windows(2) {
            writeln!(dot, "{} -- {} [style=dashed, constraint=false];", pair[0], pair[1])?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::parser::parse;
    use crate::reduce::ReductionEngine;

    #[test]
    fn test_to_dot_basic() {
        let dot = parse("⟨⟨⟩⟩⟨⟩").to_dot().unwrap();
        assert!(dot.starts_with("graph {"));
        assert!(dot.ends_with("}\n"));
        // root juxtaposition, two enclosures, one inner mark
        assert_eq!(dot.matches("shape=").count(), 4);
        assert_eq!(dot.matches(" -- ").count(), 3);
        assert!(dot.contains("n0 [shape=ellipse, label=\"·\\nF\"];"));
    }

    #[test]
    fn test_to_dot_void() {
        let dot = Form::void().to_dot().unwrap();
        assert!(dot.contains("shape=plaintext"));
        assert!(dot.contains("∅"));
        assert!(!dot.contains(" -- "));
    }

    #[test]
    fn test_to_dot_with_config() {
        let config = DotConfig {
            show_values: false,
            ..DotConfig::default()
        };
        let dot = Form::mark().to_dot_with_config(&config).unwrap();
        assert!(dot.contains("n0 [shape=box, label=\"⟨⟩\"];"));
    }

    #[test]
    fn test_trace_to_dot() {
        let engine = ReductionEngine::default();
        let trace = engine.reduce_with_trace(&parse("⟨⟨⟨⟩⟩⟩⟨⟩"));
        let dot = trace.to_dot(&DotConfig::default()).unwrap();
        let clusters = dot.matches("subgraph cluster_").count();
        assert_eq!(clusters, trace.step_count() + 1);
        assert_eq!(dot.matches("style=dashed").count(), trace.step_count());
        assert!(dot.contains("label=\"0: original\";"));
    }

    /// Helper test to write DOT file for manual inspection (disabled by default)
    #[test]
    #[ignore]
    fn test_write_dot_file() {
        let dot = parse("⟨⟨⟨⟩⟩⟨⟨⟩⟨⟩⟩⟩").to_dot().unwrap();
        std::fs::write("test_output.dot", &dot).unwrap();
        println!("DOT output:\n{}", dot);
    }
}
