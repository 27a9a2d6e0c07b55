//! The recursive data model of boundary logic.
//!
//! A [`Form`] is a tree node with two fields: whether the node is *marked*
//! (an enclosure drawn around its contents) and the ordered list of its
//! children. Every state of the calculus is expressed through these two fields:
//!
//! | State | `is_marked` | `contents` |
//! |-------|-------------|------------|
//! | void | `false` | `[]` |
//! | simple mark `⟨⟩` | `true` | `[]` |
//! | enclosure `⟨X…⟩` | `true` | `[X, …]` |
//! | juxtaposition `X Y …` | `false` | `[X, Y, …]` |
//!
//! Forms are immutable values: every transformation builds a new tree.
//! Cloning a form is always a deep copy, since each node exclusively owns its children.

/// A node of a boundary-logic expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Form {
    marked: bool,
    contents: Vec<Form>,
}

impl Form {
    /// Build a node from its raw parts, without any normalization.
    pub fn new(marked: bool, contents: Vec<Form>) -> Self {
        Self { marked, contents }
    }

    /// The empty expression (FALSE).
    pub const fn void() -> Self {
        Self {
            marked: false,
            contents: Vec::new(),
        }
    }

    /// The simple mark `⟨⟩` (TRUE).
    pub const fn mark() -> Self {
        Self {
            marked: true,
            contents: Vec::new(),
        }
    }

    /// Enclose a single form: `⟨form⟩`.
    pub fn enclose(form: Form) -> Self {
        Self::new(true, vec![form])
    }

    /// Enclose the juxtaposition of several forms: `⟨a b …⟩`.
    pub fn enclose_all(forms: impl IntoIterator<Item = Form>) -> Self {
        Self::new(true, forms.into_iter().collect())
    }

    /// Juxtapose forms side by side.
    ///
    /// No forms give void, a single form is returned unchanged.
    pub fn juxtapose(forms: impl IntoIterator<Item = Form>) -> Self {
        let mut contents: Vec<Form> = forms.into_iter().collect();
        if contents.len() == 1 {
            return contents.swap_remove(0);
        }
        Self::new(false, contents)
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub fn contents(&self) -> &[Form] {
        &self.contents
    }

    pub fn into_contents(self) -> Vec<Form> {
        self.contents
    }

    pub fn is_void(&self) -> bool {
        !self.marked && self.contents.is_empty()
    }

    pub fn is_simple_mark(&self) -> bool {
        self.marked && self.contents.is_empty()
    }

    /// Whether this is a juxtaposition of at least two forms.
    pub fn is_juxtaposition(&self) -> bool {
        !self.marked && self.contents.len() >= 2
    }

    /// A form is canonical iff it is void or the simple mark.
    pub fn is_canonical(&self) -> bool {
        self.contents.is_empty()
    }

    /// Nesting depth: 0 for void, the simple mark has depth 1.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            if node.is_void() {
                continue;
            }
            depth = depth.max(level);
            stack.extend(node.contents.iter().map(|c| (c, level + 1)));
        }
        depth
    }

    /// Number of boundaries and juxtaposition nodes; void counts as 0.
    pub fn size(&self) -> usize {
        self.iter_subforms().filter(|f| !f.is_void()).count()
    }

    /// Number of nodes in the tree, void nodes included.
    pub fn node_count(&self) -> usize {
        self.iter_subforms().count()
    }

    /// Number of void nodes appearing as children somewhere in the tree.
    pub fn void_children(&self) -> usize {
        self.iter_subforms()
            .map(|f| f.contents.iter().filter(|c| c.is_void()).count())
            .sum()
    }

    /// Iterate over all nodes of the subtree in pre-order, starting with `self`.
    pub fn iter_subforms(&self) -> Subforms<'_> {
        Subforms { stack: vec![self] }
    }

    /// Get the node at the given path of child indices.
    pub fn at(&self, path: &[usize]) -> Option<&Form> {
        let mut node = self;
        for &i in path {
            node = node.contents.get(i)?;
        }
        Some(node)
    }

    /// Mutable access to a node of a privately owned working copy.
    pub(crate) fn at_mut(&mut self, path: &[usize]) -> Option<&mut Form> {
        let mut node = self;
        for &i in path {
            node = node.contents.get_mut(i)?;
        }
        Some(node)
    }
}

/// Pre-order iterator over the nodes of a form.
///
/// Created by [`Form::iter_subforms`]. Restart by calling it again.
#[derive(Debug, Clone)]
pub struct Subforms<'a> {
    stack: Vec<&'a Form>,
}

impl<'a> Iterator for Subforms<'a> {
    type Item = &'a Form;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.contents.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_void_and_mark() {
        let void = Form::void();
        assert!(void.is_void());
        assert!(!void.is_simple_mark());
        assert!(!void.is_marked());
        assert_eq!(void.depth(), 0);
        assert_eq!(void.size(), 0);

        let mark = Form::mark();
        assert!(mark.is_simple_mark());
        assert!(!mark.is_void());
        assert!(mark.is_marked());
        assert_eq!(mark.depth(), 1);
        assert_eq!(mark.size(), 1);

        assert_ne!(void, mark);
        assert_eq!(Form::default(), void);
    }

    #[test]
    fn test_depth_and_size() {
        // ⟨⟨⟩⟨⟨⟩⟩⟩
        let f = Form::enclose_all([Form::mark(), Form::enclose(Form::mark())]);
        assert_eq!(f.depth(), 3);
        assert_eq!(f.size(), 4);

        // ⟨⟩⟨⟩ has an unmarked root that counts as a node
        let g = Form::juxtapose([Form::mark(), Form::mark()]);
        assert!(g.is_juxtaposition());
        assert_eq!(g.depth(), 2);
        assert_eq!(g.size(), 3);
    }

    #[test]
    fn test_measures_of_deep_form() {
        let f = (0..3000).fold(Form::mark(), |f, _| Form::enclose(f));
        assert_eq!(f.depth(), 3001);
        assert_eq!(f.size(), 3001);
        // Void leaves do not add a level.
        let g = Form::enclose(Form::juxtapose([Form::void(), Form::enclose(Form::void())]));
        assert_eq!(g.depth(), 3);
        assert_eq!(g.size(), 3);
    }

    #[test]
    fn test_juxtapose_degenerate() {
        assert_eq!(Form::juxtapose([]), Form::void());
        assert_eq!(Form::juxtapose([Form::mark()]), Form::mark());
    }

    #[test]
    fn test_clone_is_deep() {
        let f = Form::enclose(Form::enclose(Form::mark()));
        let g = f.clone();
        assert_eq!(f, g);
        let h = Form::juxtapose([g, Form::mark()]);
        assert_eq!(f, Form::enclose(Form::enclose(Form::mark())));
        assert_ne!(f, h);
    }

    #[test]
    fn test_iter_subforms_preorder() {
        // ⟨⟨⟩⟩⟨⟩
        let inner = Form::enclose(Form::mark());
        let f = Form::juxtapose([inner.clone(), Form::mark()]);
        let nodes: Vec<&Form> = f.iter_subforms().collect();
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0], &f);
        assert_eq!(nodes[1], &inner);
        assert_eq!(nodes[2], &Form::mark());
        assert_eq!(nodes[3], &Form::mark());

        // Restartable
        assert_eq!(f.iter_subforms().count(), 4);
        assert_eq!(f.node_count(), 4);
    }

    #[test]
    fn test_void_children() {
        let f = Form::enclose(Form::juxtapose([Form::mark(), Form::void()]));
        assert_eq!(f.void_children(), 1);
        assert_eq!(f.size(), 3);
        assert_eq!(f.node_count(), 4);
    }

    #[test]
    fn test_at_path() {
        let f = Form::juxtapose([Form::mark(), Form::enclose(Form::mark())]);
        assert_eq!(f.at(&[]), Some(&f));
        assert_eq!(f.at(&[1, 0]), Some(&Form::mark()));
        assert_eq!(f.at(&[2]), None);
    }
}
