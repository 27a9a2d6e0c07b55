//! Generation of forms for testing and analysis.
//!
//! [`FormGenerator`] draws random forms bounded by depth and width, and builds
//! targeted forms: forms needing an exact number of rewrite steps, canonical
//! forms, and adversarial shapes (deep calling, wide crossing, mixed nesting).
//! Generation is deterministic under an explicit seed.
//!
//! Generated forms never hold void as a child, so they are exactly the forms
//! expressible in bracket notation.

use log::debug;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::form::Form;

/// Configuration for [`FormGenerator`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Maximum depth of random forms.
    pub max_depth: usize,
    /// Maximum number of items in any contents list.
    pub max_width: usize,
    /// Random seed (None for random)
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new(max_depth: usize, max_width: usize) -> Self {
        Self {
            max_depth,
            max_width,
            seed: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(4, 3)
    }
}

/// Seeded generator of forms.
#[derive(Debug, Clone)]
pub struct FormGenerator {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
}

impl FormGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        debug!("FormGenerator(config = {:?}, seed = {})", config, seed);
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(GeneratorConfig::default().with_seed(seed))
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// A random form within the configured depth and width.
    pub fn random_form(&mut self) -> Form {
        let (max_depth, max_width) = (self.config.max_depth, self.config.max_width);
        self.random_form_with(max_depth, max_width)
    }

    /// A random form with depth at most `max_depth` and contents lists of at most `max_width` items.
    pub fn random_form_with(&mut self, max_depth: usize, max_width: usize) -> Form {
        if max_depth == 0 {
            return Form::void();
        }
        let max_width = max_width.max(1);
        let items = self.rng.random_range(1..=max_width);
        if items == 1 || max_depth == 1 {
            let depth = self.rng.random_range(1..=max_depth);
            return self.random_enclosure(depth, max_width, false);
        }
        let forms = (0..items)
            .map(|_| {
                let depth = self.rng.random_range(1..max_depth);
                self.random_enclosure(depth, max_width, false)
            })
            .collect::<Vec<_>>();
        Form::juxtapose(forms)
    }

    /// A random enclosure of exactly the given depth.
    pub fn random_form_of_depth(&mut self, depth: usize) -> Form {
        if depth == 0 {
            return Form::void();
        }
        let max_width = self.config.max_width.max(1);
        self.random_enclosure(depth, max_width, true)
    }

    /// An enclosure of depth at most `depth`, or exactly `depth` if `exact`.
    fn random_enclosure(&mut self, depth: usize, max_width: usize, exact: bool) -> Form {
        if depth <= 1 {
            return Form::mark();
        }
        let min_items = if exact { 1 } else { 0 };
        let items = self.rng.random_range(min_items..=max_width);
        let deep_child = if exact { self.rng.random_range(0..items) } else { usize::MAX };
        let contents = (0..items)
            .map(|i| {
                if i == deep_child {
                    self.random_enclosure(depth - 1, max_width, true)
                } else {
                    let d = self.rng.random_range(1..depth);
                    self.random_enclosure(d, max_width, false)
                }
            })
            .collect::<Vec<_>>();
        Form::enclose_all(contents)
    }

    /// A batch of `count` random forms.
    pub fn generate_batch(&mut self, count: usize) -> Vec<Form> {
        (0..count).map(|_| self.random_form()).collect()
    }

    /// Void or the mark, at random.
    pub fn generate_canonical(&mut self) -> Form {
        if self.rng.random_bool(0.5) {
            Form::mark()
        } else {
            Form::void()
        }
    }

    /// A form that the engine reduces in exactly `target_steps` steps.
    ///
    /// Layers alternate between a double enclosure (one Calling step) and
    /// juxtaposition with a mark (one Crossing step), starting from the mark.
    pub fn generate_reducible(&mut self, target_steps: usize) -> Form {
        reducible(target_steps)
    }
}

impl Default for FormGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// See [`FormGenerator::generate_reducible`].
pub fn reducible(target_steps: usize) -> Form {
    (0..target_steps).fold(Form::mark(), |form, i| {
        if i % 2 == 0 {
            Form::enclose(Form::enclose(form))
        } else {
            Form::juxtapose([form, Form::mark()])
        }
    })
}

/// The mark wrapped in `depth` enclosures.
pub fn deep_calling(depth: usize) -> Form {
    (0..depth).fold(Form::mark(), |form, _| Form::enclose(form))
}

/// `width` marks side by side.
pub fn wide_crossing(width: usize) -> Form {
    Form::juxtapose((0..width).map(|_| Form::mark()))
}

/// Nested enclosures, each holding `width` marks next to the next level.
pub fn mixed(depth: usize, width: usize) -> Form {
    (0..depth).fold(Form::mark(), |form, _| {
        let mut contents = vec![form];
        contents.extend((0..width).map(|_| Form::mark()));
        Form::enclose_all(contents)
    })
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::parser::parse;
    use crate::reduce::ReductionEngine;

    #[test]
    fn test_seed_determinism() {
        let mut g1 = FormGenerator::with_seed(42);
        let mut g2 = FormGenerator::with_seed(42);
        for _ in 0..20 {
            assert_eq!(g1.random_form(), g2.random_form());
        }
    }

    #[test]
    fn test_random_bounds() {
        let config = GeneratorConfig::new(5, 3).with_seed(7);
        let mut gen = FormGenerator::new(config);
        for form in gen.generate_batch(200) {
            assert!(form.depth() >= 1);
            assert!(form.depth() <= 5, "{}", form);
            for node in form.iter_subforms() {
                assert!(node.contents().len() <= 3);
            }
            assert_eq!(form.void_children(), 0);
        }
    }

    #[test]
    fn test_random_form_of_depth() {
        let mut gen = FormGenerator::with_seed(1);
        for depth in 1..=6 {
            for _ in 0..10 {
                assert_eq!(gen.random_form_of_depth(depth).depth(), depth);
            }
        }
        assert_eq!(gen.random_form_of_depth(0), Form::void());
    }

    #[test]
    fn test_roundtrip_through_text() {
        let mut gen = FormGenerator::with_seed(3);
        for form in gen.generate_batch(50) {
            assert_eq!(parse(&form.to_string()), form);
        }
    }

    #[test]
    fn test_generate_canonical() {
        let mut gen = FormGenerator::with_seed(5);
        for _ in 0..20 {
            assert!(gen.generate_canonical().is_canonical());
        }
    }

    #[test]
    fn test_generate_reducible() {
        let engine = ReductionEngine::default();
        let mut gen = FormGenerator::with_seed(0);
        for steps in 0..12 {
            let form = gen.generate_reducible(steps);
            let trace = engine.reduce_with_trace(&form);
            assert_eq!(trace.step_count(), steps, "{}", trace);
            assert!(trace.canonical.is_canonical());
        }
    }

    #[test]
    fn test_adversarial_shapes() {
        assert_eq!(deep_calling(2), parse("⟨⟨⟨⟩⟩⟩"));
        assert_eq!(wide_crossing(3), parse("⟨⟩⟨⟩⟨⟩"));
        assert_eq!(mixed(1, 2), parse("⟨⟨⟩⟨⟩⟨⟩⟩"));
        assert_eq!(wide_crossing(0), Form::void());
    }
}
