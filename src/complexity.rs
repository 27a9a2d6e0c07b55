//! Empirical complexity and termination analysis of reduction.
//!
//! [`ComplexityAnalyzer`] instruments a [`ReductionEngine`] and measures the
//! number of rule applications needed to normalize generated forms: random forms
//! grouped by depth, adversarial families, and a termination battery checking
//! that every reduction completes within its step bound.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use log::{debug, info, warn};

use crate::form::Form;
use crate::generator::{self, FormGenerator, GeneratorConfig};
use crate::reduce::{step_bound, ReductionEngine};
use crate::stats::{LinearFit, Statistics};

/// Configuration for [`ComplexityAnalyzer`].
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Number of random forms drawn per depth.
    pub samples_per_depth: usize,
    /// Maximum width of random forms.
    pub max_width: usize,
    /// Random seed (None for random)
    pub seed: Option<u64>,
}

impl AnalysisConfig {
    pub fn with_samples_per_depth(mut self, samples: usize) -> Self {
        self.samples_per_depth = samples;
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

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            samples_per_depth: 20,
            max_width: 3,
            seed: Some(42),
        }
    }
}

/// Measurements of a single reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityMetrics {
    pub form_size: usize,
    pub form_depth: usize,
    pub reduction_steps: usize,
    pub time_seconds: f64,
    /// The reduction reached a canonical form.
    pub is_complete: bool,
    /// Upper bound on the steps, see [`step_bound`].
    pub step_bound: usize,
}

/// Aggregate of several [`ComplexityMetrics`].
#[derive(Debug, Clone, Default)]
pub struct ComplexityAnalysis {
    pub samples: Vec<ComplexityMetrics>,
    pub mean_steps: f64,
    pub max_steps: usize,
    pub min_steps: usize,
}

impl ComplexityAnalysis {
    pub fn from_samples(samples: Vec<ComplexityMetrics>) -> Self {
        let steps: Vec<usize> = samples.iter().map(|m| m.reduction_steps).collect();
        match Statistics::from_usize_sample(&steps) {
            Some(stats) => Self {
                mean_steps: stats.mean,
                max_steps: stats.max as usize,
                min_steps: stats.min as usize,
                samples,
            },
            None => Self::default(),
        }
    }

    pub fn mean_size(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().map(|m| m.form_size as f64).sum::<f64>() / self.samples.len() as f64
    }

    pub fn all_complete(&self) -> bool {
        self.samples.iter().all(|m| m.is_complete)
    }
}

impl fmt::Display for ComplexityAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "samples={}, mean_size={:.2}, steps: mean={:.2}, min={}, max={}",
            self.samples.len(),
            self.mean_size(),
            self.mean_steps,
            self.min_steps,
            self.max_steps
        )
    }
}

/// Reduction cost of the adversarial families, each indexed by its parameter `1..=n`.
#[derive(Debug, Clone)]
pub struct WorstCaseAnalysis {
    pub deep_calling: ComplexityAnalysis,
    pub wide_crossing: ComplexityAnalysis,
    pub mixed: ComplexityAnalysis,
}

impl WorstCaseAnalysis {
    /// The family with the highest step count.
    pub fn worst(&self) -> (&'static str, &ComplexityAnalysis) {
        [
            ("deep_calling", &self.deep_calling),
            ("wide_crossing", &self.wide_crossing),
            ("mixed", &self.mixed),
        ]
        .into_iter()
        .max_by_key(|(_, a)| a.max_steps)
        .unwrap_or(("deep_calling", &self.deep_calling))
    }
}

/// Estimated growth class of a measured quantity.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ComplexityClass {
    Constant,
    Linear,
    Quadratic,
    Polynomial,
    Exponential,
}

impl fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComplexityClass::Constant => "O(1)",
            ComplexityClass::Linear => "O(n)",
            ComplexityClass::Quadratic => "O(n^2)",
            ComplexityClass::Polynomial => "O(n^k)",
            ComplexityClass::Exponential => "O(c^n)",
        };
        f.write_str(s)
    }
}

/// Fits of `log y` against `log x` (power law) and against `x` (exponential).
#[derive(Debug, Clone, Copy)]
pub struct GrowthFit {
    pub power: Option<LinearFit>,
    pub exponential: Option<LinearFit>,
    pub class: ComplexityClass,
}

impl GrowthFit {
    /// Classify the growth of `y` as a function of `x` (both positive).
    pub fn classify(points: &[(f64, f64)]) -> Self {
        let positive: Vec<(f64, f64)> = points.iter().copied().filter(|&(x, y)| x > 0.0 && y > 0.0).collect();

        let (lo, hi) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));
        if points.is_empty() || hi - lo < 1e-9 || positive.len() < 2 {
            return Self {
                power: None,
                exponential: None,
                class: ComplexityClass::Constant,
            };
        }

        let log_log: Vec<(f64, f64)> = positive.iter().map(|&(x, y)| (x.ln(), y.ln())).collect();
        let semi_log: Vec<(f64, f64)> = positive.iter().map(|&(x, y)| (x, y.ln())).collect();
        let power = LinearFit::fit(&log_log);
        let exponential = LinearFit::fit(&semi_log);

        let class = match (power, exponential) {
            (Some(p), Some(e)) if e.r_squared > p.r_squared && e.slope > 0.1 => ComplexityClass::Exponential,
            (Some(p), _) => match p.slope {
                k if k < 0.5 => ComplexityClass::Constant,
                k if k < 1.5 => ComplexityClass::Linear,
                k if k < 2.5 => ComplexityClass::Quadratic,
                _ => ComplexityClass::Polynomial,
            },
            (None, _) => ComplexityClass::Constant,
        };

        Self {
            power,
            exponential,
            class,
        }
    }
}

/// Growth of reduction cost with depth and size.
#[derive(Debug, Clone)]
pub struct ScalingAnalysis {
    /// `(depth, mean size, mean steps)` per depth.
    pub by_depth: Vec<(usize, f64, f64)>,
    /// Steps as a function of form size, over every sample.
    pub steps_vs_size: Option<LinearFit>,
    /// Steps as a function of depth.
    pub depth_growth: GrowthFit,
    /// Largest observed ratio of steps to size.
    pub max_steps_per_size: f64,
}

impl ScalingAnalysis {
    pub fn complexity_class(&self) -> ComplexityClass {
        self.depth_growth.class
    }
}

impl fmt::Display for ScalingAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "depth  mean_size  mean_steps")?;
        for (depth, size, steps) in &self.by_depth {
            writeln!(f, "{:>5}  {:>9.2}  {:>10.2}", depth, size, steps)?;
        }
        if let Some(fit) = &self.steps_vs_size {
            writeln!(f, "steps vs size: {}", fit)?;
        }
        writeln!(f, "max steps/size: {:.4}", self.max_steps_per_size)?;
        write!(f, "growth with depth: {}", self.depth_growth.class)
    }
}

/// Outcome of the termination battery.
#[derive(Debug, Clone)]
pub struct TerminationAnalysis {
    pub forms_tested: usize,
    /// Reductions that reached a canonical form.
    pub converged: usize,
    /// Reductions that needed no more steps than their bound.
    pub within_bound: usize,
    pub max_steps: usize,
    /// Forms whose reduction did not complete or exceeded its bound.
    pub failures: Vec<Form>,
}

impl TerminationAnalysis {
    pub fn is_converged(&self) -> bool {
        self.converged == self.forms_tested
    }

    pub fn termination_guaranteed(&self) -> bool {
        self.is_converged() && self.within_bound == self.forms_tested
    }
}

impl fmt::Display for TerminationAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tested={}, converged={}, within_bound={}, max_steps={}, guaranteed={}",
            self.forms_tested,
            self.converged,
            self.within_bound,
            self.max_steps,
            self.termination_guaranteed()
        )
    }
}

/// Measures the cost of reduction over generated forms.
#[derive(Debug)]
pub struct ComplexityAnalyzer {
    engine: ReductionEngine,
    generator: FormGenerator,
    config: AnalysisConfig,
}

impl ComplexityAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_engine(ReductionEngine::default(), config)
    }

    pub fn with_engine(engine: ReductionEngine, config: AnalysisConfig) -> Self {
        let mut gen_config = GeneratorConfig::default().with_max_width(config.max_width);
        if let Some(seed) = config.seed {
            gen_config = gen_config.with_seed(seed);
        }
        Self {
            engine,
            generator: FormGenerator::new(gen_config),
            config,
        }
    }

    pub fn engine(&self) -> &ReductionEngine {
        &self.engine
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Reduce a form and record its cost.
    pub fn measure(&self, form: &Form) -> ComplexityMetrics {
        let before = self.engine.stats();
        let start = Instant::now();
        self.engine.reduce(form);
        let time_seconds = start.elapsed().as_secs_f64();
        let after = self.engine.stats();

        ComplexityMetrics {
            form_size: form.size(),
            form_depth: form.depth(),
            reduction_steps: after.applications() - before.applications(),
            time_seconds,
            is_complete: after.incomplete == before.incomplete,
            step_bound: step_bound(form),
        }
    }

    pub fn analyze_forms<'a>(&self, forms: impl IntoIterator<Item = &'a Form>) -> ComplexityAnalysis {
        ComplexityAnalysis::from_samples(forms.into_iter().map(|f| self.measure(f)).collect())
    }

    /// Analyze random forms of each exact depth `1..=max_depth`.
    pub fn analyze_by_depth(&mut self, max_depth: usize) -> BTreeMap<usize, ComplexityAnalysis> {
        let mut result = BTreeMap::new();
        for depth in 1..=max_depth {
            let forms: Vec<Form> = (0..self.config.samples_per_depth)
                .map(|_| self.generator.random_form_of_depth(depth))
                .collect();
            let analysis = self.analyze_forms(&forms);
            debug!("depth {}: {}", depth, analysis);
            result.insert(depth, analysis);
        }
        result
    }

    /// Analyze the adversarial families for parameters `1..=n`.
    pub fn analyze_worst_case(&self, n: usize) -> WorstCaseAnalysis {
        let deep: Vec<Form> = (1..=n).map(generator::deep_calling).collect();
        let wide: Vec<Form> = (1..=n).map(generator::wide_crossing).collect();
        let mixed: Vec<Form> = (1..=n).map(|d| generator::mixed(d, 2)).collect();

        let analysis = WorstCaseAnalysis {
            deep_calling: self.analyze_forms(&deep),
            wide_crossing: self.analyze_forms(&wide),
            mixed: self.analyze_forms(&mixed),
        };
        let (name, worst) = analysis.worst();
        info!("worst case up to n={}: {} with {} steps", n, name, worst.max_steps);
        analysis
    }

    /// Estimate how the number of steps grows with depth and size.
    pub fn complexity_scaling_analysis(&mut self, max_depth: usize) -> ScalingAnalysis {
        let by_depth = self.analyze_by_depth(max_depth);

        let rows: Vec<(usize, f64, f64)> = by_depth
            .iter()
            .map(|(&depth, a)| (depth, a.mean_size(), a.mean_steps))
            .collect();
        let depth_points: Vec<(f64, f64)> = rows.iter().map(|&(d, _, s)| (d as f64, s)).collect();
        let size_points: Vec<(f64, f64)> = by_depth
            .values()
            .flat_map(|a| a.samples.iter())
            .map(|m| (m.form_size as f64, m.reduction_steps as f64))
            .collect();
        let max_steps_per_size = by_depth
            .values()
            .flat_map(|a| a.samples.iter())
            .filter(|m| m.form_size > 0)
            .map(|m| m.reduction_steps as f64 / m.form_size as f64)
            .fold(0.0, f64::max);

        let analysis = ScalingAnalysis {
            by_depth: rows,
            steps_vs_size: LinearFit::fit(&size_points),
            depth_growth: GrowthFit::classify(&depth_points),
            max_steps_per_size,
        };
        info!(
            "scaling up to depth {}: {} in depth, max steps/size {:.3}",
            max_depth,
            analysis.complexity_class(),
            analysis.max_steps_per_size
        );
        analysis
    }

    /// Check that every reduction in a battery of forms terminates within its bound.
    ///
    /// The battery holds `num_forms` random forms, the forms of [`generator::reducible`]
    /// for step counts `0..num_forms` and the adversarial families.
    pub fn termination_analysis(&mut self, num_forms: usize) -> TerminationAnalysis {
        let mut forms = self.generator.generate_batch(num_forms);
        forms.extend((0..num_forms).map(generator::reducible));
        let family = num_forms.min(32);
        forms.extend((1..=family).map(generator::deep_calling));
        forms.extend((1..=family).map(generator::wide_crossing));
        forms.extend((1..=family).map(|d| generator::mixed(d, 2)));

        let mut analysis = TerminationAnalysis {
            forms_tested: forms.len(),
            converged: 0,
            within_bound: 0,
            max_steps: 0,
            failures: Vec::new(),
        };
        for form in forms {
            let m = self.measure(&form);
            analysis.max_steps = analysis.max_steps.max(m.reduction_steps);
            if m.is_complete {
                analysis.converged += 1;
            }
            if m.reduction_steps <= m.step_bound {
                analysis.within_bound += 1;
            }
            if !m.is_complete || m.reduction_steps > m.step_bound {
                warn!("reduction of {} did not terminate within its bound", form.explicit());
                analysis.failures.push(form);
            }
        }
        info!("termination: {}", analysis);
        analysis
    }
}

impl Default for ComplexityAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::parser::parse;
    use crate::reduce::EngineConfig;

    #[test]
    fn test_measure() {
        let analyzer = ComplexityAnalyzer::default();
        let m = analyzer.measure(&parse("⟨⟨⟩⟨⟨⟩⟩⟩"));
        assert_eq!(m.form_size, 4);
        assert_eq!(m.form_depth, 3);
        assert_eq!(m.reduction_steps, 2);
        assert!(m.is_complete);
        assert!(m.time_seconds >= 0.0);
    }

    #[test]
    fn test_analyze_forms() {
        let analyzer = ComplexityAnalyzer::default();
        let forms = [Form::mark(), generator::reducible(3), generator::reducible(5)];
        let analysis = analyzer.analyze_forms(&forms);
        assert_eq!(analysis.samples.len(), 3);
        assert_eq!(analysis.min_steps, 0);
        assert_eq!(analysis.max_steps, 5);
        assert!((analysis.mean_steps - 8.0 / 3.0).abs() < 1e-12);
        assert!(analysis.all_complete());

        let empty = analyzer.analyze_forms(std::iter::empty());
        assert_eq!(empty.samples.len(), 0);
        assert_eq!(empty.mean_steps, 0.0);
    }

    #[test]
    fn test_analyze_by_depth() {
        let mut analyzer = ComplexityAnalyzer::new(AnalysisConfig::default().with_samples_per_depth(5));
        let by_depth = analyzer.analyze_by_depth(4);
        assert_eq!(by_depth.len(), 4);
        assert_eq!(by_depth[&1].max_steps, 0);
        for (&depth, analysis) in &by_depth {
            assert_eq!(analysis.samples.len(), 5);
            assert!(analysis.samples.iter().all(|m| m.form_depth == depth));
            assert!(analysis.samples.iter().all(|m| m.reduction_steps <= m.form_size));
        }
    }

    #[test]
    fn test_worst_case() {
        let analyzer = ComplexityAnalyzer::default();
        let wc = analyzer.analyze_worst_case(6);
        // ⟨…⟨⟩…⟩ with n boundaries around the mark takes ceil(n/2) steps
        assert_eq!(wc.deep_calling.max_steps, 3);
        assert_eq!(wc.wide_crossing.max_steps, 1);
        assert_eq!(wc.wide_crossing.min_steps, 0);
        assert!(wc.mixed.all_complete());
    }

    #[test]
    fn test_classify_growth() {
        let linear: Vec<(f64, f64)> = (1..=8).map(|x| (x as f64, 2.0 * x as f64)).collect();
        assert_eq!(GrowthFit::classify(&linear).class, ComplexityClass::Linear);

        let quadratic: Vec<(f64, f64)> = (1..=8).map(|x| (x as f64, (x * x) as f64)).collect();
        assert_eq!(GrowthFit::classify(&quadratic).class, ComplexityClass::Quadratic);

        let exponential: Vec<(f64, f64)> = (1..=8).map(|x| (x as f64, 2f64.powi(x))).collect();
        assert_eq!(GrowthFit::classify(&exponential).class, ComplexityClass::Exponential);

        let constant: Vec<(f64, f64)> = (1..=8).map(|x| (x as f64, 3.0)).collect();
        assert_eq!(GrowthFit::classify(&constant).class, ComplexityClass::Constant);

        assert_eq!(GrowthFit::classify(&[]).class, ComplexityClass::Constant);
    }

    #[test]
    fn test_scaling_analysis() {
        let mut analyzer = ComplexityAnalyzer::new(AnalysisConfig::default().with_samples_per_depth(10));
        let scaling = analyzer.complexity_scaling_analysis(5);
        assert_eq!(scaling.by_depth.len(), 5);
        assert!(scaling.max_steps_per_size <= 1.0);
        assert!(scaling.steps_vs_size.is_some());
        assert!(scaling.to_string().contains("growth with depth"));
    }

    #[test]
    fn test_termination_analysis() {
        let mut analyzer = ComplexityAnalyzer::default();
        let analysis = analyzer.termination_analysis(50);
        assert!(analysis.forms_tested >= 100);
        assert!(analysis.is_converged());
        assert!(analysis.termination_guaranteed());
        assert!(analysis.failures.is_empty());
    }

    #[test]
    fn test_termination_analysis_flags_ceiling() {
        let engine = ReductionEngine::new(EngineConfig::new(3));
        let mut analyzer = ComplexityAnalyzer::with_engine(engine, AnalysisConfig::default());
        let analysis = analyzer.termination_analysis(10);
        assert!(!analysis.is_converged());
        assert!(!analysis.termination_guaranteed());
        assert!(!analysis.failures.is_empty());
    }
}
