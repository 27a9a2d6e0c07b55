use clap::Parser;
use log::info;

use lof_rs::complexity::{AnalysisConfig, ComplexityAnalyzer};
use lof_rs::verify::Verifier;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Maximum depth of random forms.
    #[arg(value_name = "INT", default_value = "8")]
    max_depth: usize,

    /// Number of random forms per depth.
    #[clap(long, value_name = "INT", default_value = "20")]
    samples: usize,

    /// Parameter range of the adversarial families.
    #[clap(long, value_name = "INT", default_value = "32")]
    worst_case: usize,

    /// Number of random forms in the termination battery.
    #[clap(long, value_name = "INT", default_value = "200")]
    termination: usize,

    /// Random seed.
    #[clap(long, value_name = "INT", default_value = "42")]
    seed: u64,

    /// Also run the verification suite.
    #[clap(long)]
    verify: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    info!("args = {:?}", args);

    let config = AnalysisConfig::default()
        .with_samples_per_depth(args.samples)
        .with_seed(args.seed);
    let mut analyzer = ComplexityAnalyzer::new(config);

    println!("=== Reduction cost by depth ===");
    let scaling = analyzer.complexity_scaling_analysis(args.max_depth);
    println!("{}", scaling);

    println!("=== Adversarial families ===");
    let worst = analyzer.analyze_worst_case(args.worst_case);
    println!("deep_calling:  {}", worst.deep_calling);
    println!("wide_crossing: {}", worst.wide_crossing);
    println!("mixed:         {}", worst.mixed);
    let (name, analysis) = worst.worst();
    println!("worst family: {} ({} steps)", name, analysis.max_steps);

    println!("=== Termination ===");
    let termination = analyzer.termination_analysis(args.termination);
    println!("{}", termination);
    for form in &termination.failures {
        println!("  failed: {}", form.explicit());
    }

    if args.verify {
        println!("=== Verification ===");
        let report = Verifier::default().run_all();
        println!("{}", report);
    }

    println!("{}", analyzer.engine().stats());
    println!("Total time: {:.3} s", time_total.elapsed().as_secs_f64());

    Ok(())
}
