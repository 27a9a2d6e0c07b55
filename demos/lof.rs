use clap::{Parser, ValueEnum};
use log::info;

use lof_rs::display::Style;
use lof_rs::eval::Evaluator;
use lof_rs::parser::{parse, parse_strict};
use lof_rs::reduce::{EngineConfig, ReductionEngine};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    /// ⟨⟨⟩⟩
    Angle,
    /// (())
    Paren,
    /// [[]]
    Square,
    /// \langle \langle \rangle \rangle
    Latex,
}

impl From<StyleArg> for Style {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Angle => Style::Angle,
            StyleArg::Paren => Style::Paren,
            StyleArg::Square => Style::Square,
            StyleArg::Latex => Style::Latex,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Forms to reduce, in bracket notation, e.g. "(())()".
    #[arg(value_name = "FORM", required = true)]
    forms: Vec<String>,

    /// Output style.
    #[clap(long, value_enum, default_value = "angle")]
    style: StyleArg,

    /// Reject malformed input instead of repairing it.
    #[clap(long)]
    strict: bool,

    /// Print every rewrite step.
    #[clap(long)]
    trace: bool,

    /// Print the evaluation trace.
    #[clap(long)]
    explain: bool,

    /// Write a Graphviz rendering of the reduction to this file.
    #[clap(long, value_name = "FILE")]
    dot: Option<std::path::PathBuf>,

    /// Upper bound on rewrite steps per form.
    #[clap(long, value_name = "INT", default_value = "1000")]
    max_iterations: usize,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    info!("args = {:?}", args);

    let engine = ReductionEngine::new(EngineConfig::new(args.max_iterations));
    let evaluator = Evaluator::with_engine(engine);

    let style = Style::from(args.style);

    for (i, input) in args.forms.iter().enumerate() {
        let form = if args.strict { parse_strict(input)? } else { parse(input) };
        println!("----------------------------------");
        println!("form:      {}", form.explicit().with_style(style));
        println!("size = {}, depth = {}", form.size(), form.depth());

        let trace = evaluator.engine().reduce_with_trace(&form);
        if args.trace {
            for (k, step) in trace.steps.iter().enumerate() {
                println!("  {:>3}. {}", k + 1, step);
            }
        }
        println!(
            "canonical: {} in {} steps",
            trace.canonical.explicit().with_style(style),
            trace.step_count()
        );
        if !trace.is_complete {
            println!("(reduction stopped at the iteration limit)");
        }

        let (value, eval_trace) = evaluator.evaluate_with_trace(&form);
        println!("value:     {}", if value { "TRUE" } else { "FALSE" });
        if args.explain {
            print!("{}", eval_trace);
        }

        if let Some(path) = &args.dot {
            let path = if args.forms.len() > 1 {
                path.with_extension(format!("{}.dot", i))
            } else {
                path.clone()
            };
            std::fs::write(&path, trace.to_dot(&Default::default())?)?;
            info!("Wrote {}", path.display());
        }
    }

    println!("----------------------------------");
    println!("{}", evaluator.engine().stats());

    Ok(())
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_style_flag() {
        let args = Cli::try_parse_from(["lof", "()"]).unwrap();
        assert_eq!(Style::from(args.style), Style::Angle);

        let args = Cli::try_parse_from(["lof", "--style", "paren", "()"]).unwrap();
        assert_eq!(Style::from(args.style), Style::Paren);
        assert_eq!(parse("(()())").explicit().with_style(Style::from(args.style)).to_string(), "(()())");

        assert!(Cli::try_parse_from(["lof", "--style", "html", "()"]).is_err());
    }
}
