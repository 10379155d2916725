use std::{fs, io::Read, path::PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};

use cfg_normal_form::{EmptyPolicy, EmptyString, Grammar, NameAllocator, Normalized};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Productions as parsed
    Prod,
    /// Nullable nonterminals
    Nullable,
    /// Epsilon, unit and useless-symbol elimination
    Simplified,
    /// Chomsky normal form
    Cnf,
    /// Greibach normal form
    Gnf,
    /// Eliminate left recursion
    Elf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Plain,
    LaTeX,
    JSON,
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// What to print, in order
    #[arg(value_enum, required = true)]
    outputs: Vec<Output>,

    /// File containing the grammar (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print in LaTeX format
    #[arg(short, long, conflicts_with = "json")]
    latex: bool,

    /// Print in JSON format
    #[arg(short, long)]
    json: bool,

    /// Keep `S → ε` when the start symbol is nullable
    #[arg(short, long)]
    keep_empty: bool,
}

impl Cli {
    fn output_format(&self) -> OutputFormat {
        if self.latex {
            OutputFormat::LaTeX
        } else if self.json {
            OutputFormat::JSON
        } else {
            OutputFormat::Plain
        }
    }

    fn policy(&self) -> EmptyPolicy {
        if self.keep_empty {
            EmptyPolicy::KeepOnStart
        } else {
            EmptyPolicy::Drop
        }
    }
}

fn read_input(file: &Option<PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn render_grammar(g: &Grammar, format: OutputFormat) -> String {
    let t = g.to_production_output_vec();
    match format {
        OutputFormat::Plain => t.to_plaintext(),
        OutputFormat::LaTeX => t.to_latex(),
        OutputFormat::JSON => t.to_json(),
    }
}

fn render_normalized(n: &Normalized, format: OutputFormat) -> String {
    for cycle in &n.unit_cycles {
        eprintln!("warning: {}", cycle);
    }
    match n.empty_string {
        EmptyString::NotDerived => {}
        EmptyString::Kept => eprintln!("note: ε kept on start symbol {}", n.grammar.start_symbol),
        EmptyString::Dropped => eprintln!("note: ε dropped from the language"),
    }
    match format {
        OutputFormat::JSON => n.to_json(),
        _ => render_grammar(&n.grammar, format),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let format = cli.output_format();

    let input = read_input(&cli.file)?;
    let g = Grammar::parse(&input).context("invalid grammar")?;

    for output in &cli.outputs {
        let text = match output {
            Output::Prod => render_grammar(&g, format),
            Output::Nullable => {
                let t = g.to_nullable_output_vec();
                match format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json(),
                }
            }
            Output::Simplified => render_normalized(&g.simplify(cli.policy()), format),
            Output::Cnf => {
                let mut names = NameAllocator::for_grammar(&g);
                let n = g.to_cnf(cli.policy(), &mut names).context("CNF conversion failed")?;
                render_normalized(&n, format)
            }
            Output::Gnf => {
                let mut names = NameAllocator::for_grammar(&g);
                let n = g.to_gnf(&mut names).context("GNF conversion failed")?;
                render_normalized(&n, format)
            }
            Output::Elf => {
                let mut names = NameAllocator::for_grammar(&g);
                let elf = g
                    .eliminate_left_recursion(&mut names)
                    .context("left recursion elimination failed")?;
                render_grammar(&elf, format)
            }
        };
        println!("{}", text);
    }

    Ok(())
}
