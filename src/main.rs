use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal};

use treepick::config::Config;
use treepick::file::loader::{load_tree_file, load_tree_from_stdin};
use treepick::selector::Parser as RuleParser;
use treepick::Evaluator;

/// Treepick - extract matching nodes from structured documents
#[derive(Parser)]
#[command(name = "treepick")]
#[command(version)]
#[command(about = "Extract nodes matching a selector rule from JSON, YAML, TOML or JSONL", long_about = None)]
struct Cli {
    /// Selector rule, e.g. "departments [name*=Sales] employees"
    rule: String,

    /// Document to search (omit to read from stdin if piped)
    file: Option<String>,

    /// Pretty-print each match instead of one compact JSON line per match
    #[arg(short, long)]
    pretty: bool,

    /// Error out on condition clauses that would otherwise be dropped
    #[arg(short, long)]
    strict: bool,

    /// Print only the number of matches
    #[arg(short, long)]
    count: bool,

    /// Maximum container nesting depth
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Maximum number of traversal steps
    #[arg(long, value_name = "N")]
    max_steps: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load();

    // Parse the rule before touching any input; a bad rule should fail
    // without consuming stdin.
    let selector = if cli.strict || config.strict {
        RuleParser::parse_strict(&cli.rule).context("Failed to parse selector rule")?
    } else {
        RuleParser::parse(&cli.rule)
    };

    let tree = match &cli.file {
        Some(path) => load_tree_file(path)?,
        None => {
            if io::stdin().is_terminal() {
                bail!("No input file given and nothing piped to stdin");
            }
            load_tree_from_stdin()?
        }
    };

    // CLI flags override config values
    let mut limits = config.limits();
    if let Some(depth) = cli.max_depth {
        limits.max_depth = depth;
    }
    if let Some(steps) = cli.max_steps {
        limits.max_steps = steps;
    }

    let matches = Evaluator::with_limits(&tree, limits)
        .evaluate(&selector)
        .context("Failed to evaluate selector")?;

    if cli.count {
        println!("{}", matches.len());
        return Ok(());
    }

    let pretty = cli.pretty || config.pretty;
    for node in matches {
        let rendered = if pretty {
            serde_json::to_string_pretty(node).context("Failed to serialize match")?
        } else {
            serde_json::to_string(node).context("Failed to serialize match")?
        };
        println!("{}", rendered);
    }

    Ok(())
}
