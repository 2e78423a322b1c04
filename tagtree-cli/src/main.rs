//! tagtree - convert HTML fragments to JSON trees and back
//!
//! Usage:
//!   tagtree <file>                Print the rendered JSON tree
//!   tagtree <file> --tokens       Show the token stream
//!   tagtree <file> --tree         Show an indented element tree
//!   tagtree <file> --to-html      Read rendered JSON and print HTML

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser as ClapParser;
use owo_colors::OwoColorize;
use serde_json::Value;
use tagtree_common::warning::clear_warnings;
use tagtree_dom::{Element, emit, print_tree};
use tagtree_html::tokenizer::describe;
use tagtree_html::{HTMLTokenizer, Parser, ParserConfig};

/// Convert a restricted HTML dialect into a JSON element tree
#[derive(ClapParser, Debug)]
#[command(name = "tagtree")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Render a fragment file as pretty JSON
    tagtree fragment.html

    # Parse inline HTML into one line of JSON
    tagtree --compact --html '<p>Hello <b>world</b></p>'

    # Keep <math> markup as text
    tagtree --inline math fragment.html

    # Turn rendered JSON back into HTML
    tagtree --to-html tree.json
"#)]
struct Cli {
    /// Path to the input file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Read the input from this string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Print JSON on one line
    #[arg(short, long)]
    compact: bool,

    /// Print the token stream instead of the tree
    #[arg(short, long, conflicts_with_all = ["tree", "to_html"])]
    tokens: bool,

    /// Print an indented element tree instead of JSON
    #[arg(long, conflicts_with = "to_html")]
    tree: bool,

    /// Treat the input as rendered JSON and print it as HTML
    #[arg(long)]
    to_html: bool,

    /// JSON file with parser settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Add a tag to the inline whitelist (repeatable)
    #[arg(long = "inline", value_name = "TAG")]
    inline_tags: Vec<String>,

    /// Reject close tags for void elements
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    clear_warnings();
    let input = read_input(cli)?;
    let config = load_config(cli)?;

    if cli.to_html {
        println!("{}", rendered_to_html(&input, &config)?);
        return Ok(());
    }

    if cli.tokens {
        print_tokens(&input, &config)?;
        return Ok(());
    }

    let root = Parser::with_config(config)
        .parse(&input)
        .context("failed to parse HTML")?;

    if cli.tree {
        print_tree(&root);
    } else if cli.compact {
        println!("{}", serde_json::to_string(&root.render())?);
    } else {
        println!("{}", serde_json::to_string_pretty(&root.render())?);
    }
    Ok(())
}

/// Load input from `--html` or the file argument
fn read_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("could not read '{}'", path.display()))
    } else {
        bail!("no input: pass a FILE or --html")
    }
}

/// Build the parser settings from `--config`, `--inline` and `--strict`
fn load_config(cli: &Cli) -> Result<ParserConfig> {
    let mut config = match cli.config {
        Some(ref path) => read_config(path)?,
        None => ParserConfig::default(),
    };
    for tag in &cli.inline_tags {
        config = config.with_inline_tag(tag);
    }
    if cli.strict {
        config = config.with_strict_mode();
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<ParserConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read config '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config '{}'", path.display()))
}

/// Rebuild a tree from rendered JSON and emit it with the configured void set
fn rendered_to_html(input: &str, config: &ParserConfig) -> Result<String> {
    let value: Value = serde_json::from_str(input).context("input is not valid JSON")?;
    let element =
        Element::from_rendered(&value).context("JSON does not describe an element tree")?;
    Ok(emit::to_html_with(&element, |tag| config.is_void(tag)))
}

fn print_tokens(input: &str, config: &ParserConfig) -> Result<()> {
    println!("=== Tokens ===");
    for (i, token) in HTMLTokenizer::with_config(input, config).enumerate() {
        let token = token.context("failed to tokenize HTML")?;
        println!("  {i:3}: {}", describe(&token));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_inline_and_strict_flags() {
        let cli = Cli::parse_from([
            "tagtree", "--html", "<p></p>", "--inline", "Math", "--inline", "svg", "--strict",
        ]);
        let config = load_config(&cli).unwrap();
        assert!(config.is_inline("math"));
        assert!(config.is_inline("svg"));
        assert!(config.strict);
    }

    #[test]
    fn test_to_html_uses_configured_void_tags() {
        let json = r#"{"tag": "p", "child": [{"tag": "icon"}, {"tag": "img"}]}"#;
        let default = rendered_to_html(json, &ParserConfig::default()).unwrap();
        assert_eq!(default, "<p><icon></icon><img></p>");

        let config = ParserConfig::default().with_void_tag("icon");
        assert_eq!(rendered_to_html(json, &config).unwrap(), "<p><icon><img></p>");
    }

    #[test]
    fn test_to_html_rejects_bad_shape() {
        let err = rendered_to_html(r#"{"text": "x"}"#, &ParserConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("does not describe an element tree"));
    }

    #[test]
    fn test_read_input_requires_a_source() {
        let cli = Cli::parse_from(["tagtree"]);
        assert!(read_input(&cli).is_err());
    }

    #[test]
    fn test_path_and_html_conflict() {
        assert!(Cli::try_parse_from(["tagtree", "a.html", "--html", "<p></p>"]).is_err());
    }
}
