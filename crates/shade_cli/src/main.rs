//! shade: Report declarations that shadow a declaration of an enclosing scope.
//!
//! Usage:
//!   shade [options] <tree.json...>
//!
//! Each input is a resolved scope tree in JSON form. Exits with 1 when any
//! shadowing was reported and with 2 when an input could not be loaded.

mod tracing_config;

use clap::Parser as ClapParser;
use miette::{miette, IntoDiagnostic, WrapErr};
use shade_core::text::LineMap;
use shade_diagnostics::{Diagnostic, DiagnosticCollection};
use shade_lint::{check_no_shadow, render_all, HoistMode, NoShadowOptions, ShadowReport};
use shade_options::parse_options_file;
use shade_scope::ScopeTree;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "shade", version, about = "shade - report shadowed declarations in resolved scope trees")]
struct Cli {
    /// Scope tree files (JSON) to check.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Path to a JSON file with the rule's options.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Also report shadowing of built-in globals.
    #[arg(long)]
    builtin_globals: bool,

    /// Hoisting mode: all, functions or never.
    #[arg(long, value_name = "MODE")]
    hoist: Option<HoistMode>,

    /// Name that is never reported. May be repeated.
    #[arg(long = "allow", value_name = "NAME")]
    allow: Vec<String>,

    /// Print reports as JSON instead of diagnostics.
    #[arg(long)]
    json: bool,

    /// Colour the diagnostics.
    #[arg(long)]
    pretty: bool,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    tracing_config::init_tracing();
    let cli = Cli::parse();

    let exit_code = match run(&cli) {
        Ok(0) => 0,
        Ok(_) => 1,
        Err(err) => {
            print_error(&format!("{:?}", err));
            2
        }
    };
    process::exit(exit_code);
}

/// Check every input and return the total number of reports.
fn run(cli: &Cli) -> miette::Result<usize> {
    if cli.files.is_empty() {
        return Err(miette!("no scope tree files given"));
    }
    let options = resolve_options(cli)?;

    let mut trees = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        trees.push((path, load_tree(path)?));
    }

    let mut all = DiagnosticCollection::new();
    let mut json_reports = Vec::new();
    for (path, tree) in &trees {
        let file = path.display().to_string();
        let reports = check_no_shadow(tree, &options);
        tracing::debug!(file = %file, reports = reports.len(), "checked");

        let line_map = tree.source().map(LineMap::new);
        let diagnostics = render_all(&reports, &file, line_map.as_ref());
        for (report, diagnostic) in reports.iter().zip(diagnostics.diagnostics()) {
            if cli.json {
                json_reports.push(report_json(report, diagnostic));
            } else {
                print_diagnostic(diagnostic, cli.pretty);
            }
        }
        all.extend(diagnostics);
    }

    let total = all.error_count();
    if cli.json {
        let out = serde_json::to_string_pretty(&json_reports).into_diagnostic()?;
        println!("{}", out);
    } else if !all.is_empty() {
        let plural = if total == 1 { "" } else { "s" };
        if cli.pretty {
            println!("\n{}{}Found {} problem{}.{}", BOLD, RED, total, plural, RESET);
        } else {
            println!("\nFound {} problem{}.", total, plural);
        }
    }
    Ok(total)
}

/// Options file first, then command-line flags on top.
fn resolve_options(cli: &Cli) -> miette::Result<NoShadowOptions> {
    let mut options = match &cli.config {
        Some(path) => parse_options_file(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("invalid options file {}", path.display()))?,
        None => NoShadowOptions::default(),
    };
    if cli.builtin_globals {
        options.builtin_globals = true;
    }
    if let Some(hoist) = cli.hoist {
        options.hoist = hoist;
    }
    for name in &cli.allow {
        if !options.allow.contains(name) {
            options.allow.push(name.clone());
        }
    }
    Ok(options)
}

fn load_tree(path: &Path) -> miette::Result<ScopeTree> {
    let text = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot read {}", path.display()))?;
    ScopeTree::from_json(&text)
        .into_diagnostic()
        .wrap_err_with(|| format!("invalid scope tree {}", path.display()))
}

/// Line and column are `null` when the tree carried no source text.
fn report_json(report: &ShadowReport, diagnostic: &Diagnostic) -> serde_json::Value {
    serde_json::json!({
        "file": diagnostic.file,
        "code": diagnostic.code,
        "name": report.name,
        "line": diagnostic.start.map(|start| start.line + 1),
        "column": diagnostic.start.map(|start| start.character + 1),
        "innerRange": [report.inner_range.pos, report.inner_range.end],
        "outerRange": report.outer_range.map(|r| [r.pos, r.end]),
        "message": diagnostic.message_text,
    })
}

fn print_diagnostic(diag: &Diagnostic, use_color: bool) {
    if !use_color {
        println!("{}", diag);
        for related in &diag.related_information {
            println!("  {}", related);
        }
        return;
    }

    if let Some(ref file) = diag.file {
        print!("{}{}{}", CYAN, file, RESET);
        if let Some(start) = diag.start {
            print!("({},{})", start.line + 1, start.character + 1);
        }
        print!(": ");
    }
    println!(
        "{}{}{}{} {}SH{}{}: {}",
        BOLD, RED, diag.category, RESET, GRAY, diag.code, RESET, diag.message_text
    );
    for related in &diag.related_information {
        println!("  {}{}{}", GRAY, related, RESET);
    }
}

fn print_error(msg: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["shade", "--builtin-globals", "--hoist", "all", "--allow", "done", "tree.json"]);
        let options = resolve_options(&cli).unwrap();
        assert!(options.builtin_globals);
        assert_eq!(options.hoist, HoistMode::All);
        assert_eq!(options.allow, vec!["done".to_string()]);
        assert!(options.ignore_type_value_shadow);
    }

    #[test]
    fn test_bad_hoist_flag_rejected() {
        assert!(Cli::try_parse_from(["shade", "--hoist", "sometimes", "tree.json"]).is_err());
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let cli = Cli::parse_from(["shade", "--config", "/nonexistent/options.json", "tree.json"]);
        assert!(resolve_options(&cli).is_err());
    }

    #[test]
    fn test_no_files_is_an_error() {
        let cli = Cli::parse_from(["shade"]);
        assert!(run(&cli).is_err());
    }
}
