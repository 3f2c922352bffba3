//! symdoc: render documentation comments into HTML.
//!
//! Every input holds one raw doc comment. Inputs are rendered in order as
//! one group of sibling declarations, so a `ditto` comment repeats the one
//! before it.
//!
//! - **stdin mode**: `symdoc < comment.txt`
//! - **file mode**: `symdoc -m std.ddoc --symbol std.io.File --module-len 2 docs/File*.txt`

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use symdoc::markup::{self, MacroMarkup};
use symdoc::render::{nav, CommentRenderer, Contract, Statement};
use symdoc::search;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "symdoc",
    version,
    about = "Render structured doc comments into HTML fragments and pages"
)]
struct Cli {
    /// Comment files (glob patterns supported). If omitted, reads one comment from stdin.
    files: Vec<String>,

    /// Output format: html (default), summary
    #[arg(short = 'f', long, default_value = "html")]
    format: String,

    /// Macro definition file with `NAME = value` lines
    #[arg(short = 'm', long)]
    macros: Option<PathBuf>,

    /// Dotted path of the documented symbol. Wraps the output in a full page.
    #[arg(long)]
    symbol: Option<String>,

    /// Number of leading symbol components that name the module.
    /// Defaults to the whole symbol (the module's own page).
    #[arg(long)]
    module_len: Option<usize>,

    /// Append the symbol's record to this search index file
    #[arg(long)]
    search_index: Option<PathBuf>,

    /// Output path of the module's page group, used for search records.
    /// Defaults to the module components joined by `/`.
    #[arg(long)]
    base_path: Option<String>,

    /// Extra HTML shown above the table of contents
    #[arg(long)]
    toc_additional: Option<String>,

    /// Precondition code shown in the contract block
    #[arg(long = "in-contract")]
    in_contract: Option<String>,

    /// Postcondition code shown in the contract block
    #[arg(long = "out-contract")]
    out_contract: Option<String>,

    /// Log rendering decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy)]
enum Format {
    Html,
    Summary,
}

/// The documented symbol split into module and declaration components.
struct Symbol {
    stack: Vec<String>,
    module_len: usize,
}

impl Symbol {
    fn module_name(&self) -> String {
        self.stack[..self.module_len].join(".")
    }

    fn is_module_page(&self) -> bool {
        self.module_len == self.stack.len()
    }

    /// Directories between the output root and this symbol's page.
    fn depth(&self) -> usize {
        if self.is_module_page() {
            self.module_len.saturating_sub(1)
        } else {
            self.module_len
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = parse_format(&cli.format)?;
    let symbol = resolve_symbol(&cli)?;
    if cli.search_index.is_some() && symbol.is_none() {
        bail!("--search-index requires --symbol");
    }

    let macros = match cli.macros {
        Some(ref path) => load_macros(path)?,
        None => HashMap::new(),
    };
    let renderer = CommentRenderer::new(MacroMarkup::new(macros));

    let inputs = read_inputs(&cli.files)?;
    let contract = Contract {
        precondition: cli.in_contract.as_ref().map(|s| s as &dyn Statement),
        postcondition: cli.out_contract.as_ref().map(|s| s as &dyn Statement),
    };
    let contract = (!contract.is_empty()).then_some(contract);

    let mut body = String::new();
    let mut summaries = Vec::new();
    let mut siblings = Vec::new();
    for (name, raw) in &inputs {
        tracing::debug!(input = %name, "rendering comment");
        let summary = renderer.render(
            &mut body,
            raw,
            Some(&mut siblings),
            contract.as_ref(),
            &[],
        );
        summaries.push(summary);
    }

    if let (Some(path), Some(symbol)) = (&cli.search_index, &symbol) {
        append_search_entry(path, cli.base_path.as_deref(), symbol)?;
    }

    match format {
        Format::Summary => {
            for summary in &summaries {
                println!("{}", one_line(summary));
            }
        }
        Format::Html => match symbol {
            Some(ref symbol) => print!("{}", render_page(symbol, &body, cli.toc_additional.as_deref())),
            None => print!("{}", body),
        },
    }

    Ok(())
}

/// Join a multi-line summary paragraph so each input prints on one line.
fn one_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `--verbose` enables debug output, otherwise `RUST_LOG` or warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_format(format: &str) -> Result<Format> {
    match format {
        "html" => Ok(Format::Html),
        "summary" => Ok(Format::Summary),
        _ => bail!("unknown format: {}. Use html or summary", format),
    }
}

fn resolve_symbol(cli: &Cli) -> Result<Option<Symbol>> {
    let Some(ref dotted) = cli.symbol else {
        if cli.module_len.is_some() {
            bail!("--module-len requires --symbol");
        }
        return Ok(None);
    };

    let stack: Vec<String> = dotted.split('.').map(str::to_string).collect();
    if stack.iter().any(String::is_empty) {
        bail!("invalid symbol path: {}", dotted);
    }

    let module_len = cli.module_len.unwrap_or(stack.len());
    if module_len > stack.len() {
        bail!(
            "--module-len {} is longer than symbol {} ({} components)",
            module_len,
            dotted,
            stack.len()
        );
    }

    Ok(Some(Symbol { stack, module_len }))
}

fn load_macros(path: &Path) -> Result<HashMap<String, String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read macro file: {}", path.display()))?;
    Ok(markup::parse_definitions(&text))
}

/// Read every input as `(display name, raw comment)`.
fn read_inputs(patterns: &[String]) -> Result<Vec<(String, String)>> {
    if patterns.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return Ok(vec![("<stdin>".to_string(), input)]);
    }

    let mut inputs = Vec::new();
    for path in expand_globs(patterns)? {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        inputs.push((path.display().to_string(), content));
    }
    Ok(inputs)
}

/// Expand glob patterns into a list of real file paths.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        let mut matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        // Sort for deterministic sibling order
        matches.sort();
        files.extend(matches);
    }
    dedup_keep_order(&mut files);
    Ok(files)
}

/// Drop repeated paths, keeping the first occurrence.
fn dedup_keep_order(files: &mut Vec<PathBuf>) {
    let mut seen = std::collections::HashSet::new();
    files.retain(|f| seen.insert(f.clone()));
}

fn append_search_entry(path: &Path, base_path: Option<&str>, symbol: &Symbol) -> Result<()> {
    let base = match base_path {
        Some(base) => base.to_string(),
        None => symbol.stack[..symbol.module_len].join("/"),
    };
    let mut index = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open search index: {}", path.display()))?;
    search::write_search_entry(&mut index, &base, symbol.module_len, &symbol.stack)
}

/// Wrap rendered comments in a full page for `symbol`.
fn render_page(symbol: &Symbol, body: &str, toc_additional: Option<&str>) -> String {
    let mut page = String::new();
    nav::write_header(&mut page, &symbol.stack.join("."), symbol.depth());
    nav::write_toc(&mut page, &[], &symbol.module_name(), toc_additional);
    nav::write_symbol_breadcrumbs(&mut page, symbol.module_len, &symbol.stack);
    page.push_str(body);
    nav::write_footer(&mut page);
    page
}
