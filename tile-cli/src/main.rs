//! tilec - tile compiler
//! Command-line interface for compiling tile descriptions to configuration words

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tile_core::encoder::assignments;
use tile_core::{
    compile_with_config, parse_expr, Compilation, CompiledModule, CompilerConfig, ModuleError,
    OutputFormat, TruthTable,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "tilec")]
#[command(author, version)]
#[command(about = "Compile reconfigurable logic tile descriptions", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every module in a file to its configuration word
    Compile {
        /// Input file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Report format (defaults to the config file, then text)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Configuration file (defaults to tilec.toml in this or a parent directory)
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Stop at the first module that fails validation
        #[arg(long)]
        fail_fast: bool,
    },

    /// Parse and validate without printing configuration words
    Check {
        /// Input file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Configuration file
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the truth table of a single expression, e.g. "w0 & ~n1"
    TruthTable {
        #[arg(value_name = "EXPR")]
        expr: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Compile {
            input,
            output,
            format,
            config,
            fail_fast,
        } => compile_command(&input, output.as_deref(), format, config.as_deref(), fail_fast),

        Commands::Check { input, config } => check_command(&input, config.as_deref()),

        Commands::TruthTable { expr } => truth_table_command(&expr),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "tilec=debug,tile_core=debug"
    } else {
        "tilec=info,tile_core=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ============================================================================
// Configuration
// ============================================================================

fn load_config(explicit: Option<&Path>) -> Result<CompilerConfig> {
    if let Some(path) = explicit {
        return Ok(CompilerConfig::from_file(path)?);
    }

    let current_dir = std::env::current_dir()?;
    match CompilerConfig::find_and_load(&current_dir)? {
        Some((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        None => Ok(CompilerConfig::default()),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn compile_command(
    input: &Path,
    output: Option<&Path>,
    format: Option<FormatArg>,
    config_path: Option<&Path>,
    fail_fast: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if fail_fast {
        config.compile.keep_going = false;
    }
    if let Some(format) = format {
        config.output.format = format.into();
    }

    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let compilation = compile_with_config(&source, &config)?;

    for err in compilation.errors() {
        print_diagnostic(input, err);
    }

    let report = match config.output.format {
        OutputFormat::Text => render_text(&compilation),
        OutputFormat::Json => render_json(&compilation)?,
    };

    if let Some(output_path) = output {
        fs::write(output_path, &report)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        eprintln!(
            "{} {}",
            "   Created".green().bold(),
            output_path.display().to_string().cyan()
        );
    } else {
        print!("{}", report);
    }

    finish(&compilation)
}

fn check_command(input: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    println!(
        "{} {}",
        "Checking".green().bold(),
        input.display().to_string().cyan()
    );

    let compilation = compile_with_config(&source, &config)?;

    for outcome in &compilation.modules {
        match outcome {
            Ok(module) => println!("{} module '{}'", "        ok".green().bold(), module.name),
            Err(err) => print_diagnostic(input, err),
        }
    }

    finish(&compilation)
}

fn truth_table_command(source: &str) -> Result<()> {
    let expr = parse_expr(source)?;
    let table = TruthTable::of(&expr);

    println!("{}", expr.to_string().bold());
    println!(" W N E | out");
    for (i, [w, n, e]) in assignments().enumerate() {
        println!(
            " {} {} {} |  {}",
            w as u8,
            n as u8,
            e as u8,
            table.get(i) as u8
        );
    }
    println!("{} {}", "enumeration:".bold(), table.enumeration());
    println!("{} {:08b}", "        row:".bold(), table.row());

    Ok(())
}

fn finish(compilation: &Compilation) -> Result<()> {
    let failed = compilation.errors().count();
    if failed > 0 {
        bail!(
            "{} of {} module(s) failed to compile",
            failed,
            compilation.modules.len()
        );
    }
    Ok(())
}

// ============================================================================
// Reports
// ============================================================================

fn print_diagnostic(input: &Path, err: &ModuleError) {
    eprintln!("{} {}", "error:".red().bold(), err.kind);
    let location = match err.function {
        Some(index) => format!(
            "{}:{} (module '{}', function {})",
            input.display(),
            err.line,
            err.module,
            index
        ),
        None => format!("{}:{} (module '{}')", input.display(), err.line, err.module),
    };
    eprintln!("  {} {}", "-->".blue().bold(), location);
}

/// `Module <name>:` followed by the four rows, per compiled module
fn render_text(compilation: &Compilation) -> String {
    compilation
        .compiled()
        .map(|module| format!("Module {}:\n{}\n", module.name, module.word))
        .collect()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    modules: Vec<&'a CompiledModule>,
    errors: Vec<JsonError<'a>>,
    constructions: &'a [String],
}

#[derive(Serialize)]
struct JsonError<'a> {
    module: &'a str,
    line: usize,
    function: Option<usize>,
    message: String,
}

fn render_json(compilation: &Compilation) -> Result<String> {
    let report = JsonReport {
        modules: compilation.compiled().collect(),
        errors: compilation
            .errors()
            .map(|err| JsonError {
                module: &err.module,
                line: err.line,
                function: err.function,
                message: err.kind.to_string(),
            })
            .collect(),
        constructions: &compilation.constructions,
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}
