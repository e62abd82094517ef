// SPDX-License-Identifier: MIT
//
// ditto-tones — one color in, a full shade scale out.
//
// This binary wires the two crates together:
//
//   ditto-color  → color text parsing, OKLCH math, CSS formatting
//   ditto-engine → ramp registry, matching, blending, scale building
//
// A run is a straight pipeline:
//
//   --ramps → registry (built-in set or JSON file)
//   COLOR   → DittoTones::generate → GenerateResult
//   result  → CSS custom properties (default) or JSON (--json) → stdout
//
// Diagnostics go to stderr through the `log` facade; -v raises the level.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use log::{LevelFilter, info};

use ditto_engine::export::sanitize_name;
use ditto_engine::{ColorFormat, DittoTones, RampRegistry, builtin, load, to_css};

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "ditto-tones", version, about, long_about = None)]
struct Cli {
    /// Input color: hex, rgb(), hsl(), oklch(), oklab() or a CSS name.
    #[arg(required_unless_present = "list")]
    color: Option<String>,

    /// Reference ramps: a built-in set name or a path to a JSON ramp table.
    #[arg(short, long, default_value = "tailwind-v3")]
    ramps: String,

    /// Color notation for the CSS output (oklch, oklab, hex).
    #[arg(short, long, default_value = "oklch")]
    format: ColorFormat,

    /// Custom property prefix, e.g. `brand` → `--brand-500`.
    #[arg(short, long, default_value = "brand")]
    name: String,

    /// Print the full result as JSON instead of CSS.
    #[arg(long)]
    json: bool,

    /// List the ramps in the selected set and exit.
    #[arg(long)]
    list: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

// ─── Logging ────────────────────────────────────────────────────────────────

const fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {}] {message}", record.level(), record.target()));
        })
        .level(level_for(verbose))
        .chain(io::stderr())
        .apply()
        .context("failed to install logger")
}

// ─── Pipeline ───────────────────────────────────────────────────────────────

/// Resolve `--ramps`: built-in set names win over file paths.
fn load_ramps(spec: &str) -> Result<RampRegistry> {
    if let Some(registry) = builtin::ramp_set(spec) {
        info!("using built-in ramp set `{spec}`");
        return Ok(registry);
    }

    let path = Path::new(spec);
    if !path.exists() {
        bail!(
            "no built-in ramp set or file named `{spec}` (built-in sets: {})",
            builtin::names().join(", ")
        );
    }

    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let registry = load::from_json(&text).with_context(|| format!("failed to load ramps from {}", path.display()))?;
    info!("loaded {} ramps from {}", registry.len(), path.display());
    Ok(registry)
}

/// Ramp names one per line, the neutral ramp marked, then the shade keys.
fn render_list(registry: &RampRegistry) -> String {
    let neutral = registry.neutral_ramp_name();
    let mut out: Vec<String> = registry
        .ramp_names()
        .map(|name| {
            if name == neutral {
                format!("{name} (neutral)")
            } else {
                name.to_owned()
            }
        })
        .collect();
    out.push(format!("shades: {}", registry.shades().join(" ")));
    out.join("\n")
}

/// Everything `main` prints to stdout for one invocation.
fn render(cli: &Cli) -> Result<String> {
    let registry = load_ramps(&cli.ramps)?;
    if cli.list {
        return Ok(render_list(&registry));
    }

    let Some(color) = cli.color.as_deref() else {
        bail!("a color is required");
    };

    let ditto = DittoTones::new(registry);
    let result = ditto.generate(color)?;
    info!(
        "{} @ shade {} from {}",
        result.method,
        result.matched_shade,
        result.sources.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(" + "),
    );

    if cli.json {
        return serde_json::to_string_pretty(&result).context("failed to serialize result");
    }

    let name = sanitize_name(&cli.name);
    if name.is_empty() {
        bail!("`{}` has no usable characters for a property name", cli.name);
    }
    Ok(to_css(&result, &name, cli.format))
}

fn run(cli: &Cli) -> Result<()> {
    init_logging(cli.verbose)?;
    let output = render(cli)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}").context("failed to write output")?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("ditto-tones: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
