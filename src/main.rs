//! Marknote - render markdown notes to HTML, JSON, text or markdown.
//!
//! # Usage
//!
//! ```bash
//! marknote notes.md
//! marknote --format text --width 60 notes.md
//! cat notes.md | marknote --format json
//! marknote --watch --output notes.html notes.md
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use marknote::config::{
    ConfigFlags, OutputFormat, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};
use marknote::convert::{convert, read_source, render_nodes, watch_target};
use marknote::perf;
use marknote::watcher::NoteWatcher;

/// Render markdown notes
#[derive(Parser, Debug)]
#[command(name = "marknote", version, about, long_about = None)]
struct Cli {
    /// Markdown file to render (standard input when omitted or `-`)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Wrap width for text output
    #[arg(long, value_name = "COLUMNS")]
    width: Option<usize>,

    /// Write output to a file instead of standard output
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Watch the file and re-render on change
    #[arg(short, long)]
    watch: bool,

    /// Print parse/render timings to stderr
    #[arg(long)]
    perf: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            watch: self.watch,
            perf: self.perf,
            format: self.format,
            width: self.width.filter(|w| *w > 0),
            output: self.output.clone(),
        }
    }
}

const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);
const WATCH_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    perf::set_enabled(effective.perf);

    let format = effective.format.unwrap_or(OutputFormat::Html);
    let input = cli.file.as_deref();
    let watch_path = watch_target(input, effective.watch)?;

    render_once(input, format, &effective)?;
    if let Some(path) = watch_path {
        watch(path, format, &effective)?;
    }
    Ok(())
}

fn render_once(input: Option<&Path>, format: OutputFormat, flags: &ConfigFlags) -> Result<()> {
    let _scope = perf::scope("total");
    let source = read_source(input)?;
    let output = convert(&source, format, flags.width)?;
    write_output(flags.output.as_deref(), &output)
}

fn write_output(path: Option<&Path>, output: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, format!("{output}\n"))
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{output}");
            Ok(())
        }
    }
}

fn watch(path: &Path, format: OutputFormat, flags: &ConfigFlags) -> Result<()> {
    let mut watcher = NoteWatcher::new(path, WATCH_DEBOUNCE)
        .with_context(|| format!("Failed to watch {}", path.display()))?;
    tracing::info!(file = %watcher.path().display(), "watching for changes");

    loop {
        std::thread::sleep(WATCH_POLL);
        match watcher.poll() {
            Ok(true) => {
                let output = render_nodes(watcher.tree(), format, flags.width)?;
                write_output(flags.output.as_deref(), &output)?;
            }
            Ok(false) => {}
            // A save can briefly remove the file; keep watching.
            Err(err) => tracing::warn!("reload failed: {err:#}"),
        }
    }
}
