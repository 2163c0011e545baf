//! Source loading and format dispatch for the command-line front end.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::OutputFormat;
use crate::document::{Node, parse, to_markdown};
use crate::error::InputError;
use crate::perf;
use crate::render::{render, render_text};

/// Default wrap width for text output.
pub const DEFAULT_WIDTH: usize = 80;

/// Read markdown from `path`, or from standard input when `path` is
/// `None` or `-`.
///
/// # Errors
/// Returns an [`InputError`] if the file is missing or unreadable.
pub fn read_source(path: Option<&Path>) -> Result<String, InputError> {
    match path {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                return Err(InputError::NotFound(path.to_path_buf()));
            }
            std::fs::read_to_string(path).map_err(|source| InputError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(InputError::Stdin)?;
            Ok(source)
        }
    }
}

/// The file to watch, if watching was requested.
///
/// Called before any input is read, so a bad `--watch` fails without
/// consuming standard input.
///
/// # Errors
/// [`InputError::WatchNeedsFile`] when watching standard input.
pub fn watch_target(input: Option<&Path>, watch: bool) -> Result<Option<&Path>, InputError> {
    match input {
        _ if !watch => Ok(None),
        Some(path) if path != Path::new("-") => Ok(Some(path)),
        _ => Err(InputError::WatchNeedsFile),
    }
}

/// Parse `source` and render it in `format`.
///
/// # Errors
/// Only JSON serialization can fail.
pub fn convert(source: &str, format: OutputFormat, width: Option<usize>) -> Result<String> {
    let nodes = {
        let _scope = perf::scope("parse");
        parse(source)
    };
    let output = render_nodes(&nodes, format, width)?;
    tracing::debug!(
        format = format.as_str(),
        bytes_in = source.len(),
        bytes_out = output.len(),
        "converted"
    );
    Ok(output)
}

/// Render an already parsed tree in `format`.
///
/// # Errors
/// Only JSON serialization can fail.
pub fn render_nodes(nodes: &[Node], format: OutputFormat, width: Option<usize>) -> Result<String> {
    let _scope = perf::scope("render");
    Ok(match format {
        OutputFormat::Html => render(nodes),
        OutputFormat::Json => {
            serde_json::to_string_pretty(nodes).context("Failed to serialize node tree")?
        }
        OutputFormat::Markdown => to_markdown(nodes),
        OutputFormat::Text => render_text(nodes, width.unwrap_or(DEFAULT_WIDTH)),
    })
}
