//! Helpers shared by the tablegrid command line tools.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber. `RUST_LOG` wins over `--debug`.
pub fn init_logging(debug: bool) {
    let default_level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Open `path` for writing, or stdout for "-".
pub fn open_output(path: &str) -> Result<Box<dyn Write>> {
    if path == "-" {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    let file =
        File::create(path).with_context(|| format!("failed to create output file {path}"))?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Parse "x0,y0,x1,y1" into four coordinates.
pub fn parse_bbox(s: &str) -> Result<(f64, f64, f64, f64)> {
    let parts: Vec<f64> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.parse::<f64>()
                .with_context(|| format!("invalid coordinate {p:?} in bbox"))
        })
        .collect::<Result<_>>()?;
    match parts.as_slice() {
        &[x0, y0, x1, y1] => Ok((x0, y0, x1, y1)),
        _ => bail!("bbox needs 4 coordinates (x0,y0,x1,y1), got {}", parts.len()),
    }
}
