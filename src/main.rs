use std::env;
use std::fs;

use anyhow::{bail, Context};

fn main() -> anyhow::Result<()> {
    let Some(path) = env::args().nth(1) else {
        bail!("usage: sable <file>");
    };

    let source = fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    let nodes = sable::parse(&source).with_context(|| format!("failed to parse {path}"))?;

    println!("{}", serde_json::to_string_pretty(&nodes)?);

    Ok(())
}
