//! Mipmap command - write every level of a mipmap chain

use crate::MipmapArgs;
use crate::io::{read_png, write_png};
use anyhow::{Context, Result};
use imbuf_texture::MipmapChain;
use std::path::{Path, PathBuf};

pub fn run(args: MipmapArgs, verbose: u8) -> Result<()> {
    if verbose > 0 {
        println!("Loading: {}", args.input.display());
    }
    let loaded = read_png(&args.input)?;

    let chain = MipmapChain::build(&loaded.image, args.levels)
        .with_context(|| format!("Failed to build mipmap chain for {}", args.input.display()))?;

    for (i, level) in chain.levels().iter().enumerate() {
        let path = level_path(&args.output, i);
        write_png(&path, level)?;
        if verbose > 0 {
            println!("Level {}: {}x{} -> {}", i, level.width(), level.height(), path.display());
        }
    }
    Ok(())
}

/// `PREFIX_<level>.png` next to the prefix.
pub fn level_path(prefix: &Path, level: usize) -> PathBuf {
    let name = prefix
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    prefix.with_file_name(format!("{}_{}.png", name, level))
}
