//! Info command - print image dimensions and format

use crate::InfoArgs;
use crate::io::read_png;
use anyhow::Result;

pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        let loaded = read_png(path)?;
        let image = &loaded.image;
        println!("{}", path.display());
        println!("  size:      {}x{}", image.width(), image.height());
        println!("  format:    {:?} {:?}-bit", loaded.color_type, loaded.bit_depth);
        println!("  channels:  {}", image.channels());
        println!(
            "  storage:   {}",
            match (image.has_float(), image.has_byte()) {
                (true, true) => "float + byte",
                (true, false) => "float",
                (false, true) => "byte",
                (false, false) => "none",
            }
        );
        if verbose > 0 {
            println!("  pixels:    {}", image.pixel_count());
        }
    }
    Ok(())
}
