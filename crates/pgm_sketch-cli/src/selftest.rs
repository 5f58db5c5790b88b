//! Checks run when the converter is started without a file.

use pgm_sketch::{
    pack_colour, raster_path_for, read_colour, read_run_length, sketch_path_for, ByteReader,
};
use std::path::Path;

/// Line number of the first failing check.
type Check = Result<(), u32>;

fn check(line: u32, ok: bool) -> Check {
    if ok {
        Ok(())
    } else {
        Err(line)
    }
}

fn raster_names() -> Check {
    check(
        line!(),
        raster_path_for(Path::new("myimage.sk")) == Path::new("myimage.pgm"),
    )?;
    check(
        line!(),
        raster_path_for(Path::new("bands.sk")) != Path::new("bands.sk"),
    )
}

fn sketch_names() -> Check {
    check(
        line!(),
        sketch_path_for(Path::new("myimage.pgm")) == Path::new("myimage.sk"),
    )?;
    check(
        line!(),
        sketch_path_for(Path::new("bands.pgm")) != Path::new("bands.pgm"),
    )
}

/// Decodes the colour following the tool byte at the start of `data`.
fn colour_after_tool(data: &[u8]) -> Option<u8> {
    let mut reader = ByteReader::new(data);
    reader.next_byte()?;
    read_colour(&mut reader).ok()
}

fn colours() -> Check {
    let white: [u8; 8] = [0x81, 0xC3, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x83];
    check(line!(), colour_after_tool(&white) == Some(255))?;
    let black: [u8; 8] = [0x81, 0xC0, 0xC0, 0xC0, 0xC0, 0xC3, 0xFF, 0x83];
    check(line!(), colour_after_tool(&black) == Some(0))?;

    let inverse = (0..=255u8).all(|s| {
        let mut packed = vec![0x81];
        packed.extend_from_slice(&pack_colour(s));
        colour_after_tool(&packed) == Some(s)
    });
    check(line!(), inverse)
}

fn run_lengths() -> Check {
    let full_row: [u8; 8] = [0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x0E, 0x40];
    let len = read_run_length(&mut ByteReader::new(&full_row)).ok();
    check(line!(), len == Some(200))?;

    let short: [u8; 3] = [0x1F, 0x01, 0x40];
    let len = read_run_length(&mut ByteReader::new(&short)).ok();
    check(line!(), len == Some(32))
}

/// Runs every check, reporting the first failure.
pub fn run() -> bool {
    let suites: [fn() -> Check; 4] = [raster_names, sketch_names, colours, run_lengths];
    for suite in suites {
        if let Err(line) = suite() {
            println!("The test on line {} fails.", line);
            return false;
        }
    }
    println!("All tests pass.");
    true
}
