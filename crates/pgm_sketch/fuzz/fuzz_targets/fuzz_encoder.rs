#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pgm_sketch::{sketch_encode, Geometry};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    pixels: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let geometry = match Geometry::new(input.width as usize, input.height as usize) {
        Ok(g) => g,
        Err(_) => return,
    };

    // Wrong sample counts must be rejected, not panic
    let _ = sketch_encode(&input.pixels, geometry);
});
