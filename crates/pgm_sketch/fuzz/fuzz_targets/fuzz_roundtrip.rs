#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pgm_sketch::{sketch_decode, sketch_encode, Geometry};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    pixels: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let width = (input.width as usize).clamp(1, 64);
    let height = (input.height as usize).clamp(1, 64);

    let expected_size = width * height;
    if input.pixels.len() < expected_size {
        return;
    }
    let pixels = &input.pixels[..expected_size];
    let geometry = Geometry::new(width, height).expect("clamped dimensions are valid");

    let sketch = sketch_encode(pixels, geometry).expect("valid raster must encode");
    let decoded = sketch_decode(&sketch, geometry).expect("encoder output must decode");

    assert_eq!(decoded.pixels(), pixels, "round trip must be lossless");
});
