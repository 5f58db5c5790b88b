#![no_main]

use libfuzzer_sys::fuzz_target;
use pgm_sketch::{sketch_decode_default, Geometry, Raster};

fuzz_target!(|data: &[u8]| {
    // Neither parser may panic, whatever the input
    let _ = sketch_decode_default(data);
    let _ = Raster::from_pgm(data, Geometry::default());
});
