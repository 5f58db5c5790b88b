use pgm_sketch::*;
use pretty_assertions::assert_eq;

/// Deterministic test image: horizontal bands, a gradient block and noise.
fn sample_image() -> Vec<u8> {
    let mut state = 0x2545_f491u32;
    let mut pixels = Vec::with_capacity(WIDTH * HEIGHT);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let value = match y {
                0..=49 => (y / 10 * 60) as u8,
                50..=99 => (x % 256) as u8,
                100..=149 => {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    (state & 0x3) as u8 * 85
                }
                _ => {
                    if x < 37 || x >= 170 {
                        255
                    } else {
                        0
                    }
                }
            };
            pixels.push(value);
        }
    }
    pixels
}

/// Scans the samples as one index stream, capping runs with the cursor,
/// and builds the expected sketch bytes without going through the encoder.
fn reference_stream(samples: &[u8]) -> Vec<u8> {
    let mut out = vec![0x81];
    let mut x = 0usize;
    let mut i = 0usize;
    while i < samples.len() {
        let mut run = 1usize;
        while i + 1 < samples.len() && samples[i] == samples[i + 1] && run + x < WIDTH {
            run += 1;
            i += 1;
        }
        out.extend_from_slice(&pack_colour(samples[i]));
        let mut rest = run;
        while rest >= 0x1F {
            out.push(0x1F);
            rest -= 0x1F;
        }
        if rest > 0 {
            out.push(rest as u8);
        }
        out.push(0x40);
        if x + run == WIDTH {
            x = 0;
            out.extend_from_slice(&[0x80, 0x84, 0x41, 0x81]);
        } else {
            x += run;
        }
        i += 1;
    }
    out
}

#[test]
fn test_round_trip_sample_image() {
    let image = sample_image();
    let sketch = sketch_encode_default(&image).expect("encoding should succeed");
    let raster = sketch_decode_default(&sketch).expect("decoding should succeed");
    assert_eq!(raster.width(), WIDTH);
    assert_eq!(raster.height(), HEIGHT);
    assert_eq!(raster.pixels(), &image[..]);
}

#[test]
fn test_round_trip_every_gray_level() {
    let image: Vec<u8> = (0..WIDTH * HEIGHT).map(|i| (i / 7 % 256) as u8).collect();
    let sketch = sketch_encode_default(&image).unwrap();
    let raster = sketch_decode_default(&sketch).unwrap();
    assert_eq!(raster.into_pixels(), image);
}

#[test]
fn test_stream_matches_flat_scan() {
    let image = sample_image();
    assert_eq!(sketch_encode_default(&image).unwrap(), reference_stream(&image));
}

#[test]
fn test_stream_starts_with_line_tool() {
    let sketch = sketch_encode_default(&sample_image()).unwrap();
    assert_eq!(sketch[0], Opcode::ToolLine.as_byte());
    // Every stream ends with a row wrap.
    assert!(sketch.ends_with(&[0x40, 0x80, 0x84, 0x41, 0x81]));
}

#[test]
fn test_runs_never_cross_rows() {
    let image = sample_image();
    let sketch = sketch_encode_default(&image).unwrap();

    let mut reader = ByteReader::new(&sketch);
    let mut x = 0usize;
    let mut wraps = 0usize;
    while let Some(token) = reader.peek_token() {
        match token {
            Token::ColourData(_) => {
                read_colour(&mut reader).unwrap();
            }
            Token::RunLength(_) => {
                let len = read_run_length(&mut reader).unwrap();
                assert!(len >= 1);
                assert!(x + len <= WIDTH, "run of {} at x={} crosses the row", len, x);
                x += len;
            }
            Token::Control(Opcode::TargetXReset) => {
                assert_eq!(x, WIDTH, "wrap emitted before the row was complete");
                x = 0;
                wraps += 1;
                reader.next_byte();
            }
            _ => {
                reader.next_byte();
            }
        }
    }
    assert_eq!(wraps, HEIGHT);
}

#[test]
fn test_uniform_rows_chunk_to_width() {
    let image = vec![77u8; WIDTH * HEIGHT];
    let sketch = sketch_encode_default(&image).unwrap();

    let mut row = vec![0x81];
    row.extend_from_slice(&pack_colour(77));
    row.extend_from_slice(&[0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x0E, 0x40, 0x80, 0x84, 0x41]);
    assert_eq!(&sketch[..row.len()], &row[..]);
}

#[test]
fn test_pgm_output_readable_by_image_crate() {
    let image = sample_image();
    let sketch = sketch_encode_default(&image).unwrap();
    let pgm = convert(Direction::Decode, &sketch, Geometry::default()).unwrap();
    assert!(pgm.starts_with(b"P5 200 200 255\n"));

    let decoded = image::load_from_memory_with_format(&pgm, image::ImageFormat::Pnm)
        .expect("PGM output should be readable")
        .to_luma8();
    assert_eq!(decoded.dimensions(), (WIDTH as u32, HEIGHT as u32));
    assert_eq!(decoded.into_raw(), image);
}

#[test]
fn test_convert_pgm_file_round_trip() {
    let image = sample_image();
    let mut pgm = b"P5\n200 200\n255\n".to_vec();
    pgm.extend_from_slice(&image);

    let sketch = convert(Direction::Encode, &pgm, Geometry::default()).unwrap();
    let back = convert(Direction::Decode, &sketch, Geometry::default()).unwrap();
    assert_eq!(&back[15..], &image[..]);
}

#[test]
fn test_convert_file_writes_swapped_extension() {
    let dir = std::env::temp_dir().join(format!("pgm_sketch_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("gradient.pgm");

    let image = sample_image();
    let mut pgm = b"P5 200 200 255\n".to_vec();
    pgm.extend_from_slice(&image);
    std::fs::write(&input, &pgm).unwrap();

    let sketch_path = convert_file(&input, None, Geometry::default()).unwrap();
    assert_eq!(sketch_path, dir.join("gradient.sk"));

    std::fs::remove_file(&input).unwrap();
    let raster_path = convert_file(&sketch_path, None, Geometry::default()).unwrap();
    assert_eq!(raster_path, input);
    assert_eq!(std::fs::read(&raster_path).unwrap(), pgm);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_convert_file_rejects_unknown_extension() {
    let result = convert_file(
        std::path::Path::new("picture.png"),
        None,
        Geometry::default(),
    );
    assert!(matches!(result, Err(SketchError::UnsupportedExtension(_))));
}

#[test]
fn test_truncated_raster_rejected() {
    let mut pgm = b"P5 200 200 255\n".to_vec();
    pgm.extend_from_slice(&[0u8; 1000]);
    assert!(matches!(
        convert(Direction::Encode, &pgm, Geometry::default()),
        Err(SketchError::DimensionMismatch {
            expected: 40_000,
            actual: 1000
        })
    ));
}

#[test]
fn test_truncated_sketch_rejected() {
    let sketch = sketch_encode_default(&sample_image()).unwrap();
    // Cut inside the first colour sequence.
    assert!(matches!(
        sketch_decode_default(&sketch[..4]),
        Err(SketchError::MalformedColourSequence { .. })
    ));
    // Cut right after the first run-length chunk.
    assert!(matches!(
        sketch_decode_default(&sketch[..9]),
        Err(SketchError::MalformedRunSequence { .. })
    ));
}

#[test]
fn test_stream_for_larger_raster_overflows() {
    let image = vec![1u8; 300 * 10];
    let geometry = Geometry::new(300, 10).unwrap();
    let sketch = sketch_encode(&image, geometry).unwrap();
    assert!(matches!(
        sketch_decode_default(&sketch),
        Err(SketchError::OutOfBoundsWrite { .. })
    ));
}

#[test]
fn test_small_geometry_round_trip() {
    let geometry = Geometry::new(5, 3).unwrap();
    let image = [1, 1, 2, 2, 2, 3, 3, 3, 3, 3, 4, 5, 4, 5, 4];
    let sketch = sketch_encode(&image, geometry).unwrap();
    let raster = sketch_decode(&sketch, geometry).unwrap();
    assert_eq!(raster.pixels(), &image[..]);
}
