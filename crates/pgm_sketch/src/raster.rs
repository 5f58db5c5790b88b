use log::debug;

use crate::{Geometry, Result, SketchError};

/// A row-major 8-bit grayscale image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pixels: Vec<u8>,
    geometry: Geometry,
}

impl Raster {
    /// Wraps samples, checking they fill `geometry` exactly.
    pub fn new(pixels: Vec<u8>, geometry: Geometry) -> Result<Self> {
        geometry.check_samples(pixels.len())?;
        Ok(Self { pixels, geometry })
    }

    /// An all-black raster.
    pub fn blank(geometry: Geometry) -> Self {
        Self {
            pixels: vec![0; geometry.sample_count()],
            geometry,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.geometry.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.geometry.height()
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixels.get(y * self.width() + x).copied()
    }

    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height() {
            return None;
        }
        let start = y * self.width();
        self.pixels.get(start..start + self.width())
    }

    /// Fills `len` samples of row `y` starting at column `x`.
    pub(crate) fn fill_span(&mut self, x: usize, y: usize, len: usize, sample: u8) -> Result<()> {
        let width = self.width();
        if y >= self.height() || x.checked_add(len).map_or(true, |end| end > width) {
            return Err(SketchError::OutOfBoundsWrite { x, y, len });
        }
        let start = y * width + x;
        self.pixels[start..start + len].fill(sample);
        Ok(())
    }

    /// Parses a binary (`P5`) PGM file.
    ///
    /// The header fields are skipped over rather than trusted: the payload
    /// that follows must hold exactly `geometry.sample_count()` samples.
    ///
    /// # Example
    /// ```
    /// use pgm_sketch::{Geometry, Raster};
    ///
    /// let raster = Raster::from_pgm(b"P5 2 1 255\n\x10\x20", Geometry::new(2, 1)?)?;
    /// assert_eq!(raster.pixels(), &[0x10, 0x20]);
    /// # Ok::<(), pgm_sketch::SketchError>(())
    /// ```
    pub fn from_pgm(data: &[u8], geometry: Geometry) -> Result<Self> {
        let header = PgmHeader::parse(data)?;
        if header.width != geometry.width() || header.height != geometry.height() {
            debug!(
                "PGM header declares {}x{}, reading as {}x{}",
                header.width, header.height, geometry.width(), geometry.height()
            );
        }
        Self::new(header.payload.to_vec(), geometry)
    }

    /// Serializes as a binary PGM with a maxval of 255.
    pub fn to_pgm(&self) -> Vec<u8> {
        let header = format!("P5 {} {} 255\n", self.width(), self.height());
        let mut out = Vec::with_capacity(header.len() + self.pixels.len());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(&self.pixels);
        out
    }
}

struct PgmHeader<'a> {
    width: usize,
    height: usize,
    payload: &'a [u8],
}

impl<'a> PgmHeader<'a> {
    fn parse(data: &'a [u8]) -> Result<Self> {
        if !data.starts_with(b"P5") {
            return Err(SketchError::InvalidHeader("missing P5 magic".to_string()));
        }
        let mut idx = 2;
        let width = read_field(data, &mut idx, "width")?;
        let height = read_field(data, &mut idx, "height")?;
        read_field(data, &mut idx, "maxval")?;

        // Exactly one whitespace byte separates maxval from the samples.
        match data.get(idx) {
            Some(b) if b.is_ascii_whitespace() => idx += 1,
            _ => {
                return Err(SketchError::InvalidHeader(
                    "missing separator before pixel data".to_string(),
                ))
            }
        }

        Ok(PgmHeader {
            width,
            height,
            payload: &data[idx..],
        })
    }
}

/// Skips whitespace and `#` comments, then reads one decimal field.
fn read_field(data: &[u8], idx: &mut usize, name: &str) -> Result<usize> {
    loop {
        match data.get(*idx) {
            Some(b) if b.is_ascii_whitespace() => *idx += 1,
            Some(b'#') => {
                while let Some(&b) = data.get(*idx) {
                    *idx += 1;
                    if b == b'\n' {
                        break;
                    }
                }
            }
            _ => break,
        }
    }

    let start = *idx;
    let mut value = 0usize;
    while let Some(&b) = data.get(*idx) {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add((b - b'0') as usize);
        *idx += 1;
    }
    if *idx == start {
        return Err(SketchError::InvalidHeader(format!("missing {name}")));
    }
    Ok(value)
}
