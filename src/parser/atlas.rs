use core::fmt::Debug;
use std::{fs::File, io::Read, marker::PhantomData, path::Path};

use png::{BitDepth, ColorType, Transformations};
use thiserror::Error;

use crate::{ATLAS_HEIGHT, ATLAS_WIDTH, FOREGROUND};

/// An image that passed the glyph atlas geometry checks.
pub type Atlas = IndexedImage<Validated>;
/// A freshly decoded image, nothing about its layout is known yet.
pub type Decoded = IndexedImage<Unchecked>;

/// Palette-indexed pixels, one `u8` index per pixel regardless of the bit depth of the source.
#[allow(private_bounds)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage<T: AtlasValidation> {
    width: u32,
    height: u32,
    palette: Vec<[u8; 3]>,
    pixels: Vec<u8>,

    _validation: PhantomData<T>,
}

impl Decoded {
    /// Builds an image from raw parts. `pixels` is row-major and must hold exactly `width * height` indices.
    pub fn new(
        width: u32,
        height: u32,
        palette: Vec<[u8; 3]>,
        pixels: Vec<u8>,
    ) -> Result<Self, AtlasError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(AtlasError::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            palette,
            pixels,
            _validation: PhantomData,
        })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AtlasError> {
        let path = path.as_ref();
        debug!("Opening {}", path.display());

        Self::decode(File::open(path)?)
    }

    /// Decodes an indexed PNG. Palette indices are kept as they are, never expanded to colours.
    pub fn decode<R: Read>(reader: R) -> Result<Self, AtlasError> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(Transformations::IDENTITY);

        let mut reader = decoder.read_info()?;

        let info = reader.info();
        if info.color_type != ColorType::Indexed {
            return Err(AtlasError::NotIndexed(info.color_type));
        }

        let palette = match &info.palette {
            Some(palette) => Self::parse_palette(palette)?,
            None => return Err(AtlasError::MissingPalette),
        };

        let mut buf = vec![0; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut buf)?;

        let depth = match frame.bit_depth {
            BitDepth::One => 1,
            BitDepth::Two => 2,
            BitDepth::Four => 4,
            BitDepth::Eight => 8,
            BitDepth::Sixteen => return Err(AtlasError::BitDepth(frame.bit_depth)),
        };

        let pixels = Self::unpack_indices(
            &buf[..frame.buffer_size()],
            frame.width,
            frame.height,
            depth,
            frame.line_size,
        );

        Self::new(frame.width, frame.height, palette, pixels)
    }

    fn parse_palette(input: &[u8]) -> Result<Vec<[u8; 3]>, AtlasError> {
        if input.len() % 3 != 0 {
            return Err(AtlasError::MalformedPalette(input.len()));
        }

        Ok(input
            .chunks_exact(3)
            .enumerate()
            .map(|(i, chunk)| {
                let entry = [chunk[0], chunk[1], chunk[2]];
                debug!("Palette entry {i}: {entry:?}");
                entry
            })
            .collect())
    }

    /// Spreads packed scanlines into one index per pixel. Sub-byte depths are packed MSB first.
    fn unpack_indices(data: &[u8], width: u32, height: u32, depth: u8, line_size: usize) -> Vec<u8> {
        let depth = depth as usize;
        let mask = ((1u16 << depth) - 1) as u8;

        data.chunks(line_size)
            .take(height as usize)
            .flat_map(|line| {
                (0..width as usize).map(move |x| {
                    let bit = x * depth;
                    let shift = 8 - depth - bit % 8;
                    (line[bit / 8] >> shift) & mask
                })
            })
            .collect()
    }

    /// Checks the fixed atlas geometry.
    pub fn validate(self) -> Result<Atlas, AtlasError> {
        if self.width != ATLAS_WIDTH || self.height != ATLAS_HEIGHT {
            return Err(AtlasError::Dimensions {
                width: self.width,
                height: self.height,
            });
        }

        Ok(Atlas {
            width: self.width,
            height: self.height,
            palette: self.palette,
            pixels: self.pixels,
            _validation: PhantomData,
        })
    }
}

#[allow(private_bounds)]
impl<T: AtlasValidation> IndexedImage<T> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn palette(&self) -> &[[u8; 3]] {
        &self.palette
    }

    /// Returns the palette index of the pixel, [`None`] if out of bounds.
    pub fn index(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Position of the first palette entry equal to [`FOREGROUND`].
    ///
    /// Entries past index 255 can't be referenced by any pixel and are never returned.
    pub fn foreground_index(&self) -> Option<u8> {
        let index = self
            .palette
            .iter()
            .position(|entry| *entry == FOREGROUND)
            .and_then(|i| u8::try_from(i).ok());

        if let Some(index) = index {
            info!("Foreground palette index: {index}");
        }

        index
    }
}

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Could not read the image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode the PNG: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("Expected an indexed colour image, found {0:?}")]
    NotIndexed(ColorType),

    #[error("Indexed image has no palette")]
    MissingPalette,

    #[error("Palette is {0} bytes long, which is not a whole number of RGB entries")]
    MalformedPalette(usize),

    #[error("Unsupported bit depth {0:?} for an indexed image")]
    BitDepth(BitDepth),

    #[error("Atlas must be {}x{} pixels, found {width}x{height}", ATLAS_WIDTH, ATLAS_HEIGHT)]
    Dimensions { width: u32, height: u32 },

    #[error("Expected {expected} pixels, found {actual}")]
    PixelCount { expected: usize, actual: usize },
}

trait AtlasValidation: Clone + PartialEq + Eq + Debug {}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validated;
impl AtlasValidation for Validated {}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Unchecked;
impl AtlasValidation for Unchecked {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{encode_png, BLACK_WHITE};

    #[test_case(128, 128 => true; "exact")]
    #[test_case(128, 64 => false; "too short")]
    #[test_case(64, 128 => false; "too narrow")]
    #[test_case(256, 256 => false; "too large")]
    fn validate(width: u32, height: u32) -> bool {
        let pixels = vec![0; (width * height) as usize];
        let image = Decoded::new(width, height, BLACK_WHITE.to_vec(), pixels).unwrap();

        match image.validate() {
            Ok(_) => true,
            Err(AtlasError::Dimensions { width: w, height: h }) => {
                assert_eq!((w, h), (width, height));
                false
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test_case(&[[0, 0, 0], [255, 255, 255]] => Some(1); "second entry")]
    #[test_case(&[[255, 255, 255], [0, 0, 0], [255, 255, 255]] => Some(0); "first match wins")]
    #[test_case(&[[0, 0, 0], [255, 255, 254]] => None; "almost white")]
    #[test_case(&[] => None; "empty palette")]
    fn foreground_index(palette: &[[u8; 3]]) -> Option<u8> {
        Decoded::new(1, 1, palette.to_vec(), vec![0])
            .unwrap()
            .foreground_index()
    }

    #[test]
    fn foreground_index_past_u8_range() {
        let mut palette = vec![[0, 0, 0]; 256];
        palette.push(FOREGROUND);

        let image = Decoded::new(1, 1, palette, vec![0]).unwrap();

        assert_eq!(image.foreground_index(), None);
    }

    #[test]
    fn new_rejects_wrong_pixel_count() {
        let err = Decoded::new(2, 2, vec![], vec![0; 3]).unwrap_err();

        assert!(matches!(
            err,
            AtlasError::PixelCount {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test_case(0, 0 => Some(0))]
    #[test_case(1, 0 => Some(1))]
    #[test_case(0, 1 => Some(2))]
    #[test_case(2, 0 => None; "x out of bounds")]
    #[test_case(0, 2 => None; "y out of bounds")]
    fn index(x: u32, y: u32) -> Option<u8> {
        Decoded::new(2, 2, vec![], vec![0, 1, 2, 3])
            .unwrap()
            .index(x, y)
    }

    #[test]
    fn decode_eight_bit() {
        let pixels = [0, 1, 1, 0, 2, 0];
        let palette = [[0, 0, 0], [255, 255, 255], [255, 0, 0]];
        let data = encode_png(3, 2, &palette, &pixels);

        let image = Decoded::decode(data.as_slice()).unwrap();

        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.palette(), &palette);
        assert_eq!(image.pixels, pixels);
    }

    #[test]
    fn decode_one_bit() {
        // 10 pixels wide, so each scanline carries padding bits
        let lines: [[u8; 2]; 2] = [[0b1000_0001, 0b0100_0000], [0b0000_0000, 0b1100_0000]];

        let mut data = Vec::new();
        let mut encoder = png::Encoder::new(&mut data, 10, 2);
        encoder.set_color(ColorType::Indexed);
        encoder.set_depth(BitDepth::One);
        encoder.set_palette(BLACK_WHITE.concat());
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&lines.concat()).unwrap();
        writer.finish().unwrap();

        let image = Decoded::decode(data.as_slice()).unwrap();

        assert_eq!(
            image.pixels,
            [
                1, 0, 0, 0, 0, 0, 0, 1, 0, 1, //
                0, 0, 0, 0, 0, 0, 0, 0, 1, 1,
            ]
        );
    }

    #[test_case(&[0x12, 0x34], 4, 4 => vec![1, 2, 3, 4]; "nibbles")]
    #[test_case(&[0b11_10_01_00], 4, 2 => vec![3, 2, 1, 0]; "two bit")]
    #[test_case(&[7, 8, 9], 3, 8 => vec![7, 8, 9]; "whole bytes")]
    fn unpack_indices(data: &[u8], width: u32, depth: u8) -> Vec<u8> {
        Decoded::unpack_indices(data, width, 1, depth, data.len())
    }

    #[test]
    fn decode_rejects_true_colour() {
        let mut data = Vec::new();
        let mut encoder = png::Encoder::new(&mut data, 1, 1);
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[255, 255, 255]).unwrap();
        writer.finish().unwrap();

        let err = Decoded::decode(data.as_slice()).unwrap_err();

        assert!(matches!(err, AtlasError::NotIndexed(ColorType::Rgb)));
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = Decoded::decode(&b"definitely not a png"[..]).unwrap_err();

        assert!(matches!(err, AtlasError::Decode(_)));
    }

    #[test_case(&[0, 0, 0, 255] => true; "one byte over")]
    #[test_case(&[0, 0, 0, 255, 255, 255] => false; "two entries")]
    fn parse_palette_is_malformed(input: &[u8]) -> bool {
        matches!(
            Decoded::parse_palette(input),
            Err(AtlasError::MalformedPalette(_))
        )
    }
}
