use crate::printer::LINE_BYTES;

use std::mem;

use image::GrayImage;

/// Number of pins on the print head
pub const LINE_DOTS: u32 = (LINE_BYTES * 8) as u32;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("The raster data is not a whole number of lines ({0} bytes).")]
    PartialLine(usize),
    #[error("The image is too wide for the print head ({0} instead of at most 128 pixels).")]
    ImageTooWide(u32),
}

struct BitWriter<'a> {
    output: &'a mut [u8],
    bit_idx: usize,
}

impl<'a> BitWriter<'a> {
    pub fn new(output: &'a mut [u8]) -> Self {
        Self { output, bit_idx: 7 }
    }

    pub fn write_bit(&mut self, bit: bool) {
        self.output[0] |= (bit as u8) << self.bit_idx;

        if self.bit_idx == 0 {
            // Borrow checker shenanigans ...
            let output = mem::take(&mut self.output);
            self.output = &mut output[1..];

            self.bit_idx = 7;
        } else {
            self.bit_idx -= 1;
        }
    }
}

/// Raster lines, 16 bytes each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raster {
    data: Vec<u8>,
}

impl Raster {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, Error> {
        if data.len() % LINE_BYTES != 0 {
            return Err(Error::PartialLine(data.len()));
        }

        Ok(Self { data })
    }

    /// `line_count` lines where every byte is `byte`.
    pub fn filled(byte: u8, line_count: u32) -> Self {
        Self {
            data: vec![byte; line_count as usize * LINE_BYTES],
        }
    }

    /// A test pattern of nested chevrons.
    /// Every line is two runs of `width` bytes which get indented by one byte per line.
    /// `width` is clamped to 1..=8, narrower patterns are padded with blank bytes.
    pub fn chevrons(line_count: u32, width: usize) -> Self {
        let width = width.clamp(1, LINE_BYTES / 2);
        let mut data = Vec::with_capacity(line_count as usize * LINE_BYTES);
        let mut indent = 0;

        for _ in 0..line_count {
            let mut line = [0x00; LINE_BYTES];

            line[indent..width].fill(0xff);
            line[width..2 * width - indent].fill(0xff);

            data.extend_from_slice(&line);
            indent = (indent + 1) % width;
        }

        Self { data }
    }

    /// Convert an image into raster lines, one line per image row.
    /// Dark pixels (below 0x80) are printed unless `invert` is set.
    /// The first pixel of a row ends up in the most significant bit of the line.
    pub fn from_gray_image(image: &GrayImage, invert: bool) -> Result<Self, Error> {
        if image.width() > LINE_DOTS {
            return Err(Error::ImageTooWide(image.width()));
        }

        let mut data = vec![0x00; image.height() as usize * LINE_BYTES];

        for (row, line) in image.rows().zip(data.chunks_exact_mut(LINE_BYTES)) {
            let mut bit_writer = BitWriter::new(line);

            for pix in row.map(|p| (p.0[0] < 0x80) != invert) {
                bit_writer.write_bit(pix);
            }
        }

        Ok(Self { data })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn line_count(&self) -> u32 {
        (self.data.len() / LINE_BYTES) as u32
    }

    pub fn lines(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(LINE_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::Luma;
    use pretty_assertions::assert_eq;

    #[test]
    fn bytes_must_fill_whole_lines() {
        assert_eq!(Raster::from_bytes(vec![0; 17]), Err(Error::PartialLine(17)));
        assert_eq!(Raster::from_bytes(vec![0; 32]).unwrap().line_count(), 2);
        assert_eq!(Raster::from_bytes(Vec::new()).unwrap().line_count(), 0);
    }

    #[test]
    fn chevrons_indent_every_line() {
        let raster = Raster::chevrons(3, 8);
        let lines: Vec<_> = raster.lines().collect();

        assert_eq!(lines[0], &[0xff; 16]);

        let mut second = [0xff; 16];
        second[0] = 0x00;
        second[15] = 0x00;
        assert_eq!(lines[1], &second);

        let mut third = [0xff; 16];
        third[..2].fill(0x00);
        third[14..].fill(0x00);
        assert_eq!(lines[2], &third);
    }

    #[test]
    fn chevrons_wrap_around() {
        let raster = Raster::chevrons(9, 8);

        assert_eq!(raster.line_count(), 9);
        assert_eq!(raster.lines().nth(8).unwrap(), &[0xff; 16]);
    }

    #[test]
    fn image_rows_become_lines() {
        let mut image = GrayImage::from_pixel(10, 2, Luma([0xff]));
        image.put_pixel(0, 0, Luma([0x00]));
        image.put_pixel(9, 0, Luma([0x7f]));
        image.put_pixel(3, 1, Luma([0x80]));

        let raster = Raster::from_gray_image(&image, false).unwrap();
        let lines: Vec<_> = raster.lines().collect();

        assert_eq!(raster.line_count(), 2);
        assert_eq!(&lines[0][..2], &[0b1000_0000, 0b0100_0000]);
        assert!(lines[0][2..].iter().all(|&b| b == 0));
        assert_eq!(lines[1], &[0x00; 16]);

        let inverted = Raster::from_gray_image(&image, true).unwrap();
        assert_eq!(&inverted.as_bytes()[16..18], &[0xff, 0b1100_0000]);
    }

    #[test]
    fn wide_images_are_rejected() {
        let image = GrayImage::new(129, 1);

        assert_eq!(
            Raster::from_gray_image(&image, false),
            Err(Error::ImageTooWide(129))
        );
    }
}
