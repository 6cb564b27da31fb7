use super::codes::{AdvancedPrintSettings, CompressionMode, MediaType, PrintSettings, ValidFlags};
use super::config::{Margins, PrinterConfiguration};

/// Number of "invalid" zero bytes sent ahead of the reset.
/// They flush whatever half-received command the printer might still be holding.
pub const RESET_PADDING_LEN: usize = 100;

/// Every raster line covers the 128 pins of the print head.
pub const LINE_BYTES: usize = 16;

/// The fields the printer is asked to check before printing.
pub const PRINT_VALID_FLAGS: ValidFlags = ValidFlags::RECOVER.union(ValidFlags::WIDTH);

const ESC: u8 = 0x1b;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("The raster data has the wrong length (expected {expected} bytes for {line_count} lines, got {actual}).")]
    RasterLengthMismatch {
        line_count: u32,
        expected: usize,
        actual: usize,
    },
}

/// Bytes that are sent to the printer in a single bulk transfer.
///
/// The methods append sub-commands in the order they are called.
/// Use `status_query` or `print_job` to get the complete sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBuffer {
    data: Vec<u8>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reset, then ask for the 32 byte status reply.
    pub fn status_query() -> Self {
        let mut buffer = Self::new();
        buffer.reset().request_status();
        buffer
    }

    /// Assemble a complete print job for a single page.
    /// Nothing is assembled if `raster` does not hold exactly `line_count` lines.
    pub fn print_job(
        config: &PrinterConfiguration,
        raster: &[u8],
        line_count: u32,
        margins: Margins,
    ) -> Result<Self, Error> {
        check_raster_len(raster, line_count)?;

        if config.compression != CompressionMode::NoCompression {
            tracing::warn!(
                "Compression mode {} is not supported, sending the raster data uncompressed.",
                config.compression
            );
        }

        let mut buffer = Self::new();

        buffer
            .reset()
            .raster_mode()
            .print_information(
                PRINT_VALID_FLAGS,
                config.media_type,
                config.tape_width,
                config.tape_length,
                line_count,
                false,
            )
            .print_settings(config.print_settings, config.advanced_settings)
            .margins(margins)
            .compression(config.compression)
            .graphics(raster, line_count)?
            .print_and_feed();

        Ok(buffer)
    }

    /// Zero padding followed by the initialization command.
    pub fn reset(&mut self) -> &mut Self {
        self.data.resize(self.data.len() + RESET_PADDING_LEN, 0x00);
        self.data.extend_from_slice(&[ESC, 0x40]);
        self
    }

    pub fn request_status(&mut self) -> &mut Self {
        self.data.extend_from_slice(&[ESC, 0x69, 0x53]);
        self
    }

    /// Switch to raster mode (instead of ESC/P or template mode).
    pub fn raster_mode(&mut self) -> &mut Self {
        self.data.extend_from_slice(&[ESC, 0x69, 0x61, 0x01]);
        self
    }

    pub fn print_information(
        &mut self,
        valid_flags: ValidFlags,
        media_type: MediaType,
        width: u8,
        length: u8,
        line_count: u32,
        first_page: bool,
    ) -> &mut Self {
        self.data.extend_from_slice(&[
            ESC,
            0x69,
            0x7a,
            valid_flags.bits(),
            u8::from(media_type),
            width,
            length,
        ]);
        self.data.extend_from_slice(&line_count.to_le_bytes());
        self.data.push(first_page as u8);
        self.data.push(0x00); // Reserved
        self
    }

    /// The various mode settings, followed by the expanded ones.
    pub fn print_settings(
        &mut self,
        settings: PrintSettings,
        advanced: AdvancedPrintSettings,
    ) -> &mut Self {
        self.data
            .extend_from_slice(&[ESC, 0x69, 0x4d, settings.bits()]);
        self.data
            .extend_from_slice(&[ESC, 0x69, 0x4b, advanced.bits()]);
        self
    }

    pub fn margins(&mut self, margins: Margins) -> &mut Self {
        self.data
            .extend_from_slice(&[ESC, 0x69, 0x64, margins.width, margins.length]);
        self
    }

    pub fn compression(&mut self, mode: CompressionMode) -> &mut Self {
        self.data.extend_from_slice(&[0x4d, u8::from(mode)]);
        self
    }

    /// One raster graphics transfer per line.
    pub fn graphics(&mut self, raster: &[u8], line_count: u32) -> Result<&mut Self, Error> {
        check_raster_len(raster, line_count)?;

        self.data.reserve(raster.len() / LINE_BYTES * (3 + LINE_BYTES));

        for line in raster.chunks_exact(LINE_BYTES) {
            self.data.extend_from_slice(&[0x47, LINE_BYTES as u8, 0x00]);
            self.data.extend_from_slice(line);
        }

        Ok(self)
    }

    /// Print the page and feed the tape.
    pub fn print_and_feed(&mut self) -> &mut Self {
        self.data.push(0x1a);
        self
    }
}

impl AsRef<[u8]> for CommandBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

fn check_raster_len(raster: &[u8], line_count: u32) -> Result<(), Error> {
    let expected = (line_count as usize).saturating_mul(LINE_BYTES);

    if raster.len() != expected {
        return Err(Error::RasterLengthMismatch {
            line_count,
            expected,
            actual: raster.len(),
        });
    }

    Ok(())
}
