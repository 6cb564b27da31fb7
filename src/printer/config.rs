use super::codes::{AdvancedPrintSettings, CompressionMode, MediaType, PrintSettings};
use super::status::Status;

/// The state a print job is encoded from.
/// It is owned by the caller and only changes between print calls.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrinterConfiguration {
    /// Tape width in millimeters
    pub tape_width: u8,

    /// Tape length in millimeters (0 means continuous tape)
    pub tape_length: u8,

    pub media_type: MediaType,
    pub print_settings: PrintSettings,
    pub advanced_settings: AdvancedPrintSettings,
    pub compression: CompressionMode,
}

impl Default for PrinterConfiguration {
    fn default() -> Self {
        Self {
            tape_width: 0,
            tape_length: 0,
            media_type: MediaType::LaminatedTape,
            print_settings: PrintSettings::AUTO_CUT,
            advanced_settings: AdvancedPrintSettings::NO_CHAIN_PRINTING,
            compression: CompressionMode::NoCompression,
        }
    }
}

impl PrinterConfiguration {
    /// Set the tape width from a measurement that may not be a whole number of millimeters.
    pub fn set_tape_width(&mut self, millimeters: f32) {
        self.tape_width = round_millimeters(millimeters);
    }

    pub fn set_tape_length(&mut self, millimeters: f32) {
        self.tape_length = round_millimeters(millimeters);
    }

    /// Take over the media that the printer reports as inserted.
    /// Continuous tape is assumed, so the length is reset.
    pub fn apply_status(&mut self, status: &Status) {
        self.tape_width = status.media_width;
        self.tape_length = 0;
        self.media_type = status.media_type;
    }
}

fn round_millimeters(millimeters: f32) -> u8 {
    // `as` saturates and maps NaN to 0.
    millimeters.round() as u8
}

/// Margins in dots, one byte each.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Margins {
    pub width: u8,
    pub length: u8,
}

impl Margins {
    pub fn new(width: u8, length: u8) -> Self {
        Self { width, length }
    }
}
