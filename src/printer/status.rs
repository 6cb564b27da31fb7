use super::codes::{
    BatteryLevel, DynamicMode, ErrorInfo1, ErrorInfo2, ExtendedError, MediaType, ModelCode,
    NotificationType, PhaseType, SeriesCode, StatusType, TapeColor, TextColor,
};

use std::fmt::{self, Display};

/// The status reply always has 32 meaningful bytes.
pub const STATUS_LEN: usize = 32;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("The status response from the printer is too short ({0} instead of 32 bytes).")]
    MalformedStatus(usize),
}

/// A decoded status reply.
/// Faults reported by the printer (cover open, no media, ...) are plain data in here.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Status {
    pub head_mark: u8,
    pub size: u8,
    pub brother_code: u8,
    pub series_code: SeriesCode,
    pub model_code: ModelCode,
    pub country_code: u8,
    pub battery_level: BatteryLevel,
    pub extended_error: ExtendedError,
    pub error_info_1: ErrorInfo1,
    pub error_info_2: ErrorInfo2,

    /// Width of the inserted media in millimeters
    pub media_width: u8,
    pub media_type: MediaType,
    pub number_colors: u8,
    pub fonts: u8,
    pub japanese_fonts: u8,
    pub mode: DynamicMode,
    pub density: u8,

    /// Length of the inserted media in millimeters (0 for continuous tape)
    pub media_length: u16,
    pub status_type: StatusType,
    pub phase_type: PhaseType,
    pub phase_number: u8,
    pub notification_type: NotificationType,
    pub expansion_area: u32,
    pub tape_color: TapeColor,
    pub text_color: TextColor,
    pub hardware_settings: u8,
    pub reserved: [u8; 2],
}

impl Status {
    /// Decode a status reply.
    /// Only the first 32 bytes are looked at, the rest of a longer read is ignored.
    pub fn decode(data: &[u8]) -> Result<Self, Error> {
        let Some(data) = data.get(..STATUS_LEN) else {
            return Err(Error::MalformedStatus(data.len()));
        };

        Ok(Status {
            head_mark: data[0],
            size: data[1],
            brother_code: data[2],
            series_code: SeriesCode::from(data[3]),
            model_code: ModelCode::from(data[4]),
            country_code: data[5],
            battery_level: BatteryLevel::from(data[6]),
            extended_error: ExtendedError::from(data[7]),
            error_info_1: ErrorInfo1::from_bits_retain(data[8]),
            error_info_2: ErrorInfo2::from_bits_retain(data[9]),
            media_width: data[10],
            media_type: MediaType::from(data[11]),
            number_colors: data[12],
            fonts: data[13],
            japanese_fonts: data[14],
            mode: DynamicMode::from(data[15]),
            density: data[16],
            media_length: u16::from_le_bytes([data[17], data[18]]),
            status_type: StatusType::from(data[19]),
            phase_type: PhaseType::from(data[20]),
            phase_number: data[21],
            notification_type: NotificationType::from(data[22]),
            expansion_area: u32::from_le_bytes([data[23], data[24], data[25], data[26]]),
            tape_color: TapeColor::from(data[27]),
            text_color: TextColor::from(data[28]),
            hardware_settings: data[29],
            reserved: [data[30], data[31]],
        })
    }

    /// Does one of the error registers report a fault?
    pub fn has_errors(&self) -> bool {
        !self.error_info_1.is_empty()
            || !self.error_info_2.is_empty()
            || self.status_type == StatusType::ErrorOccurred
    }

    /// Is the printer idle with usable media inserted?
    pub fn is_ready(&self) -> bool {
        !self.has_errors()
            && self.phase_type == PhaseType::Editing
            && !matches!(
                self.media_type,
                MediaType::NoMedia | MediaType::Incompatible
            )
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status {{")?;
        writeln!(f, "\tHead mark: {:#04x}", self.head_mark)?;
        writeln!(f, "\tSize: {:#04x}", self.size)?;
        writeln!(f, "\tBrother code: {:#04x}", self.brother_code)?;
        writeln!(f, "\tSeries: {}", self.series_code)?;
        writeln!(f, "\tModel: {}", self.model_code)?;
        writeln!(f, "\tCountry code: {:#04x}", self.country_code)?;
        writeln!(f, "\tBattery: {}", self.battery_level)?;
        writeln!(f, "\tExtended error: {}", self.extended_error)?;
        writeln!(f, "\tError info 1: {:?}", self.error_info_1)?;
        writeln!(f, "\tError info 2: {:?}", self.error_info_2)?;
        writeln!(f, "\tMedia width: {} mm", self.media_width)?;
        writeln!(f, "\tMedia type: {}", self.media_type)?;
        writeln!(f, "\tNumber of colors: {:#04x}", self.number_colors)?;
        writeln!(f, "\tFonts: {:#04x}", self.fonts)?;
        writeln!(f, "\tJapanese fonts: {:#04x}", self.japanese_fonts)?;
        writeln!(f, "\tMode: {}", self.mode)?;
        writeln!(f, "\tDensity: {:#04x}", self.density)?;
        writeln!(f, "\tMedia length: {} mm", self.media_length)?;
        writeln!(f, "\tStatus type: {}", self.status_type)?;
        writeln!(f, "\tPhase: {}, number {}", self.phase_type, self.phase_number)?;
        writeln!(f, "\tNotification: {}", self.notification_type)?;
        writeln!(f, "\tExpansion area: {:#010x}", self.expansion_area)?;
        writeln!(f, "\tTape color: {}", self.tape_color)?;
        writeln!(f, "\tText color: {}", self.text_color)?;
        writeln!(f, "\tHardware settings: {:#04x}", self.hardware_settings)?;
        writeln!(
            f,
            "\tReserved: {:#04x} {:#04x}",
            self.reserved[0], self.reserved[1]
        )?;
        write!(f, "}}")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    /// A reply of a PT-P700 with 18 mm laminated white tape and black text.
    pub(crate) fn sample_reply() -> [u8; STATUS_LEN] {
        [
            0x80, 0x20, 0x42, 0x30, 0x67, 0x30, 0x00, 0x00, // header, model, battery
            0x00, 0x00, 0x12, 0x01, 0x00, 0x00, 0x00, 0x01, // errors, media, mode
            0x00, 0x34, 0x12, 0x00, 0x00, 0x00, 0x00, 0x78, // density, length, phase
            0x56, 0x34, 0x12, 0x01, 0x08, 0x00, 0x00, 0x00, // expansion, colors
        ]
    }

    #[test]
    fn decodes_every_field() {
        let status = Status::decode(&sample_reply()).unwrap();

        assert_eq!(status.head_mark, 0x80);
        assert_eq!(status.size, 0x20);
        assert_eq!(status.brother_code, 0x42);
        assert_eq!(status.series_code, SeriesCode::PT);
        assert_eq!(status.model_code, ModelCode::PTP700);
        assert_eq!(status.battery_level, BatteryLevel::Full);
        assert_eq!(status.extended_error, ExtendedError::NoError);
        assert_eq!(status.media_width, 18);
        assert_eq!(status.media_type, MediaType::LaminatedTape);
        assert_eq!(status.mode, DynamicMode::Raster);
        assert_eq!(status.media_length, 0x1234);
        assert_eq!(status.status_type, StatusType::ReplyToStatus);
        assert_eq!(status.phase_type, PhaseType::Editing);
        assert_eq!(status.notification_type, NotificationType::NotAvailable);
        assert_eq!(status.expansion_area, 0x1234_5678);
        assert_eq!(status.tape_color, TapeColor::White);
        assert_eq!(status.text_color, TextColor::Black);
        assert!(!status.has_errors());
        assert!(status.is_ready());
    }

    #[test]
    fn short_reply_is_malformed() {
        let reply = sample_reply();

        assert_eq!(
            Status::decode(&reply[..31]),
            Err(Error::MalformedStatus(31))
        );
        assert_eq!(Status::decode(&[]), Err(Error::MalformedStatus(0)));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut reply = [0xaa; 64];
        reply[..STATUS_LEN].copy_from_slice(&sample_reply());

        assert_eq!(
            Status::decode(&reply).unwrap(),
            Status::decode(&sample_reply()).unwrap()
        );
    }

    #[test]
    fn decoding_is_repeatable() {
        let mut reply = sample_reply();
        reply[4] = 0xee;
        reply[8] = 0x05;

        let first = Status::decode(&reply);
        let second = Status::decode(&reply);

        assert_eq!(first, second);
        assert_eq!(reply[4], 0xee);
        assert_eq!(Status::decode(&reply[..10]), Status::decode(&reply[..10]));
    }

    #[test]
    fn unknown_codes_do_not_fail() {
        let mut reply = sample_reply();
        reply[4] = 0xee;
        reply[11] = 0x42;
        reply[27] = 0x99;

        let status = Status::decode(&reply).unwrap();

        assert_eq!(status.model_code, ModelCode::Unrecognized(0xee));
        assert_eq!(status.media_type, MediaType::Unrecognized(0x42));
        assert_eq!(status.tape_color, TapeColor::Unrecognized(0x99));
    }

    #[test]
    fn printer_faults_are_data() {
        let mut reply = sample_reply();
        reply[8] = 0x09;
        reply[9] = 0x10;
        reply[19] = 0x02;

        let status = Status::decode(&reply).unwrap();

        assert!(status.error_info_1.contains(ErrorInfo1::NO_MEDIA));
        assert!(status.error_info_1.contains(ErrorInfo1::WEAK_BATTERIES));
        assert!(status.error_info_2.contains(ErrorInfo2::COVER_OPEN));
        assert_eq!(status.status_type, StatusType::ErrorOccurred);
        assert!(status.has_errors());
        assert!(!status.is_ready());
    }

    #[test]
    fn display_lists_named_fields() {
        let text = Status::decode(&sample_reply()).unwrap().to_string();

        assert!(text.contains("Model: PTP700 (0x67)"));
        assert!(text.contains("Media width: 18 mm"));
        assert!(text.contains("Tape color: White (0x01)"));
    }
}
