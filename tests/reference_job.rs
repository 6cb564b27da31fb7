//! The command stream of a known-good print on 18 mm laminated tape.

use ptouch::printer::codes::{AdvancedPrintSettings, CompressionMode, MediaType, PrintSettings};
use ptouch::printer::{CommandBuffer, Margins, PrinterConfiguration};
use ptouch::raster::Raster;

use pretty_assertions::assert_eq;

fn reference_stream() -> Vec<u8> {
    let mut expected = vec![0x00; 100];

    // Reset and raster mode
    expected.extend_from_slice(&[0x1b, 0x40, 0x1b, 0x69, 0x61, 0x01]);

    // Print information: width + recover, laminated, 18 x 0 mm, 115 lines
    expected.extend_from_slice(&[0x1b, 0x69, 0x7a]);
    expected.extend_from_slice(&[0x84, 0x01, 0x12, 0x00, 0x73, 0x00, 0x00, 0x00, 0x00, 0x00]);

    // Auto cut, no chain printing, 14 x 0 margins, no compression
    expected.extend_from_slice(&[0x1b, 0x69, 0x4d, 0x40]);
    expected.extend_from_slice(&[0x1b, 0x69, 0x4b, 0x08]);
    expected.extend_from_slice(&[0x1b, 0x69, 0x64, 0x0e, 0x00]);
    expected.extend_from_slice(&[0x4d, 0x00]);

    for _ in 0..115 {
        expected.extend_from_slice(&[0x47, 0x10, 0x00]);
        expected.extend_from_slice(&[0x55; 16]);
    }

    expected.push(0x1a);
    expected
}

#[test]
fn print_job_matches_reference() {
    let mut config = PrinterConfiguration {
        media_type: MediaType::LaminatedTape,
        print_settings: PrintSettings::AUTO_CUT,
        advanced_settings: AdvancedPrintSettings::NO_CHAIN_PRINTING,
        compression: CompressionMode::NoCompression,
        ..Default::default()
    };
    config.set_tape_width(18.0);
    config.set_tape_length(0.0);

    let raster = Raster::filled(0x55, 115);
    let command = CommandBuffer::print_job(
        &config,
        raster.as_bytes(),
        raster.line_count(),
        Margins::new(14, 0),
    )
    .unwrap();

    assert_eq!(command.into_bytes(), reference_stream());
}

#[test]
fn default_configuration_matches_reference() {
    let mut config = PrinterConfiguration::default();
    config.set_tape_width(17.8);

    let command =
        CommandBuffer::print_job(&config, &[0x55; 16 * 115], 115, Margins::new(14, 0)).unwrap();

    assert_eq!(command.as_bytes(), reference_stream().as_slice());
}

#[test]
fn status_query_matches_reference() {
    let mut expected = vec![0x00; 100];
    expected.extend_from_slice(&[0x1b, 0x40, 0x1b, 0x69, 0x53]);

    assert_eq!(CommandBuffer::status_query().into_bytes(), expected);
}
