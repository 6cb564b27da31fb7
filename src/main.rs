use ptouch::printer::{
    codes::{AdvancedPrintSettings, PrintSettings},
    CommandBuffer, Margins, Printer, PrinterConfiguration, UsbConfig, UsbTransport,
};
use ptouch::raster::Raster;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Query and print on Brother P-touch label printers attached via USB
#[derive(Parser, Debug)]
#[command(name = "ptouch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// USB vendor ID of the printer (hex)
    #[arg(long, global = true, default_value = "04f9", value_parser = parse_hex_id)]
    vendor_id: u16,

    /// USB product ID of the printer (hex)
    #[arg(long, global = true, default_value = "2061", value_parser = parse_hex_id)]
    product_id: u16,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the status reported by the printer
    Status,

    /// Print on the media that is currently inserted
    Print(JobArgs),

    /// Write the command stream of a print job to a file instead of a printer
    Encode {
        /// Output file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,

        /// Tape width in millimeters
        #[arg(long, default_value_t = 18.0)]
        tape_width: f32,

        #[command(flatten)]
        job: JobArgs,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Pattern {
    Fill,
    Chevrons,
}

#[derive(Args, Debug)]
struct JobArgs {
    /// Grayscale image (at most 128 pixels wide) to print instead of a pattern
    #[arg(long, value_name = "PNG")]
    image: Option<PathBuf>,

    /// Pattern to print when no image is given
    #[arg(long, value_enum, default_value_t = Pattern::Fill)]
    pattern: Pattern,

    /// Number of raster lines of the pattern
    #[arg(long, default_value_t = 115)]
    lines: u32,

    /// Byte used by the fill pattern (hex)
    #[arg(long, default_value = "55", value_parser = parse_hex_byte)]
    fill_byte: u8,

    /// Margin along the tape width
    #[arg(long, default_value_t = 14)]
    margin_width: u8,

    /// Margin along the tape length
    #[arg(long, default_value_t = 0)]
    margin_length: u8,

    /// Do not cut the tape after printing
    #[arg(long)]
    no_auto_cut: bool,

    /// Mirror the print
    #[arg(long)]
    mirror: bool,

    /// Keep the tape in the printer for a following label
    #[arg(long)]
    chain: bool,

    /// Print light pixels of the image instead of dark ones
    #[arg(long)]
    invert: bool,
}

impl JobArgs {
    fn raster(&self) -> Result<Raster, Box<dyn std::error::Error>> {
        Ok(match &self.image {
            Some(path) => Raster::from_gray_image(&image::open(path)?.to_luma8(), self.invert)?,
            None => match self.pattern {
                Pattern::Fill => Raster::filled(self.fill_byte, self.lines),
                Pattern::Chevrons => Raster::chevrons(self.lines, 8),
            },
        })
    }

    fn margins(&self) -> Margins {
        Margins::new(self.margin_width, self.margin_length)
    }

    fn configure(&self, config: &mut PrinterConfiguration) {
        config.print_settings = PrintSettings::empty();
        config.print_settings.set(PrintSettings::AUTO_CUT, !self.no_auto_cut);
        config.print_settings.set(PrintSettings::MIRROR_PRINTING, self.mirror);

        config.advanced_settings = AdvancedPrintSettings::empty();
        config
            .advanced_settings
            .set(AdvancedPrintSettings::NO_CHAIN_PRINTING, !self.chain);
    }
}

fn parse_hex_id(value: &str) -> Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(value.trim_start_matches("0x"), 16)
}

fn parse_hex_byte(value: &str) -> Result<u8, std::num::ParseIntError> {
    u8::from_str_radix(value.trim_start_matches("0x"), 16)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let transport = UsbTransport::new(UsbConfig {
        vendor_id: cli.vendor_id,
        product_id: cli.product_id,
        ..Default::default()
    });

    tracing::debug!(
        "Looking for printer {:04x}:{:04x}",
        transport.config().vendor_id,
        transport.config().product_id
    );

    match cli.command {
        Commands::Status => {
            let status = Printer::open(transport)?.query_status()?;
            println!("{}", status);
        }

        Commands::Print(job) => {
            let raster = job.raster()?;

            Printer::scoped(
                transport,
                |printer| -> Result<(), Box<dyn std::error::Error>> {
                    // Refuse to print if the printer reports a problem.
                    let status = printer.query_status()?;

                    if !status.is_ready() {
                        return Err(format!("The printer is not ready:\n{}", status).into());
                    }

                    printer.config_mut().apply_status(&status);
                    job.configure(printer.config_mut());
                    printer.print_raster(&raster, job.margins())?;

                    Ok(())
                },
            )?;
        }

        Commands::Encode {
            output,
            tape_width,
            job,
        } => {
            let raster = job.raster()?;

            let mut config = PrinterConfiguration::default();
            config.set_tape_width(tape_width);
            job.configure(&mut config);

            let command = CommandBuffer::print_job(
                &config,
                raster.as_bytes(),
                raster.line_count(),
                job.margins(),
            )?;
            std::fs::write(&output, command.as_bytes())?;

            println!("Wrote {} bytes to {}", command.len(), output.display());
        }
    }

    Ok(())
}
