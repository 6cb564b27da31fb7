/// Every field of the protocol is a closed set of codes or a register of flags.
pub mod codes;

/// The configuration a print job is encoded from.
mod config;
pub use config::{Margins, PrinterConfiguration};

/// The byte pipe to the printer and the errors it can produce.
mod io;
pub use io::{Direction, Error as TransportError, Transport, IO_TIMEOUT};

/// Search the list of available USB devices, attach a P-touch printer and perform bulk IO.
mod usb;
pub use usb::{UsbConfig, UsbTransport, PRODUCT_ID, VENDOR_ID};

/// The status response is the basic feedback method from the printer to the host.
mod status;
pub use status::{Error as StatusError, Status, STATUS_LEN};

/// Commands are assembled into a single buffer before they are sent.
mod command;
pub use command::{CommandBuffer, Error as CommandError, LINE_BYTES, RESET_PADDING_LEN};

/// Starting and closing a session, status requests.
mod session;
pub use session::{Error, SessionState, STATUS_READ_LEN};

/// Printing raster lines with the session's configuration.
mod print;

pub struct Printer<T: Transport> {
    transport: T,
    state: SessionState,
    config: PrinterConfiguration,
}
