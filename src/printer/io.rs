use std::fmt::Display;
use std::time::Duration;

/// Timeout for a single bulk transfer.
pub const IO_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::In => write!(f, "input"),
            Direction::Out => write!(f, "output"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("An USB error has occurred: {0}")]
    USBError(#[from] rusb::Error),
    #[error("No printer with USB ID {vendor_id:04x}:{product_id:04x} has been found.")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },
    #[error("The USB device for the printer offers no interface.")]
    NoInterface,
    #[error("The USB interface for the printer offers no bulk {0} endpoint.")]
    EndpointNotFound(Direction),
    #[error("The device has not been acquired.")]
    NotAcquired,
    #[error("Only {written} of {expected} bytes have been written to the printer.")]
    ShortWrite { expected: usize, written: usize },
}

/// A command is only sent if all of its bytes went out in one transfer.
pub(super) fn check_written(expected: usize, written: usize) -> Result<(), Error> {
    if written != expected {
        return Err(Error::ShortWrite { expected, written });
    }

    Ok(())
}

/// The byte pipe to the printer.
///
/// A transport only moves bytes. It knows nothing about the protocol and never retries.
pub trait Transport {
    /// Open the device and claim its endpoints.
    fn acquire(&mut self) -> Result<(), Error>;

    /// Give the device back. Must be safe to call repeatedly.
    fn release(&mut self);

    /// Send one complete command.
    fn write(&mut self, data: &[u8]) -> Result<(), Error>;

    /// Read at most `max_len` bytes of the reply.
    fn read(&mut self, max_len: usize, timeout: Duration) -> Result<Vec<u8>, Error>;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::{check_written, Error, Transport};

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Debug, Default)]
    pub(crate) struct Log {
        pub acquired: usize,
        pub released: usize,
        pub writes: Vec<Vec<u8>>,
        pub reads: Vec<usize>,
    }

    /// Records all traffic and answers reads with a canned reply.
    pub(crate) struct MockTransport {
        pub log: Rc<RefCell<Log>>,
        pub reply: Vec<u8>,
        pub acquire_error: Option<Error>,
        pub write_error: Option<Error>,

        /// Accept at most this many bytes per write.
        pub write_limit: Option<usize>,
    }

    impl MockTransport {
        pub(crate) fn new(reply: &[u8]) -> Self {
            Self {
                log: Rc::default(),
                reply: reply.to_vec(),
                acquire_error: None,
                write_error: None,
                write_limit: None,
            }
        }
    }

    impl Transport for MockTransport {
        fn acquire(&mut self) -> Result<(), Error> {
            if let Some(err) = self.acquire_error {
                return Err(err);
            }

            self.log.borrow_mut().acquired += 1;
            Ok(())
        }

        fn release(&mut self) {
            self.log.borrow_mut().released += 1;
        }

        fn write(&mut self, data: &[u8]) -> Result<(), Error> {
            if let Some(err) = self.write_error {
                return Err(err);
            }

            let written = self.write_limit.map_or(data.len(), |limit| limit.min(data.len()));
            self.log.borrow_mut().writes.push(data[..written].to_vec());

            check_written(data.len(), written)
        }

        fn read(&mut self, max_len: usize, _timeout: Duration) -> Result<Vec<u8>, Error> {
            self.log.borrow_mut().reads.push(max_len);
            Ok(self.reply.iter().copied().take(max_len).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_writes_are_errors() {
        assert_eq!(check_written(105, 105), Ok(()));
        assert_eq!(
            check_written(105, 64),
            Err(Error::ShortWrite {
                expected: 105,
                written: 64,
            })
        );
        assert_eq!(
            check_written(16, 0),
            Err(Error::ShortWrite {
                expected: 16,
                written: 0,
            })
        );
    }
}
