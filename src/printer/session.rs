use super::command::{CommandBuffer, Error as CommandError};
use super::io::{Error as TransportError, Transport, IO_TIMEOUT};
use super::status::{Error as StatusError, Status};
use super::{Printer, PrinterConfiguration};

/// The status reply is read with more room than its 32 bytes.
pub const STATUS_READ_LEN: usize = 64;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("The printer session has not been started.")]
    SessionNotInitialized,
    #[error("The printer session has already been closed and cannot be started again.")]
    SessionClosed,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("A status request has failed: {0}")]
    Status(#[from] StatusError),
    #[error("The print job is invalid: {0}")]
    Command(#[from] CommandError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Ready,
    Closed,
}

impl<T: Transport> Printer<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: SessionState::Uninitialized,
            config: PrinterConfiguration::default(),
        }
    }

    /// Create a printer and start its session right away.
    pub fn open(transport: T) -> Result<Self, Error> {
        let mut printer = Self::new(transport);
        printer.start()?;

        Ok(printer)
    }

    /// Run `f` on a started printer. The session is closed afterwards, whatever `f` returns.
    pub fn scoped<R, E, F>(transport: T, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Self) -> Result<R, E>,
        E: From<Error>,
    {
        let mut printer = Self::open(transport)?;
        let result = f(&mut printer);
        printer.close();

        result
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &PrinterConfiguration {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PrinterConfiguration {
        &mut self.config
    }

    /// Acquire the transport.
    pub fn start(&mut self) -> Result<(), Error> {
        match self.state {
            SessionState::Ready => return Ok(()),
            SessionState::Closed => return Err(Error::SessionClosed),
            SessionState::Uninitialized => {}
        }

        self.transport.acquire()?;
        self.state = SessionState::Ready;

        tracing::debug!("Printer session started");

        Ok(())
    }

    /// Release the transport. Calling this more than once is fine.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }

        self.transport.release();
        self.state = SessionState::Closed;

        tracing::debug!("Printer session closed");
    }

    pub(super) fn ensure_ready(&self) -> Result<(), Error> {
        match self.state {
            SessionState::Ready => Ok(()),
            SessionState::Uninitialized | SessionState::Closed => {
                Err(Error::SessionNotInitialized)
            }
        }
    }

    pub(super) fn send(&mut self, command: &CommandBuffer) -> Result<(), Error> {
        tracing::debug!("Sending {} bytes to the printer", command.len());
        self.transport.write(command.as_bytes())?;

        Ok(())
    }

    /// Ask the printer for its status.
    pub fn query_status(&mut self) -> Result<Status, Error> {
        self.ensure_ready()?;
        self.send(&CommandBuffer::status_query())?;

        let reply = self.transport.read(STATUS_READ_LEN, IO_TIMEOUT)?;
        tracing::debug!("Received {} bytes of status", reply.len());

        Ok(Status::decode(&reply)?)
    }
}

impl<T: Transport> Drop for Printer<T> {
    fn drop(&mut self) {
        self.close();
    }
}
