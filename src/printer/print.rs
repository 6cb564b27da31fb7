use super::command::CommandBuffer;
use super::io::Transport;
use super::session::Error;
use super::{Margins, Printer};

use crate::raster::Raster;

impl<T: Transport> Printer<T> {
    /// Print `line_count` raster lines with the current configuration.
    /// The whole job goes out in a single write.
    pub fn print(&mut self, raster: &[u8], line_count: u32, margins: Margins) -> Result<(), Error> {
        self.ensure_ready()?;

        let command = CommandBuffer::print_job(&self.config, raster, line_count, margins)?;
        self.send(&command)
    }

    pub fn print_raster(&mut self, raster: &Raster, margins: Margins) -> Result<(), Error> {
        self.print(raster.as_bytes(), raster.line_count(), margins)
    }

    /// Query the status, take over the inserted media and print.
    /// Faults reported by the printer are left to the caller: the status is returned in any case.
    pub fn print_on_inserted_media(
        &mut self,
        raster: &Raster,
        margins: Margins,
    ) -> Result<super::Status, Error> {
        let status = self.query_status()?;
        self.config.apply_status(&status);
        self.print_raster(raster, margins)?;

        Ok(status)
    }
}
