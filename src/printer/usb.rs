use super::io::{check_written, Direction, Error, Transport};

use std::time::Duration;

use rusb::{DeviceHandle, GlobalContext};

/// USB Vendor ID for Brother printers
pub const VENDOR_ID: u16 = 0x04f9;

/// USB Product ID of the P-touch PT-P700
pub const PRODUCT_ID: u16 = 0x2061;

/// Which device to attach and how long a transfer may take.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UsbConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    pub timeout: Duration,
}

impl Default for UsbConfig {
    fn default() -> Self {
        Self {
            vendor_id: VENDOR_ID,
            product_id: PRODUCT_ID,
            timeout: super::io::IO_TIMEOUT,
        }
    }
}

struct Attached {
    handle: DeviceHandle<GlobalContext>,
    interface_number: u8,
    in_addr: u8,
    out_addr: u8,
}

/// Bulk transfers to a printer attached via libusb.
pub struct UsbTransport {
    config: UsbConfig,
    attached: Option<Attached>,
}

impl UsbTransport {
    pub fn new(config: UsbConfig) -> Self {
        Self {
            config,
            attached: None,
        }
    }

    pub fn config(&self) -> &UsbConfig {
        &self.config
    }

    fn attached(&self) -> Result<&Attached, Error> {
        self.attached.as_ref().ok_or(Error::NotAcquired)
    }
}

impl Default for UsbTransport {
    fn default() -> Self {
        Self::new(UsbConfig::default())
    }
}

fn select_device(
    vendor_id: u16,
    product_id: u16,
) -> Result<Option<rusb::Device<GlobalContext>>, rusb::Error> {
    Ok(rusb::DeviceList::new()?.iter().find(|device| {
        // Skip devices where the descriptor cannot be read.
        device.device_descriptor().is_ok_and(|desc| {
            desc.vendor_id() == vendor_id && desc.product_id() == product_id
        })
    }))
}

fn select_interface(device: &rusb::Device<GlobalContext>) -> Result<(u8, u8, u8), Error> {
    // The printer offers exactly one interface with one descriptor.
    let config_desc = device.active_config_descriptor()?;
    let interface = config_desc.interfaces().next().ok_or(Error::NoInterface)?;
    let interface_desc = interface.descriptors().next().ok_or(Error::NoInterface)?;

    // Take the first bulk endpoint of each direction.
    let (mut in_addr, mut out_addr) = (None, None);

    for endpoint_desc in interface_desc
        .endpoint_descriptors()
        .filter(|desc| desc.transfer_type() == rusb::TransferType::Bulk)
    {
        match endpoint_desc.direction() {
            rusb::Direction::In => {
                in_addr.get_or_insert(endpoint_desc.address());
            }
            rusb::Direction::Out => {
                out_addr.get_or_insert(endpoint_desc.address());
            }
        }
    }

    Ok((
        interface.number(),
        in_addr.ok_or(Error::EndpointNotFound(Direction::In))?,
        out_addr.ok_or(Error::EndpointNotFound(Direction::Out))?,
    ))
}

impl Transport for UsbTransport {
    fn acquire(&mut self) -> Result<(), Error> {
        if self.attached.is_some() {
            return Ok(());
        }

        let UsbConfig {
            vendor_id,
            product_id,
            ..
        } = self.config;

        let device = select_device(vendor_id, product_id)?.ok_or(Error::DeviceNotFound {
            vendor_id,
            product_id,
        })?;

        // Ensure that a potential kernel driver is automatically detached and later reattached.
        let mut handle = device.open()?;
        handle.set_auto_detach_kernel_driver(true)?;

        let (interface_number, in_addr, out_addr) = select_interface(&device)?;
        handle.claim_interface(interface_number)?;

        tracing::debug!(
            "Attached printer {:04x}:{:04x} (interface {}, in {:#04x}, out {:#04x})",
            vendor_id,
            product_id,
            interface_number,
            in_addr,
            out_addr
        );

        self.attached = Some(Attached {
            handle,
            interface_number,
            in_addr,
            out_addr,
        });

        Ok(())
    }

    fn release(&mut self) {
        // Dropping the handle closes the device.
        if let Some(mut attached) = self.attached.take() {
            if let Err(err) = attached.handle.release_interface(attached.interface_number) {
                tracing::warn!("Failed to release the printer interface: {}", err);
            }

            tracing::debug!("Released printer");
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        let attached = self.attached()?;
        let written_bytes =
            attached
                .handle
                .write_bulk(attached.out_addr, data, self.config.timeout)?;

        check_written(data.len(), written_bytes)
    }

    fn read(&mut self, max_len: usize, timeout: Duration) -> Result<Vec<u8>, Error> {
        let attached = self.attached()?;

        let mut data = vec![0u8; max_len];
        let read_bytes = attached
            .handle
            .read_bulk(attached.in_addr, &mut data, timeout)?;
        data.truncate(read_bytes);

        Ok(data)
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        self.release();
    }
}
