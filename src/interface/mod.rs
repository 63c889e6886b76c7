//! Bus transports: the physical link between driver and controller.
//!
//! Two back-ends are provided, one per wiring style seen on the supported
//! boards: SPI (MOSI/CLK/CS plus a DC line) and 16-bit 8080-style parallel
//! (data bus plus WR/DC strobes). Both speak the same [`Interface`] contract
//! so the panel driver above them is bus-agnostic.

mod parallel;
mod spi;

pub use parallel::{Generic16BitBus, OutputBus, ParallelInterface};
pub use spi::{CommandWidth, SpiInterface};

use crate::error::TransportError;

/// Command and pixel transfer primitives of one physical link.
///
/// All operations block until the underlying bus has accepted the transfer.
/// Failures carry the byte offset at which they occurred and are never
/// retried here; retry policy belongs to the caller.
pub trait Interface {
    /// Sends a command followed by its parameter bytes.
    ///
    /// Commands are 16 bits wide to cover register-addressed controllers;
    /// 8-bit-command transports use the low byte.
    fn send_command(&mut self, command: u16, params: &[u8]) -> Result<(), TransportError>;

    /// Sends raw pixel data, continuing the most recent memory-write command.
    ///
    /// `pixels.len()` must not exceed [`max_transfer_size`](Self::max_transfer_size);
    /// callers split larger transfers into ceiling-sized chunks and issue them
    /// sequentially, preserving row order.
    fn send_pixels(&mut self, pixels: &[u8]) -> Result<(), TransportError>;

    /// Fixed per-hardware transfer ceiling in bytes (DMA descriptor limit for
    /// the parallel bus, transaction pool sizing for SPI).
    fn max_transfer_size(&self) -> usize;
}

impl<T: Interface + ?Sized> Interface for &mut T {
    fn send_command(&mut self, command: u16, params: &[u8]) -> Result<(), TransportError> {
        T::send_command(self, command, params)
    }

    fn send_pixels(&mut self, pixels: &[u8]) -> Result<(), TransportError> {
        T::send_pixels(self, pixels)
    }

    fn max_transfer_size(&self) -> usize {
        T::max_transfer_size(self)
    }
}
