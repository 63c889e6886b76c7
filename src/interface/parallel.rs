//! 8080-style parallel transport: 16-bit data bus plus WR/DC strobes.
//!
//! The data bus itself is abstracted behind [`OutputBus`] so the same
//! transport drives either a memory-mapped LCD peripheral wrapper or the
//! bit-banged GPIO fallback provided here.

use embedded_hal::digital::OutputPin;

use crate::error::{TransportError, TransportErrorKind};
use crate::interface::Interface;

/// A 16-bit wide output-only data bus.
pub trait OutputBus {
    /// Presents `value` on the data lines.
    fn set_value(&mut self, value: u16) -> Result<(), TransportError>;
}

/// Bit-banged [`OutputBus`] over sixteen GPIO lines, D0 first.
///
/// Slow but board-agnostic; hardware LCD peripherals should provide their own
/// [`OutputBus`] wrapper instead.
pub struct Generic16BitBus<P> {
    pins: [P; 16],
}

impl<P: OutputPin> Generic16BitBus<P> {
    pub fn new(pins: [P; 16]) -> Self {
        Generic16BitBus { pins }
    }

    pub fn release(self) -> [P; 16] {
        self.pins
    }
}

impl<P: OutputPin> OutputBus for Generic16BitBus<P> {
    fn set_value(&mut self, value: u16) -> Result<(), TransportError> {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            let level = value & (1 << bit) != 0;
            pin.set_state(level.into())
                .map_err(|_| TransportError::new(TransportErrorKind::Pin))?;
        }
        Ok(())
    }
}

/// Intel 8080-style parallel transport.
///
/// Writes are latched on the rising edge of WR. Commands occupy one bus word;
/// command parameters are sent one byte per word, matching the 16-bit
/// command/parameter framing the register-addressed controllers expect.
pub struct ParallelInterface<BUS, DC, WR> {
    bus: BUS,
    /// Register select: low for commands, high for parameters and pixels.
    dc: DC,
    wr: WR,
    max_transfer: usize,
}

impl<BUS, DC, WR> ParallelInterface<BUS, DC, WR> {
    /// `max_transfer` is the DMA descriptor limit of the hardware the bus
    /// fronts, in bytes of pixel data.
    pub fn new(bus: BUS, dc: DC, wr: WR, max_transfer: usize) -> Self {
        ParallelInterface {
            bus,
            dc,
            wr,
            max_transfer,
        }
    }

    pub fn release(self) -> (BUS, DC, WR) {
        (self.bus, self.dc, self.wr)
    }
}

impl<BUS, DC, WR> ParallelInterface<BUS, DC, WR>
where
    BUS: OutputBus,
    DC: OutputPin,
    WR: OutputPin,
{
    fn strobe_word(&mut self, word: u16) -> Result<(), TransportError> {
        self.bus.set_value(word)?;
        self.wr
            .set_low()
            .map_err(|_| TransportError::new(TransportErrorKind::Pin))?;
        self.wr
            .set_high()
            .map_err(|_| TransportError::new(TransportErrorKind::Pin))?;
        Ok(())
    }
}

impl<BUS, DC, WR> Interface for ParallelInterface<BUS, DC, WR>
where
    BUS: OutputBus,
    DC: OutputPin,
    WR: OutputPin,
{
    fn send_command(&mut self, command: u16, params: &[u8]) -> Result<(), TransportError> {
        self.dc
            .set_low()
            .map_err(|_| TransportError::new(TransportErrorKind::Pin))?;
        self.strobe_word(command)?;
        if params.is_empty() {
            return Ok(());
        }
        self.dc
            .set_high()
            .map_err(|_| TransportError::new(TransportErrorKind::Pin))?;
        for (i, &byte) in params.iter().enumerate() {
            self.strobe_word(u16::from(byte))
                .map_err(|e| e.offset_by(i))?;
        }
        Ok(())
    }

    fn send_pixels(&mut self, pixels: &[u8]) -> Result<(), TransportError> {
        debug_assert!(pixels.len() <= self.max_transfer);
        debug_assert!(pixels.len() % 2 == 0, "16-bit bus takes whole pixels");
        self.dc
            .set_high()
            .map_err(|_| TransportError::new(TransportErrorKind::Pin))?;
        for (i, pair) in pixels.chunks_exact(2).enumerate() {
            let word = u16::from_le_bytes([pair[0], pair[1]]);
            self.strobe_word(word).map_err(|e| e.offset_by(i * 2))?;
        }
        Ok(())
    }

    fn max_transfer_size(&self) -> usize {
        self.max_transfer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    struct RecordingBus {
        words: Rc<RefCell<Vec<u16>>>,
    }

    impl OutputBus for RecordingBus {
        fn set_value(&mut self, value: u16) -> Result<(), TransportError> {
            self.words.borrow_mut().push(value);
            Ok(())
        }
    }

    struct NoopPin;

    impl embedded_hal::digital::ErrorType for NoopPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for NoopPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn params_go_out_one_byte_per_word() {
        let words = Rc::new(RefCell::new(Vec::new()));
        let bus = RecordingBus {
            words: Rc::clone(&words),
        };
        let mut io = ParallelInterface::new(bus, NoopPin, NoopPin, 4000);
        io.send_command(0x2A00, &[0x01, 0xFF]).unwrap();
        assert_eq!(*words.borrow(), vec![0x2A00, 0x0001, 0x00FF]);
    }

    #[test]
    fn pixels_pack_into_little_endian_words() {
        let words = Rc::new(RefCell::new(Vec::new()));
        let bus = RecordingBus {
            words: Rc::clone(&words),
        };
        let mut io = ParallelInterface::new(bus, NoopPin, NoopPin, 4000);
        io.send_pixels(&[0x34, 0x12, 0x78, 0x56]).unwrap();
        assert_eq!(*words.borrow(), vec![0x1234, 0x5678]);
    }
}
