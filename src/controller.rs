//! Controller-family register protocol.
//!
//! A [`Controller`] implementation captures everything one controller family
//! does differently: command word encoding, the power-on register sequence,
//! the address-window write shape, and the MADCTL rotation table. The panel
//! driver is generic over it and never hard-codes a register.

use embedded_hal::delay::DelayNs;

use crate::dcs::Dcs;
use crate::error::TransportError;
use crate::geometry::Rotation;
use crate::interface::Interface;

/// One step of a power-on sequence: a command, its parameters, and an
/// optional settle delay afterwards.
#[derive(Debug, Clone, Copy)]
pub struct InitCommand {
    pub cmd: u16,
    pub params: &'static [u8],
    pub delay_ms: u32,
}

impl InitCommand {
    pub const fn new(cmd: u16, params: &'static [u8]) -> Self {
        InitCommand {
            cmd,
            params,
            delay_ms: 0,
        }
    }

    pub const fn with_delay(cmd: u16, params: &'static [u8], delay_ms: u32) -> Self {
        InitCommand {
            cmd,
            params,
            delay_ms,
        }
    }
}

/// Plays an init sequence, honoring per-step delays.
pub(crate) fn run_sequence<I, D>(
    io: &mut I,
    delay: &mut D,
    sequence: &[InitCommand],
) -> Result<(), TransportError>
where
    I: Interface,
    D: DelayNs,
{
    for step in sequence {
        io.send_command(step.cmd, step.params)?;
        if step.delay_ms > 0 {
            delay.delay_ms(step.delay_ms);
        }
    }
    Ok(())
}

/// Register protocol of one controller family.
///
/// All methods are associated functions: family behavior is compile-time
/// state, the panel driver owns the runtime state.
pub trait Controller {
    /// MADCTL orientation bytes, indexed 0°/90°/180°/270°.
    const MADCTL_FOR_ROTATION: [u8; 4];

    /// Maps an 8-bit DCS opcode onto the family's command word.
    ///
    /// Classic controllers send the opcode as-is; register-addressed
    /// families override this.
    fn command(code: u8) -> u16 {
        u16::from(code)
    }

    /// Plays the family's power-on register sequence.
    fn init_sequence<I: Interface, D: DelayNs>(
        io: &mut I,
        delay: &mut D,
    ) -> Result<(), TransportError>;

    /// Programs CASET/RASET for an end-exclusive native-frame window.
    ///
    /// The registers take inclusive end coordinates, so `x1`/`y1` go on the
    /// wire decremented by one.
    fn set_address_window<I: Interface>(
        io: &mut I,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), TransportError> {
        let xe = x1 - 1;
        let ye = y1 - 1;
        io.send_command(
            Self::command(Dcs::CASET),
            &[(x0 >> 8) as u8, x0 as u8, (xe >> 8) as u8, xe as u8],
        )?;
        io.send_command(
            Self::command(Dcs::RASET),
            &[(y0 >> 8) as u8, y0 as u8, (ye >> 8) as u8, ye as u8],
        )
    }

    /// MADCTL byte for a rotation, before mirror/color-order bits are mixed in.
    fn madctl_for(rotation: Rotation) -> u8 {
        Self::MADCTL_FOR_ROTATION[rotation.index()]
    }

    fn write_madctl<I: Interface>(io: &mut I, value: u8) -> Result<(), TransportError> {
        io.send_command(Self::command(Dcs::MADCTL), &[value])
    }

    fn write_colmod<I: Interface>(io: &mut I, value: u8) -> Result<(), TransportError> {
        io.send_command(Self::command(Dcs::COLMOD), &[value])
    }

    fn soft_reset<I: Interface>(io: &mut I) -> Result<(), TransportError> {
        io.send_command(Self::command(Dcs::SWRESET), &[])
    }

    fn sleep_in<I: Interface>(io: &mut I) -> Result<(), TransportError> {
        io.send_command(Self::command(Dcs::SLPIN), &[])
    }

    fn sleep_out<I: Interface>(io: &mut I) -> Result<(), TransportError> {
        io.send_command(Self::command(Dcs::SLPOUT), &[])
    }

    fn display_on<I: Interface>(io: &mut I, on: bool) -> Result<(), TransportError> {
        let code = if on { Dcs::DISPON } else { Dcs::DISPOFF };
        io.send_command(Self::command(code), &[])
    }

    fn invert<I: Interface>(io: &mut I, on: bool) -> Result<(), TransportError> {
        let code = if on { Dcs::INVON } else { Dcs::INVOFF };
        io.send_command(Self::command(code), &[])
    }

    /// Opens a memory write; pixel data follows via `send_pixels`.
    fn begin_memory_write<I: Interface>(io: &mut I) -> Result<(), TransportError> {
        io.send_command(Self::command(Dcs::RAMWR), &[])
    }
}
