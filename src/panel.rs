//! The panel driver: lifecycle, orientation, and rectangle flushing.

use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{ColorOrder, PanelConfig};
use crate::controller::Controller;
use crate::dcs::{colmod_for_depth, Madctl};
use crate::error::{Error, StateError, TransportError, TransportErrorKind};
use crate::geometry::{chunk_len, point_to_logical, rect_to_native, Rect, Rotation};
use crate::interface::Interface;

/// Settle time after a sleep-out before the panel accepts pixel data.
const WAKE_SETTLE_MS: u32 = 100;

/// Stack scratch for the byte-swap and CPU-transpose streaming paths.
const SCRATCH_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    Sleeping,
}

/// A live panel: exclusive owner of its bus transport and reset pin.
///
/// One logical writer at a time; the driver holds no locks and every
/// operation blocks until the bus has accepted it. Construction performs the
/// full reset + init + configuration bring-up and fails fatally, returning
/// no handle.
pub struct Panel<C, I, RST> {
    io: I,
    reset: Option<RST>,
    /// Logical (rotated) extents reported to callers.
    width: u16,
    height: u16,
    /// Native controller memory extents, fixed at construction.
    native_w: u16,
    native_h: u16,
    rotation: Rotation,
    x_gap: u16,
    y_gap: u16,
    bytes_per_pixel: usize,
    /// Last orientation byte put on the wire. Not deduplicated: writing the
    /// same value twice issues two commands.
    madctl: u8,
    color_order: ColorOrder,
    cpu_transpose: bool,
    swap_color_bytes: bool,
    state: State,
    _controller: PhantomData<C>,
}

impl<C, I, RST> Panel<C, I, RST>
where
    C: Controller,
    I: Interface,
    RST: OutputPin,
{
    /// Brings the panel up: reset, register init, orientation, color format,
    /// display on.
    ///
    /// With no reset pin wired, falls back to the controller's soft-reset
    /// command followed by the configured settle delay.
    pub fn new<D: DelayNs>(
        mut io: I,
        mut reset: Option<RST>,
        config: &PanelConfig,
        delay: &mut D,
    ) -> Result<Self, Error> {
        config.validate()?;
        // validate() admits only depths colmod_for_depth knows.
        let colmod = colmod_for_depth(config.bits_per_pixel).ok_or(
            crate::error::ConfigError::UnsupportedBitDepth(config.bits_per_pixel),
        )?;

        match reset.as_mut() {
            Some(pin) => {
                set_pin(pin, config.reset_active_high)?;
                delay.delay_ms(config.reset_hold_ms);
                set_pin(pin, !config.reset_active_high)?;
                delay.delay_ms(config.reset_settle_ms);
            }
            None => {
                C::soft_reset(&mut io)?;
                delay.delay_ms(config.reset_settle_ms);
            }
        }

        C::init_sequence(&mut io, delay)?;

        let mut panel = Panel {
            io,
            reset,
            width: config.width,
            height: config.height,
            native_w: config.width,
            native_h: config.height,
            rotation: Rotation::Deg0,
            x_gap: config.x_gap,
            y_gap: config.y_gap,
            bytes_per_pixel: config.bytes_per_pixel(),
            madctl: 0,
            color_order: config.color_order,
            cpu_transpose: config.cpu_transpose,
            swap_color_bytes: config.swap_color_bytes,
            state: State::Ready,
            _controller: PhantomData,
        };

        panel.apply_rotation(config.rotation)?;
        C::write_colmod(&mut panel.io, colmod)?;
        if config.invert_colors {
            C::invert(&mut panel.io, true)?;
        }
        C::display_on(&mut panel.io, true)?;

        log::info!(
            "panel up: {}x{} rotation {:?} gap ({},{}) madctl 0x{:02X} colmod 0x{:02X}",
            panel.width,
            panel.height,
            panel.rotation,
            panel.x_gap,
            panel.y_gap,
            panel.madctl,
            colmod
        );
        Ok(panel)
    }

    /// Logical width under the current rotation.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Logical height under the current rotation.
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn is_sleeping(&self) -> bool {
        self.state == State::Sleeping
    }

    /// Writes a rectangle of pixels and signals completion.
    ///
    /// `rect` is end-exclusive in logical coordinates; `pixels` is the
    /// caller's row-major, unpadded buffer for exactly that rectangle. The
    /// buffer is not retained past the `on_done` call, which fires exactly
    /// once after the final chunk has been accepted by the bus. Out-of-range
    /// rectangles are not clipped; the rectangle/buffer size agreement is
    /// checked in debug builds only.
    pub fn flush<F: FnOnce()>(
        &mut self,
        rect: Rect,
        pixels: &[u8],
        on_done: F,
    ) -> Result<(), Error> {
        if self.state == State::Sleeping {
            return Err(StateError::Sleeping.into());
        }
        #[cfg(debug_assertions)]
        {
            let expected = rect.area() * self.bytes_per_pixel;
            if pixels.len() != expected {
                return Err(Error::BufferContract {
                    expected,
                    actual: pixels.len(),
                });
            }
        }

        // With hardware transpose active the controller frame is the logical
        // frame; with CPU transpose the window must be mapped ourselves.
        let native = if self.cpu_transpose {
            rect_to_native(rect, self.rotation, self.native_w, self.native_h)
        } else {
            rect
        };

        C::set_address_window(
            &mut self.io,
            native.x0 + self.x_gap,
            native.y0 + self.y_gap,
            native.x1 + self.x_gap,
            native.y1 + self.y_gap,
        )?;
        C::begin_memory_write(&mut self.io)?;

        if self.cpu_transpose && self.rotation != Rotation::Deg0 {
            self.stream_transposed(rect, native, pixels)?;
        } else if self.swap_color_bytes {
            self.stream_swapped(pixels)?;
        } else {
            self.stream_plain(pixels)?;
        }

        on_done();
        Ok(())
    }

    /// Sends the buffer as-is in ceiling-sized, pixel-aligned chunks.
    fn stream_plain(&mut self, pixels: &[u8]) -> Result<(), TransportError> {
        let chunk = chunk_len(self.io.max_transfer_size(), self.bytes_per_pixel);
        let mut sent = 0;
        for part in pixels.chunks(chunk) {
            self.io.send_pixels(part).map_err(|e| e.offset_by(sent))?;
            sent += part.len();
        }
        Ok(())
    }

    /// Per-pixel byte swap, streamed through the stack scratch so no second
    /// frame buffer is ever materialized.
    fn stream_swapped(&mut self, pixels: &[u8]) -> Result<(), TransportError> {
        let mut scratch = [0u8; SCRATCH_LEN];
        let chunk = chunk_len(
            self.io.max_transfer_size().min(SCRATCH_LEN),
            self.bytes_per_pixel,
        );
        let mut sent = 0;
        for part in pixels.chunks(chunk) {
            for (dst, src) in scratch.chunks_exact_mut(2).zip(part.chunks_exact(2)) {
                dst[0] = src[1];
                dst[1] = src[0];
            }
            self.io
                .send_pixels(&scratch[..part.len()])
                .map_err(|e| e.offset_by(sent))?;
            sent += part.len();
        }
        Ok(())
    }

    /// CPU-side rotation: walks the native window in row order, gathering
    /// each output pixel from its logical position in the caller's buffer.
    fn stream_transposed(
        &mut self,
        rect: Rect,
        native: Rect,
        pixels: &[u8],
    ) -> Result<(), TransportError> {
        let mut scratch = [0u8; SCRATCH_LEN];
        let cap = chunk_len(
            self.io.max_transfer_size().min(SCRATCH_LEN),
            self.bytes_per_pixel,
        );
        let row = usize::from(rect.width());
        let mut fill = 0;
        let mut sent = 0;
        for ny in native.y0..native.y1 {
            for nx in native.x0..native.x1 {
                let (lx, ly) =
                    point_to_logical(nx, ny, self.rotation, self.native_w, self.native_h);
                let idx =
                    (usize::from(ly - rect.y0) * row + usize::from(lx - rect.x0)) * 2;
                if self.swap_color_bytes {
                    scratch[fill] = pixels[idx + 1];
                    scratch[fill + 1] = pixels[idx];
                } else {
                    scratch[fill] = pixels[idx];
                    scratch[fill + 1] = pixels[idx + 1];
                }
                fill += 2;
                if fill == cap {
                    self.io
                        .send_pixels(&scratch[..fill])
                        .map_err(|e| e.offset_by(sent))?;
                    sent += fill;
                    fill = 0;
                }
            }
        }
        if fill > 0 {
            self.io
                .send_pixels(&scratch[..fill])
                .map_err(|e| e.offset_by(sent))?;
        }
        Ok(())
    }

    /// Changes orientation. Swaps the reported width/height on quarter
    /// turns; gaps are never swapped. Resets any mirror adjustment.
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Error> {
        self.ensure_ready()?;
        self.apply_rotation(rotation)?;
        log::debug!("rotation {:?}, logical {}x{}", rotation, self.width, self.height);
        Ok(())
    }

    fn apply_rotation(&mut self, rotation: Rotation) -> Result<(), Error> {
        self.rotation = rotation;
        if rotation.is_transposed() {
            self.width = self.native_h;
            self.height = self.native_w;
        } else {
            self.width = self.native_w;
            self.height = self.native_h;
        }
        // CPU transpose keeps the controller in its native scan order.
        let base = if self.cpu_transpose {
            C::madctl_for(Rotation::Deg0)
        } else {
            C::madctl_for(rotation)
        };
        self.madctl = match self.color_order {
            ColorOrder::Rgb => base,
            ColorOrder::Bgr => base | Madctl::BGR.bits(),
        };
        C::write_madctl(&mut self.io, self.madctl)?;
        Ok(())
    }

    /// Mirrors the scan on either axis on top of the current rotation.
    pub fn set_mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<(), Error> {
        self.ensure_ready()?;
        let mut val = self.madctl;
        if mirror_x {
            val |= Madctl::MX.bits();
        } else {
            val &= !Madctl::MX.bits();
        }
        if mirror_y {
            val |= Madctl::MY.bits();
        } else {
            val &= !Madctl::MY.bits();
        }
        self.madctl = val;
        C::write_madctl(&mut self.io, val)?;
        Ok(())
    }

    /// Toggles the hardware row/column exchange bit directly.
    pub fn set_swap_xy(&mut self, swap: bool) -> Result<(), Error> {
        self.ensure_ready()?;
        let mut val = self.madctl;
        if swap {
            val |= Madctl::MV.bits();
        } else {
            val &= !Madctl::MV.bits();
        }
        self.madctl = val;
        C::write_madctl(&mut self.io, val)?;
        Ok(())
    }

    /// Moves the visible window within controller memory. Takes effect on
    /// the next flush; no bus traffic.
    pub fn set_gap(&mut self, x_gap: u16, y_gap: u16) -> Result<(), Error> {
        self.ensure_ready()?;
        self.x_gap = x_gap;
        self.y_gap = y_gap;
        Ok(())
    }

    pub fn set_invert(&mut self, invert: bool) -> Result<(), Error> {
        self.ensure_ready()?;
        C::invert(&mut self.io, invert)?;
        Ok(())
    }

    pub fn display_on(&mut self, on: bool) -> Result<(), Error> {
        self.ensure_ready()?;
        C::display_on(&mut self.io, on)?;
        Ok(())
    }

    /// Enters sleep mode. Flushes and state changes are rejected until
    /// [`wake`](Self::wake), not queued.
    pub fn sleep(&mut self) -> Result<(), Error> {
        if self.state == State::Sleeping {
            return Ok(());
        }
        C::sleep_in(&mut self.io)?;
        self.state = State::Sleeping;
        Ok(())
    }

    /// Leaves sleep mode, holding off until the panel has settled.
    pub fn wake<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        if self.state == State::Ready {
            return Ok(());
        }
        C::sleep_out(&mut self.io)?;
        delay.delay_ms(WAKE_SETTLE_MS);
        self.state = State::Ready;
        Ok(())
    }

    /// Tears the driver down, handing back the transport and reset pin.
    pub fn release(self) -> (I, Option<RST>) {
        (self.io, self.reset)
    }

    fn ensure_ready(&self) -> Result<(), StateError> {
        match self.state {
            State::Ready => Ok(()),
            State::Sleeping => Err(StateError::Sleeping),
        }
    }
}

fn set_pin<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), TransportError> {
    let r = if high { pin.set_high() } else { pin.set_low() };
    r.map_err(|_| TransportError::new(TransportErrorKind::Pin))
}
