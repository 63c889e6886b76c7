//! Panel configuration, validated before any bus traffic.

use crate::error::ConfigError;
use crate::geometry::Rotation;

/// Color component order in panel memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    #[default]
    Rgb,
    /// Sets the MADCTL BGR bit on every orientation write.
    Bgr,
}

/// Static description of one panel wiring.
///
/// `width` and `height` are the native (un-rotated) resolution; the driver
/// reports them swapped while a quarter-turn rotation is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// Native horizontal resolution in pixels.
    pub width: u16,
    /// Native vertical resolution in pixels.
    pub height: u16,
    /// Initial orientation.
    pub rotation: Rotation,
    pub color_order: ColorOrder,
    /// Frame buffer color depth. Only 16-bit RGB565 is accepted.
    pub bits_per_pixel: u8,
    /// Horizontal offset of the visible area within controller memory.
    pub x_gap: u16,
    /// Vertical offset of the visible area within controller memory.
    pub y_gap: u16,
    /// Level that asserts the reset line.
    pub reset_active_high: bool,
    /// How long reset is held asserted, in milliseconds.
    pub reset_hold_ms: u32,
    /// Settle time after reset release (or after a soft reset), ms.
    pub reset_settle_ms: u32,
    /// Rotate on the CPU instead of via the MADCTL transpose bit.
    ///
    /// Some controller/bus combinations refresh visibly worse with MV set;
    /// this trades bus-side simplicity for a per-pixel copy on quarter turns.
    pub cpu_transpose: bool,
    /// Swap the two bytes of every RGB565 pixel while streaming.
    ///
    /// For hosts whose frame buffer endianness disagrees with the bus.
    pub swap_color_bytes: bool,
    /// Start with color inversion enabled.
    pub invert_colors: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            width: 0,
            height: 0,
            rotation: Rotation::Deg0,
            color_order: ColorOrder::default(),
            bits_per_pixel: 16,
            x_gap: 0,
            y_gap: 0,
            reset_active_high: false,
            reset_hold_ms: 20,
            reset_settle_ms: 20,
            cpu_transpose: false,
            swap_color_bytes: false,
            invert_colors: false,
        }
    }
}

impl PanelConfig {
    /// A config with the given native resolution and defaults for the rest.
    pub fn new(width: u16, height: u16) -> Self {
        PanelConfig {
            width,
            height,
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        if self.bits_per_pixel != 16 {
            return Err(ConfigError::UnsupportedBitDepth(self.bits_per_pixel));
        }
        Ok(())
    }

    pub(crate) fn bytes_per_pixel(&self) -> usize {
        usize::from(self.bits_per_pixel) / 8
    }
}
