//! Rotation and address-window geometry.
//!
//! Flush rectangles arrive in the logical (rotated) display space the UI
//! stack sees. The register protocol wants them in the controller's native,
//! un-rotated frame. This module holds that mapping, its inverse, and the
//! chunk sizing used to split pixel streams at the bus transfer ceiling.

/// Display orientation, quarter turns clockwise from the panel's native frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// Native orientation.
    #[default]
    Deg0,
    /// 90 degrees clockwise.
    Deg90,
    /// Upside down.
    Deg180,
    /// 270 degrees clockwise.
    Deg270,
}

impl Rotation {
    /// Whether this rotation swaps rows and columns.
    pub fn is_transposed(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Index into per-controller MADCTL lookup tables.
    pub(crate) fn index(self) -> usize {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }
}

/// An end-exclusive rectangle: `x0 <= x < x1`, `y0 <= y < y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Rect {
    pub fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Rect { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> u16 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u16 {
        self.y1 - self.y0
    }

    /// Pixel count covered by the rectangle.
    pub fn area(&self) -> usize {
        usize::from(self.width()) * usize::from(self.height())
    }
}

/// Maps a rectangle from logical (rotated) space into the controller's
/// native frame of `native_w` x `native_h` pixels.
pub fn rect_to_native(r: Rect, rotation: Rotation, native_w: u16, native_h: u16) -> Rect {
    match rotation {
        Rotation::Deg0 => r,
        Rotation::Deg90 => Rect::new(r.y0, native_h - r.x1, r.y1, native_h - r.x0),
        Rotation::Deg180 => Rect::new(
            native_w - r.x1,
            native_h - r.y1,
            native_w - r.x0,
            native_h - r.y0,
        ),
        Rotation::Deg270 => Rect::new(native_w - r.y1, r.x0, native_w - r.y0, r.x1),
    }
}

/// Inverse of [`rect_to_native`].
pub fn rect_to_logical(r: Rect, rotation: Rotation, native_w: u16, native_h: u16) -> Rect {
    match rotation {
        Rotation::Deg0 => r,
        Rotation::Deg90 => Rect::new(native_h - r.y1, r.x0, native_h - r.y0, r.x1),
        Rotation::Deg180 => Rect::new(
            native_w - r.x1,
            native_h - r.y1,
            native_w - r.x0,
            native_h - r.y0,
        ),
        Rotation::Deg270 => Rect::new(r.y0, native_w - r.x1, r.y1, native_w - r.x0),
    }
}

/// Maps a single native-frame pixel back into logical space.
///
/// Used by the CPU-side transpose path to locate each output pixel in the
/// caller's row-major logical buffer.
pub(crate) fn point_to_logical(
    nx: u16,
    ny: u16,
    rotation: Rotation,
    native_w: u16,
    native_h: u16,
) -> (u16, u16) {
    match rotation {
        Rotation::Deg0 => (nx, ny),
        Rotation::Deg90 => (native_h - 1 - ny, nx),
        Rotation::Deg180 => (native_w - 1 - nx, native_h - 1 - ny),
        Rotation::Deg270 => (ny, native_w - 1 - nx),
    }
}

/// Largest pixel-aligned chunk length that fits under the transfer ceiling.
///
/// Chunk boundaries depend only on the ceiling and the pixel size, so
/// re-chunking the same buffer always yields the same boundaries.
pub fn chunk_len(max_transfer: usize, bytes_per_pixel: usize) -> usize {
    let len = (max_transfer / bytes_per_pixel) * bytes_per_pixel;
    // A ceiling below one pixel would make no forward progress.
    len.max(bytes_per_pixel)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    #[test]
    fn rotation_mapping_round_trips() {
        let (nw, nh) = (800, 480);
        for rot in ALL {
            // Logical space is transposed for quarter turns.
            let (lw, lh) = if rot.is_transposed() { (nh, nw) } else { (nw, nh) };
            let cases = [
                Rect::new(0, 0, lw, lh),
                Rect::new(0, 0, 1, 1),
                Rect::new(10, 20, 110, 70),
                Rect::new(lw - 5, lh - 7, lw, lh),
            ];
            for r in cases {
                let native = rect_to_native(r, rot, nw, nh);
                assert_eq!(rect_to_logical(native, rot, nw, nh), r, "rotation {rot:?}");
            }
        }
    }

    #[test]
    fn native_rect_stays_in_bounds() {
        let (nw, nh) = (320, 240);
        for rot in ALL {
            let (lw, lh) = if rot.is_transposed() { (nh, nw) } else { (nw, nh) };
            let native = rect_to_native(Rect::new(0, 0, lw, lh), rot, nw, nh);
            assert_eq!((native.x0, native.y0), (0, 0));
            assert_eq!((native.x1, native.y1), (nw, nh));
        }
    }

    #[test]
    fn quarter_turn_transposes_extents() {
        let r = Rect::new(0, 0, 50, 100);
        let native = rect_to_native(r, Rotation::Deg90, 800, 480);
        assert_eq!(native, Rect::new(0, 430, 100, 480));
        assert_eq!(native.width(), r.height());
        assert_eq!(native.height(), r.width());
    }

    #[test]
    fn point_mapping_agrees_with_rect_mapping() {
        let (nw, nh) = (800, 480);
        for rot in ALL {
            let (lw, lh) = if rot.is_transposed() { (nh, nw) } else { (nw, nh) };
            let r = Rect::new(3, 5, lw - 11, lh - 2);
            let native = rect_to_native(r, rot, nw, nh);
            // Every native point must map back inside the logical rectangle.
            for ny in native.y0..native.y1 {
                for nx in native.x0..native.x1 {
                    let (lx, ly) = point_to_logical(nx, ny, rot, nw, nh);
                    assert!(lx >= r.x0 && lx < r.x1, "{rot:?} ({nx},{ny}) -> ({lx},{ly})");
                    assert!(ly >= r.y0 && ly < r.y1, "{rot:?} ({nx},{ny}) -> ({lx},{ly})");
                }
            }
        }
    }

    #[test]
    fn chunk_len_is_pixel_aligned() {
        assert_eq!(chunk_len(4096, 2), 4096);
        assert_eq!(chunk_len(4095, 2), 4094);
        assert_eq!(chunk_len(3, 2), 2);
        // Degenerate ceiling still makes progress.
        assert_eq!(chunk_len(1, 2), 2);
    }
}
