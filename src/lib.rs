//! Panel driver core for the TFT controllers found on 3D-printer and CNC
//! touch-panel boards.
//!
//! The crate is split the way the hardware is:
//!
//! - [`interface`] carries bytes: an 8080-style 16-bit parallel bus or an SPI
//!   link, behind one [`Interface`](interface::Interface) contract.
//! - [`controller`] speaks registers: per-family init sequences, address
//!   windowing, and MADCTL orientation tables ([`rm68120`], [`ili9341`]).
//! - [`geometry`] maps flush rectangles between the rotated logical frame and
//!   the controller's native frame.
//! - [`panel`] composes them into a driver with a reset/init/flush/sleep
//!   lifecycle.
//!
//! Everything is generic over `embedded-hal` 1.0 traits, holds no allocation,
//! and blocks on the bus. A panel has a single logical owner; completion of a
//! flush is signalled through a callback so a display stack can recycle the
//! buffer.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod controller;
pub mod dcs;
pub mod error;
pub mod geometry;
pub mod ili9341;
pub mod interface;
pub mod panel;
pub mod rm68120;

pub use config::{ColorOrder, PanelConfig};
pub use controller::{Controller, InitCommand};
pub use error::{ConfigError, Error, StateError, TransportError, TransportErrorKind};
pub use geometry::{Rect, Rotation};
pub use ili9341::Ili9341;
pub use interface::{CommandWidth, Interface, OutputBus, ParallelInterface, SpiInterface};
pub use panel::Panel;
pub use rm68120::Rm68120;
