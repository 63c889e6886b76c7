//! Error types shared by the panel driver and the bus transports.

use core::fmt;

/// Top-level error returned by [`Panel`](crate::panel::Panel) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The configuration was rejected before any hardware access.
    Config(ConfigError),
    /// The bus transport reported a failure.
    Transport(TransportError),
    /// The operation is not valid in the panel's current lifecycle state.
    State(StateError),
    /// Flush rectangle and pixel buffer disagree about the transfer size.
    ///
    /// Checked in debug builds only; the driver does not clip, so a mismatch
    /// is a caller contract violation rather than a recoverable condition.
    BufferContract {
        /// Bytes implied by the flush rectangle and bit depth.
        expected: usize,
        /// Bytes actually supplied by the caller.
        actual: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "configuration rejected: {e}"),
            Error::Transport(e) => write!(f, "bus transport failed: {e}"),
            Error::State(e) => write!(f, "invalid panel state: {e}"),
            Error::BufferContract { expected, actual } => write!(
                f,
                "pixel buffer size mismatch: rectangle implies {expected} bytes, got {actual}"
            ),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

impl From<StateError> for Error {
    fn from(e: StateError) -> Self {
        Error::State(e)
    }
}

/// Invalid panel configuration, detected before any bus traffic.
///
/// Construction failures are fatal: no handle is returned and retrying with
/// the same configuration will fail again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Only 16-bit RGB565 is supported by the observed hardware variants.
    UnsupportedBitDepth(u8),
    /// Width or height of zero.
    ZeroResolution,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsupportedBitDepth(bpp) => {
                write!(f, "unsupported bits-per-pixel: {bpp}")
            }
            ConfigError::ZeroResolution => write!(f, "panel resolution must be non-zero"),
        }
    }
}

/// A bus-level failure, carrying the byte offset at which it occurred.
///
/// Transports never retry; retry policy belongs to the display-stack adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportError {
    /// What went wrong on the bus.
    pub kind: TransportErrorKind,
    /// Byte offset within the overall transfer at which the failure occurred.
    pub offset: usize,
}

impl TransportError {
    /// A failure at the start of a transfer.
    pub fn new(kind: TransportErrorKind) -> Self {
        TransportError { kind, offset: 0 }
    }

    /// A failure at a known byte offset.
    pub fn at(kind: TransportErrorKind, offset: usize) -> Self {
        TransportError { kind, offset }
    }

    /// Re-bases the offset when a chunked caller propagates the error.
    pub fn offset_by(self, base: usize) -> Self {
        TransportError {
            kind: self.kind,
            offset: self.offset + base,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte offset {}", self.kind, self.offset)
    }
}

/// Classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Write on the data bus failed or was not acknowledged.
    Bus,
    /// A control line (DC/WR/CS/RST) could not be driven.
    Pin,
    /// The bus did not complete the transfer in time.
    Timeout,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::Bus => write!(f, "bus write error"),
            TransportErrorKind::Pin => write!(f, "control pin error"),
            TransportErrorKind::Timeout => write!(f, "bus timeout"),
        }
    }
}

/// Operation attempted in a lifecycle state that forbids it.
///
/// Always a caller bug signal, never expected in correct operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// The panel is sleeping; flushes and state changes are rejected, not queued.
    Sleeping,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::Sleeping => write!(f, "panel is in sleep mode"),
        }
    }
}
