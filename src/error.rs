//! Errors that can occur when driving a sensor.
//!
//! [`SensorError`] is what fallible operations return. It is generic over the
//! underlying transport error type. [`ErrorKind`] is the coarse classification
//! a [`Sensor`](crate::Sensor) records as its last error.

use core::fmt;
use core::ops::{BitAnd, BitOr};

/// This represents all possible errors that can occur when using a sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorError<BusError> {
    /// The transport failed (NACK, timeout, arbitration loss...).
    NotResponding(BusError),

    /// The operation is not valid in the current state of the conversion state machine.
    Busy,

    /// The device answered with an unexpected product identifier.
    UnexpectedIdentity(u8),

    /// The device did not raise a ready flag within the bounded number of polls.
    Timeout,

    /// Anything else.
    Unknown,
}

/// Type alias used to simplify return types throughout the driver
pub type SensorResult<T, BusError> = Result<T, SensorError<BusError>>;

impl<BusError> SensorError<BusError> {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SensorError::NotResponding(_) | SensorError::Timeout => ErrorKind::FailedNotResponding,
            SensorError::Busy => ErrorKind::FailedBusy,
            SensorError::UnexpectedIdentity(_) | SensorError::Unknown => ErrorKind::FailedUnknown,
        }
    }
}

impl<BusError: fmt::Debug> fmt::Display for SensorError<BusError> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::NotResponding(e) => write!(f, "device not responding: {e:?}"),
            SensorError::Busy => f.write_str("device busy"),
            SensorError::UnexpectedIdentity(id) => write!(f, "unexpected product id 0x{id:02X}"),
            SensorError::Timeout => f.write_str("timed out waiting for device"),
            SensorError::Unknown => f.write_str("unknown error"),
        }
    }
}

/// Result classification recorded by a sensor handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ErrorKind {
    /// Operation completed successfully.
    Success,
    /// The device is not responding on the bus.
    FailedNotResponding,
    /// The device is busy with another operation.
    FailedBusy,
    /// Default for a fresh session, or an unmapped failure.
    #[default]
    FailedUnknown,
}

/// The combinators are for callers that drive several sessions, or several
/// steps, and want one combined result. The drivers themselves stop at the
/// first failure.
impl ErrorKind {
    pub fn is_success(self) -> bool {
        self == ErrorKind::Success
    }

    /// [`Success`](ErrorKind::Success) only if both are successful, otherwise [`FailedUnknown`](ErrorKind::FailedUnknown).
    pub fn and(self, rhs: ErrorKind) -> ErrorKind {
        if self.is_success() && rhs.is_success() {
            ErrorKind::Success
        } else {
            ErrorKind::FailedUnknown
        }
    }

    /// [`Success`](ErrorKind::Success) if either is successful, otherwise [`FailedUnknown`](ErrorKind::FailedUnknown).
    pub fn or(self, rhs: ErrorKind) -> ErrorKind {
        if self.is_success() || rhs.is_success() {
            ErrorKind::Success
        } else {
            ErrorKind::FailedUnknown
        }
    }

    /// Folds the outcome of any number of independent steps; all must succeed.
    pub fn all<I: IntoIterator<Item = ErrorKind>>(kinds: I) -> ErrorKind {
        kinds.into_iter().fold(ErrorKind::Success, ErrorKind::and)
    }

    /// Folds the outcome of any number of independent steps; at least one must succeed.
    pub fn any<I: IntoIterator<Item = ErrorKind>>(kinds: I) -> ErrorKind {
        kinds.into_iter().fold(ErrorKind::FailedUnknown, ErrorKind::or)
    }
}

impl BitAnd for ErrorKind {
    type Output = ErrorKind;

    fn bitand(self, rhs: ErrorKind) -> ErrorKind {
        self.and(rhs)
    }
}

impl BitOr for ErrorKind {
    type Output = ErrorKind;

    fn bitor(self, rhs: ErrorKind) -> ErrorKind {
        self.or(rhs)
    }
}

impl<T, E> From<&Result<T, SensorError<E>>> for ErrorKind {
    fn from(result: &Result<T, SensorError<E>>) -> Self {
        match result {
            Ok(_) => ErrorKind::Success,
            Err(e) => e.kind(),
        }
    }
}

/// Capacity of a rendered error message.
pub const ERROR_MESSAGE_LEN: usize = 48;

/// Renders the human readable message for `kind` on the device called `device`.
///
/// [`Success`](ErrorKind::Success) renders as an empty string.
pub fn error_message(device: &str, kind: ErrorKind) -> heapless::String<ERROR_MESSAGE_LEN> {
    use core::fmt::Write;

    let mut message = heapless::String::new();
    // Device names are short, a truncated message is still useful.
    let _ = match kind {
        ErrorKind::Success => Ok(()),
        ErrorKind::FailedBusy => write!(message, "Error: {device} is busy"),
        ErrorKind::FailedNotResponding => write!(message, "Error: {device} is not responding"),
        ErrorKind::FailedUnknown => write!(message, "Error: Unknown issue with {device}"),
    };
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_combinators() {
        use ErrorKind::*;

        assert_eq!(Success, Success & Success);
        assert_eq!(FailedUnknown, Success & FailedBusy);
        assert_eq!(FailedUnknown, FailedNotResponding & FailedBusy);

        assert_eq!(Success, Success | FailedBusy);
        assert_eq!(Success, FailedNotResponding | Success);
        assert_eq!(FailedUnknown, FailedNotResponding | FailedBusy);

        assert_eq!(Success, ErrorKind::all([Success, Success, Success]));
        assert_eq!(FailedUnknown, ErrorKind::all([Success, FailedBusy, Success]));
        assert_eq!(Success, ErrorKind::any([FailedBusy, Success]));
        assert_eq!(FailedUnknown, ErrorKind::any([]));
    }

    #[test]
    fn error_kinds() {
        assert_eq!(ErrorKind::FailedNotResponding, SensorError::NotResponding(()).kind());
        assert_eq!(ErrorKind::FailedNotResponding, SensorError::<()>::Timeout.kind());
        assert_eq!(ErrorKind::FailedBusy, SensorError::<()>::Busy.kind());
        assert_eq!(ErrorKind::FailedUnknown, SensorError::<()>::UnexpectedIdentity(0x42).kind());
        assert_eq!(ErrorKind::FailedUnknown, ErrorKind::default());

        let ok: Result<(), SensorError<()>> = Ok(());
        assert_eq!(ErrorKind::Success, ErrorKind::from(&ok));
    }

    #[test]
    fn messages() {
        assert_eq!("Error: DPS310 is busy", error_message("DPS310", ErrorKind::FailedBusy).as_str());
        assert_eq!(
            "Error: ADS1x1x is not responding",
            error_message("ADS1x1x", ErrorKind::FailedNotResponding).as_str()
        );
        assert_eq!(
            "Error: Unknown issue with DPS310",
            error_message("DPS310", ErrorKind::FailedUnknown).as_str()
        );
        assert!(error_message("DPS310", ErrorKind::Success).is_empty());
    }
}
