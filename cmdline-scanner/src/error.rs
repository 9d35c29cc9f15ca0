use std::ffi::{OsStr, OsString};
use std::fmt;

/// The name of an option as it would be written on the command line.
///
/// This is what errors use to refer to the option they are about.  Long
/// option names are converted lossily since they only end up in messages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionName {
    /// A single character option (`-x`).
    ///
    /// The bare `-` argument is reported with the code `'\0'`.
    Short(char),
    /// A long option (`--name`), without the leading dashes.
    Long(String),
}

impl OptionName {
    pub(crate) fn long(name: &OsStr) -> OptionName {
        OptionName::Long(name.to_string_lossy().into_owned())
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionName::Short('\0') => write!(f, "-"),
            OptionName::Short(c) => write!(f, "-{}", c),
            OptionName::Long(name) => write!(f, "--{}", name),
        }
    }
}

/// Errors a [`Handler`](crate::Handler) can produce while making sense of
/// what the scanner reports.
///
/// The scanner itself never fails.  These errors come out of the
/// conveniences on [`Parser`](crate::Parser) (like [`Parser::value`](crate::Parser::value))
/// and out of [`Arg::into_unexpected_error`](crate::Arg::into_unexpected_error), and
/// it is up to the handler to decide what to do with them.  [`try_parse`](crate::try_parse)
/// stops at the first one and hands it back.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An option asked for a parameter but there was none left.
    #[error("missing argument for option {option}")]
    MissingParam { option: OptionName },
    /// A parameter was requested as string but is not valid unicode.
    #[error("argument for option {option} is invalid unicode")]
    InvalidUnicode { option: OptionName, value: OsString },
    /// A parameter could not be parsed into the requested type.
    #[error("argument for option {option} is invalid")]
    InvalidValue {
        option: OptionName,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    /// The handler does not know this option.
    #[error("unexpected option {0}")]
    UnexpectedOption(OptionName),
    /// The handler does not accept this operand.
    #[error("unexpected argument {:?}", .0.to_string_lossy())]
    UnexpectedOperand(OsString),
    /// A custom message
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Returns the option this error is about, if there is one.
    pub fn option(&self) -> Option<&OptionName> {
        match self {
            Error::MissingParam { option }
            | Error::InvalidUnicode { option, .. }
            | Error::InvalidValue { option, .. }
            | Error::UnexpectedOption(option) => Some(option),
            Error::UnexpectedOperand(_) | Error::Custom(_) => None,
        }
    }

    /// Returns the offending raw value, if there is one.
    pub fn raw_value(&self) -> Option<&OsStr> {
        match self {
            Error::InvalidUnicode { value, .. } | Error::UnexpectedOperand(value) => Some(value),
            Error::InvalidValue { value, .. } => Some(OsStr::new(value)),
            Error::MissingParam { .. } | Error::UnexpectedOption(_) | Error::Custom(_) => None,
        }
    }
}

impl<'s> From<&'s str> for Error {
    fn from(message: &'s str) -> Error {
        Error::from(message.to_string())
    }
}

impl From<String> for Error {
    fn from(message: String) -> Error {
        Error::Custom(message)
    }
}
