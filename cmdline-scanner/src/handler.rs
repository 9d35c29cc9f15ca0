use std::ffi::OsStr;

use crate::error::{Error, OptionName};
use crate::parser::Parser;

/// Receives what the scanner finds on the command line.
///
/// Every method returns `true` to keep parsing or `false` to stop right
/// there.  Once a method returned `false` no further method is invoked and
/// [`parse`](crate::parse) reports [`Outcome::Stopped`](crate::Outcome::Stopped).
///
/// The option methods receive the [`Parser`] so that they can ask for the
/// option's parameter with [`Parser::param`].  Whether an option has a
/// parameter is only decided at that moment.  An option that does not ask
/// does not consume anything: for `--name value` a handler that never calls
/// [`Parser::param`] will see `value` again as an operand on the next step.
pub trait Handler {
    /// Called for a positional argument.
    fn handle_operand(&mut self, operand: &OsStr) -> bool;

    /// Called for every short option, including every code of a chain like
    /// `-abc`.  The bare `-` argument arrives as the code `'\0'`.
    fn handle_short_option(&mut self, option: char, parser: &mut Parser<'_>) -> bool;

    /// Called for a long option with the name between `--` and the first `=`.
    fn handle_long_option(&mut self, option: &OsStr, parser: &mut Parser<'_>) -> bool;
}

impl<H: Handler + ?Sized> Handler for &mut H {
    fn handle_operand(&mut self, operand: &OsStr) -> bool {
        (**self).handle_operand(operand)
    }

    fn handle_short_option(&mut self, option: char, parser: &mut Parser<'_>) -> bool {
        (**self).handle_short_option(option, parser)
    }

    fn handle_long_option(&mut self, option: &OsStr, parser: &mut Parser<'_>) -> bool {
        (**self).handle_long_option(option, parser)
    }
}

/// A single unit of the command line without its parameter.
///
/// This is what the parser reports as [`Parser::current`] and what the
/// closure based APIs match on through [`Event::arg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arg<'s> {
    /// A positional argument
    Operand(&'s OsStr),
    /// A single character option
    Short(char),
    /// A long option, without the leading `--` and the `=value` part
    Long(&'s OsStr),
}

impl<'s> Arg<'s> {
    /// Is this a specific short option?
    pub fn is_short(&self, c: char) -> bool {
        match self {
            Arg::Short(r) => c == *r,
            Arg::Long(_) | Arg::Operand(_) => false,
        }
    }

    /// Is this a specific long option?
    pub fn is_long(&self, name: &str) -> bool {
        match self {
            Arg::Long(s) => *s == name,
            Arg::Short(_) | Arg::Operand(_) => false,
        }
    }

    /// Is this either the given short or the given long option?
    pub fn is_either(&self, c: char, name: &str) -> bool {
        self.is_short(c) || self.is_long(name)
    }

    /// Is this a positional argument?
    pub fn is_operand(&self) -> bool {
        matches!(self, Arg::Operand(_))
    }

    /// Returns the name of the option, or `None` for operands.
    pub fn option_name(&self) -> Option<OptionName> {
        match *self {
            Arg::Short(c) => Some(OptionName::Short(c)),
            Arg::Long(name) => Some(OptionName::long(name)),
            Arg::Operand(_) => None,
        }
    }

    /// Consumes the argument and creates an unexpected error.
    pub fn into_unexpected_error(self) -> Error {
        match self {
            Arg::Short(c) => Error::UnexpectedOption(OptionName::Short(c)),
            Arg::Long(name) => Error::UnexpectedOption(OptionName::long(name)),
            Arg::Operand(operand) => Error::UnexpectedOperand(operand.to_os_string()),
        }
    }
}

/// A callback invocation in closure form.
///
/// Option events carry the parser so the closure can resolve the parameter
/// exactly like a [`Handler`] method would.
#[derive(Debug)]
pub enum Event<'e, 'a> {
    /// A positional argument
    Operand(&'e OsStr),
    /// A single character option and the parser to resolve its parameter
    Short(char, &'e mut Parser<'a>),
    /// A long option name and the parser to resolve its parameter
    Long(&'e OsStr, &'e mut Parser<'a>),
}

impl Event<'_, '_> {
    /// Returns the event without the parser.
    pub fn arg(&self) -> Arg<'_> {
        match self {
            Event::Operand(operand) => Arg::Operand(operand),
            Event::Short(c, _) => Arg::Short(*c),
            Event::Long(name, _) => Arg::Long(name),
        }
    }
}

/// Adapts a closure into a [`Handler`].
///
/// ```
/// use cmdline_scanner::{from_fn, parse, Event, Outcome};
///
/// let mut verbose = 0;
/// let mut files = Vec::new();
/// let outcome = parse(
///     &["-vv", "a.txt", "--verbose"],
///     &mut from_fn(|event| {
///         match event {
///             Event::Short('v', _) => verbose += 1,
///             Event::Long(name, _) if name == "verbose" => verbose += 1,
///             Event::Operand(file) => files.push(file.to_os_string()),
///             _ => return false,
///         }
///         true
///     }),
/// );
/// assert_eq!(outcome, Outcome::Completed);
/// assert_eq!(verbose, 3);
/// assert_eq!(files, ["a.txt"]);
/// ```
pub fn from_fn<F>(f: F) -> FnHandler<F>
where
    F: FnMut(Event<'_, '_>) -> bool,
{
    FnHandler(f)
}

/// A [`Handler`] made from a closure with [`from_fn`].
#[derive(Debug, Clone)]
pub struct FnHandler<F>(F);

impl<F> Handler for FnHandler<F>
where
    F: FnMut(Event<'_, '_>) -> bool,
{
    fn handle_operand(&mut self, operand: &OsStr) -> bool {
        (self.0)(Event::Operand(operand))
    }

    fn handle_short_option(&mut self, option: char, parser: &mut Parser<'_>) -> bool {
        (self.0)(Event::Short(option, parser))
    }

    fn handle_long_option(&mut self, option: &OsStr, parser: &mut Parser<'_>) -> bool {
        (self.0)(Event::Long(option, parser))
    }
}

/// Stops at the first error the closure returns and keeps it.
pub(crate) struct TryHandler<F, E> {
    f: F,
    error: Option<E>,
}

impl<F, E> TryHandler<F, E>
where
    F: FnMut(Event<'_, '_>) -> Result<(), E>,
{
    pub(crate) fn new(f: F) -> TryHandler<F, E> {
        TryHandler { f, error: None }
    }

    fn record(&mut self, result: Result<(), E>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                self.error = Some(err);
                false
            }
        }
    }

    pub(crate) fn into_result(self) -> Result<(), E> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<F, E> Handler for TryHandler<F, E>
where
    F: FnMut(Event<'_, '_>) -> Result<(), E>,
{
    fn handle_operand(&mut self, operand: &OsStr) -> bool {
        let result = (self.f)(Event::Operand(operand));
        self.record(result)
    }

    fn handle_short_option(&mut self, option: char, parser: &mut Parser<'_>) -> bool {
        let result = (self.f)(Event::Short(option, parser));
        self.record(result)
    }

    fn handle_long_option(&mut self, option: &OsStr, parser: &mut Parser<'_>) -> bool {
        let result = (self.f)(Event::Long(option, parser));
        self.record(result)
    }
}
