use std::ffi::{OsStr, OsString};
use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::error::{Error, OptionName};
use crate::handler::{Arg, Event, Handler, TryHandler};

/// How a parse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Outcome {
    /// Every argument was handed to the handler.
    Completed,
    /// A handler method returned `false`.
    Stopped,
}

impl Outcome {
    /// Did the parse run to the end of the arguments?
    pub fn is_completed(self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

/// Scans `args` and reports everything it finds to `handler`.
///
/// The arguments must not include the program name.  Parsing ends when all
/// arguments were consumed or as soon as a handler method returns `false`.
pub fn parse<S, H>(args: &[S], handler: &mut H) -> Outcome
where
    S: AsRef<OsStr>,
    H: Handler + ?Sized,
{
    let mut parser = Parser::new(args.iter().map(AsRef::as_ref).collect());
    while !parser.finished() {
        if !parser.step(handler) {
            trace!("handler stopped parsing at argument {}", parser.arg_index);
            return Outcome::Stopped;
        }
    }
    Outcome::Completed
}

/// Like [`parse`] but with the arguments of the current process.
///
/// The first argument (the program name) is skipped.
pub fn parse_env<H>(handler: &mut H) -> Outcome
where
    H: Handler + ?Sized,
{
    parse(&env_args(), handler)
}

/// Scans `args` with a closure that can fail.
///
/// The first error returned by the closure stops parsing and is returned.
///
/// ```
/// use cmdline_scanner::{try_parse, Error, Event};
///
/// let mut jobs = 1u32;
/// try_parse(&["-j", "4"], |event| -> Result<(), Error> {
///     match event {
///         Event::Short('j', parser) => jobs = parser.value()?,
///         other => return Err(other.arg().into_unexpected_error()),
///     }
///     Ok(())
/// })?;
/// assert_eq!(jobs, 4);
/// # Ok::<_, Error>(())
/// ```
pub fn try_parse<S, F, E>(args: &[S], f: F) -> Result<(), E>
where
    S: AsRef<OsStr>,
    F: FnMut(Event<'_, '_>) -> Result<(), E>,
{
    let mut handler = TryHandler::new(f);
    let _ = parse(args, &mut handler);
    handler.into_result()
}

/// Like [`try_parse`] but with the arguments of the current process.
pub fn try_parse_env<F, E>(f: F) -> Result<(), E>
where
    F: FnMut(Event<'_, '_>) -> Result<(), E>,
{
    try_parse(&env_args(), f)
}

fn env_args() -> Vec<OsString> {
    std::env::args_os().skip(1).collect()
}

/// An internal state indicator for the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Initial,
    ShortOptionChain,
    LongOption,
    OperandsOnly,
}

/// The next piece of work as decided by [`classify`].
#[derive(Debug, PartialEq, Eq)]
enum Unit<'a> {
    Operand(&'a OsStr),
    /// A short option code and the byte offset right after it.
    Short(char, usize),
    /// A long option name and the `=value` part if there was one.
    Long(&'a OsStr, Option<&'a OsStr>),
    /// The `--` argument.
    Terminator,
}

/// The scanner state for one parse.
///
/// Handlers never create one of these; they receive it in
/// [`Handler::handle_short_option`] and [`Handler::handle_long_option`] to
/// resolve the parameter of the option that is being dispatched.
pub struct Parser<'a> {
    args: Vec<&'a OsStr>,
    arg_index: usize,
    char_index: usize,
    mode: Mode,
    // `Some(None)` means resolution ran and found nothing.
    param: Option<Option<&'a OsStr>>,
    current: Option<Arg<'a>>,
}

impl fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("arg_index", &self.arg_index)
            .field("char_index", &self.char_index)
            .field("mode", &self.mode)
            .field("current", &self.current)
            .finish()
    }
}

impl<'a> Parser<'a> {
    fn new(args: Vec<&'a OsStr>) -> Parser<'a> {
        Parser {
            args,
            arg_index: 0,
            char_index: 0,
            mode: Mode::Initial,
            param: None,
            current: None,
        }
    }

    fn finished(&self) -> bool {
        self.arg_index >= self.args.len()
    }

    /// Performs exactly one unit of work and cleans up after it.
    fn step<H: Handler + ?Sized>(&mut self, handler: &mut H) -> bool {
        let arg = self.args[self.arg_index];
        let keep_going = match classify(arg, self.char_index, self.mode) {
            Unit::Operand(operand) => {
                trace!("operand {:?}", operand);
                self.char_index = arg.len();
                handler.handle_operand(operand)
            }
            Unit::Short(option, end) => {
                trace!("short option {:?} in {:?}", option, arg);
                self.char_index = end;
                self.mode = Mode::ShortOptionChain;
                self.current = Some(Arg::Short(option));
                handler.handle_short_option(option, self)
            }
            Unit::Long(option, param) => {
                trace!("long option {:?}", option);
                self.char_index = arg.len();
                self.mode = Mode::LongOption;
                self.param = param.map(Some);
                self.current = Some(Arg::Long(option));
                handler.handle_long_option(option, self)
            }
            Unit::Terminator => {
                trace!("end of options at argument {}", self.arg_index);
                self.mode = Mode::OperandsOnly;
                self.next_arg();
                return true;
            }
        };

        if self.char_index >= self.args[self.arg_index].len() {
            self.next_arg();
        }
        if self.mode != Mode::OperandsOnly
            && !(self.mode == Mode::ShortOptionChain && self.char_index != 0)
        {
            self.mode = Mode::Initial;
        }
        self.param = None;
        self.current = None;
        keep_going
    }

    fn next_arg(&mut self) {
        self.arg_index += 1;
        self.char_index = 0;
    }

    /// Consumes the whole following argument, if there is one.
    fn take_next_arg(&mut self) -> Option<&'a OsStr> {
        let next = *self.args.get(self.arg_index + 1)?;
        self.arg_index += 1;
        self.char_index = next.len();
        Some(next)
    }

    /// Returns the parameter of the current option, consuming it.
    ///
    /// * `-Ovalue`: the rest of the argument after the option code.
    /// * `-O value`: the next argument.
    /// * `--option=value`: the part after the first `=`.
    /// * `--option value`: the next argument.
    ///
    /// Returns `None` if no parameter is available.  The result is
    /// remembered for the rest of the callback, calling this again returns
    /// the same value and never consumes a second argument.
    ///
    /// **Options that take a parameter must call this, even if they ignore
    /// the value.**  Nothing is consumed until this is called, so an unused
    /// `-O value` or `--option value` leaves `value` on the command line and
    /// it is parsed as whatever it looks like next (likewise the rest of
    /// `-Ovalue` is parsed as more short options).  Options with an optional
    /// parameter rely on exactly that; see [`has_param`](Self::has_param).
    pub fn param(&mut self) -> Option<&'a OsStr> {
        if let Some(param) = self.param {
            return param;
        }

        let param = match self.mode {
            Mode::ShortOptionChain => {
                let arg = self.args[self.arg_index];
                if self.char_index < arg.len() {
                    let (_, rest) = os_str_split_at(arg, self.char_index);
                    self.char_index = arg.len();
                    Some(rest)
                } else {
                    self.take_next_arg()
                }
            }
            Mode::LongOption => self.take_next_arg(),
            Mode::Initial | Mode::OperandsOnly => None,
        };
        trace!("parameter for {:?}: {:?}", self.current, param);
        self.param = Some(param);
        param
    }

    /// Returns `true` if the parameter of the current option was settled.
    ///
    /// That is the case for `--option=value`, or once [`param`](Self::param)
    /// was called, even if it found nothing.  In the `--option value` and
    /// `-Ovalue` forms this is `false` until the parameter is requested, so
    /// this can be used to implement options with optional parameters in the
    /// `--option[=value]` style.
    pub fn has_param(&self) -> bool {
        self.param.is_some()
    }

    /// Returns the option that is currently being dispatched.
    pub fn current(&self) -> Option<Arg<'a>> {
        self.current
    }

    /// Creates an [`Error::UnexpectedOption`] for the current option.
    pub fn unexpected(&self) -> Error {
        match self.current {
            Some(arg) => arg.into_unexpected_error(),
            None => Error::from("unexpected argument"),
        }
    }

    /// Like [`param`](Self::param) but fails if there is no parameter.
    pub fn required_param(&mut self) -> Result<&'a OsStr, Error> {
        self.param().ok_or_else(|| Error::MissingParam {
            option: self.option_name(),
        })
    }

    /// Returns the parameter as string if there is one.
    pub fn string_param(&mut self) -> Result<Option<String>, Error> {
        match self.param() {
            Some(value) => self.os_str_into_string(value).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the parameter, which must be there, as string.
    pub fn string_value(&mut self) -> Result<String, Error> {
        let value = self.required_param()?;
        self.os_str_into_string(value)
    }

    /// Returns the parameter, which must be there, parsed via [`FromStr`].
    pub fn value<V>(&mut self) -> Result<V, Error>
    where
        V: FromStr,
        V::Err: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        let value = self.string_value()?;
        self.parse_string(value)
    }

    /// Parses a parameter only if the option already holds one.
    ///
    /// This never consumes anything and so only sees `--option=value`.  For
    /// `--option value` it returns `Ok(None)` and `value` is parsed on its
    /// own afterwards.
    pub fn optional_value<V>(&mut self) -> Result<Option<V>, Error>
    where
        V: FromStr,
        V::Err: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        if !matches!(self.param, Some(Some(_))) {
            return Ok(None);
        }
        self.value().map(Some)
    }

    fn option_name(&self) -> OptionName {
        self.current
            .and_then(|arg| arg.option_name())
            .unwrap_or(OptionName::Short('\0'))
    }

    fn os_str_into_string(&self, value: &OsStr) -> Result<String, Error> {
        match value.to_str() {
            Some(s) => Ok(s.to_string()),
            None => Err(Error::InvalidUnicode {
                option: self.option_name(),
                value: value.to_os_string(),
            }),
        }
    }

    fn parse_string<V>(&self, value: String) -> Result<V, Error>
    where
        V: FromStr,
        V::Err: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        V::from_str(&value).map_err(|err| Error::InvalidValue {
            option: self.option_name(),
            value,
            source: err.into(),
        })
    }
}

/// Decides what the argument at `char_index` turns into.
fn classify(arg: &OsStr, char_index: usize, mode: Mode) -> Unit<'_> {
    let bytes = arg.as_encoded_bytes();
    if mode == Mode::ShortOptionChain {
        let (option, len) = os_str_code_at(arg, char_index);
        return Unit::Short(option, char_index + len);
    }
    if mode == Mode::OperandsOnly || bytes.first() != Some(&b'-') {
        return Unit::Operand(arg);
    }
    match bytes.get(1) {
        None => Unit::Short('\0', 1),
        Some(b'-') if bytes.len() == 2 => Unit::Terminator,
        Some(b'-') => match bytes.iter().position(|&b| b == b'=') {
            Some(eq) => {
                let (head, tail) = os_str_split_at(arg, eq);
                Unit::Long(os_str_split_at(head, 2).1, Some(os_str_split_at(tail, 1).1))
            }
            None => Unit::Long(os_str_split_at(arg, 2).1, None),
        },
        Some(_) => {
            let (option, len) = os_str_code_at(arg, 1);
            Unit::Short(option, 1 + len)
        }
    }
}

/// Reads the short option code at a byte offset.
///
/// Returns the code and its length in bytes.  A run of bytes that is not
/// utf-8 turns into a single replacement character spanning the whole run.
fn os_str_code_at(s: &OsStr, idx: usize) -> (char, usize) {
    let bytes = &s.as_encoded_bytes()[idx..];
    let mut invalid = 0;
    for chunk in bytes.utf8_chunks() {
        if let Some(c) = chunk.valid().chars().next() {
            if invalid == 0 {
                return (c, c.len_utf8());
            }
            break;
        }
        invalid += chunk.invalid().len();
    }
    (char::REPLACEMENT_CHARACTER, invalid)
}

/// Splits an OsStr at a byte offset.
///
/// The offset must be at the end of an ascii character, a utf-8 encoded
/// character or a run of non utf-8 bytes.
fn os_str_split_at(s: &OsStr, point: usize) -> (&OsStr, &OsStr) {
    let (head, tail) = s.as_encoded_bytes().split_at(point);
    // SAFETY: the offsets handed in are produced by `classify` and
    // `os_str_code_at` and always follow a complete utf-8 sequence or
    // precede one, which is a valid split point for encoded bytes.
    unsafe {
        (
            OsStr::from_encoded_bytes_unchecked(head),
            OsStr::from_encoded_bytes_unchecked(tail),
        )
    }
}
