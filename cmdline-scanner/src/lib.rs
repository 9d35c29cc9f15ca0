//! This crate implements a command line scanner following POSIX and GNU
//! conventions.  It walks the arguments once, classifies them into operands,
//! short options and long options and hands each of them to a [`Handler`]
//! you implement.  It does not know which options exist, it does not print
//! help and it never exits the process: all of that is your handler's job.
//!
//! # Example
//!
//! ```
//! use std::ffi::OsStr;
//! use cmdline_scanner::{parse, Handler, Outcome, Parser};
//!
//! #[derive(Default)]
//! struct Args {
//!     number: Option<String>,
//!     shout: bool,
//!     files: Vec<String>,
//! }
//!
//! impl Handler for Args {
//!     fn handle_operand(&mut self, operand: &OsStr) -> bool {
//!         self.files.push(operand.to_string_lossy().into_owned());
//!         true
//!     }
//!
//!     fn handle_short_option(&mut self, option: char, parser: &mut Parser<'_>) -> bool {
//!         match option {
//!             'n' => self.number = parser.string_param().ok().flatten(),
//!             _ => return false,
//!         }
//!         true
//!     }
//!
//!     fn handle_long_option(&mut self, option: &OsStr, _parser: &mut Parser<'_>) -> bool {
//!         self.shout = option == "shout";
//!         self.shout
//!     }
//! }
//!
//! let mut args = Args::default();
//! let outcome = parse(&["-n42", "--shout", "--", "-file"], &mut args);
//! assert_eq!(outcome, Outcome::Completed);
//! assert_eq!(args.number.as_deref(), Some("42"));
//! assert!(args.shout);
//! assert_eq!(args.files, ["-file"]);
//! ```
//!
//! Here is what's happening:
//!
//! * [`parse`] walks the given arguments (without the program name) and
//!   calls one [`Handler`] method per unit it finds.  [`parse_env`] does the
//!   same with the arguments of the current process.
//! * [`Handler::handle_short_option`] and [`Handler::handle_long_option`]
//!   receive the [`Parser`] to ask for the option's parameter with
//!   [`Parser::param`] (or the typed helpers like [`Parser::value`]).
//! * Returning `false` from a handler method stops parsing right away and
//!   [`parse`] reports [`Outcome::Stopped`].
//!
//! If you would rather write a closure, [`from_fn`] turns one into a handler
//! and [`try_parse`] accepts a closure returning a [`Result`] and hands back
//! the first error.
//!
//! # Behavior
//!
//! * An argument not starting with `-` is an operand.  So is the empty
//!   argument.
//! * `-abc` is the chain of short options `a`, `b` and `c`, reported one
//!   after another.
//! * `-` on its own is reported as the short option `'\0'`.
//! * `--name` and `--name=value` are long options named `name`.  The value
//!   after the first `=` is the option's parameter.
//! * `--` is swallowed and every argument after it is an operand, even if
//!   it starts with `-` (including another `--`).
//!
//! Parameters follow getopt: `-Ovalue` and `-O value` for short options,
//! `--option=value` and `--option value` for long options.  Short options do
//! not take `=` to separate the value (`-O=42` has the parameter `=42`).
//!
//! # Parameters are resolved lazily
//!
//! The scanner cannot know which options take a parameter, so it only looks
//! for one when the handler calls [`Parser::param`].  **If the handler does
//! not ask, nothing is consumed:** for `-O value` the `value` is parsed as an
//! operand on the next step, and for `-Ovalue` the characters `v`, `a`, ...
//! are reported as further short options.  This is not an error and it is
//! what makes options with optional parameters possible (see
//! [`Parser::has_param`] and [`Parser::optional_value`]), but it also means
//! that an option which takes a parameter must always request it, even when
//! it is going to ignore it.
//!
//! # Logging
//!
//! The scanner logs what it dispatches at trace level through the [`log`]
//! facade.  It never installs a logger itself, so without one installed by
//! the application nothing is written.  These records are diagnostics only:
//! their content and presence are not part of the API and may change.
//!
//! # Strings
//!
//! Arguments are platform strings ([`OsStr`](std::ffi::OsStr)).  Operands,
//! long option names and parameters are passed on untouched.  Short option
//! codes are decoded as unicode characters; a run of bytes that is not valid
//! unicode is reported as a single [`char::REPLACEMENT_CHARACTER`].
mod error;
mod handler;
mod parser;

pub use crate::error::{Error, OptionName};
pub use crate::handler::{from_fn, Arg, Event, FnHandler, Handler};
pub use crate::parser::{parse, parse_env, try_parse, try_parse_env, Outcome, Parser};
