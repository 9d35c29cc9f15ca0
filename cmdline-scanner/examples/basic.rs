//! This is a basic example with a handler type, help page and error printing.
//!
//! Run with `RUST_LOG=trace` to see what the scanner dispatches.
use std::ffi::OsStr;
use std::path::PathBuf;

use cmdline_scanner::{parse_env, Error, Handler, Outcome, Parser};

const USAGE: &str = "basic [-n NUMBER]... [--shout] [--help] [FILE]...";
const HELP: &str = "basic
A small example of cmdline-scanner

USAGE:
    !!USAGE!!

OPTIONS:
    -n, --number <NUMBER>   adds a number to sum
    -s, --shout             shouts!
    -h, --help              prints the help\
";

#[derive(Default)]
struct Args {
    numbers: Vec<i64>,
    shout: bool,
    help: bool,
    files: Vec<PathBuf>,
    error: Option<Error>,
}

impl Args {
    /// Records the outcome of an option and turns it into the handler's answer.
    fn check(&mut self, result: Result<(), Error>) -> bool {
        match result {
            Ok(()) => !self.help,
            Err(err) => {
                self.error = Some(err);
                false
            }
        }
    }

    fn number(&mut self, parser: &mut Parser<'_>) -> Result<(), Error> {
        self.numbers.push(parser.value()?);
        Ok(())
    }

    fn flag(flag: &mut bool) -> Result<(), Error> {
        *flag = true;
        Ok(())
    }
}

impl Handler for Args {
    fn handle_operand(&mut self, operand: &OsStr) -> bool {
        self.files.push(PathBuf::from(operand));
        true
    }

    fn handle_short_option(&mut self, option: char, parser: &mut Parser<'_>) -> bool {
        let result = match option {
            'n' => self.number(parser),
            's' => Args::flag(&mut self.shout),
            'h' => Args::flag(&mut self.help),
            _ => Err(parser.unexpected()),
        };
        self.check(result)
    }

    fn handle_long_option(&mut self, option: &OsStr, parser: &mut Parser<'_>) -> bool {
        let result = match option.to_str() {
            Some("number") => self.number(parser),
            Some("shout") => Args::flag(&mut self.shout),
            Some("help") => Args::flag(&mut self.help),
            _ => Err(parser.unexpected()),
        };
        self.check(result)
    }
}

fn execute() -> Result<(), Error> {
    let mut args = Args::default();

    if parse_env(&mut args) == Outcome::Stopped {
        if let Some(err) = args.error {
            return Err(err);
        }
    }

    if args.help {
        println!("{}", HELP.replace("!!USAGE!!", USAGE));
    } else if args.numbers.is_empty() && !args.shout {
        println!("{}", USAGE)
    } else {
        println!("Numbers: {:?}", &args.numbers);
        println!("Sum: {}", args.numbers.iter().sum::<i64>());
        println!("Files: {:?}", &args.files);
        if args.shout {
            println!("I AM SHOUTING!");
        }
    }

    Ok(())
}

fn main() {
    use std::error::Error;
    env_logger::init();
    if let Err(err) = execute() {
        eprintln!("error: {}", err);
        if let Some(source) = err.source() {
            eprintln!("  cause: {}", source);
        }
        if let Some(value) = err.raw_value() {
            eprintln!("  value: {:?}", value.to_string_lossy());
        }
        std::process::exit(1);
    }
}
