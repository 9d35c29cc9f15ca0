//! This example shows an option with an optional parameter.
//!
//! `--color` alone means `--color=always`.  Because the scanner only looks
//! for a parameter when asked, `--color never` leaves `never` alone and it
//! shows up as a file.  Only `--color=never` sets the color.
use std::str::FromStr;

use cmdline_scanner::{try_parse_env, Error, Event};

#[derive(Debug, Clone, Copy)]
enum Color {
    Auto,
    Always,
    Never,
}

impl FromStr for Color {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Color::Auto),
            "always" => Ok(Color::Always),
            "never" => Ok(Color::Never),
            _ => Err("argument must be auto, always, or never"),
        }
    }
}

fn main() {
    env_logger::init();

    let mut color = Color::Auto;
    let mut files = Vec::new();
    let result = try_parse_env(|event| -> Result<(), Error> {
        match event {
            Event::Long(name, parser) if name == "color" => {
                color = parser.optional_value()?.unwrap_or(Color::Always);
            }
            Event::Operand(file) => files.push(file.to_os_string()),
            other => return Err(other.arg().into_unexpected_error()),
        }
        Ok(())
    });

    if let Err(err) = result {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }

    println!("color: {:?}", color);
    println!("files: {:?}", files);
}
