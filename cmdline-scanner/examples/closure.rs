//! This example drives the scanner with a closure instead of a handler type.
use cmdline_scanner::{from_fn, parse_env, Event, Outcome};

fn main() {
    env_logger::init();

    let mut verbosity = 0;
    let mut number = None;
    let mut files = Vec::new();
    let mut failure = None;

    let outcome = parse_env(&mut from_fn(|event| {
        match event {
            Event::Short('v', _) => verbosity += 1,
            Event::Long(name, _) if name == "verbose" => verbosity += 1,
            Event::Short('n', parser) => match parser.value::<i32>() {
                Ok(value) => number = Some(value),
                Err(err) => failure = Some(err),
            },
            Event::Long(name, parser) if name == "number" => match parser.value::<i32>() {
                Ok(value) => number = Some(value),
                Err(err) => failure = Some(err),
            },
            Event::Operand(file) => files.push(file.to_os_string()),
            other => failure = Some(other.arg().into_unexpected_error()),
        }
        failure.is_none()
    }));

    if outcome == Outcome::Stopped {
        if let Some(err) = failure {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }

    println!("verbosity: {}", verbosity);
    println!("number: {:?}", number);
    println!("files: {:?}", files);
}
