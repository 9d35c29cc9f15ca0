use std::error::Error as _;
use std::ffi::{OsStr, OsString};

use assert_matches::assert_matches;
use cmdline_scanner::{try_parse, Error, Event, OptionName};

fn make_invalid_unicode_os_string() -> OsString {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStringExt;
        OsString::from_vec(vec![0xff, 0xff])
    }
    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStringExt;
        OsString::from_wide(&[0xD800]) // Invalid UTF-16 surrogate
    }
}

/// Parses `args` where every option wants an `i64` and operands are rejected.
fn parse_numbers(args: &[OsString]) -> Result<Vec<i64>, Error> {
    let mut numbers = Vec::<i64>::new();
    try_parse(args, |event| -> Result<(), Error> {
        match event {
            Event::Short(_, parser) | Event::Long(_, parser) => numbers.push(parser.value()?),
            Event::Operand(operand) => {
                return Err(Error::UnexpectedOperand(operand.to_os_string()))
            }
        }
        Ok(())
    })?;
    Ok(numbers)
}

fn os_args(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

#[test]
fn test_missing_value_error() {
    let err = parse_numbers(&os_args(&["-n1", "-n"])).unwrap_err();
    assert_matches!(&err, Error::MissingParam { option: OptionName::Short('n') });
    assert_eq!(err.to_string(), "missing argument for option -n");
    assert_eq!(err.option(), Some(&OptionName::Short('n')));
    assert_eq!(err.raw_value(), None);

    let err = parse_numbers(&os_args(&["--number"])).unwrap_err();
    assert_eq!(err.to_string(), "missing argument for option --number");

    let err = parse_numbers(&os_args(&["-"])).unwrap_err();
    assert_eq!(err.to_string(), "missing argument for option -");
}

#[test]
fn test_invalid_value_error() {
    let err = parse_numbers(&os_args(&["-ninvalid"])).unwrap_err();
    assert_matches!(&err, Error::InvalidValue { value, .. } if value == "invalid");
    assert_eq!(err.to_string(), "argument for option -n is invalid");
    assert_eq!(err.raw_value(), Some(OsStr::new("invalid")));
    assert_eq!(
        err.source().map(|x| x.to_string()).as_deref(),
        Some("invalid digit found in string")
    );

    let err = parse_numbers(&os_args(&["--number=4x"])).unwrap_err();
    assert_eq!(err.to_string(), "argument for option --number is invalid");
}

#[test]
fn test_invalid_unicode_error() {
    let mut arg = OsString::from("-n");
    arg.push(make_invalid_unicode_os_string());

    let err = parse_numbers(&[arg]).unwrap_err();
    assert_matches!(&err, Error::InvalidUnicode { option: OptionName::Short('n'), .. });
    assert_eq!(err.to_string(), "argument for option -n is invalid unicode");
    assert_eq!(
        err.raw_value(),
        Some(make_invalid_unicode_os_string().as_os_str())
    );

    let args = [OsString::from("--number"), make_invalid_unicode_os_string()];
    let err = parse_numbers(&args).unwrap_err();
    assert_eq!(err.to_string(), "argument for option --number is invalid unicode");
}

#[test]
fn test_unexpected_errors() {
    let err = parse_numbers(&os_args(&["-n1", "file.txt", "-n2"])).unwrap_err();
    assert_matches!(&err, Error::UnexpectedOperand(value) if value == "file.txt");
    assert_eq!(err.to_string(), "unexpected argument \"file.txt\"");
    assert_eq!(err.option(), None);

    let err = try_parse(&["-ab"], |event| -> Result<(), Error> {
        match event {
            Event::Short('a', _) => Ok(()),
            Event::Short(_, parser) | Event::Long(_, parser) => Err(parser.unexpected()),
            Event::Operand(_) => Ok(()),
        }
    })
    .unwrap_err();
    assert_eq!(err.to_string(), "unexpected option -b");

    let err = try_parse(&["--frobnicate=yes"], |event| -> Result<(), Error> {
        Err(event.arg().into_unexpected_error())
    })
    .unwrap_err();
    assert_matches!(&err, Error::UnexpectedOption(OptionName::Long(name)) if name == "frobnicate");
    assert_eq!(err.to_string(), "unexpected option --frobnicate");
}

#[test]
fn test_first_error_stops_parsing() {
    let mut seen = 0;
    let err = try_parse(&["a", "b", "c"], |_event| -> Result<(), Error> {
        seen += 1;
        if seen == 2 {
            Err("second one".into())
        } else {
            Ok(())
        }
    })
    .unwrap_err();
    assert_eq!(seen, 2);
    assert_matches!(&err, Error::Custom(message) if message == "second one");
    assert_eq!(err.to_string(), "second one");
}

#[test]
fn test_custom_error_type() {
    #[derive(Debug, PartialEq)]
    struct Stop(String);

    let result = try_parse(&["-x", "--", "-y"], |event| match event {
        Event::Operand(operand) => Err(Stop(operand.to_string_lossy().into_owned())),
        _ => Ok(()),
    });
    assert_eq!(result, Err(Stop("-y".to_string())));
}
