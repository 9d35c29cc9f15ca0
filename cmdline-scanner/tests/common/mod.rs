#![allow(dead_code)]

use std::ffi::OsStr;

use cmdline_scanner::{parse, Handler, OptionName, Outcome, Parser};

/// What a [`Recorder`] saw, with parameters converted lossily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seen {
    Operand(String),
    Short(char, Option<String>),
    Long(String, Option<String>),
}

pub fn operand(s: &str) -> Seen {
    Seen::Operand(s.to_string())
}

pub fn short(c: char) -> Seen {
    Seen::Short(c, None)
}

pub fn short_with(c: char, param: &str) -> Seen {
    Seen::Short(c, Some(param.to_string()))
}

pub fn long(name: &str) -> Seen {
    Seen::Long(name.to_string(), None)
}

pub fn long_with(name: &str, param: &str) -> Seen {
    Seen::Long(name.to_string(), Some(param.to_string()))
}

/// Records every callback.  Options listed in `takes_param` (written as
/// `-x` or `--name`) request their parameter, all others don't.
pub struct Recorder {
    takes_param: Vec<String>,
    stop_after: Option<usize>,
    pub seen: Vec<Seen>,
}

impl Recorder {
    pub fn new(takes_param: &[&str]) -> Recorder {
        Recorder {
            takes_param: takes_param.iter().map(|x| x.to_string()).collect(),
            stop_after: None,
            seen: Vec::new(),
        }
    }

    /// Makes the recorder return `false` once it saw `count` units.
    pub fn stop_after(mut self, count: usize) -> Recorder {
        self.stop_after = Some(count);
        self
    }

    fn keep_going(&self) -> bool {
        self.stop_after.map_or(true, |count| self.seen.len() < count)
    }

    fn param_for(&self, name: OptionName, parser: &mut Parser<'_>) -> Option<String> {
        if self.takes_param.contains(&name.to_string()) {
            parser.param().map(|x| x.to_string_lossy().into_owned())
        } else {
            None
        }
    }
}

impl Handler for Recorder {
    fn handle_operand(&mut self, operand: &OsStr) -> bool {
        self.seen
            .push(Seen::Operand(operand.to_string_lossy().into_owned()));
        self.keep_going()
    }

    fn handle_short_option(&mut self, option: char, parser: &mut Parser<'_>) -> bool {
        let param = self.param_for(OptionName::Short(option), parser);
        self.seen.push(Seen::Short(option, param));
        self.keep_going()
    }

    fn handle_long_option(&mut self, option: &OsStr, parser: &mut Parser<'_>) -> bool {
        let name = option.to_string_lossy().into_owned();
        let param = self.param_for(OptionName::Long(name.clone()), parser);
        self.seen.push(Seen::Long(name, param));
        self.keep_going()
    }
}

/// Parses `args` with a fresh [`Recorder`].
pub fn scan<S: AsRef<OsStr>>(args: &[S], takes_param: &[&str]) -> (Outcome, Vec<Seen>) {
    let mut recorder = Recorder::new(takes_param);
    let outcome = parse(args, &mut recorder);
    (outcome, recorder.seen)
}
