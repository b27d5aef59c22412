//! Parse-time and link-time error taxonomy, kept separate from
//! `wsvm::Error` so front-end failures and runtime failures stay distinct
//! result types.

use std::fmt;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ParseError {
    /// A byte violated the grammar at the current decoding point, or the
    /// buffer ended mid-instruction.
    MalformedProgram,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedProgram => write!(f, "malformed program"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LinkError {
    /// An `EndRoutine` with no open `LabelDefine` to pair it with.
    UnmatchedEndRoutine,
    /// A `Call`/`Jump`/`ZeroJump`/`MinusJump` whose label never resolved.
    UnresolvedLabel,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::UnmatchedEndRoutine => write!(f, "end sub routine without matching label"),
            LinkError::UnresolvedLabel => write!(f, "do not have instruction at label"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    Parse(ParseError),
    Link(LinkError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(err) => err.fmt(f),
            Error::Link(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<LinkError> for Error {
    fn from(err: LinkError) -> Error {
        Error::Link(err)
    }
}
