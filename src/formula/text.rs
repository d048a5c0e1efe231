//! Plain clause-per-line input: each line is a whitespace-separated list of nonzero signed
//! integers, and a blank line (or the end of input) ends the formula.

use crate::formula::{Clause, Formula, Literal};
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

pub fn parse<R: Read>(reader: R) -> Result<Formula, ParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_idx + 1;
        let mut line = line.split_whitespace().peekable();

        if line.peek().is_none() {
            break;
        }

        let mut clause = vec![];
        for x in line {
            clause.push(parse_literal(x, line_no)?);
        }
        clauses.push(Clause::new(clause));
    }

    let formula = Formula::new(clauses);
    log::debug!("parsed {} clauses", formula.len());
    Ok(formula)
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Formula, ParseError> {
    let file = File::open(path)?;
    parse(file)
}

fn parse_literal(s: &str, line: usize) -> Result<Literal, ParseError> {
    let l = s.parse::<i64>().map_err(|_| ParseError::Format {
        line,
        message: format!("invalid literal '{}'", s),
    })?;
    Literal::try_from(l).map_err(|_| ParseError::Format {
        line,
        message: "0 is not a literal".into(),
    })
}

#[derive(Debug)]
pub enum ParseError {
    Io(std::io::Error),
    Format { line: usize, message: String },
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            ParseError::Io(e) => write!(f, "i/o error: {}", e),
            ParseError::Format { line, message } => write!(f, "line {}: {}", line, message),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            ParseError::Format { .. } => None,
        }
    }
}
