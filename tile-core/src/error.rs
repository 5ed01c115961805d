//! Error types for the tile compiler

use thiserror::Error;

use crate::lane::{Direction, Lane};

pub type Result<T> = std::result::Result<T, Error>;

/// A wiring rule violated while building a function, switch or module
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WiringError {
    /// South lanes only carry outputs
    #[error("no input on south side (lane {lane})")]
    InvalidInputSide { lane: Lane },

    /// A function may use at most one lane index per side
    #[error("cannot use {lane} when using {paired}")]
    ConflictingLanes { lane: Lane, paired: Lane },

    /// An input whose opposite-side lane was already claimed in this module
    #[error("function {function} reads {lane}, but {opposite} is already an input of this module")]
    ModuleLaneConflict {
        function: usize,
        lane: Lane,
        opposite: Lane,
    },

    /// Pass-throughs only join a lane with its opposite-side partner
    #[error("{a} and {b} are not connectible")]
    IllegalSwitch { a: Lane, b: Lane },

    /// Functions only drive the south or east side
    #[error("cannot output on lane {lane}")]
    InvalidOutputSide { lane: Lane },

    #[error("cannot perform more than 2 functions ({count} declared)")]
    TooManyFunctions { count: usize },

    #[error("cannot output both functions on the {side} side")]
    DuplicateOutputSide { side: Direction },
}

/// A wiring error located in the source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("module '{module}' at line {line}{}: {kind}", function_suffix(.function))]
pub struct ModuleError {
    pub module: String,
    /// 1-based source line of the offending declaration (0 when built without source)
    pub line: usize,
    /// Declaration index of the offending function, if one is to blame
    pub function: Option<usize>,
    pub kind: WiringError,
}

fn function_suffix(function: &Option<usize>) -> String {
    match function {
        Some(index) => format!(", function {}", index),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Lexical error during tokenization
    #[error("Lex error at {line}:{col}: {message}")]
    Lex { message: String, line: usize, col: usize },

    /// Syntax error during parsing
    #[error("Parse error at {line}:{col}: {message}")]
    Parse { message: String, line: usize, col: usize },

    /// A module failed validation
    #[error(transparent)]
    Module(#[from] ModuleError),

    /// Configuration (tilec.toml) error
    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
        }
    }
}
