//! Abstract Syntax Tree for tile descriptions
//!
//! The parse tree keeps declarations as written; validation happens when the
//! compiler turns a [`ModuleDecl`] into a [`crate::module::Module`].

use crate::expr::Expr;
use crate::lane::Lane;
use crate::lexer::Location;

/// A complete source file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub modules: Vec<ModuleDecl>,
    /// Trailing construction list: `adder, adder, mux`
    pub constructions: Vec<Construction>,
}

/// `module name { stmt* }`
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDecl {
    pub name: String,
    pub stmts: Vec<Stmt>,
    pub loc: Location,
}

impl ModuleDecl {
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.stmts.iter().filter_map(|stmt| match stmt {
            Stmt::Function(function) => Some(function),
            Stmt::Passthrough(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `w1 <-> e1;`
    Passthrough(PassthroughDecl),
    /// `w0 & n0 sync -> s0;`
    Function(FunctionDecl),
}

impl Stmt {
    pub fn loc(&self) -> Location {
        match self {
            Stmt::Passthrough(passthrough) => passthrough.loc,
            Stmt::Function(function) => function.loc,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassthroughDecl {
    pub a: Lane,
    pub b: Lane,
    pub loc: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub expr: Expr,
    /// Whether the `sync` keyword was written
    pub sync: bool,
    pub output: Lane,
    pub loc: Location,
}

/// A name in the construction list
#[derive(Debug, Clone, PartialEq)]
pub struct Construction {
    pub name: String,
    pub loc: Location,
}
