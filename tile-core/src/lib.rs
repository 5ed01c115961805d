//! # tile-core
//!
//! Compiler for reconfigurable logic tiles. A tile ("module") has four sides
//! with two lanes each; a description declares up to two boolean functions
//! over the input lanes plus pass-through wires, and compiles to a fixed
//! four-row, eight-bit configuration word.
//!
//! ## Example
//!
//! ```text
//! module adder {
//!     w0 & n0 -> s0;
//!     w1 <-> e1;
//! }
//!
//! adder
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source (.tile)
//!     ↓ lexer
//! Token Stream
//!     ↓ parser
//! AST (module declarations + construction list)
//!     ↓ compiler (wiring validation)
//! Module
//!     ↓ encoder
//! Configuration word (4 × 8 bits)
//! ```

pub mod ast;
pub mod compiler;
pub mod config;
pub mod encoder;
pub mod error;
pub mod expr;
pub mod lane;
pub mod lexer;
pub mod module;
pub mod parser;
pub mod validate;

pub use ast::{Construction, FunctionDecl, ModuleDecl, PassthroughDecl, Program, Stmt};
pub use compiler::{Compilation, CompiledModule, Compiler, ModuleOutcome};
pub use config::{CompileConfig, CompilerConfig, OutputConfig, OutputFormat};
pub use encoder::{encode, ConfigWord, TruthTable};
pub use error::{Error, ModuleError, Result, WiringError};
pub use expr::Expr;
pub use lane::{Direction, Lane};
pub use lexer::{LocatedToken, Location, Lexer, Token};
pub use module::{Function, FunctionSlot, Module, Switch};
pub use parser::Parser;

/// Parse source text into an AST
pub fn parse(source: &str) -> Result<Program> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse()
}

/// Parse a lone boolean expression such as `w0 & ~n1`
pub fn parse_expr(source: &str) -> Result<Expr> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse_expression()
}

/// Compile source text with the default configuration
pub fn compile(source: &str) -> Result<Compilation> {
    compile_with_config(source, &CompilerConfig::default())
}

/// Compile source text.
///
/// Lex and parse errors fail the whole call; validation errors are reported
/// per module inside the [`Compilation`].
pub fn compile_with_config(source: &str, config: &CompilerConfig) -> Result<Compilation> {
    let program = parse(source)?;
    Ok(Compiler::new(config.compile.clone()).compile(&program))
}
