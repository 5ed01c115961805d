//! Compilation pass
//!
//! Builds a validated [`Module`] from each [`ModuleDecl`] and encodes it.
//! Every module compiles independently: its outcome is either a complete
//! configuration word or exactly one [`ModuleError`].

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::ast::{ModuleDecl, Program, Stmt};
use crate::config::CompileConfig;
use crate::encoder::{self, ConfigWord};
use crate::error::{Error, ModuleError, Result};
use crate::module::{Function, Module, Switch};

/// A module that passed validation, with its configuration word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledModule {
    pub name: String,
    #[serde(rename = "rows")]
    pub word: ConfigWord,
}

pub type ModuleOutcome = std::result::Result<CompiledModule, ModuleError>;

/// Result of compiling one program
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    /// One outcome per compiled module, in source order
    pub modules: Vec<ModuleOutcome>,
    /// Construction list, passed through untouched
    pub constructions: Vec<String>,
}

impl Compilation {
    pub fn compiled(&self) -> impl Iterator<Item = &CompiledModule> {
        self.modules.iter().filter_map(|outcome| outcome.as_ref().ok())
    }

    pub fn errors(&self) -> impl Iterator<Item = &ModuleError> {
        self.modules.iter().filter_map(|outcome| outcome.as_ref().err())
    }

    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }

    /// All compiled modules, or the first module error
    pub fn into_result(self) -> Result<Vec<CompiledModule>> {
        self.modules
            .into_iter()
            .map(|outcome| outcome.map_err(Error::from))
            .collect()
    }
}

pub struct Compiler {
    config: CompileConfig,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompileConfig::default())
    }
}

impl Compiler {
    pub fn new(config: CompileConfig) -> Self {
        Self { config }
    }

    pub fn compile(&self, program: &Program) -> Compilation {
        let mut compilation = Compilation::default();

        for decl in &program.modules {
            let outcome = self.compile_module(decl);
            let failed = outcome.is_err();
            compilation.modules.push(outcome);
            if failed && !self.config.keep_going {
                debug!(module = %decl.name, "stopping after first failed module");
                break;
            }
        }

        let declared: HashSet<&str> = program.modules.iter().map(|m| m.name.as_str()).collect();
        for construction in &program.constructions {
            if !declared.contains(construction.name.as_str()) {
                warn!(
                    construction = %construction.name,
                    line = construction.loc.line,
                    "construction names an undeclared module"
                );
            }
            compilation.constructions.push(construction.name.clone());
        }

        compilation
    }

    pub fn compile_module(&self, decl: &ModuleDecl) -> ModuleOutcome {
        let module = self.build_module(decl)?;
        let word = encoder::encode(&module);
        debug!(module = %module.name(), word = ?word.rows(), "encoded module");
        Ok(CompiledModule { name: module.name().to_string(), word })
    }

    /// Validate a declaration into a [`Module`].
    ///
    /// Statements are checked in source order, then the module-wide rules.
    pub fn build_module(&self, decl: &ModuleDecl) -> std::result::Result<Module, ModuleError> {
        let mut functions = Vec::new();
        let mut switches = Vec::new();

        for stmt in &decl.stmts {
            let line = stmt.loc().line;
            match stmt {
                Stmt::Passthrough(p) => {
                    let switch = Switch::new(p.a, p.b).map_err(|kind| ModuleError {
                        module: decl.name.clone(),
                        line,
                        function: None,
                        kind,
                    })?;
                    switches.push(switch);
                }
                Stmt::Function(f) => {
                    let sync = f.sync && self.config.honor_sync;
                    let function = Function::new(f.expr.clone(), f.output, sync).map_err(|kind| {
                        ModuleError {
                            module: decl.name.clone(),
                            line,
                            function: Some(functions.len()),
                            kind,
                        }
                    })?;
                    functions.push(function);
                }
            }
        }

        debug!(
            module = %decl.name,
            functions = functions.len(),
            switches = switches.len(),
            "building module"
        );

        Module::new(decl.name.clone(), functions, switches).map_err(|kind| ModuleError {
            module: decl.name.clone(),
            line: decl.loc.line,
            function: None,
            kind,
        })
    }
}
