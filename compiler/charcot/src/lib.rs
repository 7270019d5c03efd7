//! The Charcot compilation pipeline.
//!
//! [`compile_source`] runs every phase in order and stops at the first one
//! that fails. Lexical and syntax errors are single and fatal. Semantic
//! diagnostics are collected in full and then stop the pipeline before code
//! generation.

use charcot_codegen::{CodeGenerator, Notice};
use charcot_lexer::LexError;
use charcot_parser::SyntaxError;
use charcot_sema::{SemanticAnalyzer, SemanticError};
use thiserror::Error;

pub mod backend;
pub mod passes;

use backend::BackendError;
use passes::PassManager;

/// Knobs for one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Run the optimizer passes over the generated IR
    pub optimize: bool,
    /// Target architecture handed to the native backend
    pub target: String,
    /// Name recorded in the IR module header
    pub module_name: String,
    /// Treat code generation notices as errors
    pub strict: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            target: "x86_64".to_string(),
            module_name: charcot_codegen::DEFAULT_MODULE_NAME.to_string(),
            strict: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("semantic analysis failed with {} error(s)", .0.len())]
    Semantic(Vec<SemanticError>),

    #[error("code generation raised {} notice(s) in strict mode", .0.len())]
    Notices(Vec<Notice>),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A successfully compiled module.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub ir: String,
    /// Advisories raised while lowering
    pub notices: Vec<Notice>,
    /// Modules named by `import` declarations
    pub imports: Vec<String>,
}

/// Lex, parse, analyze and lower `source`, then optionally optimize the IR.
pub fn compile_source(source: &str, options: &CompileOptions) -> Result<Compilation, CompileError> {
    let tokens = charcot_lexer::tokenize(source)?;
    log::info!("lexed {} tokens", tokens.len());

    let program = charcot_parser::parse(&tokens)?;
    log::info!("parsed {} declarations", program.declarations.len());

    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(&program);
    let imports = analyzer.imports().to_vec();
    let errors = analyzer.into_errors();
    if !errors.is_empty() {
        return Err(CompileError::Semantic(errors));
    }

    let module = CodeGenerator::new(&options.module_name).generate(&program);
    if options.strict && !module.notices.is_empty() {
        return Err(CompileError::Notices(module.notices));
    }

    let ir = if options.optimize {
        PassManager::with_default_passes().run(module.ir)
    } else {
        module.ir
    };

    Ok(Compilation {
        ir,
        notices: module.notices,
        imports,
    })
}
