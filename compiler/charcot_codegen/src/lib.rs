//! Lowering of Charcot programs to textual IR.
//!
//! The generator walks the AST once and produces a self-contained module:
//! - struct layouts for the clinical records and `declare`s for the runtime
//!   intrinsics
//! - one `define void` per procedure or treatment
//! - module globals for top-level declarations, initialized from an implicit
//!   `@main` when there is top-level code to run
//!
//! User names share one symbol namespace with the intrinsics and `@main`. A
//! clashing procedure or global is emitted under a `.N` suffix and reported.
//!
//! Lowering never fails. Anything it cannot resolve degrades to a placeholder
//! value and a [`Notice`] the caller can report or treat as fatal.

use charcot_ast::ProgramNode;

mod generator;
pub mod notice;
pub mod prelude;
pub mod value;

pub use generator::{CodeGenerator, GeneratedModule};
pub use notice::Notice;

/// Module name used when the caller does not pick one.
pub const DEFAULT_MODULE_NAME: &str = "charcot";

/// Lower `program` and return the IR text, discarding notices.
pub fn generate_ir_string(program: &ProgramNode) -> String {
    CodeGenerator::new(DEFAULT_MODULE_NAME).generate(program).ir
}
