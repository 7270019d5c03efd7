//! Shared helpers for the end-to-end tests.

use std::sync::Once;

use charcot::{compile_source, Compilation, CompileError, CompileOptions};

static INIT: Once = Once::new();

pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Compile with optimization off so the IR is exactly what codegen emitted.
pub fn compile(source: &str) -> Result<Compilation, CompileError> {
    init_test_logger();
    let options = CompileOptions {
        optimize: false,
        ..CompileOptions::default()
    };
    compile_source(source, &options)
}

/// Number of IR lines that contain `needle`.
pub fn count_lines(ir: &str, needle: &str) -> usize {
    ir.lines().filter(|l| l.contains(needle)).count()
}

/// Lines of the function `name`, from its `define` to the closing brace.
pub fn function_body<'a>(ir: &'a str, name: &str) -> Vec<&'a str> {
    let header = format!(" @{name}(");
    ir.lines()
        .skip_while(|l| !(l.starts_with("define") && l.contains(&header)))
        .take_while(|l| *l != "}")
        .collect()
}
