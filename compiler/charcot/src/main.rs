use std::fs;
use std::path::{Path, PathBuf};

use charcot::backend::{IrFileBackend, NativeBackend};
use charcot::{compile_source, CompileError, CompileOptions};
use charcot_ast::AstPrinter;
use clap::Parser;
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(
    name = "charcotc",
    version,
    about = "Compiler for the Charcot clinical workflow language",
    long_about = "charcotc compiles a Charcot source file to IR.\n\n\
        EXAMPLES:\n\
        \n  charcotc ward.cht -S                 Write ward.ll\n\
        \n  charcotc ward.cht --dump-ast         Print the syntax tree, then compile\n\
        \n  charcotc ward.cht -o build/ward.o    Compile for the default target"
)]
struct Cli {
    /// Charcot source file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output path (defaults to the input with extension .o, or .ll with -S)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write the IR text and stop
    #[arg(short = 'S', long = "emit-ir")]
    emit_ir: bool,

    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the token stream
    #[arg(long)]
    dump_tokens: bool,

    /// Print the syntax tree as indented text
    #[arg(long)]
    dump_ast: bool,

    /// Print the syntax tree as JSON
    #[arg(long = "dump-ast-json")]
    dump_ast_json: bool,

    /// Skip the optimizer passes
    #[arg(long)]
    no_optimize: bool,

    /// Target architecture handed to the backend
    #[arg(short, long, value_name = "ARCH", default_value = "x86_64")]
    target: String,

    /// Fail when code generation raises notices
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn options(&self) -> CompileOptions {
        let module_name = self
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| charcot_codegen::DEFAULT_MODULE_NAME.to_string());
        CompileOptions {
            optimize: !self.no_optimize,
            target: self.target.clone(),
            module_name,
            strict: self.strict,
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let extension = if self.emit_ir { "ll" } else { "o" };
            self.input.with_extension(extension)
        })
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .try_init();
}

fn dump(cli: &Cli, source: &str) -> Result<(), CompileError> {
    if !(cli.dump_tokens || cli.dump_ast || cli.dump_ast_json) {
        return Ok(());
    }
    let tokens = charcot_lexer::tokenize(source)?;
    if cli.dump_tokens {
        for token in &tokens {
            println!("{token}");
        }
    }
    if cli.dump_ast || cli.dump_ast_json {
        let program = charcot_parser::parse(&tokens)?;
        if cli.dump_ast {
            print!("{}", AstPrinter::new().print_program(&program));
        }
        if cli.dump_ast_json {
            match charcot_ast::to_json(&program) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("error: failed to serialize AST: {e}"),
            }
        }
    }
    Ok(())
}

fn report(err: &CompileError) {
    match err {
        CompileError::Semantic(errors) => {
            for e in errors {
                eprintln!("semantic error: {e}");
            }
        }
        CompileError::Notices(notices) => {
            for n in notices {
                eprintln!("error: {n}");
            }
        }
        _ => {}
    }
    eprintln!("error: {err}");
}

fn write_output(cli: &Cli, ir: &str, output: &Path) -> Result<PathBuf, CompileError> {
    if cli.emit_ir {
        fs::write(output, ir)?;
        return Ok(output.to_path_buf());
    }
    Ok(IrFileBackend.emit(ir, &cli.target, output)?)
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let source = match fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {e}", cli.input.display());
            return 1;
        }
    };

    if let Err(err) = dump(&cli, &source) {
        report(&err);
        return 1;
    }

    let compilation = match compile_source(&source, &cli.options()) {
        Ok(c) => c,
        Err(err) => {
            report(&err);
            return 1;
        }
    };
    for notice in &compilation.notices {
        eprintln!("warning: {notice}");
    }

    match write_output(&cli, &compilation.ir, &cli.output_path()) {
        Ok(path) => {
            log::info!("wrote {}", path.display());
            0
        }
        Err(err) => {
            report(&err);
            1
        }
    }
}

fn main() {
    std::process::exit(run_cli());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("charcotc").chain(args.iter().copied()))
    }

    #[test]
    fn output_defaults_follow_emit_mode() {
        assert_eq!(cli(&["ward.cht"]).output_path(), PathBuf::from("ward.o"));
        assert_eq!(cli(&["ward.cht", "-S"]).output_path(), PathBuf::from("ward.ll"));
        assert_eq!(
            cli(&["ward.cht", "-o", "out/x.o"]).output_path(),
            PathBuf::from("out/x.o")
        );
    }

    #[test]
    fn options_mirror_flags() {
        let options = cli(&["icu/ward.cht", "--no-optimize", "-t", "riscv32", "--strict"]).options();
        assert_eq!(
            options,
            CompileOptions {
                optimize: false,
                target: "riscv32".into(),
                module_name: "ward".into(),
                strict: true,
            }
        );
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(cli(&["a.cht", "-vvv"]).verbose, 3);
        assert!(cli(&["a.cht", "--dump-tokens", "--dump-ast-json"]).dump_ast_json);
    }
}
