// Generator state, module assembly and top-level declarations.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use charcot_ast::*;
use charcot_type::{IrType, RecordKind, INTRINSICS};

use crate::notice::Notice;
use crate::prelude;
use crate::value::{c_string, Value};

mod expressions;
mod statements;

/// Function that runs top-level initializers.
const ENTRY_POINT: &str = "main";

/// How a name is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Storage {
    /// `ptr` points at a slot holding a value of the binding's type.
    Slot,
    /// `ptr` is itself the record pointer; there is nothing to load.
    Aggregate,
}

#[derive(Debug, Clone)]
struct Binding {
    ptr: String,
    ty: IrType,
    storage: Storage,
}

#[derive(Debug, Clone)]
struct Signature {
    /// Module-level name, without the `@`.
    symbol: String,
    ret: IrType,
    params: Vec<IrType>,
}

/// Instructions of the function currently being lowered.
#[derive(Debug)]
struct FunctionBody {
    lines: Vec<String>,
    current_block: String,
}

impl FunctionBody {
    fn new() -> Self {
        Self {
            lines: vec!["entry:".to_string()],
            current_block: "entry".to_string(),
        }
    }

    fn has_code(&self) -> bool {
        self.lines.len() > 1
    }
}

/// Output of one generator run.
#[derive(Debug, Clone)]
pub struct GeneratedModule {
    pub ir: String,
    pub notices: Vec<Notice>,
}

pub struct CodeGenerator {
    module_name: String,
    strings: Vec<String>,
    globals: Vec<String>,
    imports: Vec<String>,
    definitions: Vec<String>,
    externs: BTreeMap<String, String>,
    functions: HashMap<String, Signature>,
    /// Every `@name` the module defines or declares.
    symbols: HashSet<String>,
    /// Symbols claimed by `register_procedures`, in declaration order.
    procedure_symbols: VecDeque<String>,
    vars: HashMap<String, Binding>,
    body: FunctionBody,
    in_procedure: bool,
    next_register: usize,
    next_label: usize,
    next_string: usize,
    notices: Vec<Notice>,
}

impl CodeGenerator {
    pub fn new(module_name: &str) -> Self {
        let functions = INTRINSICS
            .iter()
            .map(|i| {
                (
                    i.name.to_string(),
                    Signature {
                        symbol: i.name.to_string(),
                        ret: i.ret,
                        params: i.params.to_vec(),
                    },
                )
            })
            .collect();
        Self {
            module_name: module_name.to_string(),
            strings: Vec::new(),
            globals: Vec::new(),
            imports: Vec::new(),
            definitions: Vec::new(),
            externs: BTreeMap::new(),
            functions,
            symbols: INTRINSICS
                .iter()
                .map(|i| i.name.to_string())
                .chain([ENTRY_POINT.to_string()])
                .collect(),
            procedure_symbols: VecDeque::new(),
            vars: HashMap::new(),
            body: FunctionBody::new(),
            in_procedure: false,
            next_register: 0,
            next_label: 0,
            next_string: 0,
            notices: Vec::new(),
        }
    }

    /// Lower `program` into a complete IR module.
    pub fn generate(mut self, program: &ProgramNode) -> GeneratedModule {
        log::debug!("generating IR for module '{}'", self.module_name);
        self.register_procedures(program);
        for declaration in &program.declarations {
            self.lower_declaration(declaration);
        }
        let ir = self.assemble();
        log::debug!(
            "generated {} bytes of IR with {} notices",
            ir.len(),
            self.notices.len()
        );
        GeneratedModule {
            ir,
            notices: self.notices,
        }
    }

    // Procedures may be called before they are defined.
    fn register_procedures(&mut self, program: &ProgramNode) {
        for declaration in &program.declarations {
            if let DeclarationNode::Procedure(proc) | DeclarationNode::Treatment(proc) = declaration
            {
                let params = proc
                    .parameters
                    .iter()
                    .map(|p| IrType::from_annotation(p.type_annotation.as_deref()))
                    .collect();
                let symbol = self.module_symbol(&proc.name.name);
                self.procedure_symbols.push_back(symbol.clone());
                self.functions.insert(
                    proc.name.name.clone(),
                    Signature {
                        symbol,
                        ret: IrType::Void,
                        params,
                    },
                );
            }
        }
    }

    fn assemble(&mut self) -> String {
        let mut out = format!(
            "; ModuleID = '{0}'\nsource_filename = \"{0}\"\n\n",
            self.module_name
        );
        out.push_str(&prelude::record_types());
        out.push_str(&prelude::intrinsic_declarations());

        let mut section = |title: Option<&str>, lines: &[String]| {
            if lines.is_empty() {
                return;
            }
            out.push('\n');
            if let Some(title) = title {
                out.push_str(&format!("; {title}\n"));
            }
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
        };

        let externs: Vec<String> = self.externs.values().cloned().collect();
        section(Some("external functions"), &externs);
        section(None, &self.strings);
        section(None, &self.globals);
        section(None, &self.imports);
        for definition in &self.definitions {
            section(None, std::slice::from_ref(definition));
        }

        let main = std::mem::replace(&mut self.body, FunctionBody::new());
        if main.has_code() {
            let mut text = format!("define i32 @{ENTRY_POINT}() {{\n");
            for line in &main.lines {
                text.push_str(line);
                text.push('\n');
            }
            text.push_str("  ret i32 0\n}");
            section(None, &[text]);
        }
        out
    }

    /// Claim a module-level name for `name`. A name already taken by the
    /// prelude, the entry point or an earlier definition gets a `.N` suffix.
    fn module_symbol(&mut self, name: &str) -> String {
        if self.symbols.insert(name.to_string()) {
            return name.to_string();
        }
        let symbol = (1..)
            .map(|n| format!("{name}.{n}"))
            .find(|candidate| !self.symbols.contains(candidate))
            .unwrap_or_else(|| name.to_string());
        self.symbols.insert(symbol.clone());
        self.notice(Notice::RenamedSymbol {
            name: name.to_string(),
            symbol: symbol.clone(),
        });
        symbol
    }

    fn fresh_temp(&mut self) -> String {
        let temp = format!("%t{}", self.next_register);
        self.next_register += 1;
        temp
    }

    fn fresh_label(&mut self) -> String {
        let label = format!("label{}", self.next_label);
        self.next_label += 1;
        label
    }

    fn emit(&mut self, instruction: impl AsRef<str>) {
        self.body.lines.push(format!("  {}", instruction.as_ref()));
    }

    /// Emit `%tN = <instruction>` and return the result as a value of `ty`.
    fn emit_value(&mut self, ty: IrType, instruction: impl AsRef<str>) -> Value {
        let temp = self.fresh_temp();
        self.emit(format!("{temp} = {}", instruction.as_ref()));
        Value::new(temp, ty)
    }

    fn emit_label(&mut self, label: &str) {
        self.body.lines.push(format!("{label}:"));
        self.body.current_block = label.to_string();
    }

    fn notice(&mut self, notice: Notice) {
        log::warn!("{notice}");
        self.notices.push(notice);
    }

    /// Intern a string constant and return a pointer to its first byte.
    fn string_constant(&mut self, text: &str) -> Value {
        let (body, len) = c_string(text);
        let name = format!("@.str.{}", self.next_string);
        self.next_string += 1;
        self.strings
            .push(format!("{name} = private constant [{len} x i8] c\"{body}\""));
        self.emit_value(
            IrType::Opaque,
            format!("getelementptr [{len} x i8], [{len} x i8]* {name}, i32 0, i32 0"),
        )
    }

    /// Storage for a new name: a global at top level, a stack slot otherwise.
    fn allocate(&mut self, name: &str, ty: IrType) -> Binding {
        let ptr = if self.in_procedure {
            self.emit_value(ty, format!("alloca {ty}")).repr
        } else {
            let symbol = self.module_symbol(name);
            self.globals
                .push(format!("@{symbol} = global {ty} {}", ty.zero_value()));
            format!("@{symbol}")
        };
        Binding {
            ptr,
            ty,
            storage: Storage::Slot,
        }
    }

    fn lower_declaration(&mut self, declaration: &DeclarationNode) {
        match declaration {
            DeclarationNode::Import(import) => {
                self.imports
                    .push(format!("; import: {}", import.module_name()));
            }
            DeclarationNode::Variable(var) => self.lower_variable(var),
            DeclarationNode::Patient(patient) => self.lower_patient(patient),
            DeclarationNode::Procedure(proc) | DeclarationNode::Treatment(proc) => {
                self.lower_procedure(proc)
            }
        }
    }

    fn lower_variable(&mut self, var: &VariableDeclarationNode) {
        let ty = match &var.type_annotation {
            Some(name) => IrType::from_type_name(name),
            None => var
                .initializer
                .as_ref()
                .map(|init| self.infer_type(init))
                .filter(|ty| *ty != IrType::Void)
                .unwrap_or(IrType::Opaque),
        };
        let binding = self.allocate(&var.name.name, ty);
        self.vars.insert(var.name.name.clone(), binding.clone());

        if let Some(init) = &var.initializer {
            let value = self.lower_expression(init);
            let value = self.coerce(value, ty);
            self.emit(format!("store {}, {ty}* {}", value.typed(), binding.ptr));
        }
    }

    // Top-level patients are module-level structs; fields are filled in @main.
    fn lower_patient(&mut self, patient: &PatientDeclarationNode) {
        let kind = RecordKind::Patient;
        let symbol = self.module_symbol(&patient.name.name);
        self.globals
            .push(format!("@{symbol} = global %{} zeroinitializer", kind.name()));
        let ptr = format!("@{symbol}");
        self.vars.insert(
            patient.name.name.clone(),
            Binding {
                ptr: ptr.clone(),
                ty: IrType::Record(kind),
                storage: Storage::Aggregate,
            },
        );
        let record = Value::new(ptr, IrType::Record(kind));
        for prop in &patient.properties {
            self.store_field(&record, kind, &prop.name, &prop.value);
        }
    }

    fn lower_procedure(&mut self, proc: &ProcedureNode) {
        let params: Vec<IrType> = proc
            .parameters
            .iter()
            .map(|p| IrType::from_annotation(p.type_annotation.as_deref()))
            .collect();
        let signature: Vec<String> = params
            .iter()
            .enumerate()
            .map(|(i, ty)| format!("{ty} %arg{i}"))
            .collect();
        log::trace!("lowering procedure {}", proc.name.name);

        let outer_body = std::mem::replace(&mut self.body, FunctionBody::new());
        let outer_vars = self.vars.clone();
        let was_in_procedure = std::mem::replace(&mut self.in_procedure, true);

        for (i, (param, ty)) in proc.parameters.iter().zip(&params).enumerate() {
            let binding = self.allocate(&param.name.name, *ty);
            self.emit(format!("store {ty} %arg{i}, {ty}* {}", binding.ptr));
            self.vars.insert(param.name.name.clone(), binding);
        }
        self.lower_block(&proc.body);
        self.emit("ret void");

        let body = std::mem::replace(&mut self.body, outer_body);
        self.vars = outer_vars;
        self.in_procedure = was_in_procedure;

        let symbol = self
            .procedure_symbols
            .pop_front()
            .unwrap_or_else(|| proc.name.name.clone());
        let mut text = format!("define void @{symbol}({}) {{\n", signature.join(", "));
        for line in body.lines {
            text.push_str(&line);
            text.push('\n');
        }
        text.push('}');
        self.definitions.push(text);
    }
}
