//! Hierarchical text dump of a program, one node per line, two spaces of
//! indentation per level.

use std::fmt::Write;

use crate::ast::*;

/// Renders an AST as indented text for `--dump-ast`.
#[derive(Default)]
pub struct AstPrinter {
    out: String,
}

impl AstPrinter {
    /// Creates a new `AstPrinter`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders a whole program.
    pub fn print_program(mut self, program: &ProgramNode) -> String {
        self.program(program, 0);
        self.out
    }

    /// Renders a single statement, e.g. for a test.
    pub fn print_statement(mut self, stmt: &StatementNode) -> String {
        self.statement(stmt, 0);
        self.out
    }

    /// Renders a single expression.
    pub fn print_expression(mut self, expr: &ExpressionNode) -> String {
        self.expression(expr, 0);
        self.out
    }

    fn line(&mut self, indent: usize, text: impl AsRef<str>) {
        // Writing into a String cannot fail
        let _ = writeln!(self.out, "{}{}", "  ".repeat(indent), text.as_ref());
    }

    fn program(&mut self, program: &ProgramNode, indent: usize) {
        self.line(indent, "Program:");
        for decl in &program.declarations {
            self.declaration(decl, indent + 1);
        }
    }

    fn declaration(&mut self, decl: &DeclarationNode, indent: usize) {
        match decl {
            DeclarationNode::Import(import) => {
                self.line(indent, format!("Import: {}", import.module_name()))
            }
            DeclarationNode::Variable(var) => self.variable(var, indent),
            DeclarationNode::Patient(patient) => {
                self.line(indent, format!("Patient: {}", patient.name.name));
                for prop in &patient.properties {
                    self.property(prop, indent + 1);
                }
            }
            DeclarationNode::Procedure(proc) => self.procedure("Procedure", proc, indent),
            DeclarationNode::Treatment(proc) => self.procedure("Treatment", proc, indent),
        }
    }

    fn variable(&mut self, var: &VariableDeclarationNode, indent: usize) {
        let ty = var.type_annotation.as_deref().unwrap_or("inferred");
        self.line(indent, format!("Variable: {} : {}", var.name.name, ty));
        if let Some(init) = &var.initializer {
            self.expression(init, indent + 1);
        }
    }

    fn procedure(&mut self, label: &str, proc: &ProcedureNode, indent: usize) {
        self.line(indent, format!("{label}: {}", proc.name.name));
        self.line(indent + 1, "Parameters:");
        for param in &proc.parameters {
            let ty = param.type_annotation.as_deref().unwrap_or("any");
            self.line(indent + 2, format!("Param: {} : {}", param.name.name, ty));
        }
        self.line(indent + 1, "Body:");
        self.block(&proc.body, indent + 2);
    }

    fn block(&mut self, block: &BlockNode, indent: usize) {
        self.line(indent, "Block:");
        for stmt in &block.statements {
            self.statement(stmt, indent + 1);
        }
    }

    fn labelled_statement(&mut self, label: &str, stmt: &StatementNode, indent: usize) {
        self.line(indent, label);
        self.statement(stmt, indent + 1);
    }

    fn labelled_expression(&mut self, label: &str, expr: &ExpressionNode, indent: usize) {
        self.line(indent, label);
        self.expression(expr, indent + 1);
    }

    fn statement(&mut self, stmt: &StatementNode, indent: usize) {
        match stmt {
            StatementNode::Variable(var) => self.variable(var, indent),
            StatementNode::Block(block) => self.block(block, indent),
            StatementNode::If(node) => {
                self.line(indent, "If:");
                self.labelled_expression("Condition:", &node.condition, indent + 1);
                self.labelled_statement("Then:", &node.then_branch, indent + 1);
                if let Some(else_branch) = &node.else_branch {
                    self.labelled_statement("Else:", else_branch, indent + 1);
                }
            }
            StatementNode::While(node) => {
                self.line(indent, "While:");
                self.labelled_expression("Condition:", &node.condition, indent + 1);
                self.labelled_statement("Body:", &node.body, indent + 1);
            }
            StatementNode::ForEach(node) => {
                self.line(indent, "ForEach:");
                self.line(indent + 1, "Variable:");
                match &node.binding {
                    LoopBinding::Declaration(var) => self.variable(var, indent + 2),
                    LoopBinding::Existing(ident) => {
                        self.line(indent + 2, format!("Variable: {}", ident.name))
                    }
                }
                self.labelled_expression("Collection:", &node.collection, indent + 1);
                self.labelled_statement("Body:", &node.body, indent + 1);
            }
            StatementNode::ClinicalPath(node) => {
                self.line(indent, "ClinicalPath:");
                self.labelled_expression("Expression:", &node.subject, indent + 1);
                self.line(indent + 1, "Cases:");
                for case in &node.cases {
                    self.line(indent + 2, "Case:");
                    self.labelled_expression("Value:", &case.value, indent + 3);
                    self.labelled_statement("Body:", &case.body, indent + 3);
                }
            }
            StatementNode::Return(ret) => {
                self.line(indent, "Return:");
                if let Some(value) = &ret.value {
                    self.expression(value, indent + 1);
                }
            }
            StatementNode::Expr(expr) => {
                self.labelled_expression("Expression:", expr, indent);
            }
            StatementNode::Prescribe(node) => {
                self.line(indent, "Prescribe:");
                self.labelled_expression("Patient:", &node.patient, indent + 1);
                self.labelled_expression("Medication:", &node.medication, indent + 1);
                self.labelled_expression("Dose:", &node.dose, indent + 1);
                if let Some(instructions) = &node.instructions {
                    self.labelled_expression("Instructions:", instructions, indent + 1);
                }
                if let Some(duration) = &node.duration {
                    self.labelled_expression("Duration:", duration, indent + 1);
                }
            }
        }
    }

    fn property(&mut self, prop: &PropertyAssignmentNode, indent: usize) {
        self.line(indent, format!("Property: {} =", prop.name));
        self.expression(&prop.value, indent + 1);
    }

    fn arguments(&mut self, args: &[ExpressionNode], indent: usize) {
        self.line(indent, "Arguments:");
        for arg in args {
            self.expression(arg, indent + 1);
        }
    }

    fn expression(&mut self, expr: &ExpressionNode, indent: usize) {
        match expr {
            ExpressionNode::Binary(bin) => {
                self.line(indent, format!("Binary: {}", bin.operator));
                self.labelled_expression("Left:", &bin.left, indent + 1);
                self.labelled_expression("Right:", &bin.right, indent + 1);
            }
            ExpressionNode::Unary(un) => {
                self.line(indent, format!("Unary: {}", un.operator));
                self.labelled_expression("Operand:", &un.operand, indent + 1);
            }
            ExpressionNode::Variable(ident) => {
                self.line(indent, format!("Variable: {}", ident.name))
            }
            ExpressionNode::Member(member) => {
                self.line(indent, format!("Property Access: {}", member.property));
                self.labelled_expression("Object:", &member.object, indent + 1);
            }
            ExpressionNode::Call(call) => {
                self.line(indent, format!("Function Call: {}", call.callee.name));
                self.arguments(&call.arguments, indent + 1);
            }
            ExpressionNode::MethodCall(call) => {
                self.line(indent, format!("Method Call: {}", call.method));
                self.labelled_expression("Object:", &call.object, indent + 1);
                self.arguments(&call.arguments, indent + 1);
            }
            ExpressionNode::Literal(lit) => {
                let value = match lit {
                    LiteralNode::Number(n) => n.to_string(),
                    LiteralNode::String(s) | LiteralNode::Date(s) | LiteralNode::Measurement(s) => {
                        s.clone()
                    }
                };
                self.line(indent, format!("Literal ({}): {}", lit.kind(), value));
            }
            ExpressionNode::Array(array) => {
                self.line(indent, "Array:");
                for element in &array.elements {
                    self.expression(element, indent + 1);
                }
            }
            ExpressionNode::Object(object) => {
                self.line(indent, "Object:");
                for prop in &object.properties {
                    self.property(prop, indent + 1);
                }
            }
        }
    }
}
