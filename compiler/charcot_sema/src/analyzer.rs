// Name resolution and call checking over a parsed program.
// Diagnostics accumulate; analysis always visits the whole tree.

use charcot_ast::*;
use charcot_env::{FunctionSymbol, ScopeId, Symbol, SymbolTable, VariableSymbol};

use crate::error::SemanticError;

/// Analyze `program` against a fresh scope tree holding the builtins.
pub fn analyze(program: &ProgramNode) -> Vec<SemanticError> {
    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(program);
    analyzer.into_errors()
}

pub struct SemanticAnalyzer {
    table: SymbolTable,
    current: ScopeId,
    errors: Vec<SemanticError>,
    imports: Vec<String>,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        let table = SymbolTable::with_builtins();
        let current = table.global();
        Self {
            table,
            current,
            errors: Vec::new(),
            imports: Vec::new(),
        }
    }

    /// Visit every declaration and return the diagnostics recorded so far.
    pub fn analyze(&mut self, program: &ProgramNode) -> &[SemanticError] {
        log::debug!(
            "analyzing {} top-level declarations",
            program.declarations.len()
        );
        for declaration in &program.declarations {
            self.visit_declaration(declaration);
        }
        log::debug!("analysis finished with {} diagnostics", self.errors.len());
        &self.errors
    }

    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<SemanticError> {
        self.errors
    }

    /// Module paths named by `import` declarations, in source order.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    fn enter_scope(&mut self) {
        self.current = self.table.push_scope(self.current);
    }

    fn exit_scope(&mut self) {
        self.current = self.table.pop_scope(self.current);
    }

    fn in_child_scope(&mut self, visit: impl FnOnce(&mut Self)) {
        self.enter_scope();
        visit(self);
        self.exit_scope();
    }

    /// Define a symbol in the current scope. A clash is recorded and reported
    /// back so the caller can skip the rest of the declaration.
    fn declare(&mut self, kind: &'static str, ident: &IdentifierNode, symbol: Symbol) -> bool {
        match self.table.define(self.current, symbol) {
            Ok(()) => true,
            Err(dup) => {
                log::trace!("duplicate {kind} '{}'", dup.name);
                self.errors.push(SemanticError::DuplicateDefinition {
                    kind,
                    name: dup.name,
                    line: ident.span.line,
                    column: ident.span.column,
                });
                false
            }
        }
    }

    fn visit_declaration(&mut self, declaration: &DeclarationNode) {
        match declaration {
            DeclarationNode::Import(import) => {
                log::trace!("recording import {}", import.module_name());
                self.imports.push(import.module_name());
            }
            DeclarationNode::Variable(var) => self.visit_variable(var),
            DeclarationNode::Patient(patient) => {
                let symbol = Symbol::Variable(VariableSymbol::new(
                    patient.name.name.clone(),
                    Some("Patient"),
                ));
                if self.declare("patient", &patient.name, symbol) {
                    for prop in &patient.properties {
                        self.visit_expression(&prop.value);
                    }
                }
            }
            DeclarationNode::Procedure(procedure) => self.visit_procedure("procedure", procedure),
            DeclarationNode::Treatment(treatment) => self.visit_procedure("treatment", treatment),
        }
    }

    fn visit_variable(&mut self, var: &VariableDeclarationNode) {
        let symbol = Symbol::Variable(VariableSymbol::new(
            var.name.name.clone(),
            var.type_annotation.as_deref(),
        ));
        // The name is visible inside its own initializer.
        if self.declare("variable", &var.name, symbol) {
            if let Some(init) = &var.initializer {
                self.visit_expression(init);
            }
        }
    }

    fn visit_procedure(&mut self, kind: &'static str, procedure: &ProcedureNode) {
        let params: Vec<VariableSymbol> = procedure
            .parameters
            .iter()
            .map(|p| VariableSymbol::new(p.name.name.clone(), p.type_annotation.as_deref()))
            .collect();
        let symbol = Symbol::Function(FunctionSymbol::new(procedure.name.name.clone(), params));
        if !self.declare(kind, &procedure.name, symbol) {
            return;
        }

        self.in_child_scope(|this| {
            for param in &procedure.parameters {
                let symbol = Symbol::Variable(VariableSymbol::new(
                    param.name.name.clone(),
                    param.type_annotation.as_deref(),
                ));
                this.declare("parameter", &param.name, symbol);
            }
            this.visit_block(&procedure.body);
        });
    }

    fn visit_block(&mut self, block: &BlockNode) {
        self.in_child_scope(|this| {
            for statement in &block.statements {
                this.visit_statement(statement);
            }
        });
    }

    fn visit_statement(&mut self, statement: &StatementNode) {
        match statement {
            StatementNode::Variable(var) => self.visit_variable(var),
            StatementNode::Block(block) => self.visit_block(block),
            StatementNode::If(node) => {
                self.visit_expression(&node.condition);
                self.visit_statement(&node.then_branch);
                if let Some(else_branch) = &node.else_branch {
                    self.visit_statement(else_branch);
                }
            }
            StatementNode::While(node) => {
                self.visit_expression(&node.condition);
                self.visit_statement(&node.body);
            }
            StatementNode::ForEach(node) => self.in_child_scope(|this| {
                match &node.binding {
                    LoopBinding::Declaration(var) => this.visit_variable(var),
                    LoopBinding::Existing(ident) => this.resolve_variable(ident),
                }
                this.visit_expression(&node.collection);
                this.visit_statement(&node.body);
            }),
            StatementNode::ClinicalPath(node) => {
                self.visit_expression(&node.subject);
                for case in &node.cases {
                    self.visit_expression(&case.value);
                    self.in_child_scope(|this| this.visit_statement(&case.body));
                }
            }
            StatementNode::Return(ret) => {
                if let Some(value) = &ret.value {
                    self.visit_expression(value);
                }
            }
            StatementNode::Expr(expr) => self.visit_expression(expr),
            StatementNode::Prescribe(node) => {
                self.visit_expression(&node.patient);
                self.visit_expression(&node.medication);
                self.visit_expression(&node.dose);
                if let Some(instructions) = &node.instructions {
                    self.visit_expression(instructions);
                }
                if let Some(duration) = &node.duration {
                    self.visit_expression(duration);
                }
            }
        }
    }

    fn resolve_variable(&mut self, ident: &IdentifierNode) {
        if self.table.lookup(self.current, &ident.name).is_none() {
            self.errors.push(SemanticError::UndefinedVariable {
                name: ident.name.clone(),
                line: ident.span.line,
                column: ident.span.column,
            });
        }
    }

    fn visit_call(&mut self, call: &CallExpressionNode) {
        let callee = &call.callee;
        let function = self
            .table
            .lookup(self.current, &callee.name)
            .and_then(Symbol::as_function);
        let expected = match function {
            Some(function) => function.arity(),
            None => {
                self.errors.push(SemanticError::UndefinedFunction {
                    name: callee.name.clone(),
                    line: callee.span.line,
                    column: callee.span.column,
                });
                return;
            }
        };

        for arg in &call.arguments {
            self.visit_expression(arg);
        }

        if call.arguments.len() != expected {
            self.errors.push(SemanticError::ArgumentCountMismatch {
                name: callee.name.clone(),
                expected,
                found: call.arguments.len(),
                line: callee.span.line,
                column: callee.span.column,
            });
        }
    }

    fn visit_expression(&mut self, expr: &ExpressionNode) {
        match expr {
            ExpressionNode::Binary(bin) => {
                self.visit_expression(&bin.left);
                self.visit_expression(&bin.right);
            }
            ExpressionNode::Unary(unary) => self.visit_expression(&unary.operand),
            ExpressionNode::Variable(ident) => self.resolve_variable(ident),
            // Field and method names are not checked against any type.
            ExpressionNode::Member(member) => self.visit_expression(&member.object),
            ExpressionNode::MethodCall(call) => {
                self.visit_expression(&call.object);
                for arg in &call.arguments {
                    self.visit_expression(arg);
                }
            }
            ExpressionNode::Call(call) => self.visit_call(call),
            ExpressionNode::Literal(_) => {}
            ExpressionNode::Array(array) => {
                for element in &array.elements {
                    self.visit_expression(element);
                }
            }
            ExpressionNode::Object(object) => {
                for prop in &object.properties {
                    self.visit_expression(&prop.value);
                }
            }
        }
    }
}
