// Statement lowering. Scoped constructs snapshot the binding map on entry
// and restore it verbatim on exit.

use charcot_ast::*;
use charcot_type::{IrType, RecordKind};

use super::{Binding, CodeGenerator, Storage};
use crate::notice::Notice;
use crate::value::Value;

impl CodeGenerator {
    pub(super) fn lower_block(&mut self, block: &BlockNode) {
        let saved = self.vars.clone();
        for statement in &block.statements {
            self.lower_statement(statement);
        }
        self.vars = saved;
    }

    fn lower_statement(&mut self, statement: &StatementNode) {
        match statement {
            StatementNode::Variable(var) => self.lower_variable(var),
            StatementNode::Block(block) => self.lower_block(block),
            StatementNode::If(node) => self.lower_if(node),
            StatementNode::While(node) => self.lower_while(node),
            StatementNode::ForEach(node) => self.lower_foreach(node),
            StatementNode::ClinicalPath(node) => self.lower_clinical_path(node),
            StatementNode::Return(ret) => {
                // Procedures return nothing; the value is evaluated and dropped.
                if let Some(value) = &ret.value {
                    self.lower_expression(value);
                }
                self.emit("ret void");
                let dead = self.fresh_label();
                self.emit_label(&dead);
            }
            StatementNode::Expr(expr) => {
                self.lower_expression(expr);
            }
            StatementNode::Prescribe(node) => self.lower_prescribe(node),
        }
    }

    fn lower_if(&mut self, node: &IfNode) {
        let condition = self.lower_expression(&node.condition);
        let condition = self.as_condition(condition);

        let then_label = self.fresh_label();
        let else_label = self.fresh_label();
        let cont_label = self.fresh_label();

        self.emit(format!(
            "br i1 {}, label %{then_label}, label %{else_label}",
            condition.repr
        ));
        self.emit_label(&then_label);
        self.lower_statement(&node.then_branch);
        self.emit(format!("br label %{cont_label}"));

        self.emit_label(&else_label);
        if let Some(else_branch) = &node.else_branch {
            self.lower_statement(else_branch);
        }
        self.emit(format!("br label %{cont_label}"));

        self.emit_label(&cont_label);
    }

    fn lower_while(&mut self, node: &WhileNode) {
        let cond_label = self.fresh_label();
        let body_label = self.fresh_label();
        let exit_label = self.fresh_label();

        self.emit(format!("br label %{cond_label}"));
        self.emit_label(&cond_label);
        let condition = self.lower_expression(&node.condition);
        let condition = self.as_condition(condition);
        self.emit(format!(
            "br i1 {}, label %{body_label}, label %{exit_label}",
            condition.repr
        ));

        self.emit_label(&body_label);
        self.lower_statement(&node.body);
        self.emit(format!("br label %{cond_label}"));

        self.emit_label(&exit_label);
    }

    fn lower_foreach(&mut self, node: &ForEachNode) {
        let saved = self.vars.clone();

        let collection = self.lower_expression(&node.collection);
        let collection = self.coerce(collection, IrType::OpaqueArray);
        let size = self.emit_value(
            IrType::Int,
            format!("call i32 @array_size({})", collection.typed()),
        );
        let index = self.emit_value(IrType::Int, "alloca i32");
        self.emit(format!("store i32 0, i32* {}", index.repr));

        let target = match &node.binding {
            LoopBinding::Declaration(var) => {
                let ty = IrType::from_annotation(var.type_annotation.as_deref());
                let binding = self.allocate_local(ty);
                self.vars.insert(var.name.name.clone(), binding.clone());
                Some(binding)
            }
            LoopBinding::Existing(ident) => match self.vars.get(&ident.name) {
                Some(binding) if binding.storage == Storage::Slot => Some(binding.clone()),
                Some(_) => {
                    self.notice(Notice::InvalidAssignmentTarget {
                        target: ident.name.clone(),
                    });
                    None
                }
                None => {
                    self.notice(Notice::UnresolvedVariable {
                        name: ident.name.clone(),
                        line: ident.span.line,
                        column: ident.span.column,
                    });
                    None
                }
            },
        };

        let cond_label = self.fresh_label();
        let body_label = self.fresh_label();
        let exit_label = self.fresh_label();

        self.emit(format!("br label %{cond_label}"));
        self.emit_label(&cond_label);
        let current = self.emit_value(IrType::Int, format!("load i32, i32* {}", index.repr));
        let in_bounds = self.emit_value(
            IrType::Bool,
            format!("icmp slt i32 {}, {}", current.repr, size.repr),
        );
        self.emit(format!(
            "br i1 {}, label %{body_label}, label %{exit_label}",
            in_bounds.repr
        ));

        self.emit_label(&body_label);
        let element = self.emit_value(
            IrType::Opaque,
            format!(
                "call i8* @array_get({}, {})",
                collection.typed(),
                current.typed()
            ),
        );
        if let Some(binding) = target {
            let element = self.coerce(element, binding.ty);
            self.emit(format!(
                "store {}, {}* {}",
                element.typed(),
                binding.ty,
                binding.ptr
            ));
        }
        self.lower_statement(&node.body);
        let next = self.emit_value(IrType::Int, format!("add i32 {}, 1", current.repr));
        self.emit(format!("store i32 {}, i32* {}", next.repr, index.repr));
        self.emit(format!("br label %{cond_label}"));

        self.emit_label(&exit_label);
        self.vars = saved;
    }

    // Loop variables always live on the stack, even in top-level code.
    fn allocate_local(&mut self, ty: IrType) -> Binding {
        let slot = self.emit_value(ty, format!("alloca {ty}"));
        Binding {
            ptr: slot.repr,
            ty,
            storage: Storage::Slot,
        }
    }

    fn lower_clinical_path(&mut self, node: &ClinicalPathNode) {
        let subject = self.lower_expression(&node.subject);
        let subject = self.coerce(subject, IrType::Opaque);

        let exit_label = self.fresh_label();
        let case_labels: Vec<String> = node.cases.iter().map(|_| self.fresh_label()).collect();

        if node.cases.is_empty() {
            self.emit(format!("br label %{exit_label}"));
        }

        for (i, (case, case_label)) in node.cases.iter().zip(&case_labels).enumerate() {
            let is_last = i + 1 == node.cases.len();
            let value = self.lower_expression(&case.value);
            let value = self.coerce(value, IrType::Opaque);
            let matched = self.emit_value(
                IrType::Bool,
                format!(
                    "call i1 @values_equal({}, {})",
                    subject.typed(),
                    value.typed()
                ),
            );
            let next_label = if is_last {
                exit_label.clone()
            } else {
                self.fresh_label()
            };
            self.emit(format!(
                "br i1 {}, label %{case_label}, label %{next_label}",
                matched.repr
            ));

            self.emit_label(case_label);
            let saved = self.vars.clone();
            self.lower_statement(&case.body);
            self.vars = saved;
            self.emit(format!("br label %{exit_label}"));

            if !is_last {
                self.emit_label(&next_label);
            }
        }

        self.emit_label(&exit_label);
    }

    fn lower_prescribe(&mut self, node: &PrescribeNode) {
        let patient = self.lower_expression(&node.patient);
        let patient = self.coerce(patient, IrType::Record(RecordKind::Patient));

        let medication = self.lower_expression(&node.medication);
        let medication = if medication.ty == IrType::Opaque {
            self.emit_value(
                IrType::Record(RecordKind::Medication),
                format!("call %Medication* @get_medication_by_name({})", medication.typed()),
            )
        } else {
            self.coerce(medication, IrType::Record(RecordKind::Medication))
        };

        let dose = self.lower_expression(&node.dose);
        let dose = self.coerce(dose, IrType::Float);

        let instructions = match &node.instructions {
            Some(expr) => {
                let value = self.lower_expression(expr);
                self.coerce(value, IrType::Opaque)
            }
            None => self.string_constant(""),
        };

        let duration = match &node.duration {
            Some(expr) => {
                let value = self.lower_expression(expr);
                self.coerce(value, IrType::Int)
            }
            None => Value::int(30),
        };

        self.emit(format!(
            "call void @prescribe({}, {}, {}, {}, {})",
            patient.typed(),
            medication.typed(),
            dose.typed(),
            instructions.typed(),
            duration.typed()
        ));
    }
}
