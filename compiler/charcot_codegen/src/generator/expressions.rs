// Expression lowering, value conversions and static type inference.

use charcot_ast::*;
use charcot_type::{IrType, RecordKind};

use super::{CodeGenerator, Signature, Storage};
use crate::notice::Notice;
use crate::value::{measurement_value, zero_of, Value};

impl CodeGenerator {
    pub(super) fn lower_expression(&mut self, expr: &ExpressionNode) -> Value {
        match expr {
            ExpressionNode::Literal(literal) => self.lower_literal(literal),
            ExpressionNode::Variable(ident) => self.load_variable(ident),
            ExpressionNode::Binary(bin) => self.lower_binary(bin),
            ExpressionNode::Unary(unary) => self.lower_unary(unary),
            ExpressionNode::Member(member) => self.lower_member(member),
            ExpressionNode::Call(call) => self.lower_call(call),
            ExpressionNode::MethodCall(call) => self.lower_method_call(call),
            ExpressionNode::Array(array) => self.lower_array(array),
            ExpressionNode::Object(object) => self.lower_object(object),
        }
    }

    fn lower_literal(&mut self, literal: &LiteralNode) -> Value {
        match literal {
            LiteralNode::Number(n) => Value::float(*n),
            LiteralNode::Measurement(text) => Value::float(measurement_value(text)),
            LiteralNode::String(text) => self.string_constant(text),
            LiteralNode::Date(text) => {
                let text = self.string_constant(text);
                self.emit_value(
                    IrType::Int,
                    format!("call i32 @date_to_timestamp({})", text.typed()),
                )
            }
        }
    }

    fn load_variable(&mut self, ident: &IdentifierNode) -> Value {
        let Some(binding) = self.vars.get(&ident.name).cloned() else {
            self.notice(Notice::UnresolvedVariable {
                name: ident.name.clone(),
                line: ident.span.line,
                column: ident.span.column,
            });
            return Value::null();
        };
        match binding.storage {
            Storage::Aggregate => Value::new(binding.ptr, binding.ty),
            Storage::Slot => self.emit_value(
                binding.ty,
                format!("load {0}, {0}* {1}", binding.ty, binding.ptr),
            ),
        }
    }

    /// Convert `value` to `target`, emitting whatever cast that takes.
    pub(super) fn coerce(&mut self, value: Value, target: IrType) -> Value {
        use IrType::*;

        if value.ty == target || target == Void {
            return value;
        }
        let repr = value.repr.clone();
        match (value.ty, target) {
            (Void, _) => zero_of(target),
            (_, Bool) => self.as_condition(value),
            (Int, Float) => self.emit_value(target, format!("sitofp i32 {repr} to float")),
            (Float, Int) => self.emit_value(target, format!("fptosi float {repr} to i32")),
            (Bool, Int) => self.emit_value(target, format!("zext i1 {repr} to i32")),
            (Bool, Float) => self.emit_value(target, format!("uitofp i1 {repr} to float")),
            (Int, _) => self.emit_value(target, format!("inttoptr i32 {repr} to {target}")),
            (Float, _) => {
                let int = self.coerce(value, Int);
                self.coerce(int, target)
            }
            (Bool, _) => {
                let int = self.coerce(value, Int);
                self.coerce(int, target)
            }
            (from, Int) => self.emit_value(target, format!("ptrtoint {from} {repr} to i32")),
            (_, Float) => {
                let int = self.coerce(value, Int);
                self.coerce(int, Float)
            }
            (from, _) if repr == "null" => {
                log::trace!("retyping null {from} as {target}");
                zero_of(target)
            }
            (from, _) => self.emit_value(target, format!("bitcast {from} {repr} to {target}")),
        }
    }

    /// Truthiness of `value` as an `i1`.
    pub(super) fn as_condition(&mut self, value: Value) -> Value {
        let repr = value.repr.clone();
        match value.ty {
            IrType::Bool => value,
            IrType::Void => Value::bool(false),
            IrType::Int => self.emit_value(IrType::Bool, format!("icmp ne i32 {repr}, 0")),
            IrType::Float => {
                self.emit_value(IrType::Bool, format!("fcmp one float {repr}, 0.0"))
            }
            ty => self.emit_value(IrType::Bool, format!("icmp ne {ty} {repr}, null")),
        }
    }

    fn lower_binary(&mut self, bin: &BinaryExpressionNode) -> Value {
        match bin.operator {
            BinaryOperator::Assign => return self.lower_assignment(&bin.left, &bin.right),
            BinaryOperator::And | BinaryOperator::Or => return self.lower_short_circuit(bin),
            _ => {}
        }

        let left = self.lower_expression(&bin.left);
        let right = self.lower_expression(&bin.right);
        match bin.operator {
            BinaryOperator::Add if left.ty == IrType::Opaque || right.ty == IrType::Opaque => {
                let left = self.coerce(left, IrType::Opaque);
                let right = self.coerce(right, IrType::Opaque);
                self.emit_value(
                    IrType::Opaque,
                    format!("call i8* @string_concat({}, {})", left.typed(), right.typed()),
                )
            }
            BinaryOperator::Add
            | BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div => self.lower_arithmetic(bin.operator, left, right),
            _ => self.lower_comparison(bin.operator, left, right),
        }
    }

    fn lower_unary(&mut self, unary: &UnaryExpressionNode) -> Value {
        let operand = self.lower_expression(&unary.operand);
        match unary.operator {
            UnaryOperator::Not => {
                let condition = self.as_condition(operand);
                self.emit_value(IrType::Bool, format!("xor i1 {}, true", condition.repr))
            }
            UnaryOperator::Neg if operand.ty == IrType::Int => {
                self.emit_value(IrType::Int, format!("sub i32 0, {}", operand.repr))
            }
            UnaryOperator::Neg => {
                let operand = self.coerce(operand, IrType::Float);
                self.emit_value(IrType::Float, format!("fneg float {}", operand.repr))
            }
        }
    }

    fn lower_arithmetic(&mut self, op: BinaryOperator, left: Value, right: Value) -> Value {
        if left.ty == IrType::Int && right.ty == IrType::Int {
            let inst = match op {
                BinaryOperator::Add => "add",
                BinaryOperator::Sub => "sub",
                BinaryOperator::Mul => "mul",
                _ => "sdiv",
            };
            return self.emit_value(
                IrType::Int,
                format!("{inst} i32 {}, {}", left.repr, right.repr),
            );
        }
        let left = self.coerce(left, IrType::Float);
        let right = self.coerce(right, IrType::Float);
        let inst = match op {
            BinaryOperator::Add => "fadd",
            BinaryOperator::Sub => "fsub",
            BinaryOperator::Mul => "fmul",
            _ => "fdiv",
        };
        self.emit_value(
            IrType::Float,
            format!("{inst} float {}, {}", left.repr, right.repr),
        )
    }

    fn lower_comparison(&mut self, op: BinaryOperator, left: Value, right: Value) -> Value {
        let equality = matches!(op, BinaryOperator::Eq | BinaryOperator::Neq);

        if equality && left.ty.is_pointer() && right.ty.is_pointer() {
            let left = self.coerce(left, IrType::Opaque);
            let right = self.coerce(right, IrType::Opaque);
            let equal = self.emit_value(
                IrType::Bool,
                format!("call i1 @values_equal({}, {})", left.typed(), right.typed()),
            );
            if op == BinaryOperator::Neq {
                return self.emit_value(IrType::Bool, format!("xor i1 {}, true", equal.repr));
            }
            return equal;
        }

        let int_predicate = match op {
            BinaryOperator::Eq => "eq",
            BinaryOperator::Neq => "ne",
            BinaryOperator::Lt => "slt",
            BinaryOperator::Gt => "sgt",
            BinaryOperator::Le => "sle",
            _ => "sge",
        };
        let int_like = |ty: IrType| matches!(ty, IrType::Int | IrType::Bool) || ty.is_pointer();
        if left.ty == right.ty && left.ty == IrType::Bool && equality {
            return self.emit_value(
                IrType::Bool,
                format!("icmp {int_predicate} i1 {}, {}", left.repr, right.repr),
            );
        }
        if int_like(left.ty) && int_like(right.ty) {
            let left = self.coerce(left, IrType::Int);
            let right = self.coerce(right, IrType::Int);
            return self.emit_value(
                IrType::Bool,
                format!("icmp {int_predicate} i32 {}, {}", left.repr, right.repr),
            );
        }

        let float_predicate = match op {
            BinaryOperator::Eq => "oeq",
            BinaryOperator::Neq => "une",
            BinaryOperator::Lt => "olt",
            BinaryOperator::Gt => "ogt",
            BinaryOperator::Le => "ole",
            _ => "oge",
        };
        let left = self.coerce(left, IrType::Float);
        let right = self.coerce(right, IrType::Float);
        self.emit_value(
            IrType::Bool,
            format!("fcmp {float_predicate} float {}, {}", left.repr, right.repr),
        )
    }

    // `a && b` takes the right operand on the true arm and `false` on the
    // other; `a || b` takes `true` on the true arm and the right operand on
    // the false arm. A phi picks the value of the arm actually taken.
    fn lower_short_circuit(&mut self, bin: &BinaryExpressionNode) -> Value {
        let is_and = bin.operator == BinaryOperator::And;
        let left = self.lower_expression(&bin.left);
        let left = self.as_condition(left);

        let true_label = self.fresh_label();
        let false_label = self.fresh_label();
        let merge_label = self.fresh_label();
        self.emit(format!(
            "br i1 {}, label %{true_label}, label %{false_label}",
            left.repr
        ));

        let short_value = if is_and { "false" } else { "true" };
        let mut arms = Vec::with_capacity(2);
        for (label, takes_right) in [(true_label, is_and), (false_label, !is_and)] {
            self.emit_label(&label);
            if takes_right {
                let right = self.lower_expression(&bin.right);
                let right = self.as_condition(right);
                arms.push((right.repr, self.body.current_block.clone()));
            } else {
                arms.push((short_value.to_string(), label));
            }
            self.emit(format!("br label %{merge_label}"));
        }

        self.emit_label(&merge_label);
        let incoming: Vec<String> = arms
            .iter()
            .map(|(value, block)| format!("[ {value}, %{block} ]"))
            .collect();
        self.emit_value(IrType::Bool, format!("phi i1 {}", incoming.join(", ")))
    }

    fn lower_assignment(&mut self, target: &ExpressionNode, value: &ExpressionNode) -> Value {
        match target {
            ExpressionNode::Variable(ident) => {
                let binding = self.vars.get(&ident.name).cloned();
                let rhs = self.lower_expression(value);
                match binding {
                    Some(binding) if binding.storage == Storage::Slot => {
                        let rhs = self.coerce(rhs, binding.ty);
                        self.emit(format!(
                            "store {}, {}* {}",
                            rhs.typed(),
                            binding.ty,
                            binding.ptr
                        ));
                        rhs
                    }
                    Some(_) => {
                        self.notice(Notice::InvalidAssignmentTarget {
                            target: ident.name.clone(),
                        });
                        rhs
                    }
                    None => {
                        self.notice(Notice::UnresolvedVariable {
                            name: ident.name.clone(),
                            line: ident.span.line,
                            column: ident.span.column,
                        });
                        rhs
                    }
                }
            }
            ExpressionNode::Member(member) => {
                let object = self.lower_expression(&member.object);
                let (object, kind) = self.as_record(object);
                self.store_field(&object, kind, &member.property, value)
            }
            other => {
                let rhs = self.lower_expression(value);
                self.notice(Notice::InvalidAssignmentTarget {
                    target: other.to_string(),
                });
                rhs
            }
        }
    }

    /// The record kind behind `value`. Anything that is not a record pointer
    /// is treated as a patient.
    fn as_record(&mut self, value: Value) -> (Value, RecordKind) {
        match value.ty {
            IrType::Record(kind) => (value, kind),
            _ => {
                let kind = RecordKind::Patient;
                (self.coerce(value, IrType::Record(kind)), kind)
            }
        }
    }

    fn field_pointer(
        &mut self,
        record: &Value,
        kind: RecordKind,
        index: usize,
        ty: IrType,
    ) -> Value {
        let name = kind.name();
        self.emit_value(
            ty,
            format!("getelementptr %{name}, %{name}* {}, i32 0, i32 {index}", record.repr),
        )
    }

    /// Lower `value` and store it into `field` of `record`.
    pub(super) fn store_field(
        &mut self,
        record: &Value,
        kind: RecordKind,
        field: &str,
        value: &ExpressionNode,
    ) -> Value {
        let lowered = self.lower_expression(value);
        let Some((index, ty)) = kind.field(field) else {
            self.notice(Notice::UnknownField {
                record: kind.name(),
                field: field.to_string(),
            });
            return lowered;
        };
        let slot = self.field_pointer(record, kind, index, ty);
        let lowered = self.coerce(lowered, ty);
        self.emit(format!("store {}, {ty}* {}", lowered.typed(), slot.repr));
        lowered
    }

    fn lower_member(&mut self, member: &MemberExpressionNode) -> Value {
        let object = self.lower_expression(&member.object);
        let (object, kind) = self.as_record(object);
        let Some((index, ty)) = kind.field(&member.property) else {
            self.notice(Notice::UnknownField {
                record: kind.name(),
                field: member.property.clone(),
            });
            return Value::null();
        };
        let slot = self.field_pointer(&object, kind, index, ty);
        self.emit_value(ty, format!("load {ty}, {ty}* {}", slot.repr))
    }

    fn call(&mut self, signature: &Signature, args: Vec<Value>) -> Value {
        let mut operands = Vec::with_capacity(args.len());
        for (i, arg) in args.into_iter().enumerate() {
            let arg = match signature.params.get(i) {
                Some(ty) => self.coerce(arg, *ty),
                None => arg,
            };
            operands.push(arg.typed());
        }
        let call = format!(
            "call {} @{}({})",
            signature.ret,
            signature.symbol,
            operands.join(", ")
        );
        if signature.ret == IrType::Void {
            self.emit(call);
            Value::void()
        } else {
            self.emit_value(signature.ret, call)
        }
    }

    /// Signature of a function the module does not define, fixed by its
    /// first call and declared as an external.
    fn external(&mut self, name: &str, args: &[Value]) -> Signature {
        if let Some(signature) = self.functions.get(name) {
            return signature.clone();
        }
        let params: Vec<IrType> = args
            .iter()
            .map(|a| if a.ty == IrType::Void { IrType::Opaque } else { a.ty })
            .collect();
        let list: Vec<String> = params.iter().map(ToString::to_string).collect();
        let symbol = self.module_symbol(name);
        self.externs.insert(
            symbol.clone(),
            format!("declare i8* @{symbol}({})", list.join(", ")),
        );
        let signature = Signature {
            symbol,
            ret: IrType::Opaque,
            params,
        };
        self.functions.insert(name.to_string(), signature.clone());
        signature
    }

    fn lower_call(&mut self, call: &CallExpressionNode) -> Value {
        let name = &call.callee.name;
        let args: Vec<Value> = call
            .arguments
            .iter()
            .map(|arg| self.lower_expression(arg))
            .collect();
        if !self.functions.contains_key(name) {
            self.notice(Notice::UnresolvedFunction { name: name.clone() });
        }
        let signature = self.external(name, &args);
        self.call(&signature, args)
    }

    fn lower_method_call(&mut self, call: &MethodCallNode) -> Value {
        let object = self.lower_expression(&call.object);
        let (object, kind) = self.as_record(object);
        let mut args = vec![object];
        for arg in &call.arguments {
            args.push(self.lower_expression(arg));
        }
        let name = format!("{}_{}", kind.name(), call.method);
        let signature = self.external(&name, &args);
        self.call(&signature, args)
    }

    fn lower_array(&mut self, array: &ArrayLiteralNode) -> Value {
        let handle = self.emit_value(
            IrType::OpaqueArray,
            format!("call i8** @create_array(i32 {})", array.elements.len()),
        );
        for (i, element) in array.elements.iter().enumerate() {
            let value = self.lower_expression(element);
            let value = self.coerce(value, IrType::Opaque);
            self.emit(format!(
                "call void @array_set({}, i32 {i}, {})",
                handle.typed(),
                value.typed()
            ));
        }
        handle
    }

    fn lower_object(&mut self, object: &ObjectLiteralNode) -> Value {
        let kind = RecordKind::Patient;
        let record = self.emit_value(IrType::Record(kind), "call %Patient* @create_patient()");
        for prop in &object.properties {
            self.store_field(&record, kind, &prop.name, &prop.value);
        }
        record
    }

    /// The type `expr` lowers to, computed without emitting anything.
    pub(super) fn infer_type(&self, expr: &ExpressionNode) -> IrType {
        match expr {
            ExpressionNode::Literal(LiteralNode::Number(_))
            | ExpressionNode::Literal(LiteralNode::Measurement(_)) => IrType::Float,
            ExpressionNode::Literal(LiteralNode::String(_)) => IrType::Opaque,
            ExpressionNode::Literal(LiteralNode::Date(_)) => IrType::Int,
            ExpressionNode::Variable(ident) => self
                .vars
                .get(&ident.name)
                .map_or(IrType::Opaque, |b| b.ty),
            ExpressionNode::Binary(bin) => match bin.operator {
                BinaryOperator::Assign => self.infer_type(&bin.right),
                BinaryOperator::Add
                | BinaryOperator::Sub
                | BinaryOperator::Mul
                | BinaryOperator::Div => {
                    let left = self.infer_type(&bin.left);
                    let right = self.infer_type(&bin.right);
                    if bin.operator == BinaryOperator::Add
                        && (left == IrType::Opaque || right == IrType::Opaque)
                    {
                        IrType::Opaque
                    } else if left == IrType::Int && right == IrType::Int {
                        IrType::Int
                    } else {
                        IrType::Float
                    }
                }
                _ => IrType::Bool,
            },
            ExpressionNode::Unary(unary) => match unary.operator {
                UnaryOperator::Not => IrType::Bool,
                UnaryOperator::Neg => match self.infer_type(&unary.operand) {
                    IrType::Int => IrType::Int,
                    _ => IrType::Float,
                },
            },
            ExpressionNode::Member(member) => {
                let kind = match self.infer_type(&member.object) {
                    IrType::Record(kind) => kind,
                    _ => RecordKind::Patient,
                };
                kind.field(&member.property).map_or(IrType::Opaque, |(_, ty)| ty)
            }
            ExpressionNode::Call(call) => self
                .functions
                .get(&call.callee.name)
                .map_or(IrType::Opaque, |s| s.ret),
            ExpressionNode::MethodCall(_) => IrType::Opaque,
            ExpressionNode::Array(_) => IrType::OpaqueArray,
            ExpressionNode::Object(_) => IrType::Record(RecordKind::Patient),
        }
    }
}
