// AST node definitions for the Charcot language.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Source region a node was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// Byte offset of the first token
    pub start: usize,
    /// Byte offset just past the last token
    pub end: usize,
    /// 1-based line of the first token
    pub line: usize,
    /// 1-based column of the first token
    pub column: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A name together with where it was written.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IdentifierNode {
    pub name: String,
    pub span: Span,
}

impl IdentifierNode {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Root of a compilation unit.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProgramNode {
    pub declarations: Vec<DeclarationNode>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeclarationNode {
    Import(ImportNode),
    Variable(VariableDeclarationNode),
    Patient(PatientDeclarationNode),
    Procedure(ProcedureNode),
    Treatment(ProcedureNode),
}

/// `import a.b.c;`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImportNode {
    pub path: Vec<String>,
    pub span: Span,
}

impl ImportNode {
    /// Dotted module name, e.g. `clinical.protocols`
    pub fn module_name(&self) -> String {
        self.path.join(".")
    }
}

/// `name (: type)? (= expr)? ;`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableDeclarationNode {
    pub name: IdentifierNode,
    pub type_annotation: Option<String>,
    pub initializer: Option<ExpressionNode>,
}

/// `patient name : Patient { prop: expr, ... }`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatientDeclarationNode {
    pub name: IdentifierNode,
    pub properties: Vec<PropertyAssignmentNode>,
}

/// Shared shape of `procedure` and `treatment` declarations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProcedureNode {
    pub name: IdentifierNode,
    pub parameters: Vec<ParameterNode>,
    pub body: BlockNode,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterNode {
    pub name: IdentifierNode,
    pub type_annotation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StatementNode {
    Variable(VariableDeclarationNode),
    Block(BlockNode),
    If(Box<IfNode>),
    While(Box<WhileNode>),
    ForEach(Box<ForEachNode>),
    ClinicalPath(Box<ClinicalPathNode>),
    Return(ReturnNode),
    Expr(ExpressionNode),
    Prescribe(Box<PrescribeNode>),
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockNode {
    pub statements: Vec<StatementNode>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IfNode {
    pub condition: ExpressionNode,
    pub then_branch: StatementNode,
    pub else_branch: Option<StatementNode>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WhileNode {
    pub condition: ExpressionNode,
    pub body: StatementNode,
}

/// The loop variable of a `foreach`: either declared in the header or an
/// existing binding that is overwritten on each iteration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LoopBinding {
    Declaration(VariableDeclarationNode),
    Existing(IdentifierNode),
}

impl LoopBinding {
    pub fn name(&self) -> &str {
        match self {
            LoopBinding::Declaration(decl) => &decl.name.name,
            LoopBinding::Existing(ident) => &ident.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForEachNode {
    pub binding: LoopBinding,
    pub collection: ExpressionNode,
    pub body: StatementNode,
}

/// `clinical_path expr { case v: stmt ... }`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClinicalPathNode {
    pub subject: ExpressionNode,
    pub cases: Vec<CaseNode>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CaseNode {
    pub value: ExpressionNode,
    pub body: StatementNode,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReturnNode {
    pub value: Option<ExpressionNode>,
}

/// `prescribe(patient, medication, dose[, instructions[, duration]]);`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrescribeNode {
    pub patient: ExpressionNode,
    pub medication: ExpressionNode,
    pub dose: ExpressionNode,
    pub instructions: Option<ExpressionNode>,
    pub duration: Option<ExpressionNode>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExpressionNode {
    Binary(Box<BinaryExpressionNode>),
    Unary(Box<UnaryExpressionNode>),
    Variable(IdentifierNode),
    Member(Box<MemberExpressionNode>),
    Call(CallExpressionNode),
    MethodCall(Box<MethodCallNode>),
    Literal(LiteralNode),
    Array(ArrayLiteralNode),
    Object(ObjectLiteralNode),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LiteralNode {
    Number(f64),
    String(String),
    /// `YYYY-MM-DD`, kept verbatim
    Date(String),
    /// Number plus unit, kept verbatim (`120/80mmHg`)
    Measurement(String),
}

impl LiteralNode {
    pub fn kind(&self) -> &'static str {
        match self {
            LiteralNode::Number(_) => "number",
            LiteralNode::String(_) => "string",
            LiteralNode::Date(_) => "date",
            LiteralNode::Measurement(_) => "measurement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOperator {
    Assign,
    Or,
    And,
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Assign => "=",
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::Eq => "==",
            BinaryOperator::Neq => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::Le => "<=",
            BinaryOperator::Ge => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOperator {
    Not,
    Neg,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Neg => "-",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryExpressionNode {
    pub left: ExpressionNode,
    pub operator: BinaryOperator,
    pub right: ExpressionNode,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryExpressionNode {
    pub operator: UnaryOperator,
    pub operand: ExpressionNode,
}

/// `object.property`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemberExpressionNode {
    pub object: ExpressionNode,
    pub property: String,
}

/// `name(args)`; only plain names are callable
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CallExpressionNode {
    pub callee: IdentifierNode,
    pub arguments: Vec<ExpressionNode>,
}

/// `object.method(args)`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MethodCallNode {
    pub object: ExpressionNode,
    pub method: String,
    pub arguments: Vec<ExpressionNode>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrayLiteralNode {
    pub elements: Vec<ExpressionNode>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectLiteralNode {
    pub properties: Vec<PropertyAssignmentNode>,
}

/// `name: value` inside a patient declaration or an object literal
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyAssignmentNode {
    pub name: String,
    pub value: ExpressionNode,
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for LiteralNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralNode::Number(n) => write!(f, "{n}"),
            LiteralNode::String(s) => write!(f, "{s:?}"),
            LiteralNode::Date(d) => f.write_str(d),
            LiteralNode::Measurement(m) => f.write_str(m),
        }
    }
}

impl fmt::Display for PropertyAssignmentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Fully parenthesized infix form; grouping is explicit for every binary
/// and unary node.
impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionNode::Binary(bin) => {
                write!(f, "({} {} {})", bin.left, bin.operator, bin.right)
            }
            ExpressionNode::Unary(un) => write!(f, "({}{})", un.operator, un.operand),
            ExpressionNode::Variable(ident) => f.write_str(&ident.name),
            ExpressionNode::Member(member) => write!(f, "{}.{}", member.object, member.property),
            ExpressionNode::Call(call) => {
                write!(f, "{}(", call.callee.name)?;
                write_list(f, &call.arguments)?;
                f.write_str(")")
            }
            ExpressionNode::MethodCall(call) => {
                write!(f, "{}.{}(", call.object, call.method)?;
                write_list(f, &call.arguments)?;
                f.write_str(")")
            }
            ExpressionNode::Literal(lit) => write!(f, "{lit}"),
            ExpressionNode::Array(array) => {
                f.write_str("[")?;
                write_list(f, &array.elements)?;
                f.write_str("]")
            }
            ExpressionNode::Object(object) => {
                f.write_str("{")?;
                write_list(f, &object.properties)?;
                f.write_str("}")
            }
        }
    }
}
