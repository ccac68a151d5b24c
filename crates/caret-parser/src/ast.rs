//! AST node model.
//!
//! A node is a [`NodeKind`] plus the `[start, end)` span it covers. Children
//! are owned by value; nothing points back up the tree.

use caret_common::TextRange;
use caret_scanner::TokenKind;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub span: TextRange,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn new(span: TextRange, kind: NodeKind) -> Self {
        Node { span, kind }
    }

    pub fn start(&self) -> u32 {
        self.span.start
    }

    pub fn end(&self) -> u32 {
        self.span.end
    }

    /// Name of an `Identifier` node.
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Strip any number of enclosing parentheses.
    pub fn skip_parentheses(&self) -> &Node {
        let mut node = self;
        while let NodeKind::Parenthesized { expression } = &node.kind {
            node = expression;
        }
        node
    }

    /// Short name of the node kind, for tree dumps and logs.
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
    Constructor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
    BitwiseNot,
    Typeof,
    Void,
    Delete,
    Await,
}

/// Shared payload of function declarations and expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub name: Option<String>,
    /// `Parameter` nodes
    pub params: Vec<Node>,
    /// Always a `Block`
    pub body: Box<Node>,
    pub is_async: bool,
}

/// Shared payload of class declarations and expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    pub name: Option<String>,
    pub superclass: Option<Box<Node>>,
    /// `MethodDefinition` and `PropertyDefinition` nodes
    pub members: Vec<Node>,
    /// Span of the `{ ... }` body
    pub body_span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    Program {
        body: Vec<Node>,
    },

    // Names and literals
    Identifier {
        name: String,
    },
    StringLiteral {
        /// Cooked value without quotes
        value: String,
    },
    NumericLiteral {
        value: f64,
        raw: String,
    },
    BigIntLiteral {
        raw: String,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    TemplateLiteral {
        raw: String,
    },
    ArrayLiteral {
        elements: Vec<Node>,
    },
    ObjectLiteral {
        /// `Property` and `SpreadElement` nodes
        properties: Vec<Node>,
    },
    Property {
        /// `Identifier`, `StringLiteral` or `NumericLiteral`; any expression
        /// when `computed`
        key: Box<Node>,
        value: Box<Node>,
        computed: bool,
        shorthand: bool,
        method: bool,
    },
    SpreadElement {
        argument: Box<Node>,
    },
    This,
    Super,

    // Expressions
    Member {
        object: Box<Node>,
        /// `Identifier` unless `computed`
        property: Box<Node>,
        computed: bool,
        optional: bool,
    },
    Call {
        callee: Box<Node>,
        arguments: Vec<Node>,
        optional: bool,
    },
    New {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    Binary {
        operator: TokenKind,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// `&&`, `||` and `??`
    Logical {
        operator: TokenKind,
        left: Box<Node>,
        right: Box<Node>,
    },
    Unary {
        operator: UnaryOperator,
        argument: Box<Node>,
    },
    Update {
        operator: TokenKind,
        prefix: bool,
        argument: Box<Node>,
    },
    Conditional {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
    Assignment {
        operator: TokenKind,
        target: Box<Node>,
        value: Box<Node>,
    },
    Sequence {
        expressions: Vec<Node>,
    },
    Parenthesized {
        expression: Box<Node>,
    },
    ArrowFunction {
        /// `Parameter` nodes
        params: Vec<Node>,
        /// A `Block`, or the returned expression
        body: Box<Node>,
        is_async: bool,
    },
    Parameter {
        /// Empty when the parameter is a destructuring pattern
        name: String,
        /// `ObjectLiteral` or `ArrayLiteral` used as a binding pattern
        pattern: Option<Box<Node>>,
        default: Option<Box<Node>>,
        rest: bool,
    },
    FunctionExpression(Function),
    ClassExpression(Class),

    // Class members
    MethodDefinition {
        key: String,
        kind: MethodKind,
        is_static: bool,
        /// `FunctionExpression`
        value: Box<Node>,
    },
    PropertyDefinition {
        key: String,
        value: Option<Box<Node>>,
        is_static: bool,
    },

    // Declarations
    FunctionDeclaration(Function),
    ClassDeclaration(Class),
    VariableDeclaration {
        kind: VariableKind,
        /// `VariableDeclarator` nodes
        declarations: Vec<Node>,
    },
    VariableDeclarator {
        /// `Identifier`, or an object/array literal used as a pattern
        target: Box<Node>,
        init: Option<Box<Node>>,
    },

    // Statements
    ExpressionStatement {
        expression: Box<Node>,
    },
    Return {
        argument: Option<Box<Node>>,
    },
    Block {
        body: Vec<Node>,
    },
    If {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    },
    While {
        test: Box<Node>,
        body: Box<Node>,
    },
    DoWhile {
        body: Box<Node>,
        test: Box<Node>,
    },
    For {
        init: Option<Box<Node>>,
        test: Option<Box<Node>>,
        update: Option<Box<Node>>,
        body: Box<Node>,
    },
    /// `for (left in right)` or, with `is_of`, `for (left of right)`
    ForInOf {
        left: Box<Node>,
        right: Box<Node>,
        body: Box<Node>,
        is_of: bool,
    },
    Switch {
        discriminant: Box<Node>,
        /// `SwitchCase` nodes
        cases: Vec<Node>,
    },
    SwitchCase {
        /// `None` for `default:`
        test: Option<Box<Node>>,
        consequent: Vec<Node>,
    },
    Try {
        block: Box<Node>,
        handler: Option<Box<Node>>,
        finalizer: Option<Box<Node>>,
    },
    CatchClause {
        param: Option<String>,
        body: Box<Node>,
    },
    Throw {
        argument: Box<Node>,
    },
    Break,
    Continue,
    Empty,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::StringLiteral { .. } => "StringLiteral",
            NodeKind::NumericLiteral { .. } => "NumericLiteral",
            NodeKind::BigIntLiteral { .. } => "BigIntLiteral",
            NodeKind::BooleanLiteral { .. } => "BooleanLiteral",
            NodeKind::NullLiteral => "NullLiteral",
            NodeKind::TemplateLiteral { .. } => "TemplateLiteral",
            NodeKind::ArrayLiteral { .. } => "ArrayLiteral",
            NodeKind::ObjectLiteral { .. } => "ObjectLiteral",
            NodeKind::Property { .. } => "Property",
            NodeKind::SpreadElement { .. } => "SpreadElement",
            NodeKind::This => "This",
            NodeKind::Super => "Super",
            NodeKind::Member { .. } => "Member",
            NodeKind::Call { .. } => "Call",
            NodeKind::New { .. } => "New",
            NodeKind::Binary { .. } => "Binary",
            NodeKind::Logical { .. } => "Logical",
            NodeKind::Unary { .. } => "Unary",
            NodeKind::Update { .. } => "Update",
            NodeKind::Conditional { .. } => "Conditional",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::Sequence { .. } => "Sequence",
            NodeKind::Parenthesized { .. } => "Parenthesized",
            NodeKind::ArrowFunction { .. } => "ArrowFunction",
            NodeKind::Parameter { .. } => "Parameter",
            NodeKind::FunctionExpression(_) => "FunctionExpression",
            NodeKind::ClassExpression(_) => "ClassExpression",
            NodeKind::MethodDefinition { .. } => "MethodDefinition",
            NodeKind::PropertyDefinition { .. } => "PropertyDefinition",
            NodeKind::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeKind::ClassDeclaration(_) => "ClassDeclaration",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            NodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            NodeKind::Return { .. } => "Return",
            NodeKind::Block { .. } => "Block",
            NodeKind::If { .. } => "If",
            NodeKind::While { .. } => "While",
            NodeKind::DoWhile { .. } => "DoWhile",
            NodeKind::For { .. } => "For",
            NodeKind::ForInOf { .. } => "ForInOf",
            NodeKind::Switch { .. } => "Switch",
            NodeKind::SwitchCase { .. } => "SwitchCase",
            NodeKind::Try { .. } => "Try",
            NodeKind::CatchClause { .. } => "CatchClause",
            NodeKind::Throw { .. } => "Throw",
            NodeKind::Break => "Break",
            NodeKind::Continue => "Continue",
            NodeKind::Empty => "Empty",
        }
    }
}
