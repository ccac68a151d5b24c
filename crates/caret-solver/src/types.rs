//! Type descriptors.
//!
//! A `TypeDescriptor` is an immutable value describing what the engine
//! believes an expression evaluates to. `Unknown` is the universal fallback:
//! every query that cannot do better answers with it instead of failing.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Null,
    Undefined,
}

impl PrimitiveKind {
    /// Lower-case spelling used in return-type strings and `type_info`.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::BigInt => "bigint",
            PrimitiveKind::Symbol => "symbol",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Undefined => "undefined",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "string" => PrimitiveKind::String,
            "number" => PrimitiveKind::Number,
            "boolean" => PrimitiveKind::Boolean,
            "bigint" => PrimitiveKind::BigInt,
            "symbol" => PrimitiveKind::Symbol,
            "null" => PrimitiveKind::Null,
            "undefined" | "void" => PrimitiveKind::Undefined,
            _ => return None,
        };
        Some(kind)
    }

    /// Name of the wrapper whose members the primitive exposes.
    pub fn wrapper_name(self) -> Option<&'static str> {
        match self {
            PrimitiveKind::String => Some("String"),
            PrimitiveKind::Number => Some("Number"),
            PrimitiveKind::Boolean => Some("Boolean"),
            PrimitiveKind::BigInt => Some("BigInt"),
            PrimitiveKind::Symbol => Some("Symbol"),
            PrimitiveKind::Null | PrimitiveKind::Undefined => None,
        }
    }
}

/// Whether a member is read as a value or called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Property,
    Method,
}

/// Which side of a class a descriptor stands for: `new C()` values or `C`
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassSide {
    Instance,
    Constructor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMember {
    pub name: String,
    pub kind: MemberKind,
    pub is_static: bool,
    /// Property type, or the return type of a method.
    pub type_info: TypeDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassType {
    pub name: String,
    /// Members recorded from the class body and `this.x = ...` assignments.
    pub members: Vec<ClassMember>,
    /// Name of the `extends` target, when it is a plain identifier.
    pub parent: Option<String>,
    pub side: ClassSide,
}

impl ClassType {
    /// Members visible from this side: instance members for instances,
    /// static members for the constructor.
    pub fn side_members(&self) -> impl Iterator<Item = &ClassMember> {
        let want_static = self.side == ClassSide::Constructor;
        self.members.iter().filter(move |m| m.is_static == want_static)
    }

    /// Same class, other side.
    pub fn with_side(&self, side: ClassSide) -> ClassType {
        ClassType {
            side,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDescriptor {
    Primitive {
        primitive: PrimitiveKind,
    },
    Array {
        element: Box<TypeDescriptor>,
    },
    /// A named built-in object (`name`), or an object literal's shape, or
    /// both unknown (a plain `object`).
    Object {
        name: Option<String>,
        shape: Option<IndexMap<String, TypeDescriptor>>,
    },
    Class(ClassType),
    Function {
        name: Option<String>,
        params: Vec<String>,
        return_type: Box<TypeDescriptor>,
    },
    Unknown,
}

impl TypeDescriptor {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeDescriptor::Primitive { primitive: kind }
    }

    pub fn string() -> Self {
        Self::primitive(PrimitiveKind::String)
    }

    pub fn number() -> Self {
        Self::primitive(PrimitiveKind::Number)
    }

    pub fn boolean() -> Self {
        Self::primitive(PrimitiveKind::Boolean)
    }

    pub fn undefined() -> Self {
        Self::primitive(PrimitiveKind::Undefined)
    }

    pub fn array(element: TypeDescriptor) -> Self {
        TypeDescriptor::Array {
            element: Box::new(element),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeDescriptor::Object {
            name: Some(name.into()),
            shape: None,
        }
    }

    pub fn shaped(shape: IndexMap<String, TypeDescriptor>) -> Self {
        TypeDescriptor::Object {
            name: None,
            shape: Some(shape),
        }
    }

    pub fn function(name: Option<String>, params: Vec<String>, return_type: TypeDescriptor) -> Self {
        TypeDescriptor::Function {
            name,
            params,
            return_type: Box::new(return_type),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TypeDescriptor::Unknown)
    }

    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            TypeDescriptor::Primitive { primitive } => Some(*primitive),
            _ => None,
        }
    }

    pub fn is_primitive(&self, kind: PrimitiveKind) -> bool {
        self.as_primitive() == Some(kind)
    }

    /// Element type of an array.
    pub fn element_type(&self) -> Option<&TypeDescriptor> {
        match self {
            TypeDescriptor::Array { element } => Some(element),
            _ => None,
        }
    }

    /// Own keys of a shaped object.
    pub fn shape(&self) -> Option<&IndexMap<String, TypeDescriptor>> {
        match self {
            TypeDescriptor::Object { shape, .. } => shape.as_ref(),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            TypeDescriptor::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Name of the built-in catalog entry describing this type's members.
    pub fn catalog_name(&self) -> Option<&str> {
        match self {
            TypeDescriptor::Primitive { primitive } => primitive.wrapper_name(),
            TypeDescriptor::Array { .. } => Some("Array"),
            TypeDescriptor::Object { name: Some(name), .. } => Some(name),
            TypeDescriptor::Object { name: None, .. } => Some("Object"),
            TypeDescriptor::Function { .. } => Some("Function"),
            TypeDescriptor::Class(_) | TypeDescriptor::Unknown => None,
        }
    }

    /// Result of calling a value of this type.
    pub fn call_result(&self) -> TypeDescriptor {
        match self {
            TypeDescriptor::Function { return_type, .. } => (**return_type).clone(),
            _ => TypeDescriptor::Unknown,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive { primitive } => f.write_str(primitive.name()),
            TypeDescriptor::Array { element } => write!(f, "Array<{element}>"),
            TypeDescriptor::Object { name: Some(name), .. } => f.write_str(name),
            TypeDescriptor::Object {
                name: None,
                shape: Some(shape),
            } => {
                if shape.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (key, value)) in shape.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str(" }")
            }
            TypeDescriptor::Object {
                name: None,
                shape: None,
            } => f.write_str("object"),
            TypeDescriptor::Class(class) => match class.side {
                ClassSide::Instance => f.write_str(&class.name),
                ClassSide::Constructor => write!(f, "typeof {}", class.name),
            },
            TypeDescriptor::Function {
                params,
                return_type,
                ..
            } => write!(f, "({}) => {return_type}", params.join(", ")),
            TypeDescriptor::Unknown => f.write_str("unknown"),
        }
    }
}
