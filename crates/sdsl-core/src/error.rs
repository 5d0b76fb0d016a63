//! Error types for shader compilation.

use alloc::string::String;

use crate::{ast::TextLocation, symbols::SymbolKind, types::SymbolType};

/// Result type for shader compilation operations.
pub type SdslResult<T> = Result<T, SdslError>;

/// Error that can occur during semantic analysis or code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdslError {
    /// A type name is neither numeric nor a declared type
    UnresolvedType { name: String, location: TextLocation },
    /// A method's resolved type is not a function type
    InvalidSignature {
        method: String,
        found: String,
        location: TextLocation,
    },
    /// A component lookup on a shader symbol failed
    MissingMember {
        container: String,
        name: String,
        kind: SymbolKind,
    },
    /// A scope was popped with no scope open
    ScopeUnderflow,
    /// A symbol was declared with no scope open
    NoActiveScope,
    /// An identifier does not name a visible variable
    UndefinedVariable { name: String, location: TextLocation },
    /// Two types that must agree do not
    TypeMismatch {
        expected: SymbolType,
        found: SymbolType,
        location: TextLocation,
    },
    /// An arithmetic operator applied to a non-numeric operand
    InvalidOperand {
        operator: &'static str,
        ty: SymbolType,
        location: TextLocation,
    },
    /// Array sizes must be positive integer literals
    InvalidArraySize { name: String, location: TextLocation },
    /// Only variables and stream members can be assigned
    InvalidAssignmentTarget { location: TextLocation },
    /// Member initializers must be literals
    NonConstantInitializer { name: String, location: TextLocation },
    /// A non-void method body can fall off its end
    MissingReturn { method: String, location: TextLocation },
    /// `streams.x` used outside an entry point
    StreamsOutsideEntryPoint { name: String, location: TextLocation },
    /// A name is declared twice, or a method twice with the same signature
    Redeclaration {
        kind: SymbolKind,
        name: String,
        location: TextLocation,
    },
    /// A literal has no exact value in its type
    LiteralOutOfRange {
        literal: String,
        ty: SymbolType,
        location: TextLocation,
    },
    /// Internal code generation failure
    CodeGen(String),
}

impl SdslError {
    /// Create a new code generation error.
    pub fn codegen(msg: impl Into<String>) -> Self {
        SdslError::CodeGen(msg.into())
    }

    /// Create an unresolved type error.
    pub fn unresolved_type(name: impl Into<String>, location: TextLocation) -> Self {
        SdslError::UnresolvedType {
            name: name.into(),
            location,
        }
    }

    /// Create an undefined variable error.
    pub fn undefined_variable(name: impl Into<String>, location: TextLocation) -> Self {
        SdslError::UndefinedVariable {
            name: name.into(),
            location,
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(expected: SymbolType, found: SymbolType, location: TextLocation) -> Self {
        SdslError::TypeMismatch {
            expected,
            found,
            location,
        }
    }

    /// Source location of the error, if it has one.
    pub fn location(&self) -> Option<TextLocation> {
        match self {
            SdslError::UnresolvedType { location, .. }
            | SdslError::InvalidSignature { location, .. }
            | SdslError::UndefinedVariable { location, .. }
            | SdslError::TypeMismatch { location, .. }
            | SdslError::InvalidOperand { location, .. }
            | SdslError::InvalidArraySize { location, .. }
            | SdslError::InvalidAssignmentTarget { location }
            | SdslError::NonConstantInitializer { location, .. }
            | SdslError::MissingReturn { location, .. }
            | SdslError::StreamsOutsideEntryPoint { location, .. }
            | SdslError::Redeclaration { location, .. }
            | SdslError::LiteralOutOfRange { location, .. } => Some(*location),
            SdslError::MissingMember { .. }
            | SdslError::ScopeUnderflow
            | SdslError::NoActiveScope
            | SdslError::CodeGen(_) => None,
        }
    }
}

impl core::fmt::Display for SdslError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SdslError::UnresolvedType { name, .. } => write!(f, "Unresolved type '{}'", name),
            SdslError::InvalidSignature { method, found, .. } => write!(
                f,
                "Method '{}' has type '{}' instead of a function type",
                method, found
            ),
            SdslError::MissingMember {
                container,
                name,
                kind,
            } => write!(f, "'{}' has no {} named '{}'", container, kind, name),
            SdslError::ScopeUnderflow => write!(f, "Scope stack underflow"),
            SdslError::NoActiveScope => write!(f, "No scope open to declare into"),
            SdslError::UndefinedVariable { name, .. } => {
                write!(f, "Undefined variable '{}'", name)
            }
            SdslError::TypeMismatch {
                expected, found, ..
            } => write!(f, "Type mismatch: expected '{}', found '{}'", expected, found),
            SdslError::InvalidOperand { operator, ty, .. } => {
                write!(f, "Operator '{}' cannot be applied to '{}'", operator, ty)
            }
            SdslError::InvalidArraySize { name, .. } => write!(
                f,
                "Array size of '{}' must be a positive integer literal",
                name
            ),
            SdslError::InvalidAssignmentTarget { .. } => {
                write!(f, "Left side of assignment is not assignable")
            }
            SdslError::NonConstantInitializer { name, .. } => {
                write!(f, "Initializer of member '{}' must be a literal", name)
            }
            SdslError::MissingReturn { method, .. } => {
                write!(f, "Method '{}' does not return a value on every path", method)
            }
            SdslError::StreamsOutsideEntryPoint { name, .. } => write!(
                f,
                "'streams.{}' can only be used inside an entry point",
                name
            ),
            SdslError::Redeclaration { kind, name, .. } => {
                write!(f, "Redeclaration of {} '{}'", kind, name)
            }
            SdslError::LiteralOutOfRange { literal, ty, .. } => {
                write!(f, "Literal '{}' does not fit in '{}'", literal, ty)
            }
            SdslError::CodeGen(msg) => write!(f, "Code generation error: {}", msg),
        }?;
        match self.location() {
            Some(location) if location.is_known() => write!(f, " at {}", location),
            _ => Ok(()),
        }
    }
}
