//! Semantic analysis of a shader class.
//!
//! Resolves every type name, builds the shader's symbol, checks method
//! bodies and records the results in the symbol table's annotations.
//! Errors are collected rather than returned one at a time, so a single
//! pass reports everything wrong with the shader.

use alloc::{string::String, vec::Vec};

use crate::{
    ast::{ExpressionKind, Literal, ShaderClass, TextLocation, TypeName},
    decl::typecheck::{type_check_compose, type_check_generic, type_check_struct},
    error::{SdslError, SdslResult},
    expr::typecheck::type_check_expr,
    member::typecheck::type_check_member,
    method::{
        typecheck::{declare_method, type_check_method_body},
        EntryPoint,
    },
    sampler::typecheck::type_check_sampler_state,
    symbols::{Symbol, SymbolTable},
    types::{ShaderSymbol, SymbolType},
};

/// Type checker context.
///
/// Owns the symbol table while analysis runs and hands it over to code
/// generation afterwards.
pub struct TypeChecker {
    symbols: SymbolTable,
    diagnostics: Vec<SdslError>,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &[SdslError] {
        &self.diagnostics
    }

    /// Analyze a shader class.
    ///
    /// Generics and structs are declared first, then members, sampler
    /// states, composes and method signatures. The shader symbol is built
    /// from those before any attribute argument or method body is checked,
    /// so both can see every member regardless of declaration order.
    pub fn check_shader(&mut self, shader: &ShaderClass) {
        let symbols = &mut self.symbols;
        let diagnostics = &mut self.diagnostics;

        // Shader frame, outermost for every body
        symbols.push();

        let mut components = Vec::new();
        for generic in &shader.generics {
            components.push(type_check_generic(symbols, generic, diagnostics));
        }
        for s in shader.structs() {
            components.push(type_check_struct(symbols, s, diagnostics));
        }
        for member in shader.members() {
            components.push(type_check_member(symbols, member, diagnostics));
        }
        for sampler in shader.sampler_states() {
            components.push(type_check_sampler_state(symbols, sampler, diagnostics));
        }
        for compose in shader.composes() {
            components.push(type_check_compose(symbols, compose, diagnostics));
        }
        for method in shader.methods() {
            components.push(declare_method(symbols, method, diagnostics));
        }

        symbols
            .annotations_mut()
            .set_shader(ShaderSymbol::new(shader.name.name.clone(), components));

        let context = BodyContext::shader_level();
        for element in &shader.elements {
            for attribute in element.attributes() {
                for argument in &attribute.arguments {
                    type_check_expr(symbols, argument, &context, diagnostics);
                }
            }
        }

        for method in shader.methods() {
            type_check_method_body(symbols, method, diagnostics);
        }
    }

    /// Finish analysis, returning the table and every collected error.
    pub fn finish(self) -> (SymbolTable, Vec<SdslError>) {
        (self.symbols, self.diagnostics)
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// What the statement being checked is nested in.
#[derive(Debug, Clone)]
pub(crate) struct BodyContext {
    pub entry_point: Option<EntryPoint>,
    pub return_type: SymbolType,
}

impl BodyContext {
    /// Context for expressions outside any method.
    pub fn shader_level() -> Self {
        Self {
            entry_point: None,
            return_type: SymbolType::void(),
        }
    }
}

/// Resolve a type name, including its array suffix.
pub(crate) fn resolve_type_name(
    symbols: &SymbolTable,
    type_name: &TypeName,
) -> SdslResult<SymbolType> {
    let base = symbols
        .resolve_type(&type_name.name)
        .ok_or_else(|| SdslError::unresolved_type(type_name.name.clone(), type_name.location))?;

    match &type_name.array_size {
        None => Ok(base),
        Some(size) => match &size.kind {
            ExpressionKind::Literal(Literal::Int(n)) if *n > 0 && *n <= u32::MAX as i64 => {
                Ok(SymbolType::array(base, *n as u32))
            }
            _ => Err(SdslError::InvalidArraySize {
                name: type_name.name.clone(),
                location: size.location,
            }),
        },
    }
}

/// Resolve a type name, reporting failure and continuing with an
/// undefined placeholder.
pub(crate) fn resolve_or_report(
    symbols: &SymbolTable,
    type_name: &TypeName,
    diagnostics: &mut Vec<SdslError>,
) -> SymbolType {
    match resolve_type_name(symbols, type_name) {
        Ok(ty) => ty,
        Err(e) => {
            diagnostics.push(e);
            SymbolType::Undefined(type_name.name.clone())
        }
    }
}

/// Placeholder type for an expression that already produced an error.
pub(crate) fn poisoned() -> SymbolType {
    SymbolType::Undefined(String::from("<error>"))
}

/// Check that a value of type `found` can be stored where `expected` is
/// required. Undefined types were already reported and are accepted.
pub(crate) fn check_assignable(
    expected: &SymbolType,
    found: &SymbolType,
    location: TextLocation,
    diagnostics: &mut Vec<SdslError>,
) {
    if expected.is_undefined() || found.is_undefined() {
        return;
    }
    if expected != found {
        diagnostics.push(SdslError::type_mismatch(
            expected.clone(),
            found.clone(),
            location,
        ));
    }
}

/// Declare a symbol in the innermost frame, reporting a redeclaration if
/// that frame already holds the name with the same kind.
pub(crate) fn declare_unique(
    symbols: &mut SymbolTable,
    symbol: Symbol,
    location: TextLocation,
    diagnostics: &mut Vec<SdslError>,
) {
    let taken = symbols
        .current_frame()
        .and_then(|frame| frame.find(&symbol.id.name, symbol.id.kind))
        .is_some();
    if taken {
        diagnostics.push(SdslError::Redeclaration {
            kind: symbol.id.kind,
            name: symbol.id.name,
            location,
        });
        return;
    }
    report(diagnostics, symbols.declare(symbol));
}

pub(crate) fn report(diagnostics: &mut Vec<SdslError>, result: SdslResult<()>) {
    if let Err(e) = result {
        diagnostics.push(e);
    }
}
