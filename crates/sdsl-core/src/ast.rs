//! Shader AST.
//!
//! The parser that produces these nodes lives outside this crate. Nodes
//! carry a [`NodeId`] so analysis results can be stored in the symbol
//! table's side-table instead of mutating the tree.

use alloc::{boxed::Box, string::String, vec::Vec};
use core::fmt;

/// Identity of an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(raw: u32) -> Self {
        NodeId(raw)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

/// Hands out unique node ids.
#[derive(Debug, Clone, Default)]
pub struct NodeIdGen {
    next: u32,
}

impl NodeIdGen {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// Position in the source text. Line 0 means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TextLocation {
    pub line: u32,
    pub column: u32,
}

impl TextLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    pub fn is_known(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub location: TextLocation,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: TextLocation::default(),
        }
    }

    pub fn at(mut self, location: TextLocation) -> Self {
        self.location = location;
        self
    }
}

/// A type as written: a name plus an optional array size expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    pub name: String,
    pub array_size: Option<Box<Expression>>,
    pub location: TextLocation,
}

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            array_size: None,
            location: TextLocation::default(),
        }
    }

    /// `name[size]`
    pub fn array(name: impl Into<String>, size: Expression) -> Self {
        Self {
            array_size: Some(Box::new(size)),
            ..Self::new(name)
        }
    }

    pub fn at(mut self, location: TextLocation) -> Self {
        self.location = location;
        self
    }
}

// Member modifiers

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamKind {
    #[default]
    None,
    Stream,
    PatchStream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageModifier {
    #[default]
    None,
    Extern,
    Static,
    GroupShared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationModifier {
    #[default]
    None,
    Linear,
    Centroid,
    NoInterpolation,
    NoPerspective,
    Sample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeModifier {
    #[default]
    None,
    Const,
    RowMajor,
    ColumnMajor,
}

/// A variable declared at shader level.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderMember {
    pub id: NodeId,
    pub type_name: TypeName,
    pub name: Identifier,
    pub value: Option<Expression>,
    pub semantic: Option<Identifier>,
    pub is_staged: bool,
    pub stream_kind: StreamKind,
    pub storage: StorageModifier,
    pub interpolation: InterpolationModifier,
    pub type_modifier: TypeModifier,
    pub attributes: Vec<ShaderAttribute>,
    pub location: TextLocation,
}

impl ShaderMember {
    pub fn new(ids: &mut NodeIdGen, type_name: TypeName, name: impl Into<String>) -> Self {
        Self {
            id: ids.next_id(),
            type_name,
            name: Identifier::new(name),
            value: None,
            semantic: None,
            is_staged: false,
            stream_kind: StreamKind::None,
            storage: StorageModifier::None,
            interpolation: InterpolationModifier::None,
            type_modifier: TypeModifier::None,
            attributes: Vec::new(),
            location: TextLocation::default(),
        }
    }

    pub fn with_semantic(mut self, semantic: impl Into<String>) -> Self {
        self.semantic = Some(Identifier::new(semantic));
        self
    }

    pub fn with_value(mut self, value: Expression) -> Self {
        self.value = Some(value);
        self
    }

    /// Mark as a `stream` member.
    pub fn stream(mut self) -> Self {
        self.stream_kind = StreamKind::Stream;
        self
    }

    pub fn with_attribute(mut self, attribute: ShaderAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn at(mut self, location: TextLocation) -> Self {
        self.location = location;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodParameter {
    pub id: NodeId,
    pub type_name: TypeName,
    pub name: Identifier,
    pub semantic: Option<Identifier>,
    /// `in`, `out`, `inout` and friends, kept as written
    pub storage: Option<Identifier>,
    pub location: TextLocation,
}

impl MethodParameter {
    pub fn new(ids: &mut NodeIdGen, type_name: TypeName, name: impl Into<String>) -> Self {
        Self {
            id: ids.next_id(),
            type_name,
            name: Identifier::new(name),
            semantic: None,
            storage: None,
            location: TextLocation::default(),
        }
    }

    pub fn with_semantic(mut self, semantic: impl Into<String>) -> Self {
        self.semantic = Some(Identifier::new(semantic));
        self
    }

    pub fn with_storage(mut self, storage: impl Into<String>) -> Self {
        self.storage = Some(Identifier::new(storage));
        self
    }
}

/// A method declared in a shader class.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderMethod {
    pub id: NodeId,
    pub return_type: TypeName,
    pub name: Identifier,
    pub parameters: Vec<MethodParameter>,
    pub body: Option<BlockStatement>,
    pub visibility: Option<Identifier>,
    pub storage: Option<Identifier>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_clone: bool,
    pub is_staged: bool,
    pub attributes: Vec<ShaderAttribute>,
    pub location: TextLocation,
}

impl ShaderMethod {
    pub fn new(ids: &mut NodeIdGen, return_type: TypeName, name: impl Into<String>) -> Self {
        Self {
            id: ids.next_id(),
            return_type,
            name: Identifier::new(name),
            parameters: Vec::new(),
            body: None,
            visibility: None,
            storage: None,
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            is_override: false,
            is_clone: false,
            is_staged: false,
            attributes: Vec::new(),
            location: TextLocation::default(),
        }
    }

    pub fn with_parameter(mut self, parameter: MethodParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_body(mut self, statements: Vec<Statement>) -> Self {
        self.body = Some(BlockStatement::new(statements));
        self
    }

    pub fn with_visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = Some(Identifier::new(visibility));
        self
    }

    pub fn with_storage(mut self, storage: impl Into<String>) -> Self {
        self.storage = Some(Identifier::new(storage));
        self
    }

    pub fn with_attribute(mut self, attribute: ShaderAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn at(mut self, location: TextLocation) -> Self {
        self.location = location;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub type_name: TypeName,
    pub name: Identifier,
}

impl StructField {
    pub fn new(type_name: TypeName, name: impl Into<String>) -> Self {
        Self {
            type_name,
            name: Identifier::new(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaderStruct {
    pub id: NodeId,
    pub name: Identifier,
    pub fields: Vec<StructField>,
    pub location: TextLocation,
}

impl ShaderStruct {
    pub fn new(ids: &mut NodeIdGen, name: impl Into<String>, fields: Vec<StructField>) -> Self {
        Self {
            id: ids.next_id(),
            name: Identifier::new(name),
            fields,
            location: TextLocation::default(),
        }
    }
}

/// A generic parameter of a shader class (`shader Foo<float Scale>`).
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderParameter {
    pub id: NodeId,
    pub type_name: TypeName,
    pub name: Identifier,
    pub semantic: Option<Identifier>,
    pub storage: Option<Identifier>,
}

impl ShaderParameter {
    pub fn new(ids: &mut NodeIdGen, type_name: TypeName, name: impl Into<String>) -> Self {
        Self {
            id: ids.next_id(),
            type_name,
            name: Identifier::new(name),
            semantic: None,
            storage: None,
        }
    }

    pub fn with_semantic(mut self, semantic: impl Into<String>) -> Self {
        self.semantic = Some(Identifier::new(semantic));
        self
    }

    pub fn with_storage(mut self, storage: impl Into<String>) -> Self {
        self.storage = Some(Identifier::new(storage));
        self
    }
}

/// `[name(arguments)]` in front of a member or method.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderAttribute {
    pub name: Identifier,
    pub arguments: Vec<Expression>,
    pub location: TextLocation,
}

impl ShaderAttribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Identifier::new(name),
            arguments: Vec::new(),
            location: TextLocation::default(),
        }
    }

    pub fn with_argument(mut self, argument: Expression) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// One `Key = Value` line of a sampler state block.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerStateAssign {
    pub name: Identifier,
    pub value: Expression,
    pub location: TextLocation,
}

impl SamplerStateAssign {
    pub fn new(name: impl Into<String>, value: Expression) -> Self {
        Self {
            name: Identifier::new(name),
            value,
            location: TextLocation::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerKind {
    State,
    ComparisonState,
}

/// `SamplerState Name { ... }` or `SamplerComparisonState Name { ... }`.
///
/// The assignments are sampler configuration for the runtime; they are
/// carried as written and not evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSamplerState {
    pub id: NodeId,
    pub kind: SamplerKind,
    pub name: Identifier,
    pub members: Vec<SamplerStateAssign>,
    pub is_staged: bool,
    pub attributes: Vec<ShaderAttribute>,
    pub location: TextLocation,
}

impl ShaderSamplerState {
    pub fn new(ids: &mut NodeIdGen, kind: SamplerKind, name: impl Into<String>) -> Self {
        Self {
            id: ids.next_id(),
            kind,
            name: Identifier::new(name),
            members: Vec::new(),
            is_staged: false,
            attributes: Vec::new(),
            location: TextLocation::default(),
        }
    }

    pub fn with_member(mut self, member: SamplerStateAssign) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_attribute(mut self, attribute: ShaderAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn at(mut self, location: TextLocation) -> Self {
        self.location = location;
        self
    }
}

/// Reference to another shader class, with generic arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixin {
    pub name: Identifier,
    pub generics: Vec<Expression>,
}

impl Mixin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Identifier::new(name),
            generics: Vec::new(),
        }
    }

    pub fn with_generic(mut self, value: Expression) -> Self {
        self.generics.push(value);
        self
    }
}

/// `compose Mixin Name;` or `compose Mixin[] Name;`
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderCompose {
    pub id: NodeId,
    pub name: Identifier,
    pub mixin: Mixin,
    pub is_array: bool,
    pub is_staged: bool,
    pub attributes: Vec<ShaderAttribute>,
    pub location: TextLocation,
}

impl ShaderCompose {
    pub fn new(ids: &mut NodeIdGen, mixin: Mixin, name: impl Into<String>) -> Self {
        Self {
            id: ids.next_id(),
            name: Identifier::new(name),
            mixin,
            is_array: false,
            is_staged: false,
            attributes: Vec::new(),
            location: TextLocation::default(),
        }
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn with_attribute(mut self, attribute: ShaderAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShaderElement {
    Member(ShaderMember),
    Method(ShaderMethod),
    Struct(ShaderStruct),
    SamplerState(ShaderSamplerState),
    Compose(ShaderCompose),
}

impl ShaderElement {
    /// Attributes written in front of the element.
    pub fn attributes(&self) -> &[ShaderAttribute] {
        match self {
            ShaderElement::Member(m) => &m.attributes,
            ShaderElement::Method(m) => &m.attributes,
            ShaderElement::SamplerState(s) => &s.attributes,
            ShaderElement::Compose(c) => &c.attributes,
            ShaderElement::Struct(_) => &[],
        }
    }
}

/// A shader class: the unit of compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderClass {
    pub name: Identifier,
    pub generics: Vec<ShaderParameter>,
    pub elements: Vec<ShaderElement>,
}

impl ShaderClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Identifier::new(name),
            generics: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn with_generic(mut self, generic: ShaderParameter) -> Self {
        self.generics.push(generic);
        self
    }

    pub fn with_element(mut self, element: impl Into<ShaderElement>) -> Self {
        self.elements.push(element.into());
        self
    }

    pub fn members(&self) -> impl Iterator<Item = &ShaderMember> {
        self.elements.iter().filter_map(|e| match e {
            ShaderElement::Member(m) => Some(m),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &ShaderMethod> {
        self.elements.iter().filter_map(|e| match e {
            ShaderElement::Method(m) => Some(m),
            _ => None,
        })
    }

    pub fn structs(&self) -> impl Iterator<Item = &ShaderStruct> {
        self.elements.iter().filter_map(|e| match e {
            ShaderElement::Struct(s) => Some(s),
            _ => None,
        })
    }

    pub fn sampler_states(&self) -> impl Iterator<Item = &ShaderSamplerState> {
        self.elements.iter().filter_map(|e| match e {
            ShaderElement::SamplerState(s) => Some(s),
            _ => None,
        })
    }

    pub fn composes(&self) -> impl Iterator<Item = &ShaderCompose> {
        self.elements.iter().filter_map(|e| match e {
            ShaderElement::Compose(c) => Some(c),
            _ => None,
        })
    }
}

impl From<ShaderMember> for ShaderElement {
    fn from(member: ShaderMember) -> Self {
        ShaderElement::Member(member)
    }
}

impl From<ShaderMethod> for ShaderElement {
    fn from(method: ShaderMethod) -> Self {
        ShaderElement::Method(method)
    }
}

impl From<ShaderStruct> for ShaderElement {
    fn from(s: ShaderStruct) -> Self {
        ShaderElement::Struct(s)
    }
}

impl From<ShaderSamplerState> for ShaderElement {
    fn from(s: ShaderSamplerState) -> Self {
        ShaderElement::SamplerState(s)
    }
}

impl From<ShaderCompose> for ShaderElement {
    fn from(c: ShaderCompose) -> Self {
        ShaderElement::Compose(c)
    }
}

// Statements

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
    pub location: TextLocation,
}

impl BlockStatement {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            statements,
            location: TextLocation::default(),
        }
    }

    /// Whether control always reaches a `return` at the end of the block.
    pub fn ends_with_return(&self) -> bool {
        match self.statements.last() {
            Some(Statement::Return { .. }) => true,
            Some(Statement::Block(inner)) => inner.ends_with_return(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `type name = value;`
    Declare {
        id: NodeId,
        type_name: TypeName,
        name: Identifier,
        value: Option<Expression>,
        location: TextLocation,
    },
    /// `target = value;` where target is a variable or `streams.name`
    Assign {
        target: Expression,
        value: Expression,
        location: TextLocation,
    },
    Expression(Expression),
    Return {
        value: Option<Expression>,
        location: TextLocation,
    },
    Block(BlockStatement),
}

impl Statement {
    pub fn declare(
        ids: &mut NodeIdGen,
        type_name: TypeName,
        name: impl Into<String>,
        value: Option<Expression>,
    ) -> Self {
        Statement::Declare {
            id: ids.next_id(),
            type_name,
            name: Identifier::new(name),
            value,
            location: TextLocation::default(),
        }
    }

    pub fn assign(target: Expression, value: Expression) -> Self {
        Statement::Assign {
            target,
            value,
            location: TextLocation::default(),
        }
    }

    pub fn ret(value: Option<Expression>) -> Self {
        Statement::Return {
            value,
            location: TextLocation::default(),
        }
    }

    pub fn block(statements: Vec<Statement>) -> Self {
        Statement::Block(BlockStatement::new(statements))
    }

    pub fn location(&self) -> TextLocation {
        match self {
            Statement::Declare { location, .. }
            | Statement::Assign { location, .. }
            | Statement::Return { location, .. } => *location,
            Statement::Expression(expr) => expr.location,
            Statement::Block(block) => block.location,
        }
    }
}

// Expressions

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Literal(Literal),
    Identifier(String),
    /// `streams.name`
    Streams(String),
    Binary {
        operator: BinaryOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub id: NodeId,
    pub kind: ExpressionKind,
    pub location: TextLocation,
}

impl Expression {
    pub fn new(ids: &mut NodeIdGen, kind: ExpressionKind) -> Self {
        Self {
            id: ids.next_id(),
            kind,
            location: TextLocation::default(),
        }
    }

    pub fn literal(ids: &mut NodeIdGen, literal: Literal) -> Self {
        Self::new(ids, ExpressionKind::Literal(literal))
    }

    pub fn identifier(ids: &mut NodeIdGen, name: impl Into<String>) -> Self {
        Self::new(ids, ExpressionKind::Identifier(name.into()))
    }

    pub fn streams(ids: &mut NodeIdGen, name: impl Into<String>) -> Self {
        Self::new(ids, ExpressionKind::Streams(name.into()))
    }

    pub fn binary(
        ids: &mut NodeIdGen,
        operator: BinaryOperator,
        lhs: Expression,
        rhs: Expression,
    ) -> Self {
        Self::new(
            ids,
            ExpressionKind::Binary {
                operator,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
        )
    }

    pub fn at(mut self, location: TextLocation) -> Self {
        self.location = location;
        self
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_node_ids_are_unique() {
        let mut ids = NodeIdGen::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(b.index(), a.index() + 1);
    }

    #[test]
    fn test_shader_class_element_views() {
        let mut ids = NodeIdGen::new();
        let shader = ShaderClass::new("Basic")
            .with_element(ShaderMember::new(&mut ids, TypeName::new("float4"), "Position"))
            .with_element(ShaderMethod::new(&mut ids, TypeName::new("void"), "VSMain"))
            .with_element(ShaderStruct::new(
                &mut ids,
                "Point",
                vec![StructField::new(TypeName::new("float"), "x")],
            ));
        assert_eq!(shader.members().count(), 1);
        assert_eq!(shader.methods().count(), 1);
        assert_eq!(shader.structs().next().map(|s| s.name.name.as_str()), Some("Point"));
    }

    #[test]
    fn test_sampler_and_compose_elements() {
        let mut ids = NodeIdGen::new();
        let filter = Expression::identifier(&mut ids, "MIN_MAG_MIP_LINEAR");
        let shader = ShaderClass::new("Textured")
            .with_element(
                ShaderSamplerState::new(&mut ids, SamplerKind::State, "LinearSampler")
                    .with_member(SamplerStateAssign::new("Filter", filter)),
            )
            .with_element(ShaderCompose::new(&mut ids, Mixin::new("ComputeColor"), "Layers").array())
            .with_element(
                ShaderMethod::new(&mut ids, TypeName::new("void"), "CSMain")
                    .with_attribute(ShaderAttribute::new("numthreads")),
            );

        let sampler = shader.sampler_states().next().unwrap();
        assert_eq!(sampler.members[0].name.name, "Filter");
        let compose = shader.composes().next().unwrap();
        assert!(compose.is_array);
        assert_eq!(compose.mixin.name.name, "ComputeColor");
        assert_eq!(shader.elements[2].attributes()[0].name.name, "numthreads");
        assert!(shader.elements[0].attributes().is_empty());
    }

    #[test]
    fn test_parameter_modifiers() {
        let mut ids = NodeIdGen::new();
        let param = MethodParameter::new(&mut ids, TypeName::new("float4"), "color")
            .with_storage("out")
            .with_semantic("SV_Target");
        assert_eq!(param.storage.map(|s| s.name), Some("out".into()));
        let method = ShaderMethod::new(&mut ids, TypeName::new("void"), "Draw")
            .with_visibility("public")
            .with_storage("stage");
        assert_eq!(method.visibility.map(|v| v.name), Some("public".into()));
        assert_eq!(method.storage.map(|v| v.name), Some("stage".into()));
    }

    #[test]
    fn test_block_ends_with_return() {
        assert!(BlockStatement::new(vec![Statement::ret(None)]).ends_with_return());
        assert!(!BlockStatement::new(vec![]).ends_with_return());
        let nested = BlockStatement::new(vec![Statement::block(vec![Statement::ret(None)])]);
        assert!(nested.ends_with_return());
    }
}
