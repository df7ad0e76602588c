//! Typed syntax tree for GraphQL documents: type-system definitions,
//! executable definitions, and the [`Type`] and [`Value`] sums shared with
//! [`Schema`][crate::Schema].
//!
//! ## Parsing
//!
//! Start with [`Document::parse`]. Syntax errors come from the external
//! lexer/parser (`apollo-parser`) and surface as
//! [`Problem`][crate::validation::Problem]s.
//!
//! ## Structural sharing and mutation
//!
//! Definitions are wrapped in [`Node`], a reference-counted smart pointer.
//! This allows sharing nodes between documents and schemas without cloning
//! entire subtrees. To modify a node, [`make_mut`][Node::make_mut] provides
//! copy-on-write semantics.

use crate::Node;
use indexmap::IndexMap;

pub(crate) mod from_cst;
pub(crate) mod impls;
pub(crate) mod serialize;

pub use crate::name::{InvalidNameError, Name, NamedType};

/// Values supplied for the variables of an operation, keyed by variable name.
pub type VariableValues = IndexMap<Name, Value>;

#[derive(Clone, Debug, Default)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    OperationDefinition(Node<OperationDefinition>),
    FragmentDefinition(Node<FragmentDefinition>),
    DirectiveDefinition(Node<DirectiveDefinition>),
    SchemaDefinition(Node<SchemaDefinition>),
    ScalarTypeDefinition(Node<ScalarTypeDefinition>),
    ObjectTypeDefinition(Node<ObjectTypeDefinition>),
    InterfaceTypeDefinition(Node<InterfaceTypeDefinition>),
    UnionTypeDefinition(Node<UnionTypeDefinition>),
    EnumTypeDefinition(Node<EnumTypeDefinition>),
    InputObjectTypeDefinition(Node<InputObjectTypeDefinition>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct OperationDefinition {
    pub operation_type: OperationType,
    pub name: Option<Name>,
    pub variables: Vec<Node<VariableDefinition>>,
    pub directives: DirectiveList,
    pub selection_set: Vec<Selection>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub name: Name,
    pub type_condition: NamedType,
    pub directives: DirectiveList,
    pub selection_set: Vec<Selection>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub arguments: Vec<Node<InputValueDefinition>>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct SchemaDefinition {
    pub description: Option<String>,
    pub directives: DirectiveList,
    pub root_operations: Vec<(OperationType, NamedType)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: DirectiveList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub implements_interfaces: Vec<NamedType>,
    pub directives: DirectiveList,
    pub fields: Vec<Node<FieldDefinition>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub implements_interfaces: Vec<NamedType>,
    pub directives: DirectiveList,
    pub fields: Vec<Node<FieldDefinition>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: DirectiveList,
    pub members: Vec<NamedType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: DirectiveList,
    pub values: Vec<Node<EnumValueDefinition>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: DirectiveList,
    pub fields: Vec<Node<InputValueDefinition>>,
}

/// An argument to a field or an applied directive: `name: value`
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: Name,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct DirectiveList(pub Vec<Node<Directive>>);

/// A directive applied at some site, as opposed to a [`DirectiveDefinition`]
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub name: Name,
    pub arguments: Vec<Argument>,
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

#[derive(Copy, Clone, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub name: Name,
    pub ty: Type,
    pub default_value: Option<Value>,
    pub directives: DirectiveList,
}

/// The type of a field, argument, input field or variable.
///
/// Types are nullable by default in GraphQL syntax: the SDL spelling `Int`
/// parses to `Nullable(Named("Int"))` while `Int!` parses to `Named("Int")`.
/// `Nullable` never directly wraps another `Nullable`, so
/// [`nullable`][Self::nullable] is idempotent.
///
/// A `Named` node is a by-name reference, resolved lazily against a
/// [`Schema`][crate::Schema] through
/// [`definition`][crate::schema::Schema::definition]. This is what closes
/// mutually recursive type cycles during construction.
#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Type {
    Named(NamedType),
    List(Box<Type>),
    Nullable(Box<Type>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub arguments: Vec<Node<InputValueDefinition>>,
    pub ty: Type,
    pub directives: DirectiveList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub ty: Type,
    pub default_value: Option<Value>,
    pub directives: DirectiveList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    pub description: Option<String>,
    pub value: Name,
    pub directives: DirectiveList,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Node<Field>),
    FragmentSpread(Node<FragmentSpread>),
    InlineFragment(Node<InlineFragment>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub alias: Option<Name>,
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub directives: DirectiveList,
    pub selection_set: Vec<Selection>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub fragment_name: Name,
    pub directives: DirectiveList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<NamedType>,
    pub directives: DirectiveList,
    pub selection_set: Vec<Selection>,
}

/// A GraphQL input value.
///
/// `Null` is an explicitly provided null; `Absent` means no value was
/// supplied at all. The two have distinct coercion behavior, so both are
/// kept. Insertion order of `Object` fields is preserved for rendering.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    Int(i32),
    Float(f64),
    String(String),
    Boolean(bool),
    Id(String),
    Enum(Name),
    List(Vec<Value>),
    Object(Vec<(Name, Value)>),
    Variable(Name),
    Null,
    Absent,
}
