//! High-level representation of a GraphQL schema

use crate::ast;
use crate::validation::DiagnosticList;
use crate::Node;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::sync::LazyLock;

mod from_ast;
mod serialize;
mod validation;

pub use self::from_ast::SchemaBuilder;
pub use crate::ast::{
    Directive, DirectiveDefinition, DirectiveList, DirectiveLocation, EnumValueDefinition,
    FieldDefinition, InputValueDefinition, Name, NamedType, Type, Value,
};

/// High-level representation of a GraphQL schema
///
/// Built once — by [`parse`][Self::parse] or through a [`SchemaBuilder`] —
/// then read-only: a sealed schema may be traversed concurrently without
/// locking.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    /// The `schema` definition, explicit or defaulted, naming root operations
    pub schema_definition: Node<SchemaDefinition>,

    /// Explicit directive definitions, with the built-in
    /// `@skip`, `@include` and `@deprecated` appended
    pub directive_definitions: IndexMap<Name, Node<DirectiveDefinition>>,

    /// Named type definitions, in document order.
    ///
    /// The five built-in scalars are not stored here unless declared;
    /// [`definition`][Self::definition] resolves them implicitly.
    pub types: IndexMap<NamedType, TypeDefinition>,
}

/// The `schema` definition, naming the root operation types
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaDefinition {
    pub description: Option<String>,
    pub directives: DirectiveList,

    /// Name of the object type for the `query` root operation
    pub query: Option<NamedType>,

    /// Name of the object type for the `mutation` root operation
    pub mutation: Option<NamedType>,

    /// Name of the object type for the `subscription` root operation
    pub subscription: Option<NamedType>,
}

/// The definition of a named type
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    Scalar(Node<ScalarType>),
    Object(Node<ObjectType>),
    Interface(Node<InterfaceType>),
    Union(Node<UnionType>),
    Enum(Node<EnumType>),
    InputObject(Node<InputObjectType>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarType {
    pub name: Name,
    pub description: Option<String>,
    pub directives: DirectiveList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub name: Name,
    pub description: Option<String>,
    pub implements_interfaces: IndexSet<Name>,
    pub directives: DirectiveList,
    pub fields: IndexMap<Name, Node<FieldDefinition>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub name: Name,
    pub description: Option<String>,
    pub implements_interfaces: IndexSet<Name>,
    pub directives: DirectiveList,
    pub fields: IndexMap<Name, Node<FieldDefinition>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub name: Name,
    pub description: Option<String>,
    pub directives: DirectiveList,
    pub members: IndexSet<NamedType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: Name,
    pub description: Option<String>,
    pub directives: DirectiveList,
    pub values: IndexMap<Name, Node<EnumValueDefinition>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectType {
    pub name: Name,
    pub description: Option<String>,
    pub directives: DirectiveList,
    pub fields: IndexMap<Name, Node<InputValueDefinition>>,
}

/// The five built-in scalars resolve implicitly even when not declared
pub(crate) static BUILT_IN_SCALARS: LazyLock<IndexMap<Name, TypeDefinition>> =
    LazyLock::new(|| {
        ["Int", "Float", "String", "Boolean", "ID"]
            .into_iter()
            .map(|name| {
                let name = Name::new_unchecked(name);
                let def = TypeDefinition::Scalar(Node::new(ScalarType {
                    name: name.clone(),
                    description: None,
                    directives: DirectiveList::new(),
                }));
                (name, def)
            })
            .collect()
    });

/// `@skip`, `@include` and `@deprecated` — always present in a schema
pub(crate) static BUILT_IN_DIRECTIVES: LazyLock<[Node<DirectiveDefinition>; 3]> =
    LazyLock::new(|| {
        let conditional_argument = || {
            Node::new(InputValueDefinition {
                description: None,
                name: crate::name!("if"),
                ty: Type::named(crate::name!("Boolean")),
                default_value: None,
                directives: DirectiveList::new(),
            })
        };
        let executable_locations = vec![
            DirectiveLocation::Field,
            DirectiveLocation::FragmentSpread,
            DirectiveLocation::InlineFragment,
        ];
        [
            Node::new(DirectiveDefinition {
                description: None,
                name: crate::name!("skip"),
                arguments: vec![conditional_argument()],
                repeatable: false,
                locations: executable_locations.clone(),
            }),
            Node::new(DirectiveDefinition {
                description: None,
                name: crate::name!("include"),
                arguments: vec![conditional_argument()],
                repeatable: false,
                locations: executable_locations,
            }),
            Node::new(DirectiveDefinition {
                description: None,
                name: crate::name!("deprecated"),
                arguments: vec![Node::new(InputValueDefinition {
                    description: None,
                    name: crate::name!("reason"),
                    ty: Type::named(crate::name!("String")).nullable(),
                    default_value: Some(Value::String("No longer supported".to_owned())),
                    directives: DirectiveList::new(),
                })],
                repeatable: false,
                locations: vec![
                    DirectiveLocation::FieldDefinition,
                    DirectiveLocation::EnumValue,
                ],
            }),
        ]
    });

/// Returns whether the given name is one of the five built-in scalars
pub(crate) fn is_built_in_scalar_name(name: &str) -> bool {
    BUILT_IN_SCALARS.contains_key(name)
}

/// Returns whether the given definition is one of the three built-in
/// directive definitions (by pointer identity, so an explicit redefinition
/// of e.g. `@skip` is not considered built-in)
pub(crate) fn is_built_in_directive(def: &Node<DirectiveDefinition>) -> bool {
    BUILT_IN_DIRECTIVES.iter().any(|built_in| def.ptr_eq(built_in))
}

impl Schema {
    /// Returns an almost-empty schema: no types, built-in directives only.
    /// It can then be filled programmatically.
    #[allow(clippy::new_without_default)] // not a great implicit default in generic contexts
    pub fn new() -> Self {
        SchemaBuilder::new().build().0
    }

    /// Parse a single SDL document into a validated schema.
    ///
    /// Problems from building and from validation accumulate; the result is
    /// `Err` with all of them, in traversal order, if there are any.
    pub fn parse(source_text: &str) -> Result<Self, DiagnosticList> {
        let document = ast::Document::parse(source_text)?;
        let mut builder = SchemaBuilder::new();
        builder.add_document(&document);
        let (schema, mut problems) = builder.build();
        if let Err(validation_problems) = schema.validate() {
            problems.merge(validation_problems);
        }
        if problems.is_empty() {
            Ok(schema)
        } else {
            Err(problems)
        }
    }

    /// Returns a new builder for creating a Schema from AST documents
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Returns `Err` with accumulated errors if invalid,
    /// or `Ok` with potential warnings or advice
    pub fn validate(&self) -> Result<DiagnosticList, DiagnosticList> {
        let problems = validation::validate_schema(self);
        if problems.is_empty() {
            Ok(DiagnosticList::new())
        } else {
            Err(problems)
        }
    }

    /// Returns the definition of the type with the given name.
    ///
    /// Falls back to the five built-in scalars even when not declared.
    /// This is the resolution step behind every by-name type reference
    /// ([`Type::Named`]).
    pub fn definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name).or_else(|| BUILT_IN_SCALARS.get(name))
    }

    /// Returns a cheap by-name handle on a type.
    ///
    /// Never fails: an undefined name is only reported when the reference
    /// is resolved, or by schema validation.
    pub fn type_ref(&self, name: Name) -> Type {
        Type::Named(name)
    }

    /// Returns the type with the given name, if it is a scalar type
    pub fn get_scalar(&self, name: &str) -> Option<&Node<ScalarType>> {
        if let Some(TypeDefinition::Scalar(ty)) = self.definition(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is an object type
    pub fn get_object(&self, name: &str) -> Option<&Node<ObjectType>> {
        if let Some(TypeDefinition::Object(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is an interface type
    pub fn get_interface(&self, name: &str) -> Option<&Node<InterfaceType>> {
        if let Some(TypeDefinition::Interface(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is a union type
    pub fn get_union(&self, name: &str) -> Option<&Node<UnionType>> {
        if let Some(TypeDefinition::Union(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is an enum type
    pub fn get_enum(&self, name: &str) -> Option<&Node<EnumType>> {
        if let Some(TypeDefinition::Enum(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is an input object type
    pub fn get_input_object(&self, name: &str) -> Option<&Node<InputObjectType>> {
        if let Some(TypeDefinition::InputObject(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the name of the object type for the root operation
    /// with the given operation kind
    pub fn root_operation(&self, operation_type: ast::OperationType) -> Option<&NamedType> {
        match operation_type {
            ast::OperationType::Query => &self.schema_definition.query,
            ast::OperationType::Mutation => &self.schema_definition.mutation,
            ast::OperationType::Subscription => &self.schema_definition.subscription,
        }
        .as_ref()
    }

    /// The name of the `query` root operation type. Every usable schema has one.
    pub fn query_type(&self) -> Option<&NamedType> {
        self.schema_definition.query.as_ref()
    }

    pub fn mutation_type(&self) -> Option<&NamedType> {
        self.schema_definition.mutation.as_ref()
    }

    pub fn subscription_type(&self) -> Option<&NamedType> {
        self.schema_definition.subscription.as_ref()
    }

    /// Returns whether the named type is one of the three root operation types
    pub fn is_root_type(&self, name: &str) -> bool {
        let is = |root: &Option<NamedType>| root.as_ref().is_some_and(|n| n == name);
        is(&self.schema_definition.query)
            || is(&self.schema_definition.mutation)
            || is(&self.schema_definition.subscription)
    }

    /// The subtype relation over types, `a <: b`:
    ///
    /// * every type is a subtype of itself
    /// * a member of a union is a subtype of the union
    /// * an implementer of an interface is a subtype of the interface
    ///   (transitively)
    /// * a non-null type is a subtype of its nullable form
    /// * lists and nullables are covariant in their element type
    pub fn is_subtype(&self, a: &Type, b: &Type) -> bool {
        if a == b {
            return true;
        }
        match (a, b) {
            (Type::Nullable(x), Type::Nullable(y)) => self.is_subtype(x, y),
            (x, Type::Nullable(y)) => self.is_subtype(x, y),
            (Type::List(x), Type::List(y)) => self.is_subtype(x, y),
            (Type::Named(x), Type::Named(y)) => self.is_named_subtype(x, y),
            _ => false,
        }
    }

    fn is_named_subtype(&self, a: &Name, b: &Name) -> bool {
        if a == b {
            return true;
        }
        if let Some(TypeDefinition::Union(union_)) = self.definition(b) {
            if union_
                .members
                .iter()
                .any(|member| self.is_named_subtype(a, member))
            {
                return true;
            }
        }
        let interfaces = match self.definition(a) {
            Some(TypeDefinition::Object(def)) => &def.implements_interfaces,
            Some(TypeDefinition::Interface(def)) => &def.implements_interfaces,
            _ => return false,
        };
        interfaces
            .iter()
            .any(|interface| self.is_named_subtype(interface, b))
    }

    /// Returns whether every object subtype of `ty` is covered by some branch.
    ///
    /// Used for interface/union fragment coverage.
    pub fn exhaustive(&self, ty: &Type, branches: &[Type]) -> bool {
        let target = ty.inner_named_type();
        self.types
            .iter()
            .filter(|&(name, def)| def.is_object() && self.is_named_subtype(name, target))
            .all(|(name, _)| {
                branches
                    .iter()
                    .any(|branch| self.is_named_subtype(name, branch.inner_named_type()))
            })
    }

    /// Returns whether `ty` is an object type that declares the field `field`
    /// while at least one of its implemented interfaces lacks it.
    ///
    /// Such a field can only be selected on the concrete type, which informs
    /// concrete-type dispatch in query planning.
    pub fn is_variant_field(&self, ty: &Type, field: &str) -> bool {
        let Some(TypeDefinition::Object(object)) = ty.underlying_definition(self) else {
            return false;
        };
        object.fields.contains_key(field)
            && object.implements_interfaces.iter().any(|interface| {
                matches!(
                    self.definition(interface),
                    Some(TypeDefinition::Interface(def)) if !def.fields.contains_key(field)
                )
            })
    }

    /// Returns whether the type `ty` is defined as an input type
    pub fn is_input_type(&self, ty: &Type) -> bool {
        self.definition(ty.inner_named_type())
            .is_some_and(TypeDefinition::is_input_type)
    }

    /// Returns whether the type `ty` is defined as an output type
    pub fn is_output_type(&self, ty: &Type) -> bool {
        self.definition(ty.inner_named_type())
            .is_some_and(TypeDefinition::is_output_type)
    }
}

impl TypeDefinition {
    pub fn name(&self) -> &Name {
        match self {
            Self::Scalar(ty) => &ty.name,
            Self::Object(ty) => &ty.name,
            Self::Interface(ty) => &ty.name,
            Self::Union(ty) => &ty.name,
            Self::Enum(ty) => &ty.name,
            Self::InputObject(ty) => &ty.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(ty) => ty.description.as_deref(),
            Self::Object(ty) => ty.description.as_deref(),
            Self::Interface(ty) => ty.description.as_deref(),
            Self::Union(ty) => ty.description.as_deref(),
            Self::Enum(ty) => ty.description.as_deref(),
            Self::InputObject(ty) => ty.description.as_deref(),
        }
    }

    pub fn directives(&self) -> &DirectiveList {
        match self {
            Self::Scalar(ty) => &ty.directives,
            Self::Object(ty) => &ty.directives,
            Self::Interface(ty) => &ty.directives,
            Self::Union(ty) => &ty.directives,
            Self::Enum(ty) => &ty.directives,
            Self::InputObject(ty) => &ty.directives,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, Self::Interface(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    pub fn is_input_object(&self) -> bool {
        matches!(self, Self::InputObject(_))
    }

    /// A leaf type is a scalar or enum: its values cannot be selected into
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_))
    }

    /// Returns true if a value of this type can be used as an input value
    pub fn is_input_type(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_) | Self::InputObject(_))
    }

    /// Returns true if a value of this type can be used as an output value
    pub fn is_output_type(&self) -> bool {
        matches!(
            self,
            Self::Scalar(_) | Self::Enum(_) | Self::Object(_) | Self::Interface(_) | Self::Union(_)
        )
    }

    /// Returns whether this is one of the five built-in scalar definitions
    pub fn is_built_in(&self) -> bool {
        match self {
            Self::Scalar(def) => BUILT_IN_SCALARS
                .get(def.name.as_str())
                .is_some_and(|built_in| match built_in {
                    Self::Scalar(built_in) => def.ptr_eq(built_in),
                    _ => false,
                }),
            _ => false,
        }
    }

    /// Returns the fields of this type, if it is an object or interface
    pub fn fields(&self) -> Option<&IndexMap<Name, Node<FieldDefinition>>> {
        match self {
            Self::Object(ty) => Some(&ty.fields),
            Self::Interface(ty) => Some(&ty.fields),
            _ => None,
        }
    }
}

impl EnumType {
    /// Returns whether this enum declares the given value name
    pub fn has_value(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// Navigation over types. Named references resolve against the schema, and
/// nullability wrappers are peeled implicitly.
impl Type {
    /// Resolves this type against the schema, looking through nullability.
    /// Returns `None` for lists and undefined names.
    pub fn definition<'schema>(&self, schema: &'schema Schema) -> Option<&'schema TypeDefinition> {
        match self {
            Type::Nullable(inner) => inner.definition(schema),
            Type::Named(name) => schema.definition(name),
            Type::List(_) => None,
        }
    }

    /// Resolves this type against the schema, looking through both
    /// nullability and list wrappers
    pub fn underlying_definition<'schema>(
        &self,
        schema: &'schema Schema,
    ) -> Option<&'schema TypeDefinition> {
        match self {
            Type::Nullable(inner) | Type::List(inner) => inner.underlying_definition(schema),
            Type::Named(name) => schema.definition(name),
        }
    }

    /// The type of the named field, for object and interface types.
    /// Lists and leaf types have no fields.
    pub fn field(&self, schema: &Schema, name: &str) -> Option<Type> {
        self.definition(schema)?
            .fields()?
            .get(name)
            .map(|field| field.ty.clone())
    }

    /// Walks a sequence of field names, peeling lists and nullability
    /// between steps. The empty path yields this type itself.
    pub fn path(&self, schema: &Schema, path: &[&str]) -> Option<Type> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self.clone());
        };
        match self {
            Type::Nullable(inner) | Type::List(inner) => inner.path(schema, path),
            Type::Named(_) => self.field(schema, first)?.path(schema, rest),
        }
    }

    /// Returns whether some step along the path is, or ends at, a list type.
    /// The empty path inspects this type itself.
    pub fn path_is_list(&self, schema: &Schema, path: &[&str]) -> bool {
        let Some((first, rest)) = path.split_first() else {
            return self.is_list();
        };
        match self {
            Type::Nullable(inner) => inner.path_is_list(schema, path),
            Type::List(_) => true,
            Type::Named(_) => self
                .field(schema, first)
                .is_some_and(|field| field.path_is_list(schema, rest)),
        }
    }

    /// Returns whether some step along the path is nullable.
    /// The empty path returns false.
    pub fn path_is_nullable(&self, schema: &Schema, path: &[&str]) -> bool {
        let Some((first, rest)) = path.split_first() else {
            return false;
        };
        match self {
            Type::Nullable(_) => true,
            Type::List(inner) => inner.path_is_nullable(schema, path),
            Type::Named(_) => self
                .field(schema, first)
                .is_some_and(|field| field.path_is_nullable(schema, rest)),
        }
    }

    /// Strips list and nullability wrappers; yields the definition if it is
    /// an object, interface or union
    pub fn underlying_object<'schema>(
        &self,
        schema: &'schema Schema,
    ) -> Option<&'schema TypeDefinition> {
        self.underlying_definition(schema).filter(|def| {
            matches!(
                def,
                TypeDefinition::Object(_) | TypeDefinition::Interface(_) | TypeDefinition::Union(_)
            )
        })
    }

    /// Strips list and nullability wrappers, then looks up the named field
    pub fn underlying_field(&self, schema: &Schema, name: &str) -> Option<Type> {
        self.underlying_definition(schema)?
            .fields()?
            .get(name)
            .map(|field| field.ty.clone())
    }

    /// Returns whether this (possibly nullable) type is a scalar or enum
    pub fn is_leaf(&self, schema: &Schema) -> bool {
        self.as_leaf(schema).is_some()
    }

    /// Yields the definition if this (possibly nullable) type is a scalar or enum
    pub fn as_leaf<'schema>(&self, schema: &'schema Schema) -> Option<&'schema TypeDefinition> {
        self.definition(schema).filter(|def| def.is_leaf())
    }

    /// Like [`is_leaf`][Self::is_leaf], also stripping list wrappers
    pub fn is_underlying_leaf(&self, schema: &Schema) -> bool {
        self.underlying_leaf(schema).is_some()
    }

    /// Like [`as_leaf`][Self::as_leaf], also stripping list wrappers
    pub fn underlying_leaf<'schema>(
        &self,
        schema: &'schema Schema,
    ) -> Option<&'schema TypeDefinition> {
        self.underlying_definition(schema).filter(|def| def.is_leaf())
    }
}

impl From<Node<ScalarType>> for TypeDefinition {
    fn from(ty: Node<ScalarType>) -> Self {
        Self::Scalar(ty)
    }
}

impl From<Node<ObjectType>> for TypeDefinition {
    fn from(ty: Node<ObjectType>) -> Self {
        Self::Object(ty)
    }
}

impl From<Node<InterfaceType>> for TypeDefinition {
    fn from(ty: Node<InterfaceType>) -> Self {
        Self::Interface(ty)
    }
}

impl From<Node<UnionType>> for TypeDefinition {
    fn from(ty: Node<UnionType>) -> Self {
        Self::Union(ty)
    }
}

impl From<Node<EnumType>> for TypeDefinition {
    fn from(ty: Node<EnumType>) -> Self {
        Self::Enum(ty)
    }
}

impl From<Node<InputObjectType>> for TypeDefinition {
    fn from(ty: Node<InputObjectType>) -> Self {
        Self::InputObject(ty)
    }
}
