use super::*;
use crate::validation::DiagnosticList;
use crate::validation::Problem;
use std::fmt;

impl Document {
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }

    pub fn operations(&self) -> impl Iterator<Item = &Node<OperationDefinition>> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::OperationDefinition(op) => Some(op),
            _ => None,
        })
    }

    pub fn fragments(&self) -> impl Iterator<Item = &Node<FragmentDefinition>> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::FragmentDefinition(frag) => Some(frag),
            _ => None,
        })
    }
}

impl DirectiveList {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns an iterator of directives with the given name.
    ///
    /// This method is best for repeatable directives.
    /// See also [`get`][Self::get] for non-repeatable directives.
    pub fn get_all<'def: 'name, 'name>(
        &'def self,
        name: &'name str,
    ) -> impl Iterator<Item = &'def Node<Directive>> + 'name {
        self.0.iter().filter(move |dir| dir.name == name)
    }

    /// Returns the first directive with the given name, if any.
    ///
    /// This method is best for non-repeatable directives.
    /// See also [`get_all`][Self::get_all] for repeatable directives.
    pub fn get(&self, name: &str) -> Option<&Node<Directive>> {
        self.get_all(name).next()
    }

    /// Returns whether there is a directive with the given name
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl std::ops::Deref for DirectiveList {
    type Target = Vec<Node<Directive>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for DirectiveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a DirectiveList {
    type Item = &'a Node<Directive>;
    type IntoIter = std::slice::Iter<'a, Node<Directive>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<D> FromIterator<D> for DirectiveList
where
    D: Into<Node<Directive>>,
{
    fn from_iter<T: IntoIterator<Item = D>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Directive {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            arguments: Vec::new(),
        }
    }

    pub fn argument_by_name(&self, name: &str) -> Option<&Value> {
        self.arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }
}

impl OperationType {
    /// Get the name of this operation type as it would appear in the source text
    pub fn name(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }

    /// Get the default name of the object type for this operation type
    pub fn default_type_name(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }
}

impl From<OperationType> for DirectiveLocation {
    fn from(operation_type: OperationType) -> Self {
        match operation_type {
            OperationType::Query => Self::Query,
            OperationType::Mutation => Self::Mutation,
            OperationType::Subscription => Self::Subscription,
        }
    }
}

impl DirectiveLocation {
    /// Get the name of this directive location as it would appear in the source text
    pub fn name(self) -> &'static str {
        match self {
            Self::Query => "QUERY",
            Self::Mutation => "MUTATION",
            Self::Subscription => "SUBSCRIPTION",
            Self::Field => "FIELD",
            Self::FragmentDefinition => "FRAGMENT_DEFINITION",
            Self::FragmentSpread => "FRAGMENT_SPREAD",
            Self::InlineFragment => "INLINE_FRAGMENT",
            Self::VariableDefinition => "VARIABLE_DEFINITION",
            Self::Schema => "SCHEMA",
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::FieldDefinition => "FIELD_DEFINITION",
            Self::ArgumentDefinition => "ARGUMENT_DEFINITION",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::EnumValue => "ENUM_VALUE",
            Self::InputObject => "INPUT_OBJECT",
            Self::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }
}

impl fmt::Debug for DirectiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Type {
    /// Returns the non-null type `name!`
    pub fn named(name: Name) -> Self {
        Self::Named(name)
    }

    /// Returns this type made nullable. A no-op on already-nullable types.
    pub fn nullable(self) -> Self {
        if let Self::Nullable(_) = self {
            self
        } else {
            Self::Nullable(Box::new(self))
        }
    }

    /// Returns this type with any top-level nullability removed
    pub fn non_null(self) -> Self {
        match self {
            Self::Nullable(inner) => *inner,
            other => other,
        }
    }

    /// Returns the non-null list type `[self]!`
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Returns the element type if this (possibly nullable) type is a list
    pub fn item(&self) -> Option<&Type> {
        match self {
            Self::Nullable(inner) => inner.item(),
            Self::List(of) => Some(of),
            Self::Named(_) => None,
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    pub fn is_non_null(&self) -> bool {
        !self.is_nullable()
    }

    pub fn is_list(&self) -> bool {
        match self {
            Self::Nullable(inner) => inner.is_list(),
            Self::List(_) => true,
            Self::Named(_) => false,
        }
    }

    /// Returns the name of the type this modifier chain bottoms out at
    pub fn inner_named_type(&self) -> &NamedType {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::Nullable(inner) => inner.inner_named_type(),
        }
    }

    /// Returns this type's inner named type wrapped in the same
    /// list/nullability envelope that `template` carries
    pub fn with_modifiers_of(&self, template: &Type) -> Type {
        match template {
            Type::Named(_) => self.clone(),
            Type::List(inner) => Type::List(Box::new(self.with_modifiers_of(inner))),
            Type::Nullable(inner) => self.with_modifiers_of(inner).nullable(),
        }
    }

    /// Nominal equivalence: structural equality, or equality of the inner
    /// named types ignoring any difference in enclosing modifiers
    pub fn nominal_eq(&self, other: &Type) -> bool {
        self == other || self.inner_named_type() == other.inner_named_type()
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<&str> {
        match self {
            Self::Id(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&Name> {
        match self {
            Self::Enum(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Name> {
        match self {
            Self::Variable(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(Name, Value)]> {
        match self {
            Self::Object(value) => Some(value),
            _ => None,
        }
    }

    /// Constructs a `List` whose elements are all `String`
    pub fn string_list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::List(items.into_iter().map(|s| Self::String(s.into())).collect())
    }

    /// Destructures a `List` whose elements are all `String`
    pub fn as_string_list(&self) -> Option<Vec<&str>> {
        match self {
            Self::List(items) => items.iter().map(Value::as_str).collect(),
            _ => None,
        }
    }

    /// Recursively substitutes every [`Variable`][Self::Variable] reference
    /// with the value supplied under its name
    pub fn elaborate(&self, variables: &VariableValues) -> Result<Value, DiagnosticList> {
        match self {
            Self::Variable(name) => variables
                .get(name.as_str())
                .cloned()
                .ok_or_else(|| Problem::UndefinedVariable(name.clone()).into()),
            Self::List(items) => {
                let mut problems = DiagnosticList::new();
                let mut elaborated = Vec::with_capacity(items.len());
                for item in items {
                    match item.elaborate(variables) {
                        Ok(value) => elaborated.push(value),
                        Err(errors) => problems.merge(errors),
                    }
                }
                if problems.is_empty() {
                    Ok(Self::List(elaborated))
                } else {
                    Err(problems)
                }
            }
            Self::Object(fields) => {
                let mut problems = DiagnosticList::new();
                let mut elaborated = Vec::with_capacity(fields.len());
                for (name, value) in fields {
                    match value.elaborate(variables) {
                        Ok(value) => elaborated.push((name.clone(), value)),
                        Err(errors) => problems.merge(errors),
                    }
                }
                if problems.is_empty() {
                    Ok(Self::Object(elaborated))
                } else {
                    Err(problems)
                }
            }
            _ => Ok(self.clone()),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&'_ str> for Value {
    fn from(value: &'_ str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
