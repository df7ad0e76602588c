//! Diagnostics and the validation passes that produce them.
//!
//! Validation never short-circuits: problems accumulate in traversal order
//! (document order for schema-level checks, query-tree pre-order for
//! query-level checks) and fallible operations return
//! `Result<T, DiagnosticList>`.

use crate::ast::DirectiveLocation;
use crate::ast::OperationType;
use crate::ast::Type;
use crate::Name;
use std::fmt;

pub(crate) mod directive;
pub(crate) mod interface;
pub(crate) mod value;
pub(crate) mod variable;

pub use self::directive::elaborate_directives;
pub use self::directive::validate_directives;
pub use self::directive::validate_directives_for_query;
pub use self::directive::validate_directives_for_schema;
pub use self::value::coerce_value;
pub use self::variable::coerce_json_value;
pub use self::variable::JsonMap;
pub use self::variable::JsonValue;

/// A single human-readable diagnostic produced by validation or coercion
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum Problem {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Reference to undefined type '{0}'")]
    UndefinedType(Name),

    #[error("Undefined directive '{0}'")]
    UndefinedDirective(Name),

    #[error("Undefined variable '{0}'")]
    UndefinedVariable(Name),

    #[error("Duplicate definition of type '{0}'")]
    DuplicateTypeDefinition(Name),

    #[error("Duplicate definition of directive '{0}'")]
    DuplicateDirectiveDefinition(Name),

    #[error("Duplicate '{0}' root operation definition")]
    DuplicateRootOperation(OperationType),

    #[error("At most one schema definition permitted")]
    MultipleSchemaDefinitions,

    #[error("Duplicate definition of field '{field}' in type '{type_name}'")]
    DuplicateField { type_name: Name, field: Name },

    #[error("Duplicate definition of enum value '{value}' in enum '{enum_name}'")]
    DuplicateEnumValue { enum_name: Name, value: Name },

    #[error("Duplicate member '{member}' in union '{union_name}'")]
    DuplicateUnionMember { union_name: Name, member: Name },

    #[error("Type '{implementer_name}' declares interface '{interface_name}' more than once")]
    DuplicateImplementsInterface {
        implementer_name: Name,
        interface_name: Name,
    },

    #[error("Type '{0}' must define at least one field")]
    EmptyFields(Name),

    #[error("Enum '{0}' must define at least one value")]
    EmptyEnum(Name),

    #[error("Union '{0}' must define at least one member")]
    EmptyUnion(Name),

    #[error("Input object '{0}' must define at least one input field")]
    EmptyInputObject(Name),

    #[error("Type '{implementer_name}' implements non-interface type '{interface_name}'")]
    NonInterfaceImplemented {
        implementer_name: Name,
        interface_name: Name,
    },

    #[error("Field '{field}' of interface '{interface_name}' is missing from type '{type_name}'")]
    MissingInterfaceField {
        type_name: Name,
        interface_name: Name,
        field: Name,
    },

    #[error(
        "Field '{field}' of type '{type_name}' is not a subtype of its type \
         in interface '{interface_name}'"
    )]
    IncompatibleFieldType {
        type_name: Name,
        interface_name: Name,
        field: Name,
    },

    #[error(
        "Field '{field}' of type '{type_name}' must take the same arguments \
         as in interface '{interface_name}'"
    )]
    IncompatibleFieldArguments {
        type_name: Name,
        interface_name: Name,
        field: Name,
    },

    #[error("Directive '{name}' is not allowed on {location}")]
    DirectiveNotAllowed {
        name: Name,
        location: DirectiveLocation,
    },

    #[error("Directive '{0}' may not occur more than once")]
    RepeatedDirective(Name),

    #[error("Unknown argument '{argument}' in directive '{directive}'")]
    UnknownDirectiveArgument { directive: Name, argument: Name },

    #[error("Expected {ty} found '{found}' for '{name}' in {location}")]
    InvalidValue {
        ty: Type,
        found: String,
        name: Name,
        location: String,
    },

    #[error("Value of type {ty} required for '{name}' in {location}")]
    RequiredValue {
        ty: Type,
        name: Name,
        location: String,
    },

    #[error("Unknown field '{field}' for input object type '{type_name}' in {location}")]
    UnknownInputField {
        type_name: Name,
        field: Name,
        location: String,
    },
}

/// An ordered collection of [`Problem`]s
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DiagnosticList {
    problems: Vec<Problem>,
}

impl DiagnosticList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn push(&mut self, problem: Problem) {
        self.problems.push(problem);
    }

    pub fn extend(&mut self, problems: impl IntoIterator<Item = Problem>) {
        self.problems.extend(problems);
    }

    /// Appends another list's problems, preserving both orders
    pub fn merge(&mut self, other: DiagnosticList) {
        self.problems.extend(other.problems);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Problem> {
        self.problems.iter()
    }

    /// Returns whether some problem renders to the given message.
    /// Convenient in tests and error triage.
    pub fn contains_message(&self, message: &str) -> bool {
        self.iter().any(|problem| problem.to_string() == message)
    }
}

impl fmt::Display for DiagnosticList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, problem) in self.problems.iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            write!(f, "{problem}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DiagnosticList {}

impl From<Problem> for DiagnosticList {
    fn from(problem: Problem) -> Self {
        Self {
            problems: vec![problem],
        }
    }
}

impl IntoIterator for DiagnosticList {
    type Item = Problem;
    type IntoIter = std::vec::IntoIter<Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.problems.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticList {
    type Item = &'a Problem;
    type IntoIter = std::slice::Iter<'a, Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
