//! The type-system core of a GraphQL server: schema model, type algebra
//! with subtyping, input-value coercion, directive validation, and SDL
//! parsing and rendering.
//!
//! ## Parsing a schema
//!
//! ```
//! use graphql_typesystem::Schema;
//!
//! let sdl = r#"
//!     interface Node { id: ID! }
//!     type User implements Node {
//!       id: ID!
//!       name: String
//!     }
//!     type Query { user(id: ID!): User }
//! "#;
//! let schema = Schema::parse(sdl).expect("valid schema");
//!
//! assert_eq!(schema.query_type().unwrap(), "Query");
//!
//! let user = schema.type_ref(graphql_typesystem::name!(User));
//! let node = schema.type_ref(graphql_typesystem::name!(Node));
//! assert!(schema.is_subtype(&user, &node));
//! ```
//!
//! A schema is built once — from SDL text or through
//! [`SchemaBuilder`][schema::SchemaBuilder] — then sealed: all further
//! operations are read-only and may run concurrently without locking.
//!
//! ## Diagnostics
//!
//! Fallible operations return `Result<T, DiagnosticList>`. Validation does
//! not short-circuit: every [`Problem`][validation::Problem] found is
//! reported, in traversal order.
//!
//! ## Values
//!
//! [`ast::Value`] distinguishes an explicitly provided null
//! ([`Null`][ast::Value::Null]) from no value supplied at all
//! ([`Absent`][ast::Value::Absent]); the input-value coercion engine
//! ([`validation::coerce_value`] for literals,
//! [`validation::coerce_json_value`] for external JSON variables) preserves
//! that distinction while applying defaults and nullability rules.

pub mod ast;
mod name;
mod node;
pub mod schema;
pub mod validation;

pub use crate::name::InvalidNameError;
pub use crate::name::Name;
pub use crate::name::NamedType;
pub use crate::node::Node;
pub use crate::schema::Schema;
