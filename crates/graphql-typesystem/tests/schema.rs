use expect_test::expect;
use graphql_typesystem::name;
use graphql_typesystem::Schema;

#[test]
fn default_schema_root() {
    let schema = Schema::parse("type Query { x: Int }").unwrap();
    assert_eq!(schema.query_type().unwrap(), "Query");
    assert!(schema.mutation_type().is_none());
    assert!(schema.subscription_type().is_none());
    assert_eq!(schema.to_string(), "type Query {\n  x: Int\n}\n");
}

#[test]
fn default_root_uses_conventional_type_names() {
    let schema = Schema::parse(
        "type Query { x: Int } type Mutation { set(x: Int): Int } type Other { y: Int }",
    )
    .unwrap();
    assert_eq!(schema.query_type().unwrap(), "Query");
    assert_eq!(schema.mutation_type().unwrap(), "Mutation");
    assert!(schema.subscription_type().is_none());
    assert!(schema.is_root_type("Mutation"));
    assert!(!schema.is_root_type("Other"));
}

#[test]
fn explicit_schema_definition_defaults_query() {
    let schema = Schema::parse(
        "schema { mutation: Mut } type Query { x: Int } type Mut { set(x: Int): Int }",
    )
    .unwrap();
    assert_eq!(schema.query_type().unwrap(), "Query");
    assert_eq!(schema.mutation_type().unwrap(), "Mut");
}

#[test]
fn at_most_one_schema_definition() {
    let errors = Schema::parse(
        "schema { query: Query } schema { query: Query } type Query { x: Int }",
    )
    .unwrap_err();
    assert!(errors.contains_message("At most one schema definition permitted"));
}

#[test]
fn built_ins_always_present() {
    let schema = Schema::new();
    assert!(schema.types.is_empty());
    for name in ["skip", "include", "deprecated"] {
        assert!(schema.directive_definitions.contains_key(name), "{name}");
    }
    for name in ["Int", "Float", "String", "Boolean", "ID"] {
        assert!(schema.definition(name).is_some(), "{name}");
        assert!(schema.definition(name).unwrap().is_scalar(), "{name}");
    }
    assert!(schema.definition("Undeclared").is_none());
}

#[test]
fn undefined_references_are_reported() {
    let errors = Schema::parse("type Query { x: Missing, y: [AlsoMissing!] }").unwrap_err();
    assert!(errors.contains_message("Reference to undefined type 'Missing'"));
    assert!(errors.contains_message("Reference to undefined type 'AlsoMissing'"));
}

#[test]
fn duplicate_and_empty_definitions() {
    let errors = Schema::parse("type Query { x: Int } type Query { y: Int }").unwrap_err();
    assert!(errors.contains_message("Duplicate definition of type 'Query'"));

    let errors = Schema::parse("type Query").unwrap_err();
    assert!(errors.contains_message("Type 'Query' must define at least one field"));

    let errors = Schema::parse("type Query { x: Int } enum Empty").unwrap_err();
    assert!(errors.contains_message("Enum 'Empty' must define at least one value"));

    let errors =
        Schema::parse("type Query { x: Int, e: E } enum E { A A B }").unwrap_err();
    assert!(errors.contains_message("Duplicate definition of enum value 'A' in enum 'E'"));
}

#[test]
fn implementation_conformance() {
    // missing field
    let errors = Schema::parse(
        "interface Node { id: ID! } type User implements Node { name: String }",
    )
    .unwrap_err();
    assert!(errors.contains_message("Field 'id' of interface 'Node' is missing from type 'User'"));

    // field type must be a subtype of the interface's
    let errors = Schema::parse(
        "interface Node { id: ID! } type User implements Node { id: String! }",
    )
    .unwrap_err();
    assert!(errors.contains_message(
        "Field 'id' of type 'User' is not a subtype of its type in interface 'Node'"
    ));

    // covariant return types are fine: id: ID! <: id: ID
    Schema::parse("interface Node { id: ID } type User implements Node { id: ID! }").unwrap();

    // argument lists must match exactly
    let errors = Schema::parse(
        "interface Node { child(depth: Int): Node } \
         type User implements Node { child(depth: Int!): Node }",
    )
    .unwrap_err();
    assert!(errors.contains_message(
        "Field 'child' of type 'User' must take the same arguments as in interface 'Node'"
    ));

    // only interfaces may be implemented
    let errors = Schema::parse(
        "type Other { x: Int } type User implements Other { x: Int }",
    )
    .unwrap_err();
    assert!(errors.contains_message("Type 'User' implements non-interface type 'Other'"));
}

#[test]
fn declared_built_in_scalar_short_circuits() {
    let schema = Schema::parse("scalar Int type Query { x: Int }").unwrap();
    assert!(schema.types.contains_key("Int"));
    assert!(schema.definition("Int").unwrap().is_built_in());
    // built-in definitions are not re-printed
    assert_eq!(schema.to_string(), "type Query {\n  x: Int\n}\n");
}

#[test]
fn type_ref_defers_resolution() {
    let schema = Schema::parse("type Query { x: Int }").unwrap();
    let dangling = schema.type_ref(name!(Nope));
    assert!(dangling.definition(&schema).is_none());
    let query = schema.type_ref(name!(Query));
    assert_eq!(query.definition(&schema).unwrap().name(), "Query");
}

#[test]
fn parse_and_reserialize() {
    let input = r#"
        schema {
          query: QueryRoot
        }

        directive @specified on SCALAR

        "A point in time"
        scalar Instant @specified

        interface Node {
          id: ID!
        }

        type Box implements Node {
          id: ID!
          label: String
        }

        type Sphere implements Node {
          id: ID!
          radius: Float
        }

        union Thing = Box | Sphere

        enum Color {
          RED
          GREEN @deprecated(reason: "use RED")
          BLUE
        }

        input Filter {
          color: Color = RED
          limit: Int
        }

        type QueryRoot {
          node(id: ID!): Node
          things(filter: Filter): [Thing!]
        }
    "#;
    let schema = Schema::parse(input).unwrap();
    let expected = expect![[r#"
        schema {
          query: QueryRoot
        }

        directive @specified on SCALAR

        "A point in time"
        scalar Instant @specified

        interface Node {
          id: ID!
        }

        type Box implements Node {
          id: ID!
          label: String
        }

        type Sphere implements Node {
          id: ID!
          radius: Float
        }

        union Thing = Box | Sphere

        enum Color {
          RED
          GREEN @deprecated(reason: "use RED")
          BLUE
        }

        input Filter {
          color: Color = RED
          limit: Int
        }

        type QueryRoot {
          node(id: ID!): Node
          things(filter: Filter): [Thing!]
        }
    "#]];
    expected.assert_eq(&schema.to_string());

    // a rendered schema parses back to an identical rendering
    let reparsed = Schema::parse(&schema.to_string()).unwrap();
    assert_eq!(reparsed.to_string(), schema.to_string());
}

#[test]
fn parse_errors_surface_as_problems() {
    let errors = Schema::parse("type 123 {").unwrap_err();
    assert!(!errors.is_empty());
    assert!(errors.to_string().contains("Parse error"));
}
