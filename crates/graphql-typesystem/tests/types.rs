use graphql_typesystem::ast::Type;
use graphql_typesystem::name;
use graphql_typesystem::Schema;

fn sample_schema() -> Schema {
    Schema::parse(
        r#"
        interface Node { id: ID! }
        interface Counted implements Node { id: ID!, count: Int }
        type User implements Counted & Node {
          id: ID!
          count: Int
          name: String
          friends: [User!]
          profile: Profile
        }
        type Robot implements Node { id: ID! }
        union Actor = User | Robot
        type Profile { email: String, tags: [String] }
        type Query { node: Node, user: User, actors: [Actor!]! }
        "#,
    )
    .unwrap()
}

#[test]
fn subtyping_through_interfaces() {
    let schema = Schema::parse(
        "interface Node { id: ID! } type User implements Node { id: ID!, name: String }",
    )
    .unwrap();
    let user = Type::named(name!(User));
    let node = Type::named(name!(Node));
    assert!(schema.is_subtype(&user, &node));
    assert!(!schema.is_subtype(&node, &user));
    assert!(schema.exhaustive(&node, std::slice::from_ref(&user)));
}

#[test]
fn subtyping_laws() {
    let schema = sample_schema();
    let user = Type::named(name!(User));
    let node = Type::named(name!(Node));
    let counted = Type::named(name!(Counted));
    let actor = Type::named(name!(Actor));

    // reflexivity
    for ty in [&user, &node, &counted, &actor] {
        assert!(schema.is_subtype(ty, ty));
    }

    // transitivity via the interface chain User <: Counted <: Node
    assert!(schema.is_subtype(&user, &counted));
    assert!(schema.is_subtype(&counted, &node));
    assert!(schema.is_subtype(&user, &node));

    // union membership
    assert!(schema.is_subtype(&user, &actor));
    assert!(schema.is_subtype(&Type::named(name!(Robot)), &actor));
    assert!(!schema.is_subtype(&actor, &user));

    // non-null is a subtype of nullable, not the reverse
    assert!(schema.is_subtype(&user, &user.clone().nullable()));
    assert!(!schema.is_subtype(&user.clone().nullable(), &user));

    // lists are covariant
    let users = user.clone().list();
    let nodes = node.clone().list();
    assert!(schema.is_subtype(&users, &nodes));
    assert!(!schema.is_subtype(&nodes, &users));
    assert!(schema.is_subtype(&users, &nodes.clone().nullable()));
}

#[test]
fn nullable_is_idempotent() {
    let user = Type::named(name!(User));
    assert_eq!(user.clone().nullable().nullable(), user.clone().nullable());
    assert_eq!(user.clone().nullable().non_null(), user);
    assert!(user.clone().nullable().is_nullable());
    assert!(user.is_non_null());
}

#[test]
fn modifier_operations() {
    let int = Type::named(name!(Int));
    let list = int.clone().list().nullable(); // [Int!]
    assert!(list.is_list());
    assert_eq!(list.item(), Some(&int));
    assert_eq!(list.inner_named_type(), "Int");
    assert_eq!(list.to_string(), "[Int!]");
    assert_eq!(int.to_string(), "Int!");
    assert_eq!(int.clone().nullable().to_string(), "Int");

    // rewrap a different named type in the same modifier envelope
    let template = Type::named(name!(Int)).nullable().list().nullable(); // [Int]
    let rewrapped = Type::named(name!(User)).with_modifiers_of(&template);
    assert_eq!(rewrapped.to_string(), "[User]");

    // nominal equivalence ignores modifiers
    assert!(template.nominal_eq(&Type::named(name!(Int))));
    assert!(!template.nominal_eq(&Type::named(name!(User))));
}

#[test]
fn field_navigation() {
    let schema = sample_schema();
    let query = Type::named(name!(Query));
    let user = Type::named(name!(User));

    assert_eq!(
        user.field(&schema, "name").unwrap().to_string(),
        "String"
    );
    // fields resolve through nullability
    let nullable_user = user.clone().nullable();
    assert!(nullable_user.field(&schema, "name").is_some());
    // leaf and list types have no fields
    assert!(Type::named(name!(Int)).field(&schema, "x").is_none());
    assert!(user.clone().list().field(&schema, "name").is_none());

    // paths peel lists and nullability between steps
    let email = query.path(&schema, &["user", "profile", "email"]).unwrap();
    assert_eq!(email.to_string(), "String");
    let through_list = query.path(&schema, &["user", "friends", "name"]).unwrap();
    assert_eq!(through_list.to_string(), "String");
    assert!(query.path(&schema, &["user", "nope"]).is_none());
    assert_eq!(query.path(&schema, &[]).unwrap(), query);

    assert!(query.path_is_list(&schema, &["user", "friends", "name"]));
    assert!(!query.path_is_list(&schema, &["user", "profile", "email"]));
    // the empty path inspects the type itself
    assert!(user.clone().list().path_is_list(&schema, &[]));
    assert!(!user.path_is_list(&schema, &[]));

    assert!(query.path_is_nullable(&schema, &["user", "name"]));
    // ... but returns false for the empty path
    assert!(!user.clone().nullable().path_is_nullable(&schema, &[]));
}

#[test]
fn underlying_types() {
    let schema = sample_schema();
    let user_list = Type::named(name!(User)).list().nullable();
    assert_eq!(user_list.underlying_object(&schema).unwrap().name(), "User");
    assert_eq!(
        user_list
            .underlying_field(&schema, "name")
            .unwrap()
            .to_string(),
        "String"
    );
    assert!(Type::named(name!(Int)).nullable().underlying_object(&schema).is_none());

    let strings = Type::named(name!(String)).nullable().list().nullable();
    assert!(!strings.is_leaf(&schema));
    assert!(strings.is_underlying_leaf(&schema));
    assert_eq!(strings.underlying_leaf(&schema).unwrap().name(), "String");
    assert!(Type::named(name!(Int)).nullable().is_leaf(&schema));
    assert!(Type::named(name!(Actor)).as_leaf(&schema).is_none());
}

#[test]
fn variant_fields() {
    let schema = sample_schema();
    let user = Type::named(name!(User));
    // `name` exists on User but not on every interface it implements
    assert!(schema.is_variant_field(&user, "name"));
    // `id` is carried by all of User's interfaces
    assert!(!schema.is_variant_field(&user, "id"));
    assert!(!schema.is_variant_field(&user, "nope"));
    // interfaces themselves have no variant fields
    assert!(!schema.is_variant_field(&Type::named(name!(Node)), "id"));
}

#[test]
fn exhaustive_coverage() {
    let schema = sample_schema();
    let node = Type::named(name!(Node));
    let actor = Type::named(name!(Actor));
    let user = Type::named(name!(User));
    let robot = Type::named(name!(Robot));

    assert!(!schema.exhaustive(&node, std::slice::from_ref(&user)));
    assert!(schema.exhaustive(&node, &[user.clone(), robot.clone()]));
    assert!(schema.exhaustive(&actor, &[user.clone(), robot.clone()]));
    // an interface branch covers all of its implementers
    assert!(schema.exhaustive(&actor, std::slice::from_ref(&node)));
}
