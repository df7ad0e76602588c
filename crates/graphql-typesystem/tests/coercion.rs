use graphql_typesystem::ast::DirectiveList;
use graphql_typesystem::ast::InputValueDefinition;
use graphql_typesystem::ast::Type;
use graphql_typesystem::ast::Value;
use graphql_typesystem::name;
use graphql_typesystem::validation::coerce_json_value;
use graphql_typesystem::validation::coerce_value;
use graphql_typesystem::Name;
use graphql_typesystem::Schema;
use serde_json::json;

fn sample_schema() -> Schema {
    Schema::parse(
        r#"
        scalar BigInt
        enum Color { RED GREEN BLUE }
        input P { n: Int = 7, m: Int! }
        input Filter { colors: [Color!], nested: P }
        type Query { x: Int }
        "#,
    )
    .unwrap()
}

fn input_value(name: Name, ty: Type) -> InputValueDefinition {
    InputValueDefinition {
        description: None,
        name,
        ty,
        default_value: None,
        directives: DirectiveList::new(),
    }
}

#[test]
fn input_object_defaulting() {
    let schema = sample_schema();
    let p = input_value(name!(p), Type::named(name!(P)).nullable());

    let supplied = Value::Object(vec![(name!(m), Value::Int(3))]);
    let coerced = coerce_value(&schema, &p, Some(&supplied), "argument 'p'").unwrap();
    assert_eq!(
        coerced,
        Value::Object(vec![(name!(n), Value::Int(7)), (name!(m), Value::Int(3))])
    );

    // a non-nullable field with no default must be supplied
    let supplied = Value::Object(vec![(name!(n), Value::Int(1))]);
    let errors = coerce_value(&schema, &p, Some(&supplied), "argument 'p'").unwrap_err();
    assert!(errors.contains_message("Value of type Int! required for 'm' in argument 'p'"));
}

#[test]
fn unknown_input_object_fields() {
    let schema = sample_schema();
    let p = input_value(name!(p), Type::named(name!(P)).nullable());
    let supplied = Value::Object(vec![(name!(q), Value::Int(1))]);
    let errors = coerce_value(&schema, &p, Some(&supplied), "argument 'p'").unwrap_err();
    assert!(errors.contains_message("Unknown field 'q' for input object type 'P' in argument 'p'"));
    // the missing non-nullable field is reported too
    assert_eq!(errors.len(), 2);
}

#[test]
fn custom_scalar_pass_through() {
    let schema = sample_schema();
    let big = input_value(name!(big), Type::named(name!(BigInt)).nullable());
    let coerced = coerce_value(&schema, &big, Some(&Value::Int(42)), "argument 'big'").unwrap();
    assert_eq!(coerced, Value::Int(42));
    let coerced = coerce_value(
        &schema,
        &big,
        Some(&Value::String("9999999999999".to_owned())),
        "argument 'big'",
    )
    .unwrap();
    assert_eq!(coerced, Value::String("9999999999999".to_owned()));
    // non-primitive shapes are rejected
    let errors = coerce_value(
        &schema,
        &big,
        Some(&Value::List(vec![])),
        "argument 'big'",
    )
    .unwrap_err();
    assert!(errors.contains_message("Expected BigInt! found '[]' for 'big' in argument 'big'"));
}

#[test]
fn defaults_apply_when_absent() {
    let schema = sample_schema();
    let mut limit = input_value(name!(limit), Type::named(name!(Int)).nullable());
    limit.default_value = Some(Value::Int(5));
    let coerced = coerce_value(&schema, &limit, None, "argument 'limit'").unwrap();
    assert_eq!(coerced, Value::Int(5));
}

#[test]
fn null_versus_absent() {
    let schema = sample_schema();
    let limit = input_value(name!(limit), Type::named(name!(Int)).nullable());
    assert_eq!(
        coerce_value(&schema, &limit, None, "argument 'limit'").unwrap(),
        Value::Absent
    );
    assert_eq!(
        coerce_value(&schema, &limit, Some(&Value::Null), "argument 'limit'").unwrap(),
        Value::Null
    );
    assert_eq!(
        coerce_value(&schema, &limit, Some(&Value::Int(1)), "argument 'limit'").unwrap(),
        Value::Int(1)
    );

    let required = input_value(name!(limit), Type::named(name!(Int)));
    let errors = coerce_value(&schema, &required, None, "argument 'limit'").unwrap_err();
    assert!(errors.contains_message("Value of type Int! required for 'limit' in argument 'limit'"));
    let errors =
        coerce_value(&schema, &required, Some(&Value::Null), "argument 'limit'").unwrap_err();
    assert!(errors.contains_message("Expected Int! found 'null' for 'limit' in argument 'limit'"));
}

#[test]
fn built_in_scalar_matching() {
    let schema = sample_schema();
    let cases = [
        ("Int", Value::Int(1), Some(Value::Int(1))),
        ("Int", Value::String("1".to_owned()), None),
        ("Float", Value::Float(0.5), Some(Value::Float(0.5))),
        ("Float", Value::Int(1), None),
        ("String", Value::String("s".to_owned()), Some(Value::String("s".to_owned()))),
        ("String", Value::Boolean(true), None),
        ("Boolean", Value::Boolean(false), Some(Value::Boolean(false))),
        ("ID", Value::Id("x".to_owned()), Some(Value::Id("x".to_owned()))),
        ("ID", Value::String("x".to_owned()), Some(Value::Id("x".to_owned()))),
        ("ID", Value::Int(42), Some(Value::Id("42".to_owned()))),
        ("ID", Value::Boolean(true), None),
    ];
    for (type_name, value, expected) in cases {
        let iv = input_value(name!(v), Type::named(Name::new(type_name).unwrap()).nullable());
        let outcome = coerce_value(&schema, &iv, Some(&value), "argument 'v'");
        match expected {
            Some(expected) => assert_eq!(outcome.unwrap(), expected, "{type_name}"),
            None => assert!(outcome.is_err(), "{type_name}"),
        }
    }
}

#[test]
fn enum_coercion() {
    let schema = sample_schema();
    let color = input_value(name!(c), Type::named(name!(Color)).nullable());
    assert_eq!(
        coerce_value(&schema, &color, Some(&Value::Enum(name!(RED))), "argument 'c'").unwrap(),
        Value::Enum(name!(RED))
    );
    // undeclared enum values and string literals are rejected
    assert!(coerce_value(&schema, &color, Some(&Value::Enum(name!(PURPLE))), "argument 'c'")
        .is_err());
    assert!(coerce_value(
        &schema,
        &color,
        Some(&Value::String("RED".to_owned())),
        "argument 'c'"
    )
    .is_err());
}

#[test]
fn list_coercion() {
    let schema = sample_schema();
    let colors = input_value(
        name!(cs),
        Type::named(name!(Color)).list().nullable(), // [Color!]
    );
    let supplied = Value::List(vec![Value::Enum(name!(RED)), Value::Enum(name!(BLUE))]);
    assert_eq!(
        coerce_value(&schema, &colors, Some(&supplied), "argument 'cs'").unwrap(),
        supplied
    );

    // every bad element is reported
    let supplied = Value::List(vec![Value::Null, Value::Enum(name!(PURPLE))]);
    let errors = coerce_value(&schema, &colors, Some(&supplied), "argument 'cs'").unwrap_err();
    assert_eq!(errors.len(), 2);

    // a non-list value against a list type is a mismatch
    assert!(coerce_value(&schema, &colors, Some(&Value::Int(1)), "argument 'cs'").is_err());
}

#[test]
fn json_variable_coercion() {
    let schema = sample_schema();

    let int = input_value(name!(v), Type::named(name!(Int)).nullable());
    assert_eq!(
        coerce_json_value(&schema, &int, Some(&json!(3)), "variable 'v'").unwrap(),
        Value::Int(3)
    );
    // out of i32 range
    assert!(coerce_json_value(&schema, &int, Some(&json!(2_147_483_648i64)), "variable 'v'")
        .is_err());

    let float = input_value(name!(v), Type::named(name!(Float)).nullable());
    assert_eq!(
        coerce_json_value(&schema, &float, Some(&json!(1.5)), "variable 'v'").unwrap(),
        Value::Float(1.5)
    );

    let id = input_value(name!(v), Type::named(name!(ID)).nullable());
    assert_eq!(
        coerce_json_value(&schema, &id, Some(&json!("abc")), "variable 'v'").unwrap(),
        Value::Id("abc".to_owned())
    );
    assert_eq!(
        coerce_json_value(&schema, &id, Some(&json!(7)), "variable 'v'").unwrap(),
        Value::Id("7".to_owned())
    );

    let color = input_value(name!(v), Type::named(name!(Color)).nullable());
    assert_eq!(
        coerce_json_value(&schema, &color, Some(&json!("GREEN")), "variable 'v'").unwrap(),
        Value::Enum(name!(GREEN))
    );
    assert!(coerce_json_value(&schema, &color, Some(&json!("PURPLE")), "variable 'v'").is_err());

    let colors = input_value(name!(v), Type::named(name!(Color)).list().nullable());
    assert_eq!(
        coerce_json_value(&schema, &colors, Some(&json!(["RED", "BLUE"])), "variable 'v'")
            .unwrap(),
        Value::List(vec![Value::Enum(name!(RED)), Value::Enum(name!(BLUE))])
    );
}

#[test]
fn json_null_versus_missing() {
    let schema = sample_schema();
    let limit = input_value(name!(limit), Type::named(name!(Int)).nullable());
    assert_eq!(
        coerce_json_value(&schema, &limit, None, "variable 'limit'").unwrap(),
        Value::Absent
    );
    assert_eq!(
        coerce_json_value(&schema, &limit, Some(&json!(null)), "variable 'limit'").unwrap(),
        Value::Null
    );

    let required = input_value(name!(limit), Type::named(name!(Int)));
    let errors = coerce_json_value(&schema, &required, None, "variable 'limit'").unwrap_err();
    assert!(errors
        .contains_message("Value of type Int! required for 'limit' in variable 'limit'"));
    assert!(coerce_json_value(&schema, &required, Some(&json!(null)), "variable 'limit'")
        .is_err());
}

#[test]
fn json_input_object_defaulting() {
    let schema = sample_schema();
    let p = input_value(name!(p), Type::named(name!(P)).nullable());
    let coerced =
        coerce_json_value(&schema, &p, Some(&json!({"m": 3})), "variable 'p'").unwrap();
    assert_eq!(
        coerced,
        Value::Object(vec![(name!(n), Value::Int(7)), (name!(m), Value::Int(3))])
    );

    let errors =
        coerce_json_value(&schema, &p, Some(&json!({"q": 1})), "variable 'p'").unwrap_err();
    assert!(errors.contains_message("Unknown field 'q' for input object type 'P' in variable 'p'"));
}

#[test]
fn json_custom_scalar_pass_through() {
    let schema = sample_schema();
    let big = input_value(name!(big), Type::named(name!(BigInt)).nullable());
    assert_eq!(
        coerce_json_value(&schema, &big, Some(&json!(42)), "variable 'big'").unwrap(),
        Value::Int(42)
    );
    assert_eq!(
        coerce_json_value(&schema, &big, Some(&json!("big")), "variable 'big'").unwrap(),
        Value::String("big".to_owned())
    );
    assert!(coerce_json_value(&schema, &big, Some(&json!([1])), "variable 'big'").is_err());
}
