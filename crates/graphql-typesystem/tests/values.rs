use graphql_typesystem::ast::Document;
use graphql_typesystem::ast::Selection;
use graphql_typesystem::ast::Value;
use graphql_typesystem::ast::VariableValues;
use graphql_typesystem::name;

/// Parse a literal value by embedding it as a field argument
fn parse_value(source: &str) -> Value {
    let document = Document::parse(&format!("{{ f(x: {source}) }}")).unwrap();
    let operation = document.operations().next().unwrap();
    let Selection::Field(field) = &operation.selection_set[0] else {
        panic!("expected a field selection");
    };
    field.arguments[0].value.clone()
}

#[test]
fn values_round_trip_through_rendering() {
    let values = [
        Value::Int(42),
        Value::Int(-7),
        Value::Float(1.5),
        Value::Float(7.0),
        Value::String("hello".to_owned()),
        Value::String("with \"quotes\" and \\ and\nnewline".to_owned()),
        Value::Boolean(true),
        Value::Boolean(false),
        Value::Enum(name!(RED)),
        Value::Variable(name!(v)),
        Value::Null,
        Value::List(vec![Value::Int(1), Value::Null, Value::Enum(name!(A))]),
        Value::Object(vec![
            (name!(a), Value::Int(1)),
            (name!(b), Value::List(vec![Value::String("x".to_owned())])),
        ]),
    ];
    for value in values {
        assert_eq!(parse_value(&value.to_string()), value, "{value}");
    }
}

#[test]
fn float_rendering_keeps_decimal_point() {
    assert_eq!(Value::Float(7.0).to_string(), "7.0");
    assert_eq!(Value::Float(1.5).to_string(), "1.5");
    // and therefore re-parses as a float, not an int
    assert_eq!(parse_value("7.0"), Value::Float(7.0));
}

#[test]
fn variable_elaboration() {
    let value = Value::List(vec![
        Value::Variable(name!(a)),
        Value::Variable(name!(a)),
        Value::Int(3),
    ]);
    let mut variables = VariableValues::new();
    variables.insert(name!(a), Value::Int(1));
    assert_eq!(
        value.elaborate(&variables).unwrap(),
        Value::List(vec![Value::Int(1), Value::Int(1), Value::Int(3)])
    );

    let errors = value.elaborate(&VariableValues::new()).unwrap_err();
    assert!(errors.contains_message("Undefined variable 'a'"));
}

#[test]
fn variable_elaboration_in_objects() {
    let value = Value::Object(vec![
        (name!(limit), Value::Variable(name!(n))),
        (name!(label), Value::String("x".to_owned())),
    ]);
    let mut variables = VariableValues::new();
    variables.insert(name!(n), Value::Int(10));
    assert_eq!(
        value.elaborate(&variables).unwrap(),
        Value::Object(vec![
            (name!(limit), Value::Int(10)),
            (name!(label), Value::String("x".to_owned())),
        ])
    );
}

#[test]
fn string_list_view() {
    let list = Value::string_list(["a", "b"]);
    assert_eq!(
        list,
        Value::List(vec![
            Value::String("a".to_owned()),
            Value::String("b".to_owned()),
        ])
    );
    assert_eq!(list.as_string_list().unwrap(), ["a", "b"]);

    let mixed = Value::List(vec![Value::String("a".to_owned()), Value::Int(1)]);
    assert!(mixed.as_string_list().is_none());
    assert!(Value::Int(1).as_string_list().is_none());
}

#[test]
fn accessors() {
    assert_eq!(Value::Int(3).as_i32(), Some(3));
    assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
    assert_eq!(Value::String("s".to_owned()).as_str(), Some("s"));
    assert_eq!(Value::Id("7".to_owned()).as_id(), Some("7"));
    assert_eq!(Value::Boolean(true).as_bool(), Some(true));
    assert_eq!(Value::Enum(name!(A)).as_enum(), Some(&name!(A)));
    assert_eq!(Value::Variable(name!(v)).as_variable(), Some(&name!(v)));
    assert!(Value::Null.is_null());
    assert!(Value::Absent.is_absent());
    assert!(!Value::Null.is_absent());
    assert_eq!(Value::Int(3).as_str(), None);
}
