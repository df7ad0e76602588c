//! Coercion of external JSON variable values against input value definitions.
//!
//! The sibling of [`value`][crate::validation::value]: same resolution
//! order, but source values are pattern-matched against JSON shapes and
//! coercions produce fresh [`Value`] nodes.

use crate::ast::InputValueDefinition;
use crate::ast::Type;
use crate::ast::Value;
use crate::schema::is_built_in_scalar_name;
use crate::schema::Schema;
use crate::schema::TypeDefinition;
use crate::validation::DiagnosticList;
use crate::validation::Problem;
use crate::Name;

pub type JsonValue = serde_json::Value;
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Coerce an external JSON value against an input value definition.
///
/// `value` is `None` when the variable was not supplied at all; JSON `null`
/// is an explicitly provided null. See
/// [`coerce_value`][crate::validation::coerce_value] for the resolution
/// order; the JSON path additionally accepts `Int` from a JSON integer and
/// `ID` from a JSON integer (stringified) or JSON string.
pub fn coerce_json_value(
    schema: &Schema,
    input_value: &InputValueDefinition,
    value: Option<&JsonValue>,
    location: &str,
) -> Result<Value, DiagnosticList> {
    coerce(
        schema,
        &input_value.ty,
        input_value.default_value.as_ref(),
        &input_value.name,
        value,
        location,
    )
}

fn coerce(
    schema: &Schema,
    ty: &Type,
    default: Option<&Value>,
    name: &Name,
    value: Option<&JsonValue>,
    location: &str,
) -> Result<Value, DiagnosticList> {
    let Some(value) = value else {
        if let Some(default) = default {
            return Ok(default.clone());
        }
        if ty.is_nullable() {
            return Ok(Value::Absent);
        }
        return Err(Problem::RequiredValue {
            ty: ty.clone(),
            name: name.clone(),
            location: location.to_owned(),
        }
        .into());
    };

    match ty {
        Type::Nullable(inner) => match value {
            JsonValue::Null => Ok(Value::Null),
            _ => coerce(schema, inner, default, name, Some(value), location),
        },
        Type::List(element) => match value {
            JsonValue::Array(items) => {
                let mut problems = DiagnosticList::new();
                let mut coerced = Vec::with_capacity(items.len());
                for item in items {
                    // element defaults never apply inside a list
                    match coerce(schema, element, None, name, Some(item), location) {
                        Ok(value) => coerced.push(value),
                        Err(errors) => problems.merge(errors),
                    }
                }
                if problems.is_empty() {
                    Ok(Value::List(coerced))
                } else {
                    Err(problems)
                }
            }
            _ => Err(mismatch(ty, value, name, location)),
        },
        Type::Named(type_name) => match schema.definition(type_name) {
            Some(TypeDefinition::Scalar(_)) if is_built_in_scalar_name(type_name) => {
                let coerced = match type_name.as_str() {
                    "Int" => value
                        .as_i64()
                        .and_then(|i| i32::try_from(i).ok())
                        .map(Value::Int),
                    "Float" => value.as_f64().filter(|_| value.is_f64()).map(Value::Float),
                    "String" => value.as_str().map(|s| Value::String(s.to_owned())),
                    "Boolean" => value.as_bool().map(Value::Boolean),
                    "ID" => value
                        .as_str()
                        .map(|s| Value::Id(s.to_owned()))
                        .or_else(|| value.as_i64().map(|i| Value::Id(i.to_string()))),
                    _ => None,
                };
                coerced.ok_or_else(|| mismatch(ty, value, name, location))
            }
            Some(TypeDefinition::Scalar(_)) => {
                // custom scalar: pass primitives through unchanged
                let coerced = match value {
                    JsonValue::Number(n) => n
                        .as_i64()
                        .and_then(|i| i32::try_from(i).ok())
                        .map(Value::Int)
                        .or_else(|| n.as_f64().map(Value::Float)),
                    JsonValue::String(s) => Some(Value::String(s.clone())),
                    JsonValue::Bool(b) => Some(Value::Boolean(*b)),
                    _ => None,
                };
                coerced.ok_or_else(|| mismatch(ty, value, name, location))
            }
            Some(TypeDefinition::Enum(enum_)) => value
                .as_str()
                .and_then(|s| enum_.values.keys().find(|key| *key == s))
                .map(|key| Value::Enum(key.clone()))
                .ok_or_else(|| mismatch(ty, value, name, location)),
            Some(TypeDefinition::InputObject(input_object)) => match value {
                JsonValue::Object(fields) => {
                    let mut problems = DiagnosticList::new();
                    for field_name in fields.keys() {
                        if !input_object.fields.contains_key(field_name.as_str()) {
                            match Name::new(field_name) {
                                Ok(field) => problems.push(Problem::UnknownInputField {
                                    type_name: input_object.name.clone(),
                                    field,
                                    location: location.to_owned(),
                                }),
                                Err(_) => problems.push(Problem::Parse(format!(
                                    "`{field_name}` is not a valid GraphQL name"
                                ))),
                            }
                        }
                    }
                    let mut coerced = Vec::with_capacity(input_object.fields.len());
                    for (field_name, field) in &input_object.fields {
                        let supplied = fields.get(field_name.as_str());
                        match coerce_json_value(schema, field, supplied, location) {
                            Ok(value) => coerced.push((field_name.clone(), value)),
                            Err(errors) => problems.merge(errors),
                        }
                    }
                    if problems.is_empty() {
                        Ok(Value::Object(coerced))
                    } else {
                        Err(problems)
                    }
                }
                _ => Err(mismatch(ty, value, name, location)),
            },
            // undefined or non-input type
            _ => Err(mismatch(ty, value, name, location)),
        },
    }
}

fn mismatch(ty: &Type, value: &JsonValue, name: &Name, location: &str) -> DiagnosticList {
    Problem::InvalidValue {
        ty: ty.clone(),
        found: value.to_string(),
        name: name.clone(),
        location: location.to_owned(),
    }
    .into()
}
