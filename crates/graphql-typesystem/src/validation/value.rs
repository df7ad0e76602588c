//! Coercion of literal AST values against input value definitions.
//!
//! The sibling algorithm for external JSON values lives in
//! [`variable`][crate::validation::variable]; the two are kept
//! clause-for-clause identical.

use crate::ast::InputValueDefinition;
use crate::ast::Type;
use crate::ast::Value;
use crate::schema::is_built_in_scalar_name;
use crate::schema::Schema;
use crate::schema::TypeDefinition;
use crate::validation::DiagnosticList;
use crate::validation::Problem;
use crate::Name;

/// Coerce a literal value against an input value definition: its type, its
/// default, and its nullability.
///
/// `value` is `None` when no value was supplied at all; `location` labels
/// the site (e.g. `directive 'skip'`) in diagnostics.
///
/// * A missing value falls back to the default, even for non-nullable types.
/// * For nullable types a missing or explicitly absent value yields
///   [`Value::Absent`], and an explicit null yields [`Value::Null`].
/// * Defaults never cascade into list elements.
/// * Input object fields may individually fall back to their own defaults;
///   the result object is in declaration order.
/// * Custom scalars accept any primitive unchanged; the server-side scalar
///   codec performs deeper checks outside this crate.
pub fn coerce_value(
    schema: &Schema,
    input_value: &InputValueDefinition,
    value: Option<&Value>,
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
    value: Option<&Value>,
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
            Value::Absent => Ok(Value::Absent),
            Value::Null => Ok(Value::Null),
            _ => coerce(schema, inner, default, name, Some(value), location),
        },
        Type::List(element) => match value {
            Value::List(items) => {
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
                match (type_name.as_str(), value) {
                    ("Int", Value::Int(_))
                    | ("Float", Value::Float(_))
                    | ("String", Value::String(_))
                    | ("Boolean", Value::Boolean(_))
                    | ("ID", Value::Id(_)) => Ok(value.clone()),
                    ("ID", Value::String(s)) => Ok(Value::Id(s.clone())),
                    ("ID", Value::Int(i)) => Ok(Value::Id(i.to_string())),
                    _ => Err(mismatch(ty, value, name, location)),
                }
            }
            Some(TypeDefinition::Scalar(_)) => match value {
                // custom scalar: pass primitives through unchanged
                Value::Int(_) | Value::Float(_) | Value::String(_) | Value::Boolean(_) => {
                    Ok(value.clone())
                }
                _ => Err(mismatch(ty, value, name, location)),
            },
            Some(TypeDefinition::Enum(enum_)) => match value {
                Value::Enum(value_name) if enum_.has_value(value_name) => Ok(value.clone()),
                _ => Err(mismatch(ty, value, name, location)),
            },
            Some(TypeDefinition::InputObject(input_object)) => match value {
                Value::Object(fields) => {
                    let mut problems = DiagnosticList::new();
                    for (field_name, _) in fields {
                        if !input_object.fields.contains_key(field_name.as_str()) {
                            problems.push(Problem::UnknownInputField {
                                type_name: input_object.name.clone(),
                                field: field_name.clone(),
                                location: location.to_owned(),
                            });
                        }
                    }
                    let mut coerced = Vec::with_capacity(input_object.fields.len());
                    for (field_name, field) in &input_object.fields {
                        let supplied = fields
                            .iter()
                            .find(|(name, _)| name == field_name)
                            .map(|(_, value)| value);
                        match coerce_value(schema, field, supplied, location) {
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

fn mismatch(ty: &Type, value: &Value, name: &Name, location: &str) -> DiagnosticList {
    Problem::InvalidValue {
        ty: ty.clone(),
        found: value.to_string(),
        name: name.clone(),
        location: location.to_owned(),
    }
    .into()
}
