use super::*;
use crate::validation::directive;
use crate::validation::interface;
use crate::validation::Problem;

/// Post-parse checks, run as independent passes whose problems concatenate:
/// dangling type references, interface implementation conformance, and
/// directive validity
pub(crate) fn validate_schema(schema: &Schema) -> DiagnosticList {
    let mut problems = DiagnosticList::new();
    validate_references(schema, &mut problems);
    interface::validate_implementations(schema, &mut problems);
    problems.merge(directive::validate_directives_for_schema(schema));
    problems
}

/// Every named type mentioned anywhere in the schema must resolve against
/// the built-in scalars or the schema's own types
fn validate_references(schema: &Schema, problems: &mut DiagnosticList) {
    let mut check = |name: &NamedType| {
        if schema.definition(name).is_none() {
            problems.push(Problem::UndefinedType(name.clone()));
        }
    };

    let root = &schema.schema_definition;
    for name in [&root.query, &root.mutation, &root.subscription]
        .into_iter()
        .flatten()
    {
        check(name);
    }

    for definition in schema.types.values() {
        match definition {
            TypeDefinition::Scalar(_) => {}
            TypeDefinition::Object(ty) => {
                for interface in &ty.implements_interfaces {
                    check(interface);
                }
                for field in ty.fields.values() {
                    check(field.ty.inner_named_type());
                    for argument in &field.arguments {
                        check(argument.ty.inner_named_type());
                    }
                }
            }
            TypeDefinition::Interface(ty) => {
                for interface in &ty.implements_interfaces {
                    check(interface);
                }
                for field in ty.fields.values() {
                    check(field.ty.inner_named_type());
                    for argument in &field.arguments {
                        check(argument.ty.inner_named_type());
                    }
                }
            }
            TypeDefinition::Union(ty) => {
                for member in &ty.members {
                    check(member);
                }
            }
            TypeDefinition::Enum(_) => {}
            TypeDefinition::InputObject(ty) => {
                for field in ty.fields.values() {
                    check(field.ty.inner_named_type());
                }
            }
        }
    }

    for definition in schema.directive_definitions.values() {
        for argument in &definition.arguments {
            check(argument.ty.inner_named_type());
        }
    }
}
