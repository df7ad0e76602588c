//! Interface implementation conformance: an implementing type must carry
//! every interface field, with an argument list exactly equal by position,
//! name and type, and a result type that is a subtype of the interface's.

use crate::ast::InputValueDefinition;
use crate::schema::Schema;
use crate::schema::TypeDefinition;
use crate::validation::DiagnosticList;
use crate::validation::Problem;
use crate::Node;

pub(crate) fn validate_implementations(schema: &Schema, problems: &mut DiagnosticList) {
    for (type_name, definition) in &schema.types {
        let (implements_interfaces, fields) = match definition {
            TypeDefinition::Object(ty) => (&ty.implements_interfaces, &ty.fields),
            TypeDefinition::Interface(ty) => (&ty.implements_interfaces, &ty.fields),
            _ => continue,
        };
        for interface_name in implements_interfaces {
            let interface = match schema.definition(interface_name) {
                Some(TypeDefinition::Interface(interface)) => interface,
                Some(_) => {
                    problems.push(Problem::NonInterfaceImplemented {
                        implementer_name: type_name.clone(),
                        interface_name: interface_name.clone(),
                    });
                    continue;
                }
                // undefined names are reported by the reference pass
                None => continue,
            };
            for (field_name, interface_field) in &interface.fields {
                let Some(field) = fields.get(field_name.as_str()) else {
                    problems.push(Problem::MissingInterfaceField {
                        type_name: type_name.clone(),
                        interface_name: interface_name.clone(),
                        field: field_name.clone(),
                    });
                    continue;
                };
                if !same_arguments(&field.arguments, &interface_field.arguments) {
                    problems.push(Problem::IncompatibleFieldArguments {
                        type_name: type_name.clone(),
                        interface_name: interface_name.clone(),
                        field: field_name.clone(),
                    });
                }
                if !schema.is_subtype(&field.ty, &interface_field.ty) {
                    problems.push(Problem::IncompatibleFieldType {
                        type_name: type_name.clone(),
                        interface_name: interface_name.clone(),
                        field: field_name.clone(),
                    });
                }
            }
        }
    }
}

fn same_arguments(a: &[Node<InputValueDefinition>], b: &[Node<InputValueDefinition>]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x.name == y.name && x.ty == y.ty)
}
