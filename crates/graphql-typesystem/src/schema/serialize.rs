use super::*;
use crate::ast::serialize::write_string_literal;
use std::fmt;

/// Canonical SDL rendering: two-space indentation, fields one per line,
/// interface lists joined by `&`, union members by ` | `.
///
/// The `schema { … }` block is omitted when the root is implicit (exactly
/// one operation, named `Query`, with no description or directives), and
/// built-in scalar and directive definitions are not re-printed.
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut separate = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            if first {
                first = false;
                Ok(())
            } else {
                // Empty line between top-level definitions
                f.write_str("\n\n")
            }
        };

        if !implicit_root(&self.schema_definition) {
            separate(f)?;
            write_schema_definition(f, &self.schema_definition)?;
        }
        for definition in self.directive_definitions.values() {
            if is_built_in_directive(definition) {
                continue;
            }
            separate(f)?;
            write_directive_definition(f, definition)?;
        }
        for definition in self.types.values() {
            if definition.is_built_in() {
                continue;
            }
            separate(f)?;
            write_type_definition(f, definition)?;
        }
        if !first {
            // Trailing newline
            f.write_str("\n")?;
        }
        Ok(())
    }
}

fn implicit_root(root: &SchemaDefinition) -> bool {
    root.description.is_none()
        && root.directives.is_empty()
        && root.mutation.is_none()
        && root.subscription.is_none()
        && root.query.as_ref().map_or(true, |query| query == "Query")
}

fn write_schema_definition(f: &mut fmt::Formatter<'_>, root: &SchemaDefinition) -> fmt::Result {
    write_description(f, root.description.as_deref(), "")?;
    f.write_str("schema")?;
    write_directives(f, &root.directives)?;
    f.write_str(" {")?;
    if let Some(query) = &root.query {
        write!(f, "\n  query: {query}")?;
    }
    if let Some(mutation) = &root.mutation {
        write!(f, "\n  mutation: {mutation}")?;
    }
    if let Some(subscription) = &root.subscription {
        write!(f, "\n  subscription: {subscription}")?;
    }
    f.write_str("\n}")
}

fn write_directive_definition(
    f: &mut fmt::Formatter<'_>,
    definition: &DirectiveDefinition,
) -> fmt::Result {
    write_description(f, definition.description.as_deref(), "")?;
    write!(f, "directive @{}", definition.name)?;
    write_arguments_definition(f, &definition.arguments)?;
    if definition.repeatable {
        f.write_str(" repeatable")?;
    }
    f.write_str(" on ")?;
    for (i, location) in definition.locations.iter().enumerate() {
        if i != 0 {
            f.write_str(" | ")?;
        }
        f.write_str(location.name())?;
    }
    Ok(())
}

fn write_type_definition(f: &mut fmt::Formatter<'_>, definition: &TypeDefinition) -> fmt::Result {
    match definition {
        TypeDefinition::Scalar(ty) => {
            write_description(f, ty.description.as_deref(), "")?;
            write!(f, "scalar {}", ty.name)?;
            write_directives(f, &ty.directives)
        }
        TypeDefinition::Object(ty) => {
            write_description(f, ty.description.as_deref(), "")?;
            write!(f, "type {}", ty.name)?;
            write_implements(f, &ty.implements_interfaces)?;
            write_directives(f, &ty.directives)?;
            write_fields(f, &ty.fields)
        }
        TypeDefinition::Interface(ty) => {
            write_description(f, ty.description.as_deref(), "")?;
            write!(f, "interface {}", ty.name)?;
            write_implements(f, &ty.implements_interfaces)?;
            write_directives(f, &ty.directives)?;
            write_fields(f, &ty.fields)
        }
        TypeDefinition::Union(ty) => {
            write_description(f, ty.description.as_deref(), "")?;
            write!(f, "union {}", ty.name)?;
            write_directives(f, &ty.directives)?;
            f.write_str(" = ")?;
            for (i, member) in ty.members.iter().enumerate() {
                if i != 0 {
                    f.write_str(" | ")?;
                }
                f.write_str(member.as_str())?;
            }
            Ok(())
        }
        TypeDefinition::Enum(ty) => {
            write_description(f, ty.description.as_deref(), "")?;
            write!(f, "enum {}", ty.name)?;
            write_directives(f, &ty.directives)?;
            f.write_str(" {")?;
            for value in ty.values.values() {
                f.write_str("\n")?;
                write_description(f, value.description.as_deref(), "  ")?;
                write!(f, "  {}", value.value)?;
                write_directives(f, &value.directives)?;
            }
            f.write_str("\n}")
        }
        TypeDefinition::InputObject(ty) => {
            write_description(f, ty.description.as_deref(), "")?;
            write!(f, "input {}", ty.name)?;
            write_directives(f, &ty.directives)?;
            f.write_str(" {")?;
            for field in ty.fields.values() {
                f.write_str("\n")?;
                write_description(f, field.description.as_deref(), "  ")?;
                f.write_str("  ")?;
                write_input_value(f, field)?;
            }
            f.write_str("\n}")
        }
    }
}

fn write_fields(
    f: &mut fmt::Formatter<'_>,
    fields: &IndexMap<Name, Node<FieldDefinition>>,
) -> fmt::Result {
    f.write_str(" {")?;
    for field in fields.values() {
        f.write_str("\n")?;
        write_description(f, field.description.as_deref(), "  ")?;
        write!(f, "  {}", field.name)?;
        write_arguments_definition(f, &field.arguments)?;
        write!(f, ": {}", field.ty)?;
        write_directives(f, &field.directives)?;
    }
    f.write_str("\n}")
}

fn write_implements(f: &mut fmt::Formatter<'_>, interfaces: &IndexSet<Name>) -> fmt::Result {
    for (i, interface) in interfaces.iter().enumerate() {
        if i == 0 {
            f.write_str(" implements ")?;
        } else {
            f.write_str(" & ")?;
        }
        f.write_str(interface.as_str())?;
    }
    Ok(())
}

fn write_arguments_definition(
    f: &mut fmt::Formatter<'_>,
    arguments: &[Node<InputValueDefinition>],
) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }
    f.write_str("(")?;
    for (i, argument) in arguments.iter().enumerate() {
        if i != 0 {
            f.write_str(", ")?;
        }
        if let Some(description) = &argument.description {
            write_string_literal(f, description)?;
            f.write_str(" ")?;
        }
        write_input_value(f, argument)?;
    }
    f.write_str(")")
}

fn write_input_value(f: &mut fmt::Formatter<'_>, input_value: &InputValueDefinition) -> fmt::Result {
    write!(f, "{}: {}", input_value.name, input_value.ty)?;
    if let Some(default) = &input_value.default_value {
        write!(f, " = {default}")?;
    }
    write_directives(f, &input_value.directives)
}

fn write_directives(f: &mut fmt::Formatter<'_>, directives: &DirectiveList) -> fmt::Result {
    for directive in directives {
        write!(f, " {directive}")?;
    }
    Ok(())
}

fn write_description(
    f: &mut fmt::Formatter<'_>,
    description: Option<&str>,
    indent: &str,
) -> fmt::Result {
    let Some(description) = description else {
        return Ok(());
    };
    if description.contains('\n') || description.contains('"') {
        write!(f, "{indent}\"\"\"\n{description}\n{indent}\"\"\"\n")
    } else {
        f.write_str(indent)?;
        write_string_literal(f, description)?;
        f.write_str("\n")
    }
}
