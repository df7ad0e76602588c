//! Validation of directive occurrences: location legality, repeatability,
//! and argument elaboration against directive definitions — across schemas
//! and queries.

use crate::ast::Argument;
use crate::ast::Directive;
use crate::ast::DirectiveDefinition;
use crate::ast::DirectiveList;
use crate::ast::DirectiveLocation;
use crate::ast::FragmentDefinition;
use crate::ast::OperationDefinition;
use crate::ast::Selection;
use crate::ast::VariableValues;
use crate::schema::Schema;
use crate::schema::TypeDefinition;
use crate::validation::coerce_value;
use crate::validation::DiagnosticList;
use crate::validation::Problem;
use crate::Node;
use indexmap::IndexSet;

/// Validate the directives applied at a single site.
///
/// Occurrence problems (undefined directives, illegal locations, then
/// illegal repetition) are reported before argument problems, in
/// document order.
pub fn validate_directives(
    schema: &Schema,
    directives: &DirectiveList,
    location: DirectiveLocation,
    variables: &VariableValues,
) -> DiagnosticList {
    let mut problems = DiagnosticList::new();
    for directive in directives {
        match schema.directive_definitions.get(directive.name.as_str()) {
            None => problems.push(Problem::UndefinedDirective(directive.name.clone())),
            Some(definition) => {
                if !definition.locations.contains(&location) {
                    problems.push(Problem::DirectiveNotAllowed {
                        name: directive.name.clone(),
                        location,
                    });
                }
            }
        }
    }
    let mut seen = IndexSet::new();
    let mut repeated = IndexSet::new();
    for directive in directives {
        if !seen.insert(&directive.name) {
            let repeatable = schema
                .directive_definitions
                .get(directive.name.as_str())
                .is_some_and(|definition| definition.repeatable);
            if !repeatable {
                repeated.insert(&directive.name);
            }
        }
    }
    for name in repeated {
        problems.push(Problem::RepeatedDirective(name.clone()));
    }
    for directive in directives {
        if let Some(definition) = schema.directive_definitions.get(directive.name.as_str()) {
            if let Err(errors) = elaborate_arguments(schema, directive, definition, variables) {
                problems.merge(errors);
            }
        }
    }
    problems
}

/// Validate every directive attached to any schema component, each against
/// the directive location of its site
pub fn validate_directives_for_schema(schema: &Schema) -> DiagnosticList {
    let variables = VariableValues::new();
    let mut problems = DiagnosticList::new();
    let mut check = |directives: &DirectiveList, location: DirectiveLocation| {
        problems.merge(validate_directives(schema, directives, location, &variables));
    };
    check(
        &schema.schema_definition.directives,
        DirectiveLocation::Schema,
    );
    for definition in schema.types.values() {
        match definition {
            TypeDefinition::Scalar(ty) => check(&ty.directives, DirectiveLocation::Scalar),
            TypeDefinition::Object(ty) => {
                check(&ty.directives, DirectiveLocation::Object);
                for field in ty.fields.values() {
                    check(&field.directives, DirectiveLocation::FieldDefinition);
                    for argument in &field.arguments {
                        check(&argument.directives, DirectiveLocation::ArgumentDefinition);
                    }
                }
            }
            TypeDefinition::Interface(ty) => {
                check(&ty.directives, DirectiveLocation::Interface);
                for field in ty.fields.values() {
                    check(&field.directives, DirectiveLocation::FieldDefinition);
                    for argument in &field.arguments {
                        check(&argument.directives, DirectiveLocation::ArgumentDefinition);
                    }
                }
            }
            TypeDefinition::Union(ty) => check(&ty.directives, DirectiveLocation::Union),
            TypeDefinition::Enum(ty) => {
                check(&ty.directives, DirectiveLocation::Enum);
                for value in ty.values.values() {
                    check(&value.directives, DirectiveLocation::EnumValue);
                }
            }
            TypeDefinition::InputObject(ty) => {
                check(&ty.directives, DirectiveLocation::InputObject);
                for field in ty.fields.values() {
                    check(&field.directives, DirectiveLocation::InputFieldDefinition);
                }
            }
        }
    }
    problems
}

/// Validate every directive in an operation and its fragments, with
/// QUERY/MUTATION/SUBSCRIPTION chosen by operation kind.
///
/// Problems accumulate in query-tree pre-order.
pub fn validate_directives_for_query(
    schema: &Schema,
    operation: &OperationDefinition,
    fragments: &[Node<FragmentDefinition>],
    variables: &VariableValues,
) -> Result<(), DiagnosticList> {
    let mut problems = DiagnosticList::new();
    problems.merge(validate_directives(
        schema,
        &operation.directives,
        operation.operation_type.into(),
        variables,
    ));
    for variable_definition in &operation.variables {
        problems.merge(validate_directives(
            schema,
            &variable_definition.directives,
            DirectiveLocation::VariableDefinition,
            variables,
        ));
    }
    validate_selection_set(schema, &operation.selection_set, variables, &mut problems);
    for fragment in fragments {
        problems.merge(validate_directives(
            schema,
            &fragment.directives,
            DirectiveLocation::FragmentDefinition,
            variables,
        ));
        validate_selection_set(schema, &fragment.selection_set, variables, &mut problems);
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

fn validate_selection_set(
    schema: &Schema,
    selections: &[Selection],
    variables: &VariableValues,
    problems: &mut DiagnosticList,
) {
    for selection in selections {
        match selection {
            Selection::Field(field) => {
                problems.merge(validate_directives(
                    schema,
                    &field.directives,
                    DirectiveLocation::Field,
                    variables,
                ));
                validate_selection_set(schema, &field.selection_set, variables, problems);
            }
            Selection::FragmentSpread(spread) => {
                problems.merge(validate_directives(
                    schema,
                    &spread.directives,
                    DirectiveLocation::FragmentSpread,
                    variables,
                ));
            }
            Selection::InlineFragment(inline) => {
                problems.merge(validate_directives(
                    schema,
                    &inline.directives,
                    DirectiveLocation::InlineFragment,
                    variables,
                ));
                validate_selection_set(schema, &inline.selection_set, variables, problems);
            }
        }
    }
}

/// Elaborate the directives applied at a site: resolve variable references,
/// coerce every declared argument, and return the rewritten directive list
/// with fully-resolved argument bindings in declaration order
pub fn elaborate_directives(
    schema: &Schema,
    directives: &DirectiveList,
    variables: &VariableValues,
) -> Result<DirectiveList, DiagnosticList> {
    let mut problems = DiagnosticList::new();
    let mut elaborated = Vec::with_capacity(directives.len());
    for directive in directives {
        match schema.directive_definitions.get(directive.name.as_str()) {
            None => problems.push(Problem::UndefinedDirective(directive.name.clone())),
            Some(definition) => {
                match elaborate_arguments(schema, directive, definition, variables) {
                    Ok(arguments) => elaborated.push(Node::new(Directive {
                        name: directive.name.clone(),
                        arguments,
                    })),
                    Err(errors) => problems.merge(errors),
                }
            }
        }
    }
    if problems.is_empty() {
        Ok(DirectiveList(elaborated))
    } else {
        Err(problems)
    }
}

fn elaborate_arguments(
    schema: &Schema,
    directive: &Directive,
    definition: &DirectiveDefinition,
    variables: &VariableValues,
) -> Result<Vec<Argument>, DiagnosticList> {
    let mut problems = DiagnosticList::new();
    for argument in &directive.arguments {
        if !definition.arguments.iter().any(|declared| declared.name == argument.name) {
            problems.push(Problem::UnknownDirectiveArgument {
                directive: directive.name.clone(),
                argument: argument.name.clone(),
            });
        }
    }
    let location = format!("directive '{}'", directive.name);
    let mut arguments = Vec::new();
    for declared in &definition.arguments {
        let supplied = directive.argument_by_name(&declared.name);
        let supplied = match supplied {
            Some(value) => match value.elaborate(variables) {
                Ok(value) => Some(value),
                Err(errors) => {
                    problems.merge(errors);
                    continue;
                }
            },
            None => None,
        };
        match coerce_value(schema, declared, supplied.as_ref(), &location) {
            Ok(value) if !value.is_absent() => arguments.push(Argument {
                name: declared.name.clone(),
                value,
            }),
            Ok(_) => {}
            Err(errors) => problems.merge(errors),
        }
    }
    if problems.is_empty() {
        Ok(arguments)
    } else {
        Err(problems)
    }
}
