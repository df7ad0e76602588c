use super::*;
use crate::validation::Problem;
use indexmap::map::Entry;

/// Builds a [`Schema`] from AST documents.
///
/// The in-construction schema is populated imperatively so that by-name type
/// references can resolve once it is complete; it is local to the builder and
/// never observable before [`build`][Self::build] seals it.
pub struct SchemaBuilder {
    schema: Schema,
    schema_definition_seen: bool,
    problems: DiagnosticList,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    pub fn new() -> Self {
        SchemaBuilder {
            schema: Schema {
                schema_definition: Node::new(SchemaDefinition::default()),
                directive_definitions: IndexMap::new(),
                types: IndexMap::new(),
            },
            schema_definition_seen: false,
            problems: DiagnosticList::new(),
        }
    }

    /// Add an AST document to the schema being built.
    ///
    /// Executable definitions, if any, are not relevant to the type system
    /// and are silently ignored.
    pub fn add_document(&mut self, document: &ast::Document) {
        for definition in &document.definitions {
            match definition {
                ast::Definition::SchemaDefinition(def) => {
                    if self.schema_definition_seen {
                        self.problems.push(Problem::MultipleSchemaDefinitions);
                    } else {
                        self.schema_definition_seen = true;
                        self.set_schema_definition(def);
                    }
                }
                ast::Definition::DirectiveDefinition(def) => {
                    if !insert_sticky(
                        &mut self.schema.directive_definitions,
                        &def.name,
                        || def.clone(),
                    ) {
                        self.problems
                            .push(Problem::DuplicateDirectiveDefinition(def.name.clone()));
                    }
                }
                ast::Definition::ScalarTypeDefinition(def) => {
                    // a declared built-in scalar short-circuits to the built-in definition
                    let ty = if let Some(built_in) = BUILT_IN_SCALARS.get(def.name.as_str()) {
                        built_in.clone()
                    } else {
                        TypeDefinition::Scalar(Node::new(ScalarType {
                            name: def.name.clone(),
                            description: def.description.clone(),
                            directives: def.directives.clone(),
                        }))
                    };
                    self.insert_type(&def.name, ty);
                }
                ast::Definition::ObjectTypeDefinition(def) => {
                    if def.fields.is_empty() {
                        self.problems.push(Problem::EmptyFields(def.name.clone()));
                    }
                    let ty = TypeDefinition::Object(Node::new(ObjectType {
                        name: def.name.clone(),
                        description: def.description.clone(),
                        implements_interfaces: self
                            .collect_interfaces(&def.name, &def.implements_interfaces),
                        directives: def.directives.clone(),
                        fields: self.collect_fields(&def.name, &def.fields),
                    }));
                    self.insert_type(&def.name, ty);
                }
                ast::Definition::InterfaceTypeDefinition(def) => {
                    if def.fields.is_empty() {
                        self.problems.push(Problem::EmptyFields(def.name.clone()));
                    }
                    let ty = TypeDefinition::Interface(Node::new(InterfaceType {
                        name: def.name.clone(),
                        description: def.description.clone(),
                        implements_interfaces: self
                            .collect_interfaces(&def.name, &def.implements_interfaces),
                        directives: def.directives.clone(),
                        fields: self.collect_fields(&def.name, &def.fields),
                    }));
                    self.insert_type(&def.name, ty);
                }
                ast::Definition::UnionTypeDefinition(def) => {
                    if def.members.is_empty() {
                        self.problems.push(Problem::EmptyUnion(def.name.clone()));
                    }
                    let mut members = IndexSet::new();
                    for member in &def.members {
                        if !members.insert(member.clone()) {
                            self.problems.push(Problem::DuplicateUnionMember {
                                union_name: def.name.clone(),
                                member: member.clone(),
                            });
                        }
                    }
                    let ty = TypeDefinition::Union(Node::new(UnionType {
                        name: def.name.clone(),
                        description: def.description.clone(),
                        directives: def.directives.clone(),
                        members,
                    }));
                    self.insert_type(&def.name, ty);
                }
                ast::Definition::EnumTypeDefinition(def) => {
                    if def.values.is_empty() {
                        self.problems.push(Problem::EmptyEnum(def.name.clone()));
                    }
                    let values = collect_sticky(
                        def.values
                            .iter()
                            .map(|value_def| (&value_def.value, value_def.clone())),
                        |duplicate, _| {
                            self.problems.push(Problem::DuplicateEnumValue {
                                enum_name: def.name.clone(),
                                value: duplicate.clone(),
                            })
                        },
                    );
                    let ty = TypeDefinition::Enum(Node::new(EnumType {
                        name: def.name.clone(),
                        description: def.description.clone(),
                        directives: def.directives.clone(),
                        values,
                    }));
                    self.insert_type(&def.name, ty);
                }
                ast::Definition::InputObjectTypeDefinition(def) => {
                    if def.fields.is_empty() {
                        self.problems
                            .push(Problem::EmptyInputObject(def.name.clone()));
                    }
                    let fields = collect_sticky(
                        def.fields.iter().map(|field| (&field.name, field.clone())),
                        |duplicate, _| {
                            self.problems.push(Problem::DuplicateField {
                                type_name: def.name.clone(),
                                field: duplicate.clone(),
                            })
                        },
                    );
                    let ty = TypeDefinition::InputObject(Node::new(InputObjectType {
                        name: def.name.clone(),
                        description: def.description.clone(),
                        directives: def.directives.clone(),
                        fields,
                    }));
                    self.insert_type(&def.name, ty);
                }
                ast::Definition::OperationDefinition(_) | ast::Definition::FragmentDefinition(_) => {}
            }
        }
    }

    /// Returns the schema built from all added documents, sealed, together
    /// with the problems encountered while building
    pub fn build(mut self) -> (Schema, DiagnosticList) {
        let root = self.schema.schema_definition.make_mut();
        if self.schema_definition_seen {
            // an explicit schema definition without a query operation
            // defaults to the type named Query
            if root.query.is_none() {
                root.query = Some(crate::name!("Query"));
            }
        } else {
            // no schema definition: the root is built from whichever of the
            // conventionally-named object types exist
            let if_has_object_type = |ty: ast::OperationType| {
                let name = ty.default_type_name();
                self.schema.types.get(name)?.is_object().then(|| Name::new_unchecked(name))
            };
            root.query = if_has_object_type(ast::OperationType::Query);
            root.mutation = if_has_object_type(ast::OperationType::Mutation);
            root.subscription = if_has_object_type(ast::OperationType::Subscription);
        }
        for built_in in BUILT_IN_DIRECTIVES.iter() {
            insert_sticky(
                &mut self.schema.directive_definitions,
                &built_in.name,
                || built_in.clone(),
            );
        }
        (self.schema, self.problems)
    }

    fn set_schema_definition(&mut self, definition: &Node<ast::SchemaDefinition>) {
        let root = self.schema.schema_definition.make_mut();
        root.description = definition.description.clone();
        root.directives = definition.directives.clone();
        for (operation_type, object_type_name) in &definition.root_operations {
            let entry = match operation_type {
                ast::OperationType::Query => &mut root.query,
                ast::OperationType::Mutation => &mut root.mutation,
                ast::OperationType::Subscription => &mut root.subscription,
            };
            if entry.is_none() {
                *entry = Some(object_type_name.clone());
            } else {
                self.problems
                    .push(Problem::DuplicateRootOperation(*operation_type));
            }
        }
    }

    fn insert_type(&mut self, name: &Name, ty: TypeDefinition) {
        if !insert_sticky(&mut self.schema.types, name, || ty) {
            self.problems
                .push(Problem::DuplicateTypeDefinition(name.clone()));
        }
    }

    fn collect_interfaces(&mut self, type_name: &Name, interfaces: &[NamedType]) -> IndexSet<Name> {
        let mut set = IndexSet::new();
        for interface in interfaces {
            if !set.insert(interface.clone()) {
                self.problems.push(Problem::DuplicateImplementsInterface {
                    implementer_name: type_name.clone(),
                    interface_name: interface.clone(),
                });
            }
        }
        set
    }

    fn collect_fields(
        &mut self,
        type_name: &Name,
        fields: &[Node<ast::FieldDefinition>],
    ) -> IndexMap<Name, Node<FieldDefinition>> {
        collect_sticky(
            fields.iter().map(|field| (&field.name, field.clone())),
            |duplicate, _| {
                self.problems.push(Problem::DuplicateField {
                    type_name: type_name.clone(),
                    field: duplicate.clone(),
                })
            },
        )
    }
}

/// Like `IndexMap::insert`, but does not replace the value if an equivalent
/// key is already in the map.
///
/// Returns whether the value was inserted
fn insert_sticky<V>(
    map: &mut IndexMap<Name, V>,
    key: &Name,
    make_value: impl FnOnce() -> V,
) -> bool {
    match map.entry(key.clone()) {
        Entry::Vacant(entry) => {
            entry.insert(make_value());
            true
        }
        Entry::Occupied(_) => false,
    }
}

/// Like `IndexMap::from_iter`, but keeps the first value for an equivalent
/// key and calls `duplicate` with values not inserted
fn collect_sticky<'a, V>(
    iter: impl IntoIterator<Item = (&'a Name, V)>,
    mut duplicate: impl FnMut(&Name, V),
) -> IndexMap<Name, V> {
    let mut map = IndexMap::new();
    for (key, value) in iter {
        match map.entry(key.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(_) => duplicate(key, value),
        }
    }
    map
}
