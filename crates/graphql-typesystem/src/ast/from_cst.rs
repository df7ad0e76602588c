use super::*;
use crate::validation::DiagnosticList;
use crate::validation::Problem;
use apollo_parser::cst;
use apollo_parser::cst::CstNode;
use apollo_parser::S;

impl Document {
    /// Parse a GraphQL document with the external lexer/parser.
    ///
    /// Works for both type-system documents (SDL) and executable documents;
    /// syntax errors are returned as [`Problem::Parse`] diagnostics.
    pub fn parse(source_text: &str) -> Result<Self, DiagnosticList> {
        let tree = apollo_parser::Parser::new(source_text).parse();
        let mut problems = DiagnosticList::new();
        for error in tree.errors() {
            problems.push(Problem::Parse(error.message().to_owned()));
        }
        if !problems.is_empty() {
            return Err(problems);
        }
        Ok(Self::from_cst(tree.document()))
    }

    pub(crate) fn from_cst(document: cst::Document) -> Self {
        Self {
            definitions: document
                .definitions()
                .filter_map(|def| def.convert())
                .collect(),
        }
    }
}

/// Similar to `TryFrom`, but with an `Option` return type because the CST
/// uses `Option` a lot.
///
/// Entries that fail to convert are skipped silently: they have
/// corresponding syntax errors reported by the parser.
trait Convert {
    type Target;
    fn convert(&self) -> Option<Self::Target>;
}

/// Convert and collect, silently skipping entries with conversion errors
#[inline]
fn collect<CstType, AstType>(iter: impl IntoIterator<Item = CstType>) -> Vec<Node<AstType>>
where
    CstType: Convert<Target = AstType>,
{
    iter.into_iter()
        .filter_map(|value| value.convert().map(Node::new))
        .collect()
}

#[inline]
fn collect_opt<CstType1, CstType2, AstType, F, I>(opt: Option<CstType1>, convert: F) -> Vec<Node<AstType>>
where
    F: FnOnce(CstType1) -> I,
    I: IntoIterator<Item = CstType2>,
    CstType2: Convert<Target = AstType>,
{
    if let Some(cst) = opt {
        collect(convert(cst))
    } else {
        Vec::new()
    }
}

fn directives(cst: Option<cst::Directives>) -> DirectiveList {
    DirectiveList(collect_opt(cst, |x| x.directives()))
}

fn arguments(cst: Option<cst::Arguments>) -> Vec<Argument> {
    cst.map(|x| x.arguments().filter_map(|arg| arg.convert()).collect())
        .unwrap_or_default()
}

impl<T: Convert> Convert for Option<T> {
    type Target = Option<T::Target>;

    fn convert(&self) -> Option<Self::Target> {
        Some(if let Some(inner) = self {
            Some(inner.convert()?)
        } else {
            None
        })
    }
}

impl Convert for cst::Definition {
    type Target = Definition;

    fn convert(&self) -> Option<Self::Target> {
        use crate::ast::Definition as A;
        use cst::Definition as C;
        macro_rules! r {
            ($def: ident) => {
                Node::new($def.convert()?)
            };
        }
        Some(match self {
            C::OperationDefinition(def) => A::OperationDefinition(r!(def)),
            C::FragmentDefinition(def) => A::FragmentDefinition(r!(def)),
            C::DirectiveDefinition(def) => A::DirectiveDefinition(r!(def)),
            C::SchemaDefinition(def) => A::SchemaDefinition(r!(def)),
            C::ScalarTypeDefinition(def) => A::ScalarTypeDefinition(r!(def)),
            C::ObjectTypeDefinition(def) => A::ObjectTypeDefinition(r!(def)),
            C::InterfaceTypeDefinition(def) => A::InterfaceTypeDefinition(r!(def)),
            C::UnionTypeDefinition(def) => A::UnionTypeDefinition(r!(def)),
            C::EnumTypeDefinition(def) => A::EnumTypeDefinition(r!(def)),
            C::InputObjectTypeDefinition(def) => A::InputObjectTypeDefinition(r!(def)),
            // Type extensions are outside this library's SDL dialect
            C::SchemaExtension(_)
            | C::ScalarTypeExtension(_)
            | C::ObjectTypeExtension(_)
            | C::InterfaceTypeExtension(_)
            | C::UnionTypeExtension(_)
            | C::EnumTypeExtension(_)
            | C::InputObjectTypeExtension(_) => return None,
        })
    }
}

impl Convert for cst::OperationDefinition {
    type Target = OperationDefinition;

    fn convert(&self) -> Option<Self::Target> {
        let operation_type = if let Some(ty) = self.operation_type() {
            ty.convert()?
        } else {
            OperationType::Query
        };
        Some(Self::Target {
            operation_type,
            name: self.name().convert()?,
            variables: collect_opt(self.variable_definitions(), |x| x.variable_definitions()),
            directives: directives(self.directives()),
            selection_set: self
                .selection_set()?
                .selections()
                .filter_map(|sel| sel.convert())
                .collect(),
        })
    }
}

impl Convert for cst::FragmentDefinition {
    type Target = FragmentDefinition;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            name: self.fragment_name()?.name()?.convert()?,
            type_condition: self.type_condition()?.convert()?,
            directives: directives(self.directives()),
            selection_set: self.selection_set().convert()??,
        })
    }
}

impl Convert for cst::TypeCondition {
    type Target = NamedType;

    fn convert(&self) -> Option<Self::Target> {
        self.named_type()?.name()?.convert()
    }
}

impl Convert for cst::DirectiveDefinition {
    type Target = DirectiveDefinition;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            description: self.description().convert()?,
            name: self.name()?.convert()?,
            arguments: collect_opt(self.arguments_definition(), |x| x.input_value_definitions()),
            repeatable: self.repeatable_token().is_some(),
            locations: self
                .directive_locations()
                .map(|x| {
                    x.directive_locations()
                        .filter_map(|location| location.convert())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

impl Convert for cst::SchemaDefinition {
    type Target = SchemaDefinition;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            description: self.description().convert()?,
            directives: directives(self.directives()),
            root_operations: self
                .root_operation_type_definitions()
                .filter_map(|x| x.convert())
                .collect(),
        })
    }
}

impl Convert for cst::ScalarTypeDefinition {
    type Target = ScalarTypeDefinition;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            description: self.description().convert()?,
            name: self.name()?.convert()?,
            directives: directives(self.directives()),
        })
    }
}

impl Convert for cst::ObjectTypeDefinition {
    type Target = ObjectTypeDefinition;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            description: self.description().convert()?,
            name: self.name()?.convert()?,
            implements_interfaces: self.implements_interfaces().convert()?,
            directives: directives(self.directives()),
            fields: collect_opt(self.fields_definition(), |x| x.field_definitions()),
        })
    }
}

impl Convert for cst::InterfaceTypeDefinition {
    type Target = InterfaceTypeDefinition;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            description: self.description().convert()?,
            name: self.name()?.convert()?,
            implements_interfaces: self.implements_interfaces().convert()?,
            directives: directives(self.directives()),
            fields: collect_opt(self.fields_definition(), |x| x.field_definitions()),
        })
    }
}

impl Convert for cst::UnionTypeDefinition {
    type Target = UnionTypeDefinition;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            description: self.description().convert()?,
            name: self.name()?.convert()?,
            directives: directives(self.directives()),
            members: self
                .union_member_types()
                .map_or_else(Default::default, |member_types| {
                    member_types
                        .named_types()
                        .filter_map(|n| n.name()?.convert())
                        .collect()
                }),
        })
    }
}

impl Convert for cst::EnumTypeDefinition {
    type Target = EnumTypeDefinition;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            description: self.description().convert()?,
            name: self.name()?.convert()?,
            directives: directives(self.directives()),
            values: collect_opt(self.enum_values_definition(), |x| x.enum_value_definitions()),
        })
    }
}

impl Convert for cst::InputObjectTypeDefinition {
    type Target = InputObjectTypeDefinition;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            description: self.description().convert()?,
            name: self.name()?.convert()?,
            directives: directives(self.directives()),
            fields: collect_opt(self.input_fields_definition(), |x| x.input_value_definitions()),
        })
    }
}

impl Convert for cst::Description {
    type Target = String;

    fn convert(&self) -> Option<Self::Target> {
        Some(String::from(self.string_value()?))
    }
}

impl Convert for cst::Directive {
    type Target = Directive;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            name: self.name()?.convert()?,
            arguments: arguments(self.arguments()),
        })
    }
}

impl Convert for cst::OperationType {
    type Target = OperationType;

    fn convert(&self) -> Option<Self::Target> {
        let token = self.syntax().first_token()?;
        match token.kind() {
            S![query] => Some(OperationType::Query),
            S![mutation] => Some(OperationType::Mutation),
            S![subscription] => Some(OperationType::Subscription),
            _ => None,
        }
    }
}

impl Convert for cst::RootOperationTypeDefinition {
    type Target = (OperationType, NamedType);

    fn convert(&self) -> Option<Self::Target> {
        let ty = self.operation_type()?.convert()?;
        let name = self.named_type()?.name()?.convert()?;
        Some((ty, name))
    }
}

impl Convert for cst::DirectiveLocation {
    type Target = DirectiveLocation;

    fn convert(&self) -> Option<Self::Target> {
        let token = self.syntax().first_token()?;
        match token.kind() {
            S![QUERY] => Some(DirectiveLocation::Query),
            S![MUTATION] => Some(DirectiveLocation::Mutation),
            S![SUBSCRIPTION] => Some(DirectiveLocation::Subscription),
            S![FIELD] => Some(DirectiveLocation::Field),
            S![FRAGMENT_DEFINITION] => Some(DirectiveLocation::FragmentDefinition),
            S![FRAGMENT_SPREAD] => Some(DirectiveLocation::FragmentSpread),
            S![INLINE_FRAGMENT] => Some(DirectiveLocation::InlineFragment),
            S![VARIABLE_DEFINITION] => Some(DirectiveLocation::VariableDefinition),
            S![SCHEMA] => Some(DirectiveLocation::Schema),
            S![SCALAR] => Some(DirectiveLocation::Scalar),
            S![OBJECT] => Some(DirectiveLocation::Object),
            S![FIELD_DEFINITION] => Some(DirectiveLocation::FieldDefinition),
            S![ARGUMENT_DEFINITION] => Some(DirectiveLocation::ArgumentDefinition),
            S![INTERFACE] => Some(DirectiveLocation::Interface),
            S![UNION] => Some(DirectiveLocation::Union),
            S![ENUM] => Some(DirectiveLocation::Enum),
            S![ENUM_VALUE] => Some(DirectiveLocation::EnumValue),
            S![INPUT_OBJECT] => Some(DirectiveLocation::InputObject),
            S![INPUT_FIELD_DEFINITION] => Some(DirectiveLocation::InputFieldDefinition),
            _ => None,
        }
    }
}

impl Convert for Option<cst::ImplementsInterfaces> {
    type Target = Vec<NamedType>;

    fn convert(&self) -> Option<Self::Target> {
        Some(if let Some(inner) = self {
            inner
                .named_types()
                .filter_map(|n| n.name()?.convert())
                .collect()
        } else {
            Vec::new()
        })
    }
}

impl Convert for cst::VariableDefinition {
    type Target = VariableDefinition;

    fn convert(&self) -> Option<Self::Target> {
        let default_value = if let Some(default) = self.default_value() {
            Some(default.value()?.convert()?)
        } else {
            None
        };
        Some(Self::Target {
            name: self.variable()?.name()?.convert()?,
            ty: self.ty()?.convert()?,
            default_value,
            directives: directives(self.directives()),
        })
    }
}

impl Convert for cst::Type {
    type Target = Type;

    fn convert(&self) -> Option<Self::Target> {
        // GraphQL types are nullable unless wrapped in non-null syntax
        convert_type(self, true)
    }
}

/// Tracks nullability through the syntax: entered with `nullable = true`,
/// the non-null wrapper switches it off, and list elements reset it.
fn convert_type(ty: &cst::Type, nullable: bool) -> Option<Type> {
    let wrap = |ty: Type| if nullable { ty.nullable() } else { ty };
    match ty {
        cst::Type::NamedType(name) => Some(wrap(Type::Named(name.name()?.convert()?))),
        cst::Type::ListType(inner) => Some(wrap(Type::List(Box::new(
            convert_type(&inner.ty()?, true)?,
        )))),
        cst::Type::NonNullType(inner) => {
            if let Some(named) = inner.named_type() {
                Some(Type::Named(named.name()?.convert()?))
            } else if let Some(list) = inner.list_type() {
                Some(Type::List(Box::new(convert_type(&list.ty()?, true)?)))
            } else {
                None
            }
        }
    }
}

impl Convert for cst::FieldDefinition {
    type Target = FieldDefinition;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            description: self.description().convert()?,
            name: self.name()?.convert()?,
            arguments: collect_opt(self.arguments_definition(), |x| x.input_value_definitions()),
            ty: self.ty()?.convert()?,
            directives: directives(self.directives()),
        })
    }
}

impl Convert for cst::Argument {
    type Target = Argument;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            name: self.name()?.convert()?,
            value: self.value()?.convert()?,
        })
    }
}

impl Convert for cst::InputValueDefinition {
    type Target = InputValueDefinition;

    fn convert(&self) -> Option<Self::Target> {
        let default_value = if let Some(default) = self.default_value() {
            Some(default.value()?.convert()?)
        } else {
            None
        };
        Some(Self::Target {
            description: self.description().convert()?,
            name: self.name()?.convert()?,
            ty: self.ty()?.convert()?,
            default_value,
            directives: directives(self.directives()),
        })
    }
}

impl Convert for cst::EnumValueDefinition {
    type Target = EnumValueDefinition;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            description: self.description().convert()?,
            value: self.enum_value()?.name()?.convert()?,
            directives: directives(self.directives()),
        })
    }
}

impl Convert for cst::SelectionSet {
    type Target = Vec<Selection>;

    fn convert(&self) -> Option<Self::Target> {
        Some(
            self.selections()
                .filter_map(|selection| selection.convert())
                .collect(),
        )
    }
}

impl Convert for cst::Selection {
    type Target = Selection;

    fn convert(&self) -> Option<Self::Target> {
        use crate::ast::Selection as A;
        use cst::Selection as C;

        Some(match self {
            C::Field(x) => A::Field(Node::new(x.convert()?)),
            C::FragmentSpread(x) => A::FragmentSpread(Node::new(x.convert()?)),
            C::InlineFragment(x) => A::InlineFragment(Node::new(x.convert()?)),
        })
    }
}

impl Convert for cst::Field {
    type Target = Field;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            alias: self.alias().convert()?,
            name: self.name()?.convert()?,
            arguments: arguments(self.arguments()),
            directives: directives(self.directives()),
            // Use an empty Vec for a field without sub-selections
            selection_set: self.selection_set().convert()?.unwrap_or_default(),
        })
    }
}

impl Convert for cst::FragmentSpread {
    type Target = FragmentSpread;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            fragment_name: self.fragment_name()?.name()?.convert()?,
            directives: directives(self.directives()),
        })
    }
}

impl Convert for cst::InlineFragment {
    type Target = InlineFragment;

    fn convert(&self) -> Option<Self::Target> {
        Some(Self::Target {
            type_condition: self.type_condition().convert()?,
            directives: directives(self.directives()),
            selection_set: self.selection_set().convert()??,
        })
    }
}

impl Convert for cst::Value {
    type Target = Value;

    fn convert(&self) -> Option<Self::Target> {
        use crate::ast::Value as A;
        use cst::Value as C;

        Some(match self {
            C::Variable(v) => A::Variable(v.name()?.convert()?),
            C::StringValue(v) => A::String(String::from(v)),
            C::FloatValue(v) => A::Float(v.syntax().first_token()?.text().parse().ok()?),
            C::IntValue(v) => A::Int(v.syntax().first_token()?.text().parse().ok()?),
            C::BooleanValue(v) => A::Boolean(bool::try_from(v).ok()?),
            C::NullValue(_) => A::Null,
            C::EnumValue(v) => A::Enum(v.name()?.convert()?),
            C::ListValue(v) => A::List(v.values().filter_map(|x| x.convert()).collect()),
            C::ObjectValue(v) => A::Object(v.object_fields().filter_map(|x| x.convert()).collect()),
        })
    }
}

impl Convert for cst::ObjectField {
    type Target = (Name, Value);

    fn convert(&self) -> Option<Self::Target> {
        Some((self.name()?.convert()?, self.value()?.convert()?))
    }
}

impl Convert for cst::Alias {
    type Target = Name;

    fn convert(&self) -> Option<Self::Target> {
        self.name()?.convert()
    }
}

impl Convert for cst::Name {
    type Target = Name;

    fn convert(&self) -> Option<Self::Target> {
        Name::new(self.text().as_str()).ok()
    }
}
