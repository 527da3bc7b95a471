use crate::error::{JavaModelError, Result};
use crate::model::{
    CONSTRUCTOR_NAME, ClassId, ClassKind, ClassModel, FieldId, FieldModel, JavaType, MemberRef,
    MethodId, MethodModel, Modifier, Parameter, PrimitiveType,
};
use crate::provider::{ClassProvider, HierarchyProvider, MemberProvider};
use crate::schema::{
    ClassSchema, ConstructorSchema, MemberSchema, MethodSchema, ParameterSchema, UniverseSchema,
};
use petgraph::algo::{has_path_connecting, is_cyclic_directed};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use std::collections::HashMap;
use tracing::debug;

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";

/// Arena of resolved class, method and field records.
///
/// Records are addressed by stable integer ids and never mutated after
/// [`Universe::from_schema`] returns. Supertype edges live in a petgraph
/// `DiGraph` whose node indices coincide with class ids.
#[derive(Debug, Clone)]
pub struct Universe {
    classes: Vec<ClassModel>,
    methods: Vec<MethodModel>,
    fields: Vec<FieldModel>,
    by_name: HashMap<String, ClassId>,
    graph: DiGraph<ClassId, ()>,
    object: ClassId,
    string: ClassId,
}

impl Universe {
    pub fn from_schema(mut schema: UniverseSchema) -> Result<Self> {
        seed_root_types(&mut schema);

        let mut by_name = HashMap::with_capacity(schema.classes.len());
        for (index, class) in schema.classes.iter().enumerate() {
            if by_name
                .insert(class.name.clone(), ClassId(index as u32))
                .is_some()
            {
                return Err(JavaModelError::DuplicateClass(class.name.clone()));
            }
        }

        let object = by_name[OBJECT];
        let string = by_name[STRING];

        let mut universe = Universe {
            classes: Vec::with_capacity(schema.classes.len()),
            methods: Vec::new(),
            fields: Vec::new(),
            by_name,
            graph: DiGraph::new(),
            object,
            string,
        };

        for (index, class) in schema.classes.into_iter().enumerate() {
            universe.insert_class(ClassId(index as u32), class)?;
        }
        universe.build_graph()?;

        debug!(
            classes = universe.classes.len(),
            methods = universe.methods.len(),
            fields = universe.fields.len(),
            "Symbol universe built"
        );
        Ok(universe)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassModel> {
        self.classes.iter()
    }

    fn resolve_supertype(&self, class: &str, supertype: &str) -> Result<ClassId> {
        self.by_name
            .get(supertype)
            .copied()
            .ok_or_else(|| JavaModelError::UnknownSupertype {
                class: class.to_string(),
                supertype: supertype.to_string(),
            })
    }

    fn insert_class(&mut self, id: ClassId, schema: ClassSchema) -> Result<()> {
        let is_interface = matches!(schema.kind, ClassKind::Interface | ClassKind::Annotation);

        let superclass = match &schema.superclass {
            Some(name) if !is_interface => Some(self.resolve_supertype(&schema.name, name)?),
            None if !is_interface && schema.name != OBJECT => Some(self.object),
            _ => None,
        };

        let interfaces = schema
            .interfaces
            .iter()
            .map(|name| self.resolve_supertype(&schema.name, name))
            .collect::<Result<Vec<_>>>()?;

        let enclosing = match &schema.enclosing {
            Some(name) => Some(self.by_name.get(name).copied().ok_or_else(|| {
                JavaModelError::UnknownEnclosing {
                    class: schema.name.clone(),
                    enclosing: name.clone(),
                }
            })?),
            None => None,
        };

        let simple_name = simple_name_of(&schema.name, schema.enclosing.as_deref());

        let mut members = Vec::with_capacity(schema.members.len());
        for member in schema.members {
            let member = match member {
                MemberSchema::Method(method) => self.insert_method(id, is_interface, method),
                MemberSchema::Constructor(ctor) => self.insert_constructor(id, ctor),
                MemberSchema::Field(field) => {
                    let field_id = FieldId(self.fields.len() as u32);
                    let mut modifiers = field.modifiers;
                    if is_interface {
                        for implied in [Modifier::Public, Modifier::Static, Modifier::Final] {
                            add_modifier(&mut modifiers, implied);
                        }
                    }
                    self.fields.push(FieldModel {
                        id: field_id,
                        owner: id,
                        name: field.name,
                        modifiers,
                        ty: field.ty,
                        annotations: field.annotations,
                    });
                    MemberRef::Field(field_id)
                }
            };
            members.push(member);
        }

        let mut modifiers = schema.modifiers;
        if is_interface {
            add_modifier(&mut modifiers, Modifier::Abstract);
        }

        self.classes.push(ClassModel {
            id,
            name: schema.name,
            simple_name,
            kind: schema.kind,
            modifiers,
            superclass,
            interfaces,
            enclosing,
            has_outer_instance: schema.outer_instance,
            members,
        });
        Ok(())
    }

    fn insert_method(&mut self, owner: ClassId, in_interface: bool, schema: MethodSchema) -> MemberRef {
        let mut modifiers = schema.modifiers;
        if in_interface && !modifiers.contains(&Modifier::Private) {
            add_modifier(&mut modifiers, Modifier::Public);
            if !modifiers.contains(&Modifier::Default) && !modifiers.contains(&Modifier::Static) {
                add_modifier(&mut modifiers, Modifier::Abstract);
            }
        }

        let id = MethodId(self.methods.len() as u32);
        self.methods.push(MethodModel {
            id,
            owner,
            name: schema.name,
            modifiers,
            parameters: schema.parameters.into_iter().map(to_parameter).collect(),
            return_type: schema.returns,
            annotations: schema.annotations,
        });
        MemberRef::Method(id)
    }

    fn insert_constructor(&mut self, owner: ClassId, schema: ConstructorSchema) -> MemberRef {
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(MethodModel {
            id,
            owner,
            name: CONSTRUCTOR_NAME.to_string(),
            modifiers: schema.modifiers,
            parameters: schema.parameters.into_iter().map(to_parameter).collect(),
            return_type: JavaType::Void,
            annotations: schema.annotations,
        });
        MemberRef::Method(id)
    }

    fn build_graph(&mut self) -> Result<()> {
        let mut graph = DiGraph::with_capacity(self.classes.len(), self.classes.len());
        for class in &self.classes {
            graph.add_node(class.id);
        }
        for class in &self.classes {
            for sup in self.direct_supertypes(class.id) {
                graph.add_edge(NodeIndex::new(class.id.index()), NodeIndex::new(sup.index()), ());
            }
        }

        if is_cyclic_directed(&graph) {
            let culprit = self
                .classes
                .iter()
                .find(|c| {
                    self.direct_supertypes(c.id).iter().any(|sup| {
                        has_path_connecting(&graph, NodeIndex::new(sup.index()), NodeIndex::new(c.id.index()), None)
                    })
                })
                .map(|c| c.name.clone())
                .unwrap_or_default();
            return Err(JavaModelError::CyclicInheritance(culprit));
        }

        self.graph = graph;
        Ok(())
    }
}

impl ClassProvider for Universe {
    fn class(&self, id: ClassId) -> &ClassModel {
        &self.classes[id.index()]
    }

    fn find_class(&self, binary_name: &str) -> Option<ClassId> {
        self.by_name.get(binary_name).copied()
    }

    fn class_ids(&self) -> Vec<ClassId> {
        self.classes.iter().map(|c| c.id).collect()
    }

    fn object_class(&self) -> ClassId {
        self.object
    }

    fn string_class(&self) -> ClassId {
        self.string
    }
}

impl MemberProvider for Universe {
    fn method(&self, id: MethodId) -> &MethodModel {
        &self.methods[id.index()]
    }

    fn field(&self, id: FieldId) -> &FieldModel {
        &self.fields[id.index()]
    }
}

impl HierarchyProvider for Universe {
    fn direct_supertypes(&self, id: ClassId) -> Vec<ClassId> {
        let class = &self.classes[id.index()];
        let mut result = Vec::with_capacity(class.interfaces.len() + 1);
        if class.is_interface() {
            result.push(self.object);
        } else if let Some(sup) = class.superclass {
            result.push(sup);
        }
        result.extend(class.interfaces.iter().copied());
        result
    }

    fn closure(&self, id: ClassId) -> Vec<ClassId> {
        let mut result = Vec::new();
        let mut bfs = Bfs::new(&self.graph, NodeIndex::new(id.index()));
        while let Some(node) = bfs.next(&self.graph) {
            result.push(self.graph[node]);
        }
        result
    }

    fn is_subclass(&self, sub: ClassId, sup: ClassId) -> bool {
        has_path_connecting(
            &self.graph,
            NodeIndex::new(sub.index()),
            NodeIndex::new(sup.index()),
            None,
        )
    }
}

fn add_modifier(modifiers: &mut Vec<Modifier>, modifier: Modifier) {
    if !modifiers.contains(&modifier) {
        modifiers.push(modifier);
    }
}

fn to_parameter(schema: ParameterSchema) -> Parameter {
    Parameter {
        name: schema.name,
        ty: schema.ty,
        annotations: schema.annotations,
    }
}

fn simple_name_of(binary_name: &str, enclosing: Option<&str>) -> String {
    if let Some(nested) = enclosing
        .and_then(|outer| binary_name.strip_prefix(outer))
        .and_then(|rest| rest.strip_prefix('$'))
    {
        return nested.to_string();
    }
    binary_name
        .rfind('.')
        .map(|pos| &binary_name[pos + 1..])
        .unwrap_or(binary_name)
        .to_string()
}

/// Adds `java.lang.Object` and `java.lang.String` when the universe does not
/// declare them itself.
fn seed_root_types(schema: &mut UniverseSchema) {
    let has = |schema: &UniverseSchema, name: &str| schema.classes.iter().any(|c| c.name == name);

    if !has(schema, OBJECT) {
        let mut object = ClassSchema::new(OBJECT, ClassKind::Class);
        object.modifiers = vec![Modifier::Public];
        object.members = vec![
            MemberSchema::Constructor(ConstructorSchema {
                modifiers: vec![Modifier::Public],
                ..Default::default()
            }),
            root_method("toString", vec![], JavaType::class(STRING)),
            root_method("hashCode", vec![], JavaType::Primitive(PrimitiveType::Int)),
            root_method(
                "equals",
                vec![JavaType::class(OBJECT)],
                JavaType::Primitive(PrimitiveType::Boolean),
            ),
        ];
        schema.classes.insert(0, object);
    }

    if !has(schema, STRING) {
        let mut string = ClassSchema::new(STRING, ClassKind::Class);
        string.modifiers = vec![Modifier::Public, Modifier::Final];
        string.members = vec![MemberSchema::Constructor(ConstructorSchema {
            modifiers: vec![Modifier::Public],
            ..Default::default()
        })];
        schema.classes.insert(1.min(schema.classes.len()), string);
    }
}

fn root_method(name: &str, params: Vec<JavaType>, returns: JavaType) -> MemberSchema {
    MemberSchema::Method(MethodSchema {
        name: name.to_string(),
        modifiers: vec![Modifier::Public],
        parameters: params
            .into_iter()
            .map(|ty| ParameterSchema {
                name: None,
                ty,
                annotations: vec![],
            })
            .collect(),
        returns,
        annotations: vec![],
    })
}
