//! Defines the class model produced from an ontology: `ClassInfo` records, their ordered
//! property maps, the type tags properties resolve to, and the catalog that owns them.

use crate::consts::{XSD_BOOLEAN, XSD_DOUBLE, XSD_FLOAT, XSD_STRING};
use indexmap::map::Entry;
use indexmap::IndexMap;
use log::warn;
use oxigraph::model::{NamedNode, NamedNodeRef};
use serde::{Serialize, Serializer};
use std::collections::HashSet;

fn namednode_ser<S>(namednode: &NamedNode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(namednode.as_str())
}

/// Primitive value kinds a data property can carry.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Boolean,
    Float,
    Double,
}

impl ScalarKind {
    /// Maps one of the recognized XSD datatypes to its scalar kind.
    pub fn from_datatype(datatype: NamedNodeRef<'_>) -> Option<Self> {
        if datatype == XSD_STRING {
            Some(ScalarKind::String)
        } else if datatype == XSD_BOOLEAN {
            Some(ScalarKind::Boolean)
        } else if datatype == XSD_FLOAT {
            Some(ScalarKind::Float)
        } else if datatype == XSD_DOUBLE {
            Some(ScalarKind::Double)
        } else {
            None
        }
    }

    pub fn datatype(self) -> NamedNodeRef<'static> {
        match self {
            ScalarKind::String => XSD_STRING,
            ScalarKind::Boolean => XSD_BOOLEAN,
            ScalarKind::Float => XSD_FLOAT,
            ScalarKind::Double => XSD_DOUBLE,
        }
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarKind::String => write!(f, "string"),
            ScalarKind::Boolean => write!(f, "boolean"),
            ScalarKind::Float => write!(f, "float"),
            ScalarKind::Double => write!(f, "double"),
        }
    }
}

/// Target of an object-valued property.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    /// Reference to a class in the catalog, by name.
    Class(String),
    /// The value type could not be pinned to a single named class.
    Unknown,
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectType::Class(name) => write!(f, "{}", name),
            ObjectType::Unknown => write!(f, "<unknown object>"),
        }
    }
}

/// Outcome of resolving the value type of a property restriction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Scalar(ScalarKind),
    ClassRef(String),
    Unknown,
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyType::Scalar(kind) => write!(f, "{}", kind),
            PropertyType::ClassRef(name) => write!(f, "{}", name),
            PropertyType::Unknown => write!(f, "<unknown object>"),
        }
    }
}

/// Property name to type, in declaration order.
pub type PropertyMap<T> = IndexMap<String, T>;

/// One named OWL class and the properties declared on it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    #[serde(serialize_with = "namednode_ser")]
    uri: NamedNode,
    name: String,
    #[serde(rename = "parent")]
    pub parent_name: Option<String>,
    pub data_properties: PropertyMap<ScalarKind>,
    pub object_properties: PropertyMap<ObjectType>,
}

impl ClassInfo {
    pub fn new(uri: NamedNode, name: impl Into<String>) -> Self {
        ClassInfo {
            uri,
            name: name.into(),
            parent_name: None,
            data_properties: PropertyMap::new(),
            object_properties: PropertyMap::new(),
        }
    }

    pub fn uri(&self) -> NamedNodeRef<'_> {
        self.uri.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    /// True if `name` is declared on this class as either a data or an object property.
    pub fn declares(&self, name: &str) -> bool {
        self.data_properties.contains_key(name) || self.object_properties.contains_key(name)
    }
}

/// All named classes discovered in an ontology, keyed by short name and kept in discovery
/// order.
#[derive(Debug, Clone, Default)]
pub struct ClassCatalog {
    classes: IndexMap<String, ClassInfo>,
}

impl ClassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `class` unless a class with the same name is already present; the first
    /// occurrence wins. Returns true if the class was added.
    pub fn insert(&mut self, class: ClassInfo) -> bool {
        match self.classes.entry(class.name().to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(class);
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ClassInfo> {
        self.classes.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Position of `name` in discovery order.
    pub fn get_index_of(&self, name: &str) -> Option<usize> {
        self.classes.get_index_of(name)
    }

    /// Parent of `name`, only if that parent is itself in the catalog.
    pub fn resolvable_parent(&self, name: &str) -> Option<&ClassInfo> {
        let parent = self.get(name)?.parent_name()?;
        self.get(parent)
    }

    pub fn names(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Number of hops along `parent_of` from `name` to a class without a parent. A chain that
/// revisits a class counts as depth 0.
pub(crate) fn chain_depth<'a>(
    name: &'a str,
    parent_of: impl Fn(&str) -> Option<&'a str>,
) -> usize {
    let mut seen: HashSet<&'a str> = HashSet::from([name]);
    let mut depth = 0;
    let mut current = parent_of(name);
    while let Some(parent) = current {
        if !seen.insert(parent) {
            warn!("Parent chain of {} loops back on {}", name, parent);
            return 0;
        }
        depth += 1;
        current = parent_of(parent);
    }
    depth
}

/// Non-fatal findings collected while extracting a model.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A second class IRI shares its short name with one already in the catalog.
    DuplicateClassName { name: String, uri: String },
    /// The class sat on a parent cycle; its parent was cleared to break it.
    ParentCycle { class: String },
    /// A property's value type matched several named classes and fell back to unknown.
    AmbiguousType {
        class: String,
        property: String,
        candidates: Vec<String>,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::DuplicateClassName { name, uri } => {
                write!(f, "duplicate class name {} (ignored {})", name, uri)
            }
            Diagnostic::ParentCycle { class } => {
                write!(f, "parent cycle through {}; parent cleared", class)
            }
            Diagnostic::AmbiguousType {
                class,
                property,
                candidates,
            } => write!(
                f,
                "{}.{} could be any of [{}]; using unknown object",
                class,
                property,
                candidates.join(", ")
            ),
        }
    }
}

/// Final class model: classes ordered so every parent precedes its children.
#[derive(Serialize, Debug, Clone, Default)]
pub struct ClassModel {
    classes: Vec<ClassInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<Diagnostic>,
}

impl ClassModel {
    pub fn new(classes: Vec<ClassInfo>, diagnostics: Vec<Diagnostic>) -> Self {
        ClassModel {
            classes,
            diagnostics,
        }
    }

    pub fn classes(&self) -> &[ClassInfo] {
        &self.classes
    }

    pub fn get(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.name() == name)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of parent hops from `name` to a root. Unknown names have depth 0.
    pub fn depth(&self, name: &str) -> usize {
        chain_depth(name, |n| {
            self.get(n)
                .and_then(ClassInfo::parent_name)
                .filter(|p| self.get(p).is_some())
        })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
