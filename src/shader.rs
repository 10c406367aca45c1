//! Graphs of shader sources.
//!
//! A [`ShaderSource`] describes a fragment of shader code by reference to
//! named shader classes, together with the child sources composed into its
//! named slots. The graphs are plain values: two graphs are equal (and hash
//! equally) when they have the same structure.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// A node in a shader source graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderSource {
    Class(ShaderClassSource),
    Mixin(ShaderMixinSource),
    Array(ShaderArraySource),
}

/// Reference to a shader class, with the generic arguments it is
/// instantiated with.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShaderClassSource {
    class_name: String,
    generic_arguments: Vec<GenericArgument>,
}

/// A generic argument of a [`ShaderClassSource`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenericArgument {
    Name(String),
    Bool(bool),
    Int(i64),
}

/// A set of shader classes mixed together, with child sources composed into
/// named slots. Compositions are kept ordered by slot name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShaderMixinSource {
    mixins: Vec<ShaderClassSource>,
    compositions: BTreeMap<String, ShaderSource>,
}

/// An ordered list of shader sources filling an array slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShaderArraySource {
    values: Vec<ShaderSource>,
}

impl ShaderSource {
    /// Returns the mixin if this source is one.
    pub fn as_mixin(&self) -> Option<&ShaderMixinSource> {
        if let Self::Mixin(mixin) = self {
            Some(mixin)
        } else {
            None
        }
    }

    /// Returns the class reference if this source is one.
    pub fn as_class(&self) -> Option<&ShaderClassSource> {
        if let Self::Class(class) = self {
            Some(class)
        } else {
            None
        }
    }

    /// Returns the array if this source is one.
    pub fn as_array(&self) -> Option<&ShaderArraySource> {
        if let Self::Array(array) = self {
            Some(array)
        } else {
            None
        }
    }

    /// Whether any node in this graph references the shader class with the
    /// given name.
    pub fn references_class(&self, class_name: &str) -> bool {
        match self {
            Self::Class(class) => class.class_name == class_name,
            Self::Mixin(mixin) => {
                mixin
                    .mixins
                    .iter()
                    .any(|class| class.class_name == class_name)
                    || mixin
                        .compositions
                        .values()
                        .any(|source| source.references_class(class_name))
            }
            Self::Array(array) => array
                .values
                .iter()
                .any(|source| source.references_class(class_name)),
        }
    }

    fn fmt_body(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            Self::Class(class) => class.fmt_body(f, indent),
            Self::Mixin(mixin) => mixin.fmt_body(f, indent),
            Self::Array(array) => array.fmt_body(f, indent),
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::Class(_) => "!ShaderClassSource",
            Self::Mixin(_) => "!ShaderMixinSource",
            Self::Array(_) => "!ShaderArraySource",
        }
    }
}

impl ShaderClassSource {
    /// Creates a reference to the shader class with the given name, without
    /// generic arguments.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            generic_arguments: Vec::new(),
        }
    }

    /// Creates a reference to the shader class with the given name,
    /// instantiated with the given generic arguments.
    pub fn with_arguments<A>(class_name: impl Into<String>, arguments: impl IntoIterator<Item = A>) -> Self
    where
        A: Into<GenericArgument>,
    {
        Self {
            class_name: class_name.into(),
            generic_arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends a generic argument.
    pub fn with_argument(mut self, argument: impl Into<GenericArgument>) -> Self {
        self.generic_arguments.push(argument.into());
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn generic_arguments(&self) -> &[GenericArgument] {
        &self.generic_arguments
    }

    fn fmt_body(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(f, "\n{:indent$}ClassName: {}", "", self.class_name)?;
        if !self.generic_arguments.is_empty() {
            write!(f, "\n{:indent$}GenericArguments: [", "")?;
            for (idx, argument) in self.generic_arguments.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{argument}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl ShaderMixinSource {
    /// Creates a mixin of the single given shader class.
    pub fn new(mixin: ShaderClassSource) -> Self {
        Self {
            mixins: vec![mixin],
            compositions: BTreeMap::new(),
        }
    }

    /// Creates a mixin of the single shader class with the given name.
    pub fn of_class(class_name: impl Into<String>) -> Self {
        Self::new(ShaderClassSource::new(class_name))
    }

    pub fn mixins(&self) -> &[ShaderClassSource] {
        &self.mixins
    }

    pub fn compositions(&self) -> &BTreeMap<String, ShaderSource> {
        &self.compositions
    }

    /// Returns the source composed into the slot with the given name.
    pub fn composition(&self, name: &str) -> Option<&ShaderSource> {
        self.compositions.get(name)
    }

    /// Adds the given shader class to the mixin.
    pub fn add_mixin(&mut self, mixin: ShaderClassSource) {
        self.mixins.push(mixin);
    }

    /// Whether the mixin already includes the given shader class.
    pub fn contains_mixin(&self, mixin: &ShaderClassSource) -> bool {
        self.mixins.contains(mixin)
    }

    /// Composes the given source into the slot with the given name,
    /// replacing any previous composition in that slot.
    pub fn add_composition(&mut self, name: impl Into<String>, source: impl Into<ShaderSource>) {
        self.compositions.insert(name.into(), source.into());
    }

    /// Builder variant of [`Self::add_composition`].
    pub fn with_composition(mut self, name: impl Into<String>, source: impl Into<ShaderSource>) -> Self {
        self.add_composition(name, source);
        self
    }

    /// Appends the given source to the array composed into the slot with the
    /// given name. The array is created if the slot is empty.
    ///
    /// # Panics
    /// If the slot already holds a source that is not an array.
    pub fn add_composition_to_array(&mut self, name: &str, source: impl Into<ShaderSource>) {
        let slot = self
            .compositions
            .entry(name.to_string())
            .or_insert_with(|| ShaderSource::Array(ShaderArraySource::default()));
        match slot {
            ShaderSource::Array(array) => array.values.push(source.into()),
            _ => panic!("Composition slot `{name}` does not hold an array"),
        }
    }

    /// Builder variant of [`Self::add_composition_to_array`].
    pub fn with_composition_in_array(mut self, name: &str, source: impl Into<ShaderSource>) -> Self {
        self.add_composition_to_array(name, source);
        self
    }

    fn fmt_body(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(f, "\n{:indent$}Mixins:", "")?;
        for mixin in &self.mixins {
            write!(f, "\n{:width$}- !ShaderClassSource", "", width = indent + 4)?;
            mixin.fmt_body(f, indent + 8)?;
        }
        if !self.compositions.is_empty() {
            write!(f, "\n{:indent$}Compositions:", "")?;
            for (name, source) in &self.compositions {
                write!(f, "\n{:width$}{}: {}", "", name, source.tag(), width = indent + 4)?;
                source.fmt_body(f, indent + 8)?;
            }
        }
        Ok(())
    }
}

impl ShaderArraySource {
    pub fn new(values: Vec<ShaderSource>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[ShaderSource] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn fmt_body(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(f, "\n{:indent$}Values:", "")?;
        for value in &self.values {
            write!(f, "\n{:width$}- {}", "", value.tag(), width = indent + 4)?;
            value.fmt_body(f, indent + 8)?;
        }
        Ok(())
    }
}

impl From<ShaderClassSource> for ShaderSource {
    fn from(class: ShaderClassSource) -> Self {
        Self::Class(class)
    }
}

impl From<ShaderMixinSource> for ShaderSource {
    fn from(mixin: ShaderMixinSource) -> Self {
        Self::Mixin(mixin)
    }
}

impl From<ShaderArraySource> for ShaderSource {
    fn from(array: ShaderArraySource) -> Self {
        Self::Array(array)
    }
}

impl From<&str> for GenericArgument {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for GenericArgument {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<bool> for GenericArgument {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for GenericArgument {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl fmt::Display for GenericArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Display for ShaderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())?;
        self.fmt_body(f, 0)
    }
}
