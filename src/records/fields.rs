//! Candidate fields and the ordered accessors that resolve them

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A named, optional string attribute a record may expose
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    #[serde(alias = "originalTitle")]
    OriginalTitle,
    #[serde(alias = "originalName")]
    OriginalName,
    Name,
}

impl Field {
    /// Default lookup order: movie title, then show title, then plain name
    pub const STANDARD: [Field; 3] = [Field::OriginalTitle, Field::OriginalName, Field::Name];

    /// Key as it appears in catalogue payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OriginalTitle => "original_title",
            Self::OriginalName => "original_name",
            Self::Name => "name",
        }
    }

    pub fn camel_case(&self) -> &'static str {
        match self {
            Self::OriginalTitle => "originalTitle",
            Self::OriginalName => "originalName",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Field::STANDARD
            .into_iter()
            .find(|field| field.as_str() == s || field.camel_case() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A field name that is not one of the known candidate fields
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}' (expected one of original_title, original_name, name)")]
pub struct UnknownField(pub String);

/// Records that expose candidate fields by name
pub trait Searchable {
    /// Resolve a candidate field, `None` when the record lacks it
    fn field(&self, field: Field) -> Option<&str>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn field(&self, field: Field) -> Option<&str> {
        (**self).field(field)
    }
}

/// Untyped JSON objects, as delivered by catalogue APIs.
///
/// The snake_case key wins over the camelCase one; non-string values count
/// as absent.
impl Searchable for serde_json::Value {
    fn field(&self, field: Field) -> Option<&str> {
        let object = self.as_object()?;
        [field.as_str(), field.camel_case()]
            .into_iter()
            .find_map(|key| object.get(key).and_then(serde_json::Value::as_str))
    }
}

type Getter<R> = dyn for<'a> Fn(&'a R) -> Option<&'a str> + Send + Sync;

/// A named function resolving one candidate field on a record
pub struct FieldAccessor<R> {
    name: Cow<'static, str>,
    get: Arc<Getter<R>>,
}

impl<R> FieldAccessor<R> {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, get: F) -> Self
    where
        F: for<'a> Fn(&'a R) -> Option<&'a str> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            get: Arc::new(get),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve the field; empty strings are treated as absent
    pub fn resolve<'a>(&self, record: &'a R) -> Option<&'a str> {
        (self.get)(record).filter(|value| !value.is_empty())
    }
}

impl<R: Searchable + 'static> FieldAccessor<R> {
    /// Accessor backed by the record's [`Searchable`] impl
    pub fn for_field(field: Field) -> Self {
        Self::new(field.as_str(), move |record: &R| record.field(field))
    }
}

impl<R> Clone for FieldAccessor<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            get: Arc::clone(&self.get),
        }
    }
}

impl<R> fmt::Debug for FieldAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Fixed, ordered sequence of field accessors consulted per record
pub struct FieldPriorityList<R> {
    accessors: Vec<FieldAccessor<R>>,
}

impl<R> FieldPriorityList<R> {
    pub fn new(accessors: Vec<FieldAccessor<R>>) -> Self {
        Self { accessors }
    }

    /// Append a lower-priority accessor
    pub fn then(mut self, accessor: FieldAccessor<R>) -> Self {
        self.accessors.push(accessor);
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldAccessor<R>> {
        self.accessors.iter()
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    /// Accessor names in priority order
    pub fn names(&self) -> Vec<&str> {
        self.accessors.iter().map(FieldAccessor::name).collect()
    }
}

impl<R: Searchable + 'static> FieldPriorityList<R> {
    pub fn from_fields(fields: &[Field]) -> Self {
        fields
            .iter()
            .fold(Self::new(Vec::with_capacity(fields.len())), |list, &field| {
                list.then(FieldAccessor::for_field(field))
            })
    }

    /// `original_title`, `original_name`, `name`
    pub fn standard() -> Self {
        Self::from_fields(&Field::STANDARD)
    }
}

impl<R> Clone for FieldPriorityList<R> {
    fn clone(&self) -> Self {
        Self {
            accessors: self.accessors.clone(),
        }
    }
}

impl<R> fmt::Debug for FieldPriorityList<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl<'l, R> IntoIterator for &'l FieldPriorityList<R> {
    type Item = &'l FieldAccessor<R>;
    type IntoIter = std::slice::Iter<'l, FieldAccessor<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
