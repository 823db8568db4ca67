//! # Type Descriptions
//!
//! [`Schema`] describes the shape of a Rust type the way a serializer sees
//! it: records with tagged fields, maps with a shared value type, sequences
//! with a shared element type, and optional wrappers. Types produce their
//! description through [`Describe`]:
//!
//! ```
//! use fieldcheck_schema::{Describe, Field, Schema};
//!
//! struct Size {
//!     s: u32,
//!     m: u32,
//! }
//!
//! impl Describe for Size {
//!     fn describe() -> Schema {
//!         Schema::record([Field::of::<u32>("s"), Field::of::<u32>("m,omitempty")])
//!     }
//! }
//! ```
//!
//! Sub-schemas created with [`Schema::of`] are [`Schema::Deferred`]: the
//! referenced type is described only when a lookup reaches it. A record
//! that contains itself (`children: Vec<Node>`) is therefore a finite
//! value.
//!
//! Every schema handed out by a lookup is settled first, so the type it
//! names is described once per lookup and not again on each lookup made
//! through the returned handle. Call [`Schema::settle`] on a root built
//! with [`Schema::of`] to get the same behavior from the first lookup.
//!
//! ## Resolution Rules
//!
//! 1. One `Optional` wrapper is unwrapped before looking at the shape.
//! 2. `Map` resolves every key to its value schema.
//! 3. `Record` scans fields in declaration order. Embedded fields are
//!    searched recursively and the first hit wins. Other fields match on
//!    their tag name.
//! 4. `Any` resolves every key and index to `Any`.
//! 5. Everything else resolves nothing.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::provider::{SchemaProvider, MAX_INDIRECTIONS};
use crate::tag::tag_name;

/// A node in a type description.
#[derive(Debug, Clone)]
pub enum Schema {
    /// A leaf value (number, string, bool, ...). Has no children.
    Scalar,
    /// A free-form value (`serde_json::Value`) that holds whatever the
    /// document holds. Every key and index below it is known, so unlike
    /// the other leaves it is not terminal.
    Any,
    /// A record with declared fields, in declaration order.
    Record(Arc<[Field]>),
    /// A map whose keys are arbitrary and whose values share one schema.
    Map(Arc<Schema>),
    /// A sequence whose elements share one schema.
    Sequence(Arc<Schema>),
    /// A nullable wrapper around another schema.
    Optional(Arc<Schema>),
    /// A lazy reference to a type's description. Each lookup on an
    /// unsettled `Deferred` calls the function again.
    Deferred(fn() -> Schema),
}

impl Schema {
    /// Lazy reference to the description of `T`. `T::describe` runs on
    /// every lookup until the handle is [settled](Self::settle).
    pub fn of<T: Describe + ?Sized>() -> Self {
        Self::Deferred(T::describe)
    }

    /// A record with the given fields.
    pub fn record(fields: impl IntoIterator<Item = Field>) -> Self {
        Self::Record(fields.into_iter().collect())
    }

    /// A map with values described by `value`.
    pub fn map(value: Schema) -> Self {
        Self::Map(Arc::new(value))
    }

    /// A sequence with elements described by `element`.
    pub fn sequence(element: Schema) -> Self {
        Self::Sequence(Arc::new(element))
    }

    /// A nullable `inner`.
    pub fn optional(inner: Schema) -> Self {
        Self::Optional(Arc::new(inner))
    }

    /// Follow `Deferred` references until a concrete shape is reached.
    fn force(&self) -> Option<Schema> {
        let mut current = self.clone();
        for _ in 0..MAX_INDIRECTIONS {
            current = match current {
                Self::Deferred(describe) => describe(),
                concrete => return Some(concrete),
            };
        }
        tracing::warn!(
            limit = MAX_INDIRECTIONS,
            "deferred type description did not resolve to a shape"
        );
        None
    }

    /// This schema with its `Deferred` references resolved, including the
    /// one behind a top-level `Optional`. A reference that never reaches a
    /// shape is returned unchanged.
    pub fn settle(&self) -> Schema {
        match self.force() {
            Some(Self::Optional(inner)) => Self::Optional(Arc::new(inner.settle_once())),
            Some(concrete) => concrete,
            None => self.clone(),
        }
    }

    fn settle_once(&self) -> Schema {
        self.force().unwrap_or_else(|| self.clone())
    }

    /// The concrete shape behind at most one `Optional` wrapper.
    fn underlying(&self) -> Option<Schema> {
        match self.force()? {
            Self::Optional(inner) => inner.force(),
            concrete => Some(concrete),
        }
    }

    fn lookup(&self, name: &str, depth: usize) -> Option<Schema> {
        if depth >= MAX_INDIRECTIONS {
            tracing::warn!(
                field = name,
                limit = MAX_INDIRECTIONS,
                "embedded record nesting too deep"
            );
            return None;
        }
        match self.underlying()? {
            Self::Map(value) => Some(value.settle()),
            Self::Record(fields) => fields.iter().find_map(|field| field.lookup(name, depth)),
            Self::Any => Some(Self::Any),
            _ => None,
        }
    }
}

impl SchemaProvider for Schema {
    fn resolve_field(&self, name: &str) -> Option<Self> {
        self.lookup(name, 0)
    }

    fn element(&self, _index: usize) -> Option<Self> {
        match self.underlying()? {
            Self::Sequence(element) => Some(element.settle()),
            Self::Any => Some(Self::Any),
            _ => None,
        }
    }
}

/// A declared record field.
#[derive(Debug, Clone)]
pub struct Field {
    tag: Option<String>,
    embedded: bool,
    schema: Schema,
}

impl Field {
    /// A field with serialization tag `tag` (e.g. `"name,omitempty"`).
    pub fn tagged(tag: impl Into<String>, schema: Schema) -> Self {
        Self {
            tag: Some(tag.into()),
            embedded: false,
            schema,
        }
    }

    /// A field of type `T` with serialization tag `tag`.
    pub fn of<T: Describe + ?Sized>(tag: impl Into<String>) -> Self {
        Self::tagged(tag, Schema::of::<T>())
    }

    /// A field without a serialization tag. No document key addresses it.
    pub fn untagged(schema: Schema) -> Self {
        Self {
            tag: None,
            embedded: false,
            schema,
        }
    }

    /// An embedded record whose fields are promoted into the enclosing
    /// record's name space.
    pub fn embedded(schema: Schema) -> Self {
        Self {
            tag: None,
            embedded: true,
            schema,
        }
    }

    /// An embedded field of type `T`.
    pub fn embed<T: Describe + ?Sized>() -> Self {
        Self::embedded(Schema::of::<T>())
    }

    /// The raw serialization tag, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// The external name derived from the tag, if the field has one.
    pub fn name(&self) -> Option<&str> {
        self.tag.as_deref().and_then(tag_name)
    }

    /// Returns true if this field's children are promoted.
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// The schema of the field's value.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn lookup(&self, name: &str, depth: usize) -> Option<Schema> {
        if self.embedded {
            self.schema.lookup(name, depth + 1)
        } else if self.name() == Some(name) {
            Some(self.schema.settle())
        } else {
            None
        }
    }
}

/// Types that can describe their serialized shape.
pub trait Describe {
    /// The schema of this type.
    fn describe() -> Schema;
}

macro_rules! describe_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> Schema {
                    Schema::Scalar
                }
            }
        )*
    };
}

describe_scalar!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, str, (),
);

impl<T: Describe> Describe for Option<T> {
    fn describe() -> Schema {
        Schema::optional(Schema::of::<T>())
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn describe() -> Schema {
        T::describe()
    }
}

impl<T: Describe + ?Sized> Describe for Arc<T> {
    fn describe() -> Schema {
        T::describe()
    }
}

impl<T: Describe + ?Sized> Describe for Rc<T> {
    fn describe() -> Schema {
        T::describe()
    }
}

impl<T: Describe> Describe for [T] {
    fn describe() -> Schema {
        Schema::sequence(Schema::of::<T>())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> Schema {
        Schema::sequence(Schema::of::<T>())
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> Schema {
        Schema::sequence(Schema::of::<T>())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe() -> Schema {
        Schema::sequence(Schema::of::<T>())
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe() -> Schema {
        Schema::sequence(Schema::of::<T>())
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn describe() -> Schema {
        Schema::sequence(Schema::of::<T>())
    }
}

impl<K, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe() -> Schema {
        Schema::map(Schema::of::<V>())
    }
}

impl<K, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> Schema {
        Schema::map(Schema::of::<V>())
    }
}

/// A free-form value is described as [`Schema::Any`]. Any keeps resolving
/// below itself where every other leaf stops, since the document decides
/// what the value holds.
impl Describe for serde_json::Value {
    fn describe() -> Schema {
        Schema::Any
    }
}

impl Describe for serde_json::Map<String, serde_json::Value> {
    fn describe() -> Schema {
        Schema::map(Schema::Any)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    enum Configuration {}
    enum Trigger {}
    enum Size {}
    enum ConfigUpdater {}
    enum ConfigMapSpec {}

    impl Describe for Configuration {
        fn describe() -> Schema {
            Schema::record([
                Field::of::<HashMap<String, Vec<String>>>("plugins,omitempty"),
                Field::of::<ConfigUpdater>("config_updater,omitempty"),
                Field::of::<Option<Box<Size>>>("size,omitempty"),
                Field::of::<Vec<Trigger>>("triggers,omitempty"),
                Field::of::<i64>("version"),
            ])
        }
    }

    impl Describe for Trigger {
        fn describe() -> Schema {
            Schema::record([Field::of::<Vec<String>>("repos,omitempty")])
        }
    }

    impl Describe for Size {
        fn describe() -> Schema {
            Schema::record([
                Field::of::<i64>("s"),
                Field::of::<i64>("m"),
                Field::of::<i64>("l"),
            ])
        }
    }

    impl Describe for ConfigUpdater {
        fn describe() -> Schema {
            Schema::record([
                Field::of::<BTreeMap<String, ConfigMapSpec>>("maps,omitempty"),
                Field::of::<String>("config_file,omitempty"),
            ])
        }
    }

    impl Describe for ConfigMapSpec {
        fn describe() -> Schema {
            Schema::record([
                Field::of::<String>("name"),
                Field::of::<String>("key,omitempty"),
                Field::untagged(Schema::of::<Vec<String>>()),
                Field::of::<String>("-"),
            ])
        }
    }

    fn root() -> Schema {
        Schema::of::<Configuration>()
    }

    fn is_scalar(schema: &Schema) -> bool {
        matches!(schema.force(), Some(Schema::Scalar))
    }

    #[test]
    fn resolves_tagged_field() {
        let version = root().resolve_field("version").unwrap();
        assert!(is_scalar(&version));
    }

    #[test]
    fn strips_tag_options() {
        assert!(root().resolve_field("plugins").is_some());
        assert!(root().resolve_field("plugins,omitempty").is_none());
    }

    #[test]
    fn unknown_field_is_none() {
        assert!(root().resolve_field("verzion").is_none());
    }

    #[test]
    fn optional_record_is_unwrapped() {
        let size = root().resolve_field("size").unwrap();
        assert!(size.resolve_field("s").is_some());
        assert!(size.resolve_field("xs").is_none());
    }

    #[test]
    fn nested_optional_is_not_unwrapped() {
        let schema = Schema::of::<Option<Option<Size>>>();
        assert!(schema.resolve_field("s").is_none());
    }

    #[test]
    fn map_resolves_any_key() {
        let maps = root()
            .resolve_field("config_updater")
            .and_then(|updater| updater.resolve_field("maps"))
            .unwrap();
        let spec = maps.resolve_field("kube/plugins.yaml").unwrap();
        assert!(spec.resolve_field("name").is_some());
        assert!(spec.resolve_field("nmae").is_none());
    }

    #[test]
    fn untagged_and_excluded_fields_are_unaddressable() {
        let spec = Schema::of::<ConfigMapSpec>();
        assert!(spec.resolve_field("Namespaces").is_none());
        assert!(spec.resolve_field("").is_none());
        assert!(spec.resolve_field("-").is_none());
    }

    #[test]
    fn sequence_element_is_shared() {
        let triggers = root().resolve_field("triggers").unwrap();
        let first = triggers.element(0).unwrap();
        let tenth = triggers.element(10).unwrap();
        assert!(first.resolve_field("repos").is_some());
        assert!(tenth.resolve_field("repos").is_some());
        assert!(first.resolve_field("repoz").is_none());
    }

    #[test]
    fn non_sequence_has_no_element() {
        assert!(root().element(0).is_none());
        assert!(Schema::Scalar.element(0).is_none());
    }

    #[test]
    fn scalar_resolves_nothing() {
        assert!(Schema::Scalar.resolve_field("x").is_none());
        assert!(Schema::of::<Vec<u8>>().resolve_field("x").is_none());
    }

    #[test]
    fn free_form_value_accepts_everything() {
        let value = Schema::of::<serde_json::Value>();
        let nested = value
            .resolve_field("x")
            .and_then(|x| x.element(3))
            .and_then(|e| e.resolve_field("y"))
            .unwrap();
        assert!(matches!(nested, Schema::Any));

        let object = Schema::of::<serde_json::Map<String, serde_json::Value>>();
        assert!(object.resolve_field("anything").is_some());
    }

    enum Meta {}
    enum Labels {}
    enum Resource {}

    impl Describe for Meta {
        fn describe() -> Schema {
            Schema::record([Field::of::<String>("name"), Field::of::<String>("owner")])
        }
    }

    impl Describe for Labels {
        fn describe() -> Schema {
            Schema::record([
                Field::of::<BTreeMap<String, String>>("name"),
                Field::of::<String>("team"),
            ])
        }
    }

    impl Describe for Resource {
        fn describe() -> Schema {
            Schema::record([
                Field::embed::<Meta>(),
                Field::embed::<Option<Labels>>(),
                Field::of::<u32>("replicas"),
            ])
        }
    }

    #[test]
    fn embedded_fields_are_promoted() {
        let resource = Schema::of::<Resource>();
        assert!(resource.resolve_field("owner").is_some());
        assert!(resource.resolve_field("team").is_some());
        assert!(resource.resolve_field("replicas").is_some());
    }

    #[test]
    fn first_embedded_wins() {
        // Both Meta and Labels declare "name"; Meta comes first.
        let name = Schema::of::<Resource>().resolve_field("name").unwrap();
        assert!(is_scalar(&name));
    }

    #[test]
    fn embedded_field_is_not_addressable_by_type_name() {
        let resource = Schema::of::<Resource>();
        assert!(resource.resolve_field("Meta").is_none());
        assert!(resource.resolve_field("meta").is_none());
    }

    enum Node {}

    impl Describe for Node {
        fn describe() -> Schema {
            Schema::record([
                Field::of::<String>("id"),
                Field::of::<Vec<Node>>("children,omitempty"),
            ])
        }
    }

    #[test]
    fn self_referential_type_resolves_lazily() {
        let mut schema = Schema::of::<Node>();
        for i in 0..50 {
            schema = schema
                .resolve_field("children")
                .and_then(|children| children.element(i))
                .unwrap();
        }
        assert!(schema.resolve_field("id").is_some());
        assert!(schema.resolve_field("name").is_none());
    }

    fn looping() -> Schema {
        Schema::Deferred(looping)
    }

    #[test]
    fn deferred_cycle_resolves_to_none() {
        assert!(looping().resolve_field("x").is_none());
        assert!(looping().element(0).is_none());
    }

    enum Ouroboros {}

    impl Describe for Ouroboros {
        fn describe() -> Schema {
            Schema::record([Field::embed::<Ouroboros>(), Field::of::<u8>("tail")])
        }
    }

    #[test]
    fn embedding_cycle_terminates() {
        let schema = Schema::of::<Ouroboros>();
        assert!(schema.resolve_field("head").is_none());
    }

    static COUNTED_DESCRIPTIONS: AtomicUsize = AtomicUsize::new(0);

    enum Counted {}
    enum Holder {}

    impl Describe for Counted {
        fn describe() -> Schema {
            COUNTED_DESCRIPTIONS.fetch_add(1, Ordering::SeqCst);
            Schema::record([Field::of::<u8>("a"), Field::of::<u8>("b")])
        }
    }

    impl Describe for Holder {
        fn describe() -> Schema {
            Schema::record([
                Field::of::<Counted>("one"),
                Field::of::<Option<Counted>>("maybe"),
            ])
        }
    }

    #[test]
    fn resolved_handles_are_described_once() {
        let holder = Schema::of::<Holder>().settle();
        let before = COUNTED_DESCRIPTIONS.load(Ordering::SeqCst);
        let one = holder.resolve_field("one").unwrap();
        let maybe = holder.resolve_field("maybe").unwrap();
        assert_eq!(COUNTED_DESCRIPTIONS.load(Ordering::SeqCst), before + 2);

        for _ in 0..10 {
            assert!(one.resolve_field("a").is_some());
            assert!(maybe.resolve_field("b").is_some());
            assert!(one.resolve_field("c").is_none());
        }
        assert_eq!(COUNTED_DESCRIPTIONS.load(Ordering::SeqCst), before + 2);
    }

    #[test]
    fn settle_keeps_unresolvable_reference() {
        assert!(matches!(looping().settle(), Schema::Deferred(_)));
        assert!(matches!(Schema::of::<u8>().settle(), Schema::Scalar));
        assert!(matches!(
            Schema::of::<Option<Size>>().settle(),
            Schema::Optional(inner) if matches!(*inner, Schema::Record(_))
        ));
    }

    #[test]
    fn field_accessors() {
        let field = Field::of::<u8>("count,omitempty");
        assert_eq!(field.tag(), Some("count,omitempty"));
        assert_eq!(field.name(), Some("count"));
        assert!(!field.is_embedded());
        assert!(matches!(field.schema(), Schema::Deferred(_)));

        let embedded = Field::embed::<Meta>();
        assert_eq!(embedded.name(), None);
        assert!(embedded.is_embedded());
    }
}
