//! The temporal data model: temporal elements, temporal objects and the
//! lookup indexes over them.
//!
//! A [`TemporalDataset`] keeps two arenas. Temporal *elements* are spans,
//! sets, instants and intervals on the chronon axis, related through a
//! directed acyclic graph (an interval references its bounding instants, a
//! set its members). Temporal *objects* are facts occurring at an element;
//! zero or more objects may reference the same element, and objects may form
//! a forest through explicit parent/child links.
//!
//! Rows are addressed through index-based handles ([`TemporalElement`],
//! [`TemporalObject`]) that are computed on demand from the arena and never
//! cached across a mutation, so there is no stale-proxy state to invalidate.
//! The exact-match and one-to-many indexes are derived, never authoritative:
//! they are built lazily on the first lookup and kept current on subsequent
//! inserts. The interval index is an explicit opt-in cache; it is *not*
//! invalidated by mutation and rebuilding it after mutation is the caller's
//! contract (stale results, not corruption).

use bimap::BiMap;
use roaring::RoaringTreemap;
use seahash::SeaHasher;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::OnceLock;
use tracing::debug;

use crate::calendar::Granule;
use crate::datatype::{DataKind, DataSchema, DataValue};
use crate::error::{Result, TemporalError};
use crate::interval::{DefaultIntervalComparator, IntervalTree};

pub type ElementId = u64;
pub type ObjectId = u64;

pub type IdHasher = BuildHasherDefault<SeaHasher>;

/// The sentinel bounds of an unanchored temporal element. This is the only
/// permitted `sup < inf` combination.
pub const UNANCHORED_INF: i64 = i64::MAX;
pub const UNANCHORED_SUP: i64 = i64::MIN;

// ------------- TemporalElementKind -------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemporalElementKind {
    Span,
    Set,
    Instant,
    Interval,
}

impl TemporalElementKind {
    pub const fn id(self) -> i32 {
        match self {
            TemporalElementKind::Span => 0,
            TemporalElementKind::Set => 1,
            TemporalElementKind::Instant => 2,
            TemporalElementKind::Interval => 3,
        }
    }

    pub fn from_id(id: i32) -> Result<TemporalElementKind> {
        match id {
            0 => Ok(TemporalElementKind::Span),
            1 => Ok(TemporalElementKind::Set),
            2 => Ok(TemporalElementKind::Instant),
            3 => Ok(TemporalElementKind::Interval),
            _ => Err(TemporalError::Domain(format!(
                "unknown temporal element kind {id}"
            ))),
        }
    }
}

// ------------- rows -------------

#[derive(Debug, Clone)]
struct ElementRow {
    id: ElementId,
    inf: i64,
    sup: i64,
    granularity_id: i32,
    granularity_context_id: i32,
    kind: TemporalElementKind,
}

impl ElementRow {
    fn is_anchored(&self) -> bool {
        self.inf <= self.sup
    }
}

#[derive(Debug, Clone)]
struct ObjectRow {
    id: ObjectId,
    element_id: ElementId,
    data: Vec<DataValue>,
}

// ------------- TemporalDataset -------------

#[derive(Debug, Default)]
pub struct TemporalDataset {
    schema: DataSchema,
    elements: Vec<ElementRow>,
    // incoming element-graph edges, part -> whole
    element_parts: Vec<Vec<u32>>,
    objects: Vec<ObjectRow>,
    object_children: Vec<Vec<u32>>,
    object_parent: Vec<Option<u32>>,
    roots: Option<Vec<ObjectId>>,
    // authoritative id registries, used for duplicate rejection and max+1
    // assignment
    element_ids: HashSet<ElementId, IdHasher>,
    object_ids: HashSet<ObjectId, IdHasher>,
    max_element_id: ElementId,
    max_object_id: ObjectId,
    // derived indexes, built lazily and kept current on insert
    element_index: OnceLock<BiMap<ElementId, usize>>,
    object_index: OnceLock<BiMap<ObjectId, usize>>,
    object_rows_by_element: OnceLock<HashMap<ElementId, RoaringTreemap, IdHasher>>,
    interval_index: Option<IntervalTree<ElementId>>,
}

impl TemporalDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(schema: DataSchema) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }

    pub fn schema(&self) -> &DataSchema {
        &self.schema
    }

    /// Declares a data column on the temporal objects. Existing objects are
    /// extended with the column default. Reserved or duplicate names are
    /// configuration errors and leave the dataset untouched.
    pub fn add_data_column(&mut self, name: &str, kind: DataKind, default: DataValue) -> Result<()> {
        self.schema.add_column(name, kind, default.clone())?;
        for object in &mut self.objects {
            object.data.push(default.clone());
        }
        Ok(())
    }

    // ----- temporal element construction -----

    /// Adds a temporal element with an auto-assigned id (max + 1).
    pub fn add_temporal_element(
        &mut self,
        inf: i64,
        sup: i64,
        granularity_id: i32,
        granularity_context_id: i32,
        kind: TemporalElementKind,
    ) -> Result<ElementId> {
        let id = self.max_element_id + 1;
        self.add_temporal_element_with_id(id, inf, sup, granularity_id, granularity_context_id, kind)
    }

    /// Adds a temporal element with a caller-supplied id. `sup < inf` is
    /// rejected unless the pair is exactly the unanchored sentinel. The
    /// insert is all-or-nothing.
    pub fn add_temporal_element_with_id(
        &mut self,
        id: ElementId,
        inf: i64,
        sup: i64,
        granularity_id: i32,
        granularity_context_id: i32,
        kind: TemporalElementKind,
    ) -> Result<ElementId> {
        if sup < inf && !(inf == UNANCHORED_INF && sup == UNANCHORED_SUP) {
            return Err(TemporalError::Domain(format!(
                "malformed temporal element bounds [{inf}, {sup}]"
            )));
        }
        if !self.element_ids.insert(id) {
            return Err(TemporalError::Domain(format!(
                "duplicate temporal element id {id}"
            )));
        }
        self.elements.push(ElementRow {
            id,
            inf,
            sup,
            granularity_id,
            granularity_context_id,
            kind,
        });
        self.element_parts.push(Vec::new());
        self.max_element_id = self.max_element_id.max(id);
        // an already-built index is kept current, an unbuilt one stays lazy
        if let Some(index) = self.element_index.get_mut() {
            index.insert(id, self.elements.len() - 1);
        }
        Ok(id)
    }

    pub fn add_instant(
        &mut self,
        inf: i64,
        sup: i64,
        granularity_id: i32,
        granularity_context_id: i32,
    ) -> Result<ElementId> {
        self.add_temporal_element(
            inf,
            sup,
            granularity_id,
            granularity_context_id,
            TemporalElementKind::Instant,
        )
    }

    /// Adds an instant backed by a granule, so that the instant occupies
    /// exactly one granule of its granularity.
    pub fn add_instant_granule(&mut self, granule: &Granule) -> Result<ElementId> {
        self.add_instant(
            granule.inf(),
            granule.sup(),
            granule.granularity().id(),
            granule.granularity().context_id(),
        )
    }

    /// Adds an interval bounded by two instants. The interval's bounds are
    /// the union of the endpoints' bounds and the endpoints are wired into
    /// the element graph. Span/instant mixtures are unsupported.
    pub fn add_interval(&mut self, begin: ElementId, end: ElementId) -> Result<ElementId> {
        let (begin_kind, inf, granularity_id, granularity_context_id) = {
            let row = self
                .element_row(begin)
                .ok_or_else(|| unresolved_element(begin))?;
            (row.kind, row.inf, row.granularity_id, row.granularity_context_id)
        };
        let (end_kind, sup) = {
            let row = self
                .element_row(end)
                .ok_or_else(|| unresolved_element(end))?;
            (row.kind, row.sup)
        };
        match (begin_kind, end_kind) {
            (TemporalElementKind::Instant, TemporalElementKind::Instant) => {}
            (TemporalElementKind::Instant, TemporalElementKind::Span)
            | (TemporalElementKind::Span, TemporalElementKind::Instant) => {
                return Err(TemporalError::UnsupportedOperation(
                    "intervals bounded by a span are not supported",
                ));
            }
            _ => {
                return Err(TemporalError::Domain(format!(
                    "interval endpoints must be instants, got {begin_kind:?} and {end_kind:?}"
                )));
            }
        }
        if sup < inf {
            return Err(TemporalError::Domain(format!(
                "interval endpoints produce malformed bounds [{inf}, {sup}]"
            )));
        }
        let id = self.add_temporal_element(
            inf,
            sup,
            granularity_id,
            granularity_context_id,
            TemporalElementKind::Interval,
        )?;
        self.add_element_edge(begin, id)?;
        self.add_element_edge(end, id)?;
        Ok(id)
    }

    /// Adds a directed edge from a part element to the whole it belongs to
    /// (an interval's endpoints, a set's members).
    pub fn add_element_edge(&mut self, part: ElementId, whole: ElementId) -> Result<()> {
        if part == whole {
            return Err(TemporalError::Domain(format!(
                "temporal element {part} cannot reference itself"
            )));
        }
        let part_row = self
            .element_row_number(part)
            .ok_or_else(|| unresolved_element(part))?;
        let whole_row = self
            .element_row_number(whole)
            .ok_or_else(|| unresolved_element(whole))?;
        self.element_parts[whole_row].push(part_row as u32);
        Ok(())
    }

    // ----- temporal object construction -----

    /// Adds a temporal object occurring at the given element, with an
    /// auto-assigned id (max + 1). Data fields start at their defaults.
    pub fn add_temporal_object(&mut self, element_id: ElementId) -> Result<ObjectId> {
        let id = self.max_object_id + 1;
        self.add_temporal_object_with_id(id, element_id)
    }

    pub fn add_temporal_object_with_id(
        &mut self,
        id: ObjectId,
        element_id: ElementId,
    ) -> Result<ObjectId> {
        if self.element_row_number(element_id).is_none() {
            return Err(unresolved_element(element_id));
        }
        if !self.object_ids.insert(id) {
            return Err(TemporalError::Domain(format!(
                "duplicate temporal object id {id}"
            )));
        }
        self.objects.push(ObjectRow {
            id,
            element_id,
            data: self.schema.defaults(),
        });
        self.object_children.push(Vec::new());
        self.object_parent.push(None);
        self.max_object_id = self.max_object_id.max(id);
        let row = self.objects.len() - 1;
        if let Some(index) = self.object_index.get_mut() {
            index.insert(id, row);
        }
        if let Some(index) = self.object_rows_by_element.get_mut() {
            index.entry(element_id).or_default().insert(row as u64);
        }
        Ok(id)
    }

    /// Sets a data field of an object. The value kind must match the
    /// declared column kind. This is the only permitted mutation of an
    /// object after creation.
    pub fn set_data(&mut self, object: ObjectId, column: usize, value: DataValue) -> Result<()> {
        let row = self
            .object_row_number(object)
            .ok_or_else(|| unresolved_object(object))?;
        let declared = self.schema.column(column).ok_or_else(|| {
            TemporalError::Configuration(format!("no data column at index {column}"))
        })?;
        if declared.kind() != value.kind() {
            return Err(TemporalError::Domain(format!(
                "value kind does not match column \"{}\"",
                declared.name()
            )));
        }
        self.objects[row].data[column] = value;
        Ok(())
    }

    /// Links two objects into the object forest. A child has at most one
    /// parent.
    pub fn link_child(&mut self, parent: ObjectId, child: ObjectId) -> Result<()> {
        let parent_row = self
            .object_row_number(parent)
            .ok_or_else(|| unresolved_object(parent))?;
        let child_row = self
            .object_row_number(child)
            .ok_or_else(|| unresolved_object(child))?;
        if parent_row == child_row {
            return Err(TemporalError::Domain(format!(
                "temporal object {parent} cannot be its own child"
            )));
        }
        if self.object_parent[child_row].is_some() {
            return Err(TemporalError::Domain(format!(
                "temporal object {child} is already linked to a parent"
            )));
        }
        self.object_parent[child_row] = Some(parent_row as u32);
        self.object_children[parent_row].push(child_row as u32);
        Ok(())
    }

    /// Sets the top-level object ids: the roots of a forest, a single root
    /// for a tree. Flat tabular data leaves this unset.
    pub fn set_roots(&mut self, roots: Vec<ObjectId>) {
        self.roots = Some(roots);
    }

    pub fn roots(&self) -> Option<&[ObjectId]> {
        self.roots.as_deref()
    }

    // ----- lookups -----

    /// O(1) lookup by element id; `None` for an absent id, never an error.
    pub fn get_temporal_element(&self, id: ElementId) -> Option<TemporalElement<'_>> {
        self.element_row_number(id)
            .map(|row| TemporalElement { dataset: self, row })
    }

    /// O(1) lookup by object id; `None` for an absent id, never an error.
    pub fn get_temporal_object(&self, id: ObjectId) -> Option<TemporalObject<'_>> {
        self.object_row_number(id)
            .map(|row| TemporalObject { dataset: self, row })
    }

    /// All objects occurring at the given element, in insertion order. An
    /// element with zero occurrences yields an empty vector, not an error.
    pub fn get_temporal_objects_by_element(&self, element_id: ElementId) -> Vec<TemporalObject<'_>> {
        match self.object_rows_by_element().get(&element_id) {
            Some(rows) => rows
                .iter()
                .map(|row| TemporalObject {
                    dataset: self,
                    row: row as usize,
                })
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// A fresh traversal over all temporal elements. Each call restarts;
    /// no state is carried between calls.
    pub fn temporal_elements<'a>(&'a self) -> impl Iterator<Item = TemporalElement<'a>> + 'a {
        (0..self.elements.len()).map(move |row| TemporalElement { dataset: self, row })
    }

    /// Elements satisfying the given predicate over row data.
    pub fn temporal_elements_where<'a, P>(
        &'a self,
        predicate: P,
    ) -> impl Iterator<Item = TemporalElement<'a>> + 'a
    where
        P: Fn(&TemporalElement<'a>) -> bool + 'a,
    {
        self.temporal_elements()
            .filter(move |element| predicate(element))
    }

    /// A fresh traversal over all temporal objects.
    pub fn temporal_objects<'a>(&'a self) -> impl Iterator<Item = TemporalObject<'a>> + 'a {
        (0..self.objects.len()).map(move |row| TemporalObject { dataset: self, row })
    }

    /// Objects satisfying the given predicate over row data.
    pub fn temporal_objects_where<'a, P>(
        &'a self,
        predicate: P,
    ) -> impl Iterator<Item = TemporalObject<'a>> + 'a
    where
        P: Fn(&TemporalObject<'a>) -> bool + 'a,
    {
        self.temporal_objects()
            .filter(move |object| predicate(object))
    }

    /// The smallest lower bound over the anchored elements, `None` when no
    /// element is anchored.
    pub fn inf(&self) -> Option<i64> {
        self.elements
            .iter()
            .filter(|row| row.is_anchored())
            .map(|row| row.inf)
            .min()
    }

    /// The largest upper bound over the anchored elements.
    pub fn sup(&self) -> Option<i64> {
        self.elements
            .iter()
            .filter(|row| row.is_anchored())
            .map(|row| row.sup)
            .max()
    }

    // ----- interval index -----

    /// Builds (once, cached) or returns the interval index over the
    /// anchored elements. The index does not observe later mutation;
    /// rebuilding after structural change is the caller's responsibility
    /// (call [`TemporalDataset::invalidate_interval_index`] first).
    pub fn interval_index(&mut self) -> &IntervalTree<ElementId> {
        let entries: Vec<(ElementId, i64, i64)> = if self.interval_index.is_none() {
            self.elements
                .iter()
                .filter(|row| row.is_anchored())
                .map(|row| (row.id, row.inf, row.sup))
                .collect()
        } else {
            Vec::new()
        };
        self.interval_index.get_or_insert_with(|| {
            debug!(
                elements = entries.len(),
                "building interval index over anchored elements"
            );
            IntervalTree::build(entries, &DefaultIntervalComparator)
        })
    }

    /// Peeks at the interval index without building it.
    pub fn get_interval_index(&self) -> Option<&IntervalTree<ElementId>> {
        self.interval_index.as_ref()
    }

    /// Discards the cached interval index so the next
    /// [`TemporalDataset::interval_index`] call rebuilds it.
    pub fn invalidate_interval_index(&mut self) {
        self.interval_index = None;
    }

    // ----- derived index internals -----

    fn element_rows_by_id(&self) -> &BiMap<ElementId, usize> {
        self.element_index.get_or_init(|| {
            debug!(elements = self.elements.len(), "rebuilding element id index");
            let mut index = BiMap::new();
            for (row, element) in self.elements.iter().enumerate() {
                index.insert(element.id, row);
            }
            index
        })
    }

    fn object_rows_by_id(&self) -> &BiMap<ObjectId, usize> {
        self.object_index.get_or_init(|| {
            debug!(objects = self.objects.len(), "rebuilding object id index");
            let mut index = BiMap::new();
            for (row, object) in self.objects.iter().enumerate() {
                index.insert(object.id, row);
            }
            index
        })
    }

    fn object_rows_by_element(&self) -> &HashMap<ElementId, RoaringTreemap, IdHasher> {
        self.object_rows_by_element.get_or_init(|| {
            let mut index: HashMap<ElementId, RoaringTreemap, IdHasher> = HashMap::default();
            for (row, object) in self.objects.iter().enumerate() {
                index
                    .entry(object.element_id)
                    .or_default()
                    .insert(row as u64);
            }
            index
        })
    }

    fn element_row_number(&self, id: ElementId) -> Option<usize> {
        self.element_rows_by_id().get_by_left(&id).copied()
    }

    fn object_row_number(&self, id: ObjectId) -> Option<usize> {
        self.object_rows_by_id().get_by_left(&id).copied()
    }

    fn element_row(&self, id: ElementId) -> Option<&ElementRow> {
        self.element_row_number(id).map(|row| &self.elements[row])
    }
}

impl fmt::Display for TemporalDataset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "TemporalDataset [{} temporal elements, {} temporal objects]",
            self.elements.len(),
            self.objects.len()
        )
    }
}

fn unresolved_element(id: ElementId) -> TemporalError {
    TemporalError::Domain(format!("temporal element {id} does not resolve"))
}

fn unresolved_object(id: ObjectId) -> TemporalError {
    TemporalError::Domain(format!("temporal object {id} does not resolve"))
}

// ------------- element views -------------

/// A read-time view over a temporal element row, valid for the borrow of
/// its dataset.
#[derive(Clone, Copy)]
pub struct TemporalElement<'a> {
    dataset: &'a TemporalDataset,
    row: usize,
}

impl<'a> TemporalElement<'a> {
    fn row(&self) -> &'a ElementRow {
        &self.dataset.elements[self.row]
    }

    pub fn id(&self) -> ElementId {
        self.row().id
    }

    pub fn inf(&self) -> i64 {
        self.row().inf
    }

    pub fn sup(&self) -> i64 {
        self.row().sup
    }

    pub fn granularity_id(&self) -> i32 {
        self.row().granularity_id
    }

    pub fn granularity_context_id(&self) -> i32 {
        self.row().granularity_context_id
    }

    pub fn kind(&self) -> TemporalElementKind {
        self.row().kind
    }

    pub fn is_anchored(&self) -> bool {
        self.row().is_anchored()
    }

    /// The elements this element is composed of, in wiring order (an
    /// interval's begin and end instants, a set's members).
    pub fn parts(&self) -> impl Iterator<Item = TemporalElement<'a>> + 'a {
        let dataset = self.dataset;
        self.dataset.element_parts[self.row]
            .iter()
            .map(move |&row| TemporalElement {
                dataset,
                row: row as usize,
            })
    }

    /// The instant specialization, `None` when the kind does not match.
    pub fn as_instant(&self) -> Option<Instant<'a>> {
        (self.kind() == TemporalElementKind::Instant).then_some(Instant { element: *self })
    }

    /// The interval specialization, `None` when the kind does not match.
    pub fn as_interval(&self) -> Option<Interval<'a>> {
        (self.kind() == TemporalElementKind::Interval).then_some(Interval { element: *self })
    }
}

impl fmt::Debug for TemporalElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TemporalElement")
            .field("id", &self.id())
            .field("inf", &self.inf())
            .field("sup", &self.sup())
            .field("kind", &self.kind())
            .finish()
    }
}

/// An element specialized as an instant: one granule of its granularity.
#[derive(Clone, Copy)]
pub struct Instant<'a> {
    element: TemporalElement<'a>,
}

impl<'a> Instant<'a> {
    pub fn element(&self) -> TemporalElement<'a> {
        self.element
    }

    pub fn id(&self) -> ElementId {
        self.element.id()
    }

    pub fn inf(&self) -> i64 {
        self.element.inf()
    }

    pub fn sup(&self) -> i64 {
        self.element.sup()
    }
}

/// An element specialized as an interval bounded by two instants.
#[derive(Clone, Copy)]
pub struct Interval<'a> {
    element: TemporalElement<'a>,
}

impl<'a> Interval<'a> {
    pub fn element(&self) -> TemporalElement<'a> {
        self.element
    }

    pub fn id(&self) -> ElementId {
        self.element.id()
    }

    pub fn inf(&self) -> i64 {
        self.element.inf()
    }

    pub fn sup(&self) -> i64 {
        self.element.sup()
    }

    /// The instant this interval begins at, resolved through the element
    /// graph.
    pub fn begin(&self) -> Option<Instant<'a>> {
        self.element.parts().next().and_then(|part| part.as_instant())
    }

    /// The instant this interval ends at.
    pub fn end(&self) -> Option<Instant<'a>> {
        self.element.parts().nth(1).and_then(|part| part.as_instant())
    }
}

// ------------- object view -------------

/// A read-time view over a temporal object row.
#[derive(Clone, Copy)]
pub struct TemporalObject<'a> {
    dataset: &'a TemporalDataset,
    row: usize,
}

impl<'a> TemporalObject<'a> {
    fn object_row(&self) -> &'a ObjectRow {
        &self.dataset.objects[self.row]
    }

    pub fn id(&self) -> ObjectId {
        self.object_row().id
    }

    pub fn element_id(&self) -> ElementId {
        self.object_row().element_id
    }

    /// The temporal element this object occurs at.
    pub fn element(&self) -> Option<TemporalElement<'a>> {
        self.dataset.get_temporal_element(self.element_id())
    }

    pub fn data(&self, column: usize) -> Option<&'a DataValue> {
        self.object_row().data.get(column)
    }

    pub fn data_by_name(&self, name: &str) -> Option<&'a DataValue> {
        self.dataset
            .schema
            .column_index(name)
            .and_then(|column| self.data(column))
    }

    /// The children of this object in the object forest, in link order.
    pub fn children(&self) -> impl Iterator<Item = TemporalObject<'a>> + 'a {
        let dataset = self.dataset;
        self.dataset.object_children[self.row]
            .iter()
            .map(move |&row| TemporalObject {
                dataset,
                row: row as usize,
            })
    }

    pub fn first_child(&self) -> Option<TemporalObject<'a>> {
        self.children().next()
    }

    pub fn parent(&self) -> Option<TemporalObject<'a>> {
        self.dataset.object_parent[self.row].map(|row| TemporalObject {
            dataset: self.dataset,
            row: row as usize,
        })
    }
}

impl fmt::Debug for TemporalObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TemporalObject")
            .field("id", &self.id())
            .field("element_id", &self.element_id())
            .finish()
    }
}
