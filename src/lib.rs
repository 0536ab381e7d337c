//! Chronal – the analytical core of a temporal-data visualization stack.
//!
//! Chronal models *temporal data*: facts anchored to points or spans on a
//! calendar, organized so that overlap queries, granularity conversions and
//! hierarchical time-based aggregation can be computed efficiently:
//! * A [`calendar::Granularity`] names a partition of the chronon axis
//!   (a chronon is a millisecond on a timezone-free Gregorian axis),
//!   optionally relative to a coarser context granularity.
//! * A [`calendar::Granule`] is one cell of such a partition: absolute
//!   bounds plus an ordinal identifier, computed by the immutable
//!   [`calendar::Calendar`] engine.
//! * A [`dataset::TemporalDataset`] keeps temporal elements (instants,
//!   intervals, spans, sets on the axis) and temporal objects (facts
//!   occurring at an element) in two related arenas with lookup indexes.
//! * An [`interval::IntervalTree`] answers overlap and containment queries
//!   over the anchored elements without a full scan.
//! * An [`aggregate::AggregationTreeBuilder`] rolls facts up through a
//!   coarse-to-fine granularity list into a tree of mean-aggregated
//!   branches with per-level minimum/maximum statistics.
//!
//! ## Modules
//! * [`calendar`] – granularities, granules and chronon conversions.
//! * [`interval`] – the comparator-ordered interval index.
//! * [`datatype`] – typed data values and the data-column schema.
//! * [`dataset`] – the temporal data model.
//! * [`aggregate`] – the hierarchical aggregation builder.
//! * [`error`] – the crate-wide error taxonomy.
//!
//! ## Quick Start
//! ```
//! use chronal::calendar::{Calendar, Granularity, GranularityKind};
//! use chronal::dataset::TemporalDataset;
//!
//! let calendar = Calendar::gregorian();
//! let day = Granularity::new(GranularityKind::Day);
//! let granule = calendar.granule_at(1_700_000_000_000, day).unwrap();
//!
//! let mut dataset = TemporalDataset::new();
//! let element = dataset.add_instant_granule(&granule).unwrap();
//! let object = dataset.add_temporal_object(element).unwrap();
//! assert_eq!(
//!     dataset.get_temporal_object(object).unwrap().element_id(),
//!     element
//! );
//! ```
//!
//! ## Concurrency
//! The core is single-threaded and synchronous. Mutation must be serialized
//! by the embedding application; read queries may run concurrently with each
//! other but not with mutation. The interval index is an explicit opt-in
//! cache with manual invalidation.

pub mod aggregate;
pub mod calendar;
pub mod dataset;
pub mod datatype;
pub mod error;
pub mod interval;
