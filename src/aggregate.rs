//! Hierarchical aggregation of temporal objects along a granularity list.
//!
//! Given a source dataset and a sequence of granularities ordered coarse to
//! fine, the builder produces a new [`TemporalDataset`] whose object tree
//! has one synthetic root (spanning the source lifespan at the `Top`
//! granularity), one level per granularity, and the source facts as leaves.
//! Numeric columns are mean-aggregated bottom-up; per-(column, level)
//! minimum and maximum statistics are tracked on the side for consumers
//! that scale visual encodings.

use tracing::{debug, info};

use crate::calendar::{Calendar, Granularity, GranularityKind, NO_GRANULARITY_ID};
use crate::dataset::{ObjectId, TemporalDataset, TemporalElementKind, TemporalObject};
use crate::datatype::{DataKind, DataSchema, DataValue};
use crate::error::{Result, TemporalError};

// One source fact, detached from its dataset so the working tree can be
// built without holding a borrow on the source.
struct Fact {
    inf: i64,
    sup: i64,
    granularity_id: i32,
    granularity_context_id: i32,
    kind: TemporalElementKind,
    data: Vec<DataValue>,
}

struct Branch {
    object: ObjectId,
    inf: i64,
    sup: i64,
    facts: Vec<Fact>,
}

/// Builds aggregation trees over a calendar and a fixed level list.
pub struct AggregationTreeBuilder<'a> {
    calendar: &'a Calendar,
    levels: Vec<Granularity>,
}

impl<'a> AggregationTreeBuilder<'a> {
    /// The levels run coarse to fine and must not be empty.
    pub fn new(calendar: &'a Calendar, levels: Vec<Granularity>) -> Result<Self> {
        if levels.is_empty() {
            return Err(TemporalError::Configuration(
                "at least one aggregation level is required".to_string(),
            ));
        }
        Ok(Self { calendar, levels })
    }

    pub fn levels(&self) -> &[Granularity] {
        &self.levels
    }

    /// Builds the aggregation tree for the given source dataset.
    ///
    /// Every source fact must be anchored and mappable at every level; an
    /// element the level list cannot cover is a hard construction error.
    /// An empty source still produces a root-only tree whose statistics
    /// are all-NaN.
    pub fn build(&self, source: &TemporalDataset) -> Result<AggregationTree> {
        let schema = working_schema(source.schema())?;
        let mut working = TemporalDataset::with_schema(schema);

        let mut facts = Vec::with_capacity(source.object_count());
        for object in source.temporal_objects() {
            facts.push(self.detach_fact(source, &object)?);
        }
        debug!(
            facts = facts.len(),
            levels = self.levels.len(),
            "building aggregation tree"
        );

        let (root_inf, root_sup) = match (source.inf(), source.sup()) {
            (Some(inf), Some(sup)) => (inf, sup),
            _ => (0, 0),
        };
        let root_element = working.add_temporal_element(
            root_inf,
            root_sup,
            GranularityKind::Top.id(),
            NO_GRANULARITY_ID,
            TemporalElementKind::Interval,
        )?;
        let root = working.add_temporal_object(root_element)?;

        let mut current = vec![Branch {
            object: root,
            inf: root_inf,
            sup: root_sup,
            facts,
        }];
        for granularity in &self.levels {
            let mut next: Vec<Branch> = Vec::new();
            for parent in current {
                let first_child = next.len();
                for fact in parent.facts {
                    // innermost containing branch wins, scanned newest
                    // first; otherwise the fact opens a new branch keyed by
                    // the granule enclosing its lower bound
                    let slot = next[first_child..]
                        .iter()
                        .rposition(|branch| branch.inf <= fact.inf && branch.sup >= fact.sup)
                        .map(|offset| first_child + offset);
                    let slot = match slot {
                        Some(slot) => slot,
                        None => {
                            let granule = self.calendar.granule_at(fact.inf, *granularity)?;
                            let element = working.add_instant_granule(&granule)?;
                            let object = working.add_temporal_object(element)?;
                            working.link_child(parent.object, object)?;
                            next.push(Branch {
                                object,
                                inf: granule.inf(),
                                sup: granule.sup(),
                                facts: Vec::new(),
                            });
                            next.len() - 1
                        }
                    };
                    next[slot].facts.push(fact);
                }
            }
            current = next;
        }

        // the source facts become the leaves under their finest branch
        for branch in current {
            for fact in branch.facts {
                let element = working.add_temporal_element(
                    fact.inf,
                    fact.sup,
                    fact.granularity_id,
                    fact.granularity_context_id,
                    fact.kind,
                )?;
                let object = working.add_temporal_object(element)?;
                for (column, value) in fact.data.into_iter().enumerate() {
                    working.set_data(object, column, value)?;
                }
                working.link_child(branch.object, object)?;
            }
        }
        working.set_roots(vec![root]);

        let columns = working.schema().len();
        let mut min_values = initial_statistics(working.schema(), self.levels.len());
        let mut max_values = initial_statistics(working.schema(), self.levels.len());
        self.aggregate_branch(&mut working, root, -1, &mut min_values, &mut max_values)?;

        info!(
            objects = working.object_count(),
            columns,
            levels = self.levels.len(),
            "aggregation tree built"
        );
        Ok(AggregationTree {
            dataset: working,
            levels: self.levels.clone(),
            min_values,
            max_values,
        })
    }

    fn detach_fact(&self, source: &TemporalDataset, object: &TemporalObject) -> Result<Fact> {
        let element = object.element().ok_or_else(|| {
            TemporalError::Domain(format!(
                "temporal object {} has no resolvable element",
                object.id()
            ))
        })?;
        if !element.is_anchored() {
            return Err(TemporalError::Domain(format!(
                "temporal element {} is unanchored and cannot be aggregated",
                element.id()
            )));
        }
        Ok(Fact {
            inf: element.inf(),
            sup: element.sup(),
            granularity_id: element.granularity_id(),
            granularity_context_id: element.granularity_context_id(),
            kind: element.kind(),
            data: coerced_row(source.schema(), object),
        })
    }

    // Bottom-up: a branch aggregates from the values of its own children,
    // never from the source. `level` is the branch's own granularity level;
    // the root sits above level 0 and records no statistics.
    fn aggregate_branch(
        &self,
        working: &mut TemporalDataset,
        object: ObjectId,
        level: isize,
        min_values: &mut [Vec<Option<f64>>],
        max_values: &mut [Vec<Option<f64>>],
    ) -> Result<()> {
        let children: Vec<ObjectId> = working
            .get_temporal_object(object)
            .map(|object| object.children().map(|child| child.id()).collect())
            .unwrap_or_default();
        if children.is_empty() {
            return Ok(());
        }
        for &child in &children {
            self.aggregate_branch(working, child, level + 1, min_values, max_values)?;
        }

        let columns = working.schema().len();
        for column in 0..columns {
            let numeric = working
                .schema()
                .column(column)
                .map(|declared| declared.kind().is_numeric())
                .unwrap_or(false);
            if !numeric {
                continue;
            }
            let mut total = 0.0;
            let mut count = 0usize;
            for &child in &children {
                let value = working
                    .get_temporal_object(child)
                    .and_then(|child| child.data(column))
                    .and_then(DataValue::as_double);
                match value {
                    // NaN children carry no data and are skipped
                    Some(value) if !value.is_nan() => {
                        total += value;
                        count += 1;
                        if let Ok(level) = usize::try_from(level) {
                            fold_min(&mut min_values[column][level], value);
                            fold_max(&mut max_values[column][level], value);
                        }
                    }
                    _ => {}
                }
            }
            if count > 0 {
                working.set_data(object, column, DataValue::Double(total / count as f64))?;
            } else {
                working.set_data(object, column, DataValue::Double(f64::NAN))?;
                if let Ok(level) = usize::try_from(level) {
                    min_values[column][level] = Some(f64::NAN);
                    max_values[column][level] = Some(f64::NAN);
                }
            }
        }
        Ok(())
    }
}

/// The result of an aggregation run: the working dataset holding the object
/// tree plus the per-(column, level) statistics.
pub struct AggregationTree {
    dataset: TemporalDataset,
    levels: Vec<Granularity>,
    // [column][level]
    min_values: Vec<Vec<Option<f64>>>,
    max_values: Vec<Vec<Option<f64>>>,
}

impl AggregationTree {
    pub fn dataset(&self) -> &TemporalDataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> TemporalDataset {
        self.dataset
    }

    pub fn levels(&self) -> &[Granularity] {
        &self.levels
    }

    /// The minimum child value consumed by branches at the given level, for
    /// the given column. `None` when the pair was never populated; NaN when
    /// branches at the level had no data for the column.
    pub fn min_value(&self, level: usize, column: usize) -> Option<f64> {
        self.min_values
            .get(column)
            .and_then(|cells| cells.get(level))
            .copied()
            .flatten()
    }

    /// The maximum child value consumed by branches at the given level.
    pub fn max_value(&self, level: usize, column: usize) -> Option<f64> {
        self.max_values
            .get(column)
            .and_then(|cells| cells.get(level))
            .copied()
            .flatten()
    }
}

// The working schema widens integral columns to doubles, since branch
// values are means of their children.
fn working_schema(source: &DataSchema) -> Result<DataSchema> {
    let mut schema = DataSchema::new();
    for column in source.columns() {
        match column.kind() {
            DataKind::Long => {
                let default = column.default_value().as_double().unwrap_or(f64::NAN);
                schema.add_column(column.name(), DataKind::Double, DataValue::Double(default))?;
            }
            kind => schema.add_column(column.name(), kind, column.default_value().clone())?,
        }
    }
    Ok(schema)
}

fn coerced_row(schema: &DataSchema, object: &TemporalObject) -> Vec<DataValue> {
    schema
        .columns()
        .enumerate()
        .map(|(index, column)| {
            let value = object
                .data(index)
                .cloned()
                .unwrap_or_else(|| column.default_value().clone());
            match column.kind() {
                DataKind::Long => DataValue::Double(value.as_double().unwrap_or(f64::NAN)),
                _ => value,
            }
        })
        .collect()
}

fn initial_statistics(schema: &DataSchema, levels: usize) -> Vec<Vec<Option<f64>>> {
    schema
        .columns()
        .map(|column| {
            if column.kind().is_numeric() {
                vec![Some(f64::NAN); levels]
            } else {
                vec![None; levels]
            }
        })
        .collect()
}

// f64::min and f64::max return the other operand for NaN, so the NaN
// placeholder is replaced by the first real value
fn fold_min(cell: &mut Option<f64>, value: f64) {
    *cell = Some(cell.map_or(value, |current| current.min(value)));
}

fn fold_max(cell: &mut Option<f64>, value: f64) {
    *cell = Some(cell.map_or(value, |current| current.max(value)));
}
