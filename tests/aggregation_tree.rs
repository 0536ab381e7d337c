use chronal::aggregate::AggregationTreeBuilder;
use chronal::calendar::{Calendar, Granularity, GranularityKind};
use chronal::dataset::{TemporalDataset, TemporalObject};
use chronal::datatype::{DataKind, DataSchema, DataValue};
use chronal::error::TemporalError;
use chrono::NaiveDate;

const DAY: i32 = 4;
const NO_CONTEXT: i32 = -1;

fn chronon(year: i32, month: u32, day: u32) -> i64 {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

fn source_with_values(dates: &[(i32, u32, u32)], values: &[f64]) -> TemporalDataset {
    let mut schema = DataSchema::new();
    schema
        .add_column("value", DataKind::Double, DataValue::Double(0.0))
        .unwrap();
    schema
        .add_column("label", DataKind::Text, DataValue::Text(String::new()))
        .unwrap();
    let mut dataset = TemporalDataset::with_schema(schema);
    for ((year, month, day), value) in dates.iter().zip(values) {
        let c = chronon(*year, *month, *day);
        let element = dataset.add_instant(c, c, DAY, NO_CONTEXT).unwrap();
        let object = dataset.add_temporal_object(element).unwrap();
        dataset
            .set_data(object, 0, DataValue::Double(*value))
            .unwrap();
    }
    dataset
}

fn year_month_levels() -> Vec<Granularity> {
    vec![
        Granularity::new(GranularityKind::Year),
        Granularity::new(GranularityKind::Month),
    ]
}

fn value_of(object: &TemporalObject) -> f64 {
    object.data(0).and_then(DataValue::as_double).unwrap()
}

#[test]
fn three_facts_in_one_month() {
    let calendar = Calendar::gregorian();
    let source = source_with_values(
        &[(2023, 11, 3), (2023, 11, 14), (2023, 11, 27)],
        &[10.0, 20.0, 30.0],
    );
    let builder = AggregationTreeBuilder::new(&calendar, year_month_levels()).unwrap();
    let tree = builder.build(&source).unwrap();
    let dataset = tree.dataset();

    // 1 root -> 1 year -> 1 month -> 3 leaves
    let roots = dataset.roots().unwrap();
    assert_eq!(roots.len(), 1);
    let root = dataset.get_temporal_object(roots[0]).unwrap();
    assert_eq!(root.children().count(), 1);
    let year = root.first_child().unwrap();
    assert_eq!(year.children().count(), 1);
    let month = year.first_child().unwrap();
    assert_eq!(month.children().count(), 3);
    assert_eq!(dataset.object_count(), 6);

    // the month branch mean is the arithmetic mean of the three facts
    assert_eq!(value_of(&month), 20.0);
    assert_eq!(value_of(&year), 20.0);
    assert_eq!(value_of(&root), 20.0);

    // the month element spans all of November
    let element = month.element().unwrap();
    assert_eq!(element.inf(), NaiveDate::from_ymd_opt(2023, 11, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis());

    // statistics: leaves feed the month level, month means feed the year level
    assert_eq!(tree.min_value(1, 0), Some(10.0));
    assert_eq!(tree.max_value(1, 0), Some(30.0));
    assert_eq!(tree.min_value(0, 0), Some(20.0));
    assert_eq!(tree.max_value(0, 0), Some(20.0));
    // the text column never populates statistics
    assert_eq!(tree.min_value(0, 1), None);
    // out-of-range pairs are absent
    assert_eq!(tree.min_value(5, 0), None);
    assert_eq!(tree.min_value(0, 9), None);
}

#[test]
fn facts_partition_exactly_once() {
    let calendar = Calendar::gregorian();
    let source = source_with_values(
        &[
            (2023, 1, 10),
            (2023, 1, 20),
            (2023, 2, 5),
            (2024, 3, 1),
            (2024, 3, 31),
        ],
        &[1.0, 2.0, 3.0, 4.0, 5.0],
    );
    let builder = AggregationTreeBuilder::new(&calendar, year_month_levels()).unwrap();
    let tree = builder.build(&source).unwrap();
    let dataset = tree.dataset();

    let root = dataset
        .get_temporal_object(dataset.roots().unwrap()[0])
        .unwrap();
    assert_eq!(root.children().count(), 2, "two year branches");

    // collect leaf values by walking the tree; every fact appears exactly once
    let mut leaves = Vec::new();
    let mut stack = vec![root];
    while let Some(object) = stack.pop() {
        let mut any_child = false;
        for child in object.children() {
            any_child = true;
            stack.push(child);
        }
        if !any_child {
            leaves.push(value_of(&object));
        }
    }
    leaves.sort_by(f64::total_cmp);
    assert_eq!(leaves, vec![1.0, 2.0, 3.0, 4.0, 5.0]);

    // every leaf has an unbroken ancestor chain up to the root
    for object in dataset.temporal_objects() {
        if object.first_child().is_none() {
            let mut cursor = object;
            let mut depth = 0;
            while let Some(parent) = cursor.parent() {
                cursor = parent;
                depth += 1;
            }
            assert_eq!(depth, 3, "leaf sits below root -> year -> month");
        }
    }

    // January 2023 aggregates 1.0 and 2.0
    assert_eq!(tree.min_value(1, 0), Some(1.0));
    assert_eq!(tree.max_value(1, 0), Some(5.0));
}

#[test]
fn empty_source_builds_a_root_only_tree() {
    let calendar = Calendar::gregorian();
    let source = source_with_values(&[], &[]);
    let builder = AggregationTreeBuilder::new(&calendar, year_month_levels()).unwrap();
    let tree = builder.build(&source).unwrap();
    let dataset = tree.dataset();

    assert_eq!(dataset.object_count(), 1);
    let root = dataset
        .get_temporal_object(dataset.roots().unwrap()[0])
        .unwrap();
    assert_eq!(root.children().count(), 0);
    // numeric statistics carry the no-data sentinel
    assert!(tree.min_value(0, 0).unwrap().is_nan());
    assert!(tree.max_value(1, 0).unwrap().is_nan());
}

#[test]
fn long_columns_widen_to_double_means() {
    let calendar = Calendar::gregorian();
    let mut schema = DataSchema::new();
    schema
        .add_column("count", DataKind::Long, DataValue::Long(0))
        .unwrap();
    let mut source = TemporalDataset::with_schema(schema);
    for (day, value) in [(3, 1_i64), (4, 2)] {
        let c = chronon(2023, 11, day);
        let element = source.add_instant(c, c, DAY, NO_CONTEXT).unwrap();
        let object = source.add_temporal_object(element).unwrap();
        source.set_data(object, 0, DataValue::Long(value)).unwrap();
    }
    let builder = AggregationTreeBuilder::new(&calendar, year_month_levels()).unwrap();
    let tree = builder.build(&source).unwrap();
    let dataset = tree.dataset();
    let root = dataset
        .get_temporal_object(dataset.roots().unwrap()[0])
        .unwrap();
    // the mean of 1 and 2 is representable only after widening
    assert_eq!(value_of(&root), 1.5);
    assert_eq!(
        dataset.schema().column(0).unwrap().kind(),
        DataKind::Double
    );
}

#[test]
fn uncoverable_levels_are_construction_errors() {
    let calendar = Calendar::gregorian();
    let source = source_with_values(&[(2023, 11, 14)], &[1.0]);
    // week-in-month has no well-defined identifier
    let levels = vec![Granularity::within(
        GranularityKind::Week,
        GranularityKind::Month,
    )];
    let builder = AggregationTreeBuilder::new(&calendar, levels).unwrap();
    assert!(matches!(
        builder.build(&source),
        Err(TemporalError::UnsupportedGranularity { .. })
    ));
}

#[test]
fn at_least_one_level_is_required() {
    let calendar = Calendar::gregorian();
    assert!(matches!(
        AggregationTreeBuilder::new(&calendar, Vec::new()),
        Err(TemporalError::Configuration(_))
    ));
}
