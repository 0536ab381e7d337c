use chronal::dataset::{
    TemporalDataset, TemporalElementKind, UNANCHORED_INF, UNANCHORED_SUP,
};
use chronal::datatype::{DataKind, DataSchema, DataValue};
use chronal::error::TemporalError;

const DAY: i32 = 4;
const NO_CONTEXT: i32 = -1;

fn setup() -> TemporalDataset {
    let mut schema = DataSchema::new();
    schema
        .add_column("value", DataKind::Long, DataValue::Long(0))
        .unwrap();
    schema
        .add_column("label", DataKind::Text, DataValue::Text(String::new()))
        .unwrap();
    TemporalDataset::with_schema(schema)
}

#[test]
fn reserved_column_names_are_rejected() {
    let mut schema = DataSchema::new();
    assert!(matches!(
        schema.add_column("id", DataKind::Long, DataValue::Long(0)),
        Err(TemporalError::Configuration(_))
    ));
    assert!(matches!(
        schema.add_column("temporal_element_id", DataKind::Long, DataValue::Long(0)),
        Err(TemporalError::Configuration(_))
    ));
    schema
        .add_column("value", DataKind::Long, DataValue::Long(0))
        .unwrap();
    assert!(matches!(
        schema.add_column("value", DataKind::Double, DataValue::Double(0.0)),
        Err(TemporalError::Configuration(_))
    ));
}

#[test]
fn lookups_return_exactly_the_inserted_rows() {
    let mut dataset = setup();
    let mut elements = Vec::new();
    for i in 0..50_i64 {
        elements.push(
            dataset
                .add_instant(i * 1_000, i * 1_000 + 999, DAY, NO_CONTEXT)
                .unwrap(),
        );
    }
    // reads trigger an index build
    for (i, id) in elements.iter().enumerate() {
        let element = dataset.get_temporal_element(*id).unwrap();
        assert_eq!(element.inf(), i as i64 * 1_000);
    }
    // further inserts keep the built index current
    let late = dataset
        .add_instant(99_000, 99_999, DAY, NO_CONTEXT)
        .unwrap();
    for (i, id) in elements.iter().enumerate() {
        assert_eq!(
            dataset.get_temporal_element(*id).unwrap().inf(),
            i as i64 * 1_000
        );
    }
    assert_eq!(dataset.get_temporal_element(late).unwrap().inf(), 99_000);
    assert!(dataset.get_temporal_element(9_999).is_none());
    assert_eq!(dataset.element_count(), 51);
}

#[test]
fn ids_are_assigned_monotonically() {
    let mut dataset = setup();
    let first = dataset.add_instant(0, 0, DAY, NO_CONTEXT).unwrap();
    assert_eq!(first, 1);
    dataset
        .add_temporal_element_with_id(10, 5, 5, DAY, NO_CONTEXT, TemporalElementKind::Instant)
        .unwrap();
    // auto-assignment continues past the caller-supplied maximum
    let next = dataset.add_instant(7, 7, DAY, NO_CONTEXT).unwrap();
    assert_eq!(next, 11);
}

#[test]
fn duplicate_ids_are_domain_errors() {
    let mut dataset = setup();
    let element = dataset.add_instant(0, 0, DAY, NO_CONTEXT).unwrap();
    assert!(matches!(
        dataset.add_temporal_element_with_id(
            element,
            1,
            2,
            DAY,
            NO_CONTEXT,
            TemporalElementKind::Instant
        ),
        Err(TemporalError::Domain(_))
    ));
    let object = dataset.add_temporal_object(element).unwrap();
    assert!(matches!(
        dataset.add_temporal_object_with_id(object, element),
        Err(TemporalError::Domain(_))
    ));
    // the failed inserts left nothing behind
    assert_eq!(dataset.element_count(), 1);
    assert_eq!(dataset.object_count(), 1);
}

#[test]
fn malformed_bounds_are_rejected_except_the_sentinel() {
    let mut dataset = setup();
    assert!(matches!(
        dataset.add_temporal_element(10, 5, DAY, NO_CONTEXT, TemporalElementKind::Instant),
        Err(TemporalError::Domain(_))
    ));
    let span = dataset
        .add_temporal_element(
            UNANCHORED_INF,
            UNANCHORED_SUP,
            DAY,
            NO_CONTEXT,
            TemporalElementKind::Span,
        )
        .unwrap();
    let element = dataset.get_temporal_element(span).unwrap();
    assert!(!element.is_anchored());
}

#[test]
fn objects_must_reference_existing_elements() {
    let mut dataset = setup();
    assert!(matches!(
        dataset.add_temporal_object(42),
        Err(TemporalError::Domain(_))
    ));
    let element = dataset.add_instant(0, 0, DAY, NO_CONTEXT).unwrap();
    let object = dataset.add_temporal_object(element).unwrap();
    assert_eq!(
        dataset.get_temporal_object(object).unwrap().element_id(),
        element
    );
}

#[test]
fn occurrences_by_element() {
    let mut dataset = setup();
    let busy = dataset.add_instant(0, 999, DAY, NO_CONTEXT).unwrap();
    let idle = dataset.add_instant(1_000, 1_999, DAY, NO_CONTEXT).unwrap();
    let a = dataset.add_temporal_object(busy).unwrap();
    let b = dataset.add_temporal_object(busy).unwrap();
    let occurrences: Vec<_> = dataset
        .get_temporal_objects_by_element(busy)
        .iter()
        .map(|object| object.id())
        .collect();
    assert_eq!(occurrences, vec![a, b]);
    // zero occurrences is an empty sequence, not an absent one
    assert!(dataset.get_temporal_objects_by_element(idle).is_empty());
    assert!(dataset.get_temporal_objects_by_element(9_999).is_empty());
}

#[test]
fn intervals_wire_their_endpoints() {
    let mut dataset = setup();
    let begin = dataset.add_instant(0, 999, DAY, NO_CONTEXT).unwrap();
    let end = dataset.add_instant(5_000, 5_999, DAY, NO_CONTEXT).unwrap();
    let interval = dataset.add_interval(begin, end).unwrap();

    let element = dataset.get_temporal_element(interval).unwrap();
    assert_eq!(element.kind(), TemporalElementKind::Interval);
    // bounds are the union of the endpoint bounds
    assert_eq!(element.inf(), 0);
    assert_eq!(element.sup(), 5_999);

    let view = element.as_interval().unwrap();
    assert_eq!(view.begin().unwrap().id(), begin);
    assert_eq!(view.end().unwrap().id(), end);
    assert!(element.as_instant().is_none());

    // endpoints in the wrong order produce malformed bounds
    assert!(matches!(
        dataset.add_interval(end, begin),
        Err(TemporalError::Domain(_))
    ));
}

#[test]
fn span_bounded_intervals_are_unsupported() {
    let mut dataset = setup();
    let instant = dataset.add_instant(0, 0, DAY, NO_CONTEXT).unwrap();
    let span = dataset
        .add_temporal_element(
            UNANCHORED_INF,
            UNANCHORED_SUP,
            DAY,
            NO_CONTEXT,
            TemporalElementKind::Span,
        )
        .unwrap();
    assert!(matches!(
        dataset.add_interval(instant, span),
        Err(TemporalError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        dataset.add_interval(span, instant),
        Err(TemporalError::UnsupportedOperation(_))
    ));
}

#[test]
fn data_fields_and_predicates() {
    let mut dataset = setup();
    let element = dataset.add_instant(0, 0, DAY, NO_CONTEXT).unwrap();
    let small = dataset.add_temporal_object(element).unwrap();
    let large = dataset.add_temporal_object(element).unwrap();
    dataset.set_data(small, 0, DataValue::Long(1)).unwrap();
    dataset.set_data(large, 0, DataValue::Long(100)).unwrap();
    dataset
        .set_data(large, 1, DataValue::Text("large".to_string()))
        .unwrap();

    // kind mismatches are rejected
    assert!(matches!(
        dataset.set_data(small, 0, DataValue::Text("oops".to_string())),
        Err(TemporalError::Domain(_))
    ));

    let object = dataset.get_temporal_object(large).unwrap();
    assert_eq!(object.data_by_name("label").unwrap().as_text(), Some("large"));

    let hits: Vec<_> = dataset
        .temporal_objects_where(|object| {
            object
                .data(0)
                .and_then(DataValue::as_long)
                .is_some_and(|value| value > 10)
        })
        .map(|object| object.id())
        .collect();
    assert_eq!(hits, vec![large]);
    // the traversal restarts cleanly on every call
    assert_eq!(dataset.temporal_objects().count(), 2);
    assert_eq!(dataset.temporal_objects().count(), 2);
}

#[test]
fn object_forest_traversal() {
    let mut dataset = setup();
    let element = dataset.add_instant(0, 999, DAY, NO_CONTEXT).unwrap();
    let root = dataset.add_temporal_object(element).unwrap();
    let left = dataset.add_temporal_object(element).unwrap();
    let right = dataset.add_temporal_object(element).unwrap();
    dataset.link_child(root, left).unwrap();
    dataset.link_child(root, right).unwrap();
    dataset.set_roots(vec![root]);

    assert_eq!(dataset.roots(), Some(&[root][..]));
    let view = dataset.get_temporal_object(root).unwrap();
    assert_eq!(view.first_child().unwrap().id(), left);
    let children: Vec<_> = view.children().map(|child| child.id()).collect();
    assert_eq!(children, vec![left, right]);
    assert_eq!(
        dataset.get_temporal_object(left).unwrap().parent().unwrap().id(),
        root
    );
    assert!(view.parent().is_none());

    // a child has at most one parent
    assert!(matches!(
        dataset.link_child(right, left),
        Err(TemporalError::Domain(_))
    ));
}

#[test]
fn lifespan_ignores_unanchored_elements() {
    let mut dataset = setup();
    assert_eq!(dataset.inf(), None);
    dataset
        .add_temporal_element(
            UNANCHORED_INF,
            UNANCHORED_SUP,
            DAY,
            NO_CONTEXT,
            TemporalElementKind::Span,
        )
        .unwrap();
    assert_eq!(dataset.inf(), None);
    dataset.add_instant(100, 199, DAY, NO_CONTEXT).unwrap();
    dataset.add_instant(-500, -400, DAY, NO_CONTEXT).unwrap();
    assert_eq!(dataset.inf(), Some(-500));
    assert_eq!(dataset.sup(), Some(199));
}

#[test]
fn adding_a_column_extends_existing_objects() {
    let mut dataset = setup();
    let element = dataset.add_instant(0, 0, DAY, NO_CONTEXT).unwrap();
    let object = dataset.add_temporal_object(element).unwrap();
    dataset
        .add_data_column("weight", DataKind::Double, DataValue::Double(1.5))
        .unwrap();
    assert_eq!(
        dataset
            .get_temporal_object(object)
            .unwrap()
            .data_by_name("weight"),
        Some(&DataValue::Double(1.5))
    );
}

#[test]
fn dataset_reports_its_size() {
    let mut dataset = setup();
    let element = dataset.add_instant(0, 0, DAY, NO_CONTEXT).unwrap();
    dataset.add_temporal_object(element).unwrap();
    assert_eq!(
        dataset.to_string(),
        "TemporalDataset [1 temporal elements, 1 temporal objects]"
    );
}
