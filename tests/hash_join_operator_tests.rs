//! Row-batch hash join operator.

mod test_data_gen;

use lazyjoin::prelude::*;
use test_data_gen::{customers, orders};

fn on_id() -> Vec<(String, String)> {
    vec![("id".to_string(), "id".to_string())]
}

fn column<'a>(batch: &'a RowBatch, name: &str) -> &'a [Scalar] {
    &batch.column(name).unwrap().values
}

#[test]
fn test_left_join_customers_orders() {
    let op = HashJoin::new(on_id(), JoinType::Left);
    let out = op.eval_block(&[customers(), orders()]).unwrap();

    let names: Vec<_> = out.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name", "order_id", "id_right", "total"]);
    assert_eq!(out.num_rows(), 5);

    // Int32 and Int64 keys compare by value.
    assert_eq!(
        column(&out, "order_id"),
        &[
            Scalar::I64(101),
            Scalar::I64(100),
            Scalar::I64(102),
            Scalar::Null,
            Scalar::Null,
        ]
    );
    assert_eq!(column(&out, "name")[3], Scalar::from("cy"));
    assert_eq!(column(&out, "name")[4], Scalar::from("nobody"));
}

#[test]
fn test_full_join_appends_unmatched_orders() {
    let op = HashJoin::new(on_id(), JoinType::Full);
    let out = op.eval_block(&[customers(), orders()]).unwrap();

    assert_eq!(out.num_rows(), 6);
    let last = out.num_rows() - 1;
    assert_eq!(column(&out, "id")[last], Scalar::Null);
    assert_eq!(column(&out, "name")[last], Scalar::Null);
    assert_eq!(column(&out, "order_id")[last], Scalar::I64(103));
}

#[test]
fn test_right_join_follows_order_rows() {
    let op = HashJoin::new(on_id(), JoinType::Right);
    let out = op.eval_block(&[customers(), orders()]).unwrap();

    assert_eq!(
        column(&out, "order_id"),
        &[
            Scalar::I64(100),
            Scalar::I64(101),
            Scalar::I64(102),
            Scalar::I64(103),
        ]
    );
    assert_eq!(
        column(&out, "name"),
        &["bob".into(), "ada".into(), "bob".into(), Scalar::Null]
    );
}

#[test]
fn test_null_keys_match_each_other() {
    let left = RowBatch::new(vec![
        Column::new("k", vec![Scalar::Null, Scalar::I64(1)]),
        Column::new("l", vec!["null-left".into(), "one".into()]),
    ]);
    let right = RowBatch::new(vec![
        Column::new("k", vec![Scalar::Null]),
        Column::new("r", vec!["null-right".into()]),
    ]);

    let out = HashJoin::new(vec![("k".into(), "k".into())], JoinType::Inner)
        .eval_block(&[left, right])
        .unwrap();
    assert_eq!(out.num_rows(), 1);
    assert_eq!(column(&out, "l"), &[Scalar::from("null-left")]);
    assert_eq!(column(&out, "r"), &[Scalar::from("null-right")]);
}

#[test]
fn test_composite_keys() {
    let left = RowBatch::new(vec![
        Column::new("a", vec![Scalar::I64(1), Scalar::I64(1), Scalar::I64(2)]),
        Column::new("b", vec!["x".into(), "y".into(), "x".into()]),
    ]);
    let right = RowBatch::new(vec![
        Column::new("a2", vec![Scalar::I64(1), Scalar::I64(2)]),
        Column::new("b2", vec!["y".into(), "y".into()]),
        Column::new("hit", vec![Scalar::Bool(true), Scalar::Bool(false)]),
    ]);

    let op = HashJoin::new(
        vec![
            ("a".into(), "a2".into()),
            ("b".into(), "b2".into()),
        ],
        JoinType::Inner,
    );
    let out = op.eval_block(&[left, right]).unwrap();
    assert_eq!(out.num_rows(), 1);
    assert_eq!(column(&out, "b"), &[Scalar::from("y")]);
    assert_eq!(column(&out, "hit"), &[Scalar::Bool(true)]);
}

#[test]
fn test_missing_key_column_is_reported() {
    let op = HashJoin::new(vec![("id".into(), "customer".into())], JoinType::Inner);
    let err = op.eval_block(&[customers(), orders()]).unwrap_err();
    assert!(matches!(err, OpError::Join(JoinError::Construction(_))));
}

#[test]
fn test_no_key_columns_is_construction_error() {
    let op = HashJoin::new(Vec::new(), JoinType::Inner);
    let err = op.eval_block(&[customers(), orders()]).unwrap_err();
    assert!(matches!(err, OpError::Join(JoinError::Construction(_))));
}

#[test]
fn test_capacity_guard_applies_to_batches() {
    let op = HashJoin::new(on_id(), JoinType::Inner)
        .with_config(JoinConfig::default().with_max_index_rows(2));
    let err = op.eval_block(&[customers(), orders()]).unwrap_err();
    assert!(matches!(
        err,
        OpError::Join(JoinError::IndexCapacity { limit: 2 })
    ));
}

#[test]
fn test_plan_matches_eval_output() {
    let left_schema = Schema::new(vec![
        Field::new("id", DataType::Int64, true),
        Field::new("name", DataType::Utf8, false),
    ]);
    let right_schema = Schema::new(vec![
        Field::new("order_id", DataType::Int64, false),
        Field::new("id", DataType::Int64, false),
        Field::new("total", DataType::Float64, false),
    ]);

    let op = HashJoin::new(on_id(), JoinType::Full)
        .with_config(JoinConfig {
            right_suffix: "_o".into(),
            ..JoinConfig::default()
        });
    assert_eq!(op.name(), "join_hash");

    let plan = op.plan(&[left_schema, right_schema]).unwrap();
    let out = op.eval_block(&[customers(), orders()]).unwrap();

    let planned: Vec<_> = plan.output_schema.fields.iter().map(|f| f.name.clone()).collect();
    let produced: Vec<_> = out.columns.iter().map(|c| c.name.clone()).collect();
    assert_eq!(planned, produced);
    assert!(plan.output_schema.fields.iter().all(|f| f.nullable));
    assert!(op.memory_need(1_000).estimate_live(1_000) > 0);
}
