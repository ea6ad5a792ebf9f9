//! Sequence pipelines feeding joins.

use std::cell::RefCell;

use lazyjoin::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Employee {
    name: &'static str,
    dept: u32,
    salary: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct Dept {
    id: u32,
    title: &'static str,
}

fn employees() -> Vec<Employee> {
    vec![
        Employee { name: "ann", dept: 1, salary: 120 },
        Employee { name: "ben", dept: 2, salary: 90 },
        Employee { name: "cat", dept: 1, salary: 80 },
        Employee { name: "dan", dept: 7, salary: 70 },
    ]
}

fn depts() -> Vec<Dept> {
    vec![
        Dept { id: 1, title: "eng" },
        Dept { id: 2, title: "ops" },
        Dept { id: 3, title: "legal" },
    ]
}

#[test]
fn test_filter_then_join() {
    let rows: Vec<_> = Pipeline::new(employees())
        .filter(|e| e.salary >= 80)
        .join(|e| e.dept, depts(), |d| d.id, JoinType::Inner)
        .into_iter()
        .map(|r| r.unwrap())
        .map(|r| (r.left().unwrap().name, r.right().unwrap().title))
        .collect();

    assert_eq!(rows, vec![("ann", "eng"), ("ben", "ops"), ("cat", "eng")]);
}

#[test]
fn test_join_output_feeds_another_pipeline() {
    let payroll = Pipeline::new(employees())
        .join(|e| e.dept, depts(), |d| d.id, JoinType::Full)
        .into_iter()
        .filter_map(Result::ok)
        .collect::<Vec<_>>();

    let without_dept = Pipeline::new(payroll.iter())
        .filter(|r| r.right().is_none())
        .map(|r| r.left().unwrap().name)
        .materialize();
    assert_eq!(without_dept.as_slice(), &["dan"]);

    let empty_depts: Vec<_> = Pipeline::new(payroll.iter())
        .filter(|r| r.left().is_none())
        .map(|r| r.right().unwrap().title)
        .collect();
    assert_eq!(empty_depts, vec!["legal"]);

    let total = Pipeline::new(payroll)
        .filter_map(|r| r.left().map(|e| e.salary))
        .sum::<u32>();
    assert_eq!(total, 360);
}

#[test]
fn test_each_observes_only_pulled_elements() {
    let seen = RefCell::new(Vec::new());
    let mut p = Pipeline::new(1..=10).each(|x| seen.borrow_mut().push(*x));

    assert_eq!(p.next(), Some(1));
    assert_eq!(p.next(), Some(2));
    assert_eq!(*seen.borrow(), vec![1, 2]);
}

#[test]
fn test_materialized_can_be_reiterated_and_joined() {
    let sorted = Pipeline::new(employees()).sorted_by(|a, b| b.salary.cmp(&a.salary));
    let names: Vec<_> = sorted.iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["ann", "ben", "cat", "dan"]);

    // A materialized view can drive more than one join.
    for _ in 0..2 {
        let n = sorted
            .pipeline()
            .join(|e| e.dept, depts(), |d| d.id, JoinType::Left)
            .collect_results()
            .unwrap()
            .len();
        assert_eq!(n, 4);
    }
    assert_eq!(sorted.len(), 4);
}

#[test]
fn test_slice_and_reduce() {
    let top_two = Pipeline::new(employees())
        .sorted_by_key(|e| std::cmp::Reverse(e.salary))
        .pipeline()
        .slice(0, 2)
        .reduce(0, |acc, e| acc + e.salary);
    assert_eq!(top_two, 210);
}

#[test]
fn test_peek_before_join() {
    let mut p = Pipeline::new(employees()).peekable();
    assert_eq!(p.peek().map(|e| e.name), Some("ann"));

    let visited = p
        .join(|e| e.dept, depts(), |d| d.id, JoinType::Inner)
        .into_iter()
        .filter(Result::is_ok)
        .count();
    assert_eq!(visited, 3);
}

#[test]
fn test_visit_counts() {
    let mut titles = Vec::new();
    let n = Pipeline::new(depts()).visit(|d| titles.push(d.title));
    assert_eq!(n, 3);
    assert_eq!(titles, vec!["eng", "ops", "legal"]);
}
