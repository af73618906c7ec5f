//! The predefined reports, computed over the in-memory store.
//!
//! Column names follow the reporting contract (`snake_case`). Comparisons
//! involving a null never match, and sums or averages over no values are
//! null.

use super::error::ServerError;
use super::store::MemoryStore;
use crate::record::Fields;
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

pub fn run(store: &MemoryStore, name: &str) -> Result<Vec<Value>, ServerError> {
    match name {
        "q1" => Ok(cumulative_salary(store)),
        "q2" => Ok(dept_analysis(store)),
        "q3" => Ok(salary_ranking(store)),
        _ => Err(ServerError::NotFound),
    }
}

fn text<'a>(row: &'a Fields, key: &str) -> Option<&'a str> {
    row.get(key).and_then(Value::as_str)
}

fn number(row: &Fields, key: &str) -> Option<f64> {
    row.get(key).and_then(Value::as_f64)
}

/// Ascending order with nulls last.
fn nulls_last<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Descending order with nulls last.
fn salary_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// q1: running salary total per department in employee-number order.
pub fn cumulative_salary(store: &MemoryStore) -> Vec<Value> {
    let mut employees: Vec<&Fields> = store.rows("employee").collect();
    employees.sort_by(|a, b| {
        nulls_last(text(a, "deptCode"), text(b, "deptCode"))
            .then_with(|| nulls_last(text(a, "empNo"), text(b, "empNo")))
    });

    employees
        .iter()
        .map(|e| {
            let dept = text(e, "deptCode");
            let emp_no = text(e, "empNo");
            let salaries: Vec<f64> = match (dept, emp_no) {
                (Some(dept), Some(emp_no)) => store
                    .rows("employee")
                    .filter(|x| text(x, "deptCode") == Some(dept))
                    .filter(|x| text(x, "empNo").is_some_and(|n| n <= emp_no))
                    .filter_map(|x| number(x, "salary"))
                    .collect(),
                _ => Vec::new(),
            };
            let total = (!salaries.is_empty()).then(|| salaries.iter().sum::<f64>());
            json!({
                "dept_code": dept,
                "emp_no": emp_no,
                "emp_name": text(e, "name"),
                "cumulative_salary": total,
            })
        })
        .collect()
}

/// q2: per location, the department with most employees there, its head
/// count and the location's average salary.
pub fn dept_analysis(store: &MemoryStore) -> Vec<Value> {
    let departments: HashMap<&str, Option<&str>> = store
        .rows("department")
        .filter_map(|d| text(d, "code").map(|code| (code, text(d, "name"))))
        .collect();

    store
        .rows("location")
        .map(|location| {
            let location_id = location.get("id").and_then(Value::as_i64);
            let here: Vec<&Fields> = store
                .rows("employee")
                .filter(|e| {
                    location_id.is_some()
                        && e.get("locationId").and_then(Value::as_i64) == location_id
                })
                .collect();

            // counted per department name
            let mut counts: HashMap<Option<&str>, usize> = HashMap::new();
            for e in &here {
                if let Some(name) = text(e, "deptCode").and_then(|c| departments.get(c)) {
                    *counts.entry(*name).or_default() += 1;
                }
            }
            // ties go to the alphabetically first department name
            let top = counts
                .into_iter()
                .max_by(|(a_name, a), (b_name, b)| a.cmp(b).then_with(|| nulls_last(*b_name, *a_name)));

            let salaries: Vec<f64> = here.iter().filter_map(|e| number(e, "salary")).collect();
            let average = (!salaries.is_empty())
                .then(|| round2(salaries.iter().sum::<f64>() / salaries.len() as f64));

            json!({
                "location_name": text(location, "name"),
                "dept_with_most_employees": top.and_then(|(name, _)| name),
                "dept_employee_count": top.map(|(_, count)| count).unwrap_or(0),
                "avg_salary_of_lowest_dept": average,
            })
        })
        .collect()
}

/// q3: salary rank and gap to the best paid colleague within each
/// (location, department) group.
pub fn salary_ranking(store: &MemoryStore) -> Vec<Value> {
    let department_names: HashMap<&str, Option<&str>> = store
        .rows("department")
        .filter_map(|d| text(d, "code").map(|code| (code, text(d, "name"))))
        .collect();
    let location_names: HashMap<i64, Option<&str>> = store
        .rows("location")
        .filter_map(|l| l.get("id").and_then(Value::as_i64).map(|id| (id, text(l, "name"))))
        .collect();

    let mut rows: Vec<(Option<&str>, Option<&str>, &Fields)> = store
        .rows("employee")
        .map(|e| {
            let location = e
                .get("locationId")
                .and_then(Value::as_i64)
                .and_then(|id| location_names.get(&id).copied().flatten());
            let department = text(e, "deptCode")
                .and_then(|code| department_names.get(code).copied().flatten());
            (location, department, e)
        })
        .collect();
    rows.sort_by(|a, b| {
        nulls_last(a.0, b.0)
            .then_with(|| nulls_last(a.1, b.1))
            .then_with(|| salary_desc(number(a.2, "salary"), number(b.2, "salary")))
    });

    rows.iter()
        .map(|(location, department, e)| {
            let salary = number(e, "salary");
            let higher: BTreeSet<u64> = match (salary, e.get("locationId"), text(e, "deptCode")) {
                (Some(salary), Some(loc), Some(dept)) if !loc.is_null() => store
                    .rows("employee")
                    .filter(|s| s.get("locationId") == Some(loc) && text(s, "deptCode") == Some(dept))
                    .filter_map(|s| number(s, "salary"))
                    .filter(|s| *s > salary)
                    .map(f64::to_bits)
                    .collect(),
                _ => BTreeSet::new(),
            };
            let top = higher.iter().map(|bits| f64::from_bits(*bits)).reduce(f64::max);
            let gap = match (top, salary) {
                (Some(top), Some(salary)) => round2(top - salary),
                _ => 0.0,
            };

            json!({
                "location_name": location,
                "department_name": department,
                "employee_name": text(e, "name"),
                "position_name": text(e, "position"),
                "salary": salary,
                "salary_rank": 1 + higher.len(),
                "salary_gap": gap,
            })
        })
        .collect()
}
