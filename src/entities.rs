//! Entity page declarations: resource name, title and displayed columns for
//! every record type the console manages.

use crate::schema::{Column, Schema, SchemaInfo, ValueKind};

pub struct Employee;
pub struct Department;
pub struct Location;
pub struct Tier;

impl Schema for Employee {
    const RESOURCE: &'static str = "employee";
    const TITLE: &'static str = "Employees";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::new("id", "ID").kind(ValueKind::Number),
            Column::new("empNo", "Emp No"),
            Column::new("name", "Name"),
            Column::new("deptCode", "Dept Code"),
            Column::new("locationId", "Location Id").kind(ValueKind::Number),
            Column::new("position", "Position"),
            Column::new("salary", "Salary").kind(ValueKind::Decimal),
        ];
        COLUMNS
    }
}

impl Schema for Department {
    const RESOURCE: &'static str = "department";
    const TITLE: &'static str = "Departments";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::new("id", "ID").kind(ValueKind::Number),
            Column::new("code", "Code"),
            Column::new("name", "Name"),
        ];
        COLUMNS
    }
}

impl Schema for Location {
    const RESOURCE: &'static str = "location";
    const TITLE: &'static str = "Locations";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::new("id", "ID").kind(ValueKind::Number),
            Column::new("code", "Code"),
            Column::new("name", "Name"),
        ];
        COLUMNS
    }
}

impl Schema for Tier {
    const RESOURCE: &'static str = "tier";
    const TITLE: &'static str = "Tiers";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::new("id", "ID").kind(ValueKind::Number),
            Column::new("code", "Code"),
            Column::new("name", "Name"),
        ];
        COLUMNS
    }
}

/// Every managed entity, in navigation order.
pub fn all() -> [SchemaInfo; 4] {
    [
        Employee::info(),
        Department::info(),
        Location::info(),
        Tier::info(),
    ]
}

/// Find an entity by its resource name.
pub fn lookup(resource: &str) -> Option<SchemaInfo> {
    all().into_iter().find(|info| info.resource == resource)
}
