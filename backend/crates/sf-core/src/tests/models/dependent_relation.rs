use crate::DependentRelation;

use googletest::prelude::*;

#[test]
fn given_plain_identifiers_when_created_then_ok() {
    let relation = DependentRelation::new("user_roles", "assigned_by").unwrap();

    assert_that!(relation.table(), eq("user_roles"));
    assert_that!(relation.column(), eq("assigned_by"));
    assert_that!(relation.to_string(), eq("user_roles.assigned_by"));
}

#[test]
fn given_injection_attempts_when_created_then_rejected() {
    for (table, column) in [
        ("orders; DROP TABLE users", "user_id"),
        ("orders", "user_id = user_id --"),
        ("", "user_id"),
        ("orders", ""),
        ("1orders", "user_id"),
        ("\"orders\"", "user_id"),
    ] {
        assert_that!(
            DependentRelation::new(table, column),
            err(anything()),
            "input: {table:?}.{column:?}"
        );
    }
}
