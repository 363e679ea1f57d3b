use crate::CanonicalSource;

use googletest::prelude::*;

#[test]
fn given_each_source_when_serialized_then_lowercase_name() {
    assert_that!(
        serde_json::to_string(&CanonicalSource::Provider).unwrap(),
        eq("\"provider\"")
    );
    assert_that!(
        serde_json::to_string(&CanonicalSource::Local).unwrap(),
        eq("\"local\"")
    );
    assert_that!(CanonicalSource::New.to_string(), eq("new"));
}
