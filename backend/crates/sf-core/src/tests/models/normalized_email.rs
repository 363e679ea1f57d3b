use crate::{IdentityId, NormalizedEmail};

use googletest::prelude::*;
use proptest::prelude::*;

#[test]
fn given_mixed_case_padded_email_when_parsed_then_trimmed_and_lowercased() {
    // When
    let email = NormalizedEmail::parse("  Alice.Smith@Example.COM ").unwrap();

    // Then
    assert_that!(email.as_str(), eq("alice.smith@example.com"));
    assert_that!(email.local_part(), eq("alice.smith"));
}

#[test]
fn given_malformed_emails_when_parsed_then_rejected() {
    for raw in ["", "   ", "no-at-sign", "@example.com", "alice@", "a@b@c", "al ice@x.com"] {
        assert_that!(NormalizedEmail::parse(raw), err(anything()), "input: {raw:?}");
    }
}

#[test]
fn given_invalid_email_when_parsed_then_error_names_the_input() {
    let error = NormalizedEmail::parse("alice@").unwrap_err();

    assert_that!(error.to_string(), contains_substring("alice@"));
    assert_that!(error.to_string(), contains_substring("empty domain"));
}

#[test]
fn given_stored_variant_when_matched_then_case_is_ignored() {
    let email = NormalizedEmail::parse("c@x.com").unwrap();

    assert_that!(email.matches("C@X.com"), eq(true));
    assert_that!(email.matches(" c@x.COM"), eq(true));
    assert_that!(email.matches("c@x.co"), eq(false));
}

#[test]
fn given_row_id_when_placeholder_built_then_follows_dup_format() {
    let email = NormalizedEmail::parse("b@x.com").unwrap();
    let placeholder = email.placeholder_for(&IdentityId::from("row-7"));

    assert_that!(placeholder, eq("b@x.com+dup-row-7"));
    assert_that!(email.is_placeholder(&placeholder), eq(true));
}

#[test]
fn given_plain_or_foreign_email_when_checked_then_not_a_placeholder() {
    let email = NormalizedEmail::parse("b@x.com").unwrap();

    assert_that!(email.is_placeholder("b@x.com"), eq(false));
    assert_that!(email.is_placeholder("b@x.com+dup-"), eq(false));
    assert_that!(email.is_placeholder("other@x.com+dup-row-1"), eq(false));
    assert_that!(email.is_placeholder("B@X.COM+dup-ROW-1"), eq(true));
}

#[test]
fn given_placeholder_of_longer_address_when_checked_then_not_claimed() {
    // Given: "a@x.com+dup-z" is itself a valid address
    let shorter = NormalizedEmail::parse("a@x.com").unwrap();
    let longer = NormalizedEmail::parse("a@x.com+dup-z").unwrap();
    let theirs = longer.placeholder_for(&IdentityId::from("row-1"));

    // When / Then
    assert_that!(longer.is_placeholder(&theirs), eq(true));
    assert_that!(shorter.is_placeholder(&theirs), eq(false));
}

proptest! {
    #[test]
    fn normalizing_twice_is_stable(local in "[A-Za-z0-9._]{1,16}", domain in "[A-Za-z0-9]{1,12}\\.[A-Za-z]{2,4}") {
        let raw = format!("{local}@{domain}");
        let once = NormalizedEmail::parse(&raw).unwrap();
        let twice = NormalizedEmail::parse(once.as_str()).unwrap();

        prop_assert_eq!(&once, &twice);
        prop_assert!(once.matches(&raw));
    }

    #[test]
    fn placeholders_never_match_the_real_email(local in "[a-z0-9]{1,16}", row in "[a-z0-9-]{1,36}") {
        let email = NormalizedEmail::parse(&format!("{local}@x.com")).unwrap();
        let placeholder = email.placeholder_for(&IdentityId::new(row));

        prop_assert!(!email.matches(&placeholder));
        prop_assert!(email.is_placeholder(&placeholder));
    }
}
