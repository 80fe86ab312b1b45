/// Unit tests for payload projection.
use serde::Deserialize;
use serde_json::json;
use vk_sdk::projection::*;
use vk_sdk::ErrorKind;

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: i64,
    first_name: String,
}

#[test]
fn test_bool_from_flag() {
    assert!(to_bool(&json!(1)).unwrap());
    assert!(!to_bool(&json!(0)).unwrap());
    assert!(to_bool(&json!(true)).unwrap());
}

#[test]
fn test_bool_rejects_other_values() {
    assert_eq!(to_bool(&json!(2)).unwrap_err().kind(), ErrorKind::Projection);
    assert_eq!(to_bool(&json!(null)).unwrap_err().kind(), ErrorKind::Projection);
    assert_eq!(to_bool(&json!("1")).unwrap_err().kind(), ErrorKind::Projection);
}

#[test]
fn test_integer_and_string() {
    assert_eq!(to_i64(&json!(-42)).unwrap(), -42);
    assert_eq!(to_i64(&json!("17")).unwrap(), 17);
    assert!(to_i64(&json!(1.5)).is_err());
    assert_eq!(to_string(&json!("abc")).unwrap(), "abc");
    assert!(to_string(&json!(1)).is_err());
}

#[test]
fn test_object() {
    let user: User = to_object(json!({"id": 1, "first_name": "Pavel", "extra": true})).unwrap();
    assert_eq!(
        user,
        User {
            id: 1,
            first_name: "Pavel".into()
        }
    );
}

#[test]
fn test_object_missing_field_is_not_defaulted() {
    let err = to_object::<User>(json!({"id": 1})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Projection);
    assert!(err.to_string().contains("first_name"));
}

#[test]
fn test_listing_shape() {
    let listing: Listing<User> = to_listing(json!({
        "count": 100,
        "items": [{"id": 1, "first_name": "A"}, {"id": 2, "first_name": "B"}]
    }))
    .unwrap();
    assert_eq!(listing.count, Some(100));
    let names: Vec<&str> = listing.iter().map(|u| u.first_name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_listing_from_bare_array() {
    let listing: Listing<User> = to_listing(json!([{"id": 1, "first_name": "A"}])).unwrap();
    assert_eq!(listing.count, None);
    assert_eq!(listing.len(), 1);
}

#[test]
fn test_listing_from_null_is_empty() {
    let listing: Listing<User> = to_listing(json!(null)).unwrap();
    assert!(listing.is_empty());
}

#[test]
fn test_listing_without_items_is_an_error() {
    let err = to_listing::<User>(json!({"count": 3})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Projection);
}

#[test]
fn test_listing_bad_item_reports_index() {
    let err = to_listing::<User>(json!({
        "items": [{"id": 1, "first_name": "A"}, {"id": "two", "first_name": "B"}]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("item 1"));
}

#[test]
fn test_vec_and_field() {
    let users: Vec<User> = to_vec(json!({"count": 1, "items": [{"id": 5, "first_name": "E"}]})).unwrap();
    assert_eq!(users[0].id, 5);

    let id: i64 = field(json!({"market_album_id": 17}), "market_album_id").unwrap();
    assert_eq!(id, 17);
    assert!(field::<i64>(json!(17), "market_album_id").is_err());
}
