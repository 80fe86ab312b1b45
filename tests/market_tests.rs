/// Tests for the `market.*` call sites and their projections.
mod common;

use common::{api, MockTransport};
use vk_sdk::*;

const BASE: &str = "https://api.vk.com/method";

fn url(method: &str, query: &str) -> String {
    format!("{BASE}/{method}?{query}&v=5.42&access_token=token")
}

const PRODUCTS: &str = r#"{
    "response": {
        "count": 41,
        "items": [
            {
                "id": 136089719,
                "owner_id": -4363,
                "title": "Phone case",
                "description": "Leather",
                "price": {
                    "amount": "150000",
                    "currency": { "id": 643, "name": "RUB" },
                    "text": "1500 rub."
                },
                "category": {
                    "id": 404,
                    "name": "Accessories",
                    "section": { "id": 0, "name": "Electronics" }
                },
                "thumb_photo": "https://pp.vk.me/c1.jpg",
                "date": 1445947536,
                "availability": 0
            },
            {
                "id": 137352259,
                "owner_id": 13245770,
                "title": "Charger",
                "likes": { "count": 3, "user_likes": 1 },
                "can_comment": 1,
                "can_repost": 0
            }
        ]
    }
}"#;

#[test]
fn test_get_projects_listing() {
    let transport = MockTransport::new().expect(
        &url("market.get", "owner_id=-4363&count=2&extended=1"),
        PRODUCTS,
    );
    let items = api(&transport)
        .market()
        .get(-4363, None, Some(2), None, Some(true))
        .unwrap();

    // count is the server total and is not checked against the page size
    assert_eq!(items.count, Some(41));
    assert_eq!(items.len(), 2);

    let first = &items.items[0];
    assert_eq!(first.id, 136089719);
    assert_eq!(first.owner_id, -4363);
    let price = first.price.as_ref().unwrap();
    assert_eq!(price.amount, "150000");
    assert_eq!(price.currency.name, "RUB");
    assert_eq!(first.category.as_ref().unwrap().name, "Accessories");

    let second = &items.items[1];
    assert_eq!(second.likes.as_ref().unwrap().user_likes, Some(true));
    assert_eq!(second.can_comment, Some(true));
    assert_eq!(second.can_repost, Some(false));
    assert!(second.price.is_none());
}

#[test]
fn test_get_uses_minimum_version_even_if_config_is_older() {
    let transport = MockTransport::new().expect(
        &url("market.get", "owner_id=-1"),
        r#"{"response": {"count": 0, "items": []}}"#,
    );
    let api = VkApi::with_transport(
        common::config().with_api_version(ApiVersion::new(5, 9)),
        transport.clone(),
    );
    let items = api.market().get(-1, None, None, None, None).unwrap();
    assert!(items.is_empty());
}

#[test]
fn test_get_by_id() {
    let transport = MockTransport::new().expect(
        &url(
            "market.getById",
            "item_ids=-4363_136089719,13245770_137352259",
        ),
        PRODUCTS,
    );
    let items = api(&transport)
        .market()
        .get_by_id(&["-4363_136089719", "13245770_137352259"], None)
        .unwrap();
    assert_eq!(items.len(), 2);
}

#[test]
fn test_get_by_id_requires_ids() {
    let transport = MockTransport::new();
    let err = api(&transport).market().get_by_id(&[], None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn test_search_merges_parameter_object() {
    let transport = MockTransport::new().expect(
        &url(
            "market.search",
            "owner_id=-4363&q=case&price_from=100&tags=1,2&sort=2&rev=0&count=20",
        ),
        r#"{"response": {"count": 0, "items": []}}"#,
    );
    let params = MarketSearchParams {
        owner_id: -4363,
        query: Some("case".into()),
        price_from: Some(100),
        tags: Some(vec![1, 2]),
        sort: Some(MarketSort::ByPrice),
        rev: Some(false),
        count: Some(20),
        ..Default::default()
    };
    api(&transport).market().search(&params).unwrap();
    assert!(transport.is_exhausted());
}

#[test]
fn test_item_with_missing_required_field_fails_projection() {
    let transport = MockTransport::new().reply(
        r#"{"response": {"count": 1, "items": [{"id": 1, "title": "no owner"}]}}"#,
    );
    let err = api(&transport)
        .market()
        .get(-1, None, None, None, None)
        .unwrap_err();
    assert!(matches!(err, VkError::Projection(_)));
}

#[test]
fn test_delete_and_restore() {
    let transport = MockTransport::new()
        .expect(&url("market.delete", "owner_id=-1&item_id=5"), r#"{"response": 1}"#)
        .expect(&url("market.restore", "owner_id=-1&item_id=5"), r#"{"response": 1}"#);
    let api = api(&transport);
    assert!(api.market().delete(-1, 5).unwrap());
    assert!(api.market().restore(-1, 5).unwrap());
}

#[test]
fn test_report_sends_reason_code() {
    let transport = MockTransport::new()
        .expect(
            &url("market.report", "owner_id=-1&item_id=5&reason=0"),
            r#"{"response": 1}"#,
        )
        .expect(
            &url("market.reportComment", "owner_id=-1&comment_id=9&reason=6"),
            r#"{"response": 1}"#,
        );
    let api = api(&transport);
    assert!(api.market().report(-1, 5, ReportReason::Spam).unwrap());
    assert!(api
        .market()
        .report_comment(-1, 9, ReportReason::Abuse)
        .unwrap());
}

// ---------------------------------------------------------------------------
// Albums
// ---------------------------------------------------------------------------

#[test]
fn test_get_albums() {
    let transport = MockTransport::new().expect(
        &url("market.getAlbums", "owner_id=-1&offset=0&count=50"),
        r#"{"response": {"count": 1, "items": [{"id": 2, "owner_id": -1, "title": "Summer", "count": 12, "updated_time": 1445947536}]}}"#,
    );
    let albums = api(&transport)
        .market()
        .get_albums(-1, Some(0), Some(50))
        .unwrap();
    assert_eq!(albums.len(), 1);
    assert_eq!(albums.items[0].title, "Summer");
    assert_eq!(albums.items[0].count, Some(12));
}

#[test]
fn test_get_album_by_id() {
    let transport = MockTransport::new().expect(
        &url("market.getAlbumById", "owner_id=-1&album_ids=2,3"),
        r#"{"response": {"count": 2, "items": [{"id": 2, "owner_id": -1, "title": "A"}, {"id": 3, "owner_id": -1, "title": "B"}]}}"#,
    );
    let albums = api(&transport)
        .market()
        .get_album_by_id(-1, &[2, 3])
        .unwrap();
    let ids: Vec<i64> = albums.into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn test_add_album_returns_new_id() {
    let transport = MockTransport::new().expect(
        &url("market.addAlbum", "owner_id=-1&title=Summer&main_album=1"),
        r#"{"response": {"market_album_id": 17}}"#,
    );
    let id = api(&transport)
        .market()
        .add_album(-1, "Summer", None, Some(true))
        .unwrap();
    assert_eq!(id, 17);
}

#[test]
fn test_add_album_missing_id_is_projection_error() {
    let transport = MockTransport::new().reply(r#"{"response": {}}"#);
    let err = api(&transport)
        .market()
        .add_album(-1, "Summer", None, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Projection);
}

#[test]
fn test_reorder_albums() {
    let transport = MockTransport::new().expect(
        &url("market.reorderAlbums", "owner_id=-1&album_id=2&after=3"),
        r#"{"response": 1}"#,
    );
    assert!(api(&transport)
        .market()
        .reorder_albums(-1, 2, None, Some(3))
        .unwrap());
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[test]
fn test_create_comment() {
    let transport = MockTransport::new().expect(
        &url(
            "market.createComment",
            "owner_id=-1&item_id=5&message=Nice%21&attachments=photo1_2&from_group=1",
        ),
        r#"{"response": 1024}"#,
    );
    let params = MarketCreateCommentParams {
        owner_id: -1,
        item_id: 5,
        message: Some("Nice!".into()),
        attachments: Some(vec!["photo1_2".into()]),
        from_group: Some(true),
        ..Default::default()
    };
    assert_eq!(api(&transport).market().create_comment(&params).unwrap(), 1024);
}

#[test]
fn test_get_comments() {
    let transport = MockTransport::new().expect(
        &url(
            "market.getComments",
            "owner_id=-1&item_id=5&need_likes=1&count=10&sort=desc",
        ),
        r#"{"response": {"count": 1, "items": [{"id": 8, "from_id": 100, "date": 1445947536, "text": "hello", "likes": {"count": 2}}]}}"#,
    );
    let params = MarketGetCommentsParams {
        owner_id: -1,
        item_id: 5,
        need_likes: Some(true),
        count: Some(10),
        sort: Some(SortOrder::Descending),
        ..Default::default()
    };
    let comments = api(&transport).market().get_comments(&params).unwrap();
    assert_eq!(comments.count, Some(1));
    assert_eq!(comments.items[0].text, "hello");
    assert_eq!(comments.items[0].likes.as_ref().unwrap().user_likes, None);
}

#[test]
fn test_comment_lifecycle() {
    let transport = MockTransport::new()
        .expect(
            &url("market.editComment", "owner_id=-1&comment_id=8&message=edited"),
            r#"{"response": 1}"#,
        )
        .expect(
            &url("market.deleteComment", "owner_id=-1&comment_id=8"),
            r#"{"response": 1}"#,
        )
        .expect(
            &url("market.restoreComment", "owner_id=-1&comment_id=8"),
            r#"{"response": 0}"#,
        );
    let api = api(&transport);
    assert!(api.market().edit_comment(-1, 8, "edited", &[]).unwrap());
    assert!(api.market().delete_comment(-1, 8).unwrap());
    assert!(!api.market().restore_comment(-1, 8).unwrap());
}

#[test]
fn test_access_denied_is_surfaced() {
    let transport = MockTransport::new().reply(
        r#"{"error": {"error_code": 15, "error_msg": "Access denied: no access to market", "request_params": [{"key": "method", "value": "market.get"}]}}"#,
    );
    let err = api(&transport)
        .market()
        .get(-1, None, None, None, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    let remote = err.remote().unwrap();
    assert_eq!(remote.message, "Access denied: no access to market");
    assert_eq!(remote.request_param("method"), Some("market.get"));
}
