/// Data models for VK API types.
///
/// Response models derive `Deserialize` and are fed to the projection
/// functions; request-side enums and parameter objects implement
/// [`ParamValue`] / [`IntoParameters`].
use serde::{Deserialize, Deserializer, Serialize};

use crate::params::{IntoParameters, ParamValue, VkParameters};
use crate::vk_flags;

/// Deserialize an optional VK flag that may be sent as `0`/`1` or `true`/`false`.
fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Bool(b)) => Ok(Some(b)),
        Some(serde_json::Value::Number(n)) => match n.as_i64() {
            Some(0) => Ok(Some(false)),
            Some(1) => Ok(Some(true)),
            _ => Err(D::Error::custom(format!("expected 0 or 1, got {n}"))),
        },
        Some(v) => Err(D::Error::custom(format!("expected flag, got {v}"))),
    }
}

// ---------------------------------------------------------------------------
// Request enumerations
// ---------------------------------------------------------------------------

vk_flags! {
    /// Push notification types for `account.registerDevice`.
    pub struct SubscribeFilter {
        /// New private messages.
        const MESSAGE = 1 << 0 => "msg";
        const FRIEND = 1 << 1 => "friend";
        const CALL = 1 << 2 => "call";
        const REPLY = 1 << 3 => "reply";
        const MENTION = 1 << 4 => "mention";
        const GROUP = 1 << 5 => "group";
        const LIKE = 1 << 6 => "like";
    }
}

/// Reason sent with `market.report` / `market.reportComment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportReason {
    Spam = 0,
    ChildPornography = 1,
    Extremism = 2,
    Violence = 3,
    DrugPropaganda = 4,
    AdultMaterial = 5,
    Abuse = 6,
}

impl ParamValue for ReportReason {
    fn to_param(&self) -> Option<String> {
        Some((*self as u8).to_string())
    }
}

/// Sort order for `market.search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketSort {
    /// Order set by the community.
    Custom = 0,
    ByDate = 1,
    ByPrice = 2,
    ByPopularity = 3,
}

impl ParamValue for MarketSort {
    fn to_param(&self) -> Option<String> {
        Some((*self as u8).to_string())
    }
}

/// Chronological order for comment listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl ParamValue for SortOrder {
    fn to_param(&self) -> Option<String> {
        Some(
            match self {
                SortOrder::Ascending => "asc",
                SortOrder::Descending => "desc",
            }
            .to_string(),
        )
    }
}

// ---------------------------------------------------------------------------
// Parameter objects
// ---------------------------------------------------------------------------

/// Input of `market.search`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketSearchParams {
    /// Negative for communities.
    pub owner_id: i64,
    pub album_id: Option<i64>,
    pub query: Option<String>,
    /// In hundredths of the currency unit.
    pub price_from: Option<u64>,
    pub price_to: Option<u64>,
    pub tags: Option<Vec<i64>>,
    pub sort: Option<MarketSort>,
    /// Reverse the sort order.
    pub rev: Option<bool>,
    pub offset: Option<u32>,
    pub count: Option<u32>,
    pub extended: Option<bool>,
}

impl IntoParameters for MarketSearchParams {
    fn to_parameters(&self) -> VkParameters {
        VkParameters::new()
            .with("owner_id", self.owner_id)
            .with("album_id", self.album_id)
            .with("q", &self.query)
            .with("price_from", self.price_from)
            .with("price_to", self.price_to)
            .with("tags", &self.tags)
            .with("sort", self.sort)
            .with("rev", self.rev)
            .with("offset", self.offset)
            .with("count", self.count)
            .with("extended", self.extended)
    }
}

/// Input of `market.getComments`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketGetCommentsParams {
    pub owner_id: i64,
    pub item_id: i64,
    pub need_likes: Option<bool>,
    pub start_comment_id: Option<i64>,
    pub offset: Option<u32>,
    pub count: Option<u32>,
    pub sort: Option<SortOrder>,
    pub extended: Option<bool>,
    pub fields: Option<Vec<String>>,
}

impl IntoParameters for MarketGetCommentsParams {
    fn to_parameters(&self) -> VkParameters {
        VkParameters::new()
            .with("owner_id", self.owner_id)
            .with("item_id", self.item_id)
            .with("need_likes", self.need_likes)
            .with("start_comment_id", self.start_comment_id)
            .with("offset", self.offset)
            .with("count", self.count)
            .with("sort", self.sort)
            .with("extended", self.extended)
            .with("fields", &self.fields)
    }
}

/// Input of `market.createComment`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketCreateCommentParams {
    pub owner_id: i64,
    pub item_id: i64,
    pub message: Option<String>,
    /// Attachment ids such as `photo100_200`.
    pub attachments: Option<Vec<String>>,
    pub from_group: Option<bool>,
    pub reply_to_comment: Option<i64>,
    pub sticker_id: Option<u64>,
    /// Client-side id that prevents posting the same comment twice.
    pub guid: Option<String>,
}

impl IntoParameters for MarketCreateCommentParams {
    fn to_parameters(&self) -> VkParameters {
        VkParameters::new()
            .with("owner_id", self.owner_id)
            .with("item_id", self.item_id)
            .with("message", &self.message)
            .with("attachments", &self.attachments)
            .with("from_group", self.from_group)
            .with("reply_to_comment", self.reply_to_comment)
            .with("sticker_id", self.sticker_id)
            .with("guid", &self.guid)
    }
}

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Integer amount in hundredths, sent as a string.
    pub amount: String,
    pub currency: Currency,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSection {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: i64,
    pub name: String,
    pub section: Option<MarketSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Likes {
    pub count: u64,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub user_likes: Option<bool>,
}

/// A market item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category: Option<ProductCategory>,
    pub thumb_photo: Option<String>,
    pub date: Option<i64>,
    /// 0 available, 1 removed, 2 unavailable.
    pub availability: Option<i32>,
    // Extended fields.
    pub likes: Option<Likes>,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub can_comment: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub can_repost: Option<bool>,
    pub comments: Option<u64>,
}

/// A market album (collection of items).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAlbum {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub photo: Option<serde_json::Value>,
    pub count: Option<u64>,
    pub updated_time: Option<i64>,
}

/// A comment on a market item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub from_id: i64,
    pub date: i64,
    pub text: String,
    pub reply_to_user: Option<i64>,
    pub reply_to_comment: Option<i64>,
    pub likes: Option<Likes>,
}
