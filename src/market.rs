/// `market.*` methods.
///
/// All of them need API version 5.42 or later.
use log::debug;

use crate::api::VkApi;
use crate::config::ApiVersion;
use crate::errors::VkError;
use crate::models::*;
use crate::params::{require_non_empty, VkParameters};
use crate::projection::{self, Listing};

const MARKET_VERSION: ApiVersion = ApiVersion::new(5, 42);

/// Methods for community and user stores.
#[derive(Debug, Clone, Copy)]
pub struct MarketCategory<'a> {
    api: &'a VkApi,
}

impl<'a> MarketCategory<'a> {
    pub(crate) fn new(api: &'a VkApi) -> Self {
        Self { api }
    }

    fn call(&self, method: &str, params: &VkParameters) -> Result<serde_json::Value, VkError> {
        self.api.call_versioned(method, params, MARKET_VERSION)
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// market.get - Items of a store, optionally limited to one album.
    pub fn get(
        &self,
        owner_id: i64,
        album_id: Option<i64>,
        count: Option<u32>,
        offset: Option<u32>,
        extended: Option<bool>,
    ) -> Result<Listing<Product>, VkError> {
        debug!(
            "market.get owner_id={} album_id={:?} count={:?} offset={:?}",
            owner_id, album_id, count, offset
        );
        let params = VkParameters::new()
            .with("owner_id", owner_id)
            .with("album_id", album_id)
            .with("count", count)
            .with("offset", offset)
            .with("extended", extended);
        projection::to_listing(self.call("market.get", &params)?)
    }

    /// market.getById - Items by `<owner_id>_<item_id>` identifiers.
    pub fn get_by_id(
        &self,
        item_ids: &[&str],
        extended: Option<bool>,
    ) -> Result<Listing<Product>, VkError> {
        debug!("market.get_by_id item_ids={}", item_ids.len());
        if item_ids.is_empty() {
            return Err(VkError::Precondition("`item_ids` must not be empty".into()));
        }
        let params = VkParameters::new()
            .with("item_ids", item_ids)
            .with("extended", extended);
        projection::to_listing(self.call("market.getById", &params)?)
    }

    /// market.search - Search items of a store.
    pub fn search(&self, params: &MarketSearchParams) -> Result<Listing<Product>, VkError> {
        debug!(
            "market.search owner_id={} query={:?}",
            params.owner_id, params.query
        );
        let params = VkParameters::new().with_params(params);
        projection::to_listing(self.call("market.search", &params)?)
    }

    /// market.delete - Delete an item.
    pub fn delete(&self, owner_id: i64, item_id: i64) -> Result<bool, VkError> {
        debug!("market.delete owner_id={} item_id={}", owner_id, item_id);
        let params = VkParameters::new()
            .with("owner_id", owner_id)
            .with("item_id", item_id);
        projection::to_bool(&self.call("market.delete", &params)?)
    }

    /// market.restore - Restore a recently deleted item.
    pub fn restore(&self, owner_id: i64, item_id: i64) -> Result<bool, VkError> {
        debug!("market.restore owner_id={} item_id={}", owner_id, item_id);
        let params = VkParameters::new()
            .with("owner_id", owner_id)
            .with("item_id", item_id);
        projection::to_bool(&self.call("market.restore", &params)?)
    }

    /// market.report - Report an item.
    pub fn report(
        &self,
        owner_id: i64,
        item_id: i64,
        reason: ReportReason,
    ) -> Result<bool, VkError> {
        debug!(
            "market.report owner_id={} item_id={} reason={:?}",
            owner_id, item_id, reason
        );
        let params = VkParameters::new()
            .with("owner_id", owner_id)
            .with("item_id", item_id)
            .with("reason", reason);
        projection::to_bool(&self.call("market.report", &params)?)
    }

    // -----------------------------------------------------------------------
    // Albums
    // -----------------------------------------------------------------------

    /// market.getAlbums - Albums of a store.
    pub fn get_albums(
        &self,
        owner_id: i64,
        offset: Option<u32>,
        count: Option<u32>,
    ) -> Result<Listing<ProductAlbum>, VkError> {
        debug!(
            "market.get_albums owner_id={} offset={:?} count={:?}",
            owner_id, offset, count
        );
        let params = VkParameters::new()
            .with("owner_id", owner_id)
            .with("offset", offset)
            .with("count", count);
        projection::to_listing(self.call("market.getAlbums", &params)?)
    }

    /// market.getAlbumById - Albums by id.
    pub fn get_album_by_id(
        &self,
        owner_id: i64,
        album_ids: &[i64],
    ) -> Result<Listing<ProductAlbum>, VkError> {
        debug!(
            "market.get_album_by_id owner_id={} album_ids={:?}",
            owner_id, album_ids
        );
        let params = VkParameters::new()
            .with("owner_id", owner_id)
            .with("album_ids", album_ids);
        projection::to_listing(self.call("market.getAlbumById", &params)?)
    }

    /// market.addAlbum - Create an album and return its id.
    pub fn add_album(
        &self,
        owner_id: i64,
        title: &str,
        photo_id: Option<i64>,
        main_album: Option<bool>,
    ) -> Result<i64, VkError> {
        debug!("market.add_album owner_id={} title={}", owner_id, title);
        require_non_empty("title", title)?;
        let params = VkParameters::new()
            .with("owner_id", owner_id)
            .with("title", title)
            .with("photo_id", photo_id)
            .with("main_album", main_album);
        projection::field(self.call("market.addAlbum", &params)?, "market_album_id")
    }

    /// market.reorderAlbums - Move an album before or after another one.
    pub fn reorder_albums(
        &self,
        owner_id: i64,
        album_id: i64,
        before: Option<i64>,
        after: Option<i64>,
    ) -> Result<bool, VkError> {
        debug!(
            "market.reorder_albums owner_id={} album_id={} before={:?} after={:?}",
            owner_id, album_id, before, after
        );
        let params = VkParameters::new()
            .with("owner_id", owner_id)
            .with("album_id", album_id)
            .with("before", before)
            .with("after", after);
        projection::to_bool(&self.call("market.reorderAlbums", &params)?)
    }

    // -----------------------------------------------------------------------
    // Comments
    // -----------------------------------------------------------------------

    /// market.createComment - Comment on an item and return the comment id.
    pub fn create_comment(&self, params: &MarketCreateCommentParams) -> Result<i64, VkError> {
        debug!(
            "market.create_comment owner_id={} item_id={}",
            params.owner_id, params.item_id
        );
        let params = VkParameters::new().with_params(params);
        projection::to_i64(&self.call("market.createComment", &params)?)
    }

    /// market.getComments - Comments on an item.
    pub fn get_comments(
        &self,
        params: &MarketGetCommentsParams,
    ) -> Result<Listing<Comment>, VkError> {
        debug!(
            "market.get_comments owner_id={} item_id={}",
            params.owner_id, params.item_id
        );
        let params = VkParameters::new().with_params(params);
        projection::to_listing(self.call("market.getComments", &params)?)
    }

    /// market.deleteComment - Delete a comment.
    pub fn delete_comment(&self, owner_id: i64, comment_id: i64) -> Result<bool, VkError> {
        debug!(
            "market.delete_comment owner_id={} comment_id={}",
            owner_id, comment_id
        );
        let params = VkParameters::new()
            .with("owner_id", owner_id)
            .with("comment_id", comment_id);
        projection::to_bool(&self.call("market.deleteComment", &params)?)
    }

    /// market.restoreComment - Restore a deleted comment.
    pub fn restore_comment(&self, owner_id: i64, comment_id: i64) -> Result<bool, VkError> {
        debug!(
            "market.restore_comment owner_id={} comment_id={}",
            owner_id, comment_id
        );
        let params = VkParameters::new()
            .with("owner_id", owner_id)
            .with("comment_id", comment_id);
        projection::to_bool(&self.call("market.restoreComment", &params)?)
    }

    /// market.editComment - Replace the text and attachments of a comment.
    pub fn edit_comment(
        &self,
        owner_id: i64,
        comment_id: i64,
        message: &str,
        attachments: &[&str],
    ) -> Result<bool, VkError> {
        debug!(
            "market.edit_comment owner_id={} comment_id={} attachments={}",
            owner_id,
            comment_id,
            attachments.len()
        );
        let params = VkParameters::new()
            .with("owner_id", owner_id)
            .with("comment_id", comment_id)
            .with("message", message)
            .with("attachments", attachments);
        projection::to_bool(&self.call("market.editComment", &params)?)
    }

    /// market.reportComment - Report a comment.
    pub fn report_comment(
        &self,
        owner_id: i64,
        comment_id: i64,
        reason: ReportReason,
    ) -> Result<bool, VkError> {
        debug!(
            "market.report_comment owner_id={} comment_id={} reason={:?}",
            owner_id, comment_id, reason
        );
        let params = VkParameters::new()
            .with("owner_id", owner_id)
            .with("comment_id", comment_id)
            .with("reason", reason);
        projection::to_bool(&self.call("market.reportComment", &params)?)
    }
}
