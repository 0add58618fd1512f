//! Photo and video posts, and the public feed.

use crate::db::{new_id, MemoryDb, Tables};
use crate::error::AppError;
use crate::models::{MediaType, Post};
use crate::services::pagination::{paginate, Page, PageParams};
use crate::time_utils::format_utc_rfc3339;
use chrono::Utc;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Body of `POST /api/posts`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[validate(length(min = 1))]
    pub cafe_id: String,
    #[validate(length(min = 1))]
    pub media_url: String,
    pub media_type: MediaType,
    #[validate(length(min = 1, max = 500))]
    pub caption: String,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub cafe_id: String,
    pub cafe_name: String,
    pub media_url: String,
    pub media_type: MediaType,
    pub caption: String,
    pub likes: u32,
    pub created_at: String,
}

impl PostView {
    fn build(post: &Post, tables: &Tables) -> Self {
        let (user_name, user_avatar) = tables.author_of(&post.user_id);
        Self {
            id: post.id.clone(),
            user_id: post.user_id.clone(),
            user_name,
            user_avatar,
            cafe_id: post.cafe_id.clone(),
            cafe_name: tables.cafe_label(&post.cafe_id).0,
            media_url: post.media_url.clone(),
            media_type: post.media_type,
            caption: post.caption.clone(),
            likes: post.likes,
            created_at: format_utc_rfc3339(post.created_at),
        }
    }
}

#[derive(Clone)]
pub struct PostService {
    db: MemoryDb,
}

impl PostService {
    pub fn new(db: MemoryDb) -> Self {
        Self { db }
    }

    pub fn create(&self, user_id: &str, input: NewPost) -> Result<PostView, AppError> {
        input.validate()?;
        let now = Utc::now();

        let view = self.db.write(|t| {
            t.require_cafe(&input.cafe_id)?;
            let post = Post {
                id: new_id("post"),
                user_id: user_id.to_string(),
                cafe_id: input.cafe_id,
                media_url: input.media_url,
                media_type: input.media_type,
                caption: input.caption,
                likes: 0,
                created_at: now,
                updated_at: now,
            };
            let view = PostView::build(&post, t);
            t.posts.set(post);
            Ok::<_, AppError>(view)
        })?;

        tracing::info!(post_id = %view.id, cafe_id = %view.cafe_id, user_id, "Post created");
        Ok(view)
    }

    /// Every post, newest first.
    pub fn feed(&self, page: PageParams) -> Result<Page<PostView>, AppError> {
        page.validate()?;
        Ok(self.db.read(|t| {
            let mut posts: Vec<&Post> = t.posts.values().collect();
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
            let page = paginate(posts, page);
            Page {
                items: page.items.into_iter().map(|p| PostView::build(p, t)).collect(),
                total: page.total,
                has_more: page.has_more,
            }
        }))
    }
}
