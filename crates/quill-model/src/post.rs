use bon::Builder;
use chrono::NaiveDateTime;

use crate::category::Category;
use crate::id::{CategoryId, LocationId, PostId, UserId};
use crate::location::Location;
use crate::tag::Tag;
use crate::user::User;
use crate::visibility::{self, Viewer};

#[derive(Debug, Clone, diesel::Queryable, diesel::Selectable)]
#[diesel(table_name = crate::schema::posts)]
pub struct Post {
    pub id: PostId,
    pub created: NaiveDateTime,
    pub title: String,
    pub text: String,
    pub pub_date: NaiveDateTime,
    pub author_id: UserId,
    pub category_id: Option<CategoryId>,
    pub location_id: Option<LocationId>,
    pub image: Option<String>,
    pub is_published: bool,
}

#[derive(Builder)]
pub struct InsertPost<'a> {
    #[builder(into)]
    pub author_id: UserId,
    pub title: &'a str,
    pub text: &'a str,
    pub pub_date: NaiveDateTime,
    pub category_id: Option<CategoryId>,
    pub location_id: Option<LocationId>,
    pub image: Option<&'a str>,
    #[builder(default = true)]
    pub is_published: bool,
}

#[derive(Builder, diesel::AsChangeset)]
#[diesel(table_name = crate::schema::posts)]
pub struct UpdatePost<'a> {
    #[builder(into)]
    pub title: Option<&'a str>,
    #[builder(into)]
    pub text: Option<&'a str>,
    pub pub_date: Option<NaiveDateTime>,
    pub category_id: Option<Option<CategoryId>>,
    pub location_id: Option<Option<LocationId>>,
    pub image: Option<Option<&'a str>>,
    pub is_published: Option<bool>,
}

/// A post together with everything a view needs to render it.
#[derive(Debug, Clone)]
pub struct PostView {
    pub post: Post,
    pub author: User,
    pub category: Option<Category>,
    pub location: Option<Location>,
    pub tags: Vec<Tag>,
}

impl PostView {
    /// Whether the viewer may see this post at the given moment.
    #[must_use]
    pub fn visible_to(&self, now: NaiveDateTime, viewer: &Viewer) -> bool {
        visibility::post_is_visible(&self.post, self.category.as_ref(), now, viewer)
    }
}
