//! Conversions from domain objects into their wire representations.
use quill_api_types::{CategoryData, CommentData, PostData, UserProfile, UserSummary};
use quill_model::post::PostView;
use quill_model::{Category, Comment, User};

pub trait IntoApiPostData {
    fn into_api_post_data(self) -> PostData;
}

pub trait IntoApiCategoryData {
    fn into_api_category_data(self) -> CategoryData;
}

pub trait IntoApiCommentData {
    fn into_api_comment_data(self) -> CommentData;
}

pub trait IntoApiUserSummary {
    fn into_api_user_summary(self) -> UserSummary;
}

pub trait IntoApiUserProfile {
    fn into_api_user_profile(self) -> UserProfile;
}

impl IntoApiPostData for PostView {
    #[must_use]
    fn into_api_post_data(self) -> PostData {
        PostData {
            id: self.post.id.0,
            created_at: self.post.created,
            pub_date: self.post.pub_date,
            title: self.post.title,
            text: self.post.text,
            is_published: self.post.is_published,
            author: self.author.into_api_user_summary(),
            category: self.category.map(IntoApiCategoryData::into_api_category_data),
            // unpublished locations are never named on the wire
            location: self
                .location
                .filter(|location| location.is_published)
                .map(|location| location.name),
            image: self.post.image,
            tags: self.tags.into_iter().map(|tag| tag.tag).collect(),
        }
    }
}

impl IntoApiCategoryData for Category {
    #[must_use]
    fn into_api_category_data(self) -> CategoryData {
        CategoryData {
            id: self.id.0,
            title: self.title,
            description: self.description,
            slug: self.slug,
        }
    }
}

impl IntoApiCommentData for (Comment, User) {
    #[must_use]
    fn into_api_comment_data(self) -> CommentData {
        let (comment, author) = self;
        CommentData {
            id: comment.id.0,
            created_at: comment.created,
            text: comment.text,
            author: author.into_api_user_summary(),
            post_id: comment.post_id.0,
        }
    }
}

impl IntoApiUserSummary for User {
    #[must_use]
    fn into_api_user_summary(self) -> UserSummary {
        UserSummary {
            id: self.id.0,
            first_name: self.first_name,
            last_name: self.last_name,
            avatar: self.avatar,
        }
    }
}

impl IntoApiUserProfile for User {
    #[must_use]
    fn into_api_user_profile(self) -> UserProfile {
        UserProfile {
            id: self.id.0,
            joined_at: self.created,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            birthday: self.birthday,
            avatar: self.avatar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use quill_model::id::{LocationId, PostId, UserId};
    use quill_model::{Location, Post};

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 14)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn make_view(location: Option<Location>) -> PostView {
        PostView {
            post: Post {
                id: PostId(1),
                created: at(),
                title: "title".into(),
                text: "text".into(),
                pub_date: at(),
                author_id: UserId(2),
                category_id: None,
                location_id: location.as_ref().map(|location| location.id),
                image: None,
                is_published: true,
            },
            author: User {
                id: UserId(2),
                created: at(),
                updated: None,
                email: "alice@example.com".into(),
                first_name: "Alice".into(),
                last_name: None,
                birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                avatar: None,
                password_hash: String::new(),
                is_staff: false,
            },
            category: None,
            location,
            tags: Vec::new(),
        }
    }

    fn make_location(is_published: bool) -> Location {
        Location {
            id: LocationId(5),
            created: at(),
            name: "Reykjavik".into(),
            is_published,
        }
    }

    #[test]
    fn published_location_is_named() {
        let data = make_view(Some(make_location(true))).into_api_post_data();
        assert_eq!(data.location.as_deref(), Some("Reykjavik"));
    }

    #[test]
    fn unpublished_location_is_hidden() {
        let data = make_view(Some(make_location(false))).into_api_post_data();
        assert_eq!(data.location, None);
    }

    #[test]
    fn profile_carries_the_email_but_summary_does_not() {
        let view = make_view(None);
        let author = view.author.clone();

        let summary = view.author.into_api_user_summary();
        assert_eq!(summary.first_name, "Alice");

        let profile = author.into_api_user_profile();
        assert_eq!(profile.email, "alice@example.com");
    }
}
