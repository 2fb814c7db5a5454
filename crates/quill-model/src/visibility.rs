//! The visibility rules deciding which posts each viewer may see.
//!
//! A post is publicly visible when it is published, its category (if
//! any) is published, and its publish time is not in the future. The
//! author bypasses all of that and always sees their own posts. The
//! same rule is applied to list queries in SQL form; this module is
//! the single in-memory statement of it.
use chrono::NaiveDateTime;

use crate::category::Category;
use crate::id::UserId;
use crate::post::Post;

/// Who is looking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    User(UserId),
}

impl Viewer {
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }

    #[must_use]
    pub fn is(&self, user_id: UserId) -> bool {
        self.user_id() == Some(user_id)
    }
}

impl From<Option<UserId>> for Viewer {
    fn from(value: Option<UserId>) -> Self {
        match value {
            Some(id) => Self::User(id),
            None => Self::Anonymous,
        }
    }
}

/// Decides whether `viewer` may see `post` at the moment `now`.
///
/// `category` is the post's category record if the post has one and
/// the record still exists. A dangling category reference behaves as
/// having no category at all.
#[must_use]
pub fn post_is_visible(
    post: &Post,
    category: Option<&Category>,
    now: NaiveDateTime,
    viewer: &Viewer,
) -> bool {
    if viewer.is(post.author_id) {
        return true;
    }

    post.is_published
        && category.map_or(true, |category| category.is_published)
        && post.pub_date <= now
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{CategoryId, PostId};
    use chrono::{Days, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 14)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn make_post(author: i64) -> Post {
        Post {
            id: PostId(1),
            created: now(),
            title: "title".into(),
            text: "text".into(),
            pub_date: now(),
            author_id: UserId(author),
            category_id: None,
            location_id: None,
            image: None,
            is_published: true,
        }
    }

    fn make_category(is_published: bool) -> Category {
        Category {
            id: CategoryId(7),
            created: now(),
            title: "travel".into(),
            description: String::new(),
            slug: "travel".into(),
            is_published,
        }
    }

    #[test]
    fn published_post_is_visible_to_everyone() {
        let post = make_post(1);
        assert!(post_is_visible(&post, None, now(), &Viewer::Anonymous));
        assert!(post_is_visible(&post, None, now(), &Viewer::User(UserId(2))));
    }

    #[test]
    fn unpublished_post_is_hidden_from_everyone_but_the_author() {
        let mut post = make_post(1);
        post.is_published = false;

        assert!(!post_is_visible(&post, None, now(), &Viewer::Anonymous));
        assert!(!post_is_visible(&post, None, now(), &Viewer::User(UserId(2))));
        assert!(post_is_visible(&post, None, now(), &Viewer::User(UserId(1))));
    }

    #[test]
    fn future_post_is_visible_only_to_the_author() {
        let mut post = make_post(1);
        post.pub_date = now() + Days::new(2);

        assert!(!post_is_visible(&post, None, now(), &Viewer::Anonymous));
        assert!(!post_is_visible(&post, None, now(), &Viewer::User(UserId(2))));
        assert!(post_is_visible(&post, None, now(), &Viewer::User(UserId(1))));
    }

    #[test]
    fn pub_date_exactly_now_counts_as_published() {
        let post = make_post(1);
        assert_eq!(post.pub_date, now());
        assert!(post_is_visible(&post, None, now(), &Viewer::Anonymous));
    }

    #[test]
    fn hidden_category_hides_the_post_regardless_of_its_own_flag() {
        let mut post = make_post(1);
        post.category_id = Some(CategoryId(7));
        let category = make_category(false);

        assert!(!post_is_visible(&post, Some(&category), now(), &Viewer::Anonymous));
        assert!(!post_is_visible(
            &post,
            Some(&category),
            now(),
            &Viewer::User(UserId(2))
        ));
        // the author still sees it
        assert!(post_is_visible(
            &post,
            Some(&category),
            now(),
            &Viewer::User(UserId(1))
        ));
    }

    #[test]
    fn published_category_keeps_the_post_visible() {
        let mut post = make_post(1);
        post.category_id = Some(CategoryId(7));
        let category = make_category(true);

        assert!(post_is_visible(&post, Some(&category), now(), &Viewer::Anonymous));
    }

    #[test]
    fn missing_category_record_behaves_as_uncategorized() {
        let mut post = make_post(1);
        post.category_id = Some(CategoryId(7));

        assert!(post_is_visible(&post, None, now(), &Viewer::Anonymous));
    }

    #[test]
    fn viewer_from_optional_user_id() {
        assert_eq!(Viewer::from(Option::<UserId>::None), Viewer::Anonymous);
        assert_eq!(Viewer::from(Some(UserId(3))), Viewer::User(UserId(3)));
        assert!(Viewer::User(UserId(3)).is(UserId(3)));
        assert!(!Viewer::Anonymous.is(UserId(3)));
    }
}
