use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::post::PostData;
use crate::sensitive::Sensitive;
use crate::user::{UserProfile, UserSummary};

#[derive(Debug, Clone, PartialEq, Eq, Builder, Deserialize, Serialize)]
pub struct RegisterUser {
    #[builder(into)]
    pub email: String,
    #[builder(into)]
    pub password: Sensitive<String>,
    #[builder(into)]
    pub first_name: String,
    #[builder(into)]
    pub last_name: Option<String>,
    pub birthday: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegisterUserResponse {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Builder, Deserialize, Serialize)]
pub struct LoginUser {
    #[builder(into)]
    pub email: String,
    #[builder(into)]
    pub password: Sensitive<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginUserResponse {
    pub user: UserProfile,
    pub token: String,
}

/// Response body of a public profile page: the user and their feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfileResponse {
    pub user: UserSummary,
    pub posts: Vec<PostData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Deserialize, Serialize)]
pub struct UpdateProfile {
    #[builder(into)]
    pub first_name: Option<String>,
    /// `Some(None)` clears the last name, `None` leaves it untouched.
    #[serde(
        default,
        with = "crate::routes::posts::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_name: Option<Option<String>>,
    pub birthday: Option<NaiveDate>,
    #[serde(
        default,
        with = "crate::routes::posts::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Builder, Deserialize, Serialize)]
pub struct ChangePassword {
    #[builder(into)]
    pub old_password: Sensitive<String>,
    #[builder(into)]
    pub new_password: Sensitive<String>,
}
