use bon::Builder;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Builder, Deserialize, Serialize)]
pub struct CreatePost {
    #[builder(into)]
    pub title: String,
    #[builder(into)]
    pub text: String,
    /// Scheduled publish time. Defaults to now when omitted.
    pub pub_date: Option<NaiveDateTime>,
    pub category_id: Option<i32>,
    pub location_id: Option<i32>,
    #[builder(into)]
    pub image: Option<String>,
    #[builder(default)]
    pub tags: Vec<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Deserialize, Serialize)]
pub struct UpdatePost {
    #[builder(into)]
    pub title: Option<String>,
    #[builder(into)]
    pub text: Option<String>,
    pub pub_date: Option<NaiveDateTime>,
    /// `Some(None)` clears the category, `None` leaves it untouched.
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<i32>>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub location_id: Option<Option<i32>>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_post_distinguishes_absent_from_null() {
        let form: UpdatePost = serde_json::from_value(json!({ "title": "hi" })).unwrap();
        assert_eq!(form.category_id, None);

        let form: UpdatePost =
            serde_json::from_value(json!({ "category_id": null })).unwrap();
        assert_eq!(form.category_id, Some(None));

        let form: UpdatePost = serde_json::from_value(json!({ "category_id": 3 })).unwrap();
        assert_eq!(form.category_id, Some(Some(3)));
    }

    #[test]
    fn absent_fields_stay_absent_through_serialization() {
        let form = UpdatePost::builder().title("hi").build();
        let value = serde_json::to_value(&form).unwrap();
        assert!(value.as_object().unwrap().get("category_id").is_none());

        let back: UpdatePost = serde_json::from_value(value).unwrap();
        assert_eq!(back.category_id, None);

        let form = UpdatePost::builder().category_id(None).build();
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["category_id"], serde_json::Value::Null);

        let back: UpdatePost = serde_json::from_value(value).unwrap();
        assert_eq!(back.category_id, Some(None));
    }
}
