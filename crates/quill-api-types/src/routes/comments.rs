use bon::Builder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Builder, Deserialize, Serialize)]
pub struct CreateComment {
    #[builder(into)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Builder, Deserialize, Serialize)]
pub struct UpdateComment {
    #[builder(into)]
    pub text: String,
}
