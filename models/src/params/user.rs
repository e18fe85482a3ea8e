use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, Debug, Clone, ToSchema)]
pub struct CreateUserParams {
    #[validate(length(min = 3, max = 20))]
    pub username: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub avatar: String,
}
