use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

// User

#[serde_as]
#[derive(Deserialize, Serialize, Debug)]
pub struct UserResponse {
    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "id_str")]
    pub id: u64,
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
    pub profile_image_url_https: Option<String>,
}

// Tweet

#[serde_as]
#[derive(Deserialize, Serialize, Debug)]
pub struct RetweetedStatusResponse {
    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "id_str")]
    pub id: u64,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug)]
pub struct TweetResponse {
    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "id_str")]
    pub id: u64,
    /// Kept raw; a malformed value must not fail the whole page.
    pub created_at: Option<String>,
    #[serde(default, alias = "full_text")]
    pub text: String,
    pub user: UserResponse,
    pub retweeted_status: Option<RetweetedStatusResponse>,
}

// Cursored lists

#[derive(Deserialize, Serialize, Debug)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub next_cursor: i64,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug)]
pub struct IdListResponse {
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub ids: Vec<u64>,
    pub next_cursor: i64,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug)]
#[serde(transparent)]
pub struct IdArrayResponse(#[serde_as(as = "Vec<DisplayFromStr>")] pub Vec<u64>);

// Errors

#[derive(Deserialize, Serialize, Debug)]
pub struct ErrorEntry {
    pub code: i64,
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorEntry>,
}
