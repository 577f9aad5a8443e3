use serde::Serialize;

use crate::domain::share::models::ShareToken;

pub mod get_share_status;
pub mod get_shared_brain;
pub mod update_share;

pub use get_share_status::get_share_status;
pub use get_shared_brain::get_shared_brain;
pub use update_share::update_share;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareStatusData {
    pub enabled: bool,
    pub token: Option<String>,
}

impl From<Option<ShareToken>> for ShareStatusData {
    fn from(token: Option<ShareToken>) -> Self {
        Self {
            enabled: token.is_some(),
            token: token.map(|token| token.as_str().to_string()),
        }
    }
}
