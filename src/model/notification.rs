use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Site-wide announcement shown by the storefront. The collection holds only
/// a handful of live documents at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub message: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}
