use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::product::ProductImage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub slug: String,
    pub logo: Option<ProductImage>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
