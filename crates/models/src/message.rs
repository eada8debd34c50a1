use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const AUTHOR_MAX_LEN: usize = 255;

/// A posted message. Serialized in camelCase for the HTTP API.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "message")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    pub like_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Fresh record with zero likes.
    pub fn new(id: Uuid, author: impl Into<String>, content: impl Into<String>, created_at: DateTimeWithTimeZone) -> Self {
        Self {
            id,
            author: author.into(),
            content: content.into(),
            created_at,
            like_count: 0,
        }
    }

    /// Active model with every column `Set`, for inserts and upserts.
    pub fn into_set_active_model(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            author: Set(self.author),
            content: Set(self.content),
            created_at: Set(self.created_at),
            like_count: Set(self.like_count),
        }
    }
}

pub fn validate_author(author: &str) -> Result<(), errors::ModelError> {
    if author.trim().is_empty() {
        return Err(errors::ModelError::Validation("author must not be empty".into()));
    }
    if author.chars().count() > AUTHOR_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("author must be at most {AUTHOR_MAX_LEN} characters")));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), errors::ModelError> {
    if content.trim().is_empty() {
        return Err(errors::ModelError::Validation("content must not be empty".into()));
    }
    Ok(())
}
