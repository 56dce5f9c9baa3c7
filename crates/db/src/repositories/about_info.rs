//! About info repository.

use std::sync::Arc;

use crate::entities::{about_info, AboutInfo};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use travelcloud_common::{AppError, AppResult};

/// About info repository for database operations.
#[derive(Clone)]
pub struct AboutInfoRepository {
    db: Arc<DatabaseConnection>,
}

impl AboutInfoRepository {
    /// Create a new about info repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an about entry by kind ("company", "privacy", ...).
    pub async fn find_by_kind(&self, kind: &str) -> AppResult<Option<about_info::Model>> {
        AboutInfo::find()
            .filter(about_info::Column::Kind.eq(kind))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
