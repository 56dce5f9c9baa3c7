//! Companion, reservation and review repositories.

use std::sync::Arc;

use crate::entities::{
    companion, companion_reservation, companion_reservation::ReservationStatus, companion_review,
    companion_tag, companion_tag_relation, Companion, CompanionReservation, CompanionReview,
    CompanionTag, CompanionTagRelation,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};
use travelcloud_common::{AppError, AppResult};

/// Filters for the companion listing.
#[derive(Debug, Default, Clone)]
pub struct CompanionFilter {
    /// Substring match on location.
    pub location: Option<String>,
    /// Restrict to companions carrying this tag.
    pub tag_id: Option<String>,
    /// Minimum price per day.
    pub min_price: Option<f64>,
    /// Maximum price per day.
    pub max_price: Option<f64>,
}

/// Companion repository for database operations.
#[derive(Clone)]
pub struct CompanionRepository {
    db: Arc<DatabaseConnection>,
}

impl CompanionRepository {
    /// Create a new companion repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a companion by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<companion::Model>> {
        Companion::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Batch-load companions in one query, for order listings.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<companion::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Companion::find()
            .filter(companion::Column::Id.is_in(ids.iter().map(String::as_str)))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Companion ids carrying a tag, for the tag filter.
    pub async fn find_companion_ids_by_tag(&self, tag_id: &str) -> AppResult<Vec<String>> {
        let relations = CompanionTagRelation::find()
            .filter(companion_tag_relation::Column::TagId.eq(tag_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(relations.into_iter().map(|r| r.companion_id).collect())
    }

    /// List active companions, best rated first.
    pub async fn list(
        &self,
        filter: &CompanionFilter,
        tag_companion_ids: Option<&[String]>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<companion::Model>> {
        self.filtered(filter, tag_companion_ids)
            .order_by_desc(companion::Column::Rating)
            .order_by_desc(companion::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count active companions under the same filters as `list`.
    pub async fn count(
        &self,
        filter: &CompanionFilter,
        tag_companion_ids: Option<&[String]>,
    ) -> AppResult<u64> {
        self.filtered(filter, tag_companion_ids)
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    fn filtered(
        &self,
        filter: &CompanionFilter,
        tag_companion_ids: Option<&[String]>,
    ) -> sea_orm::Select<Companion> {
        let mut query = Companion::find().filter(companion::Column::Status.eq(1));

        if let Some(location) = &filter.location {
            query = query.filter(companion::Column::Location.contains(location));
        }
        if let Some(min) = filter.min_price {
            query = query.filter(companion::Column::Price.gte(min));
        }
        if let Some(max) = filter.max_price {
            query = query.filter(companion::Column::Price.lte(max));
        }
        if let Some(ids) = tag_companion_ids {
            query = query.filter(companion::Column::Id.is_in(ids.iter().map(String::as_str)));
        }

        query
    }

    /// The whole tag vocabulary.
    pub async fn find_all_tags(&self) -> AppResult<Vec<companion_tag::Model>> {
        CompanionTag::find()
            .order_by_asc(companion_tag::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Tag relations for a set of companions, one query.
    pub async fn find_tag_relations(
        &self,
        companion_ids: &[String],
    ) -> AppResult<Vec<companion_tag_relation::Model>> {
        if companion_ids.is_empty() {
            return Ok(Vec::new());
        }
        CompanionTagRelation::find()
            .filter(
                companion_tag_relation::Column::CompanionId
                    .is_in(companion_ids.iter().map(String::as_str)),
            )
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Search companions by keyword over title, description and location.
    pub async fn search(
        &self,
        keyword: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<companion::Model>> {
        Companion::find()
            .filter(companion::Column::Status.eq(1))
            .filter(Self::keyword_condition(keyword))
            .order_by_desc(companion::Column::Rating)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count companions matching a keyword.
    pub async fn search_count(&self, keyword: &str) -> AppResult<u64> {
        Companion::find()
            .filter(companion::Column::Status.eq(1))
            .filter(Self::keyword_condition(keyword))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    fn keyword_condition(keyword: &str) -> Condition {
        Condition::any()
            .add(companion::Column::Title.contains(keyword))
            .add(companion::Column::Description.contains(keyword))
            .add(companion::Column::Location.contains(keyword))
    }

    /// Create a reservation.
    pub async fn create_reservation(
        &self,
        model: companion_reservation::ActiveModel,
    ) -> AppResult<companion_reservation::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a reservation by ID.
    pub async fn find_reservation_by_id(
        &self,
        id: &str,
    ) -> AppResult<Option<companion_reservation::Model>> {
        CompanionReservation::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// A user's reservations, newest first, optionally restricted by status.
    pub async fn find_reservations_by_user(
        &self,
        user_id: &str,
        status: Option<ReservationStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<companion_reservation::Model>> {
        let mut query = CompanionReservation::find()
            .filter(companion_reservation::Column::UserId.eq(user_id))
            .order_by_desc(companion_reservation::Column::CreatedAt);

        if let Some(status) = status {
            query = query.filter(companion_reservation::Column::Status.eq(status));
        }

        query
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count a user's reservations, optionally restricted by status.
    pub async fn count_reservations_by_user(
        &self,
        user_id: &str,
        status: Option<ReservationStatus>,
    ) -> AppResult<u64> {
        let mut query = CompanionReservation::find()
            .filter(companion_reservation::Column::UserId.eq(user_id));

        if let Some(status) = status {
            query = query.filter(companion_reservation::Column::Status.eq(status));
        }

        query
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a reservation.
    pub async fn update_reservation(
        &self,
        model: companion_reservation::ActiveModel,
    ) -> AppResult<companion_reservation::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Reviews of reservations in a set, for annotating order listings.
    pub async fn find_reviews_by_reservations(
        &self,
        reservation_ids: &[String],
        user_id: &str,
    ) -> AppResult<Vec<companion_review::Model>> {
        if reservation_ids.is_empty() {
            return Ok(Vec::new());
        }
        CompanionReview::find()
            .filter(
                companion_review::Column::ReservationId
                    .is_in(reservation_ids.iter().map(String::as_str)),
            )
            .filter(companion_review::Column::UserId.eq(user_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Most recent reviews of a companion.
    pub async fn find_recent_reviews(
        &self,
        companion_id: &str,
        limit: u64,
    ) -> AppResult<Vec<companion_review::Model>> {
        CompanionReview::find()
            .filter(companion_review::Column::CompanionId.eq(companion_id))
            .order_by_desc(companion_review::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a review and write the companion's new running-average
    /// rating in one transaction. The unique index on
    /// (reservation_id, user_id) turns a duplicate into `Conflict` and
    /// the transaction rolls back whole.
    pub async fn create_review_with_rating(
        &self,
        review: companion_review::ActiveModel,
        companion_id: &str,
        new_rating: f64,
    ) -> AppResult<companion_review::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let model = review.insert(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("reservation already reviewed".to_string())
            }
            _ => AppError::Database(e.to_string()),
        })?;

        Companion::update_many()
            .col_expr(companion::Column::Rating, Expr::value(new_rating))
            .col_expr(
                companion::Column::ReviewCount,
                Expr::col(companion::Column::ReviewCount).add(1),
            )
            .filter(companion::Column::Id.eq(companion_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_companion(id: &str, rating: f64, review_count: i32) -> companion::Model {
        companion::Model {
            id: id.to_string(),
            user_id: "open-1".to_string(),
            title: "Kyoto local guide".to_string(),
            description: None,
            avatar: None,
            cover_image: None,
            price: 300.0,
            location: Some("Kyoto".to_string()),
            experience_years: 5,
            languages: Some("en,ja".to_string()),
            rating,
            review_count,
            status: 1,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn create_test_reservation(
        id: &str,
        user_id: &str,
        status: ReservationStatus,
    ) -> companion_reservation::Model {
        companion_reservation::Model {
            id: id.to_string(),
            companion_id: "c1".to_string(),
            user_id: user_id.to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 3).unwrap(),
            traveler_count: 2,
            special_needs: None,
            status,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn create_test_review(id: &str, rating: f64) -> companion_review::Model {
        companion_review::Model {
            id: id.to_string(),
            reservation_id: "r1".to_string(),
            user_id: "open-1".to_string(),
            companion_id: "c1".to_string(),
            rating,
            content: Some("great trip".to_string()),
            images: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_list_active() {
        let c1 = create_test_companion("c1", 4.8, 12);
        let c2 = create_test_companion("c2", 4.5, 3);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1, c2]])
                .into_connection(),
        );

        let repo = CompanionRepository::new(db);
        let result = repo
            .list(&CompanionFilter::default(), None, 10, 0)
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert!(result[0].rating >= result[1].rating);
    }

    #[tokio::test]
    async fn test_find_tag_relations_empty_skips_query() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let repo = CompanionRepository::new(db);
        let result = repo.find_tag_relations(&[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_find_reservations_by_user_with_status() {
        let r1 = create_test_reservation("r1", "open-1", ReservationStatus::Completed);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1]])
                .into_connection(),
        );

        let repo = CompanionRepository::new(db);
        let result = repo
            .find_reservations_by_user("open-1", Some(ReservationStatus::Completed), 10, 0)
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].status, ReservationStatus::Completed);
    }

    #[tokio::test]
    async fn test_create_review_with_rating_commits() {
        let review = create_test_review("rv1", 5.0);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[review.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = CompanionRepository::new(db);
        let active = companion_review::ActiveModel {
            id: sea_orm::ActiveValue::Set("rv1".to_string()),
            reservation_id: sea_orm::ActiveValue::Set("r1".to_string()),
            user_id: sea_orm::ActiveValue::Set("open-1".to_string()),
            companion_id: sea_orm::ActiveValue::Set("c1".to_string()),
            rating: sea_orm::ActiveValue::Set(5.0),
            content: sea_orm::ActiveValue::Set(Some("great trip".to_string())),
            images: sea_orm::ActiveValue::Set(None),
            created_at: sea_orm::ActiveValue::Set(Utc::now().into()),
        };

        let result = repo.create_review_with_rating(active, "c1", 5.0).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().rating, 5.0);
    }
}
