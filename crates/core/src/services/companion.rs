//! Companion booking and rating lifecycle service.

use std::collections::{HashMap, HashSet};

use sea_orm::Set;
use serde::Serialize;
use serde_json::json;
use travelcloud_common::{AppError, AppResult, IdGenerator};
use travelcloud_db::{
    entities::{
        companion, companion_reservation, companion_reservation::ReservationStatus,
        companion_review, companion_tag,
    },
    repositories::{CompanionFilter, CompanionRepository},
};

/// A companion with its tags resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionEntry {
    /// The companion itself.
    #[serde(flatten)]
    pub companion: companion::Model,
    /// Tag vocabulary entries attached to it.
    pub tags: Vec<companion_tag::Model>,
}

/// Companion detail with tags and recent reviews.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionDetail {
    /// The companion itself.
    #[serde(flatten)]
    pub companion: companion::Model,
    /// Tag vocabulary entries attached to it.
    pub tags: Vec<companion_tag::Model>,
    /// Five most recent reviews.
    pub recent_reviews: Vec<companion_review::Model>,
}

/// A reservation with its companion summary and review state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationEntry {
    /// The reservation itself.
    #[serde(flatten)]
    pub reservation: companion_reservation::Model,
    /// Companion summary, null when the companion row is gone.
    pub companion: Option<serde_json::Value>,
    /// Whether the booking user has already reviewed it.
    pub has_reviewed: bool,
}

/// Fields of a new reservation.
#[derive(Debug, Clone)]
pub struct NewReservation {
    /// Companion being booked.
    pub companion_id: String,
    /// First day of the trip.
    pub start_date: chrono::NaiveDate,
    /// Last day of the trip.
    pub end_date: chrono::NaiveDate,
    /// Party size.
    pub traveler_count: i32,
    /// Dietary or accessibility notes.
    pub special_needs: Option<String>,
}

/// Fold one more rating into a running average without rescanning
/// past reviews.
#[must_use]
pub fn next_rating(current: f64, review_count: i32, rating: f64) -> f64 {
    current + (rating - current) / f64::from(review_count + 1)
}

/// Companion service.
#[derive(Clone)]
pub struct CompanionService {
    companion_repo: CompanionRepository,
    id_gen: IdGenerator,
}

impl CompanionService {
    /// Create a new companion service.
    #[must_use]
    pub const fn new(companion_repo: CompanionRepository) -> Self {
        Self {
            companion_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List active companions, best rated first, with tags resolved.
    pub async fn list(
        &self,
        filter: CompanionFilter,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<CompanionEntry>, u64)> {
        let tag_companion_ids = match &filter.tag_id {
            Some(tag_id) => Some(self.companion_repo.find_companion_ids_by_tag(tag_id).await?),
            None => None,
        };

        let companions = self
            .companion_repo
            .list(&filter, tag_companion_ids.as_deref(), limit, offset)
            .await?;
        let total = self
            .companion_repo
            .count(&filter, tag_companion_ids.as_deref())
            .await?;

        let tags_by_companion = self
            .tags_by_companion(companions.iter().map(|c| c.id.clone()).collect())
            .await?;

        let entries = companions
            .into_iter()
            .map(|companion| {
                let tags = tags_by_companion
                    .get(&companion.id)
                    .cloned()
                    .unwrap_or_default();
                CompanionEntry { companion, tags }
            })
            .collect();

        Ok((entries, total))
    }

    /// Companion detail with tags and the five most recent reviews.
    pub async fn detail(&self, id: &str) -> AppResult<CompanionDetail> {
        let companion = self
            .companion_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("companion not found".to_string()))?;

        let tags = self
            .tags_by_companion(vec![companion.id.clone()])
            .await?
            .remove(&companion.id)
            .unwrap_or_default();
        let recent_reviews = self.companion_repo.find_recent_reviews(id, 5).await?;

        Ok(CompanionDetail {
            companion,
            tags,
            recent_reviews,
        })
    }

    /// The tag vocabulary.
    pub async fn tags(&self) -> AppResult<Vec<companion_tag::Model>> {
        self.companion_repo.find_all_tags().await
    }

    /// Book a companion. The trip must not be inverted or start in
    /// the past.
    pub async fn reserve(
        &self,
        user_id: &str,
        new: NewReservation,
    ) -> AppResult<companion_reservation::Model> {
        self.companion_repo
            .find_by_id(&new.companion_id)
            .await?
            .ok_or_else(|| AppError::NotFound("companion not found".to_string()))?;

        if new.start_date > new.end_date {
            return Err(AppError::Validation(
                "start date must not be after end date".to_string(),
            ));
        }
        if new.start_date < chrono::Utc::now().date_naive() {
            return Err(AppError::Validation(
                "start date must not be in the past".to_string(),
            ));
        }
        if new.traveler_count < 1 {
            return Err(AppError::Validation(
                "traveler count must be at least 1".to_string(),
            ));
        }

        let model = companion_reservation::ActiveModel {
            id: Set(self.id_gen.generate()),
            companion_id: Set(new.companion_id),
            user_id: Set(user_id.to_string()),
            start_date: Set(new.start_date),
            end_date: Set(new.end_date),
            traveler_count: Set(new.traveler_count),
            special_needs: Set(new.special_needs),
            status: Set(ReservationStatus::Pending),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(chrono::Utc::now().into()),
        };
        self.companion_repo.create_reservation(model).await
    }

    /// A user's reservations, newest first, annotated with a companion
    /// summary and whether each one has been reviewed.
    pub async fn reservations(
        &self,
        user_id: &str,
        status: Option<ReservationStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<ReservationEntry>, u64)> {
        let reservations = self
            .companion_repo
            .find_reservations_by_user(user_id, status, limit, offset)
            .await?;
        let total = self
            .companion_repo
            .count_reservations_by_user(user_id, status)
            .await?;

        let companion_ids: Vec<String> = reservations
            .iter()
            .map(|r| r.companion_id.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let companions: HashMap<String, companion::Model> = self
            .companion_repo
            .find_by_ids(&companion_ids)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        let reservation_ids: Vec<String> = reservations.iter().map(|r| r.id.clone()).collect();
        let reviewed: HashSet<String> = self
            .companion_repo
            .find_reviews_by_reservations(&reservation_ids, user_id)
            .await?
            .into_iter()
            .map(|rv| rv.reservation_id)
            .collect();

        let entries = reservations
            .into_iter()
            .map(|reservation| {
                let companion = companions.get(&reservation.companion_id).map(|c| {
                    json!({
                        "id": c.id,
                        "title": c.title,
                        "avatar": c.avatar,
                        "price": c.price,
                        "rating": c.rating,
                        "location": c.location,
                    })
                });
                let has_reviewed = reviewed.contains(&reservation.id);
                ReservationEntry {
                    reservation,
                    companion,
                    has_reviewed,
                }
            })
            .collect();

        Ok((entries, total))
    }

    /// Move a reservation along its lifecycle. Anything outside
    /// Pending→Confirmed, Confirmed→Completed and
    /// Pending/Confirmed→Cancelled is rejected.
    pub async fn update_status(
        &self,
        reservation_id: &str,
        next: ReservationStatus,
    ) -> AppResult<companion_reservation::Model> {
        let reservation = self
            .companion_repo
            .find_reservation_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("reservation not found".to_string()))?;

        if !reservation.status.can_transition_to(next) {
            return Err(AppError::Validation(format!(
                "illegal status transition: {:?} -> {next:?}",
                reservation.status
            )));
        }

        let mut active: companion_reservation::ActiveModel = reservation.into();
        active.status = Set(next);
        active.updated_at = Set(chrono::Utc::now().into());
        self.companion_repo.update_reservation(active).await
    }

    /// Review a completed reservation. The rating folds into the
    /// companion's running average inside one transaction.
    pub async fn review(
        &self,
        user_id: &str,
        reservation_id: &str,
        rating: f64,
        content: Option<String>,
        images: Vec<String>,
    ) -> AppResult<companion_review::Model> {
        if !(1.0..=5.0).contains(&rating) {
            return Err(AppError::Validation(
                "rating must be between 1 and 5".to_string(),
            ));
        }

        let reservation = self
            .companion_repo
            .find_reservation_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("reservation not found".to_string()))?;

        if reservation.user_id != user_id {
            return Err(AppError::Forbidden("not your reservation".to_string()));
        }
        if reservation.status != ReservationStatus::Completed {
            return Err(AppError::Validation(
                "only completed reservations can be reviewed".to_string(),
            ));
        }

        let companion = self
            .companion_repo
            .find_by_id(&reservation.companion_id)
            .await?
            .ok_or_else(|| AppError::NotFound("companion not found".to_string()))?;
        let new_rating = next_rating(companion.rating, companion.review_count, rating);

        let images = if images.is_empty() {
            None
        } else {
            Some(images.join(","))
        };

        let model = companion_review::ActiveModel {
            id: Set(self.id_gen.generate()),
            reservation_id: Set(reservation_id.to_string()),
            user_id: Set(user_id.to_string()),
            companion_id: Set(reservation.companion_id.clone()),
            rating: Set(rating),
            content: Set(content),
            images: Set(images),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.companion_repo
            .create_review_with_rating(model, &reservation.companion_id, new_rating)
            .await
    }

    async fn tags_by_companion(
        &self,
        companion_ids: Vec<String>,
    ) -> AppResult<HashMap<String, Vec<companion_tag::Model>>> {
        let relations = self.companion_repo.find_tag_relations(&companion_ids).await?;
        if relations.is_empty() {
            return Ok(HashMap::new());
        }

        let tags: HashMap<String, companion_tag::Model> = self
            .companion_repo
            .find_all_tags()
            .await?
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect();

        let mut out: HashMap<String, Vec<companion_tag::Model>> = HashMap::new();
        for relation in relations {
            if let Some(tag) = tags.get(&relation.tag_id) {
                out.entry(relation.companion_id).or_default().push(tag.clone());
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_companion(id: &str) -> companion::Model {
        companion::Model {
            id: id.to_string(),
            user_id: "open-9".to_string(),
            title: "Kyoto local guide".to_string(),
            description: None,
            avatar: None,
            cover_image: None,
            price: 300.0,
            location: Some("Kyoto".to_string()),
            experience_years: 5,
            languages: None,
            rating: 4.0,
            review_count: 3,
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
            start_date: Utc::now().date_naive(),
            end_date: Utc::now().date_naive(),
            traveler_count: 2,
            special_needs: None,
            status,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> CompanionService {
        CompanionService::new(CompanionRepository::new(db))
    }

    #[tokio::test]
    async fn test_reserve_inverted_dates() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_companion("c1")]])
                .into_connection(),
        );

        let today = Utc::now().date_naive();
        let result = service(db)
            .reserve(
                "open-1",
                NewReservation {
                    companion_id: "c1".to_string(),
                    start_date: today + Duration::days(3),
                    end_date: today + Duration::days(1),
                    traveler_count: 2,
                    special_needs: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_reserve_past_start() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_companion("c1")]])
                .into_connection(),
        );

        let today = Utc::now().date_naive();
        let result = service(db)
            .reserve(
                "open-1",
                NewReservation {
                    companion_id: "c1".to_string(),
                    start_date: today - Duration::days(1),
                    end_date: today + Duration::days(1),
                    traveler_count: 2,
                    special_needs: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_status_illegal_transition() {
        let reservation = create_test_reservation("r1", "open-1", ReservationStatus::Completed);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[reservation]])
                .into_connection(),
        );

        let result = service(db)
            .update_status("r1", ReservationStatus::Confirmed)
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_status_pending_to_confirmed() {
        let reservation = create_test_reservation("r1", "open-1", ReservationStatus::Pending);
        let updated = create_test_reservation("r1", "open-1", ReservationStatus::Confirmed);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[reservation]])
                .append_query_results([[updated]])
                .into_connection(),
        );

        let result = service(db)
            .update_status("r1", ReservationStatus::Confirmed)
            .await
            .unwrap();

        assert_eq!(result.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn test_next_rating_running_average() {
        let updated = next_rating(4.0, 3, 5.0);
        assert!((updated - 4.25).abs() < f64::EPSILON);

        let first = next_rating(0.0, 0, 3.0);
        assert!((first - 3.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_review_rejects_rating_out_of_range() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service(db)
            .review("open-1", "r1", 6.0, None, Vec::new())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_review_requires_completed_reservation() {
        let reservation = create_test_reservation("r1", "open-1", ReservationStatus::Confirmed);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[reservation]])
                .into_connection(),
        );

        let result = service(db)
            .review("open-1", "r1", 5.0, None, Vec::new())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_review_wrong_user_is_forbidden() {
        let reservation = create_test_reservation("r1", "someone-else", ReservationStatus::Completed);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[reservation]])
                .into_connection(),
        );

        let result = service(db)
            .review("open-1", "r1", 5.0, None, Vec::new())
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
