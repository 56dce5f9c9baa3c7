//! Travel plan composition service.

use std::collections::HashMap;

use sea_orm::Set;
use serde::Serialize;
use travelcloud_common::{AppError, AppResult, IdGenerator};
use travelcloud_db::{
    entities::{attraction, travel_plan, travel_plan_item},
    repositories::{AttractionRepository, TravelPlanRepository},
};

/// Fields of a new plan item.
#[derive(Debug, Clone)]
pub struct NewPlanItem {
    /// 1-based day number.
    pub day: i32,
    /// Optional attraction reference, accepted without validation.
    pub attraction_id: Option<String>,
    /// Freeform label such as "morning".
    pub time_period: Option<String>,
    /// Freeform note.
    pub note: Option<String>,
}

/// Fields of a new plan.
#[derive(Debug, Clone)]
pub struct NewPlan {
    /// Required title.
    pub title: String,
    /// First travel day.
    pub start_date: Option<chrono::NaiveDate>,
    /// Last travel day.
    pub end_date: Option<chrono::NaiveDate>,
    /// Freeform description.
    pub description: Option<String>,
    /// Initial itinerary items.
    pub items: Vec<NewPlanItem>,
}

/// A plan item with its attraction resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItemDetail {
    /// The item itself.
    #[serde(flatten)]
    pub item: travel_plan_item::Model,
    /// Resolved attraction, null when the reference is absent or dangling.
    pub attraction: Option<attraction::Model>,
}

/// A plan with its ordered, resolved items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetail {
    /// The plan itself.
    #[serde(flatten)]
    pub plan: travel_plan::Model,
    /// Items ordered by (day, insertion).
    pub items: Vec<PlanItemDetail>,
}

/// Travel plan service.
#[derive(Clone)]
pub struct TravelPlanService {
    plan_repo: TravelPlanRepository,
    attraction_repo: AttractionRepository,
    id_gen: IdGenerator,
}

impl TravelPlanService {
    /// Create a new travel plan service.
    #[must_use]
    pub const fn new(plan_repo: TravelPlanRepository, attraction_repo: AttractionRepository) -> Self {
        Self {
            plan_repo,
            attraction_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a plan with its initial items. Attraction references are
    /// stored as given; a dangling one degrades to a null attraction
    /// on read.
    pub async fn create(&self, user_id: &str, new: NewPlan) -> AppResult<travel_plan::Model> {
        if new.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }

        let plan = travel_plan::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            title: Set(new.title),
            start_date: Set(new.start_date),
            end_date: Set(new.end_date),
            description: Set(new.description),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(chrono::Utc::now().into()),
        };
        let plan = self.plan_repo.create(plan).await?;

        for item in new.items {
            self.insert_item(&plan.id, item).await?;
        }

        Ok(plan)
    }

    /// Append an item to an existing plan. Only the owner may append.
    pub async fn add_item(
        &self,
        plan_id: &str,
        requester: &str,
        item: NewPlanItem,
    ) -> AppResult<travel_plan_item::Model> {
        self.load_owned(plan_id, Some(requester)).await?;

        self.insert_item(plan_id, item).await
    }

    async fn insert_item(
        &self,
        plan_id: &str,
        item: NewPlanItem,
    ) -> AppResult<travel_plan_item::Model> {
        if item.day < 1 {
            return Err(AppError::Validation("day must be at least 1".to_string()));
        }
        let model = travel_plan_item::ActiveModel {
            id: Set(self.id_gen.generate()),
            plan_id: Set(plan_id.to_string()),
            day: Set(item.day),
            attraction_id: Set(item.attraction_id),
            time_period: Set(item.time_period),
            note: Set(item.note),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(chrono::Utc::now().into()),
        };
        self.plan_repo.create_item(model).await
    }

    /// A user's plans.
    pub async fn list(
        &self,
        user_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<travel_plan::Model>, u64)> {
        let plans = self.plan_repo.find_by_user(user_id, limit, offset).await?;
        let total = self.plan_repo.count_by_user(user_id).await?;
        Ok((plans, total))
    }

    /// Plan detail with ordered items and batch-resolved attractions.
    /// When a requesting identity is present, ownership is enforced here,
    /// in one place.
    pub async fn detail(&self, plan_id: &str, requester: Option<&str>) -> AppResult<PlanDetail> {
        let plan = self.load_owned(plan_id, requester).await?;

        let items = self.plan_repo.find_items(plan_id).await?;

        let attraction_ids: Vec<String> = items
            .iter()
            .filter_map(|i| i.attraction_id.clone())
            .collect();
        let attractions: HashMap<String, attraction::Model> = self
            .attraction_repo
            .find_by_ids(&attraction_ids)
            .await?
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect();

        let items = items
            .into_iter()
            .map(|item| {
                let attraction = item
                    .attraction_id
                    .as_ref()
                    .and_then(|id| attractions.get(id).cloned());
                PlanItemDetail { item, attraction }
            })
            .collect();

        Ok(PlanDetail { plan, items })
    }

    /// Delete a plan. Items cascade away at the schema level.
    pub async fn delete(&self, plan_id: &str, requester: &str) -> AppResult<()> {
        self.load_owned(plan_id, Some(requester)).await?;
        self.plan_repo.delete(plan_id).await
    }

    async fn load_owned(
        &self,
        plan_id: &str,
        requester: Option<&str>,
    ) -> AppResult<travel_plan::Model> {
        let plan = self
            .plan_repo
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| AppError::NotFound("plan not found".to_string()))?;

        if let Some(requester) = requester {
            if plan.user_id != requester {
                return Err(AppError::Forbidden("not your plan".to_string()));
            }
        }

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn create_test_plan(id: &str, user_id: &str) -> travel_plan::Model {
        travel_plan::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: "Golden week".to_string(),
            start_date: None,
            end_date: None,
            description: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn create_test_item(id: &str, day: i32, attraction_id: Option<&str>) -> travel_plan_item::Model {
        travel_plan_item::Model {
            id: id.to_string(),
            plan_id: "p1".to_string(),
            day,
            attraction_id: attraction_id.map(str::to_string),
            time_period: None,
            note: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn create_test_attraction(id: &str) -> attraction::Model {
        attraction::Model {
            id: id.to_string(),
            name: "Kinkaku-ji".to_string(),
            cover_image: None,
            images: json!([]),
            description: None,
            address: None,
            location: None,
            price: None,
            opening_hours: None,
            tips: None,
            category: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_detail_owner_mismatch_is_forbidden() {
        let plan = create_test_plan("p1", "owner");

        let plan_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[plan]])
                .into_connection(),
        );
        let attraction_db =
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = TravelPlanService::new(
            TravelPlanRepository::new(plan_db),
            AttractionRepository::new(attraction_db),
        );

        let result = service.detail("p1", Some("intruder")).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_detail_resolves_attractions_and_tolerates_dangling() {
        let plan = create_test_plan("p1", "owner");
        let i1 = create_test_item("i1", 1, Some("a1"));
        let i2 = create_test_item("i2", 1, Some("a-gone"));
        let i3 = create_test_item("i3", 2, None);

        let plan_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[plan]])
                .append_query_results([[i1, i2, i3]])
                .into_connection(),
        );
        let attraction_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_attraction("a1")]])
                .into_connection(),
        );

        let service = TravelPlanService::new(
            TravelPlanRepository::new(plan_db),
            AttractionRepository::new(attraction_db),
        );

        let detail = service.detail("p1", Some("owner")).await.unwrap();

        assert_eq!(detail.items.len(), 3);
        assert!(detail.items[0].attraction.is_some());
        assert!(detail.items[1].attraction.is_none());
        assert!(detail.items[2].attraction.is_none());
    }

    #[tokio::test]
    async fn test_add_item_owner_mismatch_is_forbidden() {
        let plan = create_test_plan("p1", "owner");

        let plan_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[plan]])
                .into_connection(),
        );
        let attraction_db =
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = TravelPlanService::new(
            TravelPlanRepository::new(plan_db),
            AttractionRepository::new(attraction_db),
        );

        let result = service
            .add_item(
                "p1",
                "intruder",
                NewPlanItem {
                    day: 1,
                    attraction_id: None,
                    time_period: None,
                    note: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_add_item_missing_plan() {
        let plan_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<travel_plan::Model>::new()])
                .into_connection(),
        );
        let attraction_db =
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = TravelPlanService::new(
            TravelPlanRepository::new(plan_db),
            AttractionRepository::new(attraction_db),
        );

        let result = service
            .add_item(
                "missing",
                "owner",
                NewPlanItem {
                    day: 1,
                    attraction_id: None,
                    time_period: None,
                    note: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_add_item_rejects_day_zero() {
        let plan = create_test_plan("p1", "owner");
        let plan_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[plan]])
                .into_connection(),
        );
        let attraction_db =
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = TravelPlanService::new(
            TravelPlanRepository::new(plan_db),
            AttractionRepository::new(attraction_db),
        );

        let result = service
            .add_item(
                "p1",
                "owner",
                NewPlanItem {
                    day: 0,
                    attraction_id: None,
                    time_period: None,
                    note: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
