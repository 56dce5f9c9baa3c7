//! Solution template service.

use chrono::Duration;
use sea_orm::Set;
use serde::Serialize;
use travelcloud_common::{AppError, AppResult, IdGenerator};
use travelcloud_db::{
    entities::{solution, solution_application, travel_plan},
    repositories::{SolutionRepository, TravelPlanRepository},
};

/// Result of applying a solution.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOutcome {
    /// The recorded application.
    #[serde(flatten)]
    pub application: solution_application::Model,
    /// The spawned plan, when a travel date was given.
    pub plan: Option<travel_plan::Model>,
}

/// Last day of a plan spawned from a solution: the travel date plus the
/// template's duration, inclusive. Unknown duration leaves it unset.
#[must_use]
pub fn plan_end_date(
    start: chrono::NaiveDate,
    duration: Option<i32>,
) -> Option<chrono::NaiveDate> {
    duration.map(|days| start + Duration::days(i64::from(days) - 1))
}

/// Solution service.
#[derive(Clone)]
pub struct SolutionService {
    solution_repo: SolutionRepository,
    plan_repo: TravelPlanRepository,
    id_gen: IdGenerator,
}

impl SolutionService {
    /// Create a new solution service.
    #[must_use]
    pub const fn new(solution_repo: SolutionRepository, plan_repo: TravelPlanRepository) -> Self {
        Self {
            solution_repo,
            plan_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List solutions, most viewed first.
    pub async fn list(
        &self,
        duration: Option<i32>,
        difficulty: Option<i32>,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<solution::Model>, u64)> {
        let solutions = self
            .solution_repo
            .list(duration, difficulty, limit, offset)
            .await?;
        let total = self.solution_repo.count(duration, difficulty).await?;
        Ok((solutions, total))
    }

    /// Solution detail. Bumps the view counter.
    pub async fn detail(&self, id: &str) -> AppResult<solution::Model> {
        let solution = self
            .solution_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("solution not found".to_string()))?;

        self.solution_repo.increment_view_count(id).await?;

        Ok(solution)
    }

    /// Apply a solution. Always records the application and bumps the
    /// apply counter. With a travel date, also spawns a plan spanning
    /// the solution's duration and links it to the application.
    /// Itinerary items are not derived from the template body.
    pub async fn apply(
        &self,
        user_id: &str,
        solution_id: &str,
        travel_date: Option<chrono::NaiveDate>,
        notes: Option<String>,
    ) -> AppResult<ApplyOutcome> {
        let solution = self
            .solution_repo
            .find_by_id(solution_id)
            .await?
            .ok_or_else(|| AppError::NotFound("solution not found".to_string()))?;

        let plan = match travel_date {
            Some(start) => {
                let end = plan_end_date(start, solution.duration);
                let model = travel_plan::ActiveModel {
                    id: Set(self.id_gen.generate()),
                    user_id: Set(user_id.to_string()),
                    title: Set(format!("based on {}", solution.title)),
                    start_date: Set(Some(start)),
                    end_date: Set(end),
                    description: Set(solution.description.clone()),
                    created_at: Set(chrono::Utc::now().into()),
                    updated_at: Set(chrono::Utc::now().into()),
                };
                Some(self.plan_repo.create(model).await?)
            }
            None => None,
        };

        let application = solution_application::ActiveModel {
            id: Set(self.id_gen.generate()),
            solution_id: Set(solution_id.to_string()),
            user_id: Set(user_id.to_string()),
            travel_date: Set(travel_date),
            notes: Set(notes),
            plan_id: Set(plan.as_ref().map(|p| p.id.clone())),
            created_at: Set(chrono::Utc::now().into()),
        };
        let application = self.solution_repo.create_application(application).await?;

        self.solution_repo.increment_apply_count(solution_id).await?;

        if let Some(plan) = &plan {
            tracing::info!(
                solution_id = solution_id,
                plan_id = %plan.id,
                "Plan spawned from solution"
            );
        }

        Ok(ApplyOutcome { application, plan })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_solution(id: &str, duration: Option<i32>) -> solution::Model {
        solution::Model {
            id: id.to_string(),
            title: "5 days around Kansai".to_string(),
            description: None,
            cover_image: None,
            content: None,
            duration,
            price_estimate: None,
            difficulty: Some(2),
            view_count: 0,
            apply_count: 0,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn create_test_plan(id: &str, start: NaiveDate, end: Option<NaiveDate>) -> travel_plan::Model {
        travel_plan::Model {
            id: id.to_string(),
            user_id: "open-1".to_string(),
            title: "based on 5 days around Kansai".to_string(),
            start_date: Some(start),
            end_date: end,
            description: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn create_test_application(id: &str, plan_id: Option<&str>) -> solution_application::Model {
        solution_application::Model {
            id: id.to_string(),
            solution_id: "s1".to_string(),
            user_id: "open-1".to_string(),
            travel_date: None,
            notes: None,
            plan_id: plan_id.map(str::to_string),
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_plan_end_date_inclusive() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            plan_end_date(start, Some(5)),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(plan_end_date(start, Some(1)), Some(start));
        assert_eq!(plan_end_date(start, None), None);
    }

    #[tokio::test]
    async fn test_apply_missing_solution() {
        let solution_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<solution::Model>::new()])
                .into_connection(),
        );
        let plan_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = SolutionService::new(
            SolutionRepository::new(solution_db),
            TravelPlanRepository::new(plan_db),
        );

        let result = service.apply("open-1", "missing", None, None).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_apply_without_date_records_only() {
        let solution = create_test_solution("s1", Some(5));
        let application = create_test_application("ap1", None);

        let solution_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[solution]])
                .append_query_results([[application]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let plan_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = SolutionService::new(
            SolutionRepository::new(solution_db),
            TravelPlanRepository::new(plan_db),
        );

        let outcome = service.apply("open-1", "s1", None, None).await.unwrap();
        assert!(outcome.plan.is_none());
        assert!(outcome.application.plan_id.is_none());
    }

    #[tokio::test]
    async fn test_apply_with_date_spans_duration() {
        let solution = create_test_solution("s1", Some(5));
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let expected_end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let plan = create_test_plan("p1", start, Some(expected_end));
        let application = create_test_application("ap1", Some("p1"));

        let solution_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[solution]])
                .append_query_results([[application]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let plan_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[plan]])
                .into_connection(),
        );

        let service = SolutionService::new(
            SolutionRepository::new(solution_db),
            TravelPlanRepository::new(plan_db),
        );

        let outcome = service
            .apply("open-1", "s1", Some(start), None)
            .await
            .unwrap();

        let plan = outcome.plan.unwrap();
        assert_eq!(plan.start_date, Some(start));
        assert_eq!(plan.end_date, Some(expected_end));
        assert_eq!(outcome.application.plan_id.as_deref(), Some("p1"));
    }
}
