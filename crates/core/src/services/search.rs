//! Cross-entity keyword search.

use serde::Serialize;
use travelcloud_common::{AppError, AppResult};
use travelcloud_db::{
    entities::{attraction, companion, news, solution},
    repositories::{
        AttractionRepository, CompanionRepository, NewsRepository, SolutionRepository,
    },
};

/// What to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// A slice of every type.
    All,
    /// Attractions only.
    Attraction,
    /// News only.
    News,
    /// Companions only.
    Companion,
    /// Solutions only.
    Solution,
}

impl SearchScope {
    /// Parse the wire scope string.
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "all" => Ok(Self::All),
            "attraction" => Ok(Self::Attraction),
            "news" => Ok(Self::News),
            "companion" => Ok(Self::Companion),
            "solution" => Ok(Self::Solution),
            other => Err(AppError::Validation(format!(
                "unknown search scope: {other}"
            ))),
        }
    }
}

/// Search results, grouped by type.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Matching attractions.
    pub attractions: Vec<attraction::Model>,
    /// Matching news posts.
    pub news: Vec<news::Model>,
    /// Matching companions.
    pub companions: Vec<companion::Model>,
    /// Matching solutions.
    pub solutions: Vec<solution::Model>,
    /// Precise COUNT for a single scope; for `all`, the number of rows
    /// actually returned across types.
    pub total: u64,
}

/// Search service fanning out over the content repositories.
#[derive(Clone)]
pub struct SearchService {
    attraction_repo: AttractionRepository,
    news_repo: NewsRepository,
    companion_repo: CompanionRepository,
    solution_repo: SolutionRepository,
}

impl SearchService {
    /// Create a new search service.
    #[must_use]
    pub const fn new(
        attraction_repo: AttractionRepository,
        news_repo: NewsRepository,
        companion_repo: CompanionRepository,
        solution_repo: SolutionRepository,
    ) -> Self {
        Self {
            attraction_repo,
            news_repo,
            companion_repo,
            solution_repo,
        }
    }

    /// Run a keyword search. `all` takes an even slice of each type with
    /// no offset and reports the returned row count as the total, so
    /// paging only applies to single-scope searches.
    pub async fn search(
        &self,
        keyword: &str,
        scope: SearchScope,
        limit: u64,
        offset: u64,
    ) -> AppResult<SearchResults> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(AppError::Validation("keyword is required".to_string()));
        }

        let mut results = SearchResults::default();

        match scope {
            SearchScope::All => {
                let slice = (limit / 4).max(1);
                results.attractions = self.attraction_repo.search(keyword, slice, 0).await?;
                results.news = self.news_repo.search(keyword, slice, 0).await?;
                results.companions = self.companion_repo.search(keyword, slice, 0).await?;
                results.solutions = self.solution_repo.search(keyword, slice, 0).await?;
                results.total = (results.attractions.len()
                    + results.news.len()
                    + results.companions.len()
                    + results.solutions.len()) as u64;
            }
            SearchScope::Attraction => {
                results.attractions = self.attraction_repo.search(keyword, limit, offset).await?;
                results.total = self.attraction_repo.search_count(keyword).await?;
            }
            SearchScope::News => {
                results.news = self.news_repo.search(keyword, limit, offset).await?;
                results.total = self.news_repo.search_count(keyword).await?;
            }
            SearchScope::Companion => {
                results.companions = self.companion_repo.search(keyword, limit, offset).await?;
                results.total = self.companion_repo.search_count(keyword).await?;
            }
            SearchScope::Solution => {
                results.solutions = self.solution_repo.search(keyword, limit, offset).await?;
                results.total = self.solution_repo.search_count(keyword).await?;
            }
        }

        Ok(results)
    }
}
