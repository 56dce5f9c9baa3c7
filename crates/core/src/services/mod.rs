//! Business logic services.

pub mod attraction;
pub mod companion;
pub mod favorite;
pub mod news;
pub mod search;
pub mod social;
pub mod solution;
pub mod support;
pub mod travel_guide;
pub mod travel_plan;
pub mod user;

pub use attraction::AttractionService;
pub use companion::{CompanionDetail, CompanionEntry, CompanionService, NewReservation, ReservationEntry};
pub use favorite::{FavoriteEntry, FavoriteService, FavoriteTarget};
pub use news::{CommentThread, NewsEntry, NewsService};
pub use search::{SearchResults, SearchScope, SearchService};
pub use social::{FollowEntry, SocialService};
pub use solution::{ApplyOutcome, SolutionService};
pub use support::{NewFeedback, SupportService};
pub use travel_guide::{GuideDetail, NewGuide, TravelGuideService};
pub use travel_plan::{NewPlan, NewPlanItem, PlanDetail, TravelPlanService};
pub use user::{UserProfilePatch, UserService};
