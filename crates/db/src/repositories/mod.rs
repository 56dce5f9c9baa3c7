//! Repository layer.
//!
//! One repository per aggregate, each holding a shared database handle.

pub mod about_info;
pub mod attraction;
pub mod companion;
pub mod favorite;
pub mod feedback;
pub mod news;
pub mod solution;
pub mod travel_guide;
pub mod travel_plan;
pub mod user;
pub mod user_follow;

pub use about_info::AboutInfoRepository;
pub use attraction::AttractionRepository;
pub use companion::{CompanionFilter, CompanionRepository};
pub use favorite::FavoriteRepository;
pub use feedback::FeedbackRepository;
pub use news::NewsRepository;
pub use solution::SolutionRepository;
pub use travel_guide::TravelGuideRepository;
pub use travel_plan::TravelPlanRepository;
pub use user::UserRepository;
pub use user_follow::UserFollowRepository;
