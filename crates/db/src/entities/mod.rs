//! SeaORM entities for the travelcloud data model.

pub mod about_info;
pub mod attraction;
pub mod companion;
pub mod companion_reservation;
pub mod companion_review;
pub mod companion_tag;
pub mod companion_tag_relation;
pub mod favorite;
pub mod feedback;
pub mod news;
pub mod news_comment;
pub mod news_like;
pub mod solution;
pub mod solution_application;
pub mod travel_guide;
pub mod travel_plan;
pub mod travel_plan_item;
pub mod user;
pub mod user_follow;

pub use about_info::Entity as AboutInfo;
pub use attraction::Entity as Attraction;
pub use companion::Entity as Companion;
pub use companion_reservation::Entity as CompanionReservation;
pub use companion_review::Entity as CompanionReview;
pub use companion_tag::Entity as CompanionTag;
pub use companion_tag_relation::Entity as CompanionTagRelation;
pub use favorite::Entity as Favorite;
pub use feedback::Entity as Feedback;
pub use news::Entity as News;
pub use news_comment::Entity as NewsComment;
pub use news_like::Entity as NewsLike;
pub use solution::Entity as Solution;
pub use solution_application::Entity as SolutionApplication;
pub use travel_guide::Entity as TravelGuide;
pub use travel_plan::Entity as TravelPlan;
pub use travel_plan_item::Entity as TravelPlanItem;
pub use user::Entity as User;
pub use user_follow::Entity as UserFollow;
