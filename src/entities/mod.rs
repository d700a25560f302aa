pub mod follow;
pub mod member;
pub mod social_id;
pub mod user;
