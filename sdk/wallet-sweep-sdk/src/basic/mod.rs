pub mod notification;
pub mod planner;
pub mod recipient;
pub mod sweeper;
