pub mod analytics;
pub mod geographic;
pub mod loading;
pub mod overview;
pub mod recommendations;
