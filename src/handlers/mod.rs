pub mod datasets;
pub mod refresh;
pub mod users;
