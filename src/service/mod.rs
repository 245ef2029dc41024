pub mod refresh;

pub use refresh::{RefreshReport, TableReport, refresh_all};
