pub mod analyze;
pub mod dispatch;
pub mod invalid;
pub mod live;
pub mod logs;
pub mod sites;
pub mod stats;
