pub mod time;

pub use time::{log_timestamp, observation_timestamp};
