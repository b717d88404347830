pub mod time_slot;
pub mod weekday;

pub use time_slot::*;
pub use weekday::*;
