mod models;
mod signal;
mod symbol;
mod timestamp;

pub use models::{Bar, BarSeries};
pub use signal::Signal;
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
