pub mod session;
pub mod store;

pub use session::SessionMetrics;
pub use store::{HighScoreStore, HighScoreTable};
