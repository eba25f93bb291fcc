pub mod preferences;
pub mod session;

pub use preferences::Preferences;
pub use session::{SessionDriver, SessionHandle, SessionUpdate};
