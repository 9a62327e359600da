pub mod user;
pub mod watch;

pub use user::*;
pub use watch::*;
