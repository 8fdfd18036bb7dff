pub mod psychology;
pub mod rule;
pub mod trade;
pub mod user;

pub use psychology::*;
pub use rule::*;
pub use trade::*;
pub use user::*;
