pub mod clock;
pub mod identity;

pub use clock::{Clock, SystemClock};
pub use identity::DecodedToken;
