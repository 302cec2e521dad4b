pub mod flash;
pub mod session;

pub use flash::{push_flash, take_flashes};
pub use session::CurrentUser;
