//! Browser lifecycle and the authenticated session sequence.

pub mod headless;
pub mod session;

pub use headless::launch_headless_browser;
pub use session::{is_login_surface, Credentials};
