//! Pages
//!
//! Top-level page components for each route.

pub mod archive;
pub mod home;
pub mod login;
pub mod new_staple;
pub mod reset;
pub mod settings;
pub mod signup;

pub use archive::Archive;
pub use home::Home;
pub use login::Login;
pub use new_staple::NewStaple;
pub use reset::Reset;
pub use settings::Settings;
pub use signup::Signup;
