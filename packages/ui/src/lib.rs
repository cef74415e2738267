//! This crate contains all shared UI for the workspace: context providers,
//! cards, the photo cropper, and the page handlers they drive.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod actions;
pub mod format;
pub mod platform;
pub mod validation;

mod auth;
pub use auth::{
    make_session, use_auth, use_services, AppClient, AppServices, AppSession, AuthProvider,
    AuthState, LogoutButton, PlatformStorage, LOGIN_PATH,
};

mod toast;
pub use toast::{use_toasts, Toast, ToastKind, ToastProvider, Toasts};

mod navbar;
pub use navbar::{Avatar, Navbar, UserMenu};

mod cards;
pub use cards::{JobCard, SavedJobCard, SearchCard};

pub mod cropper;
pub use cropper::PhotoCropper;
