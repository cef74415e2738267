mod layout;
pub use layout::{AppLayout, NotFound, RequireLogin};

mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod password;
pub use password::{ForgotPassword, ResetPassword};

mod chat;
pub use chat::Chat;

mod structured;
pub use structured::Structured;

mod upload;
pub use upload::Upload;

mod results;
pub use results::Results;

mod history;
pub use history::History;

mod saved_jobs;
pub use saved_jobs::SavedJobs;

mod profile;
pub use profile::Profile;
