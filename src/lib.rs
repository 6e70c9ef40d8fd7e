pub mod config;
pub mod db;
pub mod error;
pub mod server;

pub use config::Config;
pub use db::{ContactMessage, ContactStore, NewContactMessage};
pub use error::{LetterboxError, ValidationError};
pub use server::{AppState, app_router};
