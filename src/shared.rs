pub mod emit;
pub mod errors;
pub mod events;
pub mod settings;
pub mod types;

pub use errors::{AppError, AppResult};
