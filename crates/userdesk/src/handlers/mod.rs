pub mod error;
pub mod flash;
pub mod pages;
pub mod users;

pub use error::AppError;
