mod requests;
mod types;
mod validation;

pub use requests::{UserDraft, UserForm};
pub use types::{User, UserId};
pub use validation::{validate, ValidationErrors, BLANK_MESSAGE, DATABASE_ERROR_KEY};
