pub mod date;
pub mod email;
pub mod name;
pub mod pan;
pub mod phone;

pub use date::DateValidator;
pub use email::EmailValidator;
pub use name::{NameMatch, NameValidator};
pub use pan::PanValidator;
pub use phone::PhoneValidator;
