//! Built-in form rules

pub mod document;
pub mod email;
pub mod length;
pub mod one_of;
pub mod required;

pub use document::{DocumentKind, DocumentRule};
pub use email::EmailRule;
pub use length::LengthRule;
pub use one_of::OneOfRule;
pub use required::RequiredRule;
