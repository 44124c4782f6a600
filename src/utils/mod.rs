pub mod validate;

pub use validate::validate_email;
