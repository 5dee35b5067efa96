pub mod contact;
pub mod date_field;
pub mod date_mask;
pub mod filters;
