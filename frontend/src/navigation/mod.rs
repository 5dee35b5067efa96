pub mod anchors;
pub mod navbar;
pub mod overlay;

pub use overlay::MobileMenu;
