pub mod parallax;
pub mod reveal;
pub mod tilt;
