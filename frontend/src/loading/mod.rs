pub mod preloader;
pub mod skeleton;
