pub mod app;
pub mod native;
pub mod scene;
