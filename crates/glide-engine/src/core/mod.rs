pub mod bounds;
pub mod collision;
pub mod motion;
pub mod scene;
pub mod time;
