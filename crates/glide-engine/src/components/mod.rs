pub mod animation;
pub mod entity;
pub mod sprite;
pub mod template;
