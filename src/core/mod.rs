pub mod autocorrect;
pub mod converter;
pub mod delete;
pub mod double_tap;
pub mod medial;
pub mod profile;
pub mod reorder;
pub mod session;
pub mod state;
pub mod unicode;
