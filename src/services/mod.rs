pub mod credential;
pub mod directory;
