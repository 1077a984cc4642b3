pub mod articles;
pub mod singers;
pub mod songs;
