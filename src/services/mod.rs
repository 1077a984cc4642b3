pub mod article;
pub mod display;
pub mod text_block;
