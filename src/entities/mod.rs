pub mod article;
pub mod genre;
pub mod image_slider;
pub mod image_unit;
pub mod section;
pub mod singer;
pub mod song;
pub mod subdivision;
pub mod text_block;
