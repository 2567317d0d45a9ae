pub mod gradients;
pub mod image_colour_map;
pub mod palette;
