pub mod colour_index;
pub mod escape_time;
pub mod julia;
pub mod mandelbrot;
