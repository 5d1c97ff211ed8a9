mod svg;
mod terminal;

pub use svg::{export_animation, render_animation};
pub use terminal::{display, finished_message, render_frame};
