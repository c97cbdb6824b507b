pub mod svg;
pub mod tail;

pub use svg::render_frame_svg;
pub use tail::{CssPlacement, TailGeometry, position_tail};
