pub mod decor;
pub mod id;
pub mod layout;
pub mod lint;
pub mod model;
pub mod parser;
pub mod resolve;

pub use decor::apply_decor;
pub use id::BubbleId;
pub use layout::{AnchorGraph, LayoutCache, resolve_frame};
pub use lint::{LintDiagnostic, LintSeverity, lint_frame};
pub use model::*;
pub use parser::{emit_frame, parse_frame};
pub use resolve::{resolve_nudge, resolve_position, resolve_scale, resolve_width_constraints};
