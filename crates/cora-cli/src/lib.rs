//! Terminal interface for the cora course advisor

mod render;
mod ui;

pub use render::{format_candidates, format_catalog, render_answer, render_candidates, render_catalog};
pub use ui::{display_banner, handle_input_with_history, print_help};

// Re-export core types
pub use cora_core::{Error, Result};
