//! Status bar text.

use crate::model::{EditOperation, RowWrapping, Section, ViewMode};
use crate::view_state::scroll::ScrollBarVerticalScale;
use crate::view_state::LayoutEngine;

fn view_mode_label(view_mode: ViewMode) -> &'static str {
    match view_mode {
        ViewMode::Dual => "dual",
        ViewMode::CodeMatrix => "code",
        ViewMode::TextPreview => "text",
    }
}

/// One-line summary: source, caret offset, selection, and display settings.
///
/// Offsets are hexadecimal. `[scaled]` marks documents too tall for a
/// linear scrollbar.
pub fn status_line(engine: &LayoutEngine, source_name: &str) -> String {
    let caret = engine.caret().position();
    let mut parts = vec![
        source_name.to_string(),
        format!("{:X}/{:X}", caret.data_position, engine.data_size()),
    ];

    let selection = engine.selection();
    if !selection.is_empty() {
        parts.push(format!(
            "sel {:X}-{:X} ({})",
            selection.first(),
            selection.last(),
            selection.len()
        ));
    }

    let config = engine.config();
    parts.push(config.structure.code_type.to_string());
    parts.push(view_mode_label(config.structure.view_mode).to_string());
    if caret.section == Section::TextPreview {
        parts.push("preview".to_string());
    }
    if config.structure.row_wrapping == RowWrapping::Wrapping {
        parts.push(format!("wrap {}", engine.structure().bytes_per_row()));
    }
    parts.push(
        match config.edit_operation {
            EditOperation::Insert => "INS",
            EditOperation::Overwrite => "OVR",
        }
        .to_string(),
    );
    if engine.vertical_scale() == ScrollBarVerticalScale::Scaled {
        parts.push("[scaled]".to_string());
    }

    parts.join(" | ")
}
