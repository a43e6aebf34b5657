// src/ui/panel.rs
//! HUD overlay panel

use imgui::WindowFlags;

/// Draws `lines` in a small translucent box pinned to the top-left corner.
///
/// The overlay takes no input, so clicks and keys reach the demo.
pub fn hud_panel(ui: &imgui::Ui, title: &str, lines: &[String]) {
    let display_size = ui.io().display_size;
    // Guard against invalid display size during minimize
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window(title)
        .position([10.0, 10.0], imgui::Condition::Always)
        .bg_alpha(0.35)
        .flags(
            WindowFlags::NO_DECORATION
                | WindowFlags::ALWAYS_AUTO_RESIZE
                | WindowFlags::NO_INPUTS
                | WindowFlags::NO_SAVED_SETTINGS,
        )
        .build(|| {
            for line in lines {
                ui.text(line);
            }
        });
}
