// src/ui/panel.rs
//! Gizmo mode panel
//!
//! A small ImGui window for picking the manipulation mode and checking what
//! the gizmo is attached to.

use log::warn;

use crate::gfx::{
    gizmos::{GizmoManager, ManipulationMode},
    scene::node::TransformChannel,
};

/// Mode selector for a [`GizmoManager`]
///
/// Modes the attached node cannot use are greyed out, and the whole selector
/// is disabled while a drag is in progress.
///
/// # Arguments
/// * `ui` - ImGui UI context
/// * `gizmo` - The gizmo whose mode is edited
pub fn gizmo_mode_panel(ui: &imgui::Ui, gizmo: &mut GizmoManager) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Gizmo")
        .size([260.0, 0.0], imgui::Condition::FirstUseEver)
        .position(
            [display_size[0] - 280.0, 20.0],
            imgui::Condition::FirstUseEver,
        )
        .always_auto_resize(true)
        .collapsible(true)
        .build(|| {
            render_target_info(ui, gizmo);
            ui.separator();
            render_mode_selector(ui, gizmo);
        });
}

fn render_target_info(ui: &imgui::Ui, gizmo: &GizmoManager) {
    let Some(node) = gizmo.target() else {
        ui.text_disabled("No node attached");
        return;
    };
    let node = node.borrow();
    ui.text(format!("{} ({})", node.name(), node.kind()));

    let channel = TransformChannel::for_mode(gizmo.mode());
    if let Some(value) = channel.and_then(|c| node.vector(c)) {
        ui.text(format!("{:.3}  {:.3}  {:.3}", value.x, value.y, value.z));
    }
    if gizmo.is_dragging() {
        ui.text_colored([1.0, 0.8, 0.2, 1.0], "Dragging");
    }
}

fn render_mode_selector(ui: &imgui::Ui, gizmo: &mut GizmoManager) {
    let modes = [
        ManipulationMode::Position,
        ManipulationMode::Rotation,
        ManipulationMode::Scaling,
        ManipulationMode::None,
    ];

    for mode in modes {
        let available = gizmo.mode_available(mode);
        let _disabled = ui.begin_disabled(!available);
        if ui.radio_button_bool(mode.label(), gizmo.mode() == mode) {
            if let Err(err) = gizmo.set_mode(mode) {
                warn!("Gizmo panel could not switch to {mode}: {err}");
            }
        }
    }
}
