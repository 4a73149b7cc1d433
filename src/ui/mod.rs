//! # User Interface Module
//!
//! Dear ImGui widgets for driving the gizmo from an editor UI. The host owns
//! the ImGui context and renderer; this module only builds windows.
//!
//! ```no_run
//! # fn frame(ui: &imgui::Ui, gizmo: &mut manipulator::GizmoManager) {
//! manipulator::ui::gizmo_mode_panel(ui, gizmo);
//! # }
//! ```

pub mod panel;

pub use panel::gizmo_mode_panel;
