use egui::Context as EguiContext;
use glam::Vec3;
use storehouse_locomotion::{InteractionMode, LocomotionController, StrategyKind};
use storehouse_render_wgpu::LightTuning;

/// Per-frame readouts shown in the side panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudStats {
    pub fps: f32,
    pub frame_ms: f32,
    pub strategy: StrategyKind,
    pub mode: InteractionMode,
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
}

impl HudStats {
    pub fn sample(controller: &LocomotionController, fps: f32, frame_ms: f32) -> Self {
        let nav = controller.state();
        Self {
            fps,
            frame_ms,
            strategy: controller.kind(),
            mode: controller.mode(),
            position: nav.position,
            yaw: nav.yaw,
            pitch: nav.pitch,
            speed: nav.speed(),
        }
    }
}

fn hint(stats: &HudStats) -> &'static str {
    match (stats.strategy, stats.mode) {
        (StrategyKind::FirstPerson, InteractionMode::Unlocked) => "Click the scene to look around",
        (StrategyKind::FirstPerson, InteractionMode::Locked) => "WASD: move | Mouse: look | Esc: release",
        (StrategyKind::Orbit, _) => "Drag: orbit | Wheel: zoom",
        (StrategyKind::Keyboard, _) => "WASD: step | Q/E: turn | Wheel: dolly",
    }
}

/// Draw the stats and light tuning panel. `tuning` is edited in place.
pub fn draw_panel(ctx: &EguiContext, tuning: &mut LightTuning, stats: &HudStats, scene: (u32, u32)) {
    egui::SidePanel::left("storehouse")
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Storehouse");
            ui.separator();
            ui.label(format!("{:.0} fps ({:.1} ms)", stats.fps, stats.frame_ms));
            ui.label(format!("Crates: {}  Lights: {}", scene.0, scene.1));
            ui.label(format!("Strategy: {}  ({:?})", stats.strategy, stats.mode));
            ui.label(format!(
                "Position: ({:.1}, {:.1}, {:.1})",
                stats.position.x, stats.position.y, stats.position.z
            ));
            ui.label(format!(
                "Yaw {:.0}°  Pitch {:.0}°  Speed {:.1}",
                stats.yaw.to_degrees(),
                stats.pitch.to_degrees(),
                stats.speed
            ));
            ui.separator();

            ui.heading("Lighting");
            ui.horizontal(|ui| {
                ui.label("Color");
                ui.color_edit_button_rgb(&mut tuning.color);
            });
            ui.add(egui::Slider::new(&mut tuning.intensity, 0.0..=5.0).text("intensity"));
            ui.add(
                egui::Slider::new(&mut tuning.angle_degrees, 1.0..=LightTuning::MAX_ANGLE_DEGREES)
                    .text("angle"),
            );
            ui.add(egui::Slider::new(&mut tuning.penumbra, 0.0..=1.0).text("penumbra"));
            ui.add(egui::Slider::new(&mut tuning.distance, 0.0..=100.0).text("distance"));
            ui.add(egui::Slider::new(&mut tuning.ambient, 0.0..=1.0).text("ambient"));
            if ui.button("Reset").clicked() {
                *tuning = LightTuning::default();
            }

            ui.separator();
            ui.small(hint(stats));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_follows_lock_state() {
        let mut stats = HudStats::default();
        assert!(hint(&stats).contains("Click"));
        stats.mode = InteractionMode::Locked;
        assert!(hint(&stats).contains("Esc"));
        stats.strategy = StrategyKind::Orbit;
        assert!(hint(&stats).contains("orbit"));
    }
}
