use bevy::prelude::*;
use bevy_egui::egui;

use super::HexMapConfig;
use super::entities::HexTile;
use crate::view::MapCamera;

// ── Update: debug overlay ──────────────────────────────────────────

/// Labels every tile near the camera with its name and geography.
///
/// Skips the first frame so the egui context exists before painting.
pub fn draw_tile_labels(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    tiles: Query<(&GlobalTransform, &Name, &HexTile)>,
    cfg: Res<HexMapConfig>,
    mut ready: Local<bool>,
) {
    if !*ready {
        *ready = true;
        return;
    }
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let cam_pos = cam_gt.translation();

    let painter = ctx.get_mut().layer_painter(egui::LayerId::background());

    for (tile_gt, name, tile) in &tiles {
        let world_pos = tile_gt.translation();
        if cam_pos.distance(world_pos) > cfg.label_distance {
            continue;
        }
        if let Ok(viewport) = camera.world_to_viewport(cam_gt, world_pos) {
            painter.text(
                egui::pos2(viewport.x, viewport.y),
                egui::Align2::CENTER_CENTER,
                format!("{name}\n{}", tile.geography),
                egui::FontId::proportional(11.0),
                egui::Color32::WHITE,
            );
        }
    }
}
