use crate::{
    graphics::highlight::HighlightState,
    grid::grid::Grid,
    schedule::UpdateStage,
    tools::{placement_events::ChangeToolRequest, toolbar::PlacementState},
    types::building::StructureRegistry,
};
use bevy::prelude::*;
use bevy_egui::egui::{epaint, Align2};
use bevy_egui::{egui, EguiContexts, EguiPlugin};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin).init_state::<MouseOver>().add_systems(Startup, ui_theme_selection).add_systems(
            Update,
            (
                update_ui_state.in_set(UpdateStage::UpdateView),
                update_toolbar_window,
                update_stats_window,
            ),
        );
    }
}

#[derive(States, Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseOver {
    #[default]
    Ui,
    World,
}

fn update_ui_state(mut contexts: EguiContexts, mut next_state: ResMut<NextState<MouseOver>>) {
    if let Some(ctx) = contexts.try_ctx_mut() {
        next_state.set(match ctx.is_pointer_over_area() {
            true => MouseOver::Ui,
            false => MouseOver::World,
        });
    };
}

fn ui_theme_selection(mut contexts: EguiContexts) {
    catppuccin_egui::set_theme(contexts.ctx_mut(), catppuccin_egui::MACCHIATO);

    let old = contexts.ctx_mut().style().visuals.clone();

    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_shadow: epaint::Shadow {
            offset: [0.0, 0.0].into(),
            blur: 0.0,
            spread: 0.0,
            color: catppuccin_egui::MACCHIATO.base,
        },
        window_rounding: 0.0.into(),
        ..old
    });
}

pub fn update_toolbar_window(
    mut contexts: EguiContexts,
    mut change_tool: EventWriter<ChangeToolRequest>,
    state: Res<State<PlacementState>>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    egui::Window::new("Tools")
        .resizable(false)
        .collapsible(true)
        .anchor(Align2::LEFT_BOTTOM, (0.0, 0.0))
        .constrain(true)
        .movable(false)
        .show(ctx, |ui| {
            let tool_button_size = egui::Vec2::new(140.0, 10.0);

            match state.get() {
                PlacementState::Idle => {
                    if ui.add(egui::Button::new("[ 1 ] Place Building").min_size(tool_button_size)).clicked() {
                        change_tool.send(ChangeToolRequest(PlacementState::Hovering));
                    }
                }
                PlacementState::Hovering => {
                    if ui.add(egui::Button::new("[ Esc ] Cancel").min_size(tool_button_size)).clicked() {
                        change_tool.send(ChangeToolRequest(PlacementState::Idle));
                    }
                }
            }
            ui.add_space(20.0);
            ui.label("[Left Mouse]: Place");
            ui.label("[Right Mouse]: Pan");
            ui.label("[Scroll Wheel]: Zoom");
            ui.label("[WASD]: Pan");
            ui.label("[G]: Toggle Grid");
        });
}

pub fn update_stats_window(
    mut contexts: EguiContexts,
    grid: Res<Grid>,
    registry: Res<StructureRegistry>,
    highlight: Res<HighlightState>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    egui::Window::new("Stats")
        .resizable(false)
        .collapsible(true)
        .default_open(false)
        .anchor(Align2::RIGHT_BOTTOM, (0.0, 0.0))
        .constrain(true)
        .movable(false)
        .show(ctx, |ui| {
            ui.label(format!("Buildings: {}", registry.len()));
            ui.label(format!("Buildable Tiles: {}", grid.buildable().len()));
            ui.label(format!("Terrain Layers: {}", grid.terrain().layer_names().join(", ")));

            if let Some(cell) = highlight.hovered() {
                ui.label(format!("Hovered: ({}, {})", cell.position.x, cell.position.y));
                ui.label(format!("Newly Reachable: {}", highlight.plan().expanded.len()));
            }
        });
}
