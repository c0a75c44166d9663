use crate::{
    graphics::highlight::HighlightState,
    grid::grid::Grid,
    schedule::UpdateStage,
    tools::{building_tool::BuildingToolPlugin, placement_events::*},
};
use bevy::prelude::*;

/// `Idle` until the player picks up a building, `Hovering` while it follows
/// the cursor. A successful placement drops back to `Idle`.
#[derive(States, Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlacementState {
    #[default]
    Idle,
    Hovering,
}

pub struct ToolbarPlugin;

impl Plugin for ToolbarPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<PlacementState>()
            .add_event::<ChangeToolRequest>()
            .add_plugins(BuildingToolPlugin)
            .add_systems(
                Update,
                (
                    change_tool_on_keypress.in_set(UpdateStage::UserInput),
                    handle_change_tool_requests,
                )
                    .chain(),
            )
            .add_systems(OnEnter(PlacementState::Hovering), highlight_buildable_tiles)
            .add_systems(OnEnter(PlacementState::Idle), clear_highlighted_tiles);
    }
}

pub fn change_tool_on_keypress(keyboard_input: Res<ButtonInput<KeyCode>>, mut change_tool: EventWriter<ChangeToolRequest>) {
    if keyboard_input.just_pressed(KeyCode::Digit1) {
        change_tool.send(ChangeToolRequest(PlacementState::Hovering));
    } else if keyboard_input.just_pressed(KeyCode::Escape) {
        change_tool.send(ChangeToolRequest(PlacementState::Idle));
    }
}

pub fn handle_change_tool_requests(mut event: EventReader<ChangeToolRequest>, mut next_state: ResMut<NextState<PlacementState>>) {
    for &ChangeToolRequest(mode) in event.read() {
        log::debug!("placement state -> {:?}", mode);
        next_state.set(mode);
    }
}

fn highlight_buildable_tiles(grid: Res<Grid>, mut highlight: ResMut<HighlightState>) {
    highlight.clear();
    highlight.set_plan(grid.buildable_plan());
}

fn clear_highlighted_tiles(mut highlight: ResMut<HighlightState>) {
    highlight.clear();
}
