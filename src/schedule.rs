use bevy::prelude::*;

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                UpdateStage::UpdateView,
                UpdateStage::UserInput,
                UpdateStage::Spawning,
                UpdateStage::UpdateGrid,
                UpdateStage::Visualize,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (apply_deferred).after(UpdateStage::Spawning).before(UpdateStage::UpdateGrid),
        );
    }
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum UpdateStage {
    UpdateView,
    UserInput,
    Spawning,
    UpdateGrid,
    Visualize,
}
