use crate::{
    graphics::camera::PlayerCameraController,
    grid::{grid_cell::*, highlight::HighlightPlan},
    level::level::GridSettings,
    schedule::UpdateStage,
};
use bevy::prelude::*;

const CONFIRMED_COLOR: Color = Color::linear_rgb(0.0, 1.0, 1.0);
const EXPANDED_COLOR: Color = Color::linear_rgb(1.0, 0.85, 0.0);
const CURSOR_COLOR: Color = Color::linear_rgb(1.0, 1.0, 1.0);

pub struct HighlightPlugin;

impl Plugin for HighlightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HighlightState>()
            .add_systems(Update, paint_highlighted_tiles.in_set(UpdateStage::Visualize));
    }
}

/// The highlight surface: the last plan computed for the hovered cell.
#[derive(Resource, Debug, Default)]
pub struct HighlightState {
    hovered: Option<GridCell>,
    plan: HighlightPlan,
}

impl HighlightState {
    pub fn hovered(&self) -> Option<GridCell> {
        self.hovered
    }

    pub fn plan(&self) -> &HighlightPlan {
        &self.plan
    }

    /// Records `cell` as hovered. Returns false when it already was, so the
    /// caller can skip recomputing the plan.
    pub fn hover(&mut self, cell: GridCell) -> bool {
        if self.hovered == Some(cell) {
            return false;
        }
        self.hovered = Some(cell);
        true
    }

    pub fn set_plan(&mut self, plan: HighlightPlan) {
        self.plan = plan;
    }

    pub fn clear(&mut self) {
        self.hovered = None;
        self.plan = HighlightPlan::default();
    }
}

fn paint_highlighted_tiles(
    highlight: Res<HighlightState>,
    settings: Res<GridSettings>,
    camera_query: Query<&PlayerCameraController>,
    mut gizmos: Gizmos,
) {
    let size = Vec2::splat(settings.cell_size * 0.9);
    let alpha = match camera_query.get_single() {
        Ok(controller) if controller.is_moving() => 0.25,
        _ => 0.8,
    };

    for cell in &highlight.plan().confirmed {
        gizmos.rect_2d(cell.center(settings.cell_size), 0.0, size, CONFIRMED_COLOR.with_alpha(alpha));
    }

    for cell in &highlight.plan().expanded {
        gizmos.rect_2d(cell.center(settings.cell_size), 0.0, size, EXPANDED_COLOR.with_alpha(alpha));
    }

    if let Some(cell) = highlight.hovered() {
        gizmos.rect_2d(cell.center(settings.cell_size), 0.0, Vec2::splat(settings.cell_size), CURSOR_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_only_fires_on_cell_change() {
        let mut state = HighlightState::default();
        assert!(state.hover(GridCell::new(1, 1)));
        assert!(!state.hover(GridCell::new(1, 1)));
        assert!(state.hover(GridCell::new(1, 2)));
        assert_eq!(state.hovered(), Some(GridCell::new(1, 2)));
    }

    #[test]
    fn test_clear_resets_hover_and_plan() {
        let mut state = HighlightState::default();
        state.hover(GridCell::new(0, 0));
        let mut plan = HighlightPlan::default();
        plan.expanded.insert(GridCell::new(0, 1));
        state.set_plan(plan);

        state.clear();

        assert_eq!(state.hovered(), None);
        assert!(state.plan().is_empty());
        assert!(state.hover(GridCell::new(0, 0)));
    }
}
