use eframe::egui::{Pos2, Rect, Vec2, pos2};

pub const CANVAS_PADDING: f32 = 50.0;
pub const MIN_GRAPH_EXTENT: f32 = 200.0;
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 1.1;

/// Axis-aligned bounding box over raw node positions in graph space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl GraphBounds {
    pub const ZERO: Self = Self {
        min_x: 0.0,
        max_x: 0.0,
        min_y: 0.0,
        max_y: 0.0,
    };

    pub fn from_points(points: impl IntoIterator<Item = Pos2>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::ZERO;
        };

        let mut bounds = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for point in iter {
            bounds.min_x = bounds.min_x.min(point.x);
            bounds.max_x = bounds.max_x.max(point.x);
            bounds.min_y = bounds.min_y.min(point.y);
            bounds.max_y = bounds.max_y.max(point.y);
        }
        bounds
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Pos2 {
        pos2(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

}

#[cfg(test)]
impl GraphBounds {
    fn encloses(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.max_x >= other.max_x
            && self.min_y <= other.min_y
            && self.max_y >= other.max_y
    }
}

/// Graph-space to screen-space mapping for one frame.
///
/// The fit scale makes the graph bounding box (floored to a minimum extent so
/// degenerate graphs never divide by zero) fit inside the padded canvas
/// without magnifying past 1:1. User zoom is folded uniformly into the
/// position scale; pan is a screen-pixel offset applied after centering.
/// `screen_to_graph` is the exact algebraic inverse of `graph_to_screen`, and
/// hit-testing goes through the same instance the renderer draws with.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
    fit_scale: f32,
    canvas_center: Pos2,
    graph_center: Pos2,
    pan: Vec2,
    zoom: f32,
}

impl ViewTransform {
    /// Returns `None` while the canvas has no laid-out area; callers skip the
    /// draw instead of producing NaN transforms.
    pub fn new(canvas: Rect, bounds: GraphBounds, state: &ViewState) -> Option<Self> {
        if canvas.width() <= 0.0 || canvas.height() <= 0.0 {
            return None;
        }

        let graph_width = bounds.width().max(MIN_GRAPH_EXTENT);
        let graph_height = bounds.height().max(MIN_GRAPH_EXTENT);
        let available_width = (canvas.width() - 2.0 * CANVAS_PADDING).max(1.0);
        let available_height = (canvas.height() - 2.0 * CANVAS_PADDING).max(1.0);

        let fit_scale = (available_width / graph_width)
            .min(available_height / graph_height)
            .min(1.0);

        Some(Self {
            fit_scale,
            canvas_center: canvas.center(),
            graph_center: bounds.center(),
            pan: state.pan,
            zoom: state.zoom,
        })
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn position_scale(&self) -> f32 {
        self.fit_scale * self.zoom
    }

    pub fn graph_to_screen(&self, point: Pos2) -> Pos2 {
        self.canvas_center + self.pan + (point - self.graph_center) * self.position_scale()
    }

    pub fn screen_to_graph(&self, point: Pos2) -> Pos2 {
        self.graph_center + (point - self.canvas_center - self.pan) / self.position_scale()
    }

    /// Pan that keeps the graph point currently under `anchor` at `anchor`
    /// once the zoom changes to `next_zoom`.
    fn pan_preserving_anchor(&self, anchor: Pos2, next_zoom: f32) -> Vec2 {
        let anchor_graph = self.screen_to_graph(anchor);
        (anchor - self.canvas_center) - (anchor_graph - self.graph_center) * (self.fit_scale * next_zoom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragOrigin {
    pointer: Pos2,
    pan: Vec2,
}

/// Mutable view state for one viewing session: pan, zoom, selection, and the
/// in-flight drag. Mutated only through the named transitions below so the
/// interaction rules are unit-testable without synthesizing pointer events.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub pan: Vec2,
    pub zoom: f32,
    pub selected: Option<String>,
    drag: Option<DragOrigin>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            selected: None,
            drag: None,
        }
    }

    pub fn begin_pan(&mut self, pointer: Pos2) {
        self.drag = Some(DragOrigin {
            pointer,
            pan: self.pan,
        });
    }

    /// The new pan is a pure function of the press origin and the current
    /// pointer, never of intermediate deltas, so dropped move events cannot
    /// accumulate drift.
    pub fn update_pan(&mut self, pointer: Pos2) {
        if let Some(origin) = self.drag {
            self.pan = origin.pan + (pointer - origin.pointer);
        }
    }

    pub fn end_pan(&mut self) {
        self.drag = None;
    }

    pub fn is_panning(&self) -> bool {
        self.drag.is_some()
    }

    /// Multiplies zoom by `factor`, clamped to `[MIN_ZOOM, MAX_ZOOM]`, keeping
    /// the graph point under `anchor` fixed on screen. `transform` must be the
    /// one derived from this state's current pan and zoom. A step swallowed
    /// entirely by the clamp leaves the pan untouched.
    pub fn apply_zoom(&mut self, factor: f32, anchor: Pos2, transform: &ViewTransform) {
        let next_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if (next_zoom - self.zoom).abs() <= f32::EPSILON {
            return;
        }

        self.pan = transform.pan_preserving_anchor(anchor, next_zoom);
        self.zoom = next_zoom;
    }

    pub fn select(&mut self, selected: Option<String>) {
        self.selected = selected;
    }

    pub fn reset_view(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

/// Nearest node whose rendered circle contains `click`; ties at equal
/// distance go to the lowest index.
pub fn hit_test_nodes(click: Pos2, screen_positions: &[Pos2], screen_radii: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, (position, radius)) in screen_positions.iter().zip(screen_radii).enumerate() {
        let distance = position.distance(click);
        if distance <= *radius && best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use eframe::egui::vec2;
    use proptest::prelude::*;

    fn canvas_strategy() -> impl Strategy<Value = Rect> {
        (150.0f32..1600.0, 150.0f32..1600.0)
            .prop_map(|(width, height)| Rect::from_min_size(pos2(0.0, 0.0), vec2(width, height)))
    }

    fn point_strategy() -> impl Strategy<Value = Pos2> {
        (-2000.0f32..2000.0, -2000.0f32..2000.0).prop_map(|(x, y)| pos2(x, y))
    }

    fn state_strategy() -> impl Strategy<Value = ViewState> {
        ((-500.0f32..500.0, -500.0f32..500.0), MIN_ZOOM..MAX_ZOOM).prop_map(|((x, y), zoom)| {
            let mut state = ViewState::new();
            state.pan = vec2(x, y);
            state.zoom = zoom;
            state
        })
    }

    proptest! {
        /// screen_to_graph is the exact inverse of graph_to_screen for any
        /// canvas, pan, and zoom (tolerance scales with the position scale,
        /// since tiny scales amplify fixed screen-space rounding).
        #[test]
        fn transform_round_trips(
            rect in canvas_strategy(),
            state in state_strategy(),
            corner_a in point_strategy(),
            corner_b in point_strategy(),
            probe in point_strategy(),
        ) {
            let bounds = GraphBounds::from_points([corner_a, corner_b]);
            let transform = ViewTransform::new(rect, bounds, &state).unwrap();

            let round_tripped = transform.screen_to_graph(transform.graph_to_screen(probe));
            let tolerance = 2e-3 / transform.position_scale() + 1e-3;
            prop_assert!(
                (round_tripped - probe).length() <= tolerance,
                "round trip drifted by {} (tolerance {})",
                (round_tripped - probe).length(),
                tolerance,
            );
        }

        /// Zooming in n steps and back out n steps at the same anchor restores
        /// both the zoom value and rendered node positions.
        #[test]
        fn zoom_round_trips(
            rect in canvas_strategy(),
            corner_a in point_strategy(),
            corner_b in point_strategy(),
            initial_zoom in 0.3f32..1.2,
            factor in 1.02f32..1.2,
            steps in 1usize..5,
            anchor_offset in (-40.0f32..40.0, -40.0f32..40.0),
        ) {
            let bounds = GraphBounds::from_points([corner_a, corner_b]);
            let anchor = rect.center() + vec2(anchor_offset.0, anchor_offset.1);

            let mut state = ViewState::new();
            state.zoom = initial_zoom;
            let original = ViewTransform::new(rect, bounds, &state).unwrap();
            let probe_screen = original.graph_to_screen(corner_a);

            for _ in 0..steps {
                let transform = ViewTransform::new(rect, bounds, &state).unwrap();
                state.apply_zoom(factor, anchor, &transform);
            }
            for _ in 0..steps {
                let transform = ViewTransform::new(rect, bounds, &state).unwrap();
                state.apply_zoom(1.0 / factor, anchor, &transform);
            }

            prop_assert!((state.zoom - initial_zoom).abs() <= initial_zoom * 1e-4);

            let restored = ViewTransform::new(rect, bounds, &state).unwrap();
            let probe_restored = restored.graph_to_screen(corner_a);
            prop_assert!(
                (probe_restored - probe_screen).length() <= 0.5,
                "probe moved by {} px",
                (probe_restored - probe_screen).length(),
            );
        }

        /// Any sequence of intermediate pointer positions produces exactly the
        /// same pan as the direct move.
        #[test]
        fn pan_is_path_independent(
            press in point_strategy(),
            release in point_strategy(),
            path in prop::collection::vec(point_strategy(), 0..12),
        ) {
            let mut direct = ViewState::new();
            direct.begin_pan(press);
            direct.update_pan(release);
            direct.end_pan();

            let mut meandering = ViewState::new();
            meandering.begin_pan(press);
            for waypoint in path {
                meandering.update_pan(waypoint);
            }
            meandering.update_pan(release);
            meandering.end_pan();

            prop_assert_eq!(direct.pan, meandering.pan);
        }

        /// A click at a node's computed screen center always selects it when
        /// node centers are distinct.
        #[test]
        fn click_at_node_center_selects_it(
            cells in prop::collection::hash_set((0i32..40, 0i32..40), 1..30),
            chosen_seed in any::<prop::sample::Index>(),
        ) {
            let positions = cells
                .iter()
                .map(|(column, row)| pos2(*column as f32 * 8.0, *row as f32 * 8.0))
                .collect::<Vec<_>>();
            let radii = vec![15.0f32; positions.len()];
            let chosen = chosen_seed.index(positions.len());

            let hit = hit_test_nodes(positions[chosen], &positions, &radii);
            prop_assert_eq!(hit, Some(chosen));
        }

        /// Bounds over a superset enclose bounds over the subset and the
        /// added point.
        #[test]
        fn bounds_grow_monotonically(
            points in prop::collection::vec(point_strategy(), 1..20),
            extra in point_strategy(),
        ) {
            let base = GraphBounds::from_points(points.iter().copied());
            let mut extended = points.clone();
            extended.push(extra);
            let grown = GraphBounds::from_points(extended);

            prop_assert!(grown.encloses(&base));
            prop_assert!(grown.min_x <= extra.x && extra.x <= grown.max_x);
            prop_assert!(grown.min_y <= extra.y && extra.y <= grown.max_y);
        }
    }
}
