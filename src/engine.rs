//! The retained layout state and the two entry points built on it:
//! [`LayoutState::layout`] resolves a description into a positioned element
//! tree, and [`LayoutState::render`] flattens that tree into render
//! commands.

use rustc_hash::FxHashMap;

use crate::description::{ComponentRegistry, Desc, Props};
use crate::errors::LayoutError;
use crate::math::{Dimensions, Vector2};
use crate::position;
use crate::render_commands::{self, RenderCommand, RenderOptions};
use crate::sizing;
use crate::text::{MeasureFn, TextMeasurementCache};
use crate::tree::{self, Element};

/// Explicit, caller-owned engine state. Nothing here is global: two states
/// laid out concurrently never observe each other's caches, components or
/// scroll offsets.
pub struct LayoutState {
    debug_mode_enabled: bool,
    culling_enabled: bool,
    text_cache: TextMeasurementCache,
    registry: ComponentRegistry,
    scroll_offsets: FxHashMap<u32, Vector2>,
    pointer_position: Option<Vector2>,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutState {
    pub fn new() -> Self {
        Self {
            debug_mode_enabled: false,
            culling_enabled: true,
            text_cache: TextMeasurementCache::new(),
            registry: ComponentRegistry::new(),
            scroll_offsets: FxHashMap::default(),
            pointer_position: None,
        }
    }

    /// Toggles the color-coded inspection overlay appended by
    /// [`render`](Self::render).
    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.debug_mode_enabled = enabled;
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode_enabled
    }

    /// Toggles viewport culling of emitted commands. Enabled by default.
    pub fn set_culling_enabled(&mut self, enabled: bool) {
        self.culling_enabled = enabled;
    }

    pub fn culling_enabled(&self) -> bool {
        self.culling_enabled
    }

    /// Drops all cached text measurements. Call when fonts change, since
    /// cached entries would otherwise keep stale glyph metrics alive.
    pub fn reset_text_cache(&mut self) {
        self.text_cache.reset();
    }

    /// Registers a composite component under `tag`, replacing any previous
    /// registration.
    pub fn register_component(
        &mut self,
        tag: impl Into<String>,
        component: impl Fn(&Props, &[Desc]) -> Desc + 'static,
    ) {
        self.registry.register(tag, component);
    }

    /// Removes the component registered under `tag`, returning whether one
    /// existed.
    pub fn unregister_component(&mut self, tag: &str) -> bool {
        self.registry.unregister(tag)
    }

    /// Sets the offset applied to the children of the scroll container
    /// identified by `id` on the next layout.
    pub fn set_scroll_offset(&mut self, id: u32, offset: Vector2) {
        self.scroll_offsets.insert(id, offset);
    }

    pub fn scroll_offset(&self, id: u32) -> Vector2 {
        self.scroll_offsets.get(&id).copied().unwrap_or_default()
    }

    /// Sets the pointer position used for hover queries and the debug
    /// overlay highlight. `None` clears it.
    pub fn set_pointer_position(&mut self, position: Option<Vector2>) {
        self.pointer_position = position;
    }

    /// Resolves `description` against `viewport` into a fully positioned
    /// element tree.
    ///
    /// The result depends only on the state and the arguments; laying out
    /// the same description twice yields identical geometry.
    pub fn layout(
        &mut self,
        viewport: Dimensions,
        description: &Desc,
        measure_fn: Option<&MeasureFn>,
    ) -> Result<Element, LayoutError> {
        let mut root = tree::build_tree(
            viewport,
            description,
            &self.registry,
            &mut self.text_cache,
            measure_fn,
        )?;
        sizing::resolve(&mut root);
        position::resolve(&mut root, &self.scroll_offsets);
        Ok(root)
    }

    /// Lays out `description` and flattens the result into an ordered
    /// render command list.
    pub fn render(
        &mut self,
        viewport: Dimensions,
        description: &Desc,
        measure_fn: Option<&MeasureFn>,
    ) -> Result<Vec<RenderCommand>, LayoutError> {
        let root = self.layout(viewport, description, measure_fn)?;
        let options = RenderOptions {
            viewport,
            culling_enabled: self.culling_enabled,
            debug_mode_enabled: self.debug_mode_enabled,
            pointer_position: self.pointer_position,
        };
        Ok(render_commands::emit(&root, &options))
    }

    /// Ids of all elements whose bounding box contains the current pointer
    /// position, innermost last.
    pub fn hovered_ids(&self, root: &Element) -> Vec<u32> {
        let Some(point) = self.pointer_position else {
            return Vec::new();
        };
        let mut hovered = Vec::new();
        collect_hovered(root, point, &mut hovered);
        hovered
    }
}

fn collect_hovered(element: &Element, point: Vector2, hovered: &mut Vec<u32>) {
    if element.bounding_box.contains_point(point) {
        hovered.push(element.id.id);
    }
    for child in element.children() {
        collect_hovered(child, point, hovered);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::id::ElementId;
    use crate::layout::Sizing;
    use crate::math::BoundingBox;
    use crate::text::TextConfig;
    use crate::tree::ElementKind;

    fn fake_measure(text: &str, config: &TextConfig) -> Dimensions {
        let char_width = config.font_size as f32 / 2.0;
        Dimensions::new(text.chars().count() as f32 * char_width, config.font_size as f32)
    }

    fn viewport() -> Dimensions {
        Dimensions::new(800.0, 600.0)
    }

    fn geometry(root: &Element) -> Vec<(u32, BoundingBox)> {
        let mut out = vec![(root.id.id, root.bounding_box)];
        for child in root.children() {
            out.extend(geometry(child));
        }
        out
    }

    #[test]
    fn layout_is_idempotent() {
        let mut state = LayoutState::new();
        let description = Desc::container(
            Props::new().id("panel").padding(16).gap(8),
            vec![
                Desc::container(Props::new().width(Sizing::Fixed(100.0)), vec![]),
                Desc::container(Props::new().width(Sizing::Grow(0.0, f32::MAX)), vec![]),
                Desc::styled_text(Props::new(), "hello world"),
            ],
        );
        let first = state.layout(viewport(), &description, Some(&fake_measure)).unwrap();
        let second = state.layout(viewport(), &description, Some(&fake_measure)).unwrap();
        assert_eq!(geometry(&first), geometry(&second));
    }

    #[test]
    fn grow_children_conserve_space_exactly() {
        let mut state = LayoutState::new();
        let grow = || {
            Desc::container(
                Props::new().width(Sizing::Grow(0.0, f32::MAX)).height(Sizing::Fixed(10.0)),
                vec![],
            )
        };
        let description = Desc::container(
            Props::new().id("row").width(Sizing::Fixed(100.0)),
            vec![grow(), grow(), grow()],
        );
        let root = state.layout(viewport(), &description, None).unwrap();
        let row = &root.children()[0];
        let widths: Vec<f32> = row.children().iter().map(|c| c.dimensions.width).collect();
        assert_eq!(widths.iter().sum::<f32>(), 100.0);
        // Whole-unit shares, remainder granted to the earliest child.
        assert_eq!(widths, vec![34.0, 33.0, 33.0]);
    }

    #[test]
    fn fit_container_hugs_children_plus_padding_and_gaps() {
        let mut state = LayoutState::new();
        let description = Desc::container(
            Props::new().id("fit").padding(10).gap(5),
            vec![
                Desc::container(
                    Props::new().width(Sizing::Fixed(40.0)).height(Sizing::Fixed(20.0)),
                    vec![],
                ),
                Desc::container(
                    Props::new().width(Sizing::Fixed(60.0)).height(Sizing::Fixed(30.0)),
                    vec![],
                ),
            ],
        );
        let root = state.layout(viewport(), &description, None).unwrap();
        let fit = &root.children()[0];
        assert_eq!(fit.dimensions.width, 10.0 + 40.0 + 5.0 + 60.0 + 10.0);
        assert_eq!(fit.dimensions.height, 10.0 + 30.0 + 10.0);
    }

    #[test]
    fn percent_resolves_against_parent_size() {
        let mut state = LayoutState::new();
        let description = Desc::container(
            Props::new().id("parent").width(Sizing::Fixed(1000.0)).height(Sizing::Fixed(100.0)),
            vec![Desc::container(
                Props::new().id("half").width(Sizing::Percent(0.55)).height(Sizing::Percent(1.0)),
                vec![],
            )],
        );
        let root = state.layout(viewport(), &description, None).unwrap();
        let child = root.find(ElementId::new("half").id).unwrap();
        assert_eq!(child.dimensions.width, 550.0);
        assert_eq!(child.dimensions.height, 100.0);
    }

    #[test]
    fn fixed_and_grow_share_a_padded_row() {
        let mut state = LayoutState::new();
        let description = Desc::container(
            Props::new()
                .id("row")
                .width(Sizing::Grow(0.0, f32::MAX))
                .height(Sizing::Fixed(60.0))
                .padding(16)
                .gap(8),
            vec![
                Desc::container(
                    Props::new().id("sidebar").width(Sizing::Fixed(100.0)),
                    vec![],
                ),
                Desc::container(
                    Props::new().id("content").width(Sizing::Grow(0.0, f32::MAX)),
                    vec![],
                ),
            ],
        );
        let root = state.layout(viewport(), &description, None).unwrap();
        let sidebar = root.find(ElementId::new("sidebar").id).unwrap();
        let content = root.find(ElementId::new("content").id).unwrap();
        assert_eq!(sidebar.dimensions.width, 100.0);
        // 800 - 2*16 padding - 8 gap - 100 sidebar.
        assert_eq!(content.dimensions.width, 660.0);
        assert_eq!(sidebar.bounding_box.x, 16.0);
        assert_eq!(content.bounding_box.x, 124.0);
    }

    #[test]
    fn padded_row_rectangles_account_for_padding_and_gap() {
        let mut state = LayoutState::new();
        let description = Desc::container(
            Props::new()
                .id("row")
                .width(Sizing::Grow(0.0, f32::MAX))
                .height(Sizing::Fixed(60.0))
                .padding(16)
                .gap(8),
            vec![
                Desc::container(
                    Props::new()
                        .width(Sizing::Fixed(100.0))
                        .height(Sizing::Grow(0.0, f32::MAX))
                        .background((40.0, 40.0, 40.0)),
                    vec![],
                ),
                Desc::container(
                    Props::new()
                        .width(Sizing::Grow(0.0, f32::MAX))
                        .height(Sizing::Grow(0.0, f32::MAX))
                        .background((50.0, 50.0, 50.0)),
                    vec![],
                ),
            ],
        );
        let commands = state.render(viewport(), &description, None).unwrap();
        let rect_widths: Vec<f32> = commands
            .iter()
            .filter(|c| matches!(c.config, crate::render_commands::RenderCommandConfig::Rectangle { .. }))
            .map(|c| c.bounding_box.width)
            .collect();
        assert_eq!(rect_widths.len(), 2);
        assert_eq!(rect_widths.iter().sum::<f32>(), 800.0 - 2.0 * 16.0 - 8.0);
    }

    #[test]
    fn identity_is_stable_across_layouts() {
        let mut state = LayoutState::new();
        let description = Desc::Many(
            (0..3)
                .map(|i| Desc::container(Props::new().id("item").index(i), vec![]))
                .collect(),
        );
        let first = state.layout(viewport(), &description, None).unwrap();
        let second = state.layout(viewport(), &description, None).unwrap();
        let ids = |root: &Element| -> Vec<u32> { root.children().iter().map(|c| c.id.id).collect() };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn registered_components_expand_during_layout() {
        let mut state = LayoutState::new();
        state.register_component("badge", |_, _| {
            Desc::container(
                Props::new().id("badge-body").width(Sizing::Fixed(24.0)).height(Sizing::Fixed(24.0)),
                vec![],
            )
        });
        let description = Desc::component("badge", Props::new(), vec![]);
        let root = state.layout(viewport(), &description, None).unwrap();
        assert!(root.find(ElementId::new("badge-body").id).is_some());

        assert!(state.unregister_component("badge"));
        let err = state.layout(viewport(), &description, None).unwrap_err();
        assert_eq!(err, LayoutError::UnknownComponent { tag: "badge".into() });
    }

    #[test]
    fn scroll_offsets_persist_between_layouts() {
        let mut state = LayoutState::new();
        let list_id = ElementId::new("list").id;
        state.set_scroll_offset(list_id, Vector2::new(0.0, -40.0));
        let description = Desc::scroll(
            Props::new().id("list").height(Sizing::Fixed(100.0)),
            vec![Desc::container(
                Props::new().id("item").width(Sizing::Fixed(10.0)).height(Sizing::Fixed(300.0)),
                vec![],
            )],
        );
        let root = state.layout(viewport(), &description, None).unwrap();
        let item = root.find(ElementId::new("item").id).unwrap();
        assert_eq!(item.bounding_box.y, -40.0);
        assert_eq!(state.scroll_offset(list_id), Vector2::new(0.0, -40.0));
    }

    #[test]
    fn hovered_ids_are_outermost_first() {
        let mut state = LayoutState::new();
        state.set_pointer_position(Some(Vector2::new(5.0, 5.0)));
        let description = Desc::container(
            Props::new().id("outer").width(Sizing::Fixed(100.0)).height(Sizing::Fixed(100.0)),
            vec![Desc::container(
                Props::new().id("inner").width(Sizing::Fixed(50.0)).height(Sizing::Fixed(50.0)),
                vec![],
            )],
        );
        let root = state.layout(viewport(), &description, None).unwrap();
        let hovered = state.hovered_ids(&root);
        let outer = ElementId::new("outer").id;
        let inner = ElementId::new("inner").id;
        let outer_pos = hovered.iter().position(|&id| id == outer).unwrap();
        let inner_pos = hovered.iter().position(|&id| id == inner).unwrap();
        assert!(outer_pos < inner_pos);
    }

    #[test]
    fn render_uses_state_toggles() {
        let mut state = LayoutState::new();
        let description = Desc::container(
            Props::new()
                .id("off")
                .width(Sizing::Fixed(10.0))
                .height(Sizing::Fixed(10.0))
                .floating(crate::elements::FloatingConfig {
                    offset: Vector2::new(2000.0, 0.0),
                    ..Default::default()
                })
                .background((9.0, 9.0, 9.0)),
            vec![],
        );
        let commands = state.render(viewport(), &description, None).unwrap();
        assert!(commands.is_empty());

        state.set_culling_enabled(false);
        let commands = state.render(viewport(), &description, None).unwrap();
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn text_cache_fills_and_resets() {
        let mut state = LayoutState::new();
        let description = Desc::styled_text(Props::new(), "cached");
        state.layout(viewport(), &description, Some(&fake_measure)).unwrap();
        assert!(!state.text_cache.is_empty());
        state.reset_text_cache();
        assert!(state.text_cache.is_empty());
    }

    #[test]
    fn layout_without_measure_fn_fails_only_for_text() {
        let mut state = LayoutState::new();
        let no_text = Desc::container(Props::new(), vec![]);
        assert!(state.layout(viewport(), &no_text, None).is_ok());

        let with_text = Desc::container(Props::new(), vec![Desc::text("hi")]);
        let err = state.layout(viewport(), &with_text, None).unwrap_err();
        assert!(matches!(err, LayoutError::MeasureFnMissing { .. }));
    }

    #[test]
    fn nested_layout_end_to_end() {
        let mut state = LayoutState::new();
        let description = Desc::container(
            Props::new()
                .id("app")
                .width(Sizing::Grow(0.0, f32::MAX))
                .height(Sizing::Grow(0.0, f32::MAX))
                .direction("column"),
            vec![
                Desc::container(
                    Props::new().id("header").height(Sizing::Fixed(48.0)).width(Sizing::Grow(0.0, f32::MAX)),
                    vec![],
                ),
                Desc::container(
                    Props::new().id("body").height(Sizing::Grow(0.0, f32::MAX)).width(Sizing::Grow(0.0, f32::MAX)),
                    vec![],
                ),
            ],
        );
        let root = state.layout(viewport(), &description, None).unwrap();
        let header = root.find(ElementId::new("header").id).unwrap();
        let body = root.find(ElementId::new("body").id).unwrap();
        assert_eq!(header.bounding_box, BoundingBox::new(0.0, 0.0, 800.0, 48.0));
        assert_eq!(body.bounding_box, BoundingBox::new(0.0, 48.0, 800.0, 552.0));
    }

    #[test]
    fn text_nodes_keep_their_content() {
        let mut state = LayoutState::new();
        let description = Desc::styled_text(Props::new(), "Hello World");
        let root = state.layout(viewport(), &description, Some(&fake_measure)).unwrap();
        match &root.children()[0].kind {
            ElementKind::Text { content, .. } => assert_eq!(content, "Hello World"),
            ElementKind::Container { .. } => panic!("expected text"),
        }
    }
}
