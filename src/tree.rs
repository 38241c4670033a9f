//! The canonical element tree and the builder that expands a declarative
//! description into it.

use crate::description::{normalize, ComponentRegistry, Desc, ElemDesc, Props, Tag};
use crate::elements::{BackgroundConfig, BorderConfig, ClipConfig, FloatingConfig};
use crate::errors::LayoutError;
use crate::id::ElementId;
use crate::layout::{ChildAlignment, LayoutConfig, LayoutDirection, Sizing};
use crate::math::{BoundingBox, Dimensions};
use crate::text::{Line, MeasureFn, TextAlignment, TextConfig, TextMeasurement, TextMeasurementCache, WrapMode};
use crate::align::{AlignX, AlignY};

const ROOT_ID: &str = "Trellis__Root";

/// Closed set of element kinds, matched exhaustively at each stage.
#[derive(Debug)]
pub enum ElementKind {
    Container {
        children: Vec<Element>,
    },
    Text {
        content: String,
        config: TextConfig,
        measurement: TextMeasurement,
        /// Wrapped lines, filled during sizing.
        lines: Vec<Line>,
    },
}

/// A node in the canonical tree. Children are owned exclusively by their
/// parent; identity is immutable once assigned.
#[derive(Debug)]
pub struct Element {
    pub id: ElementId,
    pub layout: LayoutConfig,
    pub background: Option<BackgroundConfig>,
    pub border: Option<BorderConfig>,
    pub clip: Option<ClipConfig>,
    pub floating: Option<FloatingConfig>,
    /// Resolved size, filled by the sizing resolver.
    pub dimensions: Dimensions,
    /// Smallest size this element can shrink to.
    pub min_dimensions: Dimensions,
    /// Absolute geometry, filled by the positioning pass.
    pub bounding_box: BoundingBox,
    pub kind: ElementKind,
}

impl Element {
    fn new(id: ElementId, layout: LayoutConfig, kind: ElementKind) -> Self {
        Self {
            id,
            layout,
            background: None,
            border: None,
            clip: None,
            floating: None,
            dimensions: Dimensions::default(),
            min_dimensions: Dimensions::default(),
            bounding_box: BoundingBox::default(),
            kind,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    pub fn is_floating(&self) -> bool {
        self.floating.is_some()
    }

    pub fn children(&self) -> &[Element] {
        match &self.kind {
            ElementKind::Container { children } => children,
            ElementKind::Text { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> &mut [Element] {
        match &mut self.kind {
            ElementKind::Container { children } => children,
            ElementKind::Text { .. } => &mut [],
        }
    }

    /// Finds an element by id anywhere in this subtree.
    pub fn find(&self, id: u32) -> Option<&Element> {
        if self.id.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }
}

/// Expands `description` into a canonical element tree rooted at a
/// synthetic root fixed to the viewport size.
///
/// Composite components are expanded through `registry` until only
/// built-in tags remain. Text elements are pre-measured through `cache`;
/// if any text node exists and `measure_fn` is `None`, the invocation
/// fails with [`LayoutError::MeasureFnMissing`].
pub fn build_tree(
    viewport: Dimensions,
    description: &Desc,
    registry: &ComponentRegistry,
    cache: &mut TextMeasurementCache,
    measure_fn: Option<&MeasureFn>,
) -> Result<Element, LayoutError> {
    let mut builder = TreeBuilder {
        registry,
        cache,
        measure_fn,
    };
    let children = builder.build_children(vec![description.clone()], "container")?;

    let mut root = Element::new(
        ElementId::new(ROOT_ID),
        LayoutConfig {
            sizing: crate::layout::SizingConfig {
                width: Sizing::Fixed(viewport.width).into(),
                height: Sizing::Fixed(viewport.height).into(),
            },
            ..Default::default()
        },
        ElementKind::Container { children },
    );
    root.dimensions = viewport;
    root.min_dimensions = viewport;
    Ok(root)
}

struct TreeBuilder<'a> {
    registry: &'a ComponentRegistry,
    cache: &'a mut TextMeasurementCache,
    measure_fn: Option<&'a MeasureFn>,
}

impl TreeBuilder<'_> {
    /// Normalizes and builds a child list. `parent_tag` feeds generated
    /// identities for children without an explicit id.
    fn build_children(
        &mut self,
        children: Vec<Desc>,
        parent_tag: &str,
    ) -> Result<Vec<Element>, LayoutError> {
        let flat = normalize(children);
        let mut built = Vec::with_capacity(flat.len());
        for (position, child) in flat.into_iter().enumerate() {
            match child {
                Desc::Elem(elem) => built.push(self.build_element(*elem, position)?),
                Desc::Text(content) => {
                    let id = ElementId::new(&format!("{parent_tag}-text-{position}"));
                    built.push(self.build_text(id, content, TextConfig::default())?);
                }
                // normalize() only yields Elem and Text entries
                Desc::None | Desc::Many(_) => unreachable!(),
            }
        }
        Ok(built)
    }

    fn build_element(&mut self, elem: ElemDesc, position: usize) -> Result<Element, LayoutError> {
        let ElemDesc {
            tag,
            props,
            children,
        } = elem;

        if let Tag::Component(name) = &tag {
            let component = self
                .registry
                .get(name)
                .ok_or_else(|| LayoutError::UnknownComponent { tag: name.clone() })?;
            let expanded = component(&props, &children);
            return match expanded {
                Desc::Elem(inner) => self.build_element(*inner, position),
                Desc::Text(content) => {
                    let id = element_id(&props, name, position);
                    self.build_text(id, content, text_config(&props))
                }
                // A component may expand to nothing or to a bare sequence;
                // wrap those in an anonymous container so the result stays
                // a single element.
                other => {
                    let id = element_id(&props, name, position);
                    let built = self.build_children(vec![other], name)?;
                    Ok(Element::new(
                        id,
                        layout_config(&props),
                        ElementKind::Container { children: built },
                    ))
                }
            };
        }

        let id = element_id(&props, tag.name(), position);
        match tag {
            Tag::Text => {
                let content: String = normalize(children)
                    .into_iter()
                    .filter_map(|child| match child {
                        Desc::Text(text) => Some(text),
                        _ => None,
                    })
                    .collect();
                self.build_text(id, content, text_config(&props))
            }
            Tag::Container | Tag::Scroll => {
                let built = self.build_children(children, tag.name())?;
                let mut element = Element::new(
                    id,
                    layout_config(&props),
                    ElementKind::Container { children: built },
                );
                element.background = props.background.map(|color| BackgroundConfig {
                    color,
                    corner_radius: props.corner_radius.unwrap_or_default(),
                });
                element.border = props.border;
                element.clip = props.clip.or(if tag == Tag::Scroll {
                    Some(ClipConfig {
                        horizontal: false,
                        vertical: true,
                    })
                } else {
                    None
                });
                element.floating = props.floating;
                Ok(element)
            }
            Tag::Component(_) => unreachable!(),
        }
    }

    fn build_text(
        &mut self,
        id: ElementId,
        content: String,
        config: TextConfig,
    ) -> Result<Element, LayoutError> {
        let measure_fn = self.measure_fn.ok_or_else(|| LayoutError::MeasureFnMissing {
            id: id.string_id.as_str().to_string(),
        })?;
        let measurement = self.cache.measure_cached(&content, &config, measure_fn);
        Ok(Element::new(
            id,
            LayoutConfig::default(),
            ElementKind::Text {
                content,
                config,
                measurement,
                lines: Vec::new(),
            },
        ))
    }
}

fn element_id(props: &Props, tag_name: &str, position: usize) -> ElementId {
    match (&props.id, props.index) {
        (Some(id), Some(index)) => ElementId::new_index(id, index),
        (Some(id), None) => ElementId::new(id),
        (None, Some(index)) => ElementId::new_index(&format!("{tag_name}-{position}"), index),
        (None, None) => ElementId::new(&format!("{tag_name}-{position}")),
    }
}

fn layout_config(props: &Props) -> LayoutConfig {
    LayoutConfig {
        sizing: crate::layout::SizingConfig {
            width: props.width.unwrap_or(Sizing::Fit(0.0, f32::MAX)).into(),
            height: props.height.unwrap_or(Sizing::Fit(0.0, f32::MAX)).into(),
        },
        padding: props.padding.unwrap_or_default(),
        child_gap: props.gap.unwrap_or(0),
        child_alignment: ChildAlignment {
            x: props
                .align_x
                .as_deref()
                .map(AlignX::from_keyword)
                .unwrap_or_default(),
            y: props
                .align_y
                .as_deref()
                .map(AlignY::from_keyword)
                .unwrap_or_default(),
        },
        layout_direction: props
            .direction
            .as_deref()
            .map(LayoutDirection::from_keyword)
            .unwrap_or_default(),
        wrap_children: props.wrap.unwrap_or(false),
    }
}

fn text_config(props: &Props) -> TextConfig {
    let defaults = TextConfig::default();
    TextConfig {
        color: props.text_color.unwrap_or(defaults.color),
        font_id: props.font_id.unwrap_or(defaults.font_id),
        font_size: props.font_size.unwrap_or(defaults.font_size),
        letter_spacing: props.letter_spacing.unwrap_or(defaults.letter_spacing),
        line_height: props.line_height.unwrap_or(defaults.line_height),
        wrap_mode: props
            .text_wrap
            .as_deref()
            .map(WrapMode::from_keyword)
            .unwrap_or_default(),
        alignment: props
            .text_align
            .as_deref()
            .map(TextAlignment::from_keyword)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fake_measure(text: &str, config: &TextConfig) -> Dimensions {
        let char_width = config.font_size as f32 / 2.0;
        Dimensions::new(text.chars().count() as f32 * char_width, config.font_size as f32)
    }

    fn build(description: &Desc) -> Result<Element, LayoutError> {
        let registry = ComponentRegistry::new();
        build_with(description, &registry)
    }

    fn build_with(
        description: &Desc,
        registry: &ComponentRegistry,
    ) -> Result<Element, LayoutError> {
        let mut cache = TextMeasurementCache::new();
        build_tree(
            Dimensions::new(800.0, 600.0),
            description,
            registry,
            &mut cache,
            Some(&fake_measure),
        )
    }

    #[test]
    fn nil_description_builds_bare_root() {
        let root = build(&Desc::None).unwrap();
        assert!(root.children().is_empty());
        assert_eq!(root.dimensions, Dimensions::new(800.0, 600.0));
    }

    #[test]
    fn raw_strings_become_text_nodes() {
        let description = Desc::container(Props::new(), vec![Desc::text("hello")]);
        let root = build(&description).unwrap();
        let container = &root.children()[0];
        assert_eq!(container.children().len(), 1);
        assert!(container.children()[0].is_text());
    }

    #[test]
    fn sequences_flatten_in_place() {
        let description = Desc::container(
            Props::new(),
            vec![
                Desc::text("a"),
                Desc::Many(vec![Desc::text("b"), Desc::text("c")]),
                Desc::text("d"),
            ],
        );
        let root = build(&description).unwrap();
        assert_eq!(root.children()[0].children().len(), 4);
    }

    #[test]
    fn explicit_id_is_honored() {
        let description = Desc::container(Props::new().id("sidebar"), vec![]);
        let root = build(&description).unwrap();
        assert_eq!(root.children()[0].id, ElementId::new("sidebar"));
    }

    #[test]
    fn indexed_id_is_suffixed() {
        let description = Desc::Many(
            (0..3)
                .map(|i| Desc::container(Props::new().id("row").index(i), vec![]))
                .collect(),
        );
        let root = build(&description).unwrap();
        let ids: Vec<u32> = root.children().iter().map(|c| c.id.id).collect();
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert!(root.children().iter().all(|c| c.id.base_id == ElementId::new("row").id));
    }

    #[test]
    fn generated_ids_use_tag_and_position() {
        let description = Desc::Many(vec![
            Desc::container(Props::new(), vec![]),
            Desc::container(Props::new(), vec![]),
        ]);
        let root = build(&description).unwrap();
        assert_eq!(root.children()[0].id, ElementId::new("container-0"));
        assert_eq!(root.children()[1].id, ElementId::new("container-1"));
    }

    #[test]
    fn scroll_tag_gets_vertical_clip() {
        let description = Desc::scroll(Props::new(), vec![]);
        let root = build(&description).unwrap();
        let scroll = &root.children()[0];
        assert_eq!(
            scroll.clip,
            Some(ClipConfig {
                horizontal: false,
                vertical: true
            })
        );
    }

    #[test]
    fn component_expansion() {
        let mut registry = ComponentRegistry::new();
        registry.register("card", |props, children| {
            Desc::container(
                Props::new()
                    .id(props.id.clone().unwrap_or_else(|| "card".into()))
                    .padding(8)
                    .background((30.0, 30.0, 30.0)),
                children.to_vec(),
            )
        });
        let description = Desc::component("card", Props::new().id("hero"), vec![Desc::text("hi")]);
        let root = build_with(&description, &registry).unwrap();
        let card = &root.children()[0];
        assert_eq!(card.id, ElementId::new("hero"));
        assert!(card.background.is_some());
        assert_eq!(card.children().len(), 1);
    }

    #[test]
    fn nested_component_expansion() {
        let mut registry = ComponentRegistry::new();
        registry.register("inner", |_, _| Desc::container(Props::new().id("leaf"), vec![]));
        registry.register("outer", |_, _| {
            Desc::component("inner", Props::new(), vec![])
        });
        let description = Desc::component("outer", Props::new(), vec![]);
        let root = build_with(&description, &registry).unwrap();
        assert_eq!(root.children()[0].id, ElementId::new("leaf"));
    }

    #[test]
    fn unknown_component_is_an_error() {
        let description = Desc::component("missing", Props::new(), vec![]);
        let err = build(&description).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownComponent {
                tag: "missing".into()
            }
        );
    }

    #[test]
    fn text_without_measure_fn_is_an_error() {
        let registry = ComponentRegistry::new();
        let mut cache = TextMeasurementCache::new();
        let description = Desc::container(Props::new(), vec![Desc::text("hello")]);
        let err = build_tree(
            Dimensions::new(800.0, 600.0),
            &description,
            &registry,
            &mut cache,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::MeasureFnMissing { .. }));
    }

    #[test]
    fn text_is_premeasured() {
        let description = Desc::styled_text(Props::new().font_size(16), "Hello World");
        let root = build(&description).unwrap();
        match &root.children()[0].kind {
            ElementKind::Text { measurement, .. } => {
                assert_eq!(measurement.unwrapped_dimensions.width, 88.0);
                assert_eq!(measurement.min_width, 40.0);
            }
            ElementKind::Container { .. } => panic!("expected text element"),
        }
    }

    #[test]
    fn malformed_direction_keyword_defaults_to_row() {
        let description = Desc::container(Props::new().direction("sideways"), vec![]);
        let root = build(&description).unwrap();
        assert_eq!(
            root.children()[0].layout.layout_direction,
            LayoutDirection::LeftToRight
        );
    }
}
