//! The declarative tree description consumed by the builder.
//!
//! A description is a nested node form: a tag selecting a built-in element
//! kind or a registered composite component, a props map, and children.
//! Raw strings are implicit text nodes and sequences are flattened in
//! place; [`normalize`] lowers every child form into a flat list before the
//! builder recursion runs.

use rustc_hash::FxHashMap;

use crate::color::Color;
use crate::elements::{BorderConfig, ClipConfig, CornerRadius, FloatingConfig};
use crate::layout::{Padding, Sizing};

/// Built-in element kinds plus registered composite components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Container,
    Text,
    /// A container with vertical clipping enabled (scroll shorthand).
    Scroll,
    Component(String),
}

impl Tag {
    pub(crate) fn name(&self) -> &str {
        match self {
            Tag::Container => "container",
            Tag::Text => "text",
            Tag::Scroll => "scroll",
            Tag::Component(name) => name,
        }
    }
}

/// A node in the declarative description.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Desc {
    /// The nil description: builds nothing.
    #[default]
    None,
    /// A raw string, treated as an implicit text node.
    Text(String),
    /// A sequence of descriptions, flattened in place.
    Many(Vec<Desc>),
    Elem(Box<ElemDesc>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElemDesc {
    pub tag: Tag,
    pub props: Props,
    pub children: Vec<Desc>,
}

impl Desc {
    pub fn container(props: Props, children: Vec<Desc>) -> Self {
        Desc::Elem(Box::new(ElemDesc {
            tag: Tag::Container,
            props,
            children,
        }))
    }

    pub fn scroll(props: Props, children: Vec<Desc>) -> Self {
        Desc::Elem(Box::new(ElemDesc {
            tag: Tag::Scroll,
            props,
            children,
        }))
    }

    pub fn text(content: impl Into<String>) -> Self {
        Desc::Text(content.into())
    }

    /// A text element with an explicit text configuration in `props`.
    pub fn styled_text(props: Props, content: impl Into<String>) -> Self {
        Desc::Elem(Box::new(ElemDesc {
            tag: Tag::Text,
            props,
            children: vec![Desc::Text(content.into())],
        }))
    }

    /// A composite component invocation, expanded through the registry.
    pub fn component(tag: impl Into<String>, props: Props, children: Vec<Desc>) -> Self {
        Desc::Elem(Box::new(ElemDesc {
            tag: Tag::Component(tag.into()),
            props,
            children,
        }))
    }
}

impl From<&str> for Desc {
    fn from(content: &str) -> Self {
        Desc::Text(content.to_string())
    }
}

impl From<Vec<Desc>> for Desc {
    fn from(children: Vec<Desc>) -> Self {
        Desc::Many(children)
    }
}

/// The props map of a description node.
///
/// Sizing and visual props are typed; keyword props (`direction`,
/// alignment, wrap modes) are strings parsed with documented defaults, so a
/// malformed keyword degrades instead of aborting. `custom` carries
/// free-form key/values through to composite components.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Props {
    pub id: Option<String>,
    /// Index suffix for elements generated in a sequence; produces an
    /// index-suffixed identity.
    pub index: Option<u32>,
    pub width: Option<Sizing>,
    pub height: Option<Sizing>,
    pub direction: Option<String>,
    pub padding: Option<Padding>,
    pub gap: Option<u16>,
    pub align_x: Option<String>,
    pub align_y: Option<String>,
    pub wrap: Option<bool>,
    pub background: Option<Color>,
    pub corner_radius: Option<CornerRadius>,
    pub border: Option<BorderConfig>,
    pub clip: Option<ClipConfig>,
    pub floating: Option<FloatingConfig>,
    pub font_id: Option<u16>,
    pub font_size: Option<u16>,
    pub text_color: Option<Color>,
    pub letter_spacing: Option<u16>,
    pub line_height: Option<u16>,
    pub text_wrap: Option<String>,
    pub text_align: Option<String>,
    pub custom: FxHashMap<String, String>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    pub fn width(mut self, sizing: Sizing) -> Self {
        self.width = Some(sizing);
        self
    }

    pub fn height(mut self, sizing: Sizing) -> Self {
        self.height = Some(sizing);
        self
    }

    pub fn direction(mut self, keyword: impl Into<String>) -> Self {
        self.direction = Some(keyword.into());
        self
    }

    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = Some(gap);
        self
    }

    pub fn align(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.align_x = Some(x.into());
        self.align_y = Some(y.into());
        self
    }

    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = Some(wrap);
        self
    }

    pub fn background(mut self, color: impl Into<Color>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn corner_radius(mut self, radius: impl Into<CornerRadius>) -> Self {
        self.corner_radius = Some(radius.into());
        self
    }

    pub fn border(mut self, border: BorderConfig) -> Self {
        self.border = Some(border);
        self
    }

    pub fn clip(mut self, horizontal: bool, vertical: bool) -> Self {
        self.clip = Some(ClipConfig {
            horizontal,
            vertical,
        });
        self
    }

    pub fn floating(mut self, floating: FloatingConfig) -> Self {
        self.floating = Some(floating);
        self
    }

    pub fn font_id(mut self, font_id: u16) -> Self {
        self.font_id = Some(font_id);
        self
    }

    pub fn font_size(mut self, font_size: u16) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn text_color(mut self, color: impl Into<Color>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn letter_spacing(mut self, spacing: u16) -> Self {
        self.letter_spacing = Some(spacing);
        self
    }

    pub fn line_height(mut self, height: u16) -> Self {
        self.line_height = Some(height);
        self
    }

    pub fn text_wrap(mut self, keyword: impl Into<String>) -> Self {
        self.text_wrap = Some(keyword.into());
        self
    }

    pub fn text_align(mut self, keyword: impl Into<String>) -> Self {
        self.text_align = Some(keyword.into());
        self
    }

    pub fn custom(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }
}

/// Lowers heterogeneous child forms into a flat list of `Elem`/`Text`
/// entries: sequences are flattened in place and nil descriptions dropped.
pub fn normalize(children: Vec<Desc>) -> Vec<Desc> {
    let mut flat = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Desc::None => {}
            Desc::Many(nested) => flat.extend(normalize(nested)),
            other => flat.push(other),
        }
    }
    flat
}

/// A composite component: a function from props and children to a
/// description, expanded recursively until only built-in tags remain.
pub type ComponentFn = Box<dyn Fn(&Props, &[Desc]) -> Desc>;

/// Registry of composite components, consulted by the tree builder during
/// expansion. Registration and unregistration are explicit, ordered
/// operations; there is no implicit discovery.
#[derive(Default)]
pub struct ComponentRegistry {
    components: FxHashMap<String, ComponentFn>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `component` under `tag`, replacing any previous
    /// registration for the same tag.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        component: impl Fn(&Props, &[Desc]) -> Desc + 'static,
    ) {
        self.components.insert(tag.into(), Box::new(component));
    }

    /// Removes the registration for `tag`, returning whether one existed.
    pub fn unregister(&mut self, tag: &str) -> bool {
        self.components.remove(tag).is_some()
    }

    pub fn get(&self, tag: &str) -> Option<&ComponentFn> {
        self.components.get(tag)
    }
}
