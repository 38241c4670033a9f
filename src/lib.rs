//! Trellis is a retained-tree, constraint-based UI layout engine: you hand
//! it a declarative description of a UI tree and a viewport, and it hands
//! back an ordered list of render commands for any renderer to execute.
//!
//! A layout run is a pure pipeline over explicit state:
//!
//! 1. the description is expanded into a canonical element tree
//!    (components resolved, raw strings lifted to text nodes),
//! 2. a two-pass constraint solver resolves fit/grow/percent/fixed sizing
//!    on each axis, wrapping text between the horizontal and vertical
//!    passes,
//! 3. elements are positioned absolutely, honoring alignment, scroll
//!    offsets and floating anchors,
//! 4. the tree is flattened into sorted [`RenderCommand`]s.
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! let mut state = LayoutState::new();
//! let ui = Desc::container(
//!     Props::new().id("root").padding(16).gap(8),
//!     vec![
//!         Desc::container(Props::new().id("sidebar").width(fixed!(200.0)), vec![]),
//!         Desc::container(Props::new().id("content").width(grow!()), vec![]),
//!     ],
//! );
//! let commands = state
//!     .render(Dimensions::new(800.0, 600.0), &ui, None)
//!     .unwrap();
//! ```
//!
//! Text needs a measuring function (typically backed by your font
//! rasterizer); pass it as the last argument to
//! [`LayoutState::layout`]/[`LayoutState::render`].

pub mod align;
pub mod color;
pub mod description;
pub mod elements;
pub mod engine;
pub mod errors;
pub mod id;
pub mod layout;
pub mod math;
pub mod position;
pub mod prelude;
pub mod render_commands;
pub mod sizing;
pub mod text;
pub mod tree;

pub use color::Color;
pub use description::{Desc, Props};
pub use engine::LayoutState;
pub use errors::LayoutError;
pub use math::{Dimensions, Vector2};
pub use render_commands::{RenderCommand, RenderCommandConfig};
pub use tree::Element;
