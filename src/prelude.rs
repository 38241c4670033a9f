//! The Trellis prelude — a single import for everything you need.
//!
//! ```rust
//! use trellis::prelude::*;
//! ```

// Core types
pub use crate::engine::LayoutState;
pub use crate::description::{Desc, Props};
pub use crate::errors::LayoutError;
pub use crate::id::ElementId;
pub use crate::math::{BoundingBox, Dimensions, Vector2};
pub use crate::render_commands::{RenderCommand, RenderCommandConfig};
pub use crate::tree::{Element, ElementKind};

// Macros
pub use crate::{fit, fixed, grow, percent};

// Sizing — type only, NOT globbed (Fit/Grow collide with the macros)
pub use crate::layout::Sizing;

// Alignment — types only, NOT globbed (both axes share Start/Center/End,
// so globbing the variants would make them ambiguous)
pub use crate::align::{AlignX, AlignY};

// LayoutDirection — globbed
pub use crate::layout::LayoutDirection::{self, *};

// WrapMode — type only, NOT globbed
pub use crate::text::WrapMode;

pub use crate::color::Color;
pub use crate::elements::{AttachPoint, AttachPoints, FloatingConfig};
pub use crate::layout::Padding;
