//! Typed attachments on container elements: background, border, clip
//! (scroll container) and floating (out-of-flow) configs.

use crate::color::Color;
use crate::math::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_left: f32,
    pub bottom_right: f32,
}

impl CornerRadius {
    pub fn is_zero(&self) -> bool {
        self.top_left == 0.0
            && self.top_right == 0.0
            && self.bottom_left == 0.0
            && self.bottom_right == 0.0
    }
}

impl From<f32> for CornerRadius {
    /// Creates a corner radius with the same value for all corners.
    fn from(value: f32) -> Self {
        Self {
            top_left: value,
            top_right: value,
            bottom_left: value,
            bottom_right: value,
        }
    }
}

impl From<(f32, f32, f32, f32)> for CornerRadius {
    /// Creates corner radii from a tuple in CSS order: (top-left, top-right, bottom-right, bottom-left).
    fn from((tl, tr, br, bl): (f32, f32, f32, f32)) -> Self {
        Self {
            top_left: tl,
            top_right: tr,
            bottom_left: bl,
            bottom_right: br,
        }
    }
}

/// Fill behind an element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BackgroundConfig {
    pub color: Color,
    pub corner_radius: CornerRadius,
}

/// Defines the border width for each side of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderWidth {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl BorderWidth {
    pub fn all(width: u16) -> Self {
        Self {
            left: width,
            right: width,
            top: width,
            bottom: width,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.left == 0 && self.right == 0 && self.top == 0 && self.bottom == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderConfig {
    pub color: Color,
    pub width: BorderWidth,
}

/// Turns an element into a scroll container. Children are laid out
/// normally, then shifted by the caller-supplied scroll offset, and the
/// emitted commands are bracketed by a clip push/pop pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipConfig {
    pub horizontal: bool,
    pub vertical: bool,
}

/// One of nine anchor positions on a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AttachPoint {
    #[default]
    LeftTop,
    LeftCenter,
    LeftBottom,
    CenterTop,
    CenterCenter,
    CenterBottom,
    RightTop,
    RightCenter,
    RightBottom,
}

impl AttachPoint {
    /// Horizontal fraction of the rectangle's width for this anchor.
    pub(crate) fn x_fraction(&self) -> f32 {
        match self {
            Self::LeftTop | Self::LeftCenter | Self::LeftBottom => 0.0,
            Self::CenterTop | Self::CenterCenter | Self::CenterBottom => 0.5,
            Self::RightTop | Self::RightCenter | Self::RightBottom => 1.0,
        }
    }

    /// Vertical fraction of the rectangle's height for this anchor.
    pub(crate) fn y_fraction(&self) -> f32 {
        match self {
            Self::LeftTop | Self::CenterTop | Self::RightTop => 0.0,
            Self::LeftCenter | Self::CenterCenter | Self::RightCenter => 0.5,
            Self::LeftBottom | Self::CenterBottom | Self::RightBottom => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttachPoints {
    /// Anchor on the floating element itself.
    pub element: AttachPoint,
    /// Anchor on the parent the element floats against.
    pub parent: AttachPoint,
}

/// Removes an element from normal flow. The element is positioned by
/// anchoring `attach_points.element` onto `attach_points.parent` plus
/// `offset`, and its render commands carry `z_index` instead of inheriting
/// tree order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FloatingConfig {
    pub attach_points: AttachPoints,
    pub offset: Vector2,
    pub z_index: i16,
}
