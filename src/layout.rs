use crate::align::{AlignX, AlignY};

/// Defines different sizing behaviors for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SizingType {
    /// The element's size is determined by its content and constrained by min/max values.
    #[default]
    Fit,
    /// The element expands to fill available space within min/max constraints.
    Grow,
    /// The element's size is fixed to a percentage of its parent.
    Percent,
    /// The element's size is set to a fixed value.
    Fixed,
}

/// Represents different sizing strategies for layout elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizing {
    /// Fits the element's width/height within a min and max constraint.
    Fit(f32, f32),
    /// Expands the element to fill available space within min/max constraints.
    Grow(f32, f32),
    /// Sets a fixed width/height.
    Fixed(f32),
    /// Sets width/height as a percentage of its parent. Value should be between `0.0` and `1.0`.
    Percent(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizingMinMax {
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingAxis {
    pub type_: SizingType,
    pub min_max: SizingMinMax,
    pub percent: f32,
}

impl Default for SizingAxis {
    fn default() -> Self {
        Sizing::Fit(0.0, f32::MAX).into()
    }
}

impl From<Sizing> for SizingAxis {
    fn from(value: Sizing) -> Self {
        match value {
            Sizing::Fit(min, max) => Self {
                type_: SizingType::Fit,
                min_max: SizingMinMax { min, max },
                percent: 0.0,
            },
            Sizing::Grow(min, max) => Self {
                type_: SizingType::Grow,
                min_max: SizingMinMax { min, max },
                percent: 0.0,
            },
            Sizing::Fixed(size) => Self {
                type_: SizingType::Fixed,
                min_max: SizingMinMax {
                    min: size,
                    max: size,
                },
                percent: 0.0,
            },
            Sizing::Percent(percent) => Self {
                type_: SizingType::Percent,
                min_max: SizingMinMax { min: 0.0, max: 0.0 },
                percent,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizingConfig {
    pub width: SizingAxis,
    pub height: SizingAxis,
}

/// Represents padding values for each side of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Padding {
    /// Creates a new `Padding` with individual values for each side.
    pub fn new(left: u16, right: u16, top: u16, bottom: u16) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Sets the same padding value for all sides.
    pub fn all(value: u16) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sets the same padding for left and right sides.
    /// Top and bottom are set to `0`.
    pub fn horizontal(value: u16) -> Self {
        Self::new(value, value, 0, 0)
    }

    /// Sets the same padding for top and bottom sides.
    /// Left and right are set to `0`.
    pub fn vertical(value: u16) -> Self {
        Self::new(0, 0, value, value)
    }

    pub fn axis_sum(&self, x_axis: bool) -> f32 {
        if x_axis {
            (self.left + self.right) as f32
        } else {
            (self.top + self.bottom) as f32
        }
    }
}

impl From<u16> for Padding {
    /// Creates padding with the same value for all sides.
    fn from(value: u16) -> Self {
        Self::all(value)
    }
}

impl From<(u16, u16, u16, u16)> for Padding {
    /// Creates padding from a tuple in CSS order: (top, right, bottom, left).
    fn from((top, right, bottom, left): (u16, u16, u16, u16)) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

/// Defines the layout direction for arranging child elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LayoutDirection {
    /// Arranges elements from left to right.
    #[default]
    LeftToRight,
    /// Arranges elements from top to bottom.
    TopToBottom,
}

impl LayoutDirection {
    /// Parses a direction keyword, falling back to `LeftToRight` on anything unknown.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "row" | "left-to-right" => Self::LeftToRight,
            "column" | "top-to-bottom" => Self::TopToBottom,
            other => {
                log::warn!("unknown direction keyword {other:?}, defaulting to row");
                Self::LeftToRight
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChildAlignment {
    pub x: AlignX,
    pub y: AlignY,
}

/// Per-element layout configuration: sizing intents, padding, gap,
/// direction, child alignment and child wrap behavior.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutConfig {
    pub sizing: SizingConfig,
    pub padding: Padding,
    pub child_gap: u16,
    pub child_alignment: ChildAlignment,
    pub layout_direction: LayoutDirection,
    /// When true, children that overflow the main axis start a new line
    /// instead of overflowing; lines stack along the cross axis.
    pub wrap_children: bool,
}

/// Shorthand macro for [`Sizing::Fit`]. Defaults max to `f32::MAX` if omitted.
#[macro_export]
macro_rules! fit {
    ($min:expr, $max:expr) => {
        $crate::layout::Sizing::Fit($min, $max)
    };
    ($min:expr) => {
        fit!($min, f32::MAX)
    };
    () => {
        fit!(0.0)
    };
}

/// Shorthand macro for [`Sizing::Grow`]. Defaults max to `f32::MAX` if omitted.
#[macro_export]
macro_rules! grow {
    ($min:expr, $max:expr) => {
        $crate::layout::Sizing::Grow($min, $max)
    };
    ($min:expr) => {
        grow!($min, f32::MAX)
    };
    () => {
        grow!(0.0)
    };
}

/// Shorthand macro for [`Sizing::Fixed`].
#[macro_export]
macro_rules! fixed {
    ($val:expr) => {
        $crate::layout::Sizing::Fixed($val)
    };
}

/// Shorthand macro for [`Sizing::Percent`].
/// The value has to be in range `0.0..=1.0`.
#[macro_export]
macro_rules! percent {
    ($percent:expr) => {{
        const _: () = assert!(
            $percent >= 0.0 && $percent <= 1.0,
            "Percent value must be between 0.0 and 1.0 inclusive!"
        );
        $crate::layout::Sizing::Percent($percent)
    }};
}
