//! Two-pass sizing: a bottom-up fit pass computing intrinsic sizes,
//! followed by a top-down distribution pass resolving percent sizing and
//! sharing leftover space among grow children (or shrinking when demand
//! exceeds space). Each axis is resolved independently; there is no
//! iterative relaxation.

use crate::layout::{LayoutDirection, SizingAxis, SizingType};
use crate::text::{self, WrapMode};
use crate::tree::{Element, ElementKind};

const EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Y,
}

impl Axis {
    pub(crate) fn is_main(self, direction: LayoutDirection) -> bool {
        match self {
            Axis::X => direction == LayoutDirection::LeftToRight,
            Axis::Y => direction == LayoutDirection::TopToBottom,
        }
    }
}

pub(crate) fn size(element: &Element, axis: Axis) -> f32 {
    match axis {
        Axis::X => element.dimensions.width,
        Axis::Y => element.dimensions.height,
    }
}

fn set_size(element: &mut Element, axis: Axis, value: f32) {
    match axis {
        Axis::X => element.dimensions.width = value,
        Axis::Y => element.dimensions.height = value,
    }
}

fn min_size(element: &Element, axis: Axis) -> f32 {
    match axis {
        Axis::X => element.min_dimensions.width,
        Axis::Y => element.min_dimensions.height,
    }
}

fn set_min_size(element: &mut Element, axis: Axis, value: f32) {
    match axis {
        Axis::X => element.min_dimensions.width = value,
        Axis::Y => element.min_dimensions.height = value,
    }
}

fn sizing_axis(element: &Element, axis: Axis) -> SizingAxis {
    match axis {
        Axis::X => element.layout.sizing.width,
        Axis::Y => element.layout.sizing.height,
    }
}

fn float_equal(left: f32, right: f32) -> bool {
    (left - right).abs() < EPSILON
}

/// Resolves concrete dimensions for every element in the tree. The root is
/// expected to carry fixed viewport sizing.
pub fn resolve(root: &mut Element) {
    fit_pass(root, Axis::X);
    fit_pass(root, Axis::Y);
    distribute_pass(root, Axis::X);
    wrap_text_elements(root);
    // Text wrapping changes heights, so cross-axis intrinsics are refreshed
    // before the vertical distribution runs.
    fit_pass(root, Axis::Y);
    distribute_pass(root, Axis::Y);
}

/// Bottom-up pass: intrinsic content sizes for text leaves and containers,
/// clamped by each element's sizing intent. Percent elements stay at zero
/// until the top-down pass resolves them against their parent.
fn fit_pass(element: &mut Element, axis: Axis) {
    for child in element.children_mut() {
        fit_pass(child, axis);
    }

    let (content, min_content) = match &element.kind {
        ElementKind::Text {
            config,
            measurement,
            lines,
            ..
        } => match axis {
            Axis::X => {
                let width = measurement.unwrapped_dimensions.width;
                let min = match config.wrap_mode {
                    WrapMode::Words => measurement.min_width,
                    WrapMode::Newline => width,
                };
                (width, min)
            }
            Axis::Y => {
                let line_height = text_line_height(config, measurement);
                let height = if lines.is_empty() {
                    line_height
                } else {
                    line_height * lines.len() as f32
                };
                (height, height)
            }
        },
        ElementKind::Container { children } => {
            let layout = element.layout;
            let padding = layout.padding.axis_sum(axis == Axis::X);
            let gap = layout.child_gap as f32;
            let in_flow: Vec<&Element> =
                children.iter().filter(|child| !child.is_floating()).collect();
            if axis.is_main(layout.layout_direction) {
                let gaps = gap * in_flow.len().saturating_sub(1) as f32;
                let content: f32 = in_flow.iter().map(|child| size(child, axis)).sum();
                let min: f32 = in_flow.iter().map(|child| min_size(child, axis)).sum();
                (content + gaps + padding, min + gaps + padding)
            } else {
                let content = in_flow
                    .iter()
                    .map(|child| size(child, axis))
                    .fold(0.0, f32::max);
                let min = in_flow
                    .iter()
                    .map(|child| min_size(child, axis))
                    .fold(0.0, f32::max);
                (content + padding, min + padding)
            }
        }
    };

    let sizing = sizing_axis(element, axis);
    match sizing.type_ {
        SizingType::Fixed => {
            set_size(element, axis, sizing.min_max.min);
            set_min_size(element, axis, sizing.min_max.min);
        }
        SizingType::Fit | SizingType::Grow => {
            let clamped = content.clamp(sizing.min_max.min, sizing.min_max.max);
            set_size(element, axis, clamped);
            let min = min_content
                .max(sizing.min_max.min)
                .min(sizing.min_max.max)
                .min(clamped);
            set_min_size(element, axis, min);
        }
        SizingType::Percent => {
            set_size(element, axis, 0.0);
            set_min_size(element, axis, 0.0);
        }
    }
}

/// Top-down pass: resolves percent children against the parent's resolved
/// size and distributes leftover main-axis space to grow children (or
/// shrinks when demand exceeds space), then recurses.
fn distribute_pass(element: &mut Element, axis: Axis) {
    let parent_size = size(element, axis);
    let layout = element.layout;
    let padding = layout.padding.axis_sum(axis == Axis::X);
    let gap = layout.child_gap as f32;
    let along_axis = axis.is_main(layout.layout_direction);
    let clips_axis = element.clip.is_some_and(|clip| match axis {
        Axis::X => clip.horizontal,
        Axis::Y => clip.vertical,
    });
    let wrap_children = layout.wrap_children;
    let dimensions = element.dimensions;

    if let ElementKind::Container { children } = &mut element.kind {
        // Floating children resolve grow/percent against the parent itself
        // and take no part in flow distribution.
        for child in children.iter_mut() {
            let sizing = sizing_axis(child, axis);
            if child.is_floating() {
                match sizing.type_ {
                    SizingType::Grow => set_size(child, axis, parent_size),
                    SizingType::Percent => set_size(child, axis, parent_size * sizing.percent),
                    SizingType::Fit | SizingType::Fixed => {}
                }
            } else if sizing.type_ == SizingType::Percent {
                set_size(child, axis, parent_size * sizing.percent);
            }
        }

        let in_flow: Vec<usize> = children
            .iter()
            .enumerate()
            .filter(|(_, child)| !child.is_floating())
            .map(|(i, _)| i)
            .collect();

        if along_axis {
            let available = parent_size - padding;
            let lines = if wrap_children {
                wrap_lines(children, &in_flow, axis, available, gap)
            } else {
                vec![in_flow.clone()]
            };
            for line in &lines {
                distribute_line(children, line, axis, available, gap, clips_axis);
            }
        } else {
            let lines = if wrap_children {
                let main_axis = match axis {
                    Axis::X => Axis::Y,
                    Axis::Y => Axis::X,
                };
                let main_available = match main_axis {
                    Axis::X => dimensions.width,
                    Axis::Y => dimensions.height,
                } - layout.padding.axis_sum(main_axis == Axis::X);
                wrap_lines(children, &in_flow, main_axis, main_available, gap)
            } else {
                vec![in_flow.clone()]
            };
            for line in &lines {
                // Each wrapped line is sized independently on the cross axis.
                let line_extent = if wrap_children {
                    line.iter()
                        .map(|&i| size(&children[i], axis))
                        .fold(0.0, f32::max)
                } else {
                    parent_size - padding
                };
                for &index in line {
                    let child = &mut children[index];
                    let sizing = sizing_axis(child, axis);
                    match sizing.type_ {
                        SizingType::Grow => {
                            let grown = line_extent.min(sizing.min_max.max);
                            set_size(child, axis, grown.max(min_size(child, axis)));
                        }
                        SizingType::Fit => {
                            if !clips_axis {
                                let clamped = size(child, axis)
                                    .min(line_extent)
                                    .max(min_size(child, axis));
                                set_size(child, axis, clamped);
                            }
                        }
                        SizingType::Fixed | SizingType::Percent => {}
                    }
                }
            }
        }

        for child in children.iter_mut() {
            distribute_pass(child, axis);
        }
    }
}

/// Groups in-flow children into wrap lines: a child that would exceed the
/// remaining main-axis space starts a new line.
pub(crate) fn wrap_lines(
    children: &[Element],
    in_flow: &[usize],
    axis: Axis,
    available: f32,
    gap: f32,
) -> Vec<Vec<usize>> {
    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_extent: f32 = 0.0;
    for &index in in_flow {
        let child_size = size(&children[index], axis);
        let needed = if current.is_empty() {
            child_size
        } else {
            current_extent + gap + child_size
        };
        if !current.is_empty() && needed > available + EPSILON {
            lines.push(std::mem::take(&mut current));
            current_extent = 0.0;
        }
        current_extent = if current.is_empty() {
            child_size
        } else {
            current_extent + gap + child_size
        };
        current.push(index);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn distribute_line(
    children: &mut [Element],
    line: &[usize],
    axis: Axis,
    available: f32,
    gap: f32,
    clips_axis: bool,
) {
    let gaps = gap * line.len().saturating_sub(1) as f32;
    let content: f32 = line.iter().map(|&i| size(&children[i], axis)).sum();
    let remaining = available - content - gaps;

    if remaining > EPSILON {
        let growable: Vec<usize> = line
            .iter()
            .copied()
            .filter(|&i| sizing_axis(&children[i], axis).type_ == SizingType::Grow)
            .collect();
        if !growable.is_empty() {
            grow_children(children, &growable, axis, remaining);
        }
    } else if remaining < -EPSILON && !clips_axis {
        shrink_children(children, line, axis, -remaining);
    }
}

/// Grants `remaining` space to growable children: smallest first up to
/// parity with the next size tier, then equal whole-unit shares, then the
/// remainder one unit at a time in declaration order.
fn grow_children(children: &mut [Element], growable: &[usize], axis: Axis, mut remaining: f32) {
    let mut active: Vec<usize> = growable.to_vec();

    // Parity phase: raise the smallest children to the next size tier.
    while remaining > EPSILON && !active.is_empty() {
        let smallest = active
            .iter()
            .map(|&i| size(&children[i], axis))
            .fold(f32::MAX, f32::min);
        let next_tier = active
            .iter()
            .map(|&i| size(&children[i], axis))
            .filter(|&s| !float_equal(s, smallest) && s > smallest)
            .fold(f32::MAX, f32::min);
        if next_tier == f32::MAX {
            break;
        }
        let tier_members = active
            .iter()
            .filter(|&&i| float_equal(size(&children[i], axis), smallest))
            .count();
        let delta = (next_tier - smallest).min(remaining / tier_members as f32);
        let mut maxed = Vec::new();
        for &index in &active {
            if !float_equal(size(&children[index], axis), smallest) {
                continue;
            }
            let max = sizing_axis(&children[index], axis).min_max.max;
            let grant = delta.min(max - size(&children[index], axis)).max(0.0);
            adjust_size(children, index, axis, grant);
            remaining -= grant;
            if size(&children[index], axis) >= max - EPSILON {
                maxed.push(index);
            }
        }
        active.retain(|index| !maxed.contains(index));
    }

    // Equal-share phase: whole units split evenly, remainder handed out one
    // unit at a time in stable order.
    while remaining > EPSILON && !active.is_empty() {
        let share = (remaining / active.len() as f32).floor();
        if share >= 1.0 {
            let mut maxed = Vec::new();
            let mut granted = 0.0;
            for &index in &active {
                let max = sizing_axis(&children[index], axis).min_max.max;
                let grant = share.min(max - size(&children[index], axis)).max(0.0);
                adjust_size(children, index, axis, grant);
                remaining -= grant;
                granted += grant;
                if size(&children[index], axis) >= max - EPSILON {
                    maxed.push(index);
                }
            }
            active.retain(|index| !maxed.contains(index));
            if granted <= EPSILON {
                break;
            }
        } else {
            for &index in &active {
                if remaining <= EPSILON {
                    break;
                }
                let max = sizing_axis(&children[index], axis).min_max.max;
                let grant = remaining.min(1.0).min(max - size(&children[index], axis)).max(0.0);
                adjust_size(children, index, axis, grant);
                remaining -= grant;
            }
            break;
        }
    }
}

/// Shrinks resizable children by `deficit`: largest first down to parity
/// with the next tier, never below an element's minimum size. If minimums
/// still exceed available space, content overflows.
fn shrink_children(children: &mut [Element], line: &[usize], axis: Axis, mut deficit: f32) {
    let mut active: Vec<usize> = line
        .iter()
        .copied()
        .filter(|&i| {
            let resizable = match sizing_axis(&children[i], axis).type_ {
                SizingType::Fit | SizingType::Grow => true,
                SizingType::Fixed | SizingType::Percent => false,
            } || is_wrapping_text(&children[i]);
            resizable && size(&children[i], axis) > min_size(&children[i], axis) + EPSILON
        })
        .collect();

    while deficit > EPSILON && !active.is_empty() {
        let largest = active
            .iter()
            .map(|&i| size(&children[i], axis))
            .fold(f32::MIN, f32::max);
        let next_tier = active
            .iter()
            .map(|&i| size(&children[i], axis))
            .filter(|&s| !float_equal(s, largest) && s < largest)
            .fold(f32::MIN, f32::max);
        let tier_members = active
            .iter()
            .filter(|&&i| float_equal(size(&children[i], axis), largest))
            .count();
        let step = if next_tier == f32::MIN {
            deficit / tier_members as f32
        } else {
            (largest - next_tier).min(deficit / tier_members as f32)
        };
        let mut exhausted = Vec::new();
        for &index in &active {
            if !float_equal(size(&children[index], axis), largest) {
                continue;
            }
            let reduce = step.min(size(&children[index], axis) - min_size(&children[index], axis));
            adjust_size(children, index, axis, -reduce);
            deficit -= reduce;
            if size(&children[index], axis) <= min_size(&children[index], axis) + EPSILON {
                exhausted.push(index);
            }
        }
        active.retain(|index| !exhausted.contains(index));
    }

    if deficit > EPSILON {
        log::warn!(
            "children minimum sizes exceed available space by {deficit:.1}px; content overflows"
        );
    }
}

fn is_wrapping_text(element: &Element) -> bool {
    match &element.kind {
        ElementKind::Text { config, .. } => config.wrap_mode == WrapMode::Words,
        ElementKind::Container { .. } => false,
    }
}

// Helper wrapping the awkward "adjust size by delta" pattern used by the
// distribution loops.
fn adjust_size(children: &mut [Element], index: usize, axis: Axis, delta: f32) {
    let current = size(&children[index], axis);
    match axis {
        Axis::X => children[index].dimensions.width = current + delta,
        Axis::Y => children[index].dimensions.height = current + delta,
    }
}

fn text_line_height(
    config: &crate::text::TextConfig,
    measurement: &crate::text::TextMeasurement,
) -> f32 {
    if config.line_height > 0 {
        config.line_height as f32
    } else {
        measurement.unwrapped_dimensions.height
    }
}

/// Wraps every text element to the width assigned by the horizontal
/// distribution pass and updates its height to the stacked line height.
fn wrap_text_elements(element: &mut Element) {
    let width = element.dimensions.width;
    if let ElementKind::Text {
        config,
        measurement,
        lines,
        ..
    } = &mut element.kind
    {
        let line_height = text_line_height(config, measurement);
        *lines = text::wrap(&measurement.words, width, line_height, config.wrap_mode);
        let height = line_height * lines.len() as f32;
        element.dimensions.height = height;
        element.min_dimensions.height = height;
    }
    for child in element.children_mut() {
        wrap_text_elements(child);
    }
}
