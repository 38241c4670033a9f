//! Positioning pass: converts resolved dimensions into absolute bounding
//! boxes. In-flow children advance along the parent's main axis inside its
//! padding, aligned per the parent's child alignment; wrapped lines stack
//! along the cross axis. Scroll containers shift their children by the
//! caller-supplied offset, and floating elements anchor against their
//! parent's box instead of participating in flow.

use rustc_hash::FxHashMap;

use crate::align::{AlignX, AlignY};
use crate::layout::LayoutDirection;
use crate::math::{BoundingBox, Vector2};
use crate::sizing::{self, Axis};
use crate::tree::{Element, ElementKind};

/// Assigns absolute bounding boxes to every element, with the root at the
/// origin. `scroll_offsets` maps clip-container element ids to the offset
/// applied to their children.
pub fn resolve(root: &mut Element, scroll_offsets: &FxHashMap<u32, Vector2>) {
    place(root, Vector2::default(), scroll_offsets);
}

fn place(element: &mut Element, origin: Vector2, scroll_offsets: &FxHashMap<u32, Vector2>) {
    element.bounding_box = BoundingBox::new(
        origin.x,
        origin.y,
        element.dimensions.width,
        element.dimensions.height,
    );

    let layout = element.layout;
    let dimensions = element.dimensions;
    let scroll = if element.clip.is_some() {
        scroll_offsets
            .get(&element.id.id)
            .copied()
            .unwrap_or_default()
    } else {
        Vector2::default()
    };

    let ElementKind::Container { children } = &mut element.kind else {
        return;
    };
    if children.is_empty() {
        return;
    }

    let row = layout.layout_direction == LayoutDirection::LeftToRight;
    let main_axis = if row { Axis::X } else { Axis::Y };
    let cross_axis = if row { Axis::Y } else { Axis::X };
    let gap = layout.child_gap as f32;
    let padding = layout.padding;
    let main_start = if row {
        padding.left as f32
    } else {
        padding.top as f32
    };
    let cross_start = if row {
        padding.top as f32
    } else {
        padding.left as f32
    };
    let main_available = match main_axis {
        Axis::X => dimensions.width,
        Axis::Y => dimensions.height,
    } - padding.axis_sum(main_axis == Axis::X);
    let cross_available = match cross_axis {
        Axis::X => dimensions.width,
        Axis::Y => dimensions.height,
    } - padding.axis_sum(cross_axis == Axis::X);

    // Group alignment along the main axis and per-child alignment on the
    // cross axis both come from the parent's child alignment, axis-mapped
    // by layout direction.
    let main_align = if row {
        align_x_fraction(layout.child_alignment.x)
    } else {
        align_y_fraction(layout.child_alignment.y)
    };
    let cross_align = if row {
        align_y_fraction(layout.child_alignment.y)
    } else {
        align_x_fraction(layout.child_alignment.x)
    };

    let in_flow: Vec<usize> = children
        .iter()
        .enumerate()
        .filter(|(_, child)| !child.is_floating())
        .map(|(i, _)| i)
        .collect();
    let lines = if layout.wrap_children {
        sizing::wrap_lines(children, &in_flow, main_axis, main_available, gap)
    } else {
        vec![in_flow]
    };

    // The block of wrapped lines is aligned as a whole on the cross axis.
    let line_extents: Vec<f32> = lines
        .iter()
        .map(|line| {
            line.iter()
                .map(|&i| sizing::size(&children[i], cross_axis))
                .fold(0.0, f32::max)
        })
        .collect();
    let lines_total: f32 = line_extents.iter().sum::<f32>()
        + gap * lines.len().saturating_sub(1) as f32;
    let mut cross_cursor =
        cross_start + (cross_available - lines_total).max(0.0) * cross_align;

    for (line, &line_extent) in lines.iter().zip(&line_extents) {
        let content: f32 = line
            .iter()
            .map(|&i| sizing::size(&children[i], main_axis))
            .sum::<f32>()
            + gap * line.len().saturating_sub(1) as f32;
        let mut main_cursor = main_start + (main_available - content).max(0.0) * main_align;

        for &index in line {
            let child = &mut children[index];
            let child_main = sizing::size(child, main_axis);
            let child_cross_offset =
                (line_extent - sizing::size(child, cross_axis)).max(0.0) * cross_align;
            let (dx, dy) = if row {
                (main_cursor, cross_cursor + child_cross_offset)
            } else {
                (cross_cursor + child_cross_offset, main_cursor)
            };
            let child_origin = Vector2::new(origin.x + dx + scroll.x, origin.y + dy + scroll.y);
            place(child, child_origin, scroll_offsets);
            main_cursor += child_main + gap;
        }
        cross_cursor += line_extent + gap;
    }

    // Floating children anchor their own attach point onto the parent's.
    let parent_box = BoundingBox::new(origin.x, origin.y, dimensions.width, dimensions.height);
    for child in children.iter_mut() {
        let Some(floating) = child.floating else {
            continue;
        };
        let attach = floating.attach_points;
        let target = Vector2::new(
            parent_box.x + parent_box.width * attach.parent.x_fraction()
                - child.dimensions.width * attach.element.x_fraction()
                + floating.offset.x,
            parent_box.y + parent_box.height * attach.parent.y_fraction()
                - child.dimensions.height * attach.element.y_fraction()
                + floating.offset.y,
        );
        place(child, target, scroll_offsets);
    }
}

fn align_x_fraction(align: AlignX) -> f32 {
    match align {
        AlignX::Start => 0.0,
        AlignX::Center => 0.5,
        AlignX::End => 1.0,
    }
}

fn align_y_fraction(align: AlignY) -> f32 {
    match align {
        AlignY::Start => 0.0,
        AlignY::Center => 0.5,
        AlignY::End => 1.0,
    }
}
