//! Flattens a positioned element tree into an ordered list of render
//! commands. Normal flow is emitted in tree order; floating subtrees are
//! deferred and appended afterwards, stable-sorted by z-index; the debug
//! overlay (when enabled) comes last on top of everything.

use crate::color::Color;
use crate::elements::{BorderWidth, CornerRadius};
use crate::math::{BoundingBox, Dimensions, Vector2};
use crate::text::{self, TextConfig};
use crate::tree::{Element, ElementKind};

/// What to draw for a single command.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommandConfig {
    Rectangle {
        color: Color,
        corner_radius: CornerRadius,
    },
    Border {
        color: Color,
        width: BorderWidth,
    },
    Text {
        text: String,
        color: Color,
        font_id: u16,
        font_size: u16,
        letter_spacing: u16,
        line_height: f32,
    },
    /// Restricts subsequent drawing to the command's bounding box until the
    /// matching pop.
    ClipPush,
    ClipPop,
}

/// One drawing instruction. Commands are already sorted; a renderer
/// executes them front to back.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    pub bounding_box: BoundingBox,
    pub config: RenderCommandConfig,
    /// Id of the element this command came from.
    pub id: u32,
    pub z_index: i16,
}

/// Knobs for command emission, snapshotted from the layout state.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub viewport: Dimensions,
    pub culling_enabled: bool,
    pub debug_mode_enabled: bool,
    pub pointer_position: Option<Vector2>,
}

const DEBUG_FILL_Z: i16 = 9998;
const DEBUG_OUTLINE_Z: i16 = 9999;

const DEBUG_CONTAINER: Color = Color::u_rgb(0x24, 0x85, 0xE3);
const DEBUG_TEXT: Color = Color::u_rgb(0x2A, 0xB3, 0x73);
const DEBUG_CLIP: Color = Color::u_rgb(0xD8, 0x8A, 0x1E);
const DEBUG_FLOATING: Color = Color::u_rgb(0x9B, 0x51, 0xE0);
const DEBUG_HOVERED: Color = Color::u_rgb(0xE0, 0x3E, 0x3E);

/// Emits the ordered command list for a laid-out tree.
pub fn emit(root: &Element, options: &RenderOptions) -> Vec<RenderCommand> {
    let mut commands = Vec::new();
    let mut deferred: Vec<(i16, &Element)> = Vec::new();
    emit_element(root, 0, options, &mut commands, &mut deferred);

    // Floating subtrees draw over normal flow, lowest z-index first. A
    // float nested inside another float is deferred again and lands in the
    // next round.
    while !deferred.is_empty() {
        let mut batch = std::mem::take(&mut deferred);
        batch.sort_by_key(|&(z, _)| z);
        for (z, element) in batch {
            emit_element(element, z, options, &mut commands, &mut deferred);
        }
    }

    if options.debug_mode_enabled {
        emit_debug_overlay(root, options, &mut commands);
    }
    commands
}

fn emit_element<'tree>(
    element: &'tree Element,
    z_index: i16,
    options: &RenderOptions,
    commands: &mut Vec<RenderCommand>,
    deferred: &mut Vec<(i16, &'tree Element)>,
) {
    let bounding_box = element.bounding_box;
    let visible = !options.culling_enabled || bounding_box.intersects_viewport(options.viewport);

    if visible {
        if let Some(background) = element.background {
            if background.color.is_visible() {
                commands.push(RenderCommand {
                    bounding_box,
                    config: RenderCommandConfig::Rectangle {
                        color: background.color,
                        corner_radius: background.corner_radius,
                    },
                    id: element.id.id,
                    z_index,
                });
            }
        }
    }

    // A clip container confines its flow children to its own box, so an
    // offscreen box has no visible content and the whole subtree is
    // dropped. Floating descendants escape the clip and are still
    // deferred.
    let clipped = element.clip.is_some();
    if clipped && !visible {
        defer_floating(element, deferred);
        return;
    }
    if clipped {
        commands.push(RenderCommand {
            bounding_box,
            config: RenderCommandConfig::ClipPush,
            id: element.id.id,
            z_index,
        });
    }

    match &element.kind {
        ElementKind::Text { config, lines, .. } => {
            emit_text_lines(element, config, lines, z_index, options, commands);
        }
        ElementKind::Container { children } => {
            for child in children {
                if let Some(floating) = child.floating {
                    deferred.push((floating.z_index, child));
                } else {
                    emit_element(child, z_index, options, commands, deferred);
                }
            }
        }
    }

    if clipped {
        commands.push(RenderCommand {
            bounding_box,
            config: RenderCommandConfig::ClipPop,
            id: element.id.id,
            z_index,
        });
    }

    if visible {
        if let Some(border) = element.border {
            if border.color.is_visible() && !border.width.is_zero() {
                commands.push(RenderCommand {
                    bounding_box,
                    config: RenderCommandConfig::Border {
                        color: border.color,
                        width: border.width,
                    },
                    id: element.id.id,
                    z_index,
                });
            }
        }
    }
}

fn defer_floating<'tree>(element: &'tree Element, deferred: &mut Vec<(i16, &'tree Element)>) {
    for child in element.children() {
        if let Some(floating) = child.floating {
            deferred.push((floating.z_index, child));
        } else {
            defer_floating(child, deferred);
        }
    }
}

fn emit_text_lines(
    element: &Element,
    config: &TextConfig,
    lines: &[text::Line],
    z_index: i16,
    options: &RenderOptions,
    commands: &mut Vec<RenderCommand>,
) {
    let line_height = lines.first().map(|line| line.height).unwrap_or_default();
    for line in text::align_lines(lines, element.bounding_box, config.alignment) {
        if line.text.is_empty() {
            continue;
        }
        if options.culling_enabled && !line.bounding_box.intersects_viewport(options.viewport) {
            continue;
        }
        commands.push(RenderCommand {
            bounding_box: line.bounding_box,
            config: RenderCommandConfig::Text {
                text: line.text,
                color: config.color,
                font_id: config.font_id,
                font_size: config.font_size,
                letter_spacing: config.letter_spacing,
                line_height,
            },
            id: element.id.id,
            z_index,
        });
    }
}

/// Draws a translucent fill and an outline over every element, color-coded
/// by kind. The element under the pointer is highlighted instead.
fn emit_debug_overlay(element: &Element, options: &RenderOptions, commands: &mut Vec<RenderCommand>) {
    let hovered = options
        .pointer_position
        .is_some_and(|point| element.bounding_box.contains_point(point));
    let color = if hovered {
        DEBUG_HOVERED
    } else if element.is_floating() {
        DEBUG_FLOATING
    } else if element.clip.is_some() {
        DEBUG_CLIP
    } else if element.is_text() {
        DEBUG_TEXT
    } else {
        DEBUG_CONTAINER
    };

    commands.push(RenderCommand {
        bounding_box: element.bounding_box,
        config: RenderCommandConfig::Rectangle {
            color: Color::rgba(color.r, color.g, color.b, 60.0),
            corner_radius: CornerRadius::default(),
        },
        id: element.id.id,
        z_index: DEBUG_FILL_Z,
    });
    commands.push(RenderCommand {
        bounding_box: element.bounding_box,
        config: RenderCommandConfig::Border {
            color,
            width: BorderWidth::all(1),
        },
        id: element.id.id,
        z_index: DEBUG_OUTLINE_Z,
    });

    for child in element.children() {
        emit_debug_overlay(child, options, commands);
    }
}
