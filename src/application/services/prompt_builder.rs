//! Prompt building functions for poster generation requests

use crate::domain::entities::CreatureEntry;
use crate::domain::value_objects::{PromptText, SelectionResult};

/// Baseline visual style applied to every poster
pub const MEGAGROK_STYLE: &str = "MegaGrok Poster Style — neon cosmic palette, vibrant blues, purples, greens, \
sharp cinematic highlights, slight holographic glow, dramatic rim lighting, heavy contrast, \
clean outlines, slight grain texture, sci-fi crypto aesthetic, frog-metaverse themes, dynamic pose. \
Retro arcade poster composition with MEGAGROK title at top and mob name in a framed box at bottom. \
High-contrast cell-shading, vintage print texture. No hyper-real neon glare; retain printed poster vibe.";

/// Poster template; `{mob_name}`, `{mob_desc}` and `{style}` are substituted
pub const PROMPT_TEMPLATE: &str = "Create a single portrait poster of the creature.\n\n\
Name: {mob_name}\n\
Description: {mob_desc}\n\n\
Style instructions:\n\
{style}\n\n\
Layout:\n\
- MEGAGROK title at the top (bold arcade/block text)\n\
- Creature centered in the middle\n\
- Creature name in a framed box at the bottom (readable)\n\n\
Visual target: vintage arcade cabinet poster / printed game ad from 1990s-2000s. \
Use warm but neon-tinged palette (deep oranges, muted blues with neon accents), slightly grainy screen-print texture, heavy inked outlines, thick borders, bold shapes. \
Dramatic hard-edged shadows and stylized highlights. Include small HUD-like vintage UI elements (optional). \
Render as a poster-style illustration, not photorealistic.";

/// Appended to the description of variant selections
pub const VARIANT_CLAUSE: &str =
    ", rare alternate variant with different neon accent colors and one small prop change";

/// Process-wide prompt constants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterStyle {
    pub style_block: String,
    pub template: String,
    pub variant_clause: String,
}

impl Default for PosterStyle {
    fn default() -> Self {
        Self {
            style_block: MEGAGROK_STYLE.to_string(),
            template: PROMPT_TEMPLATE.to_string(),
            variant_clause: VARIANT_CLAUSE.to_string(),
        }
    }
}

/// Build the prompt sent to the image provider for a selected mob
pub fn build_prompt(entry: &CreatureEntry, is_variant: bool, style: &PosterStyle) -> PromptText {
    let description = if is_variant {
        format!("{}{}", entry.description, style.variant_clause)
    } else {
        entry.description.clone()
    };

    PromptText::new(render_template(
        &style.template,
        &entry.display_name,
        &description,
        &style.style_block,
    ))
}

/// Build the photo caption posted alongside the poster
pub fn build_caption(selection: &SelectionResult) -> String {
    let mut caption = format!("🐸 MegaGrok Mob: {}", selection.entry.display_name);
    if selection.is_variant {
        caption.push_str("\n✨ Variant edition");
    }
    caption
}

/// Single-pass placeholder substitution
///
/// Substituted values are never re-scanned and unknown `{...}` sequences are
/// copied through unchanged.
fn render_template(template: &str, mob_name: &str, mob_desc: &str, style: &str) -> String {
    let mut rendered =
        String::with_capacity(template.len() + mob_name.len() + mob_desc.len() + style.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let value = candidate.find('}').and_then(|end| {
            let value = match &candidate[1..end] {
                "mob_name" => mob_name,
                "mob_desc" => mob_desc,
                "style" => style,
                _ => return None,
            };
            Some((value, end))
        });

        match value {
            Some((value, end)) => {
                rendered.push_str(value);
                rest = &candidate[end + 1..];
            }
            None => {
                rendered.push('{');
                rest = &candidate[1..];
            }
        }
    }

    rendered.push_str(rest);
    rendered
}
