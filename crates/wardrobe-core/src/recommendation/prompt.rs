//! Prompt construction

use crate::wardrobe::ClothingItem;
use std::fmt::Write;

/// System instruction for outfit generation
pub const SYSTEM_INSTRUCTION: &str =
    "You are a professional fashion stylist. Always respond in valid JSON format.";

const RESPONSE_FORMAT: &str = r#"RESPOND IN THIS EXACT JSON FORMAT:
{
  "outfit": {
    "top": {"id": <item_id>, "reason": "brief reason"},
    "bottom": {"id": <item_id>, "reason": "brief reason"},
    "additional": [{"id": <item_id>, "reason": "brief reason"}],
    "description": "1-2 sentence outfit description",
    "styling_tips": "2-3 practical styling tips"
  },
  "alternatives": [
    {"top_id": <id>, "bottom_id": <id>, "reason": "why this is a good alternative"}
  ],
  "confidence": "high/medium/low based on wardrobe fit"
}

RULES:
- Only use IDs from the wardrobe above
- If no good match exists, suggest the closest option with lower confidence
- Keep responses concise but helpful
- Focus on practical fashion advice"#;

/// One numbered line describing a candidate item
fn describe_item(index: usize, item: &ClothingItem) -> String {
    let attrs = &item.attributes;
    let fields = [
        ("Type", attrs.clothing_type.as_deref()),
        ("Color", attrs.color.as_deref()),
        ("Secondary", attrs.secondary_color.as_deref()),
        ("Pattern", attrs.pattern.as_deref()),
        ("Material", attrs.material.as_deref()),
        ("Style", attrs.style.as_deref()),
        ("Season", attrs.season.as_deref()),
        ("Fit", attrs.fit.as_deref()),
        ("Name", item.name.as_deref()),
    ];

    let details: Vec<String> = fields
        .iter()
        .filter_map(|(label, value)| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| format!("{label}: {v}"))
        })
        .collect();

    let mut line = format!(
        "{}. [{}] ID:{}",
        index,
        item.category.as_str().to_uppercase(),
        item.id
    );
    if !details.is_empty() {
        line.push_str(" - ");
        line.push_str(&details.join(", "));
    }
    line
}

/// Build the user instruction listing every candidate and the reply schema.
#[must_use]
pub fn build_outfit_prompt(user_text: &str, items: &[ClothingItem]) -> String {
    let mut items_text = String::new();
    for (idx, item) in items.iter().enumerate() {
        let _ = write!(items_text, "\n{}", describe_item(idx + 1, item));
    }

    format!(
        "You are a professional fashion stylist helping someone choose an outfit from their wardrobe.\n\
         \n\
         USER REQUEST: \"{user_text}\"\n\
         \n\
         AVAILABLE WARDROBE ITEMS:{items_text}\n\
         \n\
         YOUR TASK:\n\
         1. Select the best outfit combination that matches the user's request\n\
         2. Consider: season/weather, color coordination, style coherence, occasion appropriateness\n\
         3. Choose items that work well together\n\
         4. Provide styling tips\n\
         \n\
         {RESPONSE_FORMAT}"
    )
}

/// Build the instruction asking for a short outfit name.
#[must_use]
pub fn build_name_prompt(original_request: &str, description: &str) -> String {
    format!(
        "Generate a short, creative, and catchy name (2-4 words max) for this outfit:\n\
         Request: {original_request}\n\
         Description: {description}\n\
         \n\
         Examples: \"Summer Breeze\", \"Office Chic\", \"Casual Friday\", \"Date Night Glam\"\n\
         \n\
         Respond with ONLY the outfit name, nothing else."
    )
}
