//! Human-readable text renderer

use crate::error::Result;
use crate::render::{ResultRenderer, ResultView};

/// Text renderer - terminal-friendly summary and cards
pub struct TextRenderer;

impl ResultRenderer for TextRenderer {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn render(&self, view: &ResultView<'_>) -> Result<String> {
        let mut output = String::new();

        output.push_str(&view.response.ai_response);
        output.push('\n');

        for (i, card) in view.cards().iter().enumerate() {
            let place = card.place;
            output.push('\n');
            output.push_str(&format!("{}. {}", i + 1, place.name));
            if let Some(rating) = card.rating_text() {
                output.push_str(&format!("  {}", rating));
            }
            output.push('\n');
            output.push_str(&format!("   {}\n", place.address));

            if let Some(distance) = &place.distance {
                let times: Vec<String> = card
                    .travel_times()
                    .iter()
                    .map(|t| {
                        let marker = if t.recommended { "*" } else { "" };
                        format!("{} {}{}", t.mode.icon(), t.time, marker)
                    })
                    .collect();
                output.push_str(&format!("   Distance: {}", distance));
                if !times.is_empty() {
                    output.push_str(&format!("  |  {}", times.join("  ")));
                }
                output.push('\n');
            }

            if let Some(mode) = card.recommendation() {
                output.push_str(&format!(
                    "   Recommended: {} {}\n",
                    mode.icon(),
                    mode.label()
                ));
            }

            output.push_str(&format!("   Directions: {}\n", card.directions_url()));
        }

        if let Some(map) = view.map() {
            output.push_str(&format!("\nMap: {}\n", map.url()));
        }

        Ok(output)
    }
}
