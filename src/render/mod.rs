//! Result renderers
//!
//! A renderer is a pure function of a `ResultView`: the summary is always
//! shown, cards only when there are places, and the map only when there are
//! places and an embed key.

pub mod card;
pub mod html;
pub mod json;
pub mod map;
pub mod text;

use crate::error::Result;
use crate::geo::Coordinates;
use crate::model::QueryResponse;
use card::PlaceCard;
use map::MapEmbed;
use serde::{Deserialize, Serialize};

/// Information about a renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererInfo {
    pub name: String,
    pub description: String,
}

/// One response, ready to render
#[derive(Debug, Clone, Copy)]
pub struct ResultView<'a> {
    pub response: &'a QueryResponse,
    /// Origin for directions links
    pub origin: Option<Coordinates>,
    pub maps_key: Option<&'a str>,
}

impl<'a> ResultView<'a> {
    pub fn new(
        response: &'a QueryResponse,
        origin: Option<Coordinates>,
        maps_key: Option<&'a str>,
    ) -> Self {
        Self {
            response,
            origin,
            maps_key,
        }
    }

    /// One card per place, in backend order
    pub fn cards(&self) -> Vec<PlaceCard<'a>> {
        self.response
            .places
            .iter()
            .map(|p| PlaceCard::new(p, self.origin))
            .collect()
    }

    pub fn map(&self) -> Option<MapEmbed> {
        MapEmbed::for_places(&self.response.places, self.maps_key)
    }
}

/// Trait for result renderers
pub trait ResultRenderer: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn render(&self, view: &ResultView<'_>) -> Result<String>;
}

/// Get a renderer by name
pub fn get_renderer(name: &str) -> Option<Box<dyn ResultRenderer>> {
    match name.to_lowercase().as_str() {
        "text" => Some(Box::new(text::TextRenderer)),
        "json" => Some(Box::new(json::JsonRenderer)),
        "html" => Some(Box::new(html::HtmlRenderer)),
        _ => None,
    }
}

/// List all available renderers
pub fn available_renderers() -> Vec<RendererInfo> {
    let renderers: [Box<dyn ResultRenderer>; 3] = [
        Box::new(text::TextRenderer),
        Box::new(json::JsonRenderer),
        Box::new(html::HtmlRenderer),
    ];
    renderers
        .iter()
        .map(|r| RendererInfo {
            name: r.name().to_string(),
            description: r.description().to_string(),
        })
        .collect()
}
