//! JSON renderer

use crate::error::Result;
use crate::render::{ResultRenderer, ResultView};
use serde::Serialize;

/// JSON renderer - the response enriched with directions and map links
pub struct JsonRenderer;

#[derive(Serialize)]
struct RenderedCard<'a> {
    #[serde(flatten)]
    place: &'a crate::model::Place,
    directions_url: String,
}

#[derive(Serialize)]
struct Rendered<'a> {
    ai_response: &'a str,
    places: Vec<RenderedCard<'a>>,
    /// Where directions start from: the backend's `user_location`, else ours
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<crate::geo::Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    map_url: Option<String>,
}

impl ResultRenderer for JsonRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Response JSON with directions links"
    }

    fn render(&self, view: &ResultView<'_>) -> Result<String> {
        let rendered = Rendered {
            ai_response: &view.response.ai_response,
            places: view
                .cards()
                .into_iter()
                .map(|card| RenderedCard {
                    place: card.place,
                    directions_url: card.directions_url(),
                })
                .collect(),
            origin: view.origin,
            map_url: view.map().map(|m| m.url()),
        };

        Ok(serde_json::to_string_pretty(&rendered)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn test_json_render() {
        let response = fixtures::response(vec![fixtures::place("p1", 1.0, 2.0)]);
        let output = JsonRenderer
            .render(&ResultView::new(&response, None, Some("key")))
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["ai_response"], "Here are ramen spots");
        assert_eq!(parsed["places"][0]["place_id"], "p1");
        assert_eq!(parsed["places"][0]["directions_url"], parsed["places"][0]["maps_url"]);
        assert!(parsed["map_url"].as_str().unwrap().contains("place_id:p1"));
        assert!(parsed.get("origin").is_none());
        assert!(parsed.get("user_location").is_none());
    }

    #[test]
    fn test_json_origin_is_not_user_location() {
        let response = fixtures::response(vec![fixtures::place("p1", 1.0, 2.0)]);
        let origin = crate::geo::Coordinates::new(-6.2, 106.8);
        let output = JsonRenderer
            .render(&ResultView::new(&response, Some(origin), None))
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["origin"]["lat"], -6.2);
        assert!(parsed.get("user_location").is_none());
        assert!(parsed["places"][0]["directions_url"]
            .as_str()
            .unwrap()
            .contains("origin=-6.2,106.8"));
    }

    #[test]
    fn test_json_empty_places_has_no_map() {
        let response = fixtures::response(vec![]);
        let output = JsonRenderer
            .render(&ResultView::new(&response, None, Some("key")))
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["places"], serde_json::json!([]));
        assert!(parsed.get("map_url").is_none());
    }
}
