//! HTML renderer and the search page
//!
//! `HtmlRenderer` produces the results fragment; `render_page` wraps it in
//! the full page with the search form, loading placeholder, error banner and
//! empty-state examples.

use crate::controller::input::{QueryInput, PLACEHOLDER};
use crate::controller::state::{PageSnapshot, RequestState};
use crate::error::Result;
use crate::render::card::PlaceCard;
use crate::render::{ResultRenderer, ResultView};

/// HTML renderer - results fragment for the web UI
pub struct HtmlRenderer;

/// Escape text for HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_card(card: &PlaceCard<'_>) -> String {
    let place = card.place;
    let mut html = String::new();

    html.push_str("<article class=\"card\">\n");
    html.push_str("  <div class=\"card-head\">\n");
    html.push_str(&format!("    <h3>{}</h3>\n", escape(&place.name)));
    html.push_str(&format!("    <p class=\"address\">{}</p>\n", escape(&place.address)));
    if let Some(rating) = card.rating_text() {
        html.push_str(&format!("    <span class=\"rating\">{}</span>\n", escape(&rating)));
    }
    html.push_str("  </div>\n");

    if let Some(distance) = &place.distance {
        html.push_str("  <div class=\"travel\">\n");
        html.push_str(&format!("    <p>Distance: {}</p>\n", escape(distance)));
        for time in card.travel_times() {
            let class = if time.recommended { "mode recommended" } else { "mode" };
            html.push_str(&format!(
                "    <span class=\"{}\">{} {}</span>\n",
                class,
                time.mode.icon(),
                escape(time.time)
            ));
        }
        html.push_str("  </div>\n");
    }

    if let Some(mode) = card.recommendation() {
        html.push_str(&format!(
            "  <div class=\"badge\">{} Recommended: {}</div>\n",
            mode.icon(),
            mode.label()
        ));
    }

    html.push_str("  <div class=\"links\">\n");
    html.push_str(&format!(
        "    <a class=\"primary\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Get Directions</a>\n",
        escape(&card.directions_url())
    ));
    html.push_str(&format!(
        "    <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">View on Map</a>\n",
        escape(&place.maps_url)
    ));
    html.push_str("  </div>\n");
    html.push_str("</article>\n");

    html
}

impl ResultRenderer for HtmlRenderer {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML results fragment"
    }

    fn render(&self, view: &ResultView<'_>) -> Result<String> {
        let mut html = String::new();

        html.push_str("<section class=\"results\">\n");
        html.push_str(&format!(
            "<div class=\"summary\"><p>{}</p></div>\n",
            escape(&view.response.ai_response)
        ));

        let cards = view.cards();
        if !cards.is_empty() {
            html.push_str("<div class=\"cards\">\n");
            for card in &cards {
                html.push_str(&render_card(card));
            }
            html.push_str("</div>\n");
        }

        if let Some(map) = view.map() {
            html.push_str("<div class=\"map\">\n<h3>View on Map</h3>\n");
            html.push_str(&format!(
                "<iframe src=\"{}\" loading=\"lazy\" allowfullscreen referrerpolicy=\"no-referrer-when-downgrade\"></iframe>\n",
                escape(&map.url())
            ));
            html.push_str("</div>\n");
        }

        html.push_str("</section>\n");
        Ok(html)
    }
}

const SKELETON: &str = "<section class=\"skeleton\" aria-busy=\"true\">\n\
<div class=\"bar wide\"></div><div class=\"bar\"></div>\n\
<div class=\"cards\"><div class=\"card\"></div><div class=\"card\"></div>\
<div class=\"card\"></div><div class=\"card\"></div></div>\n\
</section>\n";

fn render_examples(examples: &[String]) -> String {
    let mut html = String::new();
    html.push_str("<section class=\"empty\">\n<p>Start by asking where you want to go</p>\n");
    html.push_str("<p class=\"muted\">Try examples like:</p>\n<div class=\"examples\">\n");
    for example in examples {
        html.push_str(&format!(
            "<form method=\"post\" action=\"/search\"><input type=\"hidden\" name=\"query\" value=\"{}\"><button type=\"submit\">{}</button></form>\n",
            escape(example),
            escape(example)
        ));
    }
    html.push_str("</div>\n</section>\n");
    html
}

/// Render the whole search page for one snapshot
pub fn render_page(snapshot: &PageSnapshot, maps_key: Option<&str>) -> Result<String> {
    let input = QueryInput::for_state(&snapshot.state);
    let disabled = if input.is_disabled() { " disabled" } else { "" };

    let mut body = String::new();

    body.push_str("<header>\n<h1>Find Places with AI</h1>\n");
    body.push_str("<p>Ask where you want to go, and we'll find the best places with intelligent transport recommendations</p>\n");
    body.push_str("</header>\n");

    body.push_str("<form class=\"search\" method=\"post\" action=\"/search\">\n");
    body.push_str(&format!(
        "<input type=\"text\" name=\"query\" placeholder=\"{}\" autofocus{}>\n",
        escape(PLACEHOLDER),
        disabled
    ));
    body.push_str(&format!(
        "<button type=\"submit\"{}>{}</button>\n</form>\n",
        disabled,
        input.button_label()
    ));

    body.push_str("<form class=\"location\" method=\"post\" action=\"/location\">\n");
    match snapshot.location_label() {
        Some(label) => body.push_str(&format!("<span>📍 {}</span>\n", escape(label))),
        None if snapshot.location.is_some() => body.push_str("<span>📍 Location found</span>\n"),
        None => body.push_str("<span>📍 Location unknown</span>\n"),
    }
    body.push_str("<button type=\"submit\">Update location</button>\n</form>\n");

    match &snapshot.state {
        RequestState::Idle => body.push_str(&render_examples(&snapshot.examples)),
        RequestState::Loading => body.push_str(SKELETON),
        RequestState::Error(message) => {
            body.push_str(&format!(
                "<div class=\"error\" role=\"alert\"><p>{}</p></div>\n",
                escape(message)
            ));
            body.push_str(&render_examples(&snapshot.examples));
        }
        RequestState::Success(response) => {
            let view = ResultView::new(response, snapshot.card_origin(), maps_key);
            body.push_str(&HtmlRenderer.render(&view)?);
        }
    }

    Ok(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>placefinder</title>\n<link rel=\"stylesheet\" href=\"/static/style.css\">\n\
</head>\n<body>\n<main>\n{}</main>\n</body>\n</html>\n",
        body
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::suggestions::example_queries;
    use crate::geo::{Coordinates, UserLocation};
    use crate::model::fixtures;

    fn snapshot(state: RequestState, location: Option<UserLocation>) -> PageSnapshot {
        let label = location.as_ref().and_then(|l| l.label.clone());
        PageSnapshot {
            input_disabled: state.is_loading(),
            state,
            location,
            examples: example_queries(label.as_deref()),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_summary_without_places() {
        let response = fixtures::response(vec![]);
        let html = HtmlRenderer
            .render(&ResultView::new(&response, None, Some("key")))
            .unwrap();

        assert!(html.contains("Here are ramen spots"));
        assert!(!html.contains("class=\"card\""));
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn test_cards_and_map() {
        let response = fixtures::response(vec![fixtures::place("p&1", 1.0, 2.0)]);
        let origin = Some(Coordinates::new(0.5, 0.5));
        let html = HtmlRenderer
            .render(&ResultView::new(&response, origin, Some("key")))
            .unwrap();

        assert!(html.contains("<article class=\"card\">"));
        assert!(html.contains("destination_place_id=p%261"));
        assert!(html.contains("<iframe src=\"https://www.google.com/maps/embed/v1/place?key=key&amp;q=place_id:p%261"));
    }

    #[test]
    fn test_recommended_mode_marked() {
        let mut place = fixtures::place("p", 0.0, 0.0);
        place.distance = Some("2 km".into());
        place.walk_time = Some("25 mins".into());
        place.drive_time = Some("7 mins".into());
        place.recommended_transport = Some(crate::model::TransportMode::Drive);
        let response = fixtures::response(vec![place]);

        let html = HtmlRenderer
            .render(&ResultView::new(&response, None, None))
            .unwrap();

        assert!(html.contains("<span class=\"mode\">🚶 25 mins</span>"));
        assert!(html.contains("<span class=\"mode recommended\">🚗 7 mins</span>"));
        assert!(html.contains("Recommended: Driving"));
    }

    #[test]
    fn test_page_idle_shows_examples() {
        let page = render_page(&snapshot(RequestState::Idle, None), None).unwrap();
        assert!(page.contains("Find coffee shops near me"));
        assert!(page.contains("Location unknown"));
        assert!(page.contains(">Search</button>"));
    }

    #[test]
    fn test_page_examples_follow_label() {
        let location = UserLocation::new(Coordinates::new(-6.2, 106.8)).with_label("Menteng");
        let page = render_page(&snapshot(RequestState::Idle, Some(location)), None).unwrap();
        assert!(page.contains("📍 Menteng"));
        assert!(page.contains("Find coffee shops near Menteng"));
        assert!(!page.contains("near me"));
    }

    #[test]
    fn test_page_loading() {
        let page = render_page(&snapshot(RequestState::Loading, None), None).unwrap();
        assert!(page.contains("Searching..."));
        assert!(page.contains("aria-busy"));
        assert!(page.contains("name=\"query\" placeholder"));
        assert!(page.contains(" disabled>"));
    }

    #[test]
    fn test_page_error_keeps_input_enabled() {
        let state = RequestState::Error("Backend <down>".into());
        let page = render_page(&snapshot(state, None), None).unwrap();
        assert!(page.contains("<div class=\"error\" role=\"alert\"><p>Backend &lt;down&gt;</p></div>"));
        assert!(!page.contains(" disabled"));
        assert!(page.contains(">Search</button>"));
        assert!(page.contains("Best pizza places near me"));
    }

    #[test]
    fn test_page_success_has_no_examples() {
        let state = RequestState::Success(fixtures::response(vec![]));
        let page = render_page(&snapshot(state, None), Some("key")).unwrap();
        assert!(page.contains("Here are ramen spots"));
        assert!(!page.contains("Try examples like"));
        assert!(!page.contains("<iframe"));
    }
}
