//! Page request state

use crate::geo::{Coordinates, UserLocation};
use crate::model::QueryResponse;
use serde::Serialize;

/// Where the page is in its request lifecycle
///
/// Exactly one of these holds at a time. Only `PageController` moves
/// between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(QueryResponse),
    Error(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn response(&self) -> Option<&QueryResponse> {
        match self {
            Self::Success(response) => Some(response),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything a renderer needs to draw the page at one instant
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub state: RequestState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<UserLocation>,
    pub examples: Vec<String>,
    pub input_disabled: bool,
}

impl PageSnapshot {
    /// Origin for directions links: the location the backend echoed back,
    /// else the one the page resolved itself
    pub fn card_origin(&self) -> Option<Coordinates> {
        self.state
            .response()
            .and_then(|r| r.user_location)
            .or_else(|| self.location.as_ref().map(|l| l.coords))
    }

    /// Label shown next to the location control
    pub fn location_label(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.label.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    fn snapshot(state: RequestState, location: Option<UserLocation>) -> PageSnapshot {
        PageSnapshot {
            state,
            location,
            examples: Vec::new(),
            input_disabled: false,
        }
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_value(RequestState::Idle).unwrap();
        assert_eq!(json, serde_json::json!({"status": "idle"}));

        let json = serde_json::to_value(RequestState::Error("boom".into())).unwrap();
        assert_eq!(json, serde_json::json!({"status": "error", "data": "boom"}));
    }

    #[test]
    fn test_accessors() {
        assert!(RequestState::Loading.is_loading());
        assert_eq!(RequestState::Error("x".into()).error(), Some("x"));
        assert!(RequestState::Idle.response().is_none());
    }

    #[test]
    fn test_card_origin_prefers_response_location() {
        let mut response = fixtures::response(vec![]);
        response.user_location = Some(Coordinates::new(1.0, 2.0));
        let page_location = UserLocation::new(Coordinates::new(3.0, 4.0));

        let snap = snapshot(RequestState::Success(response), Some(page_location.clone()));
        assert_eq!(snap.card_origin(), Some(Coordinates::new(1.0, 2.0)));

        let snap = snapshot(
            RequestState::Success(fixtures::response(vec![])),
            Some(page_location),
        );
        assert_eq!(snap.card_origin(), Some(Coordinates::new(3.0, 4.0)));

        let snap = snapshot(RequestState::Idle, None);
        assert!(snap.card_origin().is_none());
    }
}
