//! Place card view model
//!
//! Everything a renderer needs to draw one place, independent of the output
//! format.

use crate::constants::api::DIRECTIONS_URL;
use crate::geo::Coordinates;
use crate::model::{Place, TransportMode};

/// One travel-time entry on a card
#[derive(Debug, Clone, PartialEq)]
pub struct TravelTime<'a> {
    pub mode: TransportMode,
    pub time: &'a str,
    pub recommended: bool,
}

/// A place paired with the origin used for directions
#[derive(Debug, Clone, Copy)]
pub struct PlaceCard<'a> {
    pub place: &'a Place,
    pub origin: Option<Coordinates>,
}

impl<'a> PlaceCard<'a> {
    pub fn new(place: &'a Place, origin: Option<Coordinates>) -> Self {
        Self { place, origin }
    }

    /// Directions from the user to the place, or the place's own map link
    /// when the user's location is unknown
    pub fn directions_url(&self) -> String {
        match self.origin {
            Some(origin) => format!(
                "{}&origin={},{}&destination={},{}&destination_place_id={}",
                DIRECTIONS_URL,
                origin.lat,
                origin.lng,
                self.place.lat,
                self.place.lng,
                urlencoding::encode(&self.place.place_id)
            ),
            None => self.place.maps_url.clone(),
        }
    }

    /// "★ 4.6 (812)", or `None` when the place is unrated
    pub fn rating_text(&self) -> Option<String> {
        let rating = self.place.rating?;
        Some(match self.place.user_ratings_total {
            Some(total) => format!("★ {} ({})", rating, total),
            None => format!("★ {}", rating),
        })
    }

    /// Travel times, shown only when the backend computed a distance
    pub fn travel_times(&self) -> Vec<TravelTime<'a>> {
        if self.place.distance.is_none() {
            return Vec::new();
        }

        let place: &'a Place = self.place;
        TransportMode::ALL
            .into_iter()
            .filter_map(|mode| {
                place.travel_time(mode).map(|time| TravelTime {
                    mode,
                    time,
                    recommended: place.recommended_transport == Some(mode),
                })
            })
            .collect()
    }

    pub fn recommendation(&self) -> Option<TransportMode> {
        self.place.recommended_transport
    }
}
