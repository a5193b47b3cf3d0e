//! Embedded map URL
//!
//! Uses the Maps Embed API in place mode: the first result is the pinned
//! place (by `place_id`) and the view is centered on the mean of all result
//! coordinates.

use crate::constants::api::MAPS_EMBED_URL;
use crate::constants::map::EMBED_ZOOM;
use crate::geo::Coordinates;
use crate::model::Place;

/// An embeddable map for a set of places
#[derive(Debug, Clone, PartialEq)]
pub struct MapEmbed {
    pub center: Coordinates,
    pub place_id: String,
    key: String,
}

impl MapEmbed {
    /// Build the embed, or `None` if there is nothing to show or no key
    pub fn for_places(places: &[Place], key: Option<&str>) -> Option<Self> {
        let key = key.map(str::trim).filter(|k| !k.is_empty())?;
        let first = places.first()?;

        let n = places.len() as f64;
        let center = Coordinates::new(
            places.iter().map(|p| p.lat).sum::<f64>() / n,
            places.iter().map(|p| p.lng).sum::<f64>() / n,
        );

        Some(Self {
            center,
            place_id: first.place_id.clone(),
            key: key.to_string(),
        })
    }

    pub fn url(&self) -> String {
        format!(
            "{}?key={}&q=place_id:{}&center={},{}&zoom={}",
            MAPS_EMBED_URL,
            urlencoding::encode(&self.key),
            urlencoding::encode(&self.place_id),
            self.center.lat,
            self.center.lng,
            EMBED_ZOOM
        )
    }
}
