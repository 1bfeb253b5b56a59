// crates/travelmap-core/src/common.rs
use crate::model::{Gallery, Itinerary, VisitedCity};
use crate::resolve::CountryMap;
use serde::{Deserialize, Serialize};

/// Headline numbers for the site footer and `travelmap stats`.
///
/// `countries` counts resolved countries only; a country whose name has no
/// matching feature is not on the map and is not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelStats {
    pub cities: usize,
    pub countries: usize,
    pub photos: usize,
    pub itineraries: usize,
    pub itinerary_points: usize,
    pub galleries: usize,
}

impl TravelStats {
    pub fn collect(
        cities: &[VisitedCity],
        countries: &CountryMap,
        itineraries: &[Itinerary],
        galleries: &[Gallery],
    ) -> Self {
        let city_photos: usize = cities.iter().filter_map(|c| c.photos.as_ref()).map(Vec::len).sum();
        let gallery_photos: usize = galleries.iter().map(|g| g.photos.len()).sum();
        Self {
            cities: cities.len(),
            countries: countries.len(),
            photos: city_photos + gallery_photos,
            itineraries: itineraries.len(),
            itinerary_points: itineraries.iter().map(|i| i.points.len()).sum(),
            galleries: galleries.len(),
        }
    }
}
