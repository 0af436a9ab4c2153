//! Coordinate checks and great-circle distance.
//!
//! The service area is approximated by a fixed latitude/longitude rectangle
//! around Malawi. Points on the boundary count as inside.

use serde::{Deserialize, Serialize};

use super::{Error, ErrorCode};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Inclusive latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBounds {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl RegionBounds {
    /// Whether the point lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        // NaN fails every comparison, so it is never in region.
        (self.south..=self.north).contains(&lat) && (self.west..=self.east).contains(&lng)
    }
}

/// Coarse geofence around Malawi.
pub const MALAWI_BOUNDS: RegionBounds = RegionBounds {
    south: -17.13,
    north: -9.36,
    west: 32.67,
    east: 35.92,
};

/// Whether `(lat, lng)` falls inside the serviced region.
///
/// # Examples
/// ```
/// use matola::domain::geo::is_region_coordinate;
///
/// assert!(is_region_coordinate(-13.9, 33.7)); // Lilongwe
/// assert!(!is_region_coordinate(-1.3, 36.8)); // Nairobi
/// ```
#[must_use]
pub fn is_region_coordinate(lat: f64, lng: f64) -> bool {
    MALAWI_BOUNDS.contains(lat, lng)
}

/// Check both ends of a shipment route against the region.
///
/// Returns `Ok(true)` when both points are in region, otherwise an
/// [`ErrorCode::OutOfRegion`] error naming the failing endpoint.
pub fn validate_shipment_coordinates(
    origin_lat: f64,
    origin_lng: f64,
    dest_lat: f64,
    dest_lng: f64,
) -> Result<bool, Error> {
    if !is_region_coordinate(origin_lat, origin_lng) {
        return Err(Error::new(
            ErrorCode::OutOfRegion,
            "origin must be within Malawi",
        ));
    }
    if !is_region_coordinate(dest_lat, dest_lng) {
        return Err(Error::new(
            ErrorCode::OutOfRegion,
            "destination must be within Malawi",
        ));
    }
    Ok(true)
}

/// Haversine great-circle distance between two points, in kilometres.
#[must_use]
pub fn calculate_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Clamp guards against rounding pushing `a` fractionally past 1.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().atan2((1.0 - a).max(0.0).sqrt());
    EARTH_RADIUS_KM * c
}

/// A validated point on the globe.
///
/// ## Invariants
/// - both components are finite;
/// - latitude is within [-90, 90] and longitude within [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinateDto", into = "CoordinateDto")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Validate and construct a coordinate.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::new(
                ErrorCode::InvalidCoordinate,
                "latitude must be between -90 and 90",
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::new(
                ErrorCode::InvalidCoordinate,
                "longitude must be between -180 and 180",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Whether this point lies inside the serviced region.
    #[must_use]
    pub fn is_in_region(&self) -> bool {
        is_region_coordinate(self.latitude, self.longitude)
    }

    /// Great-circle distance to `other`, in kilometres.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        calculate_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CoordinateDto {
    lat: f64,
    lng: f64,
}

impl From<Coordinate> for CoordinateDto {
    fn from(value: Coordinate) -> Self {
        Self {
            lat: value.latitude,
            lng: value.longitude,
        }
    }
}

impl TryFrom<CoordinateDto> for Coordinate {
    type Error = Error;

    fn try_from(value: CoordinateDto) -> Result<Self, Self::Error> {
        Self::try_new(value.lat, value.lng)
    }
}

/// Towns offered as pick-up and drop-off points on the USSD channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum District {
    Lilongwe,
    Blantyre,
    Mzuzu,
    Zomba,
    Kasungu,
    Mangochi,
    Karonga,
    Salima,
}

impl District {
    /// Menu order; USSD choices are 1-based indices into this list.
    pub const ALL: [Self; 8] = [
        Self::Lilongwe,
        Self::Blantyre,
        Self::Mzuzu,
        Self::Zomba,
        Self::Kasungu,
        Self::Mangochi,
        Self::Karonga,
        Self::Salima,
    ];

    /// Resolve a 1-based menu choice.
    #[must_use]
    pub fn from_menu_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lilongwe => "Lilongwe",
            Self::Blantyre => "Blantyre",
            Self::Mzuzu => "Mzuzu",
            Self::Zomba => "Zomba",
            Self::Kasungu => "Kasungu",
            Self::Mangochi => "Mangochi",
            Self::Karonga => "Karonga",
            Self::Salima => "Salima",
        }
    }

    /// Approximate town centre as `(latitude, longitude)`.
    #[must_use]
    pub const fn lat_lng(self) -> (f64, f64) {
        match self {
            Self::Lilongwe => (-13.9626, 33.7741),
            Self::Blantyre => (-15.7861, 35.0058),
            Self::Mzuzu => (-11.4656, 34.0207),
            Self::Zomba => (-15.3860, 35.3188),
            Self::Kasungu => (-13.0333, 33.4833),
            Self::Mangochi => (-14.4782, 35.2645),
            Self::Karonga => (-9.9333, 33.9333),
            Self::Salima => (-13.7804, 34.4587),
        }
    }

    /// Town centre as a validated [`Coordinate`].
    #[must_use]
    pub fn coordinate(self) -> Coordinate {
        let (latitude, longitude) = self.lat_lng();
        Coordinate {
            latitude,
            longitude,
        }
    }
}
