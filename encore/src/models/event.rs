use serde::{Deserialize, Serialize};

/// The five NYC boroughs. Serialized with the city names the upstream
/// ticketing API uses in its `city` filter (Manhattan is listed as
/// "New York").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Borough {
    #[serde(rename = "New York")]
    Manhattan,
    Brooklyn,
    Queens,
    Bronx,
    #[serde(rename = "Staten Island")]
    StatenIsland,
}

impl Borough {
    pub const ALL: [Borough; 5] = [
        Borough::Manhattan,
        Borough::Brooklyn,
        Borough::Queens,
        Borough::Bronx,
        Borough::StatenIsland,
    ];

    /// The value passed as the upstream `city` query parameter.
    pub fn city_name(&self) -> &'static str {
        match self {
            Borough::Manhattan => "New York",
            Borough::Brooklyn => "Brooklyn",
            Borough::Queens => "Queens",
            Borough::Bronx => "Bronx",
            Borough::StatenIsland => "Staten Island",
        }
    }
}

impl std::fmt::Display for Borough {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.city_name())
    }
}

/// One upstream event listing, unique by `id` for the lifetime of a fetch
/// run. Built once by the fetcher and never mutated; re-ingestion replaces
/// the stored entry wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: String,
    pub url: String,
    pub venue: String,
    pub info: String,
    pub borough: Borough,
    pub image: Option<String>,
}

/// The display fields of an [`Event`], minus the id. This is both the
/// metadata payload stored next to each vector and the item type returned
/// to search clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EventMetadata {
    pub name: String,
    pub date: String,
    pub url: String,
    pub venue: String,
    pub info: String,
    pub borough: Borough,
    pub image: Option<String>,
}

impl From<&Event> for EventMetadata {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            date: event.date.clone(),
            url: event.url.clone(),
            venue: event.venue.clone(),
            info: event.info.clone(),
            borough: event.borough,
            image: event.image.clone(),
        }
    }
}
