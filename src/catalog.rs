//! Read-side views the UI computes over repository data: garden search and
//! rental listings, helper skill filtering, and the rental listing form.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::GardenError;
use crate::kv_store::KeyValueStore;
use crate::local_db_model::{Garden, Helper, RentalTerms};
use crate::repository::Baghela;

/// Skill filter value meaning "every helper".
pub const ALL_SKILLS: &str = "ყველა";

/// Skills offered in the helper filter, in display order.
pub const SKILL_CATALOG: [&str; 8] = [
    ALL_SKILLS,
    "ბაღის გაწმენდა",
    "ხეების გასხვლა",
    "ყურძნის კრეფა",
    "ფორთოხლის კრეფა",
    "თხილის კრეფა",
    "მორწყვა",
    "ბოსტნეულის დარგვა",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GardenFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "forRent")]
    ForRent,
    #[serde(rename = "notRent")]
    NotRent,
}

impl GardenFilter {
    pub fn matches(&self, garden: &Garden) -> bool {
        match self {
            GardenFilter::All => true,
            GardenFilter::ForRent => garden.for_rent,
            GardenFilter::NotRent => !garden.for_rent,
        }
    }
}

impl FromStr for GardenFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(GardenFilter::All),
            "forRent" => Ok(GardenFilter::ForRent),
            "notRent" => Ok(GardenFilter::NotRent),
            other => Err(format!("unknown garden filter: {other}")),
        }
    }
}

/// Gardens whose name or location contains `query` (case-insensitive) and that
/// pass `filter`. An empty query matches everything.
pub fn search_gardens<'a>(gardens: &'a [Garden], query: &str, filter: GardenFilter) -> Vec<&'a Garden> {
    let needle = query.to_lowercase();
    gardens
        .iter()
        .filter(|g| {
            g.name.to_lowercase().contains(&needle) || g.location.to_lowercase().contains(&needle)
        })
        .filter(|g| filter.matches(g))
        .collect()
}

pub fn rental_listings(gardens: &[Garden]) -> Vec<&Garden> {
    gardens.iter().filter(|g| g.for_rent).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenCounts {
    pub total: usize,
    pub for_rent: usize,
    pub not_for_rent: usize,
}

pub fn garden_counts(gardens: &[Garden]) -> GardenCounts {
    let for_rent = gardens.iter().filter(|g| g.for_rent).count();
    GardenCounts {
        total: gardens.len(),
        for_rent,
        not_for_rent: gardens.len() - for_rent,
    }
}

/// Helpers offering `skill`. `None` or [`ALL_SKILLS`] returns every helper.
pub fn filter_helpers_by_skill<'a>(helpers: &'a [Helper], skill: Option<&str>) -> Vec<&'a Helper> {
    match skill {
        None | Some(ALL_SKILLS) => helpers.iter().collect(),
        Some(skill) => helpers.iter().filter(|h| h.has_skill(skill)).collect(),
    }
}

/// Fields of the "add land for rent" form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGardenListing {
    pub name: String,
    pub location: String,
    pub area: f64,
    #[serde(rename = "type")]
    pub garden_type: String,
    pub owner: String,
    pub description: String,
    pub duration: String,
    pub harvest_type: String,
    pub harvest_share: u32,
    pub conditions: String,
}

impl NewGardenListing {
    /// Builds a for-rent garden with id = `now` in unix milliseconds.
    pub fn into_garden(self, now: DateTime<Utc>) -> Result<Garden, GardenError> {
        let terms = RentalTerms::new(self.duration, self.harvest_type, self.harvest_share, self.conditions)?;
        Garden {
            id: now.timestamp_millis().to_string(),
            name: self.name,
            location: self.location,
            area: self.area,
            garden_type: self.garden_type,
            owner: self.owner,
            description: self.description,
            for_rent: true,
            rental_terms: Some(terms),
            image: None,
        }
        .checked()
    }
}

impl<S: KeyValueStore> Baghela<S> {
    /// Validates and appends a rental listing. Returns the stored garden.
    pub fn add_rental_listing(
        &self,
        listing: NewGardenListing,
        now: DateTime<Utc>,
    ) -> Result<Garden, GardenError> {
        let garden = listing.into_garden(now)?;
        self.add_garden(garden.clone());
        info!("Rental listing '{}' added", garden.id);
        Ok(garden)
    }
}
