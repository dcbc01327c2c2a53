//! Records persisted by the store.
//!
//! Every entity serializes with camelCase field names and omits absent optional
//! fields, so the JSON under each collection key reads the same as the layout the
//! UI writes (`forRent`, `rentalTerms`, `maxParticipants`, `itemName`, ...).

use serde::{Deserialize, Serialize};

use crate::error::{GardenError, HelperError};

/// A registered garden, optionally offered for rent.
///
/// `rental_terms` is present exactly when `for_rent` is true. Records built with
/// [`Garden::checked`] are guaranteed to hold that; records read back from
/// storage are taken as they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Garden {
    pub id: String,
    pub name: String,
    pub location: String,
    /// Square metres.
    pub area: f64,
    #[serde(rename = "type")]
    pub garden_type: String,
    pub owner: String,
    pub description: String,
    pub for_rent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_terms: Option<RentalTerms>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Garden {
    pub fn validate(&self) -> Result<(), GardenError> {
        if !self.area.is_finite() {
            return Err(GardenError::NonFiniteArea(self.area));
        }
        if self.area <= 0.0 {
            return Err(GardenError::NonPositiveArea(self.area));
        }
        if self.for_rent != self.rental_terms.is_some() {
            return Err(GardenError::RentalTermsMismatch {
                for_rent: self.for_rent,
            });
        }
        if let Some(terms) = &self.rental_terms {
            terms.validate()?;
        }
        Ok(())
    }

    /// Consumes the garden and hands it back only if it is consistent.
    pub fn checked(self) -> Result<Self, GardenError> {
        self.validate()?;
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalTerms {
    pub duration: String,
    pub harvest_type: String,
    /// Percent of the harvest owed to the owner, 0..=100.
    pub harvest_share: u32,
    pub conditions: String,
}

impl RentalTerms {
    pub fn new(
        duration: impl Into<String>,
        harvest_type: impl Into<String>,
        harvest_share: u32,
        conditions: impl Into<String>,
    ) -> Result<Self, GardenError> {
        let terms = Self {
            duration: duration.into(),
            harvest_type: harvest_type.into(),
            harvest_share,
            conditions: conditions.into(),
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn validate(&self) -> Result<(), GardenError> {
        if self.harvest_share > 100 {
            return Err(GardenError::HarvestShareOutOfRange(self.harvest_share));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Helper {
    pub id: String,
    pub name: String,
    pub skills: Vec<String>,
    pub experience: String,
    /// 0.0 to 5.0
    pub rating: f64,
    pub completed_jobs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub badges: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Helper {
    pub fn validate(&self) -> Result<(), HelperError> {
        if !(self.rating.is_finite() && (0.0..=5.0).contains(&self.rating)) {
            return Err(HelperError::RatingOutOfRange(self.rating));
        }
        Ok(())
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerProject {
    pub id: String,
    pub title: String,
    pub description: String,
    pub organizer: String,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    pub location: String,
    /// Reward credited to the user on joining.
    pub points: u32,
    pub participants: u32,
    pub max_participants: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: String,
}

impl VolunteerProject {
    /// `participants / max_participants`; 0/0 is treated as empty and n/0 as full.
    pub fn fill_ratio(&self) -> f64 {
        match (self.participants, self.max_participants) {
            (0, 0) => 0.0,
            (_, 0) => f64::INFINITY,
            (joined, max) => f64::from(joined) / f64::from(max),
        }
    }

    /// Joining is closed once the project is at or past capacity.
    pub fn is_full(&self) -> bool {
        self.fill_ratio() >= 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketplaceCategory {
    Seedling,
    Seed,
    Fertilizer,
    Prize,
}

impl MarketplaceCategory {
    /// Shop label, as shown on the item badge.
    pub fn label(&self) -> &'static str {
        match self {
            MarketplaceCategory::Seedling => "ნერგი",
            MarketplaceCategory::Seed => "თესლი",
            MarketplaceCategory::Fertilizer => "სასუქი",
            MarketplaceCategory::Prize => "პრიზი",
        }
    }
}

/// Stock below this (and above zero) is flagged as running out.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in points.
    pub points: u32,
    pub category: MarketplaceCategory,
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MarketplaceItem {
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock < LOW_STOCK_THRESHOLD
    }

    /// Whether the shop offers the buy action for this balance.
    pub fn can_be_bought_with(&self, balance: i64) -> bool {
        self.is_in_stock() && balance >= i64::from(self.points)
    }
}

/// The single signed-in user. Owns its activity and purchase history by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub points: i64,
    pub level: u32,
    pub badges: Vec<String>,
    pub joined_date: String,
    pub activities: Vec<Activity>,
    pub purchases: Vec<Purchase>,
}

impl UserProfile {
    /// Points needed to reach the next level: `(level + 1) * 100`.
    pub fn next_level_threshold(&self) -> i64 {
        (i64::from(self.level) + 1) * 100
    }

    pub fn points_to_next_level(&self) -> i64 {
        self.next_level_threshold().saturating_sub(self.points).max(0)
    }

    /// Progress bar fill, clamped to `0.0..=1.0`.
    pub fn level_progress(&self) -> f64 {
        (self.points as f64 / self.next_level_threshold() as f64).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Volunteer,
    Rent,
    Helper,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub date: String,
    /// Points earned.
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub item_name: String,
    pub points: u32,
    pub date: String,
}
