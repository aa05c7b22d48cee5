//! Catalog data model: course records, volatile fields, freshness

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Freshness of a volatile field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Freshness {
    /// The value (if any) comes from the index-build snapshot.
    StaticOnly,
    /// The value was confirmed by a live fetch during this request.
    LiveConfirmed,
    /// A live fetch was attempted and failed; the last static value stands.
    LiveFailed,
}

/// A course attribute that may change between index builds.
///
/// The value is overwritten in place by a successful live refresh; the flag
/// records whether the current value reflects one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatileField<T> {
    pub value: Option<T>,
    pub freshness: Freshness,
}

impl<T> VolatileField<T> {
    /// A field holding its index-build value.
    pub fn static_only(value: Option<T>) -> Self {
        Self {
            value,
            freshness: Freshness::StaticOnly,
        }
    }

    /// Overwrite with a live-confirmed value.
    pub fn confirm(&mut self, value: T) {
        self.value = Some(value);
        self.freshness = Freshness::LiveConfirmed;
    }

    /// Keep the current value but record that a live refresh failed.
    pub fn mark_failed(&mut self) {
        self.freshness = Freshness::LiveFailed;
    }
}

impl<T> Default for VolatileField<T> {
    fn default() -> Self {
        Self::static_only(None)
    }
}

/// Course fee as advertised on the programme page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: f64,
    pub currency: String,
}

/// The volatile slice of a course record: fields refreshed per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolatileFields {
    #[serde(default)]
    pub fee: VolatileField<Fee>,
    #[serde(default)]
    pub next_intake: VolatileField<NaiveDate>,
    #[serde(default)]
    pub entry_requirements: VolatileField<String>,
}

impl VolatileFields {
    /// Merge a successful live fetch: fields present in the update are
    /// overwritten and marked live-confirmed, absent fields are untouched.
    pub fn apply_update(&mut self, update: LiveUpdate) {
        if let Some(fee) = update.fee {
            self.fee.confirm(fee);
        }
        if let Some(intake) = update.next_intake {
            self.next_intake.confirm(intake);
        }
        if let Some(requirements) = update.entry_requirements {
            self.entry_requirements.confirm(requirements);
        }
    }

    /// Record a failed or timed-out live fetch: values stay, flags downgrade.
    pub fn mark_all_failed(&mut self) {
        self.fee.mark_failed();
        self.next_intake.mark_failed();
        self.entry_requirements.mark_failed();
    }

    /// Freshness flags of the three fields, in declaration order.
    pub fn flags(&self) -> [Freshness; 3] {
        [
            self.fee.freshness,
            self.next_intake.freshness,
            self.entry_requirements.freshness,
        ]
    }
}

/// A single programme in the catalog.
///
/// Static fields are fixed once the index is built; only the volatile slice
/// may be overwritten in place during request handling. The id is assigned by
/// the catalog and stable across index rebuilds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub title: String,
    /// Programme page, used by the live fetcher.
    #[serde(default)]
    pub url: Option<String>,
    /// Static descriptive text the embedding was built from.
    pub description: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub delivery_mode: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub volatile: VolatileFields,
}

/// Partial volatile-field set returned by a live fetch.
///
/// Any subset of fields may be present; a fetch that parses nothing is still
/// a success (the page was reachable, it just carried no recognizable data).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveUpdate {
    pub fee: Option<Fee>,
    pub next_intake: Option<NaiveDate>,
    pub entry_requirements: Option<String>,
}

impl LiveUpdate {
    pub fn is_empty(&self) -> bool {
        self.fee.is_none() && self.next_intake.is_none() && self.entry_requirements.is_none()
    }
}
