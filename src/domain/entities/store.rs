//! # Store Records
//!
//! The catalog entity behind fulfillment resolution.
//!
//! A [`StoreRecord`] is either a distribution point (`PDV`, a physical
//! location able to dispatch local deliveries) or a retail store (`LOJA`,
//! an online-sellable location fulfilled by carrier shipping). A retail
//! store may reference exactly one distribution point through
//! [`StoreRecord::associated_pdv`]; the reference is a weak key resolved on
//! demand through the repository, never an owning link, and the point is
//! unaware of the store.
//!
//! Records are created and updated by an external management process; the
//! resolver only reads them.

use crate::domain::value_objects::{Coordinate, PostalCode, RegionCode, StoreId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of store record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreKind {
    /// Distribution point: physical pickup location with local dispatch.
    #[serde(rename = "PDV")]
    Pdv,
    /// Retail store: online-sellable, shipped by carrier.
    #[serde(rename = "LOJA")]
    Loja,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdv => write!(f, "PDV"),
            Self::Loja => write!(f, "LOJA"),
        }
    }
}

/// A store catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRecord {
    id: StoreId,
    name: String,
    #[serde(rename = "type")]
    kind: StoreKind,
    #[serde(default)]
    takeout_in_store: bool,
    /// Handling time the store adds on top of carrier transit.
    #[serde(default)]
    shipping_time_in_days: u32,
    coordinate: Coordinate,
    #[serde(default)]
    address: String,
    #[serde(default)]
    district: String,
    city: String,
    state: RegionCode,
    #[serde(default = "default_country")]
    country: String,
    postal_code: PostalCode,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
    /// Weak reference to the distribution point backing this retail store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    associated_pdv: Option<StoreId>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

fn default_country() -> String {
    "Brasil".to_string()
}

impl StoreRecord {
    /// Starts building a record from its required attributes.
    #[must_use]
    pub fn builder(
        id: StoreId,
        name: impl Into<String>,
        kind: StoreKind,
        coordinate: Coordinate,
        postal_code: PostalCode,
        city: impl Into<String>,
        state: RegionCode,
    ) -> StoreRecordBuilder {
        StoreRecordBuilder {
            id,
            name: name.into(),
            kind,
            takeout_in_store: true,
            shipping_time_in_days: 0,
            coordinate,
            address: String::new(),
            district: String::new(),
            city: city.into(),
            state,
            country: default_country(),
            postal_code,
            phone: String::new(),
            email: String::new(),
            associated_pdv: None,
        }
    }

    /// Returns the record key.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &StoreId {
        &self.id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the record kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    /// Returns true if customers can pick orders up in store.
    #[inline]
    #[must_use]
    pub fn takeout_in_store(&self) -> bool {
        self.takeout_in_store
    }

    /// Returns the handling time in days.
    #[inline]
    #[must_use]
    pub fn shipping_time_in_days(&self) -> u32 {
        self.shipping_time_in_days
    }

    /// Returns the geographic location.
    #[inline]
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Returns the street address.
    #[inline]
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the district.
    #[inline]
    #[must_use]
    pub fn district(&self) -> &str {
        &self.district
    }

    /// Returns the city.
    #[inline]
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the federative unit.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &RegionCode {
        &self.state
    }

    /// Returns the country.
    #[inline]
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the postal code.
    #[inline]
    #[must_use]
    pub fn postal_code(&self) -> &PostalCode {
        &self.postal_code
    }

    /// Returns the contact phone number.
    #[inline]
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the contact email address.
    #[inline]
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the weak reference to the backing distribution point, if any.
    #[inline]
    #[must_use]
    pub fn associated_pdv(&self) -> Option<&StoreId> {
        self.associated_pdv.as_ref()
    }

    /// Returns when the record was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the record was last updated.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns true if this record is a distribution point.
    #[inline]
    #[must_use]
    pub fn is_distribution_point(&self) -> bool {
        self.kind == StoreKind::Pdv
    }

    /// Returns true if this record is a retail store.
    #[inline]
    #[must_use]
    pub fn is_retail_store(&self) -> bool {
        self.kind == StoreKind::Loja
    }
}

/// Builder for [`StoreRecord`].
#[derive(Debug, Clone)]
pub struct StoreRecordBuilder {
    id: StoreId,
    name: String,
    kind: StoreKind,
    takeout_in_store: bool,
    shipping_time_in_days: u32,
    coordinate: Coordinate,
    address: String,
    district: String,
    city: String,
    state: RegionCode,
    country: String,
    postal_code: PostalCode,
    phone: String,
    email: String,
    associated_pdv: Option<StoreId>,
}

impl StoreRecordBuilder {
    /// Sets whether in-store pickup is available.
    #[must_use]
    pub fn with_takeout_in_store(mut self, takeout: bool) -> Self {
        self.takeout_in_store = takeout;
        self
    }

    /// Sets the handling time in days.
    #[must_use]
    pub fn with_shipping_time_in_days(mut self, days: u32) -> Self {
        self.shipping_time_in_days = days;
        self
    }

    /// Sets the street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Sets the district.
    #[must_use]
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = district.into();
        self
    }

    /// Sets the country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Sets the contact phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Sets the contact email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the weak reference to the backing distribution point.
    #[must_use]
    pub fn with_associated_pdv(mut self, point_id: StoreId) -> Self {
        self.associated_pdv = Some(point_id);
        self
    }

    /// Builds the record, stamping creation and update times.
    #[must_use]
    pub fn build(self) -> StoreRecord {
        let now = Utc::now();
        StoreRecord {
            id: self.id,
            name: self.name,
            kind: self.kind,
            takeout_in_store: self.takeout_in_store,
            shipping_time_in_days: self.shipping_time_in_days,
            coordinate: self.coordinate,
            address: self.address,
            district: self.district,
            city: self.city,
            state: self.state,
            country: self.country,
            postal_code: self.postal_code,
            phone: self.phone,
            email: self.email,
            associated_pdv: self.associated_pdv,
            created_at: now,
            updated_at: now,
        }
    }
}
