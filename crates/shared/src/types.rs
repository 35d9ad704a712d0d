//! Common types used across Tokoku

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::SharedError;

/// Default parcel weight in grams when the shipping request omits one
pub const DEFAULT_SHIPPING_WEIGHT_GRAMS: u32 = 1000;

/// Return the first value that is present and not blank.
///
/// Backend payloads use empty strings and `null` interchangeably for
/// "unset", so every fallback chain goes through here.
pub fn first_non_empty<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|value| !value.trim().is_empty())
}

// =============================================================================
// Backend Envelope
// =============================================================================

/// Standard `{ success, message, data }` wrapper returned by the backend API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> BackendEnvelope<T> {
    /// Payload of a successful envelope, `None` otherwise
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Store profile as returned by `GET /api/store/{subdomain}`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreData {
    #[serde(deserialize_with = "null_as_default")]
    pub store: StoreInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub settings: StoreSettings,
    #[serde(deserialize_with = "null_as_default")]
    pub seo: StoreSeo,
}

/// Sections without a row come back as `null`; treat them like absent ones
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreInfo {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub subdomain: Option<String>,
}

/// Theme settings relevant to page metadata
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreSettings {
    pub site_title: Option<String>,
    pub site_tagline: Option<String>,
    pub logo: Option<String>,
    pub favicon: Option<String>,
}

/// SEO settings edited from the theme-settings screen
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreSeo {
    pub meta_title: Option<String>,
    pub deskripsi: Option<String>,
    pub keyword: Option<String>,
    pub og_title: Option<String>,
    pub og_deskripsi: Option<String>,
    pub og_image: Option<String>,
}

/// Store lookup result for `GET /api/public/stores?domain=...`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DomainStore {
    pub uuid: Option<String>,
    pub subdomain: Option<String>,
}

// =============================================================================
// API Request Types
// =============================================================================

/// Store profile update. Only these fields are forwarded to the backend,
/// and only when the client sent them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UpdateStoreRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nama_toko: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_hp_toko: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kategori_toko: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deskripsi_toko: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provinsi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kota: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kecamatan: Option<String>,
}

/// Checkout submission from the storefront cart
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CheckoutRequest {
    pub customer: Option<Value>,
    pub order: Option<Value>,
    pub items: Option<Vec<Value>>,
}

impl CheckoutRequest {
    /// Customer, order and at least one item must be present. `null`,
    /// `false`, `0` and `""` count as missing.
    pub fn validate(&self) -> Result<(), SharedError> {
        let present = |value: &Option<Value>| value.as_ref().is_some_and(is_truthy);

        if !present(&self.customer) {
            return Err(SharedError::MissingField("customer"));
        }
        if !present(&self.order) {
            return Err(SharedError::MissingField("order"));
        }
        match &self.items {
            Some(items) if !items.is_empty() => Ok(()),
            _ => Err(SharedError::MissingField("items")),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Shipping quote request as sent by the storefront (camelCase)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShippingQuoteRequest {
    pub store_uuid: Option<String>,
    pub destination_province: Option<String>,
    pub destination_city: Option<String>,
    pub destination_district: Option<String>,
    /// Grams; passed on as sent (number or numeric string)
    pub weight: Option<Value>,
}

/// Shipping quote request in the backend's snake_case shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendShippingQuote {
    pub store_uuid: String,
    pub destination_province: String,
    pub destination_city: String,
    pub destination_district: String,
    pub weight: Value,
}

impl TryFrom<ShippingQuoteRequest> for BackendShippingQuote {
    type Error = SharedError;

    fn try_from(req: ShippingQuoteRequest) -> Result<Self, Self::Error> {
        fn required(value: Option<String>, field: &'static str) -> Result<String, SharedError> {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or(SharedError::MissingField(field))
        }

        Ok(Self {
            store_uuid: required(req.store_uuid, "storeUuid")?,
            destination_province: required(req.destination_province, "destinationProvince")?,
            destination_city: required(req.destination_city, "destinationCity")?,
            destination_district: required(req.destination_district, "destinationDistrict")?,
            weight: req
                .weight
                .filter(|w| !w.is_null())
                .unwrap_or_else(|| Value::from(DEFAULT_SHIPPING_WEIGHT_GRAMS)),
        })
    }
}
