use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One medicine entry. The name is the key, compared ignoring case.
/// Fields this service does not know about ride along in `extra` so a
/// rewrite of the store never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Medicine {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
            extra: IndexMap::new(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// The whole store file: `{"medicines": [...]}` plus any other top-level keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicineDocument {
    #[serde(default)]
    pub medicines: Vec<Medicine>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl MedicineDocument {
    pub fn position(&self, name: &str) -> Option<usize> {
        self.medicines.iter().position(|m| m.matches(name))
    }

    /// Sum of every present price divided by the number of records.
    /// `None` for an empty collection.
    pub fn average_price(&self) -> Option<f64> {
        if self.medicines.is_empty() {
            return None;
        }
        let total: f64 = self.medicines.iter().filter_map(|m| m.price).sum();
        Some(total / self.medicines.len() as f64)
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Form body of `POST /create` and `POST /update`.
#[derive(Debug, Deserialize)]
pub struct MedicineForm {
    pub name: String,
    pub price: f64,
}

impl MedicineForm {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("price must be a non-negative number".to_string());
        }
        Ok(())
    }
}

/// Form body of `DELETE /delete`.
#[derive(Debug, Deserialize)]
pub struct MedicineName {
    pub name: String,
}
