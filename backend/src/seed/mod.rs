use tracing::info;

use crate::error::AppResult;
use crate::models::Medicine;
use crate::store::MedicineStore;

static STARTER_CATALOG: &[(&str, f64)] = &[
    ("Aspirin", 5.0),
    ("Paracetamol", 3.5),
    ("Ibuprofen", 6.25),
    ("Amoxicillin", 12.0),
    ("Cetirizine", 4.75),
    ("Omeprazole", 9.99),
];

pub fn starter_catalog() -> Vec<Medicine> {
    STARTER_CATALOG
        .iter()
        .map(|&(name, price)| Medicine::new(name, price))
        .collect()
}

/// Write the starter catalog if the store file is absent. An existing file,
/// even an empty one, is left alone.
pub async fn seed_if_missing(store: &MedicineStore) -> AppResult<bool> {
    let catalog = starter_catalog();
    let wrote = store.initialize_with(&catalog).await?;
    if wrote {
        info!(
            path = %store.path().display(),
            count = catalog.len(),
            "Seeded store with starter catalog"
        );
    }
    Ok(wrote)
}
