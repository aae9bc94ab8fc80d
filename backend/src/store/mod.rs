//! Flat-file JSON store for the medicine catalog.
//!
//! Every operation reads the whole document from disk, works on it in memory
//! and, when it mutates, truncates the file and writes the whole document
//! back. The file stays the source of truth; a single async mutex serializes
//! operations inside this process so concurrent read-modify-write cycles
//! cannot lose each other's updates.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{Medicine, MedicineDocument, MedicineForm};

#[derive(Debug)]
pub struct MedicineStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl MedicineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub async fn fetch_all_medicines(&self) -> AppResult<Vec<Medicine>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.medicines)
    }

    pub async fn fetch_medicine_by_name(&self, name: &str) -> AppResult<Medicine> {
        let _guard = self.lock.lock().await;
        self.load()
            .await?
            .medicines
            .into_iter()
            .find(|m| m.matches(name))
            .ok_or_else(|| not_found(name))
    }

    pub async fn count_medicines(&self) -> AppResult<usize> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.medicines.len())
    }

    pub async fn average_price(&self) -> AppResult<f64> {
        let _guard = self.lock.lock().await;
        self.load().await?.average_price().ok_or(AppError::NoMedicines)
    }

    // ── Mutations ─────────────────────────────────────────────────────────────

    pub async fn insert_medicine(&self, payload: &MedicineForm) -> AppResult<Medicine> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        if doc.position(&payload.name).is_some() {
            return Err(AppError::Conflict(format!(
                "Medicine '{}' already exists",
                payload.name
            )));
        }

        let medicine = Medicine::new(payload.name.clone(), payload.price);
        doc.medicines.push(medicine.clone());
        self.persist(&doc).await?;

        Ok(medicine)
    }

    /// Overwrites the price of the first record matching `name`; nothing else
    /// on the record changes.
    pub async fn update_medicine_price(&self, name: &str, price: f64) -> AppResult<Medicine> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let idx = doc.position(name).ok_or_else(|| not_found(name))?;
        doc.medicines[idx].price = Some(price);
        let updated = doc.medicines[idx].clone();
        self.persist(&doc).await?;

        Ok(updated)
    }

    pub async fn delete_medicine(&self, name: &str) -> AppResult<Medicine> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let idx = doc.position(name).ok_or_else(|| not_found(name))?;
        let removed = doc.medicines.remove(idx);
        self.persist(&doc).await?;

        Ok(removed)
    }

    /// Creates the store file holding `medicines`, unless a file is already
    /// there. Returns whether anything was written.
    pub async fn initialize_with(&self, medicines: &[Medicine]) -> AppResult<bool> {
        let _guard = self.lock.lock().await;

        let doc = MedicineDocument {
            medicines: medicines.to_vec(),
            ..Default::default()
        };
        let raw = serde_json::to_vec(&doc)?;

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        file.write_all(&raw).await?;
        file.flush().await?;

        Ok(true)
    }

    // ── File access ───────────────────────────────────────────────────────────

    async fn load(&self) -> AppResult<MedicineDocument> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AppError::StoreMissing(self.file_name()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Truncate and rewrite the whole document in one pass.
    async fn persist(&self, doc: &MedicineDocument) -> AppResult<()> {
        let raw = serde_json::to_vec(doc)?;
        fs::write(&self.path, &raw).await?;
        debug!(
            path = %self.path.display(),
            count = doc.medicines.len(),
            bytes = raw.len(),
            "Persisted store"
        );
        Ok(())
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

fn not_found(name: &str) -> AppError {
    AppError::NotFound(format!("Medicine '{}' not found", name))
}
