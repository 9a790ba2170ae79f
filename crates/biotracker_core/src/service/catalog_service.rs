//! Compound catalog use-case service.
//!
//! # Responsibility
//! - Provide stable catalog entry points for core callers.
//! - Delegate persistence to the compound repository.
//!
//! # Invariants
//! - Adding an existing name fails with `DuplicateName` and leaves the
//!   catalog unchanged.
//! - Removal does not cascade to log entries; history is preserved.

use crate::model::compound::{Compound, CompoundId};
use crate::repo::compound_repo::CompoundRepository;
use crate::service::{TrackerError, TrackerResult};
use log::info;

/// Stock compounds seeded on first run: name, half-life hours, category.
const DEFAULT_COMPOUNDS: &[(&str, f64, &str)] = &[
    ("BPC-157", 4.0, "Peptide"),
    ("TB-500", 240.0, "Peptide"),
    ("Testo Enantato", 120.0, "Steroide"),
    ("Semaglutide", 168.0, "GLP-1"),
];

/// Request model for adding a catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompound {
    pub name: String,
    pub half_life_hours: f64,
    pub category: String,
    pub min_threshold: f64,
    pub time_to_peak_hours: f64,
}

/// Use-case service wrapper for catalog operations.
pub struct CatalogService<R: CompoundRepository> {
    repo: R,
}

impl<R: CompoundRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all compounds in insertion order.
    pub fn list(&self) -> TrackerResult<Vec<Compound>> {
        Ok(self.repo.list_compounds()?)
    }

    /// Adds a compound to the catalog and returns the created record.
    ///
    /// # Errors
    /// - `DuplicateName` when the name is already taken.
    /// - `InvalidParameter` for out-of-range kinetic parameters.
    pub fn add(&self, request: &NewCompound) -> TrackerResult<Compound> {
        let compound = Compound::new(
            request.name.clone(),
            request.half_life_hours,
            request.category.clone(),
            request.min_threshold,
            request.time_to_peak_hours,
        );
        self.repo.insert_compound(&compound)?;
        info!(
            "event=catalog_add module=service status=ok name={} half_life_hours={}",
            compound.name, compound.half_life_hours
        );
        Ok(compound)
    }

    /// Removes a compound by ID.
    ///
    /// # Errors
    /// - `NotFound` when no compound has that ID.
    pub fn remove(&self, id: CompoundId) -> TrackerResult<()> {
        self.repo.delete_compound(id).map_err(TrackerError::from)?;
        info!("event=catalog_remove module=service status=ok id={id}");
        Ok(())
    }

    /// Inserts the stock compounds that are not yet present.
    ///
    /// Idempotent: existing entries are never touched. Returns how many
    /// compounds were inserted.
    pub fn seed_defaults(&self) -> TrackerResult<usize> {
        let mut inserted = 0;
        for (name, half_life_hours, category) in DEFAULT_COMPOUNDS {
            if self.repo.find_by_name(name)?.is_some() {
                continue;
            }
            let compound = Compound::new(*name, *half_life_hours, *category, 0.0, 0.0);
            self.repo.insert_compound(&compound)?;
            inserted += 1;
        }
        info!("event=catalog_seed module=service status=ok inserted={inserted}");
        Ok(inserted)
    }
}
