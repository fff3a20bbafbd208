//! Core clinical lookup trait.
//!
//! This module defines the [`ClinicalStorage`] trait: the read-only lookups the
//! facade performs against the clinical tables.

use vitalis_fhir::{Observation, Patient};

use crate::error::StorageResult;

/// Read-only lookups over patients and their vital-sign readings.
///
/// Operations are synchronous and may block on I/O; async callers should run
/// them on a blocking thread pool.
///
/// # Observation identity
///
/// Blood pressure and heart rate readings live in separate tables whose ids
/// are not unique relative to each other. [`read_observation`](Self::read_observation)
/// checks blood pressure first and only falls back to heart rate when no
/// blood pressure row has the id, so a heart rate reading that shares its id
/// with a blood pressure reading is unreachable by id.
///
/// # Ordering
///
/// Collections are blood pressure readings followed by heart rate readings.
/// Within each table the order is whatever the database returns.
///
/// # Errors
///
/// * `StorageError::Resource(NotFound)` - a read found no row
/// * `StorageError::Backend` - the query failed, the connection was lost, or
///   a row could not be mapped. Never reported as an absent or empty result.
///
/// # Example
///
/// ```ignore
/// use vitalis_persistence::core::ClinicalStorage;
///
/// fn vitals_for<S: ClinicalStorage>(storage: &S, patient: i64) -> Result<(), StorageError> {
///     let readings = storage.observations_by_subject(patient)?;
///     println!("{} readings for Patient/{}", readings.len(), patient);
///     Ok(())
/// }
/// ```
pub trait ClinicalStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Reads the patient with the given id.
    fn read_patient(&self, id: i64) -> StorageResult<Patient>;

    /// Reads the observation with the given id, blood pressure first.
    fn read_observation(&self, id: i64) -> StorageResult<Observation>;

    /// Returns every reading for the patient.
    ///
    /// An unknown patient yields an empty list, not an error.
    fn observations_by_subject(&self, patient_id: i64) -> StorageResult<Vec<Observation>>;

    /// Returns every patient.
    fn all_patients(&self) -> StorageResult<Vec<Patient>>;

    /// Returns every reading from both observation tables.
    fn all_observations(&self) -> StorageResult<Vec<Observation>>;

    /// Verifies the backend can serve queries.
    fn health_check(&self) -> StorageResult<()>;
}

impl<T: ClinicalStorage + ?Sized> ClinicalStorage for std::sync::Arc<T> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn read_patient(&self, id: i64) -> StorageResult<Patient> {
        (**self).read_patient(id)
    }

    fn read_observation(&self, id: i64) -> StorageResult<Observation> {
        (**self).read_observation(id)
    }

    fn observations_by_subject(&self, patient_id: i64) -> StorageResult<Vec<Observation>> {
        (**self).observations_by_subject(patient_id)
    }

    fn all_patients(&self) -> StorageResult<Vec<Patient>> {
        (**self).all_patients()
    }

    fn all_observations(&self) -> StorageResult<Vec<Observation>> {
        (**self).all_observations()
    }

    fn health_check(&self) -> StorageResult<()> {
        (**self).health_check()
    }
}
