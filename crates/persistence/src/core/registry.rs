//! Resource registry.
//!
//! A static association from [`ResourceKind`] to the lookup entry points that
//! serve it. Request handling never branches on the resource type itself; it
//! resolves the kind, fetches the [`ResourceEntry`] and calls through it.

use tracing::debug;
use vitalis_fhir::json::{wrap_observation, wrap_patient};
use vitalis_fhir::{Resource, ResourceKind};

use crate::core::ClinicalStorage;
use crate::error::{StorageResult, ValidationError};
use crate::types::selector::{parse_resource_id, parse_subject_reference};

/// Reads one resource by integer id.
pub type ReadFn = fn(&dyn ClinicalStorage, i64) -> StorageResult<Resource>;

/// Lists the resources that reference a patient.
pub type SubjectSearchFn = fn(&dyn ClinicalStorage, i64) -> StorageResult<Vec<Resource>>;

/// Lists every resource of the kind.
pub type ListAllFn = fn(&dyn ClinicalStorage) -> StorageResult<Vec<Resource>>;

/// A search parameter advertised for a resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParamInfo {
    /// Query-string name.
    pub name: &'static str,
    /// FHIR search parameter type.
    pub param_type: &'static str,
    /// Human-readable description.
    pub documentation: &'static str,
}

/// The entry points registered for one resource kind.
#[derive(Debug, Clone, Copy)]
pub struct ResourceEntry {
    /// The kind served.
    pub kind: ResourceKind,
    /// Read by id.
    pub read: ReadFn,
    /// Search by patient reference; `None` when the kind has no subject.
    pub search_by_subject: Option<SubjectSearchFn>,
    /// Unfiltered listing.
    pub list_all: ListAllFn,
    /// Search parameters accepted on the type endpoint.
    pub search_params: &'static [SearchParamInfo],
}

impl ResourceEntry {
    /// Returns true if `name` is one of this kind's search parameters.
    pub fn accepts_search_param(&self, name: &str) -> bool {
        self.search_params.iter().any(|p| p.name == name)
    }
}

const OBSERVATION_SEARCH_PARAMS: &[SearchParamInfo] = &[
    SearchParamInfo {
        name: "subject",
        param_type: "reference",
        documentation: "The patient the observation is about",
    },
    SearchParamInfo {
        name: "patient",
        param_type: "reference",
        documentation: "The patient the observation is about (alias of subject)",
    },
];

static ENTRIES: [ResourceEntry; 2] = [
    ResourceEntry {
        kind: ResourceKind::Patient,
        read: read_patient,
        search_by_subject: None,
        list_all: list_patients,
        search_params: &[],
    },
    ResourceEntry {
        kind: ResourceKind::Observation,
        read: read_observation,
        search_by_subject: Some(observations_by_subject),
        list_all: list_observations,
        search_params: OBSERVATION_SEARCH_PARAMS,
    },
];

fn read_patient(storage: &dyn ClinicalStorage, id: i64) -> StorageResult<Resource> {
    storage.read_patient(id).map(wrap_patient)
}

fn read_observation(storage: &dyn ClinicalStorage, id: i64) -> StorageResult<Resource> {
    storage.read_observation(id).map(wrap_observation)
}

fn observations_by_subject(
    storage: &dyn ClinicalStorage,
    patient_id: i64,
) -> StorageResult<Vec<Resource>> {
    Ok(storage
        .observations_by_subject(patient_id)?
        .into_iter()
        .map(wrap_observation)
        .collect())
}

fn list_patients(storage: &dyn ClinicalStorage) -> StorageResult<Vec<Resource>> {
    Ok(storage
        .all_patients()?
        .into_iter()
        .map(wrap_patient)
        .collect())
}

fn list_observations(storage: &dyn ClinicalStorage) -> StorageResult<Vec<Resource>> {
    Ok(storage
        .all_observations()?
        .into_iter()
        .map(wrap_observation)
        .collect())
}

/// Returns the entry for a kind.
pub fn entry(kind: ResourceKind) -> &'static ResourceEntry {
    match kind {
        ResourceKind::Patient => &ENTRIES[0],
        ResourceKind::Observation => &ENTRIES[1],
    }
}

/// Returns every registered entry.
pub fn entries() -> &'static [ResourceEntry] {
    &ENTRIES
}

/// Resolves a resource type name from a request path.
pub fn resolve_kind(resource_type: &str) -> Result<ResourceKind, ValidationError> {
    resource_type
        .parse::<ResourceKind>()
        .map_err(|_| ValidationError::UnsupportedResourceType {
            resource_type: resource_type.to_string(),
        })
}

/// Reads a resource of `kind` by its raw id segment.
pub fn read_by_id(
    storage: &dyn ClinicalStorage,
    kind: ResourceKind,
    raw_id: &str,
) -> StorageResult<Resource> {
    let id = parse_resource_id(kind, raw_id)?;
    debug!(resource_type = %kind, id, "Registry read");
    (entry(kind).read)(storage, id)
}

/// Searches resources of `kind` by a raw subject reference.
pub fn search_by_subject(
    storage: &dyn ClinicalStorage,
    kind: ResourceKind,
    raw_subject: &str,
) -> StorageResult<Vec<Resource>> {
    let search = entry(kind).search_by_subject.ok_or_else(|| {
        ValidationError::UnsupportedSearchParameter {
            resource_type: kind.to_string(),
            parameter: "subject".to_string(),
        }
    })?;
    let patient_id = parse_subject_reference(raw_subject)?;
    debug!(resource_type = %kind, patient_id, "Registry subject search");
    search(storage, patient_id)
}

/// Lists every resource of `kind`.
pub fn list_all(storage: &dyn ClinicalStorage, kind: ResourceKind) -> StorageResult<Vec<Resource>> {
    debug!(resource_type = %kind, "Registry list all");
    (entry(kind).list_all)(storage)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;
    use serde_json::Value;
    use vitalis_fhir::json::resource_to_json;
    use vitalis_fhir::{Observation, Patient};

    use super::*;
    use crate::error::{BackendError, StorageError};
    use crate::types::{ClinicalObservation, HeartRateRecord, PatientRecord};

    fn json(resource: &Resource) -> Value {
        resource_to_json(resource).unwrap()
    }

    #[derive(Default)]
    struct StubStorage {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubStorage {
        fn touch(&self) -> StorageResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(BackendError::QueryError {
                    table: "heart_rate".to_string(),
                    message: "disk I/O error".to_string(),
                    source: None,
                }
                .into());
            }
            Ok(())
        }

        fn patient(id: i64) -> Patient {
            Patient::try_from(PatientRecord {
                id,
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                date_of_birth: None,
            })
            .unwrap()
        }

        fn heart_rate(id: i64, patient_id: i64) -> Observation {
            Observation::try_from(ClinicalObservation::from(HeartRateRecord {
                id,
                patient_id,
                rate: 70,
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            }))
            .unwrap()
        }
    }

    impl ClinicalStorage for StubStorage {
        fn backend_name(&self) -> &'static str {
            "stub"
        }

        fn read_patient(&self, id: i64) -> StorageResult<Patient> {
            self.touch()?;
            if id == 1 {
                Ok(Self::patient(1))
            } else {
                Err(StorageError::not_found("Patient", id))
            }
        }

        fn read_observation(&self, id: i64) -> StorageResult<Observation> {
            self.touch()?;
            Ok(Self::heart_rate(id, 1))
        }

        fn observations_by_subject(&self, patient_id: i64) -> StorageResult<Vec<Observation>> {
            self.touch()?;
            Ok(vec![Self::heart_rate(1, patient_id), Self::heart_rate(2, patient_id)])
        }

        fn all_patients(&self) -> StorageResult<Vec<Patient>> {
            self.touch()?;
            Ok(vec![Self::patient(1), Self::patient(2)])
        }

        fn all_observations(&self) -> StorageResult<Vec<Observation>> {
            self.touch()?;
            Ok(vec![Self::heart_rate(1, 1)])
        }

        fn health_check(&self) -> StorageResult<()> {
            self.touch()
        }
    }

    #[test]
    fn test_entries_cover_every_kind() {
        for kind in ResourceKind::ALL {
            assert_eq!(entry(kind).kind, kind);
        }
        assert_eq!(entries().len(), ResourceKind::ALL.len());
    }

    #[test]
    fn test_patient_has_no_subject_search() {
        assert!(entry(ResourceKind::Patient).search_by_subject.is_none());
        assert!(entry(ResourceKind::Observation).search_by_subject.is_some());
        assert!(entry(ResourceKind::Observation).accepts_search_param("patient"));
        assert!(!entry(ResourceKind::Patient).accepts_search_param("subject"));
    }

    #[test]
    fn test_read_dispatches_by_kind() {
        let storage = StubStorage::default();

        let patient = read_by_id(&storage, ResourceKind::Patient, "1").unwrap();
        assert_eq!(ResourceKind::of(&patient), Some(ResourceKind::Patient));

        let obs = read_by_id(&storage, ResourceKind::Observation, "9").unwrap();
        assert_eq!(ResourceKind::of(&obs), Some(ResourceKind::Observation));
        assert_eq!(json(&obs)["id"], "9");
    }

    #[test]
    fn test_not_found_propagates_unchanged() {
        let storage = StubStorage::default();
        let err = read_by_id(&storage, ResourceKind::Patient, "5").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_id_rejected_before_query() {
        let storage = StubStorage::default();
        let err = read_by_id(&storage, ResourceKind::Patient, "abc").unwrap_err();

        assert!(matches!(
            err,
            StorageError::Validation(ValidationError::InvalidSelector { .. })
        ));
        assert_eq!(storage.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subject_search_on_patient_is_unsupported() {
        let storage = StubStorage::default();
        let err = search_by_subject(&storage, ResourceKind::Patient, "1").unwrap_err();

        assert!(matches!(
            err,
            StorageError::Validation(ValidationError::UnsupportedSearchParameter { .. })
        ));
        assert_eq!(storage.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subject_search_accepts_reference_form() {
        let storage = StubStorage::default();
        let results = search_by_subject(&storage, ResourceKind::Observation, "Patient/4").unwrap();

        assert_eq!(results.len(), 2);
        for resource in &results {
            assert_eq!(json(resource)["subject"]["reference"], "Patient/4");
        }
    }

    #[test]
    fn test_backend_failure_is_not_masked() {
        let storage = StubStorage {
            fail: true,
            ..Default::default()
        };

        let err = list_all(&storage, ResourceKind::Observation).unwrap_err();
        assert!(err.is_data_access_failure());

        let err = read_by_id(&storage, ResourceKind::Patient, "1").unwrap_err();
        assert!(err.is_data_access_failure());
    }

    #[test]
    fn test_list_all() {
        let storage = StubStorage::default();
        let patients = list_all(&storage, ResourceKind::Patient).unwrap();
        assert_eq!(patients.len(), 2);
    }

    #[test]
    fn test_resolve_kind() {
        assert_eq!(resolve_kind("Observation").unwrap(), ResourceKind::Observation);
        assert!(matches!(
            resolve_kind("Encounter"),
            Err(ValidationError::UnsupportedResourceType { .. })
        ));
    }
}
