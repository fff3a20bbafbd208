//! Clinical observation variants.

use chrono::NaiveDate;
use serde_json::{Value, json};
use vitalis_fhir::{ModelError, Observation, json as fhir_json, loinc};

use crate::error::{BackendError, StorageResult};

use super::records::{BloodPressureRecord, HeartRateRecord, fhir_date};

/// A reading from one of the observation tables.
///
/// Both variants share an id, a patient, a date and the LOINC coding system;
/// they differ only in the code and in how the measured values are attached.
/// Conversion into [`Observation`] goes through [`ClinicalObservation::into_observation`]
/// for every variant. Readings are reported with status `final`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClinicalObservation {
    /// A `blood_pressure` row.
    BloodPressure(BloodPressureRecord),
    /// A `heart_rate` row.
    HeartRate(HeartRateRecord),
}

impl ClinicalObservation {
    /// Row id within the source table.
    pub fn id(&self) -> i64 {
        match self {
            ClinicalObservation::BloodPressure(r) => r.id,
            ClinicalObservation::HeartRate(r) => r.id,
        }
    }

    /// The patient this reading is about.
    pub fn patient_id(&self) -> i64 {
        match self {
            ClinicalObservation::BloodPressure(r) => r.patient_id,
            ClinicalObservation::HeartRate(r) => r.patient_id,
        }
    }

    /// Date of the reading.
    pub fn date(&self) -> NaiveDate {
        match self {
            ClinicalObservation::BloodPressure(r) => r.date,
            ClinicalObservation::HeartRate(r) => r.date,
        }
    }

    /// The LOINC code and display identifying this kind of reading.
    pub fn loinc_code(&self) -> (&'static str, &'static str) {
        match self {
            ClinicalObservation::BloodPressure(_) => {
                (loinc::BLOOD_PRESSURE, loinc::BLOOD_PRESSURE_DISPLAY)
            }
            ClinicalObservation::HeartRate(_) => (loinc::HEART_RATE, loinc::HEART_RATE_DISPLAY),
        }
    }

    /// Name of the table the reading came from.
    pub fn table(&self) -> &'static str {
        match self {
            ClinicalObservation::BloodPressure(_) => "blood_pressure",
            ClinicalObservation::HeartRate(_) => "heart_rate",
        }
    }

    /// The FHIR JSON form of this reading.
    pub fn to_fhir_json(&self) -> Value {
        let (code, display) = self.loinc_code();
        let mut observation = json!({
            "resourceType": "Observation",
            "id": self.id().to_string(),
            "status": "final",
            "code": loinc_concept(code, display),
            "subject": {"reference": format!("Patient/{}", self.patient_id())},
            "effectiveDateTime": fhir_date(self.date()),
        });

        match self {
            ClinicalObservation::BloodPressure(r) => {
                observation["component"] = json!([
                    component(
                        loinc::SYSTOLIC,
                        loinc::SYSTOLIC_DISPLAY,
                        quantity(r.systolic, loinc::UNIT_MMHG),
                    ),
                    component(
                        loinc::DIASTOLIC,
                        loinc::DIASTOLIC_DISPLAY,
                        quantity(r.diastolic, loinc::UNIT_MMHG),
                    ),
                ]);
            }
            ClinicalObservation::HeartRate(r) => {
                observation["valueQuantity"] = quantity(r.rate, loinc::UNIT_BPM);
            }
        }

        observation
    }

    /// Builds the FHIR Observation for this reading.
    pub fn into_observation(self) -> Result<Observation, ModelError> {
        fhir_json::observation_from_json(self.to_fhir_json())
    }
}

fn loinc_concept(code: &str, display: &str) -> Value {
    json!({
        "coding": [{
            "system": loinc::SYSTEM,
            "code": code,
            "display": display,
        }]
    })
}

fn quantity(value: i64, unit: &str) -> Value {
    json!({"value": value, "unit": unit})
}

fn component(code: &str, display: &str, value: Value) -> Value {
    json!({
        "code": loinc_concept(code, display),
        "valueQuantity": value,
    })
}

/// Converts readings in order; the first one the R4 model rejects fails the
/// whole batch as a row-mapping error.
pub(crate) fn observations_from(
    readings: Vec<ClinicalObservation>,
) -> StorageResult<Vec<Observation>> {
    readings.into_iter().map(observation_from).collect()
}

/// Converts one reading.
pub(crate) fn observation_from(reading: ClinicalObservation) -> StorageResult<Observation> {
    let table = reading.table();
    reading
        .into_observation()
        .map_err(|e| BackendError::from_model(table, e).into())
}

impl From<BloodPressureRecord> for ClinicalObservation {
    fn from(record: BloodPressureRecord) -> Self {
        ClinicalObservation::BloodPressure(record)
    }
}

impl From<HeartRateRecord> for ClinicalObservation {
    fn from(record: HeartRateRecord) -> Self {
        ClinicalObservation::HeartRate(record)
    }
}

impl TryFrom<ClinicalObservation> for Observation {
    type Error = ModelError;

    fn try_from(reading: ClinicalObservation) -> Result<Self, Self::Error> {
        reading.into_observation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Converts through the R4 model and back to JSON.
    fn observation_json(reading: impl Into<ClinicalObservation>) -> Value {
        let observation = reading.into().into_observation().unwrap();
        fhir_json::resource_to_json(&fhir_json::wrap_observation(observation)).unwrap()
    }

    #[test]
    fn test_blood_pressure_observation() {
        let obs = observation_json(BloodPressureRecord {
            id: 7,
            patient_id: 3,
            systolic: 120,
            diastolic: 80,
            date: date(2024, 1, 5),
        });

        assert_eq!(obs["id"], "7");
        assert_eq!(obs["status"], "final");
        assert_eq!(obs["subject"]["reference"], "Patient/3");
        assert_eq!(obs["effectiveDateTime"], "2024-01-05");
        assert_eq!(obs["code"]["coding"][0]["code"], "85354-9");
        assert!(obs.get("valueQuantity").is_none());

        let components = obs["component"].as_array().unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0]["code"]["coding"][0]["code"], "8480-6");
        assert_eq!(components[0]["valueQuantity"]["value"].as_f64(), Some(120.0));
        assert_eq!(components[0]["valueQuantity"]["unit"], "mmHg");
        assert_eq!(components[1]["code"]["coding"][0]["code"], "8462-4");
        assert_eq!(components[1]["valueQuantity"]["value"].as_f64(), Some(80.0));
        assert_eq!(components[1]["valueQuantity"]["unit"], "mmHg");
    }

    #[test]
    fn test_heart_rate_observation() {
        let obs = observation_json(HeartRateRecord {
            id: 11,
            patient_id: 3,
            rate: 72,
            date: date(2024, 1, 5),
        });

        assert_eq!(obs["id"], "11");
        assert_eq!(obs["subject"]["reference"], "Patient/3");
        assert_eq!(obs["code"]["coding"][0]["code"], "8867-4");
        assert_eq!(obs["code"]["coding"][0]["display"], "Heart rate");
        assert_eq!(obs["valueQuantity"]["value"].as_f64(), Some(72.0));
        assert_eq!(obs["valueQuantity"]["unit"], "bpm");
        assert!(obs.get("component").is_none());
    }

    #[test]
    fn test_shared_accessors() {
        let hr = ClinicalObservation::from(HeartRateRecord {
            id: 2,
            patient_id: 9,
            rate: 60,
            date: date(2023, 6, 1),
        });

        assert_eq!(hr.id(), 2);
        assert_eq!(hr.patient_id(), 9);
        assert_eq!(hr.date(), date(2023, 6, 1));
        assert_eq!(hr.table(), "heart_rate");
        assert_eq!(hr.loinc_code(), ("8867-4", "Heart rate"));
    }

    #[test]
    fn test_coding_system_is_loinc() {
        let obs = observation_json(BloodPressureRecord {
            id: 1,
            patient_id: 1,
            systolic: 110,
            diastolic: 70,
            date: date(2024, 2, 2),
        });

        assert_eq!(obs["code"]["coding"][0]["system"], "http://loinc.org");
        for component in obs["component"].as_array().unwrap() {
            assert_eq!(component["code"]["coding"][0]["system"], "http://loinc.org");
        }
    }
}
