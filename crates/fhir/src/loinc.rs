//! LOINC codes used to tag vital-sign observations.

/// LOINC coding system URI.
pub const SYSTEM: &str = "http://loinc.org";

/// Blood pressure panel.
pub const BLOOD_PRESSURE: &str = "85354-9";
/// Display for [`BLOOD_PRESSURE`].
pub const BLOOD_PRESSURE_DISPLAY: &str = "Blood pressure systolic & diastolic";

/// Systolic blood pressure component.
pub const SYSTOLIC: &str = "8480-6";
/// Display for [`SYSTOLIC`].
pub const SYSTOLIC_DISPLAY: &str = "Systolic Blood Pressure";

/// Diastolic blood pressure component.
pub const DIASTOLIC: &str = "8462-4";
/// Display for [`DIASTOLIC`].
pub const DIASTOLIC_DISPLAY: &str = "Diastolic Blood Pressure";

/// Heart rate.
pub const HEART_RATE: &str = "8867-4";
/// Display for [`HEART_RATE`].
pub const HEART_RATE_DISPLAY: &str = "Heart rate";

/// Unit for blood pressure readings.
pub const UNIT_MMHG: &str = "mmHg";
/// Unit for heart rate readings.
pub const UNIT_BPM: &str = "bpm";
