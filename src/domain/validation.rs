//! Submission gate for vehicle drafts.

use std::fmt;

use thiserror::Error;
use time::OffsetDateTime;

use super::entities::{
    VehicleDraft, VehicleRecord, MAX_SEATING_CAPACITY, MIN_MODEL_YEAR, MIN_SEATING_CAPACITY,
};

/// Fields that must be filled in before a draft can be submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Vin,
    Manufacturer,
    Year,
    Color,
    BodyType,
    EngineType,
    Transmission,
    FuelType,
    ConditionStatus,
}

impl RequiredField {
    /// Check order; missing fields are reported in this order.
    pub const ALL: [RequiredField; 9] = [
        RequiredField::Vin,
        RequiredField::Manufacturer,
        RequiredField::Year,
        RequiredField::Color,
        RequiredField::BodyType,
        RequiredField::EngineType,
        RequiredField::Transmission,
        RequiredField::FuelType,
        RequiredField::ConditionStatus,
    ];

    /// Wire name of the field, as sent to the prediction service.
    pub fn name(&self) -> &'static str {
        match self {
            RequiredField::Vin => "vin",
            RequiredField::Manufacturer => "manufacturer",
            RequiredField::Year => "year",
            RequiredField::Color => "color",
            RequiredField::BodyType => "body_type",
            RequiredField::EngineType => "engine_type",
            RequiredField::Transmission => "transmission",
            RequiredField::FuelType => "fuel_type",
            RequiredField::ConditionStatus => "vehicle_condition_status",
        }
    }

    fn is_empty_in(&self, draft: &VehicleDraft) -> bool {
        match self {
            RequiredField::Vin => draft.vin.trim().is_empty(),
            RequiredField::Manufacturer => draft.manufacturer.is_none(),
            RequiredField::Year => matches!(draft.year, None | Some(0)),
            RequiredField::Color => draft.color.is_none(),
            RequiredField::BodyType => draft.body_type.is_none(),
            RequiredField::EngineType => draft.engine_type.is_none(),
            RequiredField::Transmission => draft.transmission.is_none(),
            RequiredField::FuelType => draft.fuel_type.is_none(),
            RequiredField::ConditionStatus => draft.vehicle_condition_status.is_none(),
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields: {}", join_fields(.0))]
    MissingFields(Vec<RequiredField>),
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(RequiredField::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Required fields that are still empty, in check order.
pub fn missing_fields(draft: &VehicleDraft) -> Vec<RequiredField> {
    RequiredField::ALL
        .iter()
        .copied()
        .filter(|field| field.is_empty_in(draft))
        .collect()
}

/// Validates against the current UTC year.
pub fn validate(draft: &VehicleDraft) -> Result<VehicleRecord, ValidationError> {
    validate_at(draft, OffsetDateTime::now_utc().year())
}

pub fn validate_at(
    draft: &VehicleDraft,
    current_year: i32,
) -> Result<VehicleRecord, ValidationError> {
    let missing = missing_fields(draft);
    let (
        Some(manufacturer),
        Some(year),
        Some(color),
        Some(body_type),
        Some(engine_type),
        Some(transmission),
        Some(fuel_type),
        Some(vehicle_condition_status),
    ) = (
        draft.manufacturer,
        draft.year,
        draft.color,
        draft.body_type,
        draft.engine_type,
        draft.transmission,
        draft.fuel_type,
        draft.vehicle_condition_status,
    )
    else {
        return Err(ValidationError::MissingFields(missing));
    };
    // Catches a blank VIN and a zero year, which still destructure above.
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    if !(MIN_MODEL_YEAR..=current_year).contains(&year) {
        return Err(ValidationError::OutOfRange {
            field: "year",
            value: year.into(),
            min: MIN_MODEL_YEAR.into(),
            max: current_year.into(),
        });
    }

    if !(MIN_SEATING_CAPACITY..=MAX_SEATING_CAPACITY).contains(&draft.seating_capacity) {
        return Err(ValidationError::OutOfRange {
            field: "seating_capacity",
            value: draft.seating_capacity.into(),
            min: MIN_SEATING_CAPACITY.into(),
            max: MAX_SEATING_CAPACITY.into(),
        });
    }

    Ok(VehicleRecord {
        vin: draft.vin.trim().to_string(),
        manufacturer,
        year,
        color,
        body_type,
        engine_type,
        transmission,
        fuel_type,
        seating_capacity: draft.seating_capacity,
        kilometers_driven: draft.kilometers_driven,
        vehicle_condition_status,
        purchase_date: draft.purchase_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ConditionStatus, Manufacturer};
    use crate::domain::fixtures::sample_record;
    use time::macros::date;

    fn complete_draft() -> VehicleDraft {
        VehicleDraft::from(sample_record())
    }

    #[test]
    fn blank_draft_reports_every_select_field() {
        let draft = VehicleDraft::starting_on(date!(2026 - 01 - 02));
        let missing = missing_fields(&draft);
        assert_eq!(
            missing,
            vec![
                RequiredField::Vin,
                RequiredField::Manufacturer,
                RequiredField::Color,
                RequiredField::BodyType,
                RequiredField::EngineType,
                RequiredField::Transmission,
                RequiredField::FuelType,
                RequiredField::ConditionStatus,
            ]
        );
    }

    #[test]
    fn complete_draft_has_no_missing_fields() {
        assert!(missing_fields(&complete_draft()).is_empty());
    }

    #[test]
    fn each_required_field_is_reported_alone() {
        for field in RequiredField::ALL {
            let mut draft = complete_draft();
            match field {
                RequiredField::Vin => draft.vin = "   ".to_string(),
                RequiredField::Manufacturer => draft.manufacturer = None,
                RequiredField::Year => draft.year = Some(0),
                RequiredField::Color => draft.color = None,
                RequiredField::BodyType => draft.body_type = None,
                RequiredField::EngineType => draft.engine_type = None,
                RequiredField::Transmission => draft.transmission = None,
                RequiredField::FuelType => draft.fuel_type = None,
                RequiredField::ConditionStatus => draft.vehicle_condition_status = None,
            }
            assert_eq!(missing_fields(&draft), vec![field]);
            assert_eq!(
                validate_at(&draft, 2026),
                Err(ValidationError::MissingFields(vec![field]))
            );
        }
    }

    #[test]
    fn optional_fields_never_block_submission() {
        let mut draft = complete_draft();
        draft.kilometers_driven = 0;
        assert!(missing_fields(&draft).is_empty());
    }

    #[test]
    fn missing_message_lists_wire_names() {
        let mut draft = complete_draft();
        draft.vin.clear();
        draft.vehicle_condition_status = None;
        let err = validate_at(&draft, 2026).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: vin, vehicle_condition_status"
        );
    }

    #[test]
    fn valid_draft_becomes_record() {
        let mut draft = complete_draft();
        draft.vin = "  WVWZZZ1JZXW000001 ".to_string();
        draft.manufacturer = Some(Manufacturer::Kia);
        draft.vehicle_condition_status = Some(ConditionStatus::Fair);

        let record = validate_at(&draft, 2026).unwrap();
        assert_eq!(record.vin, "WVWZZZ1JZXW000001");
        assert_eq!(record.manufacturer, Manufacturer::Kia);
        assert_eq!(record.vehicle_condition_status, ConditionStatus::Fair);
        assert_eq!(record.year, 2018);
    }

    #[test]
    fn year_outside_range_is_rejected() {
        let mut draft = complete_draft();
        draft.year = Some(1989);
        assert_eq!(
            validate_at(&draft, 2026),
            Err(ValidationError::OutOfRange {
                field: "year",
                value: 1989,
                min: 1990,
                max: 2026,
            })
        );

        draft.year = Some(2027);
        assert!(matches!(
            validate_at(&draft, 2026),
            Err(ValidationError::OutOfRange { field: "year", .. })
        ));

        draft.year = Some(2026);
        assert!(validate_at(&draft, 2026).is_ok());
    }

    #[test]
    fn seating_capacity_outside_range_is_rejected() {
        let mut draft = complete_draft();
        draft.seating_capacity = 0;
        assert!(matches!(
            validate_at(&draft, 2026),
            Err(ValidationError::OutOfRange { field: "seating_capacity", value: 0, .. })
        ));

        draft.seating_capacity = 16;
        assert!(validate_at(&draft, 2026).is_err());

        draft.seating_capacity = 15;
        assert!(validate_at(&draft, 2026).is_ok());
    }

    #[test]
    fn presence_is_checked_before_ranges() {
        let mut draft = complete_draft();
        draft.seating_capacity = 40;
        draft.color = None;
        assert_eq!(
            validate_at(&draft, 2026),
            Err(ValidationError::MissingFields(vec![RequiredField::Color]))
        );
    }
}
