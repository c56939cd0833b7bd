use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Date, OffsetDateTime};

time::serde::format_description!(purchase_date_format, Date, "[year]-[month]-[day]");

/// Earliest model year accepted by the form.
pub const MIN_MODEL_YEAR: i32 = 1990;
pub const MIN_SEATING_CAPACITY: u8 = 1;
pub const MAX_SEATING_CAPACITY: u8 = 15;
pub const DEFAULT_SEATING_CAPACITY: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

/// Declares one of the fixed select-box vocabularies. The label doubles as the
/// wire value sent to the prediction service.
macro_rules! vehicle_option {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let trimmed = value.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|option| option.label().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| UnknownOption {
                        kind: $kind,
                        value: value.to_string(),
                    })
            }
        }
    };
}

vehicle_option!(Manufacturer, "manufacturer" {
    Toyota => "Toyota",
    Honda => "Honda",
    Ford => "Ford",
    Chevrolet => "Chevrolet",
    Bmw => "BMW",
    MercedesBenz => "Mercedes-Benz",
    Audi => "Audi",
    Nissan => "Nissan",
    Hyundai => "Hyundai",
    Kia => "Kia",
});

vehicle_option!(Color, "color" {
    Black => "Black",
    White => "White",
    Silver => "Silver",
    Gray => "Gray",
    Red => "Red",
    Blue => "Blue",
    Green => "Green",
    Yellow => "Yellow",
    Brown => "Brown",
    Orange => "Orange",
});

vehicle_option!(BodyType, "body type" {
    Sedan => "Sedan",
    Suv => "SUV",
    Hatchback => "Hatchback",
    Truck => "Truck",
    Van => "Van",
    Coupe => "Coupe",
    Convertible => "Convertible",
    Wagon => "Wagon",
});

vehicle_option!(EngineType, "engine type" {
    Inline4 => "Inline-4",
    V6 => "V6",
    V8 => "V8",
    Electric => "Electric",
    Hybrid => "Hybrid",
    Diesel => "Diesel",
});

vehicle_option!(Transmission, "transmission" {
    Automatic => "Automatic",
    Manual => "Manual",
    Cvt => "CVT",
    Dct => "DCT",
    SemiAutomatic => "Semi-Automatic",
});

vehicle_option!(FuelType, "fuel type" {
    Gasoline => "Gasoline",
    Diesel => "Diesel",
    Electric => "Electric",
    Hybrid => "Hybrid",
    PlugInHybrid => "Plug-in Hybrid",
});

vehicle_option!(
    /// Condition reported by the seller; drives the largest price adjustment.
    ConditionStatus, "condition status" {
        Excellent => "Excellent",
        Good => "Good",
        Fair => "Fair",
        Poor => "Poor",
    }
);

/// Vehicle attributes under edit in a form session. Required fields may still
/// be empty here; [`crate::domain::validation::validate`] turns a complete draft
/// into a [`VehicleRecord`].
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleDraft {
    pub vin: String,
    pub manufacturer: Option<Manufacturer>,
    /// `None` and `Some(0)` both count as empty.
    pub year: Option<i32>,
    pub color: Option<Color>,
    pub body_type: Option<BodyType>,
    pub engine_type: Option<EngineType>,
    pub transmission: Option<Transmission>,
    pub fuel_type: Option<FuelType>,
    pub seating_capacity: u8,
    pub kilometers_driven: u32,
    pub vehicle_condition_status: Option<ConditionStatus>,
    pub purchase_date: Date,
}

impl VehicleDraft {
    /// Blank draft as the form presents it: current year, five seats, zero
    /// kilometers and today's purchase date.
    pub fn new() -> Self {
        Self::starting_on(OffsetDateTime::now_utc().date())
    }

    pub fn starting_on(today: Date) -> Self {
        Self {
            vin: String::new(),
            manufacturer: None,
            year: Some(today.year()),
            color: None,
            body_type: None,
            engine_type: None,
            transmission: None,
            fuel_type: None,
            seating_capacity: DEFAULT_SEATING_CAPACITY,
            kilometers_driven: 0,
            vehicle_condition_status: None,
            purchase_date: today,
        }
    }
}

impl Default for VehicleDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete vehicle description, serialized exactly as the prediction
/// service expects it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub vin: String,
    pub manufacturer: Manufacturer,
    pub year: i32,
    pub color: Color,
    pub body_type: BodyType,
    pub engine_type: EngineType,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub seating_capacity: u8,
    pub kilometers_driven: u32,
    pub vehicle_condition_status: ConditionStatus,
    #[serde(with = "purchase_date_format")]
    pub purchase_date: Date,
}

impl From<VehicleRecord> for VehicleDraft {
    fn from(record: VehicleRecord) -> Self {
        Self {
            vin: record.vin,
            manufacturer: Some(record.manufacturer),
            year: Some(record.year),
            color: Some(record.color),
            body_type: Some(record.body_type),
            engine_type: Some(record.engine_type),
            transmission: Some(record.transmission),
            fuel_type: Some(record.fuel_type),
            seating_capacity: record.seating_capacity,
            kilometers_driven: record.kilometers_driven,
            vehicle_condition_status: Some(record.vehicle_condition_status),
            purchase_date: record.purchase_date,
        }
    }
}
