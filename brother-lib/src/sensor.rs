use crate::error::BrotherError;
use chrono::{DateTime, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// Declares the sensor catalogue once and derives from it the `Sensor` enum,
/// the matching optional fields on `SensorRecord`, and the accessors between them.
macro_rules! sensors {
    ($($variant:ident => $field:ident),* $(,)?) => {
        /// Every numeric value a printer can report through its binary fields.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Sensor {
            $($variant),*
        }

        impl Sensor {
            pub const ALL: &'static [Sensor] = &[$(Sensor::$variant),*];

            /// Stable snake_case name, identical to the `SensorRecord` field name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Sensor::$variant => stringify!($field)),*
                }
            }
        }

        /// Decoded output of one poll.
        ///
        /// `model` and `serial` are always present. Everything else is optional and
        /// stays `None` when the printer does not report it.
        #[derive(Debug, Clone, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(Serialize))]
        pub struct SensorRecord {
            pub model: String,
            pub serial: String,
            #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
            pub mac: Option<String>,
            #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
            pub firmware: Option<String>,
            #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
            pub status: Option<String>,
            #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
            pub uptime: Option<DateTime<Utc>>,
            $(
                #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
                pub $field: Option<u32>,
            )*
        }

        impl SensorRecord {
            /// Value of a single sensor.
            pub fn get(&self, sensor: Sensor) -> Option<u32> {
                match sensor {
                    $(Sensor::$variant => self.$field),*
                }
            }

            fn slot(&mut self, sensor: Sensor) -> &mut Option<u32> {
                match sensor {
                    $(Sensor::$variant => &mut self.$field),*
                }
            }

            fn empty(model: String, serial: String) -> Self {
                SensorRecord {
                    model,
                    serial,
                    mac: None,
                    firmware: None,
                    status: None,
                    uptime: None,
                    $($field: None),*
                }
            }
        }
    };
}

sensors! {
    BeltUnitRemainingLife => belt_unit_remaining_life,
    BeltUnitRemainingPages => belt_unit_remaining_pages,
    BlackCounter => black_counter,
    BlackDrumCounter => black_drum_counter,
    BlackDrumRemainingLife => black_drum_remaining_life,
    BlackDrumRemainingPages => black_drum_remaining_pages,
    BlackInk => black_ink,
    BlackInkRemaining => black_ink_remaining,
    BlackInkStatus => black_ink_status,
    BlackToner => black_toner,
    BlackTonerRemaining => black_toner_remaining,
    BlackTonerStatus => black_toner_status,
    BwCounter => bw_counter,
    ColorCounter => color_counter,
    CyanCounter => cyan_counter,
    CyanDrumCounter => cyan_drum_counter,
    CyanDrumRemainingLife => cyan_drum_remaining_life,
    CyanDrumRemainingPages => cyan_drum_remaining_pages,
    CyanInk => cyan_ink,
    CyanInkRemaining => cyan_ink_remaining,
    CyanToner => cyan_toner,
    CyanTonerRemaining => cyan_toner_remaining,
    CyanTonerStatus => cyan_toner_status,
    DrumCounter => drum_counter,
    DrumRemainingLife => drum_remaining_life,
    DrumRemainingPages => drum_remaining_pages,
    DrumStatus => drum_status,
    DuplexUnitPagesCounter => duplex_unit_pages_counter,
    FuserRemainingLife => fuser_remaining_life,
    FuserUnitRemainingPages => fuser_unit_remaining_pages,
    ImageCounter => image_counter,
    LaserRemainingLife => laser_remaining_life,
    LaserUnitRemainingPages => laser_unit_remaining_pages,
    MagentaCounter => magenta_counter,
    MagentaDrumCounter => magenta_drum_counter,
    MagentaDrumRemainingLife => magenta_drum_remaining_life,
    MagentaDrumRemainingPages => magenta_drum_remaining_pages,
    MagentaInk => magenta_ink,
    MagentaInkRemaining => magenta_ink_remaining,
    MagentaToner => magenta_toner,
    MagentaTonerRemaining => magenta_toner_remaining,
    MagentaTonerStatus => magenta_toner_status,
    PageCounter => page_counter,
    PfKit1RemainingLife => pf_kit_1_remaining_life,
    PfKit1RemainingPages => pf_kit_1_remaining_pages,
    PfKitMpRemainingLife => pf_kit_mp_remaining_life,
    PfKitMpRemainingPages => pf_kit_mp_remaining_pages,
    YellowCounter => yellow_counter,
    YellowDrumCounter => yellow_drum_counter,
    YellowDrumRemainingLife => yellow_drum_remaining_life,
    YellowDrumRemainingPages => yellow_drum_remaining_pages,
    YellowInk => yellow_ink,
    YellowInkRemaining => yellow_ink_remaining,
    YellowToner => yellow_toner,
    YellowTonerRemaining => yellow_toner_remaining,
    YellowTonerStatus => yellow_toner_status,
}

impl Sensor {
    /// Look a sensor up by its snake_case name.
    pub fn from_name(name: &str) -> Result<Self, BrotherError> {
        Sensor::ALL
            .iter()
            .copied()
            .find(|sensor| sensor.name() == name)
            .ok_or_else(|| BrotherError::UnknownSensor(name.to_string()))
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl Serialize for Sensor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl SensorRecord {
    pub fn builder() -> SensorRecordBuilder {
        SensorRecordBuilder::default()
    }

    /// All sensors that carry a value, in catalogue order.
    pub fn readings(&self) -> impl Iterator<Item = (Sensor, u32)> + '_ {
        Sensor::ALL
            .iter()
            .filter_map(|&sensor| self.get(sensor).map(|value| (sensor, value)))
    }
}

impl fmt::Display for SensorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (serial {})", self.model, self.serial)?;
        if let Some(status) = &self.status {
            write!(f, ", status: {status}")?;
        }
        for (sensor, value) in self.readings() {
            write!(f, ", {sensor}: {value}")?;
        }
        Ok(())
    }
}

/// Collects the merged poll results and validates them into a `SensorRecord`.
///
/// Readings are applied in order, so a later value for the same sensor wins.
#[derive(Debug, Clone, Default)]
pub struct SensorRecordBuilder {
    model: Option<String>,
    serial: Option<String>,
    mac: Option<String>,
    firmware: Option<String>,
    status: Option<String>,
    uptime: Option<DateTime<Utc>>,
    readings: Vec<(Sensor, u32)>,
}

impl SensorRecordBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    pub fn mac(mut self, mac: Option<String>) -> Self {
        self.mac = mac;
        self
    }

    pub fn firmware(mut self, firmware: Option<String>) -> Self {
        self.firmware = firmware;
        self
    }

    pub fn status(mut self, status: Option<String>) -> Self {
        self.status = status;
        self
    }

    pub fn uptime(mut self, uptime: Option<DateTime<Utc>>) -> Self {
        self.uptime = uptime;
        self
    }

    pub fn reading(mut self, sensor: Sensor, value: u32) -> Self {
        self.readings.push((sensor, value));
        self
    }

    pub fn readings(mut self, readings: impl IntoIterator<Item = (Sensor, u32)>) -> Self {
        self.readings.extend(readings);
        self
    }

    /// Set a reading by sensor name; unknown names are rejected.
    pub fn named_reading(self, name: &str, value: u32) -> Result<Self, BrotherError> {
        let sensor = Sensor::from_name(name)?;
        Ok(self.reading(sensor, value))
    }

    pub fn has_reading(&self, sensor: Sensor) -> bool {
        self.readings.iter().any(|(s, _)| *s == sensor)
    }

    pub fn build(self) -> Result<SensorRecord, BrotherError> {
        let model = self.model.ok_or(BrotherError::MissingField("model"))?;
        let serial = self.serial.ok_or(BrotherError::MissingField("serial"))?;

        let mut record = SensorRecord::empty(model, serial);
        record.mac = self.mac;
        record.firmware = self.firmware;
        record.status = self.status;
        record.uptime = self.uptime;
        for (sensor, value) in self.readings {
            *record.slot(sensor) = Some(value);
        }
        Ok(record)
    }
}
