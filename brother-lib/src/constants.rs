// Field catalog for Brother printers

use crate::sensor::Sensor;
use crate::status::Charset;
use strum_macros::Display;

/// Record width in hex digits for current-generation firmware
pub const RECORD_WIDTH: usize = 14;

/// Record width in hex digits for legacy firmware
pub const LEGACY_RECORD_WIDTH: usize = 10;

/// Terminator found at the end of every legacy record
pub const LEGACY_RECORD_TERMINATOR: &str = "14";

/// Models known to answer with data this library cannot interpret
pub const UNSUPPORTED_MODELS: &[&str] = &["mfc-8660dn"];

/// Character set used when the printer does not report a known one
pub const DEFAULT_CHARSET: Charset = Charset::Roman8;

/// IANA MIBenum values reported by `prtLocalizationCharacterSet`
pub const CHARSET_MAP: &[(u32, Charset)] = &[
    (5, Charset::Latin2),
    (8, Charset::Cyrillic),
    (12, Charset::Latin5),
    (106, Charset::Utf8),
    (2004, Charset::Roman8),
];

/// A value the client can request from the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Charset,
    Counters,
    Firmware,
    Mac,
    Maintenance,
    Model,
    NextCare,
    PageCount,
    Serial,
    Status,
    Uptime,
}

impl Field {
    /// Every field, in request order.
    pub const ALL: [Field; 11] = [
        Field::Charset,
        Field::Counters,
        Field::Firmware,
        Field::Mac,
        Field::Maintenance,
        Field::Model,
        Field::NextCare,
        Field::PageCount,
        Field::Serial,
        Field::Status,
        Field::Uptime,
    ];

    pub fn oid(self) -> &'static str {
        match self {
            Field::Charset => "1.3.6.1.2.1.43.7.1.1.4.1.1",
            Field::Counters => "1.3.6.1.4.1.2435.2.3.9.4.2.1.5.5.10.0",
            Field::Firmware => "1.3.6.1.4.1.2435.2.3.9.4.2.1.5.5.17.0",
            Field::Mac => "1.3.6.1.2.1.2.2.1.6.1",
            Field::Maintenance => "1.3.6.1.4.1.2435.2.3.9.4.2.1.5.5.8.0",
            Field::Model => "1.3.6.1.4.1.2435.2.3.9.1.1.7.0",
            Field::NextCare => "1.3.6.1.4.1.2435.2.3.9.4.2.1.5.5.11.0",
            Field::PageCount => "1.3.6.1.2.1.43.10.2.1.4.1.1",
            Field::Serial => "1.3.6.1.4.1.2435.2.3.9.4.2.1.5.5.1.0",
            Field::Status => "1.3.6.1.4.1.2435.2.3.9.4.2.1.5.4.5.2.0",
            Field::Uptime => "1.3.6.1.2.1.1.3.0",
        }
    }

    /// A printer that refuses one of these cannot be supported.
    pub fn is_mandatory(self) -> bool {
        matches!(self, Field::Model | Field::Serial)
    }

    /// Fields whose value is a byte string of packed binary records.
    pub fn carries_records(self) -> bool {
        matches!(self, Field::Counters | Field::Maintenance | Field::NextCare)
    }
}

/// Tags found in the counters field (both printer families)
pub const COUNTERS: &[(u8, Sensor)] = &[
    (0x00, Sensor::PageCounter),
    (0x01, Sensor::BwCounter),
    (0x02, Sensor::ColorCounter),
    (0x06, Sensor::DuplexUnitPagesCounter),
    (0x12, Sensor::BlackCounter),
    (0x13, Sensor::CyanCounter),
    (0x14, Sensor::MagentaCounter),
    (0x15, Sensor::YellowCounter),
    (0x16, Sensor::ImageCounter),
];

/// Tags found in the maintenance field of laser printers
pub const LASER_MAINTENANCE: &[(u8, Sensor)] = &[
    (0x11, Sensor::DrumCounter),
    (0x31, Sensor::BlackTonerStatus),
    (0x32, Sensor::CyanTonerStatus),
    (0x33, Sensor::MagentaTonerStatus),
    (0x34, Sensor::YellowTonerStatus),
    (0x41, Sensor::DrumRemainingLife),
    (0x63, Sensor::DrumStatus),
    (0x69, Sensor::BeltUnitRemainingLife),
    (0x6a, Sensor::FuserRemainingLife),
    (0x6b, Sensor::LaserRemainingLife),
    (0x6c, Sensor::PfKitMpRemainingLife),
    (0x6d, Sensor::PfKit1RemainingLife),
    (0x6f, Sensor::BlackTonerRemaining),
    (0x70, Sensor::CyanTonerRemaining),
    (0x71, Sensor::MagentaTonerRemaining),
    (0x72, Sensor::YellowTonerRemaining),
    (0x73, Sensor::CyanDrumCounter),
    (0x74, Sensor::MagentaDrumCounter),
    (0x75, Sensor::YellowDrumCounter),
    (0x79, Sensor::CyanDrumRemainingLife),
    (0x7a, Sensor::MagentaDrumRemainingLife),
    (0x7b, Sensor::YellowDrumRemainingLife),
    (0x7e, Sensor::BlackDrumCounter),
    (0x80, Sensor::BlackDrumRemainingLife),
    (0x81, Sensor::BlackToner),
    (0x82, Sensor::CyanToner),
    (0x83, Sensor::MagentaToner),
    (0x84, Sensor::YellowToner),
];

/// Tags found in the maintenance field of inkjet printers.
/// 0xa1..0xa4 are the legacy-generation ink levels.
pub const INK_MAINTENANCE: &[(u8, Sensor)] = &[
    (0x31, Sensor::BlackInkStatus),
    (0x6f, Sensor::BlackInkRemaining),
    (0x70, Sensor::CyanInkRemaining),
    (0x71, Sensor::MagentaInkRemaining),
    (0x72, Sensor::YellowInkRemaining),
    (0x81, Sensor::BlackInk),
    (0x82, Sensor::CyanInk),
    (0x83, Sensor::MagentaInk),
    (0x84, Sensor::YellowInk),
    (0xa1, Sensor::BlackInk),
    (0xa2, Sensor::CyanInk),
    (0xa3, Sensor::MagentaInk),
    (0xa4, Sensor::YellowInk),
];

/// Tags found in the next-care field of laser printers
pub const LASER_NEXTCARE: &[(u8, Sensor)] = &[
    (0x73, Sensor::LaserUnitRemainingPages),
    (0x77, Sensor::PfKit1RemainingPages),
    (0x82, Sensor::DrumRemainingPages),
    (0x86, Sensor::PfKitMpRemainingPages),
    (0x88, Sensor::BeltUnitRemainingPages),
    (0x89, Sensor::FuserUnitRemainingPages),
    (0xa4, Sensor::BlackDrumRemainingPages),
    (0xa5, Sensor::CyanDrumRemainingPages),
    (0xa6, Sensor::MagentaDrumRemainingPages),
    (0xa7, Sensor::YellowDrumRemainingPages),
];

/// Sensors transmitted as percent × 100
pub const PERCENT_SENSORS: &[Sensor] = &[
    Sensor::BeltUnitRemainingLife,
    Sensor::BlackDrumRemainingLife,
    Sensor::BlackInkRemaining,
    Sensor::BlackTonerRemaining,
    Sensor::CyanDrumRemainingLife,
    Sensor::CyanInkRemaining,
    Sensor::CyanTonerRemaining,
    Sensor::DrumRemainingLife,
    Sensor::FuserRemainingLife,
    Sensor::LaserRemainingLife,
    Sensor::MagentaDrumRemainingLife,
    Sensor::MagentaInkRemaining,
    Sensor::MagentaTonerRemaining,
    Sensor::PfKit1RemainingLife,
    Sensor::PfKitMpRemainingLife,
    Sensor::YellowDrumRemainingLife,
    Sensor::YellowInkRemaining,
    Sensor::YellowTonerRemaining,
];
