//! Common test utilities and shared imports

// Allow unused imports and dead code since this is a shared module
// used across multiple test files - not all items are used in every test file
#[allow(unused_imports)]
pub use brother_lib::constants::Field;
#[allow(unused_imports)]
pub use brother_lib::mock::MockTransport;
#[allow(unused_imports)]
pub use brother_lib::snmp::SnmpValue;
#[allow(unused_imports)]
pub use brother_lib::{Brother, BrotherError, Config, PrinterType, RawData};
#[allow(unused_imports)]
pub use bytes::Bytes;

/// Decode hex string to bytes for testing
#[allow(dead_code)]
pub fn hex_to_bytes(hex_data: &str) -> Bytes {
    Bytes::from(hex::decode(hex_data).expect("Failed to decode hex"))
}

/// Octet string value from hex, as a printer sends binary fields
#[allow(dead_code)]
pub fn hex_value(hex_data: &str) -> SnmpValue {
    SnmpValue::OctetString(hex_to_bytes(hex_data))
}

#[allow(dead_code)]
pub fn text_value(text: &str) -> SnmpValue {
    SnmpValue::OctetString(Bytes::copy_from_slice(text.as_bytes()))
}

#[allow(dead_code)]
pub fn raw_data(entries: Vec<(Field, SnmpValue)>) -> RawData {
    entries
        .into_iter()
        .map(|(field, value)| (field.oid().to_string(), value))
        .collect()
}

/// Device id string reported by an HL-L2340DW
#[allow(dead_code)]
pub const HL_L2340DW_DEVICE_ID: &str = "MFG:Brother;CMD:PJL,PCL,PCLXL,URF;MDL:HL-L2340DW series;CLS:PRINTER;CID:Brother Laser Type1;URF:W8,CP1,IS4-1,MT1-3-4-5-8,OB10,PQ4,RS300-600,V1.3,DM1;";

/// Maintenance field of a current-generation laser printer, checksum included
#[allow(dead_code)]
pub const LASER_MAINTENANCE_HEX: &str =
    "630104000000011101040000052c410104000022c4310104000000016f010400001900810104000000468601040000000aff";

/// Counters field, checksum included: 986 pages, 986 b&w, 7 duplex
#[allow(dead_code)]
pub const COUNTERS_HEX: &str = "000104000003da010104000003da06010400000007ff";

/// Next-care field, checksum included: drum 11 217 pages left
#[allow(dead_code)]
pub const NEXTCARE_HEX: &str = "82010400002bd1ff";

/// Maintenance field of a legacy inkjet printer, checksum included
#[allow(dead_code)]
pub const LEGACY_INK_MAINTENANCE_HEX: &str = "a101020414a201020c14a301020614a401020b14ff";

/// A full answer from an HL-L2340DW
#[allow(dead_code)]
pub fn hl_l2340dw_data() -> RawData {
    raw_data(vec![
        (Field::Model, text_value(HL_L2340DW_DEVICE_ID)),
        (Field::Serial, text_value("serial_number")),
        (Field::Mac, hex_value("001b8c123456")),
        (Field::Firmware, text_value("1.17")),
        (Field::Charset, SnmpValue::Integer(106)),
        (Field::Status, text_value("  WAITING     ")),
        (Field::Uptime, SnmpValue::TimeTicks(360_000)),
        (Field::Counters, hex_value(COUNTERS_HEX)),
        (Field::Maintenance, hex_value(LASER_MAINTENANCE_HEX)),
        (Field::NextCare, hex_value(NEXTCARE_HEX)),
        (Field::PageCount, SnmpValue::Counter32(1_000)),
    ])
}

/// Laser client on top of a mock transport
#[allow(dead_code)]
pub fn laser_client() -> Brother<MockTransport> {
    Brother::with_transport(Config::new("localhost"), MockTransport::new()).expect("supported model")
}

#[allow(dead_code)]
pub fn ink_client() -> Brother<MockTransport> {
    let config = Config::new("localhost").with_printer_type(PrinterType::Ink);
    Brother::with_transport(config, MockTransport::new()).expect("supported model")
}
