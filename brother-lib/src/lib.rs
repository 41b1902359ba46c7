pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod mock;
pub mod record;
pub mod sensor;
pub mod snmp;
pub mod status;
pub mod transport;
pub mod uptime;

// Re-export the client and its main types for easy access
pub use config::{Config, PrinterType};
pub use constants::Field;
pub use device::Brother;
pub use error::BrotherError;
pub use record::Generation;
pub use sensor::{Sensor, SensorRecord};
pub use transport::{FetchResponse, RawData, SnmpTransport, Transport};
