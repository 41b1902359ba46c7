use crate::config::{Config, PrinterType};
use crate::constants::{
    COUNTERS, Field, INK_MAINTENANCE, LASER_MAINTENANCE, LASER_NEXTCARE, PERCENT_SENSORS, UNSUPPORTED_MODELS,
};
use crate::error::BrotherError;
use crate::record::{Generation, decode_records, decode_records_legacy, split_records, to_hex_without_checksum};
use crate::sensor::{Sensor, SensorRecord};
use crate::snmp::SnmpValue;
use crate::status::{Charset, decode_status};
use crate::transport::{FetchResponse, RawData, SnmpTransport, Transport};
use crate::uptime::UptimeTracker;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

static MODEL_PATTERN: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"MDL:(?P<model>[\w\-]+)"));

/// What the client has learned about the printer so far.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Fields the printer accepts; `None` until initialised.
    fields: Option<Vec<Field>>,
    /// Record layout, fixed by the first poll that carries maintenance data.
    generation: Option<Generation>,
    counters: bool,
    uptime: UptimeTracker,
}

/// Polling client for one Brother printer.
pub struct Brother<T: Transport = SnmpTransport> {
    config: Config,
    transport: T,
    state: SessionState,
    model: Option<String>,
    serial: Option<String>,
    mac: Option<String>,
    firmware: Option<String>,
}

impl Brother<SnmpTransport> {
    /// Client talking SNMP to `config.host`. No traffic happens until the first call.
    pub fn new(config: Config) -> Result<Self, BrotherError> {
        let transport = SnmpTransport::new(&config);
        Self::with_transport(config, transport)
    }

    /// Construct and initialise in one step.
    pub async fn create(config: Config) -> Result<Self, BrotherError> {
        let mut brother = Self::new(config)?;
        brother.initialize().await?;
        Ok(brother)
    }
}

impl<T: Transport> Brother<T> {
    pub fn with_transport(config: Config, transport: T) -> Result<Self, BrotherError> {
        if let Some(model) = &config.model {
            debug!(%model, "Model hint");
            check_supported(model)?;
        }
        debug!(host = %config.host, printer_type = %config.printer_type, "Using host");

        Ok(Self {
            config,
            transport,
            state: SessionState::default(),
            model: None,
            serial: None,
            mac: None,
            firmware: None,
        })
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    pub fn printer_type(&self) -> PrinterType {
        self.config.printer_type
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn serial(&self) -> Option<&str> {
        self.serial.as_deref()
    }

    pub fn mac(&self) -> Option<&str> {
        self.mac.as_deref()
    }

    pub fn firmware(&self) -> Option<&str> {
        self.firmware.as_deref()
    }

    /// Negotiated field set; empty before initialisation.
    pub fn fields(&self) -> &[Field] {
        self.state.fields.as_deref().unwrap_or_default()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.fields.is_some()
    }

    pub fn generation(&self) -> Option<Generation> {
        self.state.generation
    }

    pub fn supports_counters(&self) -> bool {
        self.state.counters
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Negotiate the full field catalogue with the printer.
    pub async fn initialize(&mut self) -> Result<&[Field], BrotherError> {
        self.negotiate(&Field::ALL).await
    }

    /// Find the subset of `candidates` the printer answers.
    ///
    /// Every rejected optional field is dropped and the request retried; a
    /// rejected model or serial means the printer is not supported. Transport
    /// errors end negotiation immediately.
    pub async fn negotiate(&mut self, candidates: &[Field]) -> Result<&[Field], BrotherError> {
        let mut fields = candidates.to_vec();
        loop {
            let oids: Vec<&'static str> = fields.iter().map(|field| field.oid()).collect();
            match self.transport.fetch(&oids).await? {
                FetchResponse::Values(_) => break,
                FetchResponse::Rejected { index } => {
                    let Some(&field) = fields.get(index) else {
                        return Err(no_such_name(index));
                    };
                    if field.is_mandatory() {
                        warn!(host = %self.config.host, %field, "Printer rejected a mandatory field");
                        return Err(BrotherError::unsupported_model());
                    }
                    debug!("The printer {} doesn't send '{}'", self.config.host, field);
                    fields.remove(index);
                }
            }
        }

        self.state.counters = fields.contains(&Field::Counters);
        info!(
            host = %self.config.host,
            fields = fields.len(),
            counters = self.state.counters,
            "Printer initialized"
        );
        self.state.fields = Some(fields);
        Ok(self.fields())
    }

    /// Poll the printer once.
    pub async fn update(&mut self) -> Result<SensorRecord, BrotherError> {
        if !self.is_initialized() {
            self.initialize().await?;
        }

        let oids: Vec<&'static str> = self.fields().iter().map(|field| field.oid()).collect();
        let raw = match self.transport.fetch(&oids).await? {
            FetchResponse::Values(raw) => raw,
            FetchResponse::Rejected { index } => return Err(no_such_name(index)),
        };
        if raw.is_empty() {
            return Err(BrotherError::snmp("The printer did not return data"));
        }
        debug!(?raw, "RAW data");

        self.update_from(&raw, Utc::now())
    }

    /// Turn one fetch result into a sensor record.
    ///
    /// `now` anchors the boot-time computation.
    pub fn update_from(&mut self, raw: &RawData, now: DateTime<Utc>) -> Result<SensorRecord, BrotherError> {
        let get = |field: Field| raw.get(field.oid());

        let model = get(Field::Model)
            .and_then(SnmpValue::to_text)
            .and_then(|text| extract_model(&text))
            .ok_or_else(BrotherError::unsupported_model)?;
        check_supported(&model)?;
        let serial = get(Field::Serial)
            .and_then(SnmpValue::to_text)
            .ok_or_else(BrotherError::unsupported_model)?;
        let mac = get(Field::Mac).and_then(SnmpValue::as_bytes).map(format_mac);
        if mac.is_none() && self.fields().contains(&Field::Mac) {
            return Err(BrotherError::unsupported_model());
        }
        let firmware = get(Field::Firmware).and_then(SnmpValue::to_text);

        let charset = Charset::from_mib_enum(get(Field::Charset).and_then(SnmpValue::as_u64));
        let status = get(Field::Status)
            .and_then(SnmpValue::as_bytes)
            .and_then(|bytes| decode_status(bytes, charset));
        if status.is_none() && get(Field::Status).is_some() {
            debug!("Incomplete data from printer");
        }

        let ticks = get(Field::Uptime).and_then(SnmpValue::as_u64);
        let uptime = ticks.and_then(|ticks| self.state.uptime.observe(ticks, now));
        if let (Some(ticks), None) = (ticks, uptime) {
            debug!(ticks, "Uptime out of range");
        }

        let maintenance = get(Field::Maintenance)
            .and_then(SnmpValue::as_bytes)
            .map(to_hex_without_checksum);
        if self.state.generation.is_none() {
            if let Some(hex) = maintenance.as_deref().filter(|hex| !hex.is_empty()) {
                let generation = Generation::detect(hex);
                info!(host = %self.config.host, %generation, "Detected record layout");
                self.state.generation = Some(generation);
            }
        }
        let generation = self.state.generation.unwrap_or(Generation::Current);
        let width = generation.record_width();
        let records = |field: Field| -> Vec<String> {
            if !field.carries_records() {
                return Vec::new();
            }
            let hex = match field {
                Field::Maintenance => maintenance.clone(),
                _ => get(field).and_then(SnmpValue::as_bytes).map(to_hex_without_checksum),
            };
            hex.map(|hex| split_records(&hex, width)).unwrap_or_default()
        };

        let maintenance_map = match self.config.printer_type {
            PrinterType::Laser => LASER_MAINTENANCE,
            PrinterType::Ink => INK_MAINTENANCE,
        };
        let mut builder = SensorRecord::builder()
            .model(model.clone())
            .serial(serial.clone())
            .mac(mac.clone())
            .firmware(firmware.clone())
            .status(status)
            .uptime(uptime);

        match generation {
            Generation::Legacy => {
                builder = builder.readings(decode_records_legacy(&records(Field::Maintenance), maintenance_map)?);
            }
            Generation::Current => {
                if self.state.counters {
                    builder = builder.readings(decode_records(&records(Field::Counters), COUNTERS, PERCENT_SENSORS));
                }
                builder = builder.readings(decode_records(
                    &records(Field::Maintenance),
                    maintenance_map,
                    PERCENT_SENSORS,
                ));
                if self.config.printer_type == PrinterType::Laser {
                    builder =
                        builder.readings(decode_records(&records(Field::NextCare), LASER_NEXTCARE, PERCENT_SENSORS));
                }
            }
        }

        // page counter for old printer models
        if !builder.has_reading(Sensor::PageCounter) {
            if let Some(pages) = get(Field::PageCount)
                .and_then(SnmpValue::to_text)
                .and_then(|text| text.trim().parse::<u32>().ok())
            {
                builder = builder.reading(Sensor::PageCounter, pages);
            }
        }

        let record = builder.build()?;
        debug!(%record, "Data");

        self.model = Some(model);
        self.serial = Some(serial);
        self.mac = mac;
        self.firmware = firmware;
        Ok(record)
    }

    /// Release the transport. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.transport.close();
    }
}

fn check_supported(model: &str) -> Result<(), BrotherError> {
    let model = model.to_lowercase();
    if UNSUPPORTED_MODELS.iter().any(|unsupported| model.contains(unsupported)) {
        return Err(BrotherError::unsupported_model());
    }
    Ok(())
}

fn no_such_name(index: usize) -> BrotherError {
    BrotherError::Snmp {
        status: "noSuchName".to_string(),
        index: Some(u32::try_from(index + 1).unwrap_or(u32::MAX)),
    }
}

/// Model token from a `MDL:` device id string.
pub fn extract_model(device_id: &str) -> Option<String> {
    let pattern = MODEL_PATTERN.as_ref().ok()?;
    pattern
        .captures(device_id)
        .and_then(|captures| captures.name("model"))
        .map(|model| model.as_str().to_string())
}

/// Colon separated lowercase hex, `00:1b:8c:12:34:56`.
pub fn format_mac(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}
