//! Minimal SNMPv1 message codec.
//!
//! Only what a GET exchange needs: `GetRequest` encoding and `GetResponse`
//! decoding over BER, with the SMIv2 application types a printer may answer with.

use crate::error::BrotherError;
use crate::transport::{FetchResponse, RawData};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};
use strum_macros::Display;

/// SNMP version field value for SNMPv1.
pub const SNMP_VERSION_1: i64 = 0;

/// BER identifiers used in SNMP messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Tag {
    Integer = 0x02,
    OctetString = 0x04,
    Null = 0x05,
    ObjectIdentifier = 0x06,
    Sequence = 0x30,
    IpAddress = 0x40,
    Counter32 = 0x41,
    Gauge32 = 0x42,
    TimeTicks = 0x43,
    Opaque = 0x44,
    Counter64 = 0x46,
    NoSuchObject = 0x80,
    NoSuchInstance = 0x81,
    EndOfMibView = 0x82,
    GetRequest = 0xa0,
    GetResponse = 0xa2,
}

/// PDU error status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, IntoPrimitive, Display)]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum ErrorStatus {
    NoError = 0,
    TooBig = 1,
    NoSuchName = 2,
    BadValue = 3,
    ReadOnly = 4,
    GenErr = 5,

    #[num_enum(catch_all)]
    #[strum(to_string = "unknownError")]
    Unknown(u8),
}

/// A decoded variable binding value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnmpValue {
    Integer(i64),
    OctetString(Bytes),
    Null,
    ObjectIdentifier(String),
    IpAddress([u8; 4]),
    Counter32(u32),
    Gauge32(u32),
    TimeTicks(u32),
    Opaque(Bytes),
    Counter64(u64),
    NoSuchObject,
    NoSuchInstance,
    EndOfMibView,
}

impl SnmpValue {
    /// Raw payload of string-like values.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            SnmpValue::OctetString(bytes) | SnmpValue::Opaque(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Non-negative numeric value.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            SnmpValue::Integer(value) => u64::try_from(value).ok(),
            SnmpValue::Counter32(value) | SnmpValue::Gauge32(value) | SnmpValue::TimeTicks(value) => {
                Some(u64::from(value))
            }
            SnmpValue::Counter64(value) => Some(value),
            _ => None,
        }
    }

    /// Printable form: strings lossily as UTF-8, numbers in decimal.
    pub fn to_text(&self) -> Option<String> {
        match self {
            SnmpValue::OctetString(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            SnmpValue::ObjectIdentifier(oid) => Some(oid.clone()),
            SnmpValue::Integer(value) => Some(value.to_string()),
            value => value.as_u64().map(|v| v.to_string()),
        }
    }

    /// `noSuchObject`, `noSuchInstance` or `endOfMibView`.
    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            SnmpValue::NoSuchObject | SnmpValue::NoSuchInstance | SnmpValue::EndOfMibView
        )
    }

    fn decode(tag: u8, content: Bytes) -> Result<Self, BrotherError> {
        let tag = Tag::try_from(tag).map_err(|_| malformed(format!("unexpected value tag 0x{tag:02x}")))?;
        let value = match tag {
            Tag::Integer => SnmpValue::Integer(decode_integer(&content)?),
            Tag::OctetString => SnmpValue::OctetString(content),
            Tag::Null => SnmpValue::Null,
            Tag::ObjectIdentifier => SnmpValue::ObjectIdentifier(decode_oid(&content)?),
            Tag::IpAddress => SnmpValue::IpAddress(
                content
                    .as_ref()
                    .try_into()
                    .map_err(|_| malformed("IpAddress must be 4 bytes"))?,
            ),
            Tag::Counter32 => SnmpValue::Counter32(decode_u32(&content)?),
            Tag::Gauge32 => SnmpValue::Gauge32(decode_u32(&content)?),
            Tag::TimeTicks => SnmpValue::TimeTicks(decode_u32(&content)?),
            Tag::Opaque => SnmpValue::Opaque(content),
            Tag::Counter64 => SnmpValue::Counter64(decode_unsigned(&content)?),
            Tag::NoSuchObject => SnmpValue::NoSuchObject,
            Tag::NoSuchInstance => SnmpValue::NoSuchInstance,
            Tag::EndOfMibView => SnmpValue::EndOfMibView,
            Tag::Sequence | Tag::GetRequest | Tag::GetResponse => {
                return Err(malformed(format!("{tag:?} is not a value")));
            }
        };
        Ok(value)
    }

    fn encode(&self, buf: &mut BytesMut) -> Result<(), BrotherError> {
        match self {
            SnmpValue::Integer(value) => put_tlv(buf, Tag::Integer, &encode_integer(*value)),
            SnmpValue::OctetString(bytes) => put_tlv(buf, Tag::OctetString, bytes),
            SnmpValue::Null => put_tlv(buf, Tag::Null, &[]),
            SnmpValue::ObjectIdentifier(oid) => put_tlv(buf, Tag::ObjectIdentifier, &encode_oid(oid)?),
            SnmpValue::IpAddress(octets) => put_tlv(buf, Tag::IpAddress, octets),
            SnmpValue::Counter32(value) => put_tlv(buf, Tag::Counter32, &encode_unsigned((*value).into())),
            SnmpValue::Gauge32(value) => put_tlv(buf, Tag::Gauge32, &encode_unsigned((*value).into())),
            SnmpValue::TimeTicks(value) => put_tlv(buf, Tag::TimeTicks, &encode_unsigned((*value).into())),
            SnmpValue::Opaque(bytes) => put_tlv(buf, Tag::Opaque, bytes),
            SnmpValue::Counter64(value) => put_tlv(buf, Tag::Counter64, &encode_unsigned(*value)),
            SnmpValue::NoSuchObject => put_tlv(buf, Tag::NoSuchObject, &[]),
            SnmpValue::NoSuchInstance => put_tlv(buf, Tag::NoSuchInstance, &[]),
            SnmpValue::EndOfMibView => put_tlv(buf, Tag::EndOfMibView, &[]),
        }
        Ok(())
    }
}

/// A decoded `GetResponse` PDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetResponse {
    pub request_id: i32,
    pub error_status: ErrorStatus,
    /// 1-based position of the offending varbind, 0 when not applicable.
    pub error_index: u32,
    pub varbinds: Vec<(String, SnmpValue)>,
}

impl GetResponse {
    /// Interpret the response to a request for `requested` OIDs.
    ///
    /// `noSuchName` pointing at one of the requested OIDs becomes a rejection;
    /// any other error status is an SNMP error. Exception values are dropped.
    pub fn into_fetch_response(self, requested: usize) -> Result<FetchResponse, BrotherError> {
        let index = usize::try_from(self.error_index).unwrap_or(usize::MAX);
        match self.error_status {
            ErrorStatus::NoError => {
                let values: RawData = self
                    .varbinds
                    .into_iter()
                    .filter(|(_, value)| !value.is_exception())
                    .collect();
                Ok(FetchResponse::Values(values))
            }
            ErrorStatus::NoSuchName if (1..=requested).contains(&index) => {
                Ok(FetchResponse::Rejected { index: index - 1 })
            }
            status => Err(BrotherError::Snmp {
                status: status.to_string(),
                index: Some(self.error_index),
            }),
        }
    }
}

/// Encode an SNMPv1 `GetRequest` asking for `oids`.
pub fn encode_get_request(community: &str, request_id: i32, oids: &[&str]) -> Result<Bytes, BrotherError> {
    let mut varbinds = BytesMut::new();
    for oid in oids {
        let mut varbind = BytesMut::new();
        put_tlv(&mut varbind, Tag::ObjectIdentifier, &encode_oid(oid)?);
        put_tlv(&mut varbind, Tag::Null, &[]);
        put_tlv(&mut varbinds, Tag::Sequence, &varbind);
    }
    Ok(encode_message(community, Tag::GetRequest, request_id, ErrorStatus::NoError, 0, &varbinds))
}

/// Encode an SNMPv1 `GetResponse`. Used to stand in for an agent.
pub fn encode_get_response(community: &str, response: &GetResponse) -> Result<Bytes, BrotherError> {
    let mut varbinds = BytesMut::new();
    for (oid, value) in &response.varbinds {
        let mut varbind = BytesMut::new();
        put_tlv(&mut varbind, Tag::ObjectIdentifier, &encode_oid(oid)?);
        value.encode(&mut varbind)?;
        put_tlv(&mut varbinds, Tag::Sequence, &varbind);
    }
    Ok(encode_message(
        community,
        Tag::GetResponse,
        response.request_id,
        response.error_status,
        response.error_index,
        &varbinds,
    ))
}

fn encode_message(
    community: &str,
    pdu_type: Tag,
    request_id: i32,
    error_status: ErrorStatus,
    error_index: u32,
    varbinds: &[u8],
) -> Bytes {
    let mut pdu = BytesMut::new();
    put_tlv(&mut pdu, Tag::Integer, &encode_integer(request_id.into()));
    put_tlv(&mut pdu, Tag::Integer, &encode_integer(u8::from(error_status).into()));
    put_tlv(&mut pdu, Tag::Integer, &encode_integer(error_index.into()));
    put_tlv(&mut pdu, Tag::Sequence, varbinds);

    let mut message = BytesMut::new();
    put_tlv(&mut message, Tag::Integer, &encode_integer(SNMP_VERSION_1));
    put_tlv(&mut message, Tag::OctetString, community.as_bytes());
    put_tlv(&mut message, pdu_type, &pdu);

    let mut out = BytesMut::with_capacity(message.len() + 4);
    put_tlv(&mut out, Tag::Sequence, &message);
    out.freeze()
}

/// Decode an SNMPv1 `GetResponse` datagram.
pub fn decode_get_response(data: Bytes) -> Result<GetResponse, BrotherError> {
    decode_message(data, Tag::GetResponse)
}

/// Decode an SNMPv1 `GetRequest`, returning its request id and OIDs.
pub fn decode_get_request(data: Bytes) -> Result<(i32, Vec<String>), BrotherError> {
    let request = decode_message(data, Tag::GetRequest)?;
    let oids = request.varbinds.into_iter().map(|(oid, _)| oid).collect();
    Ok((request.request_id, oids))
}

fn decode_message(mut data: Bytes, pdu_type: Tag) -> Result<GetResponse, BrotherError> {
    let mut message = expect(&mut data, Tag::Sequence)?;
    let version = decode_integer(&expect(&mut message, Tag::Integer)?)?;
    if version != SNMP_VERSION_1 {
        return Err(malformed(format!("unsupported SNMP version {version}")));
    }
    let _community = expect(&mut message, Tag::OctetString)?;
    let mut pdu = expect(&mut message, pdu_type)?;

    let request_id = decode_integer(&expect(&mut pdu, Tag::Integer)?)?;
    let request_id = i32::try_from(request_id).map_err(|_| malformed("request id out of range"))?;
    let error_status = decode_integer(&expect(&mut pdu, Tag::Integer)?)?;
    let error_status = ErrorStatus::from(u8::try_from(error_status).unwrap_or(u8::MAX));
    let error_index = decode_integer(&expect(&mut pdu, Tag::Integer)?)?;
    let error_index = u32::try_from(error_index).map_err(|_| malformed("negative error index"))?;

    let mut list = expect(&mut pdu, Tag::Sequence)?;
    let mut varbinds = Vec::new();
    while list.has_remaining() {
        let mut varbind = expect(&mut list, Tag::Sequence)?;
        let oid = decode_oid(&expect(&mut varbind, Tag::ObjectIdentifier)?)?;
        let (tag, content) = read_tlv(&mut varbind)?;
        varbinds.push((oid, SnmpValue::decode(tag, content)?));
    }

    Ok(GetResponse {
        request_id,
        error_status,
        error_index,
        varbinds,
    })
}

fn malformed(reason: impl Into<String>) -> BrotherError {
    BrotherError::MalformedResponse(reason.into())
}

fn put_length(buf: &mut BytesMut, len: usize) {
    if len < 0x80 {
        buf.put_u8(len as u8);
        return;
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    buf.put_u8(0x80 | (bytes.len() - skip) as u8);
    buf.put_slice(&bytes[skip..]);
}

fn put_tlv(buf: &mut BytesMut, tag: Tag, content: &[u8]) {
    buf.put_u8(tag.into());
    put_length(buf, content.len());
    buf.put_slice(content);
}

fn read_length(buf: &mut Bytes) -> Result<usize, BrotherError> {
    if !buf.has_remaining() {
        return Err(malformed("truncated length"));
    }
    let first = buf.get_u8();
    if first < 0x80 {
        return Ok(usize::from(first));
    }
    let count = usize::from(first & 0x7f);
    if count == 0 || count > 4 {
        return Err(malformed(format!("unsupported length form 0x{first:02x}")));
    }
    if buf.remaining() < count {
        return Err(malformed("truncated length"));
    }
    Ok(buf.copy_to_bytes(count).iter().fold(0usize, |acc, &b| (acc << 8) | usize::from(b)))
}

/// Split one TLV off the front of `buf`.
fn read_tlv(buf: &mut Bytes) -> Result<(u8, Bytes), BrotherError> {
    if !buf.has_remaining() {
        return Err(malformed("unexpected end of data"));
    }
    let tag = buf.get_u8();
    let len = read_length(buf)?;
    if buf.remaining() < len {
        return Err(malformed(format!(
            "tag 0x{tag:02x} claims {len} bytes, {} left",
            buf.remaining()
        )));
    }
    Ok((tag, buf.split_to(len)))
}

fn expect(buf: &mut Bytes, expected: Tag) -> Result<Bytes, BrotherError> {
    let (tag, content) = read_tlv(buf)?;
    if tag != u8::from(expected) {
        return Err(malformed(format!("expected {expected:?}, found tag 0x{tag:02x}")));
    }
    Ok(content)
}

/// Minimal two's-complement encoding.
fn encode_integer(value: i64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xff && bytes[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

fn encode_unsigned(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count().min(bytes.len() - 1);
    let mut out = Vec::with_capacity(9);
    if bytes[skip] & 0x80 != 0 {
        out.push(0);
    }
    out.extend_from_slice(&bytes[skip..]);
    out
}

fn decode_integer(content: &[u8]) -> Result<i64, BrotherError> {
    if content.is_empty() || content.len() > 8 {
        return Err(malformed(format!("integer of {} bytes", content.len())));
    }
    let seed: i64 = if content[0] & 0x80 != 0 { -1 } else { 0 };
    Ok(content.iter().fold(seed, |acc, &b| (acc << 8) | i64::from(b)))
}

fn decode_unsigned(content: &[u8]) -> Result<u64, BrotherError> {
    let digits = match content {
        [0, rest @ ..] => rest,
        _ => content,
    };
    if content.is_empty() || digits.len() > 8 {
        return Err(malformed(format!("unsigned integer of {} bytes", content.len())));
    }
    Ok(digits.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

fn decode_u32(content: &[u8]) -> Result<u32, BrotherError> {
    u32::try_from(decode_unsigned(content)?).map_err(|_| malformed("32-bit value out of range"))
}

/// BER content octets for a dotted OID.
pub fn encode_oid(oid: &str) -> Result<Vec<u8>, BrotherError> {
    let invalid = || BrotherError::InvalidOid(oid.to_string());
    let arcs = oid
        .trim_start_matches('.')
        .split('.')
        .map(str::parse::<u32>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    let (first, second, rest) = match arcs.as_slice() {
        [first, second, rest @ ..] => (*first, *second, rest),
        _ => return Err(invalid()),
    };
    if first > 2 || (first < 2 && second >= 40) {
        return Err(invalid());
    }
    let head = (first * 40).checked_add(second).ok_or_else(invalid)?;

    let mut out = Vec::with_capacity(arcs.len() + 4);
    push_base128(&mut out, head);
    for &arc in rest {
        push_base128(&mut out, arc);
    }
    Ok(out)
}

fn push_base128(out: &mut Vec<u8>, value: u32) {
    let mut groups = [0u8; 5];
    let mut start = groups.len();
    let mut rest = value;
    loop {
        start -= 1;
        groups[start] = (rest & 0x7f) as u8;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    let last = groups.len() - 1;
    out.extend((start..groups.len()).map(|i| if i == last { groups[i] } else { groups[i] | 0x80 }));
}

/// Dotted form of BER OID content octets.
pub fn decode_oid(content: &[u8]) -> Result<String, BrotherError> {
    if content.is_empty() || content[content.len() - 1] & 0x80 != 0 {
        return Err(malformed("truncated object identifier"));
    }
    let mut arcs: Vec<u64> = Vec::with_capacity(content.len() + 1);
    let mut value: u64 = 0;
    for &byte in content {
        value = (value << 7) | u64::from(byte & 0x7f);
        if value > u64::from(u32::MAX) + 80 {
            return Err(malformed("object identifier arc out of range"));
        }
        if byte & 0x80 == 0 {
            if arcs.is_empty() {
                let first = (value / 40).min(2);
                arcs.push(first);
                arcs.push(value - first * 40);
            } else {
                arcs.push(value);
            }
            value = 0;
        }
    }
    Ok(arcs.iter().map(u64::to_string).collect::<Vec<_>>().join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_to_bytes(hex_data: &str) -> Bytes {
        Bytes::from(hex::decode(hex_data).unwrap())
    }

    #[test]
    fn test_encode_get_request() {
        let request = encode_get_request("public", 1, &["1.3.6.1.2.1.1.3.0"]).unwrap();
        assert_eq!(
            hex::encode(&request),
            "302602010004067075626c6963a01902010102010002010030\
             0e300c06082b060102010103000500"
        );
    }

    #[test]
    fn test_encode_oid() {
        assert_eq!(hex::encode(encode_oid("1.3.6.1.2.1.1.3.0").unwrap()), "2b06010201010300");
        // 2435 needs two base-128 groups
        assert_eq!(hex::encode(encode_oid("1.3.6.1.4.1.2435").unwrap()), "2b060104019303");
        assert_eq!(hex::encode(encode_oid(".1.3.6").unwrap()), "2b06");
    }

    #[test]
    fn test_invalid_oids_rejected() {
        for oid in ["", "1", "1.3.x", "3.1", "1.40", "1..3"] {
            assert!(matches!(encode_oid(oid), Err(BrotherError::InvalidOid(_))), "{oid}");
        }
    }

    #[test]
    fn test_oid_round_trip_through_ber() {
        for oid in [
            "1.3.6.1.4.1.2435.2.3.9.4.2.1.5.5.8.0",
            "1.3.6.1.2.1.43.7.1.1.4.1.1",
            "2.999.3",
            "0.39",
        ] {
            assert_eq!(decode_oid(&encode_oid(oid).unwrap()).unwrap(), oid);
        }
    }

    #[test]
    fn test_integer_encoding_is_minimal() {
        assert_eq!(encode_integer(0), vec![0x00]);
        assert_eq!(encode_integer(127), vec![0x7f]);
        assert_eq!(encode_integer(128), vec![0x00, 0x80]);
        assert_eq!(encode_integer(256), vec![0x01, 0x00]);
        assert_eq!(encode_integer(-1), vec![0xff]);
        assert_eq!(encode_integer(-129), vec![0xff, 0x7f]);
        for value in [0, 1, -1, 127, 128, -128, -129, 65_535, i64::from(i32::MAX), i64::MIN] {
            assert_eq!(decode_integer(&encode_integer(value)).unwrap(), value);
        }
    }

    #[test]
    fn test_unsigned_encoding_keeps_sign_bit_clear() {
        assert_eq!(encode_unsigned(0), vec![0x00]);
        assert_eq!(encode_unsigned(0x80), vec![0x00, 0x80]);
        assert_eq!(encode_unsigned(u64::MAX).len(), 9);
        assert_eq!(decode_unsigned(&encode_unsigned(u64::MAX)).unwrap(), u64::MAX);
        assert_eq!(decode_u32(&[0x00, 0xff, 0xff, 0xff, 0xff]).unwrap(), u32::MAX);
        assert!(decode_u32(&[0x01, 0x00, 0x00, 0x00, 0x00]).is_err());
    }

    #[test]
    fn test_long_form_length() {
        let mut buf = BytesMut::new();
        put_length(&mut buf, 0x7f);
        put_length(&mut buf, 0x80);
        put_length(&mut buf, 0x1234);
        assert_eq!(hex::encode(&buf), "7f8180821234");

        let mut data = buf.freeze();
        assert_eq!(read_length(&mut data).unwrap(), 0x7f);
        assert_eq!(read_length(&mut data).unwrap(), 0x80);
        assert_eq!(read_length(&mut data).unwrap(), 0x1234);
    }

    #[test]
    fn test_decode_get_response() {
        let response = GetResponse {
            request_id: 0x1234,
            error_status: ErrorStatus::NoError,
            error_index: 0,
            varbinds: vec![
                ("1.3.6.1.2.1.1.3.0".to_string(), SnmpValue::TimeTicks(360_000)),
                (
                    "1.3.6.1.4.1.2435.2.3.9.4.2.1.5.5.1.0".to_string(),
                    SnmpValue::OctetString(Bytes::from_static(b"serial_number")),
                ),
                ("1.3.6.1.2.1.43.7.1.1.4.1.1".to_string(), SnmpValue::Integer(106)),
                ("1.3.6.1.2.1.43.10.2.1.4.1.1".to_string(), SnmpValue::Counter32(500)),
            ],
        };
        let encoded = encode_get_response("public", &response).unwrap();
        assert_eq!(decode_get_response(encoded).unwrap(), response);
    }

    #[test]
    fn test_decode_get_request() {
        let oids = ["1.3.6.1.2.1.1.3.0", "1.3.6.1.4.1.2435.2.3.9.1.1.7.0"];
        let request = encode_get_request("public", 42, &oids).unwrap();
        let (id, decoded) = decode_get_request(request).unwrap();
        assert_eq!(id, 42);
        assert_eq!(decoded, oids);
    }

    #[test]
    fn test_decode_rejects_request_pdu() {
        let request = encode_get_request("public", 7, &["1.3.6.1.2.1.1.3.0"]).unwrap();
        assert!(matches!(
            decode_get_response(request),
            Err(BrotherError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_decode_truncated_datagram() {
        let response = GetResponse {
            request_id: 1,
            error_status: ErrorStatus::NoError,
            error_index: 0,
            varbinds: vec![("1.3.6.1.2.1.1.3.0".to_string(), SnmpValue::TimeTicks(1))],
        };
        let encoded = encode_get_response("public", &response).unwrap();
        for cut in [0, 1, 5, encoded.len() - 1] {
            let result = decode_get_response(encoded.slice(..cut));
            assert!(matches!(result, Err(BrotherError::MalformedResponse(_))), "cut at {cut}");
        }
        assert!(decode_get_response(hex_to_bytes("3003020101")).is_err());
    }

    #[test]
    fn test_no_such_name_becomes_rejection() {
        let response = GetResponse {
            request_id: 1,
            error_status: ErrorStatus::NoSuchName,
            error_index: 3,
            varbinds: vec![],
        };
        assert_eq!(
            response.into_fetch_response(3).unwrap(),
            FetchResponse::Rejected { index: 2 }
        );
    }

    #[test]
    fn test_error_status_becomes_snmp_error() {
        let out_of_range = GetResponse {
            request_id: 1,
            error_status: ErrorStatus::NoSuchName,
            error_index: 4,
            varbinds: vec![],
        };
        let err = out_of_range.into_fetch_response(3).unwrap_err();
        assert_eq!(err.to_string(), "SNMP error: noSuchName, 4");

        let gen_err = GetResponse {
            request_id: 1,
            error_status: ErrorStatus::GenErr,
            error_index: 0,
            varbinds: vec![],
        };
        assert!(matches!(
            gen_err.into_fetch_response(3),
            Err(BrotherError::Snmp { status, index: Some(0) }) if status == "genErr"
        ));
    }

    #[test]
    fn test_exception_values_are_dropped() {
        let response = GetResponse {
            request_id: 1,
            error_status: ErrorStatus::NoError,
            error_index: 0,
            varbinds: vec![
                ("1.3.6.1.2.1.1.3.0".to_string(), SnmpValue::TimeTicks(1)),
                ("1.3.6.1.2.1.2.2.1.6.1".to_string(), SnmpValue::NoSuchInstance),
            ],
        };
        let FetchResponse::Values(values) = response.into_fetch_response(2).unwrap() else {
            panic!("expected values");
        };
        assert_eq!(values.len(), 1);
        assert_eq!(values["1.3.6.1.2.1.1.3.0"], SnmpValue::TimeTicks(1));
    }

    #[test]
    fn test_value_accessors() {
        let text = SnmpValue::OctetString(Bytes::from_static(b"1.04"));
        assert_eq!(text.as_bytes(), Some(&b"1.04"[..]));
        assert_eq!(text.to_text().as_deref(), Some("1.04"));
        assert_eq!(SnmpValue::Integer(-3).as_u64(), None);
        assert_eq!(SnmpValue::Integer(-3).to_text().as_deref(), Some("-3"));
        assert_eq!(SnmpValue::Counter32(500).to_text().as_deref(), Some("500"));
        assert_eq!(SnmpValue::Null.to_text(), None);
        assert_eq!(ErrorStatus::from(2), ErrorStatus::NoSuchName);
        assert_eq!(ErrorStatus::from(42), ErrorStatus::Unknown(42));
        assert_eq!(ErrorStatus::TooBig.to_string(), "tooBig");
    }
}
