//! Decoder for the two on-disk LUT variants.
//!
//! Format 1.x: signature line, optional info line, little-endian entry count,
//! Adler-32 application checksum, then a delta stream interleaving one method
//! byte per entry.
//!
//! Format 2.0: signature line, free-form info lines up to a `DATA` line, a
//! slot directory, and zlib-compressed blocks. Block type 1 carries the delta
//! stream of main-office routing numbers (prefixed by their count), block
//! type 2 the parallel array of method ids.

use ahash::AHashMap;
use flate2::read::ZlibDecoder;
use std::io::Read;

use crate::error::LutError;

const SIG_V1: &[u8; 28] = b"BLZ Lookup Table/Format 1.x\n";
const SIG_V2: &[u8; 28] = b"BLZ Lookup Table/Format 2.0\n";

/// Decoded mapping from 8-digit routing-number strings to method ids.
pub(crate) struct LutData {
    banks: AHashMap<String, u8>,
}

impl LutData {
    pub(crate) fn get(&self, blz: &str) -> Option<u8> {
        self.banks.get(blz).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.banks.len()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Dialect {
    V1,
    V2,
}

struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn at(buf: &'a [u8], offset: usize, what: &'static str) -> Result<Self, LutError> {
        if offset > buf.len() {
            return Err(LutError::Truncated(what));
        }
        Ok(Self { buf, pos: offset })
    }

    fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn skip(&mut self, n: usize) {
        self.pos += n;
    }

    fn take(&mut self, n: usize, what: &'static str) -> Result<&'a [u8], LutError> {
        if self.buf.len() - self.pos < n {
            return Err(LutError::Truncated(what));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self, what: &'static str) -> Result<u8, LutError> {
        Ok(self.take(1, what)?[0])
    }

    fn u16_le(&mut self, what: &'static str) -> Result<u16, LutError> {
        let b = self.take(2, what)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32_le(&mut self, what: &'static str) -> Result<u32, LutError> {
        let b = self.take(4, what)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Bytes up to the next newline, consuming the newline as well.
    fn line(&mut self, what: &'static str) -> Result<&'a [u8], LutError> {
        let rem = self.remaining();
        match rem.iter().position(|&b| b == b'\n') {
            Some(nl) => {
                self.pos += nl + 1;
                Ok(&rem[..nl])
            }
            None => Err(LutError::Truncated(what)),
        }
    }
}

/// Sniffs the signature on the first 28 bytes and dispatches to the matching
/// format decoder.
pub(crate) fn parse(bytes: &[u8]) -> Result<LutData, LutError> {
    if bytes.len() >= SIG_V1.len() {
        if &bytes[..SIG_V1.len()] == SIG_V1 {
            return parse_v1(bytes);
        }
        if &bytes[..SIG_V2.len()] == SIG_V2 {
            return parse_v2(bytes);
        }
    }
    Err(LutError::InvalidSignature)
}

fn parse_v1(bytes: &[u8]) -> Result<LutData, LutError> {
    let mut r = ByteReader::new(bytes);
    r.skip(SIG_V1.len());
    skip_info_line(&mut r);

    let count = r.u32_le("entry count")?;
    let stored = r.u32_le("checksum")?;
    let payload = r.remaining();
    let computed = adler2::adler32_slice(payload) ^ count;
    if stored != computed {
        return Err(LutError::ChecksumMismatch { stored, computed });
    }

    // Each entry consumes at least an opcode byte and a method byte.
    let count = count as usize;
    if count > payload.len() / 2 {
        return Err(LutError::Truncated("entry stream"));
    }

    let mut banks = AHashMap::with_capacity(count);
    let mut running: u32 = 0;
    for _ in 0..count {
        let produced = delta_step(&mut r, &mut running, Dialect::V1)?;
        let method = r.u8("method id")?;
        if produced {
            banks.entry(format!("{:08}", running)).or_insert(method);
        }
    }
    Ok(LutData { banks })
}

/// An info line is recognized as printable ASCII terminated by a newline
/// within 64 bytes of the header; anything else means the count field starts
/// immediately.
fn skip_info_line(r: &mut ByteReader<'_>) {
    let rem = r.remaining();
    let window = &rem[..rem.len().min(64)];
    if let Some(nl) = window.iter().position(|&b| b == b'\n') {
        if window[..nl].iter().all(|&b| (0x20..=0x7e).contains(&b)) {
            r.skip(nl + 1);
        }
    }
}

fn parse_v2(bytes: &[u8]) -> Result<LutData, LutError> {
    let mut r = ByteReader::new(bytes);
    r.skip(SIG_V2.len());
    loop {
        if r.line("data terminator")? == b"DATA" {
            break;
        }
    }

    let slots = r.u16_le("slot count")?;
    let mut blz_slot: Option<u32> = None;
    let mut method_slot: Option<u32> = None;
    for _ in 0..slots {
        let slot_type = r.u32_le("slot type")?;
        let offset = r.u32_le("slot offset")?;
        let _size = r.u32_le("slot size")?;
        // Type 0 is an empty slot; the first block of each type wins.
        match slot_type {
            1 if blz_slot.is_none() => blz_slot = Some(offset),
            2 if method_slot.is_none() => method_slot = Some(offset),
            _ => {}
        }
    }
    let blz_offset = blz_slot.ok_or(LutError::Malformed("no blz block in directory"))?;
    let method_offset = method_slot.ok_or(LutError::Malformed("no method block in directory"))?;

    let blz_raw = read_block(bytes, blz_offset, 1)?;
    let methods = read_block(bytes, method_offset, 2)?;

    if blz_raw.len() < 4 {
        return Err(LutError::Truncated("main-office count"));
    }
    let main = u32::from_le_bytes([blz_raw[0], blz_raw[1], blz_raw[2], blz_raw[3]]) as usize;
    // Each delta step consumes at least one byte.
    if main > blz_raw.len() - 4 {
        return Err(LutError::Truncated("blz delta stream"));
    }

    let mut r = ByteReader::new(&blz_raw[4..]);
    let mut banks = AHashMap::with_capacity(main);
    let mut running: u32 = 0;
    for i in 0..main {
        delta_step(&mut r, &mut running, Dialect::V2)?;
        let method = *methods.get(i).ok_or(LutError::Truncated("method stream"))?;
        banks.entry(format!("{:08}", running)).or_insert(method);
    }
    // Method bytes past the main-office count belong to branch offices.
    Ok(LutData { banks })
}

/// Block header is type, compressed size, decompressed size, reserved; the
/// zlib payload follows. Offsets in the directory are absolute file offsets.
fn read_block(bytes: &[u8], offset: u32, want_type: u32) -> Result<Vec<u8>, LutError> {
    let mut r = ByteReader::at(bytes, offset as usize, "block header")?;
    let block_type = r.u32_le("block type")?;
    let compressed = r.u32_le("compressed size")?;
    let decompressed = r.u32_le("decompressed size")?;
    let _reserved = r.u32_le("block header")?;
    if block_type != want_type {
        return Err(LutError::Malformed("directory and block type disagree"));
    }
    let payload = r.take(compressed as usize, "block payload")?;
    let mut out = Vec::with_capacity(decompressed as usize);
    ZlibDecoder::new(payload)
        .read_to_end(&mut out)
        .map_err(LutError::Inflate)?;
    if out.len() != decompressed as usize {
        return Err(LutError::Malformed("decompressed size disagrees with header"));
    }
    Ok(out)
}

/// One opcode of the shared delta alphabet. Returns false only for the
/// Format 1.x invalid marker, which names no routing number.
fn delta_step(
    r: &mut ByteReader<'_>,
    running: &mut u32,
    dialect: Dialect,
) -> Result<bool, LutError> {
    let op = r.u8("delta opcode")?;
    match (dialect, op) {
        (Dialect::V1, 0x00..=0xFA) | (Dialect::V2, 0x00..=0xFD) => {
            *running = running.wrapping_add(u32::from(op));
        }
        (Dialect::V1, 0xFB) => {
            let d = r.u16_le("delta operand")?;
            *running = running.wrapping_sub(u32::from(d));
        }
        (Dialect::V1, 0xFC) => {
            let d = r.u8("delta operand")?;
            *running = running.wrapping_sub(u32::from(d));
        }
        (Dialect::V1, 0xFD) | (Dialect::V2, 0xFF) => {
            *running = r.u32_le("delta operand")?;
        }
        (_, 0xFE) => {
            let d = r.u16_le("delta operand")?;
            *running = running.wrapping_add(u32::from(d));
        }
        (Dialect::V1, 0xFF) => return Ok(false),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn v1_wrap(info: Option<&str>, count: u32, stream: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(SIG_V1);
        if let Some(line) = info {
            out.extend_from_slice(line.as_bytes());
            out.push(b'\n');
        }
        out.extend_from_slice(&count.to_le_bytes());
        let checksum = adler2::adler32_slice(stream) ^ count;
        out.extend_from_slice(&checksum.to_le_bytes());
        out.extend_from_slice(stream);
        out
    }

    fn v2_block(block_type: u32, plain: &[u8]) -> Vec<u8> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(plain).unwrap();
        let compressed = enc.finish().unwrap();
        let mut out = Vec::new();
        out.extend_from_slice(&block_type.to_le_bytes());
        out.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
        out.extend_from_slice(&(plain.len() as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&compressed);
        out
    }

    fn v2_file(blz_plain: &[u8], method_plain: &[u8]) -> Vec<u8> {
        let blz_block = v2_block(1, blz_plain);
        let method_block = v2_block(2, method_plain);
        let mut out = Vec::new();
        out.extend_from_slice(SIG_V2);
        out.extend_from_slice(b"synthesized fixture\nDATA\n");
        out.extend_from_slice(&3u16.to_le_bytes());
        let first = (out.len() + 3 * 12) as u32;
        let second = first + blz_block.len() as u32;
        // Slot 0 left empty on purpose.
        out.extend_from_slice(&[0u8; 12]);
        out.extend_from_slice(&1u32.to_le_bytes());
        out.extend_from_slice(&first.to_le_bytes());
        out.extend_from_slice(&(blz_block.len() as u32).to_le_bytes());
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&second.to_le_bytes());
        out.extend_from_slice(&(method_block.len() as u32).to_le_bytes());
        out.extend_from_slice(&blz_block);
        out.extend_from_slice(&method_block);
        out
    }

    fn sample_v2_payload() -> Vec<u8> {
        // 10000000, +1, +20029
        let mut plain = Vec::new();
        plain.extend_from_slice(&3u32.to_le_bytes());
        plain.push(0xFF);
        plain.extend_from_slice(&10_000_000u32.to_le_bytes());
        plain.push(0x01);
        plain.push(0xFE);
        plain.extend_from_slice(&20_029u16.to_le_bytes());
        plain
    }

    #[test]
    fn delta_prefix_tracks_running_blz() {
        let plain = sample_v2_payload();
        let mut r = ByteReader::new(&plain[4..]);
        let mut running = 0u32;
        let expected = [10_000_000, 10_000_001, 10_020_030];
        for want in expected {
            assert!(delta_step(&mut r, &mut running, Dialect::V2).unwrap());
            assert_eq!(running, want);
        }
        assert!(r.remaining().is_empty());
    }

    #[test]
    fn v1_round_trip_with_info_line() {
        let mut stream = Vec::new();
        stream.push(0xFD);
        stream.extend_from_slice(&10_000_000u32.to_le_bytes());
        stream.push(0x00);
        stream.push(0x01);
        stream.push(0x01);
        stream.push(0xFE);
        stream.extend_from_slice(&20_029u16.to_le_bytes());
        stream.push(0x09);
        let file = v1_wrap(Some("Stand 2024-06-03"), 3, &stream);
        let data = parse(&file).unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.get("10000000"), Some(0x00));
        assert_eq!(data.get("10000001"), Some(0x01));
        assert_eq!(data.get("10020030"), Some(0x09));
        assert_eq!(data.get("99999999"), None);
    }

    #[test]
    fn v1_without_info_line() {
        let mut stream = Vec::new();
        stream.push(0xFD);
        stream.extend_from_slice(&32_050_000u32.to_le_bytes());
        stream.push(0x63);
        let file = v1_wrap(None, 1, &stream);
        let data = parse(&file).unwrap();
        assert_eq!(data.get("32050000"), Some(0x63));
    }

    #[test]
    fn v1_subtract_opcodes() {
        let mut stream = Vec::new();
        stream.push(0xFD);
        stream.extend_from_slice(&10_000_500u32.to_le_bytes());
        stream.push(0x06);
        stream.push(0xFC);
        stream.push(200);
        stream.push(0x10);
        stream.push(0xFB);
        stream.extend_from_slice(&300u16.to_le_bytes());
        stream.push(0x32);
        let data = parse(&v1_wrap(None, 3, &stream)).unwrap();
        assert_eq!(data.get("10000500"), Some(0x06));
        assert_eq!(data.get("10000300"), Some(0x10));
        assert_eq!(data.get("10000000"), Some(0x32));
    }

    #[test]
    fn v1_marker_counts_but_inserts_nothing() {
        let mut stream = Vec::new();
        stream.push(0xFD);
        stream.extend_from_slice(&10_000_000u32.to_le_bytes());
        stream.push(0x00);
        stream.push(0xFF);
        stream.push(0x55);
        stream.push(0x02);
        stream.push(0x01);
        let data = parse(&v1_wrap(None, 3, &stream)).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get("10000000"), Some(0x00));
        assert_eq!(data.get("10000002"), Some(0x01));
    }

    #[test]
    fn v1_duplicate_blz_keeps_first() {
        let mut stream = Vec::new();
        stream.push(0xFD);
        stream.extend_from_slice(&10_000_000u32.to_le_bytes());
        stream.push(0x05);
        stream.push(0x00);
        stream.push(0x07);
        let data = parse(&v1_wrap(None, 2, &stream)).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.get("10000000"), Some(0x05));
    }

    #[test]
    fn v1_checksum_mismatch_rejected() {
        let stream = [0x01u8, 0x00];
        let mut file = v1_wrap(None, 1, &stream);
        let tail = file.len() - 3;
        file[tail] ^= 0xFF;
        let err = parse(&file).unwrap_err();
        assert!(matches!(err, LutError::ChecksumMismatch { .. }));
    }

    #[test]
    fn v1_declared_count_beyond_stream_rejected() {
        let stream = [0x01u8, 0x00];
        let file = v1_wrap(None, 40, &stream);
        let err = parse(&file).unwrap_err();
        assert!(matches!(err, LutError::Truncated(_)));
    }

    #[test]
    fn v2_round_trip() {
        let file = v2_file(&sample_v2_payload(), &[0x00, 0x01, 0x09]);
        let data = parse(&file).unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.get("10000000"), Some(0x00));
        assert_eq!(data.get("10020030"), Some(0x09));
        assert_eq!(data.get("99999999"), None);
    }

    #[test]
    fn v2_excess_method_bytes_ignored() {
        let file = v2_file(&sample_v2_payload(), &[0x00, 0x01, 0x09, 0x77, 0x66]);
        let data = parse(&file).unwrap();
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn v2_short_method_stream_rejected() {
        let file = v2_file(&sample_v2_payload(), &[0x00, 0x01]);
        let err = parse(&file).unwrap_err();
        assert!(matches!(err, LutError::Truncated("method stream")));
    }

    #[test]
    fn v2_truncated_directory_rejected() {
        let file = v2_file(&sample_v2_payload(), &[0x00, 0x01, 0x09]);
        // 70 lands inside the second directory slot.
        let err = parse(&file[..70]).unwrap_err();
        assert!(matches!(err, LutError::Truncated(_)));
    }

    #[test]
    fn unknown_signature_rejected() {
        let err = parse(b"BLZ Lookup Table/Format 9.9\nrest").unwrap_err();
        assert!(matches!(err, LutError::InvalidSignature));
        let err = parse(b"short").unwrap_err();
        assert!(matches!(err, LutError::InvalidSignature));
    }
}
