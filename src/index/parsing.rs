use super::{Entry, IndexError, Location};
use byteorder::{BigEndian, ByteOrder};
use IndexError::*;

/// Offset and size, both stored as big-endian u32 after the headword terminator.
const LOCATION_BYTES: usize = 8;

/// Decode all records of a `.idx` file, in file order.
pub fn parse(data: &[u8]) -> Result<Vec<Entry>, IndexError> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        let (entry, next) = parse_record(data, pos)?;
        entries.push(entry);
        pos = next;
    }

    Ok(entries)
}

/// Decode the record starting at `pos` and return it together with the position of the next one.
fn parse_record(data: &[u8], pos: usize) -> Result<(Entry, usize), IndexError> {
    let terminator = data[pos..]
        .iter()
        .position(|&b| b == b'\0')
        .ok_or(UnterminatedWord { position: pos })?;

    // Real-world indexes are not always clean UTF-8; keep the entry rather than dropping the file
    let headword = String::from_utf8_lossy(&data[pos..pos + terminator]).into_owned();

    let start = pos + terminator + 1;
    let remaining = data.len() - start;
    if remaining < LOCATION_BYTES {
        return Err(TruncatedRecord { word: headword, position: pos, remaining });
    }

    let location = Location {
        offset: BigEndian::read_u32(&data[start..start + 4]),
        size: BigEndian::read_u32(&data[start + 4..start + 8]),
    };

    Ok((Entry { headword, location }, start + LOCATION_BYTES))
}
