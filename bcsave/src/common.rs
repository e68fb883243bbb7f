use std::io::{Read, Seek, Write};

use binrw::{parser, writer, BinRead, BinResult, BinWrite};

#[parser(reader)]
pub fn bool_parser() -> BinResult<bool> {
    u8::read(reader).map(|b| b != 0)
}

#[writer(writer)]
pub fn bool_writer(b: &bool) -> BinResult<()> {
    u8::from(*b).write(writer)
}

/// Reads a `u32`-length-prefixed UTF-8 string.
#[parser(reader, endian)]
pub fn string_parser() -> BinResult<String> {
    let count = u32::read_options(reader, endian, ())?;
    let pos = reader.stream_position()?;
    let mut data = vec![0u8; count as usize];
    reader.read_exact(&mut data)?;
    String::from_utf8(data).map_err(|err| binrw::Error::Custom {
        pos,
        err: Box::new(err),
    })
}

#[writer(writer, endian)]
pub fn string_writer(text: &String) -> BinResult<()> {
    (text.len() as u32).write_options(writer, endian, ())?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Reads `count` single-byte booleans; the list carries no length
/// prefix of its own.
pub fn read_bool_list<R: Read + Seek>(reader: &mut R, count: usize) -> BinResult<Vec<bool>> {
    (0..count)
        .map(|_| bool_parser(reader, binrw::Endian::Little, ()))
        .collect()
}

pub fn write_bool_list<W: Write + Seek>(writer: &mut W, flags: &[bool]) -> BinResult<()> {
    flags
        .iter()
        .try_for_each(|flag| bool_writer(flag, writer, binrw::Endian::Little, ()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use binrw::Endian;

    use super::*;

    #[test]
    fn string_round_trips() {
        let mut cursor = Cursor::new(Vec::new());
        string_writer(&"ラーメン".to_string(), &mut cursor, Endian::Little, ()).unwrap();
        cursor.set_position(0);
        assert_eq!(
            string_parser(&mut cursor, Endian::Little, ()).unwrap(),
            "ラーメン"
        );
    }

    #[test]
    fn string_length_counts_bytes_not_chars() {
        let mut cursor = Cursor::new(Vec::new());
        string_writer(&"ねこ".to_string(), &mut cursor, Endian::Little, ()).unwrap();
        let bytes = cursor.into_inner();
        assert_eq!(bytes[0..4], [6, 0, 0, 0]);
        assert_eq!(bytes.len(), 4 + 6);
    }

    #[test]
    fn truncated_string_is_an_error() {
        let mut cursor = Cursor::new(vec![10, 0, 0, 0, b'a', b'b']);
        assert!(string_parser(&mut cursor, Endian::Little, ()).is_err());
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let mut cursor = Cursor::new(vec![2, 0, 0, 0, 0xff, 0xfe]);
        assert!(string_parser(&mut cursor, Endian::Little, ()).is_err());
    }

    #[test]
    fn bool_list_reads_any_nonzero_byte_as_true() {
        let mut cursor = Cursor::new(vec![0, 1, 2, 0xff, 0]);
        assert_eq!(
            read_bool_list(&mut cursor, 5).unwrap(),
            [false, true, true, true, false]
        );
    }

    #[test]
    fn bool_list_writes_one_byte_per_flag() {
        let mut cursor = Cursor::new(Vec::new());
        write_bool_list(&mut cursor, &[true, false, true]).unwrap();
        assert_eq!(cursor.into_inner(), [1, 0, 1]);
    }
}
