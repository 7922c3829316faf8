// Consensus serialization primitives shared by transactions, headers and
// the compiled-in seed tables.

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{Error as IoError, Write};

/// Types that have a canonical consensus encoding. Returns the number of
/// bytes written.
pub trait Encodable {
    fn consensus_encode<W: Write + WriteBytesExt>(&self, writer: &mut W) -> Result<usize, IoError>;
}

pub fn write_var_int<W: Write + WriteBytesExt>(writer: &mut W, n: u64) -> Result<usize, IoError> {
    if n < 0xfd {
        writer.write_u8(n as u8)?;
        Ok(1)
    } else if n <= 0xffff {
        writer.write_u8(0xfd)?;
        writer.write_u16::<LittleEndian>(n as u16)?;
        Ok(3)
    } else if n <= 0xffff_ffff {
        writer.write_u8(0xfe)?;
        writer.write_u32::<LittleEndian>(n as u32)?;
        Ok(5)
    } else {
        writer.write_u8(0xff)?;
        writer.write_u64::<LittleEndian>(n)?;
        Ok(9)
    }
}

pub fn write_var_bytes<W: Write + WriteBytesExt>(
    writer: &mut W,
    bytes: &[u8],
) -> Result<usize, IoError> {
    let mut written = write_var_int(writer, bytes.len() as u64)?;
    writer.write_all(bytes)?;
    written += bytes.len();
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var_int_bytes(n: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        let written = write_var_int(&mut buf, n).unwrap();
        assert_eq!(written, buf.len());
        buf
    }

    #[test]
    fn var_int_width_thresholds() {
        assert_eq!(var_int_bytes(0), vec![0x00]);
        assert_eq!(var_int_bytes(0xfc), vec![0xfc]);
        assert_eq!(var_int_bytes(0xfd), vec![0xfd, 0xfd, 0x00]);
        assert_eq!(var_int_bytes(0xffff), vec![0xfd, 0xff, 0xff]);
        assert_eq!(var_int_bytes(0x1_0000), vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(var_int_bytes(0x1_0000_0000).len(), 9);
    }

    #[test]
    fn var_bytes_prefixes_length() {
        let mut buf = Vec::new();
        let written = write_var_bytes(&mut buf, b"abc").unwrap();
        assert_eq!(written, 4);
        assert_eq!(buf, vec![0x03, b'a', b'b', b'c']);
    }
}
