//! Compression and text encoding
//!
//! zlib (RFC 1950) at the default level, then standard padded base64 (RFC 4648).

use base64::{engine::general_purpose::STANDARD, Engine};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{self, Write};

/// Compress bytes into a complete zlib stream.
///
/// The encoder is finished before returning, so the trailing adler32
/// checksum is always present.
pub fn compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(data.len() / 2 + 16),
        Compression::default(),
    );
    encoder.write_all(data)?;
    encoder.finish()
}

/// Encode bytes as standard base64 with padding
pub fn encode_text(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Compress then encode: the value stored for one file in the file map
#[allow(dead_code)]
pub fn encode_file(data: &[u8]) -> io::Result<String> {
    Ok(encode_text(&compress(data)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    fn inflate(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        ZlibDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_compress_roundtrip() {
        let inputs: [&[u8]; 4] = [b"", b"hello", &[0u8, 255, 1, 254], &[b'a'; 10_000]];
        for input in inputs {
            assert_eq!(inflate(&compress(input).unwrap()), input);
        }
    }

    #[test]
    fn test_compress_has_zlib_header() {
        let out = compress(b"hello").unwrap();
        // CMF/FLG for deflate, 32K window, default level
        assert_eq!(&out[..2], &[0x78, 0x9c]);
        // 2-byte header + payload + 4-byte adler32
        assert!(out.len() > 6);
    }

    #[test]
    fn test_compress_shrinks_repetitive_input() {
        let input = vec![b'z'; 4096];
        assert!(compress(&input).unwrap().len() < 100);
    }

    #[test]
    fn test_encode_text_known_values() {
        assert_eq!(encode_text(b""), "");
        assert_eq!(encode_text(b"hello"), "aGVsbG8=");
        assert_eq!(encode_text(b"1,2,3"), "MSwyLDM=");
        assert_eq!(encode_text(&[0xfb, 0xff]), "+/8=");
    }

    #[test]
    fn test_encode_text_roundtrip() {
        let data: Vec<u8> = (0..=255).collect();
        assert_eq!(STANDARD.decode(encode_text(&data)).unwrap(), data);
    }

    #[test]
    fn test_encode_file_is_base64_of_zlib() {
        let value = encode_file(b"world").unwrap();
        let compressed = STANDARD.decode(&value).unwrap();
        assert_eq!(inflate(&compressed), b"world");
        assert_eq!(value, encode_text(&compress(b"world").unwrap()));
    }
}
