//! Integration tests for huffpack

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use huffpack::error::CodecError;
use huffpack::*;
use rand::{Rng, SeedableRng};

#[test]
fn test_full_lifecycle() {
    let compressor = Compressor::default();
    let data = b"the quick brown fox jumps over the lazy dog".repeat(50);
    let compressed = compressor.compress_bytes(&data).unwrap();
    assert!(compressed.len() < data.len());
    let decompressed = compressor.decompress_bytes(&compressed).unwrap();
    assert_eq!(decompressed, data);
}

#[test]
fn test_empty_input_roundtrip() {
    let compressor = Compressor::default();
    let compressed = compressor.compress_bytes(b"").unwrap();
    assert_eq!(&compressed[..4], &HUFF_TREE.to_be_bytes());
    let decompressed = compressor.decompress_bytes(&compressed).unwrap();
    assert!(decompressed.is_empty());
}

#[test]
fn test_single_repeated_byte() {
    let compressor = Compressor::default();
    let data = vec![0x41u8; 1000];
    let compressed = compressor.compress_bytes(&data).unwrap();
    // 32 marker bits, 21 header bits, 1001 payload bits
    assert_eq!(compressed.len(), (32 + 21 + 1001 + 7) / 8);
    assert_eq!(compressor.decompress_bytes(&compressed).unwrap(), data);
}

#[test]
fn test_all_byte_values() {
    let compressor = Compressor::default();
    let data: Vec<u8> = (0..=255).cycle().take(2000).collect();
    let compressed = compressor.compress_bytes(&data).unwrap();
    assert_eq!(compressor.decompress_bytes(&compressed).unwrap(), data);
}

#[test]
fn test_random_data() {
    let compressor = Compressor::default();
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
    for len in [1usize, 2, 7, 100, 4096, 65_537] {
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let compressed = compressor.compress_bytes(&data).unwrap();
        let decompressed = compressor.decompress_bytes(&compressed).unwrap();
        assert_eq!(decompressed, data, "roundtrip failed for {len} random bytes");
    }
}

#[test]
fn test_large_data() {
    let compressor = Compressor::default();
    let data = vec![0xABu8; 100_000];
    let compressed = compressor.compress_bytes(&data).unwrap();
    assert!(
        (compressed.len() as f64) / (data.len() as f64) < 0.2,
        "large uniform data should compress well"
    );
    assert_eq!(compressor.decompress_bytes(&compressed).unwrap(), data);
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("input.txt");
    let packed = dir.path().join("input.txt.hf");
    let unpacked = dir.path().join("input.txt.out");
    let data = b"file streams go through the same codec\n".repeat(200);
    std::fs::write(&original, &data).unwrap();

    let compressor = Compressor::default();
    let stats = {
        let input = BufReader::new(File::open(&original).unwrap());
        let mut output = BufWriter::new(File::create(&packed).unwrap());
        let stats = compressor.compress(input, &mut output).unwrap();
        output.flush().unwrap();
        stats
    };
    assert_eq!(stats.original_bytes, data.len() as u64);
    assert_eq!(
        std::fs::metadata(&packed).unwrap().len(),
        stats.compressed_bytes
    );

    {
        let input = BufReader::new(File::open(&packed).unwrap());
        let mut output = BufWriter::new(File::create(&unpacked).unwrap());
        compressor.decompress(input, &mut output).unwrap();
        output.flush().unwrap();
    }
    assert_eq!(std::fs::read(&unpacked).unwrap(), data);
}

#[test]
fn test_stats_serialize() {
    let compressor = Compressor::default();
    let mut out = Vec::new();
    let stats = compressor
        .compress(std::io::Cursor::new(b"stats as json"), &mut out)
        .unwrap();
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["original_bytes"], 13);
    assert_eq!(json["compressed_bytes"], out.len() as u64);
}

#[test]
fn test_malformed_marker_rejected() {
    let compressor = Compressor::default();
    let mut compressed = compressor.compress_bytes(b"some valid content").unwrap();
    compressed[3] ^= 0x01;
    let mut output = Vec::new();
    let err = compressor
        .decompress(compressed.as_slice(), &mut output)
        .unwrap_err();
    match err {
        CodecError::MalformedHeader { found } => assert_eq!(found, HUFF_NUMBER),
        other => panic!("expected malformed header, got {other:?}"),
    }
    assert!(output.is_empty());
}

#[test]
fn test_truncated_stream_rejected() {
    let compressor = Compressor::default();
    let data = b"abcdefghijklmnopqrstuvwxyz".repeat(20);
    let compressed = compressor.compress_bytes(&data).unwrap();

    // Cut inside the payload.
    let cut = &compressed[..compressed.len() - 40];
    let mut output = Vec::new();
    let err = compressor.decompress(cut, &mut output).unwrap_err();
    assert!(matches!(err, CodecError::Truncated { context: "payload" }));
    // Decoded bytes stay in the sink.
    assert!(!output.is_empty());
    assert!(data.starts_with(&output));

    // Cut inside the header.
    let err = compressor.decompress_bytes(&compressed[..8]).unwrap_err();
    assert!(matches!(err, CodecError::Truncated { context: "tree header" }));

    // Cut inside the marker.
    let err = compressor.decompress_bytes(&compressed[..2]).unwrap_err();
    assert!(matches!(err, CodecError::Truncated { context: "marker" }));
}

#[test]
fn test_debug_level_does_not_change_output() {
    use huffpack::config::{CodecConfig, DEBUG_HIGH};
    let data = b"verbosity is observability only".repeat(10);
    let quiet = Compressor::default().compress_bytes(&data).unwrap();
    let loud = Compressor::new(CodecConfig {
        debug_level: DEBUG_HIGH,
        ..CodecConfig::default()
    })
    .compress_bytes(&data)
    .unwrap();
    assert_eq!(quiet, loud);
}

#[test]
fn test_config_from_json() {
    use huffpack::config::CodecConfig;
    let config = CodecConfig::from_json(r#"{ "max_input_size": 8 }"#).unwrap();
    let compressor = Compressor::new(config);
    assert!(compressor.compress_bytes(b"12345678").is_ok());
    assert!(matches!(
        compressor.compress_bytes(b"123456789"),
        Err(CodecError::InputTooLarge { limit: 8 })
    ));
}
