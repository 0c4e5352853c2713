use image::{Rgb, RgbImage};
use lsb_stego::{
    BitDepth, PixelGrid, StegoError, Truncation,
    bitstream::BitStream,
    capacity::{capacity_bits, plan_encoding},
    framer::{frame, has_embedded_terminator, narrowed_chars, unframe},
    histogram::{bit_pattern_labels, compute_histogram},
    nibble::{embed_image, extract_image},
    steganography::{decode_message, embed_bits, encode_message, extract_bits},
};
use rand::{Rng, RngCore};

/// 一个辅助函数，用于创建随机像素的网格
fn random_grid(width: u32, height: u32) -> PixelGrid {
    let mut raw = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut raw);
    RgbImage::from_raw(width, height, raw).expect("buffer matches dimensions")
}

fn depth(value: i64) -> BitDepth {
    BitDepth::new(value).expect("valid bit depth")
}

/// 随机 Latin-1 文本，不含 NUL
fn random_message(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(rng.random_range(1..=255u8)))
        .collect()
}

#[test]
fn round_trip_within_capacity_for_every_bit_depth() {
    for d in 1..=4 {
        let bit_depth = depth(d);
        let capacity = capacity_bits(7, 5, bit_depth);
        let max_len = capacity / 8 - 1;

        for len in [0, 1, max_len / 2, max_len] {
            let message = random_message(len);
            let mut grid = random_grid(7, 5);

            let report = encode_message(&mut grid, &message, bit_depth);
            assert_eq!(report.truncation, None);
            assert_eq!(report.bits_written, (len + 1) * 8);
            assert_eq!(decode_message(&grid, bit_depth), message, "bit depth {d}, len {len}");
        }
    }
}

#[test]
fn bit_depth_outside_range_is_invalid_parameter() {
    for value in [0, 5, -1] {
        assert_eq!(
            BitDepth::new(value),
            Err(StegoError::InvalidParameter { bit_depth: value })
        );
        assert!(BitDepth::try_from(value).is_err());
    }
    for value in 1..=4 {
        let bit_depth = depth(value);
        assert_eq!(i64::from(bit_depth.get()), value);
        assert_eq!(bit_depth.levels(), 1 << value);
    }
    assert_eq!(depth(3).mask(), 0b111);
    assert_eq!(BitDepth::default(), depth(1));

    let message = StegoError::InvalidParameter { bit_depth: 5 }.to_string();
    assert!(message.contains("between 1 and 4"));
}

#[test]
fn truncation_scenario_places_exact_bits() {
    let bit_depth = depth(1);
    let capacity = capacity_bits(2, 2, bit_depth);
    assert_eq!(capacity, 12);

    // "A" 成帧后为 01000001 00000000
    let framed = frame("A");
    assert_eq!(framed, [0x41, 0x00]);

    let plan = plan_encoding(BitStream::from_bytes(&framed), capacity);
    assert!(plan.is_truncated());
    assert_eq!(plan.bits.len(), 12);
    assert_eq!(plan.bits.take(0, 12), 0b0100_0001_0000);
    assert_eq!(
        plan.truncation,
        Some(Truncation {
            message_bits: 16,
            capacity_bits: 12,
        })
    );

    let mut grid = RgbImage::new(2, 2);
    let report = encode_message(&mut grid, "A", bit_depth);
    assert_eq!(report.bits_written, 12);
    assert_eq!(report.truncation, plan.truncation);

    let samples: &[u8] = &grid;
    assert_eq!(samples, &[0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0]);

    // 未写入的通道本来就是 0，恰好构成了结束标记的前缀
    assert_eq!(decode_message(&grid, bit_depth), "A");
}

#[test]
fn truncation_advisory_reports_character_capacity() {
    let truncation = Truncation {
        message_bits: 16,
        capacity_bits: 12,
    };
    assert_eq!(truncation.capacity_chars(), 1);
    assert_eq!(truncation.dropped_bits(), 4);
    assert!(truncation.to_string().contains("hold only 1 characters"));
}

#[test]
fn plan_keeps_message_that_fits() {
    let bits = BitStream::from_bytes(&frame("hi"));
    let plan = plan_encoding(bits.clone(), 24);
    assert!(!plan.is_truncated());
    assert_eq!(plan.bits, bits);
    assert_eq!(capacity_bits(100, 50, depth(4)), 60_000);
    assert_eq!(capacity_bits(0, 50, depth(2)), 0);
}

#[test]
fn embed_stops_mid_pixel_when_stream_runs_out() {
    // 位深 4，只有 4 位：只改写 R
    let mut grid = RgbImage::from_pixel(1, 1, Rgb([0xFF, 0xFF, 0xFF]));
    let mut bits = BitStream::new();
    bits.push_bits(0b1010, 4);
    assert_eq!(embed_bits(&mut grid, &bits, depth(4)), 4);
    assert_eq!(grid.get_pixel(0, 0), &Rgb([0xFA, 0xFF, 0xFF]));

    // 位深 3，4 位：R 写满，G 只剩 1 位，按数值写入低位
    let mut grid = RgbImage::from_pixel(1, 1, Rgb([0xFF, 0xFF, 0xFF]));
    let mut bits = BitStream::new();
    bits.push_bits(0b1011, 4);
    assert_eq!(embed_bits(&mut grid, &bits, depth(3)), 4);
    assert_eq!(grid.get_pixel(0, 0), &Rgb([0xFD, 0xF9, 0xFF]));

    // 位深 4，6 位：G 只剩 2 位 `10`，写成 0b0010
    let mut grid = RgbImage::from_pixel(1, 1, Rgb([0xAA, 0xAA, 0xAA]));
    let mut bits = BitStream::new();
    bits.push_bits(0b0111_10, 6);
    assert_eq!(embed_bits(&mut grid, &bits, depth(4)), 6);
    assert_eq!(grid.get_pixel(0, 0), &Rgb([0xA7, 0xA2, 0xAA]));
}

#[test]
fn encode_preserves_high_bits_and_untouched_pixels() {
    for d in 1..=4 {
        let bit_depth = depth(d);
        let original = random_grid(20, 10);
        let mut grid = original.clone();
        let report = encode_message(&mut grid, "short", bit_depth);

        let written_channels = report.bits_written.div_ceil(bit_depth.bits());
        let before: &[u8] = &original;
        let after: &[u8] = &grid;
        for (i, (&b, &a)) in before.iter().zip(after).enumerate() {
            assert_eq!(b & !bit_depth.mask(), a & !bit_depth.mask());
            if i >= written_channels {
                assert_eq!(b, a, "channel {i} past the payload must be untouched");
            }
        }
    }
}

#[test]
fn decode_without_terminator_returns_everything() {
    // 2x2 网格在位深 4 下恰好容纳 6 个字节
    let mut grid = RgbImage::new(2, 2);
    let bits = BitStream::from_bytes(b"AAAAAA");
    assert_eq!(embed_bits(&mut grid, &bits, depth(4)), 48);
    assert_eq!(decode_message(&grid, depth(4)), "AAAAAA");

    let extracted = extract_bits(&grid, depth(4));
    assert_eq!(extracted.len(), 48);
    assert_eq!(extracted.to_bytes(), b"AAAAAA");
}

#[test]
fn framer_narrows_and_stops_at_terminator() {
    assert_eq!(frame(""), [0]);
    assert_eq!(frame("é"), [0xE9, 0]);
    assert_eq!(frame("€"), [0xAC, 0]);
    assert_eq!(unframe(b"hi\0there"), "hi");
    assert_eq!(unframe(b"abc"), "abc");
    assert_eq!(unframe(&[0xE9, 0]), "é");
    assert_eq!(unframe(&[]), "");

    assert_eq!(narrowed_chars("a€b"), 1);
    assert!(has_embedded_terminator("a\0b"));
    assert!(has_embedded_terminator("\u{100}"));
    assert!(!has_embedded_terminator("plain"));
}

#[test]
fn embedded_nul_truncates_decoded_message() {
    let mut grid = random_grid(10, 10);
    encode_message(&mut grid, "before\0after", depth(2));
    assert_eq!(decode_message(&grid, depth(2)), "before");
}

#[test]
fn histogram_bins_sum_to_pixel_count() {
    let grid = random_grid(13, 7);
    for d in 1..=4 {
        let hist = compute_histogram(&grid, depth(d));
        assert_eq!(hist.total_pixels, 91);
        for (_, channel) in hist.channels() {
            assert_eq!(channel.bins.len(), 1 << d);
            assert_eq!(channel.total(), 91);
            assert!(channel.mean >= 0.0 && channel.mean <= ((1 << d) - 1) as f64);
        }
    }
}

#[test]
fn histogram_statistics_use_population_moments() {
    let mut grid = RgbImage::new(2, 1);
    grid.put_pixel(0, 0, Rgb([0, 1, 2]));
    grid.put_pixel(1, 0, Rgb([1, 1, 3]));

    let hist = compute_histogram(&grid, depth(1));
    assert_eq!(hist.red.bins, [1, 1]);
    assert_eq!(hist.red.mean, 0.5);
    assert_eq!(hist.red.std_dev, 0.5);
    assert_eq!(hist.green.bins, [0, 2]);
    assert_eq!(hist.green.mean, 1.0);
    assert_eq!(hist.green.std_dev, 0.0);

    let hist = compute_histogram(&grid, depth(2));
    assert_eq!(hist.blue.bins, [0, 0, 1, 1]);
    assert_eq!(hist.blue.mean, 2.5);
    assert_eq!(hist.blue.std_dev, 0.5);

    let report = hist.to_string();
    assert!(report.contains("Red Channel - Last 2 Bits"));
    assert!(report.contains("  10: 1"));
    assert!(report.contains("Blue Channel - Mean: 2.50, Std Dev: 0.50"));
}

#[test]
fn histogram_of_empty_grid_has_zero_moments() {
    let hist = compute_histogram(&RgbImage::new(0, 0), depth(2));
    assert_eq!(hist.total_pixels, 0);
    assert_eq!(hist.red.bins, [0, 0, 0, 0]);
    assert_eq!(hist.red.mean, 0.0);
    assert_eq!(hist.red.std_dev, 0.0);
}

#[test]
fn bit_pattern_labels_are_zero_padded() {
    assert_eq!(bit_pattern_labels(depth(1)), ["0", "1"]);
    assert_eq!(bit_pattern_labels(depth(2)), ["00", "01", "10", "11"]);
    assert_eq!(bit_pattern_labels(depth(4))[5], "0101");
}

#[test]
fn image_in_image_keeps_only_secret_high_nibble() {
    let carrier = random_grid(9, 6);
    let secret = random_grid(9, 6);

    let mut merged = carrier.clone();
    embed_image(&mut merged, &secret).expect("same size");
    let revealed = extract_image(&merged);

    for ((c, s), (m, r)) in carrier
        .pixels()
        .zip(secret.pixels())
        .zip(merged.pixels().zip(revealed.pixels()))
    {
        for ch in 0..3 {
            assert_eq!(m[ch], (c[ch] & 0xF0) | (s[ch] >> 4));
            assert_eq!(r[ch], s[ch] & 0xF0);
        }
    }
}

#[test]
fn image_in_image_rejects_size_mismatch() {
    let original = random_grid(4, 4);
    let mut carrier = original.clone();
    let secret = random_grid(3, 3);

    assert_eq!(
        embed_image(&mut carrier, &secret),
        Err(StegoError::SizeMismatch {
            carrier: (4, 4),
            secret: (3, 3),
        })
    );
    assert_eq!(carrier, original);
}

#[test]
fn extract_image_shifts_low_nibble_up() {
    let merged = RgbImage::from_pixel(2, 2, Rgb([0xAB, 0x10, 0x0F]));
    let revealed = extract_image(&merged);
    assert_eq!(revealed.dimensions(), (2, 2));
    assert!(revealed.pixels().all(|p| *p == Rgb([0xB0, 0x00, 0xF0])));
}

#[test]
fn decode_ignores_trailing_partial_byte() {
    // 10x10 在位深 1 下有 300 位：37 个完整字节加 4 位残余
    let mut grid = random_grid(10, 10);
    let report = encode_message(&mut grid, &"a".repeat(5000), depth(1));
    assert_eq!(report.bits_written, 300);
    assert_eq!(extract_bits(&grid, depth(1)).to_bytes().len(), 37);
    assert_eq!(decode_message(&grid, depth(1)), "a".repeat(37));
}
