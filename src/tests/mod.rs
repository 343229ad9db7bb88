
#[cfg(test)]
fn random_bytes(rng: &mut rand::rngs::SmallRng, len: usize, alphabet: u8) -> Vec<u8> {
    use rand::Rng;
    (0..len).map(|_| rng.gen_range(0..=alphabet)).collect()
}

/// Symbol `i` occurs `2^i` times, every merge then takes the previous merge and one
/// more leaf, which gives a tree as deep as it has symbols.
#[cfg(test)]
fn doubling_weights(symbols: u8) -> Vec<u8> {
    (0..symbols)
        .flat_map(|symbol| core::iter::repeat(symbol).take(1 << symbol))
        .collect()
}

#[test]
fn round_trip_edge_cases() {
    use crate::huffman::round_trip;

    round_trip(&[]);
    round_trip(&[0]);
    round_trip(&[255]);
    round_trip(&[0x41; 1000]);
    round_trip(&(0..=255u8).collect::<Vec<_>>());
    round_trip(b"aabbbcccc");
    // A byte with every bit set must not be mistaken for the end marker
    round_trip(&[0xff, 0x00, 0xff, 0xff]);
}

#[test]
fn round_trip_random() {
    use crate::huffman::round_trip;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    let mut rng = SmallRng::seed_from_u64(0xDEADBEEF);
    for _ in 0..200 {
        let len = rng.gen_range(0..4096);
        let alphabet = rng.gen::<u8>();
        let data = random_bytes(&mut rng, len, alphabet);
        round_trip(&data);
    }
}

#[test]
fn round_trip_skewed() {
    use crate::huffman::round_trip;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    round_trip(&doubling_weights(14));

    let mut rng = SmallRng::seed_from_u64(7);
    let skewed: Vec<u8> = (0..20_000)
        .map(|_| {
            if rng.gen_ratio(19, 20) {
                b'e'
            } else {
                rng.gen()
            }
        })
        .collect();
    round_trip(&skewed);
}

#[test]
fn deep_tree_codes_are_long() {
    use crate::encoding::frequency::FrequencyTable;
    use crate::huffman::{CodeTable, SymbolTree};

    let tree = SymbolTree::build(&FrequencyTable::from_bytes(&doubling_weights(20)));
    let codes = CodeTable::from_tree(&tree);
    let longest = codes.iter().map(|(_, code)| code.len()).max().unwrap();
    assert_eq!(longest, 20);
    assert_eq!(tree.depth(), 20);
}

#[test]
fn compression_shrinks_text() {
    let text = "It was the best of times, it was the worst of times, it was the age of \
                wisdom, it was the age of foolishness, it was the epoch of belief, it was \
                the epoch of incredulity, it was the season of Light, it was the season of \
                Darkness, it was the spring of hope, it was the winter of despair."
        .repeat(20);
    let compressed = crate::compress_to_vec(text.as_bytes()).unwrap();
    assert!(compressed.len() < text.len() * 3 / 4);
    assert_eq!(
        crate::decompress_to_vec(&compressed).unwrap(),
        text.as_bytes()
    );
}

#[test]
fn header_describes_every_symbol() {
    use crate::common::PSEUDO_EOF;
    use crate::decoding::bit_reader::BitReader;
    use crate::huffman::SymbolTree;
    use crate::io::BitRead;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..50 {
        let len = rng.gen_range(1..2048);
        let alphabet = rng.gen::<u8>();
        let data = random_bytes(&mut rng, len, alphabet);
        let compressed = crate::compress_to_vec(&data).unwrap();

        let mut br = BitReader::new(compressed.as_slice());
        br.read_bits(32).unwrap().unwrap();
        let tree = SymbolTree::read_header(&mut br).unwrap();

        let mut expected: Vec<u16> = data.iter().map(|b| u16::from(*b)).collect();
        expected.push(PSEUDO_EOF);
        expected.sort_unstable();
        expected.dedup();
        let mut symbols = tree.symbols();
        symbols.sort_unstable();
        assert_eq!(symbols, expected);
    }
}

#[test]
fn stats_match_output() {
    use crate::decoding::bit_reader::BitReader;
    use crate::encoding::bit_writer::BitWriter;
    use crate::{Compressor, DebugLevel, Decompressor};
    use std::io::Cursor;

    let data = b"she sells sea shells by the sea shore".repeat(10);
    let mut output = BitWriter::new(Vec::new());
    let compress_stats = Compressor::new(DebugLevel::Low)
        .compress(BitReader::new(Cursor::new(&data)), &mut output)
        .unwrap();
    let compressed = output.finish().unwrap();
    assert_eq!(compress_stats.bits_read, 2 * 8 * data.len() as u64);
    assert_eq!(
        compressed.len() as u64,
        (compress_stats.bits_written + 7) / 8
    );

    let mut output = BitWriter::new(Vec::new());
    let decompress_stats = Decompressor::new(DebugLevel::Low)
        .decompress(BitReader::new(compressed.as_slice()), &mut output)
        .unwrap();
    assert_eq!(decompress_stats.bits_written, 8 * data.len() as u64);
    assert_eq!(decompress_stats.bits_read, compress_stats.bits_written);
    assert_eq!(output.finish().unwrap(), data);
}
