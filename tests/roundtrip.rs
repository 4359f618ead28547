//! Randomized round-trip properties (spec §8, invariants 1-5) across all
//! four table kinds and the collection codecs.

use bitpack::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(0xB17_9ACC)
}

#[test]
fn ranged_code_round_trips_random_values_in_domain() {
    let mut rng = rng();
    for _ in 0..200 {
        let a = rng.random_range(-1000..1000);
        let b = rng.random_range(a..a + 2000);
        let code = RangedCode::new(a, b).unwrap();
        assert!(code.is_exhaustive());

        let mut buf = Vec::new();
        let samples: Vec<i64> = (0..20).map(|_| rng.random_range(a..=b)).collect();
        {
            let mut w = BitWriter::new(&mut buf);
            for &v in &samples {
                code.encode(&mut w, v).unwrap();
            }
            w.close().unwrap();
        }
        let mut r = BitReader::new(&buf[..]);
        for &v in &samples {
            assert_eq!(code.decode(&mut r).unwrap(), v);
        }
    }
}

#[test]
fn natural_code_round_trips_random_values() {
    let mut rng = rng();
    for k in 2..6u32 {
        let code = NaturalCode::new(k).unwrap();
        let samples: Vec<u64> = (0..200).map(|_| rng.random_range(0..1_000_000u64)).collect();
        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            for &v in &samples {
                code.encode(&mut w, v).unwrap();
            }
            w.close().unwrap();
        }
        let mut r = BitReader::new(&buf[..]);
        for &v in &samples {
            assert_eq!(code.decode(&mut r).unwrap(), v);
        }
    }
}

#[test]
fn integer_code_round_trips_random_values() {
    let mut rng = rng();
    for k in 2..6u32 {
        let code = IntegerCode::new(k).unwrap();
        let samples: Vec<i64> = (0..200)
            .map(|_| rng.random_range(-1_000_000i64..1_000_000))
            .collect();
        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            for &v in &samples {
                code.encode(&mut w, v).unwrap();
            }
            w.close().unwrap();
        }
        let mut r = BitReader::new(&buf[..]);
        for &v in &samples {
            assert_eq!(code.decode(&mut r).unwrap(), v);
        }
    }
}

#[test]
fn huffman_table_round_trips_random_frequency_maps() {
    let mut rng = rng();
    for _ in 0..30 {
        let alphabet_size = rng.random_range(1..40u32);
        let freqs: Vec<(u32, u64)> = (0..alphabet_size)
            .map(|s| (s, rng.random_range(1..500u64)))
            .collect();
        let table = HuffmanTable::build(freqs.clone(), |a, b| a.cmp(b)).unwrap();
        assert!(table.is_exhaustive());

        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            for _ in 0..50 {
                let sym = freqs[rng.random_range(0..freqs.len())].0;
                write_symbol(&mut w, &table, &sym).unwrap();
            }
            w.close().unwrap();
        }
    }
}

#[test]
fn list_round_trips_random_lengths() {
    let mut rng = rng();
    let nat = NaturalCode::new(4).unwrap();
    for _ in 0..50 {
        let len = rng.random_range(0..30usize);
        let list: Vec<u64> = (0..len).map(|_| rng.random_range(0..1000u64)).collect();
        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            write_list(&mut w, |w, n| nat.encode(w, n as u64), |w, v: &u64| nat.encode(w, *v), &list).unwrap();
            w.close().unwrap();
        }
        let mut r = BitReader::new(&buf[..]);
        let decoded = read_list(&mut r, |r| Ok(nat.decode(r)? as usize), |r| nat.decode(r)).unwrap();
        assert_eq!(decoded, list);
    }
}

#[test]
fn ranged_set_round_trips_random_subsets() {
    let mut rng = rng();
    let nat = NaturalCode::new(4).unwrap();
    for _ in 0..50 {
        let min = rng.random_range(-100..0i64);
        let max = rng.random_range(1..100i64);
        let mut pool: Vec<i64> = (min..=max).collect();
        let count = rng.random_range(0..pool.len() + 1);
        // Fisher-Yates partial shuffle to pick a random subset, then sort.
        for i in 0..count {
            let j = rng.random_range(i..pool.len());
            pool.swap(i, j);
        }
        let mut set = pool[..count].to_vec();
        set.sort();

        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            write_ranged_set(&mut w, min, max, |w, n| nat.encode(w, n as u64), &set).unwrap();
            w.close().unwrap();
        }
        let mut r = BitReader::new(&buf[..]);
        let decoded = read_ranged_set(&mut r, min, max, |r| Ok(nat.decode(r)? as usize)).unwrap();
        assert_eq!(decoded, set);
    }
}
