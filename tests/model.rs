use probemap::ProbeMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

const OPS: usize = 200_000;

fn check_against_model(seed: u64, key_space: u32) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut map = ProbeMap::new();
    let mut model = HashMap::new();
    let mut max_capacity = 0;

    for _ in 0..OPS {
        let key = rng.gen_range(0..key_space);

        match rng.gen_range(0..10) {
            0..=4 => {
                let value: u64 = rng.gen();
                map.set(key, value);
                model.insert(key, value);
            }
            5..=7 => {
                assert_eq!(map.remove(&key), model.remove(&key));
            }
            _ => {
                assert_eq!(map.get(&key), model.get(&key));
            }
        }

        assert_eq!(map.len(), model.len());
        assert!(map.capacity() >= max_capacity, "the array never shrinks");
        max_capacity = map.capacity();
    }

    for (key, value) in &model {
        assert_eq!(map.get(key), Some(value));
    }

    assert_eq!(map.iter().count(), model.len());
}

#[test]
fn model_small_key_space() {
    check_against_model(0x5eed, 64);
}

#[test]
fn model_large_key_space() {
    check_against_model(0xdead_beef, 50_000);
}

#[test]
fn probe_offset_never_shrinks_without_growth() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut map: ProbeMap<u32, ()> = ProbeMap::with_capacity(4096);
    let capacity = map.capacity();
    let mut offset = 0;

    for _ in 0..OPS {
        let key = rng.gen_range(0..3000);

        if rng.gen_bool(0.5) {
            map.set(key, ());
        } else {
            map.remove(&key);
        }

        assert_eq!(map.capacity(), capacity);
        assert!(map.max_probe_offset() >= offset);
        offset = map.max_probe_offset();
    }
}
