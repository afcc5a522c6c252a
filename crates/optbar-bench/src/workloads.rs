//! Deterministic computations with no output of their own.
//!
//! Each one is cheap to describe but costs real cycles, and each returns a
//! value that nothing else depends on. That is exactly what dead-code
//! elimination removes.

/// `1² + 2² + ... + n²`, wrapping. Closed-form foldable when `n` is known.
pub fn sum_of_squares(n: u64) -> u64 {
    let mut acc = 0u64;
    for i in 1..=n {
        acc = acc.wrapping_add(i.wrapping_mul(i));
    }
    acc
}

/// Number of Collatz steps from `n` down to 1. Zero for `n <= 1`.
pub fn collatz_steps(mut n: u64) -> u32 {
    let mut steps = 0;
    while n > 1 {
        n = if n % 2 == 0 {
            n / 2
        } else {
            n.wrapping_mul(3).wrapping_add(1)
        };
        steps += 1;
    }
    steps
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a hash of `bytes`.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut h = FNV_OFFSET;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

/// `rounds` iterations of a xorshift-multiply mixer seeded with `seed`.
pub fn mix_rounds(seed: u64, rounds: u32) -> u64 {
    let mut x = seed;
    for _ in 0..rounds {
        x ^= x >> 33;
        x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
        x ^= x >> 33;
    }
    x
}
