//! Deterministic test data for join tests.

#![allow(dead_code)]

use lazyjoin::prelude::{Column, RowBatch, Scalar};

/// Small linear congruential generator so fixtures are reproducible.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Lcg(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    pub fn below(&mut self, n: u32) -> u32 {
        self.next_u32() % n
    }
}

/// `len` (id, key) pairs; keys drawn from `0..key_space`, ids are positions.
pub fn keyed_rows(seed: u64, len: usize, key_space: u32) -> Vec<(usize, u32)> {
    let mut rng = Lcg::new(seed);
    (0..len).map(|id| (id, rng.below(key_space))).collect()
}

/// Nested-loop reference for an inner join: (key, left, right) triples.
pub fn nested_loop_inner(
    left: &[(usize, u32)],
    right: &[(usize, u32)],
) -> Vec<(u32, (usize, u32), (usize, u32))> {
    let mut out = Vec::new();
    for l in left {
        for r in right {
            if l.1 == r.1 {
                out.push((l.1, *l, *r));
            }
        }
    }
    out
}

pub fn customers() -> RowBatch {
    RowBatch::new(vec![
        Column::new(
            "id",
            vec![Scalar::I64(1), Scalar::I64(2), Scalar::I64(3), Scalar::Null],
        ),
        Column::new(
            "name",
            vec!["ada".into(), "bob".into(), "cy".into(), "nobody".into()],
        ),
    ])
}

pub fn orders() -> RowBatch {
    RowBatch::new(vec![
        Column::new(
            "order_id",
            vec![
                Scalar::I64(100),
                Scalar::I64(101),
                Scalar::I64(102),
                Scalar::I64(103),
            ],
        ),
        Column::new(
            "id",
            vec![Scalar::I32(2), Scalar::I64(1), Scalar::I32(2), Scalar::I64(9)],
        ),
        Column::new(
            "total",
            vec![
                Scalar::F64(9.5),
                Scalar::F64(20.0),
                Scalar::F64(1.25),
                Scalar::F64(3.0),
            ],
        ),
    ])
}
