//! SPECK-128 Round Logic
//!
//! Generic over `Backend`; instantiated once per SIMD family. Encrypt kernels
//! expect a pre-splatted round-key schedule (`round_keys.len() == rounds * 2`,
//! each key duplicated into two adjacent `u64` slots); decrypt kernels expect
//! a scalar schedule (`round_keys.len() == rounds`, broadcast per round).

use super::{detranspose_pair, transpose_pair};
use crate::backend::Backend;
use crate::kernels::constants::{SPECK_ALPHA, SPECK_BETA};

#[inline]
#[allow(unsafe_code)]
unsafe fn encrypt_round<B: Backend>(x: B::Vector, y: B::Vector, k: B::Vector) -> (B::Vector, B::Vector) {
    let x = B::rotr64::<SPECK_ALPHA>(x);
    let x = B::add64(x, y);
    let x = B::xor(x, k);
    let y = B::rotl64::<SPECK_BETA>(y);
    let y = B::xor(y, x);
    (x, y)
}

#[inline]
#[allow(unsafe_code)]
unsafe fn decrypt_round<B: Backend>(x: B::Vector, y: B::Vector, k: B::Vector) -> (B::Vector, B::Vector) {
    let y = B::xor(y, x);
    let y = B::rotr64::<SPECK_BETA>(y);
    let x = B::xor(x, k);
    let x = B::sub64(x, y);
    let x = B::rotl64::<SPECK_ALPHA>(x);
    (x, y)
}

#[allow(unsafe_code)]
pub(super) unsafe fn encrypt_pair<B: Backend>(
    b: B,
    blocks: &mut [[u8; 16]; 2],
    round_keys: &[u64],
    rounds: usize,
) {
    let (mut x, mut y) = transpose_pair(b, &blocks[0], &blocks[1]);
    for i in 0..rounds {
        let k = B::load_aligned128(round_keys.as_ptr().add(i * 2).cast());
        let (nx, ny) = encrypt_round::<B>(x, y, k);
        x = nx;
        y = ny;
    }
    let (b0, b1) = blocks.split_at_mut(1);
    detranspose_pair(b, x, y, &mut b0[0], &mut b1[0]);
}

#[allow(unsafe_code)]
pub(super) unsafe fn decrypt_pair<B: Backend>(
    b: B,
    blocks: &mut [[u8; 16]; 2],
    round_keys: &[u64],
    rounds: usize,
) {
    let (mut x, mut y) = transpose_pair(b, &blocks[0], &blocks[1]);
    for i in (0..rounds).rev() {
        let k = B::broadcast64(&round_keys[i]);
        let (nx, ny) = decrypt_round::<B>(x, y, k);
        x = nx;
        y = ny;
    }
    let (b0, b1) = blocks.split_at_mut(1);
    detranspose_pair(b, x, y, &mut b0[0], &mut b1[0]);
}

#[allow(unsafe_code)]
pub(super) unsafe fn encrypt_six<B: Backend>(
    b: B,
    blocks: &mut [[u8; 16]; 6],
    round_keys: &[u64],
    rounds: usize,
) {
    let (g0, rest) = blocks.split_at_mut(2);
    let (g1, g2) = rest.split_at_mut(2);
    let (mut x0, mut y0) = transpose_pair(b, &g0[0], &g0[1]);
    let (mut x1, mut y1) = transpose_pair(b, &g1[0], &g1[1]);
    let (mut x2, mut y2) = transpose_pair(b, &g2[0], &g2[1]);

    for i in 0..rounds {
        let k = B::load_aligned128(round_keys.as_ptr().add(i * 2).cast());
        let (nx0, ny0) = encrypt_round::<B>(x0, y0, k);
        let (nx1, ny1) = encrypt_round::<B>(x1, y1, k);
        let (nx2, ny2) = encrypt_round::<B>(x2, y2, k);
        x0 = nx0;
        y0 = ny0;
        x1 = nx1;
        y1 = ny1;
        x2 = nx2;
        y2 = ny2;
    }

    detranspose_pair(b, x0, y0, &mut g0[0], &mut g0[1]);
    detranspose_pair(b, x1, y1, &mut g1[0], &mut g1[1]);
    detranspose_pair(b, x2, y2, &mut g2[0], &mut g2[1]);
}

#[allow(unsafe_code)]
pub(super) unsafe fn decrypt_six<B: Backend>(
    b: B,
    blocks: &mut [[u8; 16]; 6],
    round_keys: &[u64],
    rounds: usize,
) {
    let (g0, rest) = blocks.split_at_mut(2);
    let (g1, g2) = rest.split_at_mut(2);
    let (mut x0, mut y0) = transpose_pair(b, &g0[0], &g0[1]);
    let (mut x1, mut y1) = transpose_pair(b, &g1[0], &g1[1]);
    let (mut x2, mut y2) = transpose_pair(b, &g2[0], &g2[1]);

    for i in (0..rounds).rev() {
        let k = B::broadcast64(&round_keys[i]);
        let (nx0, ny0) = decrypt_round::<B>(x0, y0, k);
        let (nx1, ny1) = decrypt_round::<B>(x1, y1, k);
        let (nx2, ny2) = decrypt_round::<B>(x2, y2, k);
        x0 = nx0;
        y0 = ny0;
        x1 = nx1;
        y1 = ny1;
        x2 = nx2;
        y2 = ny2;
    }

    detranspose_pair(b, x0, y0, &mut g0[0], &mut g0[1]);
    detranspose_pair(b, x1, y1, &mut g1[0], &mut g1[1]);
    detranspose_pair(b, x2, y2, &mut g2[0], &mut g2[1]);
}
