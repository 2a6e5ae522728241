//! SIMON-128 Round Logic
//!
//! Generic over `Backend`, same schedule-layout convention as [`super::speck`].
//! Rounds are processed in pairs; an odd `rounds` leaves the two halves
//! swapped relative to the even-round convention, so encryption runs one
//! extra single-round update followed by a swap, and decryption undoes
//! exactly that swap-then-round before entering the pairwise loop.

use super::{detranspose_pair, transpose_pair};
use crate::backend::Backend;
use crate::kernels::constants::{SIMON_A, SIMON_B, SIMON_J};

#[inline]
#[allow(unsafe_code)]
unsafe fn f<B: Backend>(v: B::Vector) -> B::Vector {
    let ta = B::rotl64::<SIMON_A>(v);
    let tb = B::rotl64::<SIMON_B>(v);
    let tj = B::rotl64::<SIMON_J>(v);
    B::xor(tj, B::and(ta, tb))
}

#[allow(unsafe_code)]
pub(super) unsafe fn encrypt_pair<B: Backend>(
    b: B,
    blocks: &mut [[u8; 16]; 2],
    round_keys: &[u64],
    rounds: usize,
) {
    let (mut x, mut y) = transpose_pair(b, &blocks[0], &blocks[1]);
    let full_rounds = rounds - (rounds % 2);

    for i in (0..full_rounds).step_by(2) {
        let k0 = B::load_aligned128(round_keys.as_ptr().add(i * 2).cast());
        let k1 = B::load_aligned128(round_keys.as_ptr().add((i + 1) * 2).cast());
        y = B::xor(y, B::xor(f::<B>(x), k0));
        x = B::xor(x, B::xor(f::<B>(y), k1));
    }

    if rounds % 2 == 1 {
        let klast = B::load_aligned128(round_keys.as_ptr().add((rounds - 1) * 2).cast());
        y = B::xor(y, B::xor(f::<B>(x), klast));
        core::mem::swap(&mut x, &mut y);
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
    let mut working_rounds = rounds;

    if rounds % 2 == 1 {
        core::mem::swap(&mut x, &mut y);
        let klast = B::broadcast64(&round_keys[rounds - 1]);
        y = B::xor(y, B::xor(f::<B>(x), klast));
        working_rounds -= 1;
    }

    for i in (0..working_rounds).step_by(2).rev() {
        let k1 = B::broadcast64(&round_keys[i + 1]);
        let k0 = B::broadcast64(&round_keys[i]);
        x = B::xor(x, B::xor(f::<B>(y), k1));
        y = B::xor(y, B::xor(f::<B>(x), k0));
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
    let full_rounds = rounds - (rounds % 2);

    for i in (0..full_rounds).step_by(2) {
        let k0 = B::load_aligned128(round_keys.as_ptr().add(i * 2).cast());
        let k1 = B::load_aligned128(round_keys.as_ptr().add((i + 1) * 2).cast());

        y0 = B::xor(y0, B::xor(f::<B>(x0), k0));
        x0 = B::xor(x0, B::xor(f::<B>(y0), k1));

        y1 = B::xor(y1, B::xor(f::<B>(x1), k0));
        x1 = B::xor(x1, B::xor(f::<B>(y1), k1));

        y2 = B::xor(y2, B::xor(f::<B>(x2), k0));
        x2 = B::xor(x2, B::xor(f::<B>(y2), k1));
    }

    if rounds % 2 == 1 {
        let klast = B::load_aligned128(round_keys.as_ptr().add((rounds - 1) * 2).cast());
        y0 = B::xor(y0, B::xor(f::<B>(x0), klast));
        y1 = B::xor(y1, B::xor(f::<B>(x1), klast));
        y2 = B::xor(y2, B::xor(f::<B>(x2), klast));
        core::mem::swap(&mut x0, &mut y0);
        core::mem::swap(&mut x1, &mut y1);
        core::mem::swap(&mut x2, &mut y2);
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
    let mut working_rounds = rounds;

    if rounds % 2 == 1 {
        core::mem::swap(&mut x0, &mut y0);
        core::mem::swap(&mut x1, &mut y1);
        core::mem::swap(&mut x2, &mut y2);
        let klast = B::broadcast64(&round_keys[rounds - 1]);
        y0 = B::xor(y0, B::xor(f::<B>(x0), klast));
        y1 = B::xor(y1, B::xor(f::<B>(x1), klast));
        y2 = B::xor(y2, B::xor(f::<B>(x2), klast));
        working_rounds -= 1;
    }

    for i in (0..working_rounds).step_by(2).rev() {
        let k1 = B::broadcast64(&round_keys[i + 1]);
        let k0 = B::broadcast64(&round_keys[i]);

        x0 = B::xor(x0, B::xor(f::<B>(y0), k1));
        y0 = B::xor(y0, B::xor(f::<B>(x0), k0));

        x1 = B::xor(x1, B::xor(f::<B>(y1), k1));
        y1 = B::xor(y1, B::xor(f::<B>(x1), k0));

        x2 = B::xor(x2, B::xor(f::<B>(y2), k1));
        y2 = B::xor(y2, B::xor(f::<B>(x2), k0));
    }

    detranspose_pair(b, x0, y0, &mut g0[0], &mut g0[1]);
    detranspose_pair(b, x1, y1, &mut g1[0], &mut g1[1]);
    detranspose_pair(b, x2, y2, &mut g2[0], &mut g2[1]);
}
