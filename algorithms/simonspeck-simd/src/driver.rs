//! Advanced Block Processing Driver
//!
//! The outer loop that turns a byte buffer into cipher blocks, dispatches to
//! the six-block and two-block kernels, and handles the small set of mode
//! flags callers need for ECB/CTR/CBC-style chaining. Generic over both
//! `Backend` and `CipherKernel`, so it is written exactly once regardless of
//! cipher, direction, or SIMD family.

use bitflags::bitflags;

use crate::backend::Backend;
use crate::kernels::constants::BLOCK_SIZE;
use crate::kernels::{CipherKernel, KeyLayout};

bitflags! {
    /// Mode-of-operation flags recognized by [`advanced_process_blocks`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u32 {
        /// XOR `xor_blocks` into the input before running the kernel.
        const XOR_INPUT = 1 << 0;
        /// Permit the six-block kernel; if clear, only the two-block path runs.
        const ALLOW_PARALLEL = 1 << 1;
        /// Treat `in_blocks` as a 128-bit big-endian counter register rather
        /// than a byte stream; the low 8 bytes increment by one per block.
        const IN_BLOCK_IS_COUNTER = 1 << 2;
        /// Do not advance `in_blocks`/`out_blocks`/`xor_blocks` between blocks.
        const DONT_INCREMENT_IN_OUT_POINTERS = 1 << 3;
        /// Step through the buffers backwards (used by CBC decryption).
        const REVERSE_DIRECTION = 1 << 4;
    }
}

/// # Safety
/// `counter` must be a valid, exclusively-borrowed 16-byte register.
#[inline]
#[allow(unsafe_code)]
unsafe fn increment_counter(counter: &mut [u8; 16]) {
    let mut carry = 1u16;
    for byte in counter[8..16].iter_mut().rev() {
        let sum = u16::from(*byte) + carry;
        *byte = sum as u8;
        carry = sum >> 8;
        if carry == 0 {
            break;
        }
    }
}

/// # Safety
/// `ptr` must be valid for a `BLOCK_SIZE`-byte read.
#[inline]
#[allow(unsafe_code)]
unsafe fn load_block(ptr: *const u8) -> [u8; 16] {
    let mut block = [0u8; 16];
    core::ptr::copy_nonoverlapping(ptr, block.as_mut_ptr(), BLOCK_SIZE);
    block
}

/// # Safety
/// `xor_ptr` must be valid for a `BLOCK_SIZE`-byte read.
#[inline]
#[allow(unsafe_code)]
unsafe fn xor_block_in_place(block: &mut [u8; 16], xor_ptr: *const u8) {
    for i in 0..BLOCK_SIZE {
        block[i] ^= *xor_ptr.add(i);
    }
}

/// # Safety
/// `ptr` must be valid for a `BLOCK_SIZE`-byte write.
#[inline]
#[allow(unsafe_code)]
unsafe fn store_block(ptr: *mut u8, block: &[u8; 16]) {
    core::ptr::copy_nonoverlapping(block.as_ptr(), ptr, BLOCK_SIZE);
}

/// Reads, optionally pre-XORs, one group of `N` blocks at stride-addressed
/// positions `0..N` from the current cursor. Advances `counter`, if present,
/// once per block read.
///
/// # Safety
/// `in_blocks` (and `xor_blocks`, when `pre_xor` is set) must be valid for
/// `N` `BLOCK_SIZE`-byte reads at the given `stride`.
#[inline]
#[allow(unsafe_code)]
unsafe fn read_group<const N: usize>(
    in_blocks: *const u8,
    xor_blocks: Option<*const u8>,
    stride: isize,
    pre_xor: bool,
    counter: &mut Option<[u8; 16]>,
) -> [[u8; 16]; N] {
    core::array::from_fn(|k| {
        let mut block = if let Some(reg) = counter {
            let b = *reg;
            increment_counter(reg);
            b
        } else {
            load_block(in_blocks.offset(k as isize * stride))
        };
        if pre_xor {
            if let Some(xp) = xor_blocks {
                xor_block_in_place(&mut block, xp.offset(k as isize * stride));
            }
        }
        block
    })
}

/// Writes one group of `N` blocks at stride-addressed positions `0..N`,
/// optionally post-XORing each against the same position in `xor_blocks`.
///
/// # Safety
/// `out_blocks` (and `xor_blocks`, when `post_xor` is set) must be valid for
/// `N` `BLOCK_SIZE`-byte accesses at the given `stride`.
#[inline]
#[allow(unsafe_code)]
unsafe fn write_group<const N: usize>(
    out_blocks: *mut u8,
    xor_blocks: Option<*const u8>,
    stride: isize,
    post_xor: bool,
    blocks: [[u8; 16]; N],
) {
    for (k, mut block) in blocks.into_iter().enumerate() {
        if post_xor {
            if let Some(xp) = xor_blocks {
                xor_block_in_place(&mut block, xp.offset(k as isize * stride));
            }
        }
        store_block(out_blocks.offset(k as isize * stride), &block);
    }
}

/// Process as many whole 16-byte blocks of `length` as the driver can, and
/// return the number of trailing bytes left untouched (always `length % 16`
/// for well-formed inputs).
///
/// `round_keys` must match `K::KEY_LAYOUT`: `rounds * 2` words for
/// [`KeyLayout::PreSplatted`], `rounds` words for [`KeyLayout::Scalar`].
///
/// When [`Flags::REVERSE_DIRECTION`] is set, `in_blocks`/`out_blocks` (and
/// `xor_blocks`, if present) must point at the *last* block of the region to
/// process; the driver walks backwards from there.
///
/// # Safety
///
/// `backend`'s required CPU feature must already be validated for the calling
/// code. `in_blocks` must be valid to read `length` bytes from (or, under
/// [`Flags::IN_BLOCK_IS_COUNTER`], 16 bytes), `out_blocks` valid to write
/// `length - result` bytes to, and `xor_blocks`, if `Some`, valid to read the
/// same span as `in_blocks`. None of `in_blocks`, `out_blocks`, `xor_blocks`
/// may alias except `in_blocks == out_blocks` (in-place processing).
#[allow(unsafe_code)]
#[allow(clippy::too_many_arguments)]
pub unsafe fn advanced_process_blocks<B: Backend, K: CipherKernel<B>>(
    backend: B,
    _kernel: K,
    round_keys: &[u64],
    rounds: usize,
    mut in_blocks: *const u8,
    mut xor_blocks: Option<*const u8>,
    mut out_blocks: *mut u8,
    mut length: usize,
    flags: Flags,
) -> usize {
    let expected_len = match K::KEY_LAYOUT {
        KeyLayout::PreSplatted => rounds * 2,
        KeyLayout::Scalar => rounds,
    };
    debug_assert!(round_keys.len() >= expected_len);
    debug_assert!(rounds > 0);

    let reverse = flags.contains(Flags::REVERSE_DIRECTION);
    let no_advance = flags.contains(Flags::DONT_INCREMENT_IN_OUT_POINTERS);
    let stride: isize = if no_advance {
        0
    } else if reverse {
        -(BLOCK_SIZE as isize)
    } else {
        BLOCK_SIZE as isize
    };

    let mut counter = if flags.contains(Flags::IN_BLOCK_IS_COUNTER) {
        Some(load_block(in_blocks))
    } else {
        None
    };

    let pre_xor = flags.contains(Flags::XOR_INPUT);
    let post_xor = xor_blocks.is_some() && !pre_xor;

    macro_rules! bulk_advance {
        ($n:expr) => {
            if !no_advance {
                let step = stride * $n as isize;
                if counter.is_none() {
                    in_blocks = in_blocks.offset(step);
                }
                out_blocks = out_blocks.offset(step);
                if let Some(xp) = xor_blocks {
                    xor_blocks = Some(xp.offset(step));
                }
            }
        };
    }

    if flags.contains(Flags::ALLOW_PARALLEL) {
        while length >= 6 * BLOCK_SIZE {
            let mut blocks = read_group::<6>(in_blocks, xor_blocks, stride, pre_xor, &mut counter);
            K::six(backend, &mut blocks, round_keys, rounds);
            write_group::<6>(out_blocks, xor_blocks, stride, post_xor, blocks);
            bulk_advance!(6);
            length -= 6 * BLOCK_SIZE;
        }
    }

    while length >= 2 * BLOCK_SIZE {
        let mut blocks = read_group::<2>(in_blocks, xor_blocks, stride, pre_xor, &mut counter);
        K::pair(backend, &mut blocks, round_keys, rounds);
        write_group::<2>(out_blocks, xor_blocks, stride, post_xor, blocks);
        bulk_advance!(2);
        length -= 2 * BLOCK_SIZE;
    }

    while length >= BLOCK_SIZE {
        let single = read_group::<1>(in_blocks, xor_blocks, stride, pre_xor, &mut counter)[0];
        let mut blocks = [single, single];
        K::pair(backend, &mut blocks, round_keys, rounds);
        write_group::<1>(out_blocks, xor_blocks, stride, post_xor, [blocks[0]]);
        bulk_advance!(1);
        length -= BLOCK_SIZE;
    }

    length
}
