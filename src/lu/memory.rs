// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::def::*;
use crate::lu::GlobalLU;
use crate::{Error, Result};
use std::mem::size_of;

// Grows `vec` to at least `new_len` elements. Existing contents are kept and
// the vector is never shrunk. Returns false if the allocation failed or
// exceeds the configured limit.
fn try_grow<T: Copy + Default>(vec: &mut Vec<T>, new_len: usize, cfg: &MemoryConfig) -> bool {
    if let Some(limit) = cfg.limit {
        match new_len.checked_mul(size_of::<T>()) {
            Some(bytes) if bytes <= limit => {}
            _ => return false,
        }
    }
    if new_len > vec.len() {
        if vec.try_reserve_exact(new_len - vec.len()).is_err() {
            return false;
        }
        vec.resize(new_len, T::default());
    }
    true
}

/// Expand the existing storage of `vec`.
///
/// On the first allocation (`num_expansions == 0`), or when `keep_prev` is
/// set, exactly `length` elements are requested. Otherwise the request is
/// `max(length+1, alpha*length)`. The first `used` elements (in fact all
/// elements already stored) are preserved.
///
/// If the allocation fails on the first call, the error is returned at once
/// so that [`mem_init()`] can lower its estimate. With `keep_prev` the length
/// may not be reduced and the error is returned as well. Otherwise `alpha` is
/// moved towards 1 and the allocation retried up to `cfg.max_retries` times.
///
/// On success `length` is updated to the new length. On failure the length
/// that could not be allocated is returned.
pub(crate) fn expand<T: Copy + Default>(
    vec: &mut Vec<T>,
    length: &mut usize,
    used: usize,
    keep_prev: bool,
    num_expansions: &mut usize,
    cfg: &MemoryConfig,
) -> std::result::Result<(), usize> {
    debug_assert!(used <= vec.len());

    let mut alpha = f64::max(1.0, cfg.alpha);
    let grow = |alpha: f64, length: usize| usize::max(length + 1, (alpha * length as f64) as usize);

    let mut new_len = if *num_expansions == 0 || keep_prev {
        *length
    } else {
        grow(alpha, *length)
    };

    let mut tries = 0;
    while !try_grow(vec, new_len, cfg) {
        if *num_expansions == 0 || keep_prev || tries >= cfg.max_retries {
            return Err(new_len);
        }
        alpha = (alpha + 1.0) / 2.0;
        new_len = grow(alpha, *length);
        tries += 1;
        log::warn!(
            "expansion failed, retry {} with {} elements (alpha = {})",
            tries,
            new_len,
            alpha
        );
    }

    *length = new_len;
    if *num_expansions != 0 {
        *num_expansions += 1;
    }
    Ok(())
}

/// Expand the storage of one of the factor arrays during factorization.
///
/// `Usub` is always expanded after `Ucol` which has already moved the shared
/// length `nzumax`, so its previous length is kept.
pub(crate) fn mem_xpand<T: Copy + Default>(
    vec: &mut Vec<T>,
    maxlen: &mut usize,
    used: usize,
    mem_type: MemType,
    num_expansions: &mut usize,
    cfg: &MemoryConfig,
) -> Result<()> {
    expand(
        vec,
        maxlen,
        used,
        mem_type == MemType::Usub,
        num_expansions,
        cfg,
    )
    .map_err(|size| {
        log::warn!("unable to expand {:?} beyond {} elements", mem_type, used);
        Error::OutOfMemory { size }
    })
}

/// Allocate storage for the factors of an `m`-by-`n` matrix with `annz`
/// nonzeros.
///
/// The initial lengths are estimated from `fillratio`:
///
/// ```txt
///     nzumax = nzlumax = min(fillratio * (annz+1) / n, m) * n
///     nzlmax           = max(4, fillratio) * (annz+1) / 4
/// ```
///
/// If the estimate cannot be allocated it is halved until it succeeds, or
/// gives up with `OutOfMemory` once `nzlumax` drops below `annz`.
pub(crate) fn mem_init(
    m: usize,
    n: usize,
    annz: usize,
    fillratio: usize,
    glu: &mut GlobalLU,
    cfg: &MemoryConfig,
) -> Result<()> {
    assert!(n > 0);

    glu.num_expansions = 0;
    glu.nzumax = usize::min(fillratio * (annz + 1) / n, m) * n;
    glu.nzlumax = glu.nzumax;
    glu.nzlmax = usize::max(4, fillratio) * (annz + 1) / 4;

    glu.xsup = vec![0; n + 1];
    glu.supno = vec![EMPTY; n + 1];
    glu.xlsub = vec![0; n + 1];
    glu.xlusup = vec![0; n + 1];
    glu.xusub = vec![0; n + 1];
    glu.lusup.clear();
    glu.ucol.clear();
    glu.lsub.clear();
    glu.usub.clear();

    loop {
        let ok = expand(&mut glu.lusup, &mut glu.nzlumax, 0, false, &mut glu.num_expansions, cfg)
            .is_ok()
            && expand(&mut glu.ucol, &mut glu.nzumax, 0, false, &mut glu.num_expansions, cfg)
                .is_ok()
            && expand(&mut glu.lsub, &mut glu.nzlmax, 0, false, &mut glu.num_expansions, cfg)
                .is_ok()
            && expand(&mut glu.usub, &mut glu.nzumax, 0, true, &mut glu.num_expansions, cfg)
                .is_ok();
        if ok {
            break;
        }

        // reduce the estimated size and retry
        glu.nzlumax /= 2;
        glu.nzumax /= 2;
        glu.nzlmax /= 2;
        log::warn!(
            "initial factor allocation failed, reducing estimate to nzlumax = {}",
            glu.nzlumax
        );
        if glu.nzlumax < annz || glu.nzlumax == 0 {
            return Err(Error::OutOfMemory {
                size: glu.nzlumax,
            });
        }
    }

    glu.num_expansions += 1;
    Ok(())
}
