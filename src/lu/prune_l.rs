// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::def::EMPTY;
use crate::lu::GlobalLU;

/// Prune the row structure of the supernodes updating column `jcol`.
///
/// For each segment whose supernode has a nonzero in the pivot row `pivrow`
/// and has not been pruned yet, the rows of its representative are
/// partitioned into pivoted rows first and rows still to be pivoted last.
/// `xprune[irep]` is set to the end of the pivoted part, so that later
/// depth first searches only traverse those rows. Single column supernodes
/// keep one set of subscripts, so their values are swapped along.
pub(crate) fn prune_l(
    jcol: usize,
    perm_r: &[usize],
    pivrow: usize,
    nseg: usize,
    segrep: &[usize],
    repfnz: &[usize],
    xprune: &mut [usize],
    glu: &mut GlobalLU,
) {
    let jsupno = glu.supno[jcol];

    for &irep in &segrep[..nseg] {
        let irep1 = irep + 1;

        // zero U-segment
        if repfnz[irep] == EMPTY {
            continue;
        }
        // a supernode overlapping the next panel is pruned at the
        // representative of the later part
        if glu.supno[irep] == glu.supno[irep1] {
            continue;
        }
        if glu.supno[irep] == jsupno {
            continue;
        }
        // already pruned
        if xprune[irep] < glu.xlsub[irep1] {
            continue;
        }

        let mut kmin = glu.xlsub[irep];
        let mut kend = glu.xlsub[irep1];
        if !glu.lsub[kmin..kend].contains(&pivrow) {
            continue;
        }

        let movnum = irep == glu.xsup[glu.supno[irep]];

        while kmin < kend {
            if perm_r[glu.lsub[kend - 1]] == EMPTY {
                kend -= 1;
            } else if perm_r[glu.lsub[kmin]] != EMPTY {
                kmin += 1;
            } else {
                // kmin not yet pivoted, kend-1 pivoted: interchange
                glu.lsub.swap(kmin, kend - 1);
                if movnum {
                    let minloc = glu.xlusup[irep] + (kmin - glu.xlsub[irep]);
                    let maxloc = glu.xlusup[irep] + (kend - 1 - glu.xlsub[irep]);
                    glu.lusup.swap(minloc, maxloc);
                }
                kmin += 1;
                kend -= 1;
            }
        }

        xprune[irep] = kmin;
    }
}
