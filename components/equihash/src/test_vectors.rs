//! Known solutions for the `(96, 5)` toy parameters and corrupted variants of them.

use crate::{params::Params, verify::Kind};

pub(crate) const TOY_PARAMS: Params = Params { n: 96, k: 5 };

pub(crate) const TOY_INPUT: &[u8] =
    b"Equihash is an asymmetric PoW based on the Generalised Birthday problem.";

pub(crate) const fn toy_nonce(first: u8) -> [u8; 32] {
    let mut nonce = [0; 32];
    nonce[0] = first;
    nonce
}

pub(crate) struct ValidVector {
    pub(crate) params: Params,
    pub(crate) input: &'static [u8],
    pub(crate) nonce: [u8; 32],
    pub(crate) solutions: &'static [&'static [u32]],
}

pub(crate) struct InvalidVector {
    pub(crate) params: Params,
    pub(crate) input: &'static [u8],
    pub(crate) nonce: [u8; 32],
    pub(crate) solution: &'static [u32],
    pub(crate) error: Kind,
}

/// The canonical solution for [`TOY_INPUT`] with nonce 1.
pub(crate) const TOY_SOLUTION: &[u32] = &[
    2261, 15185, 36112, 104243, 23779, 118390, 118332, 130041, 32642, 69878, 76925, 80080, 45858,
    116805, 92842, 111026, 15972, 115059, 85191, 90330, 68190, 122819, 81830, 91132, 23460, 49807,
    52426, 80391, 69567, 114474, 104973, 122568,
];

pub(crate) const VALID_TEST_VECTORS: &[ValidVector] = &[ValidVector {
    params: TOY_PARAMS,
    input: TOY_INPUT,
    nonce: toy_nonce(1),
    solutions: &[TOY_SOLUTION],
}];

const fn invalid(solution: &'static [u32], error: Kind) -> InvalidVector {
    InvalidVector {
        params: TOY_PARAMS,
        input: TOY_INPUT,
        nonce: toy_nonce(1),
        solution,
        error,
    }
}

pub(crate) const INVALID_TEST_VECTORS: &[InvalidVector] = &[
    // Change one index
    invalid(
        &[
            2262, 15185, 36112, 104243, 23779, 118390, 118332, 130041, 32642, 69878, 76925, 80080,
            45858, 116805, 92842, 111026, 15972, 115059, 85191, 90330, 68190, 122819, 81830, 91132,
            23460, 49807, 52426, 80391, 69567, 114474, 104973, 122568,
        ],
        Kind::Collision,
    ),
    // Swap two arbitrary indices
    invalid(
        &[
            45858, 15185, 36112, 104243, 23779, 118390, 118332, 130041, 32642, 69878, 76925, 80080,
            2261, 116805, 92842, 111026, 15972, 115059, 85191, 90330, 68190, 122819, 81830, 91132,
            23460, 49807, 52426, 80391, 69567, 114474, 104973, 122568,
        ],
        Kind::Collision,
    ),
    // Reverse the first pair of indices
    invalid(
        &[
            15185, 2261, 36112, 104243, 23779, 118390, 118332, 130041, 32642, 69878, 76925, 80080,
            45858, 116805, 92842, 111026, 15972, 115059, 85191, 90330, 68190, 122819, 81830, 91132,
            23460, 49807, 52426, 80391, 69567, 114474, 104973, 122568,
        ],
        Kind::OutOfOrder,
    ),
    // Swap the first half and second half
    invalid(
        &[
            15972, 115059, 85191, 90330, 68190, 122819, 81830, 91132, 23460, 49807, 52426, 80391,
            69567, 114474, 104973, 122568, 2261, 15185, 36112, 104243, 23779, 118390, 118332,
            130041, 32642, 69878, 76925, 80080, 45858, 116805, 92842, 111026,
        ],
        Kind::OutOfOrder,
    ),
    // Sort the indices
    invalid(
        &[
            2261, 15185, 15972, 23460, 23779, 32642, 36112, 45858, 49807, 52426, 68190, 69567,
            69878, 76925, 80080, 80391, 81830, 85191, 90330, 91132, 92842, 104243, 104973, 111026,
            114474, 115059, 116805, 118332, 118390, 122568, 122819, 130041,
        ],
        Kind::Collision,
    ),
    // Duplicate first half
    invalid(
        &[
            2261, 15185, 36112, 104243, 23779, 118390, 118332, 130041, 32642, 69878, 76925, 80080,
            45858, 116805, 92842, 111026, 2261, 15185, 36112, 104243, 23779, 118390, 118332,
            130041, 32642, 69878, 76925, 80080, 45858, 116805, 92842, 111026,
        ],
        Kind::DuplicateIdxs,
    ),
];
