use std::fmt;

/// Errors raised while configuring or running the solver.
///
/// [`Error::InvalidParams`], [`Error::SolutionSizeMismatch`] and
/// [`Error::SolutionTooLarge`] are configuration errors
/// and should be treated as fatal at startup. Overflow variants abort only the current
/// solve attempt (see [`Error::is_resource_exhaustion`]); the caller is expected to move
/// on to the next nonce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// `(n, k)` do not divide into the required bit widths.
    InvalidParams { n: u32, k: u32 },
    /// The derived solution length disagrees with the fixed wire length.
    SolutionSizeMismatch { expected: usize, derived: usize },
    /// The packed solution does not fit behind a three-byte compact length.
    SolutionTooLarge { size: usize },
    /// An L1 bucket of the given generation ran out of slots.
    BucketOverflow { generation: u32, bucket: usize },
    /// Too many values of one L1 bucket share the same L2 key.
    SubBucketOverflow { generation: u32, bucket: usize },
    /// The collision tree is full.
    TreeOverflow { generation: u32 },
    /// A packed solution does not have the length derived from the parameters.
    InvalidSolutionLength { expected: usize, actual: usize },
    /// `advance` was called for a generation other than the next one.
    GenerationOutOfOrder { expected: u32, requested: u32 },
    /// `advance` was called before `generate`.
    NotGenerated,
}

impl Error {
    /// Returns `true` for capacity faults, which only invalidate the current nonce.
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(
            self,
            Error::BucketOverflow { .. } | Error::SubBucketOverflow { .. } | Error::TreeOverflow { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParams { n, k } => write!(f, "invalid parameters n = {}, k = {}", n, k),
            Error::SolutionSizeMismatch { expected, derived } => write!(
                f,
                "derived solution size {} does not match the wire size {}",
                derived, expected
            ),
            Error::SolutionTooLarge { size } => write!(
                f,
                "solution size {} exceeds the compact length limit of {}",
                size,
                u16::MAX
            ),
            Error::BucketOverflow { generation, bucket } => write!(
                f,
                "bucket {} overflowed while storing generation {}",
                bucket, generation
            ),
            Error::SubBucketOverflow { generation, bucket } => write!(
                f,
                "sub-bucket of bucket {} overflowed in generation {}",
                bucket, generation
            ),
            Error::TreeOverflow { generation } => {
                write!(f, "collision tree overflowed in generation {}", generation)
            }
            Error::InvalidSolutionLength { expected, actual } => write!(
                f,
                "solution is {} bytes long, expected {}",
                actual, expected
            ),
            Error::GenerationOutOfOrder {
                expected,
                requested,
            } => write!(
                f,
                "cannot advance to generation {}, next generation is {}",
                requested, expected
            ),
            Error::NotGenerated => f.write_str("no candidates have been generated"),
        }
    }
}

impl std::error::Error for Error {}
