pub mod key;
pub mod multiplicity;

pub use key::{key_to_frequency, BaselineKey, MAX_BASELINE_M, QUANTIZATION_SCALE};
pub use multiplicity::{
    compute_baseline_multiplicities, compute_baseline_multiplicities_parallel,
    BaselineMultiplicityMap,
};
