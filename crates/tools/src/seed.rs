use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn resolve(cli_seed: Option<u64>) -> Self {
        match cli_seed {
            Some(seed) => Self::Cli(seed),
            None => Self::Generated(generate_runtime_seed()),
        }
    }

    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cli(_) => "from --seed",
            Self::Generated(_) => "generated",
        }
    }
}

static RUNTIME_SEEDS_ISSUED: AtomicU64 = AtomicU64::new(0);

/// Folds the wall clock, the process id, and a per-process counter into one seed.
pub fn generate_runtime_seed() -> u64 {
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map(|since| since.as_nanos()).unwrap_or(0);
    let issued = RUNTIME_SEEDS_ISSUED.fetch_add(1, Ordering::Relaxed);
    let clock = (nanos as u64) ^ ((nanos >> 64) as u64);
    splitmix(clock ^ u64::from(process::id()).rotate_left(17) ^ issued.rotate_left(7))
}

fn splitmix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
