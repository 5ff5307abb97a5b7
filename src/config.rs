use clap::ValueEnum;

/// How the program counter behaves when `FX0A` is satisfied by a key press.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyResume {
    /// PC only advances at fetch; execution resumes right after `FX0A`.
    #[default]
    Once,
    /// Resumption adds another 2, skipping the instruction after `FX0A`.
    SkipNext,
}

/// When `EX9E`/`EXA1` forget the last observed key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyConsumption {
    /// Forget the key whenever it differs from VX.
    #[default]
    OnMismatch,
    /// Forget the key whenever the skip is not taken.
    UnlessSkipped,
    /// Never forget; both checks are pure reads.
    Never,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Seed for `CXNN`. `None` draws from entropy.
    pub seed: Option<u64>,
    pub key_resume: KeyResume,
    pub key_consumption: KeyConsumption,
}

impl Config {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_key_resume(mut self, key_resume: KeyResume) -> Self {
        self.key_resume = key_resume;
        self
    }

    pub fn with_key_consumption(mut self, key_consumption: KeyConsumption) -> Self {
        self.key_consumption = key_consumption;
        self
    }
}
