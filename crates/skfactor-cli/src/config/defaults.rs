use crate::cli::LayoutKind;
use skfactor::engine::config as core_config;

pub struct DefaultsConfig {
    pub prefix: String,
    pub input: String,
    pub bins: usize,
    pub precision: usize,
    pub layout: LayoutKind,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            prefix: core_config::DEFAULT_PREFIX.to_string(),
            input: core_config::DEFAULT_INPUT.to_string(),
            bins: core_config::DEFAULT_BINS,
            precision: core_config::DEFAULT_PRECISION,
            layout: LayoutKind::Flat,
        }
    }
}
