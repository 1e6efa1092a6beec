/// How far past the current phase table a region's phase may reach (10 phases).
pub const MAX_PHASE_GROWTH: usize = 10;
/// Bundle format version written by this build
pub const BUNDLE_VERSION: u32 = 1;
/// Topology document inside a bundle directory
pub const NETWORK_FILE: &str = "network.yaml";
/// Iterations run by the CLI when neither the config nor `-n` says otherwise
pub const DEFAULT_ITERATIONS: usize = 1;
