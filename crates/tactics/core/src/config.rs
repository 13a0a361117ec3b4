/// Tunable parameters shared by the tactical reasoning components.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TacticsConfig {
    /// Per-tick awareness increment while line of sight holds (and decrement
    /// while it doesn't). Awareness is always clamped to [0, 1].
    pub awareness_step: f32,

    /// Side length, in world units, of the square sample window the spatial
    /// reasoner evaluates around its agent.
    pub sample_extent: f32,
}

impl TacticsConfig {
    // ===== numerical tolerances =====
    /// Tolerance for "probability mass sums to one" comparisons; also the
    /// threshold below which a renormalization divisor counts as zero.
    pub const MASS_EPSILON: f32 = 1e-4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_AWARENESS_STEP: f32 = 0.1;
    pub const DEFAULT_SAMPLE_EXTENT: f32 = 8000.0;

    pub fn new() -> Self {
        Self {
            awareness_step: Self::DEFAULT_AWARENESS_STEP,
            sample_extent: Self::DEFAULT_SAMPLE_EXTENT,
        }
    }
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self::new()
    }
}
