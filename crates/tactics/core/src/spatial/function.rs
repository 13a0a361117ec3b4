//! Externally authored scoring configuration.
//!
//! A spatial function is an ordered stack of layers; each layer picks a raw
//! input signal, shapes it through a response curve, and combines the result
//! into the running per-cell accumulator. Layers are read-only at evaluation
//! time and order-sensitive by contract.

/// Raw input signal a scoring layer samples per cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalSource {
    /// No signal; the curve output is `curve.eval(0.0)`.
    #[default]
    None,
    /// Straight-line distance from the cell to the designated target.
    TargetRange,
    /// Shortest-path distance from the agent, per the reachability field.
    PathDistance,
    /// 1.0 when the cell has a clear ray to the target, else 0.0.
    LineOfSight,
}

/// How a layer's shaped value folds into the cell's accumulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombineOp {
    /// Leave the accumulator unchanged (useful while authoring).
    #[default]
    None,
    Add,
    Multiply,
}

/// One interpolation key of a response curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveKey {
    pub input: f32,
    pub output: f32,
}

impl CurveKey {
    pub const fn new(input: f32, output: f32) -> Self {
        Self { input, output }
    }
}

/// Piecewise-linear response curve mapping a raw signal value to a score
/// contribution.
///
/// Evaluation clamps to the first/last key outside the keyed range; a curve
/// with no keys evaluates to 0.0 everywhere.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<CurveKey>", into = "Vec<CurveKey>"))]
pub struct ResponseCurve {
    keys: Vec<CurveKey>,
}

// Curves serialize as their key list; rebuilding through `new` keeps the
// sorted-keys invariant for externally authored data.
impl From<Vec<CurveKey>> for ResponseCurve {
    fn from(keys: Vec<CurveKey>) -> Self {
        Self::new(keys)
    }
}

impl From<ResponseCurve> for Vec<CurveKey> {
    fn from(curve: ResponseCurve) -> Self {
        curve.keys
    }
}

impl ResponseCurve {
    /// Builds a curve, sorting the keys by input value.
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.sort_by(|a, b| a.input.total_cmp(&b.input));
        Self { keys }
    }

    /// Curve that returns `value` for every input.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![CurveKey::new(0.0, value)])
    }

    /// Straight line between two keys; the common authoring case.
    pub fn linear(from: CurveKey, to: CurveKey) -> Self {
        Self::new(vec![from, to])
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn eval(&self, input: f32) -> f32 {
        let keys = &self.keys;
        let (first, last) = match (keys.first(), keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if input <= first.input {
            return first.output;
        }
        if input >= last.input {
            return last.output;
        }

        // Find the segment containing `input` and interpolate.
        for window in keys.windows(2) {
            let (a, b) = (window[0], window[1]);
            if input <= b.input {
                let span = b.input - a.input;
                if span <= f32::EPSILON {
                    return b.output;
                }
                let t = (input - a.input) / span;
                return a.output + t * (b.output - a.output);
            }
        }
        last.output
    }
}

/// One configured scoring rule: signal, shaping curve, combine operator.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringLayer {
    pub signal: SignalSource,
    pub curve: ResponseCurve,
    pub op: CombineOp,
}

impl ScoringLayer {
    pub fn new(signal: SignalSource, curve: ResponseCurve, op: CombineOp) -> Self {
        Self { signal, curve, op }
    }
}

/// Ordered stack of scoring layers, applied in sequence over a score map.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpatialFunction {
    pub layers: Vec<ScoringLayer>,
}

impl SpatialFunction {
    pub fn new(layers: Vec<ScoringLayer>) -> Self {
        Self { layers }
    }
}
