use serde::Deserialize;

/// Controls where the window is re-anchored on a miss, and whether the fixed
/// cache setup cost is charged
///
/// The watermark separates two addressing regimes with different optimal
/// anchoring directions: below it accesses walk a linear region and the window
/// leads from the missed access, above it accesses land in the wrap-around
/// output region and the window trails the access instead. Without a watermark
/// the trailing branch is unreachable and every miss either leads or clamps on
/// the trace's own bound
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RelocationPolicy {
    /// Last index of the linear addressing regime, None to disable trailing
    pub high_watermark: Option<u64>,
    /// Charge two extra recomputations when the window was ever invalidated
    pub fixed_overhead: bool,
}

impl RelocationPolicy {
    /// Clamp-only behavior: no watermark, no fixed overhead
    pub fn clamping() -> Self {
        Self {
            high_watermark: None,
            fixed_overhead: false,
        }
    }

    /// Two-regime behavior with the watermark of the given parameter set
    pub fn watermarked(params: ParamSet) -> Self {
        Self {
            high_watermark: Some(params.watermark()),
            fixed_overhead: false,
        }
    }

    /// Two-regime behavior which also charges the fixed setup cost whenever
    /// the window relocated at all
    pub fn watermarked_with_overhead(params: ParamSet) -> Self {
        Self {
            fixed_overhead: true,
            ..Self::watermarked(params)
        }
    }
}

impl Default for RelocationPolicy {
    fn default() -> Self {
        Self::clamping()
    }
}

/// The protocol parameter sets the embedded implementation ships, with the
/// per-set constants the sweep needs
///
/// The watermark is the boundary between the linear region and the wrap-around
/// output region of the access space; lambda is the security parameter in bits
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
pub enum ParamSet {
    #[serde(alias = "128")]
    Faest128,
    #[serde(alias = "192")]
    Faest192,
    #[serde(alias = "256")]
    Faest256,
    #[serde(alias = "em128")]
    FaestEm128,
    #[serde(alias = "em192")]
    FaestEm192,
    #[serde(alias = "em256")]
    FaestEm256,
}

impl ParamSet {
    /// Last index of the linear addressing regime for this parameter set
    pub fn watermark(self) -> u64 {
        match self {
            ParamSet::Faest128 => 1600,
            ParamSet::Faest192 => 3264,
            ParamSet::Faest256 => 4000,
            ParamSet::FaestEm128 => 1280,
            ParamSet::FaestEm192 => 2304,
            ParamSet::FaestEm256 => 3584,
        }
    }

    /// Security parameter in bits
    pub fn lambda(self) -> u64 {
        match self {
            ParamSet::Faest128 | ParamSet::FaestEm128 => 128,
            ParamSet::Faest192 | ParamSet::FaestEm192 => 192,
            ParamSet::Faest256 | ParamSet::FaestEm256 => 256,
        }
    }

    /// Exclusive capacity bound covering the working set of both regimes
    ///
    /// Sweeping further than this is pointless, the window would span every
    /// index either regime can produce
    pub fn working_set_bound(self) -> u64 {
        self.watermark() + 2 * self.lambda() + 16
    }
}
