use super::transform::SpeciesDensity;
use num_complex::Complex64;

/// One of the three partial structure factor spectra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Species A with itself.
    SelfA,
    /// Species A with species B.
    Cross,
    /// Species B with itself.
    SelfB,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::SelfA, Channel::Cross, Channel::SelfB];

    /// Short tag used in output file names (`I` for SP5 beads, `W` for water).
    pub fn tag(self) -> &'static str {
        match self {
            Channel::SelfA => "II",
            Channel::Cross => "IW",
            Channel::SelfB => "WW",
        }
    }
}

/// The three correlation spectra of a single frame, aligned with the k-grid.
///
/// - `self_a[k] = A[k]·conj(A[k]) / n_A`
/// - `cross[k]  = A[k]·conj(B[k]) / sqrt(n_A·n_B)`
/// - `self_b[k] = B[k]·conj(B[k]) / n_B`
///
/// Counts of zero are not guarded against; the resulting `NaN` values are part
/// of the output.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialStructureFactors {
    self_a: Vec<Complex64>,
    cross: Vec<Complex64>,
    self_b: Vec<Complex64>,
}

impl PartialStructureFactors {
    pub fn compute(a: &SpeciesDensity, b: &SpeciesDensity) -> Self {
        let n_a = a.count() as f64;
        let n_b = b.count() as f64;
        let cross_norm = (n_a * n_b).sqrt();

        let self_a = a.amplitudes().iter().map(|x| *x * x.conj() / n_a).collect();
        let self_b = b.amplitudes().iter().map(|x| *x * x.conj() / n_b).collect();
        let cross = a
            .amplitudes()
            .iter()
            .zip(b.amplitudes())
            .map(|(x, y)| *x * y.conj() / cross_norm)
            .collect();

        Self {
            self_a,
            cross,
            self_b,
        }
    }

    pub fn channel(&self, channel: Channel) -> &[Complex64] {
        match channel {
            Channel::SelfA => &self.self_a,
            Channel::Cross => &self.cross,
            Channel::SelfB => &self.self_b,
        }
    }

    /// Real parts of a channel; imaginary parts are dropped without checks.
    pub fn real_parts(&self, channel: Channel) -> Vec<f64> {
        self.channel(channel).iter().map(|c| c.re).collect()
    }

    pub fn len(&self) -> usize {
        self.self_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.self_a.is_empty()
    }
}
