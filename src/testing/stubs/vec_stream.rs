use crate::sampling::SamplingError;
use crate::streams::SampleStream;

/// Replays a fixed list of values, wrapping around at the end.
pub struct VecStream {
    pub values: Vec<f64>,
    idx: usize,
}

impl VecStream {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "VecStream needs at least one value");
        Self { values, idx: 0 }
    }
}

impl SampleStream for VecStream {
    fn describe(&self) -> String {
        format!("VecStream({} values)", self.values.len())
    }

    fn next_sample(&mut self) -> Result<f64, SamplingError> {
        let v = self.values[self.idx % self.values.len()];
        self.idx += 1;
        Ok(v)
    }

    fn restart(&mut self) {
        self.idx = 0;
    }
}
