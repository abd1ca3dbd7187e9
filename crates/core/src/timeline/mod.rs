use crate::SampleBuffer;

/// Evenly spaced timestamps from `0` to the buffer duration, inclusive.
///
/// Values are produced on demand instead of being materialised up front. A
/// single-frame or empty axis is degenerate: every lookup yields `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    len: usize,
    duration_seconds: f64,
}

impl TimeAxis {
    pub fn new(len: usize, duration_seconds: f64) -> Self {
        Self {
            len,
            duration_seconds,
        }
    }

    /// Builds the axis spanning every frame of `buffer`.
    pub fn for_buffer(buffer: &SampleBuffer) -> Self {
        Self::new(buffer.len(), buffer.duration_seconds())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Distance between consecutive points, or `None` when the axis is
    /// degenerate.
    pub fn step(&self) -> Option<f64> {
        (self.len > 1).then(|| self.duration_seconds / (self.len - 1) as f64)
    }

    /// Timestamp of frame `index`. The last point lands exactly on the
    /// duration.
    pub fn at(&self, index: usize) -> f64 {
        match self.step() {
            None => 0.0,
            Some(_) if index + 1 == self.len => self.duration_seconds,
            Some(step) => index as f64 * step,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |index| self.at(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_zero_to_duration() {
        let axis = TimeAxis::new(5, 2.0);
        let points: Vec<f64> = axis.iter().collect();

        assert_eq!(points, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(axis.step(), Some(0.5));
    }

    #[test]
    fn degenerate_axis_never_divides() {
        let single = TimeAxis::new(1, 0.25);
        assert_eq!(single.step(), None);
        assert_eq!(single.at(0), 0.0);

        let empty = TimeAxis::new(0, 0.0);
        assert!(empty.is_empty());
        assert_eq!(empty.iter().count(), 0);
    }
}
