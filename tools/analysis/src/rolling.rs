//! Fixed-size rolling windows
//!
//! A window of `size` samples is either trailing (ends at the current
//! index) or centered. Centered windows span `[i + off + 1 − size, i + off]`
//! with `off = (size − 1) / 2`; for odd sizes that is exactly
//! `[i − size/2, i + size/2]`. A window that runs off either end of the
//! series, or that contains an undefined sample, yields `None`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::series::Series;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Trailing,
    Centered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub size: usize,
    pub alignment: Alignment,
}

impl Window {
    pub fn centered(size: usize) -> Self {
        Self {
            size,
            alignment: Alignment::Centered,
        }
    }

    pub fn trailing(size: usize) -> Self {
        Self {
            size,
            alignment: Alignment::Trailing,
        }
    }

    /// Sample range covered at index `i` of a series of length `len`.
    pub fn bounds(&self, i: usize, len: usize) -> Option<Range<usize>> {
        if self.size == 0 {
            return None;
        }
        let last = match self.alignment {
            Alignment::Trailing => i,
            Alignment::Centered => i + (self.size - 1) / 2,
        };
        if last >= len || last + 1 < self.size {
            return None;
        }
        Some(last + 1 - self.size..last + 1)
    }

    fn apply<F>(&self, values: &[Option<f64>], reduce: F) -> Series
    where
        F: Fn(&[f64]) -> Option<f64>,
    {
        let mut buf = Vec::with_capacity(self.size);
        (0..values.len())
            .map(|i| {
                let range = self.bounds(i, values.len())?;
                buf.clear();
                for v in &values[range] {
                    buf.push((*v)?);
                }
                reduce(&buf)
            })
            .collect()
    }

    pub fn mean(&self, values: &[Option<f64>]) -> Series {
        self.apply(values, |w| Some(w.iter().sum::<f64>() / w.len() as f64))
    }

    /// Rolling sample standard deviation; undefined for windows below two.
    pub fn std(&self, values: &[Option<f64>]) -> Series {
        self.apply(values, |w| {
            if w.len() < 2 {
                return None;
            }
            let m = w.iter().sum::<f64>() / w.len() as f64;
            let var = w.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (w.len() - 1) as f64;
            Some(var.sqrt())
        })
    }
}
