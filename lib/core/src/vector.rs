use serde::{Deserialize, Serialize};

/// A dense embedding vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self { data: vec![0.0; dim] }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Cosine similarity in [-1, 1].
    /// Returns 0.0 on dimension mismatch or when either side has zero norm.
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let dot_product: f32 = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum();

        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        (dot_product / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }

    /// Element-wise mean of a set of equally sized vectors.
    /// `None` when the set is empty or dimensions disagree.
    pub fn mean<'a, I>(vectors: I) -> Option<Vector>
    where
        I: IntoIterator<Item = &'a Vector>,
    {
        let mut iter = vectors.into_iter();
        let first = iter.next()?;
        let mut sum = first.data.clone();
        let mut count = 1usize;

        for v in iter {
            if v.dim() != sum.len() {
                return None;
            }
            for (acc, x) in sum.iter_mut().zip(v.data.iter()) {
                *acc += x;
            }
            count += 1;
        }

        let inv = 1.0 / count as f32;
        for x in &mut sum {
            *x *= inv;
        }
        Some(Vector::new(sum))
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Vector::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = Vector::new(vec![1.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0]);
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-6);

        let v3 = Vector::new(vec![1.0, 0.0]);
        let v4 = Vector::new(vec![0.0, 1.0]);
        assert!((v3.cosine_similarity(&v4) - 0.0).abs() < 1e-6);

        let v5 = Vector::new(vec![-1.0, 0.0]);
        assert!((v1.cosine_similarity(&v5) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate() {
        let zero = Vector::zeros(2);
        let v = Vector::new(vec![1.0, 1.0]);
        assert_eq!(zero.cosine_similarity(&v), 0.0);
        assert_eq!(v.cosine_similarity(&Vector::new(vec![1.0])), 0.0);
    }

    #[test]
    fn test_mean() {
        let a = Vector::new(vec![1.0, 2.0]);
        let b = Vector::new(vec![3.0, 4.0]);
        let mean = Vector::mean([&a, &b]).unwrap();
        assert_eq!(mean.as_slice(), &[2.0, 3.0]);

        assert!(Vector::mean(std::iter::empty::<&Vector>()).is_none());
        assert!(Vector::mean([&a, &Vector::new(vec![1.0])]).is_none());
    }
}
