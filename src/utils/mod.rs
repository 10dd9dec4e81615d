//! Small combinatorial and number-theoretic helpers.

/// Test whether `n` is prime by trial division.
///
/// Level counts in this crate are tiny, so trial division up to `sqrt(n)`
/// is plenty.
///
/// # Examples
///
/// ```
/// use taguchi_l25::utils::is_prime;
///
/// assert!(is_prime(5));
/// assert!(!is_prime(4));
/// assert!(!is_prime(1));
/// ```
#[must_use]
pub fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3u32;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Compute binomial coefficient C(n, k).
///
/// Returns `None` if the result would overflow `u64`.
///
/// # Examples
///
/// ```
/// use taguchi_l25::utils::binomial;
///
/// assert_eq!(binomial(6, 2), Some(15));
/// assert_eq!(binomial(3, 5), Some(0));
/// ```
#[must_use]
pub fn binomial(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }

    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        result = result.checked_mul(n - i)?;
        result /= i + 1;
    }

    Some(result)
}

/// Generate all k-combinations of indices 0..n in lexicographic order.
///
/// # Examples
///
/// ```
/// use taguchi_l25::utils::combinations;
///
/// let pairs: Vec<Vec<usize>> = combinations(6, 2).collect();
/// assert_eq!(pairs.len(), 15);
/// assert_eq!(pairs[0], vec![0, 1]);
/// assert_eq!(pairs[14], vec![4, 5]);
/// ```
pub fn combinations(n: usize, k: usize) -> impl Iterator<Item = Vec<usize>> {
    CombinationIterator::new(n, k)
}

struct CombinationIterator {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    finished: bool,
}

impl CombinationIterator {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: (0..k).collect(),
            finished: k > n,
        }
    }
}

impl Iterator for CombinationIterator {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.k == 0 {
            self.finished = true;
            return Some(Vec::new());
        }

        let result = self.indices.clone();

        // Advance the rightmost index that still has room.
        let mut i = self.k;
        while i > 0 {
            i -= 1;
            if self.indices[i] < self.n - self.k + i {
                self.indices[i] += 1;
                for j in (i + 1)..self.k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return Some(result);
            }
        }

        self.finished = true;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            let count = binomial(self.n as u64, self.k as u64)
                .and_then(|c| usize::try_from(c).ok())
                .unwrap_or(usize::MAX);
            (0, Some(count))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime() {
        let primes: Vec<u32> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(0, 0), Some(1));
        assert_eq!(binomial(5, 5), Some(1));
        assert_eq!(binomial(6, 2), Some(15));
        assert_eq!(binomial(20, 10), Some(184_756));
    }

    #[test]
    fn test_combinations() {
        let c: Vec<_> = combinations(4, 2).collect();
        assert_eq!(
            c,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );

        assert_eq!(combinations(6, 2).count(), 15);
        assert_eq!(combinations(3, 0).count(), 1);
        assert_eq!(combinations(3, 4).count(), 0);
    }
}
