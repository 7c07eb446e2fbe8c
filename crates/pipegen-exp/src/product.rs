/// Odometer over the cartesian product of `0..radix` ranges.
///
/// The last position varies fastest, matching standard product iteration.
/// An empty radix list yields a single empty combination; any zero radix
/// yields nothing.
#[derive(Debug, Clone)]
pub(crate) struct IndexProduct {
    radices: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl IndexProduct {
    pub(crate) fn new(radices: Vec<usize>) -> Self {
        let next = if radices.contains(&0) {
            None
        } else {
            Some(vec![0; radices.len()])
        };
        Self { radices, next }
    }
}

impl Iterator for IndexProduct {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut advanced = current.clone();
        for pos in (0..self.radices.len()).rev() {
            advanced[pos] += 1;
            if advanced[pos] < self.radices[pos] {
                self.next = Some(advanced);
                return Some(current);
            }
            advanced[pos] = 0;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_positions_vary_fastest() {
        let combos: Vec<_> = IndexProduct::new(vec![2, 3]).collect();
        assert_eq!(
            combos,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn degenerate_shapes() {
        assert_eq!(IndexProduct::new(vec![]).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(IndexProduct::new(vec![3, 0, 2]).count(), 0);
        assert_eq!(IndexProduct::new(vec![1, 1, 1]).count(), 1);
    }
}
