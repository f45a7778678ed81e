use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
    iter::{Product, Sum},
    num::ParseIntError,
};

use rand::seq::IndexedRandom;

/// Removes every item equal to `equal_to`.
pub fn prune_equal<T: PartialEq + Clone>(input: &[T], equal_to: &T) -> Vec<T> {
    input.iter().filter(|item| *item != equal_to).cloned().collect()
}

pub fn prune_empty_strings<S: AsRef<str> + Clone>(input: &[S]) -> Vec<S> {
    input.iter().filter(|s| !s.as_ref().is_empty()).cloned().collect()
}

/// Removes duplicates, keeping the first occurrence of each item.
pub fn dedupe<T: Eq + Hash + Clone>(input: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(input.len());
    input.iter().filter(|item| seen.insert(*item)).cloned().collect()
}

pub fn pick_random<T>(input: &[T]) -> Option<&T> {
    input.choose(&mut rand::rng())
}

/// True if every item of `s2` is present in `s1`.
pub fn contains_items<T: PartialEq>(s1: &[T], s2: &[T]) -> bool {
    s2.iter().all(|item| s1.contains(item))
}

pub fn to_int<S: AsRef<str>>(input: &[S]) -> Result<Vec<i64>, ParseIntError> {
    input.iter().map(|s| s.as_ref().parse::<i64>()).collect()
}

/// True if both slices hold the same items with the same multiplicity, in any order.
pub fn elements_match<T: PartialEq + Clone>(s1: &[T], s2: &[T]) -> bool {
    let (extra1, extra2) = diff(s1, s2);
    extra1.is_empty() && extra2.is_empty()
}

/// Items of `s1` without a counterpart in `s2` and vice versa, counting duplicates.
pub fn diff<T: PartialEq + Clone>(s1: &[T], s2: &[T]) -> (Vec<T>, Vec<T>) {
    let mut visited = vec![false; s2.len()];
    let mut extra1 = Vec::new();

    for item in s1 {
        let found = s2
            .iter()
            .enumerate()
            .position(|(j, other)| !visited[j] && other == item);
        match found {
            Some(j) => visited[j] = true,
            None => extra1.push(item.clone()),
        }
    }

    let extra2 = s2
        .iter()
        .zip(visited)
        .filter(|(_, seen)| !seen)
        .map(|(item, _)| item.clone())
        .collect();
    (extra1, extra2)
}

/// Concatenates the slices and removes duplicates.
pub fn merge<T: Eq + Hash + Clone>(slices: &[&[T]]) -> Vec<T> {
    dedupe(&slices.concat())
}

/// Unique items of `base` that appear in none of `others`, in `base` order.
pub fn array_diff<T: Eq + Hash + Clone>(base: &[T], others: &[&[T]]) -> Vec<T> {
    let excluded: HashSet<&T> = others.iter().flat_map(|other| other.iter()).collect();
    dedupe(base).into_iter().filter(|item| !excluded.contains(item)).collect()
}

/// Unique items of `base` that appear in every one of `others`, in `base` order.
pub fn array_intersect<T: Eq + Hash + Clone>(base: &[T], others: &[&[T]]) -> Vec<T> {
    let mut hits: HashMap<&T, usize> = HashMap::new();
    for other in others {
        let other: HashSet<&T> = other.iter().collect();
        for item in other {
            *hits.entry(item).or_default() += 1;
        }
    }
    dedupe(base)
        .into_iter()
        .filter(|item| others.is_empty() || hits.get(item).copied().unwrap_or(0) == others.len())
        .collect()
}

/// Splits `data` into chunks of `len` items; the last one may be shorter. A zero `len` yields nothing.
pub fn array_chunk<T: Clone>(data: &[T], len: usize) -> Vec<Vec<T>> {
    if len == 0 {
        return Vec::new();
    }
    data.chunks(len).map(<[T]>::to_vec).collect()
}

pub fn array_sum<T: Copy + Sum<T>>(data: &[T]) -> T {
    data.iter().copied().sum()
}

pub fn array_product<T: Copy + Product<T>>(data: &[T]) -> T {
    data.iter().copied().product()
}

/// Calls `callback` with each item and its index until it returns false.
pub fn array_walk<T, F>(data: &[T], mut callback: F)
where
    F: FnMut(&T, usize) -> bool,
{
    for (idx, item) in data.iter().enumerate() {
        if !callback(item, idx) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune() {
        assert_eq!(prune_equal(&[1, 0, 2, 0], &0), vec![1, 2]);
        assert_eq!(prune_empty_strings(&["a", "", "b"]), vec!["a", "b"]);
    }

    #[test]
    fn test_dedupe_keeps_order() {
        assert_eq!(dedupe(&["b", "a", "b", "c", "a"]), vec!["b", "a", "c"]);
        assert!(dedupe::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_pick_random() {
        let items = [1, 2, 3];
        assert!(items.contains(pick_random(&items).unwrap()));
        assert!(pick_random::<u8>(&[]).is_none());
    }

    #[test]
    fn test_contains_items_and_to_int() {
        assert!(contains_items(&[1, 2, 3], &[3, 1]));
        assert!(!contains_items(&[1, 2, 3], &[4]));
        assert_eq!(to_int(&["1", "-2", "30"]).unwrap(), vec![1, -2, 30]);
        assert!(to_int(&["1", "x"]).is_err());
    }

    #[test]
    fn test_elements_match_and_diff() {
        assert!(elements_match(&[1, 2, 2, 3], &[2, 3, 2, 1]));
        assert!(!elements_match(&[1, 2, 2], &[1, 2]));
        assert!(elements_match::<u8>(&[], &[]));
        let (extra1, extra2) = diff(&[1, 2, 2, 4], &[2, 3]);
        assert_eq!(extra1, vec![1, 2, 4]);
        assert_eq!(extra2, vec![3]);
    }

    #[test]
    fn test_merge() {
        assert_eq!(merge(&[&[1, 2][..], &[2, 3][..]]), vec![1, 2, 3]);
    }

    #[test]
    fn test_array_diff_and_intersect() {
        assert_eq!(array_diff(&[1, 2, 3, 4, 1], &[&[2][..], &[4, 5][..]]), vec![1, 3]);
        assert_eq!(array_diff(&[1, 2], &[]), vec![1, 2]);
        assert_eq!(array_intersect(&[1, 2, 3, 4], &[&[2, 3, 9][..], &[3, 2, 2][..]]), vec![2, 3]);
        assert_eq!(array_intersect(&[1, 2], &[&[2, 2][..]]), vec![2]);
        assert!(array_intersect::<u8>(&[], &[&[1][..]]).is_empty());
    }

    #[test]
    fn test_array_chunk() {
        assert_eq!(array_chunk(&[1, 2, 3, 4, 5], 2), vec![vec![1, 2], vec![3, 4], vec![5]]);
        assert!(array_chunk(&[1, 2], 0).is_empty());
    }

    #[test]
    fn test_sum_product_walk() {
        assert_eq!(array_sum(&[1, 2, 3]), 6);
        assert_eq!(array_product(&[2.0, 2.5]), 5.0);
        assert_eq!(array_product::<i32>(&[]), 1);

        let mut seen = Vec::new();
        array_walk(&["a", "b", "c"], |item, idx| {
            seen.push((*item, idx));
            idx < 1
        });
        assert_eq!(seen, vec![("a", 0), ("b", 1)]);
    }
}
