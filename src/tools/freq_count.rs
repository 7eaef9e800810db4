use rustc_hash::FxHashMap;

use super::symbol_map::Symbol;

/// Symbol probabilities: occurrence count divided by payload length.
pub type Frequencies<S> = FxHashMap<S, f64>;

/// Returns an occurrence count for every distinct symbol in the input.
pub fn counts<S: Symbol>(data: &[S]) -> FxHashMap<S, usize> {
    let mut counts = FxHashMap::default();
    data.iter().for_each(|&el| *counts.entry(el).or_insert(0) += 1);
    counts
}

/// Returns the probability of each distinct symbol in the input. An empty input gives an
/// empty map, meaning there is nothing to encode.
pub fn frequencies<S: Symbol>(data: &[S]) -> Frequencies<S> {
    let total = data.len() as f64;
    counts(data)
        .into_iter()
        .map(|(sym, count)| (sym, count as f64 / total))
        .collect()
}
