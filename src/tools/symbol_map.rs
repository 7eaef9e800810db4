use std::fmt::Debug;
use std::hash::Hash;

/// Anything that can be counted, ordered and looked up can be Huffman coded.
/// Bytes (`u8`) and text (`char`) are the usual alphabets.
pub trait Symbol: Copy + Eq + Hash + Ord + Debug {}

impl<T: Copy + Eq + Hash + Ord + Debug> Symbol for T {}

/// Takes any collection of symbols and returns a sorted vec of the distinct symbols used.
pub fn sorted_symbols<S: Symbol>(symbols: impl IntoIterator<Item = S>) -> Vec<S> {
    let mut used: Vec<S> = symbols.into_iter().collect();
    used.sort_unstable();
    used.dedup();
    used
}

#[test]
fn sorted_symbols_test() {
    let mut compare = "Making a silly test.".as_bytes().to_vec();
    compare.sort_unstable();
    compare.dedup();
    assert_eq!(compare, sorted_symbols("Making a silly test.".bytes()));
}

#[test]
fn sorted_symbols_full_test() {
    let compare = (0..=255).collect::<Vec<u8>>();
    let all = (0..=255_u8).rev().chain(0..=255_u8);
    assert_eq!(compare, sorted_symbols(all));
}
