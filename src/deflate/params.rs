//! Compression-level parameter table.
//!
//! | Levels | Parser | Notes                                     |
//! |--------|--------|-------------------------------------------|
//! | 1–4    | greedy | shallow chains, smaller hash table        |
//! | 5–12   | lazy   | one-step lookahead, deeper chain searches |

pub const CLEVEL_MIN: i32 = 1;
pub const CLEVEL_DEFAULT: i32 = 6;
pub const CLEVEL_MAX: i32 = 12;

/// How the parser turns match-finder results into tokens.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Strategy {
    /// Take the longest match at each position.
    Greedy,
    /// Defer a match by one byte when the next position offers a longer one.
    Lazy,
}

/// Per-level compression parameters.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LevelParams {
    pub strategy: Strategy,
    /// Maximum hash-chain candidates examined per position.
    pub max_search_depth: u32,
    /// Stop searching once a match at least this long is found.
    pub nice_match_len: usize,
    /// log2 of the number of hash-table buckets.
    pub hash_order: u32,
}

const fn p(strategy: Strategy, max_search_depth: u32, nice_match_len: usize, hash_order: u32) -> LevelParams {
    LevelParams { strategy, max_search_depth, nice_match_len, hash_order }
}

/// Index is the compression level; entry 0 is unused.
pub static LEVEL_TABLE: [LevelParams; (CLEVEL_MAX + 1) as usize] = [
    p(Strategy::Greedy,    2,  16, 14), /* 0, unused */
    p(Strategy::Greedy,    2,  16, 14), /* 1 */
    p(Strategy::Greedy,    6,  24, 14), /* 2 */
    p(Strategy::Greedy,   12,  32, 14), /* 3 */
    p(Strategy::Greedy,   24,  48, 14), /* 4 */
    p(Strategy::Lazy,     28,  48, 15), /* 5 */
    p(Strategy::Lazy,     35,  65, 15), /* 6 */
    p(Strategy::Lazy,    100, 130, 15), /* 7 */
    p(Strategy::Lazy,    300, 258, 15), /* 8 */
    p(Strategy::Lazy,    600, 258, 15), /* 9 */
    p(Strategy::Lazy,   1024, 258, 15), /* 10 */
    p(Strategy::Lazy,   2048, 258, 15), /* 11 */
    p(Strategy::Lazy,   4096, 258, 15), /* 12 */
];

/// Parameters for `level`, or `None` outside `CLEVEL_MIN..=CLEVEL_MAX`.
pub fn level_params(level: i32) -> Option<LevelParams> {
    if (CLEVEL_MIN..=CLEVEL_MAX).contains(&level) {
        Some(LEVEL_TABLE[level as usize])
    } else {
        None
    }
}
