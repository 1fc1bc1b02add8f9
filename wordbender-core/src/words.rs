/// Counts whitespace separated words across dialogue lines.
///
/// Hyphens are removed first, so "hi-there" is one word. No other
/// punctuation or case handling.
pub fn count_words<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .map(|line| line.as_ref().replace('-', ""))
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .count()
}

/// Total words across many episodes' worth of lines.
pub fn count_words_across<I, L>(episodes: I) -> usize
where
    I: IntoIterator<Item = L>,
    L: AsRef<[String]>,
{
    episodes
        .into_iter()
        .map(|lines| count_words(lines.as_ref()))
        .sum()
}
