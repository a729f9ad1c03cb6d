//! Word-level progress for karaoke captions.
//!
//! The transcription source has no per-word timing, so a segment's duration
//! is divided evenly between its words. This is an approximation for
//! animation only: a long word and a short word get the same slice.

use crate::types::TimedSegment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "lowercase")]
pub enum WordPhase {
    Spoken,
    Active,
    Pending,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct WordState {
    pub word_index: usize,
    pub text: String,
    pub phase: WordPhase,
    /// Fraction of this word's slice already elapsed. Only meaningful for
    /// [`WordPhase::Active`]; zero otherwise.
    pub progress: f64,
}

/// Word states of one segment at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct WordProgress {
    pub words: Vec<WordState>,
    pub time_per_word: f64,
    /// Always within `[0, words.len() - 1]`.
    pub current_word_index: usize,
    /// Always within `[0, 1]`.
    pub progress: f64,
}

impl WordProgress {
    pub fn active_word(&self) -> Option<&WordState> {
        self.words.get(self.current_word_index)
    }
}

/// Split on single spaces. Empty tokens from repeated spaces are dropped;
/// embedded line breaks stay inside their word.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}

/// Compute the state of every word of `segment` at time `t`.
///
/// Returns `None` when the text has no words. A zero-length segment has no
/// usable slice width, so its last word is reported active at full progress.
pub fn word_progress(segment: &TimedSegment, t: f64) -> Option<WordProgress> {
    let words = split_words(&segment.text);
    if words.is_empty() {
        return None;
    }

    let count = words.len();
    let last = count - 1;
    let time_per_word = segment.duration() / count as f64;
    let elapsed = t - segment.start_seconds;

    let (current_word_index, progress) = if time_per_word > 0.0 && elapsed.is_finite() {
        // index and progress come from the same quotient so they agree at
        // word boundaries
        let quotient = elapsed / time_per_word;
        let slot = quotient.floor().clamp(0.0, last as f64);
        let progress = (quotient - slot).clamp(0.0, 1.0);
        (slot as usize, progress)
    } else {
        (last, 1.0)
    };

    let words = words
        .into_iter()
        .enumerate()
        .map(|(word_index, text)| {
            let phase = match word_index.cmp(&current_word_index) {
                std::cmp::Ordering::Less => WordPhase::Spoken,
                std::cmp::Ordering::Equal => WordPhase::Active,
                std::cmp::Ordering::Greater => WordPhase::Pending,
            };
            WordState {
                word_index,
                text: text.to_string(),
                phase,
                progress: if phase == WordPhase::Active { progress } else { 0.0 },
            }
        })
        .collect();

    Some(WordProgress {
        words,
        time_per_word,
        current_word_index,
        progress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn segment(start: f64, end: f64, text: &str) -> TimedSegment {
        TimedSegment {
            index: 1,
            start_seconds: start,
            end_seconds: end,
            text: text.to_string(),
        }
    }

    fn phases(p: &WordProgress) -> Vec<WordPhase> {
        p.words.iter().map(|w| w.phase).collect()
    }

    #[test]
    fn second_word_half_way() {
        let p = word_progress(&segment(0.0, 2.0, "one two"), 1.5).unwrap();

        assert_relative_eq!(p.time_per_word, 1.0);
        assert_eq!(p.current_word_index, 1);
        assert_relative_eq!(p.progress, 0.5);
        assert_eq!(phases(&p), [WordPhase::Spoken, WordPhase::Active]);
        assert_relative_eq!(p.words[0].progress, 0.0);
        assert_relative_eq!(p.words[1].progress, 0.5);
    }

    #[test]
    fn first_word_at_segment_start() {
        let p = word_progress(&segment(4.0, 7.0, "a b c"), 4.0).unwrap();

        assert_eq!(p.current_word_index, 0);
        assert_relative_eq!(p.progress, 0.0);
        assert_eq!(
            phases(&p),
            [WordPhase::Active, WordPhase::Pending, WordPhase::Pending]
        );
    }

    #[test]
    fn end_of_segment_clamps_to_last_word() {
        let p = word_progress(&segment(0.0, 3.0, "a b c"), 3.0).unwrap();

        assert_eq!(p.current_word_index, 2);
        assert!((0.0..=1.0).contains(&p.progress));
        assert_eq!(p.active_word().unwrap().text, "c");
    }

    #[test]
    fn time_before_start_clamps_to_first_word() {
        let p = word_progress(&segment(5.0, 6.0, "a b"), 4.0).unwrap();

        assert_eq!(p.current_word_index, 0);
        assert_relative_eq!(p.progress, 0.0);
    }

    #[test]
    fn repeated_spaces_and_newlines() {
        let p = word_progress(&segment(0.0, 2.0, "hello  there\nfriend"), 0.1).unwrap();

        let texts: Vec<&str> = p.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["hello", "there\nfriend"]);
    }

    #[test]
    fn word_boundary_starts_next_word_fresh() {
        // 1.0 / 0.1 is exactly 10 while 1.0 % 0.1 is just under 0.1
        let text = vec!["w"; 20].join(" ");
        let p = word_progress(&segment(0.0, 2.0, &text), 1.0).unwrap();

        assert_eq!(p.current_word_index, 10);
        assert_relative_eq!(p.progress, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_length_segment() {
        let p = word_progress(&segment(2.0, 2.0, "a b"), 2.0).unwrap();

        assert_eq!(p.current_word_index, 1);
        assert_relative_eq!(p.progress, 1.0);
    }

    #[test]
    fn no_words() {
        assert!(word_progress(&segment(0.0, 1.0, "   "), 0.5).is_none());
    }

    #[quickcheck_macros::quickcheck]
    fn prop_index_and_progress_in_bounds(
        start_ms: u32,
        len_ms: u16,
        word_count: u8,
        offset: u16,
    ) -> bool {
        let count = 1 + (word_count % 20) as usize;
        let text = vec!["w"; count].join(" ");
        let start = start_ms as f64 / 1000.0;
        let end = start + len_ms as f64 / 1000.0;
        let s = segment(start, end, &text);
        let t = start + (end - start) * (offset as f64 / u16::MAX as f64);

        let p = word_progress(&s, t).unwrap();
        p.current_word_index < count
            && (0.0..=1.0).contains(&p.progress)
            && p.words.iter().filter(|w| w.phase == WordPhase::Active).count() == 1
    }
}
