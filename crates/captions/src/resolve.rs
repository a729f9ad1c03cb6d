use crate::types::TimedSegment;

/// Position of the first segment, in declaration order, whose inclusive
/// `[start, end]` interval contains `t`.
///
/// Documents are not guaranteed to be time-sorted, so this is a linear scan
/// rather than a binary search. When segments overlap the earliest-declared
/// one wins. `None` is the ordinary "nothing is being spoken" answer,
/// including for times before the first or after the last segment.
pub fn resolve(segments: &[TimedSegment], t: f64) -> Option<usize> {
    segments.iter().position(|segment| segment.contains(t))
}

/// Like [`resolve`], returning the segment alongside its position.
pub fn active_segment(segments: &[TimedSegment], t: f64) -> Option<(usize, &TimedSegment)> {
    resolve(segments, t).map(|position| (position, &segments[position]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_srt;

    fn segment(index: u32, start: f64, end: f64) -> TimedSegment {
        TimedSegment {
            index,
            start_seconds: start,
            end_seconds: end,
            text: format!("segment {index}"),
        }
    }

    #[test]
    fn resolves_scenario_document() {
        let segments = decode_srt(
            "1\n00:00:01,000 --> 00:00:03,000\nHello world\n\n2\n00:00:04,000 --> 00:00:05,000\nBye\n",
        );

        assert_eq!(resolve(&segments, 2.0), Some(0));
        assert_eq!(resolve(&segments, 3.5), None);
        assert_eq!(resolve(&segments, 4.5), Some(1));
    }

    #[test]
    fn bounds_are_inclusive() {
        let segments = [segment(1, 1.0, 3.0), segment(2, 4.0, 5.0)];

        assert_eq!(resolve(&segments, 1.0), Some(0));
        assert_eq!(resolve(&segments, 3.0), Some(0));
        assert_eq!(resolve(&segments, 4.0 - 1e-9), None);
        assert_eq!(resolve(&segments, 5.0), Some(1));
    }

    #[test]
    fn out_of_range_and_empty() {
        let segments = [segment(1, 1.0, 3.0)];

        assert_eq!(resolve(&segments, -10.0), None);
        assert_eq!(resolve(&segments, 1_000.0), None);
        assert_eq!(resolve(&segments, f64::NAN), None);
        assert_eq!(resolve(&[], 1.0), None);
    }

    #[test]
    fn earliest_declared_wins_on_overlap() {
        let segments = [segment(1, 2.0, 6.0), segment(2, 0.0, 10.0), segment(3, 3.0, 4.0)];

        assert_eq!(resolve(&segments, 3.5), Some(0));
        assert_eq!(resolve(&segments, 1.0), Some(1));
        assert_eq!(resolve(&segments, 7.0), Some(1));
    }

    #[test]
    fn unsorted_documents_resolve_by_scan() {
        let segments = [segment(9, 8.0, 9.0), segment(3, 1.0, 2.0)];

        assert_eq!(resolve(&segments, 1.5), Some(1));
        let (position, active) = active_segment(&segments, 8.5).unwrap();
        assert_eq!(position, 0);
        assert_eq!(active.index, 9);
    }

    #[derive(Debug, Clone)]
    struct Doc(Vec<TimedSegment>);

    impl quickcheck::Arbitrary for Doc {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            let count = usize::arbitrary(g) % 12;
            Doc((0..count)
                .map(|i| {
                    let start = (u16::arbitrary(g) % 600) as f64 / 10.0;
                    let len = (u16::arbitrary(g) % 100) as f64 / 10.0;
                    segment(i as u32 + 1, start, start + len)
                })
                .collect())
        }
    }

    #[quickcheck_macros::quickcheck]
    fn prop_resolve_is_deterministic(doc: Doc, tenths: u16) -> bool {
        let t = (tenths % 700) as f64 / 10.0;
        resolve(&doc.0, t) == resolve(&doc.0, t)
    }

    #[quickcheck_macros::quickcheck]
    fn prop_earliest_containing_segment_returned(doc: Doc, tenths: u16) -> bool {
        let t = (tenths % 700) as f64 / 10.0;
        match resolve(&doc.0, t) {
            Some(i) => doc.0[i].contains(t) && doc.0[..i].iter().all(|s| !s.contains(t)),
            None => doc.0.iter().all(|s| !s.contains(t)),
        }
    }
}
