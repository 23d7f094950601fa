use crate::error::ScrapeError;
use crate::extractors::dynamic_page::{ScrollLimits, ScrollSurface, scroll_until_stable};
use crate::pacing::NoPacer;

/// Scripted surface: yields each height in turn, repeating the last one
/// once the script runs out. The first height is the pre-scroll baseline.
struct ScriptedSurface {
    heights: Vec<u64>,
    reads: usize,
    scrolls: u32,
}

impl ScriptedSurface {
    fn new(heights: Vec<u64>) -> Self {
        Self {
            heights,
            reads: 0,
            scrolls: 0,
        }
    }
}

impl ScrollSurface for ScriptedSurface {
    async fn content_height(&mut self) -> Result<u64, ScrapeError> {
        let i = self.reads.min(self.heights.len() - 1);
        self.reads += 1;
        Ok(self.heights[i])
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), ScrapeError> {
        self.scrolls += 1;
        Ok(())
    }
}

/// Surface whose height grows every round, never stagnating
struct EndlessSurface {
    height: u64,
}

impl ScrollSurface for EndlessSurface {
    async fn content_height(&mut self) -> Result<u64, ScrapeError> {
        self.height += 100;
        Ok(self.height)
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), ScrapeError> {
        Ok(())
    }
}

/// Surface that fails mid-scroll, standing in for a dropped session
struct FailingSurface {
    rounds_before_failure: u32,
}

impl ScrollSurface for FailingSurface {
    async fn content_height(&mut self) -> Result<u64, ScrapeError> {
        if self.rounds_before_failure == 0 {
            return Err(ScrapeError::RenderSession("session dropped".to_string()));
        }
        self.rounds_before_failure -= 1;
        Ok(1000)
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), ScrapeError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_loop_stops_exactly_stagnation_limit_rounds_after_last_growth() {
    // Baseline 100; growth on rounds 1 and 2; stable from round 3 on.
    let mut surface = ScriptedSurface::new(vec![100, 200, 300, 300, 300, 300, 300, 300]);
    let limits = ScrollLimits {
        max_rounds: 100,
        stagnation_limit: 3,
    };

    let rounds = scroll_until_stable(&mut surface, &NoPacer, &limits)
        .await
        .unwrap();

    // Height last changed at round 2, so rounds 3, 4 and 5 are stagnant
    assert_eq!(rounds, 5);
    assert_eq!(surface.scrolls, 5);
}

#[tokio::test]
async fn test_single_stagnant_round_does_not_stop_the_loop() {
    // Jitter: one flat round between two growth rounds must not terminate
    let mut surface = ScriptedSurface::new(vec![100, 200, 200, 300, 300, 300, 300]);
    let limits = ScrollLimits {
        max_rounds: 100,
        stagnation_limit: 3,
    };

    let rounds = scroll_until_stable(&mut surface, &NoPacer, &limits)
        .await
        .unwrap();

    // Growth at rounds 1 and 3; stagnant at 4, 5, 6
    assert_eq!(rounds, 6);
}

#[tokio::test]
async fn test_never_stagnating_page_stops_at_the_round_cap() {
    let mut surface = EndlessSurface { height: 0 };
    let limits = ScrollLimits {
        max_rounds: 7,
        stagnation_limit: 3,
    };

    let rounds = scroll_until_stable(&mut surface, &NoPacer, &limits)
        .await
        .unwrap();

    assert_eq!(rounds, 7);
}

#[tokio::test]
async fn test_immediately_stable_page_stops_after_stagnation_limit() {
    let mut surface = ScriptedSurface::new(vec![500]);
    let limits = ScrollLimits {
        max_rounds: 100,
        stagnation_limit: 3,
    };

    let rounds = scroll_until_stable(&mut surface, &NoPacer, &limits)
        .await
        .unwrap();

    assert_eq!(rounds, 3);
}

#[tokio::test]
async fn test_surface_failure_propagates() {
    let mut surface = FailingSurface {
        rounds_before_failure: 2,
    };
    let limits = ScrollLimits {
        max_rounds: 100,
        stagnation_limit: 3,
    };

    let result = scroll_until_stable(&mut surface, &NoPacer, &limits).await;
    assert!(matches!(result, Err(ScrapeError::RenderSession(_))));
}
