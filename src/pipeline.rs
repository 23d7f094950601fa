use crate::error::ScrapeError;
use crate::extractors::Extractor;
use crate::records::ResultSet;

/// Decision gate between the static and dynamic extractors.
///
/// The static pass always runs first (cheap, no browser session). The
/// dynamic extractor runs when the caller forced it, or when the static
/// yield falls below `min_static_results`, the signal that the page is
/// script-rendered. Results are unioned under the (name, url) dedup rule:
/// static-discovered records are never discarded, since dynamic rendering
/// occasionally misses entries present in the initial HTML.
///
/// A dynamic failure is fatal only when dynamic mode was explicitly
/// requested; as an automatic fallback it degrades to static-only results
/// with a warning.
pub async fn run_with<S, D>(
    static_extractor: &S,
    dynamic_extractor: &D,
    url: &str,
    dynamic_forced: bool,
    min_static_results: usize,
) -> Result<ResultSet, ScrapeError>
where
    S: Extractor,
    D: Extractor,
{
    let mut results = ResultSet::new();

    match static_extractor.extract(url).await {
        Ok(set) => results.merge(set),
        Err(e) => {
            // A failed static attempt transitions to the dynamic attempt
            // rather than aborting the run.
            ::log::warn!("static extraction failed ({}), falling through to dynamic", e);
        }
    }

    let below_threshold = results.len() < min_static_results;
    if !dynamic_forced && !below_threshold {
        return Ok(results);
    }

    if below_threshold && !dynamic_forced {
        ::log::info!(
            "static pass found {} records (threshold {}), page is likely script-rendered",
            results.len(),
            min_static_results
        );
    }

    match dynamic_extractor.extract(url).await {
        Ok(set) => results.merge(set),
        Err(e) if dynamic_forced => return Err(e),
        Err(e) => {
            ::log::warn!(
                "dynamic extraction failed ({}), keeping static-only results",
                e
            );
        }
    }

    Ok(results)
}
