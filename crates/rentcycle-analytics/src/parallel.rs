//! Fallible fan-out for bulk reports.
//!
//! Bulk reports either succeed for every tenant or fail as a whole, so the
//! fan-out collects into a single `RentResult` and stops at the first error.
//! Work is spread over rayon's pool only with the `parallel` feature and once
//! [`CollectionConfig::should_parallelize`] agrees.

use rentcycle_core::RentResult;

use crate::config::CollectionConfig;

/// Applies `f` to every item and collects the results in input order.
///
/// Returns the first error encountered. Sequentially that is the error of the
/// earliest failing item; across the pool any failing item may win.
pub fn try_fan_out<T, U, F>(items: &[T], config: &CollectionConfig, f: F) -> RentResult<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> RentResult<U> + Sync + Send,
{
    if config.should_parallelize(items.len()) {
        tracing::trace!(items = items.len(), "Fanning out across rayon pool");
        return across_pool(items, f);
    }
    items.iter().map(f).collect()
}

#[cfg(feature = "parallel")]
fn across_pool<T, U, F>(items: &[T], f: F) -> RentResult<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> RentResult<U> + Sync + Send,
{
    use rayon::prelude::*;
    items.par_iter().map(f).collect()
}

// `should_parallelize` is always false without the feature.
#[cfg(not(feature = "parallel"))]
fn across_pool<T, U, F>(items: &[T], f: F) -> RentResult<Vec<U>>
where
    F: Fn(&T) -> RentResult<U>,
{
    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentcycle_core::RentError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_results_keep_input_order() {
        let items: Vec<u32> = (0..500).collect();
        for config in [CollectionConfig::sequential(), CollectionConfig::new().with_threshold(1)] {
            let doubled = try_fan_out(&items, &config, |x| Ok(x * 2)).unwrap();
            assert_eq!(doubled, (0..500).map(|x| x * 2).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_sequential_stops_at_first_error() {
        let visited = AtomicUsize::new(0);
        let items = vec![1, 2, -3, 4, -5];

        let err = try_fan_out(&items, &CollectionConfig::sequential(), |&x| {
            visited.fetch_add(1, Ordering::Relaxed);
            if x < 0 {
                Err(RentError::invalid_input("x", format!("negative: {x}")))
            } else {
                Ok(x)
            }
        })
        .unwrap_err();

        assert_eq!(err, RentError::invalid_input("x", "negative: -3"));
        assert_eq!(visited.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_pool_surfaces_an_error() {
        let items: Vec<i64> = (0..300).collect();
        let result = try_fan_out(&items, &CollectionConfig::new().with_threshold(1), |&x| {
            if x % 100 == 99 {
                Err(RentError::invalid_input("x", x.to_string()))
            } else {
                Ok(x)
            }
        });
        assert!(matches!(result, Err(RentError::InvalidInput { .. })));
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<u8> = Vec::new();
        let out: Vec<u8> = try_fan_out(&items, &CollectionConfig::default(), |&x| Ok(x)).unwrap();
        assert!(out.is_empty());
    }
}
