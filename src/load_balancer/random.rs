//! Uniform random load balancing strategy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use crate::load_balancer::{LoadBalancer, endpoint::Endpoint};

/// Random selector over an injected, seedable generator.
#[derive(Debug)]
pub struct RandomSelector {
    rng: Mutex<StdRng>,
}

impl RandomSelector {
    /// Selector seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic selector.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl LoadBalancer for RandomSelector {
    fn next_endpoint<'a>(&self, endpoints: &'a [Endpoint]) -> Option<&'a Endpoint> {
        if endpoints.is_empty() {
            return None;
        }
        let index = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .gen_range(0..endpoints.len());
        endpoints.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn endpoints(n: usize) -> Vec<Endpoint> {
        (1..=n)
            .map(|i| Endpoint::new(format!("stat-proxy-{}", i)).unwrap())
            .collect()
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let pool = endpoints(9);
        let a = RandomSelector::seeded(42);
        let b = RandomSelector::seeded(42);

        for _ in 0..20 {
            assert_eq!(a.next_endpoint(&pool), b.next_endpoint(&pool));
        }
    }

    #[test]
    fn test_covers_whole_pool() {
        let pool = endpoints(9);
        let lb = RandomSelector::seeded(7);
        let seen: HashSet<_> = (0..1000)
            .filter_map(|_| lb.next_endpoint(&pool))
            .map(|e| e.host.clone())
            .collect();
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_empty_pool() {
        let lb = RandomSelector::seeded(1);
        assert!(lb.next_endpoint(&[]).is_none());
    }
}
