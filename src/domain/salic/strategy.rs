//! Query filters and the randomized search strategy pool.
//!
//! All randomness used by the SALIC search lives in [`SearchPolicy`], which
//! can be seeded or switched to a fixed order so tests stay deterministic.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Mutex;

/// Offsets the diversified search draws from.
pub const OFFSETS: [u32; 11] = [0, 25, 50, 75, 100, 150, 200, 300, 500, 750, 1000];

/// States (UF) the diversified search draws from.
pub const STATES: [&str; 12] = [
    "SP", "RJ", "MG", "RS", "PR", "SC", "BA", "PE", "CE", "GO", "DF", "ES",
];

/// Filters for one dataset query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilters {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub state: Option<String>,
}

impl QueryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Query parameters in request order, empty values skipped.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(state) = self.state.as_ref().filter(|s| !s.is_empty()) {
            params.push(("uf", state.clone()));
        }
        params
    }
}

/// A named query attempted during diversified search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStrategy {
    pub name: &'static str,
    pub filters: QueryFilters,
}

impl SearchStrategy {
    fn new(name: &'static str, filters: QueryFilters) -> Self {
        Self { name, filters }
    }
}

/// Pages scanned when an identifier is not in the recently-displayed cache.
///
/// Records beyond these pages cannot be found by identifier.
pub fn lookup_pages() -> Vec<QueryFilters> {
    vec![
        QueryFilters::new().limit(50),
        QueryFilters::new().limit(100).offset(0),
        QueryFilters::new().limit(50).offset(50),
        QueryFilters::new().limit(50).offset(100),
    ]
}

/// Source of randomness for the diversified search.
#[derive(Debug)]
pub struct SearchPolicy {
    rng: Option<Mutex<StdRng>>,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self::random()
    }
}

impl SearchPolicy {
    /// Entropy-seeded policy for production use.
    pub fn random() -> Self {
        Self {
            rng: Some(Mutex::new(StdRng::from_entropy())),
        }
    }

    /// Reproducible policy.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// No randomness: strategies keep their declared order, draws take the
    /// first candidate and shuffles are no-ops.
    pub fn ordered() -> Self {
        Self { rng: None }
    }

    /// Builds the strategy pool for one search, in the order to try it.
    pub fn strategies(&self) -> Vec<SearchStrategy> {
        let mut pool = vec![
            SearchStrategy::new("recent", QueryFilters::new().limit(8).offset(self.offset())),
            SearchStrategy::new("varied", QueryFilters::new().limit(6).offset(self.offset())),
            SearchStrategy::new("by-state", QueryFilters::new().state(self.state()).limit(7)),
            SearchStrategy::new("regional", QueryFilters::new().state(self.state()).limit(5)),
            SearchStrategy::new("middle-page", QueryFilters::new().limit(6).offset(50)),
            SearchStrategy::new("deep-page", QueryFilters::new().limit(8).offset(150)),
            SearchStrategy::new("general", QueryFilters::new().limit(10)),
        ];
        self.shuffle(&mut pool);
        pool
    }

    /// Shuffles in place unless the policy is ordered.
    pub fn shuffle<T>(&self, items: &mut [T]) {
        if let Some(rng) = &self.rng {
            let mut rng = rng.lock().unwrap_or_else(|e| e.into_inner());
            items.shuffle(&mut *rng);
        }
    }

    fn offset(&self) -> u32 {
        self.choose(&OFFSETS).copied().unwrap_or(0)
    }

    fn state(&self) -> String {
        self.choose(&STATES).copied().unwrap_or("SP").to_string()
    }

    fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        match &self.rng {
            Some(rng) => {
                let mut rng = rng.lock().unwrap_or_else(|e| e.into_inner());
                items.choose(&mut *rng)
            }
            None => items.first(),
        }
    }
}
