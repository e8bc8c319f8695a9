//! Referral attribution capture.
//!
//! Attribution is re-derived from the query string on every page load and
//! pushed through a storage port: the most recent visit always wins, and a
//! direct visit (no `am_id` parameter) erases whatever was stored before.
//! The port keeps the capture logic pure; production drives a browser
//! cookie jar through it, tests use [`MemoryStore`].

use std::collections::HashMap;

/// Query parameter / storage key carrying the affiliate token.
pub const AFFILIATE_KEY: &str = "am_id";
/// Query parameter / storage key carrying the visitor fingerprint.
pub const FINGERPRINT_KEY: &str = "am_fingerprint";
/// How long stored attribution stays valid: 30 days, in seconds.
pub const ATTRIBUTION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Attribution derived from a single page load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributionState {
    pub affiliate_id: Option<String>,
    pub fingerprint: Option<String>,
}

/// Derive attribution from page-load query parameters.
///
/// Empty parameter values count as absent.
pub fn capture<'a, I>(query: I) -> AttributionState
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut state = AttributionState::default();
    for (key, value) in query {
        if value.is_empty() {
            continue;
        }
        match key {
            AFFILIATE_KEY => state.affiliate_id = Some(value.to_string()),
            FINGERPRINT_KEY => state.fingerprint = Some(value.to_string()),
            _ => {}
        }
    }
    state
}

/// Storage port for attribution state.
pub trait AttributionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn clear(&mut self, key: &str);
}

/// Write captured state through the port: present keys are set, absent keys
/// are cleared.
pub fn apply(state: &AttributionState, store: &mut dyn AttributionStore) {
    match &state.affiliate_id {
        Some(id) => store.set(AFFILIATE_KEY, id),
        None => store.clear(AFFILIATE_KEY),
    }
    match &state.fingerprint {
        Some(fp) => store.set(FINGERPRINT_KEY, fp),
        None => store.clear(FINGERPRINT_KEY),
    }
}

/// Read previously stored attribution back out of the port.
pub fn load(store: &dyn AttributionStore) -> AttributionState {
    AttributionState {
        affiliate_id: store.get(AFFILIATE_KEY),
        fingerprint: store.get(FINGERPRINT_KEY),
    }
}

/// In-memory store, used in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl AttributionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn clear(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_reads_both_parameters() {
        let state = capture([("am_id", "aff-42"), ("am_fingerprint", "fp-1")]);
        assert_eq!(state.affiliate_id.as_deref(), Some("aff-42"));
        assert_eq!(state.fingerprint.as_deref(), Some("fp-1"));
    }

    #[test]
    fn capture_ignores_unknown_and_empty_parameters() {
        let state = capture([("utm_source", "mail"), ("am_id", "")]);
        assert_eq!(state, AttributionState::default());
    }

    #[test]
    fn apply_overwrites_previous_attribution() {
        let mut store = MemoryStore::default();
        store.set(AFFILIATE_KEY, "old-affiliate");

        let state = capture([("am_id", "new-affiliate")]);
        apply(&state, &mut store);

        assert_eq!(store.get(AFFILIATE_KEY).as_deref(), Some("new-affiliate"));
    }

    #[test]
    fn direct_visit_clears_stored_attribution() {
        let mut store = MemoryStore::default();
        store.set(AFFILIATE_KEY, "aff-42");
        store.set(FINGERPRINT_KEY, "fp-1");

        apply(&capture([]), &mut store);

        assert_eq!(store.get(AFFILIATE_KEY), None);
        assert_eq!(store.get(FINGERPRINT_KEY), None);
    }

    #[test]
    fn load_roundtrips_applied_state() {
        let mut store = MemoryStore::default();
        let state = capture([("am_id", "aff-42"), ("am_fingerprint", "fp-1")]);
        apply(&state, &mut store);

        assert_eq!(load(&store), state);
    }
}
