//! Per-facet view of the data-loading store.
//!
//! The store owns lifecycle transitions and fetched data; views only read
//! the `Mutable`s through signals. Setters follow the `{source}_{event}`
//! naming used by the relays elsewhere in the frontend.

use indexmap::IndexMap;
use shared::{Bucket, Buckets, DataPresence, FacetId, FacetLifecycleState, placeholders_for};
use zoon::*;

/// One display row of a table facet.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetRow {
    pub cells: Vec<String>,
}

impl FacetRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone)]
pub struct FacetStore {
    pub facet: FacetId,
    state: Mutable<FacetLifecycleState>,
    rows: Mutable<Option<Vec<FacetRow>>>,
    series: Mutable<Option<Buckets>>,
}

impl FacetStore {
    pub fn new(facet: FacetId) -> Self {
        Self {
            facet,
            state: Mutable::new(FacetLifecycleState::Stale),
            rows: Mutable::new(None),
            series: Mutable::new(None),
        }
    }

    pub fn state_signal(&self) -> impl Signal<Item = FacetLifecycleState> + use<> {
        self.state.signal()
    }

    pub fn rows_signal(&self) -> impl Signal<Item = Option<Vec<FacetRow>>> + use<> {
        self.rows.signal_cloned()
    }

    pub fn series_signal(&self) -> impl Signal<Item = Option<Buckets>> + use<> {
        self.series.signal_cloned()
    }

    pub fn row_count_signal(&self) -> impl Signal<Item = Option<usize>> + use<> {
        self.rows.signal_ref(|rows| rows.as_ref().map(Vec::len))
    }

    /// Whether the classifier wants skeleton rows for this facet right now.
    pub fn placeholder_eligibility_signal(&self) -> impl Signal<Item = bool> + use<> {
        map_ref! {
            let state = self.state.signal(),
            let presence = self.rows.signal_ref(|rows| DataPresence::of(rows.as_deref())) =>
            placeholders_for(*state, *presence)
        }
        .dedupe()
    }

    pub fn state_changed(&self, state: FacetLifecycleState) {
        self.state.set_neq(state);
    }

    /// Raw tag from the wire. Unknown tags are reported and leave the current
    /// state untouched.
    pub fn state_tag_received(&self, tag: &str) {
        match tag.parse::<FacetLifecycleState>() {
            Ok(state) => self.state_changed(state),
            Err(error) => zoon::eprintln!("Facet {}: {}", self.facet, error),
        }
    }

    pub fn rows_arrived(&self, rows: Vec<FacetRow>) {
        self.rows.set(Some(rows));
    }

    pub fn series_arrived(&self, buckets: Buckets) {
        self.series.set(Some(buckets));
    }

    pub fn invalidated(&self) {
        self.rows.set(None);
        self.series.set(None);
        self.state.set_neq(FacetLifecycleState::Stale);
    }
}

// ===== DEMO LOADER =====

/// Step a facet through `Stale -> Fetching -> Partial -> Loaded` with sample
/// data so the loading feedback can be seen without a backend.
pub async fn simulate_load(store: FacetStore) {
    store.invalidated();
    Timer::sleep(300).await;
    store.state_changed(FacetLifecycleState::Fetching);
    Timer::sleep(2_500).await;

    let sample = sample_rows(store.facet);
    let (first, rest) = sample.split_at(sample.len().min(2));
    store.rows_arrived(first.to_vec());
    store.state_changed(FacetLifecycleState::Partial);
    Timer::sleep(1_500).await;

    store.rows_arrived(first.iter().chain(rest).cloned().collect());
    if store.facet == FacetId::AssetCharts {
        store.series_arrived(sample_series());
    }
    store.state_changed(FacetLifecycleState::Loaded);
    zoon::println!("Facet {} loaded", store.facet);
}

fn sample_rows(facet: FacetId) -> Vec<FacetRow> {
    match facet {
        FacetId::Statements => vec![
            FacetRow::new(["18000001", "ETH", "+1.25"]),
            FacetRow::new(["18000042", "DAI", "-300.00"]),
            FacetRow::new(["18000107", "ETH", "-0.10"]),
        ],
        FacetId::OpenApprovals => vec![
            FacetRow::new(["0x6b17...1d0f", "0x7a25...488d", "unlimited"]),
            FacetRow::new(["0xa0b8...eb48", "0xdef1...0b2f", "5000"]),
        ],
        FacetId::ApprovalLogs => vec![
            FacetRow::new(["17999950", "Approval", "0x6b17...1d0f"]),
            FacetRow::new(["17999991", "Approval", "0xa0b8...eb48"]),
        ],
        FacetId::Transfers => vec![
            FacetRow::new(["18000001", "in", "1.25 ETH"]),
            FacetRow::new(["18000042", "out", "300 DAI"]),
        ],
        FacetId::AssetCharts => vec![
            FacetRow::new(["0x6b175474e8", "DAI"]),
            FacetRow::new(["0xeeeeeeeeee", "ETH"]),
        ],
    }
}

fn sample_series() -> Buckets {
    let day = |key: &str, total: f64| Bucket::new(key, 0, 0).with_total(total);
    let series: IndexMap<String, Vec<Bucket>> = [
        ("0x6b175474e8_DAI.frequency", vec![day("20240101", 3.0), day("20240102", 1.0)]),
        ("0x6b175474e8_DAI.volume", vec![day("20240101", 1250.0), day("20240102", 80.5)]),
        ("0xeeeeeeeeee_ETH.frequency", vec![day("20240102", 2.0)]),
        ("endBal", vec![day("20240102", 4.2)]),
    ]
    .into_iter()
    .map(|(key, buckets)| (key.to_string(), buckets))
    .collect();

    Buckets {
        series,
        ..Buckets::default()
    }
}
