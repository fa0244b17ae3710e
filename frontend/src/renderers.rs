use shared::{FacetId, RendererRegistry};
use std::sync::OnceLock;
use zoon::*;

use crate::facet_store::FacetStore;
use crate::views::{grouped_series_tables, rows_table};

pub type FacetRenderer = fn(&FacetStore) -> RawElOrText;

/// Facet id -> presentation component. Adding a `FacetId` variant without
/// an arm here does not compile.
pub fn renderers() -> &'static RendererRegistry<FacetRenderer> {
    static RENDERERS: OnceLock<RendererRegistry<FacetRenderer>> = OnceLock::new();
    RENDERERS.get_or_init(|| {
        RendererRegistry::from_fn(|facet| -> FacetRenderer {
            match facet {
                FacetId::Statements => render_statements,
                FacetId::OpenApprovals => render_open_approvals,
                FacetId::ApprovalLogs => render_approval_logs,
                FacetId::Transfers => render_transfers,
                FacetId::AssetCharts => render_asset_charts,
            }
        })
    })
}

fn render_statements(store: &FacetStore) -> RawElOrText {
    rows_table(&["Block", "Asset", "Net"], store).unify()
}

fn render_open_approvals(store: &FacetStore) -> RawElOrText {
    rows_table(&["Token", "Spender", "Allowance"], store).unify()
}

fn render_approval_logs(store: &FacetStore) -> RawElOrText {
    rows_table(&["Block", "Event", "Token"], store).unify()
}

fn render_transfers(store: &FacetStore) -> RawElOrText {
    rows_table(&["Block", "Direction", "Amount"], store).unify()
}

fn render_asset_charts(store: &FacetStore) -> RawElOrText {
    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(12))
        .item(rows_table(&["Asset", "Symbol"], store))
        .item(grouped_series_tables(store))
        .unify()
}
