use shared::{
    BadgeTone, Bucket, BucketStats, Buckets, FacetLifecycleState, GroupedSeries,
    PlaceholderDecision,
};
use zoon::*;

use crate::facet_store::{FacetRow, FacetStore};
use crate::placeholder_rows::PlaceholderRows;
use crate::renderers::renderers;

const ROW_HEIGHT: u32 = 24;
const BORDER_COLOR: &str = "oklch(88% 0.02 255)";
const MUTED_TEXT: &str = "oklch(55% 0.025 255)";
const SKELETON_COLOR: &str = "oklch(93% 0.01 255)";

fn tone_color(tone: BadgeTone) -> &'static str {
    match tone {
        BadgeTone::Gray => "oklch(60% 0.01 255)",
        BadgeTone::Blue => "oklch(60% 0.15 250)",
        BadgeTone::Yellow => "oklch(78% 0.15 85)",
        BadgeTone::Green => "oklch(65% 0.15 150)",
        BadgeTone::Red => "oklch(60% 0.2 25)",
    }
}

fn empty_state_hint(text: &str) -> impl Element {
    El::new()
        .s(Padding::all(20))
        .s(Font::new().color(MUTED_TEXT).italic())
        .child(text)
}

// ===== FACET PANEL =====

/// Header, skeleton rows and the facet's registered renderer.
///
/// The panel owns its `PlaceholderRows`; they are dropped, timers included,
/// when the panel leaves the DOM.
pub fn facet_panel(store: FacetStore, show_state_badge: bool) -> impl Element {
    let placeholder_rows = PlaceholderRows::new(&store);
    let decision = placeholder_rows.decision_signal();
    let render = *renderers().get(store.facet);

    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(8))
        .item(state_display(&store, show_state_badge))
        .item(El::new().s(Width::fill()).child_signal(decision.map(skeleton_rows)))
        .item(render(&store))
        .item_signal(map_ref! {
            let state = store.state_signal(),
            let rows = store.row_count_signal() =>
            (*state == FacetLifecycleState::Error && rows.is_none())
                .then(|| empty_state_hint("Failed to load facet data"))
        })
        .update_raw_el(move |raw_el| raw_el.after_remove(move |_| drop(placeholder_rows)))
}

fn state_display(store: &FacetStore, show_state_badge: bool) -> impl Element {
    Row::new()
        .s(Gap::new().x(12))
        .s(Padding::new().x(16).y(8))
        .s(Borders::new().bottom(Border::new().color(BORDER_COLOR)))
        .s(Align::new().center_y())
        .item(
            El::new()
                .s(Font::new().size(13).color(MUTED_TEXT))
                .child(format!("Facet: {}", store.facet.display_name())),
        )
        .item_signal(
            store
                .state_signal()
                .map(move |state| show_state_badge.then(|| state_badge(state))),
        )
        .item_signal(store.row_count_signal().map(|count| {
            count.map(|count| {
                El::new()
                    .s(Font::new().size(13).color(MUTED_TEXT))
                    .child(format!("Items: {count}"))
            })
        }))
}

fn state_badge(state: FacetLifecycleState) -> impl Element {
    El::new()
        .s(Padding::new().x(8).y(2))
        .s(RoundedCorners::all(4))
        .s(Background::new().color(tone_color(state.tone())))
        .s(Font::new().size(11).weight(FontWeight::Medium).color("white"))
        .child(state.label())
}

// ===== SKELETON ROWS =====

fn skeleton_rows(decision: PlaceholderDecision) -> Option<impl Element> {
    decision.is_visible().then(|| {
        Column::new()
            .s(Width::fill())
            .s(Gap::new().y(4))
            .items((0..decision.row_count()).map(|_| skeleton_row()))
    })
}

fn skeleton_row() -> impl Element {
    El::new()
        .s(Width::fill())
        .s(Height::exact(ROW_HEIGHT))
        .s(RoundedCorners::all(3))
        .s(Background::new().color(SKELETON_COLOR))
}

// ===== TABLES =====

pub fn rows_table(headers: &'static [&'static str], store: &FacetStore) -> impl Element {
    El::new().s(Width::fill()).child_signal(store.rows_signal().map(move |rows| {
        rows.filter(|rows| !rows.is_empty()).map(|rows| {
            Column::new()
                .s(Width::fill())
                .item(table_row(headers.iter().map(|header| header.to_string()), true))
                .items(rows.into_iter().map(|FacetRow { cells }| table_row(cells, false)))
        })
    }))
}

fn table_row(cells: impl IntoIterator<Item = String>, header: bool) -> impl Element {
    Row::new()
        .s(Width::fill())
        .s(Height::exact(ROW_HEIGHT))
        .s(Gap::new().x(16))
        .s(Padding::new().x(16))
        .s(Borders::new().bottom(Border::new().color(BORDER_COLOR)))
        .s(Font::new().size(12).weight(if header {
            FontWeight::Bold
        } else {
            FontWeight::Regular
        }))
        .items(cells.into_iter().map(|cell| El::new().s(Width::fill()).child(cell)))
}

/// Asset charts: one section per entity, one table per metric.
pub fn grouped_series_tables(store: &FacetStore) -> impl Element {
    El::new()
        .s(Width::fill())
        .child_signal(store.series_signal().map(|series| series.map(series_sections)))
}

fn series_sections(payload: Buckets) -> impl Element {
    let grouping = payload.grouped();
    for diagnostic in &grouping.diagnostics {
        zoon::eprintln!("Asset charts: {}", diagnostic);
    }
    grouped_series_view(grouping.series)
}

fn grouped_series_view(series: GroupedSeries) -> RawElOrText {
    if series.is_empty() {
        return empty_state_hint("No chart series").unify();
    }
    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(16))
        .items(series.into_inner().into_iter().map(|(entity, metrics)| {
            Column::new()
                .s(Width::fill())
                .s(Gap::new().y(6))
                .item(
                    El::new()
                        .s(Padding::new().x(16))
                        .s(Font::new().size(13).weight(FontWeight::Bold))
                        .child(entity),
                )
                .items(
                    metrics
                        .into_iter()
                        .map(|(metric, buckets)| metric_table(metric, buckets)),
                )
        }))
        .unify()
}

fn metric_table(metric: String, buckets: Vec<Bucket>) -> impl Element {
    let stats = BucketStats::from_buckets(&buckets);
    Column::new()
        .s(Width::fill())
        .item(
            El::new()
                .s(Padding::new().x(16))
                .s(Font::new().size(12).color(MUTED_TEXT))
                .child(format!(
                    "{metric}: {} buckets, total {:.2}, avg {:.2}, min {:.2}, max {:.2}",
                    stats.count, stats.total, stats.average, stats.min, stats.max
                )),
        )
        .item(table_row(
            ["Bucket", "Start", "End", "Total"].map(String::from),
            true,
        ))
        .items(buckets.into_iter().map(|bucket| {
            table_row(
                [
                    bucket.bucket_key,
                    bucket.start_block.to_string(),
                    bucket.end_block.to_string(),
                    format!("{:.2}", bucket.total),
                ],
                false,
            )
        }))
}
