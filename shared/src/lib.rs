//! Platform-independent core of the facet views: lifecycle states, the
//! placeholder row scheduler, series grouping and the renderer registry.

pub mod config;
pub mod facet;
pub mod placeholder;
pub mod registry;
pub mod series;
pub mod timer;

pub use config::{AppSection, ConfigError, MigrationStrategy, ViewConfig, ViewSection};
pub use facet::{
    BadgeTone, FacetId, FacetLifecycleState, LegacyLoadState, UnknownFacet, UnrecognizedState,
};
pub use placeholder::{
    CYCLE_TICK_MS, DataPresence, ENTRY_DELAY_MS, PLACEHOLDER_ROW_COUNTS, PlaceholderDecision,
    PlaceholderScheduler, SchedulerPhase, placeholders_for, should_show_placeholders,
    should_show_placeholders_for_tag,
};
pub use registry::RendererRegistry;
pub use series::{
    Bucket, BucketStats, Buckets, GridInfo, GroupedSeries, Grouping, GroupingDiagnostic,
    SeriesKey, SeriesKeyError, group_series,
};
pub use timer::TimerRuntime;
