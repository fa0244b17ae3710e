use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ===== BUCKET TYPES =====

/// One time-windowed aggregate within a named series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    #[serde(rename = "bucketIndex")]
    pub bucket_key: String,
    pub start_block: u64,
    pub end_block: u64,
    pub total: f64,
    #[serde(default)]
    pub color_value: f64,
}

impl Bucket {
    pub fn new(bucket_key: impl Into<String>, start_block: u64, end_block: u64) -> Self {
        Self {
            bucket_key: bucket_key.into(),
            start_block,
            end_block,
            total: 0.0,
            color_value: 0.0,
        }
    }

    pub fn with_total(mut self, total: f64) -> Self {
        self.total = total;
        self
    }
}

/// Series payload as delivered for a facet.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Buckets {
    #[serde(default)]
    pub series: IndexMap<String, Vec<Bucket>>,
    #[serde(default)]
    pub grid_info: GridInfo,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridInfo {
    pub rows: usize,
    pub columns: usize,
    pub max_block: u64,
    pub size: u64,
    pub bucket_count: usize,
}

impl Default for GridInfo {
    fn default() -> Self {
        Self {
            rows: 0,
            columns: 20,
            max_block: 0,
            size: 100_000,
            bucket_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BucketStats {
    pub total: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl BucketStats {
    /// Summary of one series; all zero when the series is empty.
    pub fn from_buckets(buckets: &[Bucket]) -> Self {
        let Some(first) = buckets.first() else {
            return Self::default();
        };
        let (total, min, max) = buckets.iter().fold(
            (0.0, first.total, first.total),
            |(total, min, max), bucket| {
                (total + bucket.total, min.min(bucket.total), max.max(bucket.total))
            },
        );
        Self {
            total,
            average: total / buckets.len() as f64,
            min,
            max,
            count: buckets.len(),
        }
    }
}

// ===== SERIES KEYS =====

/// `"<entity>.<metric>"`, split on the last dot. Entities may contain dots,
/// metrics may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesKey<'a> {
    pub entity: &'a str,
    pub metric: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeriesKeyError {
    #[error("series name '{0}' has no '.' separator")]
    MissingSeparator(String),
}

impl<'a> SeriesKey<'a> {
    pub fn parse(key: &'a str) -> Result<Self, SeriesKeyError> {
        key.rsplit_once('.')
            .map(|(entity, metric)| Self { entity, metric })
            .ok_or_else(|| SeriesKeyError::MissingSeparator(key.to_string()))
    }
}

// ===== GROUPING =====

/// `entity -> metric -> buckets`, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedSeries(IndexMap<String, IndexMap<String, Vec<Bucket>>>);

impl GroupedSeries {
    pub fn entities(&self) -> impl Iterator<Item = (&str, &IndexMap<String, Vec<Bucket>>)> {
        self.0.iter().map(|(entity, metrics)| (entity.as_str(), metrics))
    }

    pub fn entity(&self, entity: &str) -> Option<&IndexMap<String, Vec<Bucket>>> {
        self.0.get(entity)
    }

    pub fn metric(&self, entity: &str, metric: &str) -> Option<&[Bucket]> {
        self.0.get(entity)?.get(metric).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, IndexMap<String, Vec<Bucket>>> {
        self.0
    }
}

/// Reported for an input entry that was skipped during grouping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupingDiagnostic {
    #[error("invalid series name format: {key}")]
    InvalidSeriesName { key: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouping {
    pub series: GroupedSeries,
    pub diagnostics: Vec<GroupingDiagnostic>,
}

/// Reshape flat `entity.metric` series into `entity -> metric -> buckets`.
///
/// Malformed keys are skipped and reported in `diagnostics`; the rest of the
/// input is still grouped. A repeated `(entity, metric)` pair keeps its first
/// position but takes the later buckets. The input is only read.
pub fn group_series<I, K, V>(series: I) -> Grouping
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<[Bucket]>,
{
    let mut grouping = Grouping::default();
    for (key, buckets) in series {
        let key = key.as_ref();
        match SeriesKey::parse(key) {
            Ok(SeriesKey { entity, metric }) => {
                grouping
                    .series
                    .0
                    .entry(entity.to_string())
                    .or_default()
                    .insert(metric.to_string(), buckets.as_ref().to_vec());
            }
            Err(_) => grouping.diagnostics.push(GroupingDiagnostic::InvalidSeriesName {
                key: key.to_string(),
            }),
        }
    }
    grouping
}

impl Buckets {
    pub fn grouped(&self) -> Grouping {
        group_series(&self.series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(key: &str, total: f64) -> Bucket {
        Bucket::new(key, 0, 0).with_total(total)
    }

    #[test]
    fn test_series_key_splits_on_last_dot() {
        assert_eq!(
            SeriesKey::parse("0xabc.eth.volume"),
            Ok(SeriesKey { entity: "0xabc.eth", metric: "volume" })
        );
        assert_eq!(
            SeriesKey::parse("nodot"),
            Err(SeriesKeyError::MissingSeparator("nodot".to_string()))
        );
    }

    #[test]
    fn test_group_skips_malformed_keys() {
        let (b1, b2, b3) = (bucket("d1", 1.0), bucket("d2", 2.0), bucket("d3", 3.0));
        let input: IndexMap<String, Vec<Bucket>> = [
            ("foo.bar".to_string(), vec![b1.clone()]),
            ("nodot".to_string(), vec![b2]),
            ("a.b.c".to_string(), vec![b3.clone()]),
        ]
        .into_iter()
        .collect();

        let grouping = group_series(&input);

        assert_eq!(grouping.series.len(), 2);
        assert_eq!(grouping.series.metric("foo", "bar"), Some(&[b1][..]));
        assert_eq!(grouping.series.metric("a.b", "c"), Some(&[b3][..]));
        assert_eq!(grouping.series.entity("nodot"), None);
        assert_eq!(
            grouping.diagnostics,
            vec![GroupingDiagnostic::InvalidSeriesName { key: "nodot".to_string() }]
        );
        assert_eq!(
            grouping.diagnostics[0].to_string(),
            "invalid series name format: nodot"
        );
        assert_eq!(input.len(), 3);
    }

    #[test]
    fn test_group_later_duplicate_wins() {
        let (b1, b2) = (bucket("d1", 1.0), bucket("d2", 2.0));
        let grouping = group_series(vec![("x.y", vec![b1]), ("x.y", vec![b2.clone()])]);

        assert_eq!(grouping.series.len(), 1);
        assert_eq!(grouping.series.metric("x", "y"), Some(&[b2][..]));
        assert!(grouping.diagnostics.is_empty());
    }

    #[test]
    fn test_group_preserves_order_and_is_repeatable() {
        let input = vec![
            ("eth.volume", vec![bucket("2024-01-02", 2.0), bucket("2024-01-01", 1.0)]),
            ("dai.volume", vec![bucket("2024-01-01", 5.0)]),
            ("eth.frequency", vec![bucket("2024-01-01", 3.0)]),
        ];

        let first = group_series(input.clone());
        let second = group_series(input);
        assert_eq!(first, second);

        let entities: Vec<&str> = first.series.entities().map(|(entity, _)| entity).collect();
        assert_eq!(entities, ["eth", "dai"]);

        let eth_metrics: Vec<&String> = first.series.entity("eth").unwrap().keys().collect();
        assert_eq!(eth_metrics, ["volume", "frequency"]);

        let keys: Vec<&str> = first.series.metric("eth", "volume").unwrap()
            .iter()
            .map(|bucket| bucket.bucket_key.as_str())
            .collect();
        assert_eq!(keys, ["2024-01-02", "2024-01-01"]);
    }

    #[test]
    fn test_group_empty_input() {
        let grouping = group_series(Vec::<(String, Vec<Bucket>)>::new());
        assert!(grouping.series.is_empty());
        assert!(grouping.diagnostics.is_empty());
    }

    #[test]
    fn test_buckets_payload_from_json() {
        let json = r#"{
            "series": {
                "0x1234.frequency": [
                    {"bucketIndex": "20240101", "startBlock": 1, "endBlock": 9, "total": 4.0}
                ],
                "broken": []
            },
            "gridInfo": {"rows": 1, "columns": 4, "maxBlock": 9, "size": 86400, "bucketCount": 1}
        }"#;
        let payload: Buckets = serde_json::from_str(json).unwrap();
        assert_eq!(payload.grid_info.size, 86400);

        let grouping = payload.grouped();
        let buckets = grouping.series.metric("0x1234", "frequency").unwrap();
        assert_eq!(buckets[0].end_block, 9);
        assert_eq!(buckets[0].color_value, 0.0);
        assert_eq!(grouping.diagnostics.len(), 1);
    }

    #[test]
    fn test_bucket_stats() {
        let stats = BucketStats::from_buckets(&[bucket("a", 2.0), bucket("b", -1.0), bucket("c", 5.0)]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total, 6.0);
        assert_eq!(stats.average, 2.0);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 5.0);

        assert_eq!(BucketStats::from_buckets(&[]), BucketStats::default());
    }
}
