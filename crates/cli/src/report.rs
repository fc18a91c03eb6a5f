use anyhow::Result;
use culture_distance::{DistanceMatrix, Framework};
use culture_grouping::{FallbackReason, Partition, PartitionOutcome};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::Write as _;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    Error,
}

/// JSON envelope written to stdout in `--json` mode
#[derive(Debug, Serialize)]
pub struct Response {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl Response {
    pub fn ok(data: impl Serialize) -> Result<Self> {
        Ok(Self {
            status: Status::Ok,
            message: None,
            data: serde_json::to_value(data)?,
        })
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            data: Value::Null,
        }
    }

    pub fn print(&self) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

pub fn matrix_data(matrix: &DistanceMatrix, framework: Framework) -> Value {
    let rows: Vec<Vec<f64>> = (0..matrix.len())
        .map(|i| (0..matrix.len()).map(|j| matrix.at(i, j)).collect())
        .collect();
    let most_distant = matrix.most_distant_pair().map(|(first, second, distance)| {
        json!({ "first": first, "second": second, "distance": distance })
    });

    json!({
        "framework": framework,
        "ids": matrix.ids(),
        "rows": rows,
        "most_distant": most_distant,
    })
}

pub fn render_partition(partition: &Partition) -> String {
    let mut out = String::new();
    for (index, group) in partition.groups.iter().enumerate() {
        let _ = writeln!(out, "Group {}: {}", index + 1, group.join(", "));
    }
    let _ = writeln!(
        out,
        "Fitness: {:.4} ({})",
        partition.fitness,
        describe_outcome(&partition.outcome)
    );
    out
}

fn describe_outcome(outcome: &PartitionOutcome) -> String {
    match outcome {
        PartitionOutcome::Genetic(stats) if stats.timed_out => format!(
            "genetic search, stopped by time budget after {} generations",
            stats.generations
        ),
        PartitionOutcome::Genetic(stats) => {
            format!("genetic search, {} generations", stats.generations)
        }
        PartitionOutcome::Fallback {
            reason: FallbackReason::NoSeed,
        } => "greedy construction, no seed".to_string(),
        PartitionOutcome::Fallback {
            reason: FallbackReason::SearchFailed(detail),
        } => format!("greedy fallback after search failure: {detail}"),
    }
}

pub fn render_matrix(matrix: &DistanceMatrix) -> String {
    let width = matrix
        .ids()
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max(6);

    let mut out = String::new();
    let _ = write!(out, "{:width$}", "");
    for id in matrix.ids() {
        let _ = write!(out, " {id:>width$}");
    }
    out.push('\n');

    for (i, id) in matrix.ids().iter().enumerate() {
        let _ = write!(out, "{id:width$}");
        for j in 0..matrix.len() {
            let _ = write!(out, " {:>width$.4}", matrix.at(i, j));
        }
        out.push('\n');
    }

    if let Some((first, second, distance)) = matrix.most_distant_pair() {
        let _ = writeln!(out, "Most distant: {first} / {second} ({distance:.4})");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use culture_grouping::SearchStats;
    use pretty_assertions::assert_eq;

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![
                vec![0.0, 0.5, 0.25],
                vec![0.5, 0.0, 1.0],
                vec![0.25, 1.0, 0.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let json = serde_json::to_value(Response::error("boom")).unwrap();
        assert_eq!(json, json!({ "status": "error", "message": "boom" }));
    }

    #[test]
    fn test_ok_envelope_wraps_data() {
        let json = serde_json::to_value(Response::ok(json!({ "n": 1 })).unwrap()).unwrap();
        assert_eq!(json, json!({ "status": "ok", "data": { "n": 1 } }));
    }

    #[test]
    fn test_matrix_data_shape() {
        let data = matrix_data(&matrix(), Framework::Hall);
        assert_eq!(data["framework"], "hall");
        assert_eq!(data["ids"], json!(["a", "b", "c"]));
        assert_eq!(data["rows"][1][2], 1.0);
        assert_eq!(data["most_distant"]["first"], "b");
        assert_eq!(data["most_distant"]["second"], "c");
    }

    #[test]
    fn test_render_partition_lists_groups() {
        let partition = Partition {
            groups: vec![
                vec!["a".to_string(), "b".to_string(), "c".to_string()],
                vec!["d".to_string()],
            ],
            fitness: 1.5,
            outcome: PartitionOutcome::Genetic(SearchStats {
                generations: 12,
                timed_out: false,
                elapsed_ms: 3,
            }),
        };
        assert_eq!(
            render_partition(&partition),
            "Group 1: a, b, c\nGroup 2: d\nFitness: 1.5000 (genetic search, 12 generations)\n"
        );
    }

    #[test]
    fn test_render_matrix_names_most_distant_pair() {
        let text = render_matrix(&matrix());
        assert!(text.contains("Most distant: b / c (1.0000)"), "{text}");
        assert_eq!(text.lines().count(), 5);
    }
}
