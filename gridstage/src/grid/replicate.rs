use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::{bounded, GridClient};

const STAGE_RULE_NAME: &str = "do_stage";

/// Replication rule body executed on the grid. The rule emits a status line
/// on its output channel; that text is logged but never parsed — the outcome
/// is derived from call success alone.
const STAGE_RULE_BODY: &str = r#"
    *res = EUDATReplication(*src_path, *stage_path, "false", "false", *response);
    if (*res) {
        writeLine("stdout", "Object replicated to stage area");
    }
    else {
        writeLine("stdout", "Replication failed: *response");
    }
"#;

/// Outcome of one replication attempt. One attempt per object, no retry.
#[derive(Debug, Clone)]
pub enum ReplicationOutcome {
    Success,
    Failure(String),
}

/// Issues the parameterized remote rule that replicates a single object on
/// the storage grid.
pub struct ReplicationInvoker {
    grid: Arc<dyn GridClient>,
    timeout: Duration,
}

impl ReplicationInvoker {
    pub fn new(grid: Arc<dyn GridClient>, timeout: Duration) -> Self {
        Self { grid, timeout }
    }

    pub async fn replicate(&self, source: &str, destination: &str) -> ReplicationOutcome {
        let inputs = vec![
            ("*src_path".to_string(), format!("\"{}\"", source)),
            ("*stage_path".to_string(), format!("\"{}\"", destination)),
        ];

        let call = self
            .grid
            .execute_rule(STAGE_RULE_NAME, STAGE_RULE_BODY, &inputs, true);

        match bounded(self.timeout, "replication rule", call).await {
            Ok(output) => {
                debug!(source, destination, %output, "replication rule completed");
                ReplicationOutcome::Success
            }
            Err(e) => ReplicationOutcome::Failure(e.to_string()),
        }
    }
}
