use serde::Serialize;

/// What happened to one file during a run.
pub enum Outcome {
    Moved,
    Skipped,
    Failed,
}

impl Outcome {
    pub fn record(self, stats: &mut RunStats) {
        match self {
            Outcome::Moved => stats.moved += 1,
            Outcome::Skipped => stats.skipped += 1,
            Outcome::Failed => stats.failed += 1,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub moved: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunStats {
    pub fn seen(&self) -> usize {
        self.moved + self.skipped + self.failed
    }
}

/// Outcome of a keyword refresh.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshStats {
    pub updated: usize,
    pub skipped: usize,
}

pub fn log_skip(file: &str, reason: impl std::fmt::Display) {
    tracing::warn!("skipped '{}' ({})", file, reason);
}

pub fn log_moved(file: &str, dest: impl std::fmt::Display) {
    tracing::info!("moved '{}' to '{}'", file, dest);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let mut stats = RunStats::default();
        Outcome::Moved.record(&mut stats);
        Outcome::Moved.record(&mut stats);
        Outcome::Skipped.record(&mut stats);
        Outcome::Failed.record(&mut stats);

        assert_eq!(
            stats,
            RunStats {
                moved: 2,
                skipped: 1,
                failed: 1
            }
        );
        assert_eq!(stats.seen(), 4);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&RunStats::default()).unwrap();
        assert_eq!(json, r#"{"moved":0,"skipped":0,"failed":0}"#);
    }
}
