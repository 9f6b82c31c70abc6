use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Which subset of a section's items is rendered. Never touches progress.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FilterMode {
    #[default]
    All,
    Pending,
    Done,
}

impl FilterMode {
    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "📋 All Questions",
            FilterMode::Pending => "⏳ Pending",
            FilterMode::Done => "✅ Done",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FilterMode::All => FilterMode::Pending,
            FilterMode::Pending => FilterMode::Done,
            FilterMode::Done => FilterMode::All,
        }
    }
}

pub fn visible(completed: bool, mode: FilterMode) -> bool {
    match mode {
        FilterMode::All => true,
        FilterMode::Done => completed,
        FilterMode::Pending => !completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn all_shows_everything() {
        assert!(visible(true, FilterMode::All));
        assert!(visible(false, FilterMode::All));
    }

    #[test]
    fn done_and_pending_partition_items() {
        for completed in [true, false] {
            let shown = visible(completed, FilterMode::Done) as u8
                + visible(completed, FilterMode::Pending) as u8;
            assert_eq!(shown, 1, "exactly one of done/pending shows an item");
        }
        assert!(visible(true, FilterMode::Done));
        assert!(visible(false, FilterMode::Pending));
    }

    #[test]
    fn cycling_visits_every_mode_once() {
        let mut mode = FilterMode::All;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(mode, FilterMode::All);
        assert_eq!(seen, FilterMode::iter().collect::<Vec<_>>());
    }

    #[test]
    fn parses_case_insensitively() -> anyhow::Result<()> {
        assert_eq!(FilterMode::from_str("Pending")?, FilterMode::Pending);
        assert_eq!(FilterMode::from_str("done")?, FilterMode::Done);
        assert!(FilterMode::from_str("finished").is_err());
        assert_eq!(FilterMode::Done.to_string(), "done");
        Ok(())
    }
}
