use serde::{Deserialize, Serialize};

use crate::render::LayoutPatch;

pub const FILE_INSTRUCTION: &str = "Add files by dragging and dropping anywhere.";
pub const TRACE_INSTRUCTION: &str = "Select a file, x column and y column to plot a series.";

/// Where the instruction title currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleStage {
    AwaitingFile,
    AwaitingTrace,
    Done,
    /// The user wrote their own title; the guide never touches it again.
    UserAuthored,
}

/// Drives the chart title through the onboarding instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TitleGuide {
    stage: TitleStage,
    current: Option<String>,
}

impl TitleGuide {
    pub(super) fn new(enabled: bool) -> Self {
        if enabled {
            Self {
                stage: TitleStage::AwaitingFile,
                current: Some(FILE_INSTRUCTION.to_owned()),
            }
        } else {
            Self {
                stage: TitleStage::Done,
                current: None,
            }
        }
    }

    pub(super) fn stage(&self) -> TitleStage {
        self.stage
    }

    pub(super) fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Advances after a successful file load.
    pub(super) fn on_file_loaded(&mut self) -> Option<LayoutPatch> {
        if self.stage != TitleStage::AwaitingFile {
            return None;
        }
        self.stage = TitleStage::AwaitingTrace;
        Some(self.retitle(TRACE_INSTRUCTION))
    }

    /// Clears the instruction once a series first renders data.
    pub(super) fn on_series_configured(&mut self) -> Option<LayoutPatch> {
        if !matches!(
            self.stage,
            TitleStage::AwaitingFile | TitleStage::AwaitingTrace
        ) {
            return None;
        }
        self.stage = TitleStage::Done;
        Some(self.retitle(""))
    }

    /// Records a title edit made at the chart. Instruction text is ignored.
    pub(super) fn on_title_edited(&mut self, text: &str) -> bool {
        if text == FILE_INSTRUCTION || text == TRACE_INSTRUCTION {
            return false;
        }
        self.stage = TitleStage::UserAuthored;
        self.current = Some(text.to_owned());
        true
    }

    fn retitle(&mut self, text: &str) -> LayoutPatch {
        self.current = Some(text.to_owned());
        LayoutPatch::title(text)
    }
}

#[cfg(test)]
mod tests {
    use super::{FILE_INSTRUCTION, TRACE_INSTRUCTION, TitleGuide, TitleStage};

    #[test]
    fn walks_through_instruction_stages() {
        let mut guide = TitleGuide::new(true);
        assert_eq!(guide.current(), Some(FILE_INSTRUCTION));

        let patch = guide.on_file_loaded().expect("file instruction advances");
        assert_eq!(patch.title.as_deref(), Some(TRACE_INSTRUCTION));
        assert!(guide.on_file_loaded().is_none());

        let patch = guide.on_series_configured().expect("trace instruction clears");
        assert_eq!(patch.title.as_deref(), Some(""));
        assert_eq!(guide.stage(), TitleStage::Done);
        assert!(guide.on_series_configured().is_none());
    }

    #[test]
    fn user_title_stops_the_guide() {
        let mut guide = TitleGuide::new(true);
        assert!(!guide.on_title_edited(FILE_INSTRUCTION));
        assert!(guide.on_title_edited("Run 42"));
        assert!(guide.on_file_loaded().is_none());
        assert!(guide.on_series_configured().is_none());
        assert_eq!(guide.current(), Some("Run 42"));
    }

    #[test]
    fn disabled_guide_emits_nothing() {
        let mut guide = TitleGuide::new(false);
        assert_eq!(guide.current(), None);
        assert!(guide.on_file_loaded().is_none());
        assert!(guide.on_series_configured().is_none());
    }
}
