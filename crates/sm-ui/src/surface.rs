//! Display surface capability

/// Independently replaceable areas of the side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Total feature count
    Summary,
    /// Random sample list
    RandomSample,
    /// Search result / clicked feature details
    Detail,
}

/// One row of the random sample list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleEntry {
    pub name: String,
    /// Already formatted with separators
    pub population: String,
}

/// Content for a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    Summary { total: usize },
    SampleList(Vec<SampleEntry>),
    Detail { name: String, population: String, kind: String },
    Error(String),
}

/// Surface the sidebar renders into
pub trait DisplaySurface {
    /// Replace everything shown in `region`
    fn set_content(&mut self, region: Region, content: PanelContent);

    fn show_loading(&mut self);

    fn hide_loading(&mut self);

    /// Blocking-style notice for failures that end a load
    fn alert(&mut self, message: &str);
}
