use crate::SelectedFile;
use std::sync::Arc;

/// Holds the file the user most recently picked, if any.
#[derive(Debug, Default, Clone)]
pub struct FileSelection {
    current: Option<Arc<SelectedFile>>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held file. Returns the previously held one.
    pub fn select(&mut self, file: SelectedFile) -> Option<Arc<SelectedFile>> {
        self.current.replace(Arc::new(file))
    }

    pub fn clear(&mut self) -> Option<Arc<SelectedFile>> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Arc<SelectedFile>> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn file(name: &str) -> SelectedFile {
        SelectedFile::new(name, "audio/wav", Utc::now(), name.as_bytes().to_vec())
    }

    #[test]
    fn starts_empty() {
        assert!(FileSelection::new().current().is_none());
    }

    #[test]
    fn current_is_latest_selection() {
        let mut selection = FileSelection::new();
        for name in ["a.wav", "b.wav", "c.wav"] {
            selection.select(file(name));
            assert_eq!(selection.current().unwrap().name, name);
        }
    }

    #[test]
    fn select_returns_replaced_file() {
        let mut selection = FileSelection::new();
        assert!(selection.select(file("a.wav")).is_none());
        let previous = selection.select(file("b.wav")).unwrap();
        assert_eq!(previous.name, "a.wav");
    }

    #[test]
    fn clear_drops_file() {
        let mut selection = FileSelection::new();
        selection.select(file("a.wav"));
        assert_eq!(selection.clear().unwrap().name, "a.wav");
        assert!(selection.current().is_none());
    }
}
