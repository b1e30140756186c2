//! Context-menu adapter: the only surface a shell host calls.
//!
//! Lifecycle: `initialize` with the selected paths, `query_context_menu` to
//! decide whether the single "Zap" item is shown, then `invoke` when it is
//! picked. The handler owns the selection for that whole session.

use tracing::{debug, warn};

use crate::errors::ResultCode;
use crate::selection::FolderSelection;
use crate::zap::{ZapReport, Zapper};

/// Label of the one menu item.
pub const MENU_LABEL: &str = "Zap";

#[derive(Debug, Default)]
pub struct ContextMenuHandler {
    selection: FolderSelection,
    command_id: Option<u32>,
}

impl ContextMenuHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the selection for this session. Returns the number of paths.
    ///
    /// An empty selection is an error; the handler then offers no menu item.
    pub fn initialize<I, P>(&mut self, paths: I) -> Result<usize, ResultCode>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<std::path::Path>,
    {
        self.selection = FolderSelection::new(paths);
        self.command_id = None;
        if self.selection.is_empty() {
            warn!("Initialized with an empty selection");
            return Err(ResultCode::InvalidArgument);
        }
        debug!(items = self.selection.len(), "Selection recorded");
        Ok(self.selection.len())
    }

    /// Claim `first_command_id` for the menu item. Returns false, adding
    /// nothing, when there is nothing to zap.
    pub fn query_context_menu(&mut self, first_command_id: u32) -> bool {
        if self.selection.is_empty() {
            self.command_id = None;
            return false;
        }
        self.command_id = Some(first_command_id);
        true
    }

    pub fn command_id(&self) -> Option<u32> {
        self.command_id
    }

    pub fn selection(&self) -> &FolderSelection {
        &self.selection
    }

    /// Run the item at `command_offset` (relative to the first command id).
    pub fn invoke(&self, command_offset: u32, zapper: &Zapper<'_>, recursive: bool) -> Result<ZapReport, ResultCode> {
        if self.command_id.is_none() || command_offset != 0 {
            warn!(command_offset, "Invoke without a matching menu item");
            return Err(ResultCode::InvalidArgument);
        }
        Ok(zapper.zap_all_folders(&self.selection, recursive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::host::{AssumeYes, NativeFileOps, UuidTokens};
    use assert_fs::prelude::*;

    #[test]
    fn empty_selection_adds_no_menu_item() {
        let mut h = ContextMenuHandler::new();
        let none: [&str; 0] = [];
        assert_eq!(h.initialize(none), Err(ResultCode::InvalidArgument));
        assert!(!h.query_context_menu(100));
        assert_eq!(h.command_id(), None);
    }

    #[test]
    fn invoke_requires_a_populated_menu() {
        let cfg = Config::default();
        let files = NativeFileOps::silent();
        let zapper = Zapper::new(&cfg, &AssumeYes, &files, &UuidTokens).silent(true);

        let mut h = ContextMenuHandler::new();
        h.initialize(["/nonexistent/level_zap_target"]).unwrap();
        assert!(matches!(h.invoke(0, &zapper, false), Err(ResultCode::InvalidArgument)));

        assert!(h.query_context_menu(7));
        assert_eq!(h.command_id(), Some(7));
        assert!(matches!(h.invoke(1, &zapper, false), Err(ResultCode::InvalidArgument)));
    }

    #[test]
    fn invoke_zaps_the_selection() {
        let x = assert_fs::TempDir::new().unwrap();
        x.child("foo/a.txt").write_str("a").unwrap();
        let cfg = Config::default();
        let files = NativeFileOps::silent();
        let zapper = Zapper::new(&cfg, &AssumeYes, &files, &UuidTokens).silent(true);

        let mut h = ContextMenuHandler::new();
        assert_eq!(h.initialize([x.path().join("foo")]), Ok(1));
        assert!(h.query_context_menu(0));
        let report = h.invoke(0, &zapper, false).unwrap();
        assert_eq!(report.result_code(), ResultCode::Ok);
        x.child("a.txt").assert("a");
        assert!(!x.path().join("foo").exists());
    }
}
