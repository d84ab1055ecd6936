/// Which pane receives navigation keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    SealInput,
    Applications,
    Pools,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::SealInput => Focus::Applications,
            Focus::Applications => Focus::Pools,
            Focus::Pools => Focus::SealInput,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::SealInput => Focus::Pools,
            Focus::Applications => Focus::SealInput,
            Focus::Pools => Focus::Applications,
        }
    }
}

/// Cursor position inside the application and pool lists.
#[derive(Clone, Debug, Default)]
pub struct CursorState {
    pub app_index: usize,
    pub pool_index: usize,
}

impl CursorState {
    /// Keep both cursors inside their lists after the lists change.
    pub fn clamp(&mut self, app_len: usize, pool_len: usize) {
        self.app_index = self.app_index.min(app_len.saturating_sub(1));
        self.pool_index = self.pool_index.min(pool_len.saturating_sub(1));
    }
}
