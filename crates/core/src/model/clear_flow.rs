/// Where a clear-progress control currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClearPhase {
    /// The clear button is shown and enabled.
    #[default]
    Idle,
    /// The "are you sure?" prompt is shown. No request has been sent.
    Confirming,
    /// A clear request is in flight; the button is disabled.
    Clearing,
}

/// State machine for clearing a resource's progress.
///
/// Transitions that do not apply to the current phase are ignored, so a
/// double click can never issue a second request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearFlow {
    phase: ClearPhase,
}

impl ClearFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> ClearPhase {
        self.phase
    }

    #[must_use]
    pub fn is_confirming(&self) -> bool {
        self.phase == ClearPhase::Confirming
    }

    #[must_use]
    pub fn is_clearing(&self) -> bool {
        self.phase == ClearPhase::Clearing
    }

    /// Idle -> Confirming.
    pub fn request_clear(&mut self) {
        if self.phase == ClearPhase::Idle {
            self.phase = ClearPhase::Confirming;
        }
    }

    /// Confirming -> Idle.
    pub fn cancel(&mut self) {
        if self.phase == ClearPhase::Confirming {
            self.phase = ClearPhase::Idle;
        }
    }

    /// Confirming -> Clearing.
    ///
    /// Returns true when the caller must now issue the clear request.
    pub fn confirm(&mut self) -> bool {
        if self.phase != ClearPhase::Confirming {
            return false;
        }
        self.phase = ClearPhase::Clearing;
        true
    }

    /// Idle -> Clearing, for controls without a confirmation step.
    ///
    /// Returns true when the caller must now issue the clear request.
    pub fn start_immediate(&mut self) -> bool {
        if self.phase != ClearPhase::Idle {
            return false;
        }
        self.phase = ClearPhase::Clearing;
        true
    }

    /// Clearing -> Idle, after the request finished either way.
    pub fn settle(&mut self) {
        if self.phase == ClearPhase::Clearing {
            self.phase = ClearPhase::Idle;
        }
    }
}
