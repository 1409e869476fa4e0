/// Everything the list screen can be asked to do.
///
/// Key events are mapped to an `Action` first and then applied to the
/// session state. Applying an action may yield a follow-up action for the
/// screen driver, such as [`Action::Bell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    CursorUp,
    CursorDown,

    // Item operations
    ToggleDone,
    PromoteToTop,
    SwapUp,
    SwapDown,
    Edit,
    MoveBetweenLists,

    // Confirmation-gated operations
    RequestDelete,
    RequestPushStash,
    RequestPopStash,
    Confirm,
    Cancel,

    // Display
    ToggleHelp,
    ToggleItemIds,

    // Screen driver
    Bell,
    Quit,
    None,
}
