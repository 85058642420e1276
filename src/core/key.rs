/// Keyboard commands understood by the dispatcher, independent of the physical key pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Quit,
    Confirm,
    Back,
    NavigateUp,
    NavigateDown,
    PageForward,
    PageBackward,
    JumpTop,
    JumpBottom,
    ActivateSearch,
    /// A printable character for whichever text buffer is active.
    Char(char),
    Backspace,
    ToggleInputMode,
    SubmitText,
    /// Invoke the function being edited regardless of input mode.
    Execute,
    ScrollUp,
    ScrollDown,
    Help,
}
